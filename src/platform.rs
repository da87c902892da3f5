//! Host boot-configuration collaborators
//!
//! The board only works once the host routes audio and serial lines the way
//! it expects. Those settings live in the host's boot config and kernel
//! command line, outside this crate; these traits are the narrow seam the
//! initialization sequence drives them through.
//!
//! Methods that touch persisted boot configuration report whether a reboot
//! is now needed for the change to take effect.

/// HDMI audio and drive configuration
pub trait HdmiConfig {
    /// Route system audio to HDMI
    ///
    /// Returns `false` if the routing could not be changed.
    fn set_as_audio_output(&mut self) -> bool;

    /// Set the HDMI drive mode in the boot config
    ///
    /// Returns `true` if the boot config changed and a reboot is pending.
    fn set_drive_mode(&mut self, mode: u8) -> bool;
}

/// Serial port configuration
pub trait UartConfig {
    /// Whether the UART is enabled in the boot config
    fn uart_enabled(&self) -> bool;

    /// Enable or disable the UART in the boot config
    fn set_uart_enabled(&mut self, enable: bool);

    /// Remove the serial console from the kernel command line
    ///
    /// Returns `true` if a console entry was removed, which requires a reboot.
    fn remove_serial_console_from_cmdline(&mut self) -> bool;
}

/// Inter-chip (I2S) audio configuration
pub trait I2sConfig {
    /// Whether I2S audio is currently enabled
    fn i2s_enabled(&self) -> bool;

    /// Enable or disable I2S audio; takes effect after a reboot
    fn set_i2s_enabled(&mut self, enable: bool);
}

/// Everything the initialization sequence needs from the host
///
/// Implemented automatically for any type implementing all three
/// collaborator traits.
pub trait BootConfig: HdmiConfig + UartConfig + I2sConfig {}

impl<T> BootConfig for T where T: HdmiConfig + UartConfig + I2sConfig {}

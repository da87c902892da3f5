//! Board bring-up and high-level control
//!
//! [`PulseHat`] ties the status register driver to the host boot
//! configuration. Enabling the board first makes sure the host is set up
//! for the hub generation it is plugged into; only when no reboot is needed
//! is the status register programmed, so the board is never left
//! half-configured across a reboot.
//!
//! # Example
//!
//! ```ignore
//! # use pulse_hat::{HostDevice, I2cInterface, PulseHat};
//! let mut hat = PulseHat::new(I2cInterface::default(i2c), boot_config, HostDevice::PiTop3);
//!
//! let result = hat.enable_device();
//! if result.secondary_mode_required {
//!     // switch the host from HDMI to I2S audio once running
//! }
//! ```

use crate::Error;
use crate::device::{DeviceState, PulseDriver};
use crate::host::{HostDevice, HubGeneration};
use crate::platform::BootConfig;
use crate::registers::MicSampleRate;

use device_driver::RegisterInterface;

/// HDMI drive mode the board needs (2 = normal HDMI, sound enabled)
pub const HDMI_DRIVE_MODE: u8 = 2;

/// Outcome of [`PulseHat::enable_device`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InitResult {
    /// The status register was programmed and the board is ready
    pub enabled: bool,
    /// Host boot configuration changed; reboot before enabling again
    pub reboot_required: bool,
    /// Host is ready but still has to switch its audio from HDMI to I2S
    /// once running (pi-top [3] hub only)
    pub secondary_mode_required: bool,
}

/// One boot-configuration action, reporting whether it requires a reboot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigStep {
    /// Route system audio to HDMI. Best effort: a failure is logged and
    /// never requests a reboot.
    HdmiAudioOutput,
    /// Set the HDMI drive mode to [`HDMI_DRIVE_MODE`]
    HdmiDrive,
    /// Enable the UART if it is off
    Uart,
    /// Remove the serial console from the kernel command line
    SerialConsole,
    /// Force I2S audio on or off
    I2s(bool),
}

impl ConfigStep {
    /// Short name used in logs
    pub const fn name(self) -> &'static str {
        match self {
            Self::HdmiAudioOutput => "hdmi audio output",
            Self::HdmiDrive => "hdmi drive",
            Self::Uart => "uart",
            Self::SerialConsole => "serial console",
            Self::I2s(true) => "i2s on",
            Self::I2s(false) => "i2s off",
        }
    }

    /// Apply the step to the host, returning whether a reboot is now required
    pub fn run<P: BootConfig>(self, platform: &mut P) -> bool {
        match self {
            Self::HdmiAudioOutput => {
                if !platform.set_as_audio_output() {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Failed to configure HDMI audio output");
                }
                false
            }
            Self::HdmiDrive => platform.set_drive_mode(HDMI_DRIVE_MODE),
            Self::Uart => {
                if platform.uart_enabled() {
                    #[cfg(feature = "defmt")]
                    defmt::debug!("UART is already enabled");
                    return false;
                }

                #[cfg(feature = "defmt")]
                defmt::debug!("UART not enabled, enabling");
                platform.set_uart_enabled(true);
                true
            }
            Self::SerialConsole => platform.remove_serial_console_from_cmdline(),
            Self::I2s(required) => {
                if platform.i2s_enabled() == required {
                    return false;
                }
                platform.set_i2s_enabled(required);
                true
            }
        }
    }
}

impl HubGeneration {
    /// Boot-configuration steps for this hub generation, in execution order
    pub const fn config_steps(self) -> &'static [ConfigStep] {
        match self {
            Self::V1 => &[
                ConfigStep::HdmiAudioOutput,
                ConfigStep::HdmiDrive,
                ConfigStep::Uart,
                ConfigStep::SerialConsole,
                ConfigStep::I2s(true),
            ],
            Self::V2 => &[
                ConfigStep::HdmiAudioOutput,
                ConfigStep::HdmiDrive,
                ConfigStep::Uart,
                ConfigStep::SerialConsole,
                ConfigStep::I2s(false),
            ],
            Self::V3 => &[ConfigStep::Uart, ConfigStep::SerialConsole],
        }
    }
}

/// Run every step in order and OR their reboot signals
///
/// No step is skipped, whatever the earlier results were.
pub fn run_config_steps<P: BootConfig>(platform: &mut P, steps: &[ConfigStep]) -> bool {
    steps.iter().fold(false, |reboot_required, step| {
        let step_reboot = step.run(platform);

        #[cfg(feature = "defmt")]
        defmt::debug!(
            "Boot config step '{=str}': reboot required = {}",
            step.name(),
            step_reboot
        );

        reboot_required | step_reboot
    })
}

/// The board, attached to a known host
pub struct PulseHat<I, P> {
    driver: PulseDriver<I>,
    platform: P,
    host: HostDevice,
}

impl<I, P> PulseHat<I, P>
where
    I: RegisterInterface<AddressType = u8>,
    P: BootConfig,
{
    /// Create a new board handle for the given host
    ///
    /// The host identity is fixed for the lifetime of the handle. No bus
    /// traffic and no boot-config changes happen until
    /// [`enable_device`](Self::enable_device) or
    /// [`disable_device`](Self::disable_device) is called.
    pub const fn new(interface: I, platform: P, host: HostDevice) -> Self {
        Self {
            driver: PulseDriver::new(interface),
            platform,
            host,
        }
    }

    /// Host this board is attached to
    pub const fn host(&self) -> HostDevice {
        self.host
    }

    /// Access the status register driver
    pub fn driver_mut(&mut self) -> &mut PulseDriver<I> {
        &mut self.driver
    }

    /// Access the boot-configuration collaborator
    pub const fn platform(&self) -> &P {
        &self.platform
    }

    /// Mutable access to the boot-configuration collaborator
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Consume the handle and return the register interface and platform
    pub fn release(self) -> (I, P) {
        (self.driver.release(), self.platform)
    }

    /// Configure the host for the board and, if no reboot is needed, enable it
    ///
    /// Runs the boot-configuration sequence for the host's hub generation.
    /// When any step requires a reboot the status register is left alone;
    /// call this again after rebooting. An unrecognised host is logged and
    /// nothing is configured.
    pub fn enable_device(&mut self) -> InitResult {
        let generation = match HubGeneration::try_from(self.host) {
            Ok(generation) => generation,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::error!("{}: unsure how to initialise board", _e);
                return InitResult::default();
            }
        };

        let reboot_required = run_config_steps(&mut self.platform, generation.config_steps());

        if reboot_required {
            #[cfg(feature = "defmt")]
            defmt::info!("Host boot config changed, reboot required before enabling board");
            return InitResult {
                enabled: false,
                reboot_required: true,
                secondary_mode_required: false,
            };
        }

        self.reset_to_default(true);

        #[cfg(feature = "defmt")]
        defmt::info!("Board enabled on {}", generation);

        InitResult {
            enabled: true,
            reboot_required: false,
            secondary_mode_required: generation == HubGeneration::V2,
        }
    }

    /// Write the disabled pattern to the status register
    ///
    /// Always returns `true`; a failed write is logged.
    pub fn disable_device(&mut self) -> bool {
        self.reset_to_default(false);

        #[cfg(feature = "defmt")]
        defmt::info!("Board disabled");

        true
    }

    /// Write the default enabled or disabled pattern
    ///
    /// Returns `false` if the write failed or could not be verified.
    pub fn reset_to_default(&mut self, enable: bool) -> bool {
        match self.driver.reset_to_default(enable) {
            Ok(()) => true,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Failed to reset device state (enable = {})", enable);
                false
            }
        }
    }

    /// Select the microphone sample rate
    ///
    /// Returns `false` if the register could not be read, written or verified.
    pub fn set_mic_sample_rate(&mut self, rate: MicSampleRate) -> bool {
        match self.driver.set_mic_sample_rate(rate) {
            Ok(()) => true,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Failed to set microphone sample rate to {=u32} Hz", rate.hz());
                false
            }
        }
    }

    /// Record from the microphone at 16,000 Hz
    pub fn set_mic_rate_16khz(&mut self) -> bool {
        self.set_mic_sample_rate(MicSampleRate::Hz16000)
    }

    /// Record from the microphone at 22,050 Hz
    pub fn set_mic_rate_22khz(&mut self) -> bool {
        self.set_mic_sample_rate(MicSampleRate::Hz22050)
    }

    /// Read and decode all four flags at once
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn state(&mut self) -> Result<DeviceState, Error<I::Error>> {
        self.driver.state()
    }

    /// Whether the speaker is enabled
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn speaker_enabled(&mut self) -> Result<bool, Error<I::Error>> {
        self.driver.speaker_enabled()
    }

    /// Whether the auxiliary controller is enabled
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn aux_controller_enabled(&mut self) -> Result<bool, Error<I::Error>> {
        self.driver.aux_controller_enabled()
    }

    /// Whether the configuration EEPROM is accessible
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn config_storage_enabled(&mut self) -> Result<bool, Error<I::Error>> {
        self.driver.config_storage_enabled()
    }

    /// Current microphone sample rate
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn mic_sample_rate(&mut self) -> Result<MicSampleRate, Error<I::Error>> {
        self.driver.mic_sample_rate()
    }

    /// Whether the microphone records at 16,000 Hz
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn mic_rate_is_16khz(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.mic_sample_rate()? == MicSampleRate::Hz16000)
    }

    /// Whether the microphone records at 22,050 Hz
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn mic_rate_is_22khz(&mut self) -> Result<bool, Error<I::Error>> {
        Ok(self.mic_sample_rate()? == MicSampleRate::Hz22050)
    }
}

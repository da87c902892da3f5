#![no_std]
#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

pub mod device;
pub mod hat;
pub mod host;
pub mod interface;
pub mod platform;
pub mod registers;

// Re-export main types
pub use device::{DeviceState, PulseDriver};
pub use hat::{ConfigStep, InitResult, PulseHat};
pub use host::{HostDevice, HubGeneration, UnrecognizedHost};
pub use interface::I2cInterface;
pub use platform::{BootConfig, HdmiConfig, I2sConfig, UartConfig};
pub use registers::{Flag, MicSampleRate, Polarity};

/// I2C address of the board status register controller (fixed on the board)
pub const I2C_ADDRESS: u8 = 0x24;

/// Driver errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// Communication error with the device
    Bus(E),
    /// The register did not read back the value that was written
    Verify {
        /// Masked value that was written
        expected: u8,
        /// Masked value read back immediately afterwards
        actual: u8,
    },
    /// Bit position outside the 4 meaningful register bits
    InvalidBitPosition(u8),
    /// The flag is fixed by [`PulseHat::enable_device`] / [`PulseHat::disable_device`]
    /// and cannot be toggled on its own
    ImmutableFlag(Flag),
}

impl<E> From<E> for Error<E> {
    fn from(error: E) -> Self {
        Self::Bus(error)
    }
}

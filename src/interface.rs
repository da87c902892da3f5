//! Bus interface implementation for the board status register
//!
//! This module adapts an `embedded-hal` I2C bus to the `device-driver`
//! [`RegisterInterface`] trait used by [`PulseDriver`](crate::PulseDriver).

use crate::I2C_ADDRESS;

use device_driver::RegisterInterface;

/// I2C interface for the board status register
///
/// The controller holds a single register and does not take a register
/// pointer on reads: a read is a plain one-byte I2C read, while a write
/// sends the register address followed by the value.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Create a new I2C interface with the board address (0x24)
    ///
    /// # Example
    /// ```ignore
    /// let interface = I2cInterface::default(i2c);
    /// let mut driver = PulseDriver::new(interface);
    /// ```
    pub const fn default(i2c: I2C) -> Self {
        Self {
            i2c,
            address: I2C_ADDRESS,
        }
    }

    /// Create a new I2C interface with a custom device address
    ///
    /// # Arguments
    /// * `i2c` - The I2C peripheral
    /// * `address` - The 7-bit I2C device address
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// The 7-bit device address this interface talks to
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Consume the interface and return the I2C peripheral
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> RegisterInterface for I2cInterface<I2C>
where
    I2C: embedded_hal::i2c::I2c<Error = E>,
{
    type Error = E;
    type AddressType = u8;

    fn read_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        read_data: &mut [u8],
    ) -> Result<(), Self::Error> {
        // Single-register device: no pointer write before the read
        let _ = (address, size_bits);
        self.i2c.read(self.address, read_data)
    }

    fn write_register(
        &mut self,
        address: Self::AddressType,
        size_bits: u32,
        write_data: &[u8],
    ) -> Result<(), Self::Error> {
        let _ = size_bits; // Size is implicit in write_data.len() for I2C
        // Adjacent writes go out back to back, with no restart in between
        self.i2c.transaction(
            self.address,
            &mut [
                embedded_hal::i2c::Operation::Write(&[address]),
                embedded_hal::i2c::Operation::Write(write_data),
            ],
        )
    }
}

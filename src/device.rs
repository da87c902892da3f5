//! Status register driver
//!
//! This module provides the register protocol for the board: masked reads,
//! verified writes and single-bit read-modify-write updates. Nothing is
//! cached; every call goes to the device for the authoritative value.

use crate::Error;
use crate::registers::{
    DEFAULT_DISABLED_STATE, DEFAULT_ENABLED_STATE, Flag, MicSampleRate, STATE_MASK,
    STATE_REGISTER, bit_mask,
};

use device_driver::RegisterInterface;

/// Decoded snapshot of all four status flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceState {
    raw: u8,
}

impl DeviceState {
    /// Decode a raw register value (upper bits are ignored)
    pub const fn from_raw(raw: u8) -> Self {
        Self {
            raw: raw & STATE_MASK,
        }
    }

    /// Masked raw register value
    pub const fn raw(&self) -> u8 {
        self.raw
    }

    /// Logical state of a flag, with its polarity applied
    pub const fn is_enabled(&self, flag: Flag) -> bool {
        flag.is_enabled_in(self.raw)
    }

    /// Whether the speaker is enabled
    pub const fn speaker_enabled(&self) -> bool {
        self.is_enabled(Flag::Speaker)
    }

    /// Whether the auxiliary controller is enabled
    pub const fn aux_controller_enabled(&self) -> bool {
        self.is_enabled(Flag::AuxController)
    }

    /// Whether the configuration EEPROM is accessible
    pub const fn config_storage_enabled(&self) -> bool {
        self.is_enabled(Flag::ConfigStorage)
    }

    /// Microphone sample rate selected by the rate bit
    pub const fn mic_sample_rate(&self) -> MicSampleRate {
        if self.is_enabled(Flag::MicRate16k) {
            MicSampleRate::Hz16000
        } else {
            MicSampleRate::Hz22050
        }
    }
}

/// Driver for the board status register
pub struct PulseDriver<I> {
    interface: I,
}

impl<I> PulseDriver<I>
where
    I: RegisterInterface<AddressType = u8>,
{
    /// Create a new driver on top of a register interface
    ///
    /// No bus traffic happens until the first read or write.
    pub const fn new(interface: I) -> Self {
        Self { interface }
    }

    /// Consume the driver and return the register interface
    pub fn release(self) -> I {
        self.interface
    }

    /// Read the current register value
    ///
    /// The raw byte is masked with `0x0F`. A bus failure is returned
    /// unchanged and is never retried.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the transport read fails.
    pub fn read_state(&mut self) -> Result<u8, Error<I::Error>> {
        let mut buffer = [0u8; 1];
        if let Err(e) = self
            .interface
            .read_register(STATE_REGISTER, 8, &mut buffer)
        {
            #[cfg(feature = "defmt")]
            defmt::warn!("Failed to read device state");
            return Err(Error::Bus(e));
        }

        let state = buffer[0] & STATE_MASK;

        #[cfg(feature = "defmt")]
        defmt::trace!("Read device state: {=u8:#b}", state);

        Ok(state)
    }

    /// Write a new register value and verify it took effect
    ///
    /// The value is masked with `0x0F`, written once, and read back
    /// immediately. There is no retry on mismatch.
    ///
    /// # Errors
    ///
    /// - [`Error::Bus`] if the write or the read-back fails
    /// - [`Error::Verify`] if the read-back differs from the written value
    pub fn write_state(&mut self, value: u8) -> Result<(), Error<I::Error>> {
        let expected = value & STATE_MASK;

        #[cfg(feature = "defmt")]
        defmt::trace!("Writing device state: {=u8:#b}", expected);

        if let Err(e) = self
            .interface
            .write_register(STATE_REGISTER, 8, &[expected])
        {
            #[cfg(feature = "defmt")]
            defmt::warn!("Failed to write device state");
            return Err(Error::Bus(e));
        }

        let actual = self.read_state()?;
        if actual != expected {
            #[cfg(feature = "defmt")]
            defmt::warn!(
                "Device write verification failed: expected {=u8:#b}, read {=u8:#b}",
                expected,
                actual
            );
            return Err(Error::Verify { expected, actual });
        }

        Ok(())
    }

    /// Set or clear a single register bit, leaving the other bits untouched
    ///
    /// The write is derived from a fresh read of the register. If the bit
    /// already has the requested value nothing is written.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidBitPosition`] for positions outside `0..=3`
    /// - any error from [`read_state`](Self::read_state) or
    ///   [`write_state`](Self::write_state)
    pub fn update_bit(&mut self, position: u8, value: bool) -> Result<(), Error<I::Error>> {
        let current = self.read_state()?;
        let mask = bit_mask(position).ok_or(Error::InvalidBitPosition(position))?;

        if (current & mask != 0) == value {
            #[cfg(feature = "defmt")]
            defmt::debug!("State bit {} already {}, nothing to send", position, value);
            return Ok(());
        }

        let target = if value {
            current | mask
        } else {
            current & !mask
        };
        self.write_state(target)
    }

    /// Read and decode all four flags at once
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn state(&mut self) -> Result<DeviceState, Error<I::Error>> {
        self.read_state().map(DeviceState::from_raw)
    }

    /// Logical state of a single flag
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn flag_enabled(&mut self, flag: Flag) -> Result<bool, Error<I::Error>> {
        Ok(flag.is_enabled_in(self.read_state()?))
    }

    /// Set the logical state of a settable flag
    ///
    /// # Errors
    ///
    /// - [`Error::ImmutableFlag`] if the flag cannot be set on its own
    /// - any error from [`update_bit`](Self::update_bit)
    pub fn set_flag(&mut self, flag: Flag, enabled: bool) -> Result<(), Error<I::Error>> {
        if !flag.is_settable() {
            return Err(Error::ImmutableFlag(flag));
        }
        self.update_bit(flag.bit(), flag.polarity().encode(enabled))
    }

    /// Whether the speaker is enabled
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn speaker_enabled(&mut self) -> Result<bool, Error<I::Error>> {
        self.flag_enabled(Flag::Speaker)
    }

    /// Whether the auxiliary controller is enabled
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn aux_controller_enabled(&mut self) -> Result<bool, Error<I::Error>> {
        self.flag_enabled(Flag::AuxController)
    }

    /// Whether the configuration EEPROM is accessible
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn config_storage_enabled(&mut self) -> Result<bool, Error<I::Error>> {
        self.flag_enabled(Flag::ConfigStorage)
    }

    /// Current microphone sample rate
    ///
    /// # Errors
    ///
    /// Returns [`Error::Bus`] if the read fails.
    pub fn mic_sample_rate(&mut self) -> Result<MicSampleRate, Error<I::Error>> {
        self.state().map(|state| state.mic_sample_rate())
    }

    /// Select the microphone sample rate
    ///
    /// # Errors
    ///
    /// Any error from [`update_bit`](Self::update_bit).
    pub fn set_mic_sample_rate(&mut self, rate: MicSampleRate) -> Result<(), Error<I::Error>> {
        self.set_flag(Flag::MicRate16k, rate.flag_enabled())
    }

    /// Write the default enabled or disabled pattern
    ///
    /// See [`DEFAULT_ENABLED_STATE`] and [`DEFAULT_DISABLED_STATE`].
    ///
    /// # Errors
    ///
    /// Any error from [`write_state`](Self::write_state).
    pub fn reset_to_default(&mut self, enable: bool) -> Result<(), Error<I::Error>> {
        let state = if enable {
            DEFAULT_ENABLED_STATE
        } else {
            DEFAULT_DISABLED_STATE
        };
        self.write_state(state)
    }
}

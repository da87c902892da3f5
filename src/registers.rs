//! Register layout for the board status register
//!
//! The board has a single 8-bit register at address `0x00`. Only the low
//! nibble is implemented; the upper bits read back as garbage and are masked
//! off on every access.
//!
//! ```text
//!  bit   3            2                1                0
//!      +------------+----------------+----------------+-------------+
//!      | MIC 16 kHz | EEPROM enable  | AUX disable    | SPK disable |
//!      | active-high| active-high    | active-low     | active-low  |
//!      +------------+----------------+----------------+-------------+
//! ```

/// Address of the status register
pub const STATE_REGISTER: u8 = 0x00;

/// Bits of the status register that carry state
pub const STATE_MASK: u8 = 0x0F;

/// Number of meaningful bits in the status register
pub const STATE_BITS: u8 = 4;

/// Status register pattern written when the board is enabled
///
/// Only the EEPROM bit is set: speaker, auxiliary controller and EEPROM are
/// all logically enabled and the microphone records at 22.05 kHz.
pub const DEFAULT_ENABLED_STATE: u8 = 0b0100;

/// Status register pattern written when the board is disabled
///
/// Speaker and auxiliary controller disable bits are set, the EEPROM is
/// detached and the microphone rate bit is cleared.
pub const DEFAULT_DISABLED_STATE: u8 = 0b0011;

/// Compute the mask for a status register bit position
///
/// Returns `None` for any position outside `0..=3`. Callers are expected to
/// derive positions from [`Flag::bit`], so `None` indicates a logic error.
pub fn bit_mask(position: u8) -> Option<u8> {
    if position < STATE_BITS {
        Some(1 << position)
    } else {
        #[cfg(feature = "defmt")]
        defmt::error!("Internal error: invalid state bit {}, no mask", position);
        None
    }
}

/// Which raw bit value means "enabled" for a flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Polarity {
    /// Bit cleared means enabled
    ActiveLow,
    /// Bit set means enabled
    ActiveHigh,
}

impl Polarity {
    /// Raw bit value encoding the given logical state
    pub const fn encode(self, enabled: bool) -> bool {
        match self {
            Self::ActiveLow => !enabled,
            Self::ActiveHigh => enabled,
        }
    }

    /// Logical state encoded by the given raw bit value
    pub const fn decode(self, bit_set: bool) -> bool {
        match self {
            Self::ActiveLow => !bit_set,
            Self::ActiveHigh => bit_set,
        }
    }
}

/// A single feature bit in the status register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Flag {
    /// Speaker amplifier (bit 0, active-low)
    Speaker,
    /// Auxiliary on-board controller (bit 1, active-low)
    AuxController,
    /// Configuration EEPROM access (bit 2, active-high)
    ConfigStorage,
    /// Microphone records at 16 kHz instead of 22.05 kHz (bit 3, active-high)
    MicRate16k,
}

impl Flag {
    /// All flags, ordered by bit position
    pub const ALL: [Self; 4] = [
        Self::Speaker,
        Self::AuxController,
        Self::ConfigStorage,
        Self::MicRate16k,
    ];

    /// Bit position in the status register
    pub const fn bit(self) -> u8 {
        match self {
            Self::Speaker => 0,
            Self::AuxController => 1,
            Self::ConfigStorage => 2,
            Self::MicRate16k => 3,
        }
    }

    /// Mask of this flag's bit
    pub const fn mask(self) -> u8 {
        1 << self.bit()
    }

    /// Hardware polarity of this flag
    pub const fn polarity(self) -> Polarity {
        match self {
            Self::Speaker | Self::AuxController => Polarity::ActiveLow,
            Self::ConfigStorage | Self::MicRate16k => Polarity::ActiveHigh,
        }
    }

    /// Whether the flag may be changed on its own after initialization
    ///
    /// Speaker, controller and EEPROM are only driven as a group by the
    /// default enable/disable patterns.
    pub const fn is_settable(self) -> bool {
        matches!(self, Self::MicRate16k)
    }

    /// Decode this flag's logical state from a raw register value
    pub const fn is_enabled_in(self, raw: u8) -> bool {
        self.polarity().decode(raw & self.mask() != 0)
    }
}

/// Microphone recording sample rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MicSampleRate {
    /// 16,000 Hz
    Hz16000,
    /// 22,050 Hz (power-on default)
    #[default]
    Hz22050,
}

impl MicSampleRate {
    /// Sample rate in Hz
    pub const fn hz(self) -> u32 {
        match self {
            Self::Hz16000 => 16_000,
            Self::Hz22050 => 22_050,
        }
    }

    /// Value of [`Flag::MicRate16k`] selecting this rate
    pub const fn flag_enabled(self) -> bool {
        matches!(self, Self::Hz16000)
    }
}

//! Host device identity
//!
//! The host platform determines which boot-configuration sequence the board
//! needs. Identification itself happens outside this crate; callers pass the
//! result in once, at construction.

/// Host platform the board is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostDevice {
    /// Host could not be identified
    #[default]
    Unknown,
    /// First-generation pi-top laptop
    PiTop,
    /// pi-topCEED desktop
    PiTopCeed,
    /// pi-top [3]
    PiTop3,
    /// pi-top [4]
    PiTop4,
    /// Any other platform id
    ///
    /// Build hosts with [`HostDevice::from_id`] so known ids map to their
    /// named variant; a known id wrapped here is treated as that host.
    Other(i8),
}

impl HostDevice {
    /// Map a raw platform id to a host device
    ///
    /// `-1` is unknown; `0..=3` are the supported hosts in release order.
    pub const fn from_id(id: i8) -> Self {
        match id {
            -1 => Self::Unknown,
            0 => Self::PiTop,
            1 => Self::PiTopCeed,
            2 => Self::PiTop3,
            3 => Self::PiTop4,
            other => Self::Other(other),
        }
    }

    /// Raw platform id
    pub const fn id(self) -> i8 {
        match self {
            Self::Unknown => -1,
            Self::PiTop => 0,
            Self::PiTopCeed => 1,
            Self::PiTop3 => 2,
            Self::PiTop4 => 3,
            Self::Other(id) => id,
        }
    }
}

impl From<i8> for HostDevice {
    fn from(id: i8) -> Self {
        Self::from_id(id)
    }
}

/// Hub revision the board is plugged into, which selects the boot sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HubGeneration {
    /// First hub (pi-top, pi-topCEED); also assumed for unidentified hosts.
    /// Needs HDMI drive, UART and I2S on.
    V1,
    /// pi-top [3] hub. Needs HDMI drive, UART and I2S off.
    V2,
    /// pi-top [4]. Needs UART only.
    V3,
}

/// The host device has no known boot sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UnrecognizedHost(pub HostDevice);

impl core::fmt::Display for UnrecognizedHost {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "unrecognised host device id {}", self.0.id())
    }
}

impl TryFrom<HostDevice> for HubGeneration {
    type Error = UnrecognizedHost;

    fn try_from(host: HostDevice) -> Result<Self, Self::Error> {
        let host = HostDevice::from_id(host.id());
        match host {
            HostDevice::PiTop | HostDevice::PiTopCeed | HostDevice::Unknown => Ok(Self::V1),
            HostDevice::PiTop3 => Ok(Self::V2),
            HostDevice::PiTop4 => Ok(Self::V3),
            HostDevice::Other(_) => Err(UnrecognizedHost(host)),
        }
    }
}

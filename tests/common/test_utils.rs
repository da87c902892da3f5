//! Test utilities and helper functions

use crate::common::mock_interface::MockInterface;
use crate::common::mock_platform::MockBootConfig;
use pulse_hat::{HostDevice, PulseDriver, PulseHat};

/// Create a mock driver for testing
/// Returns (driver, interface) where interface is a clone that shares state with the driver
pub fn create_mock_driver(register: u8) -> (PulseDriver<MockInterface>, MockInterface) {
    let interface = MockInterface::with_register(register);
    let interface_clone = interface.clone();
    (PulseDriver::new(interface), interface_clone)
}

/// Create a board handle on a mock bus and mock host
/// Returns (hat, interface) where interface is a clone that shares state with the hat
pub fn create_mock_hat(
    host: HostDevice,
    platform: MockBootConfig,
    register: u8,
) -> (PulseHat<MockInterface, MockBootConfig>, MockInterface) {
    let interface = MockInterface::with_register(register);
    let interface_clone = interface.clone();
    (PulseHat::new(interface, platform, host), interface_clone)
}

/// Bits of `value` other than `position`
pub fn other_bits(value: u8, position: u8) -> u8 {
    value & 0x0F & !(1 << position)
}

//! Unit tests for masked reads, verified writes and single-bit updates

use crate::common::test_utils::other_bits;
use crate::common::{Operation, create_mock_driver};
use pulse_hat::Error;
use pulse_hat::registers::STATE_REGISTER;

#[test]
fn test_read_state_masks_upper_bits() {
    let (mut driver, interface) = create_mock_driver(0b0101);
    interface.set_read_noise(0xF0);

    assert_eq!(driver.read_state().unwrap(), 0b0101);
}

#[test]
fn test_read_state_does_not_write() {
    let (mut driver, interface) = create_mock_driver(0b0011);

    driver.read_state().unwrap();
    driver.read_state().unwrap();

    assert_eq!(
        interface.operations(),
        vec![
            Operation::Read { value: 0b0011 },
            Operation::Read { value: 0b0011 }
        ]
    );
}

#[test]
fn test_write_state_masks_and_verifies() {
    let (mut driver, interface) = create_mock_driver(0);

    driver.write_state(0xA9).unwrap();

    assert_eq!(
        interface.operations(),
        vec![
            Operation::Write {
                address: STATE_REGISTER,
                value: 0x09
            },
            Operation::Read { value: 0x09 },
        ]
    );
    assert_eq!(interface.register(), 0x09);
}

#[test]
fn test_write_state_verification_mismatch() {
    let (mut driver, interface) = create_mock_driver(0);
    interface.override_next_read(0b0100);

    let result = driver.write_state(0b0101);

    assert_eq!(
        result,
        Err(Error::Verify {
            expected: 0b0101,
            actual: 0b0100
        })
    );
    // One write, no retry
    assert_eq!(interface.write_count(), 1);
}

#[test]
fn test_write_state_stuck_bit_is_reported() {
    let (mut driver, interface) = create_mock_driver(0b0000);
    interface.set_stuck_bits(0b0001);

    let result = driver.write_state(0b0011);

    assert_eq!(
        result,
        Err(Error::Verify {
            expected: 0b0011,
            actual: 0b0010
        })
    );
}

#[test]
fn test_write_state_ignores_upper_noise_on_verify() {
    let (mut driver, interface) = create_mock_driver(0);
    interface.set_read_noise(0xC0);

    assert!(driver.write_state(0b1010).is_ok());
}

#[test]
fn test_update_bit_sets_only_target_bit() {
    for start in 0..=0x0Fu8 {
        for position in 0..4u8 {
            for value in [false, true] {
                let (mut driver, interface) = create_mock_driver(start);

                driver.update_bit(position, value).unwrap();

                let after = driver.read_state().unwrap();
                assert_eq!(
                    after & (1 << position) != 0,
                    value,
                    "bit {position} of {start:#06b} should be {value}"
                );
                assert_eq!(
                    other_bits(after, position),
                    other_bits(start, position),
                    "other bits of {start:#06b} changed when updating bit {position}"
                );
                assert_eq!(interface.register(), after);
            }
        }
    }
}

#[test]
fn test_update_bit_is_idempotent() {
    for position in 0..4u8 {
        for value in [false, true] {
            let start = if value { 0b0000 } else { 0b1111 };
            let (mut driver, interface) = create_mock_driver(start);

            driver.update_bit(position, value).unwrap();
            driver.update_bit(position, value).unwrap();

            assert_eq!(
                interface.write_count(),
                1,
                "bit {position} -> {value} should be written exactly once"
            );
        }
    }
}

#[test]
fn test_update_bit_noop_when_already_set() {
    let (mut driver, interface) = create_mock_driver(0b1000);

    driver.update_bit(3, true).unwrap();
    driver.update_bit(0, false).unwrap();

    assert_eq!(interface.write_count(), 0);
}

#[test]
fn test_update_bit_clear_direction() {
    let (mut driver, interface) = create_mock_driver(0b1111);

    driver.update_bit(2, false).unwrap();

    assert_eq!(interface.writes(), vec![0b1011]);
}

#[test]
fn test_update_bit_invalid_position() {
    let (mut driver, interface) = create_mock_driver(0b0100);

    let result = driver.update_bit(4, true);

    assert_eq!(result, Err(Error::InvalidBitPosition(4)));
    assert_eq!(interface.write_count(), 0);
    assert_eq!(interface.register(), 0b0100);
}

#[test]
fn test_reset_to_default_patterns() {
    let (mut driver, interface) = create_mock_driver(0b1011);

    driver.reset_to_default(true).unwrap();
    assert_eq!(interface.register(), 0b0100);

    driver.reset_to_default(false).unwrap();
    assert_eq!(interface.register(), 0b0011);

    assert_eq!(interface.writes(), vec![0b0100, 0b0011]);
}

//! Unit tests for flag polarity and accessors

use crate::common::{MockBootConfig, create_mock_driver, create_mock_hat};
use pulse_hat::{Error, Flag, HostDevice, MicSampleRate, Polarity};

#[test]
fn test_polarity_round_trip_all_flags() {
    for flag in Flag::ALL {
        for raw in 0..=0x0Fu8 {
            let (mut driver, _interface) = create_mock_driver(raw);
            let bit_set = raw & (1 << flag.bit()) != 0;

            let expected = match flag.polarity() {
                Polarity::ActiveLow => !bit_set,
                Polarity::ActiveHigh => bit_set,
            };
            assert_eq!(
                driver.flag_enabled(flag).unwrap(),
                expected,
                "{flag:?} with register {raw:#06b}"
            );
        }
    }
}

#[test]
fn test_inverted_flags_enabled_when_bit_clear() {
    let (mut driver, _interface) = create_mock_driver(0b0000);
    assert!(driver.speaker_enabled().unwrap());
    assert!(driver.aux_controller_enabled().unwrap());
    assert!(!driver.config_storage_enabled().unwrap());
    assert_eq!(driver.mic_sample_rate().unwrap(), MicSampleRate::Hz22050);

    let (mut driver, _interface) = create_mock_driver(0b1111);
    assert!(!driver.speaker_enabled().unwrap());
    assert!(!driver.aux_controller_enabled().unwrap());
    assert!(driver.config_storage_enabled().unwrap());
    assert_eq!(driver.mic_sample_rate().unwrap(), MicSampleRate::Hz16000);
}

#[test]
fn test_state_snapshot_uses_single_read() {
    let (mut driver, interface) = create_mock_driver(0b1001);

    let state = driver.state().unwrap();

    assert_eq!(state.raw(), 0b1001);
    assert!(!state.speaker_enabled());
    assert!(state.aux_controller_enabled());
    assert!(!state.config_storage_enabled());
    assert_eq!(state.mic_sample_rate(), MicSampleRate::Hz16000);
    assert_eq!(interface.operations().len(), 1);
}

#[test]
fn test_set_flag_rejects_group_flags() {
    let (mut driver, interface) = create_mock_driver(0b0100);

    for flag in [Flag::Speaker, Flag::AuxController, Flag::ConfigStorage] {
        assert_eq!(driver.set_flag(flag, false), Err(Error::ImmutableFlag(flag)));
    }
    assert!(interface.operations().is_empty());
}

#[test]
fn test_set_mic_rate_preserves_other_flags() {
    let (mut driver, interface) = create_mock_driver(0b0100);

    driver.set_mic_sample_rate(MicSampleRate::Hz16000).unwrap();
    assert_eq!(interface.register(), 0b1100);

    driver.set_mic_sample_rate(MicSampleRate::Hz22050).unwrap();
    assert_eq!(interface.register(), 0b0100);
}

#[test]
fn test_hat_mic_rate_surface() {
    let (mut hat, interface) =
        create_mock_hat(HostDevice::PiTop4, MockBootConfig::default(), 0b0100);

    assert!(hat.set_mic_rate_16khz());
    assert!(hat.mic_rate_is_16khz().unwrap());
    assert!(!hat.mic_rate_is_22khz().unwrap());

    assert!(hat.set_mic_rate_22khz());
    assert!(hat.mic_rate_is_22khz().unwrap());
    assert!(!hat.mic_rate_is_16khz().unwrap());

    assert_eq!(interface.writes(), vec![0b1100, 0b0100]);
}

#[test]
fn test_hat_getters() {
    let (mut hat, _interface) =
        create_mock_hat(HostDevice::PiTop4, MockBootConfig::default(), 0b0110);

    assert!(hat.speaker_enabled().unwrap());
    assert!(!hat.aux_controller_enabled().unwrap());
    assert!(hat.config_storage_enabled().unwrap());
    assert_eq!(hat.mic_sample_rate().unwrap(), MicSampleRate::Hz22050);
    assert_eq!(hat.state().unwrap().raw(), 0b0110);
}

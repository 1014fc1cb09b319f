//! Numeric invariants of the controller

use proptest::prelude::*;
use thermoloop_core::config::ControlConfig;
use thermoloop_core::control::{PidConfig, PidController};
use thermoloop_core::display::sample_digits;

fn default_controller() -> PidController {
    PidController::new(PidConfig::from(&ControlConfig::default()))
}

#[test]
fn constant_offset_never_flips_error_sign() {
    let mut pid = default_controller();
    pid.set_setpoint(2500);

    for _ in 0..500 {
        let out = pid.step(2300);
        let state = pid.state();
        assert!(state.error_now > 0);
        assert!(state.error_now <= 200);
        assert_eq!(out.display_value, 23);
    }
    // Heater pinned at full power while the error persists
    assert_eq!(pid.state().output, 255.0);
}

#[test]
fn error_shrinks_as_plant_approaches_setpoint() {
    let mut pid = default_controller();
    pid.set_setpoint(2500);

    let mut previous = i32::MAX;
    for sample in (2300..2500).step_by(20) {
        pid.step(sample);
        let error = pid.state().error_now;
        assert!(error >= 0);
        assert!(error < previous);
        previous = error;
    }
}

#[test]
fn display_digits_of_scaled_sample() {
    assert_eq!(sample_digits(235_000), [2, 3, 5, 0]);
}

proptest! {
    #[test]
    fn integral_and_output_stay_bounded(
        setpoint in any::<u16>(),
        samples in proptest::collection::vec(any::<u16>(), 1..200),
    ) {
        let mut pid = default_controller();
        pid.set_setpoint(setpoint);

        for sample in samples {
            let out = pid.step(sample);
            let state = pid.state();
            prop_assert!((-1000.0..=1000.0).contains(&state.integral));
            prop_assert!((0.0..=255.0).contains(&state.output));
            prop_assert_eq!(out.actuator, state.output as u8);
            prop_assert_eq!(out.display_value, sample / 100);
        }
    }

    #[test]
    fn configured_bounds_hold(
        limit in 1.0f32..5000.0,
        max in 1.0f32..255.0,
        samples in proptest::collection::vec(0u16..20_000, 1..100),
    ) {
        let config = PidConfig {
            integral_limit: limit,
            output_max: max,
            ..PidConfig::default()
        };
        let mut pid = PidController::new(config);
        pid.set_setpoint(10_000);

        for sample in samples {
            pid.step(sample);
            let state = pid.state();
            prop_assert!(state.integral >= -limit && state.integral <= limit);
            prop_assert!(state.output >= 0.0 && state.output <= max);
        }
    }

    #[test]
    fn digits_are_decimal(sample in any::<u32>()) {
        let digits = sample_digits(sample);
        prop_assert!(digits.iter().all(|&d| d <= 9));
        let value = sample / 100;
        prop_assert_eq!(u32::from(digits[3]), value % 10);
        prop_assert_eq!(u32::from(digits[2]), (value / 10) % 10);
    }
}

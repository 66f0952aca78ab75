//! Property tests for PWM pulse mapping.

use proptest::prelude::*;
use var_motor::driver::PulseBounds;
use var_motor::motor::normalize_speed;
use var_motor::MotorKind;

fn pwm_bounds() -> impl Strategy<Value = PulseBounds> {
    prop::sample::select(
        MotorKind::BOUND
            .iter()
            .filter_map(|k| PulseBounds::for_kind(*k))
            .collect::<Vec<_>>(),
    )
}

proptest! {
    #[test]
    fn prop_pulse_stays_within_bounds(bounds in pwm_bounds(), speed in -10.0f32..10.0) {
        let pulse = bounds.pulse(speed);
        prop_assert!(pulse >= bounds.min - 1e-4);
        prop_assert!(pulse <= bounds.max + 1e-4);
    }

    #[test]
    fn prop_pulse_sign_matches_speed(bounds in pwm_bounds(), speed in -1.0f32..1.0) {
        let pulse = bounds.pulse(speed);
        if speed > 0.0 {
            prop_assert!(pulse >= bounds.deadband_max);
        } else if speed < 0.0 {
            prop_assert!(pulse <= bounds.deadband_min);
        } else {
            prop_assert_eq!(pulse, bounds.center);
        }
    }

    #[test]
    fn prop_duty_never_exceeds_full_scale(bounds in pwm_bounds(), speed in -1.0f32..1.0, max_duty in 1u16..) {
        prop_assert!(bounds.duty(bounds.pulse(speed), max_duty) <= max_duty);
    }

    #[test]
    fn prop_normalize_is_bounded(speed in any::<f32>()) {
        let s = normalize_speed(speed);
        prop_assert!((-1.0..=1.0).contains(&s));
    }
}

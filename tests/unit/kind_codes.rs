//! Property tests for legacy motor kind codes.

use proptest::prelude::*;
use var_motor::MotorKind;

#[test]
fn test_defined_codes_round_trip() {
    for code in 0..=6 {
        assert_eq!(MotorKind::from_code(code).code(), code);
    }
    for kind in MotorKind::BOUND {
        assert_eq!(MotorKind::from_code(kind.code()), kind);
    }
    assert_eq!(MotorKind::from_code(MotorKind::None.code()), MotorKind::None);
}

proptest! {
    #[test]
    fn prop_undefined_codes_decode_to_none(code in any::<i32>().prop_filter("defined code", |c| !(0..=6).contains(c))) {
        prop_assert_eq!(MotorKind::from_code(code), MotorKind::None);
    }

    #[test]
    fn prop_decode_then_encode_is_identity_or_unset(code in any::<i32>()) {
        let encoded = MotorKind::from_code(code).code();
        prop_assert!(encoded == code || encoded == -1);
    }
}

//! Unit tests for TOML configuration parsing.

use var_motor::config::{MotorAssignment, RobotConfig};
use var_motor::{parse_config, ConfigError, Error, MotorKind};

/// Test parsing every configuration key.
#[test]
fn test_parse_every_key() {
    let toml_str = r#"
[motors.a]
kind = "can_jaguar"
channel = 1

[motors.b]
kind = "jaguar"
channel = 1

[motors.c]
kind = "can_talon"
channel = 2

[motors.d]
kind = "talon"
channel = 2

[motors.e]
kind = "talon_srx"
channel = 3

[motors.f]
kind = "victor"
channel = 4

[motors.g]
kind = "victor_sp"
channel = 5

[motors.h]
kind = "none"
"#;

    let config: RobotConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    let kinds: Vec<_> = config.motors.values().map(|m| m.kind).collect();

    let mut expected = MotorKind::BOUND.to_vec();
    expected.push(MotorKind::None);
    assert_eq!(kinds, expected);
}

/// Test that defaults apply to channel and inversion.
#[test]
fn test_defaults() {
    let toml_str = r#"
[motors.spare]
kind = "none"
"#;

    let config: RobotConfig = toml::from_str(toml_str).expect("Failed to parse TOML");
    assert_eq!(
        config.motor("spare"),
        Some(&MotorAssignment::new(MotorKind::None, 0, false))
    );
}

/// Test that legacy codes outside 0..=6 read as unset.
#[test]
fn test_out_of_range_legacy_codes() {
    for code in [-1, 7, 99, -40] {
        let toml_str = format!(
            r#"
[motors.m]
kind = {code}
channel = 1
"#
        );
        let config: RobotConfig = toml::from_str(&toml_str).expect("Failed to parse TOML");
        assert_eq!(config.motor("m").unwrap().kind, MotorKind::None, "code {code}");
    }
}

/// Test that an empty document yields no motors.
#[test]
fn test_empty_config() {
    let config = parse_config("").expect("Empty config should parse");
    assert_eq!(config.motor_names().count(), 0);
}

/// Test that CAN ids above 62 are rejected by validation.
#[test]
fn test_can_id_out_of_range() {
    let toml_str = r#"
[motors.lift]
kind = "can_talon"
channel = 63
"#;

    match parse_config(toml_str) {
        Err(Error::Config(ConfigError::ChannelOutOfRange { motor, kind, channel })) => {
            assert_eq!(motor.as_str(), "lift");
            assert_eq!(kind, MotorKind::CanTalon);
            assert_eq!(channel, 63);
        }
        other => panic!("expected out-of-range channel, got {:?}", other),
    }
}

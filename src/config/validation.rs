//! Configuration validation.

use heapless::{FnvIndexMap, String};

use crate::driver::Port;
use crate::error::{ConfigError, Error, Result};

use super::system::MAX_MOTORS;
use super::RobotConfig;

/// Validate a robot configuration.
///
/// Checks:
/// - Every channel exists on its controller's bus
/// - No two bound motors share a port
pub fn validate_config(config: &RobotConfig) -> Result<()> {
    let mut used: FnvIndexMap<Port, String<32>, MAX_MOTORS> = FnvIndexMap::new();

    for (name, motor) in config.motors.iter() {
        // Unset outputs claim nothing
        let Some(port) = motor.port() else {
            continue;
        };

        if !port.is_valid() {
            return Err(Error::Config(ConfigError::ChannelOutOfRange {
                motor: name.clone(),
                kind: motor.kind,
                channel: motor.channel,
            }));
        }

        if let Some(first) = used.get(&port) {
            return Err(Error::Config(ConfigError::DuplicateChannel {
                first: first.clone(),
                second: name.clone(),
                port,
            }));
        }

        used.insert(port, name.clone()).map_err(|_| Error::Config(ConfigError::TooManyMotors))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MotorAssignment;
    use crate::motor::MotorKind;

    fn config(motors: &[(&str, MotorAssignment)]) -> RobotConfig {
        let mut config = RobotConfig::default();
        for (name, motor) in motors {
            config
                .motors
                .insert(String::try_from(*name).unwrap(), *motor)
                .unwrap();
        }
        config
    }

    #[test]
    fn test_pwm_channel_out_of_range() {
        let config = config(&[("arm", MotorAssignment::new(MotorKind::Talon, 20, false))]);
        assert!(matches!(
            validate_config(&config),
            Err(Error::Config(ConfigError::ChannelOutOfRange { channel: 20, .. }))
        ));
    }

    #[test]
    fn test_shared_port_rejected() {
        let config = config(&[
            ("left", MotorAssignment::new(MotorKind::Victor, 1, false)),
            ("right", MotorAssignment::new(MotorKind::Talon, 1, true)),
        ]);
        match validate_config(&config) {
            Err(Error::Config(ConfigError::DuplicateChannel { first, second, port })) => {
                assert_eq!(first.as_str(), "left");
                assert_eq!(second.as_str(), "right");
                assert_eq!(port, Port::pwm(1));
            }
            other => panic!("expected duplicate channel, got {:?}", other),
        }
    }

    #[test]
    fn test_same_number_on_different_buses() {
        let config = config(&[
            ("drive", MotorAssignment::new(MotorKind::Talon, 1, false)),
            ("lift", MotorAssignment::new(MotorKind::CanTalon, 1, false)),
            ("spare", MotorAssignment::new(MotorKind::None, 1, false)),
        ]);
        assert!(validate_config(&config).is_ok());
    }
}

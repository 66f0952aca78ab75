//! Robot configuration - root configuration structure.

use heapless::{FnvIndexMap, String};
use serde::Deserialize;

use super::motor::MotorAssignment;

/// Maximum number of named motors in a configuration.
pub const MAX_MOTORS: usize = 16;

/// Root configuration structure from TOML.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RobotConfig {
    /// Named motor assignments.
    #[serde(default)]
    pub motors: FnvIndexMap<String<32>, MotorAssignment, MAX_MOTORS>,
}

impl RobotConfig {
    /// Get a motor assignment by name.
    pub fn motor(&self, name: &str) -> Option<&MotorAssignment> {
        self.motors
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// List all motor names.
    pub fn motor_names(&self) -> impl Iterator<Item = &str> {
        self.motors.keys().map(|s| s.as_str())
    }
}

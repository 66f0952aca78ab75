//! Configuration module for var-motor.
//!
//! Provides types for loading and validating motor assignments from TOML
//! files (with `std` feature) or pre-parsed data.

mod motor;
mod system;
#[cfg(feature = "std")]
mod loader;
mod validation;

pub use motor::MotorAssignment;
pub use system::{RobotConfig, MAX_MOTORS};
pub use validation::validate_config;

#[cfg(feature = "std")]
pub use loader::{load_config, parse_config};

//! Motor module for var-motor.
//!
//! Provides the reassignable motor handle and the driver capability it is built on.

mod bank;
mod controller;
mod handle;
mod kind;
mod provider;

pub use bank::MotorBank;
pub use controller::{normalize_speed, output_speed, SpeedController};
pub use handle::VarMotor;
pub use kind::MotorKind;
pub use provider::DriverProvider;

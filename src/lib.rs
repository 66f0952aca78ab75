//! # var-motor
//!
//! Runtime-reassignable motor outputs over PWM and CAN speed controllers.
//!
//! ## Features
//!
//! - **One handle, seven controllers**: a [`VarMotor`] drives a Jaguar, Talon,
//!   Talon SRX, Victor or Victor SP over PWM, or a Jaguar or Talon SRX over CAN
//! - **Runtime reassignment**: switch controller kind or channel without
//!   rebuilding the program; the old driver is always released first
//! - **Exclusive channels**: a port is bound to at most one driver at a time
//! - **Configuration-driven**: define motor assignments in TOML files, by name
//!   or by legacy integer code
//! - **embedded-hal 1.0**: PWM controllers use `SetDutyCycle`
//! - **no_std compatible**: core library needs only `alloc`
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use var_motor::{DriverLibrary, MotorKind, VarMotor};
//!
//! let mut library = DriverLibrary::new(pwm_outputs, can_bus);
//!
//! let mut motor = VarMotor::new(&mut library, MotorKind::Talon, 3, false)?;
//! motor.set_speed(0.5)?;
//!
//! // Same output, now a CAN Talon SRX at device id 5, reversed
//! motor.reassign(&mut library, MotorKind::CanTalon, 5, true)?;
//! println!("{}", motor); // "CANTalon @ addr. 5"
//! ```
//!
//! ## Feature Flags
//!
//! - `std` (default): Enables file I/O and TOML parsing
//! - `defmt`: Enables defmt logging for embedded targets (otherwise `tracing`)

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]
// Allow large error types - necessary for no_std with heapless strings
#![allow(clippy::result_large_err)]

extern crate alloc;

#[macro_use]
mod fmt;

// Core modules
pub mod config;
pub mod driver;
pub mod error;
pub mod motor;

// Re-exports for ergonomic API
pub use config::{validate_config, MotorAssignment, RobotConfig};
pub use driver::{Bus, DriverLibrary, Port, PortAllocator, PwmOutputs};
pub use error::{ConfigError, DriverError, Error, MotorError, Result};
pub use motor::{DriverProvider, MotorBank, MotorKind, SpeedController, VarMotor};

// Configuration loading (std only)
#[cfg(feature = "std")]
pub use config::{load_config, parse_config};

//! Unit test harness for var-motor.
//!
//! This module organizes unit tests for each component of the library.

mod config_parsing;
mod kind_codes;
mod speed_mapping;

//! Configuration loading from files (std only).

use std::fs;
use std::path::Path;

use crate::error::{ConfigError, Error, Result};

use super::RobotConfig;

/// Load configuration from a TOML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
///
/// # Example
///
/// ```rust,ignore
/// use var_motor::load_config;
///
/// let config = load_config("motors.toml")?;
/// ```
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<RobotConfig> {
    let content = fs::read_to_string(path.as_ref()).map_err(|e| {
        let msg = truncated(&e.to_string());
        Error::Config(ConfigError::IoError(msg))
    })?;

    parse_config(&content)
}

/// Parse configuration from a TOML string.
///
/// # Errors
///
/// Returns an error if the TOML is invalid or fails validation.
pub fn parse_config(content: &str) -> Result<RobotConfig> {
    let config: RobotConfig = toml::from_str(content)
        .map_err(|e| Error::Config(ConfigError::ParseError(truncated(e.message()))))?;

    // Validate the configuration
    super::validation::validate_config(&config)?;

    Ok(config)
}

/// Copy as much of `msg` as fits in a bounded error string.
fn truncated<const N: usize>(msg: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    for c in msg.chars() {
        if out.push(c).is_err() {
            break;
        }
    }
    out
}

//! Error types for var-motor library.
//!
//! Provides unified error handling across configuration, driver acquisition, and speed output.

use core::fmt;

use crate::driver::Port;
use crate::motor::MotorKind;

/// Result type alias using the library's Error type.
pub type Result<T> = core::result::Result<T, Error>;

/// Unified error type for all var-motor operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Configuration parsing or validation error
    Config(ConfigError),
    /// Driver could not be opened on the requested channel
    Driver(DriverError),
    /// Speed output to an open driver failed
    Motor(MotorError),
}

/// Configuration-related errors.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Failed to parse TOML configuration
    ParseError(heapless::String<128>),
    /// Motor name not found in configuration
    MotorNotFound(heapless::String<32>),
    /// Motor name longer than 32 bytes
    NameTooLong,
    /// Too many motors for the fixed-capacity motor bank
    TooManyMotors,
    /// Channel is outside the range of the kind's bus
    ChannelOutOfRange {
        /// Motor name
        motor: heapless::String<32>,
        /// Motor kind
        kind: MotorKind,
        /// Configured channel
        channel: u8,
    },
    /// Two assignments share a hardware port
    DuplicateChannel {
        /// Motor that claimed the port first
        first: heapless::String<32>,
        /// Motor that claims it again
        second: heapless::String<32>,
        /// The shared port
        port: Port,
    },
    /// File I/O error (std only)
    #[cfg(feature = "std")]
    IoError(heapless::String<128>),
}

/// Errors raised by the driver library when opening a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverError {
    /// Channel does not exist on the bus
    ChannelOutOfRange(Port),
    /// Channel is already bound to another driver
    ChannelInUse(Port),
    /// No PWM output is wired to the channel
    NoSuchOutput(u8),
    /// The controller did not accept its initial neutral command
    InitFailed(Port),
    /// The provider cannot build this kind of controller
    UnsupportedKind(MotorKind),
}

/// Speed output errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorError {
    /// PWM duty cycle write failed
    Output,
    /// CAN frame transmit failed
    Bus,
    /// Driver was already released
    Released,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(e) => write!(f, "Configuration error: {}", e),
            Error::Driver(e) => write!(f, "Driver error: {}", e),
            Error::Motor(e) => write!(f, "Motor error: {}", e),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ConfigError::MotorNotFound(name) => write!(f, "Motor '{}' not found", name),
            ConfigError::NameTooLong => write!(f, "Motor name too long (max 32 bytes)"),
            ConfigError::TooManyMotors => write!(f, "Too many motors (max 16)"),
            ConfigError::ChannelOutOfRange { motor, kind, channel } => write!(
                f,
                "Motor '{}': channel {} is out of range for {}",
                motor,
                channel,
                kind.name()
            ),
            ConfigError::DuplicateChannel { first, second, port } => write!(
                f,
                "Motors '{}' and '{}' both use {}",
                first, second, port
            ),
            #[cfg(feature = "std")]
            ConfigError::IoError(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl fmt::Display for DriverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DriverError::ChannelOutOfRange(port) => write!(f, "{} does not exist", port),
            DriverError::ChannelInUse(port) => write!(f, "{} is already in use", port),
            DriverError::NoSuchOutput(channel) => {
                write!(f, "No PWM output wired to channel {}", channel)
            }
            DriverError::InitFailed(port) => write!(f, "Controller on {} failed to start", port),
            DriverError::UnsupportedKind(kind) => {
                write!(f, "Cannot open a driver for {}", kind.name())
            }
        }
    }
}

impl fmt::Display for MotorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorError::Output => write!(f, "PWM output write failed"),
            MotorError::Bus => write!(f, "CAN transmit failed"),
            MotorError::Released => write!(f, "Driver already released"),
        }
    }
}

// Conversion impls
impl From<ConfigError> for Error {
    fn from(e: ConfigError) -> Self {
        Error::Config(e)
    }
}

impl From<DriverError> for Error {
    fn from(e: DriverError) -> Self {
        Error::Driver(e)
    }
}

impl From<MotorError> for Error {
    fn from(e: MotorError) -> Self {
        Error::Motor(e)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

#[cfg(feature = "std")]
impl std::error::Error for DriverError {}

#[cfg(feature = "std")]
impl std::error::Error for MotorError {}

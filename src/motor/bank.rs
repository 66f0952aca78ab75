//! Named motor handles built from configuration.

use heapless::{FnvIndexMap, String};

use crate::config::{RobotConfig, MAX_MOTORS};
use crate::error::{ConfigError, Error, Result};

use super::handle::VarMotor;
use super::kind::MotorKind;
use super::provider::DriverProvider;

/// A table of [`VarMotor`] handles keyed by name.
///
/// # Example
///
/// ```rust,ignore
/// use var_motor::{MotorBank, MotorKind};
///
/// let config = var_motor::load_config("motors.toml")?;
/// let mut bank = MotorBank::from_config(&config, &mut library)?;
///
/// bank.set_speed("left_drive", 0.8)?;
/// bank.reassign("left_drive", &mut library, MotorKind::VictorSp, 0, false)?;
/// ```
#[derive(Debug, Default)]
pub struct MotorBank {
    motors: FnvIndexMap<String<32>, VarMotor, MAX_MOTORS>,
}

impl MotorBank {
    /// Create an empty bank.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open every assignment in `config`.
    ///
    /// Unset assignments become unset handles.
    ///
    /// # Errors
    ///
    /// Returns the first driver error. Handles opened before it are released.
    pub fn from_config<P>(config: &RobotConfig, provider: &mut P) -> Result<Self>
    where
        P: DriverProvider + ?Sized,
    {
        let mut bank = Self::new();
        for (name, assignment) in config.motors.iter() {
            let motor = VarMotor::new(
                provider,
                assignment.kind,
                assignment.channel,
                assignment.inverted,
            )?;
            bank.insert(name.as_str(), motor)?;
        }
        Ok(bank)
    }

    /// Add or replace a handle.
    ///
    /// A replaced handle is dropped, releasing its driver.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is too long or the bank is full.
    pub fn insert(&mut self, name: &str, motor: VarMotor) -> Result<()> {
        let key = String::try_from(name).map_err(|_| Error::Config(ConfigError::NameTooLong))?;
        self.motors
            .insert(key, motor)
            .map_err(|_| Error::Config(ConfigError::TooManyMotors))?;
        Ok(())
    }

    /// Get a handle by name.
    pub fn get(&self, name: &str) -> Option<&VarMotor> {
        self.motors
            .iter()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    /// Get a mutable handle by name.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut VarMotor> {
        self.motors
            .iter_mut()
            .find(|(k, _)| k.as_str() == name)
            .map(|(_, v)| v)
    }

    fn motor_or_error(&mut self, name: &str) -> Result<&mut VarMotor> {
        self.get_mut(name).ok_or_else(|| {
            Error::Config(ConfigError::MotorNotFound(
                String::try_from(name).unwrap_or_default(),
            ))
        })
    }

    /// Command a speed on a named handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is unknown or the driver write fails.
    pub fn set_speed(&mut self, name: &str, speed: f32) -> Result<()> {
        self.motor_or_error(name)?.set_speed(speed)
    }

    /// Re-point a named handle at another controller.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is unknown or the new driver fails to open;
    /// in the latter case the handle is left unset.
    pub fn reassign<P>(
        &mut self,
        name: &str,
        provider: &mut P,
        kind: MotorKind,
        channel: u8,
        inverted: bool,
    ) -> Result<()>
    where
        P: DriverProvider + ?Sized,
    {
        self.motor_or_error(name)?.reassign(provider, kind, channel, inverted)
    }

    /// Command zero speed on every handle.
    ///
    /// Keeps going past failures and returns the first one.
    pub fn stop_all(&mut self) -> Result<()> {
        let mut first_error = None;
        for (_, motor) in self.motors.iter_mut() {
            if let Err(e) = motor.set_speed(0.0) {
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// List handle names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.motors.keys().map(|s| s.as_str())
    }

    /// Iterate over handles.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VarMotor)> {
        self.motors.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of handles.
    pub fn len(&self) -> usize {
        self.motors.len()
    }

    /// Whether the bank is empty.
    pub fn is_empty(&self) -> bool {
        self.motors.is_empty()
    }
}

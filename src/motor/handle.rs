//! Variable motor handle.
//!
//! A [`VarMotor`] owns at most one speed controller and can be re-pointed at a
//! different controller kind or channel at runtime.

use alloc::boxed::Box;
use core::fmt;

use crate::error::Result;

use super::controller::SpeedController;
use super::kind::MotorKind;
use super::provider::DriverProvider;

/// Owned driver slot. Releases the driver when dropped.
struct Bound {
    driver: Box<dyn SpeedController>,
}

impl Drop for Bound {
    fn drop(&mut self) {
        self.driver.release();
    }
}

/// A motor output whose controller kind and channel can change at runtime.
///
/// The handle is either *unset* (no driver, [`MotorKind::None`]) or *bound* to
/// exactly one driver. Switching always releases the old driver before the new
/// one is opened, so a channel is never claimed twice.
///
/// `VarMotor` does no locking: the owner (usually one control loop) must
/// serialise access.
///
/// # Example
///
/// ```rust,ignore
/// use var_motor::{MotorKind, VarMotor};
///
/// let mut motor = VarMotor::new(&mut library, MotorKind::Talon, 3, false)?;
/// motor.set_speed(0.5)?;
/// motor.reassign(&mut library, MotorKind::VictorSp, 3, true)?;
/// ```
pub struct VarMotor {
    kind: MotorKind,
    channel: Option<u8>,
    inverted: bool,
    driver: Option<Bound>,
}

impl VarMotor {
    /// Create an unset handle.
    pub const fn unset() -> Self {
        Self {
            kind: MotorKind::None,
            channel: None,
            inverted: false,
            driver: None,
        }
    }

    /// Create a handle bound to a controller of `kind` on `channel`.
    ///
    /// With [`MotorKind::None`] the handle is unset whatever the channel.
    ///
    /// # Errors
    ///
    /// Propagates the provider's [`DriverError`](crate::error::DriverError).
    pub fn new<P>(provider: &mut P, kind: MotorKind, channel: u8, inverted: bool) -> Result<Self>
    where
        P: DriverProvider + ?Sized,
    {
        let mut motor = Self::unset();
        motor.reassign(provider, kind, channel, inverted)?;
        Ok(motor)
    }

    /// Re-point the handle at a controller of `kind` on `channel`.
    ///
    /// The current driver is released first and `inverted` is stored before the
    /// new driver opens. If the new driver fails to open, the handle is left
    /// unset (keeping the new `inverted` flag) and the error is returned.
    ///
    /// # Errors
    ///
    /// Propagates the provider's [`DriverError`](crate::error::DriverError).
    pub fn reassign<P>(
        &mut self,
        provider: &mut P,
        kind: MotorKind,
        channel: u8,
        inverted: bool,
    ) -> Result<()>
    where
        P: DriverProvider + ?Sized,
    {
        self.release();
        self.inverted = inverted;

        if kind.is_none() {
            return Ok(());
        }

        let mut driver = provider.open(kind, channel).map_err(|e| {
            warn!("failed to open {} on channel {}", kind.name(), channel);
            e
        })?;
        driver.set_inverted(inverted);

        debug!("bound {} on channel {}", kind.name(), channel);
        self.kind = kind;
        self.channel = Some(channel);
        self.driver = Some(Bound { driver });
        Ok(())
    }

    /// Release the held driver, leaving the handle unset.
    pub fn release(&mut self) {
        if let Some(bound) = self.driver.take() {
            debug!(
                "releasing {} on channel {}",
                self.kind.name(),
                self.channel.unwrap_or_default()
            );
            drop(bound);
        }
        self.kind = MotorKind::None;
        self.channel = None;
    }

    /// Command a speed in `[-1.0, 1.0]`.
    ///
    /// Does nothing on an unset handle.
    ///
    /// # Errors
    ///
    /// Returns a [`MotorError`](crate::error::MotorError) if the driver's output write fails.
    pub fn set_speed(&mut self, speed: f32) -> Result<()> {
        match self.driver.as_mut() {
            Some(bound) => Ok(bound.driver.set(speed)?),
            None => {
                trace!("speed command ignored, no motor set");
                Ok(())
            }
        }
    }

    /// Last commanded speed, `0.0` when unset.
    pub fn speed(&self) -> f32 {
        self.driver.as_ref().map_or(0.0, |bound| bound.driver.get())
    }

    /// Current controller kind.
    #[inline]
    pub fn kind(&self) -> MotorKind {
        self.kind
    }

    /// Whether commands are inverted.
    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Bound channel, `None` when unset.
    #[inline]
    pub fn channel(&self) -> Option<u8> {
        self.channel
    }

    /// Channel as a legacy address, `-1` when unset.
    #[inline]
    pub fn legacy_address(&self) -> i32 {
        self.channel.map_or(-1, i32::from)
    }

    /// Whether a driver is held.
    #[inline]
    pub fn is_bound(&self) -> bool {
        self.driver.is_some()
    }
}

impl Default for VarMotor {
    fn default() -> Self {
        Self::unset()
    }
}

impl fmt::Display for VarMotor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.driver.as_ref(), self.channel) {
            (Some(_), Some(channel)) => write!(f, "{} @ addr. {}", self.kind.name(), channel),
            _ => f.write_str("No or invalid motor set."),
        }
    }
}

impl fmt::Debug for VarMotor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VarMotor")
            .field("kind", &self.kind)
            .field("channel", &self.channel)
            .field("inverted", &self.inverted)
            .field("bound", &self.is_bound())
            .finish()
    }
}

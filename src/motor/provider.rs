//! Driver construction boundary.

use alloc::boxed::Box;

use crate::error::DriverError;

use super::controller::SpeedController;
use super::kind::MotorKind;

/// Opens speed controllers by kind and channel.
///
/// Implemented by [`DriverLibrary`](crate::driver::DriverLibrary) for real hardware.
/// [`VarMotor`](super::VarMotor) never calls it with [`MotorKind::None`].
pub trait DriverProvider {
    /// Open a controller of `kind` bound to `channel`.
    ///
    /// # Errors
    ///
    /// Returns a [`DriverError`] if the channel is invalid, already claimed,
    /// or the kind cannot be built by this provider.
    fn open(
        &mut self,
        kind: MotorKind,
        channel: u8,
    ) -> Result<Box<dyn SpeedController>, DriverError>;
}

impl<P: DriverProvider + ?Sized> DriverProvider for &mut P {
    fn open(
        &mut self,
        kind: MotorKind,
        channel: u8,
    ) -> Result<Box<dyn SpeedController>, DriverError> {
        (**self).open(kind, channel)
    }
}

//! Speed controller capability shared by every driver kind.

use crate::error::MotorError;

/// A driver that accepts normalised speed commands.
///
/// Speeds are in `[-1.0, 1.0]`; drivers clamp anything outside it and treat NaN as stop.
/// Inversion flips the sign of the command before it reaches hardware.
pub trait SpeedController {
    /// Command a speed.
    fn set(&mut self, speed: f32) -> Result<(), MotorError>;

    /// Last commanded speed, before inversion.
    fn get(&self) -> f32;

    /// Reverse the direction of subsequent commands.
    fn set_inverted(&mut self, inverted: bool);

    /// Whether commands are inverted.
    fn is_inverted(&self) -> bool;

    /// Stop the output and give the channel back.
    ///
    /// Must be idempotent.
    fn release(&mut self);
}

/// Clamp a speed to `[-1.0, 1.0]`, mapping NaN to `0.0`.
#[inline]
pub fn normalize_speed(speed: f32) -> f32 {
    if speed.is_nan() {
        0.0
    } else {
        speed.clamp(-1.0, 1.0)
    }
}

/// Normalise a speed and apply inversion.
#[inline]
pub fn output_speed(speed: f32, inverted: bool) -> f32 {
    let speed = normalize_speed(speed);
    if inverted {
        -speed
    } else {
        speed
    }
}

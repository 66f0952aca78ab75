//! Pulse-width speed controllers.
//!
//! Hobby-style controllers read a pulse every frame: a center pulse means stop,
//! longer pulses drive forward and shorter pulses reverse, with a small deadband
//! around center. Each controller family has its own calibration.

use embedded_hal::pwm::SetDutyCycle;

use crate::error::MotorError;
use crate::motor::{normalize_speed, output_speed, MotorKind, SpeedController};

use super::ports::PortClaim;

/// Pulse calibration for one controller family, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseBounds {
    /// Full forward pulse.
    pub max: f32,
    /// Smallest forward pulse outside the deadband.
    pub deadband_max: f32,
    /// Stop pulse.
    pub center: f32,
    /// Smallest reverse pulse outside the deadband.
    pub deadband_min: f32,
    /// Full reverse pulse.
    pub min: f32,
    /// Frame period.
    pub period: f32,
}

impl PulseBounds {
    /// Jaguar calibration.
    pub const JAGUAR: Self = Self::new(2.31, 1.55, 1.507, 1.454, 0.697, 5.05);
    /// Talon calibration.
    pub const TALON: Self = Self::new(2.037, 1.539, 1.513, 1.487, 0.989, 5.05);
    /// Talon SRX (PWM mode) calibration.
    pub const TALON_SRX: Self = Self::new(2.004, 1.52, 1.50, 1.48, 0.997, 5.05);
    /// Victor calibration. Victors need a doubled frame period.
    pub const VICTOR: Self = Self::new(2.027, 1.525, 1.507, 1.49, 1.026, 10.1);
    /// Victor SP calibration.
    pub const VICTOR_SP: Self = Self::new(2.004, 1.52, 1.50, 1.48, 0.997, 5.05);

    /// Create a calibration.
    pub const fn new(
        max: f32,
        deadband_max: f32,
        center: f32,
        deadband_min: f32,
        min: f32,
        period: f32,
    ) -> Self {
        Self {
            max,
            deadband_max,
            center,
            deadband_min,
            min,
            period,
        }
    }

    /// Calibration for a PWM controller kind, `None` for CAN kinds.
    pub const fn for_kind(kind: MotorKind) -> Option<Self> {
        match kind {
            MotorKind::Jaguar => Some(Self::JAGUAR),
            MotorKind::Talon => Some(Self::TALON),
            MotorKind::TalonSrx => Some(Self::TALON_SRX),
            MotorKind::Victor => Some(Self::VICTOR),
            MotorKind::VictorSp => Some(Self::VICTOR_SP),
            MotorKind::None | MotorKind::CanJaguar | MotorKind::CanTalon => None,
        }
    }

    /// Pulse width for a speed in `[-1.0, 1.0]`.
    pub fn pulse(&self, speed: f32) -> f32 {
        let speed = normalize_speed(speed);
        if speed > 0.0 {
            self.deadband_max + speed * (self.max - self.deadband_max)
        } else if speed < 0.0 {
            self.deadband_min + speed * (self.deadband_min - self.min)
        } else {
            self.center
        }
    }

    /// Duty cycle for a pulse width, given the output's full-scale duty.
    pub fn duty(&self, pulse: f32, max_duty: u16) -> u16 {
        let duty = libm::roundf(pulse / self.period * max_duty as f32);
        duty.clamp(0.0, max_duty as f32) as u16
    }
}

/// A PWM speed controller on one output channel.
///
/// Releasing the controller drops its output, so an output borrowed from a
/// pool goes back to it.
pub struct PwmSpeedController<P: SetDutyCycle> {
    output: Option<P>,
    kind: MotorKind,
    bounds: PulseBounds,
    speed: f32,
    inverted: bool,
    released: bool,
    claim: Option<PortClaim>,
}

impl<P: SetDutyCycle> PwmSpeedController<P> {
    /// Take over `output` and drive it to the stop pulse.
    ///
    /// # Errors
    ///
    /// Returns [`MotorError::Output`] if the initial write fails.
    pub fn new(
        output: P,
        kind: MotorKind,
        bounds: PulseBounds,
        claim: Option<PortClaim>,
    ) -> Result<Self, MotorError> {
        let mut controller = Self {
            output: Some(output),
            kind,
            bounds,
            speed: 0.0,
            inverted: false,
            released: false,
            claim,
        };
        controller.write(bounds.center)?;
        Ok(controller)
    }

    /// Controller kind.
    #[inline]
    pub fn kind(&self) -> MotorKind {
        self.kind
    }

    /// Calibration in use.
    #[inline]
    pub fn bounds(&self) -> &PulseBounds {
        &self.bounds
    }

    fn write(&mut self, pulse: f32) -> Result<(), MotorError> {
        let output = self.output.as_mut().ok_or(MotorError::Released)?;
        let duty = self.bounds.duty(pulse, output.max_duty_cycle());
        output.set_duty_cycle(duty).map_err(|_| MotorError::Output)
    }
}

impl<P: SetDutyCycle> SpeedController for PwmSpeedController<P> {
    fn set(&mut self, speed: f32) -> Result<(), MotorError> {
        let pulse = self.bounds.pulse(output_speed(speed, self.inverted));
        self.write(pulse)?;
        self.speed = normalize_speed(speed);
        Ok(())
    }

    fn get(&self) -> f32 {
        self.speed
    }

    fn set_inverted(&mut self, inverted: bool) {
        self.inverted = inverted;
    }

    fn is_inverted(&self) -> bool {
        self.inverted
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        if let Some(mut output) = self.output.take() {
            // Zero duty means no pulses: the controller disables its output
            if output.set_duty_cycle_fully_off().is_err() {
                warn!("disable write for {} failed", self.kind.name());
            }
        }
        self.speed = 0.0;
        self.released = true;
        self.claim = None;
    }
}

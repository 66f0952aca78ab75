//! Concrete driver provider over PWM outputs and a CAN bus.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::RefCell;

use embedded_hal::pwm::{ErrorType, SetDutyCycle};

use crate::error::DriverError;
use crate::motor::{DriverProvider, MotorKind, SpeedController};

use super::can::{CanSpeedController, CanTransmit, SharedCan};
use super::ports::{Bus, Port, PortAllocator};
use super::pwm::{PulseBounds, PwmSpeedController};

/// Source of PWM outputs, one per channel.
///
/// Each output is taken at most once and comes back through
/// [`restore`](Self::restore) when its controller is released.
pub trait PwmOutputs {
    /// Output type handed to the controller.
    type Output: SetDutyCycle + 'static;

    /// Take the output wired to `channel`, `None` if there is none or it is taken.
    fn output(&mut self, channel: u8) -> Option<Self::Output>;

    /// Put back an output previously taken from `channel`.
    fn restore(&mut self, channel: u8, output: Self::Output);
}

/// A PWM output on loan from a [`PwmOutputs`] source. Handed back on drop.
pub struct LeasedOutput<O: PwmOutputs> {
    channel: u8,
    output: Option<O::Output>,
    source: Rc<RefCell<O>>,
}

impl<O: PwmOutputs> LeasedOutput<O> {
    fn take(source: &Rc<RefCell<O>>, channel: u8) -> Option<Self> {
        let output = source.borrow_mut().output(channel)?;
        Some(Self {
            channel,
            output: Some(output),
            source: source.clone(),
        })
    }

    /// Channel the output is wired to.
    #[inline]
    pub fn channel(&self) -> u8 {
        self.channel
    }
}

impl<O: PwmOutputs> ErrorType for LeasedOutput<O> {
    type Error = <O::Output as ErrorType>::Error;
}

impl<O: PwmOutputs> SetDutyCycle for LeasedOutput<O> {
    fn max_duty_cycle(&self) -> u16 {
        self.output.as_ref().map_or(0, |output| output.max_duty_cycle())
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        match self.output.as_mut() {
            Some(output) => output.set_duty_cycle(duty),
            None => Ok(()),
        }
    }
}

impl<O: PwmOutputs> Drop for LeasedOutput<O> {
    fn drop(&mut self) {
        if let Some(output) = self.output.take() {
            self.source.borrow_mut().restore(self.channel, output);
        }
    }
}

/// Placeholder CAN bus for robots without one.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoCan;

impl CanTransmit for NoCan {
    type Error = ();

    fn transmit(&mut self, _frame: &bxcan::Frame) -> Result<(), ()> {
        Err(())
    }
}

/// Opens PWM and CAN speed controllers, one per port.
///
/// Ports are claimed for the lifetime of the returned controller; releasing
/// the controller frees the port for the next one.
pub struct DriverLibrary<O, B = NoCan>
where
    O: PwmOutputs,
    B: CanTransmit + 'static,
{
    ports: PortAllocator,
    pwm: Rc<RefCell<O>>,
    can: Option<SharedCan<B>>,
}

impl<O: PwmOutputs> DriverLibrary<O, NoCan> {
    /// Create a library with PWM outputs only.
    pub fn pwm_only(pwm: O) -> Self {
        Self {
            ports: PortAllocator::new(),
            pwm: Rc::new(RefCell::new(pwm)),
            can: None,
        }
    }
}

impl<O, B> DriverLibrary<O, B>
where
    O: PwmOutputs + 'static,
    B: CanTransmit + 'static,
{
    /// Create a library over PWM outputs and a CAN bus.
    pub fn new(pwm: O, can: B) -> Self {
        Self {
            ports: PortAllocator::new(),
            pwm: Rc::new(RefCell::new(pwm)),
            can: Some(Rc::new(RefCell::new(can))),
        }
    }

    /// Port claim table.
    pub fn ports(&self) -> &PortAllocator {
        &self.ports
    }

    /// PWM output source. Outputs held by live controllers are absent from it.
    pub fn outputs(&self) -> &Rc<RefCell<O>> {
        &self.pwm
    }

    /// Shared CAN bus, if one is attached.
    pub fn can(&self) -> Option<&SharedCan<B>> {
        self.can.as_ref()
    }

    fn open_pwm(
        &mut self,
        kind: MotorKind,
        bounds: PulseBounds,
        channel: u8,
    ) -> Result<Box<dyn SpeedController>, DriverError> {
        let claim = self.ports.claim(Port::pwm(channel))?;
        let output =
            LeasedOutput::take(&self.pwm, channel).ok_or(DriverError::NoSuchOutput(channel))?;
        let controller = PwmSpeedController::new(output, kind, bounds, Some(claim))
            .map_err(|_| DriverError::InitFailed(Port::pwm(channel)))?;
        Ok(Box::new(controller))
    }

    fn open_can(
        &mut self,
        kind: MotorKind,
        device_id: u8,
    ) -> Result<Box<dyn SpeedController>, DriverError> {
        let bus = self
            .can
            .clone()
            .ok_or(DriverError::UnsupportedKind(kind))?;
        let claim = self.ports.claim(Port::can(device_id))?;
        let controller = CanSpeedController::new(bus, kind, device_id, Some(claim))
            .ok_or(DriverError::UnsupportedKind(kind))?;
        Ok(Box::new(controller))
    }
}

impl<O, B> DriverProvider for DriverLibrary<O, B>
where
    O: PwmOutputs + 'static,
    B: CanTransmit + 'static,
{
    fn open(
        &mut self,
        kind: MotorKind,
        channel: u8,
    ) -> Result<Box<dyn SpeedController>, DriverError> {
        match (kind.bus(), PulseBounds::for_kind(kind)) {
            (Some(Bus::Pwm), Some(bounds)) => self.open_pwm(kind, bounds, channel),
            (Some(Bus::Can), _) => self.open_can(kind, channel),
            _ => Err(DriverError::UnsupportedKind(kind)),
        }
    }
}

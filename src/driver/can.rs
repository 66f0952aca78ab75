//! CAN-bus speed controllers.
//!
//! Each controller is addressed by a 6-bit device id. Commands go out as
//! standard data frames with id `base | device_id`:
//!
//! | byte | meaning                                         |
//! |------|-------------------------------------------------|
//! | 0    | command: `0x01` percent output, `0x00` disable  |
//! | 1..3 | speed, little-endian `i16`, full scale = 32767  |

use alloc::rc::Rc;
use core::cell::RefCell;
use core::convert::Infallible;
use core::fmt::Debug;

use bxcan::{Frame, StandardId};

use crate::error::MotorError;
use crate::motor::{normalize_speed, output_speed, MotorKind, SpeedController};

use super::ports::{PortClaim, CAN_DEVICE_IDS};

/// Percent-output command byte.
pub const CMD_PERCENT_OUTPUT: u8 = 0x01;

/// Disable command byte.
pub const CMD_DISABLE: u8 = 0x00;

/// Something that can put a frame on the CAN bus.
pub trait CanTransmit {
    /// Transmit error.
    type Error: Debug;

    /// Queue `frame` for transmission, blocking until a mailbox is free.
    fn transmit(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}

impl<I: bxcan::Instance> CanTransmit for bxcan::Can<I> {
    type Error = Infallible;

    fn transmit(&mut self, frame: &Frame) -> Result<(), Infallible> {
        transmit_requeuing(frame, |frame| {
            nb::block!(bxcan::Can::transmit(self, frame))
                .map(|status| status.dequeued_frame().cloned())
        })
    }
}

/// Send `frame`, then send again any lower-priority frame it pushed out of a
/// full mailbox, until nothing is displaced.
fn transmit_requeuing<E>(
    frame: &Frame,
    mut send: impl FnMut(&Frame) -> Result<Option<Frame>, E>,
) -> Result<(), E> {
    let mut displaced = send(frame)?;
    while let Some(frame) = displaced {
        displaced = send(&frame)?;
    }
    Ok(())
}

/// CAN bus shared by every controller on it.
pub type SharedCan<B> = Rc<RefCell<B>>;

/// Arbitration id base for a CAN controller kind, `None` for PWM kinds.
pub const fn id_base(kind: MotorKind) -> Option<u16> {
    match kind {
        MotorKind::CanJaguar => Some(0x200),
        MotorKind::CanTalon => Some(0x400),
        _ => None,
    }
}

/// Build a command frame.
///
/// Returns `None` if `device_id` is not a valid device id or the id does not
/// fit in 11 bits.
pub fn command_frame(base: u16, device_id: u8, command: u8, speed: f32) -> Option<Frame> {
    if device_id >= CAN_DEVICE_IDS {
        return None;
    }
    let id = StandardId::new(base | device_id as u16)?;
    let raw = (normalize_speed(speed) * i16::MAX as f32) as i16;
    let [lo, hi] = raw.to_le_bytes();
    Some(Frame::new_data(id, [command, lo, hi]))
}

/// A speed controller addressed over CAN.
pub struct CanSpeedController<B: CanTransmit> {
    bus: SharedCan<B>,
    kind: MotorKind,
    base: u16,
    device_id: u8,
    speed: f32,
    inverted: bool,
    released: bool,
    claim: Option<PortClaim>,
}

impl<B: CanTransmit> CanSpeedController<B> {
    /// Create a controller for `device_id` on a shared bus.
    ///
    /// Returns `None` for kinds that do not live on the CAN bus and for
    /// out-of-range device ids.
    pub fn new(
        bus: SharedCan<B>,
        kind: MotorKind,
        device_id: u8,
        claim: Option<PortClaim>,
    ) -> Option<Self> {
        let base = id_base(kind)?;
        if device_id >= CAN_DEVICE_IDS {
            return None;
        }
        Some(Self {
            bus,
            kind,
            base,
            device_id,
            speed: 0.0,
            inverted: false,
            released: false,
            claim,
        })
    }

    /// Controller kind.
    #[inline]
    pub fn kind(&self) -> MotorKind {
        self.kind
    }

    /// Device id on the bus.
    #[inline]
    pub fn device_id(&self) -> u8 {
        self.device_id
    }

    fn send(&mut self, command: u8, speed: f32) -> Result<(), MotorError> {
        let frame =
            command_frame(self.base, self.device_id, command, speed).ok_or(MotorError::Bus)?;
        self.bus
            .borrow_mut()
            .transmit(&frame)
            .map_err(|_| MotorError::Bus)
    }
}

impl<B: CanTransmit> SpeedController for CanSpeedController<B> {
    fn set(&mut self, speed: f32) -> Result<(), MotorError> {
        self.send(CMD_PERCENT_OUTPUT, output_speed(speed, self.inverted))?;
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
        if self.send(CMD_DISABLE, 0.0).is_err() {
            warn!("disable frame for CAN device {} not sent", self.device_id);
        }
        self.speed = 0.0;
        self.released = true;
        self.claim = None;
    }
}

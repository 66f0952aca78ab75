//! Fake hardware shared by the integration tests.

#![allow(dead_code)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use bxcan::{Frame, Id};
use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use var_motor::driver::CanTransmit;
use var_motor::{DriverLibrary, PwmOutputs};

/// Full-scale duty of the fake outputs: 2000 counts per ms over a 5.05 ms frame.
pub const MAX_DUTY: u16 = 10_100;

/// Duty writes per PWM channel.
pub type DutyLog = Rc<RefCell<Vec<(u8, u16)>>>;

/// One PWM output that records its writes.
pub struct FakePwm {
    channel: u8,
    log: DutyLog,
}

impl ErrorType for FakePwm {
    type Error = Infallible;
}

impl SetDutyCycle for FakePwm {
    fn max_duty_cycle(&self) -> u16 {
        MAX_DUTY
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.log.borrow_mut().push((self.channel, duty));
        Ok(())
    }
}

/// A PWM header whose outputs can each be taken once until restored.
#[derive(Default)]
pub struct FakeHeader {
    slots: Vec<Option<FakePwm>>,
    pub log: DutyLog,
    /// Channels in the order their outputs came back.
    pub restored: Vec<u8>,
}

impl FakeHeader {
    /// Header with outputs wired to channels `0..channels`.
    pub fn with_channels(channels: u8) -> Self {
        let log = DutyLog::default();
        let slots = (0..channels)
            .map(|channel| {
                Some(FakePwm {
                    channel,
                    log: log.clone(),
                })
            })
            .collect();
        Self {
            slots,
            log,
            restored: Vec::new(),
        }
    }

    /// Whether the output for `channel` is back in the header.
    pub fn is_available(&self, channel: u8) -> bool {
        matches!(self.slots.get(channel as usize), Some(Some(_)))
    }
}

impl PwmOutputs for FakeHeader {
    type Output = FakePwm;

    fn output(&mut self, channel: u8) -> Option<FakePwm> {
        self.slots.get_mut(channel as usize)?.take()
    }

    fn restore(&mut self, channel: u8, output: FakePwm) {
        self.restored.push(channel);
        if let Some(slot) = self.slots.get_mut(channel as usize) {
            *slot = Some(output);
        }
    }
}

/// CAN bus that records transmitted frames.
#[derive(Default)]
pub struct FakeCan {
    pub frames: Vec<Frame>,
}

impl CanTransmit for FakeCan {
    type Error = Infallible;

    fn transmit(&mut self, frame: &Frame) -> Result<(), Infallible> {
        self.frames.push(frame.clone());
        Ok(())
    }
}

impl FakeCan {
    /// (id, payload) pairs in transmit order.
    pub fn sent(&self) -> Vec<(u16, Vec<u8>)> {
        self.frames
            .iter()
            .map(|f| {
                let id = match f.id() {
                    Id::Standard(id) => id.as_raw(),
                    Id::Extended(_) => panic!("unexpected extended id"),
                };
                (id, f.data().map(|d| d.to_vec()).unwrap_or_default())
            })
            .collect()
    }
}

/// Library with ten PWM outputs and a CAN bus. Returns the duty log too.
pub fn library() -> (DriverLibrary<FakeHeader, FakeCan>, DutyLog) {
    let header = FakeHeader::with_channels(10);
    let log = header.log.clone();
    (DriverLibrary::new(header, FakeCan::default()), log)
}

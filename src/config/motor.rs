//! Motor assignment from TOML.

use serde::Deserialize;

use crate::driver::Port;
use crate::motor::MotorKind;

/// One motor output: which controller drives it and where.
///
/// `kind` accepts a configuration key (`"talon_srx"`) or a legacy integer code
/// (`4`). Unknown codes read as [`MotorKind::None`], leaving the output unset.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct MotorAssignment {
    /// Controller kind.
    pub kind: MotorKind,

    /// PWM channel or CAN device id.
    #[serde(default)]
    pub channel: u8,

    /// Reverse the motor direction.
    #[serde(default)]
    pub inverted: bool,
}

impl MotorAssignment {
    /// Create an assignment.
    pub const fn new(kind: MotorKind, channel: u8, inverted: bool) -> Self {
        Self {
            kind,
            channel,
            inverted,
        }
    }

    /// Port this assignment binds, `None` for unset outputs.
    pub fn port(&self) -> Option<Port> {
        self.kind.bus().map(|bus| Port::new(bus, self.channel))
    }
}

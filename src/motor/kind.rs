//! Motor controller kinds and their legacy numeric codes.

use core::fmt;

use serde::de::{self, Deserialize, Deserializer, Visitor};

use crate::driver::Bus;

/// The closed set of speed controllers a [`VarMotor`](super::VarMotor) can drive.
///
/// Each kind carries a legacy integer code used by stored motor assignments
/// (see [`MotorKind::code`] and [`MotorKind::from_code`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotorKind {
    /// No controller bound.
    #[default]
    None,
    /// Jaguar on the CAN bus.
    CanJaguar,
    /// Jaguar on a PWM port.
    Jaguar,
    /// Talon SRX on the CAN bus.
    CanTalon,
    /// Talon on a PWM port.
    Talon,
    /// Talon SRX on a PWM port.
    TalonSrx,
    /// Victor on a PWM port.
    Victor,
    /// Victor SP on a PWM port.
    VictorSp,
}

impl MotorKind {
    /// Every kind that binds a driver, in legacy code order.
    pub const BOUND: [MotorKind; 7] = [
        MotorKind::CanJaguar,
        MotorKind::Jaguar,
        MotorKind::CanTalon,
        MotorKind::Talon,
        MotorKind::TalonSrx,
        MotorKind::Victor,
        MotorKind::VictorSp,
    ];

    /// Legacy integer code (`-1` for [`MotorKind::None`], `0..=6` otherwise).
    pub const fn code(self) -> i32 {
        match self {
            MotorKind::None => -1,
            MotorKind::CanJaguar => 0,
            MotorKind::Jaguar => 1,
            MotorKind::CanTalon => 2,
            MotorKind::Talon => 3,
            MotorKind::TalonSrx => 4,
            MotorKind::Victor => 5,
            MotorKind::VictorSp => 6,
        }
    }

    /// Decode a legacy integer code.
    ///
    /// Anything outside `0..=6` decodes to [`MotorKind::None`] instead of failing.
    pub const fn from_code(code: i32) -> Self {
        match code {
            0 => MotorKind::CanJaguar,
            1 => MotorKind::Jaguar,
            2 => MotorKind::CanTalon,
            3 => MotorKind::Talon,
            4 => MotorKind::TalonSrx,
            5 => MotorKind::Victor,
            6 => MotorKind::VictorSp,
            _ => MotorKind::None,
        }
    }

    /// Driver name as shown in descriptions.
    pub const fn name(self) -> &'static str {
        match self {
            MotorKind::None => "None",
            MotorKind::CanJaguar => "CANJaguar",
            MotorKind::Jaguar => "Jaguar",
            MotorKind::CanTalon => "CANTalon",
            MotorKind::Talon => "Talon",
            MotorKind::TalonSrx => "TalonSRX",
            MotorKind::Victor => "Victor",
            MotorKind::VictorSp => "VictorSP",
        }
    }

    /// Configuration key for this kind.
    pub const fn key(self) -> &'static str {
        match self {
            MotorKind::None => "none",
            MotorKind::CanJaguar => "can_jaguar",
            MotorKind::Jaguar => "jaguar",
            MotorKind::CanTalon => "can_talon",
            MotorKind::Talon => "talon",
            MotorKind::TalonSrx => "talon_srx",
            MotorKind::Victor => "victor",
            MotorKind::VictorSp => "victor_sp",
        }
    }

    /// Look up a kind by its configuration key.
    pub fn from_key(key: &str) -> Option<Self> {
        core::iter::once(MotorKind::None)
            .chain(Self::BOUND)
            .find(|kind| kind.key() == key)
    }

    /// Bus the controller is wired to, `None` for [`MotorKind::None`].
    pub const fn bus(self) -> Option<Bus> {
        match self {
            MotorKind::None => None,
            MotorKind::CanJaguar | MotorKind::CanTalon => Some(Bus::Can),
            MotorKind::Jaguar
            | MotorKind::Talon
            | MotorKind::TalonSrx
            | MotorKind::Victor
            | MotorKind::VictorSp => Some(Bus::Pwm),
        }
    }

    /// Whether this kind binds a driver.
    #[inline]
    pub const fn is_none(self) -> bool {
        matches!(self, MotorKind::None)
    }
}

impl fmt::Display for MotorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts either a legacy integer code or a configuration key.
impl<'de> Deserialize<'de> for MotorKind {
    fn deserialize<D>(deserializer: D) -> core::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KindVisitor;

        const KEYS: &[&str] = &[
            "none",
            "can_jaguar",
            "jaguar",
            "can_talon",
            "talon",
            "talon_srx",
            "victor",
            "victor_sp",
        ];

        impl<'de> Visitor<'de> for KindVisitor {
            type Value = MotorKind;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a motor kind name or legacy integer code")
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> core::result::Result<MotorKind, E> {
                Ok(i32::try_from(v).map_or(MotorKind::None, MotorKind::from_code))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> core::result::Result<MotorKind, E> {
                Ok(i32::try_from(v).map_or(MotorKind::None, MotorKind::from_code))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> core::result::Result<MotorKind, E> {
                MotorKind::from_key(v).ok_or_else(|| E::unknown_variant(v, KEYS))
            }
        }

        deserializer.deserialize_any(KindVisitor)
    }
}

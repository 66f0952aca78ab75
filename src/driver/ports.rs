//! Hardware port bookkeeping.
//!
//! A port is claimed by at most one driver at a time. Claims are RAII guards
//! that give the port back when dropped.

use alloc::rc::Rc;
use core::cell::Cell;
use core::fmt;

use crate::error::DriverError;

/// Number of PWM output channels.
pub const PWM_CHANNELS: u8 = 20;

/// Number of addressable CAN device ids (63 is broadcast).
pub const CAN_DEVICE_IDS: u8 = 63;

/// Bus a controller is wired to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Bus {
    /// Pulse-width output header.
    Pwm,
    /// CAN bus, addressed by device id.
    Can,
}

impl Bus {
    /// Number of channels on this bus.
    pub const fn channels(self) -> u8 {
        match self {
            Bus::Pwm => PWM_CHANNELS,
            Bus::Can => CAN_DEVICE_IDS,
        }
    }

    /// Human-readable bus name.
    pub const fn name(self) -> &'static str {
        match self {
            Bus::Pwm => "PWM",
            Bus::Can => "CAN",
        }
    }
}

/// A channel on a bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Port {
    /// Bus the channel lives on.
    pub bus: Bus,
    /// Channel number (PWM header index or CAN device id).
    pub channel: u8,
}

impl Port {
    /// Create a new port.
    #[inline]
    pub const fn new(bus: Bus, channel: u8) -> Self {
        Self { bus, channel }
    }

    /// Shorthand for a PWM port.
    #[inline]
    pub const fn pwm(channel: u8) -> Self {
        Self::new(Bus::Pwm, channel)
    }

    /// Shorthand for a CAN port.
    #[inline]
    pub const fn can(channel: u8) -> Self {
        Self::new(Bus::Can, channel)
    }

    /// Whether the channel exists on its bus.
    #[inline]
    pub const fn is_valid(self) -> bool {
        self.channel < self.bus.channels()
    }

    fn mask(self) -> u64 {
        1u64 << self.channel
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} channel {}", self.bus.name(), self.channel)
    }
}

#[derive(Debug, Default)]
struct Claimed {
    pwm: Cell<u64>,
    can: Cell<u64>,
}

impl Claimed {
    fn slot(&self, bus: Bus) -> &Cell<u64> {
        match bus {
            Bus::Pwm => &self.pwm,
            Bus::Can => &self.can,
        }
    }
}

/// Tracks which ports are bound to a driver.
///
/// Clones share the same claim table.
#[derive(Debug, Clone, Default)]
pub struct PortAllocator {
    claimed: Rc<Claimed>,
}

impl PortAllocator {
    /// Create an allocator with every port free.
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a port.
    ///
    /// # Errors
    ///
    /// - [`DriverError::ChannelOutOfRange`] if the channel does not exist
    /// - [`DriverError::ChannelInUse`] if another claim holds it
    pub fn claim(&self, port: Port) -> Result<PortClaim, DriverError> {
        if !port.is_valid() {
            return Err(DriverError::ChannelOutOfRange(port));
        }

        let slot = self.claimed.slot(port.bus);
        let bits = slot.get();
        if bits & port.mask() != 0 {
            return Err(DriverError::ChannelInUse(port));
        }
        slot.set(bits | port.mask());

        Ok(PortClaim {
            port,
            claimed: self.claimed.clone(),
        })
    }

    /// Whether a port is currently claimed.
    pub fn is_claimed(&self, port: Port) -> bool {
        port.is_valid() && self.claimed.slot(port.bus).get() & port.mask() != 0
    }

    /// Number of claimed ports on a bus.
    pub fn claimed_count(&self, bus: Bus) -> u32 {
        self.claimed.slot(bus).get().count_ones()
    }
}

/// Exclusive hold on a port, freed on drop.
#[derive(Debug)]
pub struct PortClaim {
    port: Port,
    claimed: Rc<Claimed>,
}

impl PortClaim {
    /// The held port.
    #[inline]
    pub fn port(&self) -> Port {
        self.port
    }
}

impl Drop for PortClaim {
    fn drop(&mut self) {
        let slot = self.claimed.slot(self.port.bus);
        slot.set(slot.get() & !self.port.mask());
    }
}

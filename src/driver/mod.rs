//! Driver library.
//!
//! Concrete speed controllers for PWM and CAN hardware, plus the port
//! bookkeeping that keeps each channel bound to a single driver.

mod can;
mod library;
mod ports;
mod pwm;

pub use can::{command_frame, id_base, CanSpeedController, CanTransmit, SharedCan};
pub use library::{DriverLibrary, LeasedOutput, NoCan, PwmOutputs};
pub use ports::{Bus, Port, PortAllocator, PortClaim, CAN_DEVICE_IDS, PWM_CHANNELS};
pub use pwm::{PulseBounds, PwmSpeedController};

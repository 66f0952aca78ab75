//! Logging macros.
//!
//! Routed to `defmt` when the `defmt` feature is enabled, to `tracing` otherwise.
//! Arguments must be `defmt::Format` as well as `Display`, so stick to primitives and `&str`.

#![allow(unused_macros)]

macro_rules! trace {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::trace!($($arg)*);
        #[cfg(not(feature = "defmt"))]
        ::tracing::trace!($($arg)*);
    }};
}

macro_rules! debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);
        #[cfg(not(feature = "defmt"))]
        ::tracing::debug!($($arg)*);
    }};
}

macro_rules! warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);
        #[cfg(not(feature = "defmt"))]
        ::tracing::warn!($($arg)*);
    }};
}

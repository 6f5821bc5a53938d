//! Internal logging macros.
//!
//! These forward to [`tracing`] when the `tracing` feature is enabled, and expand to nothing
//! otherwise.

#![allow(unused_macros)]

macro_rules! warn {
    ($($tt:tt)*) => {
        {
            #[cfg(feature = "tracing")]
            {
                ::tracing::warn!($($tt)*)
            }
        }
    };
}

macro_rules! debug {
    ($($tt:tt)*) => {
        {
            #[cfg(feature = "tracing")]
            {
                ::tracing::debug!($($tt)*)
            }
        }
    };
}

macro_rules! trace {
    ($($tt:tt)*) => {
        {
            #[cfg(feature = "tracing")]
            {
                ::tracing::trace!($($tt)*)
            }
        }
    };
}

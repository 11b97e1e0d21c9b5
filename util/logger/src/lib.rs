//! Ferro logging facade.
//!
//! This crate is a thin wrapper of the crate [`log`]. Crates in this
//! workspace log through these macros rather than depending on `log`
//! directly, so the backend can be swapped in one place.
//!
//! [`log`]: https://docs.rs/log/*/log/index.html

pub use log::{self as internal, Level, SetLoggerError};

/// Logs a message at the trace level.
#[macro_export]
macro_rules! trace {
    ($( $args:tt )*) => {
        $crate::internal::trace!($( $args )*);
    }
}

/// Logs a message at the debug level.
#[macro_export]
macro_rules! debug {
    ($( $args:tt )*) => {
        $crate::internal::debug!($( $args )*);
    }
}

/// Logs a message at the info level.
#[macro_export]
macro_rules! info {
    ($( $args:tt )*) => {
        $crate::internal::info!($( $args )*);
    }
}

/// Logs a message at the warn level.
#[macro_export]
macro_rules! warn {
    ($( $args:tt )*) => {
        $crate::internal::warn!($( $args )*);
    }
}

/// Logs a message at the error level.
#[macro_export]
macro_rules! error {
    ($( $args:tt )*) => {
        $crate::internal::error!($( $args )*);
    }
}

/// Determines if a message logged at the specified level will be logged.
#[macro_export]
macro_rules! log_enabled {
    ($level:expr) => {
        $crate::internal::log_enabled!($level)
    };
}

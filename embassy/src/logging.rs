//! Logging macros that forward to `defmt` on the board and vanish on the host.
//!
//! Arguments are still type checked through [core::format_args] when `defmt` is
//! off, so only format strings understood by both `defmt` and `core::fmt` may be
//! used (`{}` and `{:?}`).

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::info!($($arg)*);

        #[cfg(not(feature = "defmt"))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::warn!($($arg)*);

        #[cfg(not(feature = "defmt"))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::debug!($($arg)*);

        #[cfg(not(feature = "defmt"))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

//! Level-tagged logging macros
//!
//! With the `defmt` feature every macro forwards to the matching defmt macro.
//! Host test builds print `[LEVEL] message` to stdout. Any other build only
//! type-checks the arguments.
//!
//! Format strings must stick to plain `{}` placeholders so one call site is
//! valid for both defmt and `core::fmt`. Enums go through their `as_str()`.

#[doc(hidden)]
#[macro_export]
macro_rules! __log_at {
    ($level:ident, $tag:literal, $($arg:tt)*) => {{
        #[cfg(feature = "defmt")]
        ::defmt::$level!($($arg)*);

        #[cfg(all(not(feature = "defmt"), test))]
        ::std::println!(concat!("[", $tag, "] {}"), ::core::format_args!($($arg)*));

        #[cfg(all(not(feature = "defmt"), not(test)))]
        let _ = ::core::format_args!($($arg)*);
    }};
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => { $crate::__log_at!(error, "ERROR", $($arg)*) };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => { $crate::__log_at!(warn, "WARN", $($arg)*) };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => { $crate::__log_at!(info, "INFO", $($arg)*) };
}

/// Per-frame detail such as rejected distances
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => { $crate::__log_at!(debug, "DEBUG", $($arg)*) };
}

#[macro_export]
macro_rules! log_trace {
    ($($arg:tt)*) => { $crate::__log_at!(trace, "TRACE", $($arg)*) };
}

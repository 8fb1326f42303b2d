//! Domain-aware logging macros.
//!
//! Each macro injects a `domain` field so that log filtering can separate
//! model loading (`load`), checker progress (`check`) and dependency
//! ordering (`order`).
//!
//! ```ignore
//! fr_debug!(check, checker = "structure", found = 3, "checker finished");
//! ```

#[doc(hidden)]
macro_rules! fr_log {
    ($level:ident, $domain:ident, $($field:tt)*) => {
        tracing::$level!(domain = stringify!($domain), $($field)*)
    };
}

/// Log at WARN level with an automatic `domain` field.
macro_rules! fr_warn {
    ($domain:ident, $($rest:tt)*) => {
        fr_log!(warn, $domain, $($rest)*)
    };
}

/// Log at INFO level with an automatic `domain` field.
macro_rules! fr_info {
    ($domain:ident, $($rest:tt)*) => {
        fr_log!(info, $domain, $($rest)*)
    };
}

/// Log at DEBUG level with an automatic `domain` field.
macro_rules! fr_debug {
    ($domain:ident, $($rest:tt)*) => {
        fr_log!(debug, $domain, $($rest)*)
    };
}

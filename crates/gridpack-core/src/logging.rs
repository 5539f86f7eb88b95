#![forbid(unsafe_code)]

//! Logging facade for layout passes.
//!
//! Layout code logs through four macros: `debug!`, `trace!`, `warn!` and
//! `debug_span!`, plus [`layout_span!`](crate::layout_span) which opens the
//! span wrapping one sizing+placement pass. With the `tracing` feature they
//! forward to `tracing`; without it they expand to nothing (spans become
//! `NoopSpan`), so the engine carries no logging cost.
//!
//! With `tracing-json`, `init_json_subscriber` installs a JSON formatter for
//! hosts that do not bring their own subscriber.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, trace, warn};

/// Span wrapping one layout pass, tagged with item count and available width.
///
/// Named `grid_layout` at DEBUG level.
#[macro_export]
macro_rules! layout_span {
    ($items:expr, $width:expr) => {
        $crate::debug_span!("grid_layout", items = $items, width = $width)
    };
}

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// No-op `debug!` when tracing is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// No-op `trace!` when tracing is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// No-op `warn!` when tracing is disabled.
    #[macro_export]
    macro_rules! warn {
        ($($arg:tt)*) => {};
    }

    /// `debug_span!` stand-in returning a [`NoopSpan`](crate::logging::NoopSpan).
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
}

/// Span placeholder when tracing is disabled.
#[cfg(not(feature = "tracing"))]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Enter the span; the guard does nothing.
    pub fn enter(&self) -> NoopGuard {
        NoopGuard
    }
}

/// Guard returned by [`NoopSpan::enter`].
#[cfg(not(feature = "tracing"))]
pub struct NoopGuard;

/// Failure to install the JSON subscriber.
#[cfg(feature = "tracing-json")]
#[derive(Debug)]
pub enum LoggingInitError {
    /// A global default subscriber was already set.
    SubscriberAlreadySet,
}

#[cfg(feature = "tracing-json")]
impl std::fmt::Display for LoggingInitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SubscriberAlreadySet => f.write_str("tracing subscriber already initialized"),
        }
    }
}

#[cfg(feature = "tracing-json")]
impl std::error::Error for LoggingInitError {}

/// Install a global JSON subscriber filtered by `RUST_LOG` (default `info`).
#[cfg(feature = "tracing-json")]
pub fn init_json_subscriber() -> Result<(), LoggingInitError> {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .try_init()
        .map_err(|_| LoggingInitError::SubscriberAlreadySet)
}

#[cfg(all(test, not(feature = "tracing")))]
mod tests {
    #[test]
    fn noop_macros_accept_fields() {
        crate::debug!(previous = 0, columns = 3, "column count changed");
        crate::trace!(height = 35.0, "pass complete");
        crate::warn!(field = "desired_column_width", "rejected");
        let span = crate::layout_span!(7usize, 690.0);
        let _guard = span.enter();
    }
}

//! Logging setup
//!
//! Structured logging via `tracing`. Output is text or JSON, selected at
//! runtime from the CLI flag or environment. All logging goes to stderr so
//! stdout stays reserved for command output and diagnostics.

use anyhow::Result;
use std::{io, sync::Once};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable selecting the log format (`json` or `text`)
pub const LOG_FORMAT_ENV: &str = "VTEST_LOG_FORMAT";

/// Environment variable holding the log filter directive
pub const LOG_FILTER_ENV: &str = "VTEST_LOG";

/// Initialize the logging system
///
/// Safe to call more than once; only the first call installs a subscriber.
///
/// ## Arguments
///
/// * `format` - `Some("json")` for JSON lines, anything else for text. When
///   `None`, `VTEST_LOG_FORMAT` is consulted.
/// * `default_directive` - filter used when neither `VTEST_LOG` nor `RUST_LOG`
///   is set, e.g. `"vtest=warn,vtest_core=warn"`.
///
/// ## Example
///
/// ```rust
/// use vtest_core::logging;
///
/// logging::init(None, "warn").expect("Failed to initialize logging");
/// assert!(logging::is_initialized());
/// ```
pub fn init(format: Option<&str>, default_directive: &str) -> Result<()> {
    INIT.call_once(|| {
        let filter = create_env_filter(default_directive);

        let env_format = std::env::var(LOG_FORMAT_ENV).ok();
        let effective_format = format.or(env_format.as_deref()).unwrap_or("text");

        match effective_format {
            "json" => {
                tracing_subscriber::registry()
                    .with(fmt::layer().json().with_target(true).with_writer(io::stderr))
                    .with(filter)
                    .init();
            }
            _ => {
                tracing_subscriber::registry()
                    .with(fmt::layer().with_target(true).with_writer(io::stderr))
                    .with(filter)
                    .init();
            }
        }

        tracing::debug!("Logging initialized with format: {}", effective_format);
    });

    Ok(())
}

/// Build the filter: `VTEST_LOG`, then `RUST_LOG`, then the supplied default
fn create_env_filter(default_directive: &str) -> EnvFilter {
    let fallback =
        || EnvFilter::try_new(default_directive).unwrap_or_else(|_| EnvFilter::new("warn"));

    if let Ok(spec) = std::env::var(LOG_FILTER_ENV) {
        EnvFilter::try_new(&spec).unwrap_or_else(|_| {
            eprintln!(
                "Invalid {} specification '{}', using default '{}'",
                LOG_FILTER_ENV, spec, default_directive
            );
            fallback()
        })
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback())
    }
}

/// Check if logging has been initialized
pub fn is_initialized() -> bool {
    INIT.is_completed()
}

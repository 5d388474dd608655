//! Logging setup for programs built on this crate.
//!
//! The crate reports rejected inputs at `debug` level and hook installation at
//! `info`/`warn` through [`tracing`]. [`init_logging`] installs a stderr
//! subscriber and bridges `log` records into it.
//!
//! # Example
//!
//! ```ignore
//! use rawslice_core::logger::init_logging;
//! use rawslice_core::Slice;
//!
//! init_logging("slice_demo");
//!
//! // Logs "rejected sub-range" when RUST_LOG=debug
//! let mut data = [1u8, 2, 3];
//! let _ = Slice::from_array(&mut data).sub(2, 1);
//! ```

use std::sync::OnceLock;

use tracing::Subscriber;
use tracing_subscriber::{
    EnvFilter,
    fmt::{self, MakeWriter, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Installs a `tracing` subscriber writing to stderr.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. `log` crate records
/// are forwarded to the subscriber. `name` is recorded in the first event
/// once the subscriber is in place.
///
/// Only the first call has any effect. A subscriber installed by someone else
/// beforehand is left in place.
pub fn init_logging(name: &str) {
    LOGGER_INITIALIZED.get_or_init(|| {
        tracing_log::LogTracer::init().ok();

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        if subscriber(filter, std::io::stderr).try_init().is_ok() {
            announce(name);
        }
    });
}

// Registry with `filter` and a fmt layer writing through `writer`.
fn subscriber<W>(filter: EnvFilter, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(FmtSpan::NONE)
        .with_writer(writer);

    tracing_subscriber::registry().with(filter).with(fmt_layer)
}

fn announce(name: &str) {
    tracing::debug!(program = name, "logging initialized");
}

/// Re-export tracing macros for convenience.
pub use tracing::{debug, error, info, trace, warn};

//! Tracing subscriber setup
//!
//! This module provides shared tracing configuration used by both
//! the command line tool and tests.

use std::fs::File;
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Logs go to `log_file` when given, otherwise to stderr. `RUST_LOG` overrides
/// `default_level`.
pub fn init_global(log_file: Option<&Path>, default_level: Level) -> io::Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            build_subscriber(Arc::new(file), env_filter(default_level), false).init();
        }
        None => build_subscriber(io::stderr, env_filter(default_level), true).init(),
    }
    Ok(())
}

/// Filter from `RUST_LOG`, falling back to `default_level`
pub fn env_filter(default_level: Level) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy()
}

/// Build a subscriber writing formatted events to `writer`.
///
/// This is the core subscriber configuration shared between the binary and tests.
pub fn build_subscriber<W>(
    writer: W,
    env_filter: EnvFilter,
    ansi: bool,
) -> impl tracing::Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let fmt_layer = fmt::layer().with_writer(writer).with_ansi(ansi);

    tracing_subscriber::registry().with(fmt_layer).with(env_filter)
}

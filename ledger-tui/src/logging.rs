use anyhow::Result;
use chrono::Local;
use std::path::PathBuf;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    fmt, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt, EnvFilter, Layer,
};

use crate::log_buffer::{LogBuffer, LogEntry};

/// Initialize tracing with a log file and an in-memory buffer for the Logs screen.
///
/// Logs are written to `<config_dir>/ledger/logs/ledger-YYYY-MM-DD-HH-MM-SS.log`.
/// The returned guard must be held until shutdown so buffered lines are flushed.
pub fn init_logging(buffer: LogBuffer) -> Result<(PathBuf, WorkerGuard)> {
    // One directory per user, next to other ledger state
    let logs_dir = dirs::config_dir()
        .ok_or(anyhow::anyhow!("Could not find config directory"))?
        .join("ledger")
        .join("logs");
    std::fs::create_dir_all(&logs_dir)?;

    // A new file per session, named after its start time
    let timestamp = Local::now().format("%Y-%m-%d-%H-%M-%S");
    let log_filename = format!("ledger-{}.log", timestamp);
    let log_path = logs_dir.join(&log_filename);

    // Writes happen on a worker thread; the guard drains it on drop
    let file_appender = tracing_appender::rolling::never(&logs_dir, &log_filename);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false) // plain text in the file
        .with_target(true)
        .with_line_number(true);

    // Default to INFO, overridable with RUST_LOG
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // The filter applies to both layers, so the Logs screen shows what the file gets
    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer)
        .with(LogBufferLayer::new(buffer))
        .try_init()?;

    Ok((log_path, guard))
}

/// A tracing layer that captures log entries to an in-memory buffer
pub struct LogBufferLayer {
    buffer: LogBuffer,
}

impl LogBufferLayer {
    pub fn new(buffer: LogBuffer) -> Self {
        Self { buffer }
    }
}

impl<S> Layer<S> for LogBufferLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        // Only the formatted message is kept; structured fields are dropped
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        self.buffer.push(LogEntry {
            timestamp: Local::now(),
            level: *event.metadata().level(),
            target: event.metadata().target().to_string(),
            message: visitor.message,
        });
    }
}

/// Pulls the `message` field out of an event
#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }

    // `tracing::info!("...", args)` records the message as fmt::Arguments,
    // which arrives through the Debug path
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        }
    }
}

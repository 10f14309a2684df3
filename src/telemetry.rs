//! Rating telemetry events and sinks.
//!
//! The screen controller recovers from service failures locally, which makes
//! those failures easy to miss. Lightweight telemetry captures how often
//! optimistic ratings are confirmed versus rolled back, and why rollbacks
//! happened, so the behaviour stays observable in the field.

use std::io;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::reviews::error::RatingError;
use crate::reviews::models::Reaction;

/// A structured telemetry event emitted by the rating screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// Records a rating confirmed by the remote service.
    RatingConfirmed {
        /// Identifier of the rated review or comment.
        entity_id: String,
        /// The reaction that was persisted.
        reaction: Reaction,
    },
    /// Records an optimistic rating rolled back after a service failure.
    RatingRolledBack {
        /// Identifier of the review or comment that was reverted.
        entity_id: String,
        /// User-displayable description of the failure.
        cause: String,
    },
}

impl TelemetryEvent {
    /// Creates a rollback event from the failure that triggered it.
    #[must_use]
    pub fn rolled_back(entity_id: &str, error: &RatingError) -> Self {
        Self::RatingRolledBack {
            entity_id: entity_id.to_owned(),
            cause: error.to_string(),
        }
    }
}

/// A sink that can record telemetry events.
pub trait TelemetrySink: Send + Sync {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to a writer as JSON lines (JSONL).
///
/// [`JsonlTelemetrySink::stderr`] is the usual configuration for local
/// debugging; nothing is transmitted anywhere unless the writer does so
/// itself. Events that fail to serialise or write are dropped rather than
/// interrupting the screen.
#[derive(Debug)]
pub struct JsonlTelemetrySink<W> {
    writer: Mutex<W>,
}

impl<W: io::Write + Send> JsonlTelemetrySink<W> {
    /// Creates a sink appending one JSON line per event to `writer`.
    pub const fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }
}

impl JsonlTelemetrySink<io::Stderr> {
    /// Creates a sink that records events to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: io::Write + Send> TelemetrySink for JsonlTelemetrySink<W> {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        let _ignored = writeln!(writer, "{serialised}");
    }
}

//! Analytics port.
//!
//! `track` never fails from the caller's point of view; a tracker that
//! cannot deliver an event drops it.

use crate::{config::AnalyticsConfig, log};
use serde_json::Value;

pub trait Tracker: Send + Sync {
    fn track(&self, event: &str, properties: &Value);
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopTracker;

impl Tracker for NoopTracker {
    fn track(&self, _event: &str, _properties: &Value) {}
}

/// Writes events to the terminal log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogTracker;

impl Tracker for LogTracker {
    fn track(&self, event: &str, properties: &Value) {
        match properties {
            Value::Null => log!("analytics"; "{event}"),
            Value::Object(map) if map.is_empty() => log!("analytics"; "{event}"),
            properties => log!("analytics"; "{event} {properties}"),
        }
    }
}

/// Tracker selected by `[analytics] enable`.
pub fn tracker(config: &AnalyticsConfig) -> Box<dyn Tracker> {
    if config.enable {
        Box::new(LogTracker)
    } else {
        Box::new(NoopTracker)
    }
}

//! The UI element a controller is bound to
//!
//! The host environment owns the element. The controller only reads its
//! attributes and pushes outbound events through it.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::Result;

/// Host-side view of the bound element
pub trait Binding {
    /// Current value of an element attribute, `None` when absent
    fn attribute(&self, name: &str) -> Option<String>;

    /// Push an event to the element's host (the server-side owner of the element)
    fn push_event(&self, event: &OutboundEvent) -> Result<()>;
}

/// Event pushed from the controller to the element's host
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OutboundEvent {
    /// Event name, e.g. `audio-ended`
    pub name: String,

    /// JSON payload
    pub payload: Value,
}

impl OutboundEvent {
    /// Completion notification: configured name, empty object payload
    pub fn audio_ended(name: &str) -> Self {
        Self {
            name: name.to_string(),
            payload: Value::Object(Map::new()),
        }
    }
}

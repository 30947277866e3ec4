//! Error types for the playback hook

use thiserror::Error;

use crate::types::TriggerKind;

/// Playback hook errors
#[derive(Debug, Error)]
pub enum HookError {
    /// The engine could not create a handle for the reference
    #[error("Cannot load '{media}': {reason}")]
    EngineCreate { media: String, reason: String },

    /// The handle was created but refused to start
    #[error("Cannot start '{media}': {reason}")]
    PlaybackStart { media: String, reason: String },

    /// The engine rejected the completion listener
    #[error("Listener registration failed: {0}")]
    Listener(String),

    /// Inbound payload could not be decoded
    #[error("Invalid payload for '{event}': {reason}")]
    InvalidPayload { event: String, reason: String },

    /// Inbound event name is not one the trigger listens for
    #[error("Unknown event: {0}")]
    UnknownEvent(String),

    /// The configured trigger does not accept this kind of input
    #[error("Trigger {kind:?} does not accept pushed events")]
    UnsupportedTrigger { kind: TriggerKind },

    /// Lifecycle call before `mount`
    #[error("Controller is not mounted")]
    NotMounted,

    /// The binding could not deliver an outbound event
    #[error("Host push failed: {0}")]
    HostPush(String),

    /// Configuration could not be parsed
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<serde_json::Error> for HookError {
    fn from(err: serde_json::Error) -> Self {
        HookError::Config(err.to_string())
    }
}

/// Result type for hook operations
pub type Result<T> = std::result::Result<T, HookError>;

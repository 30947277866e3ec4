//! Core types for the playback hook

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::Result;

/// Reference to a playable media resource (URI or path)
///
/// Always non-blank. Blank input never becomes a `MediaRef`; it means "stop".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MediaRef(String);

impl MediaRef {
    /// Build a reference, returning `None` for empty or whitespace-only input
    pub fn parse(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MediaRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for MediaRef {
    type Error = &'static str;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        MediaRef::parse(value).ok_or("media reference must not be blank")
    }
}

impl From<MediaRef> for String {
    fn from(media: MediaRef) -> Self {
        media.0
    }
}

/// What the host wants the controller to be doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackIntent {
    /// Play this reference, replacing anything already playing
    Play(MediaRef),

    /// Stop any current playback
    Stop,
}

impl PlaybackIntent {
    /// Map an optional raw reference to an intent
    ///
    /// Absent, empty and blank references all mean `Stop`.
    pub fn from_reference(raw: Option<&str>) -> Self {
        raw.and_then(MediaRef::parse)
            .map_or(PlaybackIntent::Stop, PlaybackIntent::Play)
    }

    pub fn media(&self) -> Option<&MediaRef> {
        match self {
            PlaybackIntent::Play(media) => Some(media),
            PlaybackIntent::Stop => None,
        }
    }
}

/// Controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControllerState {
    /// No handle
    Idle,

    /// A handle exists for the latest accepted media intent
    ///
    /// Stays `Playing` after natural completion; only a new intent leaves it.
    Playing,
}

/// Controller-local identifier of an audio handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HandleId(pub u64);

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where playback intents come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    /// Named events pushed by the host (`play` / `pause`)
    Events,

    /// A string attribute on the bound element, re-read on every update
    Attribute,
}

/// What an attribute update does when it carries the reference already playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameReferencePolicy {
    /// Retire the handle and start the same track again
    Restart,

    /// Keep the current handle, unless it already finished
    Ignore,
}

/// Configuration for a playback controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    /// Trigger source (default: Events)
    pub trigger: TriggerKind,

    /// Inbound event that carries `{ music }` (default: "play")
    pub play_event: String,

    /// Inbound event that stops playback (default: "pause")
    pub pause_event: String,

    /// Outbound completion event (default: "audio-ended")
    pub ended_event: String,

    /// Element attribute holding the media reference (default: "data-music")
    pub attribute: String,

    /// Attribute update with an unchanged reference (default: Restart)
    pub same_reference: SameReferencePolicy,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            trigger: TriggerKind::Events,
            play_event: "play".to_string(),
            pause_event: "pause".to_string(),
            ended_event: "audio-ended".to_string(),
            attribute: "data-music".to_string(),
            same_reference: SameReferencePolicy::Restart,
        }
    }
}

impl ControllerConfig {
    /// Parse a JSON document; missing fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Default configuration for the attribute-driven variant
    pub fn attribute_driven() -> Self {
        Self {
            trigger: TriggerKind::Attribute,
            ..Self::default()
        }
    }
}

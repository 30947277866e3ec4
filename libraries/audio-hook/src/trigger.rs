//! Trigger sources
//!
//! A trigger source turns host inputs (lifecycle ticks, pushed events) into
//! playback intents. Both variants feed the same controller transition, so the
//! state machine exists once.

use serde::Deserialize;
use serde_json::Value;

use crate::binding::Binding;
use crate::error::{HookError, Result};
use crate::types::{ControllerConfig, PlaybackIntent, TriggerKind};

/// Source of playback intents for a controller
pub trait TriggerSource {
    fn kind(&self) -> TriggerKind;

    /// Intent to apply right after mount, if any
    fn on_mount(&self, binding: &dyn Binding) -> Option<PlaybackIntent>;

    /// Intent to apply on a host update tick, if any
    fn on_update(&self, binding: &dyn Binding) -> Option<PlaybackIntent>;

    /// Decode a pushed event into an intent
    fn on_event(&self, event: &str, payload: &Value) -> Result<PlaybackIntent>;
}

/// Build the trigger source selected by the configuration
pub fn from_config(config: &ControllerConfig) -> Box<dyn TriggerSource> {
    match config.trigger {
        TriggerKind::Events => Box::new(EventTrigger::new(&config.play_event, &config.pause_event)),
        TriggerKind::Attribute => Box::new(AttributeTrigger::new(&config.attribute)),
    }
}

#[derive(Debug, Deserialize)]
struct PlayPayload {
    music: String,
}

/// Event-driven trigger: `play { music }` and `pause {}`
#[derive(Debug, Clone)]
pub struct EventTrigger {
    play_event: String,
    pause_event: String,
}

impl EventTrigger {
    pub fn new(play_event: &str, pause_event: &str) -> Self {
        Self {
            play_event: play_event.to_string(),
            pause_event: pause_event.to_string(),
        }
    }
}

impl TriggerSource for EventTrigger {
    fn kind(&self) -> TriggerKind {
        TriggerKind::Events
    }

    fn on_mount(&self, _binding: &dyn Binding) -> Option<PlaybackIntent> {
        None
    }

    fn on_update(&self, _binding: &dyn Binding) -> Option<PlaybackIntent> {
        None
    }

    fn on_event(&self, event: &str, payload: &Value) -> Result<PlaybackIntent> {
        if event == self.play_event {
            let PlayPayload { music } = PlayPayload::deserialize(payload).map_err(|e| {
                HookError::InvalidPayload {
                    event: event.to_string(),
                    reason: e.to_string(),
                }
            })?;
            Ok(PlaybackIntent::from_reference(Some(&music)))
        } else if event == self.pause_event {
            // Payload is ignored
            Ok(PlaybackIntent::Stop)
        } else {
            Err(HookError::UnknownEvent(event.to_string()))
        }
    }
}

/// Attribute-driven trigger: the element attribute is the intent
#[derive(Debug, Clone)]
pub struct AttributeTrigger {
    attribute: String,
}

impl AttributeTrigger {
    pub fn new(attribute: &str) -> Self {
        Self {
            attribute: attribute.to_string(),
        }
    }

    fn read(&self, binding: &dyn Binding) -> PlaybackIntent {
        PlaybackIntent::from_reference(binding.attribute(&self.attribute).as_deref())
    }
}

impl TriggerSource for AttributeTrigger {
    fn kind(&self) -> TriggerKind {
        TriggerKind::Attribute
    }

    fn on_mount(&self, binding: &dyn Binding) -> Option<PlaybackIntent> {
        // Nothing is playing yet, so an empty attribute has nothing to stop
        match self.read(binding) {
            PlaybackIntent::Stop => None,
            intent => Some(intent),
        }
    }

    fn on_update(&self, binding: &dyn Binding) -> Option<PlaybackIntent> {
        Some(self.read(binding))
    }

    fn on_event(&self, _event: &str, _payload: &Value) -> Result<PlaybackIntent> {
        Err(HookError::UnsupportedTrigger {
            kind: TriggerKind::Attribute,
        })
    }
}

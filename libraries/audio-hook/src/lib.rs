//! audio-hook - element-bound audio playback
//!
//! Keeps one audio stream per bound UI element in line with the playback
//! intent its host expresses, either through pushed events or through an
//! attribute on the element.
//!
//! This crate provides:
//! - One controller with a pluggable trigger source (event-driven or attribute-driven)
//! - At most one live audio handle per controller, retired before any new one starts
//! - One-shot completion listeners scoped to a single handle
//! - `audio-ended` pushed to the host exactly once per naturally finished handle
//! - Mount/update/destroy lifecycle entry points for the host environment
//!
//! # Architecture
//!
//! `audio-hook` does not make sound itself. The audio backend is provided
//! through [`AudioEngine`] / [`AudioHandle`], and the bound element through
//! [`Binding`]. The `wasm` feature ships the browser implementations
//! (`HTMLAudioElement` + DOM element) and a `#[wasm_bindgen]` wrapper.
//!
//! # Example: Event-Driven Playback
//!
//! ```rust
//! use audio_hook::{
//!     AudioEngine, AudioHandle, Binding, ControllerConfig, ControllerState, EndedListener,
//!     MediaRef, OutboundEvent, PlaybackController, Result,
//! };
//! use serde_json::json;
//! use std::rc::Rc;
//!
//! struct SilentEngine;
//! struct SilentHandle;
//!
//! impl AudioEngine for SilentEngine {
//!     type Handle = SilentHandle;
//!     fn create(&mut self, _media: &MediaRef) -> Result<SilentHandle> {
//!         Ok(SilentHandle)
//!     }
//! }
//!
//! impl AudioHandle for SilentHandle {
//!     fn play(&mut self) -> Result<()> { Ok(()) }
//!     fn stop(&mut self) {}
//!     fn attach_ended(&mut self, _listener: EndedListener) -> Result<()> { Ok(()) }
//!     fn detach_ended(&mut self) {}
//! }
//!
//! struct Element;
//!
//! impl Binding for Element {
//!     fn attribute(&self, _name: &str) -> Option<String> { None }
//!     fn push_event(&self, _event: &OutboundEvent) -> Result<()> { Ok(()) }
//! }
//!
//! let mut controller =
//!     PlaybackController::new(ControllerConfig::default(), SilentEngine, Rc::new(Element));
//! controller.mount()?;
//!
//! controller.handle_event("play", &json!({ "music": "/audio/track1.mp3" }))?;
//! assert_eq!(controller.state(), ControllerState::Playing);
//!
//! controller.handle_event("pause", &json!({}))?;
//! assert_eq!(controller.state(), ControllerState::Idle);
//!
//! controller.destroy();
//! # Ok::<(), audio_hook::HookError>(())
//! ```

mod binding;
mod controller;
mod engine;
mod error;
mod events;
pub mod trigger;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;

// Public exports
pub use binding::{Binding, OutboundEvent};
pub use controller::PlaybackController;
pub use engine::{AudioEngine, AudioHandle, EndedListener};
pub use error::{HookError, Result};
pub use events::{ControllerEvent, MAX_PENDING_EVENTS};
pub use trigger::{AttributeTrigger, EventTrigger, TriggerSource};
pub use types::{
    ControllerConfig, ControllerState, HandleId, MediaRef, PlaybackIntent, SameReferencePolicy,
    TriggerKind,
};

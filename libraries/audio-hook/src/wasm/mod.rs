//! WASM bindings for audio-hook
//!
//! Browser backend for the controller: an `HTMLAudioElement` engine, a DOM
//! element binding, and a `#[wasm_bindgen]` wrapper that a client-side hook
//! object forwards its lifecycle callbacks to.

pub mod binding;
pub mod engine;
pub mod hook;

pub use binding::ElementBinding;
pub use engine::{WebAudioEngine, WebAudioHandle};
pub use hook::AudioHook;

use wasm_bindgen::JsValue;

/// Best-effort text for a thrown JS value
pub(crate) fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

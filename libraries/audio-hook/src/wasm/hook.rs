//! WASM-compatible playback controller wrapper

use std::rc::Rc;

use js_sys::Function;
use serde_json::Value;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use super::{ElementBinding, WebAudioEngine};
use crate::{ControllerConfig, ControllerState, HookError, PlaybackController, PlaybackIntent};

/// WASM-compatible playback hook
///
/// Wraps [`PlaybackController`] with a JavaScript-friendly API. A client-side
/// hook object creates one in its mount callback and forwards every
/// lifecycle callback and pushed event to it:
///
/// ```js
/// mounted() {
///   this.hook = new AudioHook(this.el, (e, p) => this.pushEventTo(this.el, e, p), {})
///   this.hook.mounted()
///   this.handleEvent("play", p => this.hook.handleEvent("play", p))
///   this.handleEvent("pause", p => this.hook.handleEvent("pause", p))
/// },
/// updated() { this.hook.updated() },
/// destroyed() { this.hook.destroyed(); this.hook.free() },
/// ```
#[wasm_bindgen]
pub struct AudioHook {
    inner: PlaybackController<WebAudioEngine>,
}

#[wasm_bindgen]
impl AudioHook {
    /// Create a hook for `element`; `config` may be `undefined` or a partial object
    #[wasm_bindgen(constructor)]
    pub fn new(element: Element, push: Function, config: JsValue) -> Result<AudioHook, JsValue> {
        // Enable panic hooks for better error messages in console
        console_error_panic_hook::set_once();

        let config: ControllerConfig = if config.is_undefined() || config.is_null() {
            ControllerConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse config: {}", e)))?
        };

        let binding = Rc::new(ElementBinding::new(element, push));
        Ok(Self {
            inner: PlaybackController::new(config, WebAudioEngine, binding),
        })
    }

    // ===== Lifecycle =====

    pub fn mounted(&mut self) -> Result<(), JsValue> {
        self.inner.mount().map_err(to_js)
    }

    pub fn updated(&mut self) -> Result<(), JsValue> {
        self.inner.update().map_err(to_js)
    }

    pub fn destroyed(&mut self) {
        self.inner.destroy();
    }

    // ===== Intake =====

    /// Forward a pushed event (`play` / `pause`)
    #[wasm_bindgen(js_name = handleEvent)]
    pub fn handle_event(&mut self, event: &str, payload: JsValue) -> Result<(), JsValue> {
        let payload: Value = if payload.is_undefined() || payload.is_null() {
            Value::Null
        } else {
            serde_wasm_bindgen::from_value(payload)
                .map_err(|e| JsValue::from_str(&format!("Failed to parse payload: {}", e)))?
        };

        self.inner.handle_event(event, &payload).map_err(to_js)
    }

    /// Play `music`, or stop when it is empty
    pub fn play(&mut self, music: &str) -> Result<(), JsValue> {
        self.inner
            .accept_intent(PlaybackIntent::from_reference(Some(music)))
            .map_err(to_js)
    }

    pub fn stop(&mut self) -> Result<(), JsValue> {
        self.inner.accept_intent(PlaybackIntent::Stop).map_err(to_js)
    }

    // ===== State Queries =====

    /// Current state ("idle" | "playing")
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&self) -> String {
        match self.inner.state() {
            ControllerState::Idle => "idle".to_string(),
            ControllerState::Playing => "playing".to_string(),
        }
    }

    #[wasm_bindgen(js_name = currentMedia)]
    pub fn current_media(&self) -> Option<String> {
        self.inner.current_media().map(|media| media.to_string())
    }

    #[wasm_bindgen(js_name = hasFinished)]
    pub fn has_finished(&self) -> bool {
        self.inner.has_finished()
    }

    /// Queued controller events as a JS array
    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&mut self) -> JsValue {
        serde_wasm_bindgen::to_value(&self.inner.drain_events()).unwrap_or(JsValue::NULL)
    }
}

fn to_js(error: HookError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

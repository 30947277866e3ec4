//! `HTMLAudioElement`-backed engine

use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{AddEventListenerOptions, HtmlAudioElement};

use super::describe;
use crate::engine::{AudioEngine, AudioHandle, EndedListener};
use crate::error::{HookError, Result};
use crate::types::MediaRef;

const ENDED: &str = "ended";

/// Creates one detached `Audio` object per handle
#[derive(Debug, Default)]
pub struct WebAudioEngine;

impl AudioEngine for WebAudioEngine {
    type Handle = WebAudioHandle;

    fn create(&mut self, media: &MediaRef) -> Result<WebAudioHandle> {
        let audio = HtmlAudioElement::new_with_src(media.as_str()).map_err(|e| {
            HookError::EngineCreate {
                media: media.to_string(),
                reason: describe(&e),
            }
        })?;

        Ok(WebAudioHandle {
            media: media.clone(),
            audio,
            ended: None,
        })
    }
}

/// One `Audio` object plus the exact `ended` callback registered on it
pub struct WebAudioHandle {
    media: MediaRef,
    audio: HtmlAudioElement,
    ended: Option<Closure<dyn FnMut()>>,
}

impl AudioHandle for WebAudioHandle {
    fn play(&mut self) -> Result<()> {
        let promise = self.audio.play().map_err(|e| HookError::PlaybackStart {
            media: self.media.to_string(),
            reason: describe(&e),
        })?;

        // Autoplay restrictions and decode errors reject the promise later
        let media = self.media.clone();
        spawn_local(async move {
            if let Err(err) = JsFuture::from(promise).await {
                warn!(%media, "playback rejected: {}", describe(&err));
            }
        });
        Ok(())
    }

    fn stop(&mut self) {
        if let Err(err) = self.audio.pause() {
            debug!(media = %self.media, "pause failed: {}", describe(&err));
        }
    }

    fn attach_ended(&mut self, listener: EndedListener) -> Result<()> {
        self.detach_ended();

        let callback = Closure::<dyn FnMut()>::new(move || {
            listener.fire();
        });
        // The browser drops the registration after the first `ended`
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        self.audio
            .add_event_listener_with_callback_and_add_event_listener_options(
                ENDED,
                callback.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|e| HookError::Listener(describe(&e)))?;

        self.ended = Some(callback);
        Ok(())
    }

    fn detach_ended(&mut self) {
        let Some(callback) = self.ended.take() else {
            return;
        };

        if let Err(err) = self
            .audio
            .remove_event_listener_with_callback(ENDED, callback.as_ref().unchecked_ref())
        {
            // Keep the closure alive rather than let JS call a freed one
            warn!(media = %self.media, "failed to remove ended listener: {}", describe(&err));
            callback.forget();
        }
    }
}

impl Drop for WebAudioHandle {
    fn drop(&mut self) {
        self.detach_ended();
    }
}

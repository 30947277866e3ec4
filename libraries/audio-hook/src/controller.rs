//! Playback controller - core transition logic
//!
//! Owns at most one audio handle and keeps it in line with the latest
//! playback intent, across the bound element's mount/update/destroy lifecycle.

use std::collections::VecDeque;
use std::rc::Rc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::{
    binding::Binding,
    engine::{AudioEngine, AudioHandle, EndedListener},
    error::{HookError, Result},
    events::{ControllerEvent, MAX_PENDING_EVENTS},
    trigger::{self, TriggerSource},
    types::{
        ControllerConfig, ControllerState, HandleId, MediaRef, PlaybackIntent,
        SameReferencePolicy,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Unmounted,
    Mounted,
    Destroyed,
}

/// The handle currently owned by the controller, with the listener registered on it
struct LiveHandle<H> {
    id: HandleId,
    media: MediaRef,
    handle: H,
    listener: EndedListener,
}

/// Element-bound playback controller
///
/// One instance per bound element. Host environments call [`mount`],
/// [`update`] and [`destroy`] from the element's lifecycle callbacks and
/// forward pushed events to [`handle_event`]. Everything ends up in
/// [`accept_intent`], which always retires the previous handle first, so at
/// most one handle is ever live.
///
/// [`mount`]: PlaybackController::mount
/// [`update`]: PlaybackController::update
/// [`destroy`]: PlaybackController::destroy
/// [`handle_event`]: PlaybackController::handle_event
/// [`accept_intent`]: PlaybackController::accept_intent
pub struct PlaybackController<E: AudioEngine> {
    config: ControllerConfig,
    engine: E,
    binding: Rc<dyn Binding>,
    trigger: Box<dyn TriggerSource>,
    lifecycle: Lifecycle,
    live: Option<LiveHandle<E::Handle>>,
    next_handle: u64,
    pending_events: VecDeque<ControllerEvent>,
}

impl<E: AudioEngine> PlaybackController<E> {
    /// Create a controller using the trigger source named in `config`
    pub fn new(config: ControllerConfig, engine: E, binding: Rc<dyn Binding>) -> Self {
        let trigger = trigger::from_config(&config);
        Self::with_trigger(config, engine, binding, trigger)
    }

    /// Create a controller with a custom trigger source
    pub fn with_trigger(
        config: ControllerConfig,
        engine: E,
        binding: Rc<dyn Binding>,
        trigger: Box<dyn TriggerSource>,
    ) -> Self {
        Self {
            config,
            engine,
            binding,
            trigger,
            lifecycle: Lifecycle::Unmounted,
            live: None,
            next_handle: 0,
            pending_events: VecDeque::with_capacity(MAX_PENDING_EVENTS),
        }
    }

    // ===== Lifecycle =====

    /// Element mounted: start accepting intents
    ///
    /// An attribute-driven controller whose element already carries a
    /// reference starts playing it immediately.
    pub fn mount(&mut self) -> Result<()> {
        match self.lifecycle {
            Lifecycle::Destroyed => {
                debug!("ignoring mount after destroy");
                return Ok(());
            }
            Lifecycle::Mounted => {
                debug!("already mounted");
                return Ok(());
            }
            Lifecycle::Unmounted => {}
        }

        self.lifecycle = Lifecycle::Mounted;
        info!(trigger = ?self.trigger.kind(), "playback controller mounted");

        match self.trigger.on_mount(self.binding.as_ref()) {
            Some(intent) => self.accept_intent(intent),
            None => Ok(()),
        }
    }

    /// Element updated: re-read declarative state (attribute trigger only)
    pub fn update(&mut self) -> Result<()> {
        if !self.ensure_mounted("update")? {
            return Ok(());
        }

        let Some(intent) = self.trigger.on_update(self.binding.as_ref()) else {
            return Ok(());
        };

        if let PlaybackIntent::Play(media) = &intent {
            if self.config.same_reference == SameReferencePolicy::Ignore
                && self.is_playing(media)
            {
                debug!(%media, "update carries the playing reference, keeping handle");
                return Ok(());
            }
        }

        self.accept_intent(intent)
    }

    /// Element removed: retire any handle; later calls are ignored
    pub fn destroy(&mut self) {
        if self.lifecycle == Lifecycle::Destroyed {
            debug!("already destroyed");
            return;
        }

        let before = self.state();
        self.retire();
        self.lifecycle = Lifecycle::Destroyed;
        self.emit_if_changed(before);
        info!("playback controller destroyed");
    }

    // ===== Intake =====

    /// Pushed event from the host channel
    pub fn handle_event(&mut self, event: &str, payload: &Value) -> Result<()> {
        if !self.ensure_mounted(event)? {
            return Ok(());
        }

        let intent = self.trigger.on_event(event, payload)?;
        self.accept_intent(intent)
    }

    /// Core transition: retire the current handle, then follow `intent`
    ///
    /// A failed start leaves the controller idle with no listener registered.
    pub fn accept_intent(&mut self, intent: PlaybackIntent) -> Result<()> {
        if !self.ensure_mounted("intent")? {
            return Ok(());
        }

        let before = self.state();
        self.retire();

        let result = match intent {
            PlaybackIntent::Stop => {
                debug!("stop intent");
                Ok(())
            }
            PlaybackIntent::Play(media) => self.start(media),
        };

        self.emit_if_changed(before);
        result
    }

    // ===== State Queries =====

    pub fn state(&self) -> ControllerState {
        if self.live.is_some() {
            ControllerState::Playing
        } else {
            ControllerState::Idle
        }
    }

    /// Reference of the handle currently owned, finished or not
    pub fn current_media(&self) -> Option<&MediaRef> {
        self.live.as_ref().map(|live| &live.media)
    }

    pub fn current_handle(&self) -> Option<HandleId> {
        self.live.as_ref().map(|live| live.id)
    }

    /// Whether the owned handle already reached its natural end
    pub fn has_finished(&self) -> bool {
        self.live
            .as_ref()
            .is_some_and(|live| !live.listener.is_armed())
    }

    pub fn is_mounted(&self) -> bool {
        self.lifecycle == Lifecycle::Mounted
    }

    pub fn is_destroyed(&self) -> bool {
        self.lifecycle == Lifecycle::Destroyed
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    // ===== Events =====

    /// Take all queued controller events, oldest first
    ///
    /// Holds at most [`MAX_PENDING_EVENTS`]; older entries are dropped when
    /// the host never drains.
    pub fn drain_events(&mut self) -> Vec<ControllerEvent> {
        self.pending_events.drain(..).collect()
    }

    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    /// `Ok(true)` to proceed, `Ok(false)` when destroyed
    fn ensure_mounted(&self, what: &str) -> Result<bool> {
        match self.lifecycle {
            Lifecycle::Mounted => Ok(true),
            Lifecycle::Destroyed => {
                debug!("ignoring {} after destroy", what);
                Ok(false)
            }
            Lifecycle::Unmounted => Err(HookError::NotMounted),
        }
    }

    fn is_playing(&self, media: &MediaRef) -> bool {
        self.live
            .as_ref()
            .is_some_and(|live| live.media == *media && live.listener.is_armed())
    }

    fn start(&mut self, media: MediaRef) -> Result<()> {
        self.next_handle += 1;
        let id = HandleId(self.next_handle);

        let mut handle = self.engine.create(&media).map_err(|e| {
            warn!(handle = %id, %media, "failed to load: {}", e);
            e
        })?;

        let listener = EndedListener::new(id, &self.config.ended_event, Rc::clone(&self.binding));
        if let Err(e) = handle.attach_ended(listener.clone()) {
            warn!(handle = %id, "failed to register ended listener: {}", e);
            listener.disarm();
            handle.stop();
            return Err(e);
        }

        if let Err(e) = handle.play() {
            warn!(handle = %id, %media, "failed to start: {}", e);
            listener.disarm();
            handle.detach_ended();
            handle.stop();
            return Err(e);
        }

        info!(handle = %id, %media, "playing");
        self.emit(ControllerEvent::HandleStarted {
            handle: id,
            media: media.clone(),
        });
        self.live = Some(LiveHandle {
            id,
            media,
            handle,
            listener,
        });
        Ok(())
    }

    /// Stop and forget the live handle. No-op when idle.
    fn retire(&mut self) {
        let Some(mut live) = self.live.take() else {
            return;
        };

        // Disarm first so a teardown-time `ended` cannot reach the host
        live.listener.disarm();
        live.handle.detach_ended();
        live.handle.stop();

        debug!(handle = %live.id, media = %live.media, "retired");
        self.emit(ControllerEvent::HandleRetired { handle: live.id });
    }

    fn emit_if_changed(&mut self, before: ControllerState) {
        let state = self.state();
        if state != before {
            self.emit(ControllerEvent::StateChanged { state });
        }
    }

    fn emit(&mut self, event: ControllerEvent) {
        if self.pending_events.len() == MAX_PENDING_EVENTS {
            self.pending_events.pop_front();
        }
        self.pending_events.push_back(event);
    }
}

impl<E: AudioEngine> Drop for PlaybackController<E> {
    fn drop(&mut self) {
        self.retire();
    }
}

//! Platform-agnostic audio engine traits
//!
//! Abstracts the thing that actually makes sound (an `HTMLAudioElement` in the
//! browser, a fake in tests) so the controller only deals with handle lifetimes.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use tracing::{debug, warn};

use crate::binding::{Binding, OutboundEvent};
use crate::error::Result;
use crate::types::{HandleId, MediaRef};

/// Creates audio handles
pub trait AudioEngine {
    type Handle: AudioHandle;

    /// Load a media reference into a fresh handle
    ///
    /// The handle must not start playing until [`AudioHandle::play`] is called.
    ///
    /// # Returns
    /// * `Ok(handle)` - Handle ready to start
    /// * `Err(HookError::EngineCreate)` - Invalid or unplayable reference
    fn create(&mut self, media: &MediaRef) -> Result<Self::Handle>;
}

/// One loaded media stream, exclusively owned by a controller
pub trait AudioHandle {
    /// Start playback
    fn play(&mut self) -> Result<()>;

    /// Stop playback. Must be safe to call more than once.
    fn stop(&mut self);

    /// Register the completion listener, once-only
    ///
    /// The registration is dropped after the first `ended`. Implementors keep
    /// the exact registered callback so that [`AudioHandle::detach_ended`]
    /// removes that same callback if the handle is retired first.
    fn attach_ended(&mut self, listener: EndedListener) -> Result<()>;

    /// Unregister the listener stored by `attach_ended`. No-op if none is left.
    fn detach_ended(&mut self);
}

struct ListenerInner {
    handle: HandleId,
    armed: Cell<bool>,
    ended_event: String,
    binding: Rc<dyn Binding>,
}

/// One-shot completion listener scoped to a single handle
///
/// Cloning shares the same listener; [`EndedListener::same_as`] compares identity.
/// Once fired or disarmed it never notifies again, even if the engine keeps
/// delivering `ended` events.
#[derive(Clone)]
pub struct EndedListener {
    inner: Rc<ListenerInner>,
}

impl EndedListener {
    pub(crate) fn new(handle: HandleId, ended_event: &str, binding: Rc<dyn Binding>) -> Self {
        Self {
            inner: Rc::new(ListenerInner {
                handle,
                armed: Cell::new(true),
                ended_event: ended_event.to_string(),
                binding,
            }),
        }
    }

    /// Handle this listener belongs to
    pub fn handle(&self) -> HandleId {
        self.inner.handle
    }

    /// Whether a later `fire` would still notify the host
    pub fn is_armed(&self) -> bool {
        self.inner.armed.get()
    }

    /// Natural completion: notify the host once
    ///
    /// Returns true if a notification was pushed.
    pub fn fire(&self) -> bool {
        if !self.inner.armed.replace(false) {
            debug!(handle = %self.inner.handle, "ignoring ended event from spent handle");
            return false;
        }

        let event = OutboundEvent::audio_ended(&self.inner.ended_event);
        if let Err(err) = self.inner.binding.push_event(&event) {
            warn!(handle = %self.inner.handle, "failed to push {}: {}", event.name, err);
            return false;
        }

        debug!(handle = %self.inner.handle, "pushed {}", event.name);
        true
    }

    pub(crate) fn disarm(&self) {
        self.inner.armed.set(false);
    }

    /// Identity comparison (same registration, not just same handle id)
    pub fn same_as(&self, other: &EndedListener) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for EndedListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EndedListener")
            .field("handle", &self.inner.handle)
            .field("armed", &self.inner.armed.get())
            .finish()
    }
}

//! Controller events
//!
//! Diagnostics queued at each transition for the host to drain. The only
//! signal sent to the element's host is the completion event; these are for
//! debugging and UI sync on the client side.

use serde::{Deserialize, Serialize};

use crate::types::{ControllerState, HandleId, MediaRef};

/// Capacity of the controller's event queue
pub const MAX_PENDING_EVENTS: usize = 256;

/// Events recorded by the controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ControllerEvent {
    /// Controller state changed
    StateChanged {
        /// The new state
        state: ControllerState,
    },

    /// A handle was created and started
    HandleStarted {
        handle: HandleId,
        media: MediaRef,
    },

    /// A handle was stopped and its listener removed
    HandleRetired {
        handle: HandleId,
    },
}

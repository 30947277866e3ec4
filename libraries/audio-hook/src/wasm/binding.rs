//! DOM element binding

use js_sys::Function;
use serde::Serialize;
use wasm_bindgen::JsValue;
use web_sys::Element;

use super::describe;
use crate::binding::{Binding, OutboundEvent};
use crate::error::{HookError, Result};

/// Bound element plus the host's push function
///
/// `push` is called as `push(name, payload)`; hook glue typically passes
/// `(name, payload) => this.pushEventTo(this.el, name, payload)`.
pub struct ElementBinding {
    element: Element,
    push: Function,
}

impl ElementBinding {
    pub fn new(element: Element, push: Function) -> Self {
        Self { element, push }
    }
}

impl Binding for ElementBinding {
    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }

    fn push_event(&self, event: &OutboundEvent) -> Result<()> {
        let payload = event
            .payload
            .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
            .map_err(|e| HookError::HostPush(e.to_string()))?;

        self.push
            .call2(&JsValue::NULL, &JsValue::from_str(&event.name), &payload)
            .map(|_| ())
            .map_err(|e| HookError::HostPush(describe(&e)))
    }
}

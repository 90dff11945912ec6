//! Bootstrap dropdown re-binding
//!
//! Collapsing or expanding the navbar moves the theme switcher, which
//! leaves Bootstrap's dropdown instance bound to stale positioning. After
//! every breakpoint check the instance is disposed and created again.

use std::rc::Rc;

use js_sys::{Array, Function, Reflect};
use lantern_layout::{BreakpointState, LayoutSettledHook};
use tracing::trace;
use wasm_bindgen::{JsCast, JsValue};

use crate::dom::WebDocument;
use crate::js_error;

/// Re-creates the dropdown on the theme switcher toggle
pub struct DropdownRebinder {
    document: Rc<WebDocument>,
    toggle_selector: String,
}

impl DropdownRebinder {
    pub fn new(document: Rc<WebDocument>, toggle_selector: impl Into<String>) -> Self {
        Self {
            document,
            toggle_selector: toggle_selector.into(),
        }
    }
}

impl LayoutSettledHook for DropdownRebinder {
    fn layout_settled(&self, state: BreakpointState) {
        let Some(toggle) = self
            .document
            .raw()
            .query_selector(&self.toggle_selector)
            .ok()
            .flatten()
        else {
            return;
        };
        if let Err(err) = rebind(&toggle) {
            trace!("dropdown not re-bound after {:?}: {}", state, js_error(&err));
        }
    }
}

fn rebind(toggle: &web_sys::Element) -> Result<(), JsValue> {
    let bootstrap = Reflect::get(&js_sys::global(), &JsValue::from_str("bootstrap"))?;
    if bootstrap.is_undefined() {
        return Ok(());
    }
    let dropdown: Function = Reflect::get(&bootstrap, &JsValue::from_str("Dropdown"))?.dyn_into()?;

    let get_instance: Function =
        Reflect::get(&dropdown, &JsValue::from_str("getInstance"))?.dyn_into()?;
    let existing = get_instance.call1(&dropdown, toggle)?;
    if !existing.is_null() && !existing.is_undefined() {
        let dispose: Function = Reflect::get(&existing, &JsValue::from_str("dispose"))?.dyn_into()?;
        dispose.call0(&existing)?;
    }

    Reflect::construct(&dropdown, &Array::of1(toggle))?;
    Ok(())
}

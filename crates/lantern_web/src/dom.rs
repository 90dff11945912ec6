//! `web-sys` document and elements

use std::any::Any;
use std::rc::Rc;

use lantern_core::{Callback, Document, Element, ElementRef, EventKind, HostError, Subscription};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{
    HtmlButtonElement, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement,
    NodeList,
};

use crate::js_error;

/// A DOM element
pub struct WebElement {
    element: web_sys::Element,
}

impl WebElement {
    pub fn new(element: web_sys::Element) -> Rc<Self> {
        Rc::new(Self { element })
    }

    pub fn raw(&self) -> &web_sys::Element {
        &self.element
    }

    /// The native element behind `element`, if it is a [`WebElement`]
    pub fn native(element: &ElementRef) -> Option<&web_sys::Element> {
        element
            .as_any()
            .downcast_ref::<WebElement>()
            .map(WebElement::raw)
    }
}

fn element_ref(element: web_sys::Element) -> ElementRef {
    WebElement::new(element)
}

fn collect(nodes: NodeList) -> Vec<ElementRef> {
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::Element>().ok())
        .map(element_ref)
        .collect()
}

impl Element for WebElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if self.element.get_attribute(name).as_deref() != Some(value) {
            // Only fails for invalid attribute names, which are ours
            let _ = self.element.set_attribute(name, value);
        }
    }

    fn remove_attribute(&self, name: &str) {
        let _ = self.element.remove_attribute(name);
    }

    fn has_class(&self, class: &str) -> bool {
        self.element.class_list().contains(class)
    }

    fn add_class(&self, class: &str) {
        let _ = self.element.class_list().add_1(class);
    }

    fn remove_class(&self, class: &str) {
        let _ = self.element.class_list().remove_1(class);
    }

    fn text(&self) -> String {
        self.element.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.element.set_text_content(Some(text));
    }

    fn value(&self) -> Option<String> {
        let el = &self.element;
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            Some(input.value())
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            Some(area.value())
        } else {
            el.dyn_ref::<HtmlSelectElement>().map(HtmlSelectElement::value)
        }
    }

    fn set_value(&self, value: &str) {
        let el = &self.element;
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        }
    }

    fn is_disabled(&self) -> bool {
        match self.element.dyn_ref::<HtmlButtonElement>() {
            Some(button) => button.disabled(),
            None => self.element.has_attribute("disabled"),
        }
    }

    fn set_disabled(&self, disabled: bool) {
        match self.element.dyn_ref::<HtmlButtonElement>() {
            Some(button) => button.set_disabled(disabled),
            None if disabled => self.set_attribute("disabled", ""),
            None => self.remove_attribute("disabled"),
        }
    }

    fn offset_width(&self) -> u32 {
        self.element
            .dyn_ref::<HtmlElement>()
            .map(|el| el.offset_width().max(0) as u32)
            .unwrap_or(0)
    }

    fn computed_style(&self, property: &str) -> Option<String> {
        let style = web_sys::window()?
            .get_computed_style(&self.element)
            .ok()
            .flatten()?;
        style
            .get_property_value(property)
            .ok()
            .filter(|value| !value.is_empty())
    }

    fn query(&self, selector: &str) -> Option<ElementRef> {
        self.element
            .query_selector(selector)
            .ok()
            .flatten()
            .map(element_ref)
    }

    fn query_all(&self, selector: &str) -> Vec<ElementRef> {
        self.element
            .query_selector_all(selector)
            .map(collect)
            .unwrap_or_default()
    }

    fn listen(&self, event: EventKind, handler: Callback) -> lantern_core::Result<Subscription> {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |e: web_sys::Event| {
            e.prevent_default();
            handler();
        });
        self.element
            .add_event_listener_with_callback(event.as_str(), closure.as_ref().unchecked_ref())
            .map_err(|err| HostError::Listener(js_error(&err)))?;

        let target = self.element.clone();
        Ok(Subscription::new(move || {
            let _ = target
                .remove_event_listener_with_callback(event.as_str(), closure.as_ref().unchecked_ref());
        }))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// The page document
pub struct WebDocument {
    document: web_sys::Document,
}

impl WebDocument {
    pub fn new(document: web_sys::Document) -> Rc<Self> {
        Rc::new(Self { document })
    }

    /// The global document
    pub fn current() -> Result<Rc<Self>, HostError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| HostError::Unavailable("window.document".to_string()))?;
        Ok(Self::new(document))
    }

    pub fn raw(&self) -> &web_sys::Document {
        &self.document
    }

    /// Text content of the element with `id`
    pub fn text_of(&self, id: &str) -> Option<String> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.text_content())
    }
}

impl Document for WebDocument {
    fn root(&self) -> Option<ElementRef> {
        self.document.document_element().map(element_ref)
    }

    fn query(&self, selector: &str) -> Option<ElementRef> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()
            .map(element_ref)
    }

    fn query_all(&self, selector: &str) -> Vec<ElementRef> {
        self.document
            .query_selector_all(selector)
            .map(collect)
            .unwrap_or_default()
    }
}

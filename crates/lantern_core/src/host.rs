//! Host capability traits
//!
//! Every controller talks to the page through these traits. The browser
//! backend implements them with `web-sys`; [`crate::memory`] implements them
//! in memory for headless runs and tests.
//!
//! All handles are `Rc` based: the page has a single event thread and every
//! DOM mutation happens on it.

use std::any::Any;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::time::Duration;

use crate::error::Result;
use crate::scheme::ColorScheme;

/// Shared handle to an element
pub type ElementRef = Rc<dyn Element>;

/// Callback invoked on the event thread
pub type Callback = Rc<dyn Fn()>;

/// Events controllers listen for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Pointer activation; the default action is prevented
    Click,
    /// Form submission; the default navigation is prevented
    Submit,
}

impl EventKind {
    /// DOM event type name
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Submit => "submit",
        }
    }
}

/// A single element of the page
pub trait Element {
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);
    fn remove_attribute(&self, name: &str);

    fn has_class(&self, class: &str) -> bool;
    fn add_class(&self, class: &str);
    fn remove_class(&self, class: &str);

    /// Add or remove `class` depending on `on`
    fn toggle_class(&self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    fn text(&self) -> String;
    fn set_text(&self, text: &str);

    /// Current value of a form control (`None` for non-controls)
    fn value(&self) -> Option<String>;
    fn set_value(&self, value: &str);

    fn is_disabled(&self) -> bool;
    fn set_disabled(&self, disabled: bool);

    /// Rendered layout width in whole CSS pixels
    fn offset_width(&self) -> u32;

    /// Resolved value of a computed style property, e.g. `column-gap`
    fn computed_style(&self, property: &str) -> Option<String>;

    /// First descendant matching `selector`
    fn query(&self, selector: &str) -> Option<ElementRef>;
    /// All descendants matching `selector`, in document order
    fn query_all(&self, selector: &str) -> Vec<ElementRef>;

    /// Register `handler` for `event`; dropping the subscription detaches it
    fn listen(&self, event: EventKind, handler: Callback) -> Result<Subscription>;

    /// The concrete handle, for host primitives that need the native element
    fn as_any(&self) -> &dyn Any;
}

/// The page document
pub trait Document {
    /// The root (`<html>`) element
    fn root(&self) -> Option<ElementRef>;
    fn query(&self, selector: &str) -> Option<ElementRef>;
    fn query_all(&self, selector: &str) -> Vec<ElementRef>;
}

/// Client-local key-value storage for persisted preferences
pub trait PreferenceStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// The environment's dark/light preference signal
pub trait ColorSchemeSource {
    /// Current preference, `None` when the host cannot tell
    fn current(&self) -> Option<ColorScheme>;

    /// Subscribe to preference changes
    ///
    /// Returns [`crate::HostError::Unavailable`] when the host has no signal.
    fn subscribe(&self, on_change: Rc<dyn Fn(ColorScheme)>) -> Result<Subscription>;
}

/// Size-change observation primitive
pub trait ResizeObserverHost {
    /// Invoke `on_resize` whenever `element` changes size
    fn observe(&self, element: &ElementRef, on_resize: Callback) -> Result<Subscription>;
}

/// One-shot delayed task execution
pub trait Scheduler {
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>);
}

/// A `!Send` task driven by the page's event loop
pub type LocalTask = Pin<Box<dyn Future<Output = ()>>>;

/// Runs local futures to completion on the event thread
pub trait TaskSpawner {
    fn spawn_local(&self, task: LocalTask);
}

/// Keeps a listener or observer registered until dropped
#[must_use = "dropping a Subscription detaches its listener"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Create a subscription that runs `release` when dropped
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

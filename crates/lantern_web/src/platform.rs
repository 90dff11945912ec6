//! Browser implementations of the environment capabilities

use std::rc::Rc;
use std::time::Duration;

use lantern_core::{
    Callback, ColorScheme, ColorSchemeSource, ElementRef, HostError, LocalTask, PreferenceStore,
    ResizeObserverHost, Result, Scheduler, Subscription, TaskSpawner,
};
use tracing::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{MediaQueryList, MediaQueryListEvent, ResizeObserver, Storage};

use crate::dom::WebElement;
use crate::js_error;

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

// ========== Storage ==========

/// `window.localStorage`
///
/// Storage can be missing entirely (disabled cookies, some private modes);
/// reads then find nothing and writes fail.
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn new() -> Rc<Self> {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            debug!("localStorage unavailable");
        }
        Rc::new(Self { storage })
    }
}

impl PreferenceStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let storage = self
            .storage
            .as_ref()
            .ok_or_else(|| HostError::Storage("localStorage unavailable".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|err| HostError::Storage(js_error(&err)))
    }
}

// ========== Color scheme ==========

/// `matchMedia("(prefers-color-scheme: dark)")`
pub struct MediaQueryScheme {
    list: Option<MediaQueryList>,
}

impl MediaQueryScheme {
    pub fn new() -> Rc<Self> {
        let list = web_sys::window().and_then(|w| w.match_media(DARK_QUERY).ok().flatten());
        Rc::new(Self { list })
    }
}

impl ColorSchemeSource for MediaQueryScheme {
    fn current(&self) -> Option<ColorScheme> {
        self.list
            .as_ref()
            .map(|list| ColorScheme::from_dark(list.matches()))
    }

    fn subscribe(&self, on_change: Rc<dyn Fn(ColorScheme)>) -> Result<Subscription> {
        let list = self
            .list
            .clone()
            .ok_or_else(|| HostError::Unavailable(DARK_QUERY.to_string()))?;

        let closure = Closure::<dyn FnMut(MediaQueryListEvent)>::new(
            move |event: MediaQueryListEvent| on_change(ColorScheme::from_dark(event.matches())),
        );
        list.add_event_listener_with_callback("change", closure.as_ref().unchecked_ref())
            .map_err(|err| HostError::Listener(js_error(&err)))?;

        Ok(Subscription::new(move || {
            let _ =
                list.remove_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
        }))
    }
}

// ========== Resize observation ==========

/// One `ResizeObserver` per observed element
pub struct BrowserResizeObserver;

impl BrowserResizeObserver {
    pub fn new() -> Rc<Self> {
        Rc::new(Self)
    }
}

impl ResizeObserverHost for BrowserResizeObserver {
    fn observe(&self, element: &ElementRef, on_resize: Callback) -> Result<Subscription> {
        let native = WebElement::native(element)
            .ok_or_else(|| HostError::Other("not a DOM element".to_string()))?
            .clone();

        let closure = Closure::<dyn FnMut()>::new(move || on_resize());
        let observer = ResizeObserver::new(closure.as_ref().unchecked_ref())
            .map_err(|err| HostError::Unavailable(format!("ResizeObserver: {}", js_error(&err))))?;
        observer.observe(&native);

        Ok(Subscription::new(move || {
            observer.disconnect();
            drop(closure);
        }))
    }
}

// ========== Timers ==========

/// `window.setTimeout`
pub struct TimeoutScheduler;

impl TimeoutScheduler {
    pub fn new() -> Rc<Self> {
        Rc::new(Self)
    }
}

impl Scheduler for TimeoutScheduler {
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        let Some(window) = web_sys::window() else {
            warn!("setTimeout unavailable, running task now");
            task();
            return;
        };
        let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
        let closure = Closure::once_into_js(move || task());
        if let Err(err) = window
            .set_timeout_with_callback_and_timeout_and_arguments_0(closure.unchecked_ref(), millis)
        {
            warn!("setTimeout failed: {}", js_error(&err));
        }
    }
}

// ========== Tasks ==========

/// `wasm_bindgen_futures::spawn_local`
pub struct LocalSpawner;

impl LocalSpawner {
    pub fn new() -> Rc<Self> {
        Rc::new(Self)
    }
}

impl TaskSpawner for LocalSpawner {
    fn spawn_local(&self, task: LocalTask) {
        wasm_bindgen_futures::spawn_local(task);
    }
}

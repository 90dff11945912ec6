//! Host capability bundle

use std::rc::Rc;

use lantern_core::{
    ColorSchemeSource, Document, PreferenceStore, ResizeObserverHost, Scheduler, TaskSpawner,
};

/// Every capability a page needs from its host
///
/// Cloning is cheap; all members are shared handles.
#[derive(Clone)]
pub struct PageHost {
    pub document: Rc<dyn Document>,
    pub store: Rc<dyn PreferenceStore>,
    pub color_scheme: Rc<dyn ColorSchemeSource>,
    pub resize_observer: Rc<dyn ResizeObserverHost>,
    pub scheduler: Rc<dyn Scheduler>,
    pub spawner: Rc<dyn TaskSpawner>,
}

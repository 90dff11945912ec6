//! Theme state
//!
//! `ThemeState` is the single owner of the current theme. Every read of
//! "current theme" and every change goes through it:
//!
//! - [`ThemeState::load`] at startup (persisted preference, then the system
//!   signal, then light)
//! - [`ThemeState::set_theme`] / [`ThemeState::select`] for explicit user
//!   choices, which are persisted
//! - [`ThemeState::on_environment_change`] for system preference changes,
//!   which only apply while no explicit choice is persisted

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use lantern_core::{
    ColorScheme, ColorSchemeSource, Document, Element, EventKind, PreferenceStore, Subscription,
    ThemeConfig,
};
use tracing::{debug, warn};

use crate::applier::ThemeApplier;
use crate::variant::{ThemeAssets, ThemeVariant};

/// Owned theme state for one page
pub struct ThemeState {
    config: ThemeConfig,
    current: Cell<ThemeVariant>,
    store: Rc<dyn PreferenceStore>,
    scheme: Rc<dyn ColorSchemeSource>,
    applier: ThemeApplier,
    option_listeners: RefCell<Vec<Subscription>>,
}

impl ThemeState {
    /// Create the state; nothing is read or applied until [`ThemeState::load`]
    pub fn new(
        config: ThemeConfig,
        document: Rc<dyn Document>,
        store: Rc<dyn PreferenceStore>,
        scheme: Rc<dyn ColorSchemeSource>,
    ) -> Rc<Self> {
        Rc::new(Self {
            applier: ThemeApplier::new(document, config.clone()),
            config,
            current: Cell::new(ThemeVariant::default()),
            store,
            scheme,
            option_listeners: RefCell::new(Vec::new()),
        })
    }

    // ========== Reads ==========

    /// Get the current variant
    pub fn current(&self) -> ThemeVariant {
        self.current.get()
    }

    /// Assets derived from the current variant
    pub fn assets(&self) -> ThemeAssets {
        ThemeAssets::derive(self.current(), &self.config)
    }

    /// The explicit user preference, if a recognized one is persisted
    pub fn persisted(&self) -> Option<ThemeVariant> {
        let raw = self.store.get(&self.config.storage_key)?;
        let variant = ThemeVariant::from_id(&raw);
        if variant.is_none() {
            debug!("ThemeState: ignoring unrecognized stored theme {:?}", raw);
        }
        variant
    }

    pub fn scheme_source(&self) -> &Rc<dyn ColorSchemeSource> {
        &self.scheme
    }

    // ========== Mutations ==========

    /// Resolve the startup theme and apply it
    pub fn load(&self) -> ThemeVariant {
        let variant = match self.persisted() {
            Some(variant) => variant,
            None => match self.scheme.current() {
                Some(scheme) => ThemeVariant::from(scheme),
                None => {
                    debug!("ThemeState::load - no system color scheme, using default");
                    ThemeVariant::default()
                }
            },
        };
        debug!("ThemeState::load - resolved {}", variant);
        self.current.set(variant);
        self.apply_current();
        variant
    }

    /// Switch to the variant identified by `id`
    ///
    /// Unknown identifiers leave the state untouched and return `false`.
    pub fn set_theme(&self, id: &str) -> bool {
        match ThemeVariant::from_id(id) {
            Some(variant) => {
                self.select(variant);
                true
            }
            None => {
                debug!("ThemeState::set_theme - rejecting unknown theme {:?}", id);
                false
            }
        }
    }

    /// Explicitly select `variant`, apply it and persist it
    pub fn select(&self, variant: ThemeVariant) {
        debug!(
            "ThemeState::select - switching from {} to {}",
            self.current(),
            variant
        );
        self.current.set(variant);
        self.apply_current();

        if let Err(err) = self.store.set(&self.config.storage_key, variant.id()) {
            warn!("ThemeState: could not persist theme {}: {}", variant, err);
        }
    }

    /// Push the current variant to the document
    pub fn apply_current(&self) {
        self.applier.apply(&self.assets());
    }

    /// React to a system dark/light change
    ///
    /// Ignored while an explicit preference is persisted. Otherwise the page
    /// follows the system without persisting anything, so later system
    /// changes keep applying.
    pub fn on_environment_change(&self, is_dark: bool) {
        if let Some(explicit) = self.persisted() {
            debug!(
                "ThemeState: system change ignored, explicit preference {} wins",
                explicit
            );
            return;
        }
        let variant = ThemeVariant::from(ColorScheme::from_dark(is_dark));
        if variant != self.current() {
            debug!("ThemeState: following system scheme to {}", variant);
        }
        self.current.set(variant);
        self.apply_current();
    }

    // ========== Option binding ==========

    /// Route clicks on every theme option through [`ThemeState::set_theme`]
    ///
    /// Returns the number of options bound. Options whose listener cannot
    /// be registered are skipped.
    pub fn bind_options(self: &Rc<Self>) -> usize {
        let attribute = self.config.option_attribute.clone();
        let options = self
            .applier
            .document()
            .query_all(&format!("[{attribute}]"));

        let mut listeners = self.option_listeners.borrow_mut();
        listeners.clear();
        for option in options {
            let Some(id) = option.attribute(&attribute) else {
                continue;
            };
            let state: Weak<ThemeState> = Rc::downgrade(self);
            let handler = Rc::new(move || {
                if let Some(state) = state.upgrade() {
                    state.set_theme(&id);
                }
            });
            match option.listen(EventKind::Click, handler) {
                Ok(sub) => listeners.push(sub),
                Err(err) => warn!("ThemeState: cannot bind theme option: {}", err),
            }
        }
        listeners.len()
    }
}

//! System color scheme watcher
//!
//! Connects the environment's dark/light change notifications to
//! [`ThemeState::on_environment_change`]. When the host has no signal the
//! watcher stays detached and the page keeps its startup theme.

use std::rc::Rc;

use lantern_core::{ColorScheme, Subscription};
use tracing::{debug, warn};

use crate::state::ThemeState;

/// Live subscription to system color scheme changes
#[derive(Debug)]
pub struct SystemSchemeWatcher {
    subscription: Option<Subscription>,
}

impl SystemSchemeWatcher {
    /// Subscribe `state` to its scheme source
    pub fn attach(state: &Rc<ThemeState>) -> Self {
        let source = state.scheme_source().clone();
        if source.current().is_none() {
            debug!("SystemSchemeWatcher: no color scheme signal, not listening");
            return Self { subscription: None };
        }

        let weak = Rc::downgrade(state);
        let on_change = Rc::new(move |scheme: ColorScheme| {
            if let Some(state) = weak.upgrade() {
                state.on_environment_change(scheme.is_dark());
            }
        });

        match source.subscribe(on_change) {
            Ok(subscription) => Self {
                subscription: Some(subscription),
            },
            Err(err) => {
                warn!("SystemSchemeWatcher: cannot listen for changes: {}", err);
                Self { subscription: None }
            }
        }
    }

    pub fn is_listening(&self) -> bool {
        self.subscription.is_some()
    }
}

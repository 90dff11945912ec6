//! Breakpoint decision engine
//!
//! Decides whether the navbar items fit on one row and toggles a single
//! collapsed class on the container.
//!
//! Every check first removes the collapsed class and only then measures, so
//! the widths are always those of the expanded layout. Measuring while
//! collapsed would under-report the nav links and the navbar would never
//! expand again.
//!
//! There is no hysteresis: a container sitting exactly on the boundary while
//! late fonts shift widths by a pixel can flip between states on successive
//! resize notifications.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use lantern_core::{Document, Element, NavbarConfig, ResizeObserverHost, Scheduler, Subscription};
use tracing::{debug, trace, warn};

use crate::error::LayoutError;
use crate::measure::{decide, BreakpointState};
use crate::probe::LayoutProbe;

/// Invoked after every completed check
///
/// Used to re-bind widgets whose DOM was rearranged by the collapse, such
/// as the theme switcher dropdown.
pub trait LayoutSettledHook {
    fn layout_settled(&self, state: BreakpointState);
}

impl<F: Fn(BreakpointState)> LayoutSettledHook for F {
    fn layout_settled(&self, state: BreakpointState) {
        self(state)
    }
}

/// Navbar breakpoint engine
pub struct BreakpointEngine {
    config: NavbarConfig,
    /// `None` when a required element was missing; the engine is disabled
    probe: Option<LayoutProbe>,
    state: Cell<Option<BreakpointState>>,
    checking: Cell<bool>,
    hooks: RefCell<Vec<Rc<dyn LayoutSettledHook>>>,
    subscriptions: RefCell<Vec<Subscription>>,
}

impl BreakpointEngine {
    /// Locate the navbar elements
    ///
    /// If any is missing the engine disables itself: it logs once and never
    /// touches the document afterwards.
    pub fn new(document: &dyn Document, config: NavbarConfig) -> Rc<Self> {
        let probe = match LayoutProbe::locate(document, &config) {
            Ok(probe) => Some(probe),
            Err(err) => {
                warn!("BreakpointEngine disabled: {}", err);
                None
            }
        };
        Self::with_probe(config, probe)
    }

    /// Like [`BreakpointEngine::new`], but a missing element is an error
    /// instead of a disabled engine
    pub fn try_new(
        document: &dyn Document,
        config: NavbarConfig,
    ) -> Result<Rc<Self>, LayoutError> {
        let probe = LayoutProbe::locate(document, &config)?;
        Ok(Self::with_probe(config, Some(probe)))
    }

    fn with_probe(config: NavbarConfig, probe: Option<LayoutProbe>) -> Rc<Self> {
        Rc::new(Self {
            config,
            probe,
            state: Cell::new(None),
            checking: Cell::new(false),
            hooks: RefCell::new(Vec::new()),
            subscriptions: RefCell::new(Vec::new()),
        })
    }

    pub fn is_enabled(&self) -> bool {
        self.probe.is_some()
    }

    /// Result of the last check
    pub fn state(&self) -> Option<BreakpointState> {
        self.state.get()
    }

    pub fn add_hook(&self, hook: Rc<dyn LayoutSettledHook>) {
        self.hooks.borrow_mut().push(hook);
    }

    /// Measure from the expanded baseline and apply the decision
    ///
    /// Returns `None` when the engine is disabled.
    pub fn check(&self) -> Option<BreakpointState> {
        let probe = self.probe.as_ref()?;
        if self.checking.replace(true) {
            trace!("BreakpointEngine::check - re-entrant call skipped");
            return self.state.get();
        }

        let container = probe.container();
        container.remove_class(&self.config.collapsed_class);

        let measurements = probe.measure(self.config.default_gap);
        let state = decide(&measurements, self.config.safety_buffer);
        if state.is_collapsed() {
            container.add_class(&self.config.collapsed_class);
        }

        let previous = self.state.replace(Some(state));
        if previous != Some(state) {
            debug!(
                "BreakpointEngine: {:?} -> {:?} (required {} + buffer {}, available {})",
                previous,
                state,
                measurements.required_width(),
                self.config.safety_buffer,
                measurements.container_width
            );
        }

        let hooks = self.hooks.borrow().clone();
        for hook in hooks {
            hook.layout_settled(state);
        }
        self.checking.set(false);

        Some(state)
    }

    /// Re-check on every size change of the container or its items, and
    /// once after `initial_check_delay_ms`
    ///
    /// Returns the number of observed elements (0 when disabled).
    pub fn attach(
        self: &Rc<Self>,
        observer: &dyn ResizeObserverHost,
        scheduler: &dyn Scheduler,
    ) -> usize {
        let Some(probe) = self.probe.as_ref() else {
            return 0;
        };

        let mut subscriptions = self.subscriptions.borrow_mut();
        for element in probe.observed() {
            let engine = Rc::downgrade(self);
            let on_resize = Rc::new(move || {
                if let Some(engine) = engine.upgrade() {
                    engine.check();
                }
            });
            match observer.observe(element, on_resize) {
                Ok(sub) => subscriptions.push(sub),
                Err(err) => warn!("BreakpointEngine: resize observation failed: {}", err),
            }
        }

        let engine = Rc::downgrade(self);
        scheduler.set_timeout(
            Duration::from_millis(self.config.initial_check_delay_ms),
            Box::new(move || {
                if let Some(engine) = engine.upgrade() {
                    engine.check();
                }
            }),
        );

        subscriptions.len()
    }
}

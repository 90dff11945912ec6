//! Page startup
//!
//! Each component starts on its own. A component that cannot start is
//! logged and left out; the others still run.

use std::fmt::{Display, Formatter};
use std::rc::Rc;

use anyhow::{bail, Context, Result};
use lantern_core::LanternConfig;
use lantern_forms::{ContactEndpoint, ContactFormController};
use lantern_layout::{BreakpointEngine, LayoutSettledHook};
use lantern_theme::{SystemSchemeWatcher, ThemeState};
use tracing::{debug, info, warn};

use crate::host::PageHost;

/// Independently started parts of a page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Component {
    Theme,
    Navbar,
    ContactForm,
}

impl Display for Component {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Theme => "theme manager",
            Self::Navbar => "navbar breakpoint engine",
            Self::ContactForm => "contact form",
        })
    }
}

/// Which components came up
#[derive(Debug, Default)]
pub struct StartupReport {
    pub started: Vec<Component>,
    /// Component and its error chain
    pub failed: Vec<(Component, String)>,
}

impl StartupReport {
    pub fn is_started(&self, component: Component) -> bool {
        self.started.contains(&component)
    }

    fn record<T>(&mut self, component: Component, result: Result<T>) -> Option<T> {
        match result {
            Ok(value) => {
                debug!("{} started", component);
                self.started.push(component);
                Some(value)
            }
            Err(err) => {
                warn!("{} not started: {:#}", component, err);
                self.failed.push((component, format!("{err:#}")));
                None
            }
        }
    }
}

/// A started page; dropping it detaches every listener
pub struct Page<E> {
    theme: Option<Rc<ThemeState>>,
    scheme_watcher: Option<SystemSchemeWatcher>,
    navbar: Option<Rc<BreakpointEngine>>,
    contact_form: Option<Rc<ContactFormController<E>>>,
    report: StartupReport,
}

impl<E: ContactEndpoint + 'static> Page<E> {
    /// Start every component against `host`
    ///
    /// `settled_hooks` run after each navbar check.
    pub fn start(
        host: &PageHost,
        config: &LanternConfig,
        endpoint: E,
        settled_hooks: Vec<Rc<dyn LayoutSettledHook>>,
    ) -> Self {
        let mut report = StartupReport::default();

        let (theme, scheme_watcher) =
            match report.record(Component::Theme, start_theme(host, config)) {
                Some((theme, watcher)) => (Some(theme), Some(watcher)),
                None => (None, None),
            };
        let navbar = report.record(Component::Navbar, start_navbar(host, config, settled_hooks));
        let contact_form = report.record(
            Component::ContactForm,
            start_contact_form(host, config, endpoint),
        );

        info!(
            "page started: {} of 3 components ({} failed)",
            report.started.len(),
            report.failed.len()
        );

        Self {
            theme,
            scheme_watcher,
            navbar,
            contact_form,
            report,
        }
    }

    pub fn theme(&self) -> Option<&Rc<ThemeState>> {
        self.theme.as_ref()
    }

    pub fn navbar(&self) -> Option<&Rc<BreakpointEngine>> {
        self.navbar.as_ref()
    }

    pub fn contact_form(&self) -> Option<&Rc<ContactFormController<E>>> {
        self.contact_form.as_ref()
    }

    pub fn is_following_system_scheme(&self) -> bool {
        self.scheme_watcher
            .as_ref()
            .is_some_and(SystemSchemeWatcher::is_listening)
    }

    pub fn report(&self) -> &StartupReport {
        &self.report
    }
}

fn start_theme(
    host: &PageHost,
    config: &LanternConfig,
) -> Result<(Rc<ThemeState>, SystemSchemeWatcher)> {
    if host.document.root().is_none() {
        bail!("document has no root element");
    }
    let state = ThemeState::new(
        config.theme.clone(),
        host.document.clone(),
        host.store.clone(),
        host.color_scheme.clone(),
    );
    state.load();
    let options = state.bind_options();
    debug!("theme manager: {} option(s) bound", options);
    let watcher = SystemSchemeWatcher::attach(&state);
    Ok((state, watcher))
}

fn start_navbar(
    host: &PageHost,
    config: &LanternConfig,
    settled_hooks: Vec<Rc<dyn LayoutSettledHook>>,
) -> Result<Rc<BreakpointEngine>> {
    let engine = BreakpointEngine::try_new(&*host.document, config.navbar.clone())
        .context("locating navbar elements")?;
    for hook in settled_hooks {
        engine.add_hook(hook);
    }
    let observed = engine.attach(&*host.resize_observer, &*host.scheduler);
    if observed == 0 {
        bail!("no navbar element could be observed for size changes");
    }
    Ok(engine)
}

fn start_contact_form<E: ContactEndpoint + 'static>(
    host: &PageHost,
    config: &LanternConfig,
    endpoint: E,
) -> Result<Rc<ContactFormController<E>>> {
    let controller =
        ContactFormController::new(&*host.document, config.contact.clone(), endpoint)
            .context("locating contact form")?;
    controller
        .bind(host.spawner.clone())
        .context("binding contact form submit")?;
    Ok(controller)
}

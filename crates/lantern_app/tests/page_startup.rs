use std::cell::{Cell, RefCell};
use std::rc::Rc;

use lantern_app::{Component, HeadlessHost, IdleStats, Page};
use lantern_core::memory::{ManualColorScheme, MemoryDocument, MemoryElement};
use lantern_core::{ColorScheme, Element, EventKind, LanternConfig, PreferenceStore};
use lantern_forms::{ContactEndpoint, ContactSubmission, SubmitError};
use lantern_layout::{BreakpointState, LayoutSettledHook};
use pretty_assertions::assert_eq;

#[derive(Clone, Default)]
struct CountingEndpoint {
    calls: Rc<Cell<usize>>,
}

impl ContactEndpoint for CountingEndpoint {
    async fn submit(&self, _submission: &ContactSubmission) -> Result<(), SubmitError> {
        self.calls.set(self.calls.get() + 1);
        Ok(())
    }
}

#[derive(Clone, Copy)]
struct Parts {
    navbar: bool,
    contact_form: bool,
}

const FULL: Parts = Parts {
    navbar: true,
    contact_form: true,
};

/// Navbar items need 100 + 300 + 150 + 2 * 8 = 566px plus the 5px buffer
fn page(parts: Parts) -> Rc<MemoryDocument> {
    let doc = MemoryDocument::new();
    doc.append(MemoryElement::new("link").with_id("highlight-theme"));

    let switcher_parent = if parts.navbar {
        let nav = doc.append(
            MemoryElement::new("nav")
                .with_id("mainNav")
                .with_width(600)
                .with_style("column-gap", "8px"),
        );
        nav.append(MemoryElement::new("a").with_class("navbar-brand").with_width(100));
        nav.append(MemoryElement::new("div").with_id("navbarResponsive"))
            .append(MemoryElement::new("ul").with_class("navbar-nav").with_width(300));
        nav
    } else {
        doc.root_element()
    };
    let switcher = switcher_parent.append(
        MemoryElement::new("button")
            .with_id("theme-switcher")
            .with_width(150),
    );
    switcher.append(MemoryElement::new("i").with_class("bi theme-icon"));
    switcher.append(MemoryElement::new("span").with_class("theme-label"));
    let menu = switcher_parent.append(MemoryElement::new("ul").with_class("dropdown-menu"));
    for id in ["light", "dark", "high-contrast"] {
        menu.append(MemoryElement::new("button").with_attr("data-theme-value", id));
    }

    if parts.contact_form {
        let form = doc.append(MemoryElement::new("form").with_id("contactForm"));
        for name in ["name", "email", "subject", "message"] {
            form.append(MemoryElement::new("input").with_attr("name", name).with_value(""));
        }
        form.append(
            MemoryElement::new("button")
                .with_id("submitButton")
                .with_text("Send"),
        );
        doc.append(
            MemoryElement::new("div")
                .with_id("submitStatus")
                .with_class("d-none"),
        );
    }
    doc
}

fn start(host: &HeadlessHost) -> (Page<CountingEndpoint>, CountingEndpoint) {
    let endpoint = CountingEndpoint::default();
    let page = Page::start(
        &host.page_host(),
        &LanternConfig::default(),
        endpoint.clone(),
        Vec::new(),
    );
    (page, endpoint)
}

#[test]
fn full_page_starts_every_component() {
    let host = HeadlessHost::new(page(FULL), ColorScheme::Dark);
    let (page, _) = start(&host);

    assert_eq!(
        page.report().started,
        vec![Component::Theme, Component::Navbar, Component::ContactForm]
    );
    assert!(page.report().failed.is_empty());
    assert!(page.is_following_system_scheme());
    assert_eq!(
        host.document.root_element().attribute("data-bs-theme").as_deref(),
        Some("dark")
    );

    // The first breakpoint check waits for the initial delay
    assert_eq!(page.navbar().unwrap().state(), None);
    let stats = host.run_until_idle().unwrap();
    assert_eq!(stats.timers, 1);
    assert_eq!(page.navbar().unwrap().state(), Some(BreakpointState::Expanded));
}

#[test]
fn missing_navbar_leaves_other_components_running() {
    let host = HeadlessHost::new(
        page(Parts {
            navbar: false,
            ..FULL
        }),
        ColorScheme::Light,
    );
    let (page, _) = start(&host);

    let report = page.report();
    assert!(report.is_started(Component::Theme));
    assert!(report.is_started(Component::ContactForm));
    assert!(!report.is_started(Component::Navbar));
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].0, Component::Navbar);
    assert!(report.failed[0].1.starts_with("locating navbar elements: navbar"));
    assert!(report.failed[0].1.contains("not found"));
    assert!(page.navbar().is_none());
    assert_eq!(host.run_until_idle().unwrap(), IdleStats::default());
}

#[test]
fn missing_contact_form_leaves_other_components_running() {
    let host = HeadlessHost::new(
        page(Parts {
            contact_form: false,
            ..FULL
        }),
        ColorScheme::Light,
    );
    let (page, _) = start(&host);

    assert_eq!(
        page.report().started,
        vec![Component::Theme, Component::Navbar]
    );
    assert_eq!(page.report().failed[0].0, Component::ContactForm);
    assert!(page.contact_form().is_none());
}

#[test]
fn unavailable_system_signal_still_starts_the_theme() {
    let host = HeadlessHost::with_color_scheme(page(FULL), ManualColorScheme::unavailable());
    let (page, _) = start(&host);

    assert!(page.report().is_started(Component::Theme));
    assert!(!page.is_following_system_scheme());
    assert_eq!(
        host.document.root_element().attribute("data-bs-theme").as_deref(),
        Some("light")
    );
}

#[test]
fn settled_hooks_follow_every_check() {
    let host = HeadlessHost::new(page(FULL), ColorScheme::Light);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let record = seen.clone();
    let hook: Rc<dyn LayoutSettledHook> =
        Rc::new(move |state: BreakpointState| record.borrow_mut().push(state));
    let page = Page::start(
        &host.page_host(),
        &LanternConfig::default(),
        CountingEndpoint::default(),
        vec![hook],
    );

    host.run_until_idle().unwrap();
    assert_eq!(*seen.borrow(), vec![BreakpointState::Expanded]);

    host.document.find("#mainNav").unwrap().set_width(560);
    host.resize_observer.notify_all();
    assert_eq!(seen.borrow().last(), Some(&BreakpointState::Collapsed));
    assert_eq!(page.navbar().unwrap().state(), Some(BreakpointState::Collapsed));
    assert!(host
        .document
        .find("#mainNav")
        .unwrap()
        .has_class("navbar-collapsed"));
}

#[test]
fn explicit_theme_choice_survives_system_changes() {
    let host = HeadlessHost::new(page(FULL), ColorScheme::Light);
    let (page, _) = start(&host);

    host.document
        .find("[data-theme-value=\"high-contrast\"]")
        .unwrap()
        .dispatch(EventKind::Click);
    assert_eq!(host.store.get("theme").as_deref(), Some("high-contrast"));

    host.color_scheme.change(ColorScheme::Dark);
    assert_eq!(
        host.document.root_element().attribute("data-bs-theme").as_deref(),
        Some("high-contrast")
    );
    assert_eq!(
        page.theme().unwrap().current().id(),
        "high-contrast"
    );
}

#[test]
fn contact_submission_runs_on_the_headless_runtime() {
    let host = HeadlessHost::new(page(FULL), ColorScheme::Light);
    let (_page, endpoint) = start(&host);
    host.run_until_idle().unwrap();

    for (name, value) in [
        ("name", "Ada"),
        ("email", "ada@example.org"),
        ("subject", "Hi"),
        ("message", "Hello there"),
    ] {
        host.document
            .find(&format!("[name=\"{name}\"]"))
            .unwrap()
            .set_value(value);
    }
    host.document
        .find("#contactForm")
        .unwrap()
        .dispatch(EventKind::Submit);

    let stats = host.run_until_idle().unwrap();
    assert_eq!(stats.tasks, 1);
    assert_eq!(endpoint.calls.get(), 1);
    assert!(host
        .document
        .find("#submitStatus")
        .unwrap()
        .has_class("alert-success"));
}

#[test]
fn dropping_the_page_detaches_everything() {
    let host = HeadlessHost::new(page(FULL), ColorScheme::Light);
    let (page, _) = start(&host);
    assert_eq!(host.color_scheme.subscriber_count(), 1);
    assert_eq!(host.resize_observer.observed_count(), 4);

    drop(page);
    assert_eq!(host.color_scheme.subscriber_count(), 0);
    assert_eq!(host.resize_observer.observed_count(), 0);
    assert_eq!(host.document.find("#contactForm").unwrap().listener_count(), 0);
    for option in host.document.find_all("[data-theme-value]") {
        assert_eq!(option.listener_count(), 0);
    }
    // The delayed initial check finds nothing left to run
    assert_eq!(host.run_until_idle().unwrap().timers, 1);
}

use std::rc::Rc;

use lantern_core::memory::{ManualColorScheme, MemoryDocument, MemoryElement, MemoryStore};
use lantern_core::{ColorScheme, Element, EventKind, PreferenceStore, ThemeConfig};
use lantern_theme::{SystemSchemeWatcher, ThemeState, ThemeVariant};
use pretty_assertions::assert_eq;

/// A page with every element the applier writes to
fn themed_page() -> Rc<MemoryDocument> {
    let doc = MemoryDocument::new();
    doc.append(
        MemoryElement::new("link")
            .with_id("highlight-theme")
            .with_attr("href", "/assets/css/highlight-light.css"),
    );
    doc.append(MemoryElement::new("img").with_id("hero-illustration"));
    let switcher = doc.append(
        MemoryElement::new("button")
            .with_id("theme-switcher")
            .with_class("dropdown-toggle"),
    );
    switcher.append(MemoryElement::new("i").with_class("bi theme-icon"));
    switcher.append(MemoryElement::new("span").with_class("theme-label"));
    let menu = doc.append(MemoryElement::new("ul").with_class("dropdown-menu"));
    for variant in ThemeVariant::all() {
        menu.append(
            MemoryElement::new("button")
                .with_class("dropdown-item")
                .with_attr("data-theme-value", variant.id()),
        );
    }
    doc
}

fn snapshot(doc: &MemoryDocument) -> Vec<Option<String>> {
    let mut out = vec![
        doc.root_element().attribute("data-bs-theme"),
        doc.find("#highlight-theme").unwrap().attribute("href"),
        doc.find("#hero-illustration").unwrap().attribute("src"),
        doc.find("#theme-switcher").unwrap().attribute("aria-label"),
        doc.find(".theme-icon").unwrap().attribute("class"),
        Some(doc.find(".theme-label").unwrap().text()),
    ];
    for option in doc.find_all("[data-theme-value]") {
        out.push(option.attribute("class"));
        out.push(option.attribute("aria-pressed"));
    }
    out
}

#[test]
fn every_variant_survives_a_reload() {
    for variant in ThemeVariant::all() {
        let store = MemoryStore::new();
        let scheme = ManualColorScheme::new(ColorScheme::Light);

        let first = ThemeState::new(
            ThemeConfig::default(),
            themed_page(),
            store.clone(),
            scheme.clone(),
        );
        first.load();
        assert!(first.set_theme(variant.id()));

        let reloaded = ThemeState::new(ThemeConfig::default(), themed_page(), store, scheme);
        assert_eq!(reloaded.load(), *variant);
    }
}

#[test]
fn unknown_theme_leaves_state_unchanged() {
    let store = MemoryStore::new();
    let doc = themed_page();
    let state = ThemeState::new(
        ThemeConfig::default(),
        doc.clone(),
        store.clone(),
        ManualColorScheme::new(ColorScheme::Light),
    );
    state.load();
    assert!(state.set_theme("dark"));
    let before = snapshot(&doc);

    for bogus in ["sepia", "", "DARK", "high_contrast", " light", "light\n"] {
        assert!(!state.set_theme(bogus), "accepted {bogus:?}");
    }

    assert_eq!(state.current(), ThemeVariant::Dark);
    assert_eq!(snapshot(&doc), before);
    assert_eq!(store.write_count(), 1);
}

#[test]
fn system_signal_decides_when_nothing_is_persisted() {
    let dark = ThemeState::new(
        ThemeConfig::default(),
        themed_page(),
        MemoryStore::new(),
        ManualColorScheme::new(ColorScheme::Dark),
    );
    assert_eq!(dark.load(), ThemeVariant::Dark);

    let unavailable = ThemeState::new(
        ThemeConfig::default(),
        themed_page(),
        MemoryStore::new(),
        ManualColorScheme::unavailable(),
    );
    assert_eq!(unavailable.load(), ThemeVariant::Light);
}

#[test]
fn apply_current_is_idempotent() {
    let doc = themed_page();
    let state = ThemeState::new(
        ThemeConfig::default(),
        doc.clone(),
        MemoryStore::new(),
        ManualColorScheme::new(ColorScheme::Dark),
    );
    state.load();
    let once = snapshot(&doc);
    state.apply_current();
    state.apply_current();
    assert_eq!(snapshot(&doc), once);
}

#[test]
fn applier_writes_every_target() {
    let doc = themed_page();
    let state = ThemeState::new(
        ThemeConfig::default(),
        doc.clone(),
        MemoryStore::new(),
        ManualColorScheme::new(ColorScheme::Light),
    );
    state.load();
    state.select(ThemeVariant::HighContrast);

    assert_eq!(
        doc.root_element().attribute("data-bs-theme").as_deref(),
        Some("high-contrast")
    );
    assert_eq!(
        doc.find("#highlight-theme").unwrap().attribute("href").as_deref(),
        Some("/assets/css/highlight-high-contrast.css")
    );
    assert_eq!(
        doc.find("#hero-illustration").unwrap().attribute("src").as_deref(),
        Some("/assets/img/hero-high-contrast.svg")
    );
    assert_eq!(
        doc.find("#theme-switcher").unwrap().attribute("aria-label").as_deref(),
        Some("Switch theme (current: High contrast)")
    );
    let icon = doc.find(".theme-icon").unwrap();
    assert!(icon.has_class("bi-circle-half"));
    assert!(!icon.has_class("bi-sun-fill"));
    assert_eq!(doc.find(".theme-label").unwrap().text(), "High contrast");

    let selected = doc.find("[data-theme-value=\"high-contrast\"]").unwrap();
    let other = doc.find("[data-theme-value=\"light\"]").unwrap();
    assert!(selected.has_class("active"));
    assert_eq!(selected.attribute("aria-pressed").as_deref(), Some("true"));
    assert!(!other.has_class("active"));
    assert_eq!(other.attribute("aria-pressed").as_deref(), Some("false"));
}

#[test]
fn explicit_choice_beats_later_system_change() {
    let scheme = ManualColorScheme::new(ColorScheme::Light);
    let state = ThemeState::new(
        ThemeConfig::default(),
        themed_page(),
        MemoryStore::new(),
        scheme.clone(),
    );
    state.load();
    let watcher = SystemSchemeWatcher::attach(&state);
    assert!(watcher.is_listening());

    state.select(ThemeVariant::HighContrast);
    scheme.change(ColorScheme::Dark);
    assert_eq!(state.current(), ThemeVariant::HighContrast);
}

#[test]
fn system_change_applies_without_explicit_choice() {
    let scheme = ManualColorScheme::new(ColorScheme::Light);
    let doc = themed_page();
    let store = MemoryStore::new();
    let state = ThemeState::new(ThemeConfig::default(), doc.clone(), store.clone(), scheme.clone());
    state.load();
    let _watcher = SystemSchemeWatcher::attach(&state);

    scheme.change(ColorScheme::Dark);
    assert_eq!(state.current(), ThemeVariant::Dark);
    assert_eq!(
        doc.root_element().attribute("data-bs-theme").as_deref(),
        Some("dark")
    );
    assert_eq!(store.get("theme"), None);
}

#[test]
fn unavailable_signal_never_subscribes() {
    let scheme = ManualColorScheme::unavailable();
    let state = ThemeState::new(
        ThemeConfig::default(),
        themed_page(),
        MemoryStore::new(),
        scheme.clone(),
    );
    state.load();
    let watcher = SystemSchemeWatcher::attach(&state);
    assert!(!watcher.is_listening());
    assert_eq!(scheme.subscriber_count(), 0);
}

#[test]
fn dropping_the_watcher_stops_following_the_system() {
    let scheme = ManualColorScheme::new(ColorScheme::Light);
    let state = ThemeState::new(
        ThemeConfig::default(),
        themed_page(),
        MemoryStore::new(),
        scheme.clone(),
    );
    state.load();
    drop(SystemSchemeWatcher::attach(&state));
    scheme.change(ColorScheme::Dark);
    assert_eq!(state.current(), ThemeVariant::Light);
}

#[test]
fn option_clicks_select_and_persist() {
    let doc = themed_page();
    let store = MemoryStore::new();
    let state = ThemeState::new(
        ThemeConfig::default(),
        doc.clone(),
        store.clone(),
        ManualColorScheme::new(ColorScheme::Light),
    );
    state.load();
    assert_eq!(state.bind_options(), 3);

    doc.find("[data-theme-value=\"dark\"]")
        .unwrap()
        .dispatch(EventKind::Click);
    assert_eq!(state.current(), ThemeVariant::Dark);
    assert_eq!(store.get("theme").as_deref(), Some("dark"));
}

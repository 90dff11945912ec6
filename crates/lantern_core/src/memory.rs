//! In-memory host
//!
//! A small element tree with attributes, classes, form values, fixed or
//! computed widths and a CSS selector subset (`tag`, `#id`, `.class`,
//! `[attr]`, `[attr="value"]`, descendant combinator, `,` groups). Paired
//! with manually driven storage, color-scheme, resize and timer hosts it
//! runs every controller headless.
//!
//! ```ignore
//! let doc = MemoryDocument::new();
//! let nav = doc.append(MemoryElement::new("nav").with_id("mainNav").with_width(600));
//! assert!(doc.query("#mainNav").is_some());
//! ```

use std::any::Any;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::error::{HostError, Result};
use crate::host::{
    Callback, ColorSchemeSource, Document, Element, ElementRef, EventKind, LocalTask,
    PreferenceStore, ResizeObserverHost, Scheduler, Subscription, TaskSpawner,
};
use crate::scheme::ColorScheme;

// ========== Elements ==========

enum Width {
    Fixed(u32),
    Computed(Rc<dyn Fn() -> u32>),
}

struct Listener {
    id: u64,
    event: EventKind,
    handler: Callback,
}

/// In-memory element
pub struct MemoryElement {
    tag: String,
    attributes: RefCell<FxHashMap<String, String>>,
    classes: RefCell<Vec<String>>,
    text: RefCell<String>,
    value: RefCell<Option<String>>,
    disabled: Cell<bool>,
    width: RefCell<Width>,
    styles: RefCell<FxHashMap<String, String>>,
    parent: RefCell<Weak<MemoryElement>>,
    children: RefCell<Vec<Rc<MemoryElement>>>,
    listeners: Rc<RefCell<Vec<Listener>>>,
    next_listener: Cell<u64>,
    mutations: Cell<u64>,
}

impl MemoryElement {
    pub fn new(tag: &str) -> Rc<Self> {
        Rc::new(Self {
            tag: tag.to_ascii_lowercase(),
            attributes: RefCell::new(FxHashMap::default()),
            classes: RefCell::new(Vec::new()),
            text: RefCell::new(String::new()),
            value: RefCell::new(None),
            disabled: Cell::new(false),
            width: RefCell::new(Width::Fixed(0)),
            styles: RefCell::new(FxHashMap::default()),
            parent: RefCell::new(Weak::new()),
            children: RefCell::new(Vec::new()),
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_listener: Cell::new(0),
            mutations: Cell::new(0),
        })
    }

    // ========== Builders ==========

    pub fn with_id(self: Rc<Self>, id: &str) -> Rc<Self> {
        self.attributes
            .borrow_mut()
            .insert("id".to_string(), id.to_string());
        self
    }

    pub fn with_class(self: Rc<Self>, class: &str) -> Rc<Self> {
        for name in class.split_whitespace() {
            self.classes.borrow_mut().push(name.to_string());
        }
        self
    }

    pub fn with_attr(self: Rc<Self>, name: &str, value: &str) -> Rc<Self> {
        if name == "class" {
            return self.with_class(value);
        }
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_text(self: Rc<Self>, text: &str) -> Rc<Self> {
        *self.text.borrow_mut() = text.to_string();
        self
    }

    /// Make this element a form control holding `value`
    pub fn with_value(self: Rc<Self>, value: &str) -> Rc<Self> {
        *self.value.borrow_mut() = Some(value.to_string());
        self
    }

    pub fn with_width(self: Rc<Self>, width: u32) -> Rc<Self> {
        *self.width.borrow_mut() = Width::Fixed(width);
        self
    }

    pub fn with_style(self: Rc<Self>, property: &str, value: &str) -> Rc<Self> {
        self.styles
            .borrow_mut()
            .insert(property.to_string(), value.to_string());
        self
    }

    pub fn with_child(self: Rc<Self>, child: Rc<MemoryElement>) -> Rc<Self> {
        self.append(child);
        self
    }

    // ========== Tree ==========

    /// Append `child` and return it
    pub fn append(self: &Rc<Self>, child: Rc<MemoryElement>) -> Rc<MemoryElement> {
        *child.parent.borrow_mut() = Rc::downgrade(self);
        self.children.borrow_mut().push(child.clone());
        child
    }

    pub fn parent(&self) -> Option<Rc<MemoryElement>> {
        self.parent.borrow().upgrade()
    }

    /// Preorder list of descendants, excluding `self`
    fn descendants(&self) -> Vec<Rc<MemoryElement>> {
        let mut out = Vec::new();
        let mut stack: Vec<Rc<MemoryElement>> =
            self.children.borrow().iter().rev().cloned().collect();
        while let Some(node) = stack.pop() {
            stack.extend(node.children.borrow().iter().rev().cloned());
            out.push(node);
        }
        out
    }

    // ========== Layout ==========

    pub fn set_width(&self, width: u32) {
        *self.width.borrow_mut() = Width::Fixed(width);
    }

    /// Compute the width at measurement time, e.g. depending on another
    /// element's classes
    pub fn set_width_fn(&self, width: impl Fn() -> u32 + 'static) {
        *self.width.borrow_mut() = Width::Computed(Rc::new(width));
    }

    pub fn set_style(&self, property: &str, value: &str) {
        self.styles
            .borrow_mut()
            .insert(property.to_string(), value.to_string());
    }

    // ========== Events ==========

    /// Invoke every handler registered for `event`
    pub fn dispatch(&self, event: EventKind) {
        let handlers: Vec<Callback> = self
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.event == event)
            .map(|l| l.handler.clone())
            .collect();
        for handler in handlers {
            handler();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Number of state-changing mutations applied through [`Element`]
    pub fn mutation_count(&self) -> u64 {
        self.mutations.get()
    }

    fn mutated(&self) {
        self.mutations.set(self.mutations.get() + 1);
    }

    fn matches(&self, compound: &Compound) -> bool {
        if let Some(tag) = &compound.tag {
            if *tag != self.tag {
                return false;
            }
        }
        if let Some(id) = &compound.id {
            if self.attributes.borrow().get("id") != Some(id) {
                return false;
            }
        }
        if !compound.classes.iter().all(|c| self.has_class(c)) {
            return false;
        }
        compound.attributes.iter().all(|(name, expected)| {
            match (Element::attribute(self, name), expected) {
                (Some(actual), Some(expected)) => actual == *expected,
                (Some(_), None) => true,
                (None, _) => false,
            }
        })
    }

    fn matches_selector(&self, selector: &[Compound]) -> bool {
        let Some((last, ancestors)) = selector.split_last() else {
            return false;
        };
        if !self.matches(last) {
            return false;
        }

        let mut pending = ancestors.iter().rev().peekable();
        let mut cursor = self.parent();
        while let (Some(compound), Some(node)) = (pending.peek(), cursor) {
            if node.matches(compound) {
                pending.next();
            }
            cursor = node.parent();
        }
        pending.peek().is_none()
    }
}

impl Element for MemoryElement {
    fn attribute(&self, name: &str) -> Option<String> {
        if name == "class" {
            let classes = self.classes.borrow();
            return (!classes.is_empty()).then(|| classes.join(" "));
        }
        self.attributes.borrow().get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        if name == "class" {
            let next: Vec<String> = value.split_whitespace().map(str::to_string).collect();
            if *self.classes.borrow() != next {
                *self.classes.borrow_mut() = next;
                self.mutated();
            }
            return;
        }
        let previous = self
            .attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
        if previous.as_deref() != Some(value) {
            self.mutated();
        }
    }

    fn remove_attribute(&self, name: &str) {
        if name == "class" {
            if !self.classes.borrow().is_empty() {
                self.classes.borrow_mut().clear();
                self.mutated();
            }
            return;
        }
        if self.attributes.borrow_mut().remove(name).is_some() {
            self.mutated();
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().iter().any(|c| c == class)
    }

    fn add_class(&self, class: &str) {
        if !self.has_class(class) {
            self.classes.borrow_mut().push(class.to_string());
            self.mutated();
        }
    }

    fn remove_class(&self, class: &str) {
        let mut classes = self.classes.borrow_mut();
        let before = classes.len();
        classes.retain(|c| c != class);
        if classes.len() != before {
            drop(classes);
            self.mutated();
        }
    }

    fn text(&self) -> String {
        self.text.borrow().clone()
    }

    fn set_text(&self, text: &str) {
        if *self.text.borrow() != text {
            *self.text.borrow_mut() = text.to_string();
            self.mutated();
        }
    }

    fn value(&self) -> Option<String> {
        self.value.borrow().clone()
    }

    fn set_value(&self, value: &str) {
        if self.value.borrow().as_deref() != Some(value) {
            *self.value.borrow_mut() = Some(value.to_string());
            self.mutated();
        }
    }

    fn is_disabled(&self) -> bool {
        self.disabled.get()
    }

    fn set_disabled(&self, disabled: bool) {
        if self.disabled.replace(disabled) != disabled {
            self.mutated();
        }
    }

    fn offset_width(&self) -> u32 {
        let width = match &*self.width.borrow() {
            Width::Fixed(width) => return *width,
            Width::Computed(f) => f.clone(),
        };
        width()
    }

    fn computed_style(&self, property: &str) -> Option<String> {
        self.styles.borrow().get(property).cloned()
    }

    fn query(&self, selector: &str) -> Option<ElementRef> {
        let groups = parse_selector(selector);
        self.descendants()
            .into_iter()
            .find(|node| groups.iter().any(|g| node.matches_selector(g)))
            .map(|node| node as ElementRef)
    }

    fn query_all(&self, selector: &str) -> Vec<ElementRef> {
        let groups = parse_selector(selector);
        self.descendants()
            .into_iter()
            .filter(|node| groups.iter().any(|g| node.matches_selector(g)))
            .map(|node| node as ElementRef)
            .collect()
    }

    fn listen(&self, event: EventKind, handler: Callback) -> Result<Subscription> {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().push(Listener { id, event, handler });

        let listeners = Rc::downgrade(&self.listeners);
        Ok(Subscription::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners.borrow_mut().retain(|l| l.id != id);
            }
        }))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

// ========== Selectors ==========

#[derive(Debug, Default, PartialEq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, Option<String>)>,
}

/// Parse `a b, c` into groups of descendant-combined compounds
fn parse_selector(selector: &str) -> Vec<Vec<Compound>> {
    selector
        .split(',')
        .map(|group| group.split_whitespace().map(parse_compound).collect::<Vec<_>>())
        .filter(|group| !group.is_empty())
        .collect()
}

fn parse_compound(src: &str) -> Compound {
    fn is_ident(c: char) -> bool {
        c.is_ascii_alphanumeric() || c == '-' || c == '_'
    }

    let mut compound = Compound::default();
    let mut rest = src;

    let tag_len = rest.find(|c: char| !is_ident(c)).unwrap_or(rest.len());
    if tag_len > 0 {
        compound.tag = Some(rest[..tag_len].to_ascii_lowercase());
    }
    rest = &rest[tag_len..];

    while let Some(marker) = rest.chars().next() {
        rest = &rest[marker.len_utf8()..];
        match marker {
            '#' | '.' => {
                let len = rest.find(|c: char| !is_ident(c)).unwrap_or(rest.len());
                let ident = rest[..len].to_string();
                rest = &rest[len..];
                if marker == '#' {
                    compound.id = Some(ident);
                } else {
                    compound.classes.push(ident);
                }
            }
            '[' => {
                let end = rest.find(']').unwrap_or(rest.len());
                let body = &rest[..end];
                rest = rest.get(end + 1..).unwrap_or("");
                match body.split_once('=') {
                    Some((name, value)) => compound.attributes.push((
                        name.trim().to_string(),
                        Some(value.trim().trim_matches(|c: char| c == '"' || c == '\'').to_string()),
                    )),
                    None => compound.attributes.push((body.trim().to_string(), None)),
                }
            }
            // Unsupported syntax never matches
            _ => {
                compound.tag = Some(String::from("\0"));
                break;
            }
        }
    }

    compound
}

// ========== Document ==========

/// In-memory document rooted at an `<html>` element
pub struct MemoryDocument {
    root: Rc<MemoryElement>,
}

impl MemoryDocument {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            root: MemoryElement::new("html"),
        })
    }

    pub fn root_element(&self) -> Rc<MemoryElement> {
        self.root.clone()
    }

    /// Append `child` under the root and return it
    pub fn append(&self, child: Rc<MemoryElement>) -> Rc<MemoryElement> {
        self.root.append(child)
    }

    /// Typed lookup for tests and headless drivers
    pub fn find(&self, selector: &str) -> Option<Rc<MemoryElement>> {
        let groups = parse_selector(selector);
        std::iter::once(self.root.clone())
            .chain(self.root.descendants())
            .find(|node| groups.iter().any(|g| node.matches_selector(g)))
    }

    /// Typed lookup of every match, in document order
    pub fn find_all(&self, selector: &str) -> Vec<Rc<MemoryElement>> {
        let groups = parse_selector(selector);
        std::iter::once(self.root.clone())
            .chain(self.root.descendants())
            .filter(|node| groups.iter().any(|g| node.matches_selector(g)))
            .collect()
    }
}

impl Document for MemoryDocument {
    fn root(&self) -> Option<ElementRef> {
        Some(self.root.clone() as ElementRef)
    }

    fn query(&self, selector: &str) -> Option<ElementRef> {
        self.find(selector).map(|node| node as ElementRef)
    }

    fn query_all(&self, selector: &str) -> Vec<ElementRef> {
        self.find_all(selector)
            .into_iter()
            .map(|node| node as ElementRef)
            .collect()
    }
}

// ========== Storage ==========

/// In-memory preference store counting writes
#[derive(Default)]
pub struct MemoryStore {
    entries: RefCell<FxHashMap<String, String>>,
    writes: Cell<usize>,
    fail_writes: Cell<bool>,
}

impl MemoryStore {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn with_entry(key: &str, value: &str) -> Rc<Self> {
        let store = Self::default();
        store
            .entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Rc::new(store)
    }

    pub fn write_count(&self) -> usize {
        self.writes.get()
    }

    /// Make every later `set` fail, like a full or blocked storage area
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

impl PreferenceStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes.get() {
            debug!("MemoryStore: rejecting write of {:?}", key);
            return Err(HostError::Storage(format!("write of {key:?} rejected")));
        }
        self.writes.set(self.writes.get() + 1);
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ========== Color scheme ==========

type SchemeSubscribers = Rc<RefCell<Vec<(u64, Rc<dyn Fn(ColorScheme)>)>>>;

/// Manually driven color-scheme signal
pub struct ManualColorScheme {
    available: bool,
    current: Cell<Option<ColorScheme>>,
    subscribers: SchemeSubscribers,
    next_id: Cell<u64>,
}

impl ManualColorScheme {
    pub fn new(scheme: ColorScheme) -> Rc<Self> {
        Rc::new(Self {
            available: true,
            current: Cell::new(Some(scheme)),
            subscribers: Rc::new(RefCell::new(Vec::new())),
            next_id: Cell::new(0),
        })
    }

    /// A host without any color-scheme signal
    pub fn unavailable() -> Rc<Self> {
        Rc::new(Self {
            available: false,
            current: Cell::new(None),
            subscribers: Rc::new(RefCell::new(Vec::new())),
            next_id: Cell::new(0),
        })
    }

    /// Change the system preference and notify subscribers
    pub fn change(&self, scheme: ColorScheme) {
        if !self.available {
            return;
        }
        self.current.set(Some(scheme));
        let subscribers: Vec<_> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, cb)| cb.clone())
            .collect();
        for cb in subscribers {
            cb(scheme);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }
}

impl ColorSchemeSource for ManualColorScheme {
    fn current(&self) -> Option<ColorScheme> {
        self.current.get()
    }

    fn subscribe(&self, on_change: Rc<dyn Fn(ColorScheme)>) -> Result<Subscription> {
        if !self.available {
            return Err(HostError::Unavailable("prefers-color-scheme".to_string()));
        }
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.subscribers.borrow_mut().push((id, on_change));

        let subscribers = Rc::downgrade(&self.subscribers);
        Ok(Subscription::new(move || {
            if let Some(subscribers) = subscribers.upgrade() {
                subscribers.borrow_mut().retain(|(sid, _)| *sid != id);
            }
        }))
    }
}

// ========== Resize observation ==========

type Observations = Rc<RefCell<Vec<(u64, ElementRef, Callback)>>>;

/// Resize observer whose notifications are fired by hand
#[derive(Default)]
pub struct ManualResizeObserver {
    observations: Observations,
    next_id: Cell<u64>,
}

impl ManualResizeObserver {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Fire every registered callback once
    pub fn notify_all(&self) {
        let callbacks: Vec<Callback> = self
            .observations
            .borrow()
            .iter()
            .map(|(_, _, cb)| cb.clone())
            .collect();
        for cb in callbacks {
            cb();
        }
    }

    /// Fire the callbacks registered for `element`
    pub fn notify(&self, element: &ElementRef) {
        let target = Rc::as_ptr(element) as *const ();
        let callbacks: Vec<Callback> = self
            .observations
            .borrow()
            .iter()
            .filter(|(_, observed, _)| Rc::as_ptr(observed) as *const () == target)
            .map(|(_, _, cb)| cb.clone())
            .collect();
        for cb in callbacks {
            cb();
        }
    }

    pub fn observed_count(&self) -> usize {
        self.observations.borrow().len()
    }
}

impl ResizeObserverHost for ManualResizeObserver {
    fn observe(&self, element: &ElementRef, on_resize: Callback) -> Result<Subscription> {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.observations
            .borrow_mut()
            .push((id, element.clone(), on_resize));

        let observations = Rc::downgrade(&self.observations);
        Ok(Subscription::new(move || {
            if let Some(observations) = observations.upgrade() {
                observations.borrow_mut().retain(|(oid, _, _)| *oid != id);
            }
        }))
    }
}

// ========== Timers ==========

/// Scheduler that queues tasks until [`ManualScheduler::run_pending`]
#[derive(Default)]
pub struct ManualScheduler {
    tasks: RefCell<Vec<(Duration, Box<dyn FnOnce()>)>>,
}

impl ManualScheduler {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Delays of the queued tasks, in scheduling order
    pub fn pending_delays(&self) -> Vec<Duration> {
        self.tasks.borrow().iter().map(|(delay, _)| *delay).collect()
    }

    /// Run every queued task; returns how many ran
    pub fn run_pending(&self) -> usize {
        let tasks = std::mem::take(&mut *self.tasks.borrow_mut());
        let count = tasks.len();
        for (_, task) in tasks {
            task();
        }
        count
    }
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&self, delay: Duration, task: Box<dyn FnOnce()>) {
        self.tasks.borrow_mut().push((delay, task));
    }
}

// ========== Tasks ==========

/// Spawner that queues tasks for the caller to drive, e.g. with
/// `pollster::block_on`
#[derive(Default)]
pub struct QueuedSpawner {
    tasks: RefCell<Vec<LocalTask>>,
}

impl QueuedSpawner {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Take every queued task, oldest first
    pub fn take(&self) -> Vec<LocalTask> {
        std::mem::take(&mut *self.tasks.borrow_mut())
    }
}

impl TaskSpawner for QueuedSpawner {
    fn spawn_local(&self, task: LocalTask) {
        self.tasks.borrow_mut().push(task);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample_document() -> Rc<MemoryDocument> {
        let doc = MemoryDocument::new();
        let nav = doc.append(MemoryElement::new("nav").with_id("mainNav"));
        nav.append(MemoryElement::new("a").with_class("navbar-brand").with_text("Home"));
        let menu = nav.append(MemoryElement::new("div").with_id("navbarResponsive"));
        menu.append(MemoryElement::new("ul").with_class("navbar-nav ms-auto"));
        doc.append(MemoryElement::new("ul").with_class("navbar-nav"));
        doc.append(
            MemoryElement::new("button")
                .with_attr("data-theme-value", "dark")
                .with_class("dropdown-item"),
        );
        doc
    }

    #[test]
    fn test_parse_compound_selector() {
        let parsed = parse_compound("button#go.primary.big[data-x=\"1\"][hidden]");
        assert_eq!(
            parsed,
            Compound {
                tag: Some("button".to_string()),
                id: Some("go".to_string()),
                classes: vec!["primary".to_string(), "big".to_string()],
                attributes: vec![
                    ("data-x".to_string(), Some("1".to_string())),
                    ("hidden".to_string(), None),
                ],
            }
        );
    }

    #[test]
    fn test_query_by_id_class_and_attribute() {
        let doc = sample_document();
        assert!(doc.query("#mainNav").is_some());
        assert_eq!(doc.query(".navbar-brand").unwrap().text(), "Home");
        assert_eq!(doc.query_all(".navbar-nav").len(), 2);
        assert_eq!(doc.query_all("[data-theme-value]").len(), 1);
        assert_eq!(doc.query_all("[data-theme-value=\"light\"]").len(), 0);
        assert!(doc.query("html").is_some());
        assert!(doc.query("#missing").is_none());
    }

    #[test]
    fn test_descendant_combinator_scopes_match() {
        let doc = sample_document();
        let scoped = doc.query_all("#navbarResponsive .navbar-nav");
        assert_eq!(scoped.len(), 1);
        assert!(scoped[0].has_class("ms-auto"));
        assert_eq!(doc.query_all("#mainNav .navbar-nav, button").len(), 2);
    }

    #[test]
    fn test_mutation_count_ignores_no_ops() {
        let el = MemoryElement::new("div").with_class("a");
        el.add_class("a");
        el.remove_class("b");
        assert_eq!(el.mutation_count(), 0);
        el.add_class("b");
        el.set_attribute("title", "x");
        el.set_attribute("title", "x");
        assert_eq!(el.mutation_count(), 2);
        assert_eq!(el.attribute("class").as_deref(), Some("a b"));
    }

    #[test]
    fn test_computed_width_reads_current_state() {
        let container = MemoryElement::new("nav");
        let probe = container.clone();
        let item = MemoryElement::new("ul");
        item.set_width_fn(move || if probe.has_class("collapsed") { 0 } else { 300 });
        assert_eq!(item.offset_width(), 300);
        container.add_class("collapsed");
        assert_eq!(item.offset_width(), 0);
    }

    #[test]
    fn test_listener_detaches_on_drop() {
        let el = MemoryElement::new("button");
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let sub = el
            .listen(EventKind::Click, Rc::new(move || counter.set(counter.get() + 1)))
            .unwrap();
        el.dispatch(EventKind::Click);
        el.dispatch(EventKind::Submit);
        assert_eq!(hits.get(), 1);
        drop(sub);
        el.dispatch(EventKind::Click);
        assert_eq!(hits.get(), 1);
        assert_eq!(el.listener_count(), 0);
    }

    #[test]
    fn test_unavailable_scheme_refuses_subscription() {
        let source = ManualColorScheme::unavailable();
        assert_eq!(source.current(), None);
        assert!(matches!(
            source.subscribe(Rc::new(|_| {})),
            Err(HostError::Unavailable(_))
        ));
    }

    #[test]
    fn test_store_rejects_writes_when_failing() {
        let store = MemoryStore::with_entry("theme", "dark");
        store.fail_writes(true);
        assert!(matches!(
            store.set("theme", "light"),
            Err(HostError::Storage(_))
        ));
        assert_eq!(store.get("theme").as_deref(), Some("dark"));
        assert_eq!(store.write_count(), 0);

        store.fail_writes(false);
        store.set("theme", "light").unwrap();
        assert_eq!(store.get("theme").as_deref(), Some("light"));
        assert_eq!(store.write_count(), 1);
    }

    #[test]
    fn test_scheduler_runs_tasks_once() {
        let scheduler = ManualScheduler::new();
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        scheduler.set_timeout(
            Duration::from_millis(100),
            Box::new(move || counter.set(counter.get() + 1)),
        );
        assert_eq!(scheduler.pending_delays(), vec![Duration::from_millis(100)]);
        assert_eq!(scheduler.run_pending(), 1);
        assert_eq!(scheduler.run_pending(), 0);
        assert_eq!(hits.get(), 1);
    }
}

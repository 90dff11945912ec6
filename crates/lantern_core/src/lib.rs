//! Lantern Core
//!
//! Host capabilities shared by every Lantern controller:
//!
//! - **Document model**: [`Document`] and [`Element`] handles for queries,
//!   attributes, classes, form values and layout widths
//! - **Environment signals**: [`PreferenceStore`], [`ColorSchemeSource`],
//!   [`ResizeObserverHost`], [`Scheduler`] and [`TaskSpawner`]
//! - **Configuration**: [`LanternConfig`], loaded from TOML
//! - **In-memory host**: [`memory`], for headless runs and tests
//!
//! Controllers never touch `web-sys` directly; the browser backend in
//! `lantern_web` implements these traits for a real page.

pub mod config;
pub mod error;
pub mod host;
pub mod memory;
pub mod scheme;

pub use config::{ConfigError, ContactConfig, LanternConfig, LogLevel, NavbarConfig, ThemeConfig};
pub use error::{HostError, Result};
pub use host::{
    Callback, ColorSchemeSource, Document, Element, ElementRef, EventKind, LocalTask,
    PreferenceStore, ResizeObserverHost, Scheduler, Subscription, TaskSpawner,
};
pub use scheme::ColorScheme;

//! Lantern Theme Manager
//!
//! Persisted light/dark/high-contrast preference with a system fallback.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use lantern_theme::{SystemSchemeWatcher, ThemeState};
//!
//! let state = ThemeState::new(config.theme.clone(), document, store, scheme);
//! state.load();
//! state.bind_options();
//! let watcher = SystemSchemeWatcher::attach(&state);
//! ```
//!
//! # Precedence
//!
//! 1. A recognized persisted preference (explicit user choice)
//! 2. The system dark/light signal
//! 3. Light
//!
//! System changes are followed only while no explicit preference is
//! persisted; an explicit choice is never overridden by the environment.

pub mod applier;
pub mod state;
pub mod variant;
pub mod watcher;

pub use applier::ThemeApplier;
pub use lantern_core::ColorScheme;
pub use state::ThemeState;
pub use variant::{ThemeAssets, ThemeVariant};
pub use watcher::SystemSchemeWatcher;

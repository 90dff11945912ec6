//! Lantern Application
//!
//! Wires the theme manager, navbar breakpoint engine and contact form into
//! one page.
//!
//! # Example
//!
//! ```ignore
//! use lantern_app::{Page, PageHost};
//!
//! let page = Page::start(&host, &config, endpoint, vec![dropdown_hook]);
//! for (component, err) in &page.report().failed {
//!     eprintln!("{component}: {err}");
//! }
//! ```

mod headless;
mod host;
mod page;

pub use headless::{HeadlessHost, IdleStats};
pub use host::PageHost;
pub use page::{Component, Page, StartupReport};

/// Prelude module - import everything commonly needed
pub mod prelude {
    pub use crate::{Component, HeadlessHost, Page, PageHost, StartupReport};

    pub use lantern_core::{ColorScheme, LanternConfig};
    pub use lantern_forms::{ContactEndpoint, SubmitError, SubmitOutcome};
    pub use lantern_layout::{BreakpointState, LayoutSettledHook};
    pub use lantern_theme::{ThemeState, ThemeVariant};
}

//! Lantern Layout
//!
//! Dynamic navbar breakpoint: instead of a fixed media-query width, the
//! navbar collapses exactly when its brand, nav links and theme control no
//! longer fit side by side in the rendered container.
//!
//! ```rust,ignore
//! let engine = BreakpointEngine::new(&*document, config.navbar.clone());
//! engine.add_hook(Rc::new(|state: BreakpointState| rebind_dropdown(state)));
//! engine.attach(&*resize_observer, &*scheduler);
//! ```

pub mod engine;
pub mod error;
pub mod measure;
pub mod probe;

pub use engine::{BreakpointEngine, LayoutSettledHook};
pub use error::LayoutError;
pub use measure::{decide, parse_px, BreakpointState, NavbarMeasurements};
pub use probe::LayoutProbe;

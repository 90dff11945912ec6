//! Breakpoint decision
//!
//! The navbar fits when
//!
//! ```text
//! brand + nav + theme_control + 2 * gap + safety_buffer <= container
//! ```
//!
//! All quantities are whole CSS pixels.

/// Layout state of the navbar
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BreakpointState {
    /// Items shown inline
    #[default]
    Expanded,
    /// Items behind the menu button
    Collapsed,
}

impl BreakpointState {
    pub fn is_collapsed(self) -> bool {
        matches!(self, Self::Collapsed)
    }
}

/// Widths read from the rendered navbar
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavbarMeasurements {
    pub brand_width: u32,
    pub nav_width: u32,
    pub theme_control_width: u32,
    pub gap_width: u32,
    pub container_width: u32,
}

impl NavbarMeasurements {
    /// Width the items need side by side, gaps included
    pub fn required_width(&self) -> u32 {
        self.brand_width
            .saturating_add(self.nav_width)
            .saturating_add(self.theme_control_width)
            .saturating_add(self.gap_width.saturating_mul(2))
    }
}

/// Decide the layout for `measurements`
pub fn decide(measurements: &NavbarMeasurements, safety_buffer: u32) -> BreakpointState {
    let needed = measurements.required_width().saturating_add(safety_buffer);
    if needed <= measurements.container_width {
        BreakpointState::Expanded
    } else {
        BreakpointState::Collapsed
    }
}

/// Parse a resolved CSS length such as `8px` or `7.5px`
///
/// Keywords (`normal`) and non-pixel units yield `None`.
pub fn parse_px(value: &str) -> Option<u32> {
    let number = value.trim().strip_suffix("px")?.trim();
    let px: f64 = number.parse().ok()?;
    if !px.is_finite() || px < 0.0 {
        return None;
    }
    Some(px.round() as u32)
}

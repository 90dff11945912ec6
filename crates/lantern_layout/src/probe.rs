//! Layout measurement probe

use lantern_core::{Document, Element, ElementRef, NavbarConfig};
use tracing::trace;

use crate::error::LayoutError;
use crate::measure::{parse_px, NavbarMeasurements};

/// Handles to the navbar container and the three items that share its row
pub struct LayoutProbe {
    container: ElementRef,
    brand: ElementRef,
    nav: ElementRef,
    theme_control: ElementRef,
}

impl LayoutProbe {
    /// Locate every measured element; any missing one is an error
    pub fn locate(document: &dyn Document, config: &NavbarConfig) -> Result<Self, LayoutError> {
        let find = |role: &'static str, selector: &str| {
            document
                .query(selector)
                .ok_or_else(|| LayoutError::MissingElement {
                    role,
                    selector: selector.to_string(),
                })
        };

        Ok(Self {
            container: find("container", &config.container_selector)?,
            brand: find("brand", &config.brand_selector)?,
            nav: find("nav links", &config.nav_selector)?,
            theme_control: find("theme control", &config.theme_control_selector)?,
        })
    }

    pub fn container(&self) -> &ElementRef {
        &self.container
    }

    /// Elements whose size changes require a new decision
    pub fn observed(&self) -> [&ElementRef; 4] {
        [&self.container, &self.brand, &self.nav, &self.theme_control]
    }

    /// Read the current widths
    ///
    /// The gap is the container's resolved `column-gap`; `default_gap` is
    /// used when it is unset or not in pixels.
    pub fn measure(&self, default_gap: u32) -> NavbarMeasurements {
        let gap_width = self
            .container
            .computed_style("column-gap")
            .and_then(|value| parse_px(&value))
            .unwrap_or(default_gap);

        let measurements = NavbarMeasurements {
            brand_width: self.brand.offset_width(),
            nav_width: self.nav.offset_width(),
            theme_control_width: self.theme_control.offset_width(),
            gap_width,
            container_width: self.container.offset_width(),
        };
        trace!(?measurements, "LayoutProbe::measure");
        measurements
    }
}

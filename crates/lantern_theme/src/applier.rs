//! Pushes the current theme to the document
//!
//! Every write is absolute (set this attribute to that value), so applying
//! the same assets twice leaves the document exactly as applying them once.

use std::rc::Rc;

use lantern_core::{Document, Element, ThemeConfig};
use tracing::trace;

use crate::variant::{ThemeAssets, ThemeVariant};

/// Writes theme assets into the page
pub struct ThemeApplier {
    document: Rc<dyn Document>,
    config: ThemeConfig,
}

impl ThemeApplier {
    pub fn new(document: Rc<dyn Document>, config: ThemeConfig) -> Self {
        Self { document, config }
    }

    pub fn document(&self) -> &Rc<dyn Document> {
        &self.document
    }

    /// Apply `assets` to the root attribute, stylesheet, illustration,
    /// switcher control and option indicators
    pub fn apply(&self, assets: &ThemeAssets) {
        let id = assets.variant.id();

        match self.document.root() {
            Some(root) => root.set_attribute(&self.config.root_attribute, id),
            None => trace!("ThemeApplier: document has no root element"),
        }

        if let Some(link) = self.document.query(&self.config.stylesheet_selector) {
            link.set_attribute("href", &assets.stylesheet_url);
        } else {
            trace!(selector = %self.config.stylesheet_selector, "no highlight stylesheet");
        }

        if let Some(img) = self.document.query(&self.config.illustration_selector) {
            img.set_attribute("src", &assets.illustration_path);
        } else {
            trace!(selector = %self.config.illustration_selector, "no hero illustration");
        }

        self.apply_switcher(assets);
        self.apply_options(assets.variant);
    }

    fn apply_switcher(&self, assets: &ThemeAssets) {
        let Some(switcher) = self.document.query(&self.config.switcher_selector) else {
            trace!(selector = %self.config.switcher_selector, "no theme switcher");
            return;
        };
        switcher.set_attribute("aria-label", &assets.aria_label);

        if let Some(icon) = switcher.query(&self.config.switcher_icon_selector) {
            for variant in ThemeVariant::all() {
                icon.toggle_class(variant.icon(), *variant == assets.variant);
            }
        }
        if let Some(label) = switcher.query(&self.config.switcher_label_selector) {
            label.set_text(assets.display_name);
        }
    }

    fn apply_options(&self, current: ThemeVariant) {
        let attribute = &self.config.option_attribute;
        for option in self.document.query_all(&format!("[{attribute}]")) {
            let selected = option.attribute(attribute).as_deref() == Some(current.id());
            option.toggle_class("active", selected);
            option.set_attribute("aria-pressed", if selected { "true" } else { "false" });
        }
    }
}

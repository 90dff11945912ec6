//! Theme variants and the assets derived from them

use lantern_core::{ColorScheme, ThemeConfig};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Supported theme variants.
///
/// The set is closed: identifiers outside it are rejected by
/// [`ThemeVariant::from_id`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ThemeVariant {
    #[default]
    Light,
    Dark,
    HighContrast,
}

impl ThemeVariant {
    /// Stable identifier used for storage, attributes and asset paths.
    pub fn id(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::HighContrast => "high-contrast",
        }
    }

    /// Parse a stored or signalled identifier. Matching is exact: padded or
    /// differently cased ids are not variants.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::all().iter().copied().find(|v| v.id() == id)
    }

    /// User-facing display name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
            Self::HighContrast => "High contrast",
        }
    }

    /// Bootstrap Icons class shown in the switcher.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Light => "bi-sun-fill",
            Self::Dark => "bi-moon-stars-fill",
            Self::HighContrast => "bi-circle-half",
        }
    }

    /// Accessible label of the switcher while this variant is current.
    pub fn aria_label(self) -> String {
        format!("Switch theme (current: {})", self.display_name())
    }

    /// Full variant list.
    pub fn all() -> &'static [ThemeVariant] {
        const VARIANTS: [ThemeVariant; 3] = [
            ThemeVariant::Light,
            ThemeVariant::Dark,
            ThemeVariant::HighContrast,
        ];
        &VARIANTS
    }
}

impl From<ColorScheme> for ThemeVariant {
    fn from(scheme: ColorScheme) -> Self {
        match scheme {
            ColorScheme::Light => Self::Light,
            ColorScheme::Dark => Self::Dark,
        }
    }
}

impl Display for ThemeVariant {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

/// Everything the page shows differently per variant
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThemeAssets {
    pub variant: ThemeVariant,
    pub display_name: &'static str,
    pub icon: &'static str,
    pub aria_label: String,
    pub stylesheet_url: String,
    pub illustration_path: String,
}

impl ThemeAssets {
    /// Derive the assets of `variant` from the configured path templates
    pub fn derive(variant: ThemeVariant, config: &ThemeConfig) -> Self {
        Self {
            variant,
            display_name: variant.display_name(),
            icon: variant.icon(),
            aria_label: variant.aria_label(),
            stylesheet_url: config.stylesheet_template.replace("{theme}", variant.id()),
            illustration_path: config.illustration_template.replace("{theme}", variant.id()),
        }
    }
}

//! Lantern configuration (TOML)
//!
//! Every field has a default, so an empty document is a valid configuration.
//! The browser backend reads it from a
//! `<script type="application/toml" id="lantern-config">` element.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration parsing errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct LanternConfig {
    /// Log level directive for the browser console subscriber
    pub log_level: LogLevel,
    pub theme: ThemeConfig,
    pub navbar: NavbarConfig,
    pub contact: ContactConfig,
}

impl LanternConfig {
    /// Parse a TOML document
    pub fn from_toml_str(src: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(src)?)
    }
}

/// Console log level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Theme manager configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Preference storage key
    pub storage_key: String,
    /// Attribute on the root element carrying the theme id
    pub root_attribute: String,
    /// `<link>` element of the code-highlight stylesheet
    pub stylesheet_selector: String,
    /// Stylesheet URL template; `{theme}` is replaced by the theme id
    pub stylesheet_template: String,
    /// `<img>` element of the hero illustration
    pub illustration_selector: String,
    /// Illustration path template; `{theme}` is replaced by the theme id
    pub illustration_template: String,
    /// The theme switcher control
    pub switcher_selector: String,
    /// Icon element inside the switcher
    pub switcher_icon_selector: String,
    /// Visible label element inside the switcher
    pub switcher_label_selector: String,
    /// Attribute carrying the theme id on each selectable option
    pub option_attribute: String,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: "theme".to_string(),
            root_attribute: "data-bs-theme".to_string(),
            stylesheet_selector: "#highlight-theme".to_string(),
            stylesheet_template: "/assets/css/highlight-{theme}.css".to_string(),
            illustration_selector: "#hero-illustration".to_string(),
            illustration_template: "/assets/img/hero-{theme}.svg".to_string(),
            switcher_selector: "#theme-switcher".to_string(),
            switcher_icon_selector: ".theme-icon".to_string(),
            switcher_label_selector: ".theme-label".to_string(),
            option_attribute: "data-theme-value".to_string(),
        }
    }
}

/// Navbar breakpoint configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct NavbarConfig {
    pub container_selector: String,
    pub brand_selector: String,
    pub nav_selector: String,
    pub theme_control_selector: String,
    /// Class toggled on the container while collapsed
    pub collapsed_class: String,
    /// Pixels kept free before the items are considered to fit
    pub safety_buffer: u32,
    /// Gap used when the container's `column-gap` cannot be read
    pub default_gap: u32,
    /// Delay before the first check, letting fonts and icons settle
    pub initial_check_delay_ms: u64,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            container_selector: "#mainNav".to_string(),
            brand_selector: ".navbar-brand".to_string(),
            nav_selector: "#navbarResponsive .navbar-nav".to_string(),
            theme_control_selector: "#theme-switcher".to_string(),
            collapsed_class: "navbar-collapsed".to_string(),
            safety_buffer: 5,
            default_gap: 8,
            initial_check_delay_ms: 100,
        }
    }
}

/// Contact form configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContactConfig {
    pub form_selector: String,
    pub submit_selector: String,
    pub status_selector: String,
    /// Remote endpoint receiving the JSON submission
    pub endpoint_url: String,
    /// Submit button label while a submission is in flight
    pub busy_label: String,
    pub success_message: String,
    /// Shown when the endpoint gives no message of its own
    pub failure_message: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            form_selector: "#contactForm".to_string(),
            submit_selector: "#submitButton".to_string(),
            status_selector: "#submitStatus".to_string(),
            endpoint_url: "/api/rpc/submit_contact_form".to_string(),
            busy_label: "Sending...".to_string(),
            success_message: "Thanks! Your message has been sent.".to_string(),
            failure_message: "Sorry, your message could not be sent. Please try again."
                .to_string(),
        }
    }
}

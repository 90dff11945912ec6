//! Page-embedded configuration
//!
//! A page may carry its settings as
//! `<script type="application/toml" id="lantern-config">`. Anything missing
//! from it, or the whole element, falls back to defaults.

use lantern_core::{ConfigError, LanternConfig};

/// Id of the script element holding the TOML document
pub const CONFIG_ELEMENT_ID: &str = "lantern-config";

/// Parse the embedded config text
///
/// A parse error yields the defaults together with the error, so the caller
/// can report it once logging is up.
pub fn resolve(text: Option<&str>) -> (LanternConfig, Option<ConfigError>) {
    let Some(text) = text.filter(|t| !t.trim().is_empty()) else {
        return (LanternConfig::default(), None);
    };
    match LanternConfig::from_toml_str(text) {
        Ok(config) => (config, None),
        Err(err) => (LanternConfig::default(), Some(err)),
    }
}

//! Enhancement suite configuration.
//!
//! Every selector, threshold, duration, and endpoint the controllers
//! depend on lives here, with defaults matching the site's markup
//! contract. Deployments can override any subset from a TOML file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Off-canvas menu selectors
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuSelectors {
    pub toggle: String,
    pub close: String,
    pub overlay: String,
    pub panel: String,
}

impl Default for MenuSelectors {
    fn default() -> Self {
        Self {
            toggle: "#mobile-menu-toggle".to_string(),
            close: "#mobile-menu-close".to_string(),
            overlay: "#menu-overlay".to_string(),
            panel: "#mobile-menu".to_string(),
        }
    }
}

/// Host environment capabilities the suite feature-detects against.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Capabilities {
    /// Native deferred image loading; when present the fallback loader
    /// stays inert.
    pub native_lazy_loading: bool,
    /// An external reveal-on-scroll library is loaded.
    pub reveal_library: bool,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            native_lazy_loading: true,
            reveal_library: false,
        }
    }
}

/// Configuration for the whole enhancement suite
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnhanceConfig {
    pub header_selector: String,
    /// Scroll offset past which the header is sticky, in pixels.
    pub sticky_threshold: f64,

    pub menu: MenuSelectors,

    pub counter_selector: String,
    pub counter_duration_ms: u64,
    /// Visibility fraction that starts a counter, in [0, 1].
    pub counter_visibility: f64,

    pub phone_selector: String,
    pub lazy_image_selector: String,
    pub reveal_selector: String,

    pub stats_section_selector: String,
    pub lead_form_selector: String,
    pub lead_submit_selector: String,

    /// Scroll offset past which the back-to-top control shows, in pixels.
    pub back_to_top_threshold: f64,
    /// Duration of smooth scrolling tweens, in milliseconds.
    pub scroll_duration_ms: u64,

    pub viewport_height: f64,

    pub base_url: String,
    pub fleet_stats_path: String,
    pub leads_path: String,

    pub capabilities: Capabilities,
}

impl Default for EnhanceConfig {
    fn default() -> Self {
        Self {
            header_selector: "#header".to_string(),
            sticky_threshold: 80.0,
            menu: MenuSelectors::default(),
            counter_selector: "[data-count]".to_string(),
            counter_duration_ms: 2000,
            counter_visibility: 0.5,
            phone_selector: "input[type=tel]".to_string(),
            lazy_image_selector: "img[data-src]".to_string(),
            reveal_selector: "[data-aos]".to_string(),
            stats_section_selector: ".stats-section".to_string(),
            lead_form_selector: "#lead-form".to_string(),
            lead_submit_selector: "[data-lead-submit]".to_string(),
            back_to_top_threshold: 400.0,
            scroll_duration_ms: 600,
            viewport_height: 900.0,
            base_url: "http://localhost:8000".to_string(),
            fleet_stats_path: "/api/fleet-stats".to_string(),
            leads_path: "/api/leads".to_string(),
            capabilities: Capabilities::default(),
        }
    }
}

impl EnhanceConfig {
    /// Load configuration from a TOML file; missing keys keep defaults.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: EnhanceConfig = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_markup_contract() {
        let config = EnhanceConfig::default();
        assert_eq!(config.header_selector, "#header");
        assert_eq!(config.sticky_threshold, 80.0);
        assert_eq!(config.counter_duration_ms, 2000);
        assert_eq!(config.back_to_top_threshold, 400.0);
        assert_eq!(config.menu.panel, "#mobile-menu");
        assert!(config.capabilities.native_lazy_loading);
        assert!(!config.capabilities.reveal_library);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: EnhanceConfig = toml::from_str(
            r#"
            sticky_threshold = 120.0
            base_url = "https://dealer.example"

            [capabilities]
            native_lazy_loading = false
            "#,
        )
        .unwrap();

        assert_eq!(config.sticky_threshold, 120.0);
        assert_eq!(config.base_url, "https://dealer.example");
        assert!(!config.capabilities.native_lazy_loading);
        // Untouched keys keep their defaults.
        assert_eq!(config.counter_duration_ms, 2000);
        assert_eq!(config.menu.toggle, "#mobile-menu-toggle");
    }

    #[test]
    fn test_round_trips_through_toml() {
        let config = EnhanceConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let restored: EnhanceConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(restored.header_selector, config.header_selector);
        assert_eq!(restored.leads_path, config.leads_path);
    }
}

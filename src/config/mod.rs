// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[general]` - Language
//! - `[lightbox]` - Zoom steps, swipe threshold, close transition
//! - `[content]` - Page watching and rescan behavior
//! - `[page]` - Scroll helper thresholds
//!
//! # Path Resolution
//!
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. `--config-dir` CLI flag or `POST_LENS_CONFIG_DIR` environment variable
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use post_lens::config::{self, Config};
//!
//! let (mut config, _warning) = config::load();
//! config.general.language = Some("fr".to_string());
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Lightbox interaction settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LightboxConfig {
    /// Zoom change for the zoom-in/zoom-out controls.
    #[serde(default = "default_zoom_step", skip_serializing_if = "Option::is_none")]
    pub zoom_step: Option<f32>,

    /// Zoom change per mouse wheel tick.
    #[serde(default = "default_wheel_zoom_step", skip_serializing_if = "Option::is_none")]
    pub wheel_zoom_step: Option<f32>,

    /// Horizontal distance a swipe must exceed to navigate.
    #[serde(default = "default_swipe_threshold", skip_serializing_if = "Option::is_none")]
    pub swipe_threshold_px: Option<f32>,

    /// Delay before closed content is cleared.
    #[serde(default = "default_close_transition", skip_serializing_if = "Option::is_none")]
    pub close_transition_ms: Option<u64>,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            zoom_step: default_zoom_step(),
            wheel_zoom_step: default_wheel_zoom_step(),
            swipe_threshold_px: default_swipe_threshold(),
            close_transition_ms: default_close_transition(),
        }
    }
}

/// Page watching and rescan settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ContentConfig {
    /// Interval between page file checks.
    #[serde(default = "default_watch_interval", skip_serializing_if = "Option::is_none")]
    pub watch_interval_ms: Option<u64>,

    /// Quiet period before a change triggers a rescan.
    #[serde(default = "default_rescan_delay", skip_serializing_if = "Option::is_none")]
    pub rescan_delay_ms: Option<u64>,

    /// Retries while diagrams are still unrendered.
    #[serde(default = "default_rescan_attempts", skip_serializing_if = "Option::is_none")]
    pub rescan_max_attempts: Option<u32>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            watch_interval_ms: default_watch_interval(),
            rescan_delay_ms: default_rescan_delay(),
            rescan_max_attempts: default_rescan_attempts(),
        }
    }
}

/// Page scroll helper settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PageConfig {
    /// Offset after which the scroll-to-top button appears.
    #[serde(default = "default_scroll_top_threshold", skip_serializing_if = "Option::is_none")]
    pub scroll_top_threshold_px: Option<f32>,

    /// Gap kept below the header when jumping to an anchor.
    #[serde(default = "default_anchor_margin", skip_serializing_if = "Option::is_none")]
    pub anchor_margin_px: Option<f32>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            scroll_top_threshold_px: default_scroll_top_threshold(),
            anchor_margin_px: default_anchor_margin(),
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub lightbox: LightboxConfig,

    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub page: PageConfig,
}

/// Resolved lightbox tuning with every value validated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightboxTuning {
    pub zoom_step: f32,
    pub wheel_zoom_step: f32,
    pub swipe_threshold: f32,
    pub close_transition: Duration,
}

impl Default for LightboxTuning {
    fn default() -> Self {
        Self {
            zoom_step: DEFAULT_ZOOM_STEP,
            wheel_zoom_step: DEFAULT_WHEEL_ZOOM_STEP,
            swipe_threshold: DEFAULT_SWIPE_THRESHOLD_PX,
            close_transition: Duration::from_millis(DEFAULT_CLOSE_TRANSITION_MS),
        }
    }
}

/// Resolved rescan tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RescanTuning {
    pub watch_interval: Duration,
    pub delay: Duration,
    pub max_attempts: u32,
}

impl Default for RescanTuning {
    fn default() -> Self {
        Self {
            watch_interval: Duration::from_millis(DEFAULT_WATCH_INTERVAL_MS),
            delay: Duration::from_millis(DEFAULT_RESCAN_DELAY_MS),
            max_attempts: DEFAULT_RESCAN_MAX_ATTEMPTS,
        }
    }
}

/// Resolved page scroll tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageTuning {
    pub scroll_top_threshold: f32,
    pub anchor_margin: f32,
}

impl Default for PageTuning {
    fn default() -> Self {
        Self {
            scroll_top_threshold: DEFAULT_SCROLL_TOP_THRESHOLD_PX,
            anchor_margin: DEFAULT_ANCHOR_MARGIN_PX,
        }
    }
}

impl Config {
    /// Lightbox settings with out-of-range values replaced or clamped.
    #[must_use]
    pub fn lightbox_tuning(&self) -> LightboxTuning {
        let defaults = LightboxTuning::default();
        LightboxTuning {
            zoom_step: clamp_zoom_step(self.lightbox.zoom_step, defaults.zoom_step),
            wheel_zoom_step: clamp_zoom_step(self.lightbox.wheel_zoom_step, defaults.wheel_zoom_step),
            swipe_threshold: self
                .lightbox
                .swipe_threshold_px
                .filter(|px| px.is_finite() && *px > 0.0)
                .unwrap_or(defaults.swipe_threshold),
            close_transition: self
                .lightbox
                .close_transition_ms
                .map_or(defaults.close_transition, Duration::from_millis),
        }
    }

    #[must_use]
    pub fn rescan_tuning(&self) -> RescanTuning {
        let defaults = RescanTuning::default();
        RescanTuning {
            watch_interval: self
                .content
                .watch_interval_ms
                .filter(|ms| *ms > 0)
                .map_or(defaults.watch_interval, Duration::from_millis),
            delay: self
                .content
                .rescan_delay_ms
                .map_or(defaults.delay, Duration::from_millis),
            max_attempts: self
                .content
                .rescan_max_attempts
                .map_or(defaults.max_attempts, |n| n.min(MAX_RESCAN_ATTEMPTS)),
        }
    }

    #[must_use]
    pub fn page_tuning(&self) -> PageTuning {
        let defaults = PageTuning::default();
        PageTuning {
            scroll_top_threshold: self
                .page
                .scroll_top_threshold_px
                .filter(|px| px.is_finite() && *px >= 0.0)
                .unwrap_or(defaults.scroll_top_threshold),
            anchor_margin: self
                .page
                .anchor_margin_px
                .filter(|px| px.is_finite() && *px >= 0.0)
                .unwrap_or(defaults.anchor_margin),
        }
    }
}

fn clamp_zoom_step(value: Option<f32>, fallback: f32) -> f32 {
    match value {
        Some(step) if step.is_finite() => step.clamp(MIN_ZOOM_STEP, MAX_ZOOM_STEP),
        _ => fallback,
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_zoom_step() -> Option<f32> {
    Some(DEFAULT_ZOOM_STEP)
}

fn default_wheel_zoom_step() -> Option<f32> {
    Some(DEFAULT_WHEEL_ZOOM_STEP)
}

fn default_swipe_threshold() -> Option<f32> {
    Some(DEFAULT_SWIPE_THRESHOLD_PX)
}

fn default_close_transition() -> Option<u64> {
    Some(DEFAULT_CLOSE_TRANSITION_MS)
}

fn default_watch_interval() -> Option<u64> {
    Some(DEFAULT_WATCH_INTERVAL_MS)
}

fn default_rescan_delay() -> Option<u64> {
    Some(DEFAULT_RESCAN_DELAY_MS)
}

fn default_rescan_attempts() -> Option<u32> {
    Some(DEFAULT_RESCAN_MAX_ATTEMPTS)
}

fn default_scroll_top_threshold() -> Option<f32> {
    Some(DEFAULT_SCROLL_TOP_THRESHOLD_PX)
}

fn default_anchor_margin() -> Option<f32> {
    Some(DEFAULT_ANCHOR_MARGIN_PX)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load / Save
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "config unreadable, using defaults");
                    return (
                        Config::default(),
                        Some("notification-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid TOML.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Saves the configuration to the default path.
///
/// # Errors
///
/// Returns an error if the config directory cannot be resolved or written.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved or written.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    let Some(path) = get_config_path_with_override(base_dir) else {
        return Err(crate::error::Error::Config(
            "config directory unavailable".into(),
        ));
    };
    save_to_path(config, &path)
}

/// Saves configuration to a specific path, creating parent directories.
///
/// # Errors
///
/// Returns an error if serialization or any file operation fails.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}

//! Application configuration and persisted UI state.
//!
//! Two small JSON files live in the platform data directory under
//! `com.flowcanvas.flowcanvas-rs`: `config.json` (editor configuration,
//! including the deployment-wide handle layout policy) and `state.json`
//! (UI preferences). Load failures fall back to defaults and are logged,
//! never fatal.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{FlowCanvasError, Result};
use crate::graph::ports::HandleLayout;

const APP_DIR: &str = "com.flowcanvas.flowcanvas-rs";
const CONFIG_FILE: &str = "config.json";
const STATE_FILE: &str = "state.json";

/// Editor configuration, persisted per deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Input handle layout policy (unified vs per-field).
    pub handle_layout: HandleLayout,
    /// Whether tool-mode-only fields surface as handles.
    pub tool_mode: bool,
    /// Rounded corner radius for edge paths, in points.
    pub corner_radius: f32,
    /// Connect-flash duration.
    pub flash_duration_ms: u64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            handle_layout: HandleLayout::Unified,
            tool_mode: false,
            corner_radius: 6.0,
            flash_duration_ms: 200,
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub editor: EditorConfig,
}

impl AppConfig {
    /// Load the config from the default location, falling back to
    /// defaults on any failure.
    pub fn load_or_default() -> Self {
        match Self::default_path().and_then(|p| Self::load(&p)) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn default_path() -> Result<PathBuf> {
        data_dir().map(|d| d.join(CONFIG_FILE))
    }
}

/// User interface preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiPreferences {
    pub dark_mode: bool,
    pub font_scale: f32,
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            dark_mode: true,
            font_scale: 1.0,
        }
    }
}

/// Persisted application state (preferences, not workflow content).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppState {
    pub ui_preferences: UiPreferences,
}

impl AppState {
    /// Load the state from the default location, falling back to
    /// defaults on any failure.
    pub fn load_or_default() -> Self {
        match Self::default_path().and_then(|p| Self::load(&p)) {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!("Failed to load app state, using defaults: {}", e);
                Self::default()
            }
        }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::default_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    fn default_path() -> Result<PathBuf> {
        data_dir().map(|d| d.join(STATE_FILE))
    }
}

fn data_dir() -> Result<PathBuf> {
    dirs_next::data_dir()
        .map(|d| d.join(APP_DIR))
        .ok_or_else(|| FlowCanvasError::Config("No data directory available".to_string()))
}

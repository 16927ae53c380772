//! Persisted chart settings (lives in the OS config directory).

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::coords::MIN_BAR_WIDTH_PERCENT;
use crate::engine::grouping::GroupingDimension;
use crate::engine::interaction::{InteractionConfig, DRAG_THRESHOLD_PX};
use crate::engine::zoom::{
    ZoomController, DEFAULT_PIXELS_PER_DAY, MAX_PIXELS_PER_DAY, MIN_PIXELS_PER_DAY, ZOOM_STEP,
};
use crate::error::Result;

const SETTINGS_FILE: &str = "settings.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub grouping: GroupingDimension,
    pub show_weekends: bool,
    pub pixels_per_day: f32,
    pub min_pixels_per_day: f32,
    pub max_pixels_per_day: f32,
    pub zoom_step: f32,
    pub drag_threshold_px: f32,
    pub click_suppress_ms: u64,
    pub min_bar_width_percent: f32,
    /// Days shown before the earliest item.
    pub window_padding_before: i64,
    /// Days shown after the latest item.
    pub window_padding_after: i64,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            grouping: GroupingDimension::Machine,
            show_weekends: true,
            pixels_per_day: DEFAULT_PIXELS_PER_DAY,
            min_pixels_per_day: MIN_PIXELS_PER_DAY,
            max_pixels_per_day: MAX_PIXELS_PER_DAY,
            zoom_step: ZOOM_STEP,
            drag_threshold_px: DRAG_THRESHOLD_PX,
            click_suppress_ms: 100,
            min_bar_width_percent: MIN_BAR_WIDTH_PERCENT,
            window_padding_before: 7,
            window_padding_after: 30,
        }
    }
}

impl ChartSettings {
    pub fn zoom_controller(&self) -> ZoomController {
        ZoomController::new(
            self.pixels_per_day,
            self.min_pixels_per_day,
            self.max_pixels_per_day,
            self.zoom_step,
        )
    }

    pub fn interaction_config(&self) -> InteractionConfig {
        InteractionConfig {
            drag_threshold_px: self.drag_threshold_px.max(0.0),
            click_suppress: Duration::from_millis(self.click_suppress_ms),
        }
    }
}

/// Reads and writes [`ChartSettings`] as JSON.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `settings.json` in the platform config directory, or the working
    /// directory when none can be resolved.
    pub fn default_location() -> Self {
        let dir = directories::ProjectDirs::from("", "", "ShopfloorGantt")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        Self::new(dir.join(SETTINGS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn config_dir(&self) -> Option<&Path> {
        self.path.parent()
    }

    /// Missing file means defaults; a broken file is an error.
    pub fn load(&self) -> Result<ChartSettings> {
        if !self.path.exists() {
            return Ok(ChartSettings::default());
        }
        let json = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn load_or_default(&self) -> ChartSettings {
        match self.load() {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "ignoring unreadable settings");
                ChartSettings::default()
            }
        }
    }

    pub fn save(&self, settings: &ChartSettings) -> Result<()> {
        if let Some(dir) = self.config_dir() {
            std::fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(settings)?;
        std::fs::write(&self.path, json)?;
        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("settings.json"));
        assert_eq!(store.load().unwrap(), ChartSettings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.path().join("nested").join("settings.json"));
        let settings = ChartSettings {
            grouping: GroupingDimension::Person,
            show_weekends: false,
            pixels_per_day: 60.0,
            ..Default::default()
        };
        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{ "grouping": "project" }"#).unwrap();
        let settings = SettingsStore::new(&path).load().unwrap();
        assert_eq!(settings.grouping, GroupingDimension::Project);
        assert!(settings.show_weekends);
        assert_eq!(settings.click_suppress_ms, 100);
    }

    #[test]
    fn test_broken_file_falls_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        let store = SettingsStore::new(&path);
        assert!(store.load().is_err());
        assert_eq!(store.load_or_default(), ChartSettings::default());
    }

    #[test]
    fn test_out_of_range_zoom_is_clamped() {
        let settings = ChartSettings {
            pixels_per_day: 400.0,
            ..Default::default()
        };
        assert_eq!(settings.zoom_controller().pixels_per_day(), MAX_PIXELS_PER_DAY);
    }
}

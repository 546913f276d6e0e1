//! Layout configuration and user preferences
//!
//! [`LayoutConfig`] carries the page geometry and script every format pass
//! reads. [`SpatialSettings`] holds the per-container defaults a transcriber
//! picks once and expects to see again next session; [`SettingsManager`]
//! keeps them in a JSON file.

use crate::error::SettingsResult;
use crate::glyphs::{BracketType, PassageMode, ScriptMode};
use crate::translator::TranslationMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default embosser line width in cells
pub const DEFAULT_CELLS_PER_LINE: usize = 40;

/// Page geometry and script for one format pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LayoutConfig {
    /// Embosser line width in cells
    pub cells_per_line: usize,
    /// Braille code for the mathematics
    pub script: ScriptMode,
    /// Blank cells between number line columns
    pub number_line_gap: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            cells_per_line: DEFAULT_CELLS_PER_LINE,
            script: ScriptMode::Nemeth,
            number_line_gap: 2,
        }
    }
}

impl LayoutConfig {
    pub fn new(cells_per_line: usize, script: ScriptMode) -> Self {
        Self {
            cells_per_line,
            script,
            ..Default::default()
        }
    }

    pub fn cells_per_line(&self) -> usize {
        self.cells_per_line
    }

    pub fn script(&self) -> ScriptMode {
        self.script
    }
}

/// Arrowhead drawn at one end of a number line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ArrowStyle {
    None,
    #[default]
    Plain,
    /// The line continues past the drawn range
    Overflow,
}

/// Where the label row sits relative to the point row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LabelPosition {
    Above,
    #[default]
    Below,
}

/// Layout used when a matrix is too wide for the page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WideStrategy {
    #[default]
    BlockBlank,
    IndentColumn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VerticalJustify {
    #[default]
    Top,
    Center,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HorizontalJustify {
    #[default]
    Left,
    Center,
    Right,
    Trim,
}

/// Number line defaults
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NumberLineSettings {
    pub start_arrow: ArrowStyle,
    pub end_arrow: ArrowStyle,
    pub label_position: LabelPosition,
    pub translation: TranslationMode,
}

/// Matrix defaults
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatrixSettings {
    pub bracket: BracketType,
    pub wide_strategy: WideStrategy,
    pub translation: TranslationMode,
}

/// Connecting text defaults
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectingSettings {
    pub vertical: VerticalJustify,
    pub horizontal: HorizontalJustify,
    pub translation: TranslationMode,
}

/// Grid defaults
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridSettings {
    pub passage: PassageMode,
}

/// Everything persisted between sessions
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpatialSettings {
    pub layout: LayoutConfig,
    pub number_line: NumberLineSettings,
    pub matrix: MatrixSettings,
    pub connecting: ConnectingSettings,
    pub grid: GridSettings,
}

/// Loads and saves [`SpatialSettings`] as JSON
pub struct SettingsManager {
    settings_path: PathBuf,
    current: SpatialSettings,
}

impl SettingsManager {
    /// Settings stored as `spatial-settings.json` in `dir`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self::with_path(dir.as_ref().join("spatial-settings.json"))
    }

    pub fn with_path(settings_path: PathBuf) -> Self {
        Self {
            settings_path,
            current: SpatialSettings::default(),
        }
    }

    pub fn settings_path(&self) -> &Path {
        &self.settings_path
    }

    /// Load settings from disk, or fall back to defaults
    pub fn load_sync(&mut self) -> SettingsResult<&SpatialSettings> {
        if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            match serde_json::from_str::<SpatialSettings>(&content) {
                Ok(settings) => {
                    self.current = settings;
                }
                Err(e) => {
                    tracing::warn!("Failed to parse settings file, using defaults: {}", e);
                    self.current = SpatialSettings::default();
                }
            }
        } else {
            self.current = SpatialSettings::default();
        }
        Ok(&self.current)
    }

    pub fn save_sync(&self) -> SettingsResult<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }

    pub fn current(&self) -> &SpatialSettings {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut SpatialSettings {
        &mut self.current
    }

    /// Replace the cached settings
    pub fn update(&mut self, settings: SpatialSettings) {
        self.current = settings;
    }
}

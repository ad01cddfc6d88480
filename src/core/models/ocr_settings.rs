use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::AdapterError;
use crate::global_constants::{
    APPLICATION_NAME, DEFAULT_LANGUAGES, DEFAULT_PARAGRAPH_MODE, LOG_TAG_SETTINGS,
    SETTINGS_FILE_NAME,
};

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct OcrSettings {
    pub languages: Vec<String>,
    pub paragraph: bool,
    pub dpi: Option<i32>,
    pub page_segmentation_mode: Option<i32>,
    pub tessdata_dir: Option<PathBuf>,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            languages: DEFAULT_LANGUAGES.iter().map(|code| code.to_string()).collect(),
            paragraph: DEFAULT_PARAGRAPH_MODE,
            dpi: None,
            page_segmentation_mode: None,
            tessdata_dir: None,
        }
    }
}

impl OcrSettings {
    /// Reads settings from `explicit_path` when given, otherwise from the
    /// per-user config directory. Only an explicitly requested file has to
    /// exist.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, AdapterError> {
        if let Some(path) = explicit_path {
            return Self::load_from_file(path);
        }

        let Some(settings_path) = Self::get_settings_file_path() else {
            log::debug!("{} No config directory available, using defaults", LOG_TAG_SETTINGS);
            return Ok(Self::default());
        };

        if !settings_path.exists() {
            log::info!("{} No settings file found, using defaults", LOG_TAG_SETTINGS);
            return Ok(Self::default());
        }

        Self::load_from_file(&settings_path)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, AdapterError> {
        let invalid_settings = |reason: String| AdapterError::InvalidSettings {
            path: path.to_path_buf(),
            reason,
        };

        let contents =
            std::fs::read_to_string(path).map_err(|error| invalid_settings(error.to_string()))?;
        let settings: OcrSettings =
            serde_json::from_str(&contents).map_err(|error| invalid_settings(error.to_string()))?;

        log::info!("{} Loaded settings from {:?}", LOG_TAG_SETTINGS, path);
        log::debug!("{} Languages: {:?}", LOG_TAG_SETTINGS, settings.languages);
        log::debug!("{} Paragraph mode: {}", LOG_TAG_SETTINGS, settings.paragraph);

        Ok(settings)
    }

    /// Replaces the configured languages when the override names at least one
    /// non-blank code.
    pub fn with_language_override(mut self, languages: &[String]) -> Self {
        let requested: Vec<String> = languages
            .iter()
            .map(|code| code.trim())
            .filter(|code| !code.is_empty())
            .map(str::to_string)
            .collect();

        if !requested.is_empty() {
            log::debug!("{} Language override: {:?}", LOG_TAG_SETTINGS, requested);
            self.languages = requested;
        }

        self
    }

    pub fn recognition_languages(&self) -> Vec<String> {
        let configured: Vec<String> = self
            .languages
            .iter()
            .map(|code| code.trim())
            .filter(|code| !code.is_empty())
            .map(str::to_string)
            .collect();

        if configured.is_empty() {
            log::warn!(
                "{} No languages configured, falling back to {:?}",
                LOG_TAG_SETTINGS,
                DEFAULT_LANGUAGES
            );
            return Self::default().languages;
        }

        configured
    }

    fn get_settings_file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|config_dir| {
            config_dir
                .join(APPLICATION_NAME)
                .join(SETTINGS_FILE_NAME)
        })
    }
}

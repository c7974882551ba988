//! Converter settings.
//!
//! A small JSON key-value file controls the emitted text styles and which
//! component labels are hidden. Every field has a default, so running
//! without a settings file is fine.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Font used for the emitted text styles.
    #[serde(default = "default_font_name")]
    pub font_name: String,

    /// Text height in mm.
    #[serde(default = "default_font_size")]
    pub font_size: f64,

    /// Reference designators containing any of these substrings get their
    /// on-board labels emitted invisible (silk logos, test points).
    #[serde(default = "default_hide_patterns")]
    pub hide_label_patterns: Vec<String>,
}

fn default_font_name() -> String {
    "Arial".to_string()
}

fn default_font_size() -> f64 {
    1.5
}

fn default_hide_patterns() -> Vec<String> {
    vec!["LOGO".to_string(), "TEST".to_string()]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            font_name: default_font_name(),
            font_size: default_font_size(),
            hide_label_patterns: default_hide_patterns(),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Whether labels of this reference designator should be hidden.
    pub fn label_hidden(&self, reference: &str) -> bool {
        self.hide_label_patterns
            .iter()
            .any(|pattern| reference.contains(pattern.as_str()))
    }
}

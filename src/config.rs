//! Engine configuration.
//!
//! Settings only take effect when the engines are constructed, i.e. on the
//! first `initialize` of a thread. Later initializations reuse the engines
//! built from the first configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::dpi::USER_DEFAULT_SCREEN_DPI;
use crate::error::{G2dError, G2dResult};

/// Threading model requested from the drawing engine factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawingThreading {
    #[default]
    SingleThreaded,
    MultiThreaded,
}

/// Sharing mode requested from the text-layout factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextFactoryKind {
    #[default]
    Shared,
    Isolated,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct G2dConfig {
    /// DPI that maps to a scale of 1.0
    pub reference_dpi: u32,
    pub drawing_threading: DrawingThreading,
    pub text_factory: TextFactoryKind,
    /// Index into a family's localized names used when reading the family name
    pub family_name_locale_index: u32,
}

impl Default for G2dConfig {
    fn default() -> Self {
        Self {
            reference_dpi: USER_DEFAULT_SCREEN_DPI,
            drawing_threading: DrawingThreading::default(),
            text_factory: TextFactoryKind::default(),
            family_name_locale_index: 0,
        }
    }
}

impl G2dConfig {
    pub fn from_json_str(json: &str) -> G2dResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> G2dResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        tracing::debug!("Loaded graphics config from {}", path.display());
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> G2dResult<()> {
        if self.reference_dpi == 0 {
            return Err(G2dError::Config("reference_dpi must be non-zero".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = G2dConfig::default();
        assert_eq!(config.reference_dpi, 96);
        assert_eq!(config.drawing_threading, DrawingThreading::SingleThreaded);
        assert_eq!(config.text_factory, TextFactoryKind::Shared);
        assert_eq!(config.family_name_locale_index, 0);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config = G2dConfig::from_json_str(r#"{ "text_factory": "isolated" }"#).unwrap();
        assert_eq!(config.text_factory, TextFactoryKind::Isolated);
        assert_eq!(config.reference_dpi, 96);
    }

    #[test]
    fn test_full_json() {
        let json = r#"{
            "reference_dpi": 120,
            "drawing_threading": "multi_threaded",
            "text_factory": "shared",
            "family_name_locale_index": 1
        }"#;
        let config = G2dConfig::from_json_str(json).unwrap();
        assert_eq!(config.reference_dpi, 120);
        assert_eq!(config.drawing_threading, DrawingThreading::MultiThreaded);
        assert_eq!(config.family_name_locale_index, 1);
    }

    #[test]
    fn test_zero_reference_dpi_rejected() {
        let err = G2dConfig::from_json_str(r#"{ "reference_dpi": 0 }"#).unwrap_err();
        assert!(matches!(err, G2dError::Config(_)));
    }

    #[test]
    fn test_unknown_enum_value_rejected() {
        let err = G2dConfig::from_json_str(r#"{ "text_factory": "global" }"#).unwrap_err();
        assert!(matches!(err, G2dError::Json(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = G2dConfig::load("/definitely/not/here/graphics.json").unwrap_err();
        assert!(matches!(err, G2dError::Io(_)));
    }
}

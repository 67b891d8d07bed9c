//! Session configuration loaded from TOML

use crate::{Result, SessionError};
use kindred_graph::GraphConfig;
use kindred_layout::LayoutConfig;
use kindred_physics::PhysicsConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for every engine a session drives
///
/// Each section may be left out of the file and falls back to its defaults.
///
/// # Examples
///
/// ```
/// use kindred_session::SessionConfig;
///
/// let config = SessionConfig::from_toml_str("[layout]\nvertical_spacing = 6.0\n").unwrap();
/// assert_eq!(config.layout.vertical_spacing, 6.0);
/// assert_eq!(config.layout.horizontal_spacing, 3.0);
/// assert!(config.graph.link_spouse_children);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Graph model side effects
    #[serde(default)]
    pub graph: GraphConfig,

    /// Layout spacing
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Spring and drag tuning
    #[serde(default)]
    pub physics: PhysicsConfig,
}

impl SessionConfig {
    /// Parse a TOML document
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| SessionError::Config(e.to_string()))
    }

    /// Read and parse a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| SessionError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    /// Render as a TOML document
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| SessionError::Config(format!("Failed to serialize config: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_document_is_default() {
        assert_eq!(SessionConfig::from_toml_str("").unwrap(), SessionConfig::default());
    }

    #[test]
    fn test_sections() {
        let config = SessionConfig::from_toml_str(
            r#"
            [graph]
            link_spouse_children = false

            [physics]
            max_drag_radius = 5.0
            seed = 42
            "#,
        )
        .unwrap();

        assert!(!config.graph.link_spouse_children);
        assert_eq!(config.physics.max_drag_radius, 5.0);
        assert_eq!(config.physics.seed, 42);
        assert_eq!(config.physics.stiffness, 40.0);
        assert_eq!(config.layout, LayoutConfig::default());
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = SessionConfig::from_toml_str("[layout\n").unwrap_err();
        assert!(matches!(err, SessionError::Config(_)));
    }

    #[test]
    fn test_load_and_roundtrip() {
        let config = SessionConfig {
            layout: LayoutConfig::compact(),
            ..Default::default()
        };
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(config.to_toml_string().unwrap().as_bytes())
            .unwrap();

        assert_eq!(SessionConfig::load(file.path()).unwrap(), config);
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SessionConfig::load(dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("nope.toml"));
    }
}

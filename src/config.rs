//! Palette configuration.
//!
//! The palette is an optional TOML file. Any token it leaves out keeps its
//! built-in default:
//!
//! ```toml
//! [status]
//! complete = "#008000"
//! not_reviewed = "#d3d3d3"
//! started = "#ff5d27ff"
//! motivation = "#0e1fa3ff"
//!
//! [marker]
//! both = "red"
//! generalist = "yellow"
//! specialist = "green"
//! none = "black"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ConfigError;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct StatusColors {
    pub complete: String,
    pub not_reviewed: String,
    pub started: String,
    pub motivation: String,
}

impl Default for StatusColors {
    fn default() -> Self {
        Self {
            complete: "#008000".to_string(),
            not_reviewed: "#d3d3d3".to_string(),
            started: "#ff5d27ff".to_string(),
            motivation: "#0e1fa3ff".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkerColors {
    pub both: String,
    pub generalist: String,
    pub specialist: String,
    pub none: String,
}

impl Default for MarkerColors {
    fn default() -> Self {
        Self {
            both: "red".to_string(),
            generalist: "yellow".to_string(),
            specialist: "green".to_string(),
            none: "black".to_string(),
        }
    }
}

/// Color tokens handed to the renderer for each classification outcome.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Palette {
    pub status: StatusColors,
    pub marker: MarkerColors,
}

impl Palette {
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let palette = Self::from_toml(&source)?;
        info!(path = %path.display(), "loaded palette");
        Ok(palette)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_keeps_defaults() {
        assert_eq!(Palette::from_toml("").unwrap(), Palette::default());
    }

    #[test]
    fn partial_overrides_keep_remaining_defaults() {
        let palette = Palette::from_toml(
            r##"
            [status]
            complete = "#00ff00"

            [marker]
            none = "gray"
            "##,
        )
        .unwrap();
        assert_eq!(palette.status.complete, "#00ff00");
        assert_eq!(palette.status.started, "#ff5d27ff");
        assert_eq!(palette.marker.none, "gray");
        assert_eq!(palette.marker.both, "red");
    }

    #[test]
    fn unknown_tokens_are_rejected() {
        let result = Palette::from_toml("[status]\ncompleted = \"#000\"\n");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"[marker]\nboth = \"purple\"\n").unwrap();
        let palette = Palette::load(file.path()).unwrap();
        assert_eq!(palette.marker.both, "purple");
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = Palette::load(Path::new("/nonexistent/palette.toml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/palette.toml"));
    }
}

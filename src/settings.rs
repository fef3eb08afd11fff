use crate::config::DrawSettings;
use crate::error::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Contents of `config.toml`
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub draw: DrawSettings,
}

impl Settings {
    /// Load from the default location; a missing file yields defaults
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|source| Error::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hashflake")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DigestKind;

    #[test]
    fn partial_draw_table_keeps_other_defaults() {
        let settings = Settings::parse(
            r##"
[draw]
size = 450
fill_color = "#eef"
digest = "sha256"
"##,
        )
        .unwrap();
        assert_eq!(settings.draw.size, 450);
        assert_eq!(settings.draw.fill_color, "#eef");
        assert_eq!(settings.draw.digest, DigestKind::Sha256);
        assert_eq!(settings.draw.max_branches, DrawSettings::default().max_branches);
    }

    #[test]
    fn empty_file_is_default() {
        let settings = Settings::parse("").unwrap();
        assert_eq!(settings.draw, DrawSettings::default());
    }

    #[test]
    fn missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(settings.draw, DrawSettings::default());
    }

    #[test]
    fn broken_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[draw]\nsize = \"big\"\n").unwrap();
        assert!(matches!(Settings::load_from(&path), Err(Error::Settings { .. })));
    }
}

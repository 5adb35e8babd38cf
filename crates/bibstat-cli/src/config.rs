//! Configuration loading from TOML files

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use bibstat_archive::{ArchiveConfig, LinkTemplates};

/// Global configuration for bibstat
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
    pub archive: ArchiveSection,
    pub stop_words: StopWordsConfig,
    pub links: LinksConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Bibliographic CSV export
    pub path: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./data/export.csv"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for the derived tables
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./data/derived"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArchiveSection {
    pub institution_marker: String,
}

impl Default for ArchiveSection {
    fn default() -> Self {
        Self {
            institution_marker: ArchiveConfig::default().institution_marker,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct StopWordsConfig {
    pub authors: Vec<String>,
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LinksConfig {
    pub resolver: String,
    pub pdf: String,
    pub voyant: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        let t = LinkTemplates::default();
        Self {
            resolver: t.resolver,
            pdf: t.pdf,
            voyant: t.voyant,
        }
    }
}

impl Config {
    /// Load configuration from default locations
    ///
    /// Search order:
    /// 1. ./bibstat.toml (current directory)
    /// 2. ~/.config/bibstat/config.toml
    ///
    /// If no config file found, returns default config.
    pub fn load() -> Result<Self> {
        let local_config = PathBuf::from("bibstat.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = directories::ProjectDirs::from("", "", "bibstat") {
            let user_config = config_dir.config_dir().join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn archive_config(&self) -> ArchiveConfig {
        ArchiveConfig {
            institution_marker: self.archive.institution_marker.clone(),
            author_stop_words: self.stop_words.authors.clone(),
            keyword_stop_words: self.stop_words.keywords.clone(),
        }
    }

    pub fn link_templates(&self) -> LinkTemplates {
        LinkTemplates {
            resolver: self.links.resolver.clone(),
            pdf: self.links.pdf.clone(),
            voyant: self.links.voyant.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.input.path, PathBuf::from("./data/export.csv"));
        assert_eq!(config.output.dir, PathBuf::from("./data/derived"));
        assert_eq!(config.archive.institution_marker, "nordiskamuseet");
        assert!(config.stop_words.keywords.is_empty());
        assert!(config.links.resolver.contains("{nbn}"));
    }

    #[test]
    fn parse_config_toml() {
        let toml = r#"
[input]
path = "/tmp/export.csv"

[archive]
institution_marker = "kb"

[stop_words]
keywords = ["Fataburen"]
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.input.path, PathBuf::from("/tmp/export.csv"));
        assert_eq!(config.output.dir, PathBuf::from("./data/derived"));

        let archive = config.archive_config();
        assert_eq!(archive.institution_marker, "kb");
        assert_eq!(archive.keyword_stop_words, vec!["Fataburen"]);
        assert!(archive.author_stop_words.is_empty());
    }

    #[test]
    fn links_override() {
        let toml = r#"
[links]
pdf = "https://example.org/{pid}.pdf"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let links = config.link_templates();
        assert_eq!(links.pdf, "https://example.org/{pid}.pdf");
        assert_eq!(links.resolver, LinkTemplates::default().resolver);
    }

    #[test]
    fn from_file_reports_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::from_file(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SdkError, SdkResult};

/// Per-repository settings.
///
/// Every field has a default, so a config file only needs the keys it wants
/// to override:
///
/// ```toml
/// author = "Ada <ada@example.com>"
/// log_limit = 50
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Recorded as the author of every commit.
    pub author: String,
    /// Number of entries returned by `Repository::log_default`.
    pub log_limit: usize,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            author: "snapvc".into(),
            log_limit: 20,
        }
    }
}

impl RepositoryConfig {
    /// Default settings with a different author.
    pub fn with_author(author: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            ..Default::default()
        }
    }

    pub fn from_toml_str(s: &str) -> SdkResult<Self> {
        toml::from_str(s).map_err(|e| SdkError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> SdkResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| SdkError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> SdkResult<String> {
        toml::to_string(self).map_err(|e| SdkError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = RepositoryConfig::default();
        assert_eq!(c.author, "snapvc");
        assert_eq!(c.log_limit, 20);
    }

    #[test]
    fn partial_toml_takes_defaults() {
        let c = RepositoryConfig::from_toml_str("author = \"ada\"").unwrap();
        assert_eq!(c.author, "ada");
        assert_eq!(c.log_limit, 20);
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(
            RepositoryConfig::from_toml_str("").unwrap(),
            RepositoryConfig::default()
        );
    }

    #[test]
    fn bad_toml_is_config_error() {
        let err = RepositoryConfig::from_toml_str("log_limit = \"many\"").unwrap_err();
        assert!(matches!(err, SdkError::Config(_)));
    }

    #[test]
    fn toml_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapvc.toml");
        let config = RepositoryConfig {
            author: "grace".into(),
            log_limit: 3,
        };
        std::fs::write(&path, config.to_toml_string().unwrap()).unwrap();
        assert_eq!(RepositoryConfig::from_file(&path).unwrap(), config);
    }

    #[test]
    fn missing_file_is_config_error() {
        let err = RepositoryConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, SdkError::Config(msg) if msg.contains("here.toml")));
    }
}

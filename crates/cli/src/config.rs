//! Operator console configuration
//!
//! An optional `config.toml` in the platform data directory can override
//! the database location; everything else has a sensible default.

use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;
use stayhub_core::{Error, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Override for the SQLite database path
    pub db_path: Option<PathBuf>,
}

impl Config {
    /// Load config from the data directory, defaulting when absent
    pub fn load() -> Result<Self> {
        let path = data_dir()?.join("config.toml");
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)?;
        toml::from_str(&raw).map_err(|e| {
            Error::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("invalid config {}: {e}", path.display()),
            ))
        })
    }

    /// Resolve the database path, creating its parent directory
    pub fn database_path(&self) -> Result<PathBuf> {
        let path = match &self.db_path {
            Some(path) => path.clone(),
            None => data_dir()?.join("stayhub.db"),
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        Ok(path)
    }
}

fn data_dir() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("dev", "stayhub", "stayhub").ok_or_else(|| {
        Error::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Could not determine data directory",
        ))
    })?;
    Ok(dirs.data_dir().to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_db_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            db_path: Some(dir.path().join("nested").join("console.db")),
        };

        let path = config.database_path().unwrap();
        assert!(path.ends_with("console.db"));
        assert!(path.parent().unwrap().exists());
    }

    #[test]
    fn test_config_parses() {
        let config: Config = toml::from_str("db_path = \"/tmp/stayhub.db\"").unwrap();
        assert_eq!(config.db_path.unwrap(), PathBuf::from("/tmp/stayhub.db"));

        let config: Config = toml::from_str("").unwrap();
        assert!(config.db_path.is_none());
    }
}

//! Clarity configuration.
//!
//! Loaded from `~/.clarity/config.toml`. Defaults apply when the file is
//! missing; `CLARITY_DATA_DIR` overrides where data is kept.

use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{env, fs};

use serde::Deserialize;

/// Environment variable that overrides `data-dir`.
pub const DATA_DIR_ENV: &str = "CLARITY_DATA_DIR";

const DEFAULT_ACKNOWLEDGE_DELAY_MS: u64 = 1000;

/// Clarity configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding the stored logs. Defaults to `~/.clarity/data`.
    pub data_dir: Option<PathBuf>,

    /// How long a check-in submission waits for acknowledgment.
    pub acknowledge_delay_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            acknowledge_delay_ms: DEFAULT_ACKNOWLEDGE_DELAY_MS,
        }
    }
}

impl Config {
    /// Load config from `~/.clarity/config.toml`, falling back to defaults
    /// when it doesn't exist. Returns an error if it exists but is invalid.
    pub fn load() -> Result<Self, String> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load config from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, String> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;

        toml::from_str(&contents).map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `~/.clarity/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".clarity").join("config.toml"))
    }

    /// Where stored logs live.
    ///
    /// Checks in order: `CLARITY_DATA_DIR`, `data-dir`, `~/.clarity/data`.
    pub fn resolve_data_dir(&self) -> Result<PathBuf, String> {
        if let Ok(dir) = env::var(DATA_DIR_ENV)
            && !dir.is_empty()
        {
            return Ok(PathBuf::from(dir));
        }

        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }

        dirs::home_dir()
            .map(|h| h.join(".clarity").join("data"))
            .ok_or_else(|| "could not determine home directory".to_string())
    }

    pub fn acknowledge_delay(&self) -> Duration {
        Duration::from_millis(self.acknowledge_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.acknowledge_delay(), Duration::from_secs(1));
    }

    #[test]
    fn reads_kebab_case_keys() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "data-dir = \"/tmp/clarity\"\nacknowledge-delay-ms = 0\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/clarity")));
        assert_eq!(config.acknowledge_delay(), Duration::ZERO);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "data-dir = \"/srv/clarity\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.acknowledge_delay_ms, 1000);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "acknowledge-delay-ms = \"soon\"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.starts_with("invalid config at"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "default-identity = \"me\"\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }
}

use crate::error::SettingsError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::Path;

/// Server settings, read from an optional TOML file. Missing keys take their defaults.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub listen: SocketAddr,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen: SocketAddr::from(([127, 0, 0, 1], 8501)),
            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = fs::read_to_string(path)?;
        let settings: Self = toml::from_str(&content)?;
        Ok(settings)
    }

    /// Settings from `path` when given, defaults otherwise.
    pub fn load<P: AsRef<Path>>(path: Option<P>) -> Result<Self, SettingsError> {
        match path {
            Some(path) => Self::read(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SETTINGS_PATH: &str = "/tmp/sat_downloader_settings.toml";

    #[test]
    fn test_defaults() {
        let settings = Settings::load(None::<&Path>).unwrap();
        assert_eq!(settings.listen.port(), 8501);
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_partial_toml() {
        let settings: Settings = toml::from_str(r#"listen = "0.0.0.0:9000""#).unwrap();
        assert_eq!(settings.listen, "0.0.0.0:9000".parse::<SocketAddr>().unwrap());
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_read_toml() {
        let path = Path::new(SETTINGS_PATH);
        fs::write(path, "listen = \"127.0.0.1:8080\"\nlog_level = \"debug\"\n").unwrap();

        let settings = Settings::read(path).unwrap();
        assert_eq!(settings.listen.port(), 8080);
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_read_missing_file() {
        let result = Settings::read("/tmp/sat_downloader_does_not_exist.toml");
        assert!(matches!(result, Err(SettingsError::Io(_))));
    }
}

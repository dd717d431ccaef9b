//! CLI configuration management.

use kiosk_core::{AspectRatioBounds, Error, Orientation, Result, SelectionConfig};
use kiosk_immich::ServerConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const ENV_PREFIX: &str = "KIOSK_";

/// Top-level kiosk configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KioskConfig {
    /// Photo server connection.
    #[serde(default)]
    pub immich: ServerConfig,
    /// Selection defaults applied to every request.
    #[serde(default)]
    pub selection: SelectionConfig,
    /// Restrict selection to one viewport orientation.
    #[serde(default)]
    pub orientation: Orientation,
    /// Expire cached batches after this many seconds.
    #[serde(default)]
    pub cache_ttl_secs: Option<u64>,
    /// Log output format.
    #[serde(default)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl KioskConfig {
    /// Load from `path`, or the default location, then apply `KIOSK_*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => Some(path.to_path_buf()),
            None => Self::config_path(),
        };

        let mut config = match path {
            Some(path) if path.exists() => Self::from_file(&path)?,
            _ => Self::default(),
        };
        config.apply_env(std::env::vars())?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::InvalidConfig(format!("cannot read {}: {}", path.display(), e))
        })?;
        serde_yaml::from_str(&contents)
            .map_err(|e| Error::InvalidConfig(format!("cannot parse {}: {}", path.display(), e)))
    }

    /// Get the default configuration file path.
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("app", "immichkiosk", "kiosk")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Override settings from `KIOSK_*` variables. Unknown names are ignored.
    pub fn apply_env<I>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            let Some(key) = name.strip_prefix(ENV_PREFIX) else {
                continue;
            };
            match key {
                "IMMICH_URL" => self.immich.url = value,
                "IMMICH_API_KEY" => self.immich.api_key = value,
                "IMMICH_TIMEOUT" => self.immich.timeout_secs = parse_number(&name, &value)?,
                "SHOW_ARCHIVED" => self.selection.show_archived = parse_bool(&name, &value)?,
                "CACHE" => self.selection.cache_enabled = parse_bool(&name, &value)?,
                "FETCHED_ASSETS_SIZE" => self.selection.fetch_size = parse_number(&name, &value)?,
                "MAX_RETRIES" => self.selection.max_retries = parse_number(&name, &value)?,
                "CACHE_TTL" => self.cache_ttl_secs = Some(parse_number(&name, &value)?),
                "ORIENTATION" => {
                    self.orientation = match value.to_ascii_lowercase().as_str() {
                        "any" | "" => Orientation::Any,
                        "portrait" => Orientation::Portrait,
                        "landscape" => Orientation::Landscape,
                        _ => {
                            return Err(Error::InvalidConfig(format!(
                                "{}: unknown orientation '{}'",
                                name, value
                            )));
                        }
                    }
                }
                _ => {}
            }
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.cache_ttl_secs == Some(0) {
            return Err(Error::InvalidConfig(
                "cache_ttl_secs must be greater than zero".into(),
            ));
        }
        self.selection_config().validate()
    }

    /// Selection snapshot with the orientation folded into the ratio bounds.
    pub fn selection_config(&self) -> SelectionConfig {
        let mut selection = self.selection.clone();
        if self.orientation != Orientation::Any {
            selection.aspect_ratio = AspectRatioBounds::for_orientation(self.orientation);
        }
        selection
    }

    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache_ttl_secs.map(Duration::from_secs)
    }

    /// Copy safe to print: the API key is masked.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.immich.api_key.is_empty() {
            copy.immich.api_key = "********".to_string();
        }
        copy
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(Error::InvalidConfig(format!(
            "{}: expected a boolean, got '{}'",
            name, value
        ))),
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| {
        Error::InvalidConfig(format!("{}: expected a number, got '{}'", name, value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_env_overrides() {
        let mut config = KioskConfig::default();
        config
            .apply_env(vars(&[
                ("KIOSK_IMMICH_URL", "192.168.1.1:2283"),
                ("KIOSK_IMMICH_API_KEY", "12345"),
                ("KIOSK_SHOW_ARCHIVED", "true"),
                ("KIOSK_CACHE", "0"),
                ("KIOSK_FETCHED_ASSETS_SIZE", "50"),
                ("KIOSK_ORIENTATION", "Portrait"),
                ("HOME", "/root"),
            ]))
            .unwrap();

        assert_eq!(config.immich.url, "192.168.1.1:2283");
        assert_eq!(config.immich.api_key, "12345");
        assert!(config.selection.show_archived);
        assert!(!config.selection.cache_enabled);
        assert_eq!(config.selection.fetch_size, 50);
        assert_eq!(config.orientation, Orientation::Portrait);
        assert!(!config.selection_config().aspect_ratio.is_unbounded());
    }

    #[test]
    fn test_bad_env_value_rejected() {
        let mut config = KioskConfig::default();
        let err = config
            .apply_env(vars(&[("KIOSK_SHOW_ARCHIVED", "maybe")]))
            .unwrap_err();
        assert!(err.to_string().contains("KIOSK_SHOW_ARCHIVED"));

        let err = config
            .apply_env(vars(&[("KIOSK_FETCHED_ASSETS_SIZE", "lots")]))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn test_zero_cache_ttl_rejected() {
        let mut config = KioskConfig::default();
        config.apply_env(vars(&[("KIOSK_CACHE_TTL", "0")])).unwrap();
        assert!(matches!(config.validate(), Err(Error::InvalidConfig(_))));

        config.cache_ttl_secs = Some(60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_with_partial_fields() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "immich:\n  url: https://photos.example.com\n  api_key: abc\nselection:\n  show_archived: true\ncache_ttl_secs: 300\nlog_format: json"
        )
        .unwrap();

        let config = KioskConfig::from_file(file.path()).unwrap();
        assert_eq!(config.immich.url, "https://photos.example.com");
        assert_eq!(config.immich.timeout_secs, 10);
        assert!(config.selection.show_archived);
        assert!(config.selection.cache_enabled);
        assert_eq!(config.selection.fetch_size, 1000);
        assert_eq!(config.cache_ttl(), Some(Duration::from_secs(300)));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_redacted_masks_api_key() {
        let mut config = KioskConfig::default();
        config.immich.api_key = "secret".into();
        assert_eq!(config.redacted().immich.api_key, "********");
        assert_eq!(config.immich.api_key, "secret");
    }
}

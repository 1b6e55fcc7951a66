//! On-disk configuration file.
//!
//! Settings live in an INI file at `{config_dir}/shopctx/config.ini`:
//!
//! ```ini
//! [api]
//! base_url = https://api.example.com/shopper/shopper-context/v1
//! organization = f_ecom_org
//! site_id = RefArch
//! client_id = client-abc
//! access_token = secret-token
//! timeout = 30
//!
//! [cache]
//! memory_size = 64MB
//! ttl = 300
//! ```
//!
//! Missing keys fall back to defaults; a missing file yields the default
//! configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use thiserror::Error;

use crate::client::{ClientConfig, DEFAULT_TIMEOUT_SECS};

/// Default memory cache size (64 MB).
pub const DEFAULT_MEMORY_CACHE_SIZE: usize = 64 * 1024 * 1024;

/// Default cache entry TTL in seconds.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 300;

/// Errors loading or saving the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read or written.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid INI.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A value is present but unusable.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue {
        /// Offending key.
        key: String,
        /// What was wrong with it.
        message: String,
    },
}

/// `[api]` section: endpoint and credentials.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiFileConfig {
    /// API base URL up to the version segment.
    pub base_url: String,
    /// Organization identifier.
    pub organization: String,
    /// Default site identifier.
    pub site_id: String,
    /// Client identifier for attribution.
    pub client_id: String,
    /// Static bearer token.
    pub access_token: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiFileConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.example.com/shopper/shopper-context/v1".to_string(),
            organization: String::new(),
            site_id: String::new(),
            client_id: String::new(),
            access_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// `[cache]` section: memory cache sizing.
#[derive(Clone, Debug, PartialEq)]
pub struct CacheFileConfig {
    /// Maximum memory cache size in bytes.
    pub memory_size: usize,
    /// Entry TTL in seconds; 0 disables expiry.
    pub ttl_secs: u64,
}

impl Default for CacheFileConfig {
    fn default() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_CACHE_SIZE,
            ttl_secs: DEFAULT_CACHE_TTL_SECS,
        }
    }
}

/// The loaded configuration file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ConfigFile {
    /// `[api]` section.
    pub api: ApiFileConfig,
    /// `[cache]` section.
    pub cache: CacheFileConfig,
}

impl ConfigFile {
    /// The default config file location, if a config directory exists.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("shopctx").join("config.ini"))
    }

    /// Loads from the default location.
    ///
    /// A missing file (or missing config directory) yields defaults.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Loads from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Parse(e.to_string()))?;
        let defaults = Self::default();

        let get = |section: &str, key: &str| {
            ini.get_from(Some(section), key)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        let timeout_secs = match get("api", "timeout") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "api.timeout".to_string(),
                message: format!("expected seconds, got '{}'", raw),
            })?,
            None => defaults.api.timeout_secs,
        };
        let memory_size = match get("cache", "memory_size") {
            Some(raw) => parse_size(&raw).map_err(|message| ConfigError::InvalidValue {
                key: "cache.memory_size".to_string(),
                message,
            })?,
            None => defaults.cache.memory_size,
        };
        let ttl_secs = match get("cache", "ttl") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "cache.ttl".to_string(),
                message: format!("expected seconds, got '{}'", raw),
            })?,
            None => defaults.cache.ttl_secs,
        };

        Ok(Self {
            api: ApiFileConfig {
                base_url: get("api", "base_url").unwrap_or(defaults.api.base_url),
                organization: get("api", "organization").unwrap_or(defaults.api.organization),
                site_id: get("api", "site_id").unwrap_or(defaults.api.site_id),
                client_id: get("api", "client_id").unwrap_or(defaults.api.client_id),
                access_token: get("api", "access_token"),
                timeout_secs,
            },
            cache: CacheFileConfig {
                memory_size,
                ttl_secs,
            },
        })
    }

    /// Writes the configuration to an explicit path, creating parent
    /// directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let mut ini = Ini::new();
        let mut api = ini.with_section(Some("api"));
        api.set("base_url", &self.api.base_url)
            .set("organization", &self.api.organization)
            .set("site_id", &self.api.site_id)
            .set("client_id", &self.api.client_id)
            .set("timeout", self.api.timeout_secs.to_string());
        if let Some(token) = &self.api.access_token {
            ini.with_section(Some("api")).set("access_token", token);
        }
        ini.with_section(Some("cache"))
            .set("memory_size", format_size(self.cache.memory_size))
            .set("ttl", self.cache.ttl_secs.to_string());

        ini.write_to_file(path)?;
        Ok(())
    }

    /// Translates the `[api]` section into a client configuration.
    pub fn to_client_config(&self) -> ClientConfig {
        ClientConfig {
            base_url: self.api.base_url.clone(),
            organization_id: self.api.organization.clone(),
            site_id: self.api.site_id.clone(),
            client_id: self.api.client_id.clone(),
            access_token: self.api.access_token.clone(),
            timeout: Duration::from_secs(self.api.timeout_secs),
        }
    }
}

/// Parses a human-readable size: `123`, `512KB`, `64MB`, `2GB`.
///
/// Units are binary (KB = 1024 bytes) and case-insensitive.
pub fn parse_size(raw: &str) -> Result<usize, String> {
    let raw = raw.trim();
    let upper = raw.to_ascii_uppercase();

    let (number, multiplier) = if let Some(n) = upper.strip_suffix("GB") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = upper.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = upper.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = upper.strip_suffix('B') {
        (n, 1)
    } else {
        (upper.as_str(), 1)
    };

    number
        .trim()
        .parse::<usize>()
        .map(|n| n * multiplier)
        .map_err(|_| format!("expected a size like '64MB', got '{}'", raw))
}

/// Formats a byte count with the largest fitting binary unit.
pub fn format_size(bytes: usize) -> String {
    const GB: usize = 1024 * 1024 * 1024;
    const MB: usize = 1024 * 1024;
    const KB: usize = 1024;

    if bytes >= GB && bytes % GB == 0 {
        format!("{}GB", bytes / GB)
    } else if bytes >= MB && bytes % MB == 0 {
        format!("{}MB", bytes / MB)
    } else if bytes >= KB && bytes % KB == 0 {
        format!("{}KB", bytes / KB)
    } else {
        format!("{}B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_defaults_when_file_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[api]\nsite_id = RefArch\n").unwrap();

        let config = ConfigFile::load_from(&path).unwrap();
        assert_eq!(config.api.site_id, "RefArch");
        assert_eq!(config.api.timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert_eq!(config.cache.memory_size, DEFAULT_MEMORY_CACHE_SIZE);
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.ini");

        let config = ConfigFile {
            api: ApiFileConfig {
                organization: "f_ecom_org".to_string(),
                site_id: "RefArch".to_string(),
                client_id: "client-abc".to_string(),
                access_token: Some("tok".to_string()),
                timeout_secs: 10,
                ..Default::default()
            },
            cache: CacheFileConfig {
                memory_size: 32 * 1024 * 1024,
                ttl_secs: 60,
            },
        };
        config.save_to(&path).unwrap();

        let loaded = ConfigFile::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_timeout_reports_key() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.ini");
        std::fs::write(&path, "[api]\ntimeout = soon\n").unwrap();

        let err = ConfigFile::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("api.timeout"));
    }

    #[test]
    fn test_parse_size_units() {
        assert_eq!(parse_size("123").unwrap(), 123);
        assert_eq!(parse_size("123B").unwrap(), 123);
        assert_eq!(parse_size("2kb").unwrap(), 2048);
        assert_eq!(parse_size("64MB").unwrap(), 64 * 1024 * 1024);
        assert_eq!(parse_size(" 2 GB ").unwrap(), 2 * 1024 * 1024 * 1024);
        assert!(parse_size("lots").is_err());
        assert!(parse_size("12.5MB").is_err());
    }

    #[test]
    fn test_format_size_picks_largest_exact_unit() {
        assert_eq!(format_size(123), "123B");
        assert_eq!(format_size(2048), "2KB");
        assert_eq!(format_size(64 * 1024 * 1024), "64MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3GB");
        assert_eq!(format_size(1536), "1536B".to_string());
    }

    proptest! {
        #[test]
        fn prop_parse_size_inverts_format_size(bytes in 0usize..=1 << 40) {
            prop_assert_eq!(parse_size(&format_size(bytes)).unwrap(), bytes);
        }
    }
}

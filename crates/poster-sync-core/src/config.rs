use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default sidecar cache file name, stored inside the poster folder.
pub const DEFAULT_CACHE_FILE: &str = ".poster_cache.json";

/// Log level for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Map onto the `log` crate's filter type
    pub fn to_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            other => Err(Error::Configuration(format!(
                "unknown log level '{other}'"
            ))),
        }
    }
}

/// Configuration for the poster sync process
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the media server
    pub server_url: String,

    /// Authentication token for the media server
    pub token: String,

    /// Folder of poster images; each file stem names a collection
    pub poster_dir: PathBuf,

    /// Re-upload every poster regardless of current remote state
    pub reapply_posters: bool,

    /// Treat runs of hyphens and spaces as equivalent when matching names
    pub normalize_hyphens: bool,

    /// Per-request timeout for remote calls
    pub request_timeout: Duration,

    /// Maximum upload attempts per collection
    pub max_retries: u32,

    /// Number of worker threads for processing (0 = auto, 1 = sequential)
    pub workers: usize,

    /// Console log level
    pub log_level: LogLevel,

    /// Optional log file capturing debug output
    pub log_path: Option<PathBuf>,

    /// Cache file location; defaults to a sidecar inside the poster folder
    pub cache_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_url: String::new(),
            token: String::new(),
            poster_dir: PathBuf::from("/posters"),
            reapply_posters: false,
            normalize_hyphens: true,
            request_timeout: Duration::from_secs(30),
            max_retries: 3,
            workers: 4,
            log_level: LogLevel::Info,
            log_path: None,
            cache_path: None,
        }
    }
}

impl Config {
    /// Check that required settings are present before connecting
    pub fn validate(&self) -> Result<()> {
        if self.server_url.is_empty() {
            return Err(Error::Configuration(
                "media server URL must be set".to_string(),
            ));
        }
        if self.token.is_empty() {
            return Err(Error::Configuration(
                "media server token must be set".to_string(),
            ));
        }
        if self.max_retries == 0 {
            return Err(Error::Configuration(
                "max retries must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Resolved worker count; `workers == 0` means one per CPU
    pub fn worker_count(&self) -> usize {
        if self.workers == 0 {
            num_cpus::get()
        } else {
            self.workers
        }
    }

    /// Where the poster state cache lives on disk
    pub fn cache_file(&self) -> PathBuf {
        self.cache_path
            .clone()
            .unwrap_or_else(|| self.poster_dir.join(DEFAULT_CACHE_FILE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_missing_url_and_token() {
        let config = Config::default();
        assert!(matches!(
            config.validate(),
            Err(Error::Configuration(_))
        ));

        let config = Config {
            server_url: "http://localhost:32400".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(Error::Configuration(_))
        ));

        let config = Config {
            server_url: "http://localhost:32400".to_string(),
            token: "secret".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_retries() {
        let config = Config {
            server_url: "http://localhost:32400".to_string(),
            token: "secret".to_string(),
            max_retries: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_worker_count_auto() {
        let config = Config {
            workers: 0,
            ..Config::default()
        };
        assert!(config.worker_count() >= 1);

        let config = Config {
            workers: 2,
            ..Config::default()
        };
        assert_eq!(config.worker_count(), 2);
    }

    #[test]
    fn test_cache_file_defaults_to_sidecar() {
        let config = Config {
            poster_dir: PathBuf::from("/posters"),
            ..Config::default()
        };
        assert_eq!(
            config.cache_file(),
            PathBuf::from("/posters").join(DEFAULT_CACHE_FILE)
        );

        let config = Config {
            cache_path: Some(PathBuf::from("/tmp/cache.json")),
            ..Config::default()
        };
        assert_eq!(config.cache_file(), PathBuf::from("/tmp/cache.json"));
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("Warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
        assert!("verbose".parse::<LogLevel>().is_err());
    }
}

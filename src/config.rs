// Mon Oct 19 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Size in bytes of pointers and of the vtable pointer slot.
    pub pointer_size: usize,
    pub emit_accessors: bool,
    pub emit_destructors: bool,
    pub emit_comments: bool,
    /// `_Static_assert` checks that the C compiler agrees with the planner.
    pub emit_layout_asserts: bool,
    /// Plan independent classes of the same depth on a thread pool.
    pub parallel: bool,
    pub max_threads: usize,
    /// Write output even when some classes failed.
    pub allow_partial: bool,
    pub indent_width: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pointer_size: 8,
            emit_accessors: true,
            emit_destructors: true,
            emit_comments: true,
            emit_layout_asserts: false,
            parallel: false,
            max_threads: num_cpus::get(),
            allow_partial: false,
            indent_width: 4,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("json");
        if !ext.eq_ignore_ascii_case("json") {
            return Err(ConfigError::UnsupportedFormat(ext.to_string()));
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&contents)?;
        config.validate()?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn with_pointer_size(mut self, size: usize) -> Self {
        self.pointer_size = size;
        self
    }

    pub fn with_accessors(mut self, enabled: bool) -> Self {
        self.emit_accessors = enabled;
        self
    }

    pub fn with_destructors(mut self, enabled: bool) -> Self {
        self.emit_destructors = enabled;
        self
    }

    pub fn with_comments(mut self, enabled: bool) -> Self {
        self.emit_comments = enabled;
        self
    }

    pub fn with_layout_asserts(mut self, enabled: bool) -> Self {
        self.emit_layout_asserts = enabled;
        self
    }

    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    pub fn with_max_threads(mut self, threads: usize) -> Self {
        self.max_threads = threads;
        self
    }

    pub fn with_allow_partial(mut self, enabled: bool) -> Self {
        self.allow_partial = enabled;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !matches!(self.pointer_size, 4 | 8) {
            return Err(ConfigError::Invalid(format!(
                "pointer_size must be 4 or 8, got {}",
                self.pointer_size
            )));
        }
        if self.max_threads == 0 {
            return Err(ConfigError::Invalid("max_threads must be greater than 0".to_string()));
        }
        if self.indent_width > 16 {
            return Err(ConfigError::Invalid("indent_width must be at most 16".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert_eq!(config.pointer_size, 8);
        assert!(config.emit_accessors);
        assert!(!config.allow_partial);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_pointer_size() {
        let config = Config::new().with_pointer_size(2);
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        assert!(Config::new().with_max_threads(0).validate().is_err());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("classgen.json");
        fs::write(&path, r#"{ "pointer_size": 4, "emit_comments": false }"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.pointer_size, 4);
        assert!(!config.emit_comments);
        assert!(config.emit_destructors);
        assert_eq!(config.indent_width, 4);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out").join("config.json");
        let config = Config::new().with_layout_asserts(true).with_max_threads(2);
        config.save(&path).unwrap();
        assert_eq!(Config::load(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_and_unsupported_files() {
        assert!(matches!(
            Config::load("/nonexistent/classgen.json"),
            Err(ConfigError::NotFound(_))
        ));
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "").unwrap();
        assert!(matches!(Config::load(&path), Err(ConfigError::UnsupportedFormat(_))));
    }
}

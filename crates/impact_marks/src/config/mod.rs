//! Configuration system
//!
//! Mark behaviour is driven by a small set of user settings: whether marks are
//! drawn at all, how long they live, how long the fade-out at the end of their
//! life takes, and how many the pool can hold.

pub use serde::{Serialize, Deserialize};

use crate::foundation::time::Millis;

/// Default number of pooled marks
pub const DEFAULT_MAX_MARK_POLYS: usize = 4096;

/// Default total mark lifetime in milliseconds
pub const DEFAULT_MARK_TIME: Millis = 10_000;

/// Default fade-out window in milliseconds
pub const DEFAULT_MARK_FADE_TIME: Millis = 1_000;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Values parsed but are not usable together
    #[error("Invalid mark settings: {0}")]
    Invalid(String),
}

/// # Mark Settings
///
/// Read-only inputs to the mark system. Missing fields fall back to the
/// defaults, so a settings file only needs the values it changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkSettings {
    /// Draw and store marks at all
    pub enabled: bool,
    /// Total lifetime of a mark in milliseconds
    pub mark_time: Millis,
    /// Length of the fade-out at the end of a mark's life, in milliseconds
    pub mark_fade_time: Millis,
    /// Log the origin of every debug-flagged impact
    pub debug_impact_origin: bool,
    /// Pool capacity
    pub max_mark_polys: usize,
}

impl Default for MarkSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            mark_time: DEFAULT_MARK_TIME,
            mark_fade_time: DEFAULT_MARK_FADE_TIME,
            debug_impact_origin: false,
            max_mark_polys: DEFAULT_MAX_MARK_POLYS,
        }
    }
}

impl Config for MarkSettings {}

impl MarkSettings {
    /// Enable or disable marks
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Set total lifetime and fade window
    pub fn with_times(mut self, mark_time: Millis, mark_fade_time: Millis) -> Self {
        self.mark_time = mark_time;
        self.mark_fade_time = mark_fade_time;
        self
    }

    /// Enable or disable debug origin logging
    pub fn with_debug_impact_origin(mut self, enabled: bool) -> Self {
        self.debug_impact_origin = enabled;
        self
    }

    /// Set pool capacity
    pub fn with_max_mark_polys(mut self, max_mark_polys: usize) -> Self {
        self.max_mark_polys = max_mark_polys;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_mark_polys == 0 {
            return Err(ConfigError::Invalid("max_mark_polys must be at least 1".to_string()));
        }

        if self.mark_time < 0 || self.mark_fade_time < 0 {
            return Err(ConfigError::Invalid(format!(
                "mark times cannot be negative (mark_time {}, mark_fade_time {})",
                self.mark_time, self.mark_fade_time
            )));
        }

        if self.mark_fade_time > self.mark_time {
            return Err(ConfigError::Invalid(format!(
                "mark_fade_time {} exceeds mark_time {}",
                self.mark_fade_time, self.mark_time
            )));
        }

        Ok(())
    }
}

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::audit::{NavAudit, NullNavAudit};
use crate::error::Result;
use crate::logging::{FileSink, LogLevel, Logger};

/// Tunables of the navigation core. Every field has a default, so a partial
/// JSON document is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavSettings {
    /// Upper bound on stack depth; `0` disables the bound.
    pub max_stack_depth: usize,
    pub tab_bar_height: u32,
    /// Target of `back`/`pop_to_top` commands that name no navigator.
    pub root_navigator_id: String,
    /// Target of navigate commands flagged `fullscreen`.
    pub fullscreen_navigator_id: Option<String>,
    pub metrics_target: String,
    /// JSON-lines log file opened by [`NavConfig::from_settings`].
    pub log_file: Option<LogFileSettings>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogFileSettings {
    pub path: PathBuf,
    /// The file is truncated once a record would push it past this size.
    #[serde(default = "LogFileSettings::default_max_bytes")]
    pub max_bytes: u64,
    #[serde(default = "LogFileSettings::default_min_level")]
    pub min_level: LogLevel,
}

impl LogFileSettings {
    fn default_max_bytes() -> u64 {
        1024 * 1024
    }

    fn default_min_level() -> LogLevel {
        LogLevel::Info
    }
}

impl Default for NavSettings {
    fn default() -> Self {
        Self {
            max_stack_depth: 32,
            tab_bar_height: 50,
            root_navigator_id: "Root".to_string(),
            fullscreen_navigator_id: None,
            metrics_target: "nav::metrics".to_string(),
            log_file: None,
        }
    }
}

impl NavSettings {
    pub fn from_json_str(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Effective stack bound. A bound always leaves room for the base screen
    /// and one entry above it.
    pub fn stack_bound(&self) -> Option<usize> {
        match self.max_stack_depth {
            0 => None,
            depth => Some(depth.max(2)),
        }
    }
}

/// Everything a [`NavContext`](super::NavContext) is built from.
#[derive(Clone)]
pub struct NavConfig {
    pub settings: NavSettings,
    pub logger: Option<Logger>,
    pub audit: Arc<dyn NavAudit>,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            settings: NavSettings::default(),
            logger: None,
            audit: Arc::new(NullNavAudit),
        }
    }
}

impl fmt::Debug for NavConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NavConfig")
            .field("settings", &self.settings)
            .field("logger", &self.logger.is_some())
            .finish_non_exhaustive()
    }
}

impl NavConfig {
    /// Config for `settings`, logging to the configured file if there is one.
    pub fn from_settings(settings: NavSettings) -> Result<Self> {
        let logger = match &settings.log_file {
            Some(file) => Some(
                Logger::new(FileSink::new(&file.path, file.max_bytes)?)
                    .with_min_level(file.min_level),
            ),
            None => None,
        };
        Ok(Self {
            settings,
            logger,
            ..Self::default()
        })
    }

    pub fn with_settings(mut self, settings: NavSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_audit(mut self, audit: Arc<dyn NavAudit>) -> Self {
        self.audit = audit;
        self
    }
}

use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_log_file")]
    pub log_file: String,
    #[serde(default = "default_max_splits")]
    pub max_splits: usize,
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    #[serde(default = "default_indent_width")]
    pub indent_width: usize,
    #[serde(default = "default_export_format")]
    pub export_format: ExportFormat,
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
    #[serde(default = "default_logbook_drawer")]
    pub logbook_drawer: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub debug_log: Option<String>,
}

fn default_log_file() -> String {
    Config::config_dir()
        .join("done.org")
        .to_string_lossy()
        .to_string()
}
fn default_max_splits() -> usize {
    100
}
fn default_tick_ms() -> u64 {
    30
}
fn default_indent_width() -> usize {
    2
}
fn default_export_format() -> ExportFormat {
    ExportFormat::Org
}
pub(crate) fn default_timestamp_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}
fn default_logbook_drawer() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: default_log_file(),
            max_splits: default_max_splits(),
            tick_ms: default_tick_ms(),
            indent_width: default_indent_width(),
            export_format: default_export_format(),
            timestamp_format: default_timestamp_format(),
            logbook_drawer: default_logbook_drawer(),
            debug_log: None,
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rsplitwatch")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".rsplitwatch")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rsplitwatch.conf")
    }

    /// Resolved path of the org logbook (`~` expanded).
    pub fn log_path(&self) -> PathBuf {
        expand_tilde(&self.log_file)
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> AppResult<Self> {
        let cfg: Config =
            serde_yaml::from_str(content).map_err(|e| AppError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    fn validate(&self) -> AppResult<()> {
        if self.max_splits == 0 {
            return Err(AppError::Config("max_splits must be at least 1".into()));
        }
        if self.tick_ms == 0 {
            return Err(AppError::Config("tick_ms must be at least 1".into()));
        }
        if self.log_file.trim().is_empty() {
            return Err(AppError::Config("log_file must not be empty".into()));
        }
        Ok(())
    }

    /// Create the configuration directory and write the default config file.
    /// In test mode nothing is written and the resolved paths are returned.
    pub fn init_all(log_file: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();

        let mut config = Config::default();
        if let Some(name) = log_file {
            let p = expand_tilde(&name);
            config.log_file = if p.is_absolute() {
                p.to_string_lossy().to_string()
            } else {
                dir.join(p).to_string_lossy().to_string()
            };
        }

        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file()).map_err(|_| AppError::ConfigSave)?;
            file.write_all(yaml.as_bytes())
                .map_err(|_| AppError::ConfigSave)?;
        }

        Ok(config)
    }
}

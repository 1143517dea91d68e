// Poster configuration.
// Loaded from a TOML file, then overridden by environment and command line.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{NekoError, Result};
use crate::fedi::Visibility;
use crate::nekos::Sources;

pub const DEFAULT_IMAGE_DIR: &str = "images";
pub const DEFAULT_CATEGORY: &str = "neko";

/// Log verbosity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        };
        write!(f, "{}", s)
    }
}

/// Everything a `NekoPoster` needs to run.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the target instance.
    #[serde(default)]
    pub instance: String,
    /// Bearer token for the instance.
    #[serde(default)]
    pub token: String,
    /// Print progress to the console.
    #[serde(default = "default_true")]
    pub log_task: bool,
    #[serde(default)]
    pub log_level: LogLevel,
    /// Where downloaded images are kept until the next sweep.
    #[serde(default = "default_image_dir")]
    pub image_dir: PathBuf,
    /// Text of every posted status.
    #[serde(default)]
    pub status_message: String,
    #[serde(default)]
    pub visibility: Visibility,
    /// Category posted when none is given on the command line.
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub sources: Sources,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("instance", &self.instance)
            .field("token", &"<redacted>")
            .field("log_task", &self.log_task)
            .field("log_level", &self.log_level)
            .field("image_dir", &self.image_dir)
            .field("status_message", &self.status_message)
            .field("visibility", &self.visibility)
            .field("category", &self.category)
            .field("sources", &self.sources)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            instance: String::new(),
            token: String::new(),
            log_task: true,
            log_level: LogLevel::default(),
            image_dir: default_image_dir(),
            status_message: String::new(),
            visibility: Visibility::default(),
            category: default_category(),
            sources: Sources::default(),
        }
    }
}

impl Config {
    /// Configuration for `instance` and `token` with every other option at its default.
    pub fn new(instance: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
            token: token.into(),
            ..Self::default()
        }
    }

    /// Default config file location (~/.config/neko-poster/config.toml on Linux).
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "neko-poster").map(|dirs| dirs.config_dir().join("config.toml"))
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load from an explicit path, or from the default path if it exists.
    /// With neither, all options start at their defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let contents = fs::read_to_string(&path)
            .map_err(|e| NekoError::Config(format!("cannot read {}: {}", path.display(), e)))?;
        Self::from_toml_str(&contents)
    }

    /// Check the options that have no usable default.
    pub fn validate(&self) -> Result<()> {
        if self.instance.trim().is_empty() {
            return Err(NekoError::Config("instance is required".to_string()));
        }
        if self.token.trim().is_empty() {
            return Err(NekoError::Config("token is required".to_string()));
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_image_dir() -> PathBuf {
    PathBuf::from(DEFAULT_IMAGE_DIR)
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

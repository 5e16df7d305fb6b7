// src/config/options.rs
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::consts::*;
use crate::error::{LearnError, StoreError};

/// Relative draw weight per mastery status.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Weights {
    pub good: f64,
    pub neutral: f64,
    pub bad: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self { good: 1.0, neutral: 2.0, bad: 5.0 }
    }
}

/// Display color names per mastery status. Only the terminal reads these.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Colors {
    pub good: String,
    pub neutral: String,
    pub bad: String,
}

impl Default for Colors {
    fn default() -> Self {
        Self {
            good: s!("green"),
            neutral: s!("yellow"),
            bad: s!("red"),
        }
    }
}

/// Everything a learning run needs to know, read once and passed down.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SessionConfig {
    pub learn_threshold: u32,
    pub group_size: usize,
    pub learn_weights: Weights,
    #[serde(default)]
    pub colors: Colors,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            learn_threshold: 3,
            group_size: 50,
            learn_weights: Weights::default(),
            colors: Colors::default(),
        }
    }
}

impl SessionConfig {
    /// Parse JSON text. Unknown keys are rejected, not carried along.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Load and validate a config file.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let text = fs::read_to_string(path)?;
        let cfg = Self::from_json(&text).map_err(|source| StoreError::Config {
            path: path.display().to_string(),
            source,
        })?;
        cfg.validate()?;
        logf!(
            "Config loaded from {}: threshold={} group_size={}",
            path.display(),
            cfg.learn_threshold,
            cfg.group_size
        );
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), LearnError> {
        if self.learn_threshold == 0 {
            return Err(LearnError::Configuration(s!("learn_threshold must be positive")));
        }
        if self.group_size == 0 {
            return Err(LearnError::Configuration(s!("group_size must be positive")));
        }
        let w = &self.learn_weights;
        for (name, value) in [("good", w.good), ("neutral", w.neutral), ("bad", w.bad)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(LearnError::Configuration(format!(
                    "learn_weights.{name} must be a positive number, got {value}"
                )));
            }
        }
        let c = &self.colors;
        for (name, value) in [("good", &c.good), ("neutral", &c.neutral), ("bad", &c.bad)] {
            if crate::term::parse_color(value).is_none() {
                return Err(LearnError::Configuration(format!(
                    "colors.{name}: unknown color '{value}'"
                )));
            }
        }
        Ok(())
    }
}

/// Where every file of a run lives. Built once by the CLI and handed down.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataPaths {
    pub words: PathBuf,
    pub meanings: PathBuf,
    pub records: PathBuf,
    pub config: PathBuf,
    pub log: PathBuf,
    pub issue_pool: PathBuf,
    pub argument_pool: PathBuf,
}

impl DataPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            words: dir.join(WORDS_FILE),
            meanings: dir.join(MEANINGS_FILE),
            records: dir.join(RECORDS_FILE),
            config: dir.join(CONFIG_FILE),
            log: dir.join(LOG_FILE),
            issue_pool: dir.join(ISSUE_POOL_FILE),
            argument_pool: dir.join(ARGUMENT_POOL_FILE),
        }
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::in_dir(Path::new(DATA_DIR))
    }
}

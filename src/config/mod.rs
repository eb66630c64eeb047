#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use std::path::{Path, PathBuf};

pub const DEFAULT_DATA_DIR: &str = "./data";

/// Effective settings after merging the config file and command-line flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub verbose: bool,
    pub json_logs: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            verbose: false,
            json_logs: false,
        }
    }
}

impl ConfigProvider for Settings {
    fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn verbose(&self) -> bool {
        self.verbose
    }

    fn json_logs(&self) -> bool {
        self.json_logs
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("data_dir", &self.data_dir.to_string_lossy())
    }
}

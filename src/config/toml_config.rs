use crate::config::{Settings, DEFAULT_DATA_DIR};
use crate::utils::error::{ReservationError, Result};
use crate::utils::validation::{validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub storage: Option<StorageConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub data_dir: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| ReservationError::ConfigError {
            message: format!("cannot read {}: {}", path.as_ref().display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ReservationError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HOME})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReservationError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn data_dir(&self) -> PathBuf {
        self.storage
            .as_ref()
            .map(|s| PathBuf::from(&s.data_dir))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    pub fn to_settings(&self) -> Settings {
        Settings {
            data_dir: self.data_dir(),
            verbose: self.verbose(),
            json_logs: self.json_logs(),
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        if let Some(storage) = &self.storage {
            validate_path("storage.data_dir", &storage.data_dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[storage]
data_dir = "/var/lib/hotel"

[logging]
verbose = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.data_dir(), PathBuf::from("/var/lib/hotel"));
        assert!(config.verbose());
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.to_settings(), Settings::default());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("HOTEL_TEST_DATA_DIR", "/tmp/hotel-data");

        let toml_content = r#"
[storage]
data_dir = "${HOTEL_TEST_DATA_DIR}/json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data_dir(), PathBuf::from("/tmp/hotel-data/json"));

        std::env::remove_var("HOTEL_TEST_DATA_DIR");
    }

    #[test]
    fn test_config_validation() {
        let config = TomlConfig::from_toml_str("[storage]\ndata_dir = \"\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[storage\ndata_dir = 1").unwrap_err();
        assert!(matches!(err, ReservationError::ConfigError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[logging]\njson = true\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert!(config.json_logs());
        assert!(TomlConfig::from_file("/definitely/not/here.toml").is_err());
    }
}

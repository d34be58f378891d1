//! Record log storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where analysis records are appended
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// CSV file receiving one row per analysis
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.log_path.as_os_str().is_empty() {
            return Err(ValidationError::EmptyLogPath);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            log_path: default_log_path(),
        }
    }
}

fn default_log_path() -> PathBuf {
    PathBuf::from("call_analysis.csv")
}

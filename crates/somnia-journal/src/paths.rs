//! Path resolution for journal data

use std::path::PathBuf;

/// Environment variable overriding the data directory
pub const HOME_ENV: &str = "SOMNIA_HOME";

/// Resolves standard paths for journal files
#[derive(Debug, Clone)]
pub struct Paths {
    pub data_dir: PathBuf,
}

impl Paths {
    /// Resolve from `SOMNIA_HOME`, falling back to the platform data directory
    pub fn new() -> std::io::Result<Self> {
        if let Some(home) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self {
                data_dir: PathBuf::from(home),
            });
        }

        let base = dirs::data_dir().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::NotFound, "data directory not found")
        })?;

        Ok(Self {
            data_dir: base.join("somnia"),
        })
    }

    /// Directory the file store keeps one file per key in
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join("store")
    }

    /// Get config.json path
    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join("config.json")
    }
}

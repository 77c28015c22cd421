/// Runtime configuration resolved from flags, environment and defaults.
use std::path::{Path, PathBuf};

pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

impl Config {
    /// `db_path` and `log_level` come from clap, which already folds in the
    /// `STT_DB` / `STT_LOG` environment variables.
    pub fn resolve(db_path: Option<PathBuf>, log_level: Option<String>) -> Self {
        let data_dir = default_data_dir();
        Self::with_data_dir(&data_dir, db_path, log_level)
    }

    fn with_data_dir(data_dir: &Path, db_path: Option<PathBuf>, log_level: Option<String>) -> Self {
        Self {
            db_path: db_path.unwrap_or_else(|| data_dir.join("stt.db")),
            log_dir: data_dir.join("logs"),
            log_level: log_level.unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        }
    }
}

/// The `stt` directory inside the user's data directory.
/// Falls back to the working directory when no data dir is found.
pub fn default_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let stt_dir = data_dir.join("stt");
        std::fs::create_dir_all(&stt_dir).ok();
        stt_dir
    } else {
        PathBuf::from(".")
    }
}

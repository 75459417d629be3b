use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::document::UpdatePolicy;
use crate::domain::history::HistoryMode;
use crate::error::{AppError, AppResult};

const CONFIG_FILE_NAME: &str = "config.json";
const DEFAULT_README_FILE: &str = "README.md";

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";

pub fn config_directory() -> AppResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("relog"))
        .ok_or_else(|| {
            AppError::Configuration("cannot determine the configuration directory".to_string())
        })
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}

/// The raw on-disk configuration. Every field is optional; resolution and
/// validation happen in `AppConfig::load`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub readme_path: Option<String>,
    pub history_mode: Option<String>,
    pub update_policy: Option<String>,
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        let path = config_file_path()?;
        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents)
                .map_err(|err| AppError::Configuration(format!("invalid config file: {err}"))),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save(&self) -> AppResult<()> {
        let path = config_file_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)
            .map_err(|err| AppError::Configuration(format!("failed to encode config: {err}")))?;
        fs::write(&path, data)?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub readme_path: PathBuf,
    pub history_mode: HistoryMode,
    pub update_policy: UpdatePolicy,
    pub workspace_root: PathBuf,
}

impl AppConfig {
    /// Resolves the stored configuration against the environment. The
    /// `GEMINI_API_KEY` variable wins over the stored key, matching how
    /// the hosted runner injects credentials.
    pub fn load(workspace_hint: &Path) -> AppResult<Self> {
        let stored = StoredConfig::load()?;

        let gemini_api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or(stored.gemini_api_key);

        let gemini_model = stored
            .gemini_model
            .filter(|model| !model.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

        let readme_path = match stored.readme_path {
            Some(path) => workspace_hint.join(path),
            None => workspace_hint.join(DEFAULT_README_FILE),
        };

        let history_mode = match stored.history_mode {
            Some(value) => HistoryMode::from_str(&value).ok_or_else(|| {
                AppError::Configuration(format!("invalid history mode '{value}' in config"))
            })?,
            None => HistoryMode::Subjects,
        };

        let update_policy = match stored.update_policy {
            Some(value) => UpdatePolicy::from_str(&value).ok_or_else(|| {
                AppError::Configuration(format!("invalid update policy '{value}' in config"))
            })?,
            None => UpdatePolicy::Discard,
        };

        Ok(Self {
            gemini_api_key,
            gemini_model,
            readme_path,
            history_mode,
            update_policy,
            workspace_root: workspace_hint.to_path_buf(),
        })
    }
}

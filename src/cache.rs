use std::fs;
use std::path::PathBuf;

use blake3::Hasher;
use serde::{Deserialize, Serialize};

use crate::config::config_directory;
use crate::error::{AppError, AppResult};

const CACHE_FILE_NAME: &str = "summary_cache.json";
const CACHE_LIMIT: usize = 32;

#[derive(Default, Serialize, Deserialize)]
struct CacheFile {
    entries: Vec<CacheEntry>,
}

#[derive(Serialize, Deserialize, Clone)]
struct CacheEntry {
    key: String,
    model: String,
    summary: String,
}

/// Generated summaries keyed by prompt and model, so re-running the tool
/// for an unchanged tag does not spend API quota twice.
pub struct SummaryCache {
    file_path: PathBuf,
    file: CacheFile,
}

impl SummaryCache {
    pub fn load() -> AppResult<Self> {
        Self::from_path(config_directory()?.join(CACHE_FILE_NAME))
    }

    fn from_path(path: PathBuf) -> AppResult<Self> {
        let file = match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str::<CacheFile>(&contents)
                .map_err(|err| AppError::Configuration(format!("invalid cache file: {err}")))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => CacheFile::default(),
            Err(err) => return Err(AppError::Io(err)),
        };

        Ok(Self {
            file_path: path,
            file,
        })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.file
            .entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.summary.clone())
    }

    pub fn insert(&mut self, key: String, model: &str, summary: &str) {
        self.file.entries.retain(|entry| entry.key != key);
        self.file.entries.push(CacheEntry {
            key,
            model: model.to_string(),
            summary: summary.to_string(),
        });

        if self.file.entries.len() > CACHE_LIMIT {
            let overflow = self.file.entries.len() - CACHE_LIMIT;
            self.file.entries.drain(0..overflow);
        }
    }

    pub fn save(&self) -> AppResult<()> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(&self.file)
            .map_err(|err| AppError::Configuration(format!("failed to write cache: {err}")))?;
        fs::write(&self.file_path, data)?;
        Ok(())
    }

    pub fn compute_key(prompt: &str, model: &str) -> String {
        let mut hasher = Hasher::new();
        hasher.update(prompt.as_bytes());
        hasher.update(model.as_bytes());
        hasher.finalize().to_hex().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_and_retrieves_summaries() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CACHE_FILE_NAME);

        let mut cache = SummaryCache::from_path(path.clone()).unwrap();
        let key = SummaryCache::compute_key("prompt", "gemini-2.5-flash");
        cache.insert(key.clone(), "gemini-2.5-flash", "the summary");
        cache.save().unwrap();

        let reloaded = SummaryCache::from_path(path).unwrap();
        assert_eq!(reloaded.get(&key), Some("the summary".to_string()));
        assert_eq!(reloaded.get("missing"), None);
    }

    #[test]
    fn evicts_oldest_entries_beyond_limit() {
        let dir = tempfile::tempdir().unwrap();
        let mut cache = SummaryCache::from_path(dir.path().join(CACHE_FILE_NAME)).unwrap();

        for index in 0..(CACHE_LIMIT + 4) {
            cache.insert(format!("key-{index}"), "model", "summary");
        }

        assert_eq!(cache.file.entries.len(), CACHE_LIMIT);
        assert_eq!(cache.get("key-0"), None);
        assert!(cache.get(&format!("key-{}", CACHE_LIMIT + 3)).is_some());
    }

    #[test]
    fn key_depends_on_prompt_and_model() {
        let base = SummaryCache::compute_key("prompt", "model-a");
        assert_ne!(base, SummaryCache::compute_key("prompt", "model-b"));
        assert_ne!(base, SummaryCache::compute_key("other prompt", "model-a"));
        assert_eq!(base, SummaryCache::compute_key("prompt", "model-a"));
    }
}

use async_trait::async_trait;

use crate::domain::prompt::ChangelogPrompt;
use crate::error::AppResult;

#[async_trait]
pub trait LanguageModelService: Send + Sync {
    async fn summarize_history(&self, prompt: &ChangelogPrompt) -> AppResult<String>;
}

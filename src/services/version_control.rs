use async_trait::async_trait;

use crate::domain::history::{ChangeHistory, HistoryMode};
use crate::domain::release::{ReleaseRange, ReleaseTag};
use crate::error::AppResult;

#[async_trait]
pub trait VersionControlService: Send + Sync {
    /// Nearest tag at the current checkout. Failing to find one is fatal.
    async fn resolve_current_tag(&self) -> AppResult<ReleaseTag>;

    /// Nearest tag one commit back, or `None` on a first release.
    async fn resolve_previous_tag(&self) -> AppResult<Option<ReleaseTag>>;

    async fn collect_history(
        &self,
        range: &ReleaseRange,
        mode: &HistoryMode,
    ) -> AppResult<ChangeHistory>;
}

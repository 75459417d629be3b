use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::changelog::{ChangelogOutcome, update_readme_changelog};

pub async fn run(ctx: &AppContext) -> AppResult<ChangelogOutcome> {
    update_readme_changelog(ctx).await
}

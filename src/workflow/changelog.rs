use std::fs;

use crate::context::AppContext;
use crate::domain::document::splice_changelog;
use crate::domain::prompt::ChangelogPrompt;
use crate::domain::release::{ReleaseRange, ReleaseTag};
use crate::error::{AppError, AppResult};

pub enum ChangelogOutcome {
    Updated { tag: ReleaseTag },
    NoChanges { tag: ReleaseTag },
}

/// Runs the full pipeline: resolve the release range, collect its history,
/// summarize it, and splice the summary into the README. An empty history
/// short-circuits before the language model is consulted.
pub async fn update_readme_changelog(ctx: &AppContext) -> AppResult<ChangelogOutcome> {
    let current = ctx.version_control.resolve_current_tag().await?;
    let previous = ctx.version_control.resolve_previous_tag().await?;
    let range = ReleaseRange::new(previous, current.clone());

    let history = ctx
        .version_control
        .collect_history(&range, &ctx.config.history_mode)
        .await?;
    if history.is_empty() {
        return Ok(ChangelogOutcome::NoChanges { tag: current });
    }

    let prompt = ChangelogPrompt::build(&current, &history, &ctx.config.history_mode);
    let summary = ctx.language_model.summarize_history(&prompt).await?;
    let summary = summary.trim();
    if summary.is_empty() {
        return Err(AppError::LanguageModel(
            "language model returned an empty summary".to_string(),
        ));
    }

    let readme_path = &ctx.config.readme_path;
    let document = fs::read_to_string(readme_path).map_err(|err| {
        AppError::Document(format!("failed to read {}: {err}", readme_path.display()))
    })?;

    let updated = splice_changelog(&document, &current, summary, &ctx.config.update_policy)?;

    fs::write(readme_path, updated).map_err(|err| {
        AppError::Document(format!("failed to write {}: {err}", readme_path.display()))
    })?;

    Ok(ChangelogOutcome::Updated { tag: current })
}

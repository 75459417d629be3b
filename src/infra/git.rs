use std::path::PathBuf;
use std::process::Output;

use async_trait::async_trait;
use tokio::process::Command;

use crate::domain::history::{ChangeHistory, HistoryMode};
use crate::domain::release::{ReleaseRange, ReleaseTag};
use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;

pub struct GitCli {
    workspace_root: PathBuf,
}

impl GitCli {
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { workspace_root }
    }

    async fn git(&self, args: &[&str]) -> AppResult<Output> {
        Command::new("git")
            .args(args)
            .current_dir(&self.workspace_root)
            .output()
            .await
            .map_err(|err| AppError::VersionControl(format!("failed to run git: {err}")))
    }
}

fn stdout_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_text(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn resolve_current_tag(&self) -> AppResult<ReleaseTag> {
        let output = self.git(&["describe", "--tags", "--abbrev=0"]).await?;
        if !output.status.success() {
            return Err(AppError::VersionControl(format!(
                "cannot resolve the current release tag: {}",
                stderr_text(&output).trim()
            )));
        }

        let tag = stdout_text(&output).trim().to_string();
        if tag.is_empty() {
            return Err(AppError::VersionControl(
                "git describe returned no tag".to_string(),
            ));
        }
        Ok(ReleaseTag(tag))
    }

    async fn resolve_previous_tag(&self) -> AppResult<Option<ReleaseTag>> {
        // No tag reachable from HEAD^ means this is the first release.
        let output = self.git(&["describe", "--tags", "--abbrev=0", "HEAD^"]).await?;
        if !output.status.success() {
            return Ok(None);
        }

        let tag = stdout_text(&output).trim().to_string();
        Ok((!tag.is_empty()).then(|| ReleaseTag(tag)))
    }

    async fn collect_history(
        &self,
        range: &ReleaseRange,
        mode: &HistoryMode,
    ) -> AppResult<ChangeHistory> {
        let spec = range.log_spec();
        let args: Vec<&str> = match mode {
            HistoryMode::Subjects => vec!["log", spec.as_str(), "--pretty=format:- %s"],
            HistoryMode::Patch => vec!["log", spec.as_str(), "--patch"],
        };

        let output = self.git(&args).await?;
        if !output.status.success() {
            eprintln!(
                "Warning: git log failed for {spec}: {}; treating the range as empty.",
                stderr_text(&output).trim()
            );
            return Ok(ChangeHistory::empty());
        }

        Ok(ChangeHistory::new(stdout_text(&output)))
    }
}

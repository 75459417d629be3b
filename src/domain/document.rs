use crate::domain::release::ReleaseTag;
use crate::error::{AppError, AppResult};

pub const CHANGELOG_START: &str = "<!-- CHANGELOG START -->";
pub const CHANGELOG_END: &str = "<!-- CHANGELOG END -->";

/// What happens to the changelog region that is already in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdatePolicy {
    /// Replace the region with the new summary alone.
    Discard,
    /// Prepend a tagged entry and keep the prior entries beneath it.
    Accumulate,
}

impl UpdatePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdatePolicy::Discard => "discard",
            UpdatePolicy::Accumulate => "accumulate",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "discard" => Some(UpdatePolicy::Discard),
            "accumulate" => Some(UpdatePolicy::Accumulate),
            _ => None,
        }
    }
}

/// Rewrites the changelog region between the sentinel markers and returns
/// the updated document. Both markers must appear exactly once, start
/// before end; otherwise this fails without producing any output, so a
/// malformed document is never partially rewritten.
pub fn splice_changelog(
    document: &str,
    tag: &ReleaseTag,
    summary: &str,
    policy: &UpdatePolicy,
) -> AppResult<String> {
    let start = locate_marker(document, CHANGELOG_START)?;
    let end = locate_marker(document, CHANGELOG_END)?;

    let region_start = start + CHANGELOG_START.len();
    if end < region_start {
        return Err(AppError::Document(format!(
            "marker {CHANGELOG_END} appears before {CHANGELOG_START}"
        )));
    }

    let region = &document[region_start..end];
    let replacement = match policy {
        UpdatePolicy::Discard => format!("\n\n{summary}\n\n"),
        UpdatePolicy::Accumulate => format!(
            "\n\n## {}\n\n{summary}\n\n{}",
            tag.as_str(),
            region.trim_start()
        ),
    };

    Ok(format!(
        "{}{}{}",
        &document[..region_start],
        replacement,
        &document[end..]
    ))
}

fn locate_marker(document: &str, marker: &str) -> AppResult<usize> {
    let mut occurrences = document.match_indices(marker);
    let Some((position, _)) = occurrences.next() else {
        return Err(AppError::Document(format!(
            "marker {marker} not found in document"
        )));
    };
    if occurrences.next().is_some() {
        return Err(AppError::Document(format!(
            "marker {marker} appears more than once"
        )));
    }
    Ok(position)
}

use crate::domain::history::{ChangeHistory, HistoryMode};
use crate::domain::release::ReleaseTag;

const TARGET_LANGUAGE: &str = "English";

const CATEGORY_STRUCTURE: &str = "\
\u{2728} New features (Added)
<list new features here>
\u{267b}\u{fe0f} Changes (Changed)
<list behavior changes here>
\u{1f41b} Fixes (Fixed)
<list bug fixes here>
\u{1f9f9} Housekeeping (Internal)
<list internal changes, dependency bumps, and cleanup here>";

/// Fixed instructions plus the verbatim change records.
#[derive(Debug, Clone)]
pub struct ChangelogPrompt {
    text: String,
}

impl ChangelogPrompt {
    pub fn build(tag: &ReleaseTag, history: &ChangeHistory, mode: &HistoryMode) -> Self {
        let mut text = format!(
            "Generate a changelog for release {} in the format below.\n\
             Write it in {TARGET_LANGUAGE}.\n\
             Do not open with anything like \"Here is the changelog\"; output only the \
             categorized list, in exactly the structure shown.\n\
             Do not include a version heading or any other preamble; start directly with \
             the first category.\n\
             If the changes are only dependency bumps, formatting, or refactors, list them \
             under the housekeeping category.\n\
             Omit categories that have no entries.\n\n\
             Structure:\n{CATEGORY_STRUCTURE}\n\n",
            tag.as_str(),
        );

        if matches!(mode, HistoryMode::Patch) {
            text.push_str(
                "The history below contains full patches. Base every entry on the actual \
                 code changes, not only on the commit messages.\n\n",
            );
        }

        text.push_str("Here is the history to analyze:\n");
        text.push_str(history.as_str());
        text.push('\n');

        Self { text }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

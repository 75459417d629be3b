/// Granularity of the change records fed to the language model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HistoryMode {
    Subjects,
    Patch,
}

impl HistoryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryMode::Subjects => "subjects",
            HistoryMode::Patch => "patch",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "subjects" => Some(HistoryMode::Subjects),
            "patch" => Some(HistoryMode::Patch),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChangeHistory {
    text: String,
}

impl ChangeHistory {
    pub fn new(text: String) -> Self {
        Self { text }
    }

    pub fn empty() -> Self {
        Self {
            text: String::new(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    // A whitespace-only blob counts as empty; it must not reach the model.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_history_mode() {
        assert_eq!(HistoryMode::from_str("subjects"), Some(HistoryMode::Subjects));
        assert_eq!(HistoryMode::from_str("PATCH"), Some(HistoryMode::Patch));
        assert_eq!(HistoryMode::from_str("diffs"), None);
    }

    #[test]
    fn round_trips_mode_labels() {
        for mode in [HistoryMode::Subjects, HistoryMode::Patch] {
            assert_eq!(HistoryMode::from_str(mode.as_str()), Some(mode.clone()));
        }
    }

    #[test]
    fn whitespace_only_history_is_empty() {
        assert!(ChangeHistory::empty().is_empty());
        assert!(ChangeHistory::new("  \n\t\n".to_string()).is_empty());
        assert!(!ChangeHistory::new("- fix parser".to_string()).is_empty());
    }
}

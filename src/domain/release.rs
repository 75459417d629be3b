#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTag(pub String);

impl ReleaseTag {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// The span a changelog entry covers: `(previous, current]`. A missing
/// previous tag marks the first release, covering full reachable history.
#[derive(Debug, Clone)]
pub struct ReleaseRange {
    pub previous: Option<ReleaseTag>,
    pub current: ReleaseTag,
}

impl ReleaseRange {
    pub fn new(previous: Option<ReleaseTag>, current: ReleaseTag) -> Self {
        Self { previous, current }
    }

    pub fn log_spec(&self) -> String {
        match &self.previous {
            Some(previous) => format!("{}..{}", previous.as_str(), self.current.as_str()),
            None => self.current.as_str().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_between_two_tags() {
        let range = ReleaseRange::new(
            Some(ReleaseTag("v1.0.0".to_string())),
            ReleaseTag("v1.1.0".to_string()),
        );
        assert_eq!(range.log_spec(), "v1.0.0..v1.1.0");
    }

    #[test]
    fn covers_full_history_on_first_release() {
        let range = ReleaseRange::new(None, ReleaseTag("v0.1.0".to_string()));
        assert_eq!(range.log_spec(), "v0.1.0");
    }
}

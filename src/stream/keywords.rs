// ABOUTME: Failure keyword matching for service event messages.
// ABOUTME: Case-sensitive substring match against an immutable keyword set.

use crate::config::StreamerConfig;
use nonempty::NonEmpty;

/// Keywords that classify a service event as a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailureKeywords(NonEmpty<String>);

impl FailureKeywords {
    pub fn new(keywords: NonEmpty<String>) -> Self {
        Self(keywords)
    }

    /// True if any keyword occurs anywhere in `message`.
    pub fn matches(&self, message: &str) -> bool {
        self.0.iter().any(|kw| message.contains(kw.as_str()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl Default for FailureKeywords {
    fn default() -> Self {
        Self(StreamerConfig::default().failure_keywords)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn matches_substrings_not_words() {
        let keywords = FailureKeywords::default();
        assert!(keywords.matches("task failed to start"));
        assert!(keywords.matches("(service web) is unhealthy in target-group"));
        assert!(keywords.matches("ResourceInitializationError: unable to pull secrets"));
        assert!(keywords.matches("throttled by the API"));
        assert!(keywords.matches("missing container instance"));
    }

    #[test]
    fn steady_state_messages_do_not_match() {
        let keywords = FailureKeywords::default();
        assert!(!keywords.matches("(service web) has reached a steady state."));
        assert!(!keywords.matches("(service web) has started 2 tasks: (task 1a2b)."));
    }

    #[test]
    fn matching_is_case_sensitive() {
        let keywords = FailureKeywords::default();
        assert!(!keywords.matches("Task FAILED"));
        assert!(!keywords.matches("Unable to place task"));
    }

    proptest! {
        #[test]
        fn any_message_containing_a_keyword_matches(
            prefix in "[ a-z]{0,12}",
            suffix in "[ a-z]{0,12}",
            idx in 0usize..6,
        ) {
            let keywords = FailureKeywords::default();
            let kw = keywords.iter().nth(idx).unwrap().to_string();
            let msg = format!("{prefix}{kw}{suffix}");
            prop_assert!(keywords.matches(&msg));
        }
    }
}

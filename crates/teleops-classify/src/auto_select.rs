//! One-shot auto-selection of the top suggestion.

use crate::classifier::Suggestion;

/// Default auto-select threshold.
pub const DEFAULT_THRESHOLD: f64 = 0.3;

/// Pre-fills a resource type from suggestions, at most once per form.
///
/// The top suggestion is taken only when its confidence is strictly above the
/// threshold and the user has not picked a value yet. Once a value has been
/// selected (by the user or by this selector) it never fires again.
#[derive(Debug, Clone)]
pub struct AutoSelector {
    threshold: f64,
    fired: bool,
}

impl Default for AutoSelector {
    fn default() -> Self {
        Self::new(DEFAULT_THRESHOLD)
    }
}

impl AutoSelector {
    #[must_use]
    pub const fn new(threshold: f64) -> Self {
        Self {
            threshold,
            fired: false,
        }
    }

    /// Whether a selection has already been made.
    #[must_use]
    pub const fn has_fired(&self) -> bool {
        self.fired
    }

    /// Pick the top suggestion if allowed. `current` is the value already in
    /// the form; blank counts as unset.
    pub fn select<'a>(
        &mut self,
        current: Option<&str>,
        suggestions: &'a [Suggestion],
    ) -> Option<&'a Suggestion> {
        if self.fired {
            return None;
        }
        if current.is_some_and(|v| !v.trim().is_empty()) {
            self.fired = true;
            return None;
        }
        let top = suggestions.first()?;
        if top.confidence > self.threshold {
            self.fired = true;
            tracing::debug!(
                resource_type = %top.resource_type,
                confidence = top.confidence,
                "auto-selected resource type"
            );
            Some(top)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(value: &str, confidence: f64) -> Suggestion {
        Suggestion {
            resource_type: value.into(),
            confidence,
            matched: vec![value.into()],
        }
    }

    #[test]
    fn selects_top_above_threshold_once() {
        let mut selector = AutoSelector::default();
        let suggestions = vec![suggestion("project", 1.0), suggestion("site", 0.5)];

        let picked = selector.select(None, &suggestions).unwrap();
        assert_eq!(picked.resource_type, "project");
        assert!(selector.has_fired());

        assert!(selector.select(None, &suggestions).is_none());
    }

    #[test]
    fn threshold_is_exclusive() {
        let mut selector = AutoSelector::new(0.5);
        assert!(selector.select(None, &[suggestion("site", 0.5)]).is_none());
        assert!(!selector.has_fired());
        assert!(selector.select(None, &[suggestion("site", 0.51)]).is_some());
    }

    #[test]
    fn never_overrides_user_choice() {
        let mut selector = AutoSelector::default();
        let suggestions = vec![suggestion("project", 1.0)];
        assert!(selector.select(Some("alarm"), &suggestions).is_none());
        // A value was present, so clearing it later does not re-trigger.
        assert!(selector.select(None, &suggestions).is_none());
    }

    #[test]
    fn blank_current_counts_as_unset() {
        let mut selector = AutoSelector::default();
        let suggestions = vec![suggestion("project", 1.0)];
        assert!(selector.select(Some("  "), &suggestions).is_some());
    }

    #[test]
    fn empty_suggestions_do_nothing() {
        let mut selector = AutoSelector::default();
        assert!(selector.select(None, &[]).is_none());
        assert!(!selector.has_fired());
    }
}

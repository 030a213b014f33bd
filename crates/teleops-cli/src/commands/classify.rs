use serde::Serialize;
use teleops_api::resource_types::fallback_resource_types;
use teleops_classify::{AutoSelector, KeywordTable, Suggestion, classify};
use teleops_config::TeleopsConfig;
use teleops_core::entities::PermissionText;

use crate::bootstrap;
use crate::cli::GlobalFlags;
use crate::cli::root_commands::ClassifyArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct LabeledSuggestion {
    resource_type: String,
    label: Option<String>,
    confidence: f64,
    matched: Vec<String>,
}

#[derive(Debug, Serialize)]
struct ClassifyResponse {
    suggestions: Vec<LabeledSuggestion>,
    /// Resource type that would be pre-filled, if any.
    auto_selected: Option<String>,
}

/// Handle `teleops classify`.
pub fn handle(args: &ClassifyArgs, config: &TeleopsConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let table = bootstrap::keyword_table(config)?;
    let response = run(&table, config.classifier.threshold, args);
    output(&response, flags.format)
}

fn run(table: &KeywordTable, threshold: f64, args: &ClassifyArgs) -> ClassifyResponse {
    let text = PermissionText {
        name: args.name.clone(),
        code: args.code.clone(),
        category: args.category.clone(),
    };
    let suggestions = classify(table, &text);
    let auto_selected = AutoSelector::new(threshold)
        .select(args.current.as_deref(), &suggestions)
        .map(|s| s.resource_type.clone());

    ClassifyResponse {
        suggestions: label(suggestions),
        auto_selected,
    }
}

fn label(suggestions: Vec<Suggestion>) -> Vec<LabeledSuggestion> {
    let known = fallback_resource_types();
    suggestions
        .into_iter()
        .map(|s| LabeledSuggestion {
            label: known
                .iter()
                .find(|t| t.value == s.resource_type)
                .map(|t| t.label.clone()),
            resource_type: s.resource_type,
            confidence: s.confidence,
            matched: s.matched,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(name: &str, current: Option<&str>) -> ClassifyArgs {
        ClassifyArgs {
            name: name.into(),
            code: String::new(),
            category: String::new(),
            current: current.map(Into::into),
        }
    }

    #[test]
    fn project_setup_is_auto_selected() {
        let response = run(&KeywordTable::builtin(), 0.3, &args("New Project Setup", None));
        assert_eq!(response.auto_selected.as_deref(), Some("project"));
        assert_eq!(response.suggestions[0].label.as_deref(), Some("Project"));
        assert!((response.suggestions[0].confidence - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn existing_choice_is_kept() {
        let response = run(
            &KeywordTable::builtin(),
            0.3,
            &args("New Project Setup", Some("menu")),
        );
        assert!(response.auto_selected.is_none());
        assert!(!response.suggestions.is_empty());
    }

    #[test]
    fn blank_text_has_no_suggestions() {
        let response = run(&KeywordTable::builtin(), 0.3, &args("   ", None));
        assert!(response.suggestions.is_empty());
        assert!(response.auto_selected.is_none());
    }
}

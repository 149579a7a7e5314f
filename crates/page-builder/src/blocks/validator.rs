use serde_json::{Map, Value};
use tracing::debug;

use super::domain::{ValidationError, ValidationResult, ValidationScope};
use super::registry::{BlockRegistry, FieldRules};

impl BlockRegistry {
    /// Validate a block payload against the schema registered for `block_type`.
    ///
    /// Unregistered types are trusted and come back valid. Every rule of every
    /// field runs; errors follow field order, then rule order.
    pub fn validate_block(
        &self,
        block_type: &str,
        content: &Map<String, Value>,
        settings: &Map<String, Value>,
    ) -> ValidationResult {
        let Some(schema) = self.lookup(block_type) else {
            return ValidationResult::valid();
        };

        let mut errors = Vec::new();
        collect_errors(&schema.content, content, ValidationScope::Content, &mut errors);
        collect_errors(&schema.settings, settings, ValidationScope::Settings, &mut errors);

        debug!(block_type, errors = errors.len(), "validated block");
        ValidationResult::from_parts(errors, Vec::new())
    }

    /// Errors for one field, as an editor would request on every keystroke.
    pub fn field_errors(
        &self,
        block_type: &str,
        field: &str,
        value: &Value,
        is_settings: bool,
    ) -> Vec<ValidationError> {
        let Some(schema) = self.lookup(block_type) else {
            return Vec::new();
        };

        let (entry, scope) = if is_settings {
            (schema.settings_field(field), ValidationScope::Settings)
        } else {
            (schema.content_field(field), ValidationScope::Content)
        };

        entry
            .map(|entry| field_failures(entry, value, scope).collect())
            .unwrap_or_default()
    }
}

fn collect_errors(
    fields: &[FieldRules],
    payload: &Map<String, Value>,
    scope: ValidationScope,
    errors: &mut Vec<ValidationError>,
) {
    for entry in fields {
        let value = payload.get(&entry.field).unwrap_or(&Value::Null);
        errors.extend(field_failures(entry, value, scope));
    }
}

fn field_failures<'a>(
    entry: &'a FieldRules,
    value: &'a Value,
    scope: ValidationScope,
) -> impl Iterator<Item = ValidationError> + 'a {
    entry.rules.iter().filter_map(move |rule| {
        rule.evaluate(value)
            .map(|message| ValidationError::new(entry.field.as_str(), message, scope))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::registry::BlockSchema;
    use crate::blocks::rules::{CustomCheck, ValidationRule};
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object literal")
    }

    #[test]
    fn every_failing_rule_is_reported() {
        let registry = BlockRegistry::empty().with_schema(
            "QuoteBlock",
            BlockSchema {
                content: vec![FieldRules::new(
                    "quote",
                    vec![
                        ValidationRule::min_length(10, "Quote is too short"),
                        ValidationRule::custom(CustomCheck::Url, "Quote must link somewhere"),
                    ],
                )],
                settings: Vec::new(),
            },
        );

        let result = registry.validate_block("QuoteBlock", &map(json!({ "quote": "hi" })), &Map::new());

        let messages: Vec<_> = result.errors.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["Quote is too short", "Quote must link somewhere"]);
        assert!(!result.is_valid);
    }

    #[test]
    fn settings_errors_carry_settings_scope() {
        let registry = BlockRegistry::standard();
        let result = registry.validate_block(
            "FeaturesBlock",
            &map(json!({ "title": "Why us", "features": [{ "title": "Fast" }] })),
            &map(json!({ "columns": 9 })),
        );

        assert_eq!(result.errors.len(), 1);
        assert_eq!(result.errors[0].field, "columns");
        assert_eq!(result.errors[0].scope, ValidationScope::Settings);
    }

    #[test]
    fn field_errors_for_unknown_field_is_empty() {
        let registry = BlockRegistry::standard();
        assert!(registry
            .field_errors("HeroBlock", "subtitle", &json!(""), false)
            .is_empty());
        assert!(registry
            .field_errors("HeroBlock", "title", &json!(""), true)
            .is_empty());
    }
}

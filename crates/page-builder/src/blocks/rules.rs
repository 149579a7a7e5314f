use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::predicates::{
    as_integer, is_blank, is_valid_image_url, is_valid_url, is_valid_video_url,
};

/// Declarative rule attached to one field of a block schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationRule {
    #[serde(flatten)]
    pub kind: RuleKind,
    pub message: String,
}

/// Rule variants. Length and pattern rules only look at string values; every
/// other shape passes them untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RuleKind {
    Required,
    MinLength { value: usize },
    MaxLength { value: usize },
    Pattern { value: CompiledPattern },
    Custom { predicate: CustomCheck },
}

impl ValidationRule {
    pub fn required(message: impl Into<String>) -> Self {
        Self {
            kind: RuleKind::Required,
            message: message.into(),
        }
    }

    pub fn min_length(value: usize, message: impl Into<String>) -> Self {
        Self {
            kind: RuleKind::MinLength { value },
            message: message.into(),
        }
    }

    pub fn max_length(value: usize, message: impl Into<String>) -> Self {
        Self {
            kind: RuleKind::MaxLength { value },
            message: message.into(),
        }
    }

    pub fn pattern(expression: &str, message: impl Into<String>) -> Result<Self, regex::Error> {
        Ok(Self {
            kind: RuleKind::Pattern {
                value: CompiledPattern::new(expression)?,
            },
            message: message.into(),
        })
    }

    pub fn custom(predicate: CustomCheck, message: impl Into<String>) -> Self {
        Self {
            kind: RuleKind::Custom { predicate },
            message: message.into(),
        }
    }

    /// Evaluate this rule against a raw field value, returning the failure message.
    pub fn evaluate(&self, value: &Value) -> Option<&str> {
        let passes = match &self.kind {
            RuleKind::Required => !is_blank(value),
            RuleKind::MinLength { value: min } => match value {
                Value::String(text) => text.chars().count() >= *min,
                _ => true,
            },
            RuleKind::MaxLength { value: max } => match value {
                Value::String(text) => text.chars().count() <= *max,
                _ => true,
            },
            RuleKind::Pattern { value: pattern } => match value {
                Value::String(text) => pattern.is_match(text),
                _ => true,
            },
            RuleKind::Custom { predicate } => predicate.check(value),
        };

        if passes {
            None
        } else {
            Some(self.message.as_str())
        }
    }
}

/// Named predicates available to `custom` rules.
///
/// Each predicate decides its own treatment of absent values: the URL-shaped
/// checks let an absent or blank value through (pair them with `required`
/// when the field is mandatory), while `nonEmptyArray` rejects anything that
/// is not an array with at least one element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "name", rename_all = "camelCase")]
pub enum CustomCheck {
    Url,
    ImageUrl,
    VideoUrl,
    NonEmptyArray,
    MaxItems { max: usize },
    IntegerRange { min: i64, max: i64 },
    HeadingLevel,
}

impl CustomCheck {
    pub fn check(&self, value: &Value) -> bool {
        match self {
            CustomCheck::Url => string_shape(value, is_valid_url),
            CustomCheck::ImageUrl => string_shape(value, is_valid_image_url),
            CustomCheck::VideoUrl => string_shape(value, is_valid_video_url),
            CustomCheck::NonEmptyArray => {
                matches!(value, Value::Array(items) if !items.is_empty())
            }
            CustomCheck::MaxItems { max } => match value {
                Value::Array(items) => items.len() <= *max,
                _ => true,
            },
            CustomCheck::IntegerRange { min, max } => {
                if value.is_null() {
                    return true;
                }
                as_integer(value)
                    .map(|n| (*min..=*max).contains(&n))
                    .unwrap_or(false)
            }
            CustomCheck::HeadingLevel => as_integer(value)
                .map(|level| (1..=6).contains(&level))
                .unwrap_or(false),
        }
    }
}

fn string_shape(value: &Value, shape: fn(&str) -> bool) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) if text.trim().is_empty() => true,
        Value::String(text) => shape(text),
        _ => false,
    }
}

/// Regex wrapper that serializes as its source text.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CompiledPattern(Regex);

impl CompiledPattern {
    pub fn new(expression: &str) -> Result<Self, regex::Error> {
        Regex::new(expression).map(Self)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }
}

impl PartialEq for CompiledPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl TryFrom<String> for CompiledPattern {
    type Error = regex::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CompiledPattern> for String {
    fn from(value: CompiledPattern) -> Self {
        value.0.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn required_treats_whitespace_like_null() {
        let rule = ValidationRule::required("Title is required");
        assert_eq!(rule.evaluate(&Value::Null), Some("Title is required"));
        assert_eq!(rule.evaluate(&json!("   ")), Some("Title is required"));
        assert_eq!(rule.evaluate(&json!("")), Some("Title is required"));
        assert_eq!(rule.evaluate(&json!("Hello")), None);
        assert_eq!(rule.evaluate(&json!(0)), None);
        assert_eq!(rule.evaluate(&json!([])), None);
    }

    #[test]
    fn length_rules_ignore_non_strings() {
        let min = ValidationRule::min_length(3, "too short");
        let max = ValidationRule::max_length(3, "too long");

        for value in [json!(null), json!(12345), json!(["a", "b", "c", "d"]), json!(true)] {
            assert_eq!(min.evaluate(&value), None, "min on {value}");
            assert_eq!(max.evaluate(&value), None, "max on {value}");
        }

        assert_eq!(min.evaluate(&json!("ab")), Some("too short"));
        assert_eq!(max.evaluate(&json!("abcd")), Some("too long"));
        assert_eq!(max.evaluate(&json!("äöü")), None);
    }

    #[test]
    fn pattern_rule_checks_strings_only() {
        let rule = ValidationRule::pattern(r"^[a-z0-9-]+$", "use lowercase slugs").expect("compiles");
        assert_eq!(rule.evaluate(&json!("about-us")), None);
        assert_eq!(rule.evaluate(&json!("About Us")), Some("use lowercase slugs"));
        assert_eq!(rule.evaluate(&json!(42)), None);
        assert_eq!(rule.evaluate(&Value::Null), None);
    }

    #[test]
    fn invalid_pattern_is_rejected_at_construction() {
        assert!(ValidationRule::pattern("(unclosed", "never used").is_err());
    }

    #[test]
    fn url_checks_let_absent_values_through() {
        for check in [CustomCheck::Url, CustomCheck::ImageUrl, CustomCheck::VideoUrl] {
            assert!(check.check(&Value::Null));
            assert!(check.check(&json!("")));
            assert!(!check.check(&json!(17)));
        }
        assert!(!CustomCheck::Url.check(&json!("not a url")));
    }

    #[test]
    fn array_checks_handle_shapes() {
        assert!(!CustomCheck::NonEmptyArray.check(&Value::Null));
        assert!(!CustomCheck::NonEmptyArray.check(&json!([])));
        assert!(!CustomCheck::NonEmptyArray.check(&json!("features")));
        assert!(CustomCheck::NonEmptyArray.check(&json!([{}])));

        let max = CustomCheck::MaxItems { max: 2 };
        assert!(max.check(&json!([1, 2])));
        assert!(!max.check(&json!([1, 2, 3])));
        assert!(max.check(&Value::Null));
    }

    #[test]
    fn integer_range_accepts_absent_and_numeric_strings() {
        let check = CustomCheck::IntegerRange { min: 1, max: 6 };
        assert!(check.check(&Value::Null));
        assert!(check.check(&json!(3)));
        assert!(check.check(&json!("4")));
        assert!(!check.check(&json!(0)));
        assert!(!check.check(&json!("wide")));
    }

    #[test]
    fn rules_serialize_by_name() {
        let rule = ValidationRule::custom(CustomCheck::MaxItems { max: 12 }, "Maximum 12 features");
        let encoded = serde_json::to_value(&rule).expect("serializes");
        assert_eq!(
            encoded,
            json!({
                "kind": "custom",
                "predicate": { "name": "maxItems", "max": 12 },
                "message": "Maximum 12 features"
            })
        );

        let pattern: ValidationRule = serde_json::from_value(json!({
            "kind": "pattern",
            "value": "^#[0-9a-f]{6}$",
            "message": "Use a hex colour"
        }))
        .expect("pattern rule parses");
        assert_eq!(pattern.evaluate(&json!("#00ff00")), None);
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Block type tags understood by the standard registry and the page-wide checks.
pub mod block_types {
    pub const HERO: &str = "HeroBlock";
    pub const FEATURES: &str = "FeaturesBlock";
    pub const TESTIMONIALS: &str = "TestimonialsBlock";
    pub const IMAGE: &str = "ImageBlock";
    pub const BUTTON: &str = "ButtonBlock";
    pub const CONTACT_FORM: &str = "ContactFormBlock";
    pub const VIDEO: &str = "VideoBlock";
    pub const HEADING: &str = "HeadingBlock";
}

/// Identifier wrapper for a block placed on a page. Unique within that page.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(pub String);

impl BlockId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BlockId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for BlockId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A block as authored in the page builder.
///
/// `content` carries user-authored data and `settings` carries presentation
/// options; both stay schemaless maps so unregistered block types round-trip
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockInstance {
    pub id: BlockId,
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub component: String,
    #[serde(default)]
    pub content: Map<String, Value>,
    #[serde(default)]
    pub settings: Map<String, Value>,
}

impl BlockInstance {
    pub fn new(id: impl Into<String>, block_type: impl Into<String>) -> Self {
        let block_type = block_type.into();
        Self {
            id: BlockId(id.into()),
            component: block_type.clone(),
            block_type,
            content: Map::new(),
            settings: Map::new(),
        }
    }

    pub fn with_content(mut self, field: &str, value: Value) -> Self {
        self.content.insert(field.to_string(), value);
        self
    }

    pub fn is_type(&self, block_type: &str) -> bool {
        self.block_type == block_type
    }

    /// Content value for `field`, treating an absent key as JSON `null`.
    pub fn content_field(&self, field: &str) -> &Value {
        self.content.get(field).unwrap_or(&Value::Null)
    }

    /// Editable field map for `scope`; the page scope has none.
    pub fn fields_mut(&mut self, scope: ValidationScope) -> Option<&mut Map<String, Value>> {
        match scope {
            ValidationScope::Content => Some(&mut self.content),
            ValidationScope::Settings => Some(&mut self.settings),
            ValidationScope::Page => None,
        }
    }
}

/// Namespace a validation finding belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationScope {
    Content,
    Settings,
    Page,
}

impl ValidationScope {
    pub fn label(&self) -> &'static str {
        match self {
            ValidationScope::Content => "content",
            ValidationScope::Settings => "settings",
            ValidationScope::Page => "page",
        }
    }
}

/// Single finding produced by a block or page validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub scope: ValidationScope,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<BlockId>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, scope: ValidationScope) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            scope,
            block_id: None,
        }
    }

    pub fn page(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(field, message, ValidationScope::Page)
    }

    pub fn for_block(mut self, id: &BlockId) -> Self {
        self.block_id = Some(id.clone());
        self
    }
}

/// Aggregate outcome of a validation call. Warnings never affect validity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self::from_parts(Vec::new(), Vec::new())
    }

    pub fn from_parts(errors: Vec<ValidationError>, warnings: Vec<ValidationError>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    /// Fold another result into this one, keeping `is_valid` consistent.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
        self.warnings.extend(other.warnings);
        self.is_valid = self.errors.is_empty();
    }

    pub fn errors_for(&self, field: &str) -> Vec<&ValidationError> {
        self.errors
            .iter()
            .filter(|error| error.field == field)
            .collect()
    }

    pub fn warnings_for(&self, field: &str) -> Vec<&ValidationError> {
        self.warnings
            .iter()
            .filter(|warning| warning.field == field)
            .collect()
    }
}

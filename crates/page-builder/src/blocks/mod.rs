//! Page-builder block validation and page composition.
//!
//! The free functions below validate against the built-in block table; build
//! a [`BlockRegistry`] directly when extra block schemas are in play.

pub mod composition;
pub mod domain;
pub mod page;
pub mod predicates;
pub mod registry;
pub mod router;
pub mod rules;
pub mod service;
pub mod templates;
mod validator;

#[cfg(test)]
mod tests;

use serde_json::{Map, Value};

pub use composition::{validate_composition, CompositionError, PageComposition};
pub use domain::{
    block_types, BlockId, BlockInstance, ValidationError, ValidationResult, ValidationScope,
};
pub use page::validate_page;
pub use registry::{BlockRegistry, BlockSchema, FieldRules, RegistryError};
pub use router::page_builder_router;
pub use rules::{CustomCheck, RuleKind, ValidationRule};
pub use service::{PageBuilderService, PublishCheck};
pub use templates::{PageTemplate, TemplateBlock, TemplateCatalog, TemplateSummary};

/// Validate one block payload against the built-in block table.
pub fn validate_block(
    block_type: &str,
    content: &Map<String, Value>,
    settings: &Map<String, Value>,
) -> ValidationResult {
    BlockRegistry::shared().validate_block(block_type, content, settings)
}

/// Built-in schema for `block_type`, if one is registered.
pub fn get_block_validation_rules(block_type: &str) -> Option<&'static BlockSchema> {
    BlockRegistry::shared().lookup(block_type)
}

/// Errors for a single field of a built-in block type.
pub fn has_field_errors(
    block_type: &str,
    field: &str,
    value: &Value,
    is_settings: bool,
) -> Vec<ValidationError> {
    BlockRegistry::shared().field_errors(block_type, field, value, is_settings)
}

use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use super::composition::{validate_composition, CompositionError, PageComposition};
use super::domain::{BlockInstance, ValidationError, ValidationResult};
use super::page::validate_page;
use super::registry::{BlockRegistry, BlockSchema};
use super::templates::{TemplateCatalog, TemplateSummary};

/// Service composing the schema registry, page checks, and template catalog.
pub struct PageBuilderService {
    registry: Arc<BlockRegistry>,
    templates: Arc<TemplateCatalog>,
}

/// Outcome of the final gate run before a page is published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishCheck {
    pub publishable: bool,
    pub result: ValidationResult,
}

impl Default for PageBuilderService {
    fn default() -> Self {
        Self::new(
            Arc::new(BlockRegistry::standard()),
            Arc::new(TemplateCatalog::standard()),
        )
    }
}

impl PageBuilderService {
    pub fn new(registry: Arc<BlockRegistry>, templates: Arc<TemplateCatalog>) -> Self {
        Self {
            registry,
            templates,
        }
    }

    pub fn registry(&self) -> &BlockRegistry {
        &self.registry
    }

    pub fn templates(&self) -> &TemplateCatalog {
        &self.templates
    }

    pub fn validate_block(
        &self,
        block_type: &str,
        content: &Map<String, Value>,
        settings: &Map<String, Value>,
    ) -> ValidationResult {
        self.registry.validate_block(block_type, content, settings)
    }

    pub fn field_errors(
        &self,
        block_type: &str,
        field: &str,
        value: &Value,
        is_settings: bool,
    ) -> Vec<ValidationError> {
        self.registry
            .field_errors(block_type, field, value, is_settings)
    }

    pub fn rules_for(&self, block_type: &str) -> Option<&BlockSchema> {
        self.registry.lookup(block_type)
    }

    pub fn block_types(&self) -> Vec<String> {
        self.registry.block_types().map(str::to_string).collect()
    }

    /// Page-wide checks only; block payloads are not revalidated.
    pub fn validate_page(&self, blocks: &[BlockInstance]) -> ValidationResult {
        let result = validate_page(blocks);
        debug!(
            blocks = blocks.len(),
            errors = result.errors.len(),
            warnings = result.warnings.len(),
            "validated page"
        );
        result
    }

    /// Every block against its schema plus the page-wide checks. Warnings are
    /// reported but never block publishing.
    pub fn publish_check(&self, blocks: &[BlockInstance]) -> PublishCheck {
        let result = validate_composition(&self.registry, blocks);
        if !result.is_valid {
            warn!(
                blocks = blocks.len(),
                errors = result.errors.len(),
                "publish rejected by validation"
            );
        }

        PublishCheck {
            publishable: result.is_valid,
            result,
        }
    }

    pub fn template_summaries(&self) -> Vec<TemplateSummary> {
        self.templates.summaries()
    }

    pub fn instantiate_template(&self, name: &str) -> Result<Vec<BlockInstance>, CompositionError> {
        PageComposition::from_catalog(&self.templates, name).map(PageComposition::into_blocks)
    }
}

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::domain::{BlockId, BlockInstance, ValidationResult, ValidationScope};
use super::page::validate_page;
use super::registry::BlockRegistry;
use super::templates::{PageTemplate, TemplateCatalog};

/// Errors raised while editing a page composition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompositionError {
    #[error("block {0} is not on this page")]
    UnknownBlock(BlockId),
    #[error("position {index} is outside the page (0..={len})")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("template {0} does not exist")]
    UnknownTemplate(String),
    #[error("block fields cannot be edited in the page scope")]
    PageScopeEdit,
}

/// In-progress page state: an ordered block list plus the id sequence used
/// for newly placed blocks.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageComposition {
    blocks: Vec<BlockInstance>,
    next_sequence: u64,
}

impl PageComposition {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume editing an existing block list; new ids continue after it.
    pub fn from_blocks(blocks: Vec<BlockInstance>) -> Self {
        let next_sequence = blocks.len() as u64;
        Self {
            blocks,
            next_sequence,
        }
    }

    pub fn from_template(template: &PageTemplate) -> Self {
        let mut composition = Self::new();
        composition.apply_template(template);
        composition
    }

    pub fn from_catalog(catalog: &TemplateCatalog, name: &str) -> Result<Self, CompositionError> {
        catalog
            .get(name)
            .map(Self::from_template)
            .ok_or_else(|| CompositionError::UnknownTemplate(name.to_string()))
    }

    pub fn blocks(&self) -> &[BlockInstance] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<BlockInstance> {
        self.blocks
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Append every template block with fresh ids.
    pub fn apply_template(&mut self, template: &PageTemplate) -> Vec<BlockId> {
        template
            .blocks
            .iter()
            .map(|block| {
                let id = self.allocate_id();
                self.blocks.push(block.instantiate(id.clone()));
                id
            })
            .collect()
    }

    pub fn add_block(
        &mut self,
        block_type: &str,
        content: Map<String, Value>,
        settings: Map<String, Value>,
    ) -> BlockId {
        let index = self.blocks.len();
        self.insert_at(index, block_type, content, settings)
    }

    pub fn insert_block(
        &mut self,
        index: usize,
        block_type: &str,
        content: Map<String, Value>,
        settings: Map<String, Value>,
    ) -> Result<BlockId, CompositionError> {
        if index > self.blocks.len() {
            return Err(CompositionError::IndexOutOfRange {
                index,
                len: self.blocks.len(),
            });
        }
        Ok(self.insert_at(index, block_type, content, settings))
    }

    pub fn remove_block(&mut self, id: &BlockId) -> Result<BlockInstance, CompositionError> {
        let position = self.position(id)?;
        Ok(self.blocks.remove(position))
    }

    /// Drag/drop reorder: move `id` so it ends up at `to_index`.
    pub fn move_block(&mut self, id: &BlockId, to_index: usize) -> Result<(), CompositionError> {
        let from = self.position(id)?;
        let last = self.blocks.len() - 1;
        if to_index > last {
            return Err(CompositionError::IndexOutOfRange {
                index: to_index,
                len: last,
            });
        }

        let block = self.blocks.remove(from);
        self.blocks.insert(to_index, block);
        Ok(())
    }

    /// Set one content or settings field. A `null` value removes the key.
    pub fn update_field(
        &mut self,
        id: &BlockId,
        scope: ValidationScope,
        field: &str,
        value: Value,
    ) -> Result<(), CompositionError> {
        let position = self.position(id)?;
        let fields = self.blocks[position]
            .fields_mut(scope)
            .ok_or(CompositionError::PageScopeEdit)?;

        if value.is_null() {
            fields.remove(field);
        } else {
            fields.insert(field.to_string(), value);
        }
        Ok(())
    }

    /// Publish gate: per-block errors attributed to their block, followed by
    /// the page-wide findings.
    pub fn validate(&self, registry: &BlockRegistry) -> ValidationResult {
        validate_composition(registry, &self.blocks)
    }

    fn position(&self, id: &BlockId) -> Result<usize, CompositionError> {
        self.blocks
            .iter()
            .position(|block| &block.id == id)
            .ok_or_else(|| CompositionError::UnknownBlock(id.clone()))
    }

    fn allocate_id(&mut self) -> BlockId {
        loop {
            self.next_sequence += 1;
            let candidate = BlockId(format!("block-{:04}", self.next_sequence));
            if !self.blocks.iter().any(|block| block.id == candidate) {
                return candidate;
            }
        }
    }

    fn insert_at(
        &mut self,
        index: usize,
        block_type: &str,
        content: Map<String, Value>,
        settings: Map<String, Value>,
    ) -> BlockId {
        let id = self.allocate_id();
        self.blocks.insert(
            index,
            BlockInstance {
                id: id.clone(),
                block_type: block_type.to_string(),
                component: block_type.to_string(),
                content,
                settings,
            },
        );
        id
    }
}

/// Per-block validation of every block followed by the page-wide checks.
pub fn validate_composition(registry: &BlockRegistry, blocks: &[BlockInstance]) -> ValidationResult {
    let mut result = ValidationResult::valid();

    for block in blocks {
        let mut block_result =
            registry.validate_block(&block.block_type, &block.content, &block.settings);
        for error in &mut block_result.errors {
            error.block_id = Some(block.id.clone());
        }
        result.merge(block_result);
    }

    result.merge(validate_page(blocks));
    result
}

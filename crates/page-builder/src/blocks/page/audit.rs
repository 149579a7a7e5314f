use std::collections::HashMap;

use super::super::domain::{block_types, BlockId, BlockInstance, ValidationError, ValidationScope};
use super::super::predicates::{is_blank, is_truthy};
use super::headings::{count_h1, find_skip, OutlineHeading};

pub(crate) fn duplicate_ids(blocks: &[BlockInstance]) -> Option<ValidationError> {
    let mut occurrences: HashMap<&BlockId, usize> = HashMap::new();
    for block in blocks {
        *occurrences.entry(&block.id).or_default() += 1;
    }

    let mut duplicates: Vec<&str> = Vec::new();
    for block in blocks {
        let id = block.id.as_str();
        if occurrences[&block.id] > 1 && !duplicates.contains(&id) {
            duplicates.push(id);
        }
    }

    if duplicates.is_empty() {
        return None;
    }

    Some(ValidationError::page(
        "id",
        format!("Duplicate block IDs found: {}", duplicates.join(", ")),
    ))
}

pub(crate) fn heading_hierarchy(outline: &[OutlineHeading]) -> Option<ValidationError> {
    find_skip(outline).map(|skip| {
        ValidationError::page(
            "headings",
            format!(
                "Heading hierarchy skips levels (H{} followed by H{})",
                skip.from, skip.to
            ),
        )
        .for_block(&skip.block_id)
    })
}

pub(crate) fn accessibility(blocks: &[BlockInstance]) -> Vec<ValidationError> {
    blocks
        .iter()
        .filter_map(|block| {
            if block.is_type(block_types::IMAGE) && !is_truthy(block.content_field("alt")) {
                return Some(
                    ValidationError::new(
                        "alt",
                        "Images should have alt text for accessibility",
                        ValidationScope::Content,
                    )
                    .for_block(&block.id),
                );
            }

            if block.is_type(block_types::BUTTON) && is_blank(block.content_field("text")) {
                return Some(
                    ValidationError::new(
                        "text",
                        "Buttons should have descriptive text",
                        ValidationScope::Content,
                    )
                    .for_block(&block.id),
                );
            }

            None
        })
        .collect()
}

pub(crate) fn seo(outline: &[OutlineHeading]) -> Option<ValidationError> {
    match count_h1(outline) {
        0 => Some(ValidationError::page(
            "h1",
            "Page should have at least one H1 heading",
        )),
        1 => None,
        _ => Some(ValidationError::page("h1", "Page should have only one H1 heading")),
    }
}

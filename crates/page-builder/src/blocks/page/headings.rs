use serde::Serialize;

use super::super::domain::{block_types, BlockId, BlockInstance};
use super::super::predicates::{as_integer, is_blank, is_truthy};

/// Heading as it will appear in the rendered document outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineHeading {
    pub block_id: BlockId,
    pub level: u8,
    pub text: String,
}

/// First place where the outline jumps more than one level deeper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadingSkip {
    pub from: u8,
    pub to: u8,
    pub block_id: BlockId,
}

/// Build the virtual outline in document order. A hero with a title is an
/// implicit H1; heading blocks contribute their authored level.
pub fn extract_outline(blocks: &[BlockInstance]) -> Vec<OutlineHeading> {
    blocks.iter().filter_map(outline_entry).collect()
}

fn outline_entry(block: &BlockInstance) -> Option<OutlineHeading> {
    if block.is_type(block_types::HERO) {
        let title = block.content_field("title");
        if !is_truthy(title) || is_blank(title) {
            return None;
        }
        return Some(OutlineHeading {
            block_id: block.id.clone(),
            level: 1,
            text: title.as_str().unwrap_or_default().trim().to_string(),
        });
    }

    if block.is_type(block_types::HEADING) {
        let level = as_integer(block.content_field("level")).filter(|level| (1..=6).contains(level))?;
        return Some(OutlineHeading {
            block_id: block.id.clone(),
            level: level as u8,
            text: block
                .content_field("text")
                .as_str()
                .unwrap_or_default()
                .trim()
                .to_string(),
        });
    }

    None
}

/// Walk the outline; the first heading may sit at any level, later ones may
/// go at most one level deeper than their predecessor.
pub fn find_skip(outline: &[OutlineHeading]) -> Option<HeadingSkip> {
    outline.windows(2).find_map(|pair| {
        let (previous, current) = (&pair[0], &pair[1]);
        (current.level > previous.level + 1).then(|| HeadingSkip {
            from: previous.level,
            to: current.level,
            block_id: current.block_id.clone(),
        })
    })
}

pub fn count_h1(outline: &[OutlineHeading]) -> usize {
    outline.iter().filter(|heading| heading.level == 1).count()
}

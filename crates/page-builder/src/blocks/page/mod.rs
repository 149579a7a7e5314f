//! Page-wide checks over an ordered block list.
//!
//! Only duplicate block ids are errors. Outline, accessibility, and SEO
//! findings are advisory warnings and never block a save.

mod audit;
pub mod headings;

use super::domain::{BlockInstance, ValidationResult};

pub use headings::{extract_outline, OutlineHeading};

/// Run every page-level check and fold the findings into one result.
pub fn validate_page(blocks: &[BlockInstance]) -> ValidationResult {
    let outline = extract_outline(blocks);

    let errors = audit::duplicate_ids(blocks).into_iter().collect();

    let mut warnings = Vec::new();
    warnings.extend(audit::heading_hierarchy(&outline));
    warnings.extend(audit::accessibility(blocks));
    warnings.extend(audit::seo(&outline));

    ValidationResult::from_parts(errors, warnings)
}

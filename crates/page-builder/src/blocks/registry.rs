use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use super::domain::block_types;
use super::rules::{CustomCheck, ValidationRule};

/// Ordered rule list for a single field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRules {
    pub field: String,
    pub rules: Vec<ValidationRule>,
}

impl FieldRules {
    pub fn new(field: impl Into<String>, rules: Vec<ValidationRule>) -> Self {
        Self {
            field: field.into(),
            rules,
        }
    }
}

/// Validation schema for one block type. Field order is significant: it is
/// the order errors are reported in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockSchema {
    #[serde(default)]
    pub content: Vec<FieldRules>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub settings: Vec<FieldRules>,
}

impl BlockSchema {
    pub fn content_field(&self, field: &str) -> Option<&FieldRules> {
        self.content.iter().find(|entry| entry.field == field)
    }

    pub fn settings_field(&self, field: &str) -> Option<&FieldRules> {
        self.settings.iter().find(|entry| entry.field == field)
    }
}

/// Error raised while building or extending a registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("unable to read block schema file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Also covers pattern rules whose expression does not compile.
    #[error("block schema document is malformed: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Immutable lookup table from block type to validation schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BlockRegistry {
    schemas: BTreeMap<String, BlockSchema>,
}

static STANDARD_REGISTRY: LazyLock<BlockRegistry> = LazyLock::new(BlockRegistry::standard);

impl BlockRegistry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Shared instance of the built-in block table.
    pub fn shared() -> &'static BlockRegistry {
        &STANDARD_REGISTRY
    }

    /// Registry covering the blocks shipped with the builder.
    pub fn standard() -> Self {
        use CustomCheck::*;
        use ValidationRule as Rule;

        let mut registry = Self::empty();

        registry = registry.with_schema(
            block_types::HERO,
            BlockSchema {
                content: vec![
                    FieldRules::new(
                        "title",
                        vec![
                            Rule::required("Title is required"),
                            Rule::min_length(3, "Title must be at least 3 characters"),
                            Rule::max_length(100, "Title must be less than 100 characters"),
                        ],
                    ),
                    FieldRules::new(
                        "description",
                        vec![Rule::max_length(
                            500,
                            "Description must be less than 500 characters",
                        )],
                    ),
                    FieldRules::new(
                        "backgroundImage",
                        vec![Rule::custom(
                            ImageUrl,
                            "Background image must be a valid image URL",
                        )],
                    ),
                ],
                settings: Vec::new(),
            },
        );

        registry = registry.with_schema(
            block_types::FEATURES,
            BlockSchema {
                content: vec![
                    FieldRules::new("title", vec![Rule::required("Title is required")]),
                    FieldRules::new(
                        "features",
                        vec![
                            Rule::custom(NonEmptyArray, "At least one feature is required"),
                            Rule::custom(MaxItems { max: 12 }, "Maximum 12 features allowed"),
                        ],
                    ),
                ],
                settings: vec![FieldRules::new(
                    "columns",
                    vec![Rule::custom(
                        IntegerRange { min: 1, max: 6 },
                        "Columns must be a whole number between 1 and 6",
                    )],
                )],
            },
        );

        registry = registry.with_schema(
            block_types::TESTIMONIALS,
            BlockSchema {
                content: vec![
                    FieldRules::new("title", vec![Rule::required("Title is required")]),
                    FieldRules::new(
                        "testimonials",
                        vec![Rule::custom(
                            NonEmptyArray,
                            "At least one testimonial is required",
                        )],
                    ),
                ],
                settings: Vec::new(),
            },
        );

        registry = registry.with_schema(
            block_types::IMAGE,
            BlockSchema {
                content: vec![
                    FieldRules::new(
                        "src",
                        vec![
                            Rule::required("Image source is required"),
                            Rule::custom(ImageUrl, "Image source must be a valid image URL"),
                        ],
                    ),
                    FieldRules::new(
                        "alt",
                        vec![
                            Rule::required("Alt text is required for accessibility"),
                            Rule::max_length(125, "Alt text must be less than 125 characters"),
                        ],
                    ),
                ],
                settings: Vec::new(),
            },
        );

        registry = registry.with_schema(
            block_types::BUTTON,
            BlockSchema {
                content: vec![
                    FieldRules::new(
                        "text",
                        vec![
                            Rule::required("Button text is required"),
                            Rule::max_length(50, "Button text must be less than 50 characters"),
                        ],
                    ),
                    FieldRules::new(
                        "href",
                        vec![Rule::custom(Url, "Button link must be a valid URL")],
                    ),
                ],
                settings: Vec::new(),
            },
        );

        registry = registry.with_schema(
            block_types::CONTACT_FORM,
            BlockSchema {
                content: vec![
                    FieldRules::new("title", vec![Rule::required("Title is required")]),
                    FieldRules::new(
                        "fields",
                        vec![
                            Rule::custom(NonEmptyArray, "At least one form field is required"),
                            Rule::custom(MaxItems { max: 20 }, "Maximum 20 form fields allowed"),
                        ],
                    ),
                ],
                settings: Vec::new(),
            },
        );

        registry = registry.with_schema(
            block_types::VIDEO,
            BlockSchema {
                content: vec![FieldRules::new(
                    "embedUrl",
                    vec![
                        Rule::required("Video URL is required"),
                        Rule::custom(VideoUrl, "Video URL must be a YouTube or Vimeo link"),
                    ],
                )],
                settings: Vec::new(),
            },
        );

        registry.with_schema(
            block_types::HEADING,
            BlockSchema {
                content: vec![
                    FieldRules::new(
                        "text",
                        vec![
                            Rule::required("Heading text is required"),
                            Rule::max_length(200, "Heading must be less than 200 characters"),
                        ],
                    ),
                    FieldRules::new(
                        "level",
                        vec![Rule::custom(
                            HeadingLevel,
                            "Heading level must be between 1 and 6",
                        )],
                    ),
                ],
                settings: Vec::new(),
            },
        )
    }

    /// Add or replace the schema for `block_type`.
    pub fn with_schema(mut self, block_type: impl Into<String>, schema: BlockSchema) -> Self {
        self.schemas.insert(block_type.into(), schema);
        self
    }

    /// Merge schemas from a JSON document shaped `{ "<BlockType>": BlockSchema, ... }`.
    /// Entries replace built-in schemas of the same name.
    pub fn extend_from_json(self, document: &str) -> Result<Self, RegistryError> {
        let schemas: BTreeMap<String, BlockSchema> = serde_json::from_str(document)?;
        Ok(schemas
            .into_iter()
            .fold(self, |registry, (block_type, schema)| {
                registry.with_schema(block_type, schema)
            }))
    }

    pub fn extend_from_path(self, path: impl AsRef<Path>) -> Result<Self, RegistryError> {
        let path = path.as_ref();
        let document = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.extend_from_json(&document)
    }

    pub fn lookup(&self, block_type: &str) -> Option<&BlockSchema> {
        self.schemas.get(block_type)
    }

    pub fn contains(&self, block_type: &str) -> bool {
        self.schemas.contains_key(block_type)
    }

    pub fn block_types(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::rules::RuleKind;

    #[test]
    fn standard_table_covers_shipped_blocks() {
        let registry = BlockRegistry::standard();
        for block_type in [
            block_types::HERO,
            block_types::FEATURES,
            block_types::TESTIMONIALS,
            block_types::IMAGE,
            block_types::BUTTON,
            block_types::CONTACT_FORM,
            block_types::VIDEO,
            block_types::HEADING,
        ] {
            assert!(registry.contains(block_type), "{block_type} registered");
        }
        assert!(registry.lookup("CarouselBlock").is_none());
    }

    #[test]
    fn hero_title_rules_keep_declaration_order() {
        let registry = BlockRegistry::shared();
        let hero = registry.lookup(block_types::HERO).expect("hero schema");
        let title = hero.content_field("title").expect("title rules");
        let kinds: Vec<_> = title.rules.iter().map(|rule| rule.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                RuleKind::Required,
                RuleKind::MinLength { value: 3 },
                RuleKind::MaxLength { value: 100 },
            ]
        );
    }

    #[test]
    fn json_extension_adds_and_overrides_schemas() {
        let document = r#"{
            "PricingBlock": {
                "content": [
                    { "field": "plan", "rules": [ { "kind": "required", "message": "Plan is required" } ] }
                ]
            },
            "VideoBlock": {
                "content": [
                    { "field": "embedUrl", "rules": [] }
                ]
            }
        }"#;

        let registry = BlockRegistry::standard()
            .extend_from_json(document)
            .expect("document parses");

        assert!(registry.contains("PricingBlock"));
        let video = registry.lookup(block_types::VIDEO).expect("video schema");
        assert!(video.content_field("embedUrl").expect("field").rules.is_empty());
    }

    #[test]
    fn json_extension_reports_bad_patterns() {
        let document = r#"{
            "SlugBlock": {
                "content": [
                    { "field": "slug", "rules": [ { "kind": "pattern", "value": "([", "message": "bad" } ] }
                ]
            }
        }"#;

        match BlockRegistry::empty().extend_from_json(document) {
            Err(RegistryError::Parse(_)) => {}
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn missing_schema_file_is_an_io_error() {
        match BlockRegistry::empty().extend_from_path("/nonexistent/blocks.json") {
            Err(RegistryError::Io { path, .. }) => {
                assert_eq!(path, PathBuf::from("/nonexistent/blocks.json"))
            }
            other => panic!("expected io error, got {other:?}"),
        }
    }
}

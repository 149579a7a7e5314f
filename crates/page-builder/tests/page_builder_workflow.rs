//! End-to-end editing scenarios driven through the public crate surface: seed a
//! page from a template, edit it the way the builder UI does, and run the
//! publish gate after each step.

use std::io::Write;
use std::sync::Arc;

use page_builder::blocks::{
    block_types, validate_block, BlockId, BlockRegistry, PageBuilderService, PageComposition,
    TemplateCatalog, ValidationScope,
};
use page_builder::config::BuilderConfig;
use serde_json::{json, Map, Value};

fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("object literal")
}

#[test]
fn landing_page_edit_session() {
    let catalog = TemplateCatalog::standard();
    let registry = BlockRegistry::shared();
    let mut page = PageComposition::from_catalog(&catalog, "landing").expect("landing exists");

    let seeded = page.validate(registry);
    assert!(seeded.is_valid, "seeded page errors: {:?}", seeded.errors);

    let hero_id = page.blocks()[0].id.clone();
    page.update_field(&hero_id, ValidationScope::Content, "title", json!(""))
        .expect("hero exists");

    let cleared = page.validate(registry);
    assert!(!cleared.is_valid);
    assert!(cleared
        .errors
        .iter()
        .all(|error| error.block_id.as_ref() == Some(&hero_id)));
    assert_eq!(cleared.warnings_for("h1").len(), 1);

    page.update_field(&hero_id, ValidationScope::Content, "title", json!("Launch day"))
        .expect("hero exists");
    let image_id = page
        .insert_block(
            1,
            block_types::IMAGE,
            object(json!({ "src": "https://cdn.example.com/launch.png", "alt": "Launch crowd" })),
            Map::new(),
        )
        .expect("insert after hero");
    page.move_block(&image_id, 4).expect("move to bottom");

    assert_eq!(page.blocks().last().map(|block| &block.id), Some(&image_id));
    let restored = page.validate(registry);
    assert!(restored.is_valid);
    assert!(restored.warnings.is_empty());
}

#[test]
fn resumed_page_with_duplicate_ids_cannot_publish() {
    let service = PageBuilderService::default();
    let blocks = serde_json::from_value(json!([
        { "id": "b1", "type": "HeroBlock", "component": "Hero", "content": { "title": "Docs" } },
        { "id": "b1", "type": "HeadingBlock", "content": { "text": "Install", "level": 2 } },
        { "id": "b2", "type": "MarqueeBlock", "content": { "anything": true } }
    ]))
    .expect("blocks parse");

    let page = PageComposition::from_blocks(blocks);
    let check = service.publish_check(page.blocks());

    assert!(!check.publishable);
    assert_eq!(check.result.errors.len(), 1);
    assert_eq!(check.result.errors[0].field, "id");
    assert!(check.result.errors[0].message.contains("b1"));
}

#[test]
fn configured_schema_file_extends_the_registry() {
    let dir = std::env::temp_dir().join(format!("page-builder-schemas-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("temp dir");
    let path = dir.join("blocks.json");
    let mut file = std::fs::File::create(&path).expect("schema file");
    write!(
        file,
        "{}",
        json!({
            "PricingBlock": {
                "content": [
                    { "field": "plans", "rules": [
                        { "kind": "custom", "predicate": { "name": "nonEmptyArray" }, "message": "Add at least one plan" },
                        { "kind": "custom", "predicate": { "name": "maxItems", "max": 4 }, "message": "Four plans at most" }
                    ] }
                ],
                "settings": [
                    { "field": "currency", "rules": [
                        { "kind": "pattern", "value": "^[A-Z]{3}$", "message": "Use an ISO currency code" }
                    ] }
                ]
            }
        })
    )
    .expect("write schema");

    let config = BuilderConfig {
        schema_path: Some(path.clone()),
    };
    let registry = Arc::new(config.registry().expect("registry loads"));
    let service = PageBuilderService::new(registry, Arc::new(TemplateCatalog::standard()));

    let result = service.validate_block(
        "PricingBlock",
        &object(json!({ "plans": [] })),
        &object(json!({ "currency": "euro" })),
    );
    let messages: Vec<_> = result.errors.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, vec!["Add at least one plan", "Use an ISO currency code"]);

    assert!(service.rules_for(block_types::HERO).is_some());
    assert!(validate_block("PricingBlock", &Map::new(), &Map::new()).is_valid);

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn removing_the_only_hero_leaves_a_missing_h1_warning() {
    let catalog = TemplateCatalog::standard();
    let mut page = PageComposition::from_catalog(&catalog, "about").expect("about exists");
    let hero = page.blocks()[0].id.clone();

    page.remove_block(&hero).expect("hero removed");
    let result = page.validate(BlockRegistry::shared());

    assert!(result.is_valid);
    assert_eq!(result.warnings_for("h1").len(), 1);
    assert!(page.blocks().iter().all(|block| block.id != BlockId::from("block-0001")));
}

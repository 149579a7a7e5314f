use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::domain::{block_types, BlockId, BlockInstance};

/// Default block a template seeds into a new page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub component: String,
    #[serde(default)]
    pub content: Map<String, Value>,
    #[serde(default)]
    pub settings: Map<String, Value>,
}

impl TemplateBlock {
    fn new(block_type: &str, content: Value, settings: Value) -> Self {
        Self {
            block_type: block_type.to_string(),
            component: block_type.to_string(),
            content: content.as_object().cloned().unwrap_or_default(),
            settings: settings.as_object().cloned().unwrap_or_default(),
        }
    }

    pub fn instantiate(&self, id: BlockId) -> BlockInstance {
        BlockInstance {
            id,
            block_type: self.block_type.clone(),
            component: self.component.clone(),
            content: self.content.clone(),
            settings: self.settings.clone(),
        }
    }
}

/// Named, ordered collection of default blocks used to start a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageTemplate {
    pub name: String,
    pub description: String,
    pub blocks: Vec<TemplateBlock>,
}

/// Lightweight listing entry for template pickers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateSummary {
    pub name: String,
    pub description: String,
    pub block_types: Vec<String>,
}

impl PageTemplate {
    pub fn summary(&self) -> TemplateSummary {
        TemplateSummary {
            name: self.name.clone(),
            description: self.description.clone(),
            block_types: self
                .blocks
                .iter()
                .map(|block| block.block_type.clone())
                .collect(),
        }
    }
}

/// The template set offered when creating a page.
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateCatalog {
    templates: Vec<PageTemplate>,
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl TemplateCatalog {
    pub fn new(templates: Vec<PageTemplate>) -> Self {
        Self { templates }
    }

    pub fn standard() -> Self {
        Self::new(vec![landing(), about(), contact()])
    }

    pub fn get(&self, name: &str) -> Option<&PageTemplate> {
        self.templates.iter().find(|template| template.name == name)
    }

    pub fn summaries(&self) -> Vec<TemplateSummary> {
        self.templates.iter().map(PageTemplate::summary).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PageTemplate> {
        self.templates.iter()
    }
}

fn landing() -> PageTemplate {
    PageTemplate {
        name: "landing".to_string(),
        description: "Product landing page with hero, features, social proof, and a call to action"
            .to_string(),
        blocks: vec![
            TemplateBlock::new(
                block_types::HERO,
                json!({
                    "title": "Build something people love",
                    "description": "Tell visitors what you do in one sentence.",
                    "backgroundImage": "/images/hero-default.jpg"
                }),
                json!({ "height": "large", "alignment": "center" }),
            ),
            TemplateBlock::new(
                block_types::FEATURES,
                json!({
                    "title": "Why choose us",
                    "features": [
                        { "title": "Fast", "description": "Pages load in a blink." },
                        { "title": "Reliable", "description": "Always available." },
                        { "title": "Secure", "description": "Data handled with care." }
                    ]
                }),
                json!({ "columns": 3 }),
            ),
            TemplateBlock::new(
                block_types::TESTIMONIALS,
                json!({
                    "title": "What our customers say",
                    "testimonials": [
                        { "quote": "It changed how we work.", "author": "A. Customer" }
                    ]
                }),
                json!({}),
            ),
            TemplateBlock::new(
                block_types::BUTTON,
                json!({ "text": "Get started", "href": "/signup" }),
                json!({ "variant": "primary" }),
            ),
        ],
    }
}

fn about() -> PageTemplate {
    PageTemplate {
        name: "about".to_string(),
        description: "Company story with a team photo and testimonials".to_string(),
        blocks: vec![
            TemplateBlock::new(
                block_types::HERO,
                json!({ "title": "About us", "description": "Who we are and what drives us." }),
                json!({ "height": "medium" }),
            ),
            TemplateBlock::new(
                block_types::HEADING,
                json!({ "text": "Our story", "level": 2 }),
                json!({}),
            ),
            TemplateBlock::new(
                block_types::IMAGE,
                json!({ "src": "/images/team.jpg", "alt": "Our team at the office" }),
                json!({ "rounded": true }),
            ),
            TemplateBlock::new(
                block_types::TESTIMONIALS,
                json!({
                    "title": "Kind words",
                    "testimonials": [
                        { "quote": "A pleasure to work with.", "author": "A. Partner" }
                    ]
                }),
                json!({}),
            ),
        ],
    }
}

fn contact() -> PageTemplate {
    PageTemplate {
        name: "contact".to_string(),
        description: "Contact page with an enquiry form and an introduction video".to_string(),
        blocks: vec![
            TemplateBlock::new(
                block_types::HERO,
                json!({ "title": "Get in touch", "description": "We usually reply within a day." }),
                json!({ "height": "small" }),
            ),
            TemplateBlock::new(
                block_types::CONTACT_FORM,
                json!({
                    "title": "Send us a message",
                    "fields": [
                        { "name": "name", "label": "Name", "type": "text", "required": true },
                        { "name": "email", "label": "Email", "type": "email", "required": true },
                        { "name": "message", "label": "Message", "type": "textarea", "required": true }
                    ]
                }),
                json!({}),
            ),
            TemplateBlock::new(
                block_types::VIDEO,
                json!({ "embedUrl": "https://www.youtube.com/embed/dQw4w9WgXcQ" }),
                json!({ "autoplay": false }),
            ),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_catalog_lists_templates_in_order() {
        let names: Vec<_> = TemplateCatalog::standard()
            .summaries()
            .into_iter()
            .map(|summary| summary.name)
            .collect();
        assert_eq!(names, vec!["landing", "about", "contact"]);
    }

    #[test]
    fn template_blocks_instantiate_with_the_given_id() {
        let catalog = TemplateCatalog::standard();
        let landing = catalog.get("landing").expect("landing template");
        let hero = landing.blocks[0].instantiate(BlockId::from("page-1"));

        assert_eq!(hero.id.as_str(), "page-1");
        assert_eq!(hero.block_type, block_types::HERO);
        assert_eq!(hero.component, block_types::HERO);
        assert_eq!(hero.content, landing.blocks[0].content);
        assert_eq!(
            landing.summary().block_types,
            vec![
                block_types::HERO,
                block_types::FEATURES,
                block_types::TESTIMONIALS,
                block_types::BUTTON
            ]
        );
    }
}

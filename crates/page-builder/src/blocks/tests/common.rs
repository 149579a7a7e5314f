use std::sync::Arc;

use axum::response::Response;
use serde_json::{Map, Value};

use crate::blocks::domain::{block_types, BlockInstance};
use crate::blocks::{page_builder_router, PageBuilderService};

pub(super) fn object(value: Value) -> Map<String, Value> {
    value.as_object().cloned().expect("object literal")
}

pub(super) fn hero(id: &str, title: &str) -> BlockInstance {
    BlockInstance::new(id, block_types::HERO).with_content("title", Value::from(title))
}

pub(super) fn heading(id: &str, level: u8, text: &str) -> BlockInstance {
    BlockInstance::new(id, block_types::HEADING)
        .with_content("level", Value::from(level))
        .with_content("text", Value::from(text))
}

pub(super) fn image(id: &str, src: &str, alt: Value) -> BlockInstance {
    BlockInstance::new(id, block_types::IMAGE)
        .with_content("src", Value::from(src))
        .with_content("alt", alt)
}

pub(super) fn button(id: &str, text: &str, href: &str) -> BlockInstance {
    BlockInstance::new(id, block_types::BUTTON)
        .with_content("text", Value::from(text))
        .with_content("href", Value::from(href))
}

pub(super) fn service() -> Arc<PageBuilderService> {
    Arc::new(PageBuilderService::default())
}

pub(super) fn router() -> axum::Router {
    page_builder_router(service())
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

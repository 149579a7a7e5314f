use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::composition::CompositionError;
use super::domain::{BlockInstance, ValidationError};
use super::service::PageBuilderService;

/// Payload for validating a single block.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockValidationRequest {
    #[serde(rename = "type")]
    pub block_type: String,
    #[serde(default)]
    pub content: Map<String, Value>,
    #[serde(default)]
    pub settings: Map<String, Value>,
}

/// Payload for inline validation of a single field.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidationRequest {
    #[serde(rename = "type")]
    pub block_type: String,
    pub field: String,
    #[serde(default)]
    pub value: Value,
    #[serde(default)]
    pub is_settings: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationResponse {
    pub errors: Vec<ValidationError>,
}

/// Ordered block list submitted by the editor.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PageValidationRequest {
    pub blocks: Vec<BlockInstance>,
}

/// Router exposing the block, page, and template endpoints.
pub fn page_builder_router(service: Arc<PageBuilderService>) -> Router {
    Router::new()
        .route("/api/v1/blocks/types", get(block_types_handler))
        .route("/api/v1/blocks/validate", post(validate_block_handler))
        .route("/api/v1/blocks/field", post(field_errors_handler))
        .route("/api/v1/blocks/:block_type/rules", get(rules_handler))
        .route("/api/v1/pages/validate", post(validate_page_handler))
        .route("/api/v1/pages/publish-check", post(publish_check_handler))
        .route("/api/v1/templates", get(templates_handler))
        .route(
            "/api/v1/templates/:name/instantiate",
            post(instantiate_template_handler),
        )
        .with_state(service)
}

pub(crate) async fn block_types_handler(
    State(service): State<Arc<PageBuilderService>>,
) -> Response {
    let payload = json!({ "blockTypes": service.block_types() });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn validate_block_handler(
    State(service): State<Arc<PageBuilderService>>,
    Json(request): Json<BlockValidationRequest>,
) -> Response {
    let result = service.validate_block(
        &request.block_type,
        &request.content,
        &request.settings,
    );
    (StatusCode::OK, Json(result)).into_response()
}

pub(crate) async fn field_errors_handler(
    State(service): State<Arc<PageBuilderService>>,
    Json(request): Json<FieldValidationRequest>,
) -> Response {
    let errors = service.field_errors(
        &request.block_type,
        &request.field,
        &request.value,
        request.is_settings,
    );
    (StatusCode::OK, Json(FieldValidationResponse { errors })).into_response()
}

pub(crate) async fn rules_handler(
    State(service): State<Arc<PageBuilderService>>,
    Path(block_type): Path<String>,
) -> Response {
    match service.rules_for(&block_type) {
        Some(schema) => (StatusCode::OK, Json(schema)).into_response(),
        None => {
            let payload = json!({
                "error": format!("no validation rules registered for {block_type}"),
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

pub(crate) async fn validate_page_handler(
    State(service): State<Arc<PageBuilderService>>,
    Json(request): Json<PageValidationRequest>,
) -> Response {
    let result = service.validate_page(&request.blocks);
    (StatusCode::OK, Json(result)).into_response()
}

pub(crate) async fn publish_check_handler(
    State(service): State<Arc<PageBuilderService>>,
    Json(request): Json<PageValidationRequest>,
) -> Response {
    let check = service.publish_check(&request.blocks);
    let status = if check.publishable {
        StatusCode::OK
    } else {
        StatusCode::UNPROCESSABLE_ENTITY
    };
    (status, Json(check)).into_response()
}

pub(crate) async fn templates_handler(
    State(service): State<Arc<PageBuilderService>>,
) -> Response {
    let payload = json!({ "templates": service.template_summaries() });
    (StatusCode::OK, Json(payload)).into_response()
}

pub(crate) async fn instantiate_template_handler(
    State(service): State<Arc<PageBuilderService>>,
    Path(name): Path<String>,
) -> Response {
    match service.instantiate_template(&name) {
        Ok(blocks) => (StatusCode::CREATED, Json(json!({ "blocks": blocks }))).into_response(),
        Err(error @ CompositionError::UnknownTemplate(_)) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
        Err(other) => {
            let payload = json!({ "error": other.to_string() });
            (StatusCode::BAD_REQUEST, Json(payload)).into_response()
        }
    }
}

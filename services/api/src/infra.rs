use metrics_exporter_prometheus::PrometheusHandle;
use page_builder::blocks::{BlockRegistry, PageBuilderService, TemplateCatalog};
use page_builder::config::{AppConfig, BuilderConfig};
use page_builder::error::AppError;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Registry from configuration, with an optional command-line override for
/// the extra schema file.
pub(crate) fn load_registry(
    config: &BuilderConfig,
    schemas_override: Option<&Path>,
) -> Result<BlockRegistry, AppError> {
    let config = match schemas_override {
        Some(path) => BuilderConfig {
            schema_path: Some(path.to_path_buf()),
        },
        None => config.clone(),
    };
    Ok(config.registry()?)
}

/// Registry for the offline commands, read from the same environment as the
/// server so both agree on which block types exist.
pub(crate) fn configured_registry(
    schemas_override: Option<&Path>,
) -> Result<BlockRegistry, AppError> {
    let config = AppConfig::load()?;
    load_registry(&config.builder, schemas_override)
}

pub(crate) fn build_service(registry: BlockRegistry) -> Arc<PageBuilderService> {
    Arc::new(PageBuilderService::new(
        Arc::new(registry),
        Arc::new(TemplateCatalog::standard()),
    ))
}

use crate::infra::{build_service, configured_registry};
use clap::Args;
use page_builder::blocks::{BlockInstance, BlockRegistry, PublishCheck, ValidationError};
use page_builder::error::AppError;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit status of `validate` when the page has blocking errors.
const BLOCKED_EXIT_CODE: u8 = 2;

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// JSON file holding the page blocks (an array or `{ "blocks": [...] }`)
    #[arg(long)]
    pub(crate) blocks: PathBuf,
    /// Extra block schemas merged over the built-in table
    #[arg(long)]
    pub(crate) schemas: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct TemplatesArgs {
    /// Print the seeded blocks of the named template instead of the listing
    #[arg(long)]
    pub(crate) instantiate: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum PageDocument {
    Bare(Vec<BlockInstance>),
    Wrapped { blocks: Vec<BlockInstance> },
}

impl PageDocument {
    fn into_blocks(self) -> Vec<BlockInstance> {
        match self {
            Self::Bare(blocks) | Self::Wrapped { blocks } => blocks,
        }
    }
}

/// Run the publish gate over a page file. A page with blocking errors maps to
/// a non-zero exit status.
pub(crate) fn run_validate(args: ValidateArgs) -> Result<ExitCode, AppError> {
    let registry = configured_registry(args.schemas.as_deref())?;
    let raw = fs::read_to_string(&args.blocks)?;
    let (blocks, check) = check_page(registry, &raw)?;

    print!("{}", render_report(&blocks, &check));

    if check.publishable {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(BLOCKED_EXIT_CODE))
    }
}

pub(crate) fn run_rules(block_type: &str) -> Result<ExitCode, AppError> {
    let registry = configured_registry(None)?;
    println!("{}", rules_document(&registry, block_type)?);
    Ok(ExitCode::SUCCESS)
}

pub(crate) fn run_templates(args: TemplatesArgs) -> Result<ExitCode, AppError> {
    let service = build_service(configured_registry(None)?);

    match args.instantiate {
        Some(name) => {
            let blocks = service.instantiate_template(&name)?;
            println!("{}", serde_json::to_string_pretty(&blocks)?);
        }
        None => {
            for summary in service.template_summaries() {
                println!("{:<10} {}", summary.name, summary.description);
                println!("           blocks: {}", summary.block_types.join(", "));
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn check_page(
    registry: BlockRegistry,
    raw: &str,
) -> Result<(Vec<BlockInstance>, PublishCheck), AppError> {
    let blocks = parse_blocks(raw)?;
    let check = build_service(registry).publish_check(&blocks);
    Ok((blocks, check))
}

fn rules_document(registry: &BlockRegistry, block_type: &str) -> Result<String, AppError> {
    match registry.lookup(block_type) {
        Some(schema) => Ok(serde_json::to_string_pretty(schema)?),
        None => Ok(format!(
            "{block_type} has no registered rules; any content is accepted"
        )),
    }
}

fn parse_blocks(raw: &str) -> Result<Vec<BlockInstance>, AppError> {
    let document: PageDocument = serde_json::from_str(raw)?;
    Ok(document.into_blocks())
}

fn render_report(blocks: &[BlockInstance], check: &PublishCheck) -> String {
    let mut report = String::new();
    let verdict = if check.publishable {
        "publishable"
    } else {
        "blocked"
    };
    report.push_str(&format!("Page with {} block(s): {verdict}\n", blocks.len()));

    if !check.result.errors.is_empty() {
        report.push_str(&format!("Errors ({}):\n", check.result.errors.len()));
        for error in &check.result.errors {
            report.push_str(&format_finding(error));
        }
    }

    if !check.result.warnings.is_empty() {
        report.push_str(&format!("Warnings ({}):\n", check.result.warnings.len()));
        for warning in &check.result.warnings {
            report.push_str(&format_finding(warning));
        }
    }

    report
}

fn format_finding(finding: &ValidationError) -> String {
    match &finding.block_id {
        Some(block_id) => format!(
            "  - [{}] {}.{}: {}\n",
            block_id,
            finding.scope.label(),
            finding.field,
            finding.message
        ),
        None => format!(
            "  - [page] {}.{}: {}\n",
            finding.scope.label(),
            finding.field,
            finding.message
        ),
    }
}

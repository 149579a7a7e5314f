use crate::inspect::{run_rules, run_templates, run_validate, TemplatesArgs, ValidateArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use page_builder::error::AppError;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(
    name = "Page Builder",
    about = "Validate page-builder blocks and serve the validation API",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Run the publish gate over a JSON file of blocks
    Validate(ValidateArgs),
    /// Print the validation schema registered for a block type
    Rules {
        /// Block type, e.g. HeroBlock
        block_type: String,
    },
    /// List page templates or seed blocks from one
    Templates(TemplatesArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<ExitCode, AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await.map(|()| ExitCode::SUCCESS),
        Command::Validate(args) => run_validate(args),
        Command::Rules { block_type } => run_rules(&block_type),
        Command::Templates(args) => run_templates(args),
    }
}

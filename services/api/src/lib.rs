mod cli;
mod infra;
mod inspect;
mod routes;
mod server;

use page_builder::error::AppError;
use std::process::ExitCode;

pub async fn run() -> Result<ExitCode, AppError> {
    cli::run().await
}

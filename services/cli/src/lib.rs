mod cli;
mod commands;
mod infra;

use rti_portal::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

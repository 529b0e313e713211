//! Command-line and HTTP surfaces around the validation engine.

mod cli;
mod infra;
mod report;
mod routes;
mod server;

pub use routes::router;

use crate::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}

//! Taskboard server entry point.

use taskboard::app::{self, ServerError};
use taskboard::config::AppConfig;
use taskboard::telemetry;

#[tokio::main]
async fn main() -> Result<(), ServerError> {
    telemetry::init()?;
    tracing::info!("starting taskboard");
    let config = AppConfig::from_env()?;
    app::run(config).await
}

use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::services::account;

pub async fn handle(config: &AppConfig, db_name: &str, password: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    let registry = super::open_tenants(config, Some(db_name)).await?;
    let created = account::seed_root(registry.default_db(), password).await?;
    registry.close_all().await;

    let message = if created {
        format!("Created root credential on {}", db_name)
    } else {
        format!("Root credential already exists on {}", db_name)
    };
    output_success(&output_format, &message, Some(json!({ "tenant": db_name, "created": created })))
}

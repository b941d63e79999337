use serde_json::json;

use crate::cli::utils::output_success;
use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::schema;

pub async fn handle(config: &AppConfig, only: Option<&str>, reset: bool, output_format: OutputFormat) -> anyhow::Result<()> {
    let registry = super::open_tenants(config, only).await?;

    for name in registry.names() {
        let Some(db) = registry.lookup(name) else { continue };
        if reset {
            schema::reset(db).await?;
        }
        schema::migrate(db).await?;
        tracing::info!("Migrated {}", name);
    }

    let migrated = registry.names().to_vec();
    registry.close_all().await;

    let verb = if reset { "Reset and migrated" } else { "Migrated" };
    output_success(
        &output_format,
        &format!("{} {} tenant(s): {}", verb, migrated.len(), migrated.join(", ")),
        Some(json!({ "tenants": migrated, "reset": reset })),
    )
}

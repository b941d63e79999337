pub mod company;
pub mod migrate;
pub mod seed_root;
pub mod tenants;

use anyhow::bail;

use crate::config::{parse_tenant_list, AppConfig};
use crate::database::TenantRegistry;

/// Open the configured tenants, or only the requested subset of them.
pub(crate) async fn open_tenants(config: &AppConfig, only: Option<&str>) -> anyhow::Result<TenantRegistry> {
    let names = match only {
        Some(list) => {
            let requested = parse_tenant_list(list);
            if let Some(unknown) = requested.iter().find(|name| !config.database.names.contains(name)) {
                bail!("Tenant '{}' is not configured", unknown);
            }
            requested
        }
        None => config.database.names.clone(),
    };

    Ok(TenantRegistry::initialize(&names, &config.database).await?)
}

use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::{DatabaseError, TenantRegistry};
use crate::services::sms::{LogSmsSender, SmsSender};
use crate::tenant::TenantResolver;

/// Everything a request may reach, built once by the composition root.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub resolver: Arc<TenantResolver>,
    pub sms: Arc<dyn SmsSender>,
}

impl AppState {
    /// Open every configured tenant. Fails if any of them cannot be opened, so no listener
    /// is ever bound for a partially initialised registry.
    pub async fn initialize(config: AppConfig) -> Result<Self, DatabaseError> {
        let registry = TenantRegistry::initialize(&config.database.names, &config.database).await?;
        Ok(Self::new(config, Arc::new(registry), Arc::new(LogSmsSender)))
    }

    pub fn new(config: AppConfig, registry: Arc<TenantRegistry>, sms: Arc<dyn SmsSender>) -> Self {
        Self {
            config: Arc::new(config),
            resolver: Arc::new(TenantResolver::new(registry)),
            sms,
        }
    }

    pub fn registry(&self) -> &TenantRegistry {
        self.resolver.registry()
    }
}

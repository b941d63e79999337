use std::sync::Arc;
use tempfile::TempDir;

use crate::config::{AppConfig, DatabaseConfig, Environment};
use crate::database::{schema, TenantDb, TenantRegistry};

/// Migrated SQLite tenants in a private temporary directory, removed on drop.
pub struct TestContext {
    pub registry: Arc<TenantRegistry>,
    pub config: DatabaseConfig,
    _dir: TempDir,
}

impl TestContext {
    /// One tenant per name, each with the full schema.
    pub async fn with_tenants(names: &[&str]) -> anyhow::Result<Self> {
        let dir = tempfile::tempdir()?;
        let mut config = AppConfig::defaults(Environment::Test).database;
        config.path = dir.path().to_path_buf();

        let names: Vec<String> = names.iter().map(|s| s.to_string()).collect();
        let registry = TenantRegistry::initialize(&names, &config).await?;
        for name in registry.names() {
            if let Some(db) = registry.lookup(name) {
                schema::migrate(db).await?;
            }
        }

        Ok(Self {
            registry: Arc::new(registry),
            config,
            _dir: dir,
        })
    }

    /// Single migrated tenant `hrms_C001`.
    pub async fn new() -> anyhow::Result<Self> {
        Self::with_tenants(&["hrms_C001"]).await
    }

    /// Test-environment app config pointing at this context's tenants.
    pub fn app_config(&self) -> AppConfig {
        let mut config = AppConfig::defaults(Environment::Test);
        config.database = self.config.clone();
        config.database.names = self.registry.names().to_vec();
        config
    }

    pub fn db(&self) -> &TenantDb {
        self.registry.default_db()
    }

    pub fn tenant(&self, name: &str) -> &TenantDb {
        match self.registry.lookup(name) {
            Some(db) => db,
            None => panic!("tenant {name} not registered in test context"),
        }
    }
}

use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::database::DbKind;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl Environment {
    /// Suffix used for `config/config-{suffix}.yaml`.
    pub fn file_suffix(&self) -> &'static str {
        match self {
            Environment::Development => "dev",
            Environment::Test => "test",
            Environment::Production => "prod",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub kind: DbKind,
    /// Tenant database names; the first entry is the bootstrap (default) handle.
    pub names: Vec<String>,
    /// SQLite only: directory holding one `{name}.db` file per tenant.
    pub path: PathBuf,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub request_timeout_secs: u64,
    pub cors_origins: Vec<String>,
}

/// Partial overlay read from `config/config-{env}.yaml`. Every field is optional so a file
/// only needs to name what it changes.
#[derive(Debug, Default, Deserialize)]
struct FileOverlay {
    server: Option<ServerOverlay>,
    database: Option<DatabaseOverlay>,
    api: Option<ApiOverlay>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerOverlay {
    host: Option<String>,
    port: Option<u16>,
}

#[derive(Debug, Default, Deserialize)]
struct DatabaseOverlay {
    kind: Option<DbKind>,
    names: Option<String>,
    path: Option<PathBuf>,
    host: Option<String>,
    port: Option<u16>,
    user: Option<String>,
    password: Option<String>,
    max_connections: Option<u32>,
    connect_timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ApiOverlay {
    request_timeout_secs: Option<u64>,
    cors_origins: Option<Vec<String>>,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid value {value:?} for {var}")]
    InvalidEnv { var: String, value: String },
}

impl AppConfig {
    /// Defaults for `HRMS_ENV`, then `config/config-{env}.yaml` if present, then `HRMS_*`
    /// environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_dir(Path::new("config"))
    }

    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let environment = Self::environment_from_env();
        let mut config = Self::defaults(environment);

        let file = dir.join(format!("config-{}.yaml", environment.file_suffix()));
        if file.exists() {
            let raw = std::fs::read_to_string(&file).map_err(|source| ConfigError::Read {
                path: file.clone(),
                source,
            })?;
            config = config.with_yaml(&raw).map_err(|source| ConfigError::Parse {
                path: file.clone(),
                source,
            })?;
            tracing::info!("Loaded configuration file {}", file.display());
        }

        config.with_env_overrides()
    }

    fn environment_from_env() -> Environment {
        match env::var("HRMS_ENV").as_deref() {
            Ok("prod") | Ok("production") => Environment::Production,
            Ok("test") => Environment::Test,
            _ => Environment::Development,
        }
    }

    pub fn defaults(environment: Environment) -> Self {
        match environment {
            Environment::Production => Self::production(),
            Environment::Test => Self::test(),
            Environment::Development => Self::development(),
        }
    }

    fn with_yaml(mut self, raw: &str) -> Result<Self, serde_yaml::Error> {
        let overlay: FileOverlay = serde_yaml::from_str(raw)?;

        if let Some(server) = overlay.server {
            if let Some(v) = server.host {
                self.server.host = v;
            }
            if let Some(v) = server.port {
                self.server.port = v;
            }
        }

        if let Some(db) = overlay.database {
            if let Some(v) = db.kind {
                self.database.kind = v;
            }
            if let Some(v) = db.names {
                self.database.names = parse_tenant_list(&v);
            }
            if let Some(v) = db.path {
                self.database.path = v;
            }
            if let Some(v) = db.host {
                self.database.host = v;
            }
            if let Some(v) = db.port {
                self.database.port = v;
            }
            if let Some(v) = db.user {
                self.database.user = v;
            }
            if let Some(v) = db.password {
                self.database.password = v;
            }
            if let Some(v) = db.max_connections {
                self.database.max_connections = v;
            }
            if let Some(v) = db.connect_timeout_secs {
                self.database.connect_timeout_secs = v;
            }
        }

        if let Some(api) = overlay.api {
            if let Some(v) = api.request_timeout_secs {
                self.api.request_timeout_secs = v;
            }
            if let Some(v) = api.cors_origins {
                self.api.cors_origins = v;
            }
        }

        Ok(self)
    }

    fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        // Server overrides
        if let Ok(v) = env::var("HRMS_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("HRMS_PORT") {
            self.server.port = parse_env("HRMS_PORT", v)?;
        }

        // Database overrides
        if let Ok(v) = env::var("HRMS_DB_TYPE") {
            self.database.kind = parse_env("HRMS_DB_TYPE", v)?;
        }
        if let Ok(v) = env::var("HRMS_DB_NAMES") {
            self.database.names = parse_tenant_list(&v);
        }
        if let Ok(v) = env::var("HRMS_DB_PATH") {
            self.database.path = PathBuf::from(v);
        }
        if let Ok(v) = env::var("HRMS_DB_HOST") {
            self.database.host = v;
        }
        if let Ok(v) = env::var("HRMS_DB_PORT") {
            self.database.port = parse_env("HRMS_DB_PORT", v)?;
        }
        if let Ok(v) = env::var("HRMS_DB_USER") {
            self.database.user = v;
        }
        if let Ok(v) = env::var("HRMS_DB_PASSWORD") {
            self.database.password = v;
        }
        if let Ok(v) = env::var("HRMS_DB_MAX_CONNECTIONS") {
            self.database.max_connections = parse_env("HRMS_DB_MAX_CONNECTIONS", v)?;
        }
        if let Ok(v) = env::var("HRMS_DB_CONNECT_TIMEOUT") {
            self.database.connect_timeout_secs = parse_env("HRMS_DB_CONNECT_TIMEOUT", v)?;
        }

        // API overrides
        if let Ok(v) = env::var("HRMS_REQUEST_TIMEOUT") {
            self.api.request_timeout_secs = parse_env("HRMS_REQUEST_TIMEOUT", v)?;
        }
        if let Ok(v) = env::var("HRMS_CORS_ORIGINS") {
            self.api.cors_origins = v.split(',').map(|s| s.trim().to_string()).filter(|s| !s.is_empty()).collect();
        }

        Ok(self)
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8888,
            },
            database: DatabaseConfig {
                kind: DbKind::Sqlite,
                names: vec!["hrms_C001".to_string()],
                path: PathBuf::from("data"),
                host: "127.0.0.1".to_string(),
                port: 3306,
                user: "root".to_string(),
                password: String::new(),
                max_connections: 10,
                connect_timeout_secs: 30,
            },
            api: ApiConfig {
                request_timeout_secs: 60,
                cors_origins: vec!["http://localhost:8888".to_string()],
            },
        }
    }

    fn test() -> Self {
        Self {
            environment: Environment::Test,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8889,
            },
            database: DatabaseConfig {
                kind: DbKind::Sqlite,
                names: vec!["hrms_C001".to_string(), "hrms_C002".to_string()],
                path: PathBuf::from("data/test"),
                host: "127.0.0.1".to_string(),
                port: 3306,
                user: "root".to_string(),
                password: String::new(),
                max_connections: 5,
                connect_timeout_secs: 5,
            },
            api: ApiConfig {
                request_timeout_secs: 30,
                cors_origins: Vec::new(),
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8888,
            },
            database: DatabaseConfig {
                kind: DbKind::MySql,
                names: vec!["hrms_C001".to_string()],
                path: PathBuf::from("data"),
                host: "127.0.0.1".to_string(),
                port: 3306,
                user: "hrms".to_string(),
                password: String::new(),
                max_connections: 50,
                connect_timeout_secs: 5,
            },
            api: ApiConfig {
                request_timeout_secs: 30,
                cors_origins: Vec::new(),
            },
        }
    }
}

/// Parse an `HRMS_*` override; an unparsable value is an error rather than a silent default.
fn parse_env<T: FromStr>(var: &str, value: String) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
        var: var.to_string(),
        value,
    })
}

/// Split a comma-separated tenant list, trimming blanks and dropping empty entries.
pub fn parse_tenant_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::defaults(Environment::Development);
        assert_eq!(config.database.kind, DbKind::Sqlite);
        assert_eq!(config.database.names, vec!["hrms_C001"]);
        assert_eq!(config.server.port, 8888);
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::defaults(Environment::Production);
        assert_eq!(config.database.kind, DbKind::MySql);
        assert_eq!(config.database.max_connections, 50);
    }

    #[test]
    fn env_overrides_reject_garbage() {
        let port: u16 = parse_env("HRMS_PORT", " 9000 ".to_string()).unwrap();
        assert_eq!(port, 9000);
        let kind: DbKind = parse_env("HRMS_DB_TYPE", "mysql".to_string()).unwrap();
        assert_eq!(kind, DbKind::MySql);

        let err = parse_env::<u16>("HRMS_PORT", "80o0".to_string()).unwrap_err();
        assert_eq!(err.to_string(), "invalid value \"80o0\" for HRMS_PORT");
        assert!(parse_env::<u16>("HRMS_DB_PORT", "70000".to_string()).is_err());
        assert!(parse_env::<DbKind>("HRMS_DB_TYPE", "postgres".to_string()).is_err());
    }

    #[test]
    fn tenant_list_is_trimmed_and_ordered() {
        assert_eq!(
            parse_tenant_list(" hrms_C001, hrms_C002 ,,hrms_C003"),
            vec!["hrms_C001", "hrms_C002", "hrms_C003"]
        );
        assert!(parse_tenant_list(" , ").is_empty());
    }

    #[test]
    fn yaml_overlay_only_touches_named_fields() {
        let raw = r#"
database:
  kind: mysql
  names: "hrms_C001,hrms_C009"
  host: db.internal
api:
  request_timeout_secs: 5
"#;
        let config = AppConfig::defaults(Environment::Development).with_yaml(raw).unwrap();
        assert_eq!(config.database.kind, DbKind::MySql);
        assert_eq!(config.database.names, vec!["hrms_C001", "hrms_C009"]);
        assert_eq!(config.database.host, "db.internal");
        assert_eq!(config.database.port, 3306);
        assert_eq!(config.api.request_timeout_secs, 5);
        assert_eq!(config.server.port, 8888);
    }
}

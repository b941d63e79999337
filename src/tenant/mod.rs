//! Per-request tenant resolution: cookie token in, tenant database handle out.

pub mod resolver;
pub mod token;

pub use resolver::{
    resolve_token, tenant_database_name, Denial, ResolverStatsSnapshot, TenantResolver, TenantSession,
};
pub use token::{IdentityToken, TokenError, COOKIE_NAME};

//! Per-request gate from "caller presented some cookie" to "caller may use this tenant's
//! database".
//!
//! ```text
//! no/empty cookie ─────────────────────────────▶ Denied(TokenAbsent)
//! cookie ─▶ parse ─ fewer than 3 parts ────────▶ Denied(MalformedToken)
//!                 └ ok ─▶ "hrms_" + branch_id ─▶ lookup ─ absent ─▶ Denied(UnknownTenant)
//!                                                        └ found ──▶ Resolved(handle)
//! ```
//!
//! Every denial maps to the same unauthorized response; the reason only feeds counters and
//! logs.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use thiserror::Error;

use super::token::IdentityToken;
use crate::database::{TenantDb, TenantRegistry};

/// Prefix joined with a branch id to name its database.
pub const DATABASE_PREFIX: &str = "hrms_";

/// Database name for `branch_id`. Matching against the registry is exact.
pub fn tenant_database_name(branch_id: &str) -> String {
    format!("{}{}", DATABASE_PREFIX, branch_id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Denial {
    #[error("identity token absent")]
    TokenAbsent,

    #[error("identity token malformed")]
    MalformedToken,

    #[error("identity token names an unknown tenant")]
    UnknownTenant,
}

impl Denial {
    pub fn reason(&self) -> &'static str {
        match self {
            Denial::TokenAbsent => "token_absent",
            Denial::MalformedToken => "malformed_token",
            Denial::UnknownTenant => "unknown_tenant",
        }
    }
}

/// Outcome of a successful resolution, valid for one request.
#[derive(Debug, Clone)]
pub struct TenantSession {
    pub user_type: String,
    pub staff_id: String,
    pub branch_id: String,
    db: Arc<TenantDb>,
}

impl TenantSession {
    pub fn db(&self) -> &TenantDb {
        &self.db
    }

    pub fn handle(&self) -> &Arc<TenantDb> {
        &self.db
    }
}

/// Resolve a raw cookie value against `registry`. Pure: one parse and one map read.
pub fn resolve_token(registry: &TenantRegistry, raw: Option<&str>) -> Result<TenantSession, Denial> {
    let raw = match raw {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(Denial::TokenAbsent),
    };

    let token = IdentityToken::parse(raw).map_err(|_| Denial::MalformedToken)?;

    let db = registry
        .lookup(&tenant_database_name(&token.branch_id))
        .ok_or(Denial::UnknownTenant)?;

    Ok(TenantSession {
        user_type: token.user_type,
        staff_id: token.staff_id,
        branch_id: token.branch_id,
        db: Arc::clone(db),
    })
}

/// Diagnostic counters per outcome. Never holds token content.
#[derive(Debug, Default)]
pub struct ResolverStats {
    resolved: AtomicU64,
    token_absent: AtomicU64,
    malformed_token: AtomicU64,
    unknown_tenant: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolverStatsSnapshot {
    pub resolved: u64,
    pub token_absent: u64,
    pub malformed_token: u64,
    pub unknown_tenant: u64,
}

impl ResolverStats {
    fn record(&self, outcome: Result<(), Denial>) {
        let counter = match outcome {
            Ok(()) => &self.resolved,
            Err(Denial::TokenAbsent) => &self.token_absent,
            Err(Denial::MalformedToken) => &self.malformed_token,
            Err(Denial::UnknownTenant) => &self.unknown_tenant,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> ResolverStatsSnapshot {
        ResolverStatsSnapshot {
            resolved: self.resolved.load(Ordering::Relaxed),
            token_absent: self.token_absent.load(Ordering::Relaxed),
            malformed_token: self.malformed_token.load(Ordering::Relaxed),
            unknown_tenant: self.unknown_tenant.load(Ordering::Relaxed),
        }
    }
}

/// The registry plus outcome counters, shared by every request.
#[derive(Debug)]
pub struct TenantResolver {
    registry: Arc<TenantRegistry>,
    stats: ResolverStats,
}

impl TenantResolver {
    pub fn new(registry: Arc<TenantRegistry>) -> Self {
        Self {
            registry,
            stats: ResolverStats::default(),
        }
    }

    pub fn registry(&self) -> &Arc<TenantRegistry> {
        &self.registry
    }

    pub fn stats(&self) -> ResolverStatsSnapshot {
        self.stats.snapshot()
    }

    pub fn resolve(&self, raw: Option<&str>) -> Result<TenantSession, Denial> {
        let outcome = resolve_token(&self.registry, raw);
        self.stats.record(outcome.as_ref().map(|_| ()).map_err(|d| *d));
        outcome
    }
}

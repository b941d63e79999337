// handlers/mod.rs - Two handler tiers
//
// Public (no tenant) → Protected (tenant resolved by `require_tenant`)

pub mod protected;
pub mod public;

use axum::extract::Path;

/// Missing path segment means "no filter", the same as an explicit `all`.
pub(crate) fn path_or_all(path: Option<Path<String>>) -> String {
    path.map(|Path(value)| value).unwrap_or_else(|| "all".to_string())
}

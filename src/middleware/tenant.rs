use axum::{
    extract::{Request, State},
    http::{header::COOKIE, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::state::AppState;
use crate::tenant::COOKIE_NAME;

/// Value of the identity cookie, if any `Cookie` header carries one. A value wrapped in
/// double quotes is unwrapped.
pub fn identity_cookie(headers: &HeaderMap) -> Option<&str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|header| header.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .map(|(_, value)| value.strip_prefix('"').and_then(|v| v.strip_suffix('"')).unwrap_or(value))
}

/// Resolve the request's tenant once, before any handler runs.
///
/// On success the `TenantSession` is placed in the request extensions; protected handlers
/// take it from there and use only its handle. Any denial ends the request here with the
/// uniform unauthorized response, so no handler or query runs for it.
pub async fn require_tenant(State(state): State<AppState>, mut request: Request, next: Next) -> Result<Response, ApiError> {
    let session = state.resolver.resolve(identity_cookie(request.headers()))?;

    tracing::debug!(
        tenant = session.db().name(),
        user_type = %session.user_type,
        "Tenant resolved"
    );
    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}

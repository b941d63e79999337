pub mod response;
pub mod tenant;

pub use response::{ApiResponse, ApiResult};
pub use tenant::{identity_cookie, require_tenant};

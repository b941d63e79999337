pub mod models;
pub mod query_builder;
pub mod registry;
pub mod schema;

pub use query_builder::{Page, PageQuery, QueryBuilder};
pub use registry::{DatabaseError, DbKind, TenantDb, TenantRegistry};

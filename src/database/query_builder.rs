use serde::{Deserialize, Serialize};
use sqlx::{self, any::AnyRow, FromRow};

use crate::database::registry::TenantDb;

/// Largest page served; bigger `limit` values are clamped to it.
pub const MAX_PAGE_LIMIT: i64 = 1000;

/// `?page=&limit=` query parameters. Both must be present for paging to apply.
#[derive(Debug, Default, Clone, Copy, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    fn checked_window(&self) -> Option<Option<(i64, i64)>> {
        match (self.page, self.limit) {
            (Some(page), Some(limit)) => {
                let limit = limit.clamp(0, MAX_PAGE_LIMIT);
                let offset = (page.max(1) - 1).checked_mul(limit)?;
                Some(Some((limit, offset)))
            }
            _ => Some(None),
        }
    }

    /// False when the requested page lies beyond any representable offset.
    pub fn is_addressable(&self) -> bool {
        self.checked_window().is_some()
    }

    /// `(limit, offset)` when paging applies; pages start at 1 and `limit` is capped at
    /// `MAX_PAGE_LIMIT`. An unaddressable page yields an empty window at the end.
    pub fn window(&self) -> Option<(i64, i64)> {
        match self.checked_window() {
            Some(window) => window,
            None => Some((0, i64::MAX)),
        }
    }
}

/// One page of rows plus the count the client paginates against.
#[derive(Debug, Serialize)]
pub struct Page<T: Serialize> {
    pub total: i64,
    pub items: Vec<T>,
}

impl<T: Serialize> Page<T> {
    /// Filtered listings report how many rows came back.
    pub fn of_returned(items: Vec<T>) -> Self {
        Self {
            total: items.len() as i64,
            items,
        }
    }
}

/// Small SELECT builder over a fixed statement head. Every filter value is bound, never
/// spliced into the SQL text.
pub struct QueryBuilder {
    head: String,
    conditions: Vec<String>,
    binds: Vec<String>,
    order_by: Option<String>,
}

impl QueryBuilder {
    /// `head` is everything up to (not including) the WHERE clause.
    pub fn new(head: impl Into<String>) -> Self {
        Self {
            head: head.into(),
            conditions: Vec::new(),
            binds: Vec::new(),
            order_by: None,
        }
    }

    /// Add a condition containing exactly one `?` placeholder.
    pub fn filter(mut self, condition: &str, value: impl Into<String>) -> Self {
        self.conditions.push(condition.to_string());
        self.binds.push(value.into());
        self
    }

    /// Add a condition without placeholders.
    pub fn filter_raw(mut self, condition: &str) -> Self {
        self.conditions.push(condition.to_string());
        self
    }

    /// Add a substring match on `column`.
    pub fn contains(self, column: &str, needle: &str) -> Self {
        self.filter(&format!("{} LIKE ?", column), format!("%{}%", needle))
    }

    pub fn order_by(mut self, order: &str) -> Self {
        self.order_by = Some(order.to_string());
        self
    }

    pub fn sql(&self, page: &PageQuery) -> String {
        let mut sql = self.head.clone();
        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.conditions.join(" AND "));
        }
        if let Some(order) = &self.order_by {
            sql.push_str(" ORDER BY ");
            sql.push_str(order);
        }
        if page.window().is_some() {
            sql.push_str(" LIMIT ? OFFSET ?");
        }
        sql
    }

    pub async fn fetch_all<T>(self, db: &TenantDb, page: PageQuery) -> Result<Vec<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, AnyRow> + Send + Unpin,
    {
        let sql = self.sql(&page);
        let mut q = sqlx::query_as::<_, T>(&sql);
        for value in self.binds {
            q = q.bind(value);
        }
        if let Some((limit, offset)) = page.window() {
            q = q.bind(limit).bind(offset);
        }
        q.fetch_all(db.pool()).await
    }

    pub async fn fetch_optional<T>(self, db: &TenantDb) -> Result<Option<T>, sqlx::Error>
    where
        T: for<'r> FromRow<'r, AnyRow> + Send + Unpin,
    {
        let sql = self.sql(&PageQuery::all());
        let mut q = sqlx::query_as::<_, T>(&sql);
        for value in self.binds {
            q = q.bind(value);
        }
        q.fetch_optional(db.pool()).await
    }

    /// Run the statement as a scalar count; the head must select `COUNT(*)`.
    pub async fn count(self, db: &TenantDb) -> Result<i64, sqlx::Error> {
        let sql = self.sql(&PageQuery::all());
        let mut q = sqlx::query_scalar::<_, i64>(&sql);
        for value in self.binds {
            q = q.bind(value);
        }
        q.fetch_one(db.pool()).await
    }
}

//! Data store abstraction.
//!
//! Services never touch a connection pool directly. They hand a
//! parameterized statement and its ordered parameters to a [`DataStore`] and
//! get JSON rows back, which keeps them testable without a database.
//!
//! [`PgDataStore`] is the production implementation. It wraps every
//! statement as
//!
//! ```sql
//! WITH affected AS (<statement>) SELECT to_jsonb(affected) AS row FROM affected
//! ```
//!
//! so a plain `SELECT` and an `INSERT/UPDATE/DELETE ... RETURNING` both come
//! back as one JSON object per row, keyed by the column aliases. Postgres
//! does not carry an `ORDER BY` inside the CTE through to the outer select,
//! so ordered reads go through [`DataStore::execute_ordered`], which sorts
//! the outer query by output columns.

use anyhow::anyhow;
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use serde_json::Value;
use sqlx::postgres::PgArguments;
use sqlx::{PgPool, Postgres, Row as _};
use tracing::instrument;

use jobly_core::AppError;

/// One result row: a JSON object keyed by column name.
pub type Row = Value;

/// A bind parameter with its Postgres type.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlParam {
    Bool(bool),
    Int(i64),
    Text(String),
    Decimal(BigDecimal),
    /// A typed `NULL`; Postgres rejects an untyped null assigned to a
    /// non-text column.
    Null(SqlType),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqlType {
    Bool,
    Int,
    Text,
    Decimal,
}

/// Rust types that map onto a single [`SqlType`].
pub trait SqlTyped {
    const SQL_TYPE: SqlType;
}

impl SqlTyped for bool {
    const SQL_TYPE: SqlType = SqlType::Bool;
}

impl SqlTyped for i32 {
    const SQL_TYPE: SqlType = SqlType::Int;
}

impl SqlTyped for i64 {
    const SQL_TYPE: SqlType = SqlType::Int;
}

impl SqlTyped for String {
    const SQL_TYPE: SqlType = SqlType::Text;
}

impl SqlTyped for &str {
    const SQL_TYPE: SqlType = SqlType::Text;
}

impl SqlTyped for BigDecimal {
    const SQL_TYPE: SqlType = SqlType::Decimal;
}

impl From<bool> for SqlParam {
    fn from(value: bool) -> Self {
        SqlParam::Bool(value)
    }
}

impl From<i32> for SqlParam {
    fn from(value: i32) -> Self {
        SqlParam::Int(value.into())
    }
}

impl From<i64> for SqlParam {
    fn from(value: i64) -> Self {
        SqlParam::Int(value)
    }
}

impl From<String> for SqlParam {
    fn from(value: String) -> Self {
        SqlParam::Text(value)
    }
}

impl From<&str> for SqlParam {
    fn from(value: &str) -> Self {
        SqlParam::Text(value.to_string())
    }
}

impl From<BigDecimal> for SqlParam {
    fn from(value: BigDecimal) -> Self {
        SqlParam::Decimal(value)
    }
}

impl<T> From<Option<T>> for SqlParam
where
    T: Into<SqlParam> + SqlTyped,
{
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(SqlParam::Null(T::SQL_TYPE))
    }
}

/// Executes parameterized statements and returns their rows.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Runs `query` with `params` bound to `$1..$n` in order.
    async fn execute(&self, query: &str, params: Vec<SqlParam>) -> Result<Vec<Row>, AppError>;

    /// Like [`DataStore::execute`], with rows sorted by `order_by`, which
    /// names output columns of `query`.
    async fn execute_ordered(
        &self,
        query: &str,
        params: Vec<SqlParam>,
        order_by: &str,
    ) -> Result<Vec<Row>, AppError>;
}

/// Wraps `query` so each row comes back as a single JSON column.
pub fn wrap_statement(query: &str, order_by: Option<&str>) -> String {
    let mut wrapped = format!(
        "WITH affected AS ({}) SELECT to_jsonb(affected) AS row FROM affected",
        query
    );
    if let Some(order_by) = order_by {
        wrapped.push_str(" ORDER BY ");
        wrapped.push_str(order_by);
    }
    wrapped
}

/// [`DataStore`] backed by a PostgreSQL pool.
#[derive(Clone, Debug)]
pub struct PgDataStore {
    pool: PgPool,
}

impl PgDataStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run(&self, statement: String, params: Vec<SqlParam>) -> Result<Vec<Row>, AppError> {
        let mut q = sqlx::query(&statement);
        for param in params {
            q = bind_param(q, param);
        }

        let rows = q.fetch_all(&self.pool).await.map_err(map_query_error)?;

        rows.iter()
            .map(|row| row.try_get::<Value, _>("row").map_err(AppError::internal))
            .collect()
    }
}

fn bind_param(
    q: sqlx::query::Query<'_, Postgres, PgArguments>,
    param: SqlParam,
) -> sqlx::query::Query<'_, Postgres, PgArguments> {
    match param {
        SqlParam::Bool(b) => q.bind(b),
        SqlParam::Int(i) => q.bind(i),
        SqlParam::Text(s) => q.bind(s),
        SqlParam::Decimal(d) => q.bind(d),
        SqlParam::Null(SqlType::Bool) => q.bind(None::<bool>),
        SqlParam::Null(SqlType::Int) => q.bind(None::<i64>),
        SqlParam::Null(SqlType::Text) => q.bind(None::<String>),
        SqlParam::Null(SqlType::Decimal) => q.bind(None::<BigDecimal>),
    }
}

/// Constraint violations are the caller's fault; anything else is ours.
fn map_query_error(e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        if db_err.is_foreign_key_violation() {
            return AppError::bad_request(anyhow!("Referenced record does not exist"));
        }
        if db_err.is_unique_violation() {
            return AppError::bad_request(anyhow!("Duplicate record"));
        }
        if db_err.is_check_violation() {
            return AppError::bad_request(anyhow!("Value out of range"));
        }
    }

    tracing::error!(error = %e, "Query failed");
    AppError::internal(e)
}

#[async_trait]
impl DataStore for PgDataStore {
    #[instrument(skip(self, params), fields(db.params = params.len()))]
    async fn execute(&self, query: &str, params: Vec<SqlParam>) -> Result<Vec<Row>, AppError> {
        self.run(wrap_statement(query, None), params).await
    }

    #[instrument(skip(self, params), fields(db.params = params.len()))]
    async fn execute_ordered(
        &self,
        query: &str,
        params: Vec<SqlParam>,
        order_by: &str,
    ) -> Result<Vec<Row>, AppError> {
        self.run(wrap_statement(query, Some(order_by)), params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_param_conversions() {
        assert_eq!(SqlParam::from(7_i64), SqlParam::Int(7));
        assert_eq!(SqlParam::from(7_i32), SqlParam::Int(7));
        assert_eq!(SqlParam::from(true), SqlParam::Bool(true));
        assert_eq!(SqlParam::from("Job1"), SqlParam::Text("Job1".to_string()));
        assert_eq!(SqlParam::from(None::<i32>), SqlParam::Null(SqlType::Int));
        assert_eq!(
            SqlParam::from(None::<BigDecimal>),
            SqlParam::Null(SqlType::Decimal)
        );
        assert_eq!(SqlParam::from(Some(5_i32)), SqlParam::Int(5));
        assert_eq!(
            SqlParam::from(BigDecimal::from_str("0.1").unwrap()),
            SqlParam::Decimal(BigDecimal::from_str("0.1").unwrap())
        );
    }

    #[test]
    fn test_wrap_statement() {
        assert_eq!(
            wrap_statement("SELECT id FROM jobs", None),
            "WITH affected AS (SELECT id FROM jobs) SELECT to_jsonb(affected) AS row FROM affected"
        );
    }

    #[test]
    fn test_wrap_statement_orders_outer_query() {
        let wrapped = wrap_statement("SELECT id, title FROM jobs", Some("title"));
        assert!(wrapped.ends_with("FROM affected ORDER BY title"));
        assert!(wrapped.starts_with("WITH affected AS (SELECT id, title FROM jobs)"));
    }
}

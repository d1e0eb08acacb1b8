//! PostgreSQL implementation of BusinessRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use yealp_core::entities::Business;
use yealp_core::traits::{BusinessRepository, RepoResult};
use yealp_core::value_objects::{BusinessFilter, BusinessId, OrderRule};

use crate::models::BusinessModel;

use super::error::map_db_error;

const BUSINESS_COLUMNS: &str = "business_id, name, address, city, state, postal_code, \
     is_open, is_takeout, average_stars, n_detailed_review";

/// Fixed ORDER BY clause per rule. Unrated businesses always sort last.
fn order_clause(rule: OrderRule) -> &'static str {
    match rule {
        OrderRule::Name => " ORDER BY name ASC, business_id",
        OrderRule::AverageStars => " ORDER BY average_stars DESC NULLS LAST, name, business_id",
        OrderRule::ReviewCount => {
            " ORDER BY n_detailed_review DESC, average_stars DESC NULLS LAST, name, business_id"
        }
    }
}

/// Build the filtered listing query; the state is the only bound value
fn search_query(filter: &BusinessFilter) -> QueryBuilder<'_, Postgres> {
    let mut qb = QueryBuilder::new("SELECT ");
    qb.push(BUSINESS_COLUMNS)
        .push(" FROM business_wide WHERE state = ")
        .push_bind(filter.state.as_str());

    if filter.takeout_only {
        qb.push(" AND is_takeout");
    }
    if filter.open_only {
        qb.push(" AND is_open");
    }

    qb.push(order_clause(filter.order));
    qb
}

/// PostgreSQL implementation of BusinessRepository
#[derive(Clone)]
pub struct PgBusinessRepository {
    pool: PgPool,
}

impl PgBusinessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BusinessRepository for PgBusinessRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: &BusinessId) -> RepoResult<Option<Business>> {
        let sql = format!("SELECT {BUSINESS_COLUMNS} FROM business_wide WHERE business_id = $1");
        let result = sqlx::query_as::<_, BusinessModel>(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(result.map(Business::from))
    }

    #[instrument(skip(self))]
    async fn list(&self, limit: i64) -> RepoResult<Vec<Business>> {
        let sql = format!("SELECT {BUSINESS_COLUMNS} FROM business_wide LIMIT $1");
        let results = sqlx::query_as::<_, BusinessModel>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Business::from).collect())
    }

    #[instrument(skip(self))]
    async fn search(&self, filter: &BusinessFilter) -> RepoResult<Vec<Business>> {
        let mut qb = search_query(filter);
        let results = qb
            .build_query_as::<BusinessModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Business::from).collect())
    }

    #[instrument(skip(self))]
    async fn random(&self, limit: i64) -> RepoResult<Vec<Business>> {
        let sql = format!("SELECT {BUSINESS_COLUMNS} FROM business_wide ORDER BY RANDOM() LIMIT $1");
        let results = sqlx::query_as::<_, BusinessModel>(&sql)
            .bind(limit)
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(Business::from).collect())
    }

    #[instrument(skip(self))]
    async fn states(&self) -> RepoResult<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT DISTINCT state FROM business ORDER BY state")
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_sql_binds_state() {
        let filter = BusinessFilter {
            state: "AZ' OR 1=1 --".to_string(),
            takeout_only: true,
            open_only: false,
            order: OrderRule::AverageStars,
        };
        let qb = search_query(&filter);
        let sql = qb.sql();

        assert!(sql.contains("WHERE state = $1"));
        assert!(sql.contains("AND is_takeout"));
        assert!(!sql.contains("is_open"));
        assert!(sql.contains("average_stars DESC NULLS LAST"));
        assert!(!sql.contains("LIMIT"));
        assert!(!sql.contains("OR 1=1"));
    }

    #[test]
    fn test_order_clauses() {
        assert!(order_clause(OrderRule::Name).contains("name ASC"));
        assert!(order_clause(OrderRule::ReviewCount).starts_with(" ORDER BY n_detailed_review DESC"));
    }
}

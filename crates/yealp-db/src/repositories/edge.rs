//! Atomic edge toggling shared by favorites, follows and upvotes
//!
//! A toggle runs inside the caller's transaction: delete the edge, and if
//! nothing was deleted insert it with `ON CONFLICT DO NOTHING`. A concurrent
//! insert that wins the race leaves the edge present, which is the state the
//! caller asked for.

use sqlx::postgres::{PgArguments, PgConnection};
use sqlx::query::Query;
use sqlx::Postgres;
use yealp_core::value_objects::ToggleOutcome;

/// Result of a toggle, plus whether this call changed the edge table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct EdgeChange {
    pub outcome: ToggleOutcome,
    pub changed: bool,
}

pub(crate) async fn toggle_edge(
    conn: &mut PgConnection,
    delete: Query<'_, Postgres, PgArguments>,
    insert: Query<'_, Postgres, PgArguments>,
) -> Result<EdgeChange, sqlx::Error> {
    if delete.execute(&mut *conn).await?.rows_affected() > 0 {
        return Ok(EdgeChange {
            outcome: ToggleOutcome::Removed,
            changed: true,
        });
    }

    let inserted = insert.execute(&mut *conn).await?.rows_affected() > 0;
    Ok(EdgeChange {
        outcome: ToggleOutcome::Added,
        changed: inserted,
    })
}

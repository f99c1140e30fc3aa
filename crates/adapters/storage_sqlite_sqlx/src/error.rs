//! Classification of sqlx errors into the port's schema/other split.

use zigview_app::ports::StoreError;

/// Map a sqlx failure onto [`StoreError`], logging the offending query text
/// and its bound limit on the way.
///
/// `SQLite` reports a missing table or column as a database-level error whose
/// message starts with `no such table` / `no such column`; those are the
/// structural mismatches that make the aggregator retry with the basic query.
pub(crate) fn classify(query: &str, limit: i64, err: sqlx::Error) -> StoreError {
    tracing::error!(error = %err, query, limit, "device query failed");

    let structural = matches!(
        &err,
        sqlx::Error::Database(db)
            if db.message().contains("no such table") || db.message().contains("no such column")
    );

    if structural {
        StoreError::Schema(Box::new(err))
    } else {
        StoreError::Database(Box::new(err))
    }
}

/// Map a connection-open failure. Never structural — there is no query yet.
pub(crate) fn connect_error(err: sqlx::Error) -> StoreError {
    tracing::error!(error = %err, "device database connection failed");
    StoreError::Database(Box::new(err))
}

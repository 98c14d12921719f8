/// Web Handlers
///
/// This module contains the handlers for the catalog pages.
/// Each handler extracts the request data, calls the repository on the
/// blocking thread pool, and answers with a rendered page or a redirect.

mod author_handlers;

// Re-export all handlers
pub use author_handlers::*;

use std::sync::Arc;

use crate::db::DbPool;
use crate::errors::AppError;

/// Runs a blocking repository call off the async runtime
///
/// Diesel connections are synchronous, so each call gets its own pooled
/// connection on tokio's blocking pool.
pub(crate) async fn blocking<T, F>(pool: &Arc<DbPool>, f: F) -> Result<T, AppError>
where
    F: FnOnce(&DbPool) -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let pool = Arc::clone(pool);
    let result = tokio::task::spawn_blocking(move || f(&pool))
        .await
        .map_err(|e| AppError::Database(e.into()))?;
    Ok(result?)
}

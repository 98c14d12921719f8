/// Repository module
///
/// This module provides the data access layer for the application.
/// It contains functions for creating, retrieving, updating and deleting
/// authors, and for reading the books attached to them.

mod author_repo;
mod book_repo;

// Re-export all repository functions
pub use author_repo::*;
pub use book_repo::*;

#[cfg(test)]
pub mod tests {
    use std::sync::Arc;

    use crate::db::{self, DbPool};

    /// Sets up a test database with migrations applied
    ///
    /// Plain ":memory:" gives each pooled connection its own database, so a
    /// unique shared-cache URI is used instead. Every connection in the pool
    /// sees the same schema while staying isolated from other tests.
    pub fn setup_test_db() -> Arc<DbPool> {
        let unique_id = uuid::Uuid::new_v4();
        let database_url = format!("file:test_{}?mode=memory&cache=shared", unique_id);
        let pool = db::init_pool(&database_url).expect("Failed to create pool");

        let mut conn = pool.get().expect("Failed to get connection");
        db::run_migrations(&mut conn).expect("Failed to run migrations");

        Arc::new(pool)
    }
}

/// Local Library: the author pages of a library catalog
///
/// This library serves server-rendered HTML pages for listing, viewing,
/// creating, updating and deleting authors, backed by SQLite through diesel
/// and rendered with handlebars templates.
///
/// ### Modules
///
/// - `config`: Layered configuration (defaults, config file, CLI/env)
/// - `db`: Database connection pool and migrations
/// - `errors`: The error type returned by handlers
/// - `forms`: Form bodies and their validation
/// - `handlers`: Request handlers for the catalog pages
/// - `logging`: Tracing subscriber setup
/// - `models`: Authors and books
/// - `repo`: Repository layer for database operations
/// - `schema`: Database schema definitions
/// - `views`: Page templates and their contexts
///
/// ### Routes
///
/// - `GET /catalog/authors`: List all authors
/// - `GET|POST /catalog/author/create`: Create an author
/// - `GET /catalog/author/{id}`: Show an author and their books
/// - `GET|POST /catalog/author/{id}/delete`: Delete an author
/// - `GET|POST /catalog/author/{id}/update`: Update an author

pub mod config;
pub mod db;
pub mod errors;
pub mod forms;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod repo;
pub mod schema;
pub mod views;

use axum::{
    response::Redirect,
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::db::DbPool;
use crate::handlers::*;
use crate::views::Views;

pub use db::run_migrations;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// The database connection pool
    pub pool: Arc<DbPool>,
    /// The compiled page templates
    pub views: Arc<Views>,
}

impl AppState {
    /// Builds the state, compiling the page templates
    pub fn new(pool: Arc<DbPool>) -> Result<Self, handlebars::TemplateError> {
        Ok(Self {
            pool,
            views: Arc::new(Views::new()?),
        })
    }
}

/// Creates the application router with all routes
///
/// ### Arguments
///
/// * `pool` - The database connection pool to be shared with all handlers
///
/// ### Returns
///
/// An Axum Router configured with all routes and the shared state
///
/// ### Errors
///
/// Returns an error if the page templates fail to compile
pub fn create_app(pool: Arc<DbPool>) -> anyhow::Result<Router> {
    let state = AppState::new(pool)?;

    let router = Router::new()
        .route("/", get(|| async { Redirect::to(AUTHOR_LIST_URL) }))
        .route("/catalog/authors", get(author_list_handler))
        .route("/catalog/author/create", get(author_create_get_handler).post(author_create_post_handler))
        .route("/catalog/author/{id}", get(author_detail_handler))
        .route("/catalog/author/{id}/delete", get(author_delete_get_handler).post(author_delete_post_handler))
        .route("/catalog/author/{id}/update", get(author_update_get_handler).post(author_update_post_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    Ok(router)
}

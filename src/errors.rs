use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] anyhow::Error),
    #[error("{0}")]
    NotFound(String),
    #[error("Template error: {0}")]
    Template(#[from] handlebars::RenderError),
}

impl AppError {
    pub fn author_not_found() -> Self {
        AppError::NotFound("Author not found".to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Database(err) => {
                error!("Database error: {:#}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Template(err) => {
                error!("Template error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Html(format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{message}</title></head>\n<body>\n<h1>{message}</h1>\n<h2>{code}</h2>\n<p><a href=\"/catalog/authors\">All authors</a></p>\n</body>\n</html>\n",
            message = handlebars::html_escape(&message),
            code = status.as_u16(),
        ));

        (status, body).into_response()
    }
}

use axum::{
    extract::{Form, Path, State},
    response::{IntoResponse, Redirect, Response},
};
use tracing::{debug, info, instrument};

use super::blocking;
use crate::errors::AppError;
use crate::forms::{AuthorForm, DeleteAuthorForm};
use crate::repo;
use crate::views::{
    AuthorDeletePage, AuthorDetailPage, AuthorFormPage, AuthorListPage, AUTHOR_DELETE,
    AUTHOR_DETAIL, AUTHOR_FORM, AUTHOR_LIST,
};
use crate::AppState;

/// Path of the author list page, the landing spot after a delete
pub const AUTHOR_LIST_URL: &str = "/catalog/authors";

/// Handler for the author list page
///
/// This function handles GET requests to `/catalog/authors`.
///
/// ### Returns
///
/// The rendered list of all authors, sorted by family name
#[instrument(skip(state))]
pub async fn author_list_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    debug!("Listing authors");

    let authors = blocking(&state.pool, repo::list_authors).await?;

    Ok(state.views.render(AUTHOR_LIST, &AuthorListPage::new(&authors))?.into_response())
}

/// Handler for an author's detail page
///
/// This function handles GET requests to `/catalog/author/{id}`.
/// The author and their books are fetched concurrently.
///
/// ### Returns
///
/// The rendered detail page, or a 404 page if the author does not exist
#[instrument(skip(state), fields(author_id = %id))]
pub async fn author_detail_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let (author, books) = fetch_author_with_books(&state, &id).await?;

    let author = author.ok_or_else(AppError::author_not_found)?;

    Ok(state.views.render(AUTHOR_DETAIL, &AuthorDetailPage::new(&author, &books))?.into_response())
}

/// Handler for the empty create form
///
/// This function handles GET requests to `/catalog/author/create`.
#[instrument(skip(state))]
pub async fn author_create_get_handler(State(state): State<AppState>) -> Result<Response, AppError> {
    let page = AuthorFormPage {
        title: "Create Author",
        author: AuthorForm::default(),
        errors: Vec::new(),
    };
    Ok(state.views.render(AUTHOR_FORM, &page)?.into_response())
}

/// Handler for a submitted create form
///
/// This function handles POST requests to `/catalog/author/create`.
///
/// ### Returns
///
/// A redirect to the new author's page, or the form again with the
/// sanitized values and validation errors
#[instrument(skip(state, form))]
pub async fn author_create_post_handler(
    State(state): State<AppState>,
    Form(form): Form<AuthorForm>,
) -> Result<Response, AppError> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            debug!("Create form rejected with {} errors", errors.len());
            let page = AuthorFormPage {
                title: "Create Author",
                author: form.sanitized(),
                errors,
            };
            return Ok(state.views.render(AUTHOR_FORM, &page)?.into_response());
        }
    };

    let author = blocking(&state.pool, move |pool| repo::create_author(pool, input)).await?;

    info!("Created author {}", author.get_id());

    Ok(Redirect::to(&author.url()).into_response())
}

/// Handler for the delete confirmation page
///
/// This function handles GET requests to `/catalog/author/{id}/delete`.
///
/// ### Returns
///
/// The confirmation page listing any books still attached to the author,
/// or a redirect to the author list if the author does not exist
#[instrument(skip(state), fields(author_id = %id))]
pub async fn author_delete_get_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let (author, books) = fetch_author_with_books(&state, &id).await?;

    let Some(author) = author else {
        debug!("Author already gone, redirecting to list");
        return Ok(Redirect::to(AUTHOR_LIST_URL).into_response());
    };

    Ok(state.views.render(AUTHOR_DELETE, &AuthorDeletePage::new(&author, &books))?.into_response())
}

/// Handler for a submitted delete form
///
/// This function handles POST requests to `/catalog/author/{id}/delete`.
/// The author to delete comes from the `authorid` field, falling back to
/// the path when the field is empty.
///
/// ### Returns
///
/// The confirmation page again if the author still has books, otherwise a
/// redirect to the author list
#[instrument(skip(state, form), fields(author_id = %path_id))]
pub async fn author_delete_post_handler(
    State(state): State<AppState>,
    Path(path_id): Path<String>,
    Form(form): Form<DeleteAuthorForm>,
) -> Result<Response, AppError> {
    let id = match form.authorid.trim() {
        "" => path_id,
        authorid => authorid.to_string(),
    };

    let books = {
        let id = id.clone();
        blocking(&state.pool, move |pool| repo::list_books_by_author(pool, &id)).await?
    };

    if !books.is_empty() {
        debug!("Author still has {} books, refusing to delete", books.len());
        return refuse_delete(&state, &id).await;
    }

    let deleted = {
        let id = id.clone();
        blocking(&state.pool, move |pool| Ok(repo::delete_author(pool, &id))).await?
    };

    match deleted {
        Ok(true) => info!("Deleted author {}", id),
        Ok(false) => debug!("Author already gone"),
        Err(e) if repo::is_foreign_key_violation(&e) => {
            debug!("Books were added before the delete ran, refusing to delete");
            return refuse_delete(&state, &id).await;
        }
        Err(e) => return Err(AppError::Database(e)),
    }

    Ok(Redirect::to(AUTHOR_LIST_URL).into_response())
}

/// Shows the delete confirmation again with the books blocking the delete,
/// or goes back to the list if the author has since disappeared
async fn refuse_delete(state: &AppState, id: &str) -> Result<Response, AppError> {
    let (author, books) = fetch_author_with_books(state, id).await?;

    match author {
        Some(author) => Ok(state.views.render(AUTHOR_DELETE, &AuthorDeletePage::new(&author, &books))?.into_response()),
        None => Ok(Redirect::to(AUTHOR_LIST_URL).into_response()),
    }
}

/// Handler for the update form, prefilled with the stored author
///
/// This function handles GET requests to `/catalog/author/{id}/update`.
///
/// ### Returns
///
/// The prefilled form, or a 404 page if the author does not exist
#[instrument(skip(state), fields(author_id = %id))]
pub async fn author_update_get_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let author = blocking(&state.pool, move |pool| repo::get_author(pool, &id))
        .await?
        .ok_or_else(AppError::author_not_found)?;

    debug!(date_of_birth = ?author.get_date_of_birth(), "Loaded author for update");

    let page = AuthorFormPage {
        title: "Update Author",
        author: AuthorForm::from_author(&author),
        errors: Vec::new(),
    };
    Ok(state.views.render(AUTHOR_FORM, &page)?.into_response())
}

/// Handler for a submitted update form
///
/// This function handles POST requests to `/catalog/author/{id}/update`.
///
/// ### Returns
///
/// A redirect to the updated author's page, the form again with
/// validation errors, or a 404 page if the author does not exist
#[instrument(skip(state, form), fields(author_id = %id))]
pub async fn author_update_post_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(form): Form<AuthorForm>,
) -> Result<Response, AppError> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            debug!("Update form rejected with {} errors", errors.len());
            let page = AuthorFormPage {
                title: "Edit Author",
                author: form.sanitized(),
                errors,
            };
            return Ok(state.views.render(AUTHOR_FORM, &page)?.into_response());
        }
    };

    debug!(date_of_birth = ?input.date_of_birth, "Updating author");

    let author = blocking(&state.pool, move |pool| repo::update_author(pool, &id, input))
        .await?
        .ok_or_else(AppError::author_not_found)?;

    info!("Updated author {}", author.get_id());

    Ok(Redirect::to(&author.url()).into_response())
}

/// Fetches an author and their books at the same time
async fn fetch_author_with_books(
    state: &AppState,
    id: &str,
) -> Result<(Option<crate::models::Author>, Vec<crate::models::Book>), AppError> {
    let author_id = id.to_string();
    let books_author_id = id.to_string();

    tokio::try_join!(
        blocking(&state.pool, move |pool| repo::get_author(pool, &author_id)),
        blocking(&state.pool, move |pool| repo::list_books_by_author(pool, &books_author_id)),
    )
}

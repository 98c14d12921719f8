use crate::db::DbPool;
use crate::models::Book;
use crate::schema::books;
use anyhow::Result;
use diesel::prelude::*;
use tracing::{debug, info, instrument};

/// Creates a new book attributed to an author
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The author does not exist (foreign key violation)
/// - The database insert operation fails
#[instrument(skip(pool, summary, isbn), fields(author_id = %author_id))]
pub fn create_book(
    pool: &DbPool,
    title: String,
    author_id: &str,
    summary: String,
    isbn: String,
) -> Result<Book> {
    debug!("Creating new book");

    let conn = &mut pool.get()?;

    let new_book = Book::new(title, author_id.to_string(), summary, isbn);

    diesel::insert_into(books::table)
        .values(&new_book)
        .execute(conn)?;

    info!("Successfully created book with id: {}", new_book.get_id());

    Ok(new_book)
}

/// Retrieves every book written by the given author, ordered by title
#[instrument(skip(pool), fields(author_id = %author_id))]
pub fn list_books_by_author(pool: &DbPool, author_id: &str) -> Result<Vec<Book>> {
    debug!("Listing books by author");

    let conn = &mut pool.get()?;

    let result = books::table
        .filter(books::author_id.eq(author_id))
        .order(books::title.asc())
        .select(Book::as_select())
        .load::<Book>(conn)?;

    debug!("Retrieved {} books", result.len());

    Ok(result)
}

use crate::db::DbPool;
use crate::models::{Author, AuthorInput};
use crate::schema::authors;
use anyhow::Result;
use diesel::prelude::*;
use tracing::{debug, info, instrument};

/// Creates a new author in the database
///
/// ### Arguments
///
/// * `pool` - A reference to the database connection pool
/// * `input` - The validated author fields
///
/// ### Returns
///
/// A Result containing the newly created Author if successful
///
/// ### Errors
///
/// Returns an error if:
/// - Unable to get a connection from the pool
/// - The database insert operation fails
#[instrument(skip(pool, input), fields(family_name = %input.family_name))]
pub fn create_author(pool: &DbPool, input: AuthorInput) -> Result<Author> {
    debug!("Creating new author");

    let conn = &mut pool.get()?;

    let new_author = Author::new(input);

    diesel::insert_into(authors::table)
        .values(&new_author)
        .execute(conn)?;

    info!("Successfully created author with id: {}", new_author.get_id());

    Ok(new_author)
}

/// Retrieves an author from the database by its ID
///
/// ### Returns
///
/// A Result containing an Option with the Author if found, or None if not found
#[instrument(skip(pool), fields(author_id = %id))]
pub fn get_author(pool: &DbPool, id: &str) -> Result<Option<Author>> {
    debug!("Retrieving author");

    let conn = &mut pool.get()?;

    let result = authors::table
        .find(id)
        .select(Author::as_select())
        .first::<Author>(conn)
        .optional()?;

    if result.is_some() {
        debug!("Author found");
    } else {
        debug!("Author not found");
    }

    Ok(result)
}

/// Retrieves all authors, sorted by family name
///
/// Authors sharing a family name are ordered by first name.
#[instrument(skip(pool))]
pub fn list_authors(pool: &DbPool) -> Result<Vec<Author>> {
    debug!("Listing all authors");

    let conn = &mut pool.get()?;

    let result = authors::table
        .order((authors::family_name.asc(), authors::first_name.asc()))
        .select(Author::as_select())
        .load::<Author>(conn)?;

    info!("Retrieved {} authors", result.len());

    Ok(result)
}

/// Replaces the editable fields of an existing author
///
/// The author keeps its ID. Both dates are overwritten, so passing `None`
/// clears a previously stored date.
///
/// ### Returns
///
/// A Result containing the updated Author, or None if no author has that ID
#[instrument(skip(pool, input), fields(author_id = %id))]
pub fn update_author(pool: &DbPool, id: &str, input: AuthorInput) -> Result<Option<Author>> {
    debug!("Updating author");

    let conn = &mut pool.get()?;

    let updated = Author::with_id(id.to_string(), input);

    let rows = diesel::update(authors::table.find(id))
        .set((
            authors::first_name.eq(updated.get_first_name()),
            authors::family_name.eq(updated.get_family_name()),
            authors::date_of_birth.eq(updated.get_date_of_birth()),
            authors::date_of_death.eq(updated.get_date_of_death()),
        ))
        .execute(conn)?;

    if rows == 0 {
        debug!("Author not found, nothing updated");
        return Ok(None);
    }

    info!("Successfully updated author");

    Ok(Some(updated))
}

/// Deletes an author by ID
///
/// The caller is responsible for checking that no books still reference the
/// author; the foreign key on `books.author_id` rejects the delete otherwise.
///
/// ### Returns
///
/// A Result containing true if a row was removed, false if no author had that ID
#[instrument(skip(pool), fields(author_id = %id))]
pub fn delete_author(pool: &DbPool, id: &str) -> Result<bool> {
    debug!("Deleting author");

    let conn = &mut pool.get()?;

    let rows = diesel::delete(authors::table.find(id)).execute(conn)?;

    if rows > 0 {
        info!("Successfully deleted author");
    } else {
        debug!("Author not found, nothing deleted");
    }

    Ok(rows > 0)
}

/// Reports whether a repository error came from the `books.author_id` foreign key
///
/// Used to tell a delete blocked by books apart from other database failures.
pub fn is_foreign_key_violation(err: &anyhow::Error) -> bool {
    use diesel::result::{DatabaseErrorKind, Error};

    matches!(
        err.downcast_ref::<Error>(),
        Some(Error::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _))
    ) || err.to_string().contains("FOREIGN KEY constraint failed")
}

#[cfg(test)]
mod tests;

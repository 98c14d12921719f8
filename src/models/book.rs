use diesel::prelude::*;
use uuid::Uuid;

/// A book in the catalog, linked to the author who wrote it
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::books)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Book {
    id: String,
    title: String,
    author_id: String,
    summary: String,
    isbn: String,
}

impl Book {
    /// Creates a new book with a freshly generated ID
    pub fn new(title: String, author_id: String, summary: String, isbn: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            author_id,
            summary,
            isbn,
        }
    }

    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    pub fn get_title(&self) -> String {
        self.title.clone()
    }

    pub fn get_author_id(&self) -> String {
        self.author_id.clone()
    }

    pub fn get_summary(&self) -> String {
        self.summary.clone()
    }

    pub fn get_isbn(&self) -> String {
        self.isbn.clone()
    }

    /// Gets the path of this book's detail page
    pub fn url(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }
}

/// Data models module
///
/// This module defines the catalog records stored in the database and the
/// presentation values derived from them.

mod author;
pub use author::{Author, AuthorInput};

mod book;
pub use book::Book;

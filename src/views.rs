use axum::response::Html;
use handlebars::{Handlebars, TemplateError};
use serde::Serialize;
use tracing::{debug, instrument};

use crate::errors::AppError;
use crate::forms::{AuthorForm, FieldError};
use crate::models::{Author, Book};

pub const AUTHOR_LIST: &str = "author_list";
pub const AUTHOR_DETAIL: &str = "author_detail";
pub const AUTHOR_FORM: &str = "author_form";
pub const AUTHOR_DELETE: &str = "author_delete";

/// Registry of the page templates, compiled once at startup
pub struct Views {
    registry: Handlebars<'static>,
}

impl Views {
    /// Compiles every embedded template
    ///
    /// ### Errors
    ///
    /// Returns an error if any template fails to parse
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_partial("layout", include_str!("../templates/layout.hbs"))?;
        registry.register_template_string(AUTHOR_LIST, include_str!("../templates/author_list.hbs"))?;
        registry.register_template_string(AUTHOR_DETAIL, include_str!("../templates/author_detail.hbs"))?;
        registry.register_template_string(AUTHOR_FORM, include_str!("../templates/author_form.hbs"))?;
        registry.register_template_string(AUTHOR_DELETE, include_str!("../templates/author_delete.hbs"))?;

        Ok(Self { registry })
    }

    /// Renders a page template with the given context
    #[instrument(skip(self, ctx))]
    pub fn render<T: Serialize>(&self, name: &str, ctx: &T) -> Result<Html<String>, AppError> {
        debug!("Rendering template");
        let body = self.registry.render(name, ctx)?;
        Ok(Html(body))
    }
}

/// An author as shown in lists and page headers
#[derive(Serialize, Debug, Clone)]
pub struct AuthorSummary {
    pub id: String,
    pub name: String,
    pub url: String,
    pub lifespan: String,
    pub date_of_birth: String,
    pub date_of_death: String,
}

impl From<&Author> for AuthorSummary {
    fn from(author: &Author) -> Self {
        Self {
            id: author.get_id(),
            name: author.name(),
            url: author.url(),
            lifespan: author.lifespan(),
            date_of_birth: author.date_of_birth_formatted(),
            date_of_death: author.date_of_death_formatted(),
        }
    }
}

/// A book as listed under its author
#[derive(Serialize, Debug, Clone)]
pub struct BookSummary {
    pub title: String,
    pub summary: String,
    pub url: String,
}

impl From<&Book> for BookSummary {
    fn from(book: &Book) -> Self {
        Self {
            title: book.get_title(),
            summary: book.get_summary(),
            url: book.url(),
        }
    }
}

#[derive(Serialize, Debug)]
pub struct AuthorListPage {
    pub title: &'static str,
    pub author_list: Vec<AuthorSummary>,
}

#[derive(Serialize, Debug)]
pub struct AuthorDetailPage {
    pub title: &'static str,
    pub author: AuthorSummary,
    pub author_books: Vec<BookSummary>,
}

#[derive(Serialize, Debug)]
pub struct AuthorFormPage {
    pub title: &'static str,
    pub author: AuthorForm,
    pub errors: Vec<FieldError>,
}

#[derive(Serialize, Debug)]
pub struct AuthorDeletePage {
    pub title: &'static str,
    pub author: AuthorSummary,
    pub author_books: Vec<BookSummary>,
}

impl AuthorListPage {
    pub fn new(authors: &[Author]) -> Self {
        Self {
            title: "Author List",
            author_list: authors.iter().map(AuthorSummary::from).collect(),
        }
    }
}

impl AuthorDetailPage {
    pub fn new(author: &Author, books: &[Book]) -> Self {
        Self {
            title: "Author Detail",
            author: author.into(),
            author_books: books.iter().map(BookSummary::from).collect(),
        }
    }
}

impl AuthorDeletePage {
    pub fn new(author: &Author, books: &[Book]) -> Self {
        Self {
            title: "Delete Author",
            author: author.into(),
            author_books: books.iter().map(BookSummary::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::AuthorInput;
    use chrono::NaiveDate;

    fn author(first: &str, family: &str) -> Author {
        Author::new(AuthorInput {
            first_name: first.to_string(),
            family_name: family.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1920, 1, 2),
            date_of_death: None,
        })
    }

    #[test]
    fn test_templates_compile() {
        assert!(Views::new().is_ok());
    }

    #[test]
    fn test_render_author_list() {
        let views = Views::new().unwrap();
        let authors = vec![author("Isaac", "Asimov"), author("Ben", "Bova")];

        let Html(body) = views.render(AUTHOR_LIST, &AuthorListPage::new(&authors)).unwrap();

        assert!(body.contains("<title>Author List</title>"));
        assert!(body.contains("Asimov, Isaac"));
        assert!(body.contains(&authors[1].url()));
        assert!(body.contains("(Jan 2, 1920 - )"));
    }

    #[test]
    fn test_render_empty_author_list() {
        let views = Views::new().unwrap();

        let Html(body) = views.render(AUTHOR_LIST, &AuthorListPage::new(&[])).unwrap();

        assert!(body.contains("There are no authors."));
    }

    #[test]
    fn test_render_detail_lists_books() {
        let views = Views::new().unwrap();
        let author = author("Isaac", "Asimov");
        let books = vec![Book::new("Foundation".to_string(), author.get_id(), "Psychohistory".to_string(), String::new())];

        let Html(body) = views.render(AUTHOR_DETAIL, &AuthorDetailPage::new(&author, &books)).unwrap();

        assert!(body.contains("Author: Asimov, Isaac"));
        assert!(body.contains("Foundation"));
        assert!(body.contains(&format!("{}/delete", author.url())));
    }

    #[test]
    fn test_render_form_escapes_values() {
        let views = Views::new().unwrap();
        let page = AuthorFormPage {
            title: "Create Author",
            author: AuthorForm {
                first_name: "<script>".to_string(),
                ..AuthorForm::default()
            },
            errors: vec![],
        };

        let Html(body) = views.render(AUTHOR_FORM, &page).unwrap();

        assert!(!body.contains("<script>"));
        assert!(body.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_render_delete_without_books_has_form() {
        let views = Views::new().unwrap();
        let author = author("Jim", "Jones");

        let Html(body) = views.render(AUTHOR_DELETE, &AuthorDeletePage::new(&author, &[])).unwrap();

        assert!(body.contains(&format!("value=\"{}\"", author.get_id())));
        assert!(body.contains("Do you really want to delete this Author?"));
    }

    #[test]
    fn test_render_unknown_template_fails() {
        let views = Views::new().unwrap();
        assert!(views.render("missing", &serde_json::json!({})).is_err());
    }
}

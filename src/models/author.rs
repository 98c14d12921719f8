use chrono::NaiveDate;
use diesel::prelude::*;
use uuid::Uuid;

/// Medium date format used on catalog pages, e.g. `Jan 5, 1950`
const DATE_MED: &str = "%b %-d, %Y";

/// Format expected by HTML `<input type="date">` fields
const DATE_INPUT: &str = "%Y-%m-%d";

/// Represents an author in the catalog
#[derive(Queryable, Selectable, Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::authors)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Author {
    /// Unique identifier for the author (UUID v4 as string)
    id: String,

    /// Given name
    first_name: String,

    /// Surname, used for sorting the author list
    family_name: String,

    date_of_birth: Option<NaiveDate>,

    date_of_death: Option<NaiveDate>,
}

/// The editable fields of an author, as accepted from a validated form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorInput {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    /// Creates a new author with a freshly generated ID
    ///
    /// ### Arguments
    ///
    /// * `input` - The validated author fields
    pub fn new(input: AuthorInput) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), input)
    }

    /// Creates an author that keeps an existing ID
    ///
    /// Used when replacing the fields of a stored author.
    pub fn with_id(id: String, input: AuthorInput) -> Self {
        Self {
            id,
            first_name: input.first_name,
            family_name: input.family_name,
            date_of_birth: input.date_of_birth,
            date_of_death: input.date_of_death,
        }
    }

    pub fn get_id(&self) -> String {
        self.id.clone()
    }

    pub fn get_first_name(&self) -> String {
        self.first_name.clone()
    }

    pub fn get_family_name(&self) -> String {
        self.family_name.clone()
    }

    pub fn get_date_of_birth(&self) -> Option<NaiveDate> {
        self.date_of_birth
    }

    pub fn get_date_of_death(&self) -> Option<NaiveDate> {
        self.date_of_death
    }

    /// Gets the author's display name
    ///
    /// ### Returns
    ///
    /// `"<family_name>, <first_name>"`, or an empty string when either part is missing
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            return String::new();
        }
        format!("{}, {}", self.family_name, self.first_name)
    }

    /// Gets the path of this author's detail page
    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }

    pub fn date_of_birth_formatted(&self) -> String {
        format_date(self.date_of_birth, DATE_MED)
    }

    pub fn date_of_death_formatted(&self) -> String {
        format_date(self.date_of_death, DATE_MED)
    }

    pub fn date_of_birth_yyyy_mm_dd(&self) -> String {
        format_date(self.date_of_birth, DATE_INPUT)
    }

    pub fn date_of_death_yyyy_mm_dd(&self) -> String {
        format_date(self.date_of_death, DATE_INPUT)
    }

    /// Gets the author's lifespan, e.g. `Jan 5, 1950 - Mar 2, 2001`
    ///
    /// Either side is left blank when its date is unknown, and the whole
    /// string is empty when both are.
    pub fn lifespan(&self) -> String {
        if self.date_of_birth.is_none() && self.date_of_death.is_none() {
            return String::new();
        }
        format!("{} - {}", self.date_of_birth_formatted(), self.date_of_death_formatted())
    }
}

fn format_date(date: Option<NaiveDate>, fmt: &str) -> String {
    date.map(|d| d.format(fmt).to_string()).unwrap_or_default()
}

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::{Author, AuthorInput};

/// Form body for creating or updating an author
///
/// Every field defaults to empty so that a partially filled form still
/// reaches validation instead of being rejected by the extractor.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AuthorForm {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: String,
    pub date_of_death: String,
}

/// Form body for deleting an author
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(default)]
pub struct DeleteAuthorForm {
    /// The ID of the author to delete, sent as a hidden field
    pub authorid: String,
}

/// A single validation failure, shown next to the form
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending form field
    pub param: String,
    /// Human-readable message
    pub msg: String,
    /// The sanitized value that failed
    pub value: String,
}

impl FieldError {
    fn new(param: &str, msg: &str, value: &str) -> Self {
        Self {
            param: param.to_string(),
            msg: msg.to_string(),
            value: value.to_string(),
        }
    }
}

impl AuthorForm {
    /// Returns a copy with every field trimmed
    pub fn sanitized(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            family_name: self.family_name.trim().to_string(),
            date_of_birth: self.date_of_birth.trim().to_string(),
            date_of_death: self.date_of_death.trim().to_string(),
        }
    }

    /// Builds form values from a stored author, for the update page
    pub fn from_author(author: &Author) -> Self {
        Self {
            first_name: author.get_first_name(),
            family_name: author.get_family_name(),
            date_of_birth: author.date_of_birth_yyyy_mm_dd(),
            date_of_death: author.date_of_death_yyyy_mm_dd(),
        }
    }

    /// Sanitizes and validates the submitted fields
    ///
    /// Each field stops at its first failed check; all fields are checked, so
    /// the returned errors cover the whole form in field order.
    pub fn validate(&self) -> Result<AuthorInput, Vec<FieldError>> {
        let form = self.sanitized();
        let mut errors = Vec::new();

        check_name(&mut errors, "first_name", &form.first_name, "First name");
        check_name(&mut errors, "family_name", &form.family_name, "Family name");
        let date_of_birth = check_date(&mut errors, "date_of_birth", &form.date_of_birth, "Invalid date of birth");
        let date_of_death = check_date(&mut errors, "date_of_death", &form.date_of_death, "Invalid date of death");

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(AuthorInput {
            first_name: form.first_name,
            family_name: form.family_name,
            date_of_birth,
            date_of_death,
        })
    }
}

fn check_name(errors: &mut Vec<FieldError>, param: &str, value: &str, label: &str) {
    if value.is_empty() {
        errors.push(FieldError::new(param, &format!("{label} must be specified."), value));
    } else if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        errors.push(FieldError::new(param, &format!("{label} has non-alphanumeric characters."), value));
    }
}

fn check_date(errors: &mut Vec<FieldError>, param: &str, value: &str, msg: &str) -> Option<NaiveDate> {
    if value.is_empty() {
        return None;
    }
    let parsed = parse_iso8601_date(value);
    if parsed.is_none() {
        errors.push(FieldError::new(param, msg, value));
    }
    parsed
}

/// Calendar date in extended (`YYYY-MM-DD`, `YYYY-MM`, `YYYY`) or basic
/// (`YYYYMMDD`) form, optionally followed by a time of day and UTC offset.
static ISO8601_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<year>[0-9]{4})",
        r"(?:-(?P<month>[0-9]{2})(?:-(?P<day>[0-9]{2}))?|(?P<bmonth>[0-9]{2})(?P<bday>[0-9]{2}))?",
        r"(?P<time>[T ](?:[01][0-9]|2[0-3])(?::?[0-5][0-9](?::?[0-5][0-9])?)?(?:[.,][0-9]+)?",
        r"(?:Z|[+-](?:[01][0-9]|2[0-3])(?::?[0-5][0-9])?)?)?$",
    ))
    .expect("valid ISO 8601 regex")
});

/// Parses an ISO 8601 date or date-time into a calendar date
///
/// Reduced precision is allowed (`2020` is Jan 1, `2020-03` is Mar 1), but a
/// time of day needs a full date. The time and offset are checked for range
/// and then discarded; the date is taken as written.
pub fn parse_iso8601_date(value: &str) -> Option<NaiveDate> {
    let caps = ISO8601_RE.captures(value)?;
    let field = |extended: &str, basic: &str| {
        caps.name(extended)
            .or_else(|| caps.name(basic))
            .map(|m| m.as_str().parse::<u32>())
    };

    let year = caps.name("year")?.as_str().parse::<i32>().ok()?;
    let month = field("month", "bmonth").transpose().ok()?;
    let day = field("day", "bday").transpose().ok()?;
    if caps.name("time").is_some() && day.is_none() {
        return None;
    }

    NaiveDate::from_ymd_opt(year, month.unwrap_or(1), day.unwrap_or(1))
}

//! Book model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Number;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Book record as held on the shelf
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Opaque identifier, assigned once at creation
    pub id: String,
    pub name: String,
    pub year: i32,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: i32,
    pub read_page: i32,
    /// True when `readPage` equals `pageCount`
    pub finished: bool,
    pub reading: bool,
    pub inserted_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    pub fn new(id: String, fields: BookFields, now: DateTime<Utc>) -> Self {
        Self {
            id,
            finished: fields.is_finished(),
            name: fields.name,
            year: fields.year,
            author: fields.author,
            summary: fields.summary,
            publisher: fields.publisher,
            page_count: fields.page_count,
            read_page: fields.read_page,
            reading: fields.reading,
            inserted_at: now,
            updated_at: now,
        }
    }

    /// Overwrite every mutable field; `id` and `inserted_at` are kept.
    pub fn apply(&mut self, fields: &BookFields, now: DateTime<Utc>) {
        self.name = fields.name.clone();
        self.year = fields.year;
        self.author = fields.author.clone();
        self.summary = fields.summary.clone();
        self.publisher = fields.publisher.clone();
        self.page_count = fields.page_count;
        self.read_page = fields.read_page;
        self.finished = fields.is_finished();
        self.reading = fields.reading;
        self.updated_at = now;
    }
}

/// Short book representation for list views
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookShort {
    pub id: String,
    pub name: String,
    pub publisher: String,
}

impl From<&Book> for BookShort {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            name: book.name.clone(),
            publisher: book.publisher.clone(),
        }
    }
}

/// Create / update book request
///
/// Every field but `name` may be absent or `null`; numbers may be any JSON
/// number and are checked for being whole by [`BookPayload::to_fields`].
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct BookPayload {
    /// Book name (required, non-empty)
    #[validate(required, length(min = 1))]
    pub name: Option<String>,
    #[schema(value_type = Option<i32>)]
    pub year: Option<Number>,
    pub author: Option<String>,
    pub summary: Option<String>,
    pub publisher: Option<String>,
    #[schema(value_type = Option<i32>)]
    pub page_count: Option<Number>,
    #[schema(value_type = Option<i32>)]
    pub read_page: Option<Number>,
    pub reading: Option<bool>,
}

impl BookPayload {
    /// Apply defaults and check numeric fields, returning the JSON name of
    /// the first field that is not a whole number in `i32` range.
    pub fn to_fields(&self) -> Result<BookFields, &'static str> {
        Ok(BookFields {
            name: self.name.clone().unwrap_or_default(),
            year: whole_number("year", self.year.as_ref())?,
            author: self.author.clone().unwrap_or_default(),
            summary: self.summary.clone().unwrap_or_default(),
            publisher: self.publisher.clone().unwrap_or_default(),
            page_count: whole_number("pageCount", self.page_count.as_ref())?,
            read_page: whole_number("readPage", self.read_page.as_ref())?,
            reading: self.reading.unwrap_or_default(),
        })
    }
}

fn whole_number(field: &'static str, value: Option<&Number>) -> Result<i32, &'static str> {
    let Some(number) = value else {
        return Ok(0);
    };
    if let Some(v) = number.as_i64() {
        return i32::try_from(v).map_err(|_| field);
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 => {
            Ok(f as i32)
        }
        _ => Err(field),
    }
}

/// Book fields of a write request with defaults applied
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFields {
    pub name: String,
    pub year: i32,
    pub author: String,
    pub summary: String,
    pub publisher: String,
    pub page_count: i32,
    pub read_page: i32,
    pub reading: bool,
}

impl BookFields {
    pub fn is_finished(&self) -> bool {
        self.read_page == self.page_count
    }

    pub fn read_page_exceeds_page_count(&self) -> bool {
        self.read_page > self.page_count
    }
}

/// Query parameters for listing books
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams, ToSchema)]
#[serde(deny_unknown_fields)]
#[into_params(parameter_in = Query)]
pub struct BookQuery {
    /// Case-insensitive substring of the book name, non-empty when given
    #[validate(length(min = 1))]
    pub name: Option<String>,
    /// 1 for books being read, 0 otherwise
    pub reading: Option<i32>,
    /// 1 for finished books, 0 otherwise
    pub finished: Option<i32>,
}

impl BookQuery {
    /// Whether `book` passes every filter set on this query
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(name) = self.name.as_deref() {
            if !book.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }
        if let Some(reading) = self.reading {
            if book.reading != (reading == 1) {
                return false;
            }
        }
        if let Some(finished) = self.finished {
            if book.finished != (finished == 1) {
                return false;
            }
        }
        true
    }
}

//! Repository trait definitions
//!
//! These traits define the contract for data access.
//! Implementations live in the infrastructure layer.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;
use uuid::Uuid;

use super::validation::{self, required};
use super::{AbsoluteUrl, DetailRoute, DomainError};
use crate::models::LoanStatus;

/// Author data for API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Author {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    /// Died
    pub date_of_death: Option<NaiveDate>,
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.last_name, self.first_name)
    }
}

impl AbsoluteUrl for Author {
    const ROUTE: DetailRoute = DetailRoute::Author;

    fn url_id(&self) -> String {
        self.id.to_string()
    }
}

/// Input for creating or replacing an author
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct AuthorInput {
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub date_of_death: Option<NaiveDate>,
}

impl AuthorInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        required("first_name", &self.first_name, validation::AUTHOR_NAME_MAX)?;
        required("last_name", &self.last_name, validation::AUTHOR_NAME_MAX)
    }
}

/// Repository trait for Author entity
#[async_trait]
pub trait AuthorRepository: Send + Sync {
    /// Find all authors, ordered by last name then first name
    async fn find_all(&self) -> Result<Vec<Author>, DomainError>;

    /// Find an author by ID
    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, DomainError>;

    /// Create a new author
    async fn create(&self, input: AuthorInput) -> Result<Author, DomainError>;

    /// Replace an author's fields
    async fn update(&self, id: i32, input: AuthorInput) -> Result<Author, DomainError>;

    /// Delete an author; refused while any book references it
    async fn delete(&self, id: i32) -> Result<(), DomainError>;

    /// Detail-page address of an existing author
    async fn absolute_url(&self, id: i32) -> Result<String, DomainError> {
        self.find_by_id(id)
            .await?
            .map(|a| a.get_absolute_url())
            .ok_or(DomainError::NotFound)
    }
}

/// Genre data for API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl AbsoluteUrl for Genre {
    const ROUTE: DetailRoute = DetailRoute::Genre;

    fn url_id(&self) -> String {
        self.id.to_string()
    }
}

/// Input for creating or renaming a genre
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GenreInput {
    /// Enter a book genre (e.g. Science Fiction, French Poetry, etc.)
    pub name: String,
}

impl GenreInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        required("name", &self.name, validation::GENRE_NAME_MAX)
    }
}

/// Message reported when two genre names differ only by case
pub const GENRE_EXISTS_MESSAGE: &str = "Genre already exists (case insensitive match)";

/// Repository trait for Genre entity
#[async_trait]
pub trait GenreRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Genre>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>, DomainError>;

    /// Create a genre; names colliding case-insensitively are rejected
    async fn create(&self, input: GenreInput) -> Result<Genre, DomainError>;

    async fn update(&self, id: i32, input: GenreInput) -> Result<Genre, DomainError>;

    /// Delete a genre and its book associations
    async fn delete(&self, id: i32) -> Result<(), DomainError>;

    async fn absolute_url(&self, id: i32) -> Result<String, DomainError> {
        self.find_by_id(id)
            .await?
            .map(|g| g.get_absolute_url())
            .ok_or(DomainError::NotFound)
    }
}

/// Book data for API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Book {
    pub id: i32,
    pub title: String,
    pub author_id: Option<i32>,
    /// Display name of the author ("Last, First")
    pub author: Option<String>,
    pub summary: String,
    pub isbn: String,
    pub genre_ids: Vec<i32>,
    pub genres: Vec<String>,
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title)
    }
}

impl AbsoluteUrl for Book {
    const ROUTE: DetailRoute = DetailRoute::Book;

    fn url_id(&self) -> String {
        self.id.to_string()
    }
}

/// Input for creating or replacing a book
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct BookInput {
    pub title: String,
    #[serde(default)]
    pub author_id: Option<i32>,
    /// Enter a brief description of the book
    #[serde(default)]
    pub summary: String,
    /// 13 Character ISBN number
    pub isbn: String,
    /// Select a genre for this book
    #[serde(default)]
    pub genre_ids: Vec<i32>,
}

impl BookInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        required("title", &self.title, validation::BOOK_TITLE_MAX)?;
        validation::max_length("summary", &self.summary, validation::BOOK_SUMMARY_MAX)?;
        required("isbn", &self.isbn, validation::ISBN_MAX)
    }
}

/// Message reported for a duplicate ISBN
pub const ISBN_EXISTS_MESSAGE: &str = "Book with this ISBN already exists";

/// Repository trait for Book entity
#[async_trait]
pub trait BookRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Book>, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError>;

    /// Create a book together with its genre set
    async fn create(&self, input: BookInput) -> Result<Book, DomainError>;

    /// Replace a book's fields and genre set
    async fn update(&self, id: i32, input: BookInput) -> Result<Book, DomainError>;

    /// Replace only the genre set
    async fn set_genres(&self, id: i32, genre_ids: Vec<i32>) -> Result<Book, DomainError>;

    /// Delete a book; refused while any instance references it
    async fn delete(&self, id: i32) -> Result<(), DomainError>;

    async fn absolute_url(&self, id: i32) -> Result<String, DomainError> {
        self.find_by_id(id)
            .await?
            .map(|b| b.get_absolute_url())
            .ok_or(DomainError::NotFound)
    }
}

/// Book instance data for API responses
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BookInstance {
    /// Unique ID for this particular book across whole library
    pub id: Uuid,
    pub book_id: Option<i32>,
    pub book_title: Option<String>,
    pub imprint: String,
    pub due_back: Option<NaiveDate>,
    /// Book availability
    pub status: LoanStatus,
}

impl fmt::Display for BookInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.book_title {
            Some(title) => write!(f, "{} ({})", self.id, title),
            None => write!(f, "{}", self.id),
        }
    }
}

/// Input for creating a book instance
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CreateBookInstanceInput {
    #[serde(default)]
    pub book_id: Option<i32>,
    pub imprint: String,
    #[serde(default)]
    pub due_back: Option<NaiveDate>,
    /// Defaults to maintenance when omitted
    #[serde(default)]
    pub status: Option<LoanStatus>,
}

impl CreateBookInstanceInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        required("imprint", &self.imprint, validation::IMPRINT_MAX)
    }
}

/// Input for updating a book instance; absent fields are left unchanged
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct UpdateBookInstanceInput {
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub book_id: Option<Option<i32>>,
    pub imprint: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub due_back: Option<Option<NaiveDate>>,
    pub status: Option<LoanStatus>,
}

impl UpdateBookInstanceInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        match &self.imprint {
            Some(imprint) => required("imprint", imprint, validation::IMPRINT_MAX),
            None => Ok(()),
        }
    }
}

/// Distinguish an explicit `null` (clear the field) from an absent key.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: serde::Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Repository trait for BookInstance entity
#[async_trait]
pub trait BookInstanceRepository: Send + Sync {
    /// All instances ordered by due date, instances without one first
    async fn find_all(&self) -> Result<Vec<BookInstance>, DomainError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BookInstance>, DomainError>;

    /// Copies of one book, in the same order as `find_all`
    async fn find_by_book_id(&self, book_id: i32) -> Result<Vec<BookInstance>, DomainError>;

    /// Create an instance under a freshly generated UUID
    async fn create(&self, input: CreateBookInstanceInput) -> Result<BookInstance, DomainError>;

    /// Update an instance; the identity never changes
    async fn update(
        &self,
        id: Uuid,
        input: UpdateBookInstanceInput,
    ) -> Result<BookInstance, DomainError>;

    async fn delete(&self, id: Uuid) -> Result<(), DomainError>;
}

/// The four counts shown on the catalog landing page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CatalogSummary {
    pub num_books: u64,
    pub num_instances: u64,
    pub num_instances_available: u64,
    pub num_authors: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_displays_last_name_first() {
        let author = Author {
            id: 3,
            first_name: "Joanne".into(),
            last_name: "Rowling".into(),
            date_of_birth: None,
            date_of_death: None,
        };
        assert_eq!(author.to_string(), "Rowling, Joanne");
        assert_eq!(author.get_absolute_url(), "/catalog/author/3/");
    }

    #[test]
    fn instance_display_includes_title_when_known() {
        let id = Uuid::new_v4();
        let mut instance = BookInstance {
            id,
            book_id: Some(1),
            book_title: Some("Harry Potter".into()),
            imprint: "Bloomsbury".into(),
            due_back: None,
            status: LoanStatus::Available,
        };
        assert_eq!(instance.to_string(), format!("{} (Harry Potter)", id));
        instance.book_title = None;
        assert_eq!(instance.to_string(), id.to_string());
    }

    #[test]
    fn update_input_distinguishes_null_from_absent() {
        let cleared: UpdateBookInstanceInput =
            serde_json::from_str(r#"{"due_back": null}"#).unwrap();
        assert_eq!(cleared.due_back, Some(None));

        let untouched: UpdateBookInstanceInput = serde_json::from_str("{}").unwrap();
        assert_eq!(untouched.due_back, None);
        assert_eq!(untouched.book_id, None);
    }
}

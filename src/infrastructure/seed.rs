use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

use crate::domain::{
    AuthorInput, AuthorRepository, BookInput, BookInstanceRepository, BookRepository,
    CreateBookInstanceInput, DomainError, GenreInput, GenreRepository,
};
use crate::infrastructure::{
    SeaOrmAuthorRepository, SeaOrmBookInstanceRepository, SeaOrmBookRepository,
    SeaOrmGenreRepository,
};
use crate::models::LoanStatus;
use crate::models::book::Entity as BookEntity;

/// Populate an empty catalog with a few authors, genres, books and copies.
/// Does nothing when books already exist.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DomainError> {
    if BookEntity::find().count(db).await? > 0 {
        tracing::info!("Catalog already populated, skipping demo seed");
        return Ok(());
    }

    let authors = SeaOrmAuthorRepository::new(db.clone());
    let genres = SeaOrmGenreRepository::new(db.clone());
    let books = SeaOrmBookRepository::new(db.clone());
    let instances = SeaOrmBookInstanceRepository::new(db.clone());

    // 1. Genres
    let fantasy = genres
        .create(GenreInput {
            name: "Fantasy".to_owned(),
        })
        .await?;
    let science_fiction = genres
        .create(GenreInput {
            name: "Science Fiction".to_owned(),
        })
        .await?;

    // 2. Authors
    let tolkien = authors
        .create(AuthorInput {
            first_name: "John Ronald Reuel".to_owned(),
            last_name: "Tolkien".to_owned(),
            date_of_birth: NaiveDate::from_ymd_opt(1892, 1, 3),
            date_of_death: NaiveDate::from_ymd_opt(1973, 9, 2),
        })
        .await?;
    let asimov = authors
        .create(AuthorInput {
            first_name: "Isaac".to_owned(),
            last_name: "Asimov".to_owned(),
            date_of_birth: NaiveDate::from_ymd_opt(1920, 1, 2),
            date_of_death: NaiveDate::from_ymd_opt(1992, 4, 6),
        })
        .await?;

    // 3. Books
    let hobbit = books
        .create(BookInput {
            title: "The Hobbit".to_owned(),
            author_id: Some(tolkien.id),
            summary: "Bilbo Baggins is swept into a quest to reclaim a dwarf kingdom.".to_owned(),
            isbn: "9780261102217".to_owned(),
            genre_ids: vec![fantasy.id],
        })
        .await?;
    let foundation = books
        .create(BookInput {
            title: "Foundation".to_owned(),
            author_id: Some(asimov.id),
            summary: "A mathematician foresees the fall of a galactic empire.".to_owned(),
            isbn: "9780553293357".to_owned(),
            genre_ids: vec![science_fiction.id],
        })
        .await?;

    // 4. Copies
    let copies = [
        (hobbit.id, "HarperCollins, 1995", LoanStatus::Available, None),
        (
            hobbit.id,
            "Allen & Unwin, 1937",
            LoanStatus::OnLoan,
            NaiveDate::from_ymd_opt(2024, 5, 1),
        ),
        (foundation.id, "Bantam Spectra, 1991", LoanStatus::Reserved, None),
    ];
    for (book_id, imprint, status, due_back) in copies {
        instances
            .create(CreateBookInstanceInput {
                book_id: Some(book_id),
                imprint: imprint.to_owned(),
                due_back,
                status: Some(status),
            })
            .await?;
    }

    Ok(())
}

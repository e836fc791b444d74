//! SeaORM implementation of BookRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use std::collections::BTreeSet;

use crate::domain::{Author, Book, BookInput, BookRepository, DomainError, ISBN_EXISTS_MESSAGE};
use crate::models::author::Entity as AuthorEntity;
use crate::models::book::{ActiveModel, Column, Entity as BookEntity, Model};
use crate::models::book_genres::{
    ActiveModel as BookGenreActiveModel, Column as BookGenreColumn, Entity as BookGenreEntity,
};
use crate::models::book_instance::{Column as InstanceColumn, Entity as InstanceEntity};
use crate::models::genre::{Column as GenreColumn, Entity as GenreEntity};

/// SeaORM-based implementation of BookRepository
pub struct SeaOrmBookRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Attach the author's display name and the genre set
    async fn to_dto(&self, model: Model) -> Result<Book, DomainError> {
        let author = model
            .find_related(AuthorEntity)
            .one(&self.db)
            .await?
            .map(|a| Author::from(a).to_string());

        let genres = model
            .find_related(GenreEntity)
            .order_by_asc(GenreColumn::Name)
            .all(&self.db)
            .await?;

        Ok(Book {
            id: model.id,
            title: model.title,
            author_id: model.author_id,
            author,
            summary: model.summary,
            isbn: model.isbn,
            genre_ids: genres.iter().map(|g| g.id).collect(),
            genres: genres.into_iter().map(|g| g.name).collect(),
        })
    }
}

fn map_write_error(e: sea_orm::DbErr) -> DomainError {
    match DomainError::from(e) {
        DomainError::UniquenessViolation(_) => {
            DomainError::UniquenessViolation(ISBN_EXISTS_MESSAGE.to_string())
        }
        other => other,
    }
}

async fn ensure_author_exists<C: ConnectionTrait>(
    conn: &C,
    author_id: Option<i32>,
) -> Result<(), DomainError> {
    if let Some(id) = author_id
        && AuthorEntity::find_by_id(id).one(conn).await?.is_none()
    {
        return Err(DomainError::NotFound);
    }
    Ok(())
}

/// Replace the association set of one book. Duplicate ids collapse.
async fn replace_genres<C: ConnectionTrait>(
    conn: &C,
    book_id: i32,
    genre_ids: &[i32],
) -> Result<(), DomainError> {
    let wanted: BTreeSet<i32> = genre_ids.iter().copied().collect();

    if !wanted.is_empty() {
        let found = GenreEntity::find()
            .filter(GenreColumn::Id.is_in(wanted.iter().copied()))
            .count(conn)
            .await?;
        if found != wanted.len() as u64 {
            return Err(DomainError::NotFound);
        }
    }

    BookGenreEntity::delete_many()
        .filter(BookGenreColumn::BookId.eq(book_id))
        .exec(conn)
        .await?;

    if !wanted.is_empty() {
        let rows = wanted.into_iter().map(|genre_id| BookGenreActiveModel {
            book_id: Set(book_id),
            genre_id: Set(genre_id),
        });
        BookGenreEntity::insert_many(rows)
            .exec_without_returning(conn)
            .await?;
    }

    Ok(())
}

#[async_trait]
impl BookRepository for SeaOrmBookRepository {
    async fn find_all(&self) -> Result<Vec<Book>, DomainError> {
        let books = BookEntity::find()
            .order_by_asc(Column::Title)
            .all(&self.db)
            .await?;

        let mut dtos = Vec::with_capacity(books.len());
        for model in books {
            dtos.push(self.to_dto(model).await?);
        }
        Ok(dtos)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, DomainError> {
        match BookEntity::find_by_id(id).one(&self.db).await? {
            Some(model) => Ok(Some(self.to_dto(model).await?)),
            None => Ok(None),
        }
    }

    async fn create(&self, input: BookInput) -> Result<Book, DomainError> {
        input.validate()?;

        let txn = self.db.begin().await?;
        ensure_author_exists(&txn, input.author_id).await?;

        let new_book = ActiveModel {
            title: Set(input.title),
            author_id: Set(input.author_id),
            summary: Set(input.summary),
            isbn: Set(input.isbn),
            ..Default::default()
        };
        let model = new_book.insert(&txn).await.map_err(map_write_error)?;

        replace_genres(&txn, model.id, &input.genre_ids).await?;
        txn.commit().await?;

        tracing::info!("Created book {} ({})", model.id, model.isbn);
        self.to_dto(model).await
    }

    async fn update(&self, id: i32, input: BookInput) -> Result<Book, DomainError> {
        input.validate()?;

        let txn = self.db.begin().await?;
        let existing = BookEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(DomainError::NotFound)?;
        ensure_author_exists(&txn, input.author_id).await?;

        let mut active: ActiveModel = existing.into();
        active.title = Set(input.title);
        active.author_id = Set(input.author_id);
        active.summary = Set(input.summary);
        active.isbn = Set(input.isbn);
        let model = active.update(&txn).await.map_err(map_write_error)?;

        replace_genres(&txn, model.id, &input.genre_ids).await?;
        txn.commit().await?;

        self.to_dto(model).await
    }

    async fn set_genres(&self, id: i32, genre_ids: Vec<i32>) -> Result<Book, DomainError> {
        let txn = self.db.begin().await?;
        let model = BookEntity::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(DomainError::NotFound)?;

        replace_genres(&txn, id, &genre_ids).await?;
        txn.commit().await?;

        self.to_dto(model).await
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        if BookEntity::find_by_id(id).one(&self.db).await?.is_none() {
            return Err(DomainError::NotFound);
        }

        let instances = InstanceEntity::find()
            .filter(InstanceColumn::BookId.eq(id))
            .count(&self.db)
            .await?;
        if instances > 0 {
            tracing::warn!(
                "Refusing to delete book {}: {} instance(s) reference it",
                id,
                instances
            );
            return Err(DomainError::ReferentialRestriction(format!(
                "Cannot delete book {}: referenced by {} instance(s)",
                id, instances
            )));
        }

        // book_genres rows go with it (ON DELETE CASCADE)
        let result = BookEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}

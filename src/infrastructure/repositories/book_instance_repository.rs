//! SeaORM implementation of BookInstanceRepository

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    Select, Set,
};
use uuid::Uuid;

use crate::domain::{
    BookInstance, BookInstanceRepository, CreateBookInstanceInput, DomainError,
    UpdateBookInstanceInput,
};
use crate::models::book::{self, Entity as BookEntity};
use crate::models::book_instance::{ActiveModel, Column, Entity as InstanceEntity, Model};

/// SeaORM-based implementation of BookInstanceRepository
pub struct SeaOrmBookInstanceRepository {
    db: DatabaseConnection,
}

impl SeaOrmBookInstanceRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Load the referenced book so the DTO carries its title
    async fn with_book(&self, instance: Model) -> Result<BookInstance, DomainError> {
        let book = match instance.book_id {
            Some(id) => BookEntity::find_by_id(id).one(&self.db).await?,
            None => None,
        };
        Ok(to_dto(instance, book))
    }
}

fn to_dto(instance: Model, book: Option<book::Model>) -> BookInstance {
    BookInstance {
        id: instance.id,
        book_id: instance.book_id,
        book_title: book.map(|b| b.title),
        imprint: instance.imprint,
        due_back: instance.due_back,
        status: instance.status,
    }
}

/// Default ordering: due date ascending, instances without one first
fn ordered(query: Select<InstanceEntity>) -> Select<InstanceEntity> {
    query
        .order_by_desc(Expr::col((InstanceEntity, Column::DueBack)).is_null())
        .order_by_asc(Column::DueBack)
}

async fn ensure_book_exists(
    db: &DatabaseConnection,
    book_id: Option<i32>,
) -> Result<(), DomainError> {
    if let Some(id) = book_id
        && BookEntity::find_by_id(id).one(db).await?.is_none()
    {
        return Err(DomainError::NotFound);
    }
    Ok(())
}

#[async_trait]
impl BookInstanceRepository for SeaOrmBookInstanceRepository {
    async fn find_all(&self) -> Result<Vec<BookInstance>, DomainError> {
        let rows = ordered(InstanceEntity::find())
            .find_also_related(BookEntity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(instance, book)| to_dto(instance, book))
            .collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<BookInstance>, DomainError> {
        let result = InstanceEntity::find_by_id(id)
            .find_also_related(BookEntity)
            .one(&self.db)
            .await?;

        Ok(result.map(|(instance, book)| to_dto(instance, book)))
    }

    async fn find_by_book_id(&self, book_id: i32) -> Result<Vec<BookInstance>, DomainError> {
        let rows = ordered(InstanceEntity::find().filter(Column::BookId.eq(book_id)))
            .find_also_related(BookEntity)
            .all(&self.db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(instance, book)| to_dto(instance, book))
            .collect())
    }

    async fn create(&self, input: CreateBookInstanceInput) -> Result<BookInstance, DomainError> {
        input.validate()?;
        ensure_book_exists(&self.db, input.book_id).await?;

        let new_instance = ActiveModel {
            id: Set(Uuid::new_v4()),
            book_id: Set(input.book_id),
            imprint: Set(input.imprint),
            due_back: Set(input.due_back),
            status: Set(input.status.unwrap_or_default()),
        };

        let result = new_instance.insert(&self.db).await?;
        tracing::info!(
            "Created book instance {} (status {})",
            result.id,
            result.status.code()
        );

        self.with_book(result).await
    }

    async fn update(
        &self,
        id: Uuid,
        input: UpdateBookInstanceInput,
    ) -> Result<BookInstance, DomainError> {
        input.validate()?;

        let existing = InstanceEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        if input.book_id.is_none()
            && input.imprint.is_none()
            && input.due_back.is_none()
            && input.status.is_none()
        {
            return self.with_book(existing).await;
        }

        let mut active: ActiveModel = existing.into();

        if let Some(book_id) = input.book_id {
            ensure_book_exists(&self.db, book_id).await?;
            active.book_id = Set(book_id);
        }
        if let Some(imprint) = input.imprint {
            active.imprint = Set(imprint);
        }
        if let Some(due_back) = input.due_back {
            active.due_back = Set(due_back);
        }
        if let Some(status) = input.status {
            active.status = Set(status);
        }

        let result = active.update(&self.db).await?;

        self.with_book(result).await
    }

    async fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        let result = InstanceEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}

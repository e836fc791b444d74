//! SeaORM implementation of AuthorRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::domain::{Author, AuthorInput, AuthorRepository, DomainError};
use crate::models::author::{ActiveModel, Column, Entity as AuthorEntity, Model};
use crate::models::book::{Column as BookColumn, Entity as BookEntity};

/// SeaORM-based implementation of AuthorRepository
pub struct SeaOrmAuthorRepository {
    db: DatabaseConnection,
}

impl SeaOrmAuthorRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<Model> for Author {
    fn from(a: Model) -> Self {
        Author {
            id: a.id,
            first_name: a.first_name,
            last_name: a.last_name,
            date_of_birth: a.date_of_birth,
            date_of_death: a.date_of_death,
        }
    }
}

#[async_trait]
impl AuthorRepository for SeaOrmAuthorRepository {
    async fn find_all(&self) -> Result<Vec<Author>, DomainError> {
        let authors = AuthorEntity::find()
            .order_by_asc(Column::LastName)
            .order_by_asc(Column::FirstName)
            .all(&self.db)
            .await?;

        Ok(authors.into_iter().map(Author::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Author>, DomainError> {
        let author = AuthorEntity::find_by_id(id).one(&self.db).await?;

        Ok(author.map(Author::from))
    }

    async fn create(&self, input: AuthorInput) -> Result<Author, DomainError> {
        input.validate()?;

        let author = ActiveModel {
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            date_of_birth: Set(input.date_of_birth),
            date_of_death: Set(input.date_of_death),
            ..Default::default()
        };

        let result = author.insert(&self.db).await?;
        tracing::info!("Created author {} ({})", result.id, Author::from(result.clone()));

        Ok(Author::from(result))
    }

    async fn update(&self, id: i32, input: AuthorInput) -> Result<Author, DomainError> {
        input.validate()?;

        let existing = AuthorEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.first_name = Set(input.first_name);
        active.last_name = Set(input.last_name);
        active.date_of_birth = Set(input.date_of_birth);
        active.date_of_death = Set(input.date_of_death);

        let result = active.update(&self.db).await?;

        Ok(Author::from(result))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        if AuthorEntity::find_by_id(id).one(&self.db).await?.is_none() {
            return Err(DomainError::NotFound);
        }

        let books = BookEntity::find()
            .filter(BookColumn::AuthorId.eq(id))
            .count(&self.db)
            .await?;
        if books > 0 {
            tracing::warn!("Refusing to delete author {}: {} book(s) reference it", id, books);
            return Err(DomainError::ReferentialRestriction(format!(
                "Cannot delete author {}: referenced by {} book(s)",
                id, books
            )));
        }

        let result = AuthorEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}

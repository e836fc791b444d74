//! SeaORM implementation of GenreRepository

use async_trait::async_trait;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};

use crate::domain::{DomainError, GENRE_EXISTS_MESSAGE, Genre, GenreInput, GenreRepository};
use crate::models::genre::{ActiveModel, Column, Entity as GenreEntity, Model};

/// SeaORM-based implementation of GenreRepository
pub struct SeaOrmGenreRepository {
    db: DatabaseConnection,
}

impl SeaOrmGenreRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl From<Model> for Genre {
    fn from(g: Model) -> Self {
        Genre {
            id: g.id,
            name: g.name,
        }
    }
}

/// Both the exact and the case-folded index report as the same collision
fn map_write_error(e: sea_orm::DbErr) -> DomainError {
    match DomainError::from(e) {
        DomainError::UniquenessViolation(_) => {
            DomainError::UniquenessViolation(GENRE_EXISTS_MESSAGE.to_string())
        }
        other => other,
    }
}

#[async_trait]
impl GenreRepository for SeaOrmGenreRepository {
    async fn find_all(&self) -> Result<Vec<Genre>, DomainError> {
        let genres = GenreEntity::find()
            .order_by_asc(Column::Name)
            .all(&self.db)
            .await?;

        Ok(genres.into_iter().map(Genre::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Genre>, DomainError> {
        let genre = GenreEntity::find_by_id(id).one(&self.db).await?;

        Ok(genre.map(Genre::from))
    }

    async fn create(&self, input: GenreInput) -> Result<Genre, DomainError> {
        input.validate()?;

        let genre = ActiveModel {
            name: Set(input.name),
            ..Default::default()
        };

        let result = genre.insert(&self.db).await.map_err(map_write_error)?;
        tracing::info!("Created genre {} ({})", result.id, result.name);

        Ok(Genre::from(result))
    }

    async fn update(&self, id: i32, input: GenreInput) -> Result<Genre, DomainError> {
        input.validate()?;

        let existing = GenreEntity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(DomainError::NotFound)?;

        let mut active: ActiveModel = existing.into();
        active.name = Set(input.name);

        let result = active.update(&self.db).await.map_err(map_write_error)?;

        Ok(Genre::from(result))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        // book_genres rows go with it (ON DELETE CASCADE)
        let result = GenreEntity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(())
    }
}

//! Catalog Service - the landing page aggregate
//!
//! Read-only counts over the whole catalog, computed at query time.
//! Storage faults propagate to the caller unchanged.

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter};

use crate::domain::{CatalogSummary, DomainError};
use crate::models::LoanStatus;
use crate::models::author::Entity as AuthorEntity;
use crate::models::book::Entity as BookEntity;
use crate::models::book_instance::{Column as InstanceColumn, Entity as InstanceEntity};

/// Count books, instances, available instances and authors
pub async fn catalog_summary(db: &DatabaseConnection) -> Result<CatalogSummary, DomainError> {
    let num_books = BookEntity::find().count(db).await?;
    let num_instances = InstanceEntity::find().count(db).await?;
    let num_instances_available = InstanceEntity::find()
        .filter(InstanceColumn::Status.eq(LoanStatus::Available))
        .count(db)
        .await?;
    let num_authors = AuthorEntity::find().count(db).await?;

    tracing::debug!(
        "Catalog summary: books={}, instances={}, available={}, authors={}",
        num_books,
        num_instances,
        num_instances_available,
        num_authors
    );

    Ok(CatalogSummary {
        num_books,
        num_instances,
        num_instances_available,
        num_authors,
    })
}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A title in the catalog, not a specific copy of it.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "books")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    /// One author per book, many books per author
    pub author_id: Option<i32>,
    pub summary: String,
    /// 13 character ISBN number
    #[sea_orm(unique)]
    pub isbn: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::author::Entity",
        from = "Column::AuthorId",
        to = "super::author::Column::Id",
        on_update = "Cascade",
        on_delete = "NoAction"
    )]
    Author,
    #[sea_orm(has_many = "super::book_instance::Entity")]
    Instances,
}

impl Related<super::author::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Author.def()
    }
}

impl Related<super::book_instance::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Instances.def()
    }
}

impl Related<super::genre::Entity> for Entity {
    fn to() -> RelationDef {
        super::book_genres::Relation::Genre.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::book_genres::Relation::Book.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}

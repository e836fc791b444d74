use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Availability of one physical copy.
///
/// Stored as a single character; the `CHECK` constraint on
/// `book_instances.status` rejects anything outside these four codes.
/// Transitions are not policed: any code may replace any other.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(Some(1))")]
pub enum LoanStatus {
    #[default]
    #[sea_orm(string_value = "m")]
    #[serde(rename = "m")]
    Maintenance,
    #[sea_orm(string_value = "o")]
    #[serde(rename = "o")]
    OnLoan,
    #[sea_orm(string_value = "a")]
    #[serde(rename = "a")]
    Available,
    #[sea_orm(string_value = "r")]
    #[serde(rename = "r")]
    Reserved,
}

impl LoanStatus {
    /// Single-character storage code
    pub fn code(self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "m",
            LoanStatus::OnLoan => "o",
            LoanStatus::Available => "a",
            LoanStatus::Reserved => "r",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LoanStatus::Maintenance => "Maintenance",
            LoanStatus::OnLoan => "On loan",
            LoanStatus::Available => "Available",
            LoanStatus::Reserved => "Reserved",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One circulating copy of a book.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "book_instances")]
pub struct Model {
    /// Unique ID for this particular book across whole library
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub book_id: Option<i32>,
    pub imprint: String,
    pub due_back: Option<Date>,
    pub status: LoanStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::book::Entity",
        from = "Column::BookId",
        to = "super::book::Column::Id",
        on_update = "Cascade",
        on_delete = "NoAction"
    )]
    Book,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::Iterable;

    #[test]
    fn storage_codes_match_serde_codes() {
        for status in LoanStatus::iter() {
            assert_eq!(status.to_value(), status.code());
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.code()));
        }
        assert_eq!(LoanStatus::iter().count(), 4);
    }

    #[test]
    fn default_status_is_maintenance() {
        assert_eq!(LoanStatus::default(), LoanStatus::Maintenance);
        assert_eq!(LoanStatus::default().to_string(), "Maintenance");
    }

    #[test]
    fn status_serializes_as_code() {
        let json = serde_json::to_string(&LoanStatus::OnLoan).unwrap();
        assert_eq!(json, "\"o\"");
        let parsed: LoanStatus = serde_json::from_str("\"a\"").unwrap();
        assert_eq!(parsed, LoanStatus::Available);
    }
}

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{degree, department, load, position};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "teacher")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub department_id: i32,
    pub degree_id: i32,
    pub position_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Department,
    Degree,
    Position,
    Loads,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Department => Entity::belongs_to(department::Entity)
                .from(Column::DepartmentId)
                .to(department::Column::Id)
                .into(),
            Relation::Degree => Entity::belongs_to(degree::Entity)
                .from(Column::DegreeId)
                .to(degree::Column::Id)
                .into(),
            Relation::Position => Entity::belongs_to(position::Entity)
                .from(Column::PositionId)
                .to(position::Column::Id)
                .into(),
            Relation::Loads => load::Relation::Teacher.def().rev(),
        }
    }
}

impl Related<department::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Department.def()
    }
}

impl Related<degree::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Degree.def()
    }
}

impl Related<position::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Position.def()
    }
}

impl Related<load::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Loads.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Advisory check surfaced to callers, not a write-time constraint.
    pub fn is_first_name_valid(&self) -> bool {
        is_name_valid(&self.first_name)
    }

    pub fn is_last_name_valid(&self) -> bool {
        is_name_valid(&self.last_name)
    }
}

/// Non-empty, first letter uppercase, no embedded whitespace.
pub fn is_name_valid(name: &str) -> bool {
    match name.chars().next() {
        Some(first) if first.is_uppercase() => !name.chars().any(char::is_whitespace),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::is_name_valid;

    #[test]
    fn accepts_capitalized_name() {
        assert!(is_name_valid("John"));
        assert!(is_name_valid("Иван"));
    }

    #[test]
    fn rejects_lowercase_first_letter() {
        assert!(!is_name_valid("john"));
        assert!(!is_name_valid("doe"));
    }

    #[test]
    fn rejects_embedded_whitespace() {
        assert!(!is_name_valid("Jo hn"));
        assert!(!is_name_valid("John "));
    }

    #[test]
    fn rejects_empty() {
        assert!(!is_name_valid(""));
    }
}

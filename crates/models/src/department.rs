use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::teacher;

/// Prefixes a department name may start with under the university naming
/// convention. Advisory only; never enforced on write.
pub const NAME_PREFIXES: [&str; 2] = ["Department", "Кафедра"];

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "department")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub founded_date: Date,
    /// Head of department; references a teacher id, advisory (no FK).
    pub head_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Teachers,
    Head,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Teachers => teacher::Relation::Department.def().rev(),
            Relation::Head => Entity::belongs_to(teacher::Entity)
                .from(Column::HeadId)
                .to(teacher::Column::Id)
                .into(),
        }
    }
}

impl Related<teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teachers.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Name follows the "Department ..."/"Кафедра ..." convention.
    pub fn is_valid_name(&self) -> bool {
        is_valid_name(&self.name)
    }
}

pub fn is_valid_name(name: &str) -> bool {
    NAME_PREFIXES.iter().any(|p| name.starts_with(p))
}

#[cfg(test)]
mod tests {
    use super::is_valid_name;

    #[test]
    fn accepts_department_prefix() {
        assert!(is_valid_name("Department of Mathematics"));
    }

    #[test]
    fn accepts_cyrillic_prefix() {
        assert!(is_valid_name("Кафедра математики"));
    }

    #[test]
    fn rejects_other_prefixes() {
        assert!(!is_valid_name("New Dep"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("dept of History"));
    }
}

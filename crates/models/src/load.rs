use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{discipline, teacher};

/// A teaching assignment: one teacher teaches one discipline for N hours.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "load")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub teacher_id: i32,
    pub discipline_id: i32,
    pub hours: i32,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Teacher,
    Discipline,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Teacher => Entity::belongs_to(teacher::Entity)
                .from(Column::TeacherId)
                .to(teacher::Column::Id)
                .into(),
            Relation::Discipline => Entity::belongs_to(discipline::Entity)
                .from(Column::DisciplineId)
                .to(discipline::Column::Id)
                .into(),
        }
    }
}

impl Related<teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<discipline::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Discipline.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

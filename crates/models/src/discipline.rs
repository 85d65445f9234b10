use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::load;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "discipline")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Loads,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Loads => load::Relation::Discipline.def().rev(),
        }
    }
}

impl Related<load::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Loads.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

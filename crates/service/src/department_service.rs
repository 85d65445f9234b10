use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use serde::Serialize;

use models::{department, teacher};

use crate::errors::ServiceError;

/// Optional filters for the department listing, translated into a single
/// read below.
#[derive(Debug, Default, Clone)]
pub struct DepartmentQuery {
    /// Inclusive lower bound on the founding date.
    pub founded_after: Option<NaiveDate>,
    /// Keep departments with at least this many teachers.
    pub min_teacher_count: Option<u64>,
}

/// Read-model projection of a department with its teacher headcount.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentView {
    pub id: i32,
    pub name: String,
    pub founded_date: NaiveDate,
    pub head_id: Option<i32>,
    pub teacher_count: u64,
}

/// Create a department. The naming convention (`is_valid_name`) is advisory
/// and deliberately not enforced here.
pub async fn create_department(
    db: &DatabaseConnection,
    name: &str,
    founded_date: NaiveDate,
    head_id: Option<i32>,
) -> Result<department::Model, ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::Validation("department name required".into()));
    }
    let am = department::ActiveModel {
        name: Set(name.to_string()),
        founded_date: Set(founded_date),
        head_id: Set(head_id),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Full-field replace, including the head reference.
pub async fn update_department(
    db: &DatabaseConnection,
    id: i32,
    name: &str,
    founded_date: NaiveDate,
    head_id: Option<i32>,
) -> Result<department::Model, ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::Validation("department name required".into()));
    }
    let mut am: department::ActiveModel = department::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("department"))?
        .into();
    am.name = Set(name.to_string());
    am.founded_date = Set(founded_date);
    am.head_id = Set(head_id);
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Hard delete; false when the id is unknown.
pub async fn delete_department(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = department::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

pub async fn get_department(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<department::Model>, ServiceError> {
    department::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

/// List departments with optional founding-date and headcount filters.
pub async fn list_departments(
    db: &DatabaseConnection,
    query: &DepartmentQuery,
) -> Result<Vec<DepartmentView>, ServiceError> {
    let mut find = department::Entity::find();
    if let Some(after) = query.founded_after {
        find = find.filter(department::Column::FoundedDate.gte(after));
    }
    let rows = find
        .find_with_related(teacher::Entity)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;

    let min = query.min_teacher_count.unwrap_or(0);
    Ok(rows
        .into_iter()
        .filter(|(_, teachers)| teachers.len() as u64 >= min)
        .map(|(d, teachers)| DepartmentView {
            id: d.id,
            name: d.name,
            founded_date: d.founded_date,
            head_id: d.head_id,
            teacher_count: teachers.len() as u64,
        })
        .collect())
}

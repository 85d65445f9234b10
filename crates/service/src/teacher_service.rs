use std::collections::HashMap;

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QuerySelect, RelationTrait, Set,
};
use serde::Serialize;

use models::{degree, department, position, teacher};

use crate::errors::ServiceError;

/// Denormalized teacher projection with resolved display names.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeacherView {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub degree: String,
    pub position: String,
    pub department: String,
}

/// Create a teacher and return the denormalized view. The referenced rows
/// are resolved up front, so an unknown id reports NotFound instead of a
/// constraint failure. The capitalization predicates on the model stay
/// advisory; writes are not rejected.
pub async fn create_teacher(
    db: &DatabaseConnection,
    first_name: &str,
    last_name: &str,
    position_id: i32,
    degree_id: i32,
    department_id: i32,
) -> Result<TeacherView, ServiceError> {
    if first_name.trim().is_empty() || last_name.trim().is_empty() {
        return Err(ServiceError::Validation("teacher name required".into()));
    }
    let (deg, pos, dep) = resolve_refs(db, degree_id, position_id, department_id).await?;
    let am = teacher::ActiveModel {
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        position_id: Set(position_id),
        degree_id: Set(degree_id),
        department_id: Set(department_id),
        ..Default::default()
    };
    let created = am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(TeacherView {
        id: created.id,
        first_name: created.first_name,
        last_name: created.last_name,
        degree: deg.name,
        position: pos.name,
        department: dep.name,
    })
}

/// Full-field replace.
pub async fn update_teacher(
    db: &DatabaseConnection,
    id: i32,
    first_name: &str,
    last_name: &str,
    position_id: i32,
    degree_id: i32,
    department_id: i32,
) -> Result<TeacherView, ServiceError> {
    if first_name.trim().is_empty() || last_name.trim().is_empty() {
        return Err(ServiceError::Validation("teacher name required".into()));
    }
    let mut am: teacher::ActiveModel = teacher::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("teacher"))?
        .into();
    let (deg, pos, dep) = resolve_refs(db, degree_id, position_id, department_id).await?;
    am.first_name = Set(first_name.to_string());
    am.last_name = Set(last_name.to_string());
    am.position_id = Set(position_id);
    am.degree_id = Set(degree_id);
    am.department_id = Set(department_id);
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(TeacherView {
        id: updated.id,
        first_name: updated.first_name,
        last_name: updated.last_name,
        degree: deg.name,
        position: pos.name,
        department: dep.name,
    })
}

/// Hard delete; false when the id is unknown.
pub async fn delete_teacher(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = teacher::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

pub async fn get_teacher(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<TeacherView>, ServiceError> {
    let found = teacher::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    match found {
        Some(t) => Ok(Some(resolve_view(db, t).await?)),
        None => Ok(None),
    }
}

/// List teachers, optionally restricted to a department by exact name.
pub async fn list_teachers(
    db: &DatabaseConnection,
    department_name: Option<&str>,
) -> Result<Vec<TeacherView>, ServiceError> {
    let mut find = teacher::Entity::find();
    if let Some(name) = department_name {
        find = find
            .join(JoinType::InnerJoin, teacher::Relation::Department.def())
            .filter(department::Column::Name.eq(name));
    }
    let teachers = find.all(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;

    // The three lookup tables are small; resolve names through maps rather
    // than a join per row.
    let degrees = name_map(degree::Entity::find().all(db).await, |m: degree::Model| (m.id, m.name))?;
    let positions =
        name_map(position::Entity::find().all(db).await, |m: position::Model| (m.id, m.name))?;
    let departments = name_map(department::Entity::find().all(db).await, |m: department::Model| {
        (m.id, m.name)
    })?;

    Ok(teachers
        .into_iter()
        .map(|t| TeacherView {
            id: t.id,
            degree: degrees.get(&t.degree_id).cloned().unwrap_or_default(),
            position: positions.get(&t.position_id).cloned().unwrap_or_default(),
            department: departments.get(&t.department_id).cloned().unwrap_or_default(),
            first_name: t.first_name,
            last_name: t.last_name,
        })
        .collect())
}

fn name_map<M>(
    rows: Result<Vec<M>, sea_orm::DbErr>,
    key: impl Fn(M) -> (i32, String),
) -> Result<HashMap<i32, String>, ServiceError> {
    Ok(rows
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .into_iter()
        .map(key)
        .collect())
}

/// Point lookups for the three referenced rows; NotFound for any absent id.
async fn resolve_refs(
    db: &DatabaseConnection,
    degree_id: i32,
    position_id: i32,
    department_id: i32,
) -> Result<(degree::Model, position::Model, department::Model), ServiceError> {
    let deg = degree::Entity::find_by_id(degree_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("degree"))?;
    let pos = position::Entity::find_by_id(position_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("position"))?;
    let dep = department::Entity::find_by_id(department_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("department"))?;
    Ok((deg, pos, dep))
}

async fn resolve_view(
    db: &DatabaseConnection,
    t: teacher::Model,
) -> Result<TeacherView, ServiceError> {
    let (deg, pos, dep) = resolve_refs(db, t.degree_id, t.position_id, t.department_id).await?;
    Ok(TeacherView {
        id: t.id,
        first_name: t.first_name,
        last_name: t.last_name,
        degree: deg.name,
        position: pos.name,
        department: dep.name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed_department, seed_lookups, seed_teacher};

    #[tokio::test]
    async fn create_resolves_display_names() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (deg, pos) = seed_lookups(&db).await?;
        let dep = seed_department(&db, "Department A").await?;

        let view = create_teacher(&db, "John", "Doe", pos.id, deg.id, dep.id).await?;

        assert_eq!(view.first_name, "John");
        assert_eq!(view.last_name, "Doe");
        assert_eq!(view.degree, "PhD");
        assert_eq!(view.position, "Professor");
        assert_eq!(view.department, "Department A");
        Ok(())
    }

    #[tokio::test]
    async fn create_with_unknown_degree_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (_deg, pos) = seed_lookups(&db).await?;
        let dep = seed_department(&db, "Department A").await?;

        let err = create_teacher(&db, "John", "Doe", pos.id, 999, dep.id).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_all_fields() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (deg, pos) = seed_lookups(&db).await?;
        let dep = seed_department(&db, "Department A").await?;
        let t = seed_teacher(&db, "John", "Doe", dep.id, deg.id, pos.id).await?;

        let updated = update_teacher(&db, t.id, "Jane", "Doe", pos.id, deg.id, dep.id).await?;
        assert_eq!(updated.first_name, "Jane");
        assert_eq!(updated.last_name, "Doe");
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (deg, pos) = seed_lookups(&db).await?;
        let dep = seed_department(&db, "Department A").await?;

        let err = update_teacher(&db, 999, "Jane", "Doe", pos.id, deg.id, dep.id)
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn delete_then_lookup_is_gone() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (deg, pos) = seed_lookups(&db).await?;
        let dep = seed_department(&db, "Department A").await?;
        let t = seed_teacher(&db, "John", "Doe", dep.id, deg.id, pos.id).await?;

        assert!(delete_teacher(&db, t.id).await?);
        assert!(get_teacher(&db, t.id).await?.is_none());
        assert!(!delete_teacher(&db, t.id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn list_filters_by_department_name() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (deg, pos) = seed_lookups(&db).await?;
        let dep_a = seed_department(&db, "Department A").await?;
        let dep_b = seed_department(&db, "Department B").await?;
        seed_teacher(&db, "John", "Doe", dep_a.id, deg.id, pos.id).await?;
        seed_teacher(&db, "Jane", "Doe", dep_a.id, deg.id, pos.id).await?;
        seed_teacher(&db, "Bob", "Stone", dep_b.id, deg.id, pos.id).await?;

        let result = list_teachers(&db, Some("Department A")).await?;
        assert_eq!(result.len(), 2);
        assert!(result.iter().any(|t| t.first_name == "John" && t.last_name == "Doe"));
        assert!(result.iter().any(|t| t.first_name == "Jane" && t.last_name == "Doe"));

        let all = list_teachers(&db, None).await?;
        assert_eq!(all.len(), 3);
        Ok(())
    }
}

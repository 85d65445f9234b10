use std::collections::HashMap;

use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use serde::Serialize;

use models::{department, discipline, load, teacher};

use crate::errors::ServiceError;

/// Denormalized load projection: the assignment plus every display name a
/// listing needs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadView {
    pub id: i32,
    pub teacher_name: String,
    pub department_name: String,
    pub discipline_name: String,
    pub hours: i32,
}

/// Create a load linking a teacher to a discipline.
pub async fn create_load(
    db: &DatabaseConnection,
    teacher_id: i32,
    discipline_id: i32,
    hours: i32,
) -> Result<LoadView, ServiceError> {
    if hours < 0 {
        return Err(ServiceError::Validation("hours must be non-negative".into()));
    }
    // Resolve both ends before writing; their names feed the view anyway.
    let t = find_teacher(db, teacher_id).await?;
    let d = find_discipline(db, discipline_id).await?;

    let am = load::ActiveModel {
        teacher_id: Set(teacher_id),
        discipline_id: Set(discipline_id),
        hours: Set(hours),
        ..Default::default()
    };
    let created = am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    resolve_view(db, created, t, d).await
}

/// Replace teacher, discipline and hours. `NotFound` before any mutation
/// when the load id is unknown.
pub async fn update_load(
    db: &DatabaseConnection,
    id: i32,
    teacher_id: i32,
    discipline_id: i32,
    hours: i32,
) -> Result<LoadView, ServiceError> {
    if hours < 0 {
        return Err(ServiceError::Validation("hours must be non-negative".into()));
    }
    let mut am: load::ActiveModel = load::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("load"))?
        .into();
    let t = find_teacher(db, teacher_id).await?;
    let d = find_discipline(db, discipline_id).await?;
    am.teacher_id = Set(teacher_id);
    am.discipline_id = Set(discipline_id);
    am.hours = Set(hours);
    let updated = am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))?;
    resolve_view(db, updated, t, d).await
}

/// Hard delete; false when the id is unknown.
pub async fn delete_load(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = load::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

/// List loads, optionally restricted to teachers with the given first name.
pub async fn list_loads(
    db: &DatabaseConnection,
    teacher_first_name: Option<&str>,
) -> Result<Vec<LoadView>, ServiceError> {
    let rows = load::Entity::find()
        .find_also_related(teacher::Entity)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;

    let departments: HashMap<i32, String> = department::Entity::find()
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .into_iter()
        .map(|d| (d.id, d.name))
        .collect();
    let disciplines: HashMap<i32, String> = discipline::Entity::find()
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .into_iter()
        .map(|d| (d.id, d.name))
        .collect();

    let mut out = Vec::new();
    for (l, t) in rows {
        let Some(t) = t else { continue };
        if let Some(first) = teacher_first_name {
            if t.first_name != first {
                continue;
            }
        }
        out.push(LoadView {
            id: l.id,
            teacher_name: t.full_name(),
            department_name: departments.get(&t.department_id).cloned().unwrap_or_default(),
            discipline_name: disciplines.get(&l.discipline_id).cloned().unwrap_or_default(),
            hours: l.hours,
        });
    }
    Ok(out)
}

async fn find_teacher(db: &DatabaseConnection, id: i32) -> Result<teacher::Model, ServiceError> {
    load_one(teacher::Entity::find_by_id(id).one(db).await, "teacher")
}

async fn find_discipline(
    db: &DatabaseConnection,
    id: i32,
) -> Result<discipline::Model, ServiceError> {
    load_one(discipline::Entity::find_by_id(id).one(db).await, "discipline")
}

fn load_one<M>(row: Result<Option<M>, sea_orm::DbErr>, entity: &str) -> Result<M, ServiceError> {
    row.map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found(entity))
}

async fn resolve_view(
    db: &DatabaseConnection,
    l: load::Model,
    t: teacher::Model,
    d: discipline::Model,
) -> Result<LoadView, ServiceError> {
    let dep = department::Entity::find_by_id(t.department_id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("department"))?;
    Ok(LoadView {
        id: l.id,
        teacher_name: t.full_name(),
        department_name: dep.name,
        discipline_name: d.name,
        hours: l.hours,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discipline_service::create_discipline;
    use crate::test_support::{get_db, seed_department, seed_lookups, seed_teacher};

    #[tokio::test]
    async fn create_returns_denormalized_view() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (deg, pos) = seed_lookups(&db).await?;
        let dep = seed_department(&db, "Department A").await?;
        let t = seed_teacher(&db, "John", "Doe", dep.id, deg.id, pos.id).await?;
        let math = create_discipline(&db, "Mathematics").await?;

        let view = create_load(&db, t.id, math.id, 10).await?;

        assert_eq!(view.hours, 10);
        assert_eq!(view.teacher_name, "John Doe");
        assert_eq!(view.department_name, "Department A");
        assert_eq!(view.discipline_name, "Mathematics");
        Ok(())
    }

    #[tokio::test]
    async fn create_rejects_negative_hours_and_unknown_refs() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (deg, pos) = seed_lookups(&db).await?;
        let dep = seed_department(&db, "Department A").await?;
        let t = seed_teacher(&db, "John", "Doe", dep.id, deg.id, pos.id).await?;
        let math = create_discipline(&db, "Mathematics").await?;

        let err = create_load(&db, t.id, math.id, -1).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));

        let err = create_load(&db, 999, math.id, 5).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        let err = create_load(&db, t.id, 999, 5).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_hours() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (deg, pos) = seed_lookups(&db).await?;
        let dep = seed_department(&db, "Department A").await?;
        let t = seed_teacher(&db, "John", "Doe", dep.id, deg.id, pos.id).await?;
        let math = create_discipline(&db, "Mathematics").await?;
        let created = create_load(&db, t.id, math.id, 10).await?;

        let updated = update_load(&db, created.id, t.id, math.id, 20).await?;
        assert_eq!(updated.hours, 20);
        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_id_is_not_found_and_mutates_nothing() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (deg, pos) = seed_lookups(&db).await?;
        let dep = seed_department(&db, "Department A").await?;
        let t = seed_teacher(&db, "John", "Doe", dep.id, deg.id, pos.id).await?;
        let math = create_discipline(&db, "Mathematics").await?;
        let existing = create_load(&db, t.id, math.id, 10).await?;

        let err = update_load(&db, 999, t.id, math.id, 20).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));

        // the one stored row is untouched
        let rows = list_loads(&db, None).await?;
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, existing.id);
        assert_eq!(rows[0].hours, 10);
        Ok(())
    }

    #[tokio::test]
    async fn list_filters_by_teacher_first_name() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (deg, pos) = seed_lookups(&db).await?;
        let dep = seed_department(&db, "Department A").await?;
        let john = seed_teacher(&db, "John", "Doe", dep.id, deg.id, pos.id).await?;
        let jane = seed_teacher(&db, "Jane", "Doe", dep.id, deg.id, pos.id).await?;
        let math = create_discipline(&db, "Mathematics").await?;
        let physics = create_discipline(&db, "Physics").await?;
        create_load(&db, john.id, math.id, 10).await?;
        create_load(&db, jane.id, physics.id, 20).await?;

        let result = list_loads(&db, Some("John")).await?;
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].discipline_name, "Mathematics");
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_idempotent_boolean() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (deg, pos) = seed_lookups(&db).await?;
        let dep = seed_department(&db, "Department A").await?;
        let t = seed_teacher(&db, "John", "Doe", dep.id, deg.id, pos.id).await?;
        let math = create_discipline(&db, "Mathematics").await?;
        let created = create_load(&db, t.id, math.id, 10).await?;

        assert!(delete_load(&db, created.id).await?);
        assert!(!delete_load(&db, created.id).await?);
        assert!(list_loads(&db, None).await?.is_empty());
        Ok(())
    }
}

use std::collections::HashMap;

use sea_orm::{
    sea_query::{Alias, Expr},
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter,
    QuerySelect, RelationTrait, Set,
};
use serde::Serialize;

use models::{department, discipline, load, teacher};

use crate::errors::ServiceError;

/// Optional filters for the discipline listing. Name fragments are
/// case-sensitive substring matches against teachers on the discipline's
/// loads; the hour bounds are inclusive and apply to the summed hours.
#[derive(Debug, Default, Clone)]
pub struct DisciplineQuery {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub min_hours: Option<i32>,
    pub max_hours: Option<i32>,
}

/// Read-model projection of a discipline with its aggregated load graph.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisciplineSummary {
    pub id: i32,
    pub name: String,
    pub total_hours: i32,
    pub teachers: Vec<String>,
}

pub async fn create_discipline(
    db: &DatabaseConnection,
    name: &str,
) -> Result<discipline::Model, ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::Validation("discipline name required".into()));
    }
    let am = discipline::ActiveModel { name: Set(name.to_string()), ..Default::default() };
    am.insert(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

pub async fn update_discipline(
    db: &DatabaseConnection,
    id: i32,
    name: &str,
) -> Result<discipline::Model, ServiceError> {
    if name.trim().is_empty() {
        return Err(ServiceError::Validation("discipline name required".into()));
    }
    let mut am: discipline::ActiveModel = discipline::Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?
        .ok_or_else(|| ServiceError::not_found("discipline"))?
        .into();
    am.name = Set(name.to_string());
    am.update(db).await.map_err(|e| ServiceError::Db(e.to_string()))
}

/// Hard delete; false when the id is unknown.
pub async fn delete_discipline(db: &DatabaseConnection, id: i32) -> Result<bool, ServiceError> {
    let res = discipline::Entity::delete_by_id(id)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}

/// List disciplines with aggregated hours and de-duplicated teacher names,
/// filtered per `DisciplineQuery`.
pub async fn list_disciplines(
    db: &DatabaseConnection,
    query: &DisciplineQuery,
) -> Result<Vec<DisciplineSummary>, ServiceError> {
    let rows = discipline::Entity::find()
        .find_with_related(load::Entity)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;

    let teachers = teachers_by_id(
        db,
        rows.iter().flat_map(|(_, loads)| loads.iter().map(|l| l.teacher_id)).collect(),
    )
    .await?;

    let mut out = Vec::new();
    for (d, loads) in rows {
        let total: i32 = loads.iter().map(|l| l.hours).sum();
        let on_loads: Vec<&teacher::Model> =
            loads.iter().filter_map(|l| teachers.get(&l.teacher_id)).collect();

        if let Some(fragment) = query.first_name.as_deref() {
            if !on_loads.iter().any(|t| t.first_name.contains(fragment)) {
                continue;
            }
        }
        if let Some(fragment) = query.last_name.as_deref() {
            if !on_loads.iter().any(|t| t.last_name.contains(fragment)) {
                continue;
            }
        }
        if query.min_hours.is_some_and(|min| total < min) {
            continue;
        }
        if query.max_hours.is_some_and(|max| total > max) {
            continue;
        }

        // De-duplicate "First Last" strings preserving first occurrence.
        let mut names: Vec<String> = Vec::new();
        for t in &on_loads {
            let full = t.full_name();
            if !names.contains(&full) {
                names.push(full);
            }
        }
        out.push(DisciplineSummary { id: d.id, name: d.name, total_hours: total, teachers: names });
    }
    Ok(out)
}

/// Single discipline with the full load/teacher graph; the teacher list is
/// one entry per load, not de-duplicated.
pub async fn get_discipline(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<DisciplineSummary>, ServiceError> {
    let mut rows = discipline::Entity::find_by_id(id)
        .find_with_related(load::Entity)
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    let Some((d, loads)) = rows.pop() else {
        return Ok(None);
    };

    let teachers = teachers_by_id(db, loads.iter().map(|l| l.teacher_id).collect()).await?;
    let total: i32 = loads.iter().map(|l| l.hours).sum();
    let names = loads
        .iter()
        .filter_map(|l| teachers.get(&l.teacher_id))
        .map(|t| t.full_name())
        .collect();
    Ok(Some(DisciplineSummary { id: d.id, name: d.name, total_hours: total, teachers: names }))
}

/// Distinct names of disciplines taught in departments whose head has the
/// given last name. Single query: discipline -> load -> teacher ->
/// department, with teacher joined a second time under the `head` alias.
pub async fn disciplines_by_head_last_name(
    db: &DatabaseConnection,
    head_last_name: &str,
) -> Result<Vec<String>, ServiceError> {
    let head = Alias::new("head");
    discipline::Entity::find()
        .select_only()
        .column(discipline::Column::Name)
        .distinct()
        .join_rev(JoinType::InnerJoin, load::Relation::Discipline.def())
        .join(JoinType::InnerJoin, load::Relation::Teacher.def())
        .join(JoinType::InnerJoin, teacher::Relation::Department.def())
        .join_as(JoinType::InnerJoin, department::Relation::Head.def(), head.clone())
        .filter(Expr::col((head, teacher::Column::LastName)).eq(head_last_name))
        .into_tuple::<String>()
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))
}

async fn teachers_by_id(
    db: &DatabaseConnection,
    ids: Vec<i32>,
) -> Result<HashMap<i32, teacher::Model>, ServiceError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let rows = teacher::Entity::find()
        .filter(teacher::Column::Id.is_in(ids))
        .all(db)
        .await
        .map_err(|e| ServiceError::Db(e.to_string()))?;
    Ok(rows.into_iter().map(|t| (t.id, t)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, seed_department, seed_lookups, seed_teacher};

    async fn seed_load(
        db: &DatabaseConnection,
        teacher_id: i32,
        discipline_id: i32,
        hours: i32,
    ) -> Result<load::Model, anyhow::Error> {
        let l = load::ActiveModel {
            teacher_id: Set(teacher_id),
            discipline_id: Set(discipline_id),
            hours: Set(hours),
            ..Default::default()
        }
        .insert(db)
        .await?;
        Ok(l)
    }

    #[tokio::test]
    async fn create_then_get_roundtrips() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let created = create_discipline(&db, "New Discipline").await?;

        let found = get_discipline(&db, created.id).await?.unwrap();
        assert_eq!(found.name, "New Discipline");
        assert_eq!(found.total_hours, 0);
        assert!(found.teachers.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_name_and_missing_id_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let created = create_discipline(&db, "Old Discipline").await?;

        let updated = update_discipline(&db, created.id, "Updated Discipline").await?;
        assert_eq!(updated.name, "Updated Discipline");

        let err = update_discipline(&db, 999, "Whatever").await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn delete_is_idempotent_boolean() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let created = create_discipline(&db, "Doomed").await?;

        assert!(delete_discipline(&db, created.id).await?);
        assert!(get_discipline(&db, created.id).await?.is_none());
        assert!(!delete_discipline(&db, created.id).await?);
        Ok(())
    }

    #[tokio::test]
    async fn list_aggregates_hours_and_dedups_teachers() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (deg, pos) = seed_lookups(&db).await?;
        let dep = seed_department(&db, "Department A").await?;
        let john = seed_teacher(&db, "John", "Doe", dep.id, deg.id, pos.id).await?;
        let jane = seed_teacher(&db, "Jane", "Doe", dep.id, deg.id, pos.id).await?;
        let math = create_discipline(&db, "Mathematics").await?;

        // John appears on two loads of the same discipline
        seed_load(&db, john.id, math.id, 10).await?;
        seed_load(&db, john.id, math.id, 5).await?;
        seed_load(&db, jane.id, math.id, 20).await?;

        let result = list_disciplines(&db, &DisciplineQuery::default()).await?;
        assert_eq!(result.len(), 1);
        assert_eq!(result[0].total_hours, 35);
        assert_eq!(result[0].teachers, vec!["John Doe".to_string(), "Jane Doe".to_string()]);
        Ok(())
    }

    #[tokio::test]
    async fn list_filters_by_name_fragment_and_hour_bounds() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (deg, pos) = seed_lookups(&db).await?;
        let dep = seed_department(&db, "Department A").await?;
        let john = seed_teacher(&db, "John", "Doe", dep.id, deg.id, pos.id).await?;
        let jane = seed_teacher(&db, "Jane", "Stone", dep.id, deg.id, pos.id).await?;
        let math = create_discipline(&db, "Mathematics").await?;
        let physics = create_discipline(&db, "Physics").await?;
        seed_load(&db, john.id, math.id, 10).await?;
        seed_load(&db, jane.id, physics.id, 30).await?;

        // substring match on first name
        let query = DisciplineQuery { first_name: Some("Joh".into()), ..Default::default() };
        let by_first = list_disciplines(&db, &query).await?;
        assert_eq!(by_first.len(), 1);
        assert_eq!(by_first[0].name, "Mathematics");

        // case-sensitive: "joh" does not match "John"
        let query = DisciplineQuery { first_name: Some("joh".into()), ..Default::default() };
        assert!(list_disciplines(&db, &query).await?.is_empty());

        // inclusive hour bounds
        let query = DisciplineQuery { min_hours: Some(30), ..Default::default() };
        let heavy = list_disciplines(&db, &query).await?;
        assert_eq!(heavy.len(), 1);
        assert_eq!(heavy[0].name, "Physics");

        let query = DisciplineQuery { max_hours: Some(10), ..Default::default() };
        let light = list_disciplines(&db, &query).await?;
        assert_eq!(light.len(), 1);
        assert_eq!(light[0].name, "Mathematics");
        Ok(())
    }

    #[tokio::test]
    async fn head_last_name_join_returns_distinct_matches() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let (deg, pos) = seed_lookups(&db).await?;

        // Department A headed by Smith, department B headed by Jones.
        let dep_a = seed_department(&db, "Department A").await?;
        let dep_b = seed_department(&db, "Department B").await?;
        let smith = seed_teacher(&db, "Anna", "Smith", dep_a.id, deg.id, pos.id).await?;
        let jones = seed_teacher(&db, "Bill", "Jones", dep_b.id, deg.id, pos.id).await?;
        crate::department_service::update_department(
            &db,
            dep_a.id,
            "Department A",
            dep_a.founded_date,
            Some(smith.id),
        )
        .await?;
        crate::department_service::update_department(
            &db,
            dep_b.id,
            "Department B",
            dep_b.founded_date,
            Some(jones.id),
        )
        .await?;

        let worker_a = seed_teacher(&db, "Carl", "Adams", dep_a.id, deg.id, pos.id).await?;
        let math = create_discipline(&db, "Mathematics").await?;
        let physics = create_discipline(&db, "Physics").await?;
        let chemistry = create_discipline(&db, "Chemistry").await?;

        // Two disciplines taught under department A; one under B. Two loads
        // on Mathematics must still produce one distinct name.
        seed_load(&db, smith.id, math.id, 10).await?;
        seed_load(&db, worker_a.id, math.id, 6).await?;
        seed_load(&db, worker_a.id, physics.id, 8).await?;
        seed_load(&db, jones.id, chemistry.id, 12).await?;

        let mut names = disciplines_by_head_last_name(&db, "Smith").await?;
        names.sort();
        assert_eq!(names, vec!["Mathematics".to_string(), "Physics".to_string()]);

        let none = disciplines_by_head_last_name(&db, "Nobody").await?;
        assert!(none.is_empty());
        Ok(())
    }
}

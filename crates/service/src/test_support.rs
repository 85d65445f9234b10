#![cfg(test)]
use chrono::NaiveDate;
use migration::MigratorTrait;
use sea_orm::{ActiveModelTrait, ConnectOptions, Database, DatabaseConnection, Set};

use models::{degree, department, position, teacher};

/// Fresh in-memory database with the full schema migrated. The pool is
/// capped at one connection so every query sees the same in-memory store.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1);
    let db = Database::connect(opt).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub async fn seed_department(
    db: &DatabaseConnection,
    name: &str,
) -> Result<department::Model, anyhow::Error> {
    seed_department_founded(db, name, NaiveDate::from_ymd_opt(2000, 1, 1).unwrap()).await
}

pub async fn seed_department_founded(
    db: &DatabaseConnection,
    name: &str,
    founded: NaiveDate,
) -> Result<department::Model, anyhow::Error> {
    let dep = department::ActiveModel {
        name: Set(name.to_string()),
        founded_date: Set(founded),
        head_id: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(dep)
}

pub async fn seed_lookups(
    db: &DatabaseConnection,
) -> Result<(degree::Model, position::Model), anyhow::Error> {
    let deg = degree::ActiveModel { name: Set("PhD".into()), ..Default::default() }
        .insert(db)
        .await?;
    let pos = position::ActiveModel { name: Set("Professor".into()), ..Default::default() }
        .insert(db)
        .await?;
    Ok((deg, pos))
}

pub async fn seed_teacher(
    db: &DatabaseConnection,
    first: &str,
    last: &str,
    department_id: i32,
    degree_id: i32,
    position_id: i32,
) -> Result<teacher::Model, anyhow::Error> {
    let t = teacher::ActiveModel {
        first_name: Set(first.to_string()),
        last_name: Set(last.to_string()),
        department_id: Set(department_id),
        degree_id: Set(degree_id),
        position_id: Set(position_id),
        ..Default::default()
    }
    .insert(db)
    .await?;
    Ok(t)
}

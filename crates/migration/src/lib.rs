//! Migrator registering entity-specific migrations in dependency order.
//! Lookup tables first, then the entities referencing them; indexes last.
pub use sea_orm_migration::prelude::*;

mod m20240901_000001_create_degree;
mod m20240901_000002_create_position;
mod m20240901_000003_create_department;
mod m20240901_000004_create_teacher;
mod m20240901_000005_create_discipline;
mod m20240901_000006_create_load;
mod m20240901_000007_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240901_000001_create_degree::Migration),
            Box::new(m20240901_000002_create_position::Migration),
            Box::new(m20240901_000003_create_department::Migration),
            Box::new(m20240901_000004_create_teacher::Migration),
            Box::new(m20240901_000005_create_discipline::Migration),
            Box::new(m20240901_000006_create_load::Migration),
            // Indexes should always be applied last
            Box::new(m20240901_000007_add_indexes::Migration),
        ]
    }
}

//! Create `department` table.
//!
//! `head_id` points at a teacher but carries no foreign key: the
//! department/teacher reference cycle would otherwise block inserts, and
//! the head constraint is advisory data integrity, not schema-enforced.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Department::Table)
                    .if_not_exists()
                    .col(pk_auto(Department::Id))
                    .col(string_len(Department::Name, 255).not_null())
                    .col(date(Department::FoundedDate).not_null())
                    .col(integer_null(Department::HeadId))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Department::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Department { Table, Id, Name, FoundedDate, HeadId }

//! Create `discipline` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Discipline::Table)
                    .if_not_exists()
                    .col(pk_auto(Discipline::Id))
                    .col(string_len(Discipline::Name, 255).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Discipline::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Discipline { Table, Id, Name }

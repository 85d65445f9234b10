//! Create `degree` lookup table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Degree::Table)
                    .if_not_exists()
                    .col(pk_auto(Degree::Id))
                    .col(string_len(Degree::Name, 128).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Degree::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Degree { Table, Id, Name }

//! Create `load` table linking a teacher to a discipline with an hours count.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Load::Table)
                    .if_not_exists()
                    .col(pk_auto(Load::Id))
                    .col(integer(Load::TeacherId).not_null())
                    .col(integer(Load::DisciplineId).not_null())
                    .col(integer(Load::Hours).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_load_teacher")
                            .from(Load::Table, Load::TeacherId)
                            .to(Teacher::Table, Teacher::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_load_discipline")
                            .from(Load::Table, Load::DisciplineId)
                            .to(Discipline::Table, Discipline::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Load::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Load { Table, Id, TeacherId, DisciplineId, Hours }

#[derive(DeriveIden)]
enum Teacher { Table, Id }

#[derive(DeriveIden)]
enum Discipline { Table, Id }

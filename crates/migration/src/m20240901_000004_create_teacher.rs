//! Create `teacher` table with FKs to `department`, `degree`, `position`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Teacher::Table)
                    .if_not_exists()
                    .col(pk_auto(Teacher::Id))
                    .col(string_len(Teacher::FirstName, 128).not_null())
                    .col(string_len(Teacher::LastName, 128).not_null())
                    .col(integer(Teacher::DepartmentId).not_null())
                    .col(integer(Teacher::DegreeId).not_null())
                    .col(integer(Teacher::PositionId).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teacher_department")
                            .from(Teacher::Table, Teacher::DepartmentId)
                            .to(Department::Table, Department::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teacher_degree")
                            .from(Teacher::Table, Teacher::DegreeId)
                            .to(Degree::Table, Degree::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teacher_position")
                            .from(Teacher::Table, Teacher::PositionId)
                            .to(Position::Table, Position::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Teacher::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Teacher { Table, Id, FirstName, LastName, DepartmentId, DegreeId, PositionId }

#[derive(DeriveIden)]
enum Department { Table, Id }

#[derive(DeriveIden)]
enum Degree { Table, Id }

#[derive(DeriveIden)]
enum Position { Table, Id }

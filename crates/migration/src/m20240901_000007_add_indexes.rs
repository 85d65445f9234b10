use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Teacher: index on department_id
        manager
            .create_index(
                Index::create()
                    .name("idx_teacher_department")
                    .table(Teacher::Table)
                    .col(Teacher::DepartmentId)
                    .to_owned(),
            )
            .await?;

        // Load: index on teacher_id and discipline_id
        manager
            .create_index(
                Index::create()
                    .name("idx_load_teacher")
                    .table(Load::Table)
                    .col(Load::TeacherId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_load_discipline")
                    .table(Load::Table)
                    .col(Load::DisciplineId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_load_discipline").table(Load::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_load_teacher").table(Load::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_teacher_department").table(Teacher::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Teacher { Table, DepartmentId }

#[derive(DeriveIden)]
enum Load { Table, TeacherId, DisciplineId }

use sea_orm_migration::sea_query::extension::postgres::Type;
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_type(
                Type::create()
                    .as_enum(TaskStatus::Enum)
                    .values([
                        TaskStatus::Open,
                        TaskStatus::InProgress,
                        TaskStatus::UatTest,
                        TaskStatus::Complete,
                    ])
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Tasks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Tasks::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(string(Tasks::TaskSubject))
                    .col(text(Tasks::TaskDetail).default(""))
                    .col(
                        ColumnDef::new(Tasks::TaskStatus)
                            .enumeration(
                                TaskStatus::Enum,
                                [
                                    TaskStatus::Open,
                                    TaskStatus::InProgress,
                                    TaskStatus::UatTest,
                                    TaskStatus::Complete,
                                ],
                            )
                            .not_null()
                            .default("OPEN"),
                    )
                    .col(date(Tasks::AssignedDate))
                    .col(big_integer_null(Tasks::ProjectId))
                    .col(big_integer_null(Tasks::AssignedEmployeeId))
                    .col(boolean(Tasks::IsDeleted).default(false))
                    .col(
                        timestamp_with_time_zone(Tasks::CreatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        timestamp_with_time_zone(Tasks::UpdatedAt)
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_project_id")
                            .from(Tasks::Table, Tasks::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_tasks_assigned_employee_id")
                            .from(Tasks::Table, Tasks::AssignedEmployeeId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_project_id")
                    .table(Tasks::Table)
                    .col(Tasks::ProjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_tasks_assigned_employee_status")
                    .table(Tasks::Table)
                    .col(Tasks::AssignedEmployeeId)
                    .col(Tasks::TaskStatus)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Tasks::Table).to_owned())
            .await?;

        manager
            .drop_type(Type::drop().name(TaskStatus::Enum).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Tasks {
    Table,
    Id,
    TaskSubject,
    TaskDetail,
    TaskStatus,
    AssignedDate,
    ProjectId,
    AssignedEmployeeId,
    IsDeleted,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Projects {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[derive(DeriveIden)]
enum TaskStatus {
    #[sea_orm(iden = "task_status")]
    Enum,
    #[sea_orm(iden = "OPEN")]
    Open,
    #[sea_orm(iden = "IN_PROGRESS")]
    InProgress,
    #[sea_orm(iden = "UAT_TEST")]
    UatTest,
    #[sea_orm(iden = "COMPLETE")]
    Complete,
}

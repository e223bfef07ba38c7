use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CallRecords::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CallRecords::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(CallRecords::ProjectId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CallRecords::CpNumber)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(CallRecords::Payload).json().not_null())
                    .col(
                        ColumnDef::new(CallRecords::ReceivedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_call_records_project_id")
                            .from(CallRecords::Table, CallRecords::ProjectId)
                            .to(Projects::Table, Projects::Id)
                            .on_update(ForeignKeyAction::Cascade)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_call_records_project_id")
                    .table(CallRecords::Table)
                    .col(CallRecords::ProjectId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CallRecords::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CallRecords {
    Table,
    Id,
    ProjectId,
    CpNumber,
    Payload,
    ReceivedAt,
}

#[derive(DeriveIden)]
enum Projects {
    #[sea_orm(iden = "projects")]
    Table,
    Id,
}

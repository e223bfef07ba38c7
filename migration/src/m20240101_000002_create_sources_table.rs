use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 sources 表 - 项目的第三方数据源
        manager
            .create_table(
                Table::create()
                    .table(Sources::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Sources::Id)
                            .string_len(10)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Sources::SourceType).string_len(8).not_null())
                    .col(ColumnDef::new(Sources::Name).string_len(200).not_null())
                    .col(ColumnDef::new(Sources::ProjectId).string_len(32).not_null())
                    .col(ColumnDef::new(Sources::Config).json().not_null())
                    .col(
                        ColumnDef::new(Sources::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_sources_project_id")
                            .from(Sources::Table, Sources::ProjectId)
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
                    .name("idx_sources_project_id")
                    .table(Sources::Table)
                    .col(Sources::ProjectId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sources_source_type")
                    .table(Sources::Table)
                    .col(Sources::SourceType)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Sources::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Sources {
    Table,
    Id,
    SourceType,
    Name,
    ProjectId,
    Config,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Projects {
    #[sea_orm(iden = "projects")]
    Table,
    Id,
}

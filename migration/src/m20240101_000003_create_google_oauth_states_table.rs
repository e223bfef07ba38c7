use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建 google_oauth_states 表 - 授权跳转前的一次性关联记录
        manager
            .create_table(
                Table::create()
                    .table(GoogleOAuthStates::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(GoogleOAuthStates::Id)
                            .string_len(5)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(GoogleOAuthStates::ProjectId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GoogleOAuthStates::CustomerId)
                            .string_len(32)
                            .not_null(),
                    )
                    .col(ColumnDef::new(GoogleOAuthStates::ManagerId).string_len(32))
                    .col(
                        ColumnDef::new(GoogleOAuthStates::SourceName)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(GoogleOAuthStates::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_google_oauth_states_created_at")
                    .table(GoogleOAuthStates::Table)
                    .col(GoogleOAuthStates::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GoogleOAuthStates::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum GoogleOAuthStates {
    #[sea_orm(iden = "google_oauth_states")]
    Table,
    Id,
    ProjectId,
    CustomerId,
    ManagerId,
    SourceName,
    CreatedAt,
}

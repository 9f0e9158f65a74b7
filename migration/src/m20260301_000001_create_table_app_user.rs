use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AppUser::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AppUser::UserId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(AppUser::Username).string_len(150).not_null())
                    .col(ColumnDef::new(AppUser::Password).string().not_null())
                    .col(
                        ColumnDef::new(AppUser::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(AppUser::LastLogin).timestamp().null())
                    .col(ColumnDef::new(AppUser::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(AppUser::UpdatedAt).timestamp().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_app_user_username")
                    .table(AppUser::Table)
                    .col(AppUser::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Logged-out session tokens, checked by the session gate until they expire
        manager
            .create_table(
                Table::create()
                    .table(RevokedSession::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(RevokedSession::RevokedSessionId)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(RevokedSession::Jti).string_len(64).not_null())
                    .col(ColumnDef::new(RevokedSession::UserId).integer().not_null())
                    .col(ColumnDef::new(RevokedSession::ExpiresAt).timestamp().not_null())
                    .col(ColumnDef::new(RevokedSession::RevokedAt).timestamp().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_revoked_session_user")
                            .from(RevokedSession::Table, RevokedSession::UserId)
                            .to(AppUser::Table, AppUser::UserId)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("uq_revoked_session_jti")
                    .table(RevokedSession::Table)
                    .col(RevokedSession::Jti)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_revoked_session_expires_at")
                    .table(RevokedSession::Table)
                    .col(RevokedSession::ExpiresAt)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(RevokedSession::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(AppUser::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum AppUser {
    Table,
    UserId,
    Username,
    Password,
    IsActive,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum RevokedSession {
    Table,
    RevokedSessionId,
    Jti,
    UserId,
    ExpiresAt,
    RevokedAt,
}

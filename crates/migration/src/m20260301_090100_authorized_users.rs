//! Creates the `authorized_users` allow-list.
//!
//! `email` is intentionally not unique.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AuthorizedUsers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(AuthorizedUsers::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(AuthorizedUsers::Email)
                            .string_len(100)
                            .not_null(),
                    )
                    .col(ColumnDef::new(AuthorizedUsers::Name).string_len(100))
                    .col(
                        ColumnDef::new(AuthorizedUsers::IsAdmin)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(AuthorizedUsers::Table).to_owned())
            .await
    }
}

/// Learn more at https://docs.rs/sea-query#iden
#[derive(Iden)]
enum AuthorizedUsers {
    Table,
    Id,
    Email,
    Name,
    IsAdmin,
}

//! Creates the `expenses` table.
//!
//! Money columns are scaled integers: `amount_minor` holds cents and
//! `your_percentage_bp` holds basis points (hundredths of a percent).

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Expenses::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Expenses::Description)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Expenses::Date)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Expenses::AmountMinor)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Expenses::PaidBy).string().not_null())
                    .col(ColumnDef::new(Expenses::SplitType).string().not_null())
                    .col(ColumnDef::new(Expenses::YourPercentageBp).big_integer())
                    .col(
                        ColumnDef::new(Expenses::Currency)
                            .string_len(3)
                            .not_null()
                            .default("USD"),
                    )
                    .col(ColumnDef::new(Expenses::Category).string_len(100))
                    .col(ColumnDef::new(Expenses::Notes).text())
                    .col(
                        ColumnDef::new(Expenses::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Expenses::UpdatedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Expenses::CreatedBy)
                            .string_len(100)
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Expenses {
    Table,
    Id,
    Description,
    Date,
    AmountMinor,
    PaidBy,
    SplitType,
    YourPercentageBp,
    Currency,
    Category,
    Notes,
    CreatedAt,
    UpdatedAt,
    CreatedBy,
}

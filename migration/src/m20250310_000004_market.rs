use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Market::Table)
                    .col(pk_auto(Market::Id))
                    .col(string_uniq(Market::Name))
                    .col(string(Market::Region))
                    .col(string(Market::RegulatoryBody))
                    .col(text(Market::Requirements))
                    .col(string(Market::Status))
                    .col(timestamp(Market::CreatedAt))
                    .col(timestamp(Market::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Market {
    Table,
    Id,
    Name,
    Region,
    RegulatoryBody,
    Requirements,
    Status,
    CreatedAt,
    UpdatedAt,
}

use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20250310_000001_project::Project, m20250310_000003_version::Version,
    m20250310_000004_market::Market,
};

static IDX_LICENSE_PROJECT_ID: &str = "idx-license-project_id";
static IDX_LICENSE_MARKET_ID: &str = "idx-license-market_id";
static IDX_LICENSE_VERSION_ID: &str = "idx-license-version_id";
static FK_LICENSE_PROJECT_ID: &str = "fk-license-project_id";
static FK_LICENSE_MARKET_ID: &str = "fk-license-market_id";
static FK_LICENSE_VERSION_ID: &str = "fk-license-version_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(License::Table)
                    .col(pk_auto(License::Id))
                    .col(integer(License::ProjectId))
                    .col(integer(License::MarketId))
                    .col(integer(License::VersionId))
                    .col(string(License::LicenseNumber))
                    .col(string(License::Status))
                    .col(date_null(License::IssuedDate))
                    .col(date_null(License::ExpiryDate))
                    .col(text(License::Notes))
                    .col(timestamp(License::CreatedAt))
                    .col(timestamp(License::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_LICENSE_PROJECT_ID)
                            .from(License::Table, License::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_LICENSE_MARKET_ID)
                            .from(License::Table, License::MarketId)
                            .to(Market::Table, Market::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_LICENSE_VERSION_ID)
                            .from(License::Table, License::VersionId)
                            .to(Version::Table, Version::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        for (name, column) in [
            (IDX_LICENSE_PROJECT_ID, License::ProjectId),
            (IDX_LICENSE_MARKET_ID, License::MarketId),
            (IDX_LICENSE_VERSION_ID, License::VersionId),
        ] {
            manager
                .create_index(
                    Index::create()
                        .name(name)
                        .table(License::Table)
                        .col(column)
                        .to_owned(),
                )
                .await?;
        }

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum License {
    Table,
    Id,
    ProjectId,
    MarketId,
    VersionId,
    LicenseNumber,
    Status,
    IssuedDate,
    ExpiryDate,
    Notes,
    CreatedAt,
    UpdatedAt,
}

use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250310_000002_device::Device;

static IDX_VERSION_DEVICE_ID_VERSION_NUMBER: &str = "idx-version-device_id-version_number";
static IDX_VERSION_BASE_VERSION_ID: &str = "idx-version-base_version_id";
static FK_VERSION_DEVICE_ID: &str = "fk-version-device_id";
static FK_VERSION_BASE_VERSION_ID: &str = "fk-version-base_version_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Version::Table)
                    .col(pk_auto(Version::Id))
                    .col(integer(Version::DeviceId))
                    .col(string(Version::VersionNumber))
                    .col(string(Version::Kind))
                    .col(integer_null(Version::BaseVersionId))
                    .col(date_null(Version::ReleaseDate))
                    .col(text(Version::Changes))
                    .col(string(Version::Status))
                    .col(timestamp(Version::CreatedAt))
                    .col(timestamp(Version::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_VERSION_DEVICE_ID)
                            .from(Version::Table, Version::DeviceId)
                            .to(Device::Table, Device::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_VERSION_BASE_VERSION_ID)
                            .from(Version::Table, Version::BaseVersionId)
                            .to(Version::Table, Version::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Version numbers are unique per device, the sequencer relies on it to detect collisions.
        manager
            .create_index(
                Index::create()
                    .name(IDX_VERSION_DEVICE_ID_VERSION_NUMBER)
                    .table(Version::Table)
                    .col(Version::DeviceId)
                    .col(Version::VersionNumber)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_VERSION_BASE_VERSION_ID)
                    .table(Version::Table)
                    .col(Version::BaseVersionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Version {
    Table,
    Id,
    DeviceId,
    VersionNumber,
    Kind,
    BaseVersionId,
    ReleaseDate,
    Changes,
    Status,
    CreatedAt,
    UpdatedAt,
}

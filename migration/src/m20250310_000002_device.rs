use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250310_000001_project::Project;

static IDX_DEVICE_PROJECT_ID: &str = "idx-device-project_id";
static FK_DEVICE_PROJECT_ID: &str = "fk-device-project_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Device::Table)
                    .col(pk_auto(Device::Id))
                    .col(integer(Device::ProjectId))
                    .col(string(Device::Name))
                    .col(string(Device::Type))
                    .col(text(Device::Specifications))
                    .col(string(Device::Status))
                    .col(timestamp(Device::CreatedAt))
                    .col(timestamp(Device::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name(FK_DEVICE_PROJECT_ID)
                            .from(Device::Table, Device::ProjectId)
                            .to(Project::Table, Project::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DEVICE_PROJECT_ID)
                    .table(Device::Table)
                    .col(Device::ProjectId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Device {
    Table,
    Id,
    ProjectId,
    Name,
    Type,
    Specifications,
    Status,
    CreatedAt,
    UpdatedAt,
}

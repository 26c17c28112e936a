use sea_orm_migration::{prelude::*, schema::*};

static IDX_NOTIFICATION_READ: &str = "idx-notification-read";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notification::Table)
                    .col(pk_auto(Notification::Id))
                    .col(string(Notification::Title))
                    .col(text(Notification::Message))
                    .col(string(Notification::Kind))
                    .col(boolean(Notification::Read))
                    .col(timestamp(Notification::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_NOTIFICATION_READ)
                    .table(Notification::Table)
                    .col(Notification::Read)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Notification {
    Table,
    Id,
    Title,
    Message,
    Kind,
    Read,
    CreatedAt,
}

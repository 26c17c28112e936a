use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    DeleteResult, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::model::{
    db::NotificationModel,
    notification::{NewNotification, DEFAULT_NOTIFICATION_KIND},
};

pub struct NotificationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> NotificationRepository<'a, C> {
    /// Creates a new instance of [`NotificationRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an unread notification
    pub async fn create(&self, notification: NewNotification) -> Result<NotificationModel, DbErr> {
        let notification = entity::notification::ActiveModel {
            title: ActiveValue::Set(notification.title),
            message: ActiveValue::Set(notification.message),
            kind: ActiveValue::Set(
                notification
                    .kind
                    .unwrap_or_else(|| DEFAULT_NOTIFICATION_KIND.to_string()),
            ),
            read: ActiveValue::Set(false),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        notification.insert(self.db).await
    }

    /// Newest first
    pub async fn list(&self, limit: u64, offset: u64) -> Result<Vec<NotificationModel>, DbErr> {
        entity::prelude::Notification::find()
            .order_by_desc(entity::notification::Column::CreatedAt)
            .order_by_desc(entity::notification::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(self.db)
            .await
    }

    pub async fn list_unread(&self) -> Result<Vec<NotificationModel>, DbErr> {
        entity::prelude::Notification::find()
            .filter(entity::notification::Column::Read.eq(false))
            .order_by_desc(entity::notification::Column::CreatedAt)
            .order_by_desc(entity::notification::Column::Id)
            .all(self.db)
            .await
    }

    /// Returns `false` if the notification does not exist
    pub async fn mark_read(&self, notification_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::Notification::update_many()
            .col_expr(entity::notification::Column::Read, Expr::value(true))
            .filter(entity::notification::Column::Id.eq(notification_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }

    /// Returns the number of notifications that were unread
    pub async fn mark_all_read(&self) -> Result<u64, DbErr> {
        let result = entity::prelude::Notification::update_many()
            .col_expr(entity::notification::Column::Read, Expr::value(true))
            .filter(entity::notification::Column::Read.eq(false))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }

    pub async fn count(&self) -> Result<u64, DbErr> {
        entity::prelude::Notification::find().count(self.db).await
    }

    pub async fn delete(&self, notification_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Notification::delete_by_id(notification_id)
            .exec(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use authentcare_test_utils::prelude::*;

    use crate::{data::notification::NotificationRepository, model::notification::NewNotification};

    async fn setup() -> Result<TestContext, TestError> {
        TestBuilder::new()
            .with_table(entity::prelude::Notification)
            .build()
            .await
    }

    /// Expect new notifications to be unread with the default kind
    #[tokio::test]
    async fn creates_unread_notification() -> Result<(), TestError> {
        let test = setup().await?;

        let notification_repository = NotificationRepository::new(&test.db);
        let notification = notification_repository
            .create(NewNotification {
                title: "Renewal due".to_string(),
                message: "FDA license expires soon".to_string(),
                kind: None,
            })
            .await?;

        assert!(!notification.read);
        assert_eq!(notification.kind, "info");

        Ok(())
    }

    /// Expect read notifications to drop out of the unread list
    #[tokio::test]
    async fn mark_read_hides_from_unread() -> Result<(), TestError> {
        let test = setup().await?;
        let notification_repository = NotificationRepository::new(&test.db);
        let first = notification_repository
            .create(NewNotification {
                title: "First".to_string(),
                ..Default::default()
            })
            .await?;
        notification_repository
            .create(NewNotification {
                title: "Second".to_string(),
                ..Default::default()
            })
            .await?;

        assert!(notification_repository.mark_read(first.id).await?);
        assert!(!notification_repository.mark_read(first.id + 100).await?);
        let unread = notification_repository.list_unread().await?;

        assert_eq!(unread.len(), 1);
        assert_eq!(unread[0].title, "Second");
        assert_eq!(notification_repository.mark_all_read().await?, 1);
        assert!(notification_repository.list_unread().await?.is_empty());
        assert_eq!(notification_repository.list(10, 0).await?.len(), 2);

        Ok(())
    }
}

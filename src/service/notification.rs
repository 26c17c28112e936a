use sea_orm::DatabaseConnection;

use crate::{
    data::notification::NotificationRepository,
    error::{validation::required, Error, PersistenceContext},
    model::{db::NotificationModel, notification::NewNotification},
};

pub struct NotificationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> NotificationService<'a> {
    /// Creates a new instance of [`NotificationService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, notification: NewNotification) -> Result<NotificationModel, Error> {
        let title = required("title", &notification.title)?;

        NotificationRepository::new(self.db)
            .create(NewNotification {
                title,
                ..notification
            })
            .await
            .during("create notification")
    }

    /// Newest first
    pub async fn list(&self, limit: u64, offset: u64) -> Result<Vec<NotificationModel>, Error> {
        NotificationRepository::new(self.db)
            .list(limit, offset)
            .await
            .during("list notifications")
    }

    pub async fn list_unread(&self) -> Result<Vec<NotificationModel>, Error> {
        NotificationRepository::new(self.db)
            .list_unread()
            .await
            .during("list unread notifications")
    }

    /// Returns `Ok(false)` if no notification with this ID exists.
    pub async fn mark_read(&self, notification_id: i32) -> Result<bool, Error> {
        NotificationRepository::new(self.db)
            .mark_read(notification_id)
            .await
            .during(format!("mark notification {} read", notification_id))
    }

    /// Returns how many notifications were unread
    pub async fn mark_all_read(&self) -> Result<u64, Error> {
        NotificationRepository::new(self.db)
            .mark_all_read()
            .await
            .during("mark all notifications read")
    }

    /// Returns `Ok(false)` if no notification with this ID exists.
    pub async fn delete(&self, notification_id: i32) -> Result<bool, Error> {
        let result = NotificationRepository::new(self.db)
            .delete(notification_id)
            .await
            .during(format!("delete notification {}", notification_id))?;

        Ok(result.rows_affected > 0)
    }
}

use authentcare::model::notification::NewNotification;

use crate::memory_context;

/// Expect the welcome notice and new notifications to be marked read together
#[tokio::test]
async fn marks_all_read() {
    let ctx = memory_context().await;
    ctx.notifications()
        .create(NewNotification {
            title: "License expiring".to_string(),
            message: "EMA certificate expires in 30 days".to_string(),
            kind: Some("warning".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(ctx.notifications().list_unread().await.unwrap().len(), 2);
    assert_eq!(ctx.notifications().mark_all_read().await.unwrap(), 2);
    assert!(ctx.notifications().list_unread().await.unwrap().is_empty());
    assert_eq!(ctx.notifications().list(100, 0).await.unwrap().len(), 2);
}

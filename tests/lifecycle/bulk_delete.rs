use authentcare::{
    error::Error,
    model::{device::NewDevice, project::NewProject, version::NewVersion},
};

use crate::{memory_context, BULK_DELETE_SECRET};

/// Expect the configured secret to authorize deletion through the context
#[tokio::test]
async fn deletes_with_configured_secret() {
    let ctx = memory_context().await;
    let project = ctx
        .projects()
        .create(NewProject {
            name: "Infusion Pump".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    let device = ctx
        .devices()
        .create(NewDevice {
            project_id: project.id,
            name: "IP-200".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    let v1 = ctx
        .versions()
        .create(NewVersion::new_version(device.id))
        .await
        .unwrap();
    let v2 = ctx
        .versions()
        .create(NewVersion::new_version(device.id))
        .await
        .unwrap();

    let refused = ctx
        .bulk_guard()
        .delete_versions(&[v1.id, v2.id], "guess")
        .await;
    assert!(matches!(refused, Err(Error::AuthorizationError(_))));
    assert!(ctx.versions().get(v1.id).await.unwrap().is_some());

    let report = ctx
        .bulk_guard()
        .delete_versions(&[v1.id, v2.id, v2.id + 1], BULK_DELETE_SECRET)
        .await
        .unwrap();

    assert_eq!(report.requested, 3);
    assert_eq!(report.deleted, 2);
    assert_eq!(report.failed.len(), 1);
    assert_eq!(report.failed[0].reason, "not found");
}

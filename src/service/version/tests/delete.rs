use sea_orm::{EntityTrait, PaginatorTrait};

use super::*;

/// Expect renewals based on the version and all their licenses to be removed
#[tokio::test]
async fn deletes_renewals_and_licenses() -> Result<(), TestError> {
    let test = TestBuilder::new().with_schema().build().await?;
    let market = test.hierarchy().insert_market("FDA").await?;
    let (project, device, v1) = test.hierarchy().insert_device_with_version("Pump").await?;
    let v2 = test.hierarchy().insert_new_version(device.id, "v2").await?;
    let renewal = test.hierarchy().insert_renewal(device.id, "R-v1-1", v1.id).await?;
    test.hierarchy().insert_license(project.id, market.id, renewal.id).await?;
    let kept = test.hierarchy().insert_license(project.id, market.id, v2.id).await?;
    let locks = DeviceLocks::new();

    let service = VersionService::new(&test.db, &locks);
    let deleted = service.delete(v1.id).await.unwrap();

    assert!(deleted);
    assert!(service.get(renewal.id).await.unwrap().is_none());
    assert!(service.get(v2.id).await.unwrap().is_some());
    assert_eq!(entity::prelude::License::find().count(&test.db).await?, 1);
    assert!(entity::prelude::License::find_by_id(kept.id)
        .one(&test.db)
        .await?
        .is_some());

    Ok(())
}

/// Expect false when the version does not exist
#[tokio::test]
async fn returns_false_for_nonexistent_version() -> Result<(), TestError> {
    let test = TestBuilder::new().with_schema().build().await?;
    let locks = DeviceLocks::new();

    let service = VersionService::new(&test.db, &locks);

    assert!(!service.delete(3).await.unwrap());

    Ok(())
}

/// Expect a deleted highest renewal's sequence to be handed out again
#[tokio::test]
async fn sequence_of_deleted_renewal_is_reused() -> Result<(), TestError> {
    let test = TestBuilder::new().with_schema().build().await?;
    let (_, device, v1) = test.hierarchy().insert_device_with_version("Pump").await?;
    test.hierarchy().insert_renewal(device.id, "R-v1-1", v1.id).await?;
    let second = test.hierarchy().insert_renewal(device.id, "R-v1-2", v1.id).await?;
    let locks = DeviceLocks::new();

    let service = VersionService::new(&test.db, &locks);
    service.delete(second.id).await.unwrap();
    let next = service
        .next_version_number(device.id, VersionKind::Renewal, Some(v1.id))
        .await
        .unwrap();

    assert_eq!(next, "R-v1-2");

    Ok(())
}

use authentcare::model::{
    device::NewDevice,
    license::NewLicense,
    list::ListOptions,
    market::NewMarket,
    project::{NewProject, ProjectPatch},
    version::NewVersion,
};
use entity::version::VersionKind;
use sea_orm::{EntityTrait, PaginatorTrait};

use crate::memory_context;

/// Expect a full project hierarchy to be built through the context and removed by one delete
#[tokio::test]
async fn builds_and_deletes_hierarchy() {
    let ctx = memory_context().await;

    let project = ctx
        .projects()
        .create(NewProject {
            name: "Infusion Pump".to_string(),
            description: "Ambulatory infusion pump".to_string(),
        })
        .await
        .unwrap();
    let device = ctx
        .devices()
        .create(NewDevice {
            project_id: project.id,
            name: "IP-200".to_string(),
            device_type: "Class IIb".to_string(),
            specifications: String::new(),
        })
        .await
        .unwrap();

    let v1 = ctx
        .versions()
        .create(NewVersion::new_version(device.id))
        .await
        .unwrap();
    let v2 = ctx
        .sequencer()
        .create_version(NewVersion::new_version(device.id))
        .await
        .unwrap();
    let renewal = ctx
        .versions()
        .create(NewVersion::renewal(device.id, v1.id))
        .await
        .unwrap();
    assert_eq!(
        (v1.version_number.as_str(), v2.version_number.as_str(), renewal.version_number.as_str()),
        ("v1", "v2", "R-v1-1")
    );

    let market = ctx
        .markets()
        .search("Food and Drug")
        .await
        .unwrap()
        .pop()
        .unwrap();
    let license = ctx
        .licenses()
        .create(NewLicense {
            project_id: project.id,
            market_id: market.id,
            version_id: renewal.id,
            license_number: "K123456".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(
        ctx.licenses().list_by_project(project.id, None).await.unwrap(),
        vec![license]
    );
    assert_eq!(
        ctx.versions()
            .list_by_device(device.id, &ListOptions::default())
            .await
            .unwrap()
            .len(),
        3
    );

    assert!(ctx.projects().delete(project.id).await.unwrap());

    assert_eq!(entity::prelude::Device::find().count(&ctx.db).await.unwrap(), 0);
    assert_eq!(entity::prelude::Version::find().count(&ctx.db).await.unwrap(), 0);
    assert_eq!(entity::prelude::License::find().count(&ctx.db).await.unwrap(), 0);
    assert!(ctx.markets().get(market.id).await.unwrap().is_some());
}

/// Expect soft deletion to hide a project from default listings and searches only
#[tokio::test]
async fn soft_deleted_project_is_hidden() {
    let ctx = memory_context().await;
    let project = ctx
        .projects()
        .create(NewProject {
            name: "Glucose Monitor".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    ctx.projects()
        .update(
            project.id,
            ProjectPatch {
                status: Some(entity::STATUS_INACTIVE.to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert!(ctx.projects().list(&ListOptions::default()).await.unwrap().is_empty());
    assert!(ctx.projects().search("Glucose").await.unwrap().is_empty());
    assert_eq!(
        ctx.projects().list(&ListOptions::any_status()).await.unwrap().len(),
        1
    );
}

/// Expect the seeded markets to enforce case-insensitive names
#[tokio::test]
async fn seeded_market_names_are_reserved() {
    let ctx = memory_context().await;

    let result = ctx
        .markets()
        .create(NewMarket {
            name: "ema".to_string(),
            ..Default::default()
        })
        .await;

    assert!(result.is_err());
}

/// Expect the preview to match what creation assigns
#[tokio::test]
async fn preview_matches_created_number() {
    let ctx = memory_context().await;
    let project = ctx
        .projects()
        .create(NewProject {
            name: "Ventilator".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    let device = ctx
        .devices()
        .create(NewDevice {
            project_id: project.id,
            name: "VT-1".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    let preview = ctx
        .versions()
        .next_version_number(device.id, VersionKind::NewVersion, None)
        .await
        .unwrap();
    let created = ctx
        .versions()
        .create(NewVersion::new_version(device.id))
        .await
        .unwrap();

    assert_eq!(preview, created.version_number);
}

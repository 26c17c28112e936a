use authentcare::{
    error::Error,
    model::list::ListOptions,
    seed::DEFAULT_MARKETS,
    startup::{connect_to_database, initialize},
};
use migration::{ledger::schema_migration, MigrationError, Migrator};
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};

use super::TempDatabase;
use crate::test_config;

/// Expect a fresh database to be migrated and seeded
#[tokio::test]
async fn prepares_fresh_database() {
    let config = test_config("sqlite::memory:");
    let db = connect_to_database(&config).await.unwrap();

    let ctx = initialize(db, &config).await.unwrap();
    let markets = ctx.markets().list(&ListOptions::default()).await.unwrap();
    let ledger = schema_migration::Entity::find().count(&ctx.db).await.unwrap();
    let unread = ctx.notifications().list_unread().await.unwrap();

    assert_eq!(markets.len(), DEFAULT_MARKETS.len());
    assert_eq!(ledger as usize, Migrator::migrations().len());
    assert_eq!(unread.len(), 1);
}

/// Expect a second launch on the same file to apply and seed nothing
#[tokio::test]
async fn second_launch_changes_nothing() {
    let database = TempDatabase::new("second-launch");
    let config = test_config(database.url());

    let db = connect_to_database(&config).await.unwrap();
    let ctx = initialize(db, &config).await.unwrap();
    let project = ctx
        .projects()
        .create(authentcare::model::project::NewProject {
            name: "Infusion Pump".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();
    ctx.db.close().await.unwrap();

    let db = connect_to_database(&config).await.unwrap();
    let ctx = initialize(db, &config).await.unwrap();
    let report = Migrator::run(&ctx.db).await.unwrap();

    assert!(report.applied.is_empty());
    assert_eq!(report.skipped, Migrator::migrations().len());
    assert_eq!(
        entity::prelude::Market::find().count(&ctx.db).await.unwrap() as usize,
        DEFAULT_MARKETS.len()
    );
    assert_eq!(
        entity::prelude::Notification::find()
            .count(&ctx.db)
            .await
            .unwrap(),
        1
    );
    assert!(ctx.projects().get(project.id).await.unwrap().is_some());
}

/// Expect a unit that cannot be applied to stop startup and leave earlier units recorded
#[tokio::test]
async fn fails_when_a_unit_cannot_be_applied() {
    let config = test_config("sqlite::memory:");
    let db = connect_to_database(&config).await.unwrap();
    // A stray table without the columns the device unit indexes
    db.execute_unprepared("CREATE TABLE device (id INTEGER PRIMARY KEY)")
        .await
        .unwrap();

    let result = initialize(db.clone(), &config).await;
    let recorded: Vec<String> = schema_migration::Entity::find()
        .all(&db)
        .await
        .unwrap()
        .into_iter()
        .map(|row| row.id)
        .collect();

    match &result {
        Err(Error::MigrationError(MigrationError::UnitFailed { id, .. })) => {
            assert_eq!(id, "m20250310_000002_device");
        }
        Err(other) => panic!("expected migration failure, got {}", other),
        Ok(_) => panic!("expected migration failure"),
    }
    assert!(result
        .err()
        .unwrap()
        .to_string()
        .starts_with("The database schema could not be updated"));
    assert_eq!(recorded, vec!["m20250310_000001_project".to_string()]);
}

/// Expect a retry after the cause is removed to apply only the remaining units
#[tokio::test]
async fn retry_after_failure_completes() {
    let config = test_config("sqlite::memory:");
    let db = connect_to_database(&config).await.unwrap();
    db.execute_unprepared("CREATE TABLE device (id INTEGER PRIMARY KEY)")
        .await
        .unwrap();
    assert!(initialize(db.clone(), &config).await.is_err());

    db.execute_unprepared("DROP TABLE device").await.unwrap();
    let report = Migrator::run(&db).await.unwrap();

    assert_eq!(report.skipped, 1);
    assert_eq!(report.applied.len(), Migrator::migrations().len() - 1);
    assert_eq!(report.applied[0], "m20250310_000002_device");
}

//! Schema migration catalog, ledger and runner.
//!
//! Units are written against SeaORM's [`MigrationTrait`] and named after their module file,
//! so identifiers sort in application order. They are applied by [`MigrationRunner`], which
//! records each unit in the [`MigrationLedger`] inside the same transaction as its statements.

pub use sea_orm_migration::prelude::*;

pub mod error;
pub mod ledger;
pub mod runner;

mod m20250310_000001_project;
mod m20250310_000002_device;
mod m20250310_000003_version;
mod m20250310_000004_market;
mod m20250310_000005_license;
mod m20250310_000006_notification;

pub use error::MigrationError;
pub use ledger::MigrationLedger;
pub use runner::{MigrationReport, MigrationRunner};

use sea_orm::DatabaseConnection;

pub struct Migrator;

impl Migrator {
    /// The ordered catalog of schema units shipped with the application.
    pub fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250310_000001_project::Migration),
            Box::new(m20250310_000002_device::Migration),
            Box::new(m20250310_000003_version::Migration),
            Box::new(m20250310_000004_market::Migration),
            Box::new(m20250310_000005_license::Migration),
            Box::new(m20250310_000006_notification::Migration),
        ]
    }

    /// Apply every pending unit of the shipped catalog.
    pub async fn run(db: &DatabaseConnection) -> Result<MigrationReport, MigrationError> {
        MigrationRunner::new(db, Self::migrations()).run().await
    }
}

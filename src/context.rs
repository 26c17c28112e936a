use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{
    service::{
        bulk_delete::BulkGuard, device::DeviceService, license::LicenseService,
        market::MarketService, notification::NotificationService, project::ProjectService,
        version::{sequencer::VersionSequencer, VersionService},
    },
    util::lock::DeviceLocks,
};

/// Everything an operation needs, built once by the entry point and passed to callers.
///
/// Clones share the database pool, the bulk deletion secret and the per-device sequencing
/// locks.
#[derive(Clone)]
pub struct AppContext {
    pub db: DatabaseConnection,
    bulk_delete_secret: Arc<str>,
    locks: DeviceLocks,
}

impl AppContext {
    /// Wraps a connection whose schema is already up to date
    ///
    /// Use [`startup::initialize`](crate::startup::initialize) to migrate and seed first.
    pub fn new(db: DatabaseConnection, bulk_delete_secret: impl Into<String>) -> Self {
        Self {
            db,
            bulk_delete_secret: Arc::from(bulk_delete_secret.into()),
            locks: DeviceLocks::new(),
        }
    }

    pub fn projects(&self) -> ProjectService<'_> {
        ProjectService::new(&self.db)
    }

    pub fn devices(&self) -> DeviceService<'_> {
        DeviceService::new(&self.db)
    }

    pub fn versions(&self) -> VersionService<'_> {
        VersionService::new(&self.db, &self.locks)
    }

    pub fn sequencer(&self) -> VersionSequencer<'_> {
        VersionSequencer::new(&self.db, &self.locks)
    }

    pub fn markets(&self) -> MarketService<'_> {
        MarketService::new(&self.db)
    }

    pub fn licenses(&self) -> LicenseService<'_> {
        LicenseService::new(&self.db)
    }

    pub fn notifications(&self) -> NotificationService<'_> {
        NotificationService::new(&self.db)
    }

    pub fn bulk_guard(&self) -> BulkGuard<'_> {
        BulkGuard::new(&self.db, &self.locks, &self.bulk_delete_secret)
    }
}

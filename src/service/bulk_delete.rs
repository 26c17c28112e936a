//! Guarded bulk deletion of versions.
//!
//! Deleting many versions at once requires a confirmation secret that matches the configured
//! one. A mismatch is refused before anything is touched. Otherwise every requested ID goes
//! through the single-version delete path and the outcome of each is reported.

use dioxus_logger::tracing;
use sea_orm::DatabaseConnection;
use subtle::ConstantTimeEq;

use crate::{
    error::{authorization::AuthorizationError, Error},
    model::bulk_delete::{BulkDeleteFailure, BulkDeleteReport},
    service::version::VersionService,
    util::lock::DeviceLocks,
};

/// Reason reported for a requested ID with no matching version
pub const NOT_FOUND_REASON: &str = "not found";

pub struct BulkGuard<'a> {
    db: &'a DatabaseConnection,
    locks: &'a DeviceLocks,
    secret: &'a str,
}

impl<'a> BulkGuard<'a> {
    /// Creates a new instance of [`BulkGuard`] expecting `secret` as confirmation
    pub fn new(db: &'a DatabaseConnection, locks: &'a DeviceLocks, secret: &'a str) -> Self {
        Self { db, locks, secret }
    }

    /// Deletes each version in `version_ids` in order
    ///
    /// Each deletion commits on its own, a failure on one ID does not undo earlier ones.
    /// Duplicate IDs are processed as given, so the repeat reports "not found".
    ///
    /// # Arguments
    /// - `version_ids` - Versions to delete, renewals based on them go too
    /// - `secret` - Confirmation secret, compared in constant time
    ///
    /// # Returns
    /// - `Ok(BulkDeleteReport)` - Per-ID outcome, `deleted + failed.len() == requested`
    /// - `Err(Error::AuthorizationError)` - Secret mismatch, no row was deleted
    pub async fn delete_versions(
        &self,
        version_ids: &[i32],
        secret: &str,
    ) -> Result<BulkDeleteReport, Error> {
        let authorized: bool = self.secret.as_bytes().ct_eq(secret.as_bytes()).into();
        if !authorized {
            tracing::warn!(
                "Refused bulk deletion of {} version(s): confirmation secret did not match",
                version_ids.len()
            );

            return Err(AuthorizationError::SecretMismatch {
                requested: version_ids.len(),
            }
            .into());
        }

        let version_service = VersionService::new(self.db, self.locks);
        let mut report = BulkDeleteReport {
            requested: version_ids.len(),
            ..Default::default()
        };

        for &version_id in version_ids {
            match version_service.delete(version_id).await {
                Ok(true) => report.deleted += 1,
                Ok(false) => report.failed.push(BulkDeleteFailure {
                    id: version_id,
                    reason: NOT_FOUND_REASON.to_string(),
                }),
                Err(e) => {
                    tracing::warn!("Failed to delete version {}: {}", version_id, e);

                    report.failed.push(BulkDeleteFailure {
                        id: version_id,
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            requested = report.requested,
            deleted = report.deleted,
            failed = report.failed.len(),
            "Bulk version deletion finished"
        );

        Ok(report)
    }
}

//! Version number assignment.
//!
//! New versions of a device are numbered `v1`, `v2`, ... and renewals of `vB` are numbered
//! `R-vB-1`, `R-vB-2`, ... Numbers are derived from the rows currently stored, never from a
//! persisted counter: the next number is one past the highest parseable number on the device.
//! Every scan runs inside a transaction while holding the device's lock from [`DeviceLocks`], so
//! a scan and the insert that depends on it cannot interleave with another assignment on the same
//! device.

use dioxus_logger::tracing;
use entity::version::VersionKind;
use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};

use crate::{
    data::{device::DeviceRepository, version::VersionRepository},
    error::{
        validation::{active_parent, ValidationError},
        Error, PersistenceContext,
    },
    model::{db::VersionModel, version::NewVersion},
    util::{
        lock::DeviceLocks,
        version_identifier::{RenewalFormat, VersionIdentifier},
    },
};

pub struct VersionSequencer<'a> {
    db: &'a DatabaseConnection,
    locks: &'a DeviceLocks,
}

impl<'a> VersionSequencer<'a> {
    /// Creates a new instance of [`VersionSequencer`]
    pub fn new(db: &'a DatabaseConnection, locks: &'a DeviceLocks) -> Self {
        Self { db, locks }
    }

    /// Computes the number the next version of `kind` on `device_id` would receive
    ///
    /// Legacy renewal identifiers found while scanning are rewritten to the current spelling and
    /// the rewrite is committed even though nothing else is inserted.
    ///
    /// # Arguments
    /// - `device_id` - Device the version belongs to, must exist and be active
    /// - `kind` - New version or renewal
    /// - `base_version_id` - Required for renewals, a `v<N>` new version of the same device;
    ///   must be `None` for new versions
    ///
    /// # Returns
    /// - `Ok(String)` - `v<N>` or `R-v<B>-<S>`
    /// - `Err(Error::ValidationError)` - Unknown device or unusable base version, nothing written
    /// - `Err(Error::PersistenceError)` - Storage failure, including a failed legacy rewrite;
    ///   the transaction is rolled back
    pub async fn next_version_number(
        &self,
        device_id: i32,
        kind: VersionKind,
        base_version_id: Option<i32>,
    ) -> Result<String, Error> {
        let _guard = self.locks.acquire(device_id).await;
        let txn = self.db.begin().await.during("begin version sequencing")?;

        let version_number = assign(&txn, device_id, kind, base_version_id).await?;

        txn.commit().await.during("commit version sequencing")?;

        Ok(version_number)
    }

    /// Creates a version under the next free number, in the same transaction as the scan
    pub async fn create_version(&self, version: NewVersion) -> Result<VersionModel, Error> {
        let _guard = self.locks.acquire(version.device_id).await;
        let txn = self.db.begin().await.during("begin version creation")?;

        let version_number = assign(
            &txn,
            version.device_id,
            version.kind,
            version.base_version_id,
        )
        .await?;
        let version = VersionRepository::new(&txn)
            .create(version_number, version)
            .await
            .during("create version")?;

        txn.commit().await.during("commit version creation")?;

        tracing::info!(
            device_id = %version.device_id,
            "Created version {} ({})",
            version.version_number,
            version.id
        );

        Ok(version)
    }
}

async fn assign<C: ConnectionTrait>(
    db: &C,
    device_id: i32,
    kind: VersionKind,
    base_version_id: Option<i32>,
) -> Result<String, Error> {
    let device = DeviceRepository::new(db)
        .get(device_id)
        .await
        .during("look up device for version sequencing")?;
    active_parent("device_id", "device", device_id, device, |d| {
        d.status.as_str()
    })?;

    match kind {
        VersionKind::NewVersion => {
            if base_version_id.is_some() {
                return Err(ValidationError::Invalid {
                    field: "base_version_id",
                    reason: "a new version cannot be based on another version".to_string(),
                }
                .into());
            }

            next_new_version(db, device_id).await
        }
        VersionKind::Renewal => {
            let base_version_id = base_version_id.ok_or(ValidationError::MissingField {
                field: "base_version_id",
            })?;
            let base = resolve_base(db, device_id, base_version_id).await?;

            next_renewal(db, device_id, base).await
        }
    }
}

async fn next_new_version<C: ConnectionTrait>(db: &C, device_id: i32) -> Result<String, Error> {
    let versions = VersionRepository::new(db)
        .list_by_device_and_kind(device_id, VersionKind::NewVersion)
        .await
        .during("load new versions of device")?;

    let highest = versions
        .iter()
        .filter_map(|version| VersionIdentifier::parse(&version.version_number))
        .filter_map(|identifier| identifier.new_version_number())
        .max()
        .unwrap_or(0);

    let next = highest
        .checked_add(1)
        .ok_or_else(|| ValidationError::Invalid {
            field: "version_number",
            reason: format!("no version number follows v{}", highest),
        })?;

    Ok(VersionIdentifier::NewVersion(next).to_string())
}

/// Returns the `B` of the `v<B>` base version a renewal is requested for
async fn resolve_base<C: ConnectionTrait>(
    db: &C,
    device_id: i32,
    base_version_id: i32,
) -> Result<u32, Error> {
    let base = VersionRepository::new(db)
        .get(base_version_id)
        .await
        .during("look up base version")?
        .ok_or(ValidationError::UnknownReference {
            field: "base_version_id",
            entity: "version",
            id: base_version_id,
        })?;

    let invalid = |reason: String| ValidationError::Invalid {
        field: "base_version_id",
        reason,
    };

    if base.device_id != device_id {
        return Err(invalid(format!(
            "version {} belongs to device {}, not device {}",
            base.id, base.device_id, device_id
        ))
        .into());
    }
    if base.kind != VersionKind::NewVersion {
        return Err(invalid(format!(
            "version {} is a renewal, renewals must be based on a new version",
            base.id
        ))
        .into());
    }

    VersionIdentifier::parse(&base.version_number)
        .and_then(|identifier| identifier.new_version_number())
        .ok_or_else(|| {
            invalid(format!(
                "version number '{}' is not of the form v<N>",
                base.version_number
            ))
            .into()
        })
}

/// Scans the renewals of `v<base>`, rewriting legacy identifiers, and returns the next one
async fn next_renewal<C: ConnectionTrait>(
    db: &C,
    device_id: i32,
    base: u32,
) -> Result<String, Error> {
    let version_repository = VersionRepository::new(db);
    let renewals = version_repository
        .list_by_device_and_kind(device_id, VersionKind::Renewal)
        .await
        .during("load renewals of device")?;

    let mut highest: u32 = 0;
    for renewal in renewals {
        let Some(VersionIdentifier::Renewal {
            base: renewal_base,
            sequence,
            format,
        }) = VersionIdentifier::parse(&renewal.version_number)
        else {
            continue;
        };
        if renewal_base != base {
            continue;
        }

        if format == RenewalFormat::Legacy {
            let current = VersionIdentifier::renewal(base, sequence).to_string();
            version_repository
                .set_version_number(renewal.id, &current)
                .await
                .during(format!(
                    "rewrite legacy renewal {} as {}",
                    renewal.version_number, current
                ))?;

            tracing::info!(
                device_id = %device_id,
                "Rewrote legacy renewal {} as {}",
                renewal.version_number,
                current
            );
        }

        highest = highest.max(sequence);
    }

    let next = highest
        .checked_add(1)
        .ok_or_else(|| ValidationError::Invalid {
            field: "version_number",
            reason: format!("no renewal follows R-v{}-{}", base, highest),
        })?;

    Ok(VersionIdentifier::renewal(base, next).to_string())
}

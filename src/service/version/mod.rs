pub mod sequencer;

#[cfg(test)]
mod tests;

use dioxus_logger::tracing;
use entity::version::VersionKind;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    data::{license::LicenseRepository, version::VersionRepository},
    error::{
        validation::{required_if_present, ValidationError},
        Error, PersistenceContext,
    },
    model::{
        db::VersionModel,
        list::ListOptions,
        version::{NewVersion, VersionPatch},
    },
    service::version::sequencer::VersionSequencer,
    util::{lock::DeviceLocks, version_identifier::VersionIdentifier},
};

pub struct VersionService<'a> {
    db: &'a DatabaseConnection,
    locks: &'a DeviceLocks,
}

impl<'a> VersionService<'a> {
    /// Creates a new instance of [`VersionService`]
    pub fn new(db: &'a DatabaseConnection, locks: &'a DeviceLocks) -> Self {
        Self { db, locks }
    }

    /// Creates a version, its number is always assigned by [`VersionSequencer`]
    pub async fn create(&self, version: NewVersion) -> Result<VersionModel, Error> {
        VersionSequencer::new(self.db, self.locks)
            .create_version(version)
            .await
    }

    /// See [`VersionSequencer::next_version_number`]
    pub async fn next_version_number(
        &self,
        device_id: i32,
        kind: VersionKind,
        base_version_id: Option<i32>,
    ) -> Result<String, Error> {
        VersionSequencer::new(self.db, self.locks)
            .next_version_number(device_id, kind, base_version_id)
            .await
    }

    pub async fn get(&self, version_id: i32) -> Result<Option<VersionModel>, Error> {
        VersionRepository::new(self.db)
            .get(version_id)
            .await
            .during(format!("get version {}", version_id))
    }

    pub async fn list(&self, options: &ListOptions) -> Result<Vec<VersionModel>, Error> {
        VersionRepository::new(self.db)
            .list(None, options)
            .await
            .during("list versions")
    }

    pub async fn list_by_device(
        &self,
        device_id: i32,
        options: &ListOptions,
    ) -> Result<Vec<VersionModel>, Error> {
        VersionRepository::new(self.db)
            .list(Some(device_id), options)
            .await
            .during(format!("list versions of device {}", device_id))
    }

    /// Applies a patch, a new version number must still be unique on the device
    ///
    /// Renames hold the device's sequencing lock so they cannot race a number assignment.
    /// Returns `Ok(None)` if the version does not exist.
    pub async fn update(
        &self,
        version_id: i32,
        patch: VersionPatch,
    ) -> Result<Option<VersionModel>, Error> {
        let patch = VersionPatch {
            version_number: required_if_present("version_number", patch.version_number)?,
            status: required_if_present("status", patch.status)?,
            ..patch
        };

        let version_repository = VersionRepository::new(self.db);
        let version = match version_repository
            .get(version_id)
            .await
            .during(format!("get version {}", version_id))?
        {
            Some(version) => version,
            None => return Ok(None),
        };

        let _guard = self.locks.acquire(version.device_id).await;
        if let Some(version_number) = &patch.version_number {
            self.check_rename(&version, version_number).await?;
        }

        version_repository
            .update(version_id, patch)
            .await
            .during(format!("update version {}", version_id))
    }

    /// Rejects a new number the sequencer would later compute for another row of the device
    ///
    /// A number in `v<N>` or `R-v<B>-<S>` form must match the row's kind, a renewal number must
    /// name the renewal's own base, and no other row may hold the same number in either spelling.
    async fn check_rename(
        &self,
        version: &VersionModel,
        version_number: &str,
    ) -> Result<(), Error> {
        let version_repository = VersionRepository::new(self.db);
        let invalid = |reason: String| -> Error {
            ValidationError::Invalid {
                field: "version_number",
                reason,
            }
            .into()
        };

        let identifier = VersionIdentifier::parse(version_number);
        match (version.kind, identifier) {
            (VersionKind::NewVersion, Some(VersionIdentifier::Renewal { .. })) => {
                return Err(invalid(format!(
                    "'{}' is a renewal number, version {} is a new version",
                    version_number, version.id
                )));
            }
            (VersionKind::Renewal, Some(VersionIdentifier::NewVersion(_))) => {
                return Err(invalid(format!(
                    "'{}' is a new version number, version {} is a renewal",
                    version_number, version.id
                )));
            }
            (VersionKind::Renewal, Some(VersionIdentifier::Renewal { base, .. })) => {
                let base_number = match version.base_version_id {
                    Some(base_version_id) => version_repository
                        .get(base_version_id)
                        .await
                        .during("look up base version")?
                        .and_then(|base| VersionIdentifier::parse(&base.version_number))
                        .and_then(|identifier| identifier.new_version_number()),
                    None => None,
                };
                if base_number.is_some_and(|base_number| base_number != base) {
                    return Err(invalid(format!(
                        "'{}' names base v{}, version {} renews another version",
                        version_number, base, version.id
                    )));
                }
            }
            _ => {}
        }

        let taken = match identifier {
            Some(identifier) => {
                let canonical = identifier.to_string();
                version_repository
                    .list_by_device_and_kind(version.device_id, version.kind)
                    .await
                    .during("load versions of device")?
                    .iter()
                    .filter(|other| other.id != version.id)
                    .any(|other| {
                        other.version_number == version_number
                            || VersionIdentifier::parse(&other.version_number)
                                .is_some_and(|other| other.to_string() == canonical)
                    })
            }
            None => false,
        };
        let taken = taken
            || version_repository
                .find_by_number(version.device_id, version_number)
                .await
                .during("look up version by number")?
                .is_some_and(|existing| existing.id != version.id);

        if taken {
            return Err(ValidationError::Duplicate {
                field: "version_number",
                value: version_number.to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Deletes a version, the renewals based on it and the licenses of both, in one transaction
    ///
    /// Returns `Ok(false)` if no version with this ID exists.
    pub async fn delete(&self, version_id: i32) -> Result<bool, Error> {
        let txn = self.db.begin().await.during("begin version deletion")?;

        let version_repository = VersionRepository::new(&txn);
        let mut version_ids = version_repository
            .renewal_ids(version_id)
            .await
            .during("load renewals of version")?;
        let renewals = version_ids.len();
        version_ids.push(version_id);

        LicenseRepository::new(&txn)
            .delete_by_versions(version_ids.clone())
            .await
            .during("delete licenses of version")?;
        let deleted = version_repository
            .delete_many(version_ids)
            .await
            .during(format!("delete version {}", version_id))?;

        txn.commit().await.during("commit version deletion")?;

        if deleted > 0 {
            tracing::debug!(
                "Deleted version {} with {} renewal(s) based on it",
                version_id,
                renewals
            );
        }

        Ok(deleted > 0)
    }
}

use dioxus_logger::tracing;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    data::{
        device::DeviceRepository, license::LicenseRepository, project::ProjectRepository,
        version::VersionRepository,
    },
    error::{
        validation::{active_parent, required, required_if_present},
        Error, PersistenceContext,
    },
    model::{
        db::DeviceModel,
        device::{DevicePatch, NewDevice},
        list::ListOptions,
    },
};

pub struct DeviceService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> DeviceService<'a> {
    /// Creates a new instance of [`DeviceService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an active device under an active project
    pub async fn create(&self, device: NewDevice) -> Result<DeviceModel, Error> {
        let name = required("name", &device.name)?;

        let project = ProjectRepository::new(self.db)
            .get(device.project_id)
            .await
            .during("look up project of device")?;
        active_parent("project_id", "project", device.project_id, project, |p| {
            p.status.as_str()
        })?;

        let device = DeviceRepository::new(self.db)
            .create(NewDevice { name, ..device })
            .await
            .during("create device")?;

        tracing::debug!(
            "Created device {} ({}) in project {}",
            device.name,
            device.id,
            device.project_id
        );

        Ok(device)
    }

    pub async fn get(&self, device_id: i32) -> Result<Option<DeviceModel>, Error> {
        DeviceRepository::new(self.db)
            .get(device_id)
            .await
            .during(format!("get device {}", device_id))
    }

    pub async fn list(&self, options: &ListOptions) -> Result<Vec<DeviceModel>, Error> {
        DeviceRepository::new(self.db)
            .list(None, options)
            .await
            .during("list devices")
    }

    pub async fn list_by_project(
        &self,
        project_id: i32,
        options: &ListOptions,
    ) -> Result<Vec<DeviceModel>, Error> {
        DeviceRepository::new(self.db)
            .list(Some(project_id), options)
            .await
            .during(format!("list devices of project {}", project_id))
    }

    /// Returns `Ok(None)` if the device does not exist.
    pub async fn update(
        &self,
        device_id: i32,
        patch: DevicePatch,
    ) -> Result<Option<DeviceModel>, Error> {
        let patch = DevicePatch {
            name: required_if_present("name", patch.name)?,
            status: required_if_present("status", patch.status)?,
            ..patch
        };

        DeviceRepository::new(self.db)
            .update(device_id, patch)
            .await
            .during(format!("update device {}", device_id))
    }

    /// Deletes a device together with its versions and their licenses in one transaction
    ///
    /// Returns `Ok(false)` if no device with this ID exists.
    pub async fn delete(&self, device_id: i32) -> Result<bool, Error> {
        let txn = self.db.begin().await.during("begin device deletion")?;

        let version_ids = VersionRepository::new(&txn)
            .ids_by_devices(vec![device_id])
            .await
            .during("load versions of device")?;
        LicenseRepository::new(&txn)
            .delete_by_versions(version_ids.clone())
            .await
            .during("delete licenses of device versions")?;
        VersionRepository::new(&txn)
            .delete_many(version_ids)
            .await
            .during("delete versions of device")?;
        let result = DeviceRepository::new(&txn)
            .delete(device_id)
            .await
            .during(format!("delete device {}", device_id))?;

        txn.commit().await.during("commit device deletion")?;

        Ok(result.rows_affected > 0)
    }
}

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
};

use crate::model::{
    db::DeviceModel,
    device::{DevicePatch, NewDevice},
    list::ListOptions,
};

pub struct DeviceRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DeviceRepository<'a, C> {
    /// Creates a new instance of [`DeviceRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, device: NewDevice) -> Result<DeviceModel, DbErr> {
        let now = Utc::now().naive_utc();
        let device = entity::device::ActiveModel {
            project_id: ActiveValue::Set(device.project_id),
            name: ActiveValue::Set(device.name),
            device_type: ActiveValue::Set(device.device_type),
            specifications: ActiveValue::Set(device.specifications),
            status: ActiveValue::Set(entity::STATUS_ACTIVE.to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        device.insert(self.db).await
    }

    pub async fn get(&self, device_id: i32) -> Result<Option<DeviceModel>, DbErr> {
        entity::prelude::Device::find_by_id(device_id)
            .one(self.db)
            .await
    }

    /// Lists devices, optionally restricted to one project, most recently created first
    pub async fn list(
        &self,
        project_id: Option<i32>,
        options: &ListOptions,
    ) -> Result<Vec<DeviceModel>, DbErr> {
        let mut query = entity::prelude::Device::find();
        if let Some(project_id) = project_id {
            query = query.filter(entity::device::Column::ProjectId.eq(project_id));
        }
        if let Some(status) = options.status.as_status() {
            query = query.filter(entity::device::Column::Status.eq(status));
        }

        query
            .order_by_desc(entity::device::Column::CreatedAt)
            .order_by_desc(entity::device::Column::Id)
            .limit(options.limit)
            .offset(options.offset)
            .all(self.db)
            .await
    }

    /// IDs of every device of a project regardless of status
    pub async fn ids_by_project(&self, project_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Device::find()
            .select_only()
            .column(entity::device::Column::Id)
            .filter(entity::device::Column::ProjectId.eq(project_id))
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    /// Returns `Ok(None)` if the device does not exist.
    pub async fn update(
        &self,
        device_id: i32,
        patch: DevicePatch,
    ) -> Result<Option<DeviceModel>, DbErr> {
        let device = match entity::prelude::Device::find_by_id(device_id)
            .one(self.db)
            .await?
        {
            Some(device) => device,
            None => return Ok(None),
        };

        let mut device_am = device.into_active_model();
        if let Some(name) = patch.name {
            device_am.name = ActiveValue::Set(name);
        }
        if let Some(device_type) = patch.device_type {
            device_am.device_type = ActiveValue::Set(device_type);
        }
        if let Some(specifications) = patch.specifications {
            device_am.specifications = ActiveValue::Set(specifications);
        }
        if let Some(status) = patch.status {
            device_am.status = ActiveValue::Set(status);
        }
        device_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let device = device_am.update(self.db).await?;

        Ok(Some(device))
    }

    /// Deletes a device row only
    ///
    /// Returns OK regardless of device existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, device_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Device::delete_by_id(device_id)
            .exec(self.db)
            .await
    }

    pub async fn delete_by_project(&self, project_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Device::delete_many()
            .filter(entity::device::Column::ProjectId.eq(project_id))
            .exec(self.db)
            .await
    }
}

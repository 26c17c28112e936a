use chrono::Utc;
use entity::version::VersionKind;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
};

use crate::model::{
    db::VersionModel,
    list::ListOptions,
    version::{NewVersion, VersionPatch},
};

pub struct VersionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> VersionRepository<'a, C> {
    /// Creates a new instance of [`VersionRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an active version under an already assigned `version_number`
    pub async fn create(
        &self,
        version_number: String,
        version: NewVersion,
    ) -> Result<VersionModel, DbErr> {
        let now = Utc::now().naive_utc();
        let version = entity::version::ActiveModel {
            device_id: ActiveValue::Set(version.device_id),
            version_number: ActiveValue::Set(version_number),
            kind: ActiveValue::Set(version.kind),
            base_version_id: ActiveValue::Set(version.base_version_id),
            release_date: ActiveValue::Set(version.release_date),
            changes: ActiveValue::Set(version.changes),
            status: ActiveValue::Set(entity::STATUS_ACTIVE.to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        version.insert(self.db).await
    }

    pub async fn get(&self, version_id: i32) -> Result<Option<VersionModel>, DbErr> {
        entity::prelude::Version::find_by_id(version_id)
            .one(self.db)
            .await
    }

    /// Lists versions, optionally restricted to one device, most recently created first
    pub async fn list(
        &self,
        device_id: Option<i32>,
        options: &ListOptions,
    ) -> Result<Vec<VersionModel>, DbErr> {
        let mut query = entity::prelude::Version::find();
        if let Some(device_id) = device_id {
            query = query.filter(entity::version::Column::DeviceId.eq(device_id));
        }
        if let Some(status) = options.status.as_status() {
            query = query.filter(entity::version::Column::Status.eq(status));
        }

        query
            .order_by_desc(entity::version::Column::CreatedAt)
            .order_by_desc(entity::version::Column::Id)
            .limit(options.limit)
            .offset(options.offset)
            .all(self.db)
            .await
    }

    /// Every version of `kind` on a device regardless of status, in insertion order
    pub async fn list_by_device_and_kind(
        &self,
        device_id: i32,
        kind: VersionKind,
    ) -> Result<Vec<VersionModel>, DbErr> {
        entity::prelude::Version::find()
            .filter(entity::version::Column::DeviceId.eq(device_id))
            .filter(entity::version::Column::Kind.eq(kind))
            .order_by_asc(entity::version::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn find_by_number(
        &self,
        device_id: i32,
        version_number: &str,
    ) -> Result<Option<VersionModel>, DbErr> {
        entity::prelude::Version::find()
            .filter(entity::version::Column::DeviceId.eq(device_id))
            .filter(entity::version::Column::VersionNumber.eq(version_number))
            .one(self.db)
            .await
    }

    /// Rewrites a stored version number without touching `updated_at`
    pub async fn set_version_number(
        &self,
        version_id: i32,
        version_number: &str,
    ) -> Result<(), DbErr> {
        entity::prelude::Version::update_many()
            .col_expr(
                entity::version::Column::VersionNumber,
                sea_orm::sea_query::Expr::value(version_number),
            )
            .filter(entity::version::Column::Id.eq(version_id))
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Returns `Ok(None)` if the version does not exist.
    pub async fn update(
        &self,
        version_id: i32,
        patch: VersionPatch,
    ) -> Result<Option<VersionModel>, DbErr> {
        let version = match entity::prelude::Version::find_by_id(version_id)
            .one(self.db)
            .await?
        {
            Some(version) => version,
            None => return Ok(None),
        };

        let mut version_am = version.into_active_model();
        if let Some(version_number) = patch.version_number {
            version_am.version_number = ActiveValue::Set(version_number);
        }
        if let Some(release_date) = patch.release_date {
            version_am.release_date = ActiveValue::Set(release_date);
        }
        if let Some(changes) = patch.changes {
            version_am.changes = ActiveValue::Set(changes);
        }
        if let Some(status) = patch.status {
            version_am.status = ActiveValue::Set(status);
        }
        version_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let version = version_am.update(self.db).await?;

        Ok(Some(version))
    }

    /// IDs of every version belonging to any of `device_ids`
    pub async fn ids_by_devices(&self, device_ids: Vec<i32>) -> Result<Vec<i32>, DbErr> {
        if device_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Version::find()
            .select_only()
            .column(entity::version::Column::Id)
            .filter(entity::version::Column::DeviceId.is_in(device_ids))
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    /// IDs of the renewals based on `base_version_id`
    pub async fn renewal_ids(&self, base_version_id: i32) -> Result<Vec<i32>, DbErr> {
        entity::prelude::Version::find()
            .select_only()
            .column(entity::version::Column::Id)
            .filter(entity::version::Column::BaseVersionId.eq(base_version_id))
            .into_tuple::<i32>()
            .all(self.db)
            .await
    }

    /// Deletes the given versions, returning how many rows were removed
    pub async fn delete_many(&self, version_ids: Vec<i32>) -> Result<u64, DbErr> {
        if version_ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::Version::delete_many()
            .filter(entity::version::Column::Id.is_in(version_ids))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

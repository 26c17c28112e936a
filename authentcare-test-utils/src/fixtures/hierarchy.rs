use chrono::Utc;
use entity::version::VersionKind;
use sea_orm::{sea_query::Expr, ActiveValue, ColumnTrait, EntityTrait, QueryFilter};

use crate::{error::TestError, model::*, TestContext};

impl TestContext {
    pub fn hierarchy(&self) -> HierarchyFixtures<'_> {
        HierarchyFixtures { test: self }
    }
}

/// Inserts rows directly, bypassing validation and version sequencing.
///
/// Used to set up states the services never produce themselves, such as legacy renewal
/// identifiers or inactive parents.
pub struct HierarchyFixtures<'a> {
    test: &'a TestContext,
}

impl<'a> HierarchyFixtures<'a> {
    pub async fn insert_project(&self, name: &str) -> Result<ProjectModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Project::insert(entity::project::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                description: ActiveValue::Set(String::new()),
                status: ActiveValue::Set(entity::STATUS_ACTIVE.to_string()),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.test.db)
            .await?,
        )
    }

    pub async fn insert_device(
        &self,
        project_id: i32,
        name: &str,
    ) -> Result<DeviceModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Device::insert(entity::device::ActiveModel {
                project_id: ActiveValue::Set(project_id),
                name: ActiveValue::Set(name.to_string()),
                device_type: ActiveValue::Set("Class II".to_string()),
                specifications: ActiveValue::Set(String::new()),
                status: ActiveValue::Set(entity::STATUS_ACTIVE.to_string()),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.test.db)
            .await?,
        )
    }

    /// Inserts a version with an arbitrary number, including legacy or malformed ones
    pub async fn insert_version(
        &self,
        device_id: i32,
        version_number: &str,
        kind: VersionKind,
        base_version_id: Option<i32>,
    ) -> Result<VersionModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Version::insert(entity::version::ActiveModel {
                device_id: ActiveValue::Set(device_id),
                version_number: ActiveValue::Set(version_number.to_string()),
                kind: ActiveValue::Set(kind),
                base_version_id: ActiveValue::Set(base_version_id),
                release_date: ActiveValue::Set(None),
                changes: ActiveValue::Set(String::new()),
                status: ActiveValue::Set(entity::STATUS_ACTIVE.to_string()),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.test.db)
            .await?,
        )
    }

    pub async fn insert_new_version(
        &self,
        device_id: i32,
        version_number: &str,
    ) -> Result<VersionModel, TestError> {
        self.insert_version(device_id, version_number, VersionKind::NewVersion, None)
            .await
    }

    pub async fn insert_renewal(
        &self,
        device_id: i32,
        version_number: &str,
        base_version_id: i32,
    ) -> Result<VersionModel, TestError> {
        self.insert_version(
            device_id,
            version_number,
            VersionKind::Renewal,
            Some(base_version_id),
        )
        .await
    }

    pub async fn insert_market(&self, name: &str) -> Result<MarketModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::Market::insert(entity::market::ActiveModel {
                name: ActiveValue::Set(name.to_string()),
                region: ActiveValue::Set("Global".to_string()),
                regulatory_body: ActiveValue::Set(name.to_string()),
                requirements: ActiveValue::Set(String::new()),
                status: ActiveValue::Set(entity::STATUS_ACTIVE.to_string()),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.test.db)
            .await?,
        )
    }

    pub async fn insert_license(
        &self,
        project_id: i32,
        market_id: i32,
        version_id: i32,
    ) -> Result<LicenseModel, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::License::insert(entity::license::ActiveModel {
                project_id: ActiveValue::Set(project_id),
                market_id: ActiveValue::Set(market_id),
                version_id: ActiveValue::Set(version_id),
                license_number: ActiveValue::Set(format!("LIC-{}-{}", market_id, version_id)),
                status: ActiveValue::Set("pending".to_string()),
                issued_date: ActiveValue::Set(None),
                expiry_date: ActiveValue::Set(None),
                notes: ActiveValue::Set(String::new()),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.test.db)
            .await?,
        )
    }

    /// Marks a project inactive
    pub async fn deactivate_project(&self, project_id: i32) -> Result<(), TestError> {
        entity::prelude::Project::update_many()
            .col_expr(
                entity::project::Column::Status,
                Expr::value(entity::STATUS_INACTIVE),
            )
            .filter(entity::project::Column::Id.eq(project_id))
            .exec(&self.test.db)
            .await?;

        Ok(())
    }

    /// Marks a device inactive
    pub async fn deactivate_device(&self, device_id: i32) -> Result<(), TestError> {
        entity::prelude::Device::update_many()
            .col_expr(
                entity::device::Column::Status,
                Expr::value(entity::STATUS_INACTIVE),
            )
            .filter(entity::device::Column::Id.eq(device_id))
            .exec(&self.test.db)
            .await?;

        Ok(())
    }

    /// Inserts a project with one device and a `v1` new version
    pub async fn insert_device_with_version(
        &self,
        project_name: &str,
    ) -> Result<(ProjectModel, DeviceModel, VersionModel), TestError> {
        let project = self.insert_project(project_name).await?;
        let device = self.insert_device(project.id, "Device").await?;
        let version = self.insert_new_version(device.id, "v1").await?;

        Ok((project, device, version))
    }
}

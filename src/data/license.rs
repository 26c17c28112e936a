use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
};

use crate::model::{
    db::LicenseModel,
    license::{LicensePatch, NewLicense, DEFAULT_LICENSE_STATUS},
    list::ListOptions,
};

pub struct LicenseRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LicenseRepository<'a, C> {
    /// Creates a new instance of [`LicenseRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(&self, license: NewLicense) -> Result<LicenseModel, DbErr> {
        let now = Utc::now().naive_utc();
        let license = entity::license::ActiveModel {
            project_id: ActiveValue::Set(license.project_id),
            market_id: ActiveValue::Set(license.market_id),
            version_id: ActiveValue::Set(license.version_id),
            license_number: ActiveValue::Set(license.license_number),
            status: ActiveValue::Set(
                license
                    .status
                    .unwrap_or_else(|| DEFAULT_LICENSE_STATUS.to_string()),
            ),
            issued_date: ActiveValue::Set(license.issued_date),
            expiry_date: ActiveValue::Set(license.expiry_date),
            notes: ActiveValue::Set(license.notes),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        license.insert(self.db).await
    }

    pub async fn get(&self, license_id: i32) -> Result<Option<LicenseModel>, DbErr> {
        entity::prelude::License::find_by_id(license_id)
            .one(self.db)
            .await
    }

    /// Lists licenses, optionally restricted to one project, most recently created first
    pub async fn list(
        &self,
        project_id: Option<i32>,
        options: &ListOptions,
    ) -> Result<Vec<LicenseModel>, DbErr> {
        let mut query = entity::prelude::License::find();
        if let Some(project_id) = project_id {
            query = query.filter(entity::license::Column::ProjectId.eq(project_id));
        }
        if let Some(status) = options.status.as_status() {
            query = query.filter(entity::license::Column::Status.eq(status));
        }

        query
            .order_by_desc(entity::license::Column::CreatedAt)
            .order_by_desc(entity::license::Column::Id)
            .limit(options.limit)
            .offset(options.offset)
            .all(self.db)
            .await
    }

    /// Returns `Ok(None)` if the license does not exist.
    pub async fn update(
        &self,
        license_id: i32,
        patch: LicensePatch,
    ) -> Result<Option<LicenseModel>, DbErr> {
        let license = match entity::prelude::License::find_by_id(license_id)
            .one(self.db)
            .await?
        {
            Some(license) => license,
            None => return Ok(None),
        };

        let mut license_am = license.into_active_model();
        if let Some(license_number) = patch.license_number {
            license_am.license_number = ActiveValue::Set(license_number);
        }
        if let Some(status) = patch.status {
            license_am.status = ActiveValue::Set(status);
        }
        if let Some(issued_date) = patch.issued_date {
            license_am.issued_date = ActiveValue::Set(issued_date);
        }
        if let Some(expiry_date) = patch.expiry_date {
            license_am.expiry_date = ActiveValue::Set(expiry_date);
        }
        if let Some(notes) = patch.notes {
            license_am.notes = ActiveValue::Set(notes);
        }
        license_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let license = license_am.update(self.db).await?;

        Ok(Some(license))
    }

    pub async fn delete(&self, license_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::License::delete_by_id(license_id)
            .exec(self.db)
            .await
    }

    pub async fn delete_by_project(&self, project_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::License::delete_many()
            .filter(entity::license::Column::ProjectId.eq(project_id))
            .exec(self.db)
            .await
    }

    pub async fn delete_by_market(&self, market_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::License::delete_many()
            .filter(entity::license::Column::MarketId.eq(market_id))
            .exec(self.db)
            .await
    }

    /// Deletes every license issued for any of `version_ids`
    pub async fn delete_by_versions(&self, version_ids: Vec<i32>) -> Result<u64, DbErr> {
        if version_ids.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::License::delete_many()
            .filter(entity::license::Column::VersionId.is_in(version_ids))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {

    mod create {
        use authentcare_test_utils::prelude::*;

        use crate::{data::license::LicenseRepository, model::license::NewLicense};

        /// Expect a license created without a status to be pending
        #[tokio::test]
        async fn defaults_to_pending() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_schema()
                .with_mock_market("FDA")
                .build()
                .await?;
            let (project, _, version) = test.hierarchy().insert_device_with_version("Pump").await?;

            let license_repository = LicenseRepository::new(&test.db);
            let license = license_repository
                .create(NewLicense {
                    project_id: project.id,
                    market_id: 1,
                    version_id: version.id,
                    ..Default::default()
                })
                .await?;

            assert_eq!(license.status, "pending");

            Ok(())
        }

        /// Expect Error when the market does not exist
        #[tokio::test]
        async fn fails_for_nonexistent_market() -> Result<(), TestError> {
            let test = TestBuilder::new().with_schema().build().await?;
            let (project, _, version) = test.hierarchy().insert_device_with_version("Pump").await?;

            let license_repository = LicenseRepository::new(&test.db);
            let result = license_repository
                .create(NewLicense {
                    project_id: project.id,
                    market_id: 42,
                    version_id: version.id,
                    ..Default::default()
                })
                .await;

            assert!(result.is_err());

            Ok(())
        }
    }

    mod delete_by_versions {
        use authentcare_test_utils::prelude::*;

        use crate::data::license::LicenseRepository;

        /// Expect only licenses of the listed versions to be removed
        #[tokio::test]
        async fn deletes_licenses_of_versions() -> Result<(), TestError> {
            let test = TestBuilder::new().with_schema().build().await?;
            let market = test.hierarchy().insert_market("FDA").await?;
            let (project, device, v1) = test.hierarchy().insert_device_with_version("Pump").await?;
            let v2 = test.hierarchy().insert_new_version(device.id, "v2").await?;
            test.hierarchy().insert_license(project.id, market.id, v1.id).await?;
            let kept = test.hierarchy().insert_license(project.id, market.id, v2.id).await?;

            let license_repository = LicenseRepository::new(&test.db);
            let deleted = license_repository.delete_by_versions(vec![v1.id]).await?;

            assert_eq!(deleted, 1);
            assert!(license_repository.get(kept.id).await?.is_some());

            Ok(())
        }
    }
}

use sea_orm::DatabaseConnection;

use crate::{
    data::{
        device::DeviceRepository, license::LicenseRepository, market::MarketRepository,
        project::ProjectRepository, version::VersionRepository,
    },
    error::{
        validation::{active_parent, required, required_if_present, ValidationError},
        Error, PersistenceContext,
    },
    model::{
        db::LicenseModel,
        license::{LicensePatch, NewLicense},
        list::ListOptions,
    },
};

pub struct LicenseService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LicenseService<'a> {
    /// Creates a new instance of [`LicenseService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a license for one version of a project's device in one market
    ///
    /// Project, market and version must exist and be active, and the version must belong to a
    /// device of the same project.
    pub async fn create(&self, license: NewLicense) -> Result<LicenseModel, Error> {
        let status = license
            .status
            .as_deref()
            .map(|status| required("status", status))
            .transpose()?;

        let project = ProjectRepository::new(self.db)
            .get(license.project_id)
            .await
            .during("look up project of license")?;
        active_parent("project_id", "project", license.project_id, project, |p| {
            p.status.as_str()
        })?;

        let market = MarketRepository::new(self.db)
            .get(license.market_id)
            .await
            .during("look up market of license")?;
        active_parent("market_id", "market", license.market_id, market, |m| {
            m.status.as_str()
        })?;

        let version = VersionRepository::new(self.db)
            .get(license.version_id)
            .await
            .during("look up version of license")?;
        let version = active_parent("version_id", "version", license.version_id, version, |v| {
            v.status.as_str()
        })?;

        let device = DeviceRepository::new(self.db)
            .get(version.device_id)
            .await
            .during("look up device of licensed version")?;
        if device.map(|device| device.project_id) != Some(license.project_id) {
            return Err(ValidationError::Invalid {
                field: "version_id",
                reason: format!(
                    "version {} does not belong to a device of project {}",
                    version.id, license.project_id
                ),
            }
            .into());
        }

        LicenseRepository::new(self.db)
            .create(NewLicense { status, ..license })
            .await
            .during("create license")
    }

    pub async fn get(&self, license_id: i32) -> Result<Option<LicenseModel>, Error> {
        LicenseRepository::new(self.db)
            .get(license_id)
            .await
            .during(format!("get license {}", license_id))
    }

    /// Licenses of every status unless `options` narrows it
    pub async fn list(&self, options: Option<ListOptions>) -> Result<Vec<LicenseModel>, Error> {
        let options = options.unwrap_or_else(ListOptions::any_status);

        LicenseRepository::new(self.db)
            .list(None, &options)
            .await
            .during("list licenses")
    }

    pub async fn list_by_project(
        &self,
        project_id: i32,
        options: Option<ListOptions>,
    ) -> Result<Vec<LicenseModel>, Error> {
        let options = options.unwrap_or_else(ListOptions::any_status);

        LicenseRepository::new(self.db)
            .list(Some(project_id), &options)
            .await
            .during(format!("list licenses of project {}", project_id))
    }

    /// Returns `Ok(None)` if the license does not exist.
    pub async fn update(
        &self,
        license_id: i32,
        patch: LicensePatch,
    ) -> Result<Option<LicenseModel>, Error> {
        let patch = LicensePatch {
            status: required_if_present("status", patch.status)?,
            ..patch
        };

        LicenseRepository::new(self.db)
            .update(license_id, patch)
            .await
            .during(format!("update license {}", license_id))
    }

    /// Returns `Ok(false)` if no license with this ID exists.
    pub async fn delete(&self, license_id: i32) -> Result<bool, Error> {
        let result = LicenseRepository::new(self.db)
            .delete(license_id)
            .await
            .during(format!("delete license {}", license_id))?;

        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {

    mod create {
        use authentcare_test_utils::prelude::*;

        use crate::{
            error::{validation::ValidationError, Error},
            model::license::NewLicense,
            service::license::LicenseService,
        };

        /// Expect a license for a version of the same project to be stored as pending
        #[tokio::test]
        async fn creates_pending_license() -> Result<(), TestError> {
            let test = TestBuilder::new().with_schema().build().await?;
            let market = test.hierarchy().insert_market("EMA").await?;
            let (project, _, v1) = test.hierarchy().insert_device_with_version("Pump").await?;

            let license_service = LicenseService::new(&test.db);
            let license = license_service
                .create(NewLicense {
                    project_id: project.id,
                    market_id: market.id,
                    version_id: v1.id,
                    license_number: "CE-0123".to_string(),
                    ..Default::default()
                })
                .await
                .unwrap();

            assert_eq!(license.status, "pending");
            assert_eq!(
                license_service.list_by_project(project.id, None).await.unwrap().len(),
                1
            );

            Ok(())
        }

        /// Expect a ValidationError naming `version_id` for a version of another project
        #[tokio::test]
        async fn fails_for_version_of_other_project() -> Result<(), TestError> {
            let test = TestBuilder::new().with_schema().build().await?;
            let market = test.hierarchy().insert_market("EMA").await?;
            let (project, _, _) = test.hierarchy().insert_device_with_version("Pump").await?;
            let (_, _, foreign) = test.hierarchy().insert_device_with_version("Monitor").await?;

            let license_service = LicenseService::new(&test.db);
            let result = license_service
                .create(NewLicense {
                    project_id: project.id,
                    market_id: market.id,
                    version_id: foreign.id,
                    ..Default::default()
                })
                .await;

            assert!(matches!(
                result,
                Err(Error::ValidationError(ValidationError::Invalid { field: "version_id", .. }))
            ));

            Ok(())
        }

        /// Expect a ValidationError naming `market_id` for a missing market
        #[tokio::test]
        async fn fails_for_nonexistent_market() -> Result<(), TestError> {
            let test = TestBuilder::new().with_schema().build().await?;
            let (project, _, v1) = test.hierarchy().insert_device_with_version("Pump").await?;

            let license_service = LicenseService::new(&test.db);
            let result = license_service
                .create(NewLicense {
                    project_id: project.id,
                    market_id: 3,
                    version_id: v1.id,
                    ..Default::default()
                })
                .await;

            match result {
                Err(Error::ValidationError(err)) => assert_eq!(err.field(), "market_id"),
                other => panic!("expected validation error, got {:?}", other),
            }

            Ok(())
        }
    }

    mod list {
        use authentcare_test_utils::prelude::*;

        use crate::{
            model::license::LicensePatch,
            service::license::LicenseService,
        };

        /// Expect expired licenses to stay visible in the default listing
        #[tokio::test]
        async fn includes_every_status_by_default() -> Result<(), TestError> {
            let test = TestBuilder::new().with_schema().build().await?;
            let market = test.hierarchy().insert_market("EMA").await?;
            let (project, _, v1) = test.hierarchy().insert_device_with_version("Pump").await?;
            let license = test.hierarchy().insert_license(project.id, market.id, v1.id).await?;

            let license_service = LicenseService::new(&test.db);
            license_service
                .update(
                    license.id,
                    LicensePatch {
                        status: Some("expired".to_string()),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();

            assert_eq!(license_service.list(None).await.unwrap().len(), 1);

            Ok(())
        }
    }
}

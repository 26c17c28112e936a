use dioxus_logger::tracing;
use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    data::{
        device::DeviceRepository, license::LicenseRepository, project::ProjectRepository,
        version::VersionRepository,
    },
    error::{
        validation::{required, required_if_present, ValidationError},
        Error, PersistenceContext,
    },
    model::{
        db::ProjectModel,
        list::ListOptions,
        project::{NewProject, ProjectPatch},
    },
};

pub struct ProjectService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> ProjectService<'a> {
    /// Creates a new instance of [`ProjectService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an active project
    ///
    /// # Returns
    /// - `Ok(ProjectModel)` - The stored project
    /// - `Err(Error::ValidationError)` - The name is blank or already taken
    pub async fn create(&self, project: NewProject) -> Result<ProjectModel, Error> {
        let name = required("name", &project.name)?;
        self.ensure_name_available(&name, None).await?;

        let project = ProjectRepository::new(self.db)
            .create(NewProject {
                name: name.clone(),
                description: project.description,
            })
            .await
            .during_unique("create project", "name", &name)?;

        tracing::debug!("Created project {} ({})", project.name, project.id);

        Ok(project)
    }

    pub async fn get(&self, project_id: i32) -> Result<Option<ProjectModel>, Error> {
        ProjectRepository::new(self.db)
            .get(project_id)
            .await
            .during(format!("get project {}", project_id))
    }

    pub async fn list(&self, options: &ListOptions) -> Result<Vec<ProjectModel>, Error> {
        ProjectRepository::new(self.db)
            .list(options)
            .await
            .during("list projects")
    }

    /// Active projects whose name or description contains `query`
    pub async fn search(&self, query: &str) -> Result<Vec<ProjectModel>, Error> {
        ProjectRepository::new(self.db)
            .search(query.trim())
            .await
            .during("search projects")
    }

    /// Returns `Ok(None)` if the project does not exist.
    pub async fn update(
        &self,
        project_id: i32,
        patch: ProjectPatch,
    ) -> Result<Option<ProjectModel>, Error> {
        let name = required_if_present("name", patch.name)?;
        let status = required_if_present("status", patch.status)?;
        if let Some(name) = &name {
            self.ensure_name_available(name, Some(project_id)).await?;
        }
        let requested_name = name.clone().unwrap_or_default();

        ProjectRepository::new(self.db)
            .update(
                project_id,
                ProjectPatch {
                    name,
                    description: patch.description,
                    status,
                },
            )
            .await
            .during_unique(format!("update project {}", project_id), "name", &requested_name)
    }

    /// Deletes a project together with its devices, their versions and every license
    ///
    /// All rows are removed in one transaction.
    ///
    /// # Returns
    /// - `Ok(true)` - The project existed and was deleted
    /// - `Ok(false)` - No project with this ID exists
    pub async fn delete(&self, project_id: i32) -> Result<bool, Error> {
        let txn = self
            .db
            .begin()
            .await
            .during("begin project deletion")?;

        let device_ids = DeviceRepository::new(&txn)
            .ids_by_project(project_id)
            .await
            .during("load devices of project")?;
        let version_ids = VersionRepository::new(&txn)
            .ids_by_devices(device_ids)
            .await
            .during("load versions of project")?;

        let license_repository = LicenseRepository::new(&txn);
        license_repository
            .delete_by_project(project_id)
            .await
            .during("delete licenses of project")?;
        license_repository
            .delete_by_versions(version_ids.clone())
            .await
            .during("delete licenses of project versions")?;
        VersionRepository::new(&txn)
            .delete_many(version_ids)
            .await
            .during("delete versions of project")?;
        DeviceRepository::new(&txn)
            .delete_by_project(project_id)
            .await
            .during("delete devices of project")?;
        let result = ProjectRepository::new(&txn)
            .delete(project_id)
            .await
            .during(format!("delete project {}", project_id))?;

        txn.commit().await.during("commit project deletion")?;

        let deleted = result.rows_affected > 0;
        if deleted {
            tracing::info!(project_id = %project_id, "Deleted project and its descendants");
        }

        Ok(deleted)
    }

    async fn ensure_name_available(
        &self,
        name: &str,
        project_id: Option<i32>,
    ) -> Result<(), Error> {
        let existing = ProjectRepository::new(self.db)
            .find_by_name(name)
            .await
            .during("look up project by name")?;

        match existing {
            Some(existing) if Some(existing.id) != project_id => {
                Err(ValidationError::Duplicate {
                    field: "name",
                    value: name.to_string(),
                }
                .into())
            }
            _ => Ok(()),
        }
    }
}

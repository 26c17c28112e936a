use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, QueryFilter, QueryOrder, QuerySelect,
};

use crate::model::{
    db::ProjectModel,
    list::ListOptions,
    project::{NewProject, ProjectPatch},
};

pub struct ProjectRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ProjectRepository<'a, C> {
    /// Creates a new instance of [`ProjectRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts an active project, inputs are stored as given
    pub async fn create(&self, project: NewProject) -> Result<ProjectModel, DbErr> {
        let now = Utc::now().naive_utc();
        let project = entity::project::ActiveModel {
            name: ActiveValue::Set(project.name),
            description: ActiveValue::Set(project.description),
            status: ActiveValue::Set(entity::STATUS_ACTIVE.to_string()),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        project.insert(self.db).await
    }

    pub async fn get(&self, project_id: i32) -> Result<Option<ProjectModel>, DbErr> {
        entity::prelude::Project::find_by_id(project_id)
            .one(self.db)
            .await
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<ProjectModel>, DbErr> {
        entity::prelude::Project::find()
            .filter(entity::project::Column::Name.eq(name))
            .one(self.db)
            .await
    }

    /// Most recently created first
    pub async fn list(&self, options: &ListOptions) -> Result<Vec<ProjectModel>, DbErr> {
        let mut query = entity::prelude::Project::find();
        if let Some(status) = options.status.as_status() {
            query = query.filter(entity::project::Column::Status.eq(status));
        }

        query
            .order_by_desc(entity::project::Column::CreatedAt)
            .order_by_desc(entity::project::Column::Id)
            .limit(options.limit)
            .offset(options.offset)
            .all(self.db)
            .await
    }

    /// Active projects whose name or description contains `query`
    pub async fn search(&self, query: &str) -> Result<Vec<ProjectModel>, DbErr> {
        entity::prelude::Project::find()
            .filter(entity::project::Column::Status.eq(entity::STATUS_ACTIVE))
            .filter(
                Condition::any()
                    .add(entity::project::Column::Name.contains(query))
                    .add(entity::project::Column::Description.contains(query)),
            )
            .order_by_asc(entity::project::Column::Name)
            .all(self.db)
            .await
    }

    /// Applies the fields present in `patch` and re-stamps `updated_at`
    ///
    /// Returns `Ok(None)` if the project does not exist.
    pub async fn update(
        &self,
        project_id: i32,
        patch: ProjectPatch,
    ) -> Result<Option<ProjectModel>, DbErr> {
        let project = match entity::prelude::Project::find_by_id(project_id)
            .one(self.db)
            .await?
        {
            Some(project) => project,
            None => return Ok(None),
        };

        let mut project_am = project.into_active_model();
        if let Some(name) = patch.name {
            project_am.name = ActiveValue::Set(name);
        }
        if let Some(description) = patch.description {
            project_am.description = ActiveValue::Set(description);
        }
        if let Some(status) = patch.status {
            project_am.status = ActiveValue::Set(status);
        }
        project_am.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        let project = project_am.update(self.db).await?;

        Ok(Some(project))
    }

    /// Deletes a project row only, dependents are handled by the caller
    ///
    /// Returns OK regardless of project existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, project_id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::Project::delete_by_id(project_id)
            .exec(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {

    mod create {
        use authentcare_test_utils::prelude::*;

        use crate::{data::project::ProjectRepository, model::project::NewProject};

        /// Expect a new project to be active with matching timestamps
        #[tokio::test]
        async fn creates_active_project() -> Result<(), TestError> {
            let test = TestBuilder::new().with_schema().build().await?;

            let project_repository = ProjectRepository::new(&test.db);
            let project = project_repository
                .create(NewProject {
                    name: "Infusion Pump".to_string(),
                    description: "Ambulatory pump".to_string(),
                })
                .await?;

            assert_eq!(project.status, entity::STATUS_ACTIVE);
            assert_eq!(project.created_at, project.updated_at);

            Ok(())
        }

        /// Expect Error when the name is already taken
        #[tokio::test]
        async fn fails_for_duplicate_name() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_schema()
                .with_mock_project("Infusion Pump")
                .build()
                .await?;

            let project_repository = ProjectRepository::new(&test.db);
            let result = project_repository
                .create(NewProject {
                    name: "Infusion Pump".to_string(),
                    ..Default::default()
                })
                .await;

            assert!(result.is_err());

            Ok(())
        }
    }

    mod list {
        use authentcare_test_utils::prelude::*;

        use crate::{
            data::project::ProjectRepository,
            model::list::{ListOptions, StatusFilter},
        };

        /// Expect inactive projects to be hidden by default and visible on request
        #[tokio::test]
        async fn filters_by_status() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_schema()
                .with_mock_project("Active")
                .build()
                .await?;
            let inactive = test.hierarchy().insert_project("Retired").await?;
            test.hierarchy().deactivate_project(inactive.id).await?;

            let project_repository = ProjectRepository::new(&test.db);
            let active = project_repository.list(&ListOptions::default()).await?;
            let all = project_repository.list(&ListOptions::any_status()).await?;
            let retired = project_repository
                .list(
                    &ListOptions::default()
                        .with_status(StatusFilter::Only(entity::STATUS_INACTIVE.to_string())),
                )
                .await?;

            assert_eq!(active.len(), 1);
            assert_eq!(all.len(), 2);
            assert_eq!(retired.len(), 1);
            assert_eq!(retired[0].id, inactive.id);

            Ok(())
        }

        /// Expect limit and offset to page through the results
        #[tokio::test]
        async fn pages_results() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_schema()
                .with_mock_project("One")
                .with_mock_project("Two")
                .with_mock_project("Three")
                .build()
                .await?;

            let project_repository = ProjectRepository::new(&test.db);
            let first = project_repository
                .list(&ListOptions::default().with_page(2, 0))
                .await?;
            let second = project_repository
                .list(&ListOptions::default().with_page(2, 2))
                .await?;

            assert_eq!(first.len(), 2);
            assert_eq!(second.len(), 1);
            assert!(first.iter().all(|project| project.id != second[0].id));

            Ok(())
        }
    }

    mod search {
        use authentcare_test_utils::prelude::*;

        use crate::data::project::ProjectRepository;

        /// Expect a substring of the name to match
        #[tokio::test]
        async fn matches_name_substring() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_schema()
                .with_mock_project("Infusion Pump")
                .with_mock_project("Glucose Monitor")
                .build()
                .await?;

            let project_repository = ProjectRepository::new(&test.db);
            let result = project_repository.search("Pump").await?;

            assert_eq!(result.len(), 1);
            assert_eq!(result[0].name, "Infusion Pump");

            Ok(())
        }
    }

    mod update {
        use std::time::Duration;

        use authentcare_test_utils::prelude::*;

        use crate::{data::project::ProjectRepository, model::project::ProjectPatch};

        /// Expect absent fields to be preserved and updated_at to move forward
        #[tokio::test]
        async fn preserves_absent_fields() -> Result<(), TestError> {
            let test = TestBuilder::new().with_schema().build().await?;
            let project = test.hierarchy().insert_project("Infusion Pump").await?;
            std::thread::sleep(Duration::from_millis(2));

            let project_repository = ProjectRepository::new(&test.db);
            let updated = project_repository
                .update(
                    project.id,
                    ProjectPatch {
                        description: Some("Second generation".to_string()),
                        ..Default::default()
                    },
                )
                .await?
                .unwrap();

            assert_eq!(updated.name, project.name);
            assert_eq!(updated.status, project.status);
            assert_eq!(updated.description, "Second generation");
            assert_eq!(updated.created_at, project.created_at);
            assert!(updated.updated_at > project.updated_at);

            Ok(())
        }

        /// Expect Ok(None) when the project does not exist
        #[tokio::test]
        async fn returns_none_for_nonexistent_project() -> Result<(), TestError> {
            let test = TestBuilder::new().with_schema().build().await?;

            let project_repository = ProjectRepository::new(&test.db);
            let result = project_repository
                .update(1, ProjectPatch::default())
                .await?;

            assert!(result.is_none());

            Ok(())
        }
    }
}

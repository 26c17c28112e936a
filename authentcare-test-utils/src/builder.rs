//! Declarative test builder.
//!
//! The builder pattern allows chaining multiple configuration methods together, with all
//! operations queued and executed during the final `build()` call.

use sea_orm::{sea_query::TableCreateStatement, EntityTrait, Schema};

use crate::{error::TestError, TestContext};

/// Builder for declarative test initialization.
///
/// Provides an interface for setting up test environments with database tables and
/// fixtures. Methods can be chained together and finalized with `build()`.
#[derive(Default)]
pub struct TestBuilder {
    // Schema to create
    include_schema: bool,
    tables: Vec<TableCreateStatement>,

    // Database fixtures to insert
    projects: Vec<String>,
    devices: Vec<(String, String)>, // (project_name, device_name)
    markets: Vec<String>,
}

impl TestBuilder {
    /// Create a new TestBuilder with no tables or fixtures configured.
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply the full application schema through the migration runner.
    ///
    /// # Returns
    /// - `Self` - The builder instance for method chaining
    pub fn with_schema(mut self) -> Self {
        self.include_schema = true;
        self
    }

    /// Add a single entity table to the test database.
    ///
    /// Generates a CREATE TABLE statement for the entity, which will be executed during `build()`.
    /// Chain multiple calls to add multiple tables.
    ///
    /// # Arguments
    /// - `entity` - Entity type implementing `EntityTrait`
    ///
    /// # Example
    ///
    /// ```no_run
    /// use authentcare_test_utils::TestBuilder;
    /// use entity::prelude::*;
    ///
    /// # async fn example() -> Result<(), authentcare_test_utils::TestError> {
    /// let test = TestBuilder::new()
    ///     .with_table(Market)
    ///     .with_table(Notification)
    ///     .build()
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Insert an active project named `name`.
    pub fn with_mock_project(mut self, name: impl Into<String>) -> Self {
        self.projects.push(name.into());
        self
    }

    /// Insert an active device under the queued project named `project_name`.
    pub fn with_mock_device(
        mut self,
        project_name: impl Into<String>,
        device_name: impl Into<String>,
    ) -> Self {
        self.devices.push((project_name.into(), device_name.into()));
        self
    }

    /// Insert an active market named `name`.
    pub fn with_mock_market(mut self, name: impl Into<String>) -> Self {
        self.markets.push(name.into());
        self
    }

    /// Build the test context, executing all queued operations.
    ///
    /// 1. Applies the schema and creates standalone tables
    /// 2. Inserts projects, then devices, then markets
    pub async fn build(self) -> Result<TestContext, TestError> {
        let test = TestContext::new().await?;

        // 1. Create schema
        if self.include_schema {
            test.with_schema().await?;
        }
        test.with_tables(self.tables).await?;

        // 2. Insert database fixtures
        let mut projects = Vec::new();
        for name in self.projects {
            projects.push(test.hierarchy().insert_project(&name).await?);
        }

        for (project_name, device_name) in self.devices {
            let project = projects
                .iter()
                .find(|project| project.name == project_name)
                .ok_or(TestError::UnknownFixture {
                    entity: "project",
                    name: project_name.clone(),
                })?;

            test.hierarchy()
                .insert_device(project.id, &device_name)
                .await?;
        }

        for name in self.markets {
            test.hierarchy().insert_market(&name).await?;
        }

        Ok(test)
    }
}

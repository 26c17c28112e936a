//! Append-only record of applied schema units.

use std::collections::BTreeSet;

use chrono::Utc;
use sea_orm::{ActiveValue, ConnectionTrait, DbErr, EntityTrait, Schema};

pub mod schema_migration {
    use sea_orm::entity::prelude::*;

    #[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
    #[sea_orm(table_name = "schema_migration")]
    pub struct Model {
        #[sea_orm(primary_key, auto_increment = false)]
        pub id: String,
        pub applied_at: DateTime,
    }

    #[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
    pub enum Relation {}

    impl ActiveModelBehavior for ActiveModel {}
}

pub struct MigrationLedger<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MigrationLedger<'a, C> {
    /// Creates a new instance of [`MigrationLedger`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates the ledger table when it does not exist yet, safe to call on every launch
    pub async fn ensure(&self) -> Result<(), DbErr> {
        let schema = Schema::new(self.db.get_database_backend());
        let mut stmt = schema.create_table_from_entity(schema_migration::Entity);
        stmt.if_not_exists();

        self.db.execute(&stmt).await?;

        Ok(())
    }

    /// Identifiers of every unit recorded as applied
    pub async fn applied(&self) -> Result<BTreeSet<String>, DbErr> {
        let rows = schema_migration::Entity::find().all(self.db).await?;

        Ok(rows.into_iter().map(|row| row.id).collect())
    }

    /// Records a unit as applied
    ///
    /// Pass the transaction the unit's statements ran in so both commit or roll back together.
    pub async fn record(&self, id: &str) -> Result<(), DbErr> {
        let entry = schema_migration::ActiveModel {
            id: ActiveValue::Set(id.to_string()),
            applied_at: ActiveValue::Set(Utc::now().naive_utc()),
        };

        schema_migration::Entity::insert(entry).exec(self.db).await?;

        Ok(())
    }
}

//! Database connection and initialization.
//!
//! [`initialize`] brings a connection up to date before any other operation may use it: the
//! schema catalog is applied first and a failure there is fatal, then default data is seeded
//! and a seeding failure is only logged.

use dioxus_logger::tracing;
use migration::Migrator;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};

use crate::{
    config::Config,
    context::AppContext,
    error::{Error, PersistenceContext},
    seed::SeedLoader,
};

/// Opens the SQLite database named by `DATABASE_URL` with foreign keys enforced
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, Error> {
    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt)
        .await
        .during("connect to database")?;
    db.execute_unprepared("PRAGMA foreign_keys = ON")
        .await
        .during("enable foreign key enforcement")?;

    Ok(db)
}

/// Applies pending schema units, seeds empty tables and returns the [`AppContext`]
///
/// # Returns
/// - `Ok(AppContext)` - The database is ready for use
/// - `Err(Error::MigrationError)` - A schema unit failed; it was rolled back and the database
///   must not be used
pub async fn initialize(db: DatabaseConnection, config: &Config) -> Result<AppContext, Error> {
    let report = match Migrator::run(&db).await {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(unit = e.unit().unwrap_or("-"), "{}", e);

            return Err(e.into());
        }
    };

    for unit in &report.applied {
        tracing::info!(unit = %unit, "Applied schema unit");
    }
    for unit in &report.unknown {
        tracing::warn!(unit = %unit, "Schema ledger records a unit this build does not know");
    }
    tracing::info!(
        "Database schema is up to date ({} applied, {} already present)",
        report.applied.len(),
        report.skipped
    );

    match SeedLoader::new(&db).run().await {
        Ok(seeded) => tracing::debug!(
            "Seeding finished (markets: {}, notifications: {})",
            seeded.markets,
            seeded.notifications
        ),
        Err(e) => tracing::warn!("Failed to seed default data: {}", e),
    }

    Ok(AppContext::new(db, config.bulk_delete_secret.clone()))
}

//! Transactional, exactly-once application of the migration catalog.

use sea_orm::{DatabaseConnection, TransactionTrait};
use sea_orm_migration::{MigrationTrait, SchemaManager};

use crate::{error::MigrationError, ledger::MigrationLedger};

/// Outcome of a [`MigrationRunner::run`] call.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct MigrationReport {
    /// Units applied by this run, in application order
    pub applied: Vec<String>,
    /// Units already present in the ledger
    pub skipped: usize,
    /// Ledger entries with no matching unit in the catalog
    pub unknown: Vec<String>,
}

pub struct MigrationRunner<'a> {
    db: &'a DatabaseConnection,
    catalog: Vec<Box<dyn MigrationTrait>>,
}

impl<'a> MigrationRunner<'a> {
    /// Creates a new instance of [`MigrationRunner`] over the provided catalog
    pub fn new(db: &'a DatabaseConnection, catalog: Vec<Box<dyn MigrationTrait>>) -> Self {
        Self { db, catalog }
    }

    /// Applies every catalog unit missing from the ledger, in ascending identifier order.
    ///
    /// Each unit runs in its own transaction together with its ledger entry. The first failing
    /// unit is rolled back and stops the run; units after it are not attempted. Calling this
    /// again after success or failure is safe, applied units are skipped and a failed unit is
    /// retried from scratch.
    ///
    /// # Returns
    /// - `Ok(MigrationReport)` - Units applied and skipped by this run
    /// - `Err(MigrationError::Ledger)` - The ledger table could not be created or read
    /// - `Err(MigrationError::DuplicateUnit)` - The catalog repeats an identifier, nothing applied
    /// - `Err(MigrationError::UnitFailed)` - A unit failed, carrying its identifier
    pub async fn run(&self) -> Result<MigrationReport, MigrationError> {
        let ledger = MigrationLedger::new(self.db);
        ledger.ensure().await.map_err(MigrationError::Ledger)?;
        let applied = ledger.applied().await.map_err(MigrationError::Ledger)?;

        let units = self.ordered_units()?;

        let mut report = MigrationReport {
            unknown: applied
                .iter()
                .filter(|id| !units.iter().any(|unit| unit.name() == id.as_str()))
                .cloned()
                .collect(),
            ..Default::default()
        };

        for unit in units {
            if applied.contains(unit.name()) {
                report.skipped += 1;
                continue;
            }

            self.apply(unit).await?;
            report.applied.push(unit.name().to_string());
        }

        Ok(report)
    }

    /// Catalog units sorted by identifier, rejecting repeated identifiers
    fn ordered_units(&self) -> Result<Vec<&dyn MigrationTrait>, MigrationError> {
        let mut units: Vec<&dyn MigrationTrait> =
            self.catalog.iter().map(|unit| unit.as_ref()).collect();
        units.sort_by(|a, b| a.name().cmp(b.name()));

        if let Some(pair) = units.windows(2).find(|pair| pair[0].name() == pair[1].name()) {
            return Err(MigrationError::DuplicateUnit(pair[0].name().to_string()));
        }

        Ok(units)
    }

    async fn apply(&self, unit: &dyn MigrationTrait) -> Result<(), MigrationError> {
        let id = unit.name().to_string();
        let failed = |source| MigrationError::UnitFailed {
            id: id.clone(),
            source,
        };

        let txn = self.db.begin().await.map_err(failed)?;

        let outcome = {
            let manager = SchemaManager::new(&txn);
            match unit.up(&manager).await {
                Ok(()) => MigrationLedger::new(&txn).record(&id).await,
                Err(err) => Err(err),
            }
        };

        match outcome {
            Ok(()) => txn.commit().await.map_err(failed),
            Err(source) => {
                // The unit's own error is what the caller needs, a rollback failure adds nothing.
                let _ = txn.rollback().await;
                Err(failed(source))
            }
        }
    }
}

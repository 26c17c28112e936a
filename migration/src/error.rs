use sea_orm::DbErr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MigrationError {
    /// The ledger table could not be created or read.
    #[error("Failed to access the migration ledger: {0}")]
    Ledger(#[source] DbErr),
    /// The catalog lists the same unit identifier more than once.
    #[error("Migration catalog lists unit {0} more than once")]
    DuplicateUnit(String),
    /// A unit's statements, or its ledger entry, failed and were rolled back.
    #[error("Migration {id} failed and was rolled back: {source}")]
    UnitFailed {
        id: String,
        #[source]
        source: DbErr,
    },
}

impl MigrationError {
    /// Identifier of the unit that failed, if the failure belongs to one.
    pub fn unit(&self) -> Option<&str> {
        match self {
            Self::UnitFailed { id, .. } | Self::DuplicateUnit(id) => Some(id),
            Self::Ledger(_) => None,
        }
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestError {
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    #[error(transparent)]
    MigrationError(#[from] migration::MigrationError),
    #[error("Fixture references unknown {entity} '{name}'")]
    UnknownFixture { entity: &'static str, name: String },
}

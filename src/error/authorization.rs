use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthorizationError {
    /// The confirmation secret supplied for a bulk deletion did not match.
    #[error(
        "Confirmation secret did not match, bulk deletion of {requested} version(s) refused and 0 rows deleted"
    )]
    SecretMismatch { requested: usize },
}

impl AuthorizationError {
    /// Rows deleted before the request was refused, always zero
    pub fn deleted(&self) -> usize {
        0
    }
}

//! Field-level input validation errors.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} is required")]
    MissingField { field: &'static str },
    #[error("{field} refers to {entity} {id}, which does not exist")]
    UnknownReference {
        field: &'static str,
        entity: &'static str,
        id: i32,
    },
    #[error("{field} refers to {entity} {id}, which is no longer active")]
    InactiveReference {
        field: &'static str,
        entity: &'static str,
        id: i32,
    },
    #[error("{field} '{value}' is already in use")]
    Duplicate { field: &'static str, value: String },
    #[error("{field} is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ValidationError {
    /// Name of the input field the error is about
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field }
            | Self::UnknownReference { field, .. }
            | Self::InactiveReference { field, .. }
            | Self::Duplicate { field, .. }
            | Self::Invalid { field, .. } => field,
        }
    }
}

/// Trims `value` and rejects it when nothing is left
pub fn required(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::MissingField { field });
    }

    Ok(value.to_string())
}

/// Same as [`required`] for patch fields, where `None` means "leave unchanged"
pub fn required_if_present(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<String>, ValidationError> {
    value.map(|value| required(field, &value)).transpose()
}

/// Resolves a referenced parent row, which must exist and still be active
pub fn active_parent<M>(
    field: &'static str,
    entity: &'static str,
    id: i32,
    row: Option<M>,
    status: impl Fn(&M) -> &str,
) -> Result<M, ValidationError> {
    let row = row.ok_or(ValidationError::UnknownReference { field, entity, id })?;
    if status(&row) != entity::STATUS_ACTIVE {
        return Err(ValidationError::InactiveReference { field, entity, id });
    }

    Ok(row)
}

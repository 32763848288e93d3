use crate::common::{cell::CellPath, field_type::FieldType};
use crate::grid::row::RowId;

use aws_sdk_dynamodb::error::BuildError;

/// Errors returned by grid, draft and codec operations.
///
/// Validation failures while editing are not errors: they are counted by the
/// draft session and block its commit instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No column exists at the given index.
    #[error("no column at index {0}")]
    ColumnOutOfRange(usize),
    /// No nested element exists at the given index.
    #[error("no element at index {0}")]
    ElementOutOfRange(usize),
    /// The path does not lead to a present value.
    #[error("no value at {0}")]
    PathNotFound(CellPath),
    /// The value at the path holds no nested elements.
    #[error("{0} values do not hold nested elements")]
    NotACollection(FieldType),
    /// A value of the wrong type was supplied.
    #[error("expected a {expected} value, got {actual}")]
    TypeMismatch {
        /// The type required at this position.
        expected: FieldType,
        /// The type that was supplied.
        actual: FieldType,
    },
    /// The field type is not in the session's allowed list.
    #[error("{0} is not an allowed field type")]
    TypeNotAllowed(FieldType),
    /// No row with this id exists in the grid.
    #[error("no row with id {0}")]
    RowNotFound(RowId),
    /// Confirm was requested while validation errors are pending.
    #[error("{0} validation error(s) pending")]
    ValidationPending(usize),
    /// The column's label is fixed.
    #[error("the label of column {0} cannot be edited")]
    LabelNotEditable(usize),
    /// The session was already committed or cancelled.
    #[error("the draft session is closed")]
    SessionClosed,
    /// Serializing a record to an item, or back, failed.
    #[error(transparent)]
    Dynamo(#[from] serde_dynamo::Error),
    /// Reading or writing DynamoDB JSON failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    /// Building an SDK operation input failed.
    #[error(transparent)]
    Build(#[from] BuildError),
}

/// Result type of this crate.
pub type Result<T> = std::result::Result<T, Error>;

use crate::common::cell::Cell;

use std::fmt;
use uuid::Uuid;

/// Opaque row identity, stable across draft clones.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct RowId(Uuid);

impl RowId {
    /// A fresh, unique id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RowId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One grid row.
///
/// `values` is positionally aligned with the grid's columns and may be
/// shorter than them: missing trailing cells read as absent. `extra` carries
/// an external payload, such as the item a row was decoded from.
///
/// ```rust
/// use dynamodb_grid::common::{cell::Cell, value::Value};
/// use dynamodb_grid::grid::row::Row;
///
/// let row: Row = Row::new(vec![Cell::Present(Value::Number(1))]);
/// assert!(row.cell(0).is_some());
/// assert!(row.cell(1).is_none());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Row<X = ()> {
    id: RowId,
    /// Cells, aligned with the grid's columns.
    pub values: Vec<Cell>,
    /// Selection state.
    pub selected: bool,
    /// Disabled rows are shown but not actionable.
    pub disabled: bool,
    /// External payload.
    pub extra: Option<X>,
}

impl<X> Default for Row<X> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<X> Row<X> {
    /// A row without payload.
    pub fn new(values: Vec<Cell>) -> Self {
        Self {
            id: RowId::new(),
            values,
            selected: false,
            disabled: false,
            extra: None,
        }
    }

    /// A row carrying an external payload.
    pub fn with_extra(values: Vec<Cell>, extra: X) -> Self {
        Self {
            extra: Some(extra),
            ..Self::new(values)
        }
    }

    /// The row's identity.
    pub fn id(&self) -> RowId {
        self.id
    }

    /// The cell at `index`, `None` past the end of the row.
    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.values.get(index)
    }

    /// Mutable access to the cell at `index`.
    pub fn cell_mut(&mut self, index: usize) -> Option<&mut Cell> {
        self.values.get_mut(index)
    }

    /// Whether the cell at `index` is missing or absent.
    pub fn is_absent(&self, index: usize) -> bool {
        self.cell(index).is_none_or(Cell::is_absent)
    }

    /// Pad with absent string cells up to `len` cells.
    pub fn pad_to(&mut self, len: usize) {
        if self.values.len() < len {
            self.values.resize_with(len, Cell::default);
        }
    }
}

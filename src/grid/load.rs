use crate::grid::{column::Column, row::Row};

/// A page load issued by the grid.
///
/// `generation` increases with every request; a completion is applied only
/// if it answers the latest one.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct LoadRequest {
    /// The requested page, starting at 1.
    pub page: u32,
    /// Sequence number of the request.
    pub generation: u64,
}

/// Result of a page load, replacing the grid's rows wholesale.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<X> {
    /// The new rows.
    pub rows: Vec<Row<X>>,
    /// New columns, when the load also rediscovers the schema.
    pub columns: Option<Vec<Column>>,
    /// New page count, when known.
    pub page_count: Option<u32>,
}

impl<X> Page<X> {
    /// Rows only, keeping columns and page count.
    pub fn rows(rows: Vec<Row<X>>) -> Self {
        Self {
            rows,
            columns: None,
            page_count: None,
        }
    }

    /// Rows together with the columns they are aligned to.
    pub fn with_columns(columns: Vec<Column>, rows: Vec<Row<X>>) -> Self {
        Self {
            rows,
            columns: Some(columns),
            page_count: None,
        }
    }
}

/// Callback starting an asynchronous page load.
///
/// It should eventually hand a [`Page`] back through
/// [`Grid::apply_page`](crate::grid::Grid::apply_page) on the same thread.
pub type Loader = Box<dyn FnMut(LoadRequest)>;

//! The generic data grid: ordered columns, ordered rows and pagination.
//!
//! All rows are read against the same column list. Structural changes are
//! reported through [`GridEvent`]s drained with [`Grid::take_events`].

/// Column descriptors.
pub mod column;

/// Page loading contract.
pub mod load;

/// Rows and their identity.
pub mod row;

use crate::common::cell::Cell;
use crate::error::{Error, Result};

use column::Column;
use load::{LoadRequest, Loader, Page};
use row::{Row, RowId};
use std::fmt;

/// Structural change notification.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum GridEvent {
    /// Columns were added, removed, renamed or replaced.
    ColumnsChanged,
    /// All rows were replaced by a page load.
    RowsReplaced,
    /// A row was inserted.
    RowInserted(RowId),
    /// A row was removed.
    RowRemoved(RowId),
    /// A row's cells were replaced by a committed draft.
    RowUpdated(RowId),
    /// The selection changed.
    SelectionChanged,
    /// A page load was issued.
    LoadRequested(LoadRequest),
}

/// One duplicate-label merge: the cell of `removed` moves into `survivor`,
/// then column `removed` disappears.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct LabelMerge {
    /// Earliest column carrying the label.
    pub survivor: usize,
    /// Later column carrying the same label, removed by the merge.
    pub removed: usize,
}

impl LabelMerge {
    /// Apply the merge to one row.
    ///
    /// The removed slot's cell, absent or not, overwrites the survivor. A row
    /// too short to hold the removed slot is left untouched.
    pub fn apply<X>(self, row: &mut Row<X>) {
        if self.removed >= row.values.len() {
            return;
        }
        row.values[self.survivor] = row.values.remove(self.removed);
    }
}

/// Collapse columns sharing a label, earliest index first.
///
/// Returns the merges in the order they were performed, to be replayed on
/// every row with [`LabelMerge::apply`]. Quadratic in the column count.
pub fn merge_duplicate_labels(columns: &mut Vec<Column>) -> Vec<LabelMerge> {
    let mut merges = Vec::new();
    let mut survivor = 0;
    while survivor < columns.len() {
        let mut other = survivor + 1;
        while other < columns.len() {
            if columns[other].label == columns[survivor].label {
                columns.remove(other);
                merges.push(LabelMerge {
                    survivor,
                    removed: other,
                });
            } else {
                other += 1;
            }
        }
        survivor += 1;
    }
    #[cfg(feature = "tracing")]
    if !merges.is_empty() {
        tracing::debug!(merged = merges.len(), "merged duplicate column labels");
    }
    merges
}

/// The full table: columns, rows and pagination state.
///
/// ```rust
/// use dynamodb_grid::common::{cell::Cell, value::Value};
/// use dynamodb_grid::grid::{Grid, column::Column, row::Row};
///
/// let mut grid: Grid = Grid::new(vec![Column::key("id")]);
/// grid.insert_row(0, Row::new(vec![Cell::Present(Value::Number(1))]));
/// grid.append_column(Column::attribute("name"));
/// assert_eq!(grid.rows()[0].values.len(), 2);
/// ```
pub struct Grid<X = ()> {
    columns: Vec<Column>,
    rows: Vec<Row<X>>,
    page: u32,
    page_count: u32,
    generation: u64,
    loader: Option<Loader>,
    events: Vec<GridEvent>,
}

impl<X: fmt::Debug> fmt::Debug for Grid<X> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("columns", &self.columns)
            .field("rows", &self.rows)
            .field("page", &self.page)
            .field("page_count", &self.page_count)
            .field("generation", &self.generation)
            .field("loader", &self.loader.is_some())
            .finish()
    }
}

impl<X> Default for Grid<X> {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<X> Grid<X> {
    /// An empty grid on page 1 of 1.
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            page: 1,
            page_count: 1,
            generation: 0,
            loader: None,
            events: Vec::new(),
        }
    }

    /// Builder-style variant of [`Grid::set_loader`].
    pub fn with_loader(mut self, loader: impl FnMut(LoadRequest) + 'static) -> Self {
        self.set_loader(loader);
        self
    }

    /// Install the callback invoked on page changes and reloads.
    pub fn set_loader(&mut self, loader: impl FnMut(LoadRequest) + 'static) {
        self.loader = Some(Box::new(loader));
    }

    /// The columns, in order.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The rows, in order.
    pub fn rows(&self) -> &[Row<X>] {
        &self.rows
    }

    /// Current page, starting at 1.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Number of known pages.
    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Update the number of known pages.
    pub fn set_page_count(&mut self, page_count: u32) {
        self.page_count = page_count;
    }

    /// Drain pending change notifications.
    pub fn take_events(&mut self) -> Vec<GridEvent> {
        std::mem::take(&mut self.events)
    }

    /// Append a column; every existing row gains an absent string cell at
    /// the new position.
    pub fn append_column(&mut self, column: Column) {
        let len = self.columns.len();
        for row in &mut self.rows {
            row.pad_to(len);
            row.values.push(Cell::default());
        }
        self.columns.push(column);
        self.events.push(GridEvent::ColumnsChanged);
    }

    /// Rename a column.
    pub fn set_label(&mut self, index: usize, label: impl Into<String>) -> Result<()> {
        let column = self
            .columns
            .get_mut(index)
            .ok_or(Error::ColumnOutOfRange(index))?;
        column.label = label.into();
        self.events.push(GridEvent::ColumnsChanged);
        Ok(())
    }

    /// Collapse columns sharing a label into the earliest one, the latest
    /// cell winning even when absent, and drop the duplicates from every row.
    pub fn reconcile_duplicate_labels(&mut self) -> Vec<LabelMerge> {
        let merges = merge_duplicate_labels(&mut self.columns);
        if !merges.is_empty() {
            for row in &mut self.rows {
                merges.iter().for_each(|merge| merge.apply(row));
            }
            self.events.push(GridEvent::ColumnsChanged);
        }
        merges
    }

    /// Index of the row with this id.
    pub fn position(&self, id: RowId) -> Option<usize> {
        self.rows.iter().position(|row| row.id() == id)
    }

    /// The row with this id.
    pub fn row(&self, id: RowId) -> Option<&Row<X>> {
        self.rows.iter().find(|row| row.id() == id)
    }

    /// Mutable access to the row with this id.
    pub fn row_mut(&mut self, id: RowId) -> Option<&mut Row<X>> {
        self.rows.iter_mut().find(|row| row.id() == id)
    }

    /// Insert a row at `index`, clamped to the row count.
    pub fn insert_row(&mut self, index: usize, row: Row<X>) {
        let index = index.min(self.rows.len());
        self.events.push(GridEvent::RowInserted(row.id()));
        self.rows.insert(index, row);
    }

    /// Remove and return the row with this id.
    pub fn remove_row(&mut self, id: RowId) -> Option<Row<X>> {
        let index = self.position(id)?;
        self.events.push(GridEvent::RowRemoved(id));
        Some(self.rows.remove(index))
    }

    /// Selected rows, in order.
    pub fn selected(&self) -> impl Iterator<Item = &Row<X>> {
        self.rows.iter().filter(|row| row.selected)
    }

    /// The selected row, if exactly one is selected.
    pub fn single_selected(&self) -> Option<&Row<X>> {
        let mut selected = self.selected();
        match (selected.next(), selected.next()) {
            (Some(row), None) => Some(row),
            _ => None,
        }
    }

    /// Deselect every row.
    pub fn clear_selection(&mut self) {
        self.rows.iter_mut().for_each(|row| row.selected = false);
        self.events.push(GridEvent::SelectionChanged);
    }

    /// Select one row and deselect all others.
    pub fn select_only(&mut self, id: RowId) -> Result<()> {
        let index = self.position(id).ok_or(Error::RowNotFound(id))?;
        self.clear_selection();
        self.rows[index].selected = true;
        Ok(())
    }

    /// Flip the selection of one row, leaving the others alone.
    pub fn toggle_selected(&mut self, id: RowId) -> Result<()> {
        let row = self.row_mut(id).ok_or(Error::RowNotFound(id))?;
        row.selected = !row.selected;
        self.events.push(GridEvent::SelectionChanged);
        Ok(())
    }

    /// Move to page `page` and ask the loader for it.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn set_page(&mut self, page: u32) -> Option<LoadRequest> {
        self.page = page;
        self.request_load()
    }

    /// Ask the loader for the current page again.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn reload(&mut self) -> Option<LoadRequest> {
        self.request_load()
    }

    /// Back to page 1 of 1, then reload.
    pub fn reset(&mut self) -> Option<LoadRequest> {
        self.page_count = 1;
        self.set_page(1)
    }

    fn request_load(&mut self) -> Option<LoadRequest> {
        let loader = self.loader.as_mut()?;
        self.generation += 1;
        let request = LoadRequest {
            page: self.page,
            generation: self.generation,
        };
        loader(request);
        self.events.push(GridEvent::LoadRequested(request));
        Some(request)
    }

    /// Apply a completed load.
    ///
    /// Completions answering anything but the latest request are dropped
    /// and `false` is returned. Otherwise the rows are replaced at once.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, page), fields(rows = page.rows.len()))
    )]
    pub fn apply_page(&mut self, request: LoadRequest, page: Page<X>) -> bool {
        if request.generation != self.generation {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                latest = self.generation,
                "dropping stale page load completion"
            );
            return false;
        }
        if let Some(columns) = page.columns {
            self.columns = columns;
            self.events.push(GridEvent::ColumnsChanged);
        }
        if let Some(page_count) = page.page_count {
            self.page_count = page_count;
        }
        self.rows = page.rows;
        self.events.push(GridEvent::RowsReplaced);
        true
    }

    /// Swap a committed draft into the grid.
    ///
    /// `merges` are replayed on every row so they stay aligned with the
    /// draft's columns. An existing row keeps its identity and payload and
    /// takes the draft's cells; a new row is inserted first.
    pub(crate) fn apply_draft(
        &mut self,
        target: Option<RowId>,
        draft: Row<X>,
        columns: Vec<Column>,
        merges: &[LabelMerge],
    ) -> Result<()> {
        if let Some(id) = target
            && self.position(id).is_none()
        {
            return Err(Error::RowNotFound(id));
        }
        for row in &mut self.rows {
            merges.iter().for_each(|merge| merge.apply(row));
        }
        self.columns = columns;
        self.events.push(GridEvent::ColumnsChanged);
        match target.and_then(|id| self.row_mut(id)) {
            Some(row) => {
                row.values = draft.values;
                let id = row.id();
                self.events.push(GridEvent::RowUpdated(id));
            }
            None => self.insert_row(0, draft),
        }
        Ok(())
    }
}

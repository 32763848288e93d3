//! Draft editing sessions.
//!
//! A session edits a clone of one row and of the grid's columns. Nothing
//! reaches the grid until [`DraftSession::confirm`] succeeds; dropping or
//! cancelling the session discards the clone.

/// The external commit function.
pub mod commit;

/// Text predicates for typed edit fields.
pub mod validate;

use crate::common::{cell::CellPath, field_type::FieldType, value::Value};
use crate::error::{Error, Result};
use crate::grid::{Grid, LabelMerge, column::Column, merge_duplicate_labels, row::Row, row::RowId};

use commit::Commit;
use std::collections::BTreeSet;

/// Session settings.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionOptions {
    /// Types that may be picked for new fields and elements.
    pub allowed_types: Vec<FieldType>,
    /// Show absent cells as empty editable fields.
    pub display_empty: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            allowed_types: FieldType::ALL.to_vec(),
            display_empty: false,
        }
    }
}

impl SessionOptions {
    /// The types DynamoDB can store natively.
    pub fn dynamodb() -> Self {
        Self {
            allowed_types: vec![
                FieldType::String,
                FieldType::Number,
                FieldType::Boolean,
                FieldType::Binary,
                FieldType::Null,
                FieldType::StringSet,
                FieldType::NumberSet,
                FieldType::BinarySet,
                FieldType::List,
                FieldType::Map,
            ],
            ..Default::default()
        }
    }
}

/// A pending validation error.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Invalid {
    /// Field text that does not parse for the value's type.
    Value(CellPath),
    /// A map key used by another entry of the same map.
    MapKey(CellPath),
    /// A column label already used by another visible cell.
    Label(usize),
}

/// Result of a confirm that reached the commit function.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Confirmation {
    /// The draft was written and swapped into the grid; the session is closed.
    Committed,
    /// The commit function refused; the session stays open with this message.
    Rejected(String),
}

/// An editable clone of one row and the grid's columns.
#[derive(Debug)]
pub struct DraftSession<X> {
    target: Option<RowId>,
    original_row: Row<X>,
    original_columns: Vec<Column>,
    row: Row<X>,
    columns: Vec<Column>,
    merges: Vec<LabelMerge>,
    options: SessionOptions,
    errors: BTreeSet<Invalid>,
    message: Option<String>,
    closed: bool,
}

impl<X: Clone> DraftSession<X> {
    /// Start editing an existing row of `grid`.
    pub fn open(grid: &Grid<X>, id: RowId, options: SessionOptions) -> Result<Self> {
        let row = grid.row(id).ok_or(Error::RowNotFound(id))?;
        Ok(Self::new(Some(id), row.clone(), grid.columns().to_vec(), options))
    }

    /// Start editing a new row; on commit it is inserted first in `grid`.
    pub fn create(grid: &Grid<X>, template: Row<X>, options: SessionOptions) -> Self {
        Self::new(None, template, grid.columns().to_vec(), options)
    }

    fn new(target: Option<RowId>, row: Row<X>, columns: Vec<Column>, options: SessionOptions) -> Self {
        let mut session = Self {
            target,
            original_row: row.clone(),
            original_columns: columns.clone(),
            row,
            columns,
            merges: Vec::new(),
            options,
            errors: BTreeSet::new(),
            message: None,
            closed: false,
        };
        session.refresh_label_conflicts();
        session
    }
}

impl<X> DraftSession<X> {
    /// The draft row.
    pub fn row(&self) -> &Row<X> {
        &self.row
    }

    /// The draft columns.
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// The row as it was when the session opened.
    pub fn original_row(&self) -> &Row<X> {
        &self.original_row
    }

    /// The columns as they were when the session opened.
    pub fn original_columns(&self) -> &[Column] {
        &self.original_columns
    }

    /// The edited row's id, `None` when creating a row.
    pub fn target(&self) -> Option<RowId> {
        self.target
    }

    /// The session settings.
    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Pending validation errors.
    pub fn errors(&self) -> impl Iterator<Item = &Invalid> {
        self.errors.iter()
    }

    /// Number of pending validation errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Whether confirm would reach the commit function.
    pub fn can_confirm(&self) -> bool {
        !self.closed && self.errors.is_empty()
    }

    /// Message of the last rejected commit.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Whether the session was committed.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Columns to show: those with a present cell, or all of them when
    /// absent cells are displayed.
    pub fn visible_cells(&self) -> Vec<usize> {
        (0..self.columns.len())
            .filter(|&index| self.options.display_empty || !self.row.is_absent(index))
            .collect()
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            return Err(Error::SessionClosed);
        }
        Ok(())
    }

    fn ensure_allowed(&self, field_type: FieldType) -> Result<()> {
        if !self.options.allowed_types.contains(&field_type) {
            return Err(Error::TypeNotAllowed(field_type));
        }
        Ok(())
    }

    fn ensure_column(&self, column: usize) -> Result<()> {
        if column >= self.columns.len() {
            return Err(Error::ColumnOutOfRange(column));
        }
        Ok(())
    }

    fn value_mut(&mut self, path: &CellPath) -> Result<&mut Value> {
        self.row
            .cell_mut(path.column)
            .and_then(|cell| cell.get_mut(&path.elements))
            .ok_or_else(|| Error::PathNotFound(path.clone()))
    }

    fn value(&self, path: &CellPath) -> Result<&Value> {
        self.row
            .cell(path.column)
            .and_then(|cell| cell.get(&path.elements))
            .ok_or_else(|| Error::PathNotFound(path.clone()))
    }

    fn clear_errors_under(&mut self, path: &CellPath) {
        self.errors.retain(|invalid| match invalid {
            Invalid::Value(invalid_path) | Invalid::MapKey(invalid_path) => {
                !invalid_path.starts_with(path)
            }
            Invalid::Label(_) => true,
        });
    }

    fn set_error(&mut self, invalid: Invalid, is_invalid: bool) {
        if is_invalid {
            self.errors.insert(invalid);
        } else {
            self.errors.remove(&invalid);
        }
    }

    /// Whether another present cell of the draft already uses `candidate`
    /// as its column label. Absent cells count too when they are displayed.
    pub fn key_conflict(&self, column: usize, candidate: &str) -> bool {
        self.columns.iter().enumerate().any(|(index, other)| {
            index != column
                && other.label == candidate
                && (self.options.display_empty || !self.row.is_absent(index))
        })
    }

    fn refresh_label_conflicts(&mut self) {
        for index in 0..self.columns.len() {
            let column = &self.columns[index];
            let visible = self.options.display_empty || !self.row.is_absent(index);
            let conflict =
                column.label_editable && visible && self.key_conflict(index, &column.label);
            self.set_error(Invalid::Label(index), conflict);
        }
    }

    /// Append a new column with an editable, empty label and a
    /// default-valued cell of `field_type`. Returns the new column index.
    pub fn add_field(&mut self, field_type: FieldType) -> Result<usize> {
        self.ensure_open()?;
        self.ensure_allowed(field_type)?;
        self.row.pad_to(self.columns.len());
        self.columns.push(Column::attribute(""));
        self.row.values.push(Value::default_for(field_type).into());
        self.refresh_label_conflicts();
        Ok(self.columns.len() - 1)
    }

    /// Remove a cell's value. Required columns are reset to the default of
    /// their type instead; the column itself always stays.
    pub fn remove_field(&mut self, column: usize) -> Result<()> {
        self.ensure_open()?;
        self.ensure_column(column)?;
        self.row.pad_to(column + 1);
        let required = self.columns[column].required;
        let cell = &mut self.row.values[column];
        if required {
            *cell = Value::default_for(cell.field_type()).into();
        } else {
            cell.clear();
        }
        self.clear_errors_under(&CellPath::column(column));
        self.refresh_label_conflicts();
        Ok(())
    }

    /// Give an absent cell the default value of its type.
    pub fn restore(&mut self, column: usize) -> Result<()> {
        self.ensure_open()?;
        self.ensure_column(column)?;
        self.row.pad_to(column + 1);
        self.row.values[column].restore();
        self.refresh_label_conflicts();
        Ok(())
    }

    /// Rename a column. Returns whether the label now conflicts with
    /// another visible cell, which blocks confirm until resolved.
    pub fn set_label(&mut self, column: usize, label: impl Into<String>) -> Result<bool> {
        self.ensure_open()?;
        self.ensure_column(column)?;
        if !self.columns[column].label_editable {
            return Err(Error::LabelNotEditable(column));
        }
        self.columns[column].label = label.into();
        self.refresh_label_conflicts();
        Ok(self.errors.contains(&Invalid::Label(column)))
    }

    /// Apply edit-field text to the value at `path`.
    ///
    /// Strings take the text as is. Numbers and sizes must be integers and
    /// binaries base64; otherwise the value is kept, an error is recorded and
    /// `false` is returned. Other types have no text form.
    pub fn set_text(&mut self, path: &CellPath, text: &str) -> Result<bool> {
        self.ensure_open()?;
        let value = self.value_mut(path)?;
        let parsed = match value.field_type() {
            FieldType::String => Some(Value::String(text.to_string())),
            FieldType::Number => validate::parse_number(text).map(Value::Number),
            FieldType::Size => validate::parse_number(text).map(Value::Size),
            FieldType::Binary => validate::parse_binary(text).map(Value::Binary),
            other => {
                return Err(Error::TypeMismatch {
                    expected: FieldType::String,
                    actual: other,
                });
            }
        };
        let valid = parsed.is_some();
        if let Some(parsed) = parsed {
            *value = parsed;
        }
        self.set_error(Invalid::Value(path.clone()), !valid);
        Ok(valid)
    }

    /// Replace the value at `path`.
    ///
    /// A top-level cell may change type within the allowed types; set
    /// elements must keep the set's element type.
    pub fn set_value(&mut self, path: &CellPath, value: Value) -> Result<()> {
        self.ensure_open()?;
        match path.parent() {
            Some(parent) => {
                let index = path.elements[path.elements.len() - 1];
                self.value_mut(&parent)?.replace_element(index, value)?;
            }
            None => {
                self.ensure_column(path.column)?;
                self.ensure_allowed(value.field_type())?;
                self.row.pad_to(path.column + 1);
                self.row.values[path.column] = value.into();
                self.refresh_label_conflicts();
            }
        }
        self.clear_errors_under(path);
        Ok(())
    }

    /// Append a default element to the list, set or map at `path` and return
    /// the new element's path. Sets only take their element type.
    pub fn push_element(&mut self, path: &CellPath, field_type: FieldType) -> Result<CellPath> {
        self.ensure_open()?;
        let value = self.value(path)?;
        if value.required_element_type().is_none() {
            self.ensure_allowed(field_type)?;
        }
        let index = self.value_mut(path)?.push_element(field_type)?;
        if matches!(self.value(path)?, Value::Map(_)) {
            self.refresh_map_keys(path)?;
        }
        Ok(path.child(index))
    }

    /// Remove the nested element at `path`.
    pub fn remove_element(&mut self, path: &CellPath) -> Result<Value> {
        self.ensure_open()?;
        let parent = path.parent().ok_or_else(|| Error::PathNotFound(path.clone()))?;
        let index = path.elements[path.elements.len() - 1];
        let removed = self.value_mut(&parent)?.remove_element(index)?;
        self.clear_errors_under(path);
        let depth = parent.elements.len();
        self.errors = std::mem::take(&mut self.errors)
            .into_iter()
            .map(|invalid| match invalid {
                Invalid::Value(path) => Invalid::Value(shift_after(path, &parent, depth, index)),
                Invalid::MapKey(path) => Invalid::MapKey(shift_after(path, &parent, depth, index)),
                label => label,
            })
            .collect();
        if matches!(self.value(&parent)?, Value::Map(_)) {
            self.refresh_map_keys(&parent)?;
        }
        Ok(removed)
    }

    /// Rename the map entry at `path`. Returns whether another entry of the
    /// same map uses the key, which blocks confirm until resolved.
    pub fn set_map_key(&mut self, path: &CellPath, key: impl Into<String>) -> Result<bool> {
        self.ensure_open()?;
        let parent = path.parent().ok_or_else(|| Error::PathNotFound(path.clone()))?;
        let index = path.elements[path.elements.len() - 1];
        self.value_mut(&parent)?.set_map_key(index, key.into())?;
        self.refresh_map_keys(&parent)?;
        Ok(self.errors.contains(&Invalid::MapKey(path.clone())))
    }

    fn refresh_map_keys(&mut self, map_path: &CellPath) -> Result<()> {
        let map = self.value(map_path)?;
        let conflicts: Vec<bool> = (0..map.len().unwrap_or_default())
            .map(|index| map.map_key(index).is_some_and(|key| map.has_duplicate_key(key)))
            .collect();
        for (index, conflict) in conflicts.into_iter().enumerate() {
            self.set_error(Invalid::MapKey(map_path.child(index)), conflict);
        }
        Ok(())
    }

    /// Discard the draft.
    pub fn cancel(self) {}

    /// Pad the row to the column count and merge duplicate labels, earliest
    /// index surviving.
    fn reconcile(&mut self) {
        self.row.pad_to(self.columns.len());
        let merges = merge_duplicate_labels(&mut self.columns);
        merges.iter().for_each(|merge| merge.apply(&mut self.row));
        self.merges.extend(merges);
    }

    /// Reconcile the draft, hand it to `commit` and, on success, swap it
    /// into `grid`.
    ///
    /// Fails without calling `commit` while validation errors are pending or
    /// when the edited row has left the grid. A rejection keeps the session
    /// open for correction.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "dynamodb_grid.confirm", skip_all, fields(row = ?self.target), err)
    )]
    pub async fn confirm<C: Commit<X>>(&mut self, grid: &mut Grid<X>, commit: &C) -> Result<Confirmation> {
        self.ensure_open()?;
        if !self.errors.is_empty() {
            return Err(Error::ValidationPending(self.errors.len()));
        }
        if let Some(id) = self.target
            && grid.position(id).is_none()
        {
            return Err(Error::RowNotFound(id));
        }
        self.reconcile();
        let rejection = commit
            .commit(&self.row, &self.columns, &self.original_row, &self.original_columns)
            .await;
        if let Some(message) = rejection {
            self.message = Some(message.clone());
            return Ok(Confirmation::Rejected(message));
        }
        grid.apply_draft(
            self.target,
            std::mem::take(&mut self.row),
            std::mem::take(&mut self.columns),
            &self.merges,
        )?;
        self.message = None;
        self.closed = true;
        Ok(Confirmation::Committed)
    }
}

fn shift_after(mut path: CellPath, parent: &CellPath, depth: usize, removed: usize) -> CellPath {
    if path.starts_with(parent) && path.elements.len() > depth && path.elements[depth] > removed {
        path.elements[depth] -= 1;
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{cell::Cell, field_type::SetType};
    use crate::grid::load::Page;

    use std::cell::{Cell as Counter, RefCell};

    fn number(value: i64) -> Cell {
        Cell::Present(Value::Number(value))
    }

    fn string(value: &str) -> Cell {
        Cell::Present(Value::String(value.to_string()))
    }

    fn labels(columns: &[Column]) -> Vec<&str> {
        columns.iter().map(|column| column.label.as_str()).collect()
    }

    fn grid() -> (Grid, RowId) {
        let mut grid: Grid = Grid::new(vec![Column::key("id"), Column::attribute("name")]);
        let row = Row::new(vec![number(1), string("x")]);
        let id = row.id();
        grid.insert_row(0, row);
        grid.take_events();
        (grid, id)
    }

    #[derive(Default)]
    struct Recorder {
        calls: Counter<usize>,
        rejection: RefCell<Option<String>>,
        seen: RefCell<Vec<(Vec<Cell>, Vec<String>)>>,
    }

    impl Commit<()> for Recorder {
        async fn commit(
            &self,
            draft_row: &Row,
            draft_columns: &[Column],
            _original_row: &Row,
            _original_columns: &[Column],
        ) -> Option<String> {
            self.calls.set(self.calls.get() + 1);
            self.seen.borrow_mut().push((
                draft_row.values.clone(),
                draft_columns.iter().map(|column| column.label.clone()).collect(),
            ));
            self.rejection.borrow_mut().take()
        }
    }

    #[test]
    fn test_open_unknown_row_fails() {
        let (grid, _) = grid();
        assert!(matches!(
            DraftSession::open(&grid, RowId::new(), SessionOptions::default()),
            Err(Error::RowNotFound(_))
        ));
    }

    #[test]
    fn test_edits_do_not_touch_the_grid() {
        let (grid, id) = grid();
        let mut session = DraftSession::open(&grid, id, SessionOptions::default()).unwrap();
        session.set_text(&CellPath::column(1), "y").unwrap();
        session.add_field(FieldType::Boolean).unwrap();
        assert_eq!(grid.rows()[0].values, vec![number(1), string("x")]);
        assert_eq!(grid.columns().len(), 2);
        session.cancel();
    }

    #[test]
    fn test_add_field() {
        let (grid, id) = grid();
        let mut session = DraftSession::open(&grid, id, SessionOptions::default()).unwrap();
        let index = session.add_field(FieldType::NumberSet).unwrap();
        assert_eq!(index, 2);
        assert_eq!(session.columns()[2], Column::attribute(""));
        assert_eq!(
            session.row().values[2],
            Cell::Present(Value::Set(SetType::Number, Vec::new()))
        );
    }

    #[test]
    fn test_add_field_pads_short_row() {
        let mut grid: Grid = Grid::new(vec![Column::key("id"), Column::new("a"), Column::new("b")]);
        let row = Row::new(vec![number(1)]);
        let id = row.id();
        grid.insert_row(0, row);
        let mut session = DraftSession::open(&grid, id, SessionOptions::default()).unwrap();
        assert_eq!(session.add_field(FieldType::Null).unwrap(), 3);
        assert_eq!(session.row().values.len(), 4);
        assert_eq!(session.row().values[3], Cell::Present(Value::Null));
    }

    #[test]
    fn test_add_field_rejects_disallowed_type() {
        let (grid, id) = grid();
        let mut session = DraftSession::open(&grid, id, SessionOptions::dynamodb()).unwrap();
        assert!(matches!(
            session.add_field(FieldType::Date),
            Err(Error::TypeNotAllowed(FieldType::Date))
        ));
        assert_eq!(session.columns().len(), 2);
    }

    #[test]
    fn test_remove_field() {
        let (grid, id) = grid();
        let mut session = DraftSession::open(&grid, id, SessionOptions::default()).unwrap();
        session.remove_field(1).unwrap();
        assert_eq!(session.row().values[1], Cell::Absent(FieldType::String));
        assert_eq!(session.columns().len(), 2);
        assert_eq!(session.visible_cells(), vec![0]);
        session.restore(1).unwrap();
        assert_eq!(session.row().values[1], string(""));
    }

    #[test]
    fn test_remove_required_field_resets_to_default() {
        let (grid, id) = grid();
        let mut session = DraftSession::open(&grid, id, SessionOptions::default()).unwrap();
        session.remove_field(0).unwrap();
        assert_eq!(session.row().values[0], number(0));
        assert_eq!(session.columns().len(), 2);
    }

    #[test]
    fn test_display_empty_shows_absent_cells() {
        let (grid, id) = grid();
        let options = SessionOptions {
            display_empty: true,
            ..Default::default()
        };
        let mut session = DraftSession::open(&grid, id, options).unwrap();
        session.remove_field(1).unwrap();
        assert_eq!(session.visible_cells(), vec![0, 1]);
    }

    #[test]
    fn test_number_validation_counts_errors() {
        let (grid, id) = grid();
        let mut session = DraftSession::open(&grid, id, SessionOptions::default()).unwrap();
        let path = CellPath::column(0);
        assert!(!session.set_text(&path, "12a").unwrap());
        assert_eq!(session.error_count(), 1);
        assert_eq!(session.row().values[0], number(1));
        assert!(!session.set_text(&path, "").unwrap());
        assert_eq!(session.error_count(), 1);
        assert!(session.set_text(&path, "-12").unwrap());
        assert_eq!(session.error_count(), 0);
        assert_eq!(session.row().values[0], number(-12));
    }

    #[test]
    fn test_binary_validation() {
        let (grid, id) = grid();
        let mut session = DraftSession::open(&grid, id, SessionOptions::default()).unwrap();
        let index = session.add_field(FieldType::Binary).unwrap();
        let path = CellPath::column(index);
        assert!(!session.set_text(&path, "%%%").unwrap());
        assert_eq!(session.error_count(), 1);
        assert!(session.set_text(&path, "aGk=").unwrap());
        assert_eq!(session.row().values[index], Cell::Present(Value::Binary(b"hi".to_vec())));
        assert_eq!(session.error_count(), 0);
    }

    #[test]
    fn test_set_text_on_boolean_fails() {
        let (grid, id) = grid();
        let mut session = DraftSession::open(&grid, id, SessionOptions::default()).unwrap();
        let index = session.add_field(FieldType::Boolean).unwrap();
        assert!(matches!(
            session.set_text(&CellPath::column(index), "true"),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_removing_invalid_field_clears_its_error() {
        let (grid, id) = grid();
        let mut session = DraftSession::open(&grid, id, SessionOptions::default()).unwrap();
        let index = session.add_field(FieldType::Number).unwrap();
        session.set_text(&CellPath::column(index), "x").unwrap();
        assert_eq!(session.error_count(), 1);
        session.remove_field(index).unwrap();
        assert_eq!(session.error_count(), 0);
    }

    #[test]
    fn test_label_conflict() {
        let (grid, id) = grid();
        let mut session = DraftSession::open(&grid, id, SessionOptions::default()).unwrap();
        let index = session.add_field(FieldType::String).unwrap();
        assert!(session.key_conflict(index, "name"));
        assert!(session.set_label(index, "name").unwrap());
        assert_eq!(
            session.errors().collect::<Vec<_>>(),
            vec![&Invalid::Label(1), &Invalid::Label(index)]
        );
        assert!(!session.can_confirm());
        assert!(!session.set_label(index, "other").unwrap());
        assert_eq!(session.error_count(), 0);
    }

    #[test]
    fn test_label_conflict_ignores_absent_cells() {
        let (grid, id) = grid();
        let mut session = DraftSession::open(&grid, id, SessionOptions::default()).unwrap();
        session.remove_field(1).unwrap();
        let index = session.add_field(FieldType::String).unwrap();
        assert!(!session.set_label(index, "name").unwrap());
        assert_eq!(session.error_count(), 0);
        session.restore(1).unwrap();
        assert_eq!(session.error_count(), 2);
    }

    #[test]
    fn test_fixed_label_cannot_be_renamed() {
        let (grid, id) = grid();
        let mut session = DraftSession::open(&grid, id, SessionOptions::default()).unwrap();
        assert!(matches!(
            session.set_label(0, "other"),
            Err(Error::LabelNotEditable(0))
        ));
    }

    #[test]
    fn test_nested_editing() {
        let (grid, id) = grid();
        let mut session = DraftSession::open(&grid, id, SessionOptions::default()).unwrap();
        let list = CellPath::column(session.add_field(FieldType::List).unwrap());
        let first = session.push_element(&list, FieldType::Number).unwrap();
        let second = session.push_element(&list, FieldType::NumberSet).unwrap();
        let element = session.push_element(&second, FieldType::Number).unwrap();
        assert!(matches!(
            session.push_element(&second, FieldType::String),
            Err(Error::TypeMismatch { .. })
        ));
        assert!(session.set_text(&element, "5").unwrap());
        assert!(!session.set_text(&first, "five").unwrap());
        assert_eq!(
            session.row().values[list.column],
            Cell::Present(Value::List(vec![
                Value::Number(0),
                Value::Set(SetType::Number, vec![Value::Number(5)]),
            ]))
        );
        assert_eq!(session.error_count(), 1);
        session.remove_element(&first).unwrap();
        assert_eq!(session.error_count(), 0);
    }

    #[test]
    fn test_remove_element_shifts_later_errors() {
        let (grid, id) = grid();
        let mut session = DraftSession::open(&grid, id, SessionOptions::default()).unwrap();
        let list = CellPath::column(session.add_field(FieldType::List).unwrap());
        let first = session.push_element(&list, FieldType::Number).unwrap();
        let second = session.push_element(&list, FieldType::Number).unwrap();
        session.set_text(&second, "bad").unwrap();
        session.remove_element(&first).unwrap();
        assert_eq!(
            session.errors().collect::<Vec<_>>(),
            vec![&Invalid::Value(list.child(0))]
        );
        assert!(session.set_text(&list.child(0), "1").unwrap());
        assert_eq!(session.error_count(), 0);
    }

    #[test]
    fn test_map_key_conflicts() {
        let (grid, id) = grid();
        let mut session = DraftSession::open(&grid, id, SessionOptions::default()).unwrap();
        let map = CellPath::column(session.add_field(FieldType::Map).unwrap());
        let first = session.push_element(&map, FieldType::String).unwrap();
        assert_eq!(session.error_count(), 0);
        let second = session.push_element(&map, FieldType::Number).unwrap();
        assert_eq!(session.error_count(), 2);
        assert!(!session.set_map_key(&first, "a").unwrap());
        assert!(!session.set_map_key(&second, "b").unwrap());
        assert_eq!(session.error_count(), 0);
        assert!(session.set_map_key(&second, "a").unwrap());
        session.remove_element(&second).unwrap();
        assert_eq!(session.error_count(), 0);
    }

    #[test]
    fn test_set_value_changes_top_level_type() {
        let (grid, id) = grid();
        let mut session = DraftSession::open(&grid, id, SessionOptions::default()).unwrap();
        session.set_value(&CellPath::column(1), Value::Boolean(true)).unwrap();
        assert_eq!(session.row().values[1], Cell::Present(Value::Boolean(true)));
        let options = SessionOptions::dynamodb();
        let mut session = DraftSession::open(&grid, id, options).unwrap();
        assert!(matches!(
            session.set_value(&CellPath::column(1), Value::Size(1)),
            Err(Error::TypeNotAllowed(FieldType::Size))
        ));
    }

    #[tokio::test]
    async fn test_confirm_commits_and_swaps_into_grid() {
        let (mut grid, id) = grid();
        let mut session = DraftSession::open(&grid, id, SessionOptions::default()).unwrap();
        session.set_text(&CellPath::column(1), "y").unwrap();
        let index = session.add_field(FieldType::Number).unwrap();
        session.set_label(index, "age").unwrap();
        session.set_text(&CellPath::column(index), "30").unwrap();
        let commit = Recorder::default();

        let confirmation = session.confirm(&mut grid, &commit).await.unwrap();

        assert_eq!(confirmation, Confirmation::Committed);
        assert!(session.is_closed());
        assert_eq!(commit.calls.get(), 1);
        assert_eq!(labels(grid.columns()), vec!["id", "name", "age"]);
        let row = grid.row(id).unwrap();
        assert_eq!(row.values, vec![number(1), string("y"), number(30)]);
        assert!(matches!(
            session.confirm(&mut grid, &commit).await,
            Err(Error::SessionClosed)
        ));
    }

    #[tokio::test]
    async fn test_confirm_is_blocked_by_validation_errors() {
        let (mut grid, id) = grid();
        let mut session = DraftSession::open(&grid, id, SessionOptions::default()).unwrap();
        session.set_text(&CellPath::column(0), "12a").unwrap();
        let commit = Recorder::default();

        let result = session.confirm(&mut grid, &commit).await;

        assert!(matches!(result, Err(Error::ValidationPending(1))));
        assert_eq!(commit.calls.get(), 0);
        assert!(!session.is_closed());

        session.set_text(&CellPath::column(0), "12").unwrap();
        let confirmation = session.confirm(&mut grid, &commit).await.unwrap();
        assert_eq!(confirmation, Confirmation::Committed);
        assert_eq!(grid.row(id).unwrap().values[0], number(12));
    }

    #[tokio::test]
    async fn test_rejected_commit_keeps_session_open() {
        let (mut grid, id) = grid();
        let mut session = DraftSession::open(&grid, id, SessionOptions::default()).unwrap();
        session.set_text(&CellPath::column(1), "y").unwrap();
        let commit = Recorder::default();
        *commit.rejection.borrow_mut() = Some("Error while updating item".to_string());

        let confirmation = session.confirm(&mut grid, &commit).await.unwrap();

        assert_eq!(
            confirmation,
            Confirmation::Rejected("Error while updating item".to_string())
        );
        assert_eq!(session.message(), Some("Error while updating item"));
        assert_eq!(grid.row(id).unwrap().values[1], string("x"));

        let confirmation = session.confirm(&mut grid, &commit).await.unwrap();
        assert_eq!(confirmation, Confirmation::Committed);
        assert_eq!(session.message(), None);
        assert_eq!(grid.row(id).unwrap().values[1], string("y"));
    }

    #[tokio::test]
    async fn test_confirm_merges_duplicate_labels() {
        let mut grid: Grid = Grid::new(vec![Column::key("id"), Column::attribute("name")]);
        let row = Row::new(vec![number(1), Cell::Absent(FieldType::String)]);
        let other = Row::new(vec![number(2), string("kept")]);
        let id = row.id();
        let other_id = other.id();
        grid.insert_row(0, row);
        grid.insert_row(1, other);
        let mut session = DraftSession::open(&grid, id, SessionOptions::default()).unwrap();
        let index = session.add_field(FieldType::String).unwrap();
        assert!(!session.set_label(index, "name").unwrap());
        session.set_text(&CellPath::column(index), "merged").unwrap();
        let commit = Recorder::default();

        session.confirm(&mut grid, &commit).await.unwrap();

        let seen = commit.seen.borrow();
        assert_eq!(seen[0].0, vec![number(1), string("merged")]);
        assert_eq!(seen[0].1, vec!["id".to_string(), "name".to_string()]);
        assert_eq!(labels(grid.columns()), vec!["id", "name"]);
        assert_eq!(grid.row(other_id).unwrap().values, vec![number(2), string("kept")]);
    }

    #[tokio::test]
    async fn test_confirm_merge_takes_absent_later_cell() {
        let (mut grid, id) = grid();
        let mut session = DraftSession::open(&grid, id, SessionOptions::default()).unwrap();
        let index = session.add_field(FieldType::Number).unwrap();
        session.remove_field(index).unwrap();
        assert!(!session.set_label(index, "name").unwrap());
        let commit = Recorder::default();

        session.confirm(&mut grid, &commit).await.unwrap();

        let expected = vec![number(1), Cell::Absent(FieldType::Number)];
        let seen = commit.seen.borrow();
        assert_eq!(seen[0].0, expected);
        assert_eq!(seen[0].1, vec!["id".to_string(), "name".to_string()]);
        assert_eq!(grid.row(id).unwrap().values, expected);
    }

    #[tokio::test]
    async fn test_confirm_fails_when_target_row_is_gone() {
        let (mut grid, id) = grid();
        grid.set_loader(|_| {});
        let mut session = DraftSession::open(&grid, id, SessionOptions::default()).unwrap();
        session.set_text(&CellPath::column(1), "y").unwrap();
        let request = grid.reload().unwrap();
        assert!(grid.apply_page(request, Page::rows(vec![Row::new(vec![number(1), string("x")])])));
        let commit = Recorder::default();

        for _ in 0..2 {
            let result = session.confirm(&mut grid, &commit).await;
            assert!(matches!(result, Err(Error::RowNotFound(missing)) if missing == id));
        }
        assert_eq!(commit.calls.get(), 0);
        assert!(!session.is_closed());
        assert_eq!(grid.rows()[0].values, vec![number(1), string("x")]);
    }

    #[tokio::test]
    async fn test_create_inserts_first() {
        let (mut grid, _) = grid();
        let template = Row::new(vec![number(0), string("")]);
        let new_id = template.id();
        let mut session = DraftSession::create(&grid, template, SessionOptions::default());
        session.set_text(&CellPath::column(0), "9").unwrap();

        session.confirm(&mut grid, &Recorder::default()).await.unwrap();

        assert_eq!(grid.rows().len(), 2);
        assert_eq!(grid.rows()[0].id(), new_id);
        assert_eq!(grid.rows()[0].values[0], number(9));
    }
}

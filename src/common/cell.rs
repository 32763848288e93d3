use crate::common::{field_type::FieldType, value::Value};

use std::fmt;

/// One grid slot: a present value, or an absent value that still remembers
/// its type.
///
/// Absent is distinct from a present [`Value::Null`].
///
/// ```rust
/// use dynamodb_grid::common::{cell::Cell, field_type::FieldType, value::Value};
///
/// let mut cell = Cell::Absent(FieldType::Number);
/// assert_ne!(cell, Cell::Present(Value::Null));
/// cell.restore();
/// assert_eq!(cell, Cell::Present(Value::Number(0)));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    /// A value is present.
    Present(Value),
    /// No value, typed for when one gets added.
    Absent(FieldType),
}

impl Default for Cell {
    fn default() -> Self {
        Self::Absent(FieldType::String)
    }
}

impl From<Value> for Cell {
    fn from(value: Value) -> Self {
        Self::Present(value)
    }
}

impl Cell {
    /// The cell's type, present or not.
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::Present(value) => value.field_type(),
            Self::Absent(field_type) => *field_type,
        }
    }

    /// Whether no value is present.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent(_))
    }

    /// The present value.
    pub fn value(&self) -> Option<&Value> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent(_) => None,
        }
    }

    /// Mutable access to the present value.
    pub fn value_mut(&mut self) -> Option<&mut Value> {
        match self {
            Self::Present(value) => Some(value),
            Self::Absent(_) => None,
        }
    }

    /// Drop the value, keeping the type.
    pub fn clear(&mut self) {
        *self = Self::Absent(self.field_type());
    }

    /// Fill an absent cell with the default of its type; present cells are
    /// left untouched.
    pub fn restore(&mut self) {
        if let Self::Absent(field_type) = self {
            *self = Self::Present(Value::default_for(*field_type));
        }
    }

    /// Follow nested element indices from the cell's value.
    pub fn get(&self, elements: &[usize]) -> Option<&Value> {
        elements
            .iter()
            .try_fold(self.value()?, |value, &index| value.element(index))
    }

    /// Mutable variant of [`Cell::get`].
    pub fn get_mut(&mut self, elements: &[usize]) -> Option<&mut Value> {
        elements
            .iter()
            .try_fold(self.value_mut()?, |value, &index| value.element_mut(index))
    }
}

/// Address of a value inside a row: a column, then nested element indices.
#[derive(Clone, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CellPath {
    /// Column index.
    pub column: usize,
    /// Element indices into lists, sets and maps.
    pub elements: Vec<usize>,
}

impl CellPath {
    /// The top-level cell of a column.
    pub fn column(column: usize) -> Self {
        Self {
            column,
            elements: Vec::new(),
        }
    }

    /// The path of a nested element below this one.
    pub fn child(&self, index: usize) -> Self {
        let mut elements = Vec::with_capacity(self.elements.len() + 1);
        elements.extend_from_slice(&self.elements);
        elements.push(index);
        Self {
            column: self.column,
            elements,
        }
    }

    /// The enclosing path, `None` for a top-level cell.
    pub fn parent(&self) -> Option<Self> {
        let (_, elements) = self.elements.split_last()?;
        Some(Self {
            column: self.column,
            elements: elements.to_vec(),
        })
    }

    /// Whether `self` is `other` or nested below it.
    pub fn starts_with(&self, other: &Self) -> bool {
        self.column == other.column && self.elements.starts_with(&other.elements)
    }
}

impl From<usize> for CellPath {
    fn from(column: usize) -> Self {
        Self::column(column)
    }
}

impl fmt::Display for CellPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column)?;
        for index in &self.elements {
            write!(f, "/{index}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::field_type::SetType;

    use rstest::rstest;

    fn nested() -> Cell {
        Cell::Present(Value::Map(vec![
            ("a".to_string(), Value::Number(1)),
            (
                "b".to_string(),
                Value::List(vec![
                    Value::Null,
                    Value::Set(SetType::String, vec![Value::String("x".to_string())]),
                ]),
            ),
        ]))
    }

    #[rstest]
    #[case::root(vec![], Some(FieldType::Map))]
    #[case::map_value(vec![0], Some(FieldType::Number))]
    #[case::list_in_map(vec![1, 0], Some(FieldType::Null))]
    #[case::set_element(vec![1, 1, 0], Some(FieldType::String))]
    #[case::out_of_range(vec![1, 2], None)]
    #[case::below_scalar(vec![0, 0], None)]
    fn test_get(#[case] elements: Vec<usize>, #[case] expected: Option<FieldType>) {
        let cell = nested();
        assert_eq!(cell.get(&elements).map(Value::field_type), expected);
    }

    #[test]
    fn test_get_mut_edits_in_place() {
        let mut cell = nested();
        *cell.get_mut(&[1, 0]).unwrap() = Value::Boolean(true);
        assert_eq!(cell.get(&[1, 0]), Some(&Value::Boolean(true)));
    }

    #[test]
    fn test_absent_has_no_path() {
        let cell = Cell::Absent(FieldType::List);
        assert_eq!(cell.get(&[]), None);
        assert_eq!(cell.field_type(), FieldType::List);
    }

    #[test]
    fn test_clear_and_restore() {
        let mut cell = Cell::Present(Value::String("abc".to_string()));
        cell.clear();
        assert_eq!(cell, Cell::Absent(FieldType::String));
        cell.restore();
        assert_eq!(cell, Cell::Present(Value::String(String::new())));
    }

    #[test]
    fn test_absent_differs_from_null() {
        assert_ne!(Cell::Absent(FieldType::Null), Cell::Present(Value::Null));
    }

    #[rstest]
    #[case::same(CellPath::column(1), CellPath::column(1), true)]
    #[case::nested(CellPath::column(1).child(2), CellPath::column(1), true)]
    #[case::other_column(CellPath::column(2).child(0), CellPath::column(1), false)]
    #[case::shallower(CellPath::column(1), CellPath::column(1).child(0), false)]
    fn test_starts_with(#[case] path: CellPath, #[case] prefix: CellPath, #[case] expected: bool) {
        assert_eq!(path.starts_with(&prefix), expected);
    }

    #[test]
    fn test_path_display_and_parent() {
        let path = CellPath::column(3).child(1).child(0);
        assert_eq!(path.to_string(), "3/1/0");
        assert_eq!(path.parent(), Some(CellPath::column(3).child(1)));
        assert_eq!(CellPath::column(3).parent(), None);
    }
}

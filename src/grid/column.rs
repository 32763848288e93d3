/// Horizontal alignment of a column's content.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Alignment {
    /// Start of the reading direction.
    #[default]
    Leading,
    /// Centered.
    Center,
    /// End of the reading direction.
    Trailing,
}

/// Layout hints passed through to whatever renders the grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisplayHints {
    /// Minimum width, in points.
    pub min_width: Option<f32>,
    /// Maximum width, in points.
    pub max_width: Option<f32>,
    /// Content alignment.
    pub alignment: Alignment,
}

/// Column descriptor. Column `i` describes cell `i` of every row.
///
/// ```rust
/// use dynamodb_grid::grid::column::Column;
///
/// let column = Column {
///     required: true,
///     ..Column::new("id")
/// };
/// assert!(column.editable);
/// assert!(!column.label_editable);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    /// Header label; for item grids, the attribute name.
    pub label: String,
    /// Whether cell values can be edited.
    pub editable: bool,
    /// Whether the label itself can be edited.
    pub label_editable: bool,
    /// Required cells can never be removed from a row while editing.
    pub required: bool,
    /// Layout hints.
    pub display: DisplayHints,
}

impl Default for Column {
    fn default() -> Self {
        Self {
            label: String::new(),
            editable: true,
            label_editable: false,
            required: false,
            display: DisplayHints::default(),
        }
    }
}

impl Column {
    /// An editable, optional column with a fixed label.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            ..Default::default()
        }
    }

    /// A key column: required and with a fixed label.
    pub fn key(label: impl Into<String>) -> Self {
        Self {
            required: true,
            ..Self::new(label)
        }
    }

    /// A column whose label the user may rename.
    pub fn attribute(label: impl Into<String>) -> Self {
        Self {
            label_editable: true,
            ..Self::new(label)
        }
    }
}

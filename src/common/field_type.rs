use std::fmt;

/// Type tag of a grid cell.
///
/// `Size` and `Date` are display refinements of numbers and are not distinct
/// on the wire.
///
/// ```rust
/// use dynamodb_grid::common::field_type::{FieldType, element_type_of};
///
/// assert_eq!(element_type_of(FieldType::NumberSet), FieldType::Number);
/// assert_eq!(FieldType::StringSet.to_string(), "string set");
/// ```
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum FieldType {
    /// UTF-8 text.
    #[default]
    String,
    /// Signed integer.
    Number,
    /// `true` or `false`.
    Boolean,
    /// Raw bytes.
    Binary,
    /// Present null.
    Null,
    /// Byte count, shown with a unit.
    Size,
    /// Point in time.
    Date,
    /// Ordered sequence of heterogeneous values.
    List,
    /// Ordered key/value pairs.
    Map,
    /// Set of strings.
    StringSet,
    /// Set of numbers.
    NumberSet,
    /// Set of byte strings.
    BinarySet,
    /// Set of booleans.
    BooleanSet,
    /// Set of sizes.
    SizeSet,
    /// Set of dates.
    DateSet,
}

impl FieldType {
    /// Every field type, in picker order.
    pub const ALL: [Self; 15] = [
        Self::Date,
        Self::String,
        Self::Size,
        Self::Number,
        Self::Boolean,
        Self::Binary,
        Self::Null,
        Self::List,
        Self::Map,
        Self::StringSet,
        Self::NumberSet,
        Self::BinarySet,
        Self::BooleanSet,
        Self::SizeSet,
        Self::DateSet,
    ];

    /// The set kind behind a `*_set` type, `None` for every other type.
    pub fn set_type(self) -> Option<SetType> {
        match self {
            Self::StringSet => Some(SetType::String),
            Self::NumberSet => Some(SetType::Number),
            Self::BinarySet => Some(SetType::Binary),
            Self::BooleanSet => Some(SetType::Boolean),
            Self::SizeSet => Some(SetType::Size),
            Self::DateSet => Some(SetType::Date),
            _ => None,
        }
    }

    /// Whether this is one of the `*_set` types.
    pub fn is_set(self) -> bool {
        self.set_type().is_some()
    }

    /// Whether values of this type hold nested values (list, map or set).
    pub fn is_collection(self) -> bool {
        matches!(self, Self::List | Self::Map) || self.is_set()
    }

    /// The element type of a set; any other type is returned unchanged.
    pub fn element_type(self) -> Self {
        match self.set_type() {
            Some(set_type) => set_type.element_type(),
            None => self,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Binary => "binary",
            Self::Null => "null",
            Self::Size => "size",
            Self::Date => "date",
            Self::List => "list",
            Self::Map => "map",
            Self::StringSet => "string set",
            Self::NumberSet => "number set",
            Self::BinarySet => "binary set",
            Self::BooleanSet => "boolean set",
            Self::SizeSet => "size set",
            Self::DateSet => "date set",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Primitive counterpart of a `*_set` type.
pub fn element_type_of(set_type: FieldType) -> FieldType {
    set_type.element_type()
}

/// Kind of a homogeneous set.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SetType {
    /// Elements are strings.
    String,
    /// Elements are numbers.
    Number,
    /// Elements are byte strings.
    Binary,
    /// Elements are booleans.
    Boolean,
    /// Elements are sizes.
    Size,
    /// Elements are dates.
    Date,
}

impl SetType {
    /// The field type of each element.
    pub fn element_type(self) -> FieldType {
        match self {
            Self::String => FieldType::String,
            Self::Number => FieldType::Number,
            Self::Binary => FieldType::Binary,
            Self::Boolean => FieldType::Boolean,
            Self::Size => FieldType::Size,
            Self::Date => FieldType::Date,
        }
    }
}

impl From<SetType> for FieldType {
    fn from(set_type: SetType) -> Self {
        match set_type {
            SetType::String => Self::StringSet,
            SetType::Number => Self::NumberSet,
            SetType::Binary => Self::BinarySet,
            SetType::Boolean => Self::BooleanSet,
            SetType::Size => Self::SizeSet,
            SetType::Date => Self::DateSet,
        }
    }
}

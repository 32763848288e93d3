use crate::common::field_type::{FieldType, SetType};
use crate::error::{Error, Result};

use base64::{Engine, engine::general_purpose::STANDARD};
use chrono::{DateTime, Utc};
use std::fmt;

/// A present cell value.
///
/// There is one variant per [`FieldType`]; sets share a variant tagged with
/// their [`SetType`]. Map entries keep their insertion order and may
/// transiently share a key while being edited.
///
/// ```rust
/// use dynamodb_grid::common::{field_type::FieldType, value::Value};
///
/// let value = Value::default_for(FieldType::Number);
/// assert_eq!(value, Value::Number(0));
/// assert_eq!(value.field_type(), FieldType::Number);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// UTF-8 text.
    String(String),
    /// Signed integer.
    Number(i64),
    /// Boolean.
    Boolean(bool),
    /// Raw bytes.
    Binary(Vec<u8>),
    /// Present null.
    Null,
    /// Byte count.
    Size(i64),
    /// Point in time.
    Date(DateTime<Utc>),
    /// Ordered heterogeneous values.
    List(Vec<Value>),
    /// Ordered key/value pairs.
    Map(Vec<(String, Value)>),
    /// Homogeneous set; every element has the set's element type.
    Set(SetType, Vec<Value>),
}

impl Value {
    /// Canonical empty instance of a type.
    ///
    /// Dates default to the current time.
    pub fn default_for(field_type: FieldType) -> Self {
        match field_type {
            FieldType::String => Self::String(String::new()),
            FieldType::Number => Self::Number(0),
            FieldType::Boolean => Self::Boolean(false),
            FieldType::Binary => Self::Binary(Vec::new()),
            FieldType::Null => Self::Null,
            FieldType::Size => Self::Size(0),
            FieldType::Date => Self::Date(Utc::now()),
            FieldType::List => Self::List(Vec::new()),
            FieldType::Map => Self::Map(Vec::new()),
            FieldType::StringSet => Self::Set(SetType::String, Vec::new()),
            FieldType::NumberSet => Self::Set(SetType::Number, Vec::new()),
            FieldType::BinarySet => Self::Set(SetType::Binary, Vec::new()),
            FieldType::BooleanSet => Self::Set(SetType::Boolean, Vec::new()),
            FieldType::SizeSet => Self::Set(SetType::Size, Vec::new()),
            FieldType::DateSet => Self::Set(SetType::Date, Vec::new()),
        }
    }

    /// The type tag of this value.
    pub fn field_type(&self) -> FieldType {
        match self {
            Self::String(_) => FieldType::String,
            Self::Number(_) => FieldType::Number,
            Self::Boolean(_) => FieldType::Boolean,
            Self::Binary(_) => FieldType::Binary,
            Self::Null => FieldType::Null,
            Self::Size(_) => FieldType::Size,
            Self::Date(_) => FieldType::Date,
            Self::List(_) => FieldType::List,
            Self::Map(_) => FieldType::Map,
            Self::Set(set_type, _) => (*set_type).into(),
        }
    }

    /// Number of nested elements, `None` for scalars.
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::List(values) | Self::Set(_, values) => Some(values.len()),
            Self::Map(entries) => Some(entries.len()),
            _ => None,
        }
    }

    /// Whether this is a collection without elements.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// The nested value at `index`: a list or set element, or a map entry value.
    pub fn element(&self, index: usize) -> Option<&Self> {
        match self {
            Self::List(values) | Self::Set(_, values) => values.get(index),
            Self::Map(entries) => entries.get(index).map(|(_, value)| value),
            _ => None,
        }
    }

    /// Mutable access to the nested value at `index`.
    pub fn element_mut(&mut self, index: usize) -> Option<&mut Self> {
        match self {
            Self::List(values) | Self::Set(_, values) => values.get_mut(index),
            Self::Map(entries) => entries.get_mut(index).map(|(_, value)| value),
            _ => None,
        }
    }

    /// The type a new element of this collection must have, if fixed.
    pub fn required_element_type(&self) -> Option<FieldType> {
        match self {
            Self::Set(set_type, _) => Some(set_type.element_type()),
            _ => None,
        }
    }

    /// Append a default element of `field_type` and return its index.
    ///
    /// Maps get a new entry with an empty key. Sets only accept their
    /// element type.
    pub fn push_element(&mut self, field_type: FieldType) -> Result<usize> {
        if let Some(expected) = self.required_element_type()
            && expected != field_type
        {
            return Err(Error::TypeMismatch {
                expected,
                actual: field_type,
            });
        }
        let element = Self::default_for(field_type);
        match self {
            Self::List(values) | Self::Set(_, values) => {
                values.push(element);
                Ok(values.len() - 1)
            }
            Self::Map(entries) => {
                entries.push((String::new(), element));
                Ok(entries.len() - 1)
            }
            other => Err(Error::NotACollection(other.field_type())),
        }
    }

    /// Remove and return the nested value at `index`.
    pub fn remove_element(&mut self, index: usize) -> Result<Self> {
        let len = self
            .len()
            .ok_or_else(|| Error::NotACollection(self.field_type()))?;
        if index >= len {
            return Err(Error::ElementOutOfRange(index));
        }
        let removed = match self {
            Self::List(values) | Self::Set(_, values) => values.remove(index),
            Self::Map(entries) => entries.remove(index).1,
            _ => unreachable!("len() is only defined for collections"),
        };
        Ok(removed)
    }

    /// Replace the nested value at `index`, keeping the set homogeneous.
    pub fn replace_element(&mut self, index: usize, value: Self) -> Result<Self> {
        if let Some(expected) = self.required_element_type()
            && expected != value.field_type()
        {
            return Err(Error::TypeMismatch {
                expected,
                actual: value.field_type(),
            });
        }
        let field_type = self.field_type();
        let slot = self
            .element_mut(index)
            .ok_or(if field_type.is_collection() {
                Error::ElementOutOfRange(index)
            } else {
                Error::NotACollection(field_type)
            })?;
        Ok(std::mem::replace(slot, value))
    }

    /// Key of the map entry at `index`.
    pub fn map_key(&self, index: usize) -> Option<&str> {
        match self {
            Self::Map(entries) => entries.get(index).map(|(key, _)| key.as_str()),
            _ => None,
        }
    }

    /// Rename the map entry at `index`.
    pub fn set_map_key(&mut self, index: usize, key: String) -> Result<()> {
        match self {
            Self::Map(entries) => {
                let entry = entries
                    .get_mut(index)
                    .ok_or(Error::ElementOutOfRange(index))?;
                entry.0 = key;
                Ok(())
            }
            other => Err(Error::TypeMismatch {
                expected: FieldType::Map,
                actual: other.field_type(),
            }),
        }
    }

    /// Whether more than one map entry uses `key`.
    pub fn has_duplicate_key(&self, key: &str) -> bool {
        match self {
            Self::Map(entries) => entries.iter().filter(|(k, _)| k == key).count() > 1,
            _ => false,
        }
    }

    /// Text shown in an edit field for scalar values.
    pub fn text(&self) -> Option<String> {
        match self {
            Self::String(value) => Some(value.clone()),
            Self::Number(value) | Self::Size(value) => Some(value.to_string()),
            Self::Binary(bytes) => Some(STANDARD.encode(bytes)),
            Self::Boolean(value) => Some(value.to_string()),
            Self::Date(date) => Some(date.to_rfc3339()),
            Self::Null => Some("NULL".to_string()),
            Self::List(_) | Self::Map(_) | Self::Set(..) => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Size(bytes) => write!(f, "{bytes} bytes"),
            Self::List(values) | Self::Set(_, values) => {
                write!(f, "{} ({} items)", self.field_type(), values.len())
            }
            Self::Map(entries) => write!(f, "map ({} entries)", entries.len()),
            scalar => f.write_str(&scalar.text().unwrap_or_default()),
        }
    }
}

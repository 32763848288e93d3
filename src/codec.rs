//! Conversion between cell values and attribute values.
//!
//! Encoding is type directed and total for well-formed values. Decoding never
//! fails: anything that cannot be represented becomes an absent cell.
//!
//! | Value | Wire |
//! |---|---|
//! | string | `S` |
//! | number, size | `N` |
//! | date | `N`, epoch seconds |
//! | boolean | `BOOL` |
//! | binary | `B` |
//! | null | `NULL(true)` |
//! | string set | `SS` |
//! | number, size and date sets | `NS` |
//! | binary set | `BS` |
//! | boolean set | `L` of `BOOL` |
//! | list | `L` |
//! | map | `M`, in insertion order |

/// The ordered wire model and its SDK and JSON forms.
pub mod attribute_value;

pub use attribute_value::{AttributeValue, Item};

use crate::common::{
    cell::Cell,
    field_type::{FieldType, SetType},
    value::Value,
};
use crate::error::Result;
use crate::grid::{column::Column, row::Row};

use aws_sdk_dynamodb::types;
use chrono::DateTime;
use serde::{Serialize, de::DeserializeOwned};
use std::collections;

fn element_mismatch(set_type: SetType, element: &Value) -> ! {
    panic!(
        "{} element in a {} value",
        element.field_type(),
        FieldType::from(set_type)
    )
}

fn encode_set_element(set_type: SetType, element: &Value) -> String {
    match (set_type, element) {
        (SetType::String, Value::String(value)) => value.clone(),
        (SetType::Number, Value::Number(value)) | (SetType::Size, Value::Size(value)) => {
            value.to_string()
        }
        (SetType::Date, Value::Date(date)) => date.timestamp().to_string(),
        _ => element_mismatch(set_type, element),
    }
}

/// Encode a present value.
///
/// Maps keep their entry order. A map holding the same key twice keeps the
/// last entry at the position of the first, so it does not round-trip; draft
/// sessions block such maps before they get here.
///
/// # Panics
///
/// When a set holds an element of another type than the set's element type.
pub fn encode(value: &Value) -> AttributeValue {
    match value {
        Value::String(value) => AttributeValue::S(value.clone()),
        Value::Number(value) | Value::Size(value) => AttributeValue::N(value.to_string()),
        Value::Date(date) => AttributeValue::N(date.timestamp().to_string()),
        Value::Boolean(value) => AttributeValue::Bool(*value),
        Value::Binary(bytes) => AttributeValue::B(bytes.clone()),
        Value::Null => AttributeValue::Null(true),
        Value::List(values) => AttributeValue::L(values.iter().map(encode).collect()),
        Value::Map(entries) => AttributeValue::M(
            entries
                .iter()
                .map(|(key, value)| (key.clone(), encode(value)))
                .collect(),
        ),
        Value::Set(SetType::String, elements) => AttributeValue::Ss(
            elements
                .iter()
                .map(|element| encode_set_element(SetType::String, element))
                .collect(),
        ),
        Value::Set(SetType::Binary, elements) => AttributeValue::Bs(
            elements
                .iter()
                .map(|element| match element {
                    Value::Binary(bytes) => bytes.clone(),
                    other => element_mismatch(SetType::Binary, other),
                })
                .collect(),
        ),
        Value::Set(SetType::Boolean, elements) => AttributeValue::L(
            elements
                .iter()
                .map(|element| match element {
                    Value::Boolean(value) => AttributeValue::Bool(*value),
                    other => element_mismatch(SetType::Boolean, other),
                })
                .collect(),
        ),
        Value::Set(set_type, elements) => AttributeValue::Ns(
            elements
                .iter()
                .map(|element| encode_set_element(*set_type, element))
                .collect(),
        ),
    }
}

/// Encode a cell; absent cells have no wire form.
pub fn encode_cell(cell: &Cell) -> Option<AttributeValue> {
    cell.value().map(encode)
}

/// Encode a row against its columns, leaving absent cells out.
///
/// When two columns share a label the later one wins.
pub fn encode_item<X>(columns: &[Column], row: &Row<X>) -> Item {
    columns
        .iter()
        .zip(&row.values)
        .filter_map(|(column, cell)| Some((column.label.clone(), encode_cell(cell)?)))
        .collect()
}

/// The field type a wire value decodes to.
pub fn wire_type(value: &AttributeValue) -> FieldType {
    match value {
        AttributeValue::S(_) | AttributeValue::Unknown => FieldType::String,
        AttributeValue::N(_) => FieldType::Number,
        AttributeValue::Bool(_) => FieldType::Boolean,
        AttributeValue::B(_) => FieldType::Binary,
        AttributeValue::Null(_) => FieldType::Null,
        AttributeValue::Ss(_) => FieldType::StringSet,
        AttributeValue::Ns(_) => FieldType::NumberSet,
        AttributeValue::Bs(_) => FieldType::BinarySet,
        AttributeValue::L(_) => FieldType::List,
        AttributeValue::M(_) => FieldType::Map,
    }
}

fn decode_number(text: &str) -> Option<i64> {
    text.parse().ok()
}

fn decode_value(value: &AttributeValue) -> Option<Value> {
    let value = match value {
        AttributeValue::S(value) => Value::String(value.clone()),
        AttributeValue::N(text) => Value::Number(decode_number(text)?),
        AttributeValue::Bool(value) => Value::Boolean(*value),
        AttributeValue::B(bytes) => Value::Binary(bytes.clone()),
        AttributeValue::Null(_) => Value::Null,
        AttributeValue::Ss(values) => Value::Set(
            SetType::String,
            values.iter().cloned().map(Value::String).collect(),
        ),
        AttributeValue::Ns(values) => Value::Set(
            SetType::Number,
            values
                .iter()
                .map(|text| decode_number(text).map(Value::Number))
                .collect::<Option<_>>()?,
        ),
        AttributeValue::Bs(values) => Value::Set(
            SetType::Binary,
            values.iter().cloned().map(Value::Binary).collect(),
        ),
        AttributeValue::L(values) => {
            Value::List(values.iter().map(decode_value).collect::<Option<_>>()?)
        }
        AttributeValue::M(map) => Value::Map(
            map.iter()
                .map(|(key, value)| Some((key.clone(), decode_value(value)?)))
                .collect::<Option<_>>()?,
        ),
        AttributeValue::Unknown => return None,
    };
    Some(value)
}

/// Decode a wire value.
///
/// Unknown alternatives, and numbers that are not 64-bit integers anywhere
/// inside the value, decode to an absent cell of the wire type.
pub fn decode(value: &AttributeValue) -> Cell {
    match decode_value(value) {
        Some(value) => Cell::Present(value),
        None => {
            #[cfg(feature = "tracing")]
            tracing::debug!(wire_type = %wire_type(value), "unsupported attribute value decoded as absent");
            Cell::Absent(wire_type(value))
        }
    }
}

/// Decode an SDK attribute value.
pub fn decode_sdk(value: types::AttributeValue) -> Cell {
    decode(&value.into())
}

/// Seconds since the epoch as a date value, for number cells shown as dates.
pub fn date_from_epoch(seconds: i64) -> Option<Value> {
    DateTime::from_timestamp(seconds, 0).map(Value::Date)
}

/// Serialize a record into an item through `serde_dynamo`.
///
/// Attribute order follows the SDK's hash map, not the record's fields.
pub fn encode_record<T: Serialize>(record: T) -> Result<Item> {
    let item: collections::HashMap<String, types::AttributeValue> =
        serde_dynamo::to_item(record)?;
    Ok(attribute_value::from_sdk_item(item))
}

/// Deserialize a record from an item through `serde_dynamo`.
pub fn decode_record<T: DeserializeOwned>(item: Item) -> Result<T> {
    let item = attribute_value::to_sdk_item(item);
    let record = serde_dynamo::from_item(item)?;
    Ok(record)
}

/// Parse a DynamoDB JSON item, keeping attribute order.
pub fn item_from_json(json: &str) -> Result<Item> {
    let item = serde_json::from_str(json)?;
    Ok(item)
}

/// Render an item as DynamoDB JSON.
pub fn item_to_json(item: &Item) -> Result<String> {
    let json = serde_json::to_string(item)?;
    Ok(json)
}

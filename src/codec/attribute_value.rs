use aws_sdk_dynamodb::{primitives::Blob, types};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections;

/// An item: attribute names to wire values, in insertion order.
pub type Item = IndexMap<String, AttributeValue>;

/// Attribute value on the wire, shaped like DynamoDB's.
///
/// Unlike [`types::AttributeValue`], maps keep their insertion order, so an
/// item survives encode and decode with its keys in place. Serializes to
/// DynamoDB JSON.
///
/// ```rust
/// use dynamodb_grid::codec::AttributeValue;
///
/// let value: AttributeValue = serde_json::from_str(r#"{"N": "42"}"#).unwrap();
/// assert_eq!(value, AttributeValue::N("42".to_string()));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum AttributeValue {
    /// String.
    #[serde(rename = "S")]
    S(String),
    /// Number, as decimal text.
    #[serde(rename = "N")]
    N(String),
    /// Boolean.
    #[serde(rename = "BOOL")]
    Bool(bool),
    /// Binary, base64 in JSON.
    #[serde(rename = "B", with = "base64_bytes")]
    B(Vec<u8>),
    /// Null.
    #[serde(rename = "NULL")]
    Null(bool),
    /// String set.
    #[serde(rename = "SS")]
    Ss(Vec<String>),
    /// Number set.
    #[serde(rename = "NS")]
    Ns(Vec<String>),
    /// Binary set.
    #[serde(rename = "BS", with = "base64_bytes_list")]
    Bs(Vec<Vec<u8>>),
    /// List.
    #[serde(rename = "L")]
    L(Vec<AttributeValue>),
    /// Map, in insertion order.
    #[serde(rename = "M")]
    M(IndexMap<String, AttributeValue>),
    /// A value of a type this crate does not know.
    #[serde(skip)]
    Unknown,
}

mod base64_bytes {
    use base64::{Engine, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub(super) fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let text = String::deserialize(deserializer)?;
        STANDARD.decode(text).map_err(de::Error::custom)
    }
}

mod base64_bytes_list {
    use base64::{Engine, engine::general_purpose::STANDARD};
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub(super) fn serialize<S: Serializer>(
        values: &[Vec<u8>],
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(values.iter().map(|bytes| STANDARD.encode(bytes)))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Vec<Vec<u8>>, D::Error> {
        Vec::<String>::deserialize(deserializer)?
            .into_iter()
            .map(|text| STANDARD.decode(text).map_err(de::Error::custom))
            .collect()
    }
}

impl From<types::AttributeValue> for AttributeValue {
    fn from(value: types::AttributeValue) -> Self {
        match value {
            types::AttributeValue::S(value) => Self::S(value),
            types::AttributeValue::N(value) => Self::N(value),
            types::AttributeValue::Bool(value) => Self::Bool(value),
            types::AttributeValue::B(blob) => Self::B(blob.into_inner()),
            types::AttributeValue::Null(value) => Self::Null(value),
            types::AttributeValue::Ss(values) => Self::Ss(values),
            types::AttributeValue::Ns(values) => Self::Ns(values),
            types::AttributeValue::Bs(blobs) => {
                Self::Bs(blobs.into_iter().map(Blob::into_inner).collect())
            }
            types::AttributeValue::L(values) => {
                Self::L(values.into_iter().map(Self::from).collect())
            }
            types::AttributeValue::M(map) => Self::M(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
            _ => Self::Unknown,
        }
    }
}

impl From<AttributeValue> for types::AttributeValue {
    /// [`AttributeValue::Unknown`] has no SDK counterpart and becomes null.
    fn from(value: AttributeValue) -> Self {
        match value {
            AttributeValue::S(value) => Self::S(value),
            AttributeValue::N(value) => Self::N(value),
            AttributeValue::Bool(value) => Self::Bool(value),
            AttributeValue::B(bytes) => Self::B(Blob::new(bytes)),
            AttributeValue::Null(value) => Self::Null(value),
            AttributeValue::Ss(values) => Self::Ss(values),
            AttributeValue::Ns(values) => Self::Ns(values),
            AttributeValue::Bs(values) => Self::Bs(values.into_iter().map(Blob::new).collect()),
            AttributeValue::L(values) => Self::L(values.into_iter().map(Self::from).collect()),
            AttributeValue::M(map) => Self::M(
                map.into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
            AttributeValue::Unknown => Self::Null(true),
        }
    }
}

/// Convert an SDK item; attribute order is whatever the SDK map yields.
pub fn from_sdk_item(item: collections::HashMap<String, types::AttributeValue>) -> Item {
    item.into_iter()
        .map(|(key, value)| (key, value.into()))
        .collect()
}

/// Convert to an SDK item, for requests.
///
/// Top-level [`AttributeValue::Unknown`] attributes are left out, so a
/// request never overwrites a value this crate cannot read. Unknown values
/// nested in lists or maps become null.
pub fn to_sdk_item(item: Item) -> collections::HashMap<String, types::AttributeValue> {
    item.into_iter()
        .filter(|(_, value)| *value != AttributeValue::Unknown)
        .map(|(key, value)| (key, value.into()))
        .collect()
}

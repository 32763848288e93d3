use crate::common::field_type::FieldType;

use aws_sdk_dynamodb::types;

/// Key schema entry: a primary-key attribute and its scalar type.
///
/// ```rust
/// use dynamodb_grid::common::{field_type::FieldType, key};
///
/// let key = key::KeyAttribute {
///     name: "id".to_string(),
///     field_type: FieldType::String,
/// };
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct KeyAttribute {
    /// The attribute name of the key.
    pub name: String,
    /// The type of the key value.
    pub field_type: FieldType,
}

impl KeyAttribute {
    /// Create a key attribute.
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// Field type of a scalar attribute definition; unknown types fall back to
/// string.
pub fn field_type_of(attribute_type: &types::ScalarAttributeType) -> FieldType {
    match attribute_type {
        types::ScalarAttributeType::N => FieldType::Number,
        types::ScalarAttributeType::B => FieldType::Binary,
        _ => FieldType::String,
    }
}

/// Ordered key schema of a table, typed from its attribute definitions.
pub fn key_schema(table: &types::TableDescription) -> Vec<KeyAttribute> {
    table
        .key_schema()
        .iter()
        .map(|key| {
            let field_type = table
                .attribute_definitions()
                .iter()
                .find(|attribute| attribute.attribute_name() == key.attribute_name())
                .map_or(FieldType::String, |attribute| {
                    field_type_of(attribute.attribute_type())
                });
            KeyAttribute::new(key.attribute_name(), field_type)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    fn attribute(name: &str, attribute_type: types::ScalarAttributeType) -> types::AttributeDefinition {
        types::AttributeDefinition::builder()
            .attribute_name(name)
            .attribute_type(attribute_type)
            .build()
            .unwrap()
    }

    fn key(name: &str, key_type: types::KeyType) -> types::KeySchemaElement {
        types::KeySchemaElement::builder()
            .attribute_name(name)
            .key_type(key_type)
            .build()
            .unwrap()
    }

    #[rstest]
    #[case::partition_key_only(
        types::TableDescription::builder()
            .key_schema(key("a", types::KeyType::Hash))
            .attribute_definitions(attribute("a", types::ScalarAttributeType::S))
            .build(),
        vec![
            KeyAttribute::new("a", FieldType::String),
        ]
    )]
    #[case::partition_and_sort_key(
        types::TableDescription::builder()
            .key_schema(key("a", types::KeyType::Hash))
            .key_schema(key("b", types::KeyType::Range))
            .attribute_definitions(attribute("b", types::ScalarAttributeType::N))
            .attribute_definitions(attribute("a", types::ScalarAttributeType::B))
            .build(),
        vec![
            KeyAttribute::new("a", FieldType::Binary),
            KeyAttribute::new("b", FieldType::Number),
        ]
    )]
    #[case::missing_definition(
        types::TableDescription::builder()
            .key_schema(key("a", types::KeyType::Hash))
            .build(),
        vec![
            KeyAttribute::new("a", FieldType::String),
        ]
    )]
    #[case::no_key_schema(
        types::TableDescription::builder().build(),
        vec![]
    )]
    fn test_key_schema(
        #[case] table: types::TableDescription,
        #[case] expected: Vec<KeyAttribute>,
    ) {
        assert_eq!(key_schema(&table), expected);
    }
}

use crate::codec::{Item, attribute_value};
use crate::{common, write};

use aws_sdk_dynamodb::{error::BuildError, operation::update_item::UpdateItemInput};
use std::collections;

fn get_set_expression(set: Item) -> common::ExpressionInput {
    let items = set
        .into_iter()
        .enumerate()
        .map(|(index, (name, value))| {
            let name_placeholder = format!("#set{index}");
            let value_placeholder = format!(":set{index}");
            common::ExpressionInput {
                expression: format!("{name_placeholder} = {value_placeholder}"),
                expression_attribute_names: collections::HashMap::from([(name_placeholder, name)]),
                expression_attribute_values: collections::HashMap::from([(
                    value_placeholder,
                    value.into(),
                )]),
            }
        })
        .collect();
    common::ExpressionInput::merge(", ", items).clause("SET")
}

fn get_remove_expression(remove: Vec<String>) -> common::ExpressionInput {
    let items = remove
        .into_iter()
        .enumerate()
        .map(|(index, name)| {
            let name_placeholder = format!("#remove{index}");
            common::ExpressionInput {
                expression: name_placeholder.clone(),
                expression_attribute_names: collections::HashMap::from([(name_placeholder, name)]),
                ..Default::default()
            }
        })
        .collect();
    common::ExpressionInput::merge(", ", items).clause("REMOVE")
}

/// Update item request: assigns `set` and removes `remove` on the item with
/// primary key `key`.
///
/// Attribute names always go through `#` placeholders, so reserved words
/// and unusual characters need no escaping.
///
/// ```rust
/// use aws_sdk_dynamodb::operation::update_item::UpdateItemInput;
/// use dynamodb_grid::codec::{AttributeValue, Item};
/// use dynamodb_grid::write;
///
/// let request = write::update_item::UpdateItemRequest {
///     key: Item::from([("id".to_string(), AttributeValue::S("1".to_string()))]),
///     set: Item::from([("name".to_string(), AttributeValue::S("Jane".to_string()))]),
///     remove: vec!["nickname".to_string()],
///     write_args: write::common::WriteArgs::table("users"),
/// };
/// let input: UpdateItemInput = request.try_into().unwrap();
/// assert_eq!(
///     input.update_expression(),
///     Some("SET #set0 = :set0 REMOVE #remove0")
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UpdateItemRequest {
    /// The primary key of the item to update.
    pub key: Item,
    /// Attributes to assign, in order.
    pub set: Item,
    /// Attribute names to remove.
    pub remove: Vec<String>,
    /// Table name and return settings.
    pub write_args: write::common::WriteArgs,
}

impl TryFrom<UpdateItemRequest> for UpdateItemInput {
    type Error = BuildError;

    fn try_from(update_item: UpdateItemRequest) -> Result<Self, Self::Error> {
        let (update_expression, expression_attribute_names, expression_attribute_values) =
            common::ExpressionInput::merge(
                " ",
                vec![
                    get_set_expression(update_item.set),
                    get_remove_expression(update_item.remove),
                ],
            )
            .into_parts();
        let builder = UpdateItemInput::builder()
            .set_key(Some(attribute_value::to_sdk_item(update_item.key)))
            .set_update_expression(update_expression)
            .set_expression_attribute_names(expression_attribute_names)
            .set_expression_attribute_values(expression_attribute_values);
        crate::apply_write_args!(builder, update_item.write_args).build()
    }
}

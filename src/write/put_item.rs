use crate::codec::{Item, attribute_value};
use crate::write;

use aws_sdk_dynamodb::{error::BuildError, operation::put_item::PutItemInput};

/// Put item request: writes `item` whole, replacing any item with its key.
///
/// ```rust
/// use aws_sdk_dynamodb::operation::put_item::PutItemInput;
/// use dynamodb_grid::codec::{AttributeValue, Item};
/// use dynamodb_grid::write;
///
/// let request = write::put_item::PutItemRequest {
///     item: Item::from([("id".to_string(), AttributeValue::S("1".to_string()))]),
///     write_args: write::common::WriteArgs::table("users"),
/// };
/// let input: PutItemInput = request.try_into().unwrap();
/// assert_eq!(input.table_name(), Some("users"));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PutItemRequest {
    /// The item to put, key attributes included.
    pub item: Item,
    /// Table name and return settings.
    pub write_args: write::common::WriteArgs,
}

impl TryFrom<PutItemRequest> for PutItemInput {
    type Error = BuildError;

    fn try_from(put_item: PutItemRequest) -> Result<Self, Self::Error> {
        let builder =
            PutItemInput::builder().set_item(Some(attribute_value::to_sdk_item(put_item.item)));
        crate::apply_write_args!(builder, put_item.write_args).build()
    }
}

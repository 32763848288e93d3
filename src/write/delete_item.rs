use crate::codec::{Item, attribute_value};
use crate::write;

use aws_sdk_dynamodb::{error::BuildError, operation::delete_item::DeleteItemInput};

/// Delete item request, addressed by primary key.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeleteItemRequest {
    /// The primary key of the item to delete.
    pub key: Item,
    /// Table name and return settings.
    pub write_args: write::common::WriteArgs,
}

impl TryFrom<DeleteItemRequest> for DeleteItemInput {
    type Error = BuildError;

    fn try_from(delete_item: DeleteItemRequest) -> Result<Self, Self::Error> {
        let builder =
            DeleteItemInput::builder().set_key(Some(attribute_value::to_sdk_item(delete_item.key)));
        crate::apply_write_args!(builder, delete_item.write_args).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::AttributeValue;

    use aws_sdk_dynamodb::types;
    use rstest::rstest;

    #[rstest]
    #[case::partition_key(
        DeleteItemRequest {
            key: Item::from([("a".to_string(), AttributeValue::S("b".to_string()))]),
            write_args: write::common::WriteArgs::table("c"),
        },
        DeleteItemInput::builder()
            .key("a", types::AttributeValue::S("b".to_string()))
            .table_name("c")
            .build()
            .unwrap()
    )]
    #[case::composite_key(
        DeleteItemRequest {
            key: Item::from([
                ("a".to_string(), AttributeValue::S("b".to_string())),
                ("c".to_string(), AttributeValue::N("1".to_string())),
            ]),
            write_args: write::common::WriteArgs {
                return_values: Some(types::ReturnValue::AllOld),
                ..write::common::WriteArgs::table("d")
            },
        },
        DeleteItemInput::builder()
            .key("a", types::AttributeValue::S("b".to_string()))
            .key("c", types::AttributeValue::N("1".to_string()))
            .return_values(types::ReturnValue::AllOld)
            .table_name("d")
            .build()
            .unwrap()
    )]
    fn test_delete_item(#[case] request: DeleteItemRequest, #[case] expected: DeleteItemInput) {
        let actual: DeleteItemInput = request.try_into().unwrap();
        assert_eq!(actual, expected);
    }
}

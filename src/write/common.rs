use aws_sdk_dynamodb::types;

/// Settings common to put, update and delete requests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WriteArgs {
    /// Whether to return the consumed capacity information.
    pub return_consumed_capacity: Option<types::ReturnConsumedCapacity>,
    /// Whether to return item collection metrics.
    pub return_item_collection_metrics: Option<types::ReturnItemCollectionMetrics>,
    /// Which item attributes to return in the response.
    pub return_values: Option<types::ReturnValue>,
    /// The name of the table to write to.
    pub table_name: String,
}

impl WriteArgs {
    /// Arguments targeting `table_name`, everything else left unset.
    pub fn table(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            ..Default::default()
        }
    }
}

/// apply common write settings to an SDK operation input builder
#[macro_export]
macro_rules! apply_write_args {
    ($builder:expr, $write_args:expr) => {
        $builder
            .set_return_consumed_capacity($write_args.return_consumed_capacity)
            .set_return_item_collection_metrics($write_args.return_item_collection_metrics)
            .set_return_values($write_args.return_values)
            .table_name($write_args.table_name)
    };
}

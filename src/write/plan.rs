use crate::codec::{self, Item};
use crate::common::key::KeyAttribute;
use crate::grid::{column::Column, row::Row};
use crate::write::{
    common::WriteArgs, delete_item::DeleteItemRequest, put_item::PutItemRequest,
    update_item::UpdateItemRequest,
};

/// Message for a failed update or recreate.
pub const UPDATE_FAILED: &str = "Error while updating item";

/// Message for a failed create.
pub const CREATE_FAILED: &str = "Error while creating item";

/// What a committed draft needs written.
#[derive(Clone, Debug, PartialEq)]
pub enum WritePlan {
    /// The draft matches the original row.
    Unchanged,
    /// Same key: assign changed attributes and remove dropped ones.
    Update {
        /// The item's primary key.
        key: Item,
        /// New or changed attributes.
        set: Item,
        /// Attributes present in the original and gone from the draft.
        remove: Vec<String>,
    },
    /// The key changed: write the whole item under the new key, then delete
    /// the old one. DynamoDB cannot update key attributes in place.
    Recreate {
        /// The complete new item.
        put: Item,
        /// The old primary key.
        delete: Item,
    },
    /// A new item.
    Create {
        /// The complete item.
        put: Item,
    },
}

/// One request of a plan.
#[derive(Clone, Debug, PartialEq)]
pub enum WriteRequest {
    /// Put a whole item.
    Put(PutItemRequest),
    /// Update attributes of an item.
    Update(UpdateItemRequest),
    /// Delete an item.
    Delete(DeleteItemRequest),
}

fn key_of(item: &Item, key_schema: &[KeyAttribute]) -> Item {
    key_schema
        .iter()
        .filter_map(|key| Some((key.name.clone(), item.get(&key.name)?.clone())))
        .collect()
}

impl WritePlan {
    /// Diff a draft against the row it was cloned from, attributes matched
    /// by column label.
    ///
    /// Absent cells are not written. A renamed attribute shows up as a
    /// removal of the old name and an assignment of the new one.
    ///
    /// ```rust
    /// use dynamodb_grid::common::{cell::Cell, field_type::FieldType, key::KeyAttribute, value::Value};
    /// use dynamodb_grid::grid::{column::Column, row::Row};
    /// use dynamodb_grid::write::plan::WritePlan;
    ///
    /// let columns = vec![Column::key("id"), Column::attribute("name")];
    /// let original: Row = Row::new(vec![
    ///     Value::Number(1).into(),
    ///     Value::String("x".to_string()).into(),
    /// ]);
    /// let mut draft = original.clone();
    /// draft.values[1] = Cell::Absent(FieldType::String);
    ///
    /// let plan = WritePlan::for_update(
    ///     &draft,
    ///     &columns,
    ///     &original,
    ///     &columns,
    ///     &[KeyAttribute::new("id", FieldType::Number)],
    /// );
    /// assert!(matches!(plan, WritePlan::Update { remove, .. } if remove == ["name"]));
    /// ```
    pub fn for_update<X>(
        draft_row: &Row<X>,
        draft_columns: &[Column],
        original_row: &Row<X>,
        original_columns: &[Column],
        key_schema: &[KeyAttribute],
    ) -> Self {
        let draft = codec::encode_item(draft_columns, draft_row);
        let original = codec::encode_item(original_columns, original_row);
        let draft_key = key_of(&draft, key_schema);
        let original_key = key_of(&original, key_schema);
        if draft_key != original_key {
            return Self::Recreate {
                put: draft,
                delete: original_key,
            };
        }
        let set: Item = draft
            .into_iter()
            .filter(|(name, value)| {
                !draft_key.contains_key(name) && original.get(name) != Some(value)
            })
            .collect();
        let remove: Vec<String> = original
            .keys()
            .filter(|name| !draft_columns_contain(draft_columns, draft_row, name))
            .cloned()
            .collect();
        if set.is_empty() && remove.is_empty() {
            return Self::Unchanged;
        }
        Self::Update {
            key: draft_key,
            set,
            remove,
        }
    }

    /// Plan a new item from a draft: every present cell is written.
    pub fn for_create<X>(draft_row: &Row<X>, draft_columns: &[Column]) -> Self {
        Self::Create {
            put: codec::encode_item(draft_columns, draft_row),
        }
    }

    /// The message to show when writing this plan fails.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Create { .. } => CREATE_FAILED,
            _ => UPDATE_FAILED,
        }
    }

    /// Expand into requests, to be sent in order. A recreate puts the new
    /// item before deleting the old one.
    pub fn into_requests(self, write_args: &WriteArgs) -> Vec<WriteRequest> {
        match self {
            Self::Unchanged => Vec::new(),
            Self::Update { key, set, remove } => vec![WriteRequest::Update(UpdateItemRequest {
                key,
                set,
                remove,
                write_args: write_args.clone(),
            })],
            Self::Recreate { put, delete } => vec![
                WriteRequest::Put(PutItemRequest {
                    item: put,
                    write_args: write_args.clone(),
                }),
                WriteRequest::Delete(DeleteItemRequest {
                    key: delete,
                    write_args: write_args.clone(),
                }),
            ],
            Self::Create { put } => vec![WriteRequest::Put(PutItemRequest {
                item: put,
                write_args: write_args.clone(),
            })],
        }
    }
}

fn draft_columns_contain<X>(columns: &[Column], row: &Row<X>, name: &str) -> bool {
    columns
        .iter()
        .enumerate()
        .any(|(index, column)| column.label == name && !row.is_absent(index))
}

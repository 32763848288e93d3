//! Common types shared by the grid, draft sessions and the codec.
//!
//! This module provides the typed cell model (field types, values and cells)
//! and the key schema of a table.

/// Grid slots and paths into nested values.
pub mod cell;

/// Type tags of grid cells.
pub mod field_type;

/// Key schema of a table.
pub mod key;

/// The closed set of cell values.
pub mod value;

use aws_sdk_dynamodb::types;
use std::collections;

fn get_expression(left: String, operator: &str, right: String) -> String {
    if left.is_empty() {
        right
    } else if right.is_empty() {
        left
    } else {
        format!("{left}{operator}{right}")
    }
}

pub(crate) type ExpressionParts = (
    Option<String>,
    Option<collections::HashMap<String, String>>,
    Option<collections::HashMap<String, types::AttributeValue>>,
);

/// expression operation
#[derive(Clone, Debug, Default, PartialEq)]
pub(crate) struct ExpressionInput {
    pub(crate) expression: String,
    pub(crate) expression_attribute_names: collections::HashMap<String, String>,
    pub(crate) expression_attribute_values: collections::HashMap<String, types::AttributeValue>,
}

impl ExpressionInput {
    pub(crate) fn merge(operator: &str, items: Vec<Self>) -> Self {
        let mut operation = Self::default();
        for item in items {
            operation
                .expression_attribute_names
                .extend(item.expression_attribute_names);
            operation
                .expression_attribute_values
                .extend(item.expression_attribute_values);
            operation.expression = get_expression(operation.expression, operator, item.expression);
        }
        operation
    }

    /// Split into the optional parts of an SDK input; empty parts become `None`.
    pub(crate) fn into_parts(self) -> ExpressionParts {
        (
            Some(self.expression).filter(|expression| !expression.is_empty()),
            Some(self.expression_attribute_names).filter(|names| !names.is_empty()),
            Some(self.expression_attribute_values).filter(|values| !values.is_empty()),
        )
    }

    /// Prefix a non-empty expression with its clause keyword.
    pub(crate) fn clause(mut self, keyword: &str) -> Self {
        if !self.expression.is_empty() {
            self.expression = format!("{keyword} {}", self.expression);
        }
        self
    }
}

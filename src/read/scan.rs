use crate::codec::{self, Item, attribute_value};
use crate::common::{
    cell::Cell,
    key::{self, KeyAttribute},
    value::Value,
};
use crate::grid::{Grid, column::Column, row::Row};

use aws_sdk_dynamodb::{operation, types};

/// Build an item grid from scanned items.
///
/// Key columns come first, in key schema order, required and with fixed
/// labels; their cells are typed from the key schema and stay absent until an
/// item fills them. Other attributes get a renamable column the first time
/// they are seen, in item order. Values the codec cannot represent are
/// skipped. Each row carries its source item.
///
/// ```rust
/// use dynamodb_grid::codec::{AttributeValue, Item};
/// use dynamodb_grid::common::{field_type::FieldType, key::KeyAttribute};
/// use dynamodb_grid::read::scan;
///
/// let item = Item::from([("pk".to_string(), AttributeValue::S("abc".to_string()))]);
/// let grid = scan::wrap_scan(vec![item], &[KeyAttribute::new("pk", FieldType::String)]);
/// assert_eq!(grid.rows().len(), 1);
/// ```
pub fn wrap_scan(items: Vec<Item>, key_schema: &[KeyAttribute]) -> Grid<Item> {
    let columns = key_schema
        .iter()
        .map(|key| Column::key(key.name.as_str()))
        .collect();
    let mut grid = Grid::new(columns);
    for item in items {
        let mut values: Vec<Cell> = key_schema
            .iter()
            .map(|key| Cell::Absent(key.field_type))
            .collect();
        for (name, value) in &item {
            let cell = codec::decode(value);
            if cell.is_absent() {
                continue;
            }
            let index = match grid.columns().iter().position(|column| column.label == *name) {
                Some(index) => index,
                None => {
                    grid.append_column(Column::attribute(name.as_str()));
                    grid.columns().len() - 1
                }
            };
            if values.len() <= index {
                values.resize_with(index + 1, Cell::default);
            }
            values[index] = cell;
        }
        let mut row = Row::with_extra(values, item);
        row.pad_to(grid.columns().len());
        grid.insert_row(grid.rows().len(), row);
    }
    grid.take_events();
    grid
}

/// [`wrap_scan`] over SDK scan output, with the key schema read from the
/// table description.
///
/// SDK items are unordered, so attributes are taken in name order. A
/// `last_evaluated_key` announces one more page.
pub fn wrap_scan_output(
    output: &operation::scan::ScanOutput,
    table: &types::TableDescription,
) -> Grid<Item> {
    let items = output
        .items()
        .iter()
        .map(|item| {
            let mut item = attribute_value::from_sdk_item(item.clone());
            item.sort_keys();
            item
        })
        .collect();
    let mut grid = wrap_scan(items, &key::key_schema(table));
    if output.last_evaluated_key().is_some() {
        grid.set_page_count(grid.page() + 1);
    }
    grid
}

/// A fresh row for the create-item flow: one default-valued cell per
/// attribute definition, typed from the definition.
pub fn default_row(attribute_definitions: &[types::AttributeDefinition]) -> Row<Item> {
    let values = attribute_definitions
        .iter()
        .map(|attribute| Value::default_for(key::field_type_of(attribute.attribute_type())).into())
        .collect();
    Row::new(values)
}

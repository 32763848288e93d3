use crate::common::{cell::Cell, field_type::FieldType, value::Value};
use crate::grid::{
    Grid,
    column::{Alignment, Column, DisplayHints},
    row::Row,
};

use aws_sdk_dynamodb::types;

fn read_only(label: &str) -> Column {
    Column {
        editable: false,
        ..Column::new(label)
    }
}

/// Columns of the table-list grid: name, status and size.
pub fn table_list_columns() -> Vec<Column> {
    vec![
        read_only("Name"),
        read_only("Status"),
        Column {
            display: DisplayHints {
                max_width: Some(100.0),
                alignment: Alignment::Trailing,
                ..Default::default()
            },
            ..read_only("Size")
        },
    ]
}

/// One row per table, carrying its description.
///
/// Missing names and statuses read as absent strings, a missing size as an
/// absent size.
pub fn wrap_table_list(tables: &[types::TableDescription]) -> Grid<types::TableDescription> {
    let mut grid = Grid::new(table_list_columns());
    for table in tables {
        let name = table
            .table_name()
            .map_or(Cell::Absent(FieldType::String), |name| {
                Value::String(name.to_string()).into()
            });
        let status = table
            .table_status()
            .map_or(Cell::Absent(FieldType::String), |status| {
                Value::String(status.as_str().to_string()).into()
            });
        let size = table
            .table_size_bytes()
            .map_or(Cell::Absent(FieldType::Size), |size| Value::Size(size).into());
        let row = Row::with_extra(vec![name, status, size], table.clone());
        grid.insert_row(grid.rows().len(), row);
    }
    grid.take_events();
    grid
}

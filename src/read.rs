//! Read-side wrapping: turning DynamoDB read results into grids.
//!
//! Nothing here talks to DynamoDB. Callers run the scan or the table
//! listing with the SDK and hand the output over.

/// Scan results as an item grid.
pub mod scan;

/// Table descriptions as a table-list grid.
pub mod table_list;

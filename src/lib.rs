#![deny(missing_docs)]
#![deny(warnings)]

//! # DynamoDB Grid
//!
//! A typed data grid for browsing and editing DynamoDB tables.
//!
//! ## Overview
//!
//! This library keeps table contents as a grid of typed cells and provides:
//! - A closed set of cell values (strings, numbers, sets, lists, maps, ...)
//!   where a missing attribute stays distinct from a `NULL` one
//! - Pagination with stale-load protection and change notifications
//! - Draft editing sessions that validate input and only touch the grid once
//!   an external commit succeeds
//! - A lossless, order-preserving codec to and from DynamoDB attribute values
//! - Write planning from a committed draft to put, update and delete requests
//!
//! ## Quick Example
//!
//! ```rust
//! use dynamodb_grid::codec::{AttributeValue, Item};
//! use dynamodb_grid::common::{cell::CellPath, field_type::FieldType, key::KeyAttribute};
//! use dynamodb_grid::draft::{DraftSession, SessionOptions};
//! use dynamodb_grid::read::scan;
//!
//! let item = Item::from([
//!     ("pk".to_string(), AttributeValue::S("abc".to_string())),
//!     ("n".to_string(), AttributeValue::N("42".to_string())),
//! ]);
//! let grid = scan::wrap_scan(vec![item], &[KeyAttribute::new("pk", FieldType::String)]);
//!
//! let mut session =
//!     DraftSession::open(&grid, grid.rows()[0].id(), SessionOptions::dynamodb()).unwrap();
//! // Invalid number text is rejected and blocks the commit until fixed.
//! assert!(!session.set_text(&CellPath::column(1), "4x").unwrap());
//! assert!(!session.can_confirm());
//! assert!(session.set_text(&CellPath::column(1), "43").unwrap());
//! assert!(session.can_confirm());
//! ```
//!
//! ## Modules
//!
//! - [`mod@common`] - Field types, values, cells and key schemas
//! - [`mod@grid`] - Columns, rows, selection and pagination
//! - [`mod@draft`] - Draft editing sessions
//! - [`mod@codec`] - DynamoDB attribute-value encoding and decoding
//! - [`mod@read`] - Grids from scan results and table listings
//! - [`mod@write`] - Write requests for committed drafts

/// DynamoDB attribute-value codec.
pub mod codec;

/// Field types, values, cells and key schemas.
pub mod common;

/// Draft editing sessions.
///
/// A session edits a clone of one row and commits it through an external
/// function before anything reaches the grid.
pub mod draft;

/// Error type of this crate.
pub mod error;

/// The generic data grid.
pub mod grid;

/// Grids from DynamoDB read results.
///
/// This module provides:
/// - Item grids built from scan output
/// - The table-list grid
/// - Default rows for the create-item flow
pub mod read;

/// Write requests for committed drafts.
///
/// This module provides:
/// - The diff between a draft and its original row
/// - Put, update and delete requests convertible to SDK inputs
pub mod write;

pub use error::{Error, Result};

//! Write requests for committed drafts.
//!
//! A committed draft is diffed against the row it was cloned from into a
//! [`plan::WritePlan`], which expands into put, update and delete requests.
//! Each request converts into the matching SDK operation input; sending it
//! is left to the caller's commit function.

/// Settings shared by all write requests.
pub mod common;

/// Delete item requests.
pub mod delete_item;

/// Draft-to-request planning.
pub mod plan;

/// Put item requests.
pub mod put_item;

/// Update item requests.
pub mod update_item;

use crate::grid::{column::Column, row::Row};

use std::future::Future;

/// The external write behind a draft session's confirm.
///
/// Resolves to `None` on success, or to a message shown verbatim to the
/// user, in which case the session stays open.
///
/// ```rust
/// use dynamodb_grid::draft::commit::Commit;
/// use dynamodb_grid::grid::{column::Column, row::Row};
///
/// struct AlwaysFails;
///
/// impl Commit<()> for AlwaysFails {
///     async fn commit(
///         &self,
///         _draft_row: &Row,
///         _draft_columns: &[Column],
///         _original_row: &Row,
///         _original_columns: &[Column],
///     ) -> Option<String> {
///         Some("table is read-only".to_string())
///     }
/// }
/// ```
pub trait Commit<X> {
    /// Persist the draft, given the state it was cloned from.
    fn commit(
        &self,
        draft_row: &Row<X>,
        draft_columns: &[Column],
        original_row: &Row<X>,
        original_columns: &[Column],
    ) -> impl Future<Output = Option<String>>;
}

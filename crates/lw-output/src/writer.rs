//! The `RouteWriter` trait implemented by route export backends.

use crate::{OutputResult, RouteRow};

/// Sink for ranked routes.
///
/// Errors raised while driven by [`RouteOutputObserver`][crate::RouteOutputObserver]
/// are stored in the observer and retrieved with `take_error`.
pub trait RouteWriter {
    /// Append a batch of rows.
    fn write_routes(&mut self, rows: &[RouteRow]) -> OutputResult<()>;

    /// Flush and close the underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}

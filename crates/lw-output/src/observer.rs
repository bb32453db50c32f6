//! `RouteOutputObserver<W>` — bridges `RecommendObserver` to a `RouteWriter`.

use lw_recommend::{RecommendObserver, ScoredRoute};

use crate::writer::RouteWriter;
use crate::{OutputError, OutputResult, RouteRow};

/// A [`RecommendObserver`] that exports every ranked result to a
/// [`RouteWriter`] backend.
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After `recommend_observed` returns, check for
/// errors with [`take_error`][Self::take_error].  Call
/// [`finish`][Self::finish] once all requests are done.
pub struct RouteOutputObserver<W: RouteWriter> {
    writer:     W,
    written:    usize,
    last_error: Option<OutputError>,
}

impl<W: RouteWriter> RouteOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0, last_error: None }
    }

    /// Number of rows written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer, returning the first stored error if there was one.
    pub fn finish(&mut self) -> OutputResult<()> {
        let result = self.writer.finish();
        self.store_err(result);
        match self.last_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: RouteWriter> RecommendObserver for RouteOutputObserver<W> {
    fn on_ranked(&mut self, routes: &[ScoredRoute]) {
        let result = RouteRow::from_ranked(routes).and_then(|rows| {
            self.writer.write_routes(&rows)?;
            Ok(rows.len())
        });
        match result {
            Ok(n) => self.written += n,
            Err(e) => {
                log::warn!("route export failed: {e}");
                self.store_err(Err(e));
            }
        }
    }
}

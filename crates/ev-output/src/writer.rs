//! The `OutputWriter` trait implemented by all backend writers.

use ev_route::{EvacuationContext, Recommendation};

use crate::OutputResult;

/// Trait implemented by the CSV and JSON writers.
pub trait OutputWriter {
    /// Record the outcome of one query.  `ctx` supplies the catalog and,
    /// for road routes, node coordinates.
    fn write_recommendation(
        &mut self,
        query: &str,
        rec: &Recommendation,
        ctx: &EvacuationContext,
    ) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent; safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}

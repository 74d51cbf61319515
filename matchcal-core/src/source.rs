//! Where match records come from.
//!
//! The encoder never fetches anything itself; binaries hold a `MatchSource`
//! and hand its output to [`crate::ics::generate_calendar`].

use async_trait::async_trait;

use crate::date_range::DateRange;
use crate::error::MatchCalResult;
use crate::fixture::MatchRecord;

#[async_trait]
pub trait MatchSource: Send + Sync {
    /// Matches for the tracked team within `range`, in the order the source returns them.
    async fn fetch_matches(&self, range: &DateRange) -> MatchCalResult<Vec<MatchRecord>>;
}

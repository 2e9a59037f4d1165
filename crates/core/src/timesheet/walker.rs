//! Sequential day-by-day walk over a date range
//!
//! The walk starts at the latest day and moves backwards one calendar day at
//! a time. Each day is fetched and then handed to a visitor; the next fetch is
//! only issued once the visitor has finished, because visitors accumulate
//! state that later days depend on.

use std::future::Future;

use async_trait::async_trait;
use chrono::NaiveDate;
use timebot_domain::Result;
use tracing::trace;

/// Per-day callback of [`walk_days`]
#[async_trait]
pub trait DayVisitor<T: Send + 'static>: Send {
    /// Handle everything fetched for `day`. An error stops the walk.
    async fn visit(&mut self, day: NaiveDate, items: Vec<T>) -> Result<()>;
}

/// Walk `latest` down to `earliest` (inclusive), fetching then visiting each
/// day.
///
/// Stops at the first failing fetch or visit and returns that error; no
/// further days are fetched. Returns the number of days visited. An inverted
/// range visits nothing.
pub async fn walk_days<T, F, Fut, V>(
    earliest: NaiveDate,
    latest: NaiveDate,
    mut fetch: F,
    visitor: &mut V,
) -> Result<usize>
where
    T: Send + 'static,
    F: FnMut(NaiveDate) -> Fut,
    Fut: Future<Output = Result<Vec<T>>>,
    V: DayVisitor<T> + ?Sized,
{
    let mut visited = 0;
    let mut day = latest;

    while day >= earliest {
        let items = fetch(day).await?;
        trace!(day = %day, items = items.len(), "fetched day");
        visitor.visit(day, items).await?;
        visited += 1;

        match day.pred_opt() {
            Some(previous) => day = previous,
            None => break,
        }
    }

    Ok(visited)
}

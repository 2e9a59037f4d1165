//! Detection of team members below the weekly hours threshold
//!
//! Every active member is aggregated independently. A failure for one member
//! only drops that member from the result; it never fails the scan.

use chrono::NaiveDate;
use futures::stream::{FuturesUnordered, StreamExt};
use timebot_domain::{AuthScope, DelinquentRecord, Result, TeamMember};
use tracing::{info, instrument, warn};

use super::hours::HoursAggregator;

/// Finds active members who logged fewer hours than required
#[derive(Clone)]
pub struct DelinquencyScanner {
    aggregator: HoursAggregator,
}

impl DelinquencyScanner {
    pub fn new(aggregator: HoursAggregator) -> Self {
        Self { aggregator }
    }

    /// Scan `roster` for the week containing `today`.
    ///
    /// `scope` must be allowed to read other users' timesheets. Members are
    /// aggregated concurrently; outbound pressure is bounded by the
    /// time-tracking adapter's rate limiter. Records come back in completion
    /// order.
    #[instrument(skip(self, scope, roster), fields(roster = roster.len()))]
    pub async fn scan(
        &self,
        scope: &AuthScope,
        roster: &[TeamMember],
        threshold: f64,
        today: NaiveDate,
    ) -> Vec<DelinquentRecord> {
        let mut pending: FuturesUnordered<_> = roster
            .iter()
            .filter(|member| member.is_active)
            .map(|member| async move {
                let hours = self.aggregator.aggregate_week_of(&scope.for_user(member.id), today).await;
                (member, hours)
            })
            .collect();

        let mut delinquents = Vec::new();
        while let Some((member, hours)) = pending.next().await {
            match hours {
                Ok(hours) if hours < threshold => {
                    delinquents.push(DelinquentRecord { member: member.clone(), hours });
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(
                        user_id = member.id,
                        error = %err,
                        "skipping member whose hours could not be aggregated"
                    );
                }
            }
        }

        info!(delinquents = delinquents.len(), threshold, "delinquency scan finished");
        delinquents
    }

    /// Fetch the roster with `scope`, then [`DelinquencyScanner::scan`] it.
    ///
    /// Only a roster failure is returned as an error.
    pub async fn scan_roster(
        &self,
        scope: &AuthScope,
        threshold: f64,
        today: NaiveDate,
    ) -> Result<Vec<DelinquentRecord>> {
        let roster = self.aggregator.source().list_roster(scope).await?;
        Ok(self.scan(scope, &roster, threshold, today).await)
    }
}

//! Derived statistics over the full application collection.
//!
//! All aggregations are O(n) scans recomputed per request; nothing is
//! maintained incrementally.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{Applicant, ApplicationStatus};

/// Counts per lifecycle status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, ToSchema)]
pub struct StatusCounts {
    pub pending: u64,
    pub verified: u64,
    pub revision: u64,
}

/// Applications per region
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct RegionCount {
    #[schema(example = "Jakarta")]
    pub region: String,
    pub count: u64,
}

/// Applications per calendar day (UTC)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct DailyCount {
    /// ISO date, e.g. `2025-05-17`
    #[schema(example = "2025-05-17")]
    pub date: String,
    pub count: u64,
}

/// Aggregate view over all applications
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Statistics {
    pub total: u64,
    pub by_status: StatusCounts,
    /// Integer percentage of verified applications
    pub verification_rate: u64,
    /// Regions ordered by count, descending
    pub by_region: Vec<RegionCount>,
    /// Submission days ordered chronologically
    pub by_day: Vec<DailyCount>,
}

impl Statistics {
    /// Compute all aggregates from a full collection scan.
    pub fn compute(applications: &[Applicant]) -> Self {
        let total = applications.len() as u64;

        let mut by_status = StatusCounts::default();
        let mut regions = std::collections::HashMap::<String, u64>::new();
        let mut days = std::collections::HashMap::<String, u64>::new();

        for app in applications {
            match app.status {
                ApplicationStatus::Pending => by_status.pending += 1,
                ApplicationStatus::Verified => by_status.verified += 1,
                ApplicationStatus::Revision => by_status.revision += 1,
            }
            *regions.entry(app.region.clone()).or_default() += 1;
            *days.entry(day_key(app.submission_time)).or_default() += 1;
        }

        let verification_rate = if total > 0 {
            by_status.verified * 100 / total
        } else {
            0
        };

        let mut by_region: Vec<RegionCount> = regions
            .into_iter()
            .map(|(region, count)| RegionCount { region, count })
            .collect();
        // Descending by count, region name as tie-break for determinism
        by_region.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.region.cmp(&b.region)));

        let mut by_day: Vec<DailyCount> = days
            .into_iter()
            .map(|(date, count)| DailyCount { date, count })
            .collect();
        by_day.sort_by(|a, b| a.date.cmp(&b.date));

        Self {
            total,
            by_status,
            verification_rate,
            by_region,
            by_day,
        }
    }
}

/// UTC calendar day for an epoch-millis timestamp.
///
/// Out-of-range timestamps bucket under a sentinel rather than failing the
/// whole report.
fn day_key(epoch_millis: i64) -> String {
    DateTime::<Utc>::from_timestamp_millis(epoch_millis)
        .map(|dt| dt.date_naive().format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "invalid".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ApplicationStatus;

    fn app(region: &str, status: ApplicationStatus, submission_time: i64) -> Applicant {
        Applicant {
            id: format!("{}-{}", region, submission_time),
            name: "Test".to_string(),
            address: "Addr".to_string(),
            region: region.to_string(),
            submission_time,
            status,
        }
    }

    const DAY_MILLIS: i64 = 86_400_000;

    #[test]
    fn empty_collection_yields_zeroes() {
        let stats = Statistics::compute(&[]);
        assert_eq!(stats.total, 0);
        assert_eq!(stats.verification_rate, 0);
        assert!(stats.by_region.is_empty());
        assert!(stats.by_day.is_empty());
    }

    #[test]
    fn counts_by_status_and_rate() {
        let apps = vec![
            app("A", ApplicationStatus::Pending, 0),
            app("A", ApplicationStatus::Verified, 1),
            app("B", ApplicationStatus::Verified, 2),
            app("B", ApplicationStatus::Revision, 3),
        ];
        let stats = Statistics::compute(&apps);
        assert_eq!(stats.total, 4);
        assert_eq!(stats.by_status.pending, 1);
        assert_eq!(stats.by_status.verified, 2);
        assert_eq!(stats.by_status.revision, 1);
        assert_eq!(stats.verification_rate, 50);
    }

    #[test]
    fn regions_ordered_by_count_descending() {
        let apps = vec![
            app("A", ApplicationStatus::Pending, 0),
            app("B", ApplicationStatus::Pending, 1),
            app("B", ApplicationStatus::Pending, 2),
        ];
        let stats = Statistics::compute(&apps);
        assert_eq!(stats.by_region[0].region, "B");
        assert_eq!(stats.by_region[0].count, 2);
        assert_eq!(stats.by_region[1].region, "A");
    }

    #[test]
    fn days_ordered_chronologically() {
        let apps = vec![
            app("A", ApplicationStatus::Pending, 2 * DAY_MILLIS),
            app("A", ApplicationStatus::Pending, 0),
            app("A", ApplicationStatus::Pending, DAY_MILLIS / 2),
        ];
        let stats = Statistics::compute(&apps);
        assert_eq!(stats.by_day.len(), 2);
        assert_eq!(stats.by_day[0].date, "1970-01-01");
        assert_eq!(stats.by_day[0].count, 2);
        assert_eq!(stats.by_day[1].date, "1970-01-03");
    }
}

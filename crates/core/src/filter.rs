//! Gallery filtering and statistics.
//!
//! Filters are pure predicates over normalized groups; `now` is always
//! supplied by the caller so date bucketing is deterministic under test.
//!
//! The date buckets reproduce the behaviour the gallery has always had:
//! elapsed time in milliseconds, divided into days with a ceiling. This
//! is not calendar-aware. An upload at 23:59 checked at 00:01 the next
//! day has a positive elapsed time, rounds up to one day, and fails the
//! "today" bucket. Changing this would silently change which photos
//! users see, so it stays.

use serde::Deserialize;

use crate::category::Category;
use crate::group::{GalleryStats, ProductGroup};
use crate::normalize::NormalizedGroup;
use crate::Timestamp;

/// Milliseconds per day, matching the bucket arithmetic of the feed.
const MS_PER_DAY: f64 = 86_400_000.0;

/// Date bucket for the gallery filter bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFilter {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl std::str::FromStr for DateFilter {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(DateFilter::All),
            "today" => Ok(DateFilter::Today),
            "week" => Ok(DateFilter::Week),
            "month" => Ok(DateFilter::Month),
            other => Err(crate::error::CoreError::Validation(format!(
                "Unknown date filter: '{other}'. Valid filters: all, today, week, month"
            ))),
        }
    }
}

/// Combined gallery filter. All populated criteria must match (AND).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryFilter {
    /// `None` matches every category.
    pub category: Option<Category>,
    pub date: DateFilter,
    /// Case-insensitive substring match on the group name. Empty string
    /// matches everything.
    pub search: String,
}

/// Elapsed whole days between `upload` and `now`, ceiling on the
/// millisecond difference. Zero only when the two instants coincide to
/// the millisecond.
fn diff_days(upload: Timestamp, now: Timestamp) -> i64 {
    let diff_ms = (now - upload).num_milliseconds().abs();
    (diff_ms as f64 / MS_PER_DAY).ceil() as i64
}

/// Whether an upload timestamp falls inside a date bucket.
pub fn matches_date(filter: DateFilter, upload: Timestamp, now: Timestamp) -> bool {
    match filter {
        DateFilter::All => true,
        DateFilter::Today => diff_days(upload, now) == 0,
        DateFilter::Week => diff_days(upload, now) <= 7,
        DateFilter::Month => diff_days(upload, now) <= 30,
    }
}

/// Whether a group passes every criterion of the filter.
pub fn matches(group: &ProductGroup, filter: &GalleryFilter, now: Timestamp) -> bool {
    if let Some(category) = filter.category {
        if group.category() != category {
            return false;
        }
    }

    if !matches_date(filter.date, group.upload_date(), now) {
        return false;
    }

    filter.search.is_empty()
        || group
            .name()
            .to_lowercase()
            .contains(&filter.search.to_lowercase())
}

/// Keep only the groups that pass the filter, preserving order.
pub fn apply(
    groups: Vec<NormalizedGroup>,
    filter: &GalleryFilter,
    now: Timestamp,
) -> Vec<NormalizedGroup> {
    groups
        .into_iter()
        .filter(|g| matches(&g.group, filter, now))
        .collect()
}

/// Tally per-category counts over a (typically filtered) listing.
pub fn compute_stats(groups: &[NormalizedGroup]) -> GalleryStats {
    let mut stats = GalleryStats::default();
    for g in groups {
        stats.record(g.group.category());
    }
    stats
}

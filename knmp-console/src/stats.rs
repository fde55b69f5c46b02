//! Dashboard aggregation
//!
//! Computed fresh on every dashboard request from the reporting queries in
//! `knmp_common::db::stats`.

use knmp_common::db::{stats, Gender, Status};
use knmp_common::Result;
use sqlx::SqlitePool;

/// One bucket of the two-bucket gender summary
#[derive(Debug, Clone, PartialEq)]
pub struct GenderShare {
    pub gender: Gender,
    pub count: i64,
    /// Share of all records, rounded to two decimals
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardStats {
    pub total: i64,
    pub still_missing: i64,
    /// Records in either found state
    pub resolved: i64,
    pub top_county: Option<(String, i64)>,
    /// Most common gender first, least common second
    pub gender: Vec<GenderShare>,
    pub median_age: Option<f64>,
}

impl DashboardStats {
    pub async fn load(pool: &SqlitePool) -> Result<Self> {
        let total = stats::total_count(pool).await?;

        let by_status = stats::status_counts(pool).await?;
        let still_missing: i64 = by_status
            .iter()
            .filter(|(status, _)| *status == Status::Missing)
            .map(|(_, count)| count)
            .sum();
        let resolved: i64 = by_status
            .iter()
            .filter(|(status, _)| status.is_resolved())
            .map(|(_, count)| count)
            .sum();

        let top_county = stats::top_county(pool).await?;
        let gender = gender_summary(&stats::gender_counts(pool).await?, total);
        let median_age = median_age(&mut stats::known_ages(pool).await?);

        Ok(Self {
            total,
            still_missing,
            resolved,
            top_county,
            gender,
            median_age,
        })
    }
}

/// Standard median: middle value for odd counts, mean of the two middle values for even
pub fn median_age(ages: &mut [i64]) -> Option<f64> {
    if ages.is_empty() {
        return None;
    }
    ages.sort_unstable();

    let n = ages.len();
    let median = if n % 2 == 1 {
        ages[n / 2] as f64
    } else {
        (ages[n / 2 - 1] + ages[n / 2]) as f64 / 2.0
    };
    Some(median)
}

/// Most and least common gender with their share of `total`
///
/// `counts` must be ordered by count, highest first. With a single gender on
/// record both buckets name it; with no records the summary is empty.
pub fn gender_summary(counts: &[(Gender, i64)], total: i64) -> Vec<GenderShare> {
    let share = |&(gender, count): &(Gender, i64)| GenderShare {
        gender,
        count,
        percentage: percentage(count, total),
    };

    match (counts.first(), counts.last()) {
        (Some(most), Some(least)) => vec![share(most), share(least)],
        _ => Vec::new(),
    }
}

fn percentage(count: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    (count as f64 / total as f64 * 10_000.0).round() / 100.0
}

/// Median for display: whole numbers without a fraction, otherwise one decimal
pub fn format_median(median: Option<f64>) -> String {
    match median {
        Some(m) if m.fract() == 0.0 => format!("{}", m as i64),
        Some(m) => format!("{:.1}", m),
        None => "N/A".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_median_odd() {
        assert_eq!(median_age(&mut [30, 10, 20]), Some(20.0));
    }

    #[test]
    fn test_median_even() {
        assert_eq!(median_age(&mut [40, 10, 30, 20]), Some(25.0));
        assert_eq!(median_age(&mut [1, 2]), Some(1.5));
    }

    #[test]
    fn test_median_empty() {
        assert_eq!(median_age(&mut []), None);
    }

    #[test]
    fn test_gender_summary_two_buckets() {
        let summary = gender_summary(&[(Gender::Female, 2), (Gender::Male, 1)], 3);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].gender, Gender::Female);
        assert_eq!(summary[0].percentage, 66.67);
        assert_eq!(summary[1].gender, Gender::Male);
        assert_eq!(summary[1].percentage, 33.33);
    }

    #[test]
    fn test_gender_summary_single_gender() {
        let summary = gender_summary(&[(Gender::Male, 4)], 4);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0], summary[1]);
        assert_eq!(summary[0].percentage, 100.0);
    }

    #[test]
    fn test_gender_summary_empty() {
        assert!(gender_summary(&[], 0).is_empty());
    }

    #[test]
    fn test_percentage_zero_total() {
        assert_eq!(percentage(3, 0), 0.0);
    }

    #[test]
    fn test_format_median() {
        assert_eq!(format_median(Some(20.0)), "20");
        assert_eq!(format_median(Some(25.5)), "25.5");
        assert_eq!(format_median(None), "N/A");
    }
}

//! Per-student usage statistics over closed sessions.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::log_entry;

/// Label applied to sessions whose purpose was left blank.
const UNKNOWN_SUBJECT: &str = "Unknown";

/// Total and per-purpose usage, in hours rounded to two decimal places.
#[derive(Debug, Default, PartialEq, Serialize)]
pub struct UsageStats {
    pub total_hours: f64,
    pub subject_breakdown: BTreeMap<String, f64>,
}

impl UsageStats {
    /// Aggregates closed log entries into hour totals.
    ///
    /// Callers are expected to pass closed sessions only; an entry with no
    /// check-out time is skipped defensively rather than counted as zero.
    /// No sessions yields a zero total and an empty breakdown.
    pub fn from_logs(logs: &[log_entry::Model]) -> Self {
        let mut total_seconds = 0i64;
        let mut buckets: BTreeMap<String, i64> = BTreeMap::new();

        for log in logs {
            let Some(check_out) = log.check_out_time else {
                continue;
            };
            let duration = (check_out - log.check_in_time).num_seconds();
            total_seconds += duration;

            let subject = if log.purpose.is_empty() {
                UNKNOWN_SUBJECT
            } else {
                log.purpose.as_str()
            };
            *buckets.entry(subject.to_owned()).or_insert(0) += duration;
        }

        UsageStats {
            total_hours: round_hours(total_seconds),
            subject_breakdown: buckets
                .into_iter()
                .map(|(subject, seconds)| (subject, round_hours(seconds)))
                .collect(),
        }
    }
}

fn round_hours(seconds: i64) -> f64 {
    (seconds as f64 / 3600.0 * 100.0).round() / 100.0
}

use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::char_stats::percent;

/// One resolved question as kept in a mode's recent-history log.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    pub is_correct: bool,
    /// Kept with the offset it was recorded in; day buckets use that offset.
    pub timestamp: DateTime<FixedOffset>,
    pub character: String,
}

/// Per-day aggregate used for the trend chart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyAccuracy {
    pub date: NaiveDate,
    pub accuracy: u32,
    pub total_questions: u64,
    pub correct_answers: u64,
}

/// Appends and drops the oldest entries beyond `limit`.
pub fn push_capped(log: &mut Vec<Attempt>, attempt: Attempt, limit: usize) {
    log.push(attempt);
    truncate_front(log, limit);
}

pub fn truncate_front(log: &mut Vec<Attempt>, limit: usize) {
    if log.len() > limit {
        let excess = log.len() - limit;
        log.drain(..excess);
    }
}

/// Accuracy over the last `count` entries, or all of them when fewer exist.
/// A `count` of zero means the whole log.
pub fn recent_accuracy(log: &[Attempt], count: usize) -> Option<u32> {
    let window = if count == 0 {
        log
    } else {
        &log[log.len().saturating_sub(count)..]
    };
    let correct = window.iter().filter(|a| a.is_correct).count();
    percent(correct as u64, window.len() as u64)
}

/// Buckets by the calendar date of each timestamp as recorded, ascending.
pub fn group_by_date(log: &[Attempt]) -> Vec<DailyAccuracy> {
    let mut days: BTreeMap<NaiveDate, (u64, u64)> = BTreeMap::new();
    for attempt in log {
        let entry = days.entry(attempt.timestamp.date_naive()).or_insert((0, 0));
        entry.0 += 1;
        if attempt.is_correct {
            entry.1 += 1;
        }
    }
    days.into_iter()
        .map(|(date, (total, correct))| DailyAccuracy {
            date,
            accuracy: percent(correct, total).unwrap_or(0),
            total_questions: total,
            correct_answers: correct,
        })
        .collect()
}

/// Drops attempts recorded before `cutoff`. Returns how many were removed.
pub fn prune_before(log: &mut Vec<Attempt>, cutoff: DateTime<Utc>) -> usize {
    let before = log.len();
    log.retain(|a| a.timestamp.with_timezone(&Utc) >= cutoff);
    before - log.len()
}

use chrono::NaiveDate;

use crate::engine::char_stats::{CharacterStat, CharacterTable, percent, table_totals};
use crate::engine::history::DailyAccuracy;

/// Fewer day buckets than this are not worth drawing as a trend line.
pub const MIN_CHART_POINTS: usize = 2;
/// Toasts at or above this recent accuracy are shown as positive feedback.
pub const TOAST_POSITIVE_THRESHOLD: u32 = 70;

pub const NO_STATS_MESSAGE: &str = "Practice any mode to see your stats!";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatsSummary {
    NoStats,
    Overall { accuracy: u32 },
}

impl StatsSummary {
    pub fn headline(&self) -> String {
        match self {
            StatsSummary::NoStats => NO_STATS_MESSAGE.to_string(),
            StatsSummary::Overall { accuracy } => format!("Overall accuracy: {accuracy}%"),
        }
    }
}

pub fn stats_summary(totals: CharacterStat) -> StatsSummary {
    match percent(totals.correct, totals.attempts) {
        Some(accuracy) => StatsSummary::Overall { accuracy },
        None => StatsSummary::NoStats,
    }
}

/// Dashboard cards for one mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ModeSummary {
    /// Lifetime accuracy for the mode, `None` before the first attempt.
    pub accuracy: Option<u32>,
    /// Days with at least one attempt in the recent log.
    pub practice_days: usize,
    pub best_daily_accuracy: Option<u32>,
}

pub fn mode_summary(table: &CharacterTable, days: &[DailyAccuracy]) -> ModeSummary {
    let totals = table_totals(table);
    ModeSummary {
        accuracy: percent(totals.correct, totals.attempts),
        practice_days: days.len(),
        best_daily_accuracy: days.iter().map(|d| d.accuracy).max(),
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ChartData {
    /// `(day index, accuracy %)`, one point per bucket.
    pub points: Vec<(f64, f64)>,
    pub labels: Vec<String>,
}

/// `None` when there are too few days to draw a line.
pub fn chart_data(days: &[DailyAccuracy]) -> Option<ChartData> {
    if days.len() < MIN_CHART_POINTS {
        return None;
    }
    Some(ChartData {
        points: days
            .iter()
            .enumerate()
            .map(|(i, d)| (i as f64, d.accuracy as f64))
            .collect(),
        labels: days.iter().map(|d| chart_label(d.date)).collect(),
    })
}

/// Short axis label such as `Oct 19`.
pub fn chart_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub positive: bool,
}

pub fn toast_due(question_count: u64, cadence: u32) -> bool {
    cadence > 0 && question_count > 0 && question_count % cadence as u64 == 0
}

pub fn toast(cadence: u32, accuracy: u32) -> Toast {
    Toast {
        message: format!("Accuracy over last {cadence} questions: {accuracy}%"),
        positive: accuracy >= TOAST_POSITIVE_THRESHOLD,
    }
}

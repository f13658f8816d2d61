use std::time::{Duration, Instant};

use crate::engine::PracticeMode;

/// Sittings shorter than this are not reported.
pub const MIN_SESSION_QUESTIONS: u32 = 5;

/// Running tally for one sitting in a practice mode.
#[derive(Clone, Debug)]
pub struct SessionTracker {
    pub mode: PracticeMode,
    pub correct: u32,
    pub total: u32,
    pub started_at: Instant,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionSummary {
    pub mode: PracticeMode,
    pub correct: u32,
    pub total: u32,
    pub accuracy: f64,
    pub elapsed: Duration,
}

impl SessionTracker {
    pub fn new(mode: PracticeMode) -> Self {
        Self {
            mode,
            correct: 0,
            total: 0,
            started_at: Instant::now(),
        }
    }

    pub fn record(&mut self, is_correct: bool) {
        self.total += 1;
        if is_correct {
            self.correct += 1;
        }
        log::debug!(
            "{} session: {}/{} ({}%)",
            self.mode,
            self.correct,
            self.total,
            self.accuracy()
        );
    }

    /// Percent with one decimal place.
    pub fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        (self.correct as f64 / self.total as f64 * 1000.0).round() / 10.0
    }

    pub fn has_minimum_questions(&self) -> bool {
        self.total >= MIN_SESSION_QUESTIONS
    }

    pub fn complete(&self) -> Option<SessionSummary> {
        if !self.has_minimum_questions() {
            log::debug!("{} session too short to report: {}", self.mode, self.total);
            return None;
        }
        Some(SessionSummary {
            mode: self.mode,
            correct: self.correct,
            total: self.total,
            accuracy: self.accuracy(),
            elapsed: self.started_at.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accuracy_one_decimal() {
        let mut tracker = SessionTracker::new(PracticeMode::MorseToChar);
        assert_eq!(tracker.accuracy(), 0.0);
        tracker.record(true);
        tracker.record(true);
        tracker.record(false);
        assert_eq!(tracker.accuracy(), 66.7);
    }

    #[test]
    fn test_short_session_is_not_reported() {
        let mut tracker = SessionTracker::new(PracticeMode::CharToMorse);
        for _ in 0..4 {
            tracker.record(true);
        }
        assert!(tracker.complete().is_none());
        tracker.record(false);
        let summary = tracker.complete().unwrap();
        assert_eq!(summary.total, 5);
        assert_eq!(summary.correct, 4);
        assert_eq!(summary.accuracy, 80.0);
    }
}

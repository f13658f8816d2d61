use serde::{Deserialize, Serialize};

use crate::morse::Symbol;
use crate::morse::keying::{DOT_DURATION_FORMULA_MS, DOT_TO_DASH_RATIO};

/// Human input gets more slack than machine-keyed audio.
pub const PADDLE_TIMING_MULTIPLIER: f64 = 1.2;
pub const TOLERANCE_RATIO: f64 = 0.4;

pub const DEFAULT_DOT_THRESHOLD_MS: f64 = 150.0;
pub const DEFAULT_DASH_THRESHOLD_MS: f64 = 500.0;
pub const DEFAULT_TOLERANCE_MS: f64 = 50.0;

pub const MIN_WPM: f64 = 1.0;
pub const MAX_WPM: f64 = 100.0;
const MIN_THRESHOLD_MS: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TimingConfig {
    pub dot_threshold_ms: f64,
    pub dash_threshold_ms: f64,
    pub tolerance_ms: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            dot_threshold_ms: DEFAULT_DOT_THRESHOLD_MS,
            dash_threshold_ms: DEFAULT_DASH_THRESHOLD_MS,
            tolerance_ms: DEFAULT_TOLERANCE_MS,
        }
    }
}

impl TimingConfig {
    /// Thresholds for a keying speed. Non-finite or out-of-range WPM is clamped
    /// into `MIN_WPM..=MAX_WPM`.
    pub fn from_wpm(wpm: f64) -> Self {
        let wpm = if wpm.is_finite() {
            wpm.clamp(MIN_WPM, MAX_WPM)
        } else {
            MIN_WPM
        };
        let dot_ms = DOT_DURATION_FORMULA_MS / wpm;
        Self {
            dot_threshold_ms: (dot_ms * PADDLE_TIMING_MULTIPLIER).round(),
            dash_threshold_ms: (dot_ms * DOT_TO_DASH_RATIO * PADDLE_TIMING_MULTIPLIER).round(),
            tolerance_ms: (dot_ms * TOLERANCE_RATIO).round(),
        }
        .sanitized()
    }

    /// Every threshold strictly positive and the dash threshold above the dot
    /// threshold.
    pub fn sanitized(self) -> Self {
        let clean = |v: f64| {
            if v.is_finite() {
                v.max(MIN_THRESHOLD_MS)
            } else {
                MIN_THRESHOLD_MS
            }
        };
        let dot = clean(self.dot_threshold_ms);
        let dash = clean(self.dash_threshold_ms).max(dot + MIN_THRESHOLD_MS);
        Self {
            dot_threshold_ms: dot,
            dash_threshold_ms: dash,
            tolerance_ms: clean(self.tolerance_ms),
        }
    }

    /// Dot acceptance is checked first, so durations in the overlap band
    /// `dot - tol ..= dot + tol` always come out as a dot.
    pub fn classify(&self, duration_ms: f64) -> Option<Symbol> {
        let TimingConfig {
            dot_threshold_ms: dot,
            dash_threshold_ms: dash,
            tolerance_ms: tol,
        } = *self;

        if duration_ms <= dot + tol {
            Some(Symbol::Dot)
        } else if duration_ms >= dot - tol && duration_ms <= dash + tol {
            Some(Symbol::Dash)
        } else {
            None
        }
    }

    /// Longest press that still classifies; the timing bar fills at this point.
    pub fn max_duration_ms(&self) -> f64 {
        self.dash_threshold_ms + self.tolerance_ms
    }

    pub fn info(&self) -> TimingInfo {
        let dot = self.dot_threshold_ms;
        let dash = self.dash_threshold_ms;
        let tol = self.tolerance_ms;
        TimingInfo {
            dot_range: format!("0-{}ms", dot + tol),
            dash_range: format!("{}-{}ms", dot - tol, dash + tol),
            tolerance: format!("±{tol}ms"),
        }
    }
}

/// Human-readable acceptance windows for the settings/help display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimingInfo {
    pub dot_range: String,
    pub dash_range: String,
    pub tolerance: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn twelve_wpm() -> TimingConfig {
        TimingConfig::from_wpm(12.0)
    }

    #[test]
    fn test_twelve_wpm_thresholds() {
        let timing = twelve_wpm();
        assert_eq!(timing.dot_threshold_ms, 120.0);
        assert_eq!(timing.dash_threshold_ms, 360.0);
        assert_eq!(timing.tolerance_ms, 40.0);
    }

    #[test]
    fn test_classify_scenarios() {
        let timing = twelve_wpm();
        assert_eq!(timing.classify(50.0), Some(Symbol::Dot));
        assert_eq!(timing.classify(250.0), Some(Symbol::Dash));
        assert_eq!(timing.classify(500.0), None);
    }

    #[test]
    fn test_boundaries() {
        let timing = twelve_wpm();
        assert_eq!(timing.classify(0.0), Some(Symbol::Dot));
        assert_eq!(timing.classify(160.0), Some(Symbol::Dot));
        assert_eq!(timing.classify(160.001), Some(Symbol::Dash));
        assert_eq!(timing.classify(400.0), Some(Symbol::Dash));
        assert_eq!(timing.classify(400.001), None);
    }

    #[test]
    fn test_overlap_band_resolves_to_dot() {
        let timing = twelve_wpm();
        // 80..=160 satisfies both rules; dot is checked first.
        for d in [80.0, 100.0, 120.0, 140.0, 160.0] {
            assert_eq!(timing.classify(d), Some(Symbol::Dot), "duration {d}");
        }
    }

    #[test]
    fn test_thresholds_decrease_with_speed() {
        let mut prev = TimingConfig::from_wpm(5.0);
        for wpm in [10.0, 15.0, 20.0, 30.0, 40.0] {
            let next = TimingConfig::from_wpm(wpm);
            assert!(next.dot_threshold_ms < prev.dot_threshold_ms);
            assert!(next.dash_threshold_ms < prev.dash_threshold_ms);
            assert!(next.tolerance_ms <= prev.tolerance_ms);
            prev = next;
        }
    }

    #[test]
    fn test_from_wpm_is_deterministic() {
        assert_eq!(TimingConfig::from_wpm(18.0), TimingConfig::from_wpm(18.0));
    }

    #[test]
    fn test_pathological_wpm_is_clamped() {
        for wpm in [0.0, -5.0, f64::NAN, f64::INFINITY, 1e9] {
            let timing = TimingConfig::from_wpm(wpm);
            assert!(timing.dot_threshold_ms > 0.0, "wpm {wpm}");
            assert!(timing.tolerance_ms > 0.0, "wpm {wpm}");
            assert!(timing.dash_threshold_ms > timing.dot_threshold_ms, "wpm {wpm}");
        }
        assert_eq!(TimingConfig::from_wpm(0.0), TimingConfig::from_wpm(MIN_WPM));
    }

    #[test]
    fn test_sanitized_rejects_non_positive() {
        let timing = TimingConfig {
            dot_threshold_ms: -10.0,
            dash_threshold_ms: 0.0,
            tolerance_ms: 0.0,
        }
        .sanitized();
        assert_eq!(timing.dot_threshold_ms, 1.0);
        assert_eq!(timing.dash_threshold_ms, 2.0);
        assert_eq!(timing.tolerance_ms, 1.0);
    }

    #[test]
    fn test_timing_info_ranges() {
        let info = twelve_wpm().info();
        assert_eq!(info.dot_range, "0-160ms");
        assert_eq!(info.dash_range, "80-400ms");
        assert_eq!(info.tolerance, "±40ms");
    }
}

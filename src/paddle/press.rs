use std::time::{Duration, Instant};

use crate::morse::Symbol;
use crate::paddle::classifier::TimingConfig;

/// Window during which a second input type is ignored, so a touch and the
/// mouse event synthesized from it count once.
pub const INTERACTION_LOCK: Duration = Duration::from_millis(100);
/// How long the final timing bar stays visible after release.
pub const RESULT_LINGER: Duration = Duration::from_millis(200);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputSource {
    Keyboard,
    Mouse,
    Touch,
}

/// The in-flight press. Dropped on release or disable.
#[derive(Clone, Copy, Debug)]
pub struct PressEvent {
    pub started_at: Instant,
    pub source: InputSource,
}

/// Hooks fired synchronously as a press moves through its lifecycle.
/// Exactly one of `on_input` / `on_invalid_timing` follows each `on_press_end`.
pub trait PaddleListener {
    fn on_press_start(&mut self) {}
    fn on_press_end(&mut self, _duration_ms: f64, _symbol: Option<Symbol>) {}
    fn on_input(&mut self, symbol: Symbol);
    fn on_invalid_timing(&mut self, _duration_ms: f64) {}
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PressResult {
    pub duration_ms: f64,
    pub symbol: Option<Symbol>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimingZone {
    Dot,
    Dash,
    Invalid,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimingBar {
    /// Fill ratio in `0.0..=1.0`.
    pub progress: f64,
    pub zone: TimingZone,
}

impl TimingBar {
    fn at(timing: &TimingConfig, elapsed_ms: f64) -> Self {
        let progress = (elapsed_ms / timing.max_duration_ms()).clamp(0.0, 1.0);
        let zone = if elapsed_ms <= timing.dot_threshold_ms {
            TimingZone::Dot
        } else if elapsed_ms <= timing.dash_threshold_ms {
            TimingZone::Dash
        } else {
            TimingZone::Invalid
        };
        Self { progress, zone }
    }
}

#[derive(Clone, Copy, Debug)]
enum Animation {
    Idle,
    Tracking,
    Lingering { bar: TimingBar, until: Instant },
}

pub struct Paddle {
    timing: TimingConfig,
    enabled: bool,
    press: Option<PressEvent>,
    lock: Option<(InputSource, Instant)>,
    animation: Animation,
}

impl Default for Paddle {
    fn default() -> Self {
        Self::new(TimingConfig::default())
    }
}

impl Paddle {
    pub fn new(timing: TimingConfig) -> Self {
        Self {
            timing: timing.sanitized(),
            enabled: false,
            press: None,
            lock: None,
            animation: Animation::Idle,
        }
    }

    pub fn from_wpm(wpm: f64) -> Self {
        Self::new(TimingConfig::from_wpm(wpm))
    }

    pub fn timing(&self) -> TimingConfig {
        self.timing
    }

    /// Applies to presses classified from now on, including one already held.
    pub fn configure(&mut self, timing: TimingConfig) {
        self.timing = timing.sanitized();
    }

    pub fn set_timing_from_speed(&mut self, wpm: f64) {
        self.timing = TimingConfig::from_wpm(wpm);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_pressed(&self) -> bool {
        self.press.is_some()
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Drops any held press without classifying it.
    pub fn disable(&mut self) {
        if !self.enabled {
            return;
        }
        self.enabled = false;
        self.press = None;
        self.lock = None;
        self.animation = Animation::Idle;
    }

    fn accept_source(&mut self, source: InputSource, now: Instant) -> bool {
        if let Some((locked, at)) = self.lock {
            if locked != source && now.saturating_duration_since(at) < INTERACTION_LOCK {
                return false;
            }
        }
        self.lock = Some((source, now));
        true
    }

    /// Returns whether the press was accepted. Ignored while disabled, while
    /// another press is held (key auto-repeat), or inside another source's lock.
    pub fn press_start_at(
        &mut self,
        source: InputSource,
        now: Instant,
        listener: &mut dyn PaddleListener,
    ) -> bool {
        if !self.enabled || self.press.is_some() {
            return false;
        }
        if !self.accept_source(source, now) {
            return false;
        }
        self.press = Some(PressEvent {
            started_at: now,
            source,
        });
        self.animation = Animation::Tracking;
        listener.on_press_start();
        true
    }

    pub fn press_end_at(
        &mut self,
        source: InputSource,
        now: Instant,
        listener: &mut dyn PaddleListener,
    ) -> Option<PressResult> {
        if !self.enabled {
            return None;
        }
        let press = self.press.filter(|p| p.source == source)?;
        if !self.accept_source(source, now) {
            return None;
        }
        self.press = None;

        let duration_ms = now.saturating_duration_since(press.started_at).as_secs_f64() * 1000.0;
        let symbol = self.timing.classify(duration_ms);
        self.animation = Animation::Lingering {
            bar: TimingBar::at(&self.timing, duration_ms),
            until: now + RESULT_LINGER,
        };

        listener.on_press_end(duration_ms, symbol);
        match symbol {
            Some(symbol) => listener.on_input(symbol),
            None => listener.on_invalid_timing(duration_ms),
        }
        Some(PressResult {
            duration_ms,
            symbol,
        })
    }

    pub fn press_start(&mut self, source: InputSource, listener: &mut dyn PaddleListener) -> bool {
        self.press_start_at(source, Instant::now(), listener)
    }

    pub fn press_end(
        &mut self,
        source: InputSource,
        listener: &mut dyn PaddleListener,
    ) -> Option<PressResult> {
        self.press_end_at(source, Instant::now(), listener)
    }

    /// Timing bar for the frame drawn at `now`, or `None` when nothing should
    /// be shown.
    pub fn frame(&mut self, now: Instant) -> Option<TimingBar> {
        match self.animation {
            Animation::Idle => None,
            Animation::Tracking => {
                let press = self.press?;
                let elapsed = now.saturating_duration_since(press.started_at).as_secs_f64() * 1000.0;
                Some(TimingBar::at(&self.timing, elapsed))
            }
            Animation::Lingering { bar, until } => {
                if now < until {
                    Some(bar)
                } else {
                    self.animation = Animation::Idle;
                    None
                }
            }
        }
    }

    pub fn cancel_animation(&mut self) {
        self.animation = match self.animation {
            Animation::Tracking if self.press.is_some() => Animation::Tracking,
            _ => Animation::Idle,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        starts: usize,
        ends: Vec<(f64, Option<Symbol>)>,
        inputs: Vec<Symbol>,
        invalid: Vec<f64>,
    }

    impl PaddleListener for Recorder {
        fn on_press_start(&mut self) {
            self.starts += 1;
        }
        fn on_press_end(&mut self, duration_ms: f64, symbol: Option<Symbol>) {
            self.ends.push((duration_ms, symbol));
        }
        fn on_input(&mut self, symbol: Symbol) {
            self.inputs.push(symbol);
        }
        fn on_invalid_timing(&mut self, duration_ms: f64) {
            self.invalid.push(duration_ms);
        }
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn enabled_paddle() -> Paddle {
        let mut paddle = Paddle::from_wpm(12.0);
        paddle.enable();
        paddle
    }

    #[test]
    fn test_short_press_is_dot() {
        let mut paddle = enabled_paddle();
        let mut rec = Recorder::default();
        let t0 = Instant::now();
        assert!(paddle.press_start_at(InputSource::Keyboard, t0, &mut rec));
        let result = paddle
            .press_end_at(InputSource::Keyboard, t0 + ms(50), &mut rec)
            .unwrap();
        assert_eq!(result.symbol, Some(Symbol::Dot));
        assert_eq!(rec.starts, 1);
        assert_eq!(rec.inputs, vec![Symbol::Dot]);
        assert!(rec.invalid.is_empty());
    }

    #[test]
    fn test_long_press_is_dash() {
        let mut paddle = enabled_paddle();
        let mut rec = Recorder::default();
        let t0 = Instant::now();
        paddle.press_start_at(InputSource::Keyboard, t0, &mut rec);
        paddle.press_end_at(InputSource::Keyboard, t0 + ms(250), &mut rec);
        assert_eq!(rec.inputs, vec![Symbol::Dash]);
    }

    #[test]
    fn test_overlong_press_reports_invalid_timing() {
        let mut paddle = enabled_paddle();
        let mut rec = Recorder::default();
        let t0 = Instant::now();
        paddle.press_start_at(InputSource::Keyboard, t0, &mut rec);
        paddle.press_end_at(InputSource::Keyboard, t0 + ms(500), &mut rec);
        assert!(rec.inputs.is_empty());
        assert_eq!(rec.invalid.len(), 1);
        assert!((rec.invalid[0] - 500.0).abs() < 0.5);
        assert_eq!(rec.ends.len(), 1);
        assert_eq!(rec.ends[0].1, None);
    }

    #[test]
    fn test_disabled_paddle_ignores_presses() {
        let mut paddle = Paddle::from_wpm(12.0);
        let mut rec = Recorder::default();
        let t0 = Instant::now();
        assert!(!paddle.press_start_at(InputSource::Keyboard, t0, &mut rec));
        assert!(
            paddle
                .press_end_at(InputSource::Keyboard, t0 + ms(50), &mut rec)
                .is_none()
        );
        assert_eq!(rec.starts, 0);
    }

    #[test]
    fn test_disable_mid_press_discards_press() {
        let mut paddle = enabled_paddle();
        let mut rec = Recorder::default();
        let t0 = Instant::now();
        paddle.press_start_at(InputSource::Keyboard, t0, &mut rec);
        paddle.disable();
        assert!(!paddle.is_pressed());
        assert!(paddle.frame(t0 + ms(10)).is_none());

        paddle.enable();
        assert!(
            paddle
                .press_end_at(InputSource::Keyboard, t0 + ms(50), &mut rec)
                .is_none()
        );
        assert!(rec.ends.is_empty());
        assert!(rec.inputs.is_empty());
        assert!(rec.invalid.is_empty());
    }

    #[test]
    fn test_enable_disable_are_idempotent() {
        let mut paddle = Paddle::from_wpm(12.0);
        paddle.enable();
        paddle.enable();
        assert!(paddle.is_enabled());
        paddle.disable();
        paddle.disable();
        assert!(!paddle.is_enabled());
        assert!(!paddle.is_pressed());
    }

    #[test]
    fn test_key_repeat_does_not_restart_press() {
        let mut paddle = enabled_paddle();
        let mut rec = Recorder::default();
        let t0 = Instant::now();
        paddle.press_start_at(InputSource::Keyboard, t0, &mut rec);
        assert!(!paddle.press_start_at(InputSource::Keyboard, t0 + ms(200), &mut rec));
        paddle.press_end_at(InputSource::Keyboard, t0 + ms(250), &mut rec);
        assert_eq!(rec.starts, 1);
        assert_eq!(rec.inputs, vec![Symbol::Dash]);
    }

    #[test]
    fn test_synthesized_mouse_after_touch_is_ignored() {
        let mut paddle = enabled_paddle();
        let mut rec = Recorder::default();
        let t0 = Instant::now();
        paddle.press_start_at(InputSource::Touch, t0, &mut rec);
        paddle.press_end_at(InputSource::Touch, t0 + ms(40), &mut rec);
        assert!(!paddle.press_start_at(InputSource::Mouse, t0 + ms(60), &mut rec));
        assert!(
            paddle
                .press_end_at(InputSource::Mouse, t0 + ms(70), &mut rec)
                .is_none()
        );
        assert_eq!(rec.inputs, vec![Symbol::Dot]);

        // Lock expired: the mouse is accepted again.
        assert!(paddle.press_start_at(InputSource::Mouse, t0 + ms(300), &mut rec));
    }

    #[test]
    fn test_release_from_other_source_is_ignored() {
        let mut paddle = enabled_paddle();
        let mut rec = Recorder::default();
        let t0 = Instant::now();
        paddle.press_start_at(InputSource::Keyboard, t0, &mut rec);
        assert!(
            paddle
                .press_end_at(InputSource::Mouse, t0 + ms(500), &mut rec)
                .is_none()
        );
        assert!(paddle.is_pressed());
    }

    #[test]
    fn test_configure_affects_following_presses() {
        let mut paddle = enabled_paddle();
        let mut rec = Recorder::default();
        let t0 = Instant::now();
        paddle.configure(TimingConfig {
            dot_threshold_ms: 300.0,
            dash_threshold_ms: 900.0,
            tolerance_ms: 50.0,
        });
        paddle.press_start_at(InputSource::Keyboard, t0, &mut rec);
        paddle.press_end_at(InputSource::Keyboard, t0 + ms(250), &mut rec);
        assert_eq!(rec.inputs, vec![Symbol::Dot]);
    }

    #[test]
    fn test_timing_bar_zones_and_linger() {
        let mut paddle = enabled_paddle();
        let mut rec = Recorder::default();
        let t0 = Instant::now();
        assert!(paddle.frame(t0).is_none());

        paddle.press_start_at(InputSource::Keyboard, t0, &mut rec);
        assert_eq!(paddle.frame(t0 + ms(100)).unwrap().zone, TimingZone::Dot);
        assert_eq!(paddle.frame(t0 + ms(200)).unwrap().zone, TimingZone::Dash);
        let late = paddle.frame(t0 + ms(450)).unwrap();
        assert_eq!(late.zone, TimingZone::Invalid);
        assert_eq!(late.progress, 1.0);

        let release = t0 + ms(200);
        paddle.press_end_at(InputSource::Keyboard, release, &mut rec);
        let bar = paddle.frame(release + ms(100)).unwrap();
        assert!((bar.progress - 0.5).abs() < 0.01);
        assert!(paddle.frame(release + RESULT_LINGER).is_none());
        assert!(paddle.frame(release + ms(10)).is_none());
    }

    #[test]
    fn test_cancel_animation_is_idempotent() {
        let mut paddle = enabled_paddle();
        let mut rec = Recorder::default();
        let t0 = Instant::now();
        paddle.press_start_at(InputSource::Keyboard, t0, &mut rec);
        paddle.press_end_at(InputSource::Keyboard, t0 + ms(50), &mut rec);
        paddle.cancel_animation();
        paddle.cancel_animation();
        assert!(paddle.frame(t0 + ms(60)).is_none());
    }
}

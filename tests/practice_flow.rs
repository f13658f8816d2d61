use std::time::{Duration, Instant};

use rand::SeedableRng;
use rand::rngs::SmallRng;

use ditdah::config::Config;
use ditdah::engine::{PracticeMode, Statistics};
use ditdah::morse::{Symbol, code};
use ditdah::paddle::{InputSource, Paddle, PaddleError, PaddleRegistry};
use ditdah::session::{KeyingInput, Practice, RoundOutcome};
use ditdah::store::MemoryStore;

fn stats(config: &Config) -> Statistics<MemoryStore> {
    Statistics::load(MemoryStore::new(), config.stats_options())
}

/// Holds the paddle for `held_ms` starting at `at_ms` after `t0`.
fn key_press(
    paddle: &mut Paddle,
    practice: &mut Practice,
    stats: &mut Statistics<MemoryStore>,
    t0: Instant,
    at_ms: u64,
    held_ms: u64,
) -> Option<RoundOutcome> {
    let mut input = KeyingInput::new(practice, stats);
    let down = t0 + Duration::from_millis(at_ms);
    paddle.press_start_at(InputSource::Keyboard, down, &mut input);
    paddle.press_end_at(
        InputSource::Keyboard,
        down + Duration::from_millis(held_ms),
        &mut input,
    );
    input.outcome
}

#[test]
fn test_keyed_character_with_config_timing() {
    let config = Config::default();
    let mut stats = stats(&config);
    let mut practice = Practice::new(PracticeMode::CharToMorse, false, SmallRng::seed_from_u64(1));

    let mut registry = PaddleRegistry::new();
    let paddle = registry.activate(Paddle::new(config.timing())).unwrap();

    // 12 WPM: dot up to 160ms, dash 80-400ms.
    let target = practice.target;
    let t0 = Instant::now();
    let mut t = 0;
    let mut last = None;
    for symbol in code::code_for(target).unwrap().chars().filter_map(Symbol::from_char) {
        let held = match symbol {
            Symbol::Dot => 60,
            Symbol::Dash => 300,
        };
        last = key_press(paddle, &mut practice, &mut stats, t0, t, held);
        t += held + 200;
    }
    assert_eq!(last, Some(RoundOutcome::Correct));
    assert_eq!(
        stats.get_character_stats(PracticeMode::CharToMorse, &target.to_string()).correct,
        1
    );
}

#[test]
fn test_registry_enforces_single_paddle() {
    let mut registry = PaddleRegistry::new();
    registry.activate(Paddle::from_wpm(12.0)).unwrap();
    assert!(matches!(
        registry.activate(Paddle::from_wpm(20.0)),
        Err(PaddleError::AlreadyActive)
    ));
    let retired = registry.retire().unwrap();
    assert!(!retired.is_enabled());
    assert!(registry.activate(Paddle::from_wpm(20.0)).is_ok());
}

#[test]
fn test_toast_after_configured_question_count() {
    let config = Config {
        toast_question_count: 5,
        ..Config::default()
    };
    let mut stats = stats(&config);
    let mut practice = Practice::new(PracticeMode::MorseToChar, true, SmallRng::seed_from_u64(9));

    let mut toasts = Vec::new();
    for i in 0..10 {
        let answer = if i % 5 == 0 { '#' } else { practice.target };
        if practice.guess(answer, &mut stats) == RoundOutcome::Wrong {
            practice.skip(&mut stats);
        }
        practice.next_question();
        if let Some(toast) = stats.toast_for(PracticeMode::MorseToChar, config.toast_question_count) {
            toasts.push(toast);
        }
    }

    // Questions 0 and 5 cost two attempts each (wrong guess + skip).
    assert_eq!(stats.get_question_count(), 12);
    assert!(!toasts.is_empty());
    for toast in &toasts {
        assert!(toast.message.starts_with("Accuracy over last 5 questions: "));
    }
}

#[test]
fn test_session_summary_after_sitting() {
    let config = Config::default();
    let mut stats = stats(&config);
    let mut practice = Practice::new(PracticeMode::SoundToChar, true, SmallRng::seed_from_u64(3));

    for _ in 0..4 {
        let target = practice.target;
        assert_eq!(practice.guess(target, &mut stats), RoundOutcome::Correct);
        practice.next_question();
    }
    assert!(practice.tracker.complete().is_none());

    practice.skip(&mut stats);
    let summary = practice.tracker.complete().unwrap();
    assert_eq!(summary.total, 5);
    assert_eq!(summary.correct, 4);
    assert_eq!(summary.accuracy, 80.0);
    assert_eq!(stats.get_recent_accuracy(PracticeMode::SoundToChar, 5), Some(80));
}

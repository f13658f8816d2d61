use std::time::{Duration, Instant};

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use ditdah::config::{Config, MAX_MORSE_SPEED, MIN_MORSE_SPEED};
use ditdah::engine::summary::Toast;
use ditdah::engine::{PracticeMode, Statistics};
use ditdah::morse::Symbol;
use ditdah::morse::code::CharClass;
use ditdah::morse::keying::{self, Keying};
use ditdah::paddle::{InputSource, Paddle, PaddleRegistry, TimingBar};
use ditdah::session::{
    FlashDeck, KeyingInput, Practice, RoundOutcome, SessionSummary,
};
use ditdah::store::KeyValueStore;

use crate::ui::components::menu::{Menu, MenuAction};
use crate::ui::components::reference_chart;
use crate::ui::theme::Theme;

/// How long "Correct!" shows before the next question.
const ADVANCE_DELAY: Duration = Duration::from_millis(600);
/// How long a skipped answer stays revealed.
const REVEAL_DELAY: Duration = Duration::from_millis(1500);
const WRONG_DELAY: Duration = Duration::from_millis(800);
const TOAST_DURATION: Duration = Duration::from_secs(3);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AppScreen {
    Menu,
    Practice,
    Study,
    FlashCards,
    Reference,
    Statistics,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeedbackTone {
    Positive,
    Negative,
    Neutral,
}

#[derive(Clone, Debug)]
pub struct Feedback {
    pub message: String,
    pub tone: FeedbackTone,
    pub until: Instant,
    /// Move to a new question once the message expires.
    pub advance: bool,
}

/// A code being "sounded" as a blinking lamp.
pub struct Playback {
    schedule: Vec<Keying>,
    started_at: Instant,
}

impl Playback {
    fn new(code: &str, wpm: u32, now: Instant) -> Self {
        Self {
            schedule: keying::keying_schedule(code, wpm),
            started_at: now,
        }
    }

    fn elapsed_ms(&self, now: Instant) -> f64 {
        now.saturating_duration_since(self.started_at).as_secs_f64() * 1000.0
    }

    pub fn lamp_at(&self, now: Instant) -> bool {
        keying::key_down_at(&self.schedule, self.elapsed_ms(now))
    }

    pub fn finished_at(&self, now: Instant) -> bool {
        self.elapsed_ms(now) >= keying::total_duration_ms(&self.schedule)
    }
}

pub struct App {
    pub screen: AppScreen,
    pub menu: Menu<'static>,
    pub study_menu: Menu<'static>,
    pub theme: &'static Theme,
    pub config: Config,
    pub stats: Statistics<Box<dyn KeyValueStore>>,
    pub paddles: PaddleRegistry,
    pub practice: Option<Practice>,
    pub feedback: Option<Feedback>,
    pub toast: Option<(Toast, Instant)>,
    pub timing_bar: Option<TimingBar>,
    pub playback: Option<Playback>,
    pub lamp_on: bool,
    pub deck: Option<FlashDeck>,
    pub deck_error: Option<String>,
    pub reference_class: CharClass,
    pub stats_mode: PracticeMode,
    pub confirm_clear: bool,
    pub last_session: Option<SessionSummary>,
    /// Without key release events the spacebar cannot be timed.
    pub keyboard_enhanced: bool,
    pub should_quit: bool,
    rng: SmallRng,
}

impl App {
    pub fn new(
        config: Config,
        stats: Statistics<Box<dyn KeyValueStore>>,
        theme: &'static Theme,
    ) -> Self {
        let mut app = Self {
            screen: AppScreen::Menu,
            menu: Menu::new(theme),
            study_menu: Menu::study(theme),
            theme,
            config,
            stats,
            paddles: PaddleRegistry::new(),
            practice: None,
            feedback: None,
            toast: None,
            timing_bar: None,
            playback: None,
            lamp_on: false,
            deck: None,
            deck_error: None,
            reference_class: CharClass::Alphabet,
            stats_mode: PracticeMode::CharToMorse,
            confirm_clear: false,
            last_session: None,
            keyboard_enhanced: false,
            should_quit: false,
            rng: SmallRng::from_entropy(),
        };
        app.refresh_menu_subtitle();
        app
    }

    fn refresh_menu_subtitle(&mut self) {
        let mut subtitle = self.stats.get_stats_summary().headline();
        if let Some(session) = &self.last_session {
            subtitle.push_str(&format!(
                "  |  last session: {}/{} ({:.1}%)",
                session.correct, session.total, session.accuracy
            ));
        }
        self.menu.subtitle = subtitle;
    }

    fn save_config(&self) {
        if let Err(e) = self.config.save() {
            log::warn!("failed to save config: {e:#}");
        }
    }

    pub fn activate_menu(&mut self, action: MenuAction) {
        match action {
            MenuAction::Practice(mode) => self.start_practice(mode),
            MenuAction::Study => self.screen = AppScreen::Study,
            MenuAction::FlashCards => self.start_flash_cards(),
            MenuAction::Reference => self.screen = AppScreen::Reference,
            MenuAction::Statistics => {
                self.confirm_clear = false;
                self.screen = AppScreen::Statistics;
            }
        }
    }

    pub fn go_to_menu(&mut self) {
        self.leave_practice();
        self.deck = None;
        self.confirm_clear = false;
        self.refresh_menu_subtitle();
        self.screen = AppScreen::Menu;
    }

    /// Back to the study menu from flash cards or the reference charts.
    pub fn go_to_study(&mut self) {
        self.deck = None;
        self.screen = AppScreen::Study;
    }

    // --- practice ---

    pub fn start_practice(&mut self, mode: PracticeMode) {
        self.leave_practice();

        if mode == PracticeMode::CharToMorse {
            if let Err(e) = self.paddles.activate(Paddle::new(self.config.timing())) {
                log::warn!("paddle not activated: {e}");
            }
        }

        let rng = SmallRng::seed_from_u64(self.rng.r#gen());
        self.practice = Some(Practice::new(mode, self.config.include_punctuation, rng));
        log::info!("started {mode} practice");
        self.screen = AppScreen::Practice;
        self.start_playback(Instant::now());
    }

    /// Retires the paddle and reports the sitting if it was long enough.
    fn leave_practice(&mut self) {
        self.paddles.retire();
        self.timing_bar = None;
        self.playback = None;
        self.lamp_on = false;
        self.feedback = None;
        if let Some(practice) = self.practice.take() {
            if let Some(summary) = practice.tracker.complete() {
                log::info!(
                    "{} session: {}/{} correct ({:.1}%) in {}s",
                    summary.mode,
                    summary.correct,
                    summary.total,
                    summary.accuracy,
                    summary.elapsed.as_secs()
                );
                self.last_session = Some(summary);
            }
        }
    }

    fn start_playback(&mut self, now: Instant) {
        let Some(practice) = self.practice.as_ref() else {
            return;
        };
        if practice.mode != PracticeMode::SoundToChar {
            return;
        }
        self.playback = Some(Playback::new(practice.code(), self.config.morse_speed, now));
    }

    pub fn replay(&mut self) {
        self.start_playback(Instant::now());
    }

    pub fn paddle_down(&mut self, source: InputSource) {
        let (Some(paddle), Some(practice)) = (self.paddles.active_mut(), self.practice.as_mut())
        else {
            return;
        };
        let mut input = KeyingInput::new(practice, &mut self.stats);
        paddle.press_start_at(source, Instant::now(), &mut input);
    }

    pub fn paddle_up(&mut self, source: InputSource) {
        let now = Instant::now();
        let (Some(paddle), Some(practice)) = (self.paddles.active_mut(), self.practice.as_mut())
        else {
            return;
        };
        let mut input = KeyingInput::new(practice, &mut self.stats);
        if paddle.press_end_at(source, now, &mut input).is_none() {
            return;
        }
        let outcome = input.outcome;
        let invalid = input.invalid_duration_ms;

        if let Some(outcome) = outcome {
            self.handle_outcome(outcome, now);
        } else if let Some(ms) = invalid {
            self.feedback = Some(Feedback {
                message: format!("{ms:.0}ms is neither a dot nor a dash"),
                tone: FeedbackTone::Neutral,
                until: now + WRONG_DELAY,
                advance: false,
            });
        }
    }

    /// `.`/`-` keys: untimed dot and dash buttons.
    pub fn key_symbol(&mut self, symbol: Symbol) {
        let Some(practice) = self.practice.as_mut() else {
            return;
        };
        let outcome = practice.key_symbol(symbol, &mut self.stats);
        self.handle_outcome(outcome, Instant::now());
    }

    pub fn guess(&mut self, ch: char) {
        let Some(practice) = self.practice.as_mut() else {
            return;
        };
        let outcome = practice.guess(ch, &mut self.stats);
        self.handle_outcome(outcome, Instant::now());
    }

    pub fn skip(&mut self) {
        let now = Instant::now();
        let Some(practice) = self.practice.as_mut() else {
            return;
        };
        let Some(answer) = practice.skip(&mut self.stats) else {
            return;
        };
        let code = practice.code();
        self.feedback = Some(Feedback {
            message: format!("Answer: {answer}  {}", ditdah::morse::code::display_code(code)),
            tone: FeedbackTone::Neutral,
            until: now + REVEAL_DELAY,
            advance: true,
        });
        self.maybe_toast(now);
    }

    fn handle_outcome(&mut self, outcome: RoundOutcome, now: Instant) {
        let feedback = match outcome {
            RoundOutcome::Pending | RoundOutcome::Ignored => return,
            RoundOutcome::Correct => Feedback {
                message: "Correct!".to_string(),
                tone: FeedbackTone::Positive,
                until: now + ADVANCE_DELAY,
                advance: true,
            },
            RoundOutcome::Wrong => Feedback {
                message: "Try again".to_string(),
                tone: FeedbackTone::Negative,
                until: now + WRONG_DELAY,
                advance: false,
            },
        };
        self.feedback = Some(feedback);
        self.maybe_toast(now);
    }

    fn maybe_toast(&mut self, now: Instant) {
        if !self.config.show_toast {
            return;
        }
        let Some(mode) = self.practice.as_ref().map(|p| p.mode) else {
            return;
        };
        if let Some(toast) = self.stats.toast_for(mode, self.config.toast_question_count) {
            log::debug!("toast: {}", toast.message);
            self.toast = Some((toast, now + TOAST_DURATION));
        }
    }

    pub fn toggle_punctuation(&mut self) {
        self.config.include_punctuation = !self.config.include_punctuation;
        if let Some(practice) = self.practice.as_mut() {
            practice.set_include_punctuation(self.config.include_punctuation);
        }
        self.feedback = None;
        self.save_config();
        self.start_playback(Instant::now());
    }

    pub fn adjust_speed(&mut self, delta: i32) {
        let speed = (self.config.morse_speed as i32 + delta)
            .clamp(MIN_MORSE_SPEED as i32, MAX_MORSE_SPEED as i32) as u32;
        if speed == self.config.morse_speed {
            return;
        }
        self.config.morse_speed = speed;
        let timing = self.config.timing();
        if let Some(paddle) = self.paddles.active_mut() {
            paddle.configure(timing);
        }
        log::info!("speed set to {speed} WPM");
        self.save_config();
    }

    // --- flash cards ---

    pub fn start_flash_cards(&mut self) {
        self.rebuild_deck();
        self.screen = AppScreen::FlashCards;
    }

    pub fn rebuild_deck(&mut self) {
        match FlashDeck::new(
            &self.config.flash_card_classes(),
            self.config.flash_card_mode,
            &mut self.rng,
        ) {
            Ok(deck) => {
                self.deck = Some(deck);
                self.deck_error = None;
            }
            Err(e) => {
                self.deck = None;
                self.deck_error = Some(e.to_string());
            }
        }
    }

    pub fn toggle_flash_mode(&mut self) {
        self.config.flash_card_mode = self.config.flash_card_mode.toggle();
        if let Some(deck) = self.deck.as_mut() {
            deck.mode = self.config.flash_card_mode;
        }
        self.save_config();
    }

    pub fn toggle_flash_class(&mut self, key: char) {
        match key {
            'a' => self.config.flash_card_include_alphabet = !self.config.flash_card_include_alphabet,
            'd' => self.config.flash_card_include_digits = !self.config.flash_card_include_digits,
            'p' => {
                self.config.flash_card_include_punctuation =
                    !self.config.flash_card_include_punctuation
            }
            _ => return,
        }
        self.save_config();
        self.rebuild_deck();
    }

    // --- reference charts ---

    pub fn next_reference_class(&mut self) {
        self.reference_class = reference_chart::next_class(self.reference_class);
    }

    pub fn select_reference_class(&mut self, index: usize) {
        if let Some(class) = CharClass::ALL.get(index) {
            self.reference_class = *class;
        }
    }

    // --- statistics ---

    pub fn next_stats_mode(&mut self) {
        let i = PracticeMode::ALL
            .iter()
            .position(|m| *m == self.stats_mode)
            .unwrap_or(0);
        self.stats_mode = PracticeMode::ALL[(i + 1) % PracticeMode::ALL.len()];
    }

    pub fn clear_stats(&mut self) {
        self.stats.clear_all_stats();
        self.confirm_clear = false;
        log::info!("all statistics cleared");
    }

    // --- animation ---

    /// Advances timers; called once per event loop iteration before drawing.
    pub fn tick(&mut self, now: Instant) {
        self.timing_bar = self.paddles.active_mut().and_then(|p| p.frame(now));

        if let Some(playback) = &self.playback {
            self.lamp_on = playback.lamp_at(now);
            if playback.finished_at(now) {
                self.playback = None;
                self.lamp_on = false;
            }
        }

        if self.toast.as_ref().is_some_and(|(_, until)| *until <= now) {
            self.toast = None;
        }

        if let Some(feedback) = &self.feedback {
            if feedback.until <= now {
                let advance = feedback.advance;
                self.feedback = None;
                if advance {
                    if let Some(practice) = self.practice.as_mut() {
                        practice.next_question();
                    }
                    self.start_playback(now);
                }
            }
        }
    }

    pub fn shutdown(&mut self) {
        self.leave_practice();
        if let Err(e) = self.stats.flush() {
            log::error!("final statistics save failed: {e}");
        }
    }
}

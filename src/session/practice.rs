use rand::rngs::SmallRng;

use crate::engine::{PracticeMode, Statistics};
use crate::morse::code::{self, MatchState, Symbol};
use crate::paddle::PaddleListener;
use crate::session::tracker::SessionTracker;
use crate::store::KeyValueStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundOutcome {
    /// Keyed symbols so far are a prefix of the answer.
    Pending,
    Correct,
    Wrong,
    /// The question was already answered; input is held until the next one.
    Ignored,
}

/// One practice sitting: the current question, what has been keyed for it,
/// and the tally. Every resolved guess is recorded in the statistics.
pub struct Practice {
    pub mode: PracticeMode,
    pub target: char,
    pub entered: Vec<Symbol>,
    pub tracker: SessionTracker,
    include_punctuation: bool,
    resolved: bool,
    rng: SmallRng,
}

impl Practice {
    pub fn new(mode: PracticeMode, include_punctuation: bool, mut rng: SmallRng) -> Self {
        let target = code::random_character(include_punctuation, &mut rng);
        Self {
            mode,
            target,
            entered: Vec::new(),
            tracker: SessionTracker::new(mode),
            include_punctuation,
            resolved: false,
            rng,
        }
    }

    pub fn code(&self) -> &'static str {
        code::code_for(self.target).unwrap_or("")
    }

    pub fn include_punctuation(&self) -> bool {
        self.include_punctuation
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }

    pub fn next_question(&mut self) {
        self.target = code::random_character(self.include_punctuation, &mut self.rng);
        self.entered.clear();
        self.resolved = false;
    }

    /// Changing the pool abandons the current question without scoring it.
    pub fn set_include_punctuation(&mut self, include: bool) {
        self.include_punctuation = include;
        self.next_question();
    }

    /// Character → Morse: add one keyed symbol. A wrong prefix scores a miss
    /// and clears the entry so the same character can be retried.
    pub fn key_symbol<S: KeyValueStore>(
        &mut self,
        symbol: Symbol,
        stats: &mut Statistics<S>,
    ) -> RoundOutcome {
        if self.resolved {
            return RoundOutcome::Ignored;
        }
        self.entered.push(symbol);
        match code::match_input(self.code(), &self.entered) {
            MatchState::Partial => RoundOutcome::Pending,
            MatchState::Complete => {
                self.resolve(true, stats);
                self.resolved = true;
                RoundOutcome::Correct
            }
            MatchState::Wrong => {
                self.resolve(false, stats);
                self.entered.clear();
                RoundOutcome::Wrong
            }
        }
    }

    /// Morse/Sound → Character: a wrong guess scores a miss and keeps the
    /// same question.
    pub fn guess<S: KeyValueStore>(&mut self, ch: char, stats: &mut Statistics<S>) -> RoundOutcome {
        if self.resolved {
            return RoundOutcome::Ignored;
        }
        let is_correct = ch.eq_ignore_ascii_case(&self.target);
        self.resolve(is_correct, stats);
        if is_correct {
            self.resolved = true;
            RoundOutcome::Correct
        } else {
            RoundOutcome::Wrong
        }
    }

    /// Gives up on the question: scores a miss and returns the answer to reveal.
    pub fn skip<S: KeyValueStore>(&mut self, stats: &mut Statistics<S>) -> Option<char> {
        if self.resolved {
            return None;
        }
        self.resolve(false, stats);
        self.resolved = true;
        Some(self.target)
    }

    fn resolve<S: KeyValueStore>(&mut self, is_correct: bool, stats: &mut Statistics<S>) {
        stats.record_attempt(self.mode, &self.target.to_string(), is_correct);
        self.tracker.record(is_correct);
    }
}

/// Routes paddle symbols into a practice question.
pub struct KeyingInput<'a, S: KeyValueStore> {
    practice: &'a mut Practice,
    stats: &'a mut Statistics<S>,
    pub outcome: Option<RoundOutcome>,
    pub invalid_duration_ms: Option<f64>,
}

impl<'a, S: KeyValueStore> KeyingInput<'a, S> {
    pub fn new(practice: &'a mut Practice, stats: &'a mut Statistics<S>) -> Self {
        Self {
            practice,
            stats,
            outcome: None,
            invalid_duration_ms: None,
        }
    }
}

impl<S: KeyValueStore> PaddleListener for KeyingInput<'_, S> {
    fn on_input(&mut self, symbol: Symbol) {
        self.outcome = Some(self.practice.key_symbol(symbol, self.stats));
    }

    fn on_invalid_timing(&mut self, duration_ms: f64) {
        log::debug!("press of {duration_ms:.0}ms is neither dot nor dash");
        self.invalid_duration_ms = Some(duration_ms);
    }
}

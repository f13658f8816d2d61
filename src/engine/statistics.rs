use chrono::{DateTime, FixedOffset, Months, Utc};

use crate::engine::char_stats::{CharacterStat, CharacterTable, percent, table_totals};
use crate::engine::history::{self, Attempt, DailyAccuracy};
use crate::engine::mode::PracticeMode;
use crate::engine::summary::{self, ModeSummary, StatsSummary, Toast};
use crate::store::schema::{StatsDocument, is_legacy_stats_key, stats_key};
use crate::store::{KeyValueStore, StoreError};

pub const DEFAULT_RETENTION_MONTHS: u32 = 3;
pub const DEFAULT_RECENT_ATTEMPT_LIMIT: usize = 1000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatsOptions {
    /// Attempts older than this are dropped on load.
    pub retention_months: u32,
    /// Per-mode cap on the recent-history log.
    pub recent_attempt_limit: usize,
}

impl Default for StatsOptions {
    fn default() -> Self {
        Self {
            retention_months: DEFAULT_RETENTION_MONTHS,
            recent_attempt_limit: DEFAULT_RECENT_ATTEMPT_LIMIT,
        }
    }
}

/// Single source of truth for practice history. Every recorded attempt is
/// written through to the backing store; a failed write is logged and the
/// in-memory state stays authoritative for the rest of the session.
pub struct Statistics<S: KeyValueStore> {
    store: S,
    data: StatsDocument,
    options: StatsOptions,
}

impl<S: KeyValueStore> Statistics<S> {
    pub fn load(store: S, options: StatsOptions) -> Self {
        Self::load_at(store, options, Utc::now())
    }

    /// Loads relative to `now` for retention pruning. Never fails: unreadable
    /// or malformed data starts an empty history.
    pub fn load_at(mut store: S, options: StatsOptions, now: DateTime<Utc>) -> Self {
        discard_legacy_keys(&mut store);

        let mut data = match store.get(&stats_key()) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                log::warn!("statistics document is malformed, starting fresh: {e}");
                StatsDocument::default()
            }),
            Ok(None) => StatsDocument::default(),
            Err(e) => {
                log::warn!("failed to read statistics, starting fresh: {e}");
                StatsDocument::default()
            }
        };

        let limit = options.recent_attempt_limit.max(1);
        let cutoff = now.checked_sub_months(Months::new(options.retention_months));
        for mode in PracticeMode::ALL {
            let log = data.recent_attempts.get_mut(mode);
            if let Some(cutoff) = cutoff {
                let pruned = history::prune_before(log, cutoff);
                if pruned > 0 {
                    log::debug!("pruned {pruned} expired {mode} attempts");
                }
            }
            history::truncate_front(log, limit);
        }

        Self {
            store,
            data,
            options: StatsOptions {
                recent_attempt_limit: limit,
                ..options
            },
        }
    }

    pub fn options(&self) -> StatsOptions {
        self.options
    }

    pub fn document(&self) -> &StatsDocument {
        &self.data
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    pub fn record_attempt(&mut self, mode: PracticeMode, character: &str, is_correct: bool) {
        self.record_attempt_at(mode, character, is_correct, Utc::now().fixed_offset());
    }

    pub fn record_attempt_at(
        &mut self,
        mode: PracticeMode,
        character: &str,
        is_correct: bool,
        timestamp: DateTime<FixedOffset>,
    ) {
        self.data
            .characters
            .get_mut(mode)
            .entry(character.to_string())
            .or_default()
            .record(is_correct);

        history::push_capped(
            self.data.recent_attempts.get_mut(mode),
            Attempt {
                is_correct,
                timestamp,
                character: character.to_string(),
            },
            self.options.recent_attempt_limit,
        );

        self.data.question_counter += 1;
        self.persist();
    }

    /// Serializes the whole document to the backing store.
    pub fn flush(&mut self) -> Result<(), StoreError> {
        let json = serde_json::to_string(&self.data)?;
        self.store.set(&stats_key(), &json)
    }

    fn persist(&mut self) {
        if let Err(e) = self.flush() {
            log::error!("failed to save statistics: {e}");
        }
    }

    /// Zero-valued when nothing has been recorded for the pair.
    pub fn get_character_stats(&self, mode: PracticeMode, character: &str) -> CharacterStat {
        self.data
            .characters
            .get(mode)
            .get(character)
            .copied()
            .unwrap_or_default()
    }

    pub fn get_mode_stats(&self, mode: PracticeMode) -> &CharacterTable {
        self.data.characters.get(mode)
    }

    pub fn recent_attempts(&self, mode: PracticeMode) -> &[Attempt] {
        self.data.recent_attempts.get(mode)
    }

    /// Across all modes and characters; 0 when nothing has been recorded.
    pub fn get_overall_accuracy(&self) -> u32 {
        let totals = self.overall_totals();
        percent(totals.correct, totals.attempts).unwrap_or(0)
    }

    fn overall_totals(&self) -> CharacterStat {
        let mut totals = CharacterStat::default();
        for (_, table) in self.data.characters.iter() {
            totals.merge(&table_totals(table));
        }
        totals
    }

    /// `None` when the mode has no attempts in its recent log.
    pub fn get_recent_accuracy(&self, mode: PracticeMode, count: usize) -> Option<u32> {
        history::recent_accuracy(self.data.recent_attempts.get(mode), count)
    }

    pub fn get_attempts_grouped_by_date(&self, mode: PracticeMode) -> Vec<DailyAccuracy> {
        history::group_by_date(self.data.recent_attempts.get(mode))
    }

    pub fn get_question_count(&self) -> u64 {
        self.data.question_counter
    }

    /// Irreversibly empties every table and log, then persists.
    pub fn clear_all_stats(&mut self) {
        self.data = StatsDocument::default();
        self.persist();
    }

    pub fn get_stats_summary(&self) -> StatsSummary {
        let totals = self.overall_totals();
        summary::stats_summary(totals)
    }

    pub fn mode_summary(&self, mode: PracticeMode) -> ModeSummary {
        summary::mode_summary(
            self.get_mode_stats(mode),
            &self.get_attempts_grouped_by_date(mode),
        )
    }

    /// Toast for the question just recorded, if the cadence calls for one.
    pub fn toast_for(&self, mode: PracticeMode, cadence: u32) -> Option<Toast> {
        if !summary::toast_due(self.get_question_count(), cadence) {
            return None;
        }
        let accuracy = self.get_recent_accuracy(mode, cadence as usize)?;
        Some(summary::toast(cadence, accuracy))
    }
}

fn discard_legacy_keys<S: KeyValueStore>(store: &mut S) {
    let keys = match store.keys() {
        Ok(keys) => keys,
        Err(e) => {
            log::warn!("failed to list stored keys for migration: {e}");
            return;
        }
    };
    for key in keys.iter().filter(|k| is_legacy_stats_key(k)) {
        match store.remove(key) {
            Ok(()) => log::info!("discarded statistics stored under old key {key}"),
            Err(e) => log::warn!("failed to remove old statistics key {key}: {e}"),
        }
    }
}

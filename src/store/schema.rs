use serde::{Deserialize, Serialize};

use crate::engine::char_stats::CharacterTable;
use crate::engine::history::Attempt;
use crate::engine::mode::PerMode;

/// The schema version lives in the storage key name, not in the document.
pub const STATS_KEY_PREFIX: &str = "morse_trainer_stats";
pub const SCHEMA_VERSION: u32 = 3;

pub fn stats_key() -> String {
    format!("{STATS_KEY_PREFIX}_v{SCHEMA_VERSION}")
}

/// Keys written by earlier schema versions. Their data is discarded, not
/// converted.
pub fn is_legacy_stats_key(key: &str) -> bool {
    key.starts_with(STATS_KEY_PREFIX) && key != stats_key()
}

/// Persisted statistics record:
/// `{ <mode>: { <char>: {attempts, correct} }, recentAttempts: { <mode>: [...] }, questionCounter }`
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsDocument {
    #[serde(flatten)]
    pub characters: PerMode<CharacterTable>,
    #[serde(rename = "recentAttempts", default)]
    pub recent_attempts: PerMode<Vec<Attempt>>,
    #[serde(rename = "questionCounter", default)]
    pub question_counter: u64,
}

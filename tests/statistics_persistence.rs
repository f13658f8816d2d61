use std::fs;

use chrono::{TimeZone, Utc};
use tempfile::TempDir;

use ditdah::engine::summary::StatsSummary;
use ditdah::engine::{CharacterStat, PracticeMode, Statistics, StatsOptions};
use ditdah::store::schema::stats_key;
use ditdah::store::{JsonStore, KeyValueStore};

fn open(dir: &TempDir) -> Statistics<JsonStore> {
    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    Statistics::load(store, StatsOptions::default())
}

#[test]
fn test_stats_survive_restart() {
    let dir = TempDir::new().unwrap();
    {
        let mut stats = open(&dir);
        for i in 0..10 {
            stats.record_attempt(PracticeMode::CharToMorse, "E", i % 2 == 0);
        }
        stats.record_attempt(PracticeMode::SoundToChar, "5", true);
    }

    let stats = open(&dir);
    assert_eq!(
        stats.get_character_stats(PracticeMode::CharToMorse, "E"),
        CharacterStat { attempts: 10, correct: 5 }
    );
    assert_eq!(stats.get_recent_accuracy(PracticeMode::CharToMorse, 10), Some(50));
    assert_eq!(stats.get_recent_accuracy(PracticeMode::SoundToChar, 10), Some(100));
    assert_eq!(stats.get_question_count(), 11);
    assert_eq!(stats.get_overall_accuracy(), 55);
}

#[test]
fn test_persisted_file_layout() {
    let dir = TempDir::new().unwrap();
    let mut stats = open(&dir);
    stats.record_attempt(PracticeMode::MorseToChar, "K", true);

    let path = dir.path().join(format!("{}.json", stats_key()));
    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(json["morse-to-char"]["K"]["attempts"], 1);
    assert_eq!(json["morse-to-char"]["K"]["correct"], 1);
    assert_eq!(json["questionCounter"], 1);
    let attempt = &json["recentAttempts"]["morse-to-char"][0];
    assert_eq!(attempt["isCorrect"], true);
    assert_eq!(attempt["character"], "K");
    assert!(attempt["timestamp"].is_string());
}

#[test]
fn test_legacy_file_is_discarded() {
    let dir = TempDir::new().unwrap();
    let legacy = dir.path().join("morse_trainer_stats_v2.json");
    fs::write(&legacy, r#"{"char-to-morse": {"E": {"attempts": 9, "correct": 9}}}"#).unwrap();

    let stats = open(&dir);
    assert_eq!(stats.get_stats_summary(), StatsSummary::NoStats);
    assert!(!legacy.exists());
}

#[test]
fn test_corrupt_file_starts_fresh_and_is_replaced() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(format!("{}.json", stats_key()));
    fs::write(&path, "{ truncated").unwrap();

    let mut stats = open(&dir);
    assert_eq!(stats.get_question_count(), 0);
    stats.record_attempt(PracticeMode::CharToMorse, "A", true);

    let reopened = open(&dir);
    assert_eq!(reopened.get_question_count(), 1);
}

#[test]
fn test_retention_applies_on_reload() {
    let dir = TempDir::new().unwrap();
    {
        let mut stats = open(&dir);
        let old = Utc.with_ymd_and_hms(2026, 2, 1, 12, 0, 0).unwrap().fixed_offset();
        let fresh = Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap().fixed_offset();
        stats.record_attempt_at(PracticeMode::MorseToChar, "Q", false, old);
        stats.record_attempt_at(PracticeMode::MorseToChar, "Q", true, fresh);
    }

    let store = JsonStore::with_base_dir(dir.path().to_path_buf()).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 0, 0, 0).unwrap();
    let stats = Statistics::load_at(store, StatsOptions::default(), now);
    assert_eq!(stats.recent_attempts(PracticeMode::MorseToChar).len(), 1);
    assert_eq!(stats.get_attempts_grouped_by_date(PracticeMode::MorseToChar).len(), 1);
    assert_eq!(
        stats.get_character_stats(PracticeMode::MorseToChar, "Q"),
        CharacterStat { attempts: 2, correct: 1 }
    );
}

#[test]
fn test_clear_all_stats_persists() {
    let dir = TempDir::new().unwrap();
    {
        let mut stats = open(&dir);
        stats.record_attempt(PracticeMode::CharToMorse, "E", true);
        stats.clear_all_stats();
    }
    let stats = open(&dir);
    assert_eq!(stats.get_question_count(), 0);
    for mode in PracticeMode::ALL {
        assert!(stats.get_mode_stats(mode).is_empty());
        assert_eq!(stats.get_recent_accuracy(mode, 10), None);
    }
}

#[test]
fn test_store_keys_lists_saved_document() {
    let dir = TempDir::new().unwrap();
    let mut stats = open(&dir);
    stats.record_attempt(PracticeMode::CharToMorse, "E", true);
    assert_eq!(stats.store().keys().unwrap(), vec![stats_key()]);
}

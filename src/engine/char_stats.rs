use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Lifetime counters for one (mode, character) pair.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterStat {
    pub attempts: u64,
    pub correct: u64,
}

impl CharacterStat {
    pub fn record(&mut self, is_correct: bool) {
        self.attempts += 1;
        if is_correct {
            self.correct += 1;
        }
    }

    pub fn accuracy(&self) -> Option<u32> {
        percent(self.correct, self.attempts)
    }

    pub fn merge(&mut self, other: &CharacterStat) {
        self.attempts += other.attempts;
        self.correct += other.correct;
    }
}

/// Per-character counters for one mode, keyed by the character as shown.
pub type CharacterTable = BTreeMap<String, CharacterStat>;

pub fn table_totals(table: &CharacterTable) -> CharacterStat {
    let mut total = CharacterStat::default();
    for stat in table.values() {
        total.merge(stat);
    }
    total
}

/// Characters ordered weakest first; ties broken by attempt count, then name.
pub fn weakest_first(table: &CharacterTable) -> Vec<(&str, CharacterStat)> {
    let mut rows: Vec<(&str, CharacterStat)> =
        table.iter().map(|(ch, stat)| (ch.as_str(), *stat)).collect();
    rows.sort_by(|a, b| {
        let acc_a = a.1.accuracy().unwrap_or(0);
        let acc_b = b.1.accuracy().unwrap_or(0);
        acc_a
            .cmp(&acc_b)
            .then(b.1.attempts.cmp(&a.1.attempts))
            .then(a.0.cmp(b.0))
    });
    rows
}

/// Whole-number percentage, rounded half up. `None` when `total` is zero.
pub fn percent(correct: u64, total: u64) -> Option<u32> {
    if total == 0 {
        return None;
    }
    Some((correct as f64 / total as f64 * 100.0).round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_counts() {
        let mut stat = CharacterStat::default();
        stat.record(true);
        stat.record(false);
        stat.record(true);
        assert_eq!(stat, CharacterStat { attempts: 3, correct: 2 });
        assert_eq!(stat.accuracy(), Some(67));
    }

    #[test]
    fn test_percent_rounding() {
        assert_eq!(percent(0, 0), None);
        assert_eq!(percent(1, 2), Some(50));
        assert_eq!(percent(1, 8), Some(13));
        assert_eq!(percent(2, 3), Some(67));
        assert_eq!(percent(5, 5), Some(100));
    }

    #[test]
    fn test_table_totals() {
        let mut table = CharacterTable::new();
        table.insert("A".into(), CharacterStat { attempts: 4, correct: 3 });
        table.insert("B".into(), CharacterStat { attempts: 6, correct: 1 });
        assert_eq!(table_totals(&table), CharacterStat { attempts: 10, correct: 4 });
    }

    #[test]
    fn test_weakest_first_ordering() {
        let mut table = CharacterTable::new();
        table.insert("A".into(), CharacterStat { attempts: 4, correct: 4 });
        table.insert("B".into(), CharacterStat { attempts: 4, correct: 1 });
        table.insert("C".into(), CharacterStat { attempts: 8, correct: 2 });
        let order: Vec<&str> = weakest_first(&table).into_iter().map(|(c, _)| c).collect();
        assert_eq!(order, vec!["C", "B", "A"]);
    }
}

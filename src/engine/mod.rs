pub mod char_stats;
pub mod history;
pub mod mode;
pub mod statistics;
pub mod summary;

pub use char_stats::CharacterStat;
pub use history::{Attempt, DailyAccuracy};
pub use mode::PracticeMode;
pub use statistics::{Statistics, StatsOptions};

pub mod flash_cards;
pub mod practice;
pub mod tracker;

pub use flash_cards::{DeckError, FlashCardMode, FlashDeck};
pub use practice::{KeyingInput, Practice, RoundOutcome};
pub use tracker::{SessionSummary, SessionTracker};

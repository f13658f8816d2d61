use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::morse::code::{self, CharClass};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlashCardMode {
    /// Character on the front, code on the back.
    #[default]
    CharToMorse,
    MorseToChar,
}

impl FlashCardMode {
    pub fn toggle(self) -> Self {
        match self {
            FlashCardMode::CharToMorse => FlashCardMode::MorseToChar,
            FlashCardMode::MorseToChar => FlashCardMode::CharToMorse,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FlashCardMode::CharToMorse => "Character → Morse",
            FlashCardMode::MorseToChar => "Morse → Character",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("select at least one character type")]
    NoCharacters,
}

/// A shuffled pass over the selected characters. Cards are not scored.
#[derive(Clone, Debug)]
pub struct FlashDeck {
    pub mode: FlashCardMode,
    cards: Vec<char>,
    index: usize,
    flipped: bool,
}

impl FlashDeck {
    pub fn new<R: Rng + ?Sized>(
        classes: &[CharClass],
        mode: FlashCardMode,
        rng: &mut R,
    ) -> Result<Self, DeckError> {
        let mut cards = code::characters(classes);
        if cards.is_empty() {
            return Err(DeckError::NoCharacters);
        }
        cards.shuffle(rng);
        Ok(Self {
            mode,
            cards,
            index: 0,
            flipped: false,
        })
    }

    pub fn current(&self) -> char {
        self.cards[self.index]
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub fn front(&self) -> String {
        match self.mode {
            FlashCardMode::CharToMorse => self.current().to_string(),
            FlashCardMode::MorseToChar => self.current_code(),
        }
    }

    pub fn back(&self) -> String {
        match self.mode {
            FlashCardMode::CharToMorse => self.current_code(),
            FlashCardMode::MorseToChar => self.current().to_string(),
        }
    }

    fn current_code(&self) -> String {
        code::code_for(self.current())
            .map(code::display_code)
            .unwrap_or_default()
    }

    /// Advances to the next card face-down. Returns false at the end of the deck.
    pub fn next(&mut self) -> bool {
        if self.is_last() {
            return false;
        }
        self.index += 1;
        self.flipped = false;
        true
    }

    pub fn previous(&mut self) -> bool {
        if self.index == 0 {
            return false;
        }
        self.index -= 1;
        self.flipped = false;
        true
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.cards.len()
    }

    /// One-based position and deck size.
    pub fn position(&self) -> (usize, usize) {
        (self.index + 1, self.cards.len())
    }

    pub fn progress(&self) -> f64 {
        (self.index + 1) as f64 / self.cards.len() as f64
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(7)
    }

    #[test]
    fn test_empty_selection_is_rejected() {
        let err = FlashDeck::new(&[], FlashCardMode::CharToMorse, &mut rng()).unwrap_err();
        assert_eq!(err, DeckError::NoCharacters);
    }

    #[test]
    fn test_deck_covers_selection_once() {
        let mut deck = FlashDeck::new(&[CharClass::Digits], FlashCardMode::CharToMorse, &mut rng()).unwrap();
        assert_eq!(deck.len(), 10);
        let mut seen = vec![deck.current()];
        while deck.next() {
            seen.push(deck.current());
        }
        assert!(deck.is_last());
        seen.sort();
        assert_eq!(seen, "0123456789".chars().collect::<Vec<_>>());
    }

    #[test]
    fn test_faces_follow_mode() {
        let mut deck = FlashDeck::new(&[CharClass::Alphabet], FlashCardMode::MorseToChar, &mut rng()).unwrap();
        let ch = deck.current();
        let code = code::display_code(code::code_for(ch).unwrap());
        assert_eq!(deck.front(), code);
        assert_eq!(deck.back(), ch.to_string());

        deck.mode = deck.mode.toggle();
        assert_eq!(deck.front(), ch.to_string());
    }

    #[test]
    fn test_navigation_resets_flip() {
        let mut deck = FlashDeck::new(&[CharClass::Alphabet], FlashCardMode::CharToMorse, &mut rng()).unwrap();
        assert!(!deck.previous());
        deck.flip();
        assert!(deck.is_flipped());
        assert!(deck.next());
        assert!(!deck.is_flipped());
        assert_eq!(deck.position(), (2, 26));
        assert!((deck.progress() - 2.0 / 26.0).abs() < 1e-9);
    }
}

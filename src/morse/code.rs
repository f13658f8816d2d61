use std::fmt;

use rand::Rng;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

/// International Morse table in display order: letters, digits, punctuation.
pub const MORSE_TABLE: &[(char, &str)] = &[
    ('A', ".-"),
    ('B', "-..."),
    ('C', "-.-."),
    ('D', "-.."),
    ('E', "."),
    ('F', "..-."),
    ('G', "--."),
    ('H', "...."),
    ('I', ".."),
    ('J', ".---"),
    ('K', "-.-"),
    ('L', ".-.."),
    ('M', "--"),
    ('N', "-."),
    ('O', "---"),
    ('P', ".--."),
    ('Q', "--.-"),
    ('R', ".-."),
    ('S', "..."),
    ('T', "-"),
    ('U', "..-"),
    ('V', "...-"),
    ('W', ".--"),
    ('X', "-..-"),
    ('Y', "-.--"),
    ('Z', "--.."),
    ('1', ".----"),
    ('2', "..---"),
    ('3', "...--"),
    ('4', "....-"),
    ('5', "....."),
    ('6', "-...."),
    ('7', "--..."),
    ('8', "---.."),
    ('9', "----."),
    ('0', "-----"),
    ('.', ".-.-.-"),
    (',', "--..--"),
    ('?', "..--.."),
    ('\'', ".----."),
    ('!', "-.-.--"),
    ('/', "-..-."),
    ('(', "-.--."),
    (')', "-.--.-"),
    ('&', ".-..."),
    (':', "---..."),
    (';', "-.-.-."),
    ('=', "-...-"),
    ('+', ".-.-."),
    ('-', "-....-"),
    ('_', "..--.-"),
    ('"', ".-..-."),
    ('$', "...-..-"),
    ('@', ".--.-."),
];

/// One element of a Morse code, distinguished purely by duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Dot,
    Dash,
}

impl Symbol {
    pub fn as_char(self) -> char {
        match self {
            Symbol::Dot => '.',
            Symbol::Dash => '-',
        }
    }

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Symbol::Dot),
            '-' => Some(Symbol::Dash),
            _ => None,
        }
    }

    /// Typographic glyph used on flash cards.
    pub fn glyph(self) -> char {
        match self {
            Symbol::Dot => '•',
            Symbol::Dash => '−',
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharClass {
    Alphabet,
    Digits,
    Punctuation,
}

impl CharClass {
    pub const ALL: [CharClass; 3] = [CharClass::Alphabet, CharClass::Digits, CharClass::Punctuation];

    pub fn label(self) -> &'static str {
        match self {
            CharClass::Alphabet => "Letters",
            CharClass::Digits => "Numbers",
            CharClass::Punctuation => "Punctuation",
        }
    }

    pub fn of(ch: char) -> Self {
        if ch.is_ascii_alphabetic() {
            CharClass::Alphabet
        } else if ch.is_ascii_digit() {
            CharClass::Digits
        } else {
            CharClass::Punctuation
        }
    }
}

pub fn code_for(ch: char) -> Option<&'static str> {
    let upper = ch.to_ascii_uppercase();
    MORSE_TABLE
        .iter()
        .find(|(c, _)| *c == upper)
        .map(|(_, code)| *code)
}

pub fn char_for(code: &str) -> Option<char> {
    MORSE_TABLE
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(ch, _)| *ch)
}

/// Render a dot/dash string with flash-card glyphs.
pub fn display_code(code: &str) -> String {
    code.chars()
        .map(|ch| Symbol::from_char(ch).map(Symbol::glyph).unwrap_or(ch))
        .collect()
}

/// All table characters belonging to any of `classes`, in table order.
pub fn characters(classes: &[CharClass]) -> Vec<char> {
    MORSE_TABLE
        .iter()
        .map(|(ch, _)| *ch)
        .filter(|ch| classes.contains(&CharClass::of(*ch)))
        .collect()
}

/// Question pool for the practice modes: alphanumeric only, or the full table.
pub fn practice_characters(include_punctuation: bool) -> Vec<char> {
    if include_punctuation {
        characters(&[CharClass::Alphabet, CharClass::Digits, CharClass::Punctuation])
    } else {
        characters(&[CharClass::Alphabet, CharClass::Digits])
    }
}

pub fn random_character(include_punctuation: bool, rng: &mut SmallRng) -> char {
    let pool = practice_characters(include_punctuation);
    pool[rng.gen_range(0..pool.len())]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchState {
    /// Input equals the expected code.
    Complete,
    /// Input is a proper prefix of the expected code.
    Partial,
    Wrong,
}

pub fn match_input(expected: &str, input: &[Symbol]) -> MatchState {
    let entered: String = input.iter().map(|s| s.as_char()).collect();
    if entered == expected {
        MatchState::Complete
    } else if expected.starts_with(&entered) {
        MatchState::Partial
    } else {
        MatchState::Wrong
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;

    use super::*;

    #[test]
    fn test_table_has_all_characters() {
        assert_eq!(MORSE_TABLE.len(), 54);
        assert_eq!(characters(&[CharClass::Alphabet]).len(), 26);
        assert_eq!(characters(&[CharClass::Digits]).len(), 10);
        assert_eq!(characters(&[CharClass::Punctuation]).len(), 18);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(code_for('e'), Some("."));
        assert_eq!(code_for('E'), Some("."));
        assert_eq!(code_for('@'), Some(".--.-."));
        assert_eq!(code_for('#'), None);
    }

    #[test]
    fn test_reverse_lookup() {
        assert_eq!(char_for("-.-"), Some('K'));
        assert_eq!(char_for("-----"), Some('0'));
        assert_eq!(char_for("........"), None);
    }

    #[test]
    fn test_codes_are_unique() {
        for (i, (_, a)) in MORSE_TABLE.iter().enumerate() {
            for (_, b) in &MORSE_TABLE[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_practice_pool_without_punctuation() {
        let pool = practice_characters(false);
        assert_eq!(pool.len(), 36);
        assert!(pool.iter().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_random_character_respects_filter() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..200 {
            assert!(random_character(false, &mut rng).is_ascii_alphanumeric());
        }
    }

    #[test]
    fn test_match_input_prefix_rule() {
        use Symbol::{Dash, Dot};
        assert_eq!(match_input(".-", &[Dot]), MatchState::Partial);
        assert_eq!(match_input(".-", &[Dot, Dash]), MatchState::Complete);
        assert_eq!(match_input(".-", &[Dash]), MatchState::Wrong);
        assert_eq!(match_input(".-", &[Dot, Dash, Dot]), MatchState::Wrong);
    }

    #[test]
    fn test_display_code_uses_glyphs() {
        assert_eq!(display_code(".-"), "•−");
    }
}

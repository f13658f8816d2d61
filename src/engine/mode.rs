use std::fmt;

use serde::{Deserialize, Serialize};

/// Practice modes that produce scored attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PracticeMode {
    #[serde(rename = "char-to-morse")]
    CharToMorse,
    #[serde(rename = "morse-to-char")]
    MorseToChar,
    #[serde(rename = "sound-to-char")]
    SoundToChar,
}

impl PracticeMode {
    pub const ALL: [PracticeMode; 3] = [
        PracticeMode::CharToMorse,
        PracticeMode::MorseToChar,
        PracticeMode::SoundToChar,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PracticeMode::CharToMorse => "char-to-morse",
            PracticeMode::MorseToChar => "morse-to-char",
            PracticeMode::SoundToChar => "sound-to-char",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PracticeMode::CharToMorse => "Character → Morse",
            PracticeMode::MorseToChar => "Morse → Character",
            PracticeMode::SoundToChar => "Sound → Character",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == name)
    }
}

impl fmt::Display for PracticeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per practice mode, serialized under the mode names.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PerMode<T> {
    #[serde(rename = "char-to-morse", default)]
    pub char_to_morse: T,
    #[serde(rename = "morse-to-char", default)]
    pub morse_to_char: T,
    #[serde(rename = "sound-to-char", default)]
    pub sound_to_char: T,
}

impl<T> PerMode<T> {
    pub fn get(&self, mode: PracticeMode) -> &T {
        match mode {
            PracticeMode::CharToMorse => &self.char_to_morse,
            PracticeMode::MorseToChar => &self.morse_to_char,
            PracticeMode::SoundToChar => &self.sound_to_char,
        }
    }

    pub fn get_mut(&mut self, mode: PracticeMode) -> &mut T {
        match mode {
            PracticeMode::CharToMorse => &mut self.char_to_morse,
            PracticeMode::MorseToChar => &mut self.morse_to_char,
            PracticeMode::SoundToChar => &mut self.sound_to_char,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PracticeMode, &T)> {
        PracticeMode::ALL.into_iter().map(move |m| (m, self.get(m)))
    }
}

use crate::morse::code::Symbol;

/// Canonical dot length: 1200 / WPM milliseconds.
pub const DOT_DURATION_FORMULA_MS: f64 = 1200.0;
pub const DOT_TO_DASH_RATIO: f64 = 3.0;

/// Side tone frequency used by the sound mode.
pub const TONE_HZ: f64 = 440.0;

pub fn dot_duration_ms(wpm: u32) -> f64 {
    DOT_DURATION_FORMULA_MS / wpm.max(1) as f64
}

/// One segment of an outgoing tone/vibration sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Keying {
    pub key_down: bool,
    pub duration_ms: f64,
}

/// Tone-then-gap segments for a dot/dash string: dots last one unit, dashes
/// three, and every symbol is followed by a one-unit gap.
pub fn keying_schedule(code: &str, wpm: u32) -> Vec<Keying> {
    let unit = dot_duration_ms(wpm);
    let mut schedule = Vec::with_capacity(code.len() * 2);
    for symbol in code.chars().filter_map(Symbol::from_char) {
        let units = match symbol {
            Symbol::Dot => 1.0,
            Symbol::Dash => DOT_TO_DASH_RATIO,
        };
        schedule.push(Keying {
            key_down: true,
            duration_ms: unit * units,
        });
        schedule.push(Keying {
            key_down: false,
            duration_ms: unit,
        });
    }
    schedule
}

/// Alternating on/off millisecond list suitable for a vibration motor.
pub fn vibration_pattern(schedule: &[Keying]) -> Vec<u64> {
    schedule
        .iter()
        .map(|k| k.duration_ms.round() as u64)
        .collect()
}

pub fn total_duration_ms(schedule: &[Keying]) -> f64 {
    schedule.iter().map(|k| k.duration_ms).sum()
}

/// Whether the key is down `elapsed_ms` into the schedule. Past the end it is up.
pub fn key_down_at(schedule: &[Keying], elapsed_ms: f64) -> bool {
    let mut start = 0.0;
    for segment in schedule {
        let end = start + segment.duration_ms;
        if elapsed_ms < end {
            return segment.key_down;
        }
        start = end;
    }
    false
}

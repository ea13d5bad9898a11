//! Camelot wheel key compatibility and BPM tolerance checks.
//!
//! Keys are written in Camelot notation: a wheel position `1..=12` followed by
//! `A` (minor) or `B` (major). Two keys mix harmonically when they are the
//! same key, relative major/minor (same number, other letter), or one step
//! apart on the wheel with the same letter. Position 12 and 1 are neighbours.

use std::fmt;

/// A parsed Camelot key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CamelotKey {
    number: u8,
    letter: char,
}

impl CamelotKey {
    /// Parse a key in strict Camelot notation, e.g. `"8B"` or `"12A"`.
    pub fn parse(raw: &str) -> Option<Self> {
        let letter = raw.chars().last()?;
        if letter != 'A' && letter != 'B' {
            return None;
        }
        let digits = &raw[..raw.len() - 1];
        if digits.is_empty() || digits.starts_with('0') || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return None;
        }
        let number: u8 = digits.parse().ok()?;
        if !(1..=12).contains(&number) {
            return None;
        }
        Some(Self { number, letter })
    }

    /// Wheel position of the major key on `pitch_class` (C = 0), with the
    /// letter picked by `minor`. C major is 8B and every fifth up is one step
    /// clockwise.
    fn from_major_pitch_class(pitch_class: i16, minor: bool) -> Self {
        let fifths = (pitch_class.rem_euclid(12) * 7).rem_euclid(12);
        Self {
            number: ((fifths + 7) % 12 + 1) as u8,
            letter: if minor { 'A' } else { 'B' },
        }
    }

    pub fn is_minor(&self) -> bool {
        self.letter == 'A'
    }

    /// The relative major/minor key.
    pub fn relative(&self) -> Self {
        let letter = if self.letter == 'A' { 'B' } else { 'A' };
        Self {
            number: self.number,
            letter,
        }
    }

    /// Move `steps` positions clockwise (negative for counter-clockwise).
    pub fn step(&self, steps: i8) -> Self {
        let zero_based = (self.number as i16 - 1 + steps as i16).rem_euclid(12);
        Self {
            number: zero_based as u8 + 1,
            letter: self.letter,
        }
    }

    /// Clockwise distance from `self` to `other`, ignoring letters (0..12).
    fn clockwise_to(&self, other: &Self) -> u8 {
        ((other.number as i16 - self.number as i16).rem_euclid(12)) as u8
    }

    /// Shortest distance around the wheel, ignoring letters (0..=6).
    pub fn wheel_distance(&self, other: &Self) -> u8 {
        let clockwise = self.clockwise_to(other);
        clockwise.min(12 - clockwise)
    }
}

impl fmt::Display for CamelotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.number, self.letter)
    }
}

/// Kind of harmonic move between two compatible keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyTransition {
    Same,
    Relative,
    /// One step clockwise.
    FifthUp,
    /// One step counter-clockwise.
    FifthDown,
}

impl KeyTransition {
    pub fn label(&self) -> &'static str {
        match self {
            KeyTransition::Same => "Same Key",
            KeyTransition::Relative => "Relative Major/Minor",
            KeyTransition::FifthUp => "Perfect Fifth Up",
            KeyTransition::FifthDown => "Perfect Fifth Down",
        }
    }
}

fn classify(from: &CamelotKey, to: &CamelotKey) -> Option<KeyTransition> {
    if from == to {
        return Some(KeyTransition::Same);
    }
    if from.number == to.number {
        return Some(KeyTransition::Relative);
    }
    if from.letter != to.letter {
        return None;
    }
    match from.clockwise_to(to) {
        1 => Some(KeyTransition::FifthUp),
        11 => Some(KeyTransition::FifthDown),
        _ => None,
    }
}

/// Whether two Camelot keys can be mixed harmonically.
///
/// Empty or malformed keys are never compatible, not even with themselves.
pub fn is_key_compatible(key_a: &str, key_b: &str) -> bool {
    key_transition(key_a, key_b).is_some()
}

/// The transition from `from_key` to `to_key`, `None` if they are not compatible.
pub fn key_transition(from_key: &str, to_key: &str) -> Option<KeyTransition> {
    let from = CamelotKey::parse(from_key)?;
    let to = CamelotKey::parse(to_key)?;
    classify(&from, &to)
}

/// Human readable transition label, empty if the keys are not compatible.
pub fn key_transition_label(from_key: &str, to_key: &str) -> &'static str {
    key_transition(from_key, to_key)
        .map(|t| t.label())
        .unwrap_or("")
}

/// All keys that mix harmonically with `key`: itself, one step down, one step
/// up and its relative key. Empty for malformed keys.
pub fn compatible_keys(key: &str) -> Vec<String> {
    match CamelotKey::parse(key) {
        Some(k) => [k, k.step(-1), k.step(1), k.relative()]
            .iter()
            .map(|k| k.to_string())
            .collect(),
        None => Vec::new(),
    }
}

/// Absolute BPM difference and whether it fits in `tolerance`.
///
/// A BPM of 0 is unknown: the pair is reported as `(0, true)` so that it
/// neither blocks nor rewards a candidate.
pub fn bpm_compatibility(bpm_a: u32, bpm_b: u32, tolerance: u32) -> (u32, bool) {
    if bpm_a == 0 || bpm_b == 0 {
        return (0, true);
    }
    let diff = bpm_a.abs_diff(bpm_b);
    (diff, diff <= tolerance)
}

/// Parse a key given either in Camelot notation or as a standard key name
/// (`"Am"`, `"A minor"`, `"F#"`, `"Bb major"`, `"Ebmin"`).
pub fn parse_key(raw: &str) -> Option<CamelotKey> {
    let trimmed = raw.trim();
    CamelotKey::parse(&trimmed.to_ascii_uppercase()).or_else(|| standard_key_to_camelot(trimmed))
}

/// Convert a standard key name to its Camelot position.
///
/// The name is a root note (`A`..`G`, case-insensitive), an optional `#`/`b`
/// (or `\u{266F}`/`\u{266D}`) and an optional mode: `m`, `min`, `minor`,
/// `maj` or `major`. No mode means major.
pub fn standard_key_to_camelot(raw: &str) -> Option<CamelotKey> {
    let mut chars = raw.trim().chars().peekable();
    let mut pitch_class: i16 = match chars.next()?.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };
    match chars.peek() {
        Some('#' | '\u{266F}') => {
            pitch_class += 1;
            chars.next();
        }
        Some('b' | '\u{266D}') => {
            pitch_class -= 1;
            chars.next();
        }
        _ => {}
    }

    let mode: String = chars.collect::<String>().trim().to_ascii_lowercase();
    let is_minor = match mode.as_str() {
        "" | "maj" | "major" => false,
        "m" | "min" | "minor" => true,
        _ => return None,
    };

    // A minor key sits on the same wheel number as its relative major.
    if is_minor {
        pitch_class += 3;
    }
    Some(CamelotKey::from_major_pitch_class(pitch_class, is_minor))
}

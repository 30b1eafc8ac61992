//! Camelot wheel notation for harmonic mixing.
//!
//! - Numbers 1-12 are positions on the wheel; one step clockwise is a
//!   perfect fifth up
//! - 'A' = minor key, 'B' = major key
//! - Same number, other letter = relative major/minor
//!
//! Wheel arithmetic is done on the code itself (1-based, wrapping 12 → 1);
//! the table in [`crate::tables::CAMELOT_WHEEL`] is only consulted to name keys.

use serde::Serialize;
use serde::ser::Serializer;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::tables::{self, CAMELOT_WHEEL, CamelotEntry};
use crate::western::WesternCalculator;
use crate::FrequencyTable;

/// Major or minor, the two modes the wheel distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyMode {
    Major,
    Minor,
}

impl fmt::Display for KeyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            KeyMode::Major => "major",
            KeyMode::Minor => "minor",
        })
    }
}

impl FromStr for KeyMode {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, ()> {
        match s.to_ascii_lowercase().as_str() {
            "major" | "maj" => Ok(KeyMode::Major),
            "minor" | "min" => Ok(KeyMode::Minor),
            _ => Err(()),
        }
    }
}

/// Ring of the wheel: A holds minor keys, B holds major keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CamelotLetter {
    A,
    B,
}

impl CamelotLetter {
    pub fn mode(self) -> KeyMode {
        match self {
            CamelotLetter::A => KeyMode::Minor,
            CamelotLetter::B => KeyMode::Major,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            CamelotLetter::A => CamelotLetter::B,
            CamelotLetter::B => CamelotLetter::A,
        }
    }

    fn for_mode(mode: KeyMode) -> Self {
        match mode {
            KeyMode::Major => CamelotLetter::B,
            KeyMode::Minor => CamelotLetter::A,
        }
    }
}

/// A validated code such as `8A` or `12B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CamelotCode {
    number: u8,
    letter: CamelotLetter,
}

impl CamelotCode {
    pub fn new(number: u8, letter: CamelotLetter) -> Result<Self> {
        if (1..=12).contains(&number) {
            Ok(Self { number, letter })
        } else {
            Err(Error::InvalidCamelotCode(format!("{number}{letter:?}")))
        }
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn letter(&self) -> CamelotLetter {
        self.letter
    }

    pub fn mode(&self) -> KeyMode {
        self.letter.mode()
    }

    /// Same number on the other ring.
    pub fn relative(&self) -> Self {
        Self {
            number: self.number,
            letter: self.letter.opposite(),
        }
    }

    /// Moves `steps` positions clockwise (negative = counter-clockwise).
    pub fn rotate(&self, steps: i32) -> Self {
        let zero_based = (i32::from(self.number) - 1 + steps).rem_euclid(12);
        Self {
            number: zero_based as u8 + 1,
            letter: self.letter,
        }
    }

    /// The "mood change" neighbour: nB → (n+1)A, nA → (n-1)B.
    pub fn diagonal(&self) -> Self {
        let step = match self.letter {
            CamelotLetter::B => 1,
            CamelotLetter::A => -1,
        };
        self.rotate(step).relative()
    }

    fn entry(&self) -> &'static CamelotEntry {
        // Every (number, letter) pair in 1..=12 x {A, B} is in the wheel.
        CAMELOT_WHEEL
            .iter()
            .find(|e| e.number == self.number && e.letter == self.letter)
            .unwrap_or_else(|| unreachable!("camelot wheel is missing {}", self))
    }
}

impl fmt::Display for CamelotCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:?}", self.number, self.letter)
    }
}

impl FromStr for CamelotCode {
    type Err = Error;

    /// Accepts `5B`, `5b`, ` 12A `; rejects `13B`, `5C`, `B5`, `05B`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidCamelotCode(s.to_string());
        let trimmed = s.trim();
        let split = trimmed.len().checked_sub(1).ok_or_else(invalid)?;
        if !trimmed.is_char_boundary(split) {
            return Err(invalid());
        }
        let (digits, letter) = trimmed.split_at(split);
        let letter = match letter {
            "A" | "a" => CamelotLetter::A,
            "B" | "b" => CamelotLetter::B,
            _ => return Err(invalid()),
        };
        if digits.is_empty()
            || digits.len() > 2
            || digits.starts_with('0')
            || !digits.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }
        let number: u8 = digits.parse().map_err(|_| invalid())?;
        Self::new(number, letter).map_err(|_| invalid())
    }
}

impl Serialize for CamelotCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// How a compatible key relates to the starting key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relationship {
    /// Same number, other letter.
    Relative,
    /// One step clockwise.
    FifthUp,
    /// One step counter-clockwise.
    FifthDown,
    /// Neighbouring number on the other ring.
    Diagonal,
}

impl Relationship {
    pub fn description(&self) -> &'static str {
        match self {
            Relationship::Relative => "relative major/minor",
            Relationship::FifthUp => "perfect fifth up",
            Relationship::FifthDown => "perfect fifth down",
            Relationship::Diagonal => "diagonal mood change",
        }
    }
}

/// A key that mixes harmonically with some starting code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibleKey {
    pub code: CamelotCode,
    /// Shorthand key name, e.g. "G" or "Am".
    pub key: String,
    pub relationship: Relationship,
}

/// Shorthand name for a wheel entry: "C" for C major, "Am" for A minor.
fn key_label(entry: &CamelotEntry) -> String {
    match entry.mode {
        KeyMode::Major => entry.key.to_string(),
        KeyMode::Minor => format!("{}m", entry.key),
    }
}

/// Splits "Am" into ("A", Some(Minor)); plain names carry no mode.
fn split_key_shorthand(key: &str) -> (&str, Option<KeyMode>) {
    match key.strip_suffix('m') {
        Some(tonic) if tables::pitch_class(tonic).is_some() => (tonic, Some(KeyMode::Minor)),
        _ => (key, None),
    }
}

/// Looks up the Camelot code for a key.
///
/// `key` may carry a trailing `m` ("Am"), which forces minor regardless of
/// `scale_type`. Sharp and flat spellings of the same tonic give the same code.
///
/// # Errors
/// * `UnmappedKey` - unknown tonic, or a scale type other than major/minor
pub fn get_camelot_notation(key: &str, scale_type: &str) -> Result<CamelotCode> {
    let unmapped = || Error::UnmappedKey {
        key: key.to_string(),
        scale_type: scale_type.to_string(),
    };
    let (tonic, shorthand_mode) = split_key_shorthand(key);
    let mode = match shorthand_mode {
        Some(mode) => mode,
        None => scale_type.parse::<KeyMode>().map_err(|_| unmapped())?,
    };
    let pitch_class = tables::pitch_class(tonic).ok_or_else(unmapped)?;

    let entry = CAMELOT_WHEEL
        .iter()
        .find(|e| e.pitch_class == pitch_class && e.mode == mode)
        .ok_or_else(unmapped)?;
    tracing::trace!(key, %mode, number = entry.number, "camelot lookup");
    CamelotCode::new(entry.number, CamelotLetter::for_mode(mode))
}

/// Inverse of [`get_camelot_notation`]: the tonic spelling and mode a code
/// stands for.
///
/// # Errors
/// * `InvalidCamelotCode` - malformed or outside 1A..12B
pub fn get_key_from_camelot(code: &str) -> Result<(&'static str, KeyMode)> {
    let entry = code.parse::<CamelotCode>()?.entry();
    Ok((entry.key, entry.mode))
}

/// Keys that mix harmonically with `code`: the relative key, both fifth
/// neighbours, and the diagonal neighbour. Never includes `code` itself.
pub fn get_compatible_keys(code: &str) -> Result<Vec<CompatibleKey>> {
    let code = code.parse::<CamelotCode>()?;
    let neighbours = [
        (code.relative(), Relationship::Relative),
        (code.rotate(1), Relationship::FifthUp),
        (code.rotate(-1), Relationship::FifthDown),
        (code.diagonal(), Relationship::Diagonal),
    ];
    Ok(neighbours
        .into_iter()
        .map(|(code, relationship)| CompatibleKey {
            code,
            key: key_label(code.entry()),
            relationship,
        })
        .collect())
}

/// A scale's frequencies together with where it sits on the wheel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScaleWithCamelot {
    pub frequencies: FrequencyTable,
    pub camelot_notation: CamelotCode,
    pub compatible_keys: Vec<CompatibleKey>,
}

impl WesternCalculator {
    /// Composes [`get_scale`](Self::get_scale), [`get_camelot_notation`] and
    /// [`get_compatible_keys`] for a major or minor key.
    pub fn get_scale_with_camelot(
        &self,
        root: &str,
        octave: i32,
        scale_type: &str,
    ) -> Result<ScaleWithCamelot> {
        let camelot_notation = get_camelot_notation(root, scale_type)?;
        let (tonic, _) = split_key_shorthand(root);
        let frequencies = self.get_scale(tonic, octave, &camelot_notation.mode().to_string())?;
        let compatible_keys = get_compatible_keys(&camelot_notation.to_string())?;
        Ok(ScaleWithCamelot {
            frequencies,
            camelot_notation,
            compatible_keys,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn code(s: &str) -> CamelotCode {
        s.parse().unwrap()
    }

    #[test]
    fn key_to_code() {
        assert_eq!(get_camelot_notation("C", "major").unwrap(), code("5B"));
        assert_eq!(get_camelot_notation("A", "minor").unwrap(), code("5A"));
        assert_eq!(get_camelot_notation("Am", "major").unwrap(), code("5A"));
        assert_eq!(get_camelot_notation("Eb", "major").unwrap().to_string(), "2B");
        assert_eq!(
            get_camelot_notation("C#", "major").unwrap(),
            get_camelot_notation("Db", "major").unwrap()
        );
    }

    #[test]
    fn unmapped_keys() {
        assert!(matches!(get_camelot_notation("H", "major"), Err(Error::UnmappedKey { .. })));
        assert!(matches!(get_camelot_notation("C", "dorian"), Err(Error::UnmappedKey { .. })));
    }

    #[test]
    fn code_to_key() {
        assert_eq!(get_key_from_camelot("5B").unwrap(), ("C", KeyMode::Major));
        assert_eq!(get_key_from_camelot("8B").unwrap(), ("A", KeyMode::Major));
        assert_eq!(get_key_from_camelot("5b").unwrap(), get_key_from_camelot("5B").unwrap());
    }

    #[test]
    fn malformed_codes() {
        for bad in ["13B", "15B", "0A", "5C", "B5", "", "A", "invalid", "-1A", "5Bb", "1½A", "05B", "005B", "012A", "+5B"] {
            assert!(
                matches!(get_key_from_camelot(bad), Err(Error::InvalidCamelotCode(_))),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn wheel_arithmetic_wraps() {
        assert_eq!(code("12B").rotate(1), code("1B"));
        assert_eq!(code("1A").rotate(-1), code("12A"));
        assert_eq!(code("7A").rotate(24), code("7A"));
        assert_eq!(code("12B").diagonal(), code("1A"));
        assert_eq!(code("1A").diagonal(), code("12B"));
        assert_eq!(code("5B").relative(), code("5A"));
    }

    #[test]
    fn compatible_keys_for_c_major() {
        let compatible = get_compatible_keys("5B").unwrap();
        let summary: Vec<_> = compatible
            .iter()
            .map(|k| (k.code.to_string(), k.key.as_str(), k.relationship))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("5A".to_string(), "Am", Relationship::Relative),
                ("6B".to_string(), "G", Relationship::FifthUp),
                ("4B".to_string(), "F", Relationship::FifthDown),
                ("6A".to_string(), "Em", Relationship::Diagonal),
            ]
        );
    }

    #[test]
    fn compatible_keys_at_the_seam() {
        let codes: Vec<_> = get_compatible_keys("12B")
            .unwrap()
            .into_iter()
            .map(|k| k.code.to_string())
            .collect();
        assert!(codes.contains(&"1B".to_string()));

        let codes: Vec<_> = get_compatible_keys("1A")
            .unwrap()
            .into_iter()
            .map(|k| k.code.to_string())
            .collect();
        assert!(codes.contains(&"12A".to_string()));

        assert!(get_compatible_keys("13A").is_err());
    }

    #[test]
    fn scale_with_camelot() {
        let wm = WesternCalculator::default();
        let info = wm.get_scale_with_camelot("C", 4, "major").unwrap();
        assert_eq!(info.camelot_notation, code("5B"));
        assert_eq!(info.frequencies.len(), 7);
        assert!(info.frequencies.contains("G4"));
        assert_eq!(info.compatible_keys.len(), 4);

        let minor = wm.get_scale_with_camelot("Am", 4, "major").unwrap();
        assert_eq!(minor.camelot_notation, code("5A"));
        assert!(minor.frequencies.contains("C5"));
    }

    #[test]
    fn code_serializes_as_string() {
        assert_eq!(serde_json::to_string(&code("11A")).unwrap(), r#""11A""#);
    }
}

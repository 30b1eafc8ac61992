//! # Reference Tables Module
//!
//! Immutable lookup data shared by every calculator. Nothing in here depends on
//! a reference pitch; the calculators multiply these offsets and ratios by the
//! pitch they were constructed with.
//!
//! ## Contents
//! - Twelve pitch names (sharps) plus the five enharmonic flats
//! - Western scale interval patterns and chromatic solfège offsets
//! - Simple just-intonation ratios used for harmonic detection
//! - The Camelot wheel (24 key/mode pairs)
//! - The 22-shruti ratio table, the swara → shruti mapping, and named ragas
//!
//! Tables that need indexed lookups are built once on first use with
//! `once_cell::sync::Lazy`.

use once_cell::sync::Lazy;
use std::collections::BTreeMap;

use crate::camelot::{CamelotLetter, KeyMode};
use crate::indian::{Swara, Variant};

/// Pitch names in chromatic order starting at C. Index = pitch class.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Flat spellings accepted as input, paired with the sharp they resolve to.
pub const FLAT_NAMES: [(&str, &str); 5] = [
    ("Db", "C#"),
    ("Eb", "D#"),
    ("Gb", "F#"),
    ("Ab", "G#"),
    ("Bb", "A#"),
];

/// Name → pitch class for every accepted spelling.
static NOTE_MAP: Lazy<BTreeMap<&'static str, u8>> = Lazy::new(|| {
    let mut map: BTreeMap<&'static str, u8> = NOTE_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| (*name, i as u8))
        .collect();
    for (flat, sharp) in FLAT_NAMES {
        let pitch_class = map[sharp];
        map.insert(flat, pitch_class);
    }
    map
});

/// Resolves a note name (sharp or flat spelling) to its pitch class 0..12.
pub fn pitch_class(name: &str) -> Option<u8> {
    NOTE_MAP.get(name).copied()
}

/// Comma-separated list of every accepted note spelling, for error messages.
pub fn accepted_note_names() -> String {
    NOTE_NAMES
        .iter()
        .copied()
        .chain(FLAT_NAMES.iter().map(|(flat, _)| *flat))
        .collect::<Vec<_>>()
        .join(", ")
}

/// A named scale as semitone offsets from its root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScaleDefinition {
    pub name: &'static str,
    pub offsets: &'static [u8],
}

pub const SCALES: &[ScaleDefinition] = &[
    ScaleDefinition { name: "major", offsets: &[0, 2, 4, 5, 7, 9, 11] },
    ScaleDefinition { name: "minor", offsets: &[0, 2, 3, 5, 7, 8, 10] },
    ScaleDefinition { name: "minor_harmonic", offsets: &[0, 2, 3, 5, 7, 8, 11] },
    ScaleDefinition { name: "minor_melodic", offsets: &[0, 2, 3, 5, 7, 9, 11] },
    ScaleDefinition { name: "chromatic", offsets: &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11] },
    ScaleDefinition { name: "pentatonic_major", offsets: &[0, 2, 4, 7, 9] },
    ScaleDefinition { name: "pentatonic_minor", offsets: &[0, 3, 5, 7, 10] },
    ScaleDefinition { name: "blues", offsets: &[0, 3, 5, 6, 7, 10] },
];

pub fn scale(name: &str) -> Option<&'static ScaleDefinition> {
    SCALES.iter().find(|s| s.name == name)
}

pub fn scale_names() -> String {
    SCALES.iter().map(|s| s.name).collect::<Vec<_>>().join(", ")
}

/// Chromatic solfège syllables and their semitone offset from the key root.
/// The ascending spellings come first; Ra/Me/Se/Le/Te are the descending ones.
pub const SOLFEGE: &[(&str, u8)] = &[
    ("Do", 0),
    ("Di", 1),
    ("Re", 2),
    ("Ri", 3),
    ("Mi", 4),
    ("Fa", 5),
    ("Fi", 6),
    ("Sol", 7),
    ("Si", 8),
    ("La", 9),
    ("Li", 10),
    ("Ti", 11),
    ("Ra", 1),
    ("Me", 3),
    ("Se", 6),
    ("Le", 8),
    ("Te", 10),
    ("So", 7),
];

pub fn solfege_offset(syllable: &str) -> Option<u8> {
    SOLFEGE
        .iter()
        .find(|(name, _)| *name == syllable)
        .map(|(_, offset)| *offset)
}

/// A small-integer frequency ratio treated as consonant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarmonicRatio {
    pub numerator: u32,
    pub denominator: u32,
    pub name: &'static str,
}

impl HarmonicRatio {
    pub fn value(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

/// Checked in order; the first ratio within tolerance wins.
pub const HARMONIC_RATIOS: &[HarmonicRatio] = &[
    HarmonicRatio { numerator: 1, denominator: 1, name: "unison" },
    HarmonicRatio { numerator: 2, denominator: 1, name: "octave" },
    HarmonicRatio { numerator: 3, denominator: 2, name: "perfect fifth" },
    HarmonicRatio { numerator: 4, denominator: 3, name: "perfect fourth" },
    HarmonicRatio { numerator: 5, denominator: 4, name: "major third" },
    HarmonicRatio { numerator: 6, denominator: 5, name: "minor third" },
    HarmonicRatio { numerator: 5, denominator: 3, name: "major sixth" },
    HarmonicRatio { numerator: 8, denominator: 5, name: "minor sixth" },
    HarmonicRatio { numerator: 9, denominator: 8, name: "major second" },
    HarmonicRatio { numerator: 16, denominator: 15, name: "minor second" },
];

/// One position on the Camelot wheel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CamelotEntry {
    pub number: u8,
    pub letter: CamelotLetter,
    /// Display spelling of the tonic, as DJs usually write it.
    pub key: &'static str,
    pub pitch_class: u8,
    pub mode: KeyMode,
}

const fn major(number: u8, key: &'static str, pitch_class: u8) -> CamelotEntry {
    CamelotEntry { number, letter: CamelotLetter::B, key, pitch_class, mode: KeyMode::Major }
}

const fn minor(number: u8, key: &'static str, pitch_class: u8) -> CamelotEntry {
    CamelotEntry { number, letter: CamelotLetter::A, key, pitch_class, mode: KeyMode::Minor }
}

/// C major sits at 5B; moving clockwise climbs a perfect fifth, and the A ring
/// holds the relative minor of the B entry with the same number.
pub const CAMELOT_WHEEL: [CamelotEntry; 24] = [
    major(1, "Ab", 8),
    major(2, "Eb", 3),
    major(3, "Bb", 10),
    major(4, "F", 5),
    major(5, "C", 0),
    major(6, "G", 7),
    major(7, "D", 2),
    major(8, "A", 9),
    major(9, "E", 4),
    major(10, "B", 11),
    major(11, "F#", 6),
    major(12, "Db", 1),
    minor(1, "F", 5),
    minor(2, "C", 0),
    minor(3, "G", 7),
    minor(4, "D", 2),
    minor(5, "A", 9),
    minor(6, "E", 4),
    minor(7, "B", 11),
    minor(8, "F#", 6),
    minor(9, "C#", 1),
    minor(10, "G#", 8),
    minor(11, "Eb", 3),
    minor(12, "Bb", 10),
];

/// One of the 22 microtonal positions, as an exact ratio above Sa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shruti {
    pub number: u8,
    pub numerator: u32,
    pub denominator: u32,
    pub name: &'static str,
}

impl Shruti {
    pub fn ratio(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }
}

const fn shruti(number: u8, numerator: u32, denominator: u32, name: &'static str) -> Shruti {
    Shruti { number, numerator, denominator, name }
}

/// Strictly increasing within [1, 2).
pub const SHRUTIS: [Shruti; 22] = [
    shruti(1, 1, 1, "Shadja"),
    shruti(2, 256, 243, "Suddha Rishabha"),
    shruti(3, 16, 15, "Chyuta Rishabha"),
    shruti(4, 10, 9, "Tivra Rishabha"),
    shruti(5, 9, 8, "Tivratara Rishabha"),
    shruti(6, 32, 27, "Suddha Gandhara"),
    shruti(7, 6, 5, "Chyuta Gandhara"),
    shruti(8, 5, 4, "Antara Gandhara"),
    shruti(9, 81, 64, "Tivra Gandhara"),
    shruti(10, 4, 3, "Suddha Madhyama"),
    shruti(11, 27, 20, "Tivra Madhyama"),
    shruti(12, 45, 32, "Prati Madhyama"),
    shruti(13, 729, 512, "Ati-Tivra Madhyama"),
    shruti(14, 3, 2, "Panchama"),
    shruti(15, 128, 81, "Suddha Dhaivata"),
    shruti(16, 8, 5, "Chyuta Dhaivata"),
    shruti(17, 5, 3, "Antara Dhaivata"),
    shruti(18, 27, 16, "Tivra Dhaivata"),
    shruti(19, 16, 9, "Suddha Nishada"),
    shruti(20, 9, 5, "Chyuta Nishada"),
    shruti(21, 15, 8, "Kakali Nishada"),
    shruti(22, 243, 128, "Tivra Nishada"),
];

pub fn shruti_by_number(number: u8) -> Option<&'static Shruti> {
    SHRUTIS.get(usize::from(number).checked_sub(1)?)
}

/// Every valid (swara, variant) pair and the shruti it sounds at, in
/// ascending pitch order.
pub const SWARA_VARIANTS: &[(Swara, Variant, u8)] = &[
    (Swara::Sa, Variant::Shuddha, 1),
    (Swara::Re, Variant::Komal, 3),
    (Swara::Re, Variant::Shuddha, 5),
    (Swara::Ga, Variant::Komal, 6),
    (Swara::Ga, Variant::Shuddha, 8),
    (Swara::Ma, Variant::Shuddha, 10),
    (Swara::Ma, Variant::Tivra, 13),
    (Swara::Pa, Variant::Shuddha, 14),
    (Swara::Dha, Variant::Komal, 16),
    (Swara::Dha, Variant::Shuddha, 17),
    (Swara::Ni, Variant::Komal, 19),
    (Swara::Ni, Variant::Shuddha, 21),
];

/// Indexed form of [`SWARA_VARIANTS`]. Construction panics if a row points
/// outside the shruti table, so bad data surfaces on first use.
static SWARA_SHRUTI_MAP: Lazy<BTreeMap<(Swara, Variant), &'static Shruti>> = Lazy::new(|| {
    SWARA_VARIANTS
        .iter()
        .map(|&(swara, variant, number)| {
            let shruti = shruti_by_number(number).unwrap_or_else(|| {
                panic!("{swara} {variant} refers to missing shruti {number}")
            });
            ((swara, variant), shruti)
        })
        .collect()
});

pub fn swara_shruti(swara: Swara, variant: Variant) -> Option<&'static Shruti> {
    SWARA_SHRUTI_MAP.get(&(swara, variant)).copied()
}

/// Variants defined for a swara, in table order.
pub fn variants_of(swara: Swara) -> impl Iterator<Item = Variant> {
    SWARA_VARIANTS
        .iter()
        .filter(move |(s, _, _)| *s == swara)
        .map(|(_, v, _)| *v)
}

/// A raga's ascending form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RagaDefinition {
    pub name: &'static str,
    pub steps: &'static [(Swara, Variant)],
}

use Swara::{Dha, Ga, Ma, Ni, Pa, Re, Sa};
use Variant::{Komal, Shuddha, Tivra};

pub const RAGAS: &[RagaDefinition] = &[
    RagaDefinition {
        name: "Bhairav",
        steps: &[(Sa, Shuddha), (Re, Komal), (Ga, Shuddha), (Ma, Shuddha), (Pa, Shuddha), (Dha, Komal), (Ni, Shuddha)],
    },
    RagaDefinition {
        name: "Yaman",
        steps: &[(Sa, Shuddha), (Re, Shuddha), (Ga, Shuddha), (Ma, Tivra), (Pa, Shuddha), (Dha, Shuddha), (Ni, Shuddha)],
    },
    RagaDefinition {
        name: "Bhairavi",
        steps: &[(Sa, Shuddha), (Re, Komal), (Ga, Komal), (Ma, Shuddha), (Pa, Shuddha), (Dha, Komal), (Ni, Komal)],
    },
    RagaDefinition {
        name: "Todi",
        steps: &[(Sa, Shuddha), (Re, Komal), (Ga, Komal), (Ma, Tivra), (Pa, Shuddha), (Dha, Komal), (Ni, Komal)],
    },
    RagaDefinition {
        name: "Kafi",
        steps: &[(Sa, Shuddha), (Re, Shuddha), (Ga, Komal), (Ma, Shuddha), (Pa, Shuddha), (Dha, Shuddha), (Ni, Komal)],
    },
];

/// Raga lookup, ignoring ASCII case.
pub fn raga(name: &str) -> Option<&'static RagaDefinition> {
    RAGAS.iter().find(|r| r.name.eq_ignore_ascii_case(name))
}

pub fn raga_names() -> impl Iterator<Item = &'static str> {
    RAGAS.iter().map(|r| r.name)
}

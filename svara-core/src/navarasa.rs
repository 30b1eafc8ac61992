//! # Navarasa Module
//!
//! The nine rasas (emotional essences) of Indian aesthetics, the ragas that
//! evoke them, and the thaat (parent scale) each raga belongs to.
//!
//! ## Features
//! - Rasa descriptions, energy levels and recommended ragas
//! - Compatible rasa transitions and shortest transition paths
//! - Raga to thaat lookup, and thaat to the nearest Western scale and
//!   Camelot key
//! - Side-by-side raga and Western scale frequencies

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::camelot::{get_camelot_notation, get_compatible_keys, CamelotCode, CompatibleKey, KeyMode};
use crate::compare::{map_raga_to_western, SwaraMapping};
use crate::error::{Error, Result};
use crate::indian::IndianCalculator;
use crate::transitions::{self, energy_difference_percent, EnergyTransition};
use crate::western::{Note, WesternCalculator};
use crate::FrequencyTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Rasa {
    Sringara,
    Haasya,
    Karuna,
    Raudra,
    Veera,
    Bhayaanaka,
    Beebhatsa,
    Adbutham,
    Saantha,
}

impl Rasa {
    pub const ALL: [Rasa; 9] = [
        Rasa::Sringara,
        Rasa::Haasya,
        Rasa::Karuna,
        Rasa::Raudra,
        Rasa::Veera,
        Rasa::Bhayaanaka,
        Rasa::Beebhatsa,
        Rasa::Adbutham,
        Rasa::Saantha,
    ];

    pub fn name(&self) -> &'static str {
        self.info().name
    }

    pub fn info(&self) -> &'static RasaInfo {
        &RASA_INFO[*self as usize]
    }

    /// Rasas a performance can move to directly from this one.
    pub fn transitions(&self) -> &'static [Rasa] {
        self.info().transitions
    }
}

impl fmt::Display for Rasa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rasa {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Rasa::ALL
            .into_iter()
            .find(|rasa| rasa.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownRasa {
                name: s.to_string(),
                available: Rasa::ALL.map(|r| r.name()).join(", "),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RasaInfo {
    pub name: &'static str,
    pub english: &'static str,
    pub mood: &'static str,
    /// Time of day the rasa is traditionally associated with.
    pub time: &'static str,
    pub color: &'static str,
    /// 1-10
    pub energy_level: u8,
    pub ragas: &'static [&'static str],
    pub transitions: &'static [Rasa],
    /// Western scales, modes and chords with a similar feel.
    pub western_correlations: [&'static str; 3],
}

use Rasa::*;

const RASA_INFO: [RasaInfo; 9] = [
    RasaInfo {
        name: "Sringara",
        english: "Love/Erotic",
        mood: "Love",
        time: "Evening",
        color: "Light green",
        energy_level: 7,
        ragas: &["Yaman", "Behag", "Hameer", "Tilak Kamod", "Desh"],
        transitions: &[Haasya, Adbutham, Saantha, Karuna],
        western_correlations: ["Major", "Lydian", "major 7th chords"],
    },
    RasaInfo {
        name: "Haasya",
        english: "Comedy/Laughter",
        mood: "Satire",
        time: "Morning",
        color: "White",
        energy_level: 8,
        ragas: &["Durga", "Pahadi", "Jog", "Nat Kamod", "Bahar"],
        transitions: &[Sringara, Veera, Adbutham, Saantha],
        western_correlations: ["Major pentatonic", "Mixolydian", "dominant 7th chords"],
    },
    RasaInfo {
        name: "Karuna",
        english: "Compassion/Sympathy",
        mood: "Pathos",
        time: "Late evening",
        color: "Grey",
        energy_level: 3,
        ragas: &["Bhairavi", "Malkauns", "Bageshri", "Todi", "Bilaskhani Todi"],
        transitions: &[Saantha, Sringara, Bhayaanaka, Beebhatsa, Veera],
        western_correlations: ["Minor", "Phrygian", "minor 7th chords"],
    },
    RasaInfo {
        name: "Raudra",
        english: "Anger/Fury",
        mood: "Fury",
        time: "Noon",
        color: "Red",
        energy_level: 9,
        ragas: &["Bhairav", "Marwa", "Chandrakauns", "Shree", "Hindol"],
        transitions: &[Veera, Bhayaanaka, Beebhatsa],
        western_correlations: ["Diminished", "Locrian", "diminished chords"],
    },
    RasaInfo {
        name: "Veera",
        english: "Bravery/Heroism",
        mood: "Valour",
        time: "Dawn",
        color: "Yellow",
        energy_level: 10,
        ragas: &["Bilawal", "Darbari", "Jaijaiwanti", "Maand", "Kedar"],
        transitions: &[Raudra, Haasya, Adbutham, Sringara, Karuna],
        western_correlations: ["Major", "Lydian dominant", "sus4 chords"],
    },
    RasaInfo {
        name: "Bhayaanaka",
        english: "Terror/Fear",
        mood: "Fright",
        time: "Night",
        color: "Black",
        energy_level: 6,
        ragas: &["Shree", "Purvi", "Gauri", "Lalit", "Vrindavani Sarang"],
        transitions: &[Raudra, Karuna, Beebhatsa],
        western_correlations: ["Half-diminished", "Locrian", "minor 7♭5 chords"],
    },
    RasaInfo {
        name: "Beebhatsa",
        english: "Disgust/Aversion",
        mood: "Aversion",
        time: "Dusk",
        color: "Blue",
        energy_level: 5,
        ragas: &["Todi", "Komal Rishabh Asavari", "Bhimpalasi", "Jogiya", "Vibhas"],
        transitions: &[Bhayaanaka, Raudra, Karuna],
        western_correlations: ["Altered dominant", "Phrygian dominant", "altered chords"],
    },
    RasaInfo {
        name: "Adbutham",
        english: "Wonder/Amazement",
        mood: "Amazement",
        time: "Midnight",
        color: "Yellow",
        energy_level: 7,
        ragas: &["Darbari", "Miyan Ki Malhar", "Champakali", "Madhuvanti", "Gaud Sarang"],
        transitions: &[Sringara, Veera, Haasya, Saantha],
        western_correlations: ["Augmented", "Whole tone", "augmented chords"],
    },
    RasaInfo {
        name: "Saantha",
        english: "Peace/Tranquility",
        mood: "Serenity",
        time: "Late night",
        color: "White",
        energy_level: 1,
        ragas: &["Bhimpalasi", "Jaunpuri", "Ahir Bhairav", "Bairagi", "Pahadi"],
        transitions: &[Karuna, Sringara, Adbutham, Haasya],
        western_correlations: ["Natural minor", "Dorian", "minor 9th chords"],
    },
];

/// The ten parent scales of Hindustani music.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Thaat {
    Bilawal,
    Khamaj,
    Kafi,
    Asavari,
    Bhairavi,
    Bhairav,
    Kalyan,
    Marwa,
    Purvi,
    Todi,
}

impl Thaat {
    pub fn name(&self) -> &'static str {
        self.info().name
    }

    pub fn info(&self) -> &'static ThaatInfo {
        &THAAT_INFO[*self as usize]
    }
}

impl fmt::Display for Thaat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// How a thaat is approximated in Western terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ThaatInfo {
    pub name: &'static str,
    pub western_scale: &'static str,
    /// Key whose white-note scale sits closest to the thaat.
    pub suggested_key: &'static str,
    /// Ring used when placing the thaat on the Camelot wheel.
    pub key_mode: KeyMode,
    /// Semitone offsets of Sa, Re, Ga, Ma, Pa, Dha, Ni.
    pub intervals: [u8; 7],
}

const THAAT_INFO: [ThaatInfo; 10] = [
    ThaatInfo {
        name: "Bilawal",
        western_scale: "Major",
        suggested_key: "C",
        key_mode: KeyMode::Major,
        intervals: [0, 2, 4, 5, 7, 9, 11],
    },
    ThaatInfo {
        name: "Khamaj",
        western_scale: "Mixolydian",
        suggested_key: "G",
        key_mode: KeyMode::Major,
        intervals: [0, 2, 4, 5, 7, 9, 10],
    },
    ThaatInfo {
        name: "Kafi",
        western_scale: "Dorian",
        suggested_key: "D",
        key_mode: KeyMode::Minor,
        intervals: [0, 2, 3, 5, 7, 9, 10],
    },
    ThaatInfo {
        name: "Asavari",
        western_scale: "Natural Minor",
        suggested_key: "A",
        key_mode: KeyMode::Minor,
        intervals: [0, 2, 3, 5, 7, 8, 10],
    },
    ThaatInfo {
        name: "Bhairavi",
        western_scale: "Phrygian",
        suggested_key: "E",
        key_mode: KeyMode::Minor,
        intervals: [0, 1, 3, 5, 7, 8, 10],
    },
    ThaatInfo {
        name: "Bhairav",
        western_scale: "Double Harmonic Major",
        suggested_key: "C",
        key_mode: KeyMode::Major,
        intervals: [0, 1, 4, 5, 7, 8, 11],
    },
    ThaatInfo {
        name: "Kalyan",
        western_scale: "Lydian",
        suggested_key: "F",
        key_mode: KeyMode::Major,
        intervals: [0, 2, 4, 6, 7, 9, 11],
    },
    ThaatInfo {
        name: "Marwa",
        western_scale: "Marwa (no Western equivalent)",
        suggested_key: "C",
        key_mode: KeyMode::Major,
        intervals: [0, 1, 4, 6, 7, 9, 11],
    },
    ThaatInfo {
        name: "Purvi",
        western_scale: "Purvi (no Western equivalent)",
        suggested_key: "C",
        key_mode: KeyMode::Major,
        intervals: [0, 1, 4, 6, 7, 8, 11],
    },
    ThaatInfo {
        name: "Todi",
        western_scale: "Todi (no Western equivalent)",
        suggested_key: "D",
        key_mode: KeyMode::Major,
        intervals: [0, 1, 3, 6, 7, 8, 11],
    },
];

const RAGA_THAATS: [(&str, Thaat); 41] = [
    ("Yaman", Thaat::Kalyan),
    ("Bhairav", Thaat::Bhairav),
    ("Bhairavi", Thaat::Bhairavi),
    ("Todi", Thaat::Todi),
    ("Bilawal", Thaat::Bilawal),
    ("Kafi", Thaat::Kafi),
    ("Asavari", Thaat::Asavari),
    ("Marwa", Thaat::Marwa),
    ("Purvi", Thaat::Purvi),
    ("Desh", Thaat::Khamaj),
    ("Malkauns", Thaat::Bhairavi),
    ("Darbari", Thaat::Asavari),
    ("Bageshri", Thaat::Kafi),
    ("Durga", Thaat::Bilawal),
    ("Jaunpuri", Thaat::Asavari),
    ("Bhimpalasi", Thaat::Kafi),
    ("Ahir Bhairav", Thaat::Bhairav),
    ("Pahadi", Thaat::Bilawal),
    ("Jog", Thaat::Kafi),
    ("Kedar", Thaat::Kalyan),
    ("Hameer", Thaat::Kalyan),
    ("Chandrakauns", Thaat::Bhairavi),
    ("Miyan Ki Malhar", Thaat::Kafi),
    ("Tilak Kamod", Thaat::Khamaj),
    ("Shree", Thaat::Purvi),
    ("Bairagi", Thaat::Bhairav),
    ("Nat Kamod", Thaat::Khamaj),
    ("Hindol", Thaat::Kalyan),
    ("Jaijaiwanti", Thaat::Khamaj),
    ("Lalit", Thaat::Marwa),
    ("Bahar", Thaat::Kafi),
    ("Gauri", Thaat::Bhairav),
    ("Vibhas", Thaat::Bhairav),
    ("Maand", Thaat::Bilawal),
    ("Vrindavani Sarang", Thaat::Kafi),
    ("Gaud Sarang", Thaat::Bilawal),
    ("Jogiya", Thaat::Bhairav),
    ("Komal Rishabh Asavari", Thaat::Asavari),
    ("Bilaskhani Todi", Thaat::Todi),
    ("Champakali", Thaat::Khamaj),
    ("Madhuvanti", Thaat::Todi),
];

/// Lower-cased raga name → (canonical name, thaat).
static RAGA_THAAT_MAP: Lazy<BTreeMap<String, (&'static str, Thaat)>> = Lazy::new(|| {
    RAGA_THAATS
        .iter()
        .map(|&(raga, thaat)| (raga.to_ascii_lowercase(), (raga, thaat)))
        .collect()
});

/// Lower-cased raga name → rasas that list it, in rasa order.
static RAGA_RASA_MAP: Lazy<BTreeMap<String, Vec<Rasa>>> = Lazy::new(|| {
    let mut map: BTreeMap<String, Vec<Rasa>> = BTreeMap::new();
    for rasa in Rasa::ALL {
        for raga in rasa.info().ragas {
            map.entry(raga.to_ascii_lowercase()).or_default().push(rasa);
        }
    }
    map
});

fn push_unique<T: PartialEq>(items: &mut Vec<T>, item: T) {
    if !items.contains(&item) {
        items.push(item);
    }
}

/// Rasa details by name (case-insensitive).
pub fn get_rasa_info(rasa: &str) -> Result<&'static RasaInfo> {
    Ok(rasa.parse::<Rasa>()?.info())
}

/// Ragas traditionally used to evoke `rasa`.
pub fn get_raga_by_rasa(rasa: &str) -> Result<&'static [&'static str]> {
    Ok(rasa.parse::<Rasa>()?.info().ragas)
}

/// Rasas whose raga lists contain `raga`. Empty for ragas no rasa names.
pub fn get_rasa_from_raga(raga: &str) -> Vec<Rasa> {
    RAGA_RASA_MAP
        .get(&raga.to_ascii_lowercase())
        .cloned()
        .unwrap_or_default()
}

/// One step from a rasa to a compatible one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RasaTransition {
    pub rasa: Rasa,
    pub transition: EnergyTransition,
    /// `|target - source| / source`, in percent.
    pub energy_difference_percent: f64,
    pub energy_level: u8,
    pub description: &'static str,
    pub recommended_ragas: &'static [&'static str],
}

/// Rasas reachable in one step from `rasa`, in table order, with the energy
/// change each move implies.
pub fn get_compatible_rasas(rasa: &str) -> Result<Vec<RasaTransition>> {
    let source = rasa.parse::<Rasa>()?.info();
    Ok(source
        .transitions
        .iter()
        .map(|&target| {
            let info = target.info();
            RasaTransition {
                rasa: target,
                transition: EnergyTransition::between(source.energy_level, info.energy_level),
                energy_difference_percent: energy_difference_percent(
                    source.energy_level,
                    info.energy_level,
                ),
                energy_level: info.energy_level,
                description: info.english,
                recommended_ragas: info.ragas,
            }
        })
        .collect())
}

/// Shortest chain of compatible rasas from `start` to `end`.
///
/// `max_steps` counts rasas in the path, both ends included. Returns
/// `Ok(None)` when no chain that short exists.
pub fn suggest_transition_path(start: &str, end: &str, max_steps: usize) -> Result<Option<Vec<Rasa>>> {
    let start: Rasa = start.parse()?;
    let end: Rasa = end.parse()?;
    let path = transitions::shortest_path(start, end, max_steps, |r| r.transitions());
    tracing::trace!(%start, %end, max_steps, found = path.is_some(), "rasa path search");
    Ok(path)
}

/// Parent scale of a raga, if the thaat table knows it.
pub fn get_raga_thaat(raga: &str) -> Option<Thaat> {
    RAGA_THAAT_MAP
        .get(&raga.to_ascii_lowercase())
        .map(|&(_, thaat)| thaat)
}

fn raga_with_thaat(raga: &str) -> Result<(&'static str, Thaat)> {
    RAGA_THAAT_MAP
        .get(&raga.to_ascii_lowercase())
        .copied()
        .ok_or_else(|| Error::UnknownRaga {
            name: raga.to_string(),
            available: RAGA_THAATS.map(|(name, _)| name).join(", "),
        })
}

/// A raga placed in Western terms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WesternEquivalent {
    pub raga: &'static str,
    pub thaat: Thaat,
    pub scale_type: &'static str,
    pub suggested_key: &'static str,
    pub camelot_notation: CamelotCode,
    pub compatible_keys: Vec<CompatibleKey>,
    pub rasas: Vec<Rasa>,
    /// Union of the rasas' correlations, first occurrence kept.
    pub western_correlations: Vec<&'static str>,
}

/// Western scale, suggested key and Camelot position for a raga, via its
/// thaat.
///
/// # Errors
/// * `UnknownRaga` - raga not in the thaat table
pub fn get_western_equivalent(raga: &str) -> Result<WesternEquivalent> {
    let (name, thaat) = raga_with_thaat(raga)?;
    let info = thaat.info();
    let rasas = get_rasa_from_raga(name);

    let mut western_correlations = Vec::new();
    for rasa in &rasas {
        for &quality in &rasa.info().western_correlations {
            push_unique(&mut western_correlations, quality);
        }
    }

    let camelot_notation = get_camelot_notation(info.suggested_key, &info.key_mode.to_string())?;
    Ok(WesternEquivalent {
        raga: name,
        thaat,
        scale_type: info.western_scale,
        suggested_key: info.suggested_key,
        camelot_notation,
        compatible_keys: get_compatible_keys(&camelot_notation.to_string())?,
        rasas,
        western_correlations,
    })
}

/// A raga next to the Western scale built on its thaat.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RagaScaleComparison {
    pub raga: &'static str,
    pub thaat: Thaat,
    /// e.g. "C4 Lydian".
    pub western_scale: String,
    pub camelot_notation: CamelotCode,
    pub compatible_keys: Vec<CompatibleKey>,
    pub raga_frequencies: FrequencyTable,
    pub western_frequencies: FrequencyTable,
    pub rasas: Vec<Rasa>,
    /// Each raga step against its nearest tempered note.
    pub nearest_notes: Vec<SwaraMapping>,
}

/// Builds the thaat's interval pattern on `root` and sets it beside the
/// raga's just-intonation frequencies.
///
/// # Errors
/// * `UnknownRaga` - raga missing from the thaat table or the raga table
/// * `InvalidNote` / `InvalidParameter` - bad root or octave
pub fn compare_raga_to_western_scale(
    indian: &IndianCalculator,
    western: &WesternCalculator,
    raga: &str,
    root: &str,
    octave: i32,
) -> Result<RagaScaleComparison> {
    let equivalent = get_western_equivalent(raga)?;
    let info = equivalent.thaat.info();
    let root_note = Note::new(root, octave)?;
    let camelot_notation = get_camelot_notation(root, &info.key_mode.to_string())?;

    Ok(RagaScaleComparison {
        raga: equivalent.raga,
        thaat: equivalent.thaat,
        western_scale: format!("{root_note} {}", info.western_scale),
        camelot_notation,
        compatible_keys: get_compatible_keys(&camelot_notation.to_string())?,
        raga_frequencies: indian.calculate_raga_frequencies(raga)?,
        western_frequencies: western.build_scale(root_note, &info.intervals)?,
        rasas: equivalent.rasas,
        nearest_notes: map_raga_to_western(indian, western, raga)?,
    })
}

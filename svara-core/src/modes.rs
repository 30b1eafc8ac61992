//! Western church modes.
//!
//! Each mode is a rotation of the major scale; its interval pattern is derived
//! from the rotation rather than stored. Moods, transitions, history and the
//! bridge to the navarasas are kept in per-mode tables indexed by degree.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::indian::IndianCalculator;
use crate::navarasa::Rasa;
use crate::tables;
use crate::transitions::{self, energy_difference_percent, EnergyTransition, IntensityTransition};
use crate::western::{Note, WesternCalculator};
use crate::FrequencyTable;

const MAJOR_STEPS: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum WesternMode {
    Ionian,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Aeolian,
    Locrian,
}

impl WesternMode {
    /// In degree order of the major scale they start on.
    pub const ALL: [WesternMode; 7] = [
        WesternMode::Ionian,
        WesternMode::Dorian,
        WesternMode::Phrygian,
        WesternMode::Lydian,
        WesternMode::Mixolydian,
        WesternMode::Aeolian,
        WesternMode::Locrian,
    ];

    pub fn name(&self) -> &'static str {
        self.info().name
    }

    fn degree(&self) -> usize {
        *self as usize
    }

    /// Semitone offsets from the mode's root, ascending.
    pub fn intervals(&self) -> [u8; 7] {
        let start = self.degree();
        let base = MAJOR_STEPS[start];
        std::array::from_fn(|i| (MAJOR_STEPS[(start + i) % 7] + 12 - base) % 12)
    }

    pub fn info(&self) -> &'static ModeInfo {
        &MODE_INFO[self.degree()]
    }

    /// Modes that follow this one smoothly.
    pub fn transitions(&self) -> &'static [WesternMode] {
        MODE_TRANSITIONS[self.degree()]
    }

    pub fn instruments(&self) -> &'static [&'static str; 4] {
        &MODE_INSTRUMENTS[self.degree()]
    }

    /// Navarasas with a similar emotional character.
    pub fn rasas(&self) -> &'static [Rasa] {
        MODE_RASAS[self.degree()]
    }

    pub fn history(&self) -> &'static HistoricalUsage {
        &MODE_HISTORY[self.degree()]
    }

    pub fn chord_progressions(&self) -> &'static [&'static str; 4] {
        &MODE_PROGRESSIONS[self.degree()]
    }
}

impl fmt::Display for WesternMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for WesternMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        WesternMode::ALL
            .into_iter()
            .find(|mode| mode.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownMode {
                name: s.to_string(),
                available: WesternMode::ALL.map(|m| m.name()).join(", "),
            })
    }
}

/// Emotional character of a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ModeInfo {
    pub name: &'static str,
    pub primary: &'static str,
    pub character: &'static str,
    pub moods: [&'static str; 4],
    pub western_parallel: &'static str,
    /// 1-10
    pub energy_level: u8,
    /// 1-10
    pub emotional_intensity: u8,
}

const MODE_INFO: [ModeInfo; 7] = [
    ModeInfo {
        name: "Ionian",
        primary: "Joy",
        character: "Happy, stable, resolved",
        moods: ["Cheerful", "Confident", "Triumphant", "Straightforward"],
        western_parallel: "Major scale",
        energy_level: 8,
        emotional_intensity: 7,
    },
    ModeInfo {
        name: "Dorian",
        primary: "Serious",
        character: "Contemplative, balanced, sophisticated",
        moods: ["Melancholic", "Dignified", "Mysterious", "Introspective"],
        western_parallel: "Minor scale with raised 6th",
        energy_level: 5,
        emotional_intensity: 6,
    },
    ModeInfo {
        name: "Phrygian",
        primary: "Tension",
        character: "Exotic, dark, intense",
        moods: ["Mystical", "Exotic", "Tense", "Yearning"],
        western_parallel: "Spanish/Flamenco sound",
        energy_level: 6,
        emotional_intensity: 8,
    },
    ModeInfo {
        name: "Lydian",
        primary: "Wonder",
        character: "Bright, dreamlike, transcendent",
        moods: ["Magical", "Ethereal", "Floating", "Whimsical"],
        western_parallel: "Sci-fi/Fantasy sound",
        energy_level: 7,
        emotional_intensity: 6,
    },
    ModeInfo {
        name: "Mixolydian",
        primary: "Playful",
        character: "Bluesy, restless, adventurous",
        moods: ["Folky", "Rustic", "Unresolved", "Wandering"],
        western_parallel: "Blues/Rock sound",
        energy_level: 9,
        emotional_intensity: 8,
    },
    ModeInfo {
        name: "Aeolian",
        primary: "Sadness",
        character: "Melancholic, emotional, natural",
        moods: ["Sorrowful", "Brooding", "Reflective", "Serious"],
        western_parallel: "Natural minor scale",
        energy_level: 4,
        emotional_intensity: 9,
    },
    ModeInfo {
        name: "Locrian",
        primary: "Instability",
        character: "Anxious, unstable, dissonant",
        moods: ["Tense", "Uncertain", "Chaotic", "Disoriented"],
        western_parallel: "Diminished scale feel",
        energy_level: 7,
        emotional_intensity: 10,
    },
];

use WesternMode::*;

const MODE_TRANSITIONS: [&[WesternMode]; 7] = [
    &[Mixolydian, Lydian, Dorian],
    &[Aeolian, Phrygian, Mixolydian, Ionian],
    &[Aeolian, Dorian, Locrian],
    &[Ionian, Mixolydian, Dorian, Aeolian],
    &[Ionian, Dorian, Lydian, Aeolian],
    &[Dorian, Phrygian, Mixolydian, Lydian],
    &[Phrygian],
];

const MODE_INSTRUMENTS: [[&str; 4]; 7] = [
    ["Piano", "Trumpet", "Violin", "Orchestra"],
    ["Guitar", "Piano", "Saxophone", "Clarinet"],
    ["Flamenco guitar", "Oud", "Sitar", "Oboe"],
    ["Harp", "Vibraphone", "Flute", "Synthesizer"],
    ["Electric guitar", "Fiddle", "Bagpipes", "Banjo"],
    ["Cello", "Piano", "Violin", "Guitar"],
    ["Percussion", "Prepared piano", "Distorted guitar", "Synthesizer"],
];

const MODE_RASAS: [&[Rasa]; 7] = [
    &[Rasa::Sringara, Rasa::Haasya],
    &[Rasa::Adbutham, Rasa::Saantha],
    &[Rasa::Bhayaanaka, Rasa::Beebhatsa],
    &[Rasa::Adbutham, Rasa::Sringara],
    &[Rasa::Veera, Rasa::Haasya],
    &[Rasa::Karuna],
    &[Rasa::Raudra, Rasa::Bhayaanaka],
];

/// Where and when a mode has been in common use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoricalUsage {
    pub eras: &'static [&'static str],
    pub prominence: &'static str,
    pub contexts: &'static [&'static str],
}

const MODE_HISTORY: [HistoricalUsage; 7] = [
    HistoricalUsage {
        eras: &["Renaissance", "Classical", "Baroque", "Modern"],
        prominence: "Dominant from Common Practice Period onward",
        contexts: &["Hymns", "Anthems", "Triumphant pieces"],
    },
    HistoricalUsage {
        eras: &["Medieval", "Renaissance", "Folk", "Jazz", "Modern"],
        prominence: "Common in early church music, folk music",
        contexts: &["Folk songs", "Modal jazz", "Renaissance polyphony"],
    },
    HistoricalUsage {
        eras: &["Medieval", "Renaissance", "Flamenco", "Modern"],
        prominence: "Spanish music, metal, film scoring",
        contexts: &["Spanish music", "Metal", "Exotic film scoring"],
    },
    HistoricalUsage {
        eras: &["Medieval", "Jazz", "Film", "Modern"],
        prominence: "Popular in film music, jazz",
        contexts: &["Film scores", "Jazz improvisation", "Dream sequences"],
    },
    HistoricalUsage {
        eras: &["Medieval", "Folk", "Rock", "Jazz", "Modern"],
        prominence: "Common in Celtic folk, rock, blues",
        contexts: &["Folk music", "Blues", "Rock", "Jazz dominant chords"],
    },
    HistoricalUsage {
        eras: &["Baroque", "Romantic", "Pop", "Rock", "Modern"],
        prominence: "Dominant minor mode since Baroque era",
        contexts: &["Pop/Rock", "Film music", "Classical minor key works"],
    },
    HistoricalUsage {
        eras: &["Modern", "Contemporary", "Avant-garde"],
        prominence: "Rare, mostly theoretical until 20th century",
        contexts: &["Experimental music", "Modern jazz", "Metal"],
    },
];

const MODE_PROGRESSIONS: [[&str; 4]; 7] = [
    ["I - IV - V - I", "I - vi - IV - V", "I - V - vi - IV", "I - IV - I - V"],
    ["i - IV - i", "i - IV - VII", "i - IV - v - i", "i - VII - IV - i"],
    ["i - ♭II - i", "i - ♭II - ♭VII - i", "i - v - ♭II - i", "i - ♭II - ♭III - ♭II"],
    ["I - II - I", "I - II - vii - I", "I - II - V - I", "I - II - IV# - I"],
    ["I - ♭VII - I", "I - ♭VII - IV - I", "I - v - ♭VII - IV", "I - ♭VII - v - IV"],
    ["i - ♭VI - ♭VII - i", "i - ♭VII - ♭VI - i", "i - iv - ♭VII - i", "i - v - ♭VI - ♭VII"],
    ["i° - ♭II - ♭VII - i°", "i° - ♭V - ♭II - i°", "i° - ♭II - ♭III - i°", "i° - ♭VII - ♭VI - ♭VII"],
];

/// Interval pattern of a mode by name (case-insensitive).
pub fn get_mode_intervals(mode_name: &str) -> Result<[u8; 7]> {
    Ok(mode_name.parse::<WesternMode>()?.intervals())
}

pub fn get_mode_info(mode_name: &str) -> Result<&'static ModeInfo> {
    Ok(mode_name.parse::<WesternMode>()?.info())
}

impl WesternCalculator {
    /// Frequencies of every degree of `mode_name` starting on `root_note`.
    ///
    /// # Errors
    /// * `UnknownMode` - mode not one of Ionian..Locrian
    /// * `InvalidNote` / `InvalidParameter` - bad root or octave
    pub fn get_mode_frequencies(
        &self,
        mode_name: &str,
        root_note: &str,
        octave: i32,
    ) -> Result<FrequencyTable> {
        let mode: WesternMode = mode_name.parse()?;
        let root = Note::new(root_note, octave)?;
        tracing::trace!(%mode, %root, "building mode");
        self.build_scale(root, &mode.intervals())
    }
}

/// One step from a mode to a compatible one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeTransition {
    pub mode: WesternMode,
    pub primary_emotion: &'static str,
    pub character: &'static str,
    pub energy_transition: EnergyTransition,
    pub intensity_transition: IntensityTransition,
    /// `|target - source| / source`, in percent.
    pub energy_difference_percent: f64,
    pub energy_level: u8,
    pub emotional_intensity: u8,
    pub recommended_instruments: &'static [&'static str; 4],
}

/// Modes reachable in one step from `mode_name`, in table order.
pub fn get_compatible_modes(mode_name: &str) -> Result<Vec<ModeTransition>> {
    let mode: WesternMode = mode_name.parse()?;
    let source = mode.info();
    Ok(mode
        .transitions()
        .iter()
        .map(|&target| {
            let info = target.info();
            ModeTransition {
                mode: target,
                primary_emotion: info.primary,
                character: info.character,
                energy_transition: EnergyTransition::between(source.energy_level, info.energy_level),
                intensity_transition: IntensityTransition::between(
                    source.emotional_intensity,
                    info.emotional_intensity,
                ),
                energy_difference_percent: energy_difference_percent(
                    source.energy_level,
                    info.energy_level,
                ),
                energy_level: info.energy_level,
                emotional_intensity: info.emotional_intensity,
                recommended_instruments: target.instruments(),
            }
        })
        .collect())
}

/// Shortest chain of compatible modes from `start` to `end`.
///
/// `max_steps` counts modes in the path, both ends included. Returns
/// `Ok(None)` when no chain that short exists.
pub fn suggest_transition_path(
    start: &str,
    end: &str,
    max_steps: usize,
) -> Result<Option<Vec<WesternMode>>> {
    let start: WesternMode = start.parse()?;
    let end: WesternMode = end.parse()?;
    let path = transitions::shortest_path(start, end, max_steps, |m| m.transitions());
    tracing::trace!(%start, %end, max_steps, found = path.is_some(), "mode path search");
    Ok(path)
}

pub fn get_corresponding_rasa(mode_name: &str) -> Result<&'static [Rasa]> {
    Ok(mode_name.parse::<WesternMode>()?.rasas())
}

pub fn get_historical_usage(mode_name: &str) -> Result<&'static HistoricalUsage> {
    Ok(mode_name.parse::<WesternMode>()?.history())
}

pub fn get_common_chord_progressions(mode_name: &str) -> Result<&'static [&'static str; 4]> {
    Ok(mode_name.parse::<WesternMode>()?.chord_progressions())
}

/// A raga chosen to illustrate a mode, with its frequencies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExampleRaga {
    pub raga: &'static str,
    pub frequencies: FrequencyTable,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModeRagaComparison {
    pub mode: WesternMode,
    pub root: Note,
    pub corresponding_rasas: &'static [Rasa],
    pub emotional_character: &'static str,
    pub western_frequencies: FrequencyTable,
    /// Ragas of every corresponding rasa, first occurrence kept.
    pub related_ragas: Vec<&'static str>,
    /// First related raga that has a swara definition.
    pub example_raga: Option<ExampleRaga>,
}

/// Relates a mode to ragas through the rasas they share.
///
/// # Errors
/// * `UnknownMode` - mode not one of Ionian..Locrian
/// * `InvalidNote` / `InvalidParameter` - bad root or octave
pub fn compare_mode_to_raga(
    western: &WesternCalculator,
    indian: &IndianCalculator,
    mode_name: &str,
    root_note: &str,
    octave: i32,
) -> Result<ModeRagaComparison> {
    let mode: WesternMode = mode_name.parse()?;
    let root = Note::new(root_note, octave)?;
    let western_frequencies = western.build_scale(root, &mode.intervals())?;

    let mut related_ragas: Vec<&'static str> = Vec::new();
    for rasa in mode.rasas() {
        for &raga in rasa.info().ragas {
            if !related_ragas.contains(&raga) {
                related_ragas.push(raga);
            }
        }
    }

    let example_raga = match related_ragas.iter().find_map(|name| tables::raga(name)) {
        Some(definition) => Some(ExampleRaga {
            raga: definition.name,
            frequencies: indian.calculate_raga_frequencies(definition.name)?,
        }),
        None => None,
    };

    Ok(ModeRagaComparison {
        mode,
        root,
        corresponding_rasas: mode.rasas(),
        emotional_character: mode.info().character,
        western_frequencies,
        related_ragas,
        example_raga,
    })
}

//! # Western Tuning Module
//!
//! Equal-temperament frequency calculations relative to a configurable A4.
//!
//! ## Features
//! - Note name + octave to frequency (sharps and flats accepted)
//! - Scales built from interval patterns
//! - Chromatic solfège in any key
//! - Harmonic relationship detection against simple just ratios
//! - Frequency to nearest note, and cent deviation between two frequencies

use serde::ser::{Serialize, Serializer};
use std::fmt;

use crate::error::{Error, Result, check_reference};
use crate::tables::{self, HarmonicRatio, NOTE_NAMES};
use crate::FrequencyTable;

/// Standard concert pitch for A4.
pub const DEFAULT_REFERENCE_A4: f64 = 440.0;

/// Lowest and highest octave accepted. Octave 9 stops at G9 (MIDI 127).
pub const MIN_OCTAVE: i32 = -1;
pub const MAX_OCTAVE: i32 = 9;

/// Highest MIDI note number, G9.
pub const MAX_MIDI: i32 = 127;

/// Relative tolerance used by [`WesternCalculator::are_harmonic`].
pub const HARMONIC_TOLERANCE: f64 = 0.01;

const A4_MIDI: i32 = 69;

/// A pitch class in a specific octave, e.g. C#4.
///
/// Frequencies are never stored on the note; ask a [`WesternCalculator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Note {
    pitch_class: u8,
    octave: i32,
}

impl Note {
    /// Builds a note from a name ("C", "F#", "Bb") and an octave.
    ///
    /// # Errors
    /// * `InvalidNote` - name is not a recognised spelling
    /// * `InvalidParameter` - octave outside `MIN_OCTAVE..=MAX_OCTAVE`, or
    ///   a note above G9
    pub fn new(name: &str, octave: i32) -> Result<Self> {
        let pitch_class = tables::pitch_class(name).ok_or_else(|| Error::InvalidNote {
            name: name.to_string(),
            available: tables::accepted_note_names(),
        })?;
        check_octave(octave)?;
        let note = Self { pitch_class, octave };
        check_midi(note.midi_number())?;
        Ok(note)
    }

    /// Builds a note from its MIDI number (60 = C4, 69 = A4).
    ///
    /// # Errors
    /// * `InvalidParameter` - number outside `0..=MAX_MIDI`
    pub fn from_midi(midi: i32) -> Result<Self> {
        check_midi(midi)?;
        Ok(Self {
            pitch_class: midi.rem_euclid(12) as u8,
            octave: midi.div_euclid(12) - 1,
        })
    }

    /// Sharp spelling of the pitch class.
    pub fn name(&self) -> &'static str {
        NOTE_NAMES[usize::from(self.pitch_class)]
    }

    pub fn pitch_class(&self) -> u8 {
        self.pitch_class
    }

    pub fn octave(&self) -> i32 {
        self.octave
    }

    pub fn midi_number(&self) -> i32 {
        (self.octave + 1) * 12 + i32::from(self.pitch_class)
    }

    /// The note `semitones` above (or below, if negative) this one.
    pub fn transpose(&self, semitones: i32) -> Result<Self> {
        Self::from_midi(self.midi_number() + semitones)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.name(), self.octave)
    }
}

impl Serialize for Note {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn check_octave(octave: i32) -> Result<()> {
    if (MIN_OCTAVE..=MAX_OCTAVE).contains(&octave) {
        Ok(())
    } else {
        Err(Error::invalid_parameter(
            "octave",
            octave,
            format!("must be within {MIN_OCTAVE}..={MAX_OCTAVE}"),
        ))
    }
}

fn check_midi(midi: i32) -> Result<()> {
    if (0..=MAX_MIDI).contains(&midi) {
        Ok(())
    } else {
        Err(Error::invalid_parameter(
            "note",
            midi,
            format!("MIDI number must be within 0..={MAX_MIDI} (C-1..G9)"),
        ))
    }
}

/// Outcome of comparing two notes against the simple-ratio table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HarmonicRelation {
    /// Higher frequency divided by lower, so always >= 1.
    pub ratio: f64,
    /// The simple ratio matched, if any.
    pub interval: Option<HarmonicRatio>,
}

impl HarmonicRelation {
    pub fn is_harmonic(&self) -> bool {
        self.interval.is_some()
    }

    /// Human-readable description, e.g. "perfect fifth 3:2 (1.500)".
    pub fn description(&self) -> String {
        match self.interval {
            Some(r) => format!("{} {}:{} ({:.3})", r.name, r.numerator, r.denominator, r.value()),
            None => "no simple harmonic relation".to_string(),
        }
    }
}

/// Equal-temperament calculator holding only its A4 reference pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WesternCalculator {
    reference_a4: f64,
}

impl Default for WesternCalculator {
    fn default() -> Self {
        Self {
            reference_a4: DEFAULT_REFERENCE_A4,
        }
    }
}

impl WesternCalculator {
    /// # Errors
    /// * `InvalidParameter` - reference is non-finite or not positive
    pub fn new(reference_a4: f64) -> Result<Self> {
        let reference_a4 = check_reference("reference_a4", reference_a4)?;
        tracing::debug!(reference_a4, "western calculator ready");
        Ok(Self { reference_a4 })
    }

    pub fn reference_a4(&self) -> f64 {
        self.reference_a4
    }

    /// Frequency of an already-validated note.
    ///
    /// The formula for frequency in equal temperament is f = f0 * 2^(n/12),
    /// where n is the number of semitones away from A4.
    pub fn note_frequency(&self, note: Note) -> f64 {
        let distance = note.midi_number() - A4_MIDI;
        self.reference_a4 * 2.0_f64.powf(f64::from(distance) / 12.0)
    }

    /// Calculates the frequency of a note in a given octave.
    ///
    /// # Arguments
    /// * `note_name` - Note name (e.g., "C", "D#", "Bb")
    /// * `octave` - Octave number (4 holds middle C)
    ///
    /// # Returns
    /// * Frequency in Hz; `get_frequency("A", 4)` is the reference exactly
    pub fn get_frequency(&self, note_name: &str, octave: i32) -> Result<f64> {
        Ok(self.note_frequency(Note::new(note_name, octave)?))
    }

    /// Builds a scale from the named interval pattern.
    ///
    /// Labels use sharp spelling with the octave the degree falls in, so
    /// B major at octave 4 runs B4 .. A#5.
    ///
    /// # Errors
    /// * `UnknownScaleType` - pattern not in the scale table
    /// * `InvalidNote` / `InvalidParameter` - bad root or octave
    pub fn get_scale(&self, root_name: &str, octave: i32, scale_type: &str) -> Result<FrequencyTable> {
        let definition = tables::scale(scale_type).ok_or_else(|| Error::UnknownScaleType {
            name: scale_type.to_string(),
            available: tables::scale_names(),
        })?;
        let root = Note::new(root_name, octave)?;
        tracing::trace!(%root, scale_type, "building scale");
        self.build_scale(root, definition.offsets)
    }

    pub(crate) fn build_scale(&self, root: Note, offsets: &[u8]) -> Result<FrequencyTable> {
        let mut scale = FrequencyTable::with_capacity(offsets.len());
        for &offset in offsets {
            let note = root.transpose(i32::from(offset))?;
            scale.push(note.to_string(), self.note_frequency(note));
        }
        Ok(scale)
    }

    /// Frequency of a solfège syllable, with `key_root` sounding as Do in
    /// `octave`.
    ///
    /// # Errors
    /// * `InvalidSolfege` - syllable not recognised
    pub fn get_solfege_frequency(&self, solfege_name: &str, octave: i32, key_root: &str) -> Result<f64> {
        let offset = tables::solfege_offset(solfege_name)
            .ok_or_else(|| Error::InvalidSolfege(solfege_name.to_string()))?;
        let note = Note::new(key_root, octave)?.transpose(i32::from(offset))?;
        Ok(self.note_frequency(note))
    }

    /// Tests whether two notes stand in a simple frequency ratio.
    ///
    /// The ratio is taken as higher over lower and matched against the
    /// harmonic ratio table within [`HARMONIC_TOLERANCE`] (relative).
    pub fn are_harmonic(
        &self,
        note_a: &str,
        octave_a: i32,
        note_b: &str,
        octave_b: i32,
    ) -> Result<HarmonicRelation> {
        let freq_a = self.get_frequency(note_a, octave_a)?;
        let freq_b = self.get_frequency(note_b, octave_b)?;
        let ratio = if freq_b >= freq_a { freq_b / freq_a } else { freq_a / freq_b };

        let interval = tables::HARMONIC_RATIOS
            .iter()
            .find(|h| (ratio / h.value() - 1.0).abs() < HARMONIC_TOLERANCE)
            .copied();

        Ok(HarmonicRelation { ratio, interval })
    }

    /// Finds the closest equal-tempered note to a given frequency.
    ///
    /// This is the inverse of [`note_frequency`](Self::note_frequency): the
    /// frequency of any valid note maps back to that same note.
    ///
    /// # Returns
    /// * `(note, target_frequency)` - Closest note and its exact frequency
    pub fn nearest_note(&self, frequency: f64) -> Result<(Note, f64)> {
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(Error::invalid_parameter(
                "frequency",
                frequency,
                "must be a finite positive number of Hz",
            ));
        }
        let semitones = 12.0 * (frequency / self.reference_a4).log2();
        let midi = A4_MIDI + semitones.round() as i32;
        let note = Note::from_midi(midi)?;
        Ok((note, self.note_frequency(note)))
    }
}

/// Calculates the deviation from a target frequency in cents.
///
/// 100 cents = 1 semitone, 1200 cents = 1 octave. Positive values are sharp,
/// negative values flat.
pub fn cents_deviation(frequency: f64, target_frequency: f64) -> f64 {
    1200.0 * (frequency / target_frequency).log2()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn approx(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn reference_note_is_exact() {
        let wm = WesternCalculator::default();
        assert_eq!(wm.get_frequency("A", 4).unwrap(), 440.0);

        let baroque = WesternCalculator::new(415.0).unwrap();
        assert_eq!(baroque.get_frequency("A", 4).unwrap(), 415.0);
    }

    #[test]
    fn known_frequencies() {
        let wm = WesternCalculator::default();
        assert!(approx(wm.get_frequency("C", 4).unwrap(), 261.63, 0.01));
        assert!(approx(wm.get_frequency("F#", 4).unwrap(), 369.99, 0.01));
        assert!(approx(wm.get_frequency("Bb", 4).unwrap(), 466.16, 0.01));
        assert_eq!(wm.get_frequency("Db", 4).unwrap(), wm.get_frequency("C#", 4).unwrap());
    }

    #[test]
    fn unknown_note_is_rejected() {
        let wm = WesternCalculator::default();
        assert!(matches!(wm.get_frequency("H", 4), Err(Error::InvalidNote { .. })));
        assert!(matches!(wm.get_frequency("", 4), Err(Error::InvalidNote { .. })));
    }

    #[test]
    fn octave_out_of_range_is_rejected() {
        let wm = WesternCalculator::default();
        assert!(matches!(
            wm.get_frequency("C", 10),
            Err(Error::InvalidParameter { name: "octave", .. })
        ));
        assert!(wm.get_frequency("C", -2).is_err());
        assert!(wm.get_frequency("C", -1).is_ok());
    }

    #[test]
    fn octave_nine_stops_at_g9() {
        let wm = WesternCalculator::default();
        assert!(approx(wm.get_frequency("G", 9).unwrap(), 12543.85, 0.01));
        for name in ["G#", "Ab", "A", "A#", "B"] {
            assert!(matches!(
                wm.get_frequency(name, 9),
                Err(Error::InvalidParameter { name: "note", .. })
            ));
        }
        assert_eq!(Note::from_midi(MAX_MIDI).unwrap().to_string(), "G9");
        assert!(Note::from_midi(MAX_MIDI + 1).is_err());
        assert!(Note::new("G", 9).unwrap().transpose(1).is_err());
        // Scales rooted high run out of range instead of wrapping.
        assert!(wm.get_scale("E", 9, "major").is_err());
    }

    #[test]
    fn non_finite_reference_is_rejected() {
        assert!(WesternCalculator::new(f64::NAN).is_err());
        assert!(WesternCalculator::new(0.0).is_err());
    }

    #[test]
    fn c_major_scale() {
        let wm = WesternCalculator::default();
        let scale = wm.get_scale("C", 4, "major").unwrap();
        let labels: Vec<_> = scale.labels().collect();
        assert_eq!(labels, ["C4", "D4", "E4", "F4", "G4", "A4", "B4"]);
        assert!(approx(scale.get("G4").unwrap(), 392.0, 0.01));
    }

    #[test]
    fn scale_crossing_the_octave_advances_labels() {
        let wm = WesternCalculator::default();
        let scale = wm.get_scale("B", 4, "major").unwrap();
        let labels: Vec<_> = scale.labels().collect();
        assert_eq!(labels, ["B4", "C#5", "D#5", "E5", "F#5", "G#5", "A#5"]);
    }

    #[test]
    fn flat_root_builds_the_same_scale() {
        let wm = WesternCalculator::default();
        assert_eq!(
            wm.get_scale("Bb", 3, "minor").unwrap(),
            wm.get_scale("A#", 3, "minor").unwrap()
        );
    }

    #[test]
    fn scale_lengths() {
        let wm = WesternCalculator::default();
        assert_eq!(wm.get_scale("C", 4, "chromatic").unwrap().len(), 12);
        assert_eq!(wm.get_scale("A", 4, "blues").unwrap().len(), 6);
        assert_eq!(wm.get_scale("C", 4, "pentatonic_major").unwrap().len(), 5);
        assert!(matches!(
            wm.get_scale("C", 4, "lydian_dominant"),
            Err(Error::UnknownScaleType { .. })
        ));
    }

    #[test]
    fn solfege_in_different_keys() {
        let wm = WesternCalculator::default();
        assert!(approx(wm.get_solfege_frequency("Do", 4, "C").unwrap(), 261.63, 0.01));
        assert!(approx(wm.get_solfege_frequency("Sol", 4, "C").unwrap(), 392.0, 0.01));
        assert!(approx(wm.get_solfege_frequency("Do", 4, "G").unwrap(), 392.0, 0.01));
        // Ti in A crosses into the next octave: G#5.
        assert_eq!(
            wm.get_solfege_frequency("Ti", 4, "A").unwrap(),
            wm.get_frequency("G#", 5).unwrap()
        );
        assert_eq!(
            wm.get_solfege_frequency("Te", 4, "C").unwrap(),
            wm.get_solfege_frequency("Li", 4, "C").unwrap()
        );
        assert!(matches!(
            wm.get_solfege_frequency("Xa", 4, "C"),
            Err(Error::InvalidSolfege(_))
        ));
    }

    #[test]
    fn harmonic_relationships() {
        let wm = WesternCalculator::default();

        let fifth = wm.are_harmonic("C", 4, "G", 4).unwrap();
        assert!(fifth.is_harmonic());
        assert!(fifth.description().contains("3:2"));

        let octave = wm.are_harmonic("C", 4, "C", 5).unwrap();
        assert!(octave.description().contains("2:1"));

        let unison = wm.are_harmonic("E", 3, "E", 3).unwrap();
        assert_eq!(unison.ratio, 1.0);
        assert!(unison.description().contains("1:1"));

        // Order of arguments does not matter.
        let reversed = wm.are_harmonic("G", 4, "C", 4).unwrap();
        assert_eq!(reversed.interval, fifth.interval);

        let tritone = wm.are_harmonic("C", 4, "F#", 4).unwrap();
        assert!(!tritone.is_harmonic());
        assert_eq!(tritone.description(), "no simple harmonic relation");
    }

    #[test]
    fn nearest_note_and_cents() {
        let wm = WesternCalculator::default();
        let (note, target) = wm.nearest_note(445.0).unwrap();
        assert_eq!(note.to_string(), "A4");
        assert_eq!(target, 440.0);
        assert!(cents_deviation(445.0, target) > 0.0);
        assert!(approx(cents_deviation(880.0, 440.0), 1200.0, 1e-9));
        assert!(wm.nearest_note(0.0).is_err());
        assert!(wm.nearest_note(f64::INFINITY).is_err());
    }

    #[test]
    fn note_midi_numbers() {
        assert_eq!(Note::new("C", 4).unwrap().midi_number(), 60);
        assert_eq!(Note::new("A", 4).unwrap().midi_number(), 69);
        assert_eq!(Note::from_midi(61).unwrap().to_string(), "C#4");
        assert_eq!(Note::from_midi(0).unwrap().to_string(), "C-1");
        assert!(Note::from_midi(-1).is_err());
    }
}

//! Report types printed by the subcommands.
//!
//! Each report is `Serialize` for `--json` and `Display` for the plain table.
//! Frequencies are shown to two decimals; the JSON keeps full precision.

use serde::Serialize;
use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

use svara_core::compare::{RatioComparison, SwaraMapping};
use svara_core::modes::{ExampleRaga, HistoricalUsage, ModeInfo, ModeTransition};
use svara_core::navarasa::{RagaScaleComparison, RasaInfo, RasaTransition, WesternEquivalent};
use svara_core::{
    CamelotCode, CompatibleKey, FrequencyTable, KeyMode, Note, Rasa, TuningProfile, WesternMode,
};

/// Prints a report to stdout as JSON or as text.
pub(crate) fn emit<T: Serialize + fmt::Display>(report: &T, json: bool) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    if json {
        serde_json::to_writer_pretty(&mut stdout, report)?;
        writeln!(stdout)?;
    } else {
        write!(stdout, "{report}")?;
    }
    Ok(())
}

fn write_table(f: &mut fmt::Formatter<'_>, table: &FrequencyTable) -> fmt::Result {
    let width = table.labels().map(str::len).max().unwrap_or(0);
    for (label, frequency) in table.iter() {
        writeln!(f, "  {label:<width$}  {frequency:>9.2} Hz")?;
    }
    Ok(())
}

fn write_compatible(f: &mut fmt::Formatter<'_>, keys: &[CompatibleKey]) -> fmt::Result {
    writeln!(f, "Compatible keys:")?;
    for k in keys {
        writeln!(f, "  {:<4} {:<4} {}", k.code.to_string(), k.key, k.relationship.description())?;
    }
    Ok(())
}

fn join<T: fmt::Display>(items: &[T]) -> String {
    items.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

fn write_mapping(f: &mut fmt::Formatter<'_>, mapping: &[SwaraMapping]) -> fmt::Result {
    for m in mapping {
        let label = format!("{} {}", m.swara, m.variant);
        writeln!(
            f,
            "  {label:<12} {:>9.2} Hz  ~ {:<4} {:>9.2} Hz  {:+7.2} cents",
            m.frequency,
            m.nearest_note.to_string(),
            m.note_frequency,
            m.cents_deviation
        )?;
    }
    Ok(())
}

/// Outcome of a transition path search between two moods.
#[derive(Debug, Serialize)]
pub(crate) struct PathReport<T> {
    pub target: T,
    pub max_steps: usize,
    /// `None` when no path fits in `max_steps`.
    pub path: Option<Vec<T>>,
}

impl<T: fmt::Display> fmt::Display for PathReport<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => {
                let steps: Vec<_> = path.iter().map(ToString::to_string).collect();
                writeln!(f, "Path to {}: {}", self.target, steps.join(" -> "))
            }
            None => writeln!(f, "No path to {} within {} steps", self.target, self.max_steps),
        }
    }
}

/// A single labelled frequency (solfege, swara).
#[derive(Debug, Serialize)]
pub(crate) struct FrequencyReport {
    pub label: String,
    pub frequency: f64,
}

impl fmt::Display for FrequencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {:.2} Hz", self.label, self.frequency)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct HarmonicNeighbour {
    pub note: Note,
    pub frequency: f64,
    pub interval: &'static str,
    pub ratio: f64,
}

#[derive(Debug, Serialize)]
pub(crate) struct NoteReport {
    pub note: Note,
    pub frequency: f64,
    pub reference_a4: f64,
    pub harmonics: Vec<HarmonicNeighbour>,
}

impl fmt::Display for NoteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {:.2} Hz (A4 = {} Hz)", self.note, self.frequency, self.reference_a4)?;
        if self.harmonics.is_empty() {
            return Ok(());
        }
        writeln!(f, "Harmonic neighbours:")?;
        for h in &self.harmonics {
            writeln!(
                f,
                "  {:<4} {:>9.2} Hz  {} ({:.3})",
                h.note.to_string(),
                h.frequency,
                h.interval,
                h.ratio
            )?;
        }
        Ok(())
    }
}

/// A titled frequency table (scale, raga, shrutis).
#[derive(Debug, Serialize)]
pub(crate) struct TableReport {
    pub title: String,
    pub frequencies: FrequencyTable,
}

impl fmt::Display for TableReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        write_table(f, &self.frequencies)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CamelotReport {
    pub code: CamelotCode,
    pub key: String,
    pub mode: KeyMode,
    pub compatible_keys: Vec<CompatibleKey>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequencies: Option<FrequencyTable>,
}

impl fmt::Display for CamelotReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} = {} {}", self.code, self.key, self.mode)?;
        write_compatible(f, &self.compatible_keys)?;
        if let Some(frequencies) = &self.frequencies {
            writeln!(f, "Scale:")?;
            write_table(f, frequencies)?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ModeReport {
    pub mode: WesternMode,
    pub info: &'static ModeInfo,
    pub intervals: [u8; 7],
    pub frequencies: FrequencyTable,
    pub compatible_modes: Vec<ModeTransition>,
    pub history: &'static HistoricalUsage,
    pub chord_progressions: &'static [&'static str; 4],
    pub rasas: &'static [Rasa],
    pub related_ragas: Vec<&'static str>,
    pub example_raga: Option<ExampleRaga>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<PathReport<WesternMode>>,
}

impl fmt::Display for ModeReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = self.info;
        writeln!(f, "{} ({}): {}", self.mode, info.primary, info.character)?;
        writeln!(f, "Moods: {}", info.moods.join(", "))?;
        writeln!(f, "Sounds like: {}", info.western_parallel)?;
        writeln!(
            f,
            "Energy {}/10, intensity {}/10",
            info.energy_level, info.emotional_intensity
        )?;
        write_table(f, &self.frequencies)?;

        writeln!(f, "Compatible modes:")?;
        for t in &self.compatible_modes {
            writeln!(
                f,
                "  {:<10} {:<11} {}, {} ({:.1}%)",
                t.mode.to_string(),
                t.primary_emotion,
                t.energy_transition.label(),
                t.intensity_transition.label(),
                t.energy_difference_percent
            )?;
        }
        writeln!(f, "History: {} ({})", self.history.prominence, self.history.eras.join(", "))?;
        writeln!(f, "Progressions: {}", self.chord_progressions.join(" | "))?;
        writeln!(f, "Rasas: {}", join(self.rasas))?;
        writeln!(f, "Related ragas: {}", self.related_ragas.join(", "))?;
        if let Some(example) = &self.example_raga {
            writeln!(f, "Example raga {}:", example.raga)?;
            write_table(f, &example.frequencies)?;
        }
        if let Some(transition) = &self.transition {
            write!(f, "{transition}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RasaReport {
    pub rasa: Rasa,
    pub info: &'static RasaInfo,
    pub compatible_rasas: Vec<RasaTransition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transition: Option<PathReport<Rasa>>,
}

impl fmt::Display for RasaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let info = self.info;
        writeln!(f, "{} ({}): {}", self.rasa, info.english, info.mood)?;
        writeln!(f, "Time: {}, colour: {}", info.time, info.color)?;
        writeln!(f, "Energy {}/10", info.energy_level)?;
        writeln!(f, "Ragas: {}", info.ragas.join(", "))?;
        writeln!(f, "Western feel: {}", info.western_correlations.join(", "))?;
        writeln!(f, "Compatible rasas:")?;
        for t in &self.compatible_rasas {
            writeln!(
                f,
                "  {:<10} {:<20} {} ({:.1}%)",
                t.rasa.to_string(),
                t.description,
                t.transition.label(),
                t.energy_difference_percent
            )?;
        }
        if let Some(transition) = &self.transition {
            write!(f, "{transition}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct RagaWesternReport {
    pub equivalent: WesternEquivalent,
    pub comparison: RagaScaleComparison,
}

impl fmt::Display for RagaWesternReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let e = &self.equivalent;
        writeln!(
            f,
            "Raga {}: thaat {} ~ {} (suggested key {}, {})",
            e.raga, e.thaat, e.scale_type, e.suggested_key, e.camelot_notation
        )?;
        writeln!(f, "Rasas: {}", join(&e.rasas))?;
        writeln!(f, "Western feel: {}", e.western_correlations.join(", "))?;
        write_compatible(f, &e.compatible_keys)?;

        let c = &self.comparison;
        writeln!(f, "Raga {}:", c.raga)?;
        write_table(f, &c.raga_frequencies)?;
        writeln!(f, "{} ({}):", c.western_scale, c.camelot_notation)?;
        write_table(f, &c.western_frequencies)?;
        writeln!(f, "Nearest tempered notes:")?;
        write_mapping(f, &c.nearest_notes)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct CompareReport {
    pub raga: &'static str,
    pub reference_sa: f64,
    pub reference_a4: f64,
    pub mapping: Vec<SwaraMapping>,
    pub perfect_fifth: RatioComparison,
    pub major_third: RatioComparison,
}

fn write_comparison(f: &mut fmt::Formatter<'_>, name: &str, c: &RatioComparison) -> fmt::Result {
    writeln!(
        f,
        "  {name:<13} western {:.6}  indian {:.6}  diff {:.6} ({:.4}%, {:+.2} cents)",
        c.western_ratio,
        c.indian_ratio,
        c.absolute_difference,
        c.relative_difference * 100.0,
        c.cents_difference
    )
}

impl fmt::Display for CompareReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Raga {} (Sa = {} Hz) against equal temperament (A4 = {} Hz)",
            self.raga, self.reference_sa, self.reference_a4
        )?;
        write_mapping(f, &self.mapping)?;
        writeln!(f, "Intervals:")?;
        write_comparison(f, "perfect fifth", &self.perfect_fifth)?;
        write_comparison(f, "major third", &self.major_third)
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ProfileReport {
    pub path: PathBuf,
    pub profile: TuningProfile,
}

impl fmt::Display for ProfileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Wrote {} (A4 = {} Hz, Sa = {} Hz)",
            self.path.display(),
            self.profile.reference_a4,
            self.profile.reference_sa
        )
    }
}

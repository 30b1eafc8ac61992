//! Subcommand handlers. Each builds a report from the core calculators and
//! leaves printing to `report::emit`.

use anyhow::{Context, Result};
use std::path::Path;

use svara_core::camelot::{get_camelot_notation, get_compatible_keys, get_key_from_camelot};
use svara_core::compare::{compare_interval, map_raga_to_western};
use svara_core::modes::{self, compare_mode_to_raga, get_compatible_modes, get_mode_info};
use svara_core::navarasa::{self, compare_raga_to_western_scale, get_compatible_rasas, get_western_equivalent};
use svara_core::profile::{load_profile, save_profile};
use svara_core::tables::NOTE_NAMES;
use svara_core::western::{MAX_OCTAVE, MIN_OCTAVE};
use svara_core::{
    IndianCalculator, KeyMode, Note, Rasa, Swara, TuningProfile, Variant, WesternCalculator,
    WesternMode,
};

use crate::report::{
    CamelotReport, CompareReport, FrequencyReport, HarmonicNeighbour, ModeReport, NoteReport,
    PathReport, ProfileReport, RagaWesternReport, RasaReport, TableReport,
};

/// Reference pitches resolved from `--profile` and `--reference`.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Tuning {
    profile: TuningProfile,
    reference: Option<f64>,
}

impl Tuning {
    pub(crate) fn resolve(profile_path: Option<&Path>, reference: Option<f64>) -> Result<Self> {
        let profile = match profile_path {
            Some(path) => load_profile(path)
                .with_context(|| format!("failed to load tuning profile {}", path.display()))?,
            None => TuningProfile::default(),
        };
        tracing::debug!(?profile, ?reference, "resolved tuning");
        Ok(Self { profile, reference })
    }

    pub(crate) fn western(&self) -> Result<WesternCalculator> {
        let a4 = self.reference.unwrap_or(self.profile.reference_a4);
        WesternCalculator::new(a4).context("invalid Western reference pitch")
    }

    pub(crate) fn indian(&self) -> Result<IndianCalculator> {
        let sa = self.reference.unwrap_or(self.profile.reference_sa);
        IndianCalculator::new(sa).context("invalid Indian reference pitch")
    }

    /// Comparisons keep the profile's A4; `--reference` moves Sa.
    fn profile_western(&self) -> Result<WesternCalculator> {
        Ok(self.profile.western()?)
    }

    /// Mode reports keep the profile's Sa; `--reference` moves A4.
    pub(crate) fn profile_indian(&self) -> Result<IndianCalculator> {
        Ok(self.profile.indian()?)
    }
}

fn key_shorthand(key: &str, mode: KeyMode) -> String {
    match mode {
        KeyMode::Major => key.to_string(),
        KeyMode::Minor => format!("{key}m"),
    }
}

pub(crate) fn western_note(calc: &WesternCalculator, note: &str, octave: i32) -> Result<NoteReport> {
    let root = Note::new(note, octave)?;
    let mut harmonics = Vec::new();
    for other_octave in (octave - 1)..=(octave + 1) {
        if !(MIN_OCTAVE..=MAX_OCTAVE).contains(&other_octave) {
            continue;
        }
        for name in NOTE_NAMES {
            // Octave 9 ends at G9.
            let Ok(other) = Note::new(name, other_octave) else {
                continue;
            };
            if other == root {
                continue;
            }
            let relation = calc.are_harmonic(note, octave, name, other_octave)?;
            if let Some(interval) = relation.interval {
                harmonics.push(HarmonicNeighbour {
                    note: other,
                    frequency: calc.note_frequency(other),
                    interval: interval.name,
                    ratio: relation.ratio,
                });
            }
        }
    }
    Ok(NoteReport {
        note: root,
        frequency: calc.note_frequency(root),
        reference_a4: calc.reference_a4(),
        harmonics,
    })
}

pub(crate) fn western_scale(
    calc: &WesternCalculator,
    root: &str,
    octave: i32,
    scale_type: &str,
) -> Result<TableReport> {
    Ok(TableReport {
        title: format!("{} {scale_type}", Note::new(root, octave)?),
        frequencies: calc.get_scale(root, octave, scale_type)?,
    })
}

pub(crate) fn solfege(calc: &WesternCalculator, syllable: &str, octave: i32, key: &str) -> Result<FrequencyReport> {
    Ok(FrequencyReport {
        label: format!("{syllable} in {key}"),
        frequency: calc.get_solfege_frequency(syllable, octave, key)?,
    })
}

pub(crate) struct CamelotQuery<'a> {
    pub camelot: Option<&'a str>,
    pub key: Option<&'a str>,
    pub scale_type: &'a str,
    pub octave: i32,
    pub with_frequencies: bool,
}

pub(crate) fn camelot(calc: &WesternCalculator, query: CamelotQuery<'_>) -> Result<CamelotReport> {
    let (tonic, mode) = match (query.camelot, query.key) {
        (Some(code), _) => get_key_from_camelot(code)?,
        (None, Some(key)) => {
            let code = get_camelot_notation(key, query.scale_type)?;
            get_key_from_camelot(&code.to_string())?
        }
        (None, None) => anyhow::bail!("either --camelot or --key is required"),
    };
    let key = key_shorthand(tonic, mode);

    if query.with_frequencies {
        let scale = calc.get_scale_with_camelot(&key, query.octave, &mode.to_string())?;
        return Ok(CamelotReport {
            code: scale.camelot_notation,
            key,
            mode,
            compatible_keys: scale.compatible_keys,
            frequencies: Some(scale.frequencies),
        });
    }

    let code = get_camelot_notation(tonic, &mode.to_string())?;
    Ok(CamelotReport {
        code,
        key,
        mode,
        compatible_keys: get_compatible_keys(&code.to_string())?,
        frequencies: None,
    })
}

pub(crate) fn indian_swara(calc: &IndianCalculator, swara: &str, variant: Option<&str>) -> Result<FrequencyReport> {
    let (swara, variant) = IndianCalculator::parse_swara_variant(swara, variant)?;
    Ok(FrequencyReport {
        label: format!("{swara} {variant}"),
        frequency: calc.swara_frequency(swara, variant)?,
    })
}

pub(crate) fn indian_raga(calc: &IndianCalculator, raga: &str) -> Result<TableReport> {
    let definition = calc.get_raga(raga)?;
    Ok(TableReport {
        title: format!("Raga {} (Sa = {} Hz)", definition.name, calc.reference_sa()),
        frequencies: calc.calculate_raga_frequencies(raga)?,
    })
}

pub(crate) fn shrutis(calc: &IndianCalculator) -> TableReport {
    TableReport {
        title: format!("22 shrutis (Sa = {} Hz)", calc.reference_sa()),
        frequencies: calc.get_all_shrutis(),
    }
}

pub(crate) struct ModeQuery<'a> {
    pub mode: &'a str,
    pub root: &'a str,
    pub octave: i32,
    pub to: Option<&'a str>,
    pub max_steps: usize,
}

pub(crate) fn mode(
    western: &WesternCalculator,
    indian: &IndianCalculator,
    query: ModeQuery<'_>,
) -> Result<ModeReport> {
    let comparison = compare_mode_to_raga(western, indian, query.mode, query.root, query.octave)?;
    let transition = match query.to {
        Some(target) => Some(PathReport {
            target: target.parse::<WesternMode>()?,
            max_steps: query.max_steps,
            path: modes::suggest_transition_path(query.mode, target, query.max_steps)?,
        }),
        None => None,
    };
    Ok(ModeReport {
        mode: comparison.mode,
        info: get_mode_info(query.mode)?,
        intervals: comparison.mode.intervals(),
        frequencies: comparison.western_frequencies,
        compatible_modes: get_compatible_modes(query.mode)?,
        history: comparison.mode.history(),
        chord_progressions: comparison.mode.chord_progressions(),
        rasas: comparison.corresponding_rasas,
        related_ragas: comparison.related_ragas,
        example_raga: comparison.example_raga,
        transition,
    })
}

pub(crate) fn rasa(name: &str, to: Option<&str>, max_steps: usize) -> Result<RasaReport> {
    let parsed: Rasa = name.parse()?;
    let transition = match to {
        Some(target) => Some(PathReport {
            target: target.parse::<Rasa>()?,
            max_steps,
            path: navarasa::suggest_transition_path(name, target, max_steps)?,
        }),
        None => None,
    };
    Ok(RasaReport {
        rasa: parsed,
        info: parsed.info(),
        compatible_rasas: get_compatible_rasas(name)?,
        transition,
    })
}

pub(crate) fn raga_western(tuning: &Tuning, raga: &str, root: &str, octave: i32) -> Result<RagaWesternReport> {
    let western = tuning.profile_western()?;
    let indian = tuning.indian()?;
    Ok(RagaWesternReport {
        equivalent: get_western_equivalent(raga)?,
        comparison: compare_raga_to_western_scale(&indian, &western, raga, root, octave)?,
    })
}

pub(crate) fn compare(tuning: &Tuning, raga: &str) -> Result<CompareReport> {
    let western = tuning.profile_western()?;
    let indian = tuning.indian()?;
    let definition = indian.get_raga(raga)?;
    Ok(CompareReport {
        raga: definition.name,
        reference_sa: indian.reference_sa(),
        reference_a4: western.reference_a4(),
        mapping: map_raga_to_western(&indian, &western, raga)?,
        perfect_fifth: compare_interval(&western, ("C", 4), ("G", 4), &indian, Swara::Pa, Variant::Shuddha)?,
        major_third: compare_interval(&western, ("C", 4), ("E", 4), &indian, Swara::Ga, Variant::Shuddha)?,
    })
}

pub(crate) fn profile_init(path: &Path, a4: f64, sa: f64) -> Result<ProfileReport> {
    let profile = TuningProfile {
        reference_a4: a4,
        reference_sa: sa,
    };
    save_profile(&profile, path)
        .with_context(|| format!("failed to write tuning profile {}", path.display()))?;
    Ok(ProfileReport {
        path: path.to_path_buf(),
        profile,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn default_tuning() -> Tuning {
        Tuning::resolve(None, None).unwrap()
    }

    #[test]
    fn reference_override_applies_per_system() {
        let tuning = Tuning::resolve(None, Some(432.0)).unwrap();
        assert_eq!(tuning.western().unwrap().reference_a4(), 432.0);
        assert_eq!(tuning.indian().unwrap().reference_sa(), 432.0);
        assert!(Tuning::resolve(None, Some(-1.0)).unwrap().western().is_err());
    }

    #[test]
    fn note_report_lists_consonant_neighbours() {
        let report = western_note(&WesternCalculator::default(), "C", 4).unwrap();
        assert!((report.frequency - 261.63).abs() < 0.01);

        let names: Vec<_> = report.harmonics.iter().map(|h| (h.note.to_string(), h.interval)).collect();
        assert!(names.contains(&("G4".to_string(), "perfect fifth")));
        assert!(names.contains(&("C5".to_string(), "octave")));
        assert!(names.contains(&("C3".to_string(), "octave")));
        assert!(!names.iter().any(|(n, _)| n == "F#4" || n == "C4"));
    }

    #[test]
    fn note_report_stays_in_range() {
        let report = western_note(&WesternCalculator::default(), "C", -1).unwrap();
        assert!(report.harmonics.iter().all(|h| h.note.octave() >= -1));
        assert!(western_note(&WesternCalculator::default(), "H", 4).is_err());
    }

    #[test]
    fn camelot_by_code_and_by_key_agree() {
        let calc = WesternCalculator::default();
        let by_code = camelot(
            &calc,
            CamelotQuery {
                camelot: Some("5A"),
                key: None,
                scale_type: "major",
                octave: 4,
                with_frequencies: false,
            },
        )
        .unwrap();
        assert_eq!(by_code.key, "Am");
        assert_eq!(by_code.mode, KeyMode::Minor);

        let by_key = camelot(
            &calc,
            CamelotQuery {
                camelot: None,
                key: Some("A"),
                scale_type: "minor",
                octave: 4,
                with_frequencies: true,
            },
        )
        .unwrap();
        assert_eq!(by_key.code, by_code.code);
        assert_eq!(by_key.compatible_keys, by_code.compatible_keys);
        let scale = by_key.frequencies.unwrap();
        assert_eq!(scale.get("A4"), Some(440.0));
        assert_eq!(scale.len(), 7);
    }

    #[test]
    fn camelot_rejects_bad_code() {
        let result = camelot(
            &WesternCalculator::default(),
            CamelotQuery {
                camelot: Some("13B"),
                key: None,
                scale_type: "major",
                octave: 4,
                with_frequencies: false,
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn swara_label_defaults_to_shuddha() {
        let report = indian_swara(&IndianCalculator::default(), "pa", None).unwrap();
        assert_eq!(report.label, "Pa shuddha");
        assert_eq!(report.frequency, 330.0);
    }

    #[test]
    fn compare_uses_profile_a4() {
        let tuning = Tuning::resolve(None, Some(240.0)).unwrap();
        let report = compare(&tuning, "Bhairavi").unwrap();
        assert_eq!(report.reference_a4, 440.0);
        assert_eq!(report.reference_sa, 240.0);
        assert_eq!(report.mapping.len(), 7);
        assert_eq!(report.perfect_fifth.indian_ratio, 1.5);
        assert_eq!(report.major_third.indian_ratio, 1.25);
    }

    #[test]
    fn note_report_near_the_top_of_the_range() {
        let report = western_note(&WesternCalculator::default(), "G", 8).unwrap();
        let names: Vec<_> = report.harmonics.iter().map(|h| h.note.to_string()).collect();
        assert!(names.contains(&"G9".to_string()));
        assert!(report.harmonics.iter().all(|h| h.note.midi_number() <= 127));
        assert!(western_note(&WesternCalculator::default(), "A", 9).is_err());
    }

    #[test]
    fn swara_label_uses_canonical_variant() {
        let calc = IndianCalculator::default();
        let report = indian_swara(&calc, "re", Some("KOMAL")).unwrap();
        assert_eq!(report.label, "Re komal");
        assert_eq!(report.frequency, calc.swara_frequency(Swara::Re, Variant::Komal).unwrap());
        assert_eq!(indian_swara(&calc, "MA", Some("Tivra")).unwrap().label, "Ma tivra");
        assert!(indian_swara(&calc, "Sa", Some("komal")).is_err());
    }

    fn mode_query<'a>(mode: &'a str, root: &'a str, to: Option<&'a str>) -> ModeQuery<'a> {
        ModeQuery {
            mode,
            root,
            octave: 4,
            to,
            max_steps: 3,
        }
    }

    #[test]
    fn mode_report() {
        let tuning = default_tuning();
        let western = tuning.western().unwrap();
        let indian = tuning.profile_indian().unwrap();
        let report = mode(&western, &indian, mode_query("lydian", "F", None)).unwrap();
        assert_eq!(report.mode, WesternMode::Lydian);
        assert_eq!(report.info.primary, "Wonder");
        assert!(report.frequencies.contains("B4"));
        assert_eq!(report.intervals, [0, 2, 4, 6, 7, 9, 11]);
        assert_eq!(report.compatible_modes.len(), 4);
        assert_eq!(report.rasas, [Rasa::Adbutham, Rasa::Sringara]);
        assert_eq!(report.example_raga.as_ref().unwrap().raga, "Yaman");
        assert!(report.transition.is_none());

        let text = report.to_string();
        assert!(text.contains("Compatible modes:"));
        assert!(text.contains("Example raga Yaman:"));
    }

    #[test]
    fn mode_report_with_path() {
        let tuning = default_tuning();
        let western = tuning.western().unwrap();
        let indian = tuning.profile_indian().unwrap();

        let report = mode(&western, &indian, mode_query("Ionian", "C", Some("aeolian"))).unwrap();
        let transition = report.transition.unwrap();
        assert_eq!(transition.target, WesternMode::Aeolian);
        assert_eq!(
            transition.path,
            Some(vec![WesternMode::Ionian, WesternMode::Mixolydian, WesternMode::Aeolian])
        );

        let report = mode(&western, &indian, mode_query("Locrian", "B", Some("Lydian"))).unwrap();
        assert_eq!(report.transition.unwrap().path, None);
        assert!(mode(&western, &indian, mode_query("Ionian", "C", Some("Nope"))).is_err());
    }

    #[test]
    fn rasa_report() {
        let report = rasa("karuna", Some("Veera"), 3).unwrap();
        assert_eq!(report.rasa, Rasa::Karuna);
        assert_eq!(report.info.energy_level, 3);
        assert_eq!(report.compatible_rasas.len(), 5);
        assert_eq!(
            report.transition.unwrap().path,
            Some(vec![Rasa::Karuna, Rasa::Veera])
        );

        let plain = rasa("Saantha", None, 3).unwrap();
        assert!(plain.to_string().starts_with("Saantha (Peace/Tranquility): Serenity\n"));
        assert!(rasa("Bliss", None, 3).is_err());
    }

    #[test]
    fn raga_western_report() {
        let report = raga_western(&default_tuning(), "yaman", "C", 4).unwrap();
        assert_eq!(report.equivalent.raga, "Yaman");
        assert_eq!(report.equivalent.scale_type, "Lydian");
        assert_eq!(report.comparison.camelot_notation.to_string(), "5B");
        assert!(report.comparison.western_frequencies.contains("F#4"));
        assert!(report.to_string().contains("C4 Lydian (5B):"));
        assert!(raga_western(&default_tuning(), "Behag", "C", 4).is_err());
    }

    #[test]
    fn profile_init_then_resolve() {
        let path = std::env::temp_dir().join(format!("svarascala-cli-{}.json", std::process::id()));
        profile_init(&path, 432.0, 228.0).unwrap();
        let tuning = Tuning::resolve(Some(&path), None).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(tuning.western().unwrap().reference_a4(), 432.0);
        assert_eq!(tuning.indian().unwrap().reference_sa(), 228.0);
    }

    #[test]
    fn missing_profile_is_an_error() {
        let path = std::env::temp_dir().join("svarascala-cli-does-not-exist.json");
        let err = Tuning::resolve(Some(&path), None).unwrap_err();
        assert!(err.to_string().contains("failed to load tuning profile"));
    }
}

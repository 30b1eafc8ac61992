// svara-core/src/lib.rs

//! The calculation core of SvaraScala.
//! This crate turns note, scale, swara and raga names into frequencies for
//! Western equal temperament and Indian just intonation, and relates the two.
//! It is completely headless: no printing, no argument parsing.
//!
//! ```
//! use svara_core::{IndianCalculator, WesternCalculator};
//!
//! let western = WesternCalculator::default();
//! assert_eq!(western.get_frequency("A", 4).unwrap(), 440.0);
//!
//! let indian = IndianCalculator::default();
//! let yaman = indian.calculate_raga_frequencies("Yaman").unwrap();
//! assert!((yaman.get("Ma tivra").unwrap() - 313.24).abs() < 0.01);
//! ```

pub mod camelot;
pub mod compare;
pub mod error;
pub mod indian;
pub mod modes;
pub mod navarasa;
pub mod profile;
pub mod tables;
pub mod transitions;
pub mod western;

pub use camelot::{CamelotCode, CamelotLetter, CompatibleKey, KeyMode, Relationship, ScaleWithCamelot};
pub use error::{Error, Result};
pub use indian::{IndianCalculator, Swara, Variant};
pub use modes::WesternMode;
pub use navarasa::{Rasa, Thaat};
pub use profile::TuningProfile;
pub use western::{HarmonicRelation, Note, WesternCalculator};

use serde::ser::{Serialize, SerializeMap, Serializer};

/// An ordered mapping of label → frequency in Hz.
///
/// Order is the order the calculator produced the entries in (ascending scale
/// or raga order), never sorted by label.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    entries: Vec<(String, f64)>,
}

impl FrequencyTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, label: impl Into<String>, frequency: f64) {
        self.entries.push((label.into(), frequency));
    }

    /// Frequency stored under `label`, if any.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, f)| *f)
    }

    pub fn contains(&self, label: &str) -> bool {
        self.get(label).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(l, f)| (l.as_str(), *f))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn frequencies(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, f)| *f)
    }
}

impl Serialize for FrequencyTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, frequency) in &self.entries {
            map.serialize_entry(label, frequency)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequency_table_keeps_insertion_order() {
        let mut table = FrequencyTable::new();
        table.push("Sa shuddha", 220.0);
        table.push("Re komal", 234.67);
        table.push("Ga shuddha", 275.0);

        let labels: Vec<_> = table.labels().collect();
        assert_eq!(labels, ["Sa shuddha", "Re komal", "Ga shuddha"]);
        assert_eq!(table.get("Ga shuddha"), Some(275.0));
        assert_eq!(table.get("Ma tivra"), None);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn frequency_table_serializes_as_ordered_object() {
        let mut table = FrequencyTable::with_capacity(2);
        table.push("G4", 392.0);
        table.push("C4", 261.5);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"G4":392.0,"C4":261.5}"#);
    }
}

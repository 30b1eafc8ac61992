//! Comparisons between equal temperament and just intonation.
//!
//! Ratios are always taken as higher over lower, so both systems report a
//! fifth as ~1.5 and never as ~0.667.

use serde::Serialize;

use crate::error::{Result, check_reference};
use crate::indian::{IndianCalculator, Swara, Variant};
use crate::western::{Note, WesternCalculator, cents_deviation};

/// Ratio of two frequencies, higher over lower (always >= 1).
///
/// # Errors
/// * `InvalidParameter` - either frequency is non-finite or not positive
pub fn frequency_ratio(freq_a: f64, freq_b: f64) -> Result<f64> {
    let a = check_reference("frequency", freq_a)?;
    let b = check_reference("frequency", freq_b)?;
    Ok(a.max(b) / a.min(b))
}

/// The same interval measured in both systems.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RatioComparison {
    pub western_ratio: f64,
    pub indian_ratio: f64,
    /// `|western - indian|`
    pub absolute_difference: f64,
    /// Absolute difference as a fraction of the Indian ratio.
    pub relative_difference: f64,
    /// Western relative to Indian; negative when the tempered interval is
    /// narrower.
    pub cents_difference: f64,
}

pub fn compare_ratios(western_ratio: f64, indian_ratio: f64) -> Result<RatioComparison> {
    let western_ratio = check_reference("western_ratio", western_ratio)?;
    let indian_ratio = check_reference("indian_ratio", indian_ratio)?;
    let absolute_difference = (western_ratio - indian_ratio).abs();
    Ok(RatioComparison {
        western_ratio,
        indian_ratio,
        absolute_difference,
        relative_difference: absolute_difference / indian_ratio,
        cents_difference: cents_deviation(western_ratio, indian_ratio),
    })
}

/// Compares the tempered interval `lower..upper` with the just interval
/// Sa..`swara`.
///
/// ```
/// use svara_core::{IndianCalculator, Swara, Variant, WesternCalculator};
/// use svara_core::compare::compare_interval;
///
/// let fifth = compare_interval(
///     &WesternCalculator::default(),
///     ("C", 4),
///     ("G", 4),
///     &IndianCalculator::default(),
///     Swara::Pa,
///     Variant::Shuddha,
/// )
/// .unwrap();
/// assert_eq!(fifth.indian_ratio, 1.5);
/// assert!(fifth.cents_difference < 0.0);
/// ```
pub fn compare_interval(
    western: &WesternCalculator,
    lower: (&str, i32),
    upper: (&str, i32),
    indian: &IndianCalculator,
    swara: Swara,
    variant: Variant,
) -> Result<RatioComparison> {
    let western_ratio = frequency_ratio(
        western.get_frequency(lower.0, lower.1)?,
        western.get_frequency(upper.0, upper.1)?,
    )?;
    let indian_ratio = frequency_ratio(
        indian.reference_sa(),
        indian.swara_frequency(swara, variant)?,
    )?;
    compare_ratios(western_ratio, indian_ratio)
}

/// One raga step placed against the tempered chromatic scale.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SwaraMapping {
    pub swara: Swara,
    pub variant: Variant,
    pub frequency: f64,
    pub nearest_note: Note,
    pub note_frequency: f64,
    pub cents_deviation: f64,
}

/// Maps every step of a raga to its nearest equal-tempered note.
///
/// # Errors
/// * `UnknownRaga` - raga not in the table
pub fn map_raga_to_western(
    indian: &IndianCalculator,
    western: &WesternCalculator,
    raga_name: &str,
) -> Result<Vec<SwaraMapping>> {
    let raga = indian.get_raga(raga_name)?;
    raga.steps
        .iter()
        .map(|&(swara, variant)| {
            let frequency = indian.swara_frequency(swara, variant)?;
            let (nearest_note, note_frequency) = western.nearest_note(frequency)?;
            Ok(SwaraMapping {
                swara,
                variant,
                frequency,
                nearest_note,
                note_frequency,
                cents_deviation: cents_deviation(frequency, note_frequency),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn ratio_is_order_independent() {
        assert_eq!(frequency_ratio(330.0, 220.0).unwrap(), 1.5);
        assert_eq!(frequency_ratio(220.0, 330.0).unwrap(), 1.5);
        assert_eq!(frequency_ratio(440.0, 440.0).unwrap(), 1.0);
        assert!(matches!(
            frequency_ratio(0.0, 220.0),
            Err(Error::InvalidParameter { .. })
        ));
        assert!(frequency_ratio(220.0, f64::NAN).is_err());
    }

    #[test]
    fn tempered_fifth_is_narrow() {
        let fifth = compare_interval(
            &WesternCalculator::default(),
            ("C", 4),
            ("G", 4),
            &IndianCalculator::default(),
            Swara::Pa,
            Variant::Shuddha,
        )
        .unwrap();
        assert!((fifth.western_ratio - 1.498307).abs() < 1e-6);
        assert_eq!(fifth.indian_ratio, 1.5);
        assert!((fifth.absolute_difference - 0.001693).abs() < 1e-6);
        assert!((fifth.cents_difference + 1.955).abs() < 0.01);
        assert!(fifth.relative_difference < 0.0012);
    }

    #[test]
    fn tempered_major_third_is_wide() {
        let third = compare_interval(
            &WesternCalculator::default(),
            ("E", 4),
            ("C", 4),
            &IndianCalculator::default(),
            Swara::Ga,
            Variant::Shuddha,
        )
        .unwrap();
        assert_eq!(third.indian_ratio, 1.25);
        assert!((third.cents_difference - 13.686).abs() < 0.01);
    }

    #[test]
    fn yaman_against_tempered_notes() {
        let mapping = map_raga_to_western(
            &IndianCalculator::default(),
            &WesternCalculator::default(),
            "yaman",
        )
        .unwrap();
        assert_eq!(mapping.len(), 7);

        let sa = &mapping[0];
        assert_eq!(sa.nearest_note.to_string(), "A3");
        assert_eq!(sa.cents_deviation, 0.0);

        let pa = &mapping[4];
        assert_eq!(pa.nearest_note.to_string(), "E4");
        assert!((pa.cents_deviation - 1.955).abs() < 0.01);

        let ma = &mapping[3];
        assert_eq!((ma.swara, ma.variant), (Swara::Ma, Variant::Tivra));
        assert_eq!(ma.nearest_note.to_string(), "D#4");
        assert!(mapping.iter().all(|m| m.cents_deviation.abs() <= 50.0));
    }

    #[test]
    fn unknown_raga_is_reported() {
        let err = map_raga_to_western(
            &IndianCalculator::default(),
            &WesternCalculator::default(),
            "Nonexistent",
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnknownRaga { .. }));
    }
}

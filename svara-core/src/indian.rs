//! # Indian Tuning Module
//!
//! Just-intonation frequencies relative to a configurable Sa.
//!
//! Every swara variant is pinned to one of the 22 shrutis, so a frequency is
//! always `reference_sa * p/q` for a small rational p/q from the shruti table.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result, check_reference};
use crate::tables::{self, RagaDefinition, SHRUTIS, Shruti};
use crate::FrequencyTable;

/// Conventional default Sa (A3).
pub const DEFAULT_REFERENCE_SA: f64 = 220.0;

/// The seven swaras, in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Swara {
    Sa,
    Re,
    Ga,
    Ma,
    Pa,
    Dha,
    Ni,
}

impl Swara {
    pub const ALL: [Swara; 7] = [
        Swara::Sa,
        Swara::Re,
        Swara::Ga,
        Swara::Ma,
        Swara::Pa,
        Swara::Dha,
        Swara::Ni,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Swara::Sa => "Sa",
            Swara::Re => "Re",
            Swara::Ga => "Ga",
            Swara::Ma => "Ma",
            Swara::Pa => "Pa",
            Swara::Dha => "Dha",
            Swara::Ni => "Ni",
        }
    }

    /// Sa and Pa are fixed (achala) and have no komal/tivra forms.
    pub fn is_fixed(&self) -> bool {
        matches!(self, Swara::Sa | Swara::Pa)
    }
}

impl fmt::Display for Swara {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Swara {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Swara::ALL
            .into_iter()
            .find(|swara| swara.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::InvalidSwara(s.to_string()))
    }
}

/// Natural, flattened or sharpened form of a swara.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Komal,
    #[default]
    Shuddha,
    Tivra,
}

impl Variant {
    pub fn name(&self) -> &'static str {
        match self {
            Variant::Komal => "komal",
            Variant::Shuddha => "shuddha",
            Variant::Tivra => "tivra",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses the variant name alone; whether it applies to a given swara is
/// checked against the swara table.
fn parse_variant(swara: Swara, variant: &str) -> Result<Variant> {
    [Variant::Komal, Variant::Shuddha, Variant::Tivra]
        .into_iter()
        .find(|v| v.name().eq_ignore_ascii_case(variant))
        .ok_or_else(|| invalid_variant(swara, variant))
}

fn invalid_variant(swara: Swara, variant: &str) -> Error {
    Error::InvalidVariant {
        swara: swara.to_string(),
        variant: variant.to_string(),
        available: tables::variants_of(swara)
            .map(|v| v.name())
            .collect::<Vec<_>>()
            .join(", "),
    }
}

/// Just-intonation calculator holding only its Sa reference pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndianCalculator {
    reference_sa: f64,
}

impl Default for IndianCalculator {
    fn default() -> Self {
        Self {
            reference_sa: DEFAULT_REFERENCE_SA,
        }
    }
}

impl IndianCalculator {
    /// # Errors
    /// * `InvalidParameter` - reference is non-finite or not positive
    pub fn new(reference_sa: f64) -> Result<Self> {
        let reference_sa = check_reference("reference_sa", reference_sa)?;
        tracing::debug!(reference_sa, "indian calculator ready");
        Ok(Self { reference_sa })
    }

    pub fn reference_sa(&self) -> f64 {
        self.reference_sa
    }

    fn shruti_frequency(&self, shruti: &Shruti) -> f64 {
        self.reference_sa * shruti.ratio()
    }

    /// Frequency of a shruti by its number, 1 (Sa) through 22.
    pub fn get_shruti_frequency(&self, number: u8) -> Result<f64> {
        let shruti = tables::shruti_by_number(number).ok_or_else(|| {
            Error::invalid_parameter("shruti_number", number, "must be between 1 and 22")
        })?;
        Ok(self.shruti_frequency(shruti))
    }

    /// The shruti a swara variant sounds at.
    pub fn shruti_for(&self, swara: Swara, variant: Variant) -> Result<&'static Shruti> {
        tables::swara_shruti(swara, variant).ok_or_else(|| invalid_variant(swara, variant.name()))
    }

    /// Typed form of [`get_swara_frequency`](Self::get_swara_frequency).
    pub fn swara_frequency(&self, swara: Swara, variant: Variant) -> Result<f64> {
        Ok(self.shruti_frequency(self.shruti_for(swara, variant)?))
    }

    /// Calculates the frequency of a swara variant.
    ///
    /// # Arguments
    /// * `swara` - One of Sa, Re, Ga, Ma, Pa, Dha, Ni
    /// * `variant` - komal, shuddha or tivra; `None` means shuddha. Sa and Pa
    ///   only accept shuddha.
    ///
    /// # Errors
    /// * `InvalidSwara` - unknown swara name
    /// * `InvalidVariant` - unknown variant, or one this swara does not have
    pub fn get_swara_frequency(&self, swara: &str, variant: Option<&str>) -> Result<f64> {
        let (swara, variant) = Self::parse_swara_variant(swara, variant)?;
        self.swara_frequency(swara, variant)
    }

    /// Parses a swara name and optional variant name into their typed forms,
    /// checking that the swara has that variant. `None` means shuddha.
    pub fn parse_swara_variant(swara: &str, variant: Option<&str>) -> Result<(Swara, Variant)> {
        let swara: Swara = swara.parse()?;
        let variant = match variant {
            Some(name) => parse_variant(swara, name)?,
            None => Variant::default(),
        };
        tables::swara_shruti(swara, variant).ok_or_else(|| invalid_variant(swara, variant.name()))?;
        Ok((swara, variant))
    }

    /// Sa one octave up (Sa'), exactly twice the reference.
    pub fn upper_sa_frequency(&self) -> f64 {
        self.reference_sa * 2.0
    }

    /// Looks up a raga's ascending swara sequence.
    ///
    /// # Errors
    /// * `UnknownRaga` - name not in the raga table
    pub fn get_raga(&self, raga_name: &str) -> Result<&'static RagaDefinition> {
        tables::raga(raga_name).ok_or_else(|| Error::UnknownRaga {
            name: raga_name.to_string(),
            available: tables::raga_names().collect::<Vec<_>>().join(", "),
        })
    }

    /// Frequencies for every step of a raga, labelled "Sa shuddha",
    /// "Ma tivra", ... in the raga's ascending order.
    pub fn calculate_raga_frequencies(&self, raga_name: &str) -> Result<FrequencyTable> {
        let raga = self.get_raga(raga_name)?;
        tracing::trace!(raga = raga.name, "calculating raga frequencies");
        let mut frequencies = FrequencyTable::with_capacity(raga.steps.len());
        for &(swara, variant) in raga.steps {
            frequencies.push(format!("{swara} {variant}"), self.swara_frequency(swara, variant)?);
        }
        Ok(frequencies)
    }

    /// All 22 shrutis in ascending order, labelled "Shruti 1" .. "Shruti 22".
    pub fn get_all_shrutis(&self) -> FrequencyTable {
        let mut frequencies = FrequencyTable::with_capacity(SHRUTIS.len());
        for shruti in &SHRUTIS {
            frequencies.push(format!("Shruti {}", shruti.number), self.shruti_frequency(shruti));
        }
        frequencies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn sa_and_pa_are_exact() {
        let im = IndianCalculator::default();
        assert_eq!(im.get_swara_frequency("Sa", None).unwrap(), 220.0);
        assert_eq!(im.get_swara_frequency("Pa", None).unwrap(), 330.0);
        assert_eq!(im.get_swara_frequency("Pa", None).unwrap() / 220.0, 1.5);
        assert_eq!(im.get_swara_frequency("Pa", Some("shuddha")).unwrap(), 330.0);
        assert_eq!(im.upper_sa_frequency(), 440.0);
    }

    #[test]
    fn fixed_swaras_reject_other_variants() {
        let im = IndianCalculator::default();
        let err = im.get_swara_frequency("Sa", Some("komal")).unwrap_err();
        assert!(matches!(err, Error::InvalidVariant { .. }));
        assert!(err.to_string().contains("available: shuddha"));
        assert!(im.get_swara_frequency("Pa", Some("tivra")).is_err());
    }

    #[test]
    fn variants_order_by_pitch() {
        let im = IndianCalculator::default();
        let re_komal = im.get_swara_frequency("Re", Some("komal")).unwrap();
        let re_shuddha = im.get_swara_frequency("Re", None).unwrap();
        assert!(re_komal < re_shuddha);

        let ma = im.get_swara_frequency("Ma", None).unwrap();
        let ma_tivra = im.get_swara_frequency("Ma", Some("tivra")).unwrap();
        assert!(ma_tivra / ma > 1.03);
        assert!((ma / 220.0 - 4.0 / 3.0).abs() < 1e-12);
        assert_eq!(im.get_swara_frequency("Ga", Some("shuddha")).unwrap(), 275.0);
    }

    #[test]
    fn unknown_swara_or_variant() {
        let im = IndianCalculator::default();
        assert!(matches!(im.get_swara_frequency("Xa", None), Err(Error::InvalidSwara(_))));
        assert!(matches!(
            im.get_swara_frequency("Re", Some("tivra")),
            Err(Error::InvalidVariant { .. })
        ));
        assert!(matches!(
            im.get_swara_frequency("Ga", Some("sharp")),
            Err(Error::InvalidVariant { .. })
        ));
    }

    #[test]
    fn yaman_has_tivra_ma() {
        let im = IndianCalculator::default();
        let yaman = im.calculate_raga_frequencies("Yaman").unwrap();
        let labels: Vec<_> = yaman.labels().collect();
        assert_eq!(
            labels,
            [
                "Sa shuddha",
                "Re shuddha",
                "Ga shuddha",
                "Ma tivra",
                "Pa shuddha",
                "Dha shuddha",
                "Ni shuddha"
            ]
        );
        assert!((yaman.get("Ma tivra").unwrap() - 313.24).abs() < 0.01);
        assert!((yaman.get("Re shuddha").unwrap() / 220.0 - 9.0 / 8.0).abs() < 1e-12);
    }

    #[test]
    fn bhairav_has_komal_re_and_dha() {
        let im = IndianCalculator::default();
        let bhairav = im.calculate_raga_frequencies("Bhairav").unwrap();
        assert!(bhairav.contains("Re komal"));
        assert!(bhairav.contains("Dha komal"));
        assert!(bhairav.frequencies().collect::<Vec<_>>().windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn unknown_raga() {
        let im = IndianCalculator::default();
        let err = im.calculate_raga_frequencies("Nonexistent").unwrap_err();
        assert!(matches!(err, Error::UnknownRaga { .. }));
        assert!(err.to_string().contains("Yaman"));
    }

    #[test]
    fn all_shrutis() {
        let im = IndianCalculator::new(240.0).unwrap();
        let shrutis = im.get_all_shrutis();
        assert_eq!(shrutis.len(), 22);
        assert_eq!(shrutis.get("Shruti 1"), Some(240.0));
        assert_eq!(shrutis.get("Shruti 14"), Some(360.0));
        assert!(shrutis.frequencies().all(|f| f < 480.0));
    }

    #[test]
    fn shruti_by_number() {
        let im = IndianCalculator::default();
        assert_eq!(im.get_shruti_frequency(14).unwrap(), 330.0);
        assert!(matches!(
            im.get_shruti_frequency(0),
            Err(Error::InvalidParameter { name: "shruti_number", .. })
        ));
        assert!(im.get_shruti_frequency(23).is_err());
        assert_eq!(im.shruti_for(Swara::Ma, Variant::Tivra).unwrap().number, 13);
    }

    #[test]
    fn swara_and_variant_parse_to_canonical_forms() {
        assert_eq!(
            IndianCalculator::parse_swara_variant("re", Some("KOMAL")).unwrap(),
            (Swara::Re, Variant::Komal)
        );
        assert_eq!(
            IndianCalculator::parse_swara_variant("MA", Some("Tivra")).unwrap(),
            (Swara::Ma, Variant::Tivra)
        );
        assert_eq!(
            IndianCalculator::parse_swara_variant("pa", None).unwrap(),
            (Swara::Pa, Variant::Shuddha)
        );
        assert!(IndianCalculator::parse_swara_variant("Pa", Some("komal")).is_err());
    }

    #[test]
    fn swara_names_parse_case_insensitively() {
        assert_eq!("dha".parse::<Swara>().unwrap(), Swara::Dha);
        assert_eq!("NI".parse::<Swara>().unwrap(), Swara::Ni);
    }
}

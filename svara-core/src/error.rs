//! Crate-level error type for the svara frequency calculators.
//!
//! Every variant except the I/O ones means the caller named something that is
//! not present in the reference tables. Nothing here is recovered internally.

/// Errors raised by the calculators and the profile loader.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Note name is not one of the twelve pitch names (or an accepted flat).
    #[error("unknown note `{name}`; expected one of {available}")]
    InvalidNote { name: String, available: String },

    /// Scale type is absent from the scale pattern table.
    #[error("unknown scale type `{name}`; available: {available}")]
    UnknownScaleType { name: String, available: String },

    /// Solfège syllable is not recognised.
    #[error("unknown solfege syllable `{0}`")]
    InvalidSolfege(String),

    /// Swara name is not one of Sa, Re, Ga, Ma, Pa, Dha, Ni.
    #[error("unknown swara `{0}`; expected one of Sa, Re, Ga, Ma, Pa, Dha, Ni")]
    InvalidSwara(String),

    /// Variant is unknown or not defined for this swara.
    #[error("invalid variant `{variant}` for {swara}; available: {available}")]
    InvalidVariant {
        swara: String,
        variant: String,
        available: String,
    },

    /// Raga is absent from the raga table.
    #[error("unknown raga `{name}`; available ragas: {available}")]
    UnknownRaga { name: String, available: String },

    /// Western mode is absent from the mode table.
    #[error("unknown mode `{name}`; available modes: {available}")]
    UnknownMode { name: String, available: String },

    /// Rasa is not one of the nine navarasas.
    #[error("unknown rasa `{name}`; available rasas: {available}")]
    UnknownRasa { name: String, available: String },

    /// The (key, scale type) pair has no Camelot code.
    #[error("no Camelot code for key `{key}` {scale_type}")]
    UnmappedKey { key: String, scale_type: String },

    /// Camelot code is malformed or outside 1A..12B.
    #[error("invalid Camelot code `{0}`; expected a number 1-12 followed by A or B")]
    InvalidCamelotCode(String),

    /// Numeric parameter out of range or non-finite.
    #[error("invalid parameter `{name}`: got {value}, {reason}")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    /// File I/O errors while saving or loading a profile.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Profile JSON could not be encoded or decoded.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_parameter(
        name: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidParameter {
            name,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience Result type for svara operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Rejects a reference pitch that is non-finite or not strictly positive.
pub(crate) fn check_reference(name: &'static str, hz: f64) -> Result<f64> {
    if !hz.is_finite() {
        return Err(Error::invalid_parameter(name, hz, "must be finite"));
    }
    if hz <= 0.0 {
        return Err(Error::invalid_parameter(name, hz, "must be greater than 0 Hz"));
    }
    Ok(hz)
}

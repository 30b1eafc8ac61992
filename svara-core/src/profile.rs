//! Tuning profiles persisted as JSON.
//!
//! A profile holds the two reference pitches the calculators are built from,
//! so a non-concert tuning (A4 = 432, Sa = 240, ...) can be reused across
//! sessions.

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::{Result, check_reference};
use crate::indian::{DEFAULT_REFERENCE_SA, IndianCalculator};
use crate::western::{DEFAULT_REFERENCE_A4, WesternCalculator};

/// Reference pitches for both systems. Missing fields fall back to the
/// defaults when loading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TuningProfile {
    pub reference_a4: f64,
    pub reference_sa: f64,
}

impl Default for TuningProfile {
    fn default() -> Self {
        Self {
            reference_a4: DEFAULT_REFERENCE_A4,
            reference_sa: DEFAULT_REFERENCE_SA,
        }
    }
}

impl TuningProfile {
    /// # Errors
    /// * `InvalidParameter` - either pitch is non-finite or not positive
    pub fn validate(&self) -> Result<()> {
        check_reference("reference_a4", self.reference_a4)?;
        check_reference("reference_sa", self.reference_sa)?;
        Ok(())
    }

    pub fn western(&self) -> Result<WesternCalculator> {
        WesternCalculator::new(self.reference_a4)
    }

    pub fn indian(&self) -> Result<IndianCalculator> {
        IndianCalculator::new(self.reference_sa)
    }
}

/// Saves a tuning profile as pretty-printed JSON.
///
/// # Returns
/// * `Ok(())` - Profile saved successfully
/// * `Err(Error)` - Invalid pitches, file I/O error or JSON serialization error
pub fn save_profile(profile: &TuningProfile, path: impl AsRef<Path>) -> Result<()> {
    profile.validate()?;
    let json_string = serde_json::to_string_pretty(profile)?;
    let mut file = File::create(path.as_ref())?;
    file.write_all(json_string.as_bytes())?;
    tracing::debug!(path = %path.as_ref().display(), "saved tuning profile");
    Ok(())
}

/// Loads a tuning profile from a JSON file and validates it.
pub fn load_profile(path: impl AsRef<Path>) -> Result<TuningProfile> {
    let mut file = File::open(path.as_ref())?;
    let mut data = String::new();
    file.read_to_string(&mut data)?;
    let profile: TuningProfile = serde_json::from_str(&data)?;
    profile.validate()?;
    tracing::debug!(
        path = %path.as_ref().display(),
        reference_a4 = profile.reference_a4,
        reference_sa = profile.reference_sa,
        "loaded tuning profile"
    );
    Ok(profile)
}

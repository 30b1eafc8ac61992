//! CLI argument definitions for the svarascala command-line interface.
//!
//! All `#[derive(Parser)]` and `#[derive(Subcommand)]` types live here,
//! keeping `main.rs` focused on dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use svara_core::transitions::DEFAULT_MAX_STEPS;

/// SvaraScala - Western and Indian musical frequency calculator
#[derive(Debug, Parser)]
#[command(name = "svarascala")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub(crate) struct Cli {
    /// Tuning profile (JSON) providing the reference pitches
    #[arg(long, global = true, value_name = "PATH")]
    pub profile: Option<PathBuf>,

    /// Reference pitch in Hz: A4 for Western commands, Sa for Indian ones and compare
    #[arg(long, global = true, value_name = "HZ")]
    pub reference: Option<f64>,

    /// Output machine-readable JSON instead of a table
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub(crate) enum Commands {
    /// Frequency of a Western note, with its harmonic neighbours
    WesternNote {
        /// Note name, e.g. A, C#, Bb
        note: String,

        /// Octave number (4 holds middle C)
        #[arg(allow_negative_numbers = true)]
        octave: i32,
    },

    /// Frequencies of a Western scale
    WesternScale {
        /// Root note of the scale
        root: String,

        /// Octave of the root
        #[arg(allow_negative_numbers = true)]
        octave: i32,

        /// Scale type (major, minor, minor_harmonic, blues, ...)
        #[arg(long, default_value = "major")]
        scale_type: String,
    },

    /// Frequency of a solfege syllable in a key
    Solfege {
        /// Syllable, e.g. Do, Re, Mi, Fi, Te
        syllable: String,

        /// Octave Do sounds in
        #[arg(allow_negative_numbers = true)]
        octave: i32,

        /// Key root that sounds as Do
        #[arg(long, default_value = "C")]
        key: String,
    },

    /// Camelot wheel lookups for harmonic mixing
    Camelot {
        /// Camelot code, e.g. 8A
        #[arg(long, conflicts_with = "key", required_unless_present = "key")]
        camelot: Option<String>,

        /// Musical key, e.g. C or Am
        #[arg(long)]
        key: Option<String>,

        /// major or minor (ignored when the key ends in `m`)
        #[arg(long, default_value = "major")]
        scale_type: String,

        /// Octave used with --with-frequencies
        #[arg(long, default_value_t = 4, allow_negative_numbers = true)]
        octave: i32,

        /// Also print the scale frequencies for the key
        #[arg(long)]
        with_frequencies: bool,
    },

    /// Frequency of an Indian swara
    IndianSwara {
        /// Sa, Re, Ga, Ma, Pa, Dha or Ni
        swara: String,

        /// komal, shuddha or tivra (default shuddha)
        #[arg(long)]
        variant: Option<String>,
    },

    /// Frequencies of every swara in a raga
    IndianRaga {
        /// Raga name, e.g. Yaman
        raga: String,
    },

    /// All 22 shruti frequencies
    Shrutis,

    /// Frequencies, character, transitions and related ragas of a Western mode
    Mode {
        /// Ionian, Dorian, Phrygian, Lydian, Mixolydian, Aeolian or Locrian
        mode: String,

        /// Root note of the mode
        root: String,

        /// Octave of the root
        #[arg(allow_negative_numbers = true)]
        octave: i32,

        /// Also find a transition path to this mode
        #[arg(long, value_name = "MODE")]
        to: Option<String>,

        /// Longest path to try, counting both ends
        #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
        max_steps: usize,
    },

    /// Describe one of the nine rasas and where it can move next
    Rasa {
        /// Sringara, Haasya, Karuna, Raudra, Veera, Bhayaanaka, Beebhatsa, Adbutham or Saantha
        rasa: String,

        /// Also find a transition path to this rasa
        #[arg(long, value_name = "RASA")]
        to: Option<String>,

        /// Longest path to try, counting both ends
        #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
        max_steps: usize,
    },

    /// Place a raga in Western terms via its thaat
    RagaWestern {
        /// Raga name, e.g. Yaman
        raga: String,

        /// Root of the Western scale to compare against
        #[arg(long, default_value = "C")]
        root: String,

        /// Octave of the root
        #[arg(long, default_value_t = 4, allow_negative_numbers = true)]
        octave: i32,
    },

    /// Map a raga onto the nearest equal-tempered notes
    Compare {
        /// Raga name
        raga: String,
    },

    /// Manage tuning profiles
    Profile {
        #[command(subcommand)]
        action: ProfileCommand,
    },
}

#[derive(Debug, Subcommand)]
pub(crate) enum ProfileCommand {
    /// Write a tuning profile
    Init {
        /// Where to write the profile
        path: PathBuf,

        /// Reference A4 in Hz
        #[arg(long, default_value_t = 440.0)]
        a4: f64,

        /// Reference Sa in Hz
        #[arg(long, default_value_t = 220.0)]
        sa: f64,
    },
}

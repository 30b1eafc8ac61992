//! # svarascala - Musical Frequency Calculator
//!
//! Thin command-line front end over `svara-core`. Every subcommand builds a
//! report and prints it as a table, or as JSON with `--json`.
//! Logs go to stderr (`RUST_LOG`, default `warn`) so stdout stays parseable.

mod cli_args;
mod commands;
mod report;

use clap::Parser;
use std::process::ExitCode;

use cli_args::{Cli, Commands, ProfileCommand};
use commands::{CamelotQuery, ModeQuery, Tuning};
use report::emit;

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let json = cli.json;
    let tuning = Tuning::resolve(cli.profile.as_deref(), cli.reference)?;
    tracing::debug!(command = ?cli.command, "dispatching");

    match cli.command {
        Commands::WesternNote { note, octave } => {
            emit(&commands::western_note(&tuning.western()?, &note, octave)?, json)
        }
        Commands::WesternScale {
            root,
            octave,
            scale_type,
        } => emit(
            &commands::western_scale(&tuning.western()?, &root, octave, &scale_type)?,
            json,
        ),
        Commands::Solfege { syllable, octave, key } => emit(
            &commands::solfege(&tuning.western()?, &syllable, octave, &key)?,
            json,
        ),
        Commands::Camelot {
            camelot,
            key,
            scale_type,
            octave,
            with_frequencies,
        } => {
            let query = CamelotQuery {
                camelot: camelot.as_deref(),
                key: key.as_deref(),
                scale_type: &scale_type,
                octave,
                with_frequencies,
            };
            emit(&commands::camelot(&tuning.western()?, query)?, json)
        }
        Commands::IndianSwara { swara, variant } => emit(
            &commands::indian_swara(&tuning.indian()?, &swara, variant.as_deref())?,
            json,
        ),
        Commands::IndianRaga { raga } => emit(&commands::indian_raga(&tuning.indian()?, &raga)?, json),
        Commands::Shrutis => emit(&commands::shrutis(&tuning.indian()?), json),
        Commands::Mode {
            mode,
            root,
            octave,
            to,
            max_steps,
        } => {
            let query = ModeQuery {
                mode: &mode,
                root: &root,
                octave,
                to: to.as_deref(),
                max_steps,
            };
            emit(
                &commands::mode(&tuning.western()?, &tuning.profile_indian()?, query)?,
                json,
            )
        }
        Commands::Rasa { rasa, to, max_steps } => {
            emit(&commands::rasa(&rasa, to.as_deref(), max_steps)?, json)
        }
        Commands::RagaWestern { raga, root, octave } => {
            emit(&commands::raga_western(&tuning, &raga, &root, octave)?, json)
        }
        Commands::Compare { raga } => emit(&commands::compare(&tuning, &raga)?, json),
        Commands::Profile {
            action: ProfileCommand::Init { path, a4, sa },
        } => emit(&commands::profile_init(&path, a4, sa)?, json),
    }
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

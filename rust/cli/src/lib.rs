//! # holdem CLI
//!
//! Command-line host for the Hold'em engine: show the resolved table
//! configuration, run seeded all-AI simulations with a JSONL round log, or
//! play a seat against automated opponents.
//!
//! ```no_run
//! use std::io;
//! let args = vec!["holdem", "sim", "--seed", "7", "--rounds", "50"];
//! let code = holdem_cli::run(args, &mut io::stdout(), &mut io::stderr());
//! assert_eq!(code, 0);
//! ```
//!
//! ## Subcommands
//!
//! - `cfg`: print each setting with its source (default, file, env, flag)
//! - `sim`: automated players only, optionally writing `--output FILE`
//! - `play`: one human seat reading actions from stdin

use clap::Parser;
use std::io::Write;

pub mod cli;
pub mod commands;
pub mod config;
mod error;
pub mod exit_code;
pub mod formatters;
pub mod io_utils;
pub mod logging;
#[macro_use]
mod macros;
pub mod ui;
pub mod validation;

use cli::{Commands, HoldemCli};
use commands::{handle_cfg_command, handle_play_command, handle_sim_command};

pub use error::CliError;

const COMMANDS: &[&str] = &["cfg", "sim", "play"];

/// Parse `args` and run the chosen subcommand.
///
/// Returns [`exit_code::SUCCESS`] on success and for `--help`/`--version`,
/// [`exit_code::ERROR`] for argument, configuration, I/O and engine errors.
///
/// ```
/// use std::io;
/// let mut out = Vec::new();
/// let code = holdem_cli::run(vec!["holdem", "cfg"], &mut out, &mut io::sink());
/// assert_eq!(code, 0);
/// ```
pub fn run<I, S>(args: I, out: &mut dyn Write, err: &mut dyn Write) -> i32
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let argv: Vec<String> = args.into_iter().map(|s| s.as_ref().to_string()).collect();

    let cli = match HoldemCli::try_parse_from(&argv) {
        Ok(cli) => cli,
        Err(e) => {
            use clap::error::ErrorKind;
            return match e.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    if write!(out, "{}", e).is_err() {
                        return exit_code::ERROR;
                    }
                    exit_code::SUCCESS
                }
                _ => usage_error(err, &e.to_string()),
            };
        }
    };

    let result = match cli.cmd {
        Commands::Cfg { table } => handle_cfg_command(&table.overrides(), out),
        Commands::Sim {
            table,
            rounds,
            output,
        } => handle_sim_command(&table.overrides(), rounds, output.as_deref(), out).map(|_| ()),
        Commands::Play {
            table,
            rounds,
            name,
        } => {
            let stdin = std::io::stdin();
            let mut stdin_lock = stdin.lock();
            handle_play_command(&table.overrides(), rounds, &name, &mut stdin_lock, out, err)
        }
    };

    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(e) => {
            if ui::write_error(err, &e.to_string()).is_err() {
                return exit_code::ERROR;
            }
            exit_code::ERROR
        }
    }
}

fn usage_error(err: &mut dyn Write, clap_message: &str) -> i32 {
    write_or_exit!(err, "{}", clap_message.trim_end());
    write_or_exit!(err, "\nUsage: holdem <command> [options]\n");
    write_or_exit!(err, "Commands:");
    for c in COMMANDS {
        write_or_exit!(err, "  {}", c);
    }
    write_or_exit!(err, "\nFor full help, run: holdem --help");
    exit_code::ERROR
}

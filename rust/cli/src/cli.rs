//! Command-line argument definitions.

use clap::{Args, Parser, Subcommand};

use crate::config::Overrides;

#[derive(Parser, Debug)]
#[command(
    name = "holdem",
    version,
    about = "Multiplayer Texas Hold'em engine: configuration, simulation and play"
)]
pub struct HoldemCli {
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Table settings shared by every command. Each flag overrides the config
/// file and the environment.
#[derive(Args, Debug, Clone, Default)]
pub struct TableArgs {
    /// RNG seed for a reproducible game
    #[arg(long)]
    pub seed: Option<u64>,
    /// Seats at the table (2-8)
    #[arg(long)]
    pub players: Option<usize>,
    #[arg(long)]
    pub small_blind: Option<u32>,
    #[arg(long)]
    pub big_blind: Option<u32>,
    /// Chips each player starts with
    #[arg(long)]
    pub stack: Option<u32>,
    /// Agent kind for automated seats
    #[arg(long)]
    pub ai: Option<String>,
}

impl TableArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            seed: self.seed,
            players: self.players,
            small_blind: self.small_blind,
            big_blind: self.big_blind,
            starting_stack: self.stack,
            ai: self.ai.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the resolved configuration and where each value came from
    Cfg {
        #[command(flatten)]
        table: TableArgs,
    },
    /// Run a table of automated players and record every round as JSONL
    Sim {
        #[command(flatten)]
        table: TableArgs,
        /// Stop after this many rounds even if the game is still running
        #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u32).range(1..))]
        rounds: u32,
        /// JSONL file for round records
        #[arg(long)]
        output: Option<String>,
    },
    /// Play one seat against automated opponents
    Play {
        #[command(flatten)]
        table: TableArgs,
        #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
        rounds: u32,
        /// Your player name
        #[arg(long, default_value = "you")]
        name: String,
    },
}

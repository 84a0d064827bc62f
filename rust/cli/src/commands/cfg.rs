//! `holdem cfg`: print the resolved configuration and where each value
//! came from.
//!
//! ```json
//! {
//!   "seed": { "value": null, "source": "default" },
//!   "players": { "value": 4, "source": "env" },
//!   ...
//! }
//! ```

use crate::config::{self, ConfigResolved, Overrides};
use crate::error::CliError;
use std::io::Write;

pub fn handle_cfg_command(
    flags: &Overrides,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let ConfigResolved { config, sources } = config::load_with_sources(flags)?;

    let display = serde_json::json!({
        "seed": { "value": config.seed, "source": sources.seed },
        "players": { "value": config.players, "source": sources.players },
        "small_blind": { "value": config.small_blind, "source": sources.small_blind },
        "big_blind": { "value": config.big_blind, "source": sources.big_blind },
        "starting_stack": { "value": config.starting_stack, "source": sources.starting_stack },
        "ai": { "value": config.ai, "source": sources.ai },
    });
    let json_str = serde_json::to_string_pretty(&display).map_err(std::io::Error::other)?;
    writeln!(out, "{}", json_str)?;
    Ok(())
}

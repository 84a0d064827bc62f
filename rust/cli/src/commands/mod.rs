//! Handlers for the `holdem` subcommands.
//!
//! Each handler takes its output streams as `&mut dyn Write` so tests can
//! capture them, and returns [`crate::error::CliError`] on failure.

pub mod cfg;
pub mod play;
pub mod sim;

pub use cfg::handle_cfg_command;
pub use play::handle_play_command;
pub use sim::handle_sim_command;

use holdem_engine::game::GameId;
use holdem_engine::player::PlayerId;
use holdem_engine::service::{GameService, NewGame};
use holdem_engine::store::{InMemoryStore, SequentialIdentity};
use rand::RngCore;

use crate::config::Config;
use crate::error::CliError;

pub(crate) type Table = GameService<InMemoryStore, SequentialIdentity>;

/// Build an in-memory table per `cfg`: `creator` takes the first seat and
/// the remaining seats are filled with automated players.
pub(crate) fn seat_table(
    cfg: &Config,
    creator: &str,
    creator_is_ai: bool,
    rng: &mut dyn RngCore,
) -> Result<(Table, GameId), CliError> {
    let agent = holdem_ai::create_ai(&cfg.ai).map_err(|e| CliError::Config(e.to_string()))?;
    let mut svc = GameService::new(InMemoryStore::new(), SequentialIdentity, agent);

    let mut new = NewGame::new("holdem", cfg.table(), PlayerId::new(creator));
    new.creator_is_ai = creator_is_ai;
    let id = svc.create_game(new, rng)?.game.id;
    for _ in 1..cfg.players {
        svc.add_ai_player(id, rng)?;
    }
    Ok((svc, id))
}

//! Seam between the engine and automated players.
//!
//! The engine asks a [`DecisionAgent`] for an action whenever an automated
//! seat is on turn. The agent sees only that seat's [`TurnView`]; the engine
//! validates whatever comes back, and any error or rejected action is turned
//! into a fold.

use rand::RngCore;
use thiserror::Error;

use crate::cards::Card;
use crate::player::PlayerAction;
use crate::round::Phase;

/// What an automated player can see when it is on turn.
#[derive(Debug, Clone, Copy)]
pub struct TurnView<'a> {
    pub hole: &'a [Card],
    pub community: &'a [Card],
    pub phase: Phase,
    pub pot: u32,
    /// Highest bet minus the seat's own bet this phase
    pub to_call: u32,
    pub chips: u32,
    pub big_blind: u32,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AgentError {
    #[error("expected 2 hole cards, got {0}")]
    MissingHoleCards(usize),
    #[error("decision failed: {0}")]
    Internal(String),
}

/// Decision-making interface for automated seats.
///
/// Randomness comes in through `rng` on every call so a seeded host can
/// replay a whole game.
pub trait DecisionAgent: Send + Sync {
    fn decide(&self, view: &TurnView<'_>, rng: &mut dyn RngCore) -> Result<PlayerAction, AgentError>;

    fn name(&self) -> &str;
}

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::GameId;
use crate::logger::ShowdownInfo;

/// Represents a stage of a round in Texas Hold'em poker.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Hole cards dealt, blinds posted
    Preflop,
    /// Three community cards
    Flop,
    /// Fourth community card
    Turn,
    /// Fifth community card
    River,
    /// Hands compared, pot paid out
    Showdown,
    /// Round closed
    Finished,
}

impl Phase {
    pub fn next(self) -> Phase {
        match self {
            Phase::Preflop => Phase::Flop,
            Phase::Flop => Phase::Turn,
            Phase::Turn => Phase::River,
            Phase::River => Phase::Showdown,
            Phase::Showdown | Phase::Finished => Phase::Finished,
        }
    }

    /// Whether players may act during this phase.
    pub fn is_betting(self) -> bool {
        matches!(self, Phase::Preflop | Phase::Flop | Phase::Turn | Phase::River)
    }

    /// Community cards dealt when entering this phase.
    pub fn cards_dealt(self) -> usize {
        match self {
            Phase::Flop => 3,
            Phase::Turn | Phase::River => 1,
            _ => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Preflop => "preflop",
            Phase::Flop => "flop",
            Phase::Turn => "turn",
            Phase::River => "river",
            Phase::Showdown => "showdown",
            Phase::Finished => "finished",
        }
    }
}

/// One dealt round of a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub game_id: GameId,
    pub round_number: u32,
    pub phase: Phase,
    pub community: Vec<Card>,
    /// Seat whose turn it is, `None` when nobody can act
    pub current_player_position: Option<usize>,
    pub highest_bet: u32,
    pub is_betting_complete: bool,
    #[serde(default)]
    pub showdown: Option<ShowdownInfo>,
}

impl Round {
    pub fn new(game_id: GameId, round_number: u32) -> Self {
        Self {
            game_id,
            round_number,
            phase: Phase::Preflop,
            community: Vec::with_capacity(5),
            current_player_position: None,
            highest_bet: 0,
            is_betting_complete: false,
            showdown: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }
}

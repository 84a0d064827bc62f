use crate::cards::Card;
use crate::game::GameId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable handle for a seated player, human or automated.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Represents a player action during a betting round.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "amount")]
pub enum PlayerAction {
    /// Fold and forfeit the round
    Fold,
    /// Check (only valid when the player's bet matches the highest bet)
    Check,
    /// Match the highest bet, or as much of it as the stack allows
    Call,
    /// Match the highest bet, then add this many chips on top
    Raise(u32),
    /// Push the whole stack
    AllIn,
}

impl PlayerAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            PlayerAction::Fold => ActionKind::Fold,
            PlayerAction::Check => ActionKind::Check,
            PlayerAction::Call => ActionKind::Call,
            PlayerAction::Raise(_) => ActionKind::Raise,
            PlayerAction::AllIn => ActionKind::AllIn,
        }
    }
}

/// Action kind as stored in the audit log.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Raise,
    AllIn,
}

impl ActionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Call => "call",
            ActionKind::Raise => "raise",
            ActionKind::AllIn => "all_in",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A seat at one game's table.
///
/// `is_active` means the player was dealt into the current round and has not
/// folded out of it; `is_folded` is kept separately so the round history can
/// tell a fold from a bust. Only players that are active and not folded are
/// ever given a turn.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub game_id: GameId,
    /// Seat number, unique per game, `0..max_players`
    pub position: usize,
    pub chips: u32,
    /// Chips committed in the current betting phase
    pub current_bet: u32,
    pub is_active: bool,
    pub is_folded: bool,
    /// Hole cards, empty between rounds
    pub hand: Vec<Card>,
    pub has_acted: bool,
    pub is_ai: bool,
}

impl Player {
    pub fn new(id: PlayerId, game_id: GameId, position: usize, chips: u32, is_ai: bool) -> Self {
        Self {
            id,
            game_id,
            position,
            chips,
            current_bet: 0,
            is_active: true,
            is_folded: false,
            hand: Vec::with_capacity(2),
            has_acted: false,
            is_ai,
        }
    }

    /// Still contesting the pot.
    pub fn in_hand(&self) -> bool {
        self.is_active && !self.is_folded
    }

    pub fn clear_cards(&mut self) {
        self.hand.clear();
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.chips += amount;
    }

    /// Move up to `amount` chips from the stack into the current bet.
    /// Returns the chips actually moved.
    pub fn commit(&mut self, amount: u32) -> u32 {
        let moved = amount.min(self.chips);
        self.chips -= moved;
        self.current_bet += moved;
        moved
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::deck::Deck;
use crate::errors::GameError;
use crate::player::PlayerId;
use crate::positions;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub u64);

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    Waiting,
    InProgress,
    Finished,
}

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 8;

/// Table parameters fixed at game creation.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableConfig {
    pub max_players: usize,
    pub small_blind: u32,
    pub big_blind: u32,
    pub starting_stack: u32,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            max_players: 6,
            small_blind: 10,
            big_blind: 20,
            starting_stack: 1000,
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.max_players) {
            return Err(GameError::InvalidConfig(format!(
                "max_players must be between {MIN_PLAYERS} and {MAX_PLAYERS}, got {}",
                self.max_players
            )));
        }
        if self.small_blind == 0 || self.big_blind == 0 {
            return Err(GameError::InvalidConfig(
                "blinds must be positive".to_string(),
            ));
        }
        if self.big_blind <= self.small_blind {
            return Err(GameError::InvalidConfig(format!(
                "big blind ({}) must exceed small blind ({})",
                self.big_blind, self.small_blind
            )));
        }
        if self.starting_stack == 0 {
            return Err(GameError::InvalidConfig(
                "starting stack must be positive".to_string(),
            ));
        }
        // every chip on the table must fit in the pot
        if (self.max_players as u64) * u64::from(self.starting_stack) > u64::from(u32::MAX) {
            return Err(GameError::InvalidConfig(format!(
                "{} players with {} chips each exceed the chip limit of {}",
                self.max_players,
                self.starting_stack,
                u32::MAX
            )));
        }
        Ok(())
    }
}

/// Game-level state: status, pot, dealer button and the round's deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub id: GameId,
    pub name: String,
    pub status: GameStatus,
    pub config: TableConfig,
    /// Number of the round in play (0 before the game starts)
    pub current_round: u32,
    pub pot: u32,
    pub dealer_position: usize,
    pub deck: Deck,
    pub created_by: PlayerId,
}

impl Game {
    pub fn new(id: GameId, name: &str, config: TableConfig, created_by: PlayerId) -> Self {
        Self {
            id,
            name: name.trim().to_string(),
            status: GameStatus::Waiting,
            config,
            current_round: 0,
            pot: 0,
            dealer_position: 0,
            deck: Deck::default(),
            created_by,
        }
    }

    pub fn small_blind(&self) -> u32 {
        self.config.small_blind
    }

    pub fn big_blind(&self) -> u32 {
        self.config.big_blind
    }

    /// Move the button to the next seat that still has chips.
    pub fn rotate_dealer(&mut self, funded: &[usize]) {
        if let Some(next) = positions::advance_dealer(funded, self.dealer_position) {
            self.dealer_position = next;
        }
    }
}

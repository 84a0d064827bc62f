//! Persistence and identity collaborators consumed by [`crate::service::GameService`].

use std::collections::{BTreeMap, HashMap};

use crate::errors::StoreError;
use crate::game::{Game, GameId};
use crate::logger::ActionRecord;
use crate::player::{Player, PlayerId};
use crate::round::Round;

/// Which seated players a seat lookup may return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatFilter {
    Any,
    /// Active and not folded
    InHand,
}

/// Storage for games, their players, rounds and action log.
///
/// Implementations only have to be consistent per game: the service
/// serializes all operations on one game id.
pub trait GameStore {
    fn next_game_id(&mut self) -> Result<GameId, StoreError>;

    fn get_game(&self, id: GameId) -> Result<Option<Game>, StoreError>;

    fn put_game(&mut self, game: &Game) -> Result<(), StoreError>;

    /// Players seated in `game`, ordered by seat.
    fn players(&self, game: GameId) -> Result<Vec<Player>, StoreError>;

    fn player_at(&self, game: GameId, position: usize, filter: SeatFilter) -> Result<Option<Player>, StoreError>;

    fn put_player(&mut self, player: &Player) -> Result<(), StoreError>;

    fn remove_player(&mut self, game: GameId, id: &PlayerId) -> Result<(), StoreError>;

    /// The game's round that has not finished yet, if any.
    fn current_round(&self, game: GameId) -> Result<Option<Round>, StoreError>;

    fn round(&self, game: GameId, round_number: u32) -> Result<Option<Round>, StoreError>;

    fn put_round(&mut self, round: &Round) -> Result<(), StoreError>;

    fn append_action(&mut self, game: GameId, action: &ActionRecord) -> Result<(), StoreError>;

    fn actions(&self, game: GameId, round_number: u32) -> Result<Vec<ActionRecord>, StoreError>;
}

/// Issues handles for seated players.
pub trait IdentityProvider {
    /// Handle for the `ordinal`-th automated player added to `game` (1-based).
    fn automated(&mut self, game: GameId, ordinal: usize) -> PlayerId;
}

/// `AI_Player_1`, `AI_Player_2`, ...
#[derive(Debug, Default, Clone)]
pub struct SequentialIdentity;

impl IdentityProvider for SequentialIdentity {
    fn automated(&mut self, _game: GameId, ordinal: usize) -> PlayerId {
        PlayerId(format!("AI_Player_{ordinal}"))
    }
}

/// Simple in-memory store for tests and local hosts.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    next_id: u64,
    games: HashMap<GameId, Game>,
    /// Keyed by seat
    players: HashMap<GameId, BTreeMap<usize, Player>>,
    rounds: HashMap<GameId, BTreeMap<u32, Round>>,
    actions: HashMap<(GameId, u32), Vec<ActionRecord>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl GameStore for InMemoryStore {
    fn next_game_id(&mut self) -> Result<GameId, StoreError> {
        self.next_id += 1;
        Ok(GameId(self.next_id))
    }

    fn get_game(&self, id: GameId) -> Result<Option<Game>, StoreError> {
        Ok(self.games.get(&id).cloned())
    }

    fn put_game(&mut self, game: &Game) -> Result<(), StoreError> {
        self.games.insert(game.id, game.clone());
        Ok(())
    }

    fn players(&self, game: GameId) -> Result<Vec<Player>, StoreError> {
        Ok(self
            .players
            .get(&game)
            .map(|seats| seats.values().cloned().collect())
            .unwrap_or_default())
    }

    fn player_at(&self, game: GameId, position: usize, filter: SeatFilter) -> Result<Option<Player>, StoreError> {
        let found = self.players.get(&game).and_then(|seats| seats.get(&position));
        Ok(found
            .filter(|p| filter == SeatFilter::Any || p.in_hand())
            .cloned())
    }

    fn put_player(&mut self, player: &Player) -> Result<(), StoreError> {
        let seats = self.players.entry(player.game_id).or_default();
        if let Some(other) = seats.get(&player.position) {
            if other.id != player.id {
                return Err(StoreError::Conflict(format!(
                    "seat {} of game {} is held by {}",
                    player.position, player.game_id, other.id
                )));
            }
        }
        // a player never changes seat within a game, but drop any stale entry
        seats.retain(|_, p| p.id != player.id);
        seats.insert(player.position, player.clone());
        Ok(())
    }

    fn remove_player(&mut self, game: GameId, id: &PlayerId) -> Result<(), StoreError> {
        if let Some(seats) = self.players.get_mut(&game) {
            seats.retain(|_, p| &p.id != id);
        }
        Ok(())
    }

    fn current_round(&self, game: GameId) -> Result<Option<Round>, StoreError> {
        Ok(self
            .rounds
            .get(&game)
            .and_then(|rounds| rounds.values().rev().find(|r| !r.is_finished()))
            .cloned())
    }

    fn round(&self, game: GameId, round_number: u32) -> Result<Option<Round>, StoreError> {
        Ok(self
            .rounds
            .get(&game)
            .and_then(|rounds| rounds.get(&round_number))
            .cloned())
    }

    fn put_round(&mut self, round: &Round) -> Result<(), StoreError> {
        self.rounds
            .entry(round.game_id)
            .or_default()
            .insert(round.round_number, round.clone());
        Ok(())
    }

    fn append_action(&mut self, game: GameId, action: &ActionRecord) -> Result<(), StoreError> {
        self.actions
            .entry((game, action.round_number))
            .or_default()
            .push(action.clone());
        Ok(())
    }

    fn actions(&self, game: GameId, round_number: u32) -> Result<Vec<ActionRecord>, StoreError> {
        Ok(self
            .actions
            .get(&(game, round_number))
            .cloned()
            .unwrap_or_default())
    }
}

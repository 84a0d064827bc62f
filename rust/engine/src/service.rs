use rand::RngCore;
use tracing::debug;

use crate::agent::DecisionAgent;
use crate::engine::{Engine, GameSnapshot};
use crate::errors::GameError;
use crate::game::{Game, GameId, TableConfig};
use crate::logger::ActionRecord;
use crate::player::{Player, PlayerAction, PlayerId};
use crate::round::Round;
use crate::store::{GameStore, IdentityProvider, SeatFilter, SequentialIdentity};

/// Parameters for [`GameService::create_game`].
#[derive(Debug, Clone)]
pub struct NewGame {
    pub name: String,
    pub config: TableConfig,
    pub created_by: PlayerId,
    /// Seat the creator as an automated player
    pub creator_is_ai: bool,
}

impl NewGame {
    pub fn new(name: impl Into<String>, config: TableConfig, created_by: PlayerId) -> Self {
        Self {
            name: name.into(),
            config,
            created_by,
            creator_is_ai: false,
        }
    }
}

/// Game operations over a [`GameStore`].
///
/// Each operation loads the game into an [`Engine`], runs the trigger on
/// that copy and writes the result back only if the trigger succeeded, so a
/// rejected request leaves the stored game untouched. Callers must not run
/// two operations on the same game concurrently.
pub struct GameService<S, I = SequentialIdentity> {
    store: S,
    identity: I,
    agent: Box<dyn DecisionAgent>,
}

impl<S: GameStore, I: IdentityProvider> GameService<S, I> {
    pub fn new(store: S, identity: I, agent: Box<dyn DecisionAgent>) -> Self {
        Self {
            store,
            identity,
            agent,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create a waiting game and seat its creator, who takes the button.
    pub fn create_game(&mut self, new: NewGame, rng: &mut dyn RngCore) -> Result<GameSnapshot, GameError> {
        if new.name.trim().is_empty() {
            return Err(GameError::EmptyName);
        }
        new.config.validate()?;

        let id = self.store.next_game_id()?;
        let game = Game::new(id, &new.name, new.config, new.created_by.clone());
        let mut engine = Engine::new(game);
        engine.seat_player(new.created_by, new.creator_is_ai, rng)?;
        self.commit(&mut engine)?;
        Ok(engine.snapshot())
    }

    pub fn join_game(&mut self, id: GameId, player: PlayerId, rng: &mut dyn RngCore) -> Result<Player, GameError> {
        self.update(id, |engine, _| engine.seat_player(player, false, rng).cloned())
    }

    pub fn add_ai_player(&mut self, id: GameId, rng: &mut dyn RngCore) -> Result<Player, GameError> {
        let mut engine = self.load(id)?;
        let first = engine.ai_count() + 1;
        let mut handle = self.identity.automated(id, first);
        // skip handles already taken at this table
        for ordinal in first + 1..=first + engine.players().len() {
            if !engine.players().iter().any(|p| p.id == handle) {
                break;
            }
            handle = self.identity.automated(id, ordinal);
        }
        let player = engine.seat_player(handle, true, rng)?.clone();
        self.commit(&mut engine)?;
        Ok(player)
    }

    /// Leave a game that has not started yet.
    pub fn leave_game(&mut self, id: GameId, player: &PlayerId) -> Result<(), GameError> {
        self.update(id, |engine, _| engine.unseat_player(player))
    }

    pub fn start_game(&mut self, id: GameId, rng: &mut dyn RngCore) -> Result<GameSnapshot, GameError> {
        self.update(id, |engine, agent| {
            engine.start_game(rng, agent)?;
            Ok(engine.snapshot())
        })
    }

    pub fn submit_action(
        &mut self,
        id: GameId,
        player: &PlayerId,
        action: PlayerAction,
        rng: &mut dyn RngCore,
    ) -> Result<ActionRecord, GameError> {
        self.update(id, |engine, agent| engine.submit_action(player, action, rng, agent))
    }

    pub fn advance_phase(&mut self, id: GameId, rng: &mut dyn RngCore) -> Result<GameSnapshot, GameError> {
        self.update(id, |engine, agent| {
            engine.advance_phase(rng, agent)?;
            Ok(engine.snapshot())
        })
    }

    pub fn run_ai_turns(&mut self, id: GameId, rng: &mut dyn RngCore) -> Result<GameSnapshot, GameError> {
        self.update(id, |engine, agent| {
            engine.run_ai_turns(rng, agent)?;
            Ok(engine.snapshot())
        })
    }

    pub fn snapshot(&self, id: GameId) -> Result<GameSnapshot, GameError> {
        Ok(self.load(id)?.snapshot())
    }

    /// Player whose turn it is in the game's open round.
    pub fn current_player(&self, id: GameId) -> Result<Option<Player>, GameError> {
        let Some(round) = self.store.current_round(id)? else {
            return Ok(None);
        };
        if !round.phase.is_betting() || round.is_betting_complete {
            return Ok(None);
        }
        let Some(seat) = round.current_player_position else {
            return Ok(None);
        };
        Ok(self.store.player_at(id, seat, SeatFilter::InHand)?)
    }

    pub fn round(&self, id: GameId, round_number: u32) -> Result<Option<Round>, GameError> {
        Ok(self.store.round(id, round_number)?)
    }

    pub fn actions(&self, id: GameId, round_number: u32) -> Result<Vec<ActionRecord>, GameError> {
        Ok(self.store.actions(id, round_number)?)
    }

    fn load(&self, id: GameId) -> Result<Engine, GameError> {
        let game = self.store.get_game(id)?.ok_or(GameError::GameNotFound(id))?;
        let players = self.store.players(id)?;
        let round = self.store.current_round(id)?;
        Ok(Engine::from_parts(game, players, round))
    }

    fn update<T>(
        &mut self,
        id: GameId,
        op: impl FnOnce(&mut Engine, &dyn DecisionAgent) -> Result<T, GameError>,
    ) -> Result<T, GameError> {
        let mut engine = self.load(id)?;
        let out = op(&mut engine, &*self.agent)?;
        self.commit(&mut engine)?;
        Ok(out)
    }

    fn commit(&mut self, engine: &mut Engine) -> Result<(), GameError> {
        let changes = engine.take_changes();
        let id = engine.game().id;
        for gone in &changes.removed {
            self.store.remove_player(id, gone)?;
        }
        self.store.put_game(engine.game())?;
        for p in engine.players() {
            self.store.put_player(p)?;
        }
        for r in &changes.closed_rounds {
            self.store.put_round(r)?;
        }
        if let Some(r) = engine.round() {
            self.store.put_round(r)?;
        }
        for a in &changes.actions {
            self.store.append_action(id, a)?;
        }
        debug!(
            game_id = %id,
            actions = changes.actions.len(),
            closed_rounds = changes.closed_rounds.len(),
            "game committed"
        );
        Ok(())
    }
}

use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::agent::{DecisionAgent, TurnView};
use crate::errors::GameError;
use crate::game::{Game, GameStatus, MIN_PLAYERS};
use crate::hand::{self, Category};
use crate::logger::{ActionRecord, Payout, ShowdownInfo};
use crate::player::{Player, PlayerAction, PlayerId};
use crate::positions;
use crate::round::{Phase, Round};
use crate::rules;

/// Upper bound on automated turns taken by one pass of the turn loop.
pub const AI_TURN_CEILING: usize = 64;
/// Upper bound on phase transitions made by one trigger.
const DRIVE_CEILING: usize = 16;

/// Point-in-time view of one game, as handed to hosts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub game: Game,
    /// Seated players ordered by seat
    pub players: Vec<Player>,
    pub round: Option<Round>,
}

impl GameSnapshot {
    /// Player whose turn it is, if anyone can act.
    pub fn current_player(&self) -> Option<&Player> {
        let round = self.round.as_ref()?;
        if !round.phase.is_betting() || round.is_betting_complete {
            return None;
        }
        let seat = round.current_player_position?;
        self.players.iter().find(|p| p.position == seat && p.in_hand())
    }

    pub fn player(&self, id: &PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| &p.id == id)
    }

    /// Chips on the table: every stack plus the pot.
    pub fn total_chips(&self) -> u64 {
        self.players.iter().map(|p| u64::from(p.chips)).sum::<u64>() + u64::from(self.game.pot)
    }
}

/// Records produced by an operation that the host must persist besides the
/// game, players and open round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Changes {
    /// Rounds closed during the operation, in order
    pub closed_rounds: Vec<Round>,
    pub actions: Vec<ActionRecord>,
    /// Players who left the table
    pub removed: Vec<PlayerId>,
}

/// Core game engine: one game's table state and its phase state machine.
///
/// Every trigger (start, player action, phase advance, AI turns) runs to
/// completion synchronously. After the trigger itself, the engine keeps
/// playing automated seats and advancing phases while the betting round is
/// complete, stopping when a human seat is on turn or the round reaches
/// showdown. Moving from showdown to the next round is a separate trigger so
/// the host can present the result first.
///
/// # Examples
///
/// ```
/// use holdem_engine::engine::Engine;
/// use holdem_engine::game::{Game, GameId, TableConfig};
/// use holdem_engine::player::PlayerId;
/// use holdem_engine::round::Phase;
/// # use holdem_engine::agent::{AgentError, DecisionAgent, TurnView};
/// # use holdem_engine::player::PlayerAction;
/// # struct Checker;
/// # impl DecisionAgent for Checker {
/// #     fn decide(&self, _: &TurnView<'_>, _: &mut dyn rand::RngCore) -> Result<PlayerAction, AgentError> {
/// #         Ok(PlayerAction::Check)
/// #     }
/// #     fn name(&self) -> &str { "checker" }
/// # }
/// use rand::SeedableRng;
///
/// let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(42);
/// let config = TableConfig { max_players: 2, ..TableConfig::default() };
/// let game = Game::new(GameId(1), "heads-up", config, PlayerId::new("alice"));
/// let mut engine = Engine::new(game);
/// engine.seat_player(PlayerId::new("alice"), false, &mut rng).unwrap();
/// engine.seat_player(PlayerId::new("bob"), false, &mut rng).unwrap();
/// engine.start_game(&mut rng, &Checker).unwrap();
///
/// let snap = engine.snapshot();
/// assert_eq!(snap.game.pot, 30);
/// assert_eq!(snap.round.unwrap().phase, Phase::Preflop);
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    game: Game,
    /// Ordered by seat
    players: Vec<Player>,
    round: Option<Round>,
    changes: Changes,
}

impl Engine {
    pub fn new(game: Game) -> Self {
        Self::from_parts(game, Vec::new(), None)
    }

    /// Rebuild the engine from persisted state.
    pub fn from_parts(game: Game, mut players: Vec<Player>, round: Option<Round>) -> Self {
        players.sort_by_key(|p| p.position);
        Self {
            game,
            players,
            round,
            changes: Changes::default(),
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            game: self.game.clone(),
            players: self.players.clone(),
            round: self.round.clone(),
        }
    }

    /// Hand over the records accumulated since the last call.
    pub fn take_changes(&mut self) -> Changes {
        std::mem::take(&mut self.changes)
    }

    /// Seat a player at a random open seat with the table's starting stack.
    /// The first player seated holds the dealer button.
    pub fn seat_player(
        &mut self,
        id: PlayerId,
        is_ai: bool,
        rng: &mut dyn RngCore,
    ) -> Result<&Player, GameError> {
        if self.game.status != GameStatus::Waiting {
            return Err(GameError::GameNotWaiting);
        }
        if self.players.iter().any(|p| p.id == id) {
            return Err(GameError::AlreadySeated(id));
        }
        if self.players.len() >= self.game.config.max_players {
            return Err(GameError::GameFull);
        }
        let occupied: Vec<usize> = self.players.iter().map(|p| p.position).collect();
        let seat = positions::random_open_seat(&occupied, self.game.config.max_players, rng)
            .ok_or(GameError::GameFull)?;
        if self.players.is_empty() {
            self.game.dealer_position = seat;
        }
        debug!(game_id = %self.game.id, player = %id, seat, is_ai, "player seated");
        let player = Player::new(id, self.game.id, seat, self.game.config.starting_stack, is_ai);
        let at = self.players.partition_point(|p| p.position < seat);
        self.players.insert(at, player);
        Ok(&self.players[at])
    }

    pub fn unseat_player(&mut self, id: &PlayerId) -> Result<(), GameError> {
        if self.game.status != GameStatus::Waiting {
            return Err(GameError::GameNotWaiting);
        }
        let idx = self
            .players
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| GameError::NotSeated(id.clone()))?;
        let player = self.players.remove(idx);
        debug!(game_id = %self.game.id, player = %id, seat = player.position, "player left");
        self.changes.removed.push(player.id);
        Ok(())
    }

    pub fn ai_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_ai).count()
    }

    pub fn start_game(&mut self, rng: &mut dyn RngCore, agent: &dyn DecisionAgent) -> Result<(), GameError> {
        if self.game.status != GameStatus::Waiting {
            return Err(GameError::GameNotWaiting);
        }
        if self.players.len() < MIN_PLAYERS {
            return Err(GameError::NotEnoughPlayers {
                needed: MIN_PLAYERS,
                actual: self.players.len(),
            });
        }
        self.game.status = GameStatus::InProgress;
        self.game.current_round = 1;
        info!(game_id = %self.game.id, players = self.players.len(), "game started");
        self.start_round(rng)?;
        self.drive(rng, agent)
    }

    /// Apply an action for the player on turn, then keep the table moving.
    pub fn submit_action(
        &mut self,
        id: &PlayerId,
        action: PlayerAction,
        rng: &mut dyn RngCore,
        agent: &dyn DecisionAgent,
    ) -> Result<ActionRecord, GameError> {
        if self.game.status != GameStatus::InProgress {
            return Err(GameError::GameNotInProgress);
        }
        let Self {
            game,
            players,
            round,
            changes,
        } = &mut *self;
        let round = round.as_mut().ok_or(GameError::NoActiveRound)?;
        if !round.phase.is_betting() {
            return Err(GameError::BettingClosed(round.phase));
        }
        let idx = players
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| GameError::NotSeated(id.clone()))?;
        if !players[idx].in_hand() {
            return Err(GameError::PlayerNotActive);
        }
        let seat = players[idx].position;
        if round.current_player_position != Some(seat) {
            return Err(GameError::NotPlayersTurn { seat });
        }

        let record = rules::apply_action(game, round, players, idx, action)?;
        changes.actions.push(record.clone());
        round.current_player_position = positions::next_position(&rules::seats_in_hand(players), seat);
        round.is_betting_complete = rules::is_round_complete(round, players);

        self.drive(rng, agent)?;
        Ok(record)
    }

    /// Move the round to its next phase.
    ///
    /// Only allowed once the current betting round is complete, or from
    /// showdown, where it closes the round and deals the next one.
    pub fn advance_phase(&mut self, rng: &mut dyn RngCore, agent: &dyn DecisionAgent) -> Result<(), GameError> {
        if self.game.status != GameStatus::InProgress {
            return Err(GameError::GameNotInProgress);
        }
        let round = self.round.as_ref().ok_or(GameError::NoActiveRound)?;
        if round.phase.is_betting() && !rules::is_round_complete(round, &self.players) {
            return Err(GameError::BettingInProgress);
        }
        self.step_phase(rng)?;
        self.drive(rng, agent)
    }

    /// Let automated seats act until a human is on turn or betting closes.
    pub fn run_ai_turns(&mut self, rng: &mut dyn RngCore, agent: &dyn DecisionAgent) -> Result<(), GameError> {
        if self.game.status != GameStatus::InProgress {
            return Err(GameError::GameNotInProgress);
        }
        if self.round.is_none() {
            return Err(GameError::NoActiveRound);
        }
        self.drive(rng, agent)
    }

    /// Play automated turns and advance completed phases until someone
    /// human must act or showdown is reached.
    fn drive(&mut self, rng: &mut dyn RngCore, agent: &dyn DecisionAgent) -> Result<(), GameError> {
        for _ in 0..DRIVE_CEILING {
            match self.round.as_ref() {
                Some(r) if r.phase.is_betting() => {}
                _ => return Ok(()),
            }
            self.ai_turns(rng, agent)?;
            let complete = self.round.as_ref().is_some_and(|r| r.is_betting_complete);
            if !complete {
                return Ok(());
            }
            self.step_phase(rng)?;
        }
        warn!(game_id = %self.game.id, ceiling = DRIVE_CEILING, "phase driver stopped at its ceiling");
        Ok(())
    }

    fn ai_turns(&mut self, rng: &mut dyn RngCore, agent: &dyn DecisionAgent) -> Result<(), GameError> {
        let Self {
            game,
            players,
            round,
            changes,
        } = self;
        let round = round.as_mut().ok_or(GameError::NoActiveRound)?;

        for _ in 0..AI_TURN_CEILING {
            if rules::is_round_complete(round, players) {
                round.is_betting_complete = true;
                return Ok(());
            }
            let in_hand = rules::seats_in_hand(players);
            let Some(seat) = round.current_player_position else {
                round.current_player_position = in_hand.first().copied();
                continue;
            };
            let Some(idx) = players.iter().position(|p| p.position == seat && p.in_hand()) else {
                round.current_player_position = positions::next_position(&in_hand, seat);
                continue;
            };

            let player = &players[idx];
            if player.has_acted {
                round.current_player_position = positions::next_position(&in_hand, seat);
                continue;
            }
            let action = if player.chips == 0 {
                // all-in seats pass automatically
                if rules::call_amount(player, round.highest_bet) == 0 {
                    PlayerAction::Check
                } else {
                    PlayerAction::Call
                }
            } else if player.is_ai {
                decide(agent, game, round, player, rng)
            } else {
                round.is_betting_complete = false;
                return Ok(());
            };

            let record = match rules::apply_action(game, round, players, idx, action) {
                Ok(record) => record,
                Err(e) if e.is_rejection() => {
                    warn!(game_id = %game.id, seat, error = %e, "automated action rejected, folding");
                    rules::apply_action(game, round, players, idx, PlayerAction::Fold)?
                }
                Err(e) => return Err(e),
            };
            changes.actions.push(record);
            round.current_player_position = positions::next_position(&rules::seats_in_hand(players), seat);
        }

        warn!(game_id = %game.id, ceiling = AI_TURN_CEILING, "automated turn loop stopped at its ceiling");
        round.is_betting_complete = rules::is_round_complete(round, players);
        Ok(())
    }

    fn step_phase(&mut self, rng: &mut dyn RngCore) -> Result<(), GameError> {
        let phase = self.round.as_ref().ok_or(GameError::NoActiveRound)?.phase;
        let contenders = self.players.iter().filter(|p| p.in_hand()).count();
        match phase {
            Phase::Finished => Ok(()),
            Phase::Showdown => self.finish_round(rng),
            Phase::River => self.showdown(),
            _ if contenders <= 1 => self.showdown(),
            _ => self.deal_next_street(),
        }
    }

    /// Burn one card, deal the next street and re-open betting.
    fn deal_next_street(&mut self) -> Result<(), GameError> {
        let Self {
            game,
            players,
            round,
            ..
        } = self;
        let round = round.as_mut().ok_or(GameError::NoActiveRound)?;
        let next = round.phase.next();

        game.deck.burn()?;
        let cards = game.deck.draw_n(next.cards_dealt())?;
        round.community.extend(cards);
        round.phase = next;
        rules::reset_for_next_phase(game, round, players);

        info!(
            game_id = %game.id,
            round = round.round_number,
            phase = next.as_str(),
            community = round.community.len(),
            "phase advanced"
        );
        Ok(())
    }

    /// Compare the remaining hands and pay out the pot.
    fn showdown(&mut self) -> Result<(), GameError> {
        let Self {
            game,
            players,
            round,
            ..
        } = self;
        let round = round.as_mut().ok_or(GameError::NoActiveRound)?;
        round.phase = Phase::Showdown;
        round.current_player_position = None;
        round.is_betting_complete = true;

        let contenders: Vec<usize> = (0..players.len()).filter(|&i| players[i].in_hand()).collect();
        let (mut winners, category) = if contenders.len() <= 1 {
            (contenders, None)
        } else {
            let mut best: Option<Category> = None;
            let mut winners = Vec::new();
            for &i in &contenders {
                let mut cards = players[i].hand.clone();
                cards.extend_from_slice(&round.community);
                let category = hand::best_of(&cards)?;
                match best {
                    Some(b) if category < b => {}
                    Some(b) if category == b => winners.push(i),
                    _ => {
                        best = Some(category);
                        winners = vec![i];
                    }
                }
            }
            (winners, best)
        };

        if winners.is_empty() {
            warn!(game_id = %game.id, round = round.round_number, pot = game.pot, "no contenders at showdown, pot carries over");
            round.showdown = Some(ShowdownInfo {
                winners: Vec::new(),
                payouts: Vec::new(),
                category: None,
                notes: Some("pot carried over".to_string()),
            });
            return Ok(());
        }

        // remainder chips go clockwise starting left of the dealer
        let seats = game.config.max_players.max(1);
        let dealer = game.dealer_position % seats;
        winners.sort_by_key(|&i| (players[i].position + seats - dealer - 1) % seats);

        let count = winners.len() as u32;
        let share = game.pot / count;
        let mut remainder = game.pot % count;
        let mut payouts = Vec::with_capacity(winners.len());
        for &i in &winners {
            let mut amount = share;
            if remainder > 0 {
                amount += 1;
                remainder -= 1;
            }
            let p = &mut players[i];
            p.add_chips(amount);
            payouts.push(Payout {
                player: p.id.clone(),
                seat: p.position,
                amount,
            });
        }

        info!(
            game_id = %game.id,
            round = round.round_number,
            pot = game.pot,
            winners = winners.len(),
            category = category.map(Category::name).unwrap_or("uncontested"),
            "showdown"
        );
        game.pot = 0;
        round.showdown = Some(ShowdownInfo {
            winners: payouts.iter().map(|p| p.player.clone()).collect(),
            payouts,
            category,
            notes: (count > 1).then(|| "split pot".to_string()),
        });
        Ok(())
    }

    /// Close the round, move the button and deal the next round or end the game.
    fn finish_round(&mut self, rng: &mut dyn RngCore) -> Result<(), GameError> {
        let mut round = self.round.take().ok_or(GameError::NoActiveRound)?;
        round.phase = Phase::Finished;
        round.current_player_position = None;
        debug!(game_id = %self.game.id, round = round.round_number, "round finished");
        self.changes.closed_rounds.push(round);

        let funded: Vec<usize> = self.players.iter().filter(|p| p.chips > 0).map(|p| p.position).collect();
        self.game.rotate_dealer(&funded);

        if funded.len() >= MIN_PLAYERS {
            self.game.current_round += 1;
            return self.start_round(rng);
        }

        self.game.status = GameStatus::Finished;
        for p in self.players.iter_mut() {
            p.is_active = p.chips > 0;
            p.current_bet = 0;
            p.has_acted = false;
            p.clear_cards();
        }
        let leader = self.players.iter().max_by_key(|p| p.chips).map(|p| p.id.to_string());
        info!(game_id = %self.game.id, rounds = self.game.current_round, winner = ?leader, "game finished");
        Ok(())
    }

    /// Reset seats, shuffle a fresh deck, deal hole cards and post the blinds.
    fn start_round(&mut self, rng: &mut dyn RngCore) -> Result<(), GameError> {
        if let Some(mut open) = self.round.take() {
            open.phase = Phase::Finished;
            open.current_player_position = None;
            self.changes.closed_rounds.push(open);
        }

        let Self { game, players, .. } = &mut *self;
        for p in players.iter_mut() {
            p.current_bet = 0;
            p.has_acted = false;
            p.is_folded = false;
            p.is_active = p.chips > 0;
            p.clear_cards();
        }

        game.deck.reset(rng);
        let mut round = Round::new(game.id, game.current_round);
        for p in players.iter_mut().filter(|p| p.is_active) {
            p.hand = game.deck.draw_n(2)?;
        }

        let posted = rules::apply_blinds(game, &mut round, players);
        let in_hand = rules::seats_in_hand(players);
        let blinds = rules::blind_seats(players);
        round.current_player_position = positions::preflop_first_actor(&in_hand, &blinds, game.dealer_position);

        info!(
            game_id = %game.id,
            round = round.round_number,
            dealer = game.dealer_position,
            small_blind = ?posted.small_blind,
            big_blind = ?posted.big_blind,
            "round started"
        );
        self.round = Some(round);
        Ok(())
    }
}

fn decide(
    agent: &dyn DecisionAgent,
    game: &Game,
    round: &Round,
    player: &Player,
    rng: &mut dyn RngCore,
) -> PlayerAction {
    let view = TurnView {
        hole: &player.hand,
        community: &round.community,
        phase: round.phase,
        pot: game.pot,
        to_call: rules::call_amount(player, round.highest_bet),
        chips: player.chips,
        big_blind: game.big_blind(),
    };
    match agent.decide(&view, rng) {
        Ok(action) => {
            debug!(game_id = %game.id, seat = player.position, agent = agent.name(), ?action, "automated decision");
            action
        }
        Err(e) => {
            warn!(game_id = %game.id, seat = player.position, error = %e, "agent failed, folding");
            PlayerAction::Fold
        }
    }
}

use chrono::Utc;
use tracing::debug;

use crate::errors::GameError;
use crate::game::Game;
use crate::logger::ActionRecord;
use crate::player::{Player, PlayerAction as A};
use crate::positions;
use crate::round::{Phase, Round};

/// An action checked against the table, carrying the chips it will move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Check,
    Call(u32),
    Raise(u32),
    AllIn(u32),
}

impl ValidatedAction {
    /// Chips this action moves from the stack into the pot.
    pub fn chips(&self) -> u32 {
        match *self {
            ValidatedAction::Fold | ValidatedAction::Check => 0,
            ValidatedAction::Call(n) | ValidatedAction::Raise(n) | ValidatedAction::AllIn(n) => n,
        }
    }
}

/// Seats that posted the blinds and what they actually paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PostedBlinds {
    pub small_blind: Option<(usize, u32)>,
    pub big_blind: Option<(usize, u32)>,
}

/// Chips `player` must add to match `highest_bet`.
pub fn call_amount(player: &Player, highest_bet: u32) -> u32 {
    highest_bet.saturating_sub(player.current_bet)
}

/// Seats dealt into the round, used for blind placement.
///
/// Folded seats stay in the set so the blind positions, and therefore
/// postflop turn order, do not shift when someone folds.
pub fn blind_seats(players: &[Player]) -> Vec<usize> {
    seats_where(players, |p| p.is_active || p.is_folded)
}

/// Seats still contesting the pot, used for turn order.
pub fn seats_in_hand(players: &[Player]) -> Vec<usize> {
    seats_where(players, Player::in_hand)
}

fn seats_where(players: &[Player], keep: impl Fn(&Player) -> bool) -> Vec<usize> {
    let mut seats: Vec<usize> = players.iter().filter(|p| keep(p)).map(|p| p.position).collect();
    seats.sort_unstable();
    seats
}

/// Post the small and big blind.
///
/// A blind is only taken from a stack that can cover it in full; a short
/// stack posts nothing rather than going all-in. `highest_bet` becomes the
/// largest blind actually posted. Blind posters still get their turn.
pub fn apply_blinds(game: &mut Game, round: &mut Round, players: &mut [Player]) -> PostedBlinds {
    let active = blind_seats(players);
    let dealer = game.dealer_position;
    let mut posted = PostedBlinds::default();

    let sb_seat = positions::small_blind(&active, dealer);
    let bb_seat = positions::big_blind(&active, dealer);
    for (seat, blind, slot) in [
        (sb_seat, game.small_blind(), &mut posted.small_blind),
        (bb_seat, game.big_blind(), &mut posted.big_blind),
    ] {
        let Some(seat) = seat else { continue };
        let Some(p) = players.iter_mut().find(|p| p.position == seat && p.is_active) else {
            continue;
        };
        if p.chips < blind {
            debug!(seat, blind, chips = p.chips, "blind not posted, stack too short");
            continue;
        }
        p.commit(blind);
        p.has_acted = false;
        game.pot += blind;
        round.highest_bet = round.highest_bet.max(p.current_bet);
        *slot = Some((seat, blind));
    }
    posted
}

/// Validates a player action according to betting rules and stack size.
///
/// Converts a [`crate::player::PlayerAction`] into a [`ValidatedAction`]
/// holding the chips that will actually move. Calls and raises are capped at
/// the player's stack.
///
/// # Errors
///
/// - [`GameError::CannotCheck`] - the player's bet is below the highest bet
/// - [`GameError::InvalidBetAmount`] - a raise of zero chips
///
/// # Examples
///
/// ```
/// use holdem_engine::game::GameId;
/// use holdem_engine::player::{Player, PlayerAction, PlayerId};
/// use holdem_engine::rules::{validate_action, ValidatedAction};
///
/// let mut p = Player::new(PlayerId::new("alice"), GameId(1), 0, 100, false);
/// p.current_bet = 10;
///
/// // Call the 10 chips still owed
/// assert_eq!(validate_action(&p, 20, PlayerAction::Call), Ok(ValidatedAction::Call(10)));
/// // Call 10 then raise 500 more, capped at the stack
/// assert_eq!(validate_action(&p, 20, PlayerAction::Raise(500)), Ok(ValidatedAction::Raise(100)));
/// ```
pub fn validate_action(player: &Player, highest_bet: u32, action: A) -> Result<ValidatedAction, GameError> {
    let to_call = call_amount(player, highest_bet);
    match action {
        A::Fold => Ok(ValidatedAction::Fold),
        A::Check => {
            if player.current_bet == highest_bet {
                Ok(ValidatedAction::Check)
            } else {
                Err(GameError::CannotCheck { to_call })
            }
        }
        A::Call => Ok(ValidatedAction::Call(to_call.min(player.chips))),
        A::Raise(0) => Err(GameError::InvalidBetAmount {
            amount: 0,
            minimum: 1,
        }),
        A::Raise(amount) => Ok(ValidatedAction::Raise(
            to_call.saturating_add(amount).min(player.chips),
        )),
        A::AllIn => Ok(ValidatedAction::AllIn(player.chips)),
    }
}

/// Apply `action` for the player at index `idx` of `players`.
///
/// Nothing is mutated when validation fails. On success the chips move into
/// the pot, the player is marked as having acted, and a raise or all-in that
/// lifts the highest bet re-opens the action for every other player still in
/// the hand whose bet is now short.
pub fn apply_action(
    game: &mut Game,
    round: &mut Round,
    players: &mut [Player],
    idx: usize,
    action: A,
) -> Result<ActionRecord, GameError> {
    let validated = validate_action(&players[idx], round.highest_bet, action)?;
    let chips = validated.chips();
    let raised = {
        let p = &mut players[idx];
        if validated == ValidatedAction::Fold {
            p.is_folded = true;
            p.is_active = false;
        }
        let moved = p.commit(chips);
        game.pot += moved;
        p.has_acted = true;
        p.current_bet > round.highest_bet
    };

    if raised {
        round.highest_bet = players[idx].current_bet;
        let highest = round.highest_bet;
        for (i, other) in players.iter_mut().enumerate() {
            if i != idx && other.in_hand() && other.current_bet < highest {
                other.has_acted = false;
            }
        }
    }

    let p = &players[idx];
    debug!(
        game_id = %game.id,
        round = round.round_number,
        seat = p.position,
        action = %action.kind(),
        amount = chips,
        pot = game.pot,
        "action applied"
    );
    Ok(ActionRecord {
        player: p.id.clone(),
        seat: p.position,
        round_number: round.round_number,
        phase: round.phase,
        kind: action.kind(),
        amount: chips,
        timestamp: Utc::now(),
    })
}

/// True once no more betting is possible in the current phase.
pub fn is_round_complete(round: &Round, players: &[Player]) -> bool {
    let in_hand: Vec<&Player> = players.iter().filter(|p| p.in_hand()).collect();
    if in_hand.len() <= 1 {
        return true;
    }
    in_hand
        .iter()
        .all(|p| p.has_acted && (p.current_bet == round.highest_bet || p.chips == 0))
}

/// Clear bets for a new betting phase and point the turn at its first actor.
pub fn reset_for_next_phase(game: &Game, round: &mut Round, players: &mut [Player]) {
    for p in players.iter_mut() {
        p.current_bet = 0;
        p.has_acted = false;
    }
    round.highest_bet = 0;
    round.is_betting_complete = false;

    let in_hand = seats_in_hand(players);
    let blinds = blind_seats(players);
    round.current_player_position = if round.phase == Phase::Preflop {
        positions::preflop_first_actor(&in_hand, &blinds, game.dealer_position)
    } else {
        positions::postflop_first_actor(&in_hand, &blinds, game.dealer_position)
    };
}

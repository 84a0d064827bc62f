//! Baseline heuristic agent.
//!
//! Rates the seat's cards with [`holdem_engine::hand::strength`], perturbs the
//! rating with a random jitter and picks an action from a few fixed
//! thresholds. All randomness is drawn from the `rng` handed in by the engine,
//! so a seeded game replays exactly.

use holdem_engine::agent::{AgentError, DecisionAgent, TurnView};
use holdem_engine::hand;
use holdem_engine::player::PlayerAction;
use rand::{Rng, RngCore};
use tracing::trace;

/// Chance of raising a strong hand into a bet.
const RAISE_PROBABILITY: f64 = 0.7;
/// Chance of betting a strong hand when nobody has bet.
const BET_PROBABILITY: f64 = 0.8;
/// Chance of calling a small bet with a weak hand.
const BLUFF_PROBABILITY: f64 = 0.1;

/// Random draws for one decision.
///
/// `jitter` scales the hand strength and lies in `[0.8, 1.2]`; the three
/// gates are uniform in `[0, 1)` and pass when below their probability.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rolls {
    pub jitter: f64,
    pub aggression: f64,
    pub bet: f64,
    pub bluff: f64,
}

impl Rolls {
    pub fn draw(rng: &mut dyn RngCore) -> Self {
        Self {
            jitter: rng.random_range(0.8..=1.2),
            aggression: rng.random::<f64>(),
            bet: rng.random::<f64>(),
            bluff: rng.random::<f64>(),
        }
    }

    /// No jitter and every gate closed.
    pub fn neutral() -> Self {
        Self {
            jitter: 1.0,
            aggression: 1.0,
            bet: 1.0,
            bluff: 1.0,
        }
    }
}

/// Rule-based opponent used for simulations and as the default AI seat.
///
/// # Strategy
///
/// With `s` the jittered strength on the 1-10 scale:
///
/// - Calling would take the whole stack: all-in with `s >= 6`, else fold
/// - `s >= 7`: raise half the pot into a bet, bet a third of the pot when
///   unopposed, both floored at the big blind and gated by a random roll
/// - `4 <= s < 7`: call cheap bets (a quarter of the pot or two big blinds),
///   otherwise fold; check when unopposed
/// - `s < 4`: occasionally call a bet of at most one big blind, otherwise
///   fold; check when unopposed
///
/// A raise the stack cannot cover becomes an all-in.
///
/// # Example
///
/// ```rust
/// use holdem_ai::baseline::{BaselineAI, Rolls};
/// use holdem_engine::agent::TurnView;
/// use holdem_engine::cards::{Card, Rank, Suit};
/// use holdem_engine::player::PlayerAction;
/// use holdem_engine::round::Phase;
///
/// let hole = [Card::new(Rank::Ace, Suit::Spades), Card::new(Rank::Ace, Suit::Hearts)];
/// let view = TurnView {
///     hole: &hole,
///     community: &[],
///     phase: Phase::Preflop,
///     pot: 30,
///     to_call: 10,
///     chips: 990,
///     big_blind: 20,
/// };
/// // strong hand, aggression gate closed: just call
/// assert_eq!(BaselineAI::choose(&view, 10, Rolls::neutral()), PlayerAction::Call);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BaselineAI;

impl BaselineAI {
    pub fn new() -> Self {
        Self
    }

    /// Pick an action for `view` given a raw `strength` and the random draws.
    pub fn choose(view: &TurnView<'_>, strength: u8, rolls: Rolls) -> PlayerAction {
        let adjusted = f64::from(strength) * rolls.jitter;
        let call = view.to_call;
        let chips = view.chips;
        let bb = view.big_blind;
        let facing = call > 0;

        if facing && call >= chips {
            return if adjusted >= 6.0 {
                PlayerAction::AllIn
            } else {
                PlayerAction::Fold
            };
        }

        if adjusted >= 7.0 {
            if facing {
                if chips > call && rolls.aggression < RAISE_PROBABILITY {
                    let amount = bb.max((view.pot / 2).min(chips - call));
                    return Self::raise_or_shove(call, amount, chips);
                }
                return PlayerAction::Call;
            }
            if rolls.bet < BET_PROBABILITY {
                let amount = bb.max((view.pot / 3).min(chips));
                return Self::raise_or_shove(0, amount, chips);
            }
            return PlayerAction::Check;
        }

        if !facing {
            return PlayerAction::Check;
        }
        if adjusted >= 4.0 {
            if call <= view.pot / 4 || call <= bb.saturating_mul(2) {
                PlayerAction::Call
            } else {
                PlayerAction::Fold
            }
        } else if rolls.bluff < BLUFF_PROBABILITY && call <= bb {
            PlayerAction::Call
        } else {
            PlayerAction::Fold
        }
    }

    fn raise_or_shove(call: u32, amount: u32, chips: u32) -> PlayerAction {
        if call.saturating_add(amount) > chips {
            PlayerAction::AllIn
        } else {
            PlayerAction::Raise(amount)
        }
    }
}

impl DecisionAgent for BaselineAI {
    fn decide(&self, view: &TurnView<'_>, rng: &mut dyn RngCore) -> Result<PlayerAction, AgentError> {
        if view.hole.len() != 2 {
            return Err(AgentError::MissingHoleCards(view.hole.len()));
        }
        let strength = hand::strength(view.hole, view.community);
        let rolls = Rolls::draw(rng);
        let action = Self::choose(view, strength, rolls);
        trace!(strength, jitter = rolls.jitter, to_call = view.to_call, ?action, "baseline decision");
        Ok(action)
    }

    fn name(&self) -> &str {
        "BaselineAI"
    }
}

//! # holdem-ai: automated players for the Hold'em engine
//!
//! Implementations of the engine's [`DecisionAgent`] seam. The engine calls
//! the agent whenever an automated seat is on turn, validates what comes back
//! and folds the seat if the agent fails or asks for an illegal action.
//!
//! ## Core Components
//!
//! - [`baseline`] - Heuristic agent driven by hand strength and pot size
//! - [`create_ai`] - Factory for agents by kind
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_ai::create_ai;
//! use holdem_engine::agent::TurnView;
//! use holdem_engine::cards::{Card, Rank, Suit};
//! use holdem_engine::round::Phase;
//! use rand::SeedableRng;
//!
//! let ai = create_ai("baseline").unwrap();
//! let hole = [Card::new(Rank::Seven, Suit::Hearts), Card::new(Rank::Two, Suit::Clubs)];
//! let view = TurnView {
//!     hole: &hole,
//!     community: &[],
//!     phase: Phase::Preflop,
//!     pot: 30,
//!     to_call: 0,
//!     chips: 980,
//!     big_blind: 20,
//! };
//! let mut rng = rand_chacha::ChaCha20Rng::seed_from_u64(42);
//! let action = ai.decide(&view, &mut rng).unwrap();
//! println!("{} chose {:?}", ai.name(), action);
//! ```

use thiserror::Error;

pub use holdem_engine::agent::{AgentError, DecisionAgent, TurnView};

pub mod baseline;

/// Agent kinds accepted by [`create_ai`].
pub const AVAILABLE: &[&str] = &["baseline"];

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown AI kind '{0}' (available: baseline)")]
pub struct UnknownAgent(pub String);

/// Build an agent by kind.
///
/// # Errors
///
/// [`UnknownAgent`] when `kind` is not one of [`AVAILABLE`].
///
/// # Example
///
/// ```rust
/// use holdem_ai::create_ai;
///
/// let ai = create_ai("baseline").unwrap();
/// assert_eq!(ai.name(), "BaselineAI");
/// assert!(create_ai("oracle").is_err());
/// ```
pub fn create_ai(kind: &str) -> Result<Box<dyn DecisionAgent>, UnknownAgent> {
    match kind {
        "baseline" => Ok(Box::new(baseline::BaselineAI::new())),
        other => Err(UnknownAgent(other.to_string())),
    }
}

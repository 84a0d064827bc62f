//! # holdem-engine: Texas Hold'em Rules Engine
//!
//! A deterministic rules engine for multiplayer (2-8 seat) Texas Hold'em.
//! It deals cards, ranks hands, rotates the dealer and blinds, enforces
//! betting rules and drives each round from preflop to showdown. Automated
//! seats are played through the [`agent::DecisionAgent`] seam; randomness is
//! always injected so a seeded host can replay a game exactly.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Shuffled deck with seeded construction
//! - [`hand`] - Hand categories, best-of-N evaluation and strength scoring
//! - [`positions`] - Dealer, blind and turn-order seat arithmetic
//! - [`rules`] - Blinds, action validation and betting-round completion
//! - [`player`], [`game`], [`round`] - Table data model
//! - [`engine`] - Round phase state machine and automated turn loop
//! - [`agent`] - Decision interface for automated players
//! - [`store`] - Persistence and identity collaborators
//! - [`service`] - Load, compute and commit game operations
//! - [`logger`] - Action log entries and JSONL round history
//! - [`errors`] - Error types for game operations
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::{Card, Rank, Suit};
//! use holdem_engine::hand::{best_of, Category};
//!
//! let cards = [
//!     Card::new(Rank::Ace, Suit::Spades),
//!     Card::new(Rank::King, Suit::Spades),
//!     Card::new(Rank::Queen, Suit::Spades),
//!     Card::new(Rank::Jack, Suit::Spades),
//!     Card::new(Rank::Ten, Suit::Spades),
//!     Card::new(Rank::Two, Suit::Clubs),
//!     Card::new(Rank::Three, Suit::Diamonds),
//! ];
//!
//! assert_eq!(best_of(&cards), Ok(Category::RoyalFlush));
//! ```
//!
//! ## Deterministic Gameplay
//!
//! ```rust
//! use holdem_engine::deck::Deck;
//!
//! // Same seed produces same shuffle
//! assert_eq!(Deck::new_with_seed(42), Deck::new_with_seed(42));
//! ```

pub mod agent;
pub mod cards;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod logger;
pub mod player;
pub mod positions;
pub mod round;
pub mod rules;
pub mod service;
pub mod store;

//! # holdem_core
//!
//! Core engine for a Texas Hold'em tournament: cards, hand evaluation,
//! Monte Carlo equity, the betting-round state machine, side-pot
//! accounting, single-hand orchestration, and the tournament loop.
//!
//! Terminal rendering, rule-based decision policy, an external-process AI
//! decider, config file loading, and CLI argument parsing are deliberately
//! out of scope — those collaborators plug in through the [`Decider`] and
//! [`Observer`] traits.
//!
//! ## Quick start
//!
//! ```rust
//! use holdem_core::{Card, evaluate};
//!
//! let seven: Vec<Card> = ["As", "Ad", "Ah", "Kc", "Ks", "2d", "3c"]
//!     .iter()
//!     .map(|s| Card::parse(s).unwrap())
//!     .collect();
//! let value = evaluate(&seven).unwrap();
//! println!("{value}"); // "Full House"
//! ```

pub mod action;
pub mod betting;
pub mod card;
pub mod deck;
pub mod equity;
pub mod error;
pub mod hand;
pub mod observer;
pub mod player;
pub mod position;
pub mod pot;
pub mod table;
pub mod tournament;

// Convenience re-exports at crate root.
pub use action::{Action, Decider, FoldingDecider, ScriptedDecider};
pub use betting::BettingRound;
pub use card::{Card, Rank, Suit};
pub use deck::Deck;
pub use equity::{estimate_equity, EquityResult};
pub use error::EngineError;
pub use hand::{evaluate, Category, HandValue};
pub use observer::{NullObserver, Observer, RecordingObserver};
pub use player::{Player, PlayerActionContext, Street};
pub use position::{position_from_utg_distance, Position};
pub use pot::{build_side_pots, SidePot};
pub use table::{HandResult, Table};
pub use tournament::{BlindLevel, Tournament, TournamentConfig};

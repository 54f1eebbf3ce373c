//! Error kinds surfaced to callers.
//!
//! Decider misbehavior and illegal actions are never surfaced as errors —
//! they are canonicalized in place by [`crate::betting`] per the rules in
//! `SPEC_FULL.md` §4.4/§7. Only programmer errors reach this type.

use thiserror::Error;

/// Errors surfaced by this crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// A card or hand-key string could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// An operation received the wrong number or shape of cards.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A deck was asked to deal more cards than remain. Non-recoverable:
    /// a correctly driven hand never exhausts a 52-card deck.
    #[error("deck exhausted")]
    Exhausted,
}

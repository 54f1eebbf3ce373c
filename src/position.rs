//! Table position labeling.
//!
//! `Position` is ordered by preflop action: UTG acts first, BB acts last.
//! The ordinal value reflects preflop seating distance from UTG, not
//! postflop action order (which reverses: blinds first, button last).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Position {
    Utg = 0,
    Utg1 = 1,
    Mp = 2,
    Hj = 3,
    Co = 4,
    Btn = 5,
    Sb = 6,
    Bb = 7,
}

impl Position {
    /// Full human-readable label, e.g. "Under the Gun (UTG)".
    pub fn label(self) -> &'static str {
        match self {
            Position::Utg => "Under the Gun (UTG)",
            Position::Utg1 => "UTG+1",
            Position::Mp => "Middle Position (MP)",
            Position::Hj => "Hijack (HJ)",
            Position::Co => "Cutoff (CO)",
            Position::Btn => "Button (BTN)",
            Position::Sb => "Small Blind (SB)",
            Position::Bb => "Big Blind (BB)",
        }
    }

    /// Short abbreviation, e.g. "UTG", "BTN".
    pub fn short(self) -> &'static str {
        match self {
            Position::Utg => "UTG",
            Position::Utg1 => "UTG+1",
            Position::Mp => "MP",
            Position::Hj => "HJ",
            Position::Co => "CO",
            Position::Btn => "BTN",
            Position::Sb => "SB",
            Position::Bb => "BB",
        }
    }

    pub fn is_early(self) -> bool {
        matches!(self, Position::Utg | Position::Utg1)
    }

    pub fn is_middle(self) -> bool {
        matches!(self, Position::Mp | Position::Hj)
    }

    pub fn is_late(self) -> bool {
        matches!(self, Position::Co | Position::Btn)
    }

    pub fn is_blind(self) -> bool {
        matches!(self, Position::Sb | Position::Bb)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Map a seat's UTG distance to a named [`Position`].
///
/// Works backward from the blinds: the last seat is always BB,
/// second-to-last SB, then BTN, CO, HJ. Remaining early seats compress into
/// UTG / UTG+1 / MP. `utg_distance` must be in `0..total_players`.
pub fn position_from_utg_distance(
    utg_distance: usize,
    total_players: usize,
) -> Result<Position, EngineError> {
    if total_players == 0 || utg_distance >= total_players {
        return Err(EngineError::InvalidInput(format!(
            "utg_distance must be 0..{total_players}, got {utg_distance}"
        )));
    }

    let from_end = total_players - 1 - utg_distance;
    Ok(match from_end {
        0 => Position::Bb,
        1 => Position::Sb,
        2 => Position::Btn,
        3 => Position::Co,
        4 => Position::Hj,
        _ => match utg_distance {
            0 => Position::Utg,
            1 => Position::Utg1,
            _ => Position::Mp,
        },
    })
}

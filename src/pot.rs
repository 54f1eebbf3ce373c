//! Side-pot construction from player bet counters.
//!
//! Pure function over player state; never consults the running pot total
//! and never mutates players.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::player::Player;

/// A single pot (main or side) with its eligible winners, named by seat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidePot {
    pub amount: u64,
    pub eligible_seats: Vec<u32>,
}

/// Build side pots from `players`' `total_bet_this_hand` counters.
///
/// Algorithm: collect the distinct positive bet levels, sorted ascending.
/// For each level, every contributor adds `min(bet, level) - min(bet,
/// prev_level)`; eligibility at that level is every non-folded player whose
/// bet reaches it. A player with `total_bet_this_hand == 0` (folded before
/// matching any blind) is dropped from pot enumeration entirely — their
/// chips never entered a pot, so there is nothing to assign to them or
/// anyone else.
pub fn build_side_pots(players: &[Player]) -> Vec<SidePot> {
    let in_hand: Vec<&Player> = players
        .iter()
        .filter(|p| p.total_bet_this_hand > 0)
        .collect();
    if in_hand.is_empty() {
        return Vec::new();
    }

    let levels: BTreeSet<u64> = in_hand.iter().map(|p| p.total_bet_this_hand).collect();

    let mut pots = Vec::new();
    let mut prev = 0u64;
    for level in levels {
        let amount: u64 = in_hand
            .iter()
            .map(|p| p.total_bet_this_hand.min(level) - p.total_bet_this_hand.min(prev))
            .sum();

        let eligible_seats: Vec<u32> = in_hand
            .iter()
            .filter(|p| !p.is_folded && p.total_bet_this_hand >= level)
            .map(|p| p.seat)
            .collect();

        if amount > 0 {
            pots.push(SidePot {
                amount,
                eligible_seats,
            });
        }
        prev = level;
    }

    debug_assert!(
        pots.windows(2).all(|w| w[1].eligible_seats.iter().all(|s| w[0].eligible_seats.contains(s))),
        "eligibility at a higher pot level must be a subset of the level below it"
    );

    pots
}

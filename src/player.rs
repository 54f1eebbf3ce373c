//! Per-seat player state and the read-only snapshot handed to deciders.

use serde::{Deserialize, Serialize};

use crate::card::Card;

/// The four betting rounds of a hold'em hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub fn label(self) -> &'static str {
        match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        }
    }
}

impl std::fmt::Display for Street {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A player at the table. Owned by the tournament between hands; borrowed by
/// the hand orchestrator (and, transitively, the betting round) while a hand
/// is in progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub seat: u32,
    pub chips: u64,
    pub hole_cards: Vec<Card>,
    pub current_bet: u64,
    pub total_bet_this_hand: u64,
    pub is_folded: bool,
    pub is_all_in: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, seat: u32, chips: u64) -> Player {
        Player {
            name: name.into(),
            seat,
            chips,
            hole_cards: Vec::new(),
            current_bet: 0,
            total_bet_this_hand: 0,
            is_folded: false,
            is_all_in: false,
        }
    }

    /// Still competing for the pot (hasn't folded).
    pub fn is_in_hand(&self) -> bool {
        !self.is_folded
    }

    /// Can still voluntarily act this round.
    pub fn is_active(&self) -> bool {
        !self.is_folded && !self.is_all_in && self.chips > 0
    }

    /// Out of the tournament: no chips and not riding an all-in this hand.
    pub fn is_eliminated(&self) -> bool {
        self.chips == 0 && !self.is_all_in
    }

    /// Reset all per-hand state. Called once at the start of each hand for
    /// every alive player.
    pub fn reset_for_new_hand(&mut self) {
        self.hole_cards.clear();
        self.is_folded = false;
        self.is_all_in = false;
        self.current_bet = 0;
        self.total_bet_this_hand = 0;
    }

    /// Reset per-street state only; `total_bet_this_hand` persists.
    pub fn reset_for_new_round(&mut self) {
        self.current_bet = 0;
    }

    /// Commit chips to the pot, capped at the player's stack. Returns the
    /// actual amount committed and sets `is_all_in` if it exhausts the stack.
    pub fn bet(&mut self, amount: u64) -> u64 {
        let actual = amount.min(self.chips);
        self.chips -= actual;
        self.current_bet += actual;
        self.total_bet_this_hand += actual;
        if self.chips == 0 {
            self.is_all_in = true;
        }
        actual
    }

    pub fn fold(&mut self) {
        self.is_folded = true;
    }
}

/// Read-only snapshot passed to a [`crate::action::Decider`] when it is
/// asked to act.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerActionContext {
    pub hole_cards: Vec<Card>,
    pub community: Vec<Card>,
    pub pot_total: u64,
    /// `max(0, table_current_bet - player.current_bet)`.
    pub to_call: u64,
    /// `table_current_bet + min_raise`: the smallest legal raise-to amount.
    pub min_raise_to: u64,
    /// `player.current_bet + player.chips`: the largest legal raise-to
    /// amount (an all-in).
    pub max_raise_to: u64,
    pub street: Street,
    pub num_active_players: usize,
    pub position_label: String,
}

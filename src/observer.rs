//! Event callbacks fired by the hand orchestrator and tournament loop.
//!
//! Grounded on the `Callable` hook fields threaded through
//! `original_source/table.py` and `tournament.py` (`on_deal`,
//! `on_before_action`, `on_action`, `on_showdown`, blind/elimination
//! notices). All methods default to no-ops so an embedder only implements
//! the events it cares about.

use crate::action::Action;
use crate::card::Card;
use crate::hand::HandValue;
use crate::player::{Player, Street};
use crate::pot::SidePot;
use crate::table::HandResult;

/// Observer hooks, called synchronously and in order from within
/// `Table::play_hand` / `Tournament::run`. An implementation must return
/// promptly — the core makes no allowance for a slow observer and does not
/// run these on a separate thread (`SPEC_FULL.md` §5).
pub trait Observer {
    fn on_hand_start(&mut self, hand_number: u64, blind_level: usize, dealer_seat: u32) {
        let _ = (hand_number, blind_level, dealer_seat);
    }

    fn on_deal(&mut self, street: Street, community: &[Card]) {
        let _ = (street, community);
    }

    fn on_before_action(&mut self, player: &Player) {
        let _ = player;
    }

    fn on_action(&mut self, player: &Player, action: Action) {
        let _ = (player, action);
    }

    /// Fired once per hand with every pot awarded (main and side), each
    /// paired with its winning seats and their evaluated hand values.
    fn on_showdown(&mut self, per_pot_winners: &[(SidePot, Vec<(u32, HandValue)>)]) {
        let _ = per_pot_winners;
    }

    fn on_hand_end(&mut self, result: &HandResult) {
        let _ = result;
    }

    fn on_blind_increase(&mut self, level_idx: usize, small_blind: u64, big_blind: u64) {
        let _ = (level_idx, small_blind, big_blind);
    }

    fn on_elimination(&mut self, seat: u32, finish_place: u32) {
        let _ = (seat, finish_place);
    }

    fn on_tournament_end(&mut self, winner_seat: u32) {
        let _ = winner_seat;
    }
}

/// No-op observer: the default when an embedder doesn't care about events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullObserver;

impl Observer for NullObserver {}

/// Test/reference fixture: records every event fired, for assertions in
/// orchestrator tests.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    pub hand_starts: Vec<(u64, usize, u32)>,
    pub deals: Vec<(Street, Vec<Card>)>,
    pub actions: Vec<(u32, Action)>,
    pub showdowns: usize,
    pub hand_ends: Vec<bool>,
    pub blind_increases: Vec<(usize, u64, u64)>,
    pub eliminations: Vec<(u32, u32)>,
    pub tournament_end: Option<u32>,
}

impl Observer for RecordingObserver {
    fn on_hand_start(&mut self, hand_number: u64, blind_level: usize, dealer_seat: u32) {
        self.hand_starts.push((hand_number, blind_level, dealer_seat));
    }

    fn on_deal(&mut self, street: Street, community: &[Card]) {
        self.deals.push((street, community.to_vec()));
    }

    fn on_action(&mut self, player: &Player, action: Action) {
        self.actions.push((player.seat, action));
    }

    fn on_showdown(&mut self, per_pot_winners: &[(SidePot, Vec<(u32, HandValue)>)]) {
        self.showdowns += per_pot_winners.len();
    }

    fn on_hand_end(&mut self, result: &HandResult) {
        self.hand_ends.push(result.went_to_showdown);
    }

    fn on_blind_increase(&mut self, level_idx: usize, small_blind: u64, big_blind: u64) {
        self.blind_increases.push((level_idx, small_blind, big_blind));
    }

    fn on_elimination(&mut self, seat: u32, finish_place: u32) {
        self.eliminations.push((seat, finish_place));
    }

    fn on_tournament_end(&mut self, winner_seat: u32) {
        self.tournament_end = Some(winner_seat);
    }
}

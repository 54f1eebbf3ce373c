//! The single-hand orchestrator: blinds, deal, four betting streets,
//! showdown.
//!
//! Grounded on `original_source/table.py::Table.play_hand`. The bot-specific
//! BB-to-chip conversion adapter (`_get_bot_action`/`_get_ai_bot_action`) is
//! deliberately not reproduced here — this crate's `Decider`/`get_action`
//! boundary already speaks chips, so that adapter layer belongs to whatever
//! external decider needs it, not to the core orchestrator.

use std::cell::RefCell;
use std::collections::HashMap;

use log::{debug, warn};
use rand::Rng;

use crate::action::Action;
use crate::betting::BettingRound;
use crate::card::Card;
use crate::deck::Deck;
use crate::error::EngineError;
use crate::hand::{evaluate, HandValue};
use crate::observer::Observer;
use crate::player::{Player, PlayerActionContext, Street};
use crate::position::position_from_utg_distance;
use crate::pot::{build_side_pots, SidePot};

const STREETS: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

/// Outcome of a single hand.
#[derive(Debug, Clone)]
pub struct HandResult {
    pub pots: Vec<SidePot>,
    /// One entry per awarded pot: the pot itself, the winning seats, and
    /// the winning hand value (`None` when the hand ended by folds, since
    /// there was no showdown to evaluate).
    pub pot_winners: Vec<(SidePot, Vec<u32>, Option<HandValue>)>,
    pub community: Vec<Card>,
    pub went_to_showdown: bool,
}

/// Orchestrates one hand of Texas Hold'em for a fixed seat/blind/cap
/// configuration. Owns every player at the table, including eliminated ones
/// (skipped when dealing this hand).
pub struct Table {
    pub players: Vec<Player>,
    pub dealer_seat: u32,
    pub small_blind: u64,
    pub big_blind: u64,
    pub max_raises: u32,
    pub blind_level_idx: usize,
}

impl Table {
    pub fn new(
        players: Vec<Player>,
        dealer_seat: u32,
        small_blind: u64,
        big_blind: u64,
        max_raises: u32,
        blind_level_idx: usize,
    ) -> Table {
        Table {
            players,
            dealer_seat,
            small_blind,
            big_blind,
            max_raises,
            blind_level_idx,
        }
    }

    /// Play one complete hand. `get_action` is consulted for every
    /// voluntary decision; `observer` receives every lifecycle event.
    pub fn play_hand(
        &mut self,
        hand_number: u64,
        rng: &mut impl Rng,
        mut get_action: impl FnMut(&Player, &PlayerActionContext) -> Action,
        observer: &mut impl Observer,
    ) -> Result<HandResult, EngineError> {
        // A `RefCell` lets the two betting-round hooks (`on_before_action`,
        // `on_action`) both capture the observer without a double mutable
        // borrow — they run strictly one at a time, never reentrantly.
        let observer = RefCell::new(observer);
        let mut deck = Deck::new_shuffled(rng);
        let mut pot_total = 0u64;
        let mut community: Vec<Card> = Vec::new();

        let mut alive: Vec<Player> = self
            .players
            .iter()
            .filter(|p| !p.is_eliminated())
            .cloned()
            .collect();
        let chips_before: u64 = alive.iter().map(|p| p.chips).sum();
        for p in &mut alive {
            p.reset_for_new_hand();
        }

        observer
            .borrow_mut()
            .on_hand_start(hand_number, self.blind_level_idx, self.dealer_seat);

        let (sb_seat, bb_seat) = post_blinds(&mut alive, self.dealer_seat, self.small_blind, self.big_blind, &mut pot_total);

        for p in &mut alive {
            p.hole_cards = deck.deal_n(2)?;
        }

        let positions = assign_positions(&alive, bb_seat);

        let mut went_to_showdown = false;

        for &street in &STREETS {
            match street {
                Street::Flop => {
                    deck.deal()?;
                    community.extend(deck.deal_n(3)?);
                    observer.borrow_mut().on_deal(street, &community);
                }
                Street::Turn | Street::River => {
                    deck.deal()?;
                    community.extend(deck.deal_n(1)?);
                    observer.borrow_mut().on_deal(street, &community);
                }
                Street::Preflop => {}
            }

            for p in &mut alive {
                p.reset_for_new_round();
            }

            let (order, initial_bet) = if street == Street::Preflop {
                (preflop_order(&alive, bb_seat), self.big_blind)
            } else {
                (postflop_order(&alive, self.dealer_seat), 0)
            };

            let mut round = BettingRound::new(order, self.big_blind, initial_bet, self.big_blind, self.max_raises);
            round.run(
                &mut pot_total,
                |player, round, pot| PlayerActionContext {
                    hole_cards: player.hole_cards.clone(),
                    community: community.clone(),
                    pot_total: pot,
                    to_call: round.current_bet.saturating_sub(player.current_bet),
                    min_raise_to: round.current_bet + round.min_raise,
                    max_raise_to: player.current_bet + player.chips,
                    street,
                    num_active_players: alive.iter().filter(|p| p.is_in_hand()).count(),
                    position_label: positions.get(&player.seat).cloned().unwrap_or_else(|| "?".into()),
                },
                |player, ctx| get_action(player, ctx),
                |player| observer.borrow_mut().on_before_action(player),
                |player, action| observer.borrow_mut().on_action(player, action),
            );

            write_back(&mut alive, round.players);

            if alive.iter().filter(|p| p.is_in_hand()).count() <= 1 {
                break;
            }
        }

        let in_hand_seats: Vec<u32> = alive.iter().filter(|p| p.is_in_hand()).map(|p| p.seat).collect();
        let mut side_pots = build_side_pots(&alive);
        if side_pots.is_empty() && pot_total > 0 {
            side_pots.push(SidePot {
                amount: pot_total,
                eligible_seats: in_hand_seats.clone(),
            });
        }
        debug_assert_eq!(
            side_pots.iter().map(|sp| sp.amount).sum::<u64>(),
            pot_total,
            "side pots must account for every chip committed this hand"
        );

        let mut pot_winners = Vec::new();

        if in_hand_seats.len() == 1 {
            let winner_seat = in_hand_seats[0];
            let total_won: u64 = side_pots.iter().map(|sp| sp.amount).sum();
            if let Some(p) = alive.iter_mut().find(|p| p.seat == winner_seat) {
                p.chips += total_won;
            }
            pot_winners.push((
                SidePot {
                    amount: total_won,
                    eligible_seats: vec![winner_seat],
                },
                vec![winner_seat],
                None,
            ));
        } else {
            went_to_showdown = true;

            while community.len() < 5 {
                deck.deal()?;
                community.extend(deck.deal_n(1)?);
            }
            observer.borrow_mut().on_deal(Street::River, &community);

            let mut per_pot_winners: Vec<(SidePot, Vec<(u32, HandValue)>)> = Vec::new();

            for sp in &side_pots {
                let eligible_seats: Vec<u32> = sp
                    .eligible_seats
                    .iter()
                    .copied()
                    .filter(|seat| in_hand_seats.contains(seat))
                    .collect();
                if eligible_seats.is_empty() {
                    continue;
                }

                let mut best: Option<HandValue> = None;
                let mut values: HashMap<u32, HandValue> = HashMap::new();
                for &seat in &eligible_seats {
                    let player = alive.iter().find(|p| p.seat == seat).expect("eligible seat is alive");
                    let mut seven: Vec<Card> = player.hole_cards.clone();
                    seven.extend_from_slice(&community);
                    let value = evaluate(&seven)?;
                    if best.as_ref().map_or(true, |b| value > *b) {
                        best = Some(value.clone());
                    }
                    values.insert(seat, value);
                }
                let best = best.expect("at least one eligible seat was evaluated");

                let mut winners: Vec<u32> = eligible_seats
                    .iter()
                    .copied()
                    .filter(|seat| values[seat] == best)
                    .collect();
                winners.sort_unstable();

                let share = sp.amount / winners.len() as u64;
                let remainder = sp.amount % winners.len() as u64;
                for (i, &seat) in winners.iter().enumerate() {
                    let award = share + if (i as u64) < remainder { 1 } else { 0 };
                    if let Some(p) = alive.iter_mut().find(|p| p.seat == seat) {
                        p.chips += award;
                    }
                }

                let awarded = SidePot {
                    amount: sp.amount,
                    eligible_seats: eligible_seats.clone(),
                };
                let winner_values: Vec<(u32, HandValue)> =
                    winners.iter().map(|s| (*s, values[s].clone())).collect();
                per_pot_winners.push((awarded.clone(), winner_values));
                pot_winners.push((awarded, winners, Some(best)));
            }

            observer.borrow_mut().on_showdown(&per_pot_winners);
        }

        for p in &alive {
            if let Some(slot) = self.players.iter_mut().find(|q| q.seat == p.seat) {
                *slot = p.clone();
            }
        }

        debug_assert_eq!(
            alive.iter().map(|p| p.chips).sum::<u64>(),
            chips_before,
            "no chips may be created or destroyed within a hand"
        );

        debug!(
            "hand {hand_number} done: pot={pot_total} went_to_showdown={went_to_showdown}"
        );

        let result = HandResult {
            pots: side_pots,
            pot_winners,
            community,
            went_to_showdown,
        };
        observer.borrow_mut().on_hand_end(&result);

        Ok(result)
    }
}

fn find_seat_index(seats: &[u32], target: u32) -> usize {
    if let Some(idx) = seats.iter().position(|&s| s == target) {
        return idx;
    }
    seats.iter().position(|&s| s > target).unwrap_or(0)
}

fn post_blinds(
    alive: &mut [Player],
    dealer_seat: u32,
    small_blind: u64,
    big_blind: u64,
    pot_total: &mut u64,
) -> (u32, u32) {
    let seats: Vec<u32> = alive.iter().map(|p| p.seat).collect();
    let dealer_idx = find_seat_index(&seats, dealer_seat);

    let (sb_idx, bb_idx) = if alive.len() == 2 {
        (dealer_idx, (dealer_idx + 1) % alive.len())
    } else {
        ((dealer_idx + 1) % alive.len(), (dealer_idx + 2) % alive.len())
    };

    let sb_seat = alive[sb_idx].seat;
    let bb_seat = alive[bb_idx].seat;
    *pot_total += alive[sb_idx].bet(small_blind);
    *pot_total += alive[bb_idx].bet(big_blind);

    (sb_seat, bb_seat)
}

fn preflop_order(alive: &[Player], bb_seat: u32) -> Vec<Player> {
    let seats: Vec<u32> = alive.iter().map(|p| p.seat).collect();
    let bb_idx = seats.iter().position(|&s| s == bb_seat).expect("bb seat is alive");
    let mut order = Vec::with_capacity(alive.len());
    for i in 1..alive.len() {
        order.push(alive[(bb_idx + i) % alive.len()].clone());
    }
    order.push(alive[bb_idx].clone());
    order
}

fn postflop_order(alive: &[Player], dealer_seat: u32) -> Vec<Player> {
    let seats: Vec<u32> = alive.iter().map(|p| p.seat).collect();
    let dealer_idx = find_seat_index(&seats, dealer_seat);
    let mut order = Vec::new();
    for i in 1..=alive.len() {
        let p = &alive[(dealer_idx + i) % alive.len()];
        if p.is_in_hand() {
            order.push(p.clone());
        }
    }
    order
}

/// Labels every seat with its [`crate::position::Position`], keyed by UTG
/// distance from the seat that acts first preflop — one past the big blind,
/// the same starting point `preflop_order` uses.
fn assign_positions(alive: &[Player], bb_seat: u32) -> HashMap<u32, String> {
    let seats: Vec<u32> = alive.iter().map(|p| p.seat).collect();
    let bb_idx = find_seat_index(&seats, bb_seat);
    let n = alive.len();
    let mut out = HashMap::new();
    for i in 0..n {
        let idx = (bb_idx + 1 + i) % n;
        let player = &alive[idx];
        match position_from_utg_distance(i, n) {
            Ok(pos) => {
                out.insert(player.seat, pos.short().to_string());
            }
            Err(_) => {
                warn!("could not assign a position label to seat {}", player.seat);
                out.insert(player.seat, "?".to_string());
            }
        }
    }
    out
}

fn write_back(alive: &mut [Player], updated: Vec<Player>) {
    for p in updated {
        if let Some(slot) = alive.iter_mut().find(|q| q.seat == p.seat) {
            *slot = p;
        }
    }
}

//! Hand strength: [`Category`], [`HandValue`], and the 5-/7-card evaluator.
//!
//! `evaluate5` is deterministic and RNG-free. `evaluate7` enumerates all
//! `C(7,5) = 21` five-card subsets and returns the lexicographic maximum —
//! by construction this is byte-identical to any O(1) lookup-table
//! evaluator, since both must agree on the same total order over the same
//! 21 subsets.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::card::{Card, Rank};
use crate::error::EngineError;

/// Hand category, ordered low to high. The ordinal value (0..=8) is part of
/// the public contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    Trips = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    Quads = 7,
    StraightFlush = 8,
}

impl Category {
    /// Human-readable label, e.g. for showdown announcements.
    pub fn label(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "One Pair",
            Category::TwoPair => "Two Pair",
            Category::Trips => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::Quads => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A fully comparable hand strength: `(category, primary, kickers)`,
/// compared lexicographically in that order. Two values are equal iff all
/// three fields match elementwise.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HandValue {
    pub category: Category,
    /// The rank(s) that form the category, most significant first.
    pub primary: Vec<Rank>,
    /// Remaining ranks in descending order, for tiebreaks.
    pub kickers: Vec<Rank>,
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.category)
    }
}

/// Evaluate the best 5-card hand from `cards`. `cards.len()` must be 5 or 7;
/// for 7, enumerates all 21 five-card subsets and returns the best.
pub fn evaluate(cards: &[Card]) -> Result<HandValue, EngineError> {
    match cards.len() {
        5 => Ok(evaluate5(cards)),
        7 => Ok(evaluate7(cards)),
        n => Err(EngineError::InvalidInput(format!(
            "evaluator requires exactly 5 or 7 cards, got {n}"
        ))),
    }
}

/// Evaluate exactly 7 cards by enumerating all `C(7,5) = 21` subsets.
fn evaluate7(cards: &[Card]) -> HandValue {
    debug_assert_eq!(cards.len(), 7);
    let mut best: Option<HandValue> = None;
    for combo in five_card_subsets(cards) {
        let value = evaluate5(&combo);
        if best.as_ref().map_or(true, |b| value > *b) {
            best = Some(value);
        }
    }
    best.expect("7-card input always yields at least one 5-card subset")
}

/// All 21 five-element subsets of a 7-element slice, in combinatorial order.
fn five_card_subsets(cards: &[Card]) -> impl Iterator<Item = [Card; 5]> + '_ {
    debug_assert_eq!(cards.len(), 7);
    (0..7).flat_map(move |i| {
        (i + 1..7).flat_map(move |j| {
            (j + 1..7).flat_map(move |k| {
                (k + 1..7).flat_map(move |l| {
                    (l + 1..7).map(move |m| {
                        [cards[i], cards[j], cards[k], cards[l], cards[m]]
                    })
                })
            })
        })
    })
}

/// Evaluate exactly 5 cards. No RNG, deterministic.
fn evaluate5(cards: &[Card]) -> HandValue {
    debug_assert_eq!(cards.len(), 5);

    let mut ranks: Vec<Rank> = cards.iter().map(|c| c.rank).collect();
    ranks.sort_unstable_by(|a, b| b.cmp(a));

    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let (is_straight, straight_high) = detect_straight(&ranks);

    let mut counts: Vec<(Rank, u8)> = Vec::new();
    for &r in &ranks {
        if let Some(entry) = counts.iter_mut().find(|(rr, _)| *rr == r) {
            entry.1 += 1;
        } else {
            counts.push((r, 1));
        }
    }
    // Sort by (count desc, rank desc).
    counts.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(b.0.cmp(&a.0)));

    let by_count = |n: u8| -> Vec<Rank> {
        counts.iter().filter(|(_, c)| *c == n).map(|(r, _)| *r).collect()
    };

    if is_flush && is_straight {
        return HandValue {
            category: Category::StraightFlush,
            primary: vec![Rank(straight_high)],
            kickers: vec![],
        };
    }

    let quads = by_count(4);
    if let Some(&quad) = quads.first() {
        let kicker = by_count(1);
        return HandValue {
            category: Category::Quads,
            primary: vec![quad],
            kickers: kicker,
        };
    }

    let trips = by_count(3);
    let pairs = by_count(2);
    if !trips.is_empty() && !pairs.is_empty() {
        return HandValue {
            category: Category::FullHouse,
            primary: vec![trips[0], pairs[0]],
            kickers: vec![],
        };
    }

    if is_flush {
        return HandValue {
            category: Category::Flush,
            primary: ranks.clone(),
            kickers: vec![],
        };
    }

    if is_straight {
        return HandValue {
            category: Category::Straight,
            primary: vec![Rank(straight_high)],
            kickers: vec![],
        };
    }

    if !trips.is_empty() {
        let kickers = by_count(1).into_iter().take(2).collect();
        return HandValue {
            category: Category::Trips,
            primary: vec![trips[0]],
            kickers,
        };
    }

    if pairs.len() == 2 {
        let kicker = by_count(1);
        return HandValue {
            category: Category::TwoPair,
            primary: pairs,
            kickers: kicker,
        };
    }

    if pairs.len() == 1 {
        let kickers = by_count(1).into_iter().take(3).collect();
        return HandValue {
            category: Category::OnePair,
            primary: pairs,
            kickers,
        };
    }

    HandValue {
        category: Category::HighCard,
        primary: vec![ranks[0]],
        kickers: ranks[1..].to_vec(),
    }
}

/// Detect a straight in descending-sorted ranks. Accepts five consecutive
/// descending ranks (`v[0] == v[4] + 4`) or the wheel `[14,5,4,3,2]`, whose
/// high card plays as 5. Returns `(is_straight, high_card_value)`.
fn detect_straight(sorted_desc: &[Rank]) -> (bool, u8) {
    debug_assert_eq!(sorted_desc.len(), 5);
    let v: Vec<u8> = sorted_desc.iter().map(|r| r.0).collect();

    if v == [14, 5, 4, 3, 2] {
        return (true, 5);
    }

    let mut distinct = v.clone();
    distinct.dedup();
    if distinct.len() == 5 && v[0] == v[4] + 4 {
        return (true, v[0]);
    }

    (false, 0)
}

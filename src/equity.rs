//! Monte Carlo equity estimation for a hero against N villains.
//!
//! Grounded on `original_source/calculator.py` (`calculate_equity`,
//! `preflop_equity`): deal out the unseen cards for every trial, evaluate
//! hero vs. every villain's best 7-card hand, and tally win/tie/lose. A
//! villain whose hole cards aren't known (`calculate_equity`'s
//! `villain_cards=None`, `preflop_equity`'s random opponents) gets 2 cards
//! dealt fresh from the remaining deck on every trial. No rayon — a single
//! seeded RNG is advanced serially across all trials, so a run is
//! reproducible bit-for-bit given the same seed (`SPEC_FULL.md` §5, §9
//! "Rayon / parallel estimator").

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::card::Card;
use crate::deck::Deck;
use crate::error::EngineError;
use crate::hand::{evaluate, Category};

/// Result of an equity run: win/tie/lose rates over `trials`, plus where
/// hero's made hands landed across the 9 categories.
#[derive(Debug, Clone, PartialEq)]
pub struct EquityResult {
    pub trials: u32,
    pub win_rate: f64,
    pub tie_rate: f64,
    pub lose_rate: f64,
    /// Indexed by `Category as usize`.
    pub category_distribution: [u32; 9],
}

/// Estimate hero's equity against `villains.len()` opponents given a
/// (possibly partial) `community` board, by Monte Carlo simulation.
///
/// `hero` must hold exactly 2 cards; `community` must hold 0..=5 cards.
/// Each entry of `villains` is either `Some(2 cards)` for a known opponent
/// hand or `None` for an opponent whose hole cards are random — dealt fresh
/// from the remaining deck on every trial, mirroring
/// `calculate_equity(villain_cards=None)` and `preflop_equity`'s random
/// opponents. `villains` must hold at least one entry (`num_opponents ≥
/// 1`). Unseen cards are dealt from a deck with all known cards removed.
/// Pass `rng_seed` for a reproducible run; `None` seeds from OS entropy.
pub fn estimate_equity(
    hero: &[Card],
    villains: &[Option<Vec<Card>>],
    community: &[Card],
    trials: u32,
    rng_seed: Option<u64>,
) -> Result<EquityResult, EngineError> {
    if hero.len() != 2 {
        return Err(EngineError::InvalidInput(format!(
            "hero must hold exactly 2 cards, got {}",
            hero.len()
        )));
    }
    if villains.is_empty() {
        return Err(EngineError::InvalidInput(
            "at least one villain is required".into(),
        ));
    }
    for (i, v) in villains.iter().enumerate() {
        if let Some(v) = v {
            if v.len() != 2 {
                return Err(EngineError::InvalidInput(format!(
                    "villain {i} must hold exactly 2 cards, got {}",
                    v.len()
                )));
            }
        }
    }
    if community.len() > 5 {
        return Err(EngineError::InvalidInput(format!(
            "community must hold at most 5 cards, got {}",
            community.len()
        )));
    }

    let mut rng = match rng_seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    };

    let known_villains: Vec<&Card> = villains.iter().flatten().flatten().collect();
    let mut known: Vec<Card> = Vec::with_capacity(2 + known_villains.len() + community.len());
    known.extend_from_slice(hero);
    known.extend(known_villains.into_iter().copied());
    known.extend_from_slice(community);

    let community_needed = 5 - community.len();

    let mut wins = 0u32;
    let mut ties = 0u32;
    let mut losses = 0u32;
    let mut category_distribution = [0u32; 9];

    for _ in 0..trials {
        let mut deck = Deck::new();
        deck.remove(&known)?;
        deck.shuffle(&mut rng);

        let mut sim_villains: Vec<Vec<Card>> = Vec::with_capacity(villains.len());
        for v in villains {
            match v {
                Some(cards) => sim_villains.push(cards.clone()),
                None => sim_villains.push(deck.deal_n(2)?),
            }
        }

        let mut board = community.to_vec();
        board.extend(deck.deal_n(community_needed)?);

        let mut hero_cards = hero.to_vec();
        hero_cards.extend_from_slice(&board);
        let hero_value = evaluate(&hero_cards)?;
        category_distribution[hero_value.category as usize] += 1;

        let mut best_villain = None;
        for v in &sim_villains {
            let mut villain_cards = v.clone();
            villain_cards.extend_from_slice(&board);
            let villain_value = evaluate(&villain_cards)?;
            if best_villain.as_ref().map_or(true, |b| villain_value > *b) {
                best_villain = Some(villain_value);
            }
        }
        let best_villain = best_villain.expect("at least one villain was checked");

        if hero_value > best_villain {
            wins += 1;
        } else if hero_value == best_villain {
            ties += 1;
        } else {
            losses += 1;
        }
    }

    let n = f64::from(trials);
    Ok(EquityResult {
        trials,
        win_rate: f64::from(wins) / n,
        tie_rate: f64::from(ties) / n,
        lose_rate: f64::from(losses) / n,
        category_distribution,
    })
}

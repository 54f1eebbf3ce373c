//! A shuffled 52-card deck with removal of known cards.
//!
//! Invariant: the union of remaining and removed/dealt cards is always the
//! canonical 52, with no overlap.

use rand::Rng;

use crate::card::{Card, Rank, Suit};
use crate::error::EngineError;

/// An ordered source of cards to deal from. `cards[..cursor]` have been
/// dealt; `cards[cursor..]` remain.
pub struct Deck {
    cards: Vec<Card>,
    cursor: usize,
}

impl Deck {
    /// Build the canonical 52-card deck in a fixed order (unshuffled).
    pub fn new() -> Deck {
        let cards: Vec<Card> = Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ALL.iter().map(move |&rank| Card::new(rank, suit)))
            .collect();
        Deck { cards, cursor: 0 }
    }

    /// Build a fresh 52-card deck and Fisher-Yates shuffle it with `rng`.
    pub fn new_shuffled<R: Rng>(rng: &mut R) -> Deck {
        let mut deck = Deck::new();
        deck.shuffle(rng);
        deck
    }

    /// Shuffle the undealt portion of the deck in place.
    pub fn shuffle<R: Rng>(&mut self, rng: &mut R) {
        let tail = &mut self.cards[self.cursor..];
        for i in (1..tail.len()).rev() {
            let j = rng.gen_range(0..=i);
            tail.swap(i, j);
        }
    }

    /// Remove specific cards from the undealt portion (e.g. known cards for
    /// equity estimation). Cards already dealt are left untouched. Errors if
    /// a card is neither present among the undealt cards nor already dealt.
    pub fn remove(&mut self, known: &[Card]) -> Result<(), EngineError> {
        for &card in known {
            if self.cards[..self.cursor].contains(&card) {
                continue;
            }
            match self.cards[self.cursor..].iter().position(|&c| c == card) {
                Some(rel_idx) => {
                    self.cards.remove(self.cursor + rel_idx);
                }
                None => {
                    return Err(EngineError::InvalidInput(format!(
                        "card {card} not in deck"
                    )))
                }
            }
        }
        Ok(())
    }

    /// Deal one card from the top. Errors if the deck is exhausted.
    pub fn deal(&mut self) -> Result<Card, EngineError> {
        let card = *self
            .cards
            .get(self.cursor)
            .ok_or(EngineError::Exhausted)?;
        self.cursor += 1;
        Ok(card)
    }

    /// Deal `n` cards at once, in order.
    pub fn deal_n(&mut self, n: usize) -> Result<Vec<Card>, EngineError> {
        (0..n).map(|_| self.deal()).collect()
    }

    /// Number of cards left to deal.
    pub fn remaining(&self) -> usize {
        self.cards.len() - self.cursor
    }

    /// All cards dealt so far, in deal order.
    pub fn dealt_cards(&self) -> &[Card] {
        &self.cards[..self.cursor]
    }
}

impl Default for Deck {
    fn default() -> Deck {
        Deck::new()
    }
}

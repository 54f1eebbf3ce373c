//! Card primitives: [`Rank`], [`Suit`], [`Card`], and text parsing.
//!
//! A card is a `(Rank, Suit)` pair. Rank carries ordinal value 2..=14
//! (ace high); suit carries no ranking of its own — hand strength never
//! depends on which suit is which, only on whether suits match.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// One of the four suits. Deliberately does not implement `Ord` — suit has
/// no ranking in hold'em, and giving it one invites sorting bugs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Parse a suit glyph: `c d h s`, case-insensitive.
    pub fn parse(ch: char) -> Result<Suit, EngineError> {
        match ch.to_ascii_lowercase() {
            'c' => Ok(Suit::Clubs),
            'd' => Ok(Suit::Diamonds),
            'h' => Ok(Suit::Hearts),
            's' => Ok(Suit::Spades),
            other => Err(EngineError::Parse(format!("invalid suit: {other}"))),
        }
    }

    /// Short ASCII glyph used for parsing round-trips.
    pub fn symbol(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }

    /// Unicode suit glyph for display-only output.
    pub fn unicode_symbol(self) -> char {
        match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Card rank, 2..=14 where 14 is ace. Ordinal value is part of the public
/// contract: comparisons and sorting rely on it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Rank(pub u8);

impl Rank {
    pub const TWO: Rank = Rank(2);
    pub const THREE: Rank = Rank(3);
    pub const FOUR: Rank = Rank(4);
    pub const FIVE: Rank = Rank(5);
    pub const TEN: Rank = Rank(10);
    pub const JACK: Rank = Rank(11);
    pub const QUEEN: Rank = Rank(12);
    pub const KING: Rank = Rank(13);
    pub const ACE: Rank = Rank(14);

    pub const ALL: [Rank; 13] = [
        Rank(2), Rank(3), Rank(4), Rank(5), Rank(6), Rank(7), Rank(8),
        Rank(9), Rank(10), Rank(11), Rank(12), Rank(13), Rank(14),
    ];

    pub fn symbol(self) -> &'static str {
        match self.0 {
            2 => "2", 3 => "3", 4 => "4", 5 => "5", 6 => "6",
            7 => "7", 8 => "8", 9 => "9", 10 => "T",
            11 => "J", 12 => "Q", 13 => "K", 14 => "A",
            _ => "?",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A playing card: a rank paired with a suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub fn new(rank: Rank, suit: Suit) -> Card {
        Card { rank, suit }
    }

    /// Parse `"<rank><suit>"`, e.g. `"As"`, `"Kh"`, `"10d"`, `"Tc"`.
    ///
    /// Ranks: `2..9`, `T` or `10`, `J`, `Q`, `K`, `A`. Suits: `c d h s`,
    /// case-insensitive. Fails on unknown rank/suit or length < 2.
    pub fn parse(s: &str) -> Result<Card, EngineError> {
        let s = s.trim();
        if s.len() < 2 {
            return Err(EngineError::Parse(format!("card string too short: {s:?}")));
        }

        let upper = s.to_ascii_uppercase();
        let (rank_str, suit_char) = upper.split_at(upper.len() - 1);
        let suit_char = suit_char
            .chars()
            .next()
            .ok_or_else(|| EngineError::Parse(format!("invalid card string: {s:?}")))?;

        let rank = match rank_str {
            "2" => Rank(2), "3" => Rank(3), "4" => Rank(4), "5" => Rank(5),
            "6" => Rank(6), "7" => Rank(7), "8" => Rank(8), "9" => Rank(9),
            "10" | "T" => Rank(10),
            "J" => Rank(11), "Q" => Rank(12), "K" => Rank(13), "A" => Rank(14),
            other => return Err(EngineError::Parse(format!("invalid rank: {other}"))),
        };
        let suit = Suit::parse(suit_char)?;

        Ok(Card { rank, suit })
    }

    /// Render using Unicode suit glyphs, e.g. `"A♠"`.
    pub fn to_unicode_string(self) -> String {
        format!("{}{}", self.rank, self.suit.unicode_symbol())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

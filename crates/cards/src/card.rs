// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker cards definitions.
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::CardError;

/// A Poker card.
///
/// A card is represented by its position in the deck order, values first and
/// then suits, so that the deuce of spades is 0 and the ace of clubs is 51:
///
/// ```text
///   id = value * 4 + suit
///   value = strength of the card value (deuce=0,trey=1,...,ace=12)
///   suit = spades=0, hearts=1, diamonds=2, clubs=3
/// ```
#[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Card(u8);

impl Card {
    /// Create a card given a value and suit.
    pub const fn new(value: Value, suit: Suit) -> Card {
        Self((value as u8) * 4 + suit as u8)
    }

    /// This card unique id in `0..52`.
    #[inline]
    pub fn id(&self) -> usize {
        self.0 as usize
    }

    /// The single bit mask for this card.
    #[inline]
    pub fn mask(&self) -> u64 {
        1 << self.0
    }

    /// Returns the card value.
    pub fn value(&self) -> Value {
        Value::from_strength(self.0 / 4)
    }

    /// Returns the card suit.
    pub fn suit(&self) -> Suit {
        match self.0 % 4 {
            0 => Suit::Spades,
            1 => Suit::Hearts,
            2 => Suit::Diamonds,
            _ => Suit::Clubs,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value(), self.suit())
    }
}

impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Card({}{})", self.value(), self.suit())
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CardError::InvalidCard(s.to_string());

        let mut chars = s.chars();
        let (Some(value), Some(suit), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(invalid());
        };

        let value = Value::try_from(value).map_err(|_| invalid())?;
        let suit = Suit::try_from(suit).map_err(|_| invalid())?;
        Ok(Card::new(value, suit))
    }
}

/// Card value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Value {
    /// Deuce
    Deuce = 0,
    /// Trey
    Trey,
    /// Four
    Four,
    /// Five
    Five,
    /// Six
    Six,
    /// Seven
    Seven,
    /// Eight
    Eight,
    /// Nine
    Nine,
    /// Ten
    Ten,
    /// Jack
    Jack,
    /// Queen
    Queen,
    /// King
    King,
    /// Ace
    Ace,
}

impl Value {
    /// The number of card values.
    pub const COUNT: usize = 13;

    const ALL: [Value; Value::COUNT] = {
        use Value::*;
        [
            Deuce, Trey, Four, Five, Six, Seven, Eight, Nine, Ten, Jack, Queen, King, Ace,
        ]
    };

    /// Returns all values from the weakest to the strongest.
    pub fn values() -> impl DoubleEndedIterator<Item = Value> {
        Self::ALL.into_iter()
    }

    /// The strength index of this value, 0 for a deuce up to 12 for an ace.
    #[inline]
    pub fn strength(&self) -> usize {
        *self as usize
    }

    /// The one character symbol for this value.
    pub fn symbol(&self) -> char {
        match self {
            Value::Deuce => '2',
            Value::Trey => '3',
            Value::Four => '4',
            Value::Five => '5',
            Value::Six => '6',
            Value::Seven => '7',
            Value::Eight => '8',
            Value::Nine => '9',
            Value::Ten => 'T',
            Value::Jack => 'J',
            Value::Queen => 'Q',
            Value::King => 'K',
            Value::Ace => 'A',
        }
    }

    fn from_strength(strength: u8) -> Value {
        Self::ALL[strength as usize % Value::COUNT]
    }
}

impl TryFrom<char> for Value {
    type Error = CardError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Value::values()
            .find(|v| v.symbol() == c)
            .ok_or_else(|| CardError::InvalidCard(c.to_string()))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Card suit.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Suit {
    /// Spades suit.
    Spades = 0,
    /// Hearts suit.
    Hearts,
    /// Diamonds suit.
    Diamonds,
    /// Clubs suit.
    Clubs,
}

impl Suit {
    /// The number of suits.
    pub const COUNT: usize = 4;

    /// Returns all suits.
    pub fn suits() -> impl DoubleEndedIterator<Item = Suit> {
        [Suit::Spades, Suit::Hearts, Suit::Diamonds, Suit::Clubs].into_iter()
    }

    /// The one character symbol for this suit.
    pub fn symbol(&self) -> char {
        match self {
            Suit::Spades => 's',
            Suit::Hearts => 'h',
            Suit::Diamonds => 'd',
            Suit::Clubs => 'c',
        }
    }

    /// The unicode glyph for this suit.
    pub fn glyph(&self) -> char {
        match self {
            Suit::Spades => '♠',
            Suit::Hearts => '♥',
            Suit::Diamonds => '♦',
            Suit::Clubs => '♣',
        }
    }
}

impl TryFrom<char> for Suit {
    type Error = CardError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Suit::suits()
            .find(|s| s.symbol() == c)
            .ok_or_else(|| CardError::InvalidCard(c.to_string()))
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

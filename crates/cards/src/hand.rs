// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Players hands.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Card, CardError, board::parse_cards};

/// A player hole cards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hand {
    hand: String,
    cards: Vec<Card>,
}

impl Hand {
    /// The number of hole cards in Texas Hold'em.
    pub const HOLDEM_CARDS: usize = 2;

    /// Creates a hand with exactly `count` cards from a string, eg `"AsAc"`.
    pub fn new(hand: &str, count: usize) -> Result<Self, CardError> {
        let cards = parse_cards(hand).ok_or_else(|| CardError::InvalidHand {
            hand: hand.to_string(),
            reason: "invalid card, eg AsAc".to_string(),
        })?;

        if cards.len() != count {
            return Err(CardError::InvalidHand {
                hand: hand.to_string(),
                reason: format!("the number of cards must be {count}"),
            });
        }

        Ok(Self {
            hand: hand.to_string(),
            cards,
        })
    }

    /// Creates a Texas Hold'em hand.
    pub fn holdem(hand: &str) -> Result<Self, CardError> {
        Self::new(hand, Self::HOLDEM_CARDS)
    }

    /// The hand string this hand was created from.
    pub fn hand(&self) -> &str {
        &self.hand
    }

    /// The hand cards.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hand)
    }
}

/// The hands of all the players in a simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandSet {
    hands: Vec<Hand>,
}

impl HandSet {
    /// Creates a set of hands each with `count` cards.
    ///
    /// Fails if there are no hands or if any of the hands is invalid.
    pub fn new<I, S>(hands: I, count: usize) -> Result<Self, CardError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let hands = hands
            .into_iter()
            .map(|h| Hand::new(h.as_ref(), count))
            .collect::<Result<Vec<_>, _>>()?;

        if hands.is_empty() {
            return Err(CardError::NoHands);
        }

        Ok(Self { hands })
    }

    /// Creates a set of Texas Hold'em hands.
    pub fn holdem<I, S>(hands: I) -> Result<Self, CardError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::new(hands, Hand::HOLDEM_CARDS)
    }

    /// The hands in this set.
    pub fn hands(&self) -> &[Hand] {
        &self.hands
    }

    /// All the cards in this set, hand by hand.
    pub fn cards(&self) -> Vec<Card> {
        self.hands
            .iter()
            .flat_map(|h| h.cards().iter().copied())
            .collect()
    }

    /// The number of hands.
    pub fn len(&self) -> usize {
        self.hands.len()
    }

    /// Always false as a set has at least one hand.
    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hand_card_count() {
        let hand = Hand::new("AsKs", 2).unwrap();
        assert_eq!(hand.cards().len(), 2);
        assert_eq!(hand.to_string(), "AsKs");

        assert!(matches!(
            Hand::new("AsKsQhJd", 2),
            Err(CardError::InvalidHand { .. })
        ));
        assert!(Hand::new("AsKsQhJd", 4).is_ok());
        assert!(Hand::new("AsAd", 1).is_err());
        assert!(Hand::new("AsAd", 0).is_err());
        assert!(Hand::new("", 2).is_err());
        assert!(Hand::new("", 0).is_ok());
    }

    #[test]
    fn hand_invalid_card() {
        for s in ["AsKx", "AsK", "as Ks", "AsKsQ"] {
            assert!(
                matches!(Hand::holdem(s), Err(CardError::InvalidHand { .. })),
                "{s} should be rejected"
            );
        }
    }

    #[test]
    fn hand_set_cards() {
        let set = HandSet::holdem(["AsKs", "QhQd", "7c2d"]).unwrap();
        assert_eq!(set.len(), 3);

        let cards = set.cards().iter().map(Card::to_string).collect::<String>();
        assert_eq!(cards, "AsKsQhQd7c2d");
    }

    #[test]
    fn hand_set_empty() {
        let hands: [&str; 0] = [];
        assert!(matches!(HandSet::holdem(hands), Err(CardError::NoHands)));
    }

    #[test]
    fn hand_set_invalid_hand() {
        assert!(matches!(
            HandSet::holdem(["AsKs", "Qh"]),
            Err(CardError::InvalidHand { .. })
        ));
    }
}

// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Community board cards.
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{Card, CardError};

/// Splits a string into two characters tokens and parses each token as a card.
pub(crate) fn parse_cards(s: &str) -> Option<Vec<Card>> {
    let chars = s.chars().collect::<Vec<_>>();
    chars
        .chunks(2)
        .map(|token| token.iter().collect::<String>().parse::<Card>().ok())
        .collect()
}

/// The community cards shared by all players.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    /// The maximum number of cards on a board.
    pub const MAX_CARDS: usize = 5;

    /// Creates a board from a string of concatenated cards, eg `"AsAcKd"`.
    ///
    /// An empty string is a valid empty board.
    pub fn new(board: &str) -> Result<Self, CardError> {
        let cards = parse_cards(board).ok_or_else(|| CardError::InvalidBoard {
            board: board.to_string(),
            reason: "invalid card, eg AsAcKd".to_string(),
        })?;

        if cards.len() > Self::MAX_CARDS {
            return Err(CardError::InvalidBoard {
                board: board.to_string(),
                reason: format!("the maximum number of cards is {}", Self::MAX_CARDS),
            });
        }

        Ok(Self { cards })
    }

    /// The board cards.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The number of cards that still have to be dealt.
    pub fn missing(&self) -> usize {
        Self::MAX_CARDS - self.cards.len()
    }

    /// Checks if the board has no cards.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.cards.iter().try_for_each(|c| write!(f, "{c}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn board_roundtrip() {
        for s in ["", "As", "AsKd", "2s3d6d", "2s3d6d7h", "2s3d6d7hTc"] {
            let board = Board::new(s).unwrap();
            assert_eq!(board.to_string(), s);
            assert_eq!(board.cards().len() * 2, s.len());
            assert_eq!(board.missing(), 5 - s.len() / 2);
        }

        assert!(Board::new("").unwrap().is_empty());
    }

    #[test]
    fn board_too_many_cards() {
        let res = Board::new("2s3d6d7hTcAs");
        assert!(matches!(res, Err(CardError::InvalidBoard { .. })));
    }

    #[test]
    fn board_invalid_card() {
        for s in ["2s3d6x", "2s3", "2s3d6d7hTz", "xx"] {
            assert!(
                matches!(Board::new(s), Err(CardError::InvalidBoard { .. })),
                "{s} should be rejected"
            );
        }
    }
}

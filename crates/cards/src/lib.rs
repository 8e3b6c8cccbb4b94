// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker odds cards types.
//!
//! This crate defines the cards, parsed from their two characters form:
//!
//! ```
//! # use pokerodds_cards::{Card, Value, Suit};
//! let ah = "Ah".parse::<Card>().unwrap();
//! assert_eq!(ah, Card::new(Value::Ace, Suit::Hearts));
//! ```
//!
//! the [Board] and [Hand] types with their cards count invariants, and a
//! [Deck] type for enumerating or sampling the cards still to be dealt.
//!
//! For example to iterate through all the turn and river completions of a
//! flop with two players:
//!
//! ```
//! # use pokerodds_cards::{Board, Deck, HandSet};
//! let board = Board::new("Ks7d2c").unwrap();
//! let hands = HandSet::holdem(["AsAh", "QcJc"]).unwrap();
//!
//! let mut used = board.cards().to_vec();
//! used.extend(hands.cards());
//!
//! let deck = Deck::without(&used);
//! assert_eq!(deck.combinations(board.missing()).count(), 990);
//! ```
//!
//! to sample 10 distinct random flops with a seeded generator:
//!
//! ```
//! # use pokerodds_cards::Deck;
//! # use rand::{SeedableRng, rngs::SmallRng};
//! let rng = SmallRng::seed_from_u64(42);
//! let flops = Deck::default().sample(rng, 3, 10).collect::<Vec<_>>();
//! assert_eq!(flops.len(), 10);
//! ```
//!
//! The **`parallel`** feature enables a parallel fold over all the k-cards
//! subsets with a given number of tasks, each task owns its state and the
//! states are returned for merging:
//!
//! ```
//! # #[cfg(feature = "parallel")]
//! # fn par_fold() {
//! # use pokerodds_cards::Deck;
//! let counts = Deck::default().par_fold(4, 3, || 0u64, |count, _| *count += 1);
//! assert_eq!(counts.iter().sum::<u64>(), 22_100);
//! # }
//! ```
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
mod board;
mod card;
mod deck;
mod hand;

pub use board::Board;
pub use card::{Card, Suit, Value};
pub use deck::{Combinations, Deck, Sampler};
pub use hand::{Hand, HandSet};

/// Cards parsing errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CardError {
    /// A card token is not a value followed by a suit.
    #[error("Card {0} invalid, eg As")]
    InvalidCard(String),
    /// A hand has an invalid card or the wrong number of cards.
    #[error("Hand {hand} invalid: {reason}")]
    InvalidHand {
        /// The hand input.
        hand: String,
        /// What is wrong with the hand.
        reason: String,
    },
    /// A board has an invalid card or too many cards.
    #[error("Board {board} invalid: {reason}")]
    InvalidBoard {
        /// The board input.
        board: String,
        /// What is wrong with the board.
        reason: String,
    },
    /// No hands were given.
    #[error("Players hands not found")]
    NoHands,
}

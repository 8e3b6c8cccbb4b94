// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Poker odds hand evaluator and equity calculator.
//!
//! The [Rank] type evaluates the best five cards combination that can be made
//! with a board, the extra cards dealt in a simulation and a player hand:
//!
//! ```
//! # use pokerodds_eval::*;
//! let board = Board::new("KsTs3d").unwrap();
//! let extra = Board::new("Js9h").unwrap();
//! let hand = Hand::holdem("AsQs").unwrap();
//!
//! let rank = Rank::evaluate(&board, extra.cards(), &hand).unwrap();
//! assert_eq!(rank.combination(), Combination::RoyalFlush);
//! assert_eq!(rank.to_string(), "royal flush AKQJT");
//! ```
//!
//! The [Odds] calculator evaluates all players hands for each board
//! completion and collects the results in an [EquityReport]:
//!
//! ```
//! # use pokerodds_eval::*;
//! let hands = HandSet::holdem(["AsAd", "KsKd"]).unwrap();
//! let board = Board::new("2s3d6d7h").unwrap();
//!
//! let report = Odds::default().calculate(&hands, &board).unwrap();
//! assert_eq!(report.iterations(), 44);
//! assert!(report.equities()[0].is_favourite());
//! ```
//!
//! The **`parallel`** feature splits exhaustive runs over `Config::tasks`
//! threads.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
pub mod odds;
pub mod rank;

pub use odds::{Config, Equity, EquityReport, Odds};
pub use rank::{Combination, Rank};

// Reexport cards types.
pub use pokerodds_cards::{Board, Card, CardError, Deck, Hand, HandSet, Suit, Value};

/// Evaluation and simulation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvalError {
    /// Invalid card, hand or board.
    #[error(transparent)]
    Card(#[from] CardError),
    /// The number of cards to rank is not between 5 and 7.
    #[error("Incorrect set of {0} cards for calculating the rank")]
    InvalidRank(usize),
    /// The simulation inputs are not valid.
    #[error("{0}")]
    InvalidArgument(String),
    /// An evaluator invariant was violated.
    #[error("Unexpected evaluator error: {0}")]
    Internal(String),
}

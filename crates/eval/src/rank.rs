// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Best five cards hand evaluator.
//!
//! Evaluates the best poker combination that can be made with 5, 6 or 7
//! cards and encodes it in a single integer rank, the rank is computed from
//! the combination category and the five tie break values:
//!
//! ```text
//!   rank = 8^13 * category + sum(8^strength(v) * multiplicity(v))
//! ```
//!
//! each value uses 3 bits so that no slot overflows into the next one and the
//! category term dominates all the value terms. The ace of a wheel straight
//! (`5432A`) plays below the deuce and adds nothing to the value terms.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

use pokerodds_cards::{Board, Card, Hand, Suit, Value};

use crate::EvalError;

/// Number of cards in a poker hand.
const HAND_SIZE: usize = 5;

/// Maximum number of cards that can be evaluated.
const MAX_CARDS: usize = 7;

/// Bits used to encode a value multiplicity.
const VALUE_BITS: usize = 3;

/// A poker combination category, from the weakest to the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Combination {
    /// High card.
    HighCard = 0,
    /// One pair.
    OnePair,
    /// Two pair.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Straight.
    Straight,
    /// Flush.
    Flush,
    /// Full house.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Straight flush.
    StraightFlush,
    /// Royal flush.
    RoyalFlush,
}

impl Combination {
    /// The number of combinations.
    pub const COUNT: usize = 10;

    /// All combinations from the weakest to the strongest.
    pub const ALL: [Combination; Combination::COUNT] = [
        Combination::HighCard,
        Combination::OnePair,
        Combination::TwoPair,
        Combination::ThreeOfAKind,
        Combination::Straight,
        Combination::Flush,
        Combination::FullHouse,
        Combination::FourOfAKind,
        Combination::StraightFlush,
        Combination::RoyalFlush,
    ];

    /// The combination name.
    pub fn name(&self) -> &'static str {
        match self {
            Combination::HighCard => "high card",
            Combination::OnePair => "one pair",
            Combination::TwoPair => "two pair",
            Combination::ThreeOfAKind => "three of a kind",
            Combination::Straight => "straight",
            Combination::Flush => "flush",
            Combination::FullHouse => "full house",
            Combination::FourOfAKind => "four of a kind",
            Combination::StraightFlush => "straight flush",
            Combination::RoyalFlush => "royal flush",
        }
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Cards of the same value.
#[derive(Debug, Clone, Copy)]
struct Group {
    value: Value,
    strength: usize,
    count: usize,
}

/// Orders groups by count and then by strength, both descending.
fn group_order(g1: &Group, g2: &Group) -> Ordering {
    g2.count
        .cmp(&g1.count)
        .then_with(|| g2.strength.cmp(&g1.strength))
}

/// Finds the highest five values run in a list of distinct values sorted by
/// descending strength, an ace also plays below the deuce.
fn straight_values(values: &[Value]) -> Option<[Value; HAND_SIZE]> {
    let mut strengths = values
        .iter()
        .map(|v| (v.strength() as i32, *v))
        .collect::<Vec<_>>();

    if values.first() == Some(&Value::Ace) {
        strengths.push((-1, Value::Ace));
    }

    let mut run = 0;
    for pos in 0..strengths.len() {
        if pos > 0 && strengths[pos - 1].0 == strengths[pos].0 + 1 {
            run += 1;
        } else {
            run = 1;
        }

        if run == HAND_SIZE {
            let mut out = [Value::Ace; HAND_SIZE];
            for (idx, (_, v)) in strengths[pos + 1 - HAND_SIZE..=pos].iter().enumerate() {
                out[idx] = *v;
            }

            return Some(out);
        }
    }

    None
}

/// The rank of the best poker hand made from a set of cards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Rank {
    combination: Combination,
    values: [Value; HAND_SIZE],
    rank: u64,
}

impl Rank {
    /// Evaluates the hand made by the board, the extra cards and the hand.
    ///
    /// Fails if the cards are fewer than 5 or more than 7.
    pub fn evaluate(board: &Board, cards: &[Card], hand: &Hand) -> Result<Self, EvalError> {
        let all = board
            .cards()
            .iter()
            .chain(cards)
            .chain(hand.cards())
            .copied()
            .collect::<Vec<_>>();

        Self::from_cards(&all)
    }

    /// Evaluates the best five cards hand from 5 to 7 cards.
    pub fn from_cards(cards: &[Card]) -> Result<Self, EvalError> {
        if !(HAND_SIZE..=MAX_CARDS).contains(&cards.len()) {
            return Err(EvalError::InvalidRank(cards.len()));
        }

        let mut value_counts = [0usize; Value::COUNT];
        let mut suit_counts = [0usize; Suit::COUNT];
        for card in cards {
            value_counts[card.value().strength()] += 1;
            suit_counts[card.suit() as usize] += 1;
        }

        let mut groups = Value::values()
            .filter(|v| value_counts[v.strength()] > 0)
            .map(|value| Group {
                value,
                strength: value.strength(),
                count: value_counts[value.strength()],
            })
            .collect::<Vec<_>>();
        groups.sort_by(group_order);

        // With at most 7 cards only one suit can have 5 or more cards.
        let flush_values = Suit::suits()
            .find(|s| suit_counts[*s as usize] >= HAND_SIZE)
            .map(|suit| {
                let mut values = cards
                    .iter()
                    .filter(|c| c.suit() == suit)
                    .map(Card::value)
                    .collect::<Vec<_>>();
                values.sort_by(|v1, v2| v2.cmp(v1));
                values
            });

        let distinct = Value::values()
            .rev()
            .filter(|v| value_counts[v.strength()] > 0)
            .collect::<Vec<_>>();
        let straight = straight_values(&distinct);
        let straight_flush = flush_values.as_deref().and_then(straight_values);

        let (Some(first), Some(second)) = (groups.first(), groups.get(1)) else {
            return Err(EvalError::Internal(
                "error getting first or second value group".to_string(),
            ));
        };

        let combination = match straight_flush {
            Some(run) if run[0] == Value::Ace => Combination::RoyalFlush,
            Some(_) => Combination::StraightFlush,
            None if first.count == 4 => Combination::FourOfAKind,
            None if first.count == 3 && second.count >= 2 => Combination::FullHouse,
            None if flush_values.is_some() => Combination::Flush,
            None if straight.is_some() => Combination::Straight,
            None if first.count == 3 => Combination::ThreeOfAKind,
            None if first.count == 2 && second.count >= 2 => Combination::TwoPair,
            None if first.count == 2 => Combination::OnePair,
            None => Combination::HighCard,
        };

        let values = match combination {
            Combination::RoyalFlush | Combination::StraightFlush => straight_flush
                .ok_or_else(|| EvalError::Internal("error straight flush values".to_string()))?,
            Combination::Flush => {
                let flush = flush_values
                    .as_deref()
                    .filter(|v| v.len() >= HAND_SIZE)
                    .ok_or_else(|| EvalError::Internal("error flush values".to_string()))?;

                let mut out = [Value::Ace; HAND_SIZE];
                out.copy_from_slice(&flush[..HAND_SIZE]);
                out
            }
            Combination::Straight => straight
                .ok_or_else(|| EvalError::Internal("error straight values".to_string()))?,
            _ => grouped_values(&groups)?,
        };

        let rank = encode(combination, &values);
        Ok(Self {
            combination,
            values,
            rank,
        })
    }

    /// The hand combination.
    pub fn combination(&self) -> Combination {
        self.combination
    }

    /// The five values that break ties between hands with the same combination.
    pub fn values(&self) -> &[Value; HAND_SIZE] {
        &self.values
    }

    /// The numeric rank, a higher rank is a stronger hand.
    pub fn rank(&self) -> u64 {
        self.rank
    }
}

/// Takes the five values from the groups in count order and sorts them by strength.
fn grouped_values(groups: &[Group]) -> Result<[Value; HAND_SIZE], EvalError> {
    let mut values = Vec::with_capacity(HAND_SIZE);
    for group in groups {
        let needed = HAND_SIZE - values.len();
        values.extend(std::iter::repeat_n(group.value, group.count.min(needed)));
    }

    values.sort_by(|v1, v2| v2.strength().cmp(&v1.strength()));
    values
        .try_into()
        .map_err(|v: Vec<Value>| EvalError::Internal(format!("expected 5 values got {}", v.len())))
}

/// Encodes a combination and its values into a single integer.
fn encode(combination: Combination, values: &[Value]) -> u64 {
    let is_wheel = matches!(
        combination,
        Combination::Straight | Combination::StraightFlush
    ) && values.first() == Some(&Value::Five);

    let values_rank = values
        .iter()
        .filter(|v| !(is_wheel && **v == Value::Ace))
        .map(|v| 1u64 << (VALUE_BITS * v.strength()))
        .sum::<u64>();

    let category_rank = (1u64 << (VALUE_BITS * Value::COUNT)) * combination as u64;
    values_rank + category_rank
}

impl PartialEq for Rank {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank
    }
}

impl Eq for Rank {}

impl PartialOrd for Rank {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Rank {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ", self.combination)?;
        self.values.iter().try_for_each(|v| write!(f, "{v}"))
    }
}

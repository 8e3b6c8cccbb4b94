// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Deck of cards and board completions enumeration.
use ahash::HashSet;
use log::warn;
use rand::prelude::*;

use crate::{Card, Suit, Value};

#[cfg(feature = "parallel")]
mod parallel;

/// The maximum number of random draws before a sampler falls back to scanning
/// for an unseen subset.
const MAX_PROBES: usize = 64;

/// A cards Deck
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// The number of cards in the deck.
    pub const SIZE: usize = 52;

    /// Creates a deck without the given cards.
    pub fn without(used: &[Card]) -> Self {
        let mut deck = Self::default();
        deck.cards.retain(|c| !used.contains(c));
        deck
    }

    /// Checks if the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of cards in the deck.
    pub fn count(&self) -> usize {
        self.cards.len()
    }

    /// The cards in the deck.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// The number of k-cards subsets of this deck.
    pub fn num_combinations(&self, k: usize) -> u64 {
        binomial(self.cards.len(), k)
    }

    /// Returns an iterator over all the k-cards subsets of the deck.
    ///
    /// Subsets are generated in lexicographic order of the deck positions and
    /// only one subset is kept in memory at a time. If k is zero the iterator
    /// yields a single empty subset.
    pub fn combinations(&self, k: usize) -> Combinations<'_> {
        Combinations::new(&self.cards, k)
    }

    /// Returns an iterator over `iterations` distinct random k-cards subsets.
    ///
    /// If the deck has fewer than `iterations` distinct subsets the iterator
    /// yields all of them once.
    pub fn sample<R: Rng>(&self, rng: R, k: usize, iterations: usize) -> Sampler<'_, R> {
        let total = self.num_combinations(k);
        let remaining = if self.is_empty() {
            0
        } else if (iterations as u64) > total {
            warn!(
                "Only {total} distinct {k}-cards subsets available, \
                 sampling {total} instead of {iterations}"
            );
            total as usize
        } else {
            iterations
        };

        Sampler {
            cards: &self.cards,
            rng,
            k,
            remaining,
            seen: HashSet::default(),
        }
    }
}

impl Default for Deck {
    fn default() -> Self {
        let cards = Value::values()
            .flat_map(|v| Suit::suits().map(move |s| Card::new(v, s)))
            .collect::<Vec<_>>();
        Self { cards }
    }
}

/// Returns the binomial coefficient for n choose k.
fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }

    let k = k.min(n - k) as u128;
    let n = n as u128;
    let mut result = 1u128;
    for i in 0..k {
        result = result * (n - i) / (i + 1);
    }

    result.min(u64::MAX as u128) as u64
}

/// Iterator over all the k-subsets of a slice of cards.
#[derive(Debug)]
pub struct Combinations<'a> {
    cards: &'a [Card],
    indexes: Vec<usize>,
    done: bool,
}

impl<'a> Combinations<'a> {
    fn new(cards: &'a [Card], k: usize) -> Self {
        Self {
            cards,
            indexes: (0..k).collect(),
            done: k > cards.len(),
        }
    }

    /// Moves the indexes to the next combination, returns false after the last.
    fn advance(&mut self) -> bool {
        let n = self.cards.len();
        let k = self.indexes.len();

        // Find the rightmost index that can still move right.
        let Some(pos) = (0..k).rev().find(|&i| self.indexes[i] < n - k + i) else {
            return false;
        };

        self.indexes[pos] += 1;
        for i in (pos + 1)..k {
            self.indexes[i] = self.indexes[i - 1] + 1;
        }

        true
    }
}

impl Iterator for Combinations<'_> {
    type Item = Vec<Card>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let subset = self.indexes.iter().map(|&i| self.cards[i]).collect();
        self.done = !self.advance();
        Some(subset)
    }
}

/// Iterator over distinct random k-subsets of a slice of cards.
#[derive(Debug)]
pub struct Sampler<'a, R> {
    cards: &'a [Card],
    rng: R,
    k: usize,
    remaining: usize,
    seen: HashSet<u64>,
}

impl<R> Sampler<'_, R> {
    /// Registers a subset, returns false if it was already sampled.
    fn insert(&mut self, subset: &[Card]) -> bool {
        let key = subset.iter().fold(0u64, |key, c| key | c.mask());
        self.seen.insert(key)
    }
}

impl<R: Rng> Iterator for Sampler<'_, R> {
    type Item = Vec<Card>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        self.remaining -= 1;

        for _ in 0..MAX_PROBES {
            let mut subset = self
                .cards
                .choose_multiple(&mut self.rng, self.k)
                .copied()
                .collect::<Vec<_>>();
            subset.sort_unstable();

            if self.insert(&subset) {
                return Some(subset);
            }
        }

        // The space is nearly exhausted, take the first subset not yet seen.
        let cards = self.cards;
        let subset = Combinations::new(cards, self.k).find(|s| {
            let key = s.iter().fold(0u64, |key, c| key | c.mask());
            !self.seen.contains(&key)
        })?;
        self.insert(&subset);
        Some(subset)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(s: &str) -> Vec<Card> {
        s.as_bytes()
            .chunks(2)
            .map(|c| std::str::from_utf8(c).unwrap().parse().unwrap())
            .collect()
    }

    #[test]
    fn deck_order() {
        let deck = Deck::default();
        assert_eq!(deck.count(), Deck::SIZE);
        assert_eq!(deck.cards()[0].to_string(), "2s");
        assert_eq!(deck.cards()[1].to_string(), "2h");
        assert_eq!(deck.cards()[4].to_string(), "3s");
        assert_eq!(deck.cards()[51].to_string(), "Ac");

        let ids = deck.cards().iter().map(Card::id).collect::<Vec<_>>();
        assert_eq!(ids, (0..52).collect::<Vec<_>>());
    }

    #[test]
    fn deck_without() {
        let used = cards("AsKdQh2c");
        let deck = Deck::without(&used);
        assert_eq!(deck.count(), 48);
        assert!(used.iter().all(|c| !deck.cards().contains(c)));
    }

    #[test]
    fn binomials() {
        assert_eq!(binomial(52, 5), 2_598_960);
        assert_eq!(binomial(48, 5), 1_712_304);
        assert_eq!(binomial(45, 2), 990);
        assert_eq!(binomial(10, 0), 1);
        assert_eq!(binomial(0, 0), 1);
        assert_eq!(binomial(2, 3), 0);
    }

    #[test]
    fn combinations_count() {
        let deck = Deck::default();

        let mut hands = HashSet::default();
        for subset in deck.combinations(3) {
            assert_eq!(subset.len(), 3);
            hands.insert(subset);
        }
        assert_eq!(hands.len(), 22_100);

        assert_eq!(deck.combinations(2).count(), 1_326);
        assert_eq!(deck.num_combinations(2), 1_326);
    }

    #[test]
    fn combinations_order() {
        let deck = Deck::without(&Deck::default().cards()[4..]);
        let subsets = deck
            .combinations(2)
            .map(|s| s.iter().map(Card::to_string).collect::<String>())
            .collect::<Vec<_>>();
        assert_eq!(
            subsets,
            ["2s2h", "2s2d", "2s2c", "2h2d", "2h2c", "2d2c"]
        );
    }

    #[test]
    fn combinations_edge_cases() {
        let deck = Deck::default();
        let mut empty = deck.combinations(0);
        assert_eq!(empty.next(), Some(vec![]));
        assert_eq!(empty.next(), None);

        let deck = Deck::without(&Deck::default().cards()[2..]);
        assert_eq!(deck.combinations(3).count(), 0);
        assert_eq!(deck.combinations(2).count(), 1);
    }

    #[test]
    fn sample_distinct() {
        let deck = Deck::without(&cards("AsKdQhQc"));
        let rng = SmallRng::seed_from_u64(42);

        let mut seen = HashSet::default();
        let mut count = 0;
        for subset in deck.sample(rng, 5, 10_000) {
            assert_eq!(subset.len(), 5);
            assert!(subset.windows(2).all(|w| w[0] < w[1]));
            assert!(seen.insert(subset));
            count += 1;
        }
        assert_eq!(count, 10_000);
    }

    #[test]
    fn sample_exhausts_small_space() {
        // 6 cards choose 3 has only 20 subsets.
        let deck = Deck::without(&Deck::default().cards()[6..]);
        let rng = SmallRng::seed_from_u64(7);

        let subsets = deck.sample(rng, 3, 100).collect::<HashSet<_>>();
        assert_eq!(subsets.len(), 20);
    }

    #[test]
    fn sample_empty_deck() {
        let deck = Deck::without(Deck::default().cards());
        let rng = SmallRng::seed_from_u64(1);
        assert_eq!(deck.sample(rng, 3, 10).count(), 0);
    }

    #[test]
    fn sample_is_reproducible() {
        let deck = Deck::default();
        let a = deck
            .sample(SmallRng::seed_from_u64(3), 3, 50)
            .collect::<Vec<_>>();
        let b = deck
            .sample(SmallRng::seed_from_u64(3), 3, 50)
            .collect::<Vec<_>>();
        assert_eq!(a, b);
    }
}

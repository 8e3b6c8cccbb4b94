// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Parallel board completions iteration.
use std::{panic, thread};

use super::{Card, Deck, binomial};

/// The k-subsets of the positions `0..n` in colexicographic order, starting
/// from a given rank and stopping after a given number of subsets.
#[derive(Debug)]
struct ColexRange {
    positions: Vec<usize>,
    n: usize,
    remaining: u64,
}

impl ColexRange {
    fn new(n: usize, k: usize, start: u64, count: u64) -> Self {
        Self {
            positions: unrank(start, k),
            n,
            remaining: count,
        }
    }

    /// Calls `f` with the positions of each subset in the range.
    fn for_each<F>(mut self, mut f: F)
    where
        F: FnMut(&[usize]),
    {
        while self.remaining > 0 {
            f(&self.positions);
            self.remaining -= 1;

            if !self.advance() {
                break;
            }
        }
    }

    /// Moves to the next subset, returns false after the last one.
    fn advance(&mut self) -> bool {
        for j in 0..self.positions.len() {
            let limit = self.positions.get(j + 1).copied().unwrap_or(self.n);
            if self.positions[j] + 1 < limit {
                self.positions[j] += 1;
                self.positions[..j]
                    .iter_mut()
                    .enumerate()
                    .for_each(|(i, p)| *p = i);
                return true;
            }
        }

        false
    }
}

/// Converts a rank to its k-subset using the combinatorial number system,
/// the subset positions are in ascending order.
fn unrank(mut rank: u64, k: usize) -> Vec<usize> {
    let mut positions = vec![0; k];
    for i in (1..=k).rev() {
        let mut c = i - 1;
        while binomial(c + 1, i) <= rank {
            c += 1;
        }

        positions[i - 1] = c;
        rank -= binomial(c, i);
    }

    positions
}

impl Deck {
    /// Parallel fold over all the k-cards subsets of the deck.
    ///
    /// The subsets are split in `num_tasks` contiguous ranges, each task starts
    /// from the state returned by `init` and calls `f` for each subset in its
    /// range. Returns the final state of every task that had a non empty range.
    ///
    /// Panics if k is zero or num_tasks is zero.
    pub fn par_fold<S, I, F>(&self, num_tasks: usize, k: usize, init: I, f: F) -> Vec<S>
    where
        S: Send,
        I: Fn() -> S + Send + Sync,
        F: Fn(&mut S, &[Card]) + Send + Sync,
    {
        assert!(k > 0, "k must be positive");
        assert!(num_tasks > 0);

        let n = self.cards.len();
        if k > n {
            return Vec::new();
        }

        let num_subsets = self.num_combinations(k);
        let subsets_per_task = num_subsets.div_ceil(num_tasks as u64);

        thread::scope(|s| {
            let handles = (0..num_tasks as u64)
                .filter_map(|task_id| {
                    let start = task_id * subsets_per_task;
                    let count = subsets_per_task.min(num_subsets.saturating_sub(start));
                    if count == 0 {
                        return None;
                    }

                    let (init, f) = (&init, &f);
                    Some(s.spawn(move || {
                        let mut state = init();
                        let mut h = Vec::with_capacity(k);
                        ColexRange::new(n, k, start, count).for_each(|p| {
                            h.clear();
                            h.extend(p.iter().map(|&pos| self.cards[pos]));
                            f(&mut state, &h);
                        });
                        state
                    }))
                })
                .collect::<Vec<_>>();

            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|e| panic::resume_unwind(e)))
                .collect()
        })
    }
}

// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0
//
// Run with:
//
// ```bash
// $ cargo r --release --example eval_all5
// ...
// Total hands      2598960
//
// high card        1302540
// one pair         1098240
// two pair         123552
// three of a kind  54912
// straight         10200
// flush            5108
// full house       3744
// four of a kind   624
// straight flush   36
// royal flush      4
// ```

use std::time::Instant;

use pokerodds_eval::*;

fn main() {
    // Evaluate all 2.6M hands.
    let now = Instant::now();
    let mut counts = [0usize; Combination::COUNT];

    for hand in Deck::default().combinations(5) {
        match Rank::from_cards(&hand) {
            Ok(rank) => counts[rank.combination() as usize] += 1,
            Err(e) => {
                eprintln!("{e}");
                return;
            }
        }
    }

    let elapsed = now.elapsed().as_secs_f64();
    let total = counts.iter().sum::<usize>();
    println!("Total hands      {total}");
    println!("Elapsed:         {:.3}s", elapsed);
    println!("Hands/sec:       {:.0}\n", total as f64 / elapsed);

    for c in Combination::ALL {
        println!("{:<16} {}", c.name(), counts[c as usize]);
    }
}

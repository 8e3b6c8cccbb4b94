// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Texas Hold'em equity calculator.
use ahash::HashSet;
use log::debug;
use rand::prelude::*;
use serde::Serialize;

use pokerodds_cards::{Board, Card, Deck, Hand, HandSet};

use crate::{Combination, EvalError, Rank};

/// Below this number of missing board cards all completions are evaluated.
const EXHAUSTIVE_BELOW: usize = 3;

/// Simulation config.
#[derive(Debug, Clone)]
pub struct Config {
    /// The number of random board completions to evaluate.
    pub iterations: usize,
    /// Evaluate all board completions instead of sampling.
    pub exhaustive: bool,
    /// The random generator seed, if not set a seed is taken from the OS.
    pub seed: Option<u64>,
    /// The number of parallel tasks used for exhaustive runs.
    pub tasks: usize,
}

impl Config {
    /// The default number of iterations.
    pub const ITERATIONS: usize = 100_000;

    /// Checks the config values.
    pub fn validate(&self) -> Result<(), EvalError> {
        if self.iterations == 0 {
            return Err(EvalError::InvalidArgument(
                "The number of iterations must be greater than 0".to_string(),
            ));
        }

        if self.tasks == 0 {
            return Err(EvalError::InvalidArgument(
                "The number of tasks must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            iterations: Self::ITERATIONS,
            exhaustive: false,
            seed: None,
            tasks: 1,
        }
    }
}

/// Checks that no card is used twice by the hands and the board.
pub fn validate(hands: &HandSet, board: &Board) -> Result<(), EvalError> {
    let mut cards = HashSet::default();

    if !hands.cards().into_iter().all(|c| cards.insert(c)) {
        return Err(EvalError::InvalidArgument(
            "Cards must be unique for players".to_string(),
        ));
    }

    if !board.cards().iter().all(|c| cards.insert(*c)) {
        return Err(EvalError::InvalidArgument(
            "Cards must be unique for board".to_string(),
        ));
    }

    Ok(())
}

/// The simulation results for a hand.
#[derive(Debug, Clone, Serialize)]
pub struct Equity<'a> {
    hand: &'a Hand,
    count: u64,
    wins: u64,
    ties: u64,
    combinations: [u64; Combination::COUNT],
    favourite: bool,
}

impl<'a> Equity<'a> {
    fn new(hand: &'a Hand) -> Self {
        Self {
            hand,
            count: 0,
            wins: 0,
            ties: 0,
            combinations: [0; Combination::COUNT],
            favourite: false,
        }
    }

    /// The hand for these results.
    pub fn hand(&self) -> &'a Hand {
        self.hand
    }

    /// The number of trials.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// The number of trials won by this hand alone.
    pub fn wins(&self) -> u64 {
        self.wins
    }

    /// The number of trials this hand split with other hands.
    pub fn ties(&self) -> u64 {
        self.ties
    }

    /// The number of trials that ended with the given combination.
    pub fn combination(&self, combination: Combination) -> u64 {
        self.combinations[combination as usize]
    }

    /// Iterates all the combinations with their trials count.
    pub fn combinations(&self) -> impl Iterator<Item = (Combination, u64)> + '_ {
        Combination::ALL
            .into_iter()
            .map(|c| (c, self.combinations[c as usize]))
    }

    /// Checks if this hand has the most wins.
    pub fn is_favourite(&self) -> bool {
        self.favourite
    }

    /// The ratio of won trials.
    pub fn win_ratio(&self) -> f64 {
        ratio(self.wins, self.count)
    }

    /// The ratio of tied trials.
    pub fn tie_ratio(&self) -> f64 {
        ratio(self.ties, self.count)
    }

    /// The ratio of trials that ended with the given combination.
    pub fn combination_ratio(&self, combination: Combination) -> f64 {
        ratio(self.combination(combination), self.count)
    }

    fn record(&mut self, combination: Combination, is_best: bool, is_tie: bool) {
        self.count += 1;
        self.combinations[combination as usize] += 1;

        match (is_best, is_tie) {
            (true, false) => self.wins += 1,
            (true, true) => self.ties += 1,
            _ => {}
        }
    }

    fn merge(&mut self, other: &Equity<'_>) {
        self.count += other.count;
        self.wins += other.wins;
        self.ties += other.ties;
        for (c, o) in self.combinations.iter_mut().zip(other.combinations) {
            *c += o;
        }
    }
}

fn ratio(n: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        n as f64 / total as f64
    }
}

/// The simulation results for all hands, in the hands order.
#[derive(Debug, Clone, Serialize)]
pub struct EquityReport<'a> {
    equities: Vec<Equity<'a>>,
}

impl<'a> EquityReport<'a> {
    /// Creates a report with zero trials for each hand.
    pub fn new(hands: &'a HandSet) -> Self {
        Self {
            equities: hands.hands().iter().map(Equity::new).collect(),
        }
    }

    /// The results for each hand.
    pub fn equities(&self) -> &[Equity<'a>] {
        &self.equities
    }

    /// The results for the given hand string.
    pub fn get(&self, hand: &str) -> Option<&Equity<'a>> {
        self.equities.iter().find(|e| e.hand.hand() == hand)
    }

    /// The number of trials, the same for all hands.
    pub fn iterations(&self) -> u64 {
        self.equities.first().map(|e| e.count).unwrap_or_default()
    }

    /// The highest number of wins.
    pub fn max_wins(&self) -> u64 {
        self.equities.iter().map(|e| e.wins).max().unwrap_or_default()
    }

    /// Adds the results of another report for the same hands.
    pub fn merge(&mut self, other: &EquityReport<'_>) {
        for (e, o) in self.equities.iter_mut().zip(&other.equities) {
            e.merge(o);
        }
    }

    /// Evaluates all hands for a board completion and updates their counters.
    fn play(&mut self, board: &Board, completion: &[Card]) -> Result<(), EvalError> {
        let ranks = self
            .equities
            .iter()
            .map(|e| Rank::evaluate(board, completion, e.hand))
            .collect::<Result<Vec<_>, _>>()?;

        let best = ranks
            .iter()
            .map(Rank::rank)
            .max()
            .ok_or_else(|| EvalError::Internal("no hands to rank".to_string()))?;
        let is_tie = ranks.iter().filter(|r| r.rank() == best).count() > 1;

        for (equity, rank) in self.equities.iter_mut().zip(&ranks) {
            equity.record(rank.combination(), rank.rank() == best, is_tie);
        }

        Ok(())
    }

    /// Marks the hands with the most wins, no hand is marked if nobody won.
    fn mark_favourites(&mut self) {
        let max_wins = self.max_wins();
        for e in &mut self.equities {
            e.favourite = max_wins > 0 && e.wins == max_wins;
        }
    }
}

/// Texas Hold'em odds calculator.
#[derive(Debug, Clone, Default)]
pub struct Odds {
    config: Config,
}

impl Odds {
    /// Creates a calculator with the given config.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Computes the equity of each hand by evaluating the board completions.
    ///
    /// All completions are evaluated when fewer than 3 cards are missing or
    /// when the config asks for an exhaustive run, otherwise the given number
    /// of distinct random completions is evaluated.
    pub fn calculate<'a>(
        &self,
        hands: &'a HandSet,
        board: &Board,
    ) -> Result<EquityReport<'a>, EvalError> {
        self.config.validate()?;
        validate(hands, board)?;

        let mut used = board.cards().to_vec();
        used.extend(hands.cards());

        let need = board.missing();
        let deck = Deck::without(&used);

        let mut report = if need == 0 {
            debug!("Complete board, evaluating a single trial");
            let mut report = EquityReport::new(hands);
            report.play(board, &[])?;
            report
        } else if need < EXHAUSTIVE_BELOW || self.config.exhaustive {
            debug!(
                "Evaluating all {} completions of {need} cards",
                deck.num_combinations(need)
            );
            self.exhaustive(hands, board, &deck, need)?
        } else {
            debug!(
                "Evaluating {} random completions of {need} cards",
                self.config.iterations
            );
            self.random(hands, board, &deck, need)?
        };

        report.mark_favourites();
        debug!(
            "Evaluated {} trials for {} hands",
            report.iterations(),
            hands.len()
        );

        Ok(report)
    }

    fn random<'a>(
        &self,
        hands: &'a HandSet,
        board: &Board,
        deck: &Deck,
        need: usize,
    ) -> Result<EquityReport<'a>, EvalError> {
        let rng = match self.config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };

        let mut report = EquityReport::new(hands);
        for completion in deck.sample(rng, need, self.config.iterations) {
            report.play(board, &completion)?;
        }

        Ok(report)
    }

    #[cfg(not(feature = "parallel"))]
    fn exhaustive<'a>(
        &self,
        hands: &'a HandSet,
        board: &Board,
        deck: &Deck,
        need: usize,
    ) -> Result<EquityReport<'a>, EvalError> {
        let mut report = EquityReport::new(hands);
        for completion in deck.combinations(need) {
            report.play(board, &completion)?;
        }

        Ok(report)
    }

    #[cfg(feature = "parallel")]
    fn exhaustive<'a>(
        &self,
        hands: &'a HandSet,
        board: &Board,
        deck: &Deck,
        need: usize,
    ) -> Result<EquityReport<'a>, EvalError> {
        let mut report = EquityReport::new(hands);

        if self.config.tasks == 1 {
            for completion in deck.combinations(need) {
                report.play(board, &completion)?;
            }

            return Ok(report);
        }

        // Each task owns its report, a task stops playing after an error.
        let states = deck.par_fold(
            self.config.tasks,
            need,
            || Ok(EquityReport::new(hands)),
            |state: &mut Result<EquityReport<'a>, EvalError>, completion| {
                let res = match state {
                    Ok(report) => report.play(board, completion),
                    Err(_) => return,
                };

                if let Err(e) = res {
                    *state = Err(e);
                }
            },
        );

        for state in states {
            report.merge(&state?);
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(iterations: usize, exhaustive: bool) -> Config {
        Config {
            iterations,
            exhaustive,
            seed: Some(42),
            tasks: 1,
        }
    }

    fn check_invariants(report: &EquityReport<'_>) {
        let iterations = report.iterations();
        for e in report.equities() {
            assert_eq!(e.count(), iterations);
            assert_eq!(e.combinations().map(|(_, n)| n).sum::<u64>(), iterations);
        }

        // Each trial has a single winner or a group of tied hands.
        let wins = report.equities().iter().map(Equity::wins).sum::<u64>();
        assert!(wins <= iterations);
    }

    #[test]
    fn complete_board_single_trial() {
        let hands = HandSet::holdem(["AsAd", "KsKd"]).unwrap();
        let board = Board::new("2s3d6d7hTc").unwrap();

        let report = Odds::new(config(1000, false))
            .calculate(&hands, &board)
            .unwrap();
        check_invariants(&report);
        assert_eq!(report.iterations(), 1);

        let aa = report.get("AsAd").unwrap();
        let kk = report.get("KsKd").unwrap();
        assert_eq!((aa.wins(), aa.ties()), (1, 0));
        assert_eq!((kk.wins(), kk.ties()), (0, 0));
        assert_eq!(aa.combination(Combination::OnePair), 1);
        assert!(aa.is_favourite());
        assert!(!kk.is_favourite());
    }

    #[test]
    fn river_is_exhaustive() {
        let hands = HandSet::holdem(["AsAd", "KsKd"]).unwrap();
        let board = Board::new("2s3d6d7h").unwrap();

        // Iterations are ignored when one card is missing.
        let report = Odds::new(config(5, false))
            .calculate(&hands, &board)
            .unwrap();
        check_invariants(&report);
        assert_eq!(report.iterations(), 44);

        // Only the two remaining kings make the KK hand win.
        let kk = report.get("KsKd").unwrap();
        assert_eq!(kk.wins(), 2);
        assert_eq!(report.get("AsAd").unwrap().wins(), 42);
        assert_eq!(report.max_wins(), 42);
    }

    #[test]
    fn turn_and_river_exhaustive() {
        let hands = HandSet::holdem(["AhKh", "QsQc"]).unwrap();
        let board = Board::new("Qh7h2d").unwrap();

        let report = Odds::new(config(10, false))
            .calculate(&hands, &board)
            .unwrap();
        check_invariants(&report);
        assert_eq!(report.iterations(), 990);
    }

    #[test]
    fn split_pot() {
        let hands = HandSet::holdem(["2s3s", "2h3h"]).unwrap();
        let board = Board::new("AcKdQhJcTd").unwrap();

        let report = Odds::default().calculate(&hands, &board).unwrap();
        for e in report.equities() {
            assert_eq!((e.wins(), e.ties()), (0, 1));
            assert_eq!(e.combination(Combination::Straight), 1);

            // Nobody won a trial.
            assert!(!e.is_favourite());
        }
    }

    #[test]
    fn six_high_straight_beats_wheel() {
        let hands = HandSet::holdem(["Ah5c", "5h6c"]).unwrap();
        let board = Board::new("2s3d4hKcQd").unwrap();

        let report = Odds::default().calculate(&hands, &board).unwrap();
        let wheel = report.get("Ah5c").unwrap();
        let six = report.get("5h6c").unwrap();

        assert_eq!(wheel.combination(Combination::Straight), 1);
        assert_eq!(six.combination(Combination::Straight), 1);
        assert_eq!((wheel.wins(), six.wins()), (0, 1));
        assert!(six.is_favourite());
    }

    #[test]
    fn random_run() {
        let hands = HandSet::holdem(["AsAd", "7c2h", "JhTh"]).unwrap();
        let board = Board::default();

        let report = Odds::new(config(2_000, false))
            .calculate(&hands, &board)
            .unwrap();
        check_invariants(&report);
        assert_eq!(report.iterations(), 2_000);

        let aces = report.get("AsAd").unwrap();
        assert!(aces.is_favourite());
        assert!(aces.win_ratio() > 0.5);

        // Same seed same results.
        let again = Odds::new(config(2_000, false))
            .calculate(&hands, &board)
            .unwrap();
        assert_eq!(again.get("AsAd").unwrap().wins(), aces.wins());
    }

    #[test]
    fn single_hand() {
        let hands = HandSet::holdem(["AsAd"]).unwrap();
        let board = Board::new("Ks7d2c").unwrap();

        let report = Odds::default().calculate(&hands, &board).unwrap();
        check_invariants(&report);

        let aces = &report.equities()[0];
        assert_eq!(aces.wins(), 1081);
        assert_eq!(aces.combination(Combination::HighCard), 0);
        assert!(aces.is_favourite());
        assert!((aces.win_ratio() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn report_keeps_hands_order() {
        let hands = HandSet::holdem(["7c2h", "AsAd", "JhTh"]).unwrap();
        let board = Board::new("2s3d6d7hTc").unwrap();

        let report = Odds::default().calculate(&hands, &board).unwrap();
        let order = report
            .equities()
            .iter()
            .map(|e| e.hand().hand())
            .collect::<Vec<_>>();
        assert_eq!(order, ["7c2h", "AsAd", "JhTh"]);
    }

    #[test]
    fn duplicate_cards() {
        let board = Board::new("2s3d6d").unwrap();

        let hands = HandSet::holdem(["AsAd", "AsKd"]).unwrap();
        let res = Odds::default().calculate(&hands, &board);
        assert!(matches!(res, Err(EvalError::InvalidArgument(_))));

        let hands = HandSet::holdem(["AsAd", "2sKd"]).unwrap();
        let res = Odds::default().calculate(&hands, &board);
        assert!(matches!(res, Err(EvalError::InvalidArgument(_))));
    }

    #[test]
    fn zero_iterations() {
        let hands = HandSet::holdem(["AsAd", "KsKd"]).unwrap();
        let res = Odds::new(config(0, false)).calculate(&hands, &Board::default());
        assert!(matches!(res, Err(EvalError::InvalidArgument(_))));
    }

    #[test]
    fn merge_reports() {
        let hands = HandSet::holdem(["AsAd", "KsKd"]).unwrap();
        let board = Board::new("2s3d6d7h").unwrap();
        let odds = Odds::new(config(10, false));

        let report = odds.calculate(&hands, &board).unwrap();
        let mut merged = EquityReport::new(&hands);
        merged.merge(&report);
        merged.merge(&report);

        assert_eq!(merged.iterations(), 88);
        assert_eq!(merged.get("AsAd").unwrap().wins(), 84);
        check_invariants(&merged);
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn parallel_matches_sequential() {
        let hands = HandSet::holdem(["AhKh", "QsQc", "9d8d"]).unwrap();
        let board = Board::new("Qh7h2d").unwrap();

        let seq = Odds::new(config(10, true))
            .calculate(&hands, &board)
            .unwrap();

        let mut par_config = config(10, true);
        par_config.tasks = 4;
        let par = Odds::new(par_config).calculate(&hands, &board).unwrap();

        assert_eq!(par.iterations(), seq.iterations());
        for (p, s) in par.equities().iter().zip(seq.equities()) {
            assert_eq!(p.wins(), s.wins());
            assert_eq!(p.ties(), s.ties());
            assert_eq!(p.is_favourite(), s.is_favourite());
            for c in Combination::ALL {
                assert_eq!(p.combination(c), s.combination(c));
            }
        }
    }
}

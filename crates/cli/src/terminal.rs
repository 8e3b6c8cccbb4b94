// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Terminal output.
use crossterm::style::{Color, Stylize};
use std::{io::Write, time::Duration};

use pokerodds_eval::{Board, Card, Combination, EquityReport, Suit};

/// Width of a percentage column.
const COLUMN_WIDTH: usize = 8;

const TIE_COLOR: Color = Color::Rgb {
    r: 0xb1,
    g: 0xb3,
    b: 0x6f,
};

/// Writes the board, the equity of each hand, and the combinations table.
pub fn print<W: Write>(
    out: &mut W,
    board: &Board,
    report: &EquityReport<'_>,
    possibilities: bool,
    elapsed: Duration,
) -> anyhow::Result<()> {
    print_board(out, board)?;
    print_equities(out, report)?;
    print_possibilities(out, report, possibilities)?;

    let footer = format!(
        "{} iterations in {:.2} sec.",
        report.iterations(),
        elapsed.as_secs_f64()
    );
    writeln!(out, "{}", footer.grey())?;

    Ok(())
}

fn print_board<W: Write>(out: &mut W, board: &Board) -> anyhow::Result<()> {
    if !board.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", "board:".grey())?;
        writeln!(out, "{}", cards(board.cards()))?;
        writeln!(out)?;
    }

    Ok(())
}

fn print_equities<W: Write>(out: &mut W, report: &EquityReport<'_>) -> anyhow::Result<()> {
    let many_hands = report.equities().len() > 1;
    let has_ties = report.equities().iter().any(|e| e.ties() > 0);

    let header = format!(
        "hand      {}     {}",
        if many_hands { "win" } else { "" },
        if has_ties { "tie" } else { "" }
    );
    writeln!(out, "{}", header.grey())?;

    for equity in report.equities() {
        write!(out, "{}", cards(equity.hand().cards()))?;

        if many_hands {
            let win = format!("{:>COLUMN_WIDTH$}", percent(equity.win_ratio()));
            if equity.is_favourite() {
                write!(out, "{}", win.green())?;
            } else if equity.wins() == 0 {
                write!(out, "{}", win.grey())?;
            } else {
                write!(out, "{win}")?;
            }
        }

        if equity.ties() > 0 {
            let tie = format!("{:>COLUMN_WIDTH$}", percent(equity.tie_ratio()));
            write!(out, "{}", tie.with(TIE_COLOR))?;
        }

        writeln!(out)?;
    }

    writeln!(out)?;
    Ok(())
}

fn print_possibilities<W: Write>(
    out: &mut W,
    report: &EquityReport<'_>,
    possibilities: bool,
) -> anyhow::Result<()> {
    let many_hands = report.equities().len() > 1;
    if !possibilities && many_hands {
        return Ok(());
    }

    let name_width = Combination::ALL
        .iter()
        .map(|c| c.name().len())
        .max()
        .unwrap_or_default()
        + 1;

    if many_hands {
        write!(out, "{:name_width$}", "")?;
        for equity in report.equities() {
            write!(out, "   {}", cards(equity.hand().cards()))?;
        }
        writeln!(out)?;
    }

    for combination in Combination::ALL {
        write!(out, "{:<name_width$}", combination.name())?;

        for equity in report.equities() {
            let max = equity.combinations().map(|(_, n)| n).max().unwrap_or_default();
            let count = equity.combination(combination);
            let value = format!(
                "{:>COLUMN_WIDTH$}",
                percent(equity.combination_ratio(combination))
            );

            if count == max {
                write!(out, "{}", value.green())?;
            } else if count == 0 {
                write!(out, "{}", value.grey())?;
            } else {
                write!(out, "{value}")?;
            }
        }

        writeln!(out)?;
    }

    writeln!(out)?;
    Ok(())
}

/// Formats a ratio as a percentage with two decimals.
fn percent(ratio: f64) -> String {
    if ratio >= 0.0001 {
        format!("{:.2}%", ratio * 100.0)
    } else if ratio > 0.0 {
        "< 0.01%".to_string()
    } else {
        "·".to_string()
    }
}

/// Formats cards with the suit glyph and color.
fn cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|c| {
            let bg = match c.suit() {
                Suit::Spades => Color::Rgb {
                    r: 0x33,
                    g: 0x33,
                    b: 0x33,
                },
                Suit::Hearts => Color::Rgb {
                    r: 0x9c,
                    g: 0x09,
                    b: 0x09,
                },
                Suit::Diamonds => Color::Rgb {
                    r: 0x09,
                    g: 0x29,
                    b: 0x9c,
                },
                Suit::Clubs => Color::Rgb {
                    r: 0x07,
                    g: 0x8f,
                    b: 0x34,
                },
            };

            format!("{}{}", c.value(), c.suit().glyph())
                .white()
                .on(bg)
                .to_string()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pokerodds_eval::{HandSet, Odds};

    #[test]
    fn percent_format() {
        assert_eq!(percent(0.0), "·");
        assert_eq!(percent(0.00005), "< 0.01%");
        assert_eq!(percent(0.5), "50.00%");
        assert_eq!(percent(1.0), "100.00%");
        assert_eq!(percent(0.12345), "12.35%");
    }

    #[test]
    fn print_report() {
        let hands = HandSet::holdem(["AsAd", "KsKd"]).unwrap();
        let board = Board::new("2s3d6d7h").unwrap();
        let report = Odds::default().calculate(&hands, &board).unwrap();

        let mut out = Vec::new();
        print(&mut out, &board, &report, true, Duration::from_millis(10)).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("board:"));
        assert!(text.contains("95.45%"));
        assert!(text.contains("4.55%"));
        assert!(text.contains("three of a kind"));
        assert!(text.contains("44 iterations in 0.01 sec."));
    }

    #[test]
    fn print_single_hand_shows_combinations() {
        let hands = HandSet::holdem(["AsAd"]).unwrap();
        let board = Board::new("2s3d6d7hTc").unwrap();
        let report = Odds::default().calculate(&hands, &board).unwrap();

        let mut out = Vec::new();
        print(&mut out, &board, &report, false, Duration::ZERO).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("one pair"));
        assert!(text.contains("100.00%"));
        assert!(!text.contains("win"));
    }
}

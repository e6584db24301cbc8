//! Advent of Code 2023 solvers.
//!
//! Each day is a function from the puzzle part and the raw input to the printed answer.
//! Day 5 is backed by the [`almanac`] range pipeline; the rest live in `days`.

pub mod almanac;
mod days;

use anyhow::{bail, Context, Result};

type Solver = fn(u8, &str) -> Result<String>;

pub fn solve(day: u8, part: u8, input: &str) -> Result<String> {
    let solver: Solver = match day {
        2 => days::day2, 3 => days::day3, 4 => days::day4, 5 => days::day5,
        6 => days::day6, 7 => days::day7, 8 => days::day8, 9 => days::day9,
        10 => days::day10, 11 => days::day11,
        _ => bail!("no solver for day {}", day)
    };
    if part != 1 && part != 2 {bail!("part must be 1 or 2, not {}", part)}
    solver(part, input).with_context(|| format!("day {} part {}", day, part))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_days_and_parts_are_errors() {
        assert!(solve(1, 1, "").is_err());
        assert!(solve(12, 1, "").is_err());
        assert!(solve(9, 3, "0 0 0").is_err());
    }

    #[test]
    fn errors_name_the_puzzle() {
        let err = solve(5, 2, "seeds: 1 2 3").unwrap_err();
        assert_eq!(err.to_string(), "day 5 part 2");
        assert!(format!("{:#}", err).contains("(start, length) pairs"));
    }

    #[test]
    fn dispatches_by_day() {
        assert_eq!(solve(9, 1, "0 3 6 9 12 15").unwrap(), "18");
        assert_eq!(solve(9, 2, "10 13 16 21 30 45").unwrap(), "5");
    }
}

use std::collections::VecDeque;

use arrayvec::ArrayVec;
use tracing::trace;

use super::interval::{Interval, IntervalSet};
use super::table::{MappingRule, MappingTable};

/// Where a range sits relative to the rule it overlaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    /// Entirely inside the rule's source.
    Contained,
    /// Starts before the rule and ends inside it.
    Leading,
    /// Starts inside the rule and ends after it.
    Trailing,
    /// Starts before the rule and ends after it.
    Straddling,
}

/// One range cut against one rule: the mapped middle plus whatever lies outside the rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split {
    pub overlap: Overlap,
    pub mapped: Interval,
    pub remainders: ArrayVec<Interval, 2>,
}

/// `piece` must overlap `rule`'s source.
pub fn split(piece: Interval, rule: &MappingRule) -> Split {
    let source = rule.source();
    let starts_before = piece.start() < source.start();
    let ends_after = piece.end() > source.end();

    let mut remainders = ArrayVec::new();
    if starts_before {
        remainders.push(Interval::span(piece.start(), source.start()));
    }
    if ends_after {
        remainders.push(Interval::span(source.end(), piece.end()));
    }
    let inside = Interval::span(
        piece.start().max(source.start()),
        piece.end().min(source.end()),
    );

    Split {
        overlap: match (starts_before, ends_after) {
            (false, false) => Overlap::Contained,
            (true, false) => Overlap::Leading,
            (false, true) => Overlap::Trailing,
            (true, true) => Overlap::Straddling,
        },
        mapped: rule.map_inside(inside),
        remainders,
    }
}

/// Sends every value of `input` through `table`, exactly once each.
///
/// Pieces left over after a split go back on the queue and are matched from the first
/// rule again. They can never hit the rule that produced them since rule sources are
/// disjoint, so each piece is split at most once per rule.
pub fn apply(table: &MappingTable, input: &IntervalSet) -> IntervalSet {
    let mut queue: VecDeque<Interval> = input.iter().copied().collect();
    let mut output = IntervalSet::new();

    while let Some(piece) = queue.pop_front() {
        if piece.is_empty() {
            continue;
        }
        let Some(rule) = table.first_overlapping(&piece) else {
            output.push(piece);
            continue;
        };
        let split = split(piece, rule);
        trace!(
            table = table.name(),
            %piece,
            rule = %rule.source(),
            overlap = ?split.overlap,
            "split"
        );
        output.push(split.mapped);
        queue.extend(split.remainders);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iv(start: i64, end: i64) -> Interval {
        Interval::new(start, end).unwrap()
    }

    fn set(intervals: &[(i64, i64)]) -> IntervalSet {
        intervals.iter().map(|&(start, end)| iv(start, end)).collect()
    }

    fn table(rules: &[(i64, i64, i64)]) -> MappingTable {
        MappingTable::new(
            "test",
            rules
                .iter()
                .map(|&(dst, src, len)| MappingRule::from_triple(dst, src, len).unwrap())
                .collect(),
        )
        .unwrap()
    }

    fn values(intervals: &IntervalSet) -> Vec<i64> {
        let mut values: Vec<i64> = intervals
            .iter()
            .flat_map(|interval| interval.start()..interval.end())
            .collect();
        values.sort_unstable();
        values
    }

    #[test]
    fn empty_table_is_identity() {
        let input = set(&[(0, 10), (5, 8), (100, 200)]);
        assert_eq!(apply(&table(&[]), &input), input);
    }

    #[test]
    fn leading_piece_stays_put() {
        let output = apply(&table(&[(50, 12, 5)]), &set(&[(10, 15)]));
        assert_eq!(output.normalized(), set(&[(10, 12), (50, 53)]));
        assert_eq!(values(&output), vec![10, 11, 50, 51, 52]);
    }

    #[test]
    fn straddling_piece_keeps_both_ends() {
        let output = apply(&table(&[(100, 5, 5)]), &set(&[(0, 20)]));
        assert_eq!(output.normalized(), set(&[(0, 5), (10, 20), (100, 105)]));
        assert_eq!(output.len(), 3);
    }

    #[test]
    fn contained_piece_keeps_its_length() {
        let output = apply(&table(&[(1000, 0, 100)]), &set(&[(20, 37)]));
        assert_eq!(output, set(&[(1020, 1037)]));
        assert_eq!(output.covered_len(), 17);
    }

    #[test]
    fn split_classifies_each_overlap() {
        let rule = MappingRule::from_triple(100, 10, 10).unwrap();
        let cases = [
            ((12, 15), Overlap::Contained, (102, 105), vec![]),
            ((5, 15), Overlap::Leading, (100, 105), vec![iv(5, 10)]),
            ((15, 25), Overlap::Trailing, (105, 110), vec![iv(20, 25)]),
            ((0, 30), Overlap::Straddling, (100, 110), vec![iv(0, 10), iv(20, 30)]),
            ((10, 20), Overlap::Contained, (100, 110), vec![]),
        ];
        for ((start, end), overlap, (mapped_start, mapped_end), remainders) in cases {
            let split = split(iv(start, end), &rule);
            assert_eq!(split.overlap, overlap, "[{start}, {end})");
            assert_eq!(split.mapped, iv(mapped_start, mapped_end));
            assert_eq!(split.remainders.to_vec(), remainders);
        }
    }

    #[test]
    fn one_range_splits_at_most_once_per_rule() {
        let rules = table(&[(500, 10, 5), (600, 30, 5), (700, 50, 5), (800, 70, 5)]);
        let output = apply(&rules, &set(&[(0, 100)]));
        assert!(output.len() <= 2 * rules.rules().len() + 1);
        assert_eq!(output.covered_len(), 100);
    }

    #[test]
    fn stages_compose_like_separate_applies() {
        let first = table(&[(52, 50, 48), (50, 98, 2)]);
        let second = table(&[(0, 15, 37), (37, 52, 2), (39, 0, 15)]);
        let seeds = set(&[(79, 93), (55, 68)]);

        let stepwise = apply(&second, &apply(&first, &seeds));
        let folded = [first, second]
            .iter()
            .fold(seeds, |acc, table| apply(table, &acc));
        assert_eq!(stepwise.normalized(), folded.normalized());
    }

    /// Random disjoint tables checked value by value against `MappingTable::map_value`.
    #[test]
    fn every_value_is_mapped_exactly_once() {
        let mut rng = fastrand::Rng::with_seed(0x5eed_2023);
        for _ in 0..200 {
            let mut rules = Vec::new();
            let mut cursor = rng.i64(-20..20);
            for _ in 0..rng.usize(0..8) {
                let source_start = cursor + rng.i64(0..15);
                let len = rng.i64(1..40);
                rules.push(
                    MappingRule::from_triple(rng.i64(-100..400), source_start, len).unwrap(),
                );
                cursor = source_start + len;
            }
            rng.shuffle(&mut rules);
            let table = MappingTable::new("random", rules).unwrap();

            let input: IntervalSet = (0..rng.usize(1..6))
                .map(|_| {
                    let start = rng.i64(-40..250);
                    iv(start, start + rng.i64(0..80))
                })
                .collect();

            let mut expected: Vec<i64> = input
                .iter()
                .flat_map(|interval| interval.start()..interval.end())
                .map(|value| table.map_value(value))
                .collect();
            expected.sort_unstable();

            assert_eq!(values(&apply(&table, &input)), expected, "{table:?} on {input:?}");
        }
    }
}

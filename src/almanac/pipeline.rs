use tracing::debug;

use super::error::AlmanacError;
use super::interval::IntervalSet;
use super::remap::apply;
use super::table::MappingTable;

/// Mapping tables in stage order; each stage's output feeds the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pipeline {
    tables: Vec<MappingTable>,
}

impl Pipeline {
    pub fn new(tables: Vec<MappingTable>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &[MappingTable] {
        &self.tables
    }

    pub fn run(&self, seeds: IntervalSet) -> IntervalSet {
        self.tables.iter().fold(seeds, |ranges, table| {
            let mapped = apply(table, &ranges);
            debug!(
                table = table.name(),
                ranges_in = ranges.len(),
                ranges_out = mapped.len(),
                "applied stage"
            );
            mapped
        })
    }

    pub fn map_value(&self, value: i64) -> i64 {
        self.tables
            .iter()
            .fold(value, |value, table| table.map_value(value))
    }
}

/// Smallest value reachable at the end of the pipeline.
pub fn minimum(ranges: &IntervalSet) -> Result<i64, AlmanacError> {
    ranges
        .iter()
        .filter(|interval| !interval.is_empty())
        .map(|interval| interval.start())
        .min()
        .ok_or(AlmanacError::EmptyResult)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::almanac::interval::Interval;
    use crate::almanac::table::MappingRule;

    fn iv(start: i64, end: i64) -> Interval {
        Interval::new(start, end).unwrap()
    }

    fn table(name: &str, rules: &[(i64, i64, i64)]) -> MappingTable {
        MappingTable::new(
            name,
            rules
                .iter()
                .map(|&(dst, src, len)| MappingRule::from_triple(dst, src, len).unwrap())
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn minimum_picks_smallest_start() {
        let ranges: IntervalSet = [iv(82, 83), iv(46, 47), iv(60, 61)].into_iter().collect();
        assert_eq!(minimum(&ranges).unwrap(), 46);
    }

    #[test]
    fn minimum_of_nothing_is_an_error() {
        assert!(matches!(
            minimum(&IntervalSet::new()),
            Err(AlmanacError::EmptyResult)
        ));
        let only_empty: IntervalSet = [iv(3, 3)].into_iter().collect();
        assert!(matches!(minimum(&only_empty), Err(AlmanacError::EmptyResult)));
    }

    #[test]
    fn run_folds_stages_in_order() {
        let pipeline = Pipeline::new(vec![
            table("a", &[(100, 0, 10)]),
            table("b", &[(0, 105, 5)]),
        ]);
        let seeds: IntervalSet = [iv(0, 10)].into_iter().collect();
        let expected: IntervalSet = [iv(0, 5), iv(100, 105)].into_iter().collect();
        assert_eq!(pipeline.run(seeds).normalized(), expected);
        assert_eq!(pipeline.map_value(7), 2);
        assert_eq!(pipeline.map_value(3), 103);
    }

    #[test]
    fn empty_pipeline_passes_seeds_through() {
        let seeds: IntervalSet = [iv(5, 9)].into_iter().collect();
        assert_eq!(Pipeline::default().run(seeds.clone()), seeds);
        assert_eq!(Pipeline::default().map_value(42), 42);
    }
}

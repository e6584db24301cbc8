//! Seed-to-location lookup through the almanac's chain of range maps.
//!
//! Seed ranges can span billions of values, so they are never expanded: each stage
//! cuts the in-flight [`IntervalSet`] along its rules' sources and shifts the pieces.

mod error;
mod interval;
mod parse;
mod pipeline;
mod remap;
mod table;

pub use error::AlmanacError;
pub use interval::{Interval, IntervalSet};
pub use parse::{Almanac, SeedMode};
pub use pipeline::{minimum, Pipeline};
pub use remap::{apply, split, Overlap, Split};
pub use table::{MappingRule, MappingTable};

/// Lowest location any seed reaches.
///
/// Individual seeds are mapped value by value; seed ranges go through the interval
/// pipeline.
pub fn lowest_location(almanac: &Almanac, mode: SeedMode) -> Result<i64, AlmanacError> {
    match mode {
        SeedMode::Individual => almanac
            .seeds()
            .iter()
            .map(|&seed| almanac.pipeline().map_value(seed))
            .min()
            .ok_or(AlmanacError::EmptyResult),
        SeedMode::Ranges => {
            let seeds = almanac.seed_intervals(mode)?;
            minimum(&almanac.pipeline().run(seeds))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "seeds: 79 14 55 13

seed-to-soil map:
50 98 2
52 50 48

soil-to-fertilizer map:
0 15 37
37 52 2
39 0 15

fertilizer-to-water map:
49 53 8
0 11 42
42 0 7
57 7 4

water-to-light map:
88 18 7
18 25 70

light-to-temperature map:
45 77 23
81 45 19
68 64 13

temperature-to-humidity map:
0 69 1
1 0 69

humidity-to-location map:
60 56 37
56 93 4
";

    #[test]
    fn example_individual_seeds() {
        let almanac = Almanac::parse(EXAMPLE).unwrap();
        let locations = almanac
            .seeds()
            .iter()
            .map(|&seed| almanac.pipeline().map_value(seed))
            .collect::<Vec<_>>();
        assert_eq!(locations, [82, 43, 86, 35]);
        assert_eq!(lowest_location(&almanac, SeedMode::Individual).unwrap(), 35);
    }

    #[test]
    fn example_seed_ranges() {
        let almanac = Almanac::parse(EXAMPLE).unwrap();
        assert_eq!(lowest_location(&almanac, SeedMode::Ranges).unwrap(), 46);
    }

    #[test]
    fn ranges_agree_with_every_seed_mapped_alone() {
        let almanac = Almanac::parse(EXAMPLE).unwrap();
        let seeds = almanac.seed_intervals(SeedMode::Ranges).unwrap();
        let brute_force = seeds
            .iter()
            .flat_map(|interval| interval.start()..interval.end())
            .map(|seed| almanac.pipeline().map_value(seed))
            .min();
        assert_eq!(brute_force, Some(46));

        let locations = almanac.pipeline().run(seeds.clone());
        assert_eq!(locations.covered_len(), seeds.covered_len());
    }

    #[test]
    fn no_seeds_has_no_location() {
        let almanac = Almanac::parse("seeds:\n\nsoil map:\n1 2 3").unwrap();
        for mode in [SeedMode::Individual, SeedMode::Ranges] {
            assert!(matches!(
                lowest_location(&almanac, mode),
                Err(AlmanacError::EmptyResult)
            ));
        }
    }
}

use itertools::Itertools;

use super::error::AlmanacError;
use super::interval::{Interval, IntervalSet};
use super::pipeline::Pipeline;
use super::table::{MappingRule, MappingTable};

/// How the numbers on the `seeds:` line are read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedMode {
    /// Every number is one seed.
    Individual,
    /// Numbers pair up as `start length`.
    Ranges,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Almanac {
    seeds: Vec<i64>,
    pipeline: Pipeline,
}

impl Almanac {
    /// Reads a `seeds:` block followed by blank-line separated map blocks, each headed by
    /// its name and holding one `destination_start source_start length` rule per line.
    pub fn parse(input: &str) -> Result<Self, AlmanacError> {
        let lines = input.lines().map(str::trim).collect::<Vec<_>>();
        let mut blocks = lines
            .split(|line| line.is_empty())
            .filter_map(|block| block.split_first());

        let Some((header, rest)) = blocks.next() else {
            return Err(AlmanacError::MissingSeeds);
        };
        let first = header.strip_prefix("seeds:").ok_or(AlmanacError::MissingSeeds)?;
        let seeds = std::iter::once(first)
            .chain(rest.iter().copied())
            .flat_map(str::split_whitespace)
            .map(parse_number)
            .collect::<Result<Vec<_>, _>>()?;

        let tables = blocks
            .map(|(header, rules)| parse_table(header, rules))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { seeds, pipeline: Pipeline::new(tables) })
    }

    pub fn seeds(&self) -> &[i64] {
        &self.seeds
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    pub fn seed_intervals(&self, mode: SeedMode) -> Result<IntervalSet, AlmanacError> {
        match mode {
            SeedMode::Individual => self
                .seeds
                .iter()
                .map(|&seed| Interval::from_start_len(seed, 1))
                .collect(),
            SeedMode::Ranges => {
                if self.seeds.len() % 2 != 0 {
                    return Err(AlmanacError::OddSeedCount(self.seeds.len()));
                }
                self.seeds
                    .iter()
                    .tuples()
                    .map(|(&start, &len)| Interval::from_start_len(start, len))
                    .collect()
            }
        }
    }
}

fn parse_number(token: &str) -> Result<i64, AlmanacError> {
    token.parse().map_err(|cause| AlmanacError::InvalidNumber {
        token: token.to_owned(),
        cause,
    })
}

fn parse_table(header: &str, lines: &[&str]) -> Result<MappingTable, AlmanacError> {
    let name = header.trim_end_matches(':');
    let name = name.strip_suffix(" map").unwrap_or(name);

    let rules = lines
        .iter()
        .map(|line| {
            let Some((destination, source, len)) = line.split_whitespace().collect_tuple() else {
                return Err(AlmanacError::MalformedRule {
                    table: name.to_owned(),
                    line: line.to_string(),
                });
            };
            MappingRule::from_triple(
                parse_number(destination)?,
                parse_number(source)?,
                parse_number(len)?,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    MappingTable::new(name, rules)
}

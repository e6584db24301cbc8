use itertools::Itertools;

use super::error::AlmanacError;
use super::interval::Interval;

/// Sends every value of `source` to the same position within `destination`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappingRule {
    source: Interval,
    destination: Interval,
    offset: i64,
}

impl MappingRule {
    pub fn new(source: Interval, destination: Interval) -> Result<Self, AlmanacError> {
        if source.len() != destination.len() {
            return Err(AlmanacError::LengthMismatch { from: source, to: destination });
        }
        let offset = destination
            .start()
            .checked_sub(source.start())
            .ok_or(AlmanacError::Overflow {
                value: destination.start(),
                offset: source.start().saturating_neg(),
            })?;
        Ok(Self { source, destination, offset })
    }

    /// Builds a rule from an almanac line `destination_start source_start length`.
    pub fn from_triple(
        destination_start: i64,
        source_start: i64,
        len: i64,
    ) -> Result<Self, AlmanacError> {
        Self::new(
            Interval::from_start_len(source_start, len)?,
            Interval::from_start_len(destination_start, len)?,
        )
    }

    pub fn source(&self) -> Interval {
        self.source
    }

    pub fn destination(&self) -> Interval {
        self.destination
    }

    pub fn offset(&self) -> i64 {
        self.offset
    }

    pub fn map_value(&self, value: i64) -> Option<i64> {
        self.source.contains(value).then(|| value + self.offset)
    }

    /// Maps a piece of the source range. The result lies inside `destination`, so the
    /// shift cannot overflow.
    pub(crate) fn map_inside(&self, piece: Interval) -> Interval {
        debug_assert!(
            self.source.start() <= piece.start() && piece.end() <= self.source.end(),
            "{piece} is not inside {}",
            self.source
        );
        Interval::span(piece.start() + self.offset, piece.end() + self.offset)
    }
}

/// One stage of the pipeline. Values outside every rule's source map to themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingTable {
    name: String,
    rules: Vec<MappingRule>,
}

impl MappingTable {
    /// Fails if two rules claim the same value, since the remapper relies on the first
    /// matching rule being the only one.
    pub fn new(name: impl Into<String>, rules: Vec<MappingRule>) -> Result<Self, AlmanacError> {
        let name = name.into();
        let clash = rules
            .iter()
            .map(MappingRule::source)
            .filter(|source| !source.is_empty())
            .sorted()
            .tuple_windows()
            .find(|(first, second)| first.overlaps(second));
        if let Some((first, second)) = clash {
            return Err(AlmanacError::OverlappingRules { table: name, first, second });
        }
        Ok(Self { name, rules })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[MappingRule] {
        &self.rules
    }

    /// The first rule, in table order, sharing at least one value with `interval`.
    pub fn first_overlapping(&self, interval: &Interval) -> Option<&MappingRule> {
        self.rules.iter().find(|rule| rule.source.overlaps(interval))
    }

    pub fn map_value(&self, value: i64) -> i64 {
        self.rules
            .iter()
            .find_map(|rule| rule.map_value(value))
            .unwrap_or(value)
    }
}

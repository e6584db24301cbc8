use std::num::ParseIntError;

use thiserror::Error;

use super::interval::Interval;

#[derive(Error, Debug)]
pub enum AlmanacError {
    #[error("expected a `seeds:` block before the first map")]
    MissingSeeds,

    /// Range-based seed reading pairs up the values, so their count must be even.
    #[error("seed ranges come in (start, length) pairs, found {0} values")]
    OddSeedCount(usize),

    #[error("cannot parse {token:?} as a number")]
    InvalidNumber {
        token: String,
        #[source]
        cause: ParseIntError,
    },

    /// A rule line that is not exactly `destination_start source_start length`.
    #[error("malformed rule in {table:?}: {line:?}")]
    MalformedRule { table: String, line: String },

    #[error("rule maps {from} onto {to}, which differ in length")]
    LengthMismatch { from: Interval, to: Interval },

    #[error("interval [{start}, {end}) ends before it starts")]
    InvalidInterval { start: i64, end: i64 },

    #[error("rules {first} and {second} of {table:?} overlap")]
    OverlappingRules {
        table: String,
        first: Interval,
        second: Interval,
    },

    #[error("{value} + {offset} does not fit in 64 bits")]
    Overflow { value: i64, offset: i64 },

    #[error("no values reach the end of the pipeline")]
    EmptyResult,
}

//! The results table: one row of answers and stage timings per day, plus a
//! Total row holding the column sums.

mod duration;
pub mod readme;
mod table;

use std::time::Duration;

use thiserror::Error;

pub use duration::{format_duration, parse_duration};
pub use table::{Row, Table, Timings, HEADER};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReportError {
    #[error("invalid duration {0:?}, expected a non-negative number followed by ns, µs, ms or s")]
    InvalidDuration(String),

    #[error("day {day} has a non-numeric answer {answer:?}")]
    NonNumericAnswer { day: u8, answer: String },

    #[error("malformed table row {line:?}: {reason}")]
    MalformedRow { line: String, reason: &'static str },

    #[error("day {found} is out of sequence (previous day: {previous:?})")]
    OutOfOrder { previous: Option<u8>, found: u8 },

    #[error("table has no Total row")]
    MissingTotal,

    #[error("no results table found")]
    MissingTable,

    #[error("Total {column} is {}, but the rows sum to {}", format_duration(*found), format_duration(*expected))]
    TotalMismatch { column: &'static str, expected: Duration, found: Duration },

    #[error("day {day} total is {}, but its stages sum to {}", format_duration(*found), format_duration(*expected))]
    RowTotalMismatch { day: u8, expected: Duration, found: Duration },
}

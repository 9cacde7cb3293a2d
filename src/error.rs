use std::path::PathBuf;

use thiserror::Error;

use crate::report::ReportError;

#[derive(Debug, Error)]
pub enum Error {
    #[error("day {0} has no solution")]
    UnknownDay(u8),

    #[error("input for day {day} not found at {}", path.display())]
    MissingInput { day: u8, path: PathBuf },

    #[error("failed to read {}", path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("day {day} part {part} answered {first} then {second} on a later run")]
    AnswerChanged { day: u8, part: u8, first: String, second: String },

    #[error(transparent)]
    Report(#[from] ReportError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

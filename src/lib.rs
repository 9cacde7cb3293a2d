//! Advent of Code 2023 solutions, timed per stage and reported as a
//! markdown results table.

pub mod config;
pub mod days;
pub mod error;
pub mod report;
pub mod runner;
pub mod telemetry;
pub mod util;

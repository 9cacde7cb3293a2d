//! One module per puzzle. Each exposes a unit struct implementing [`Day`].

use std::fmt::Display;

pub mod day01;
pub mod day02;
pub mod day03;
pub mod day04;
pub mod day05;
pub mod day06;
pub mod day07;
pub mod day08;
pub mod day09;
pub mod day10;
pub mod day11;
pub mod day12;
pub mod day13;
pub mod day14;
pub mod day15;
pub mod day16;
pub mod day17;
pub mod day18;
pub mod day19;
pub mod day20;
pub mod day21;
pub mod day22;
pub mod day23;
pub mod day24;
pub mod day25;

/// A puzzle split into a parse stage and two answer stages, so each can be
/// timed on its own.
pub trait Day {
    const NUMBER: u8;
    const NAME: &'static str;

    type Input;
    type Answer: Display;

    fn parse(raw: &str) -> anyhow::Result<Self::Input>;
    fn part1(input: &Self::Input) -> anyhow::Result<Self::Answer>;
    fn part2(input: &Self::Input) -> anyhow::Result<Self::Answer>;
}

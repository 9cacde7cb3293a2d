use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::Context;
use tracing::{debug, info, info_span};

use crate::days::{self, Day};
use crate::error::{Error, Result};
use crate::report::{Row, Timings};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Part {
    One,
    Two,
}

impl Part {
    pub fn number(self) -> u8 {
        match self {
            Part::One => 1,
            Part::Two => 2,
        }
    }
}

impl FromStr for Part {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "1" | "a" => Ok(Part::One),
            "2" | "b" => Ok(Part::Two),
            _ => Err(format!("expected 1/2 (or a/b) for part, got {s:?}")),
        }
    }
}

fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}

pub fn solve<D: Day>(raw: &str, part: Part) -> anyhow::Result<String> {
    let input = D::parse(raw).with_context(|| format!("day {} parse", D::NUMBER))?;
    let answer = match part {
        Part::One => D::part1(&input),
        Part::Two => D::part2(&input),
    };
    let answer = answer.with_context(|| format!("day {} part {}", D::NUMBER, part.number()))?;
    Ok(answer.to_string())
}

/// Runs every stage `runs` times (at least once) and keeps the fastest time
/// per stage. The answers must not change between runs.
pub fn measure<D: Day>(raw: &str, runs: u32) -> anyhow::Result<Row> {
    let _span = info_span!("day", day = D::NUMBER, name = D::NAME).entered();
    let mut best: Option<(String, String, Timings)> = None;

    for run in 0..runs.max(1) {
        let (input, parse) = timed(|| D::parse(raw));
        let input = input.with_context(|| format!("day {} parse", D::NUMBER))?;
        let (part1, p1) = timed(|| D::part1(&input));
        let part1 = part1.with_context(|| format!("day {} part 1", D::NUMBER))?.to_string();
        let (part2, p2) = timed(|| D::part2(&input));
        let part2 = part2.with_context(|| format!("day {} part 2", D::NUMBER))?.to_string();
        let timings = Timings { parse, part1: p1, part2: p2 };
        debug!(run, ?parse, ?p1, ?p2, "stages timed");

        best = Some(match best {
            None => (part1, part2, timings),
            Some((first1, first2, fastest)) => {
                for (part, first, again) in [(1, &first1, &part1), (2, &first2, &part2)] {
                    if first != again {
                        return Err(Error::AnswerChanged {
                            day: D::NUMBER,
                            part,
                            first: first.clone(),
                            second: again.clone(),
                        }
                        .into());
                    }
                }
                (first1, first2, fastest.fastest(timings))
            }
        });
    }

    let (part1, part2, timings) = best.context("no runs")?;
    info!(%part1, %part2, total = ?timings.total(), "solved");
    Ok(Row { day: D::NUMBER, name: D::NAME.to_owned(), part1, part2, timings })
}

/// A registered day with its generic entry points erased to fn pointers.
#[derive(Clone, Copy)]
pub struct Entry {
    pub number: u8,
    pub name: &'static str,
    pub solve: fn(&str, Part) -> anyhow::Result<String>,
    pub measure: fn(&str, u32) -> anyhow::Result<Row>,
}

impl Entry {
    fn of<D: Day>() -> Self {
        Entry { number: D::NUMBER, name: D::NAME, solve: solve::<D>, measure: measure::<D> }
    }
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry").field("number", &self.number).field("name", &self.name).finish()
    }
}

pub fn registry() -> [Entry; 25] {
    use days::*;
    [
        Entry::of::<day01::Trebuchet>(),
        Entry::of::<day02::CubeConundrum>(),
        Entry::of::<day03::GearRatios>(),
        Entry::of::<day04::Scratchcards>(),
        Entry::of::<day05::SeedFertilizer>(),
        Entry::of::<day06::WaitForIt>(),
        Entry::of::<day07::CamelCards>(),
        Entry::of::<day08::HauntedWasteland>(),
        Entry::of::<day09::MirageMaintenance>(),
        Entry::of::<day10::PipeMaze>(),
        Entry::of::<day11::CosmicExpansion>(),
        Entry::of::<day12::HotSprings>(),
        Entry::of::<day13::PointOfIncidence>(),
        Entry::of::<day14::ReflectorDish>(),
        Entry::of::<day15::LensLibrary>(),
        Entry::of::<day16::FloorWillBeLava>(),
        Entry::of::<day17::ClumsyCrucible>(),
        Entry::of::<day18::LavaductLagoon>(),
        Entry::of::<day19::Aplenty>(),
        Entry::of::<day20::PulsePropagation>(),
        Entry::of::<day21::StepCounter>(),
        Entry::of::<day22::SandSlabs>(),
        Entry::of::<day23::LongWalk>(),
        Entry::of::<day24::NeverTellMeTheOdds>(),
        Entry::of::<day25::Snowverload>(),
    ]
}

pub fn lookup(day: u8) -> Result<Entry> {
    registry().into_iter().find(|e| e.number == day).ok_or(Error::UnknownDay(day))
}

use anyhow::{ensure, Context};
use rustc_hash::FxHashSet;

use super::Day;
use crate::util::{Dir, Map2d, Vec2};

pub struct StepCounter;

const ROCK: u8 = b'#';
const PART1_STEPS: usize = 64;
const PART2_STEPS: usize = 26501365;

#[derive(Debug)]
pub struct Garden {
    map: Map2d<u8>,
    start: Vec2,
}

impl Garden {
    /// The map repeats forever in every direction.
    fn is_rock(&self, pos: Vec2) -> bool {
        let wrapped = Vec2::new(pos.x.rem_euclid(self.map.size.x), pos.y.rem_euclid(self.map.size.y));
        self.map.get(wrapped) == Some(ROCK)
    }

    /// `counts[n]` is the number of plots the elf can stand on after exactly `n` steps.
    fn reachable_counts(&self, max_steps: usize) -> Vec<u64> {
        let mut counts: Vec<u64> = Vec::with_capacity(max_steps + 1);
        let mut seen = FxHashSet::from_iter([self.start]);
        let mut frontier = vec![self.start];
        for n in 0..=max_steps {
            let older = if n >= 2 {counts[n - 2]} else {0};
            counts.push(older + frontier.len() as u64);
            let mut next = vec![];
            for pos in frontier {
                for dir in Dir::ALL {
                    let step = pos + dir;
                    if !self.is_rock(step) && seen.insert(step) {next.push(step)}
                }
            }
            frontier = next;
        }
        counts
    }
}

/// Past the first couple of tiles the count grows quadratically in the number
/// of whole tiles walked, provided the start row and column are clear.
fn plots_after(garden: &Garden, steps: usize) -> anyhow::Result<u64> {
    let width = garden.map.size.x as usize;
    if steps <= 2 * width {
        return garden.reachable_counts(steps).last().copied().context("no counts");
    }
    ensure!(garden.map.size.x == garden.map.size.y, "extrapolation needs a square map");
    let rest = steps % width;
    let counts = garden.reachable_counts(rest + 2 * width);
    let [a, b, c] = [rest, rest + width, rest + 2 * width].map(|i| counts[i] as i128);
    let n = (steps / width) as i128;
    let value = a + n * (b - a) + n * (n - 1) / 2 * (c - 2 * b + a);
    u64::try_from(value).context("plot count out of range")
}

impl Day for StepCounter {
    const NUMBER: u8 = 21;
    const NAME: &'static str = "Step Counter";
    type Input = Garden;
    type Answer = u64;

    fn parse(raw: &str) -> anyhow::Result<Garden> {
        let map = Map2d::parse_grid(raw, |c| matches!(c, '.' | '#' | 'S').then_some(c as u8))?;
        let start = map.find(|&t| t == b'S').context("no start")?;
        Ok(Garden { map, start })
    }

    fn part1(input: &Garden) -> anyhow::Result<u64> {
        plots_after(input, PART1_STEPS)
    }

    fn part2(input: &Garden) -> anyhow::Result<u64> {
        plots_after(input, PART2_STEPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "...........
.....###.#.
.###.##..#.
..#.#...#..
....#.#....
.##..S####.
.##..#...#.
.......##..
.##.#.####.
.##..##.##.
...........";

    #[test]
    fn example() {
        let garden = StepCounter::parse(EXAMPLE).unwrap();
        let counts = garden.reachable_counts(100);
        assert_eq!(counts[6], 16);
        assert_eq!(counts[10], 50);
        assert_eq!(counts[50], 1594);
        assert_eq!(counts[100], 6536);
    }

    #[test]
    fn extrapolates_open_field() {
        let field = StepCounter::parse(".....\n.....\n..S..\n.....\n.....").unwrap();
        assert_eq!(plots_after(&field, 1000).unwrap(), 1001 * 1001);
        assert_eq!(plots_after(&field, 7).unwrap(), 64);
    }
}

use anyhow::Context;

use super::Day;
use crate::util::graph::{dijkstra, NodeAndCost};
use crate::util::{Dir, Map2d, Vec2};

pub struct ClumsyCrucible;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct Crucible {
    pos: Vec2,
    dir: Dir,
    /// Blocks moved in `dir` so far, including the current one.
    run: u8,
}

fn least_heat_loss(map: &Map2d<u8>, min_run: u8, max_run: u8) -> anyhow::Result<i64> {
    let goal = map.size - Vec2::new(1, 1);
    // both opening headings are tried by starting with an empty run
    let start = Crucible { pos: Vec2::zero(), dir: Dir::Right, run: 0 };
    let best = dijkstra(
        start,
        |c| c.pos == goal && c.run >= min_run,
        move |c| {
            let c = *c;
            let turns = if c.run == 0 {
                vec![Dir::Right, Dir::Down]
            } else {
                let mut dirs = Vec::with_capacity(3);
                if c.run < max_run {dirs.push(c.dir)}
                if c.run >= min_run {dirs.extend([c.dir.rotate_left(), c.dir.rotate_right()])}
                dirs
            };
            turns.into_iter().filter_map(move |dir| {
                let pos = c.pos + dir;
                let run = if dir == c.dir && c.run > 0 {c.run + 1} else {1};
                map.get(pos).map(|loss| NodeAndCost { node: Crucible { pos, dir, run }, cost: loss as i64 })
            })
        },
    );
    best.map(|b| b.cost).context("no path to the factory")
}

impl Day for ClumsyCrucible {
    const NUMBER: u8 = 17;
    const NAME: &'static str = "Clumsy Crucible";
    type Input = Map2d<u8>;
    type Answer = i64;

    fn parse(raw: &str) -> anyhow::Result<Map2d<u8>> {
        Map2d::parse_grid(raw, |c| c.to_digit(10).map(|d| d as u8))
    }

    fn part1(input: &Map2d<u8>) -> anyhow::Result<i64> {
        least_heat_loss(input, 1, 3)
    }

    fn part2(input: &Map2d<u8>) -> anyhow::Result<i64> {
        least_heat_loss(input, 4, 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "2413432311323
3215453535623
3255245654254
3446585845452
4546657867536
1438598798454
4457876987766
3637877979653
4654967986887
4564679986453
1224686865563
2546548887735
4322674655533";

    #[test]
    fn example() {
        let input = ClumsyCrucible::parse(EXAMPLE).unwrap();
        assert_eq!(ClumsyCrucible::part1(&input).unwrap(), 102);
        assert_eq!(ClumsyCrucible::part2(&input).unwrap(), 94);
    }

    #[test]
    fn ultra_crucible_must_run_four() {
        let input = ClumsyCrucible::parse("111111111111
999999999991
999999999991
999999999991
999999999991").unwrap();
        assert_eq!(ClumsyCrucible::part2(&input).unwrap(), 71);
    }
}

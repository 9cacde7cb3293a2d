use anyhow::{ensure, Context};
use rustc_hash::FxHashMap;

use super::Day;
use crate::util::{Dir, Map2d, Vec2};

pub struct LongWalk;

const FOREST: u8 = b'#';

#[derive(Debug)]
pub struct Trails {
    map: Map2d<u8>,
    start: Vec2,
    end: Vec2,
}

fn slope(tile: u8) -> Option<Dir> {
    match tile {
        b'^' => Some(Dir::Up),
        b'>' => Some(Dir::Right),
        b'v' => Some(Dir::Down),
        b'<' => Some(Dir::Left),
        _ => None,
    }
}

/// Corridors collapsed into weighted edges between junctions.
struct Graph {
    edges: Vec<Vec<(usize, u32)>>,
    start: usize,
    end: usize,
}

impl Trails {
    fn open(&self, pos: Vec2) -> bool {
        self.map.get(pos).is_some_and(|t| t != FOREST)
    }

    fn can_step(&self, to: Vec2, dir: Dir, slippery: bool) -> bool {
        self.map.get(to).is_some_and(|t| t != FOREST && !(slippery && slope(t).is_some_and(|s| s != dir)))
    }

    fn graph(&self, slippery: bool) -> anyhow::Result<Graph> {
        let mut junctions: Vec<Vec2> = self.map.positions()
            .filter(|&p| self.open(p) && Dir::ALL.iter().filter(|&&d| self.open(p + d)).count() > 2)
            .collect();
        junctions.extend([self.start, self.end]);
        ensure!(junctions.len() <= 64, "too many junctions: {}", junctions.len());
        let ids: FxHashMap<Vec2, usize> = junctions.iter().enumerate().map(|(i, &p)| (p, i)).collect();

        let mut edges = vec![vec![]; junctions.len()];
        for (from, &origin) in junctions.iter().enumerate() {
            'dirs: for first in Dir::ALL {
                let (mut pos, mut dir, mut len) = (origin + first, first, 1);
                if !self.can_step(pos, dir, slippery) {continue}
                while !ids.contains_key(&pos) {
                    let Some(next) = [dir, dir.rotate_left(), dir.rotate_right()].into_iter().find(|&d| self.open(pos + d)) else {
                        continue 'dirs;
                    };
                    if !self.can_step(pos + next, next, slippery) {continue 'dirs}
                    pos = pos + next;
                    dir = next;
                    len += 1;
                }
                edges[from].push((ids[&pos], len));
            }
        }
        Ok(Graph { edges, start: ids[&self.start], end: ids[&self.end] })
    }
}

impl Graph {
    fn longest(&self, node: usize, visited: u64) -> Option<u32> {
        if node == self.end {return Some(0)}
        let visited = visited | 1 << node;
        self.edges[node].iter()
            .filter(|&&(next, _)| visited & 1 << next == 0)
            .filter_map(|&(next, len)| self.longest(next, visited).map(|rest| rest + len))
            .max()
    }
}

fn longest_hike(trails: &Trails, slippery: bool) -> anyhow::Result<u32> {
    let graph = trails.graph(slippery)?;
    graph.longest(graph.start, 0).context("no path to the exit")
}

impl Day for LongWalk {
    const NUMBER: u8 = 23;
    const NAME: &'static str = "A Long Walk";
    type Input = Trails;
    type Answer = u32;

    fn parse(raw: &str) -> anyhow::Result<Trails> {
        let map = Map2d::parse_grid(raw, |c| matches!(c, '#' | '.' | '^' | '>' | 'v' | '<').then_some(c as u8))?;
        let gap = |y: i64| map.get_row(y).iter().position(|&t| t == b'.').map(|x| Vec2::new(x as i64, y));
        let start = gap(0).context("no gap in the top row")?;
        let end = gap(map.size.y - 1).context("no gap in the bottom row")?;
        Ok(Trails { map, start, end })
    }

    fn part1(input: &Trails) -> anyhow::Result<u32> {
        longest_hike(input, true)
    }

    fn part2(input: &Trails) -> anyhow::Result<u32> {
        longest_hike(input, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "#.#####################
#.......#########...###
#######.#########.#.###
###.....#.>.>.###.#.###
###v#####.#v#.###.#.###
###.>...#.#.#.....#...#
###v###.#.#.#########.#
###...#.#.#.......#...#
#####.#.#.#######.#.###
#.....#.#.#.......#...#
#.#####.#.#.#########v#
#.#...#...#...###...>.#
#.#.#v#######v###.###v#
#...#.>.#...>.>.#.###.#
#####v#.#.###v#.#.###.#
#.....#...#...#.#.#...#
#.#########.###.#.#.###
#...###...#...#...#.###
###.###.#.###v#####v###
#...#...#.#.>.>.#.>.###
#.###.###.#.###.#.#v###
#.....###...###...#...#
#####################.#";

    #[test]
    fn example() {
        let trails = LongWalk::parse(EXAMPLE).unwrap();
        assert_eq!(LongWalk::part1(&trails).unwrap(), 94);
        assert_eq!(LongWalk::part2(&trails).unwrap(), 154);
    }

    #[test]
    fn dead_end_has_no_hike() {
        let trails = LongWalk::parse("#.#\n#.#\n###\n#.#").unwrap();
        assert!(LongWalk::part2(&trails).is_err());
    }
}

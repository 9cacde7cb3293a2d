use anyhow::{ensure, Context};
use itertools::Itertools;
use rustc_hash::FxHashMap;

use super::Day;

pub struct SandSlabs;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Brick {
    min: [i64; 3],
    max: [i64; 3],
}

/// The settled pile; bricks are listed bottom-up.
#[derive(Debug)]
pub struct Pile {
    supported_by: Vec<Vec<usize>>,
    supports: Vec<Vec<usize>>,
}

fn settle(mut bricks: Vec<Brick>) -> Pile {
    bricks.sort_by_key(|b| b.min[2]);
    let mut top: FxHashMap<(i64, i64), (i64, usize)> = FxHashMap::default();
    let mut supported_by = vec![vec![]; bricks.len()];
    let mut supports = vec![vec![]; bricks.len()];

    for (id, brick) in bricks.iter().enumerate() {
        let footprint = (brick.min[0]..=brick.max[0]).cartesian_product(brick.min[1]..=brick.max[1]).collect_vec();
        let floor = footprint.iter().filter_map(|xy| top.get(xy)).map(|&(z, _)| z).max().unwrap_or(0);
        let below: Vec<usize> = footprint.iter()
            .filter_map(|xy| top.get(xy))
            .filter(|&&(z, _)| z == floor)
            .map(|&(_, other)| other)
            .unique()
            .collect();
        for &other in &below {supports[other].push(id)}
        supported_by[id] = below;

        let height = brick.max[2] - brick.min[2] + 1;
        for xy in footprint {top.insert(xy, (floor + height, id));}
    }
    Pile { supported_by, supports }
}

impl Pile {
    /// How many other bricks fall when `removed` disappears.
    fn chain_reaction(&self, removed: usize) -> usize {
        let mut falling = vec![false; self.supports.len()];
        falling[removed] = true;
        let mut count = 0;
        // supporters always settle first, so one bottom-up sweep suffices
        for id in removed + 1..self.supports.len() {
            let below = &self.supported_by[id];
            if !below.is_empty() && below.iter().all(|&b| falling[b]) {
                falling[id] = true;
                count += 1;
            }
        }
        count
    }
}

impl Day for SandSlabs {
    const NUMBER: u8 = 22;
    const NAME: &'static str = "Sand Slabs";
    type Input = Pile;
    type Answer = usize;

    fn parse(raw: &str) -> anyhow::Result<Pile> {
        let bricks = raw.lines().filter(|l| !l.trim().is_empty()).map(|line| -> anyhow::Result<Brick> {
            let (a, b) = line.trim().split_once('~').with_context(|| format!("no '~' in {line:?}"))?;
            let corner = |s: &str| -> anyhow::Result<[i64; 3]> {
                let coords: Vec<i64> = s.split(',').map(str::parse).collect::<Result<_, _>>()?;
                coords.try_into().map_err(|_| anyhow::anyhow!("expected x,y,z in {s:?}"))
            };
            let (a, b) = (corner(a)?, corner(b)?);
            let brick = Brick { min: [0, 1, 2].map(|i| a[i].min(b[i])), max: [0, 1, 2].map(|i| a[i].max(b[i])) };
            ensure!(brick.min[2] >= 1, "brick below the ground: {line:?}");
            Ok(brick)
        }).collect::<anyhow::Result<Vec<_>>>()?;
        Ok(settle(bricks))
    }

    fn part1(input: &Pile) -> anyhow::Result<usize> {
        let safe = input.supports.iter()
            .filter(|above| above.iter().all(|&a| input.supported_by[a].len() > 1))
            .count();
        Ok(safe)
    }

    fn part2(input: &Pile) -> anyhow::Result<usize> {
        Ok((0..input.supports.len()).map(|id| input.chain_reaction(id)).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "1,0,1~1,2,1
0,0,2~2,0,2
0,2,3~2,2,3
0,0,4~0,2,4
2,0,5~2,2,5
0,1,6~2,1,6
1,1,8~1,1,9";

    #[test]
    fn example() {
        let pile = SandSlabs::parse(EXAMPLE).unwrap();
        assert_eq!(SandSlabs::part1(&pile).unwrap(), 5);
        assert_eq!(SandSlabs::part2(&pile).unwrap(), 7);
    }

    #[test]
    fn tower_falls_entirely() {
        let pile = SandSlabs::parse("0,0,1~0,0,1\n0,0,5~0,0,5\n0,0,9~0,0,9").unwrap();
        assert_eq!(pile.chain_reaction(0), 2);
        assert_eq!(SandSlabs::part1(&pile).unwrap(), 1);
    }
}

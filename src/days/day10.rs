use anyhow::{bail, Context};

use super::Day;
use crate::util::{Dir, Map2d, Vec2};

pub struct PipeMaze;

/// A tile's pipe ends as a bitset indexed by `Dir as u8`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Pipe(u8);

impl Pipe {
    const fn of(dirs: &[Dir]) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < dirs.len() {
            bits |= 1 << dirs[i] as u8;
            i += 1;
        }
        Pipe(bits)
    }

    fn from_char(c: char) -> Option<Self> {
        use Dir::*;
        Some(match c {
            '|' => Pipe::of(&[Up, Down]),
            '-' => Pipe::of(&[Left, Right]),
            'L' => Pipe::of(&[Up, Right]),
            'J' => Pipe::of(&[Up, Left]),
            '7' => Pipe::of(&[Down, Left]),
            'F' => Pipe::of(&[Down, Right]),
            '.' => Pipe(0),
            'S' => START,
            _ => return None,
        })
    }

    fn connects(self, dir: Dir) -> bool {
        self.0 & (1 << dir as u8) != 0
    }

    fn exits(self) -> impl Iterator<Item = Dir> {
        Dir::ALL.into_iter().filter(move |&d| self.connects(d))
    }
}

/// Placeholder until the start tile's shape is deduced.
const START: Pipe = Pipe(1 << 7);

#[derive(Debug)]
pub struct Maze {
    map: Map2d<Pipe>,
    start: Vec2,
}

impl Maze {
    fn pipe_loop(&self) -> anyhow::Result<Vec<Vec2>> {
        let mut pos = self.start;
        let mut heading = self.map.get(pos).and_then(|p| p.exits().next()).context("start has no exits")?;
        let mut path = Vec::new();
        loop {
            path.push(pos);
            pos = pos + heading;
            if pos == self.start {return Ok(path)}
            let pipe = self.map.get(pos).with_context(|| format!("loop leaves the map at {pos:?}"))?;
            heading = pipe.exits()
                .find(|&d| d != heading.opposite())
                .filter(|_| pipe.connects(heading.opposite()))
                .with_context(|| format!("loop breaks at {pos:?}"))?;
            if path.len() > self.map.data.len() {bail!("loop never closes")}
        }
    }
}

impl Day for PipeMaze {
    const NUMBER: u8 = 10;
    const NAME: &'static str = "Pipe Maze";
    type Input = Maze;
    type Answer = usize;

    fn parse(raw: &str) -> anyhow::Result<Maze> {
        let mut map = Map2d::parse_grid(raw, Pipe::from_char)?;
        let start = map.find(|&p| p == START).context("no start tile")?;
        let exits = Dir::ALL.into_iter()
            .filter(|&d| map.get(start + d).is_some_and(|p| p.connects(d.opposite())))
            .collect::<Vec<_>>();
        if exits.len() != 2 {
            bail!("start tile has {} connecting neighbours, expected 2", exits.len());
        }
        if let Some(tile) = map.get_mut(start) {*tile = Pipe::of(&exits)}
        Ok(Maze { map, start })
    }

    fn part1(input: &Maze) -> anyhow::Result<usize> {
        Ok(input.pipe_loop()?.len() / 2)
    }

    /// Scanlines: crossing a loop tile with an upward end flips inside/outside.
    fn part2(input: &Maze) -> anyhow::Result<usize> {
        let mut on_loop = Map2d::new_default(input.map.size, false);
        for pos in input.pipe_loop()? {
            if let Some(cell) = on_loop.get_mut(pos) {*cell = true}
        }
        let mut enclosed = 0;
        for y in 0..input.map.size.y {
            let mut inside = false;
            for (pipe, &looped) in input.map.get_row(y).iter().zip(on_loop.get_row(y)) {
                if looped {
                    inside ^= pipe.connects(Dir::Up);
                } else if inside {
                    enclosed += 1;
                }
            }
        }
        Ok(enclosed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn farthest_point() {
        let simple = PipeMaze::parse(".....\n.S-7.\n.|.|.\n.L-J.\n.....").unwrap();
        assert_eq!(PipeMaze::part1(&simple).unwrap(), 4);

        let complex = PipeMaze::parse("..F7.\n.FJ|.\nSJ.L7\n|F--J\nLJ...").unwrap();
        assert_eq!(complex.map.get(complex.start), Some(Pipe::of(&[Dir::Right, Dir::Down])));
        assert_eq!(PipeMaze::part1(&complex).unwrap(), 8);
    }

    #[test]
    fn enclosed_tiles() {
        let input = PipeMaze::parse("...........
.S-------7.
.|F-----7|.
.||.....||.
.||.....||.
.|L-7.F-J|.
.|..|.|..|.
.L--J.L--J.
...........").unwrap();
        assert_eq!(PipeMaze::part2(&input).unwrap(), 4);

        let input = PipeMaze::parse(".F----7F7F7F7F-7....
.|F--7||||||||FJ....
.||.FJ||||||||L7....
FJL7L7LJLJ||LJ.L-7..
L--J.L7...LJS7F-7L7.
....F-J..F7FJ|L7L7L7
....L7.F7||L7|.L7L7|
.....|FJLJ|FJ|F7|.LJ
....FJL-7.||.||||...
....L---J.LJ.LJLJ...").unwrap();
        assert_eq!(PipeMaze::part2(&input).unwrap(), 8);
    }
}

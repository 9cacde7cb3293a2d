use bitvec::prelude::*;

use super::Day;
use crate::util::{Dir, Map2d, Vec2};

pub struct FloorWillBeLava;

/// Directions a beam leaves `tile` in when travelling `dir`.
fn deflect(tile: u8, dir: Dir) -> (Dir, Option<Dir>) {
    use Dir::*;
    match (tile, dir) {
        (b'/', Up) => (Right, None),
        (b'/', Right) => (Up, None),
        (b'/', Down) => (Left, None),
        (b'/', Left) => (Down, None),
        (b'\\', Up) => (Left, None),
        (b'\\', Left) => (Up, None),
        (b'\\', Down) => (Right, None),
        (b'\\', Right) => (Down, None),
        (b'|', Left | Right) => (Up, Some(Down)),
        (b'-', Up | Down) => (Left, Some(Right)),
        _ => (dir, None),
    }
}

fn energized(map: &Map2d<u8>, start: Vec2, dir: Dir) -> usize {
    // one bit per (tile, heading)
    let mut seen = bitvec![0; map.data.len() * 4];
    let mut beams = vec![(start, dir)];
    while let Some((pos, dir)) = beams.pop() {
        let Some(i) = map.index_of(pos) else {continue};
        if seen.replace(i * 4 + dir as usize, true) {continue}
        let (a, b) = deflect(map.data[i], dir);
        beams.push((pos + a, a));
        if let Some(b) = b {beams.push((pos + b, b))}
    }
    seen.chunks(4).filter(|tile| tile.any()).count()
}

impl Day for FloorWillBeLava {
    const NUMBER: u8 = 16;
    const NAME: &'static str = "The Floor Will Be Lava";
    type Input = Map2d<u8>;
    type Answer = usize;

    fn parse(raw: &str) -> anyhow::Result<Map2d<u8>> {
        Map2d::parse_grid(raw, |c| matches!(c, '.' | '/' | '\\' | '|' | '-').then_some(c as u8))
    }

    fn part1(input: &Map2d<u8>) -> anyhow::Result<usize> {
        Ok(energized(input, Vec2::zero(), Dir::Right))
    }

    fn part2(input: &Map2d<u8>) -> anyhow::Result<usize> {
        let Vec2 { x: w, y: h } = input.size;
        let starts = (0..w).flat_map(|x| [(Vec2::new(x, 0), Dir::Down), (Vec2::new(x, h - 1), Dir::Up)])
            .chain((0..h).flat_map(|y| [(Vec2::new(0, y), Dir::Right), (Vec2::new(w - 1, y), Dir::Left)]));
        Ok(starts.map(|(pos, dir)| energized(input, pos, dir)).max().unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r".|...\....
|.-.\.....
.....|-...
........|.
..........
.........\
..../.\\..
.-.-/..|..
.|....-|.\
..//.|....";

    #[test]
    fn example() {
        let input = FloorWillBeLava::parse(EXAMPLE).unwrap();
        assert_eq!(FloorWillBeLava::part1(&input).unwrap(), 46);
        assert_eq!(FloorWillBeLava::part2(&input).unwrap(), 51);
    }
}

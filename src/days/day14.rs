use rustc_hash::FxHashMap;

use super::Day;
use crate::util::{Dir, Map2d, Vec2};

pub struct ReflectorDish;

const ROUND: u8 = b'O';
const EMPTY: u8 = b'.';

/// Rolls every round rock as far as it goes towards `dir`.
fn tilt(map: &mut Map2d<u8>, dir: Dir) {
    let size = map.size;
    // lanes run against `dir`, starting at the wall rocks roll towards
    let (lanes, lane_len) = match dir {
        Dir::Up | Dir::Down => (size.x, size.y),
        Dir::Left | Dir::Right => (size.y, size.x),
    };
    let at = |lane: i64, i: i64| match dir {
        Dir::Up => Vec2::new(lane, i),
        Dir::Down => Vec2::new(lane, size.y - 1 - i),
        Dir::Left => Vec2::new(i, lane),
        Dir::Right => Vec2::new(size.x - 1 - i, lane),
    };
    for lane in 0..lanes {
        let mut free = 0;
        for i in 0..lane_len {
            match map.get(at(lane, i)) {
                Some(ROUND) => {
                    if free != i {
                        if let Some(c) = map.get_mut(at(lane, i)) {*c = EMPTY}
                        if let Some(c) = map.get_mut(at(lane, free)) {*c = ROUND}
                    }
                    free += 1;
                }
                Some(EMPTY) => (),
                _ => free = i + 1,
            }
        }
    }
}

fn spin_cycle(map: &mut Map2d<u8>) {
    for dir in [Dir::Up, Dir::Left, Dir::Down, Dir::Right] {
        tilt(map, dir);
    }
}

fn north_load(map: &Map2d<u8>) -> i64 {
    map.positions().filter(|&p| map.get(p) == Some(ROUND)).map(|p| map.size.y - p.y).sum()
}

impl Day for ReflectorDish {
    const NUMBER: u8 = 14;
    const NAME: &'static str = "Parabolic Reflector Dish";
    type Input = Map2d<u8>;
    type Answer = i64;

    fn parse(raw: &str) -> anyhow::Result<Map2d<u8>> {
        Map2d::parse_grid(raw, |c| matches!(c, 'O' | '#' | '.').then_some(c as u8))
    }

    fn part1(input: &Map2d<u8>) -> anyhow::Result<i64> {
        let mut map = input.clone();
        tilt(&mut map, Dir::Up);
        Ok(north_load(&map))
    }

    fn part2(input: &Map2d<u8>) -> anyhow::Result<i64> {
        const CYCLES: usize = 1_000_000_000;
        let mut map = input.clone();
        let mut seen: FxHashMap<Vec<u8>, usize> = FxHashMap::default();
        let mut loads = Vec::new();
        for i in 0..CYCLES {
            if let Some(&start) = seen.get(&map.data) {
                let period = i - start;
                return Ok(loads[start + (CYCLES - start) % period]);
            }
            seen.insert(map.data.clone(), i);
            loads.push(north_load(&map));
            spin_cycle(&mut map);
        }
        Ok(north_load(&map))
    }
}

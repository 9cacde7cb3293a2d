use super::Day;
use crate::util::{pairs, Vec2};

pub struct CosmicExpansion;

/// Galaxy positions after every empty row and column grows to `factor` copies.
fn expand(galaxies: &[Vec2], factor: i64) -> Vec<Vec2> {
    let max = galaxies.iter().fold(Vec2::zero(), |m, g| Vec2::new(m.x.max(g.x), m.y.max(g.y)));
    // shift[i] = empty lines before and including coordinate i
    let shifts = |coord: fn(&Vec2) -> i64, len: i64| {
        let mut occupied = vec![false; len as usize + 1];
        for g in galaxies {occupied[coord(g) as usize] = true}
        occupied.iter().scan(0, |empty, &o| {
            *empty += !o as i64;
            Some(*empty)
        }).collect::<Vec<_>>()
    };
    let dx = shifts(|g| g.x, max.x);
    let dy = shifts(|g| g.y, max.y);
    galaxies.iter()
        .map(|g| Vec2::new(g.x + dx[g.x as usize] * (factor - 1), g.y + dy[g.y as usize] * (factor - 1)))
        .collect()
}

fn distance_sum(galaxies: &[Vec2], factor: i64) -> i64 {
    pairs(&expand(galaxies, factor)).map(|(&a, &b)| (a - b).l1_norm()).sum()
}

impl Day for CosmicExpansion {
    const NUMBER: u8 = 11;
    const NAME: &'static str = "Cosmic Expansion";
    type Input = Vec<Vec2>;
    type Answer = i64;

    fn parse(raw: &str) -> anyhow::Result<Vec<Vec2>> {
        let mut galaxies = Vec::new();
        for (y, line) in raw.lines().enumerate() {
            for (x, c) in line.trim_end().chars().enumerate() {
                match c {
                    '#' => galaxies.push(Vec2::new(x as i64, y as i64)),
                    '.' => (),
                    _ => anyhow::bail!("unexpected {c:?} at ({x}, {y})"),
                }
            }
        }
        Ok(galaxies)
    }

    fn part1(input: &Vec<Vec2>) -> anyhow::Result<i64> {
        Ok(distance_sum(input, 2))
    }

    fn part2(input: &Vec<Vec2>) -> anyhow::Result<i64> {
        Ok(distance_sum(input, 1_000_000))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "...#......
.......#..
#.........
..........
......#...
.#........
.........#
..........
.......#..
#...#.....";

    #[test]
    fn example() {
        let input = CosmicExpansion::parse(EXAMPLE).unwrap();
        assert_eq!(input.len(), 9);
        assert_eq!(CosmicExpansion::part1(&input).unwrap(), 374);
        assert_eq!(distance_sum(&input, 10), 1030);
        assert_eq!(distance_sum(&input, 100), 8410);
    }
}

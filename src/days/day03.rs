use anyhow::ensure;
use rustc_hash::FxHashMap;

use super::Day;
use crate::util::Vec2;

pub struct GearRatios;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartNumber {
    value: u32,
    /// Leftmost digit.
    pos: Vec2,
    len: i64,
}

impl PartNumber {
    /// Every cell touching the number, diagonals included.
    fn neighbours(&self) -> impl Iterator<Item = Vec2> + '_ {
        (self.pos.y - 1..=self.pos.y + 1).flat_map(move |y|
            (self.pos.x - 1..=self.pos.x + self.len).map(move |x| Vec2::new(x, y))
        ).filter(move |p| p.y != self.pos.y || p.x < self.pos.x || p.x >= self.pos.x + self.len)
    }
}

#[derive(Debug)]
pub struct Schematic {
    numbers: Vec<PartNumber>,
    symbols: FxHashMap<Vec2, u8>,
}

impl Day for GearRatios {
    const NUMBER: u8 = 3;
    const NAME: &'static str = "Gear Ratios";
    type Input = Schematic;
    type Answer = u32;

    fn parse(raw: &str) -> anyhow::Result<Schematic> {
        let mut numbers = Vec::new();
        let mut symbols = FxHashMap::default();
        for (y, line) in raw.lines().enumerate() {
            ensure!(line.is_ascii(), "line {} is not ASCII", y + 1);
            let line = line.as_bytes();
            let mut x = 0;
            while x < line.len() {
                match line[x] {
                    b'.' => x += 1,
                    b'0'..=b'9' => {
                        let start = x;
                        while x < line.len() && line[x].is_ascii_digit() {x += 1}
                        let value = std::str::from_utf8(&line[start..x])?.parse()?;
                        let pos = Vec2::new(start as i64, y as i64);
                        numbers.push(PartNumber { value, pos, len: (x - start) as i64 });
                    }
                    c if c.is_ascii_whitespace() => x += 1,
                    c => {
                        symbols.insert(Vec2::new(x as i64, y as i64), c);
                        x += 1;
                    }
                }
            }
        }
        Ok(Schematic { numbers, symbols })
    }

    fn part1(input: &Schematic) -> anyhow::Result<u32> {
        Ok(input.numbers.iter()
            .filter(|n| n.neighbours().any(|p| input.symbols.contains_key(&p)))
            .map(|n| n.value)
            .sum())
    }

    fn part2(input: &Schematic) -> anyhow::Result<u32> {
        let mut gears: FxHashMap<Vec2, Vec<u32>> = FxHashMap::default();
        for number in &input.numbers {
            for p in number.neighbours() {
                if input.symbols.get(&p) == Some(&b'*') {
                    gears.entry(p).or_default().push(number.value);
                }
            }
        }
        Ok(gears.values().filter_map(|adjacent| match adjacent[..] {
            [a, b] => Some(a * b),
            _ => None,
        }).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "467..114..
...*......
..35..633.
......#...
617*......
.....+.58.
..592.....
......755.
...$.*....
.664.598..";

    #[test]
    fn parse_finds_numbers_and_symbols() {
        let schematic = GearRatios::parse("467..114..\n...*......\n617*......").unwrap();
        assert_eq!(
            schematic.numbers,
            vec![
                PartNumber { value: 467, pos: Vec2::new(0, 0), len: 3 },
                PartNumber { value: 114, pos: Vec2::new(5, 0), len: 3 },
                PartNumber { value: 617, pos: Vec2::new(0, 2), len: 3 },
            ]
        );
        assert_eq!(schematic.symbols.len(), 2);
    }

    #[test]
    fn neighbours_ring_the_number() {
        let n = PartNumber { value: 7, pos: Vec2::new(0, 0), len: 1 };
        assert_eq!(n.neighbours().count(), 8);
    }

    #[test]
    fn example() {
        let input = GearRatios::parse(EXAMPLE).unwrap();
        assert_eq!(GearRatios::part1(&input).unwrap(), 4361);
        assert_eq!(GearRatios::part2(&input).unwrap(), 467835);
    }
}

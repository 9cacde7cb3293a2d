use anyhow::ensure;

use super::Day;
use crate::util::{Map2d, Vec2};

pub struct PointOfIncidence;

/// A pattern as row and column bitmasks; bit `i` set means rock.
#[derive(Debug)]
pub struct Pattern {
    rows: Vec<u64>,
    cols: Vec<u64>,
}

impl Pattern {
    fn from_map(map: &Map2d<bool>) -> Self {
        let bits = |len: i64, at: &dyn Fn(i64) -> Vec2| (0..len).fold(0u64, |acc, i|
            acc | (map.get(at(i)).unwrap_or(false) as u64) << i
        );
        Pattern {
            rows: (0..map.size.y).map(|y| bits(map.size.x, &|x| Vec2::new(x, y))).collect(),
            cols: (0..map.size.x).map(|x| bits(map.size.y, &|y| Vec2::new(x, y))).collect(),
        }
    }

    /// Lines before the mirror, or 100x that for a horizontal mirror.
    fn summary(&self, smudges: u32) -> Option<usize> {
        mirror(&self.cols, smudges).or_else(|| mirror(&self.rows, smudges).map(|y| 100 * y))
    }
}

/// First split point where the two reflected halves differ in exactly
/// `smudges` cells.
fn mirror(lines: &[u64], smudges: u32) -> Option<usize> {
    (1..lines.len()).find(|&at| {
        lines[..at].iter().rev().zip(&lines[at..]).map(|(a, b)| (a ^ b).count_ones()).sum::<u32>() == smudges
    })
}

fn total(patterns: &[Pattern], smudges: u32) -> anyhow::Result<usize> {
    patterns.iter().enumerate().map(|(i, p)| {
        p.summary(smudges).ok_or_else(|| anyhow::anyhow!("pattern {} has no mirror", i + 1))
    }).sum()
}

impl Day for PointOfIncidence {
    const NUMBER: u8 = 13;
    const NAME: &'static str = "Point of Incidence";
    type Input = Vec<Pattern>;
    type Answer = usize;

    fn parse(raw: &str) -> anyhow::Result<Vec<Pattern>> {
        let raw = raw.replace("\r\n", "\n");
        raw.split("\n\n").filter(|block| !block.trim().is_empty()).map(|block| -> anyhow::Result<Pattern> {
            let map = Map2d::parse_grid(block, |c| match c {'#' => Some(true), '.' => Some(false), _ => None})?;
            ensure!(map.size.x <= 64 && map.size.y <= 64, "pattern larger than 64x64");
            Ok(Pattern::from_map(&map))
        }).collect()
    }

    fn part1(input: &Vec<Pattern>) -> anyhow::Result<usize> {
        total(input, 0)
    }

    fn part2(input: &Vec<Pattern>) -> anyhow::Result<usize> {
        total(input, 1)
    }
}

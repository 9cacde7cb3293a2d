use anyhow::{anyhow, bail, Context};
use regex::Regex;

use super::Day;

pub struct CubeConundrum;

/// Red, green and blue counts.
type Cubes = [u32; 3];

#[derive(Debug)]
pub struct Game {
    id: u32,
    draws: Vec<Cubes>,
}

impl Game {
    fn minimal_set(&self) -> Cubes {
        self.draws.iter().fold([0; 3], |acc, d| std::array::from_fn(|i| acc[i].max(d[i])))
    }
}

impl Day for CubeConundrum {
    const NUMBER: u8 = 2;
    const NAME: &'static str = "Cube Conundrum";
    type Input = Vec<Game>;
    type Answer = u32;

    fn parse(raw: &str) -> anyhow::Result<Vec<Game>> {
        let count_re = Regex::new(r"^(\d+) (red|green|blue)$")?;
        raw.lines().filter(|l| !l.trim().is_empty()).map(|line| -> anyhow::Result<Game> {
            let (head, draws) = line.split_once(": ").ok_or_else(|| anyhow!("no ': ' in {line:?}"))?;
            let id: u32 = head.strip_prefix("Game ").ok_or_else(|| anyhow!("no game id in {line:?}"))?.parse()?;
            let draws = draws.split(';').map(|draw| -> anyhow::Result<Cubes> {
                let mut cubes = [0; 3];
                for count in draw.split(',') {
                    let Some(m) = count_re.captures(count.trim()) else {
                        bail!("cannot parse {count:?} in game {id}")
                    };
                    let slot = match &m[2] {"red" => 0, "green" => 1, _ => 2};
                    cubes[slot] = m[1].parse().context("cube count")?;
                }
                Ok(cubes)
            }).collect::<anyhow::Result<_>>()?;
            Ok(Game { id, draws })
        }).collect()
    }

    fn part1(input: &Vec<Game>) -> anyhow::Result<u32> {
        const BAG: Cubes = [12, 13, 14];
        Ok(input.iter()
            .filter(|g| g.draws.iter().all(|d| d.iter().zip(BAG).all(|(&n, max)| n <= max)))
            .map(|g| g.id)
            .sum())
    }

    fn part2(input: &Vec<Game>) -> anyhow::Result<u32> {
        Ok(input.iter().map(|g| g.minimal_set().iter().product::<u32>()).sum())
    }
}

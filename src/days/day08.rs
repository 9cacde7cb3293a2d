use anyhow::{anyhow, bail, Context};
use rustc_hash::FxHashMap;

use super::Day;
use crate::util::lcm_iter;

pub struct HauntedWasteland;

#[derive(Debug)]
pub struct Network {
    /// `true` for a right turn.
    turns: Vec<bool>,
    names: Vec<String>,
    links: Vec<[usize; 2]>,
}

impl Network {
    fn node(&self, name: &str) -> anyhow::Result<usize> {
        self.names.iter().position(|n| n == name).with_context(|| format!("no node {name}"))
    }

    /// Steps from `start` until `is_end` holds, always walking at least one step.
    fn steps(&self, start: usize, is_end: impl Fn(usize) -> bool) -> anyhow::Result<u64> {
        let mut node = start;
        for (steps, &turn) in self.turns.iter().cycle().enumerate() {
            node = self.links[node][turn as usize];
            if is_end(node) {return Ok(steps as u64 + 1)}
            if steps > self.turns.len() * self.links.len() {break}
        }
        bail!("{} never reaches an end node", self.names[start])
    }
}

impl Day for HauntedWasteland {
    const NUMBER: u8 = 8;
    const NAME: &'static str = "Haunted Wasteland";
    type Input = Network;
    type Answer = u64;

    fn parse(raw: &str) -> anyhow::Result<Network> {
        let mut lines = raw.lines().map(str::trim).filter(|l| !l.is_empty());
        let turns = lines.next().context("empty input")?.chars().map(|c| match c {
            'L' => Ok(false),
            'R' => Ok(true),
            _ => Err(anyhow!("bad turn {c:?}")),
        }).collect::<anyhow::Result<Vec<_>>>()?;

        // "AAA = (BBB, CCC)"
        let mut edges = Vec::new();
        for line in lines {
            let parsed = line.split_once(" = (")
                .and_then(|(name, rest)| Some((name, rest.strip_suffix(')')?.split_once(", ")?)));
            let Some((name, (left, right))) = parsed else { bail!("cannot parse {line:?}") };
            edges.push((name, left, right));
        }
        let ids: FxHashMap<&str, usize> = edges.iter().enumerate().map(|(i, &(name, ..))| (name, i)).collect();
        let id = |name: &str| ids.get(name).copied().with_context(|| format!("link to unknown node {name}"));
        let links = edges.iter().map(|&(_, l, r)| -> anyhow::Result<[usize; 2]> { Ok([id(l)?, id(r)?]) }).collect::<anyhow::Result<_>>()?;
        let names = edges.iter().map(|&(name, ..)| name.to_owned()).collect();

        Ok(Network { turns, names, links })
    }

    fn part1(input: &Network) -> anyhow::Result<u64> {
        let end = input.node("ZZZ")?;
        input.steps(input.node("AAA")?, |n| n == end)
    }

    /// Every ghost lands on its `..Z` node in a cycle whose first arrival
    /// equals its period, so the ghosts meet at the LCM of the first arrivals.
    fn part2(input: &Network) -> anyhow::Result<u64> {
        let periods = (0..input.names.len())
            .filter(|&n| input.names[n].ends_with('A'))
            .map(|n| input.steps(n, |m| input.names[m].ends_with('Z')).map(|s| s as i64))
            .collect::<anyhow::Result<Vec<_>>>()?;
        lcm_iter(periods).map(|l| l as u64).context("no start nodes")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part1_examples() {
        let input = HauntedWasteland::parse("RL

AAA = (BBB, CCC)
BBB = (DDD, EEE)
CCC = (ZZZ, GGG)
DDD = (DDD, DDD)
EEE = (EEE, EEE)
GGG = (GGG, GGG)
ZZZ = (ZZZ, ZZZ)").unwrap();
        assert_eq!(HauntedWasteland::part1(&input).unwrap(), 2);

        let input = HauntedWasteland::parse("LLR

AAA = (BBB, BBB)
BBB = (AAA, ZZZ)
ZZZ = (ZZZ, ZZZ)").unwrap();
        assert_eq!(HauntedWasteland::part1(&input).unwrap(), 6);
    }

    #[test]
    fn part2_example() {
        let input = HauntedWasteland::parse("LR

11A = (11B, XXX)
11B = (XXX, 11Z)
11Z = (11B, XXX)
22A = (22B, XXX)
22B = (22C, 22C)
22C = (22Z, 22Z)
22Z = (22B, 22B)
XXX = (XXX, XXX)").unwrap();
        assert_eq!(HauntedWasteland::part2(&input).unwrap(), 6);
    }

    #[test]
    fn dangling_link_is_an_error() {
        assert!(HauntedWasteland::parse("L\n\nAAA = (BBB, AAA)").is_err());
    }
}

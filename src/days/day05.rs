use std::ops::Range;

use anyhow::{anyhow, ensure, Context};
use itertools::Itertools;

use super::Day;

pub struct SeedFertilizer;

/// `source.start + offset` is where the chunk lands in the next category.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Chunk {
    source: Range<i64>,
    offset: i64,
}

/// One "x-to-y map": non-overlapping chunks sorted by source start. Ids
/// outside every chunk map to themselves.
#[derive(Debug)]
struct Mapping(Vec<Chunk>);

impl Mapping {
    fn map_point(&self, id: i64) -> i64 {
        self.0.iter().find(|c| c.source.contains(&id)).map_or(id, |c| id + c.offset)
    }

    /// Maps a range of ids to the (possibly several) ranges it lands on.
    fn map_range(&self, range: Range<i64>, out: &mut Vec<Range<i64>>) {
        let mut start = range.start;
        for chunk in &self.0 {
            if start >= range.end {break}
            if chunk.source.end <= start {continue}
            if chunk.source.start >= range.end {break}
            if chunk.source.start > start {
                out.push(start..chunk.source.start);
                start = chunk.source.start;
            }
            let end = chunk.source.end.min(range.end);
            out.push(start + chunk.offset..end + chunk.offset);
            start = end;
        }
        if start < range.end {
            out.push(start..range.end);
        }
    }
}

#[derive(Debug)]
pub struct Almanac {
    seeds: Vec<i64>,
    mappings: Vec<Mapping>,
}

impl Day for SeedFertilizer {
    const NUMBER: u8 = 5;
    const NAME: &'static str = "If You Give A Seed A Fertilizer";
    type Input = Almanac;
    type Answer = i64;

    fn parse(raw: &str) -> anyhow::Result<Almanac> {
        let mut lines = raw.lines().map(str::trim).filter(|l| !l.is_empty());
        let seeds = lines.next()
            .and_then(|l| l.strip_prefix("seeds:"))
            .ok_or_else(|| anyhow!("expected a 'seeds:' line"))?
            .split_whitespace()
            .map(str::parse)
            .collect::<Result<Vec<i64>, _>>()?;

        let mut mappings: Vec<Mapping> = Vec::new();
        for line in lines {
            if line.ends_with("map:") {
                mappings.push(Mapping(Vec::new()));
                continue;
            }
            let mapping = mappings.last_mut().with_context(|| format!("{line:?} before any map header"))?;
            let [dest, source, len] = line.split_whitespace().map(str::parse::<i64>).collect::<Result<Vec<_>, _>>()?[..] else {
                anyhow::bail!("expected three numbers in {line:?}")
            };
            mapping.0.push(Chunk { source: source..source + len, offset: dest - source });
        }
        for mapping in &mut mappings {
            mapping.0.sort_by_key(|c| c.source.start);
            ensure!(
                mapping.0.iter().tuple_windows().all(|(a, b)| a.source.end <= b.source.start),
                "overlapping ranges in a map"
            );
        }
        Ok(Almanac { seeds, mappings })
    }

    fn part1(input: &Almanac) -> anyhow::Result<i64> {
        input.seeds.iter()
            .map(|&seed| input.mappings.iter().fold(seed, |id, m| m.map_point(id)))
            .min()
            .context("no seeds")
    }

    fn part2(input: &Almanac) -> anyhow::Result<i64> {
        ensure!(input.seeds.len() % 2 == 0, "seed ranges come in pairs");
        let mut ranges = input.seeds.iter().tuples().map(|(&start, &len)| start..start + len).collect_vec();
        let mut next = Vec::new();
        for mapping in &input.mappings {
            next.clear();
            for range in ranges.drain(..) {
                mapping.map_range(range, &mut next);
            }
            std::mem::swap(&mut ranges, &mut next);
        }
        ranges.iter().map(|r| r.start).min().context("no seed ranges")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_range_splits_around_chunks() {
        let mapping = Mapping(vec![
            Chunk { source: 100..200, offset: 50 },
            Chunk { source: 300..400, offset: -50 },
        ]);
        let mut out = Vec::new();
        mapping.map_range(0..350, &mut out);
        assert_eq!(out, vec![0..100, 150..250, 200..300, 250..300]);
    }

    const EXAMPLE: &str = "seeds: 79 14 55 13

seed-to-soil map:
50 98 2
52 50 48

soil-to-fertilizer map:
0 15 37
37 52 2
39 0 15

fertilizer-to-water map:
49 53 8
0 11 42
42 0 7
57 7 4

water-to-light map:
88 18 7
18 25 70

light-to-temperature map:
45 77 23
81 45 19
68 64 13

temperature-to-humidity map:
0 69 1
1 0 69

humidity-to-location map:
60 56 37
56 93 4";

    #[test]
    fn example() {
        let input = SeedFertilizer::parse(EXAMPLE).unwrap();
        assert_eq!(SeedFertilizer::part1(&input).unwrap(), 35);
        assert_eq!(SeedFertilizer::part2(&input).unwrap(), 46);
    }
}

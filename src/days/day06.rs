use anyhow::{anyhow, ensure};

use super::Day;

pub struct WaitForIt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Race {
    time: u64,
    record: u64,
}

impl Race {
    fn beats(&self, hold: u64) -> bool {
        hold <= self.time && hold as u128 * (self.time - hold) as u128 > self.record as u128
    }

    /// Holds strictly beating the record lie between the roots of
    /// `h * (time - h) = record`. The float roots are nudged onto exact
    /// integer boundaries.
    fn ways_to_win(&self) -> u64 {
        let (t, d) = (self.time as f64, self.record as f64);
        let disc = t * t - 4.0 * d;
        if disc < 0.0 {return 0}
        let mid = self.time / 2;
        if !self.beats(mid) {return 0}

        let mut lo = ((t - disc.sqrt()) / 2.0).floor().max(0.0) as u64;
        while !self.beats(lo) {lo += 1}
        while lo > 0 && self.beats(lo - 1) {lo -= 1}
        let mut hi = (((t + disc.sqrt()) / 2.0).ceil() as u64).min(self.time);
        while !self.beats(hi) {hi -= 1}
        while self.beats(hi + 1) {hi += 1}
        hi - lo + 1
    }
}

#[derive(Debug)]
pub struct Sheet {
    races: Vec<Race>,
    /// The same sheet read with the spaces between digits ignored.
    joined: Race,
}

fn numbers<'a>(line: Option<&'a str>, label: &str) -> anyhow::Result<Vec<&'a str>> {
    let line = line.ok_or_else(|| anyhow!("missing {label} line"))?;
    let rest = line.trim().strip_prefix(label).ok_or_else(|| anyhow!("expected {label:?} in {line:?}"))?;
    Ok(rest.split_whitespace().collect())
}

impl Day for WaitForIt {
    const NUMBER: u8 = 6;
    const NAME: &'static str = "Wait For It";
    type Input = Sheet;
    type Answer = u64;

    fn parse(raw: &str) -> anyhow::Result<Sheet> {
        let mut lines = raw.lines().filter(|l| !l.trim().is_empty());
        let times = numbers(lines.next(), "Time:")?;
        let records = numbers(lines.next(), "Distance:")?;
        ensure!(times.len() == records.len(), "{} times but {} distances", times.len(), records.len());

        let races = times.iter().zip(&records)
            .map(|(t, d)| -> anyhow::Result<Race> { Ok(Race { time: t.parse()?, record: d.parse()? }) })
            .collect::<anyhow::Result<_>>()?;
        let joined = Race { time: times.concat().parse()?, record: records.concat().parse()? };
        Ok(Sheet { races, joined })
    }

    fn part1(input: &Sheet) -> anyhow::Result<u64> {
        Ok(input.races.iter().map(Race::ways_to_win).product())
    }

    fn part2(input: &Sheet) -> anyhow::Result<u64> {
        Ok(input.joined.ways_to_win())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_roots_do_not_count() {
        // holding 10 or 20 only ties the record of 200
        assert_eq!(Race { time: 30, record: 200 }.ways_to_win(), 9);
        assert_eq!(Race { time: 7, record: 9 }.ways_to_win(), 4);
        assert_eq!(Race { time: 4, record: 100 }.ways_to_win(), 0);
    }

    #[test]
    fn example() {
        let input = WaitForIt::parse("Time:      7  15   30\nDistance:  9  40  200\n").unwrap();
        assert_eq!(input.joined, Race { time: 71530, record: 940200 });
        assert_eq!(WaitForIt::part1(&input).unwrap(), 288);
        assert_eq!(WaitForIt::part2(&input).unwrap(), 71503);
    }
}

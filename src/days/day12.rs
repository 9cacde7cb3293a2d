use anyhow::{anyhow, ensure};

use super::Day;

pub struct HotSprings;

#[derive(Clone, Debug)]
pub struct Record {
    springs: Vec<u8>,
    groups: Vec<usize>,
}

impl Record {
    fn unfold(&self, times: usize) -> Record {
        let mut springs = Vec::with_capacity((self.springs.len() + 1) * times);
        for i in 0..times {
            if i > 0 {springs.push(b'?')}
            springs.extend_from_slice(&self.springs);
        }
        Record { springs, groups: self.groups.repeat(times) }
    }

    /// Ways to fill in the `?`s so the damaged runs match `groups`.
    ///
    /// `ways[i][j]` counts arrangements of `springs[i..]` against `groups[j..]`.
    fn arrangements(&self) -> u64 {
        let (s, g) = (&self.springs, &self.groups);
        let (n, m) = (s.len(), g.len());
        // longest run of cells that could be damaged starting at i
        let mut run = vec![0; n + 1];
        for i in (0..n).rev() {
            run[i] = if s[i] == b'.' {0} else {run[i + 1] + 1};
        }

        let mut ways = vec![vec![0u64; m + 1]; n + 2];
        ways[n][m] = 1;
        ways[n + 1][m] = 1;
        for i in (0..n).rev() {
            for j in (0..=m).rev() {
                let mut count = 0;
                if s[i] != b'#' {
                    count += ways[i + 1][j];
                }
                if j < m && s[i] != b'.' {
                    let len = g[j];
                    let end = i + len;
                    if run[i] >= len && (end == n || s[end] != b'#') {
                        count += ways[(end + 1).min(n + 1)][j + 1];
                    }
                }
                ways[i][j] = count;
            }
        }
        ways[0][0]
    }
}

impl Day for HotSprings {
    const NUMBER: u8 = 12;
    const NAME: &'static str = "Hot Springs";
    type Input = Vec<Record>;
    type Answer = u64;

    fn parse(raw: &str) -> anyhow::Result<Vec<Record>> {
        // "???.### 1,1,3"
        raw.lines().filter(|l| !l.trim().is_empty()).map(|line| -> anyhow::Result<Record> {
            let (springs, groups) = line.split_once(' ').ok_or_else(|| anyhow!("no groups in {line:?}"))?;
            ensure!(springs.bytes().all(|b| matches!(b, b'.' | b'#' | b'?')), "bad springs {springs:?}");
            let groups = groups.trim().split(',').map(str::parse::<usize>).collect::<Result<Vec<_>, _>>()?;
            ensure!(groups.iter().all(|&g| g > 0), "empty group in {line:?}");
            Ok(Record { springs: springs.as_bytes().to_vec(), groups })
        }).collect()
    }

    fn part1(input: &Vec<Record>) -> anyhow::Result<u64> {
        Ok(input.iter().map(Record::arrangements).sum())
    }

    fn part2(input: &Vec<Record>) -> anyhow::Result<u64> {
        Ok(input.iter().map(|r| r.unfold(5).arrangements()).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "???.### 1,1,3
.??..??...?##. 1,1,3
?#?#?#?#?#?#?#? 1,3,1,6
????.#...#... 4,1,1
????.######..#####. 1,6,5
?###???????? 3,2,1";

    #[test]
    fn per_row_counts() {
        let input = HotSprings::parse(EXAMPLE).unwrap();
        let counts: Vec<_> = input.iter().map(Record::arrangements).collect();
        assert_eq!(counts, vec![1, 4, 1, 1, 4, 10]);
        assert_eq!(input[1].unfold(5).arrangements(), 16384);
    }

    #[test]
    fn example() {
        let input = HotSprings::parse(EXAMPLE).unwrap();
        assert_eq!(HotSprings::part1(&input).unwrap(), 21);
        assert_eq!(HotSprings::part2(&input).unwrap(), 525152);
    }
}

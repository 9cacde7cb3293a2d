use super::Day;
use crate::util::binomial_coefficient;

pub struct MirageMaintenance;

/// The next value of a sequence with a polynomial generator:
/// `x_n = sum_i (-1)^(n-1-i) * C(n, i) * x_i`.
fn extrapolate(values: impl ExactSizeIterator<Item = i64>) -> i64 {
    let n = values.len() as i64;
    values.enumerate()
        .map(|(i, x)| {
            let i = i as i64;
            let sign = if (n - 1 - i) % 2 == 0 {1} else {-1};
            sign * binomial_coefficient(n, i) * x
        })
        .sum()
}

impl Day for MirageMaintenance {
    const NUMBER: u8 = 9;
    const NAME: &'static str = "Mirage Maintenance";
    type Input = Vec<Vec<i64>>;
    type Answer = i64;

    fn parse(raw: &str) -> anyhow::Result<Vec<Vec<i64>>> {
        raw.lines()
            .filter(|l| !l.trim().is_empty())
            .map(|line| -> anyhow::Result<Vec<i64>> {
                Ok(line.split_whitespace().map(str::parse::<i64>).collect::<Result<_, _>>()?)
            })
            .collect()
    }

    fn part1(input: &Vec<Vec<i64>>) -> anyhow::Result<i64> {
        Ok(input.iter().map(|row| extrapolate(row.iter().copied())).sum())
    }

    fn part2(input: &Vec<Vec<i64>>) -> anyhow::Result<i64> {
        Ok(input.iter().map(|row| extrapolate(row.iter().rev().copied())).sum())
    }
}

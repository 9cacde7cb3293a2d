use anyhow::{anyhow, Context};

use super::Day;

pub struct Scratchcards;

impl Day for Scratchcards {
    const NUMBER: u8 = 4;
    const NAME: &'static str = "Scratchcards";
    /// Number of winning numbers on each card.
    type Input = Vec<usize>;
    type Answer = u64;

    fn parse(raw: &str) -> anyhow::Result<Vec<usize>> {
        raw.lines().filter(|l| !l.trim().is_empty()).map(|line| -> anyhow::Result<usize> {
            // "Card 1: 41 48 83 86 17 | 83 86  6 31 17  9 48 53"
            let (_, numbers) = line.split_once(':').ok_or_else(|| anyhow!("no ':' in {line:?}"))?;
            let (winning, ours) = numbers.split_once('|').ok_or_else(|| anyhow!("no '|' in {line:?}"))?;
            let mut is_winning = [false; 100];
            for n in winning.split_whitespace() {
                let n: usize = n.parse()?;
                *is_winning.get_mut(n).ok_or_else(|| anyhow!("number {n} out of range"))? = true;
            }
            ours.split_whitespace().try_fold(0, |count, n| {
                let n: usize = n.parse()?;
                Ok::<_, anyhow::Error>(count + is_winning.get(n).map_or(0, |&w| w as usize))
            })
        }).collect()
    }

    fn part1(input: &Vec<usize>) -> anyhow::Result<u64> {
        input.iter().enumerate().filter(|&(_, &n)| n > 0).try_fold(0u64, |sum, (i, &n)| {
            u32::try_from(n - 1).ok()
                .and_then(|shift| 1u64.checked_shl(shift))
                .and_then(|points| sum.checked_add(points))
                .with_context(|| format!("card {} is worth too many points ({n} matches)", i + 1))
        })
    }

    fn part2(input: &Vec<usize>) -> anyhow::Result<u64> {
        let mut copies = vec![1u64; input.len()];
        for (i, &won) in input.iter().enumerate() {
            let end = (i + 1 + won).min(input.len());
            for j in i + 1..end {
                copies[j] = copies[j].checked_add(copies[i]).with_context(|| format!("too many copies of card {}", j + 1))?;
            }
        }
        Ok(copies.iter().sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "Card 1: 41 48 83 86 17 | 83 86  6 31 17  9 48 53
Card 2: 13 32 20 16 61 | 61 30 68 82 17 32 24 19
Card 3:  1 21 53 59 44 | 69 82 63 72 16 21 14  1
Card 4: 41 92 73 84 69 | 59 84 76 51 58  5 54 83
Card 5: 87 83 26 28 32 | 88 30 70 12 93 22 82 36
Card 6: 31 18 13 56 72 | 74 77 10 23 35 67 36 11";

    #[test]
    fn example() {
        let input = Scratchcards::parse(EXAMPLE).unwrap();
        assert_eq!(input, vec![4, 2, 2, 1, 0, 0]);
        assert_eq!(Scratchcards::part1(&input).unwrap(), 13);
        assert_eq!(Scratchcards::part2(&input).unwrap(), 30);
    }

    #[test]
    fn oversized_card_is_an_error() {
        let numbers = (1..=70).map(|n| n.to_string()).collect::<Vec<_>>().join(" ");
        let raw = format!("{}\nCard 2: {numbers} | {numbers}\n", EXAMPLE.lines().next().unwrap());
        let input = Scratchcards::parse(&raw).unwrap();
        assert_eq!(input[1], 70);
        let err = Scratchcards::part1(&input).unwrap_err();
        assert!(err.to_string().contains("card 2"), "{err}");
    }
}

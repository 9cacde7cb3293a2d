use anyhow::{anyhow, bail, ensure};
use arrayvec::ArrayVec;
use itertools::Itertools;

use super::Day;

pub struct CamelCards;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hand {
    /// Face values, 2 through 14 (ace). Jacks are 11.
    cards: [u8; 5],
    bid: u64,
}

const JACK: u8 = 11;
const JOKER: u8 = 1;

fn card_value(c: char) -> Option<u8> {
    Some(match c {
        '2'..='9' => c as u8 - b'0',
        'T' => 10, 'J' => JACK, 'Q' => 12, 'K' => 13, 'A' => 14,
        _ => return None,
    })
}

/// 6 for five of a kind down to 0 for high card. Jokers join the largest group.
fn hand_type(cards: &[u8; 5]) -> u8 {
    let jokers = cards.iter().filter(|&&c| c == JOKER).count();
    let mut groups = cards.iter().filter(|&&c| c != JOKER).counts().into_values().collect_vec();
    groups.sort_unstable_by(|a, b| b.cmp(a));
    match groups.first_mut() {
        Some(largest) => *largest += jokers,
        None => groups.push(jokers),
    }
    match groups[..] {
        [5] => 6,
        [4, ..] => 5,
        [3, 2] => 4,
        [3, ..] => 3,
        [2, 2, ..] => 2,
        [2, ..] => 1,
        _ => 0,
    }
}

fn winnings(hands: &[Hand], jokers: bool) -> u64 {
    hands.iter()
        .map(|hand| {
            let cards = hand.cards.map(|c| if jokers && c == JACK {JOKER} else {c});
            ((hand_type(&cards), cards), hand.bid)
        })
        .sorted_unstable()
        .enumerate()
        .map(|(rank, (_, bid))| (rank as u64 + 1) * bid)
        .sum()
}

impl Day for CamelCards {
    const NUMBER: u8 = 7;
    const NAME: &'static str = "Camel Cards";
    type Input = Vec<Hand>;
    type Answer = u64;

    fn parse(raw: &str) -> anyhow::Result<Vec<Hand>> {
        raw.lines().filter(|l| !l.trim().is_empty()).map(|line| -> anyhow::Result<Hand> {
            let (cards_str, bid) = line.split_once(' ').ok_or_else(|| anyhow!("no bid in {line:?}"))?;
            let mut cards = ArrayVec::<u8, 5>::new();
            for c in cards_str.chars() {
                let Some(value) = card_value(c) else { bail!("unknown card {c:?} in {line:?}") };
                ensure!(cards.try_push(value).is_ok(), "more than five cards in {line:?}");
            }
            let cards = cards.into_inner().map_err(|_| anyhow!("fewer than five cards in {line:?}"))?;
            Ok(Hand { cards, bid: bid.trim().parse()? })
        }).collect()
    }

    fn part1(input: &Vec<Hand>) -> anyhow::Result<u64> {
        Ok(winnings(input, false))
    }

    fn part2(input: &Vec<Hand>) -> anyhow::Result<u64> {
        Ok(winnings(input, true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "32T3K 765
T55J5 684
KK677 28
KTJJT 220
QQQJA 483";

    #[test]
    fn types() {
        assert_eq!(hand_type(&[2, 2, 2, 2, 2]), 6);
        assert_eq!(hand_type(&[3, 2, 10, 3, 13]), 1);
        assert_eq!(hand_type(&[13, 10, JOKER, JOKER, 10]), 5);
        assert_eq!(hand_type(&[JOKER; 5]), 6);
        assert_eq!(hand_type(&[2, 3, 4, 5, 6]), 0);
    }

    #[test]
    fn example() {
        let input = CamelCards::parse(EXAMPLE).unwrap();
        assert_eq!(CamelCards::part1(&input).unwrap(), 6440);
        assert_eq!(CamelCards::part2(&input).unwrap(), 5905);
    }

    #[test]
    fn short_hand_is_rejected() {
        assert!(CamelCards::parse("AKQJ 10").is_err());
    }
}

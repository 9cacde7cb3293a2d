use anyhow::Context;

use super::Day;

pub struct Trebuchet;

const DIGIT_WORDS: [&str; 9] = ["one", "two", "three", "four", "five", "six", "seven", "eight", "nine"];

/// Digits found scanning left to right. With `words`, spelled-out digits
/// count too, and they may overlap ("eightwo" yields 8 then 2).
fn digits(line: &str, words: bool) -> impl Iterator<Item = u32> + '_ {
    (0..line.len()).filter_map(move |i| {
        let rest = &line.as_bytes()[i..];
        if rest[0].is_ascii_digit() {
            return Some((rest[0] - b'0') as u32);
        }
        if !words {return None}
        DIGIT_WORDS.iter().position(|w| rest.starts_with(w.as_bytes())).map(|d| d as u32 + 1)
    })
}

fn calibration_sum(lines: &[String], words: bool) -> anyhow::Result<u32> {
    lines.iter().map(|line| {
        let mut found = digits(line, words);
        let first = found.next().with_context(|| format!("no digit in {line:?}"))?;
        let last = found.last().unwrap_or(first);
        Ok(first * 10 + last)
    }).sum()
}

impl Day for Trebuchet {
    const NUMBER: u8 = 1;
    const NAME: &'static str = "Trebuchet?!";
    type Input = Vec<String>;
    type Answer = u32;

    fn parse(raw: &str) -> anyhow::Result<Self::Input> {
        Ok(raw.lines().map(str::trim).filter(|l| !l.is_empty()).map(str::to_owned).collect())
    }

    fn part1(input: &Self::Input) -> anyhow::Result<u32> {
        calibration_sum(input, false)
    }

    fn part2(input: &Self::Input) -> anyhow::Result<u32> {
        calibration_sum(input, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn part1_example() {
        let input = Trebuchet::parse("1abc2\npqr3stu8vwx\na1b2c3d4e5f\ntreb7uchet\n").unwrap();
        assert_eq!(Trebuchet::part1(&input).unwrap(), 142);
    }

    #[test]
    fn spelled_digits_overlap() {
        assert_eq!(digits("fivetwoqmlk22eightfive", true).collect::<Vec<_>>(), vec![5, 2, 2, 2, 8, 5]);
        assert_eq!(digits("zeroonetwo012", true).collect::<Vec<_>>(), vec![1, 2, 0, 1, 2]);
        assert_eq!(digits("eightwo", true).collect::<Vec<_>>(), vec![8, 2]);
    }

    #[test]
    fn part2_example() {
        let input = Trebuchet::parse(
            "two1nine\neightwothree\nabcone2threexyz\nxtwone3four\n4nineeightseven2\nzoneight234\n7pqrstsixteen",
        ).unwrap();
        assert_eq!(Trebuchet::part2(&input).unwrap(), 281);
    }

    #[test]
    fn line_without_digits_is_an_error() {
        let input = Trebuchet::parse("abc\n").unwrap();
        assert!(Trebuchet::part1(&input).is_err());
    }
}

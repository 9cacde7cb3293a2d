use anyhow::{bail, ensure};

use super::Day;

pub struct LensLibrary;

fn hash(s: &str) -> usize {
    s.bytes().fold(0, |h, b| (h + b as usize) * 17 % 256)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Insert { label: String, focal: u8 },
    Remove { label: String },
}

#[derive(Debug)]
pub struct Sequence {
    /// Raw comma-separated steps, hashed whole for part 1.
    raw: Vec<String>,
    steps: Vec<Step>,
}

impl Day for LensLibrary {
    const NUMBER: u8 = 15;
    const NAME: &'static str = "Lens Library";
    type Input = Sequence;
    type Answer = usize;

    fn parse(raw: &str) -> anyhow::Result<Sequence> {
        let raw: Vec<String> = raw.split(',').map(|s| s.trim().to_owned()).filter(|s| !s.is_empty()).collect();
        let steps = raw.iter().map(|s| -> anyhow::Result<Step> {
            if let Some(label) = s.strip_suffix('-') {
                return Ok(Step::Remove { label: label.to_owned() });
            }
            let Some((label, focal)) = s.split_once('=') else { bail!("bad step {s:?}") };
            let focal = focal.parse()?;
            ensure!((1..=9).contains(&focal), "focal length {focal} out of range in {s:?}");
            Ok(Step::Insert { label: label.to_owned(), focal })
        }).collect::<anyhow::Result<_>>()?;
        Ok(Sequence { raw, steps })
    }

    fn part1(input: &Sequence) -> anyhow::Result<usize> {
        Ok(input.raw.iter().map(|s| hash(s)).sum())
    }

    fn part2(input: &Sequence) -> anyhow::Result<usize> {
        let mut boxes: Vec<Vec<(&str, u8)>> = vec![Vec::new(); 256];
        for step in &input.steps {
            match step {
                Step::Insert { label, focal } => {
                    let lenses = &mut boxes[hash(label)];
                    match lenses.iter_mut().find(|(l, _)| *l == label.as_str()) {
                        Some(lens) => lens.1 = *focal,
                        None => lenses.push((label.as_str(), *focal)),
                    }
                }
                Step::Remove { label } => boxes[hash(label)].retain(|(l, _)| *l != label.as_str()),
            }
        }
        Ok(boxes.iter().enumerate().flat_map(|(b, lenses)|
            lenses.iter().enumerate().map(move |(slot, &(_, focal))| (b + 1) * (slot + 1) * focal as usize)
        ).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "rn=1,cm-,qp=3,cm=2,qp-,pc=4,ot=9,ab=5,pc-,pc=6,ot=7\n";

    #[test]
    fn hash_of_hash() {
        assert_eq!(hash("HASH"), 52);
        assert_eq!(hash("rn=1"), 30);
    }

    #[test]
    fn example() {
        let input = LensLibrary::parse(EXAMPLE).unwrap();
        assert_eq!(input.steps[1], Step::Remove { label: "cm".to_owned() });
        assert_eq!(LensLibrary::part1(&input).unwrap(), 1320);
        assert_eq!(LensLibrary::part2(&input).unwrap(), 145);
    }
}

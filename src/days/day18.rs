use anyhow::{anyhow, bail};

use super::Day;
use crate::util::{Dir, Vec2};

pub struct LavaductLagoon;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dig {
    dir: Dir,
    len: i64,
}

/// Cells inside or on the trench: shoelace area plus half the boundary,
/// plus one (Pick's theorem, counting boundary cells whole).
fn lagoon_size(plan: impl Iterator<Item = Dig>) -> i64 {
    let mut pos = Vec2::zero();
    let (mut twice_area, mut boundary) = (0, 0);
    for dig in plan {
        let next = pos + dig.dir.to_vec2() * dig.len;
        twice_area += pos.x * next.y - next.x * pos.y;
        boundary += dig.len;
        pos = next;
    }
    twice_area.abs() / 2 + boundary / 2 + 1
}

impl Day for LavaductLagoon {
    const NUMBER: u8 = 18;
    const NAME: &'static str = "Lavaduct Lagoon";
    /// The plan as written, and as decoded from the colour codes.
    type Input = (Vec<Dig>, Vec<Dig>);
    type Answer = i64;

    fn parse(raw: &str) -> anyhow::Result<Self::Input> {
        let mut plain = Vec::new();
        let mut decoded = Vec::new();
        for line in raw.lines().filter(|l| !l.trim().is_empty()) {
            // "R 6 (#70c710)"
            let [dir, len, code] = line.split_whitespace().collect::<Vec<_>>()[..] else {
                bail!("expected three fields in {line:?}")
            };
            let dir = match dir {
                "U" => Dir::Up, "D" => Dir::Down, "L" => Dir::Left, "R" => Dir::Right,
                _ => bail!("bad direction in {line:?}"),
            };
            plain.push(Dig { dir, len: len.parse()? });

            let hex = code.strip_prefix("(#").and_then(|c| c.strip_suffix(')'))
                .filter(|h| h.len() == 6)
                .ok_or_else(|| anyhow!("bad colour code in {line:?}"))?;
            let len = i64::from_str_radix(&hex[..5], 16)?;
            let dir = match &hex[5..] {
                "0" => Dir::Right, "1" => Dir::Down, "2" => Dir::Left, "3" => Dir::Up,
                _ => bail!("bad encoded direction in {line:?}"),
            };
            decoded.push(Dig { dir, len });
        }
        Ok((plain, decoded))
    }

    fn part1(input: &Self::Input) -> anyhow::Result<i64> {
        Ok(lagoon_size(input.0.iter().copied()))
    }

    fn part2(input: &Self::Input) -> anyhow::Result<i64> {
        Ok(lagoon_size(input.1.iter().copied()))
    }
}

use std::ops::RangeInclusive;

use anyhow::{anyhow, bail, ensure};
use itertools::Itertools;

use super::Day;
use crate::util::pairs;

pub struct NeverTellMeTheOdds;

const TEST_AREA: RangeInclusive<i128> = 200_000_000_000_000..=400_000_000_000_000;

type V3 = [i128; 3];

fn sub(a: V3, b: V3) -> V3 {[a[0] - b[0], a[1] - b[1], a[2] - b[2]]}
fn add(a: V3, b: V3) -> V3 {[a[0] + b[0], a[1] + b[1], a[2] + b[2]]}
fn scale(a: V3, k: i128) -> V3 {a.map(|x| x * k)}
fn dot(a: V3, b: V3) -> i128 {a[0] * b[0] + a[1] * b[1] + a[2] * b[2]}
fn cross(a: V3, b: V3) -> V3 {
    [a[1] * b[2] - a[2] * b[1], a[2] * b[0] - a[0] * b[2], a[0] * b[1] - a[1] * b[0]]
}

fn exact_div(a: i128, b: i128) -> Option<i128> {
    (b != 0 && a % b == 0).then(|| a / b)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hailstone {
    pos: V3,
    vel: V3,
}

/// Whether the XY paths of `a` and `b` cross inside `area`, in the future of both.
fn paths_cross(a: &Hailstone, b: &Hailstone, area: &RangeInclusive<i128>) -> bool {
    let mut det = a.vel[0] * b.vel[1] - a.vel[1] * b.vel[0];
    if det == 0 {return false}
    let d = sub(b.pos, a.pos);
    let mut t = d[0] * b.vel[1] - d[1] * b.vel[0];
    let mut s = d[0] * a.vel[1] - d[1] * a.vel[0];
    if det < 0 {(det, t, s) = (-det, -t, -s)}
    if t < 0 || s < 0 {return false}
    // crossing at a.pos + a.vel * t / det, compared without dividing
    (0..2).all(|i| {
        let scaled = a.pos[i] * det + a.vel[i] * t;
        *area.start() * det <= scaled && scaled <= *area.end() * det
    })
}

fn crossings(hail: &[Hailstone], area: RangeInclusive<i128>) -> usize {
    pairs(hail).filter(|(a, b)| paths_cross(a, b, &area)).count()
}

/// Works in the frame of `origin`, where the rock has to pass through the
/// origin. The rock's line then lies in the plane spanned by `plane`'s path,
/// and the times `a` and `b` pierce that plane fix its velocity.
fn throw_from(origin: &Hailstone, plane: &Hailstone, a: &Hailstone, b: &Hailstone) -> Option<Hailstone> {
    let rel = |h: &Hailstone| (sub(h.pos, origin.pos), sub(h.vel, origin.vel));
    let (p1, v1) = rel(plane);
    let normal = cross(p1, v1);
    if normal == [0; 3] {return None}
    let hit = |(p, v): (V3, V3)| {
        let t = exact_div(-dot(p, normal), dot(v, normal))?;
        Some((t, add(p, scale(v, t))))
    };
    let (ta, ca) = hit(rel(a))?;
    let (tb, cb) = hit(rel(b))?;
    let dt = ta - tb;
    let delta = sub(ca, cb);
    let vel = [exact_div(delta[0], dt)?, exact_div(delta[1], dt)?, exact_div(delta[2], dt)?];
    let pos = sub(ca, scale(vel, ta));
    Some(Hailstone { pos: add(pos, origin.pos), vel: add(vel, origin.vel) })
}

/// The rock and `h` meet iff their relative motion is along their offset.
fn collides(rock: &Hailstone, h: &Hailstone) -> bool {
    cross(sub(rock.pos, h.pos), sub(rock.vel, h.vel)) == [0; 3]
}

impl Day for NeverTellMeTheOdds {
    const NUMBER: u8 = 24;
    const NAME: &'static str = "Never Tell Me The Odds";
    type Input = Vec<Hailstone>;
    type Answer = i128;

    fn parse(raw: &str) -> anyhow::Result<Vec<Hailstone>> {
        raw.lines().filter(|l| !l.trim().is_empty()).map(|line| -> anyhow::Result<Hailstone> {
            let nums: Vec<i128> = line.split(|c: char| c == ',' || c == '@')
                .map(|n| n.trim().parse())
                .collect::<Result<_, _>>()?;
            let [px, py, pz, vx, vy, vz] = nums[..] else {bail!("expected 6 numbers in {line:?}")};
            Ok(Hailstone { pos: [px, py, pz], vel: [vx, vy, vz] })
        }).collect()
    }

    fn part1(input: &Vec<Hailstone>) -> anyhow::Result<i128> {
        Ok(crossings(input, TEST_AREA) as i128)
    }

    fn part2(input: &Vec<Hailstone>) -> anyhow::Result<i128> {
        ensure!(input.len() >= 4, "need at least four hailstones");
        let rock = (0..input.len().min(8))
            .tuple_combinations::<(_, _, _, _)>()
            .filter_map(|(o, p, a, b)| throw_from(&input[o], &input[p], &input[a], &input[b]))
            .find(|rock| input.iter().all(|h| collides(rock, h)))
            .ok_or_else(|| anyhow!("no throw hits every hailstone"))?;
        Ok(rock.pos.iter().sum())
    }
}

use anyhow::{bail, Context};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rustc_hash::FxHashMap;

use super::Day;

pub struct Snowverload;

const CUT_SIZE: usize = 3;
const MAX_TRIALS: u64 = 10_000;

#[derive(Debug)]
pub struct Wiring {
    nodes: usize,
    edges: Vec<(usize, usize)>,
}

struct DisjointSet {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl DisjointSet {
    fn new(n: usize) -> Self {
        Self { parent: (0..n).collect(), size: vec![1; n] }
    }

    fn root(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// False if `a` and `b` were already joined.
    fn union(&mut self, a: usize, b: usize) -> bool {
        let (a, b) = (self.root(a), self.root(b));
        if a == b {return false}
        let (big, small) = if self.size[a] >= self.size[b] {(a, b)} else {(b, a)};
        self.parent[small] = big;
        self.size[big] += self.size[small];
        true
    }
}

/// One round of Karger's contraction: merge along randomly ordered edges
/// until two groups remain. Returns the cut size and the group sizes.
fn contract(wiring: &Wiring, rng: &mut SmallRng) -> (usize, [usize; 2]) {
    let mut order = wiring.edges.clone();
    order.shuffle(rng);
    let mut groups = DisjointSet::new(wiring.nodes);
    let mut remaining = wiring.nodes;
    for &(a, b) in &order {
        if remaining == 2 {break}
        if groups.union(a, b) {remaining -= 1}
    }
    let cut = wiring.edges.iter().filter(|&&(a, b)| groups.root(a) != groups.root(b)).count();
    let first = groups.root(0);
    let first_size = groups.size[first];
    (cut, [first_size, wiring.nodes - first_size])
}

impl Day for Snowverload {
    const NUMBER: u8 = 25;
    const NAME: &'static str = "Snowverload";
    type Input = Wiring;
    type Answer = usize;

    fn parse(raw: &str) -> anyhow::Result<Wiring> {
        let mut ids: FxHashMap<&str, usize> = FxHashMap::default();
        let mut edges = vec![];
        for line in raw.lines().filter(|l| !l.trim().is_empty()) {
            let (from, to) = line.split_once(':').with_context(|| format!("no ':' in {line:?}"))?;
            let next = ids.len();
            let from = *ids.entry(from.trim()).or_insert(next);
            for name in to.split_whitespace() {
                let next = ids.len();
                edges.push((from, *ids.entry(name).or_insert(next)));
            }
        }
        if ids.len() < 2 {bail!("need at least two components")}
        Ok(Wiring { nodes: ids.len(), edges })
    }

    fn part1(input: &Wiring) -> anyhow::Result<usize> {
        for trial in 0..MAX_TRIALS {
            let mut rng = SmallRng::seed_from_u64(trial);
            let (cut, [a, b]) = contract(input, &mut rng);
            if cut == CUT_SIZE {
                tracing::debug!(trial, a, b, "found the three wires");
                return Ok(a * b);
            }
        }
        bail!("no cut of {CUT_SIZE} wires after {MAX_TRIALS} trials")
    }

    /// There is no second puzzle on the last day.
    fn part2(_input: &Wiring) -> anyhow::Result<usize> {
        Ok(0)
    }
}

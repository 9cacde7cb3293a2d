use std::collections::VecDeque;

use anyhow::{bail, Context};
use rustc_hash::FxHashMap;

use super::Day;
use crate::util::lcm_iter;

pub struct PulsePropagation;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Kind {
    Broadcast,
    FlipFlop,
    Conjunction,
    /// Named only as a destination.
    Sink,
}

#[derive(Clone, Debug)]
struct Module {
    kind: Kind,
    outputs: Vec<usize>,
    inputs: Vec<usize>,
}

#[derive(Debug)]
pub struct Circuit {
    names: Vec<String>,
    modules: Vec<Module>,
    broadcaster: usize,
}

/// Mutable state of every module: flip-flop on/off, last pulse seen per conjunction input.
struct State {
    on: Vec<bool>,
    memory: Vec<Vec<bool>>,
}

impl Circuit {
    fn id(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    fn fresh_state(&self) -> State {
        State {
            on: vec![false; self.modules.len()],
            memory: self.modules.iter().map(|m| vec![false; m.inputs.len()]).collect(),
        }
    }

    /// Pushes the button once; `on_pulse(from, to, high)` sees every pulse sent.
    fn press(&self, state: &mut State, mut on_pulse: impl FnMut(usize, usize, bool)) {
        let mut queue = VecDeque::from([(usize::MAX, self.broadcaster, false)]);
        while let Some((from, to, high)) = queue.pop_front() {
            on_pulse(from, to, high);
            let module = &self.modules[to];
            let out = match module.kind {
                Kind::Broadcast => high,
                Kind::Sink => continue,
                Kind::FlipFlop => {
                    if high {continue}
                    state.on[to] = !state.on[to];
                    state.on[to]
                }
                Kind::Conjunction => {
                    if let Some(slot) = module.inputs.iter().position(|&i| i == from) {
                        state.memory[to][slot] = high;
                    }
                    !state.memory[to].iter().all(|&h| h)
                }
            };
            queue.extend(module.outputs.iter().map(|&next| (to, next, out)));
        }
    }
}

impl Day for PulsePropagation {
    const NUMBER: u8 = 20;
    const NAME: &'static str = "Pulse Propagation";
    type Input = Circuit;
    type Answer = u64;

    fn parse(raw: &str) -> anyhow::Result<Circuit> {
        let mut names: Vec<String> = vec![];
        let mut ids: FxHashMap<String, usize> = FxHashMap::default();
        let mut intern = |name: &str, names: &mut Vec<String>| {
            *ids.entry(name.to_owned()).or_insert_with(|| {
                names.push(name.to_owned());
                names.len() - 1
            })
        };

        let mut declared = vec![];
        for line in raw.lines().filter(|l| !l.trim().is_empty()) {
            let (lhs, rhs) = line.split_once("->").with_context(|| format!("no arrow in {line:?}"))?;
            let lhs = lhs.trim();
            let (kind, name) = match lhs.as_bytes().first() {
                Some(b'%') => (Kind::FlipFlop, &lhs[1..]),
                Some(b'&') => (Kind::Conjunction, &lhs[1..]),
                _ if lhs == "broadcaster" => (Kind::Broadcast, lhs),
                _ => bail!("unknown module {lhs:?}"),
            };
            let id = intern(name, &mut names);
            let outputs = rhs.split(',').map(|o| intern(o.trim(), &mut names)).collect::<Vec<_>>();
            declared.push((id, kind, outputs));
        }

        let mut modules = vec![Module { kind: Kind::Sink, outputs: vec![], inputs: vec![] }; names.len()];
        for (id, kind, outputs) in declared {
            if modules[id].kind != Kind::Sink {bail!("module {} declared twice", names[id])}
            modules[id].kind = kind;
            for &o in &outputs {modules[o].inputs.push(id)}
            modules[id].outputs = outputs;
        }
        let broadcaster = names.iter().position(|n| n == "broadcaster").context("no broadcaster")?;
        Ok(Circuit { names, modules, broadcaster })
    }

    fn part1(input: &Circuit) -> anyhow::Result<u64> {
        let mut state = input.fresh_state();
        let mut counts = [0u64; 2];
        for _ in 0..1000 {
            input.press(&mut state, |_, _, high| counts[high as usize] += 1);
        }
        Ok(counts[0] * counts[1])
    }

    /// `rx` is fed by a single conjunction whose inputs each fire high on a
    /// fixed period; the answer is where all periods line up.
    fn part2(input: &Circuit) -> anyhow::Result<u64> {
        let rx = input.id("rx").context("circuit has no rx module")?;
        let [hub] = input.modules[rx].inputs[..] else {bail!("rx must have exactly one input")};
        if input.modules[hub].kind != Kind::Conjunction {bail!("rx is not fed by a conjunction")}
        let feeders = &input.modules[hub].inputs;

        let mut periods: Vec<Option<u64>> = vec![None; feeders.len()];
        let mut state = input.fresh_state();
        for presses in 1..=1_000_000u64 {
            input.press(&mut state, |from, to, high| {
                if to == hub && high {
                    if let Some(i) = feeders.iter().position(|&f| f == from) {
                        periods[i].get_or_insert(presses);
                    }
                }
            });
            if periods.iter().all(Option::is_some) {
                let lcm = lcm_iter(periods.iter().flatten().map(|&p| p as i64)).context("no feeders")?;
                return Ok(lcm as u64);
            }
        }
        bail!("feeder periods did not show up")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example() {
        let simple = PulsePropagation::parse("broadcaster -> a, b, c\n%a -> b\n%b -> c\n%c -> inv\n&inv -> a\n").unwrap();
        assert_eq!(PulsePropagation::part1(&simple).unwrap(), 32000000);

        let looped = PulsePropagation::parse("broadcaster -> a\n%a -> inv, con\n&inv -> b\n%b -> con\n&con -> output\n").unwrap();
        assert_eq!(PulsePropagation::part1(&looped).unwrap(), 11687500);
        assert!(PulsePropagation::part2(&looped).is_err());
    }

    #[test]
    fn periods_line_up() {
        // feeders fire high every 2, 4 and 2 presses
        let circuit = PulsePropagation::parse(
            "broadcaster -> a, c\n%a -> b, ha\n%b -> hb\n&ha -> hub\n&hb -> hub\n%c -> hc\n&hc -> hub\n&hub -> rx\n",
        )
        .unwrap();
        assert_eq!(PulsePropagation::part2(&circuit).unwrap(), 4);
    }
}

use std::ops::Range;

use anyhow::{anyhow, bail, Context};
use regex::Regex;
use rustc_hash::FxHashMap;

use super::Day;

pub struct Aplenty;

/// Ratings in x, m, a, s order.
type Part = [u64; 4];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Target {
    Accept,
    Reject,
    Workflow(usize),
}

#[derive(Clone, Copy, Debug)]
struct Rule {
    /// `None` for the trailing catch-all.
    test: Option<(usize, bool, u64)>,
    target: Target,
}

impl Rule {
    fn matches(&self, part: &Part) -> bool {
        match self.test {
            None => true,
            Some((cat, true, v)) => part[cat] < v,
            Some((cat, false, v)) => part[cat] > v,
        }
    }
}

#[derive(Debug)]
pub struct System {
    workflows: Vec<Vec<Rule>>,
    start: usize,
    parts: Vec<Part>,
}

impl System {
    fn accepts(&self, part: &Part) -> anyhow::Result<bool> {
        let mut wf = self.start;
        for _ in 0..=self.workflows.len() {
            let rule = self.workflows[wf].iter().find(|r| r.matches(part)).context("no rule matched")?;
            match rule.target {
                Target::Accept => return Ok(true),
                Target::Reject => return Ok(false),
                Target::Workflow(next) => wf = next,
            }
        }
        bail!("workflows loop on {part:?}")
    }

    /// Number of rating combinations in `ranges` that end up accepted.
    fn count_accepted(&self, wf: usize, mut ranges: [Range<u64>; 4], depth: usize) -> anyhow::Result<u64> {
        if depth > self.workflows.len() {bail!("workflows loop")}
        let mut total = 0;
        for rule in &self.workflows[wf] {
            let mut taken = ranges.clone();
            if let Some((cat, less, v)) = rule.test {
                let r = &ranges[cat];
                let (pass, fail) = if less {
                    (r.start..v.clamp(r.start, r.end), v.clamp(r.start, r.end)..r.end)
                } else {
                    ((v + 1).clamp(r.start, r.end)..r.end, r.start..(v + 1).clamp(r.start, r.end))
                };
                taken[cat] = pass;
                ranges[cat] = fail;
            }
            if taken.iter().all(|r| !r.is_empty()) {
                total += match rule.target {
                    Target::Accept => taken.iter().map(|r| r.end - r.start).product::<u64>(),
                    Target::Reject => 0,
                    Target::Workflow(next) => self.count_accepted(next, taken, depth + 1)?,
                };
            }
            if rule.test.is_none() || ranges.iter().any(|r| r.is_empty()) {break}
        }
        Ok(total)
    }
}

impl Day for Aplenty {
    const NUMBER: u8 = 19;
    const NAME: &'static str = "Aplenty";
    type Input = System;
    type Answer = u64;

    fn parse(raw: &str) -> anyhow::Result<System> {
        let raw = raw.replace("\r\n", "\n");
        let (flows, parts) = raw.split_once("\n\n").context("expected workflows, a blank line, then parts")?;
        let flow_re = Regex::new(r"^([a-z]+)\{(.*)\}$")?;
        let test_re = Regex::new(r"^([xmas])([<>])(\d+):([a-zAR]+)$")?;
        let part_re = Regex::new(r"^\{x=(\d+),m=(\d+),a=(\d+),s=(\d+)\}$")?;

        let flows = flows.lines().map(|line| {
            flow_re.captures(line.trim()).map(|c| (c.get(1).map_or("", |m| m.as_str()), c.get(2).map_or("", |m| m.as_str())))
                .ok_or_else(|| anyhow!("bad workflow {line:?}"))
        }).collect::<anyhow::Result<Vec<_>>>()?;
        let ids: FxHashMap<&str, usize> = flows.iter().enumerate().map(|(i, &(name, _))| (name, i)).collect();
        let target = |name: &str| match name {
            "A" => Ok(Target::Accept),
            "R" => Ok(Target::Reject),
            _ => ids.get(name).map(|&i| Target::Workflow(i)).ok_or_else(|| anyhow!("unknown workflow {name}")),
        };

        let workflows = flows.iter().map(|&(_, rules)| {
            rules.split(',').map(|rule| -> anyhow::Result<Rule> {
                let Some(c) = test_re.captures(rule) else {
                    return Ok(Rule { test: None, target: target(rule)? });
                };
                let cat = "xmas".find(&c[1]).context("category")?;
                Ok(Rule { test: Some((cat, &c[2] == "<", c[3].parse()?)), target: target(&c[4])? })
            }).collect::<anyhow::Result<Vec<_>>>()
        }).collect::<anyhow::Result<Vec<_>>>()?;

        let parts = parts.lines().filter(|l| !l.trim().is_empty()).map(|line| -> anyhow::Result<Part> {
            let c = part_re.captures(line.trim()).ok_or_else(|| anyhow!("bad part {line:?}"))?;
            Ok([c[1].parse()?, c[2].parse()?, c[3].parse()?, c[4].parse()?])
        }).collect::<anyhow::Result<_>>()?;

        let start = *ids.get("in").context("no 'in' workflow")?;
        Ok(System { workflows, start, parts })
    }

    fn part1(input: &System) -> anyhow::Result<u64> {
        let mut sum = 0;
        for part in &input.parts {
            if input.accepts(part)? {sum += part.iter().sum::<u64>()}
        }
        Ok(sum)
    }

    fn part2(input: &System) -> anyhow::Result<u64> {
        input.count_accepted(input.start, std::array::from_fn(|_| 1..4001), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "px{a<2006:qkq,m>2090:A,rfg}
pv{a>1716:R,A}
lnx{m>1548:A,A}
rfg{s<537:gd,x>2440:R,A}
qs{s>3448:A,lnx}
qkq{x<1416:A,crn}
crn{x>2662:A,R}
in{s<1351:px,qqz}
qqz{s>2770:qs,m<1801:hdj,R}
gd{a>3333:R,R}
hdj{m>838:A,pv}

{x=787,m=2655,a=1222,s=2876}
{x=1679,m=44,a=2067,s=496}
{x=2036,m=264,a=79,s=2244}
{x=2461,m=1339,a=466,s=291}
{x=2127,m=1623,a=2188,s=1013}";

    #[test]
    fn example() {
        let input = Aplenty::parse(EXAMPLE).unwrap();
        assert_eq!(Aplenty::part1(&input).unwrap(), 19114);
        assert_eq!(Aplenty::part2(&input).unwrap(), 167409079868000);
    }

    #[test]
    fn unknown_target_is_rejected() {
        assert!(Aplenty::parse("in{x<5:nowhere,A}\n\n{x=1,m=1,a=1,s=1}").is_err());
    }
}

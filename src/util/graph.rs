use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::hash::Hash;

use rustc_hash::FxHashMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeAndCost<N> {
    pub node: N,
    pub cost: i64,
}

/// Cheapest path from `start` to the first node accepted by `is_goal`.
/// Edge costs must be non-negative.
pub fn dijkstra<N, I>(
    start: N,
    is_goal: impl Fn(&N) -> bool,
    mut neighbours: impl FnMut(&N) -> I,
) -> Option<NodeAndCost<N>>
where
    N: Copy + Eq + Hash + Ord,
    I: IntoIterator<Item = NodeAndCost<N>>,
{
    let mut best: FxHashMap<N, i64> = FxHashMap::default();
    let mut opens = BinaryHeap::new();
    best.insert(start, 0);
    opens.push(Reverse((0, start)));

    while let Some(Reverse((cost, node))) = opens.pop() {
        if is_goal(&node) {
            return Some(NodeAndCost { node, cost });
        }
        if best.get(&node).is_some_and(|&c| c < cost) {continue}
        for next in neighbours(&node) {
            let next_cost = cost + next.cost;
            if best.get(&next.node).map_or(true, |&c| next_cost < c) {
                best.insert(next.node, next_cost);
                opens.push(Reverse((next_cost, next.node)));
            }
        }
    }
    None
}

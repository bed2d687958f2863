//! Budgeted breadth-first search over the playable grid.
//! One search serves both reachability (no target) and firing-position lookup
//! (target plus arrival tolerance). Neighbours are expanded up, down, right,
//! left; ties between equally short paths resolve in that order.

use std::collections::{BTreeMap, BTreeSet, VecDeque};

use super::*;
use crate::grid::Grid;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchTarget {
    pub pos: Pos,
    /// Arrival succeeds once the Manhattan distance to `pos` is at most this.
    pub tolerance: u32,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchOutcome {
    /// Cells dequeued so far, excluding the start, in BFS order.
    pub reachable: Vec<Pos>,
    /// Steps from the start (exclusive) to the last dequeued cell (inclusive).
    pub path: Vec<Pos>,
    /// `true` only when a target was given and reached.
    pub reached: bool,
}

/// Breadth-first search from `start`. `budget` of `None` means unlimited.
/// A cell at zero remaining budget is still reachable but is not expanded.
pub fn search(
    grid: &Grid,
    occupied: &BTreeSet<Pos>,
    start: Pos,
    budget: Option<u32>,
    target: Option<SearchTarget>,
) -> SearchOutcome {
    let mut queue = VecDeque::from([(start, budget)]);
    let mut seen = BTreeSet::from([start]);
    let mut came_from: BTreeMap<Pos, Pos> = BTreeMap::new();
    let mut reachable = Vec::new();
    let mut last = start;

    while let Some((current, remaining)) = queue.pop_front() {
        last = current;
        if current != start {
            reachable.push(current);
        }

        if let Some(target) = target
            && current.manhattan(target.pos) <= target.tolerance
        {
            let path = reconstruct_path(&came_from, start, current);
            return SearchOutcome { reachable, path, reached: true };
        }

        if remaining == Some(0) {
            continue;
        }
        let next_remaining = remaining.map(|left| left - 1);

        for neighbor in current.neighbors() {
            if !grid.in_grid(neighbor) || occupied.contains(&neighbor) || !seen.insert(neighbor) {
                continue;
            }
            came_from.insert(neighbor, current);
            queue.push_back((neighbor, next_remaining));
        }
    }

    let path = reconstruct_path(&came_from, start, last);
    SearchOutcome { reachable, path, reached: false }
}

/// Unbudgeted shortest path to exactly `goal`.
pub fn shortest_path(
    grid: &Grid,
    occupied: &BTreeSet<Pos>,
    start: Pos,
    goal: Pos,
) -> Option<Vec<Pos>> {
    let target = SearchTarget { pos: goal, tolerance: 0 };
    let outcome = search(grid, occupied, start, None, Some(target));
    outcome.reached.then_some(outcome.path)
}

/// Search from the unit's head with its remaining movement this turn.
pub fn unit_movement(
    grid: &Grid,
    occupied: &BTreeSet<Pos>,
    unit: &Unit,
    target: Option<SearchTarget>,
) -> SearchOutcome {
    search(grid, occupied, unit.head(), Some(unit.moves_left()), target)
}

fn reconstruct_path(came_from: &BTreeMap<Pos, Pos>, start: Pos, end: Pos) -> Vec<Pos> {
    let mut path = Vec::new();
    let mut current = end;
    while current != start {
        path.push(current);
        current = *came_from.get(&current).expect("every expanded cell has a parent");
    }
    path.reverse();
    path
}

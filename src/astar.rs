//! A* route finding over a grid's passages.
//!
//! Unit edge costs and the Manhattan heuristic, which never overestimates on
//! a 4-connected lattice, so the first settled visit to the goal is optimal.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::cells::GridCoordinate;
use crate::grid::{IndexType, RectGrid};
use crate::utils;

/// Open set entry, ordered for a min-heap on `(f_score, insertion_order)`.
///
/// `insertion_order` is a monotone counter: among entries with equal f score
/// the earliest inserted pops first, so expansion order is deterministic and
/// independent of coordinate hash order.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
struct OpenSetEntry {
    f_score: u32,
    insertion_order: u64,
    coordinate: GridCoordinate,
}

impl Ord for OpenSetEntry {
    fn cmp(&self, other: &OpenSetEntry) -> Ordering {
        // Reversed: std's BinaryHeap is a max-heap and we want the smallest
        // f score at the top.
        other.f_score
            .cmp(&self.f_score)
            .then_with(|| other.insertion_order.cmp(&self.insertion_order))
    }
}

impl PartialOrd for OpenSetEntry {
    fn partial_cmp(&self, other: &OpenSetEntry) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Shortest route from `start` to `goal` through the carved passages.
///
/// The returned path includes both endpoints. An empty vector means no route:
/// an endpoint off the grid, or the open set drained without reaching the
/// goal. `start == goal` is the single-cell path.
pub fn solve<GridIndexType: IndexType>(grid: &RectGrid<GridIndexType>,
                                       start: GridCoordinate,
                                       goal: GridCoordinate)
                                       -> Vec<GridCoordinate> {
    if !grid.is_valid_coordinate(start) || !grid.is_valid_coordinate(goal) {
        return Vec::new();
    }
    if start == goal {
        return vec![start];
    }

    let cells_count = grid.size();
    // Missing map entries stand for an infinite score.
    let mut g_score = utils::fnv_hashmap(cells_count);
    let mut f_score = utils::fnv_hashmap(cells_count);
    let mut came_from = utils::fnv_hashmap(cells_count);

    g_score.insert(start, 0u32);
    let start_f = start.manhattan_distance(goal);
    f_score.insert(start, start_f);

    let mut insertion_counter: u64 = 0;
    let mut open_set = BinaryHeap::new();
    open_set.push(OpenSetEntry {
        f_score: start_f,
        insertion_order: insertion_counter,
        coordinate: start,
    });

    while let Some(entry) = open_set.pop() {

        let current = entry.coordinate;
        if current == goal {
            return reconstruct_path(&came_from, goal);
        }

        // Superseded by a cheaper rediscovery that was pushed later.
        let best_known_f = *f_score.get(&current).expect("queued cells always have an f score");
        if entry.f_score > best_known_f {
            continue;
        }

        let current_g = *g_score.get(&current).expect("queued cells always have a g score");
        let links = grid.links(current).expect("queued cells are always on the grid");
        for neighbour in &*links {

            let tentative_g = current_g + 1;
            let known_g = g_score.get(neighbour).cloned();
            if known_g.map_or(true, |g| tentative_g < g) {

                came_from.insert(*neighbour, current);
                g_score.insert(*neighbour, tentative_g);
                let neighbour_f = tentative_g + neighbour.manhattan_distance(goal);
                f_score.insert(*neighbour, neighbour_f);

                insertion_counter += 1;
                open_set.push(OpenSetEntry {
                    f_score: neighbour_f,
                    insertion_order: insertion_counter,
                    coordinate: *neighbour,
                });
            }
        }
    }

    Vec::new()
}

fn reconstruct_path(came_from: &utils::FnvHashMap<GridCoordinate, GridCoordinate>,
                    goal: GridCoordinate)
                    -> Vec<GridCoordinate> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&previous) = came_from.get(&current) {
        current = previous;
        path.push(current);
    }
    path.reverse();
    path
}

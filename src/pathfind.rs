//! Breadth-first shortest paths over the maze grid

use std::collections::{HashMap, HashSet, VecDeque};

use crate::maze::{Grid, Position};

/// Neighbour offsets in expansion order: right, left, down, up.
///
/// The order is fixed so ties between equally short paths resolve the same way
/// on every run.
pub const NEIGHBOR_OFFSETS: [Position; 4] = [
    Position::new(1, 0),
    Position::new(-1, 0),
    Position::new(0, 1),
    Position::new(0, -1),
];

/// Walkable 4-neighbours of `pos`, in expansion order.
pub fn walkable_neighbors(grid: &Grid, pos: Position) -> impl Iterator<Item = Position> + '_ {
    NEIGHBOR_OFFSETS
        .iter()
        .map(move |&offset| pos + offset)
        .filter(move |&p| grid.is_walkable(p))
}

/// Find the shortest walkable path from `start` to `goal`.
///
/// The returned path starts at `start`, ends at `goal`, and each position is
/// 4-adjacent to the next. When `start == goal`, or when `goal` cannot be
/// reached, the result is `[start]`.
pub fn shortest_path(grid: &Grid, start: Position, goal: Position) -> Vec<Position> {
    if start == goal {
        return vec![start];
    }

    let mut queue = VecDeque::from([start]);
    let mut visited = HashSet::from([start]);
    let mut previous: HashMap<Position, Position> = HashMap::new();

    'search: while let Some(current) = queue.pop_front() {
        for next in walkable_neighbors(grid, current) {
            if !visited.insert(next) {
                continue;
            }
            previous.insert(next, current);
            if next == goal {
                break 'search;
            }
            queue.push_back(next);
        }
    }

    if !previous.contains_key(&goal) {
        return vec![start];
    }

    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        current = previous[&current];
        path.push(current);
    }
    path.reverse();
    path
}

use bit_set::BitSet;
use smallvec::SmallVec;

use crate::grid::{GridPosition, TileGrid};
use crate::utils;
use crate::utils::FnvHashMap;

type PositionSmallVec = SmallVec<[GridPosition; 4]>;

/// Flood-fill distances from a walkable start tile to every other walkable
/// tile it can reach through 4-adjacent steps.
///
/// Every link costs one step, so a cell's distance is final the first time
/// the frontier touches it; the distance map doubles as the visited set.
#[derive(Debug, Clone)]
pub struct Distances {
    start: GridPosition,
    distances: FnvHashMap<GridPosition, u32>,
    max_distance: u32,
}

impl Distances {
    /// Returns `None` when `start` is outside the grid or not walkable.
    pub fn new(grid: &TileGrid, start: GridPosition) -> Option<Distances> {
        if !grid.get(start).map_or(false, |tile| tile.is_walkable()) {
            return None;
        }

        let mut distances = utils::fnv_hashmap(grid.size());
        distances.insert(start, 0);
        let mut max = 0;

        let mut frontier = vec![start];
        while !frontier.is_empty() {
            let mut new_frontier = vec![];
            for pos in &frontier {
                let distance_here = distances[pos];

                for neighbour in walkable_neighbours(grid, *pos) {
                    if !distances.contains_key(&neighbour) {
                        let next_distance = distance_here + 1;
                        distances.insert(neighbour, next_distance);
                        if next_distance > max {
                            max = next_distance;
                        }
                        new_frontier.push(neighbour);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start: start,
            distances: distances,
            max_distance: max,
        })
    }

    #[inline(always)]
    pub fn start(&self) -> GridPosition {
        self.start
    }

    #[inline(always)]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_to(&self, pos: GridPosition) -> Option<u32> {
        self.distances.get(&pos).cloned()
    }

    /// Number of walkable tiles reachable from the start, start included.
    pub fn reachable_count(&self) -> usize {
        self.distances.len()
    }
}

/// Row-major indices of every walkable tile reachable from `start`.
/// Empty when the start itself is not walkable.
pub fn reachable_tiles(grid: &TileGrid, start: GridPosition) -> BitSet {
    let mut visited = BitSet::with_capacity(grid.size());
    if !grid.get(start).map_or(false, |tile| tile.is_walkable()) {
        return visited;
    }

    let width = grid.width().0;
    visited.insert(start.y * width + start.x);
    let mut frontier = vec![start];
    while let Some(pos) = frontier.pop() {
        for neighbour in walkable_neighbours(grid, pos) {
            if visited.insert(neighbour.y * width + neighbour.x) {
                frontier.push(neighbour);
            }
        }
    }
    visited
}

fn walkable_neighbours(grid: &TileGrid, pos: GridPosition) -> PositionSmallVec {
    let mut candidates = PositionSmallVec::new();
    if pos.y > 0 {
        candidates.push(GridPosition::new(pos.x, pos.y - 1));
    }
    if pos.x > 0 {
        candidates.push(GridPosition::new(pos.x - 1, pos.y));
    }
    candidates.push(GridPosition::new(pos.x + 1, pos.y));
    candidates.push(GridPosition::new(pos.x, pos.y + 1));

    candidates
        .into_iter()
        .filter(|&candidate| grid.get(candidate).map_or(false, |tile| tile.is_walkable()))
        .collect()
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::tiles::Tile;
    use crate::units::{Height, Width};

    // ####.
    // #...#
    // #.#H#
    fn corridor_grid() -> TileGrid {
        let mut grid = TileGrid::new(Width(5), Height(3)).unwrap();
        let open = [(4, 0), (1, 1), (2, 1), (3, 1), (1, 2)];
        for &(x, y) in &open {
            grid.set(GridPosition::new(x, y), Tile::Path);
        }
        grid.set(GridPosition::new(3, 2), Tile::Goal);
        grid
    }

    #[test]
    fn construction_requires_a_walkable_start() {
        let grid = corridor_grid();
        assert!(Distances::new(&grid, GridPosition::new(0, 0)).is_none());
        assert!(Distances::new(&grid, GridPosition::new(9, 9)).is_none());
        assert!(Distances::new(&grid, GridPosition::new(1, 1)).is_some());
    }

    #[test]
    fn step_counts_follow_the_corridor() {
        let grid = corridor_grid();
        let distances = Distances::new(&grid, GridPosition::new(1, 1)).unwrap();

        assert_eq!(distances.start(), GridPosition::new(1, 1));
        assert_eq!(distances.distance_to(GridPosition::new(1, 1)), Some(0));
        assert_eq!(distances.distance_to(GridPosition::new(2, 1)), Some(1));
        assert_eq!(distances.distance_to(GridPosition::new(1, 2)), Some(1));
        assert_eq!(distances.distance_to(GridPosition::new(3, 1)), Some(2));
        // goal tiles are walkable too
        assert_eq!(distances.distance_to(GridPosition::new(3, 2)), Some(3));
        assert_eq!(distances.max(), 3);
        assert_eq!(distances.reachable_count(), 5);
    }

    #[test]
    fn walls_are_never_assigned_distances() {
        let grid = corridor_grid();
        let distances = Distances::new(&grid, GridPosition::new(1, 1)).unwrap();
        assert_eq!(distances.distance_to(GridPosition::new(0, 0)), None);
        assert_eq!(distances.distance_to(GridPosition::new(2, 2)), None);
    }

    #[test]
    fn reachability_is_cut_by_diagonal_gaps() {
        // (4, 0) touches the corridor only diagonally, so it is isolated
        let grid = corridor_grid();
        let distances = Distances::new(&grid, GridPosition::new(1, 1)).unwrap();
        assert_eq!(distances.distance_to(GridPosition::new(4, 0)), None);

        let from_isolated = reachable_tiles(&grid, GridPosition::new(4, 0));
        assert_eq!(from_isolated.len(), 1);
    }

    #[test]
    fn reachable_set_matches_distance_coverage() {
        let grid = corridor_grid();
        let start = GridPosition::new(1, 1);
        let distances = Distances::new(&grid, start).unwrap();
        let reached = reachable_tiles(&grid, start);

        assert_eq!(reached.len(), distances.reachable_count());
        for y in 0..3 {
            for x in 0..5 {
                let pos = GridPosition::new(x, y);
                assert_eq!(reached.contains(y * 5 + x),
                           distances.distance_to(pos).is_some(),
                           "mismatch at {:?}",
                           pos);
            }
        }
    }

    #[test]
    fn unwalkable_start_reaches_nothing() {
        let grid = corridor_grid();
        assert!(reachable_tiles(&grid, GridPosition::new(0, 0)).is_empty());
    }
}

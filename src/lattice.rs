use crate::grid::{GenerationError, GridPosition};
use crate::units::{CellsCount, EdgesCount, Height, Width};

/// A cell of the maze lattice.
///
/// Cell (x, y) is centred on grid position (2x+1, 2y+1); the tiles between
/// neighbouring centres are the walls the carver may open.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct CellCoordinate {
    pub x: u32,
    pub y: u32,
}
impl CellCoordinate {
    pub fn new(x: u32, y: u32) -> CellCoordinate {
        CellCoordinate { x: x, y: y }
    }
}

/// An unordered pair of laterally adjacent cells, separated by one wall tile.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellEdge {
    pub a: CellCoordinate,
    pub b: CellCoordinate,
}

/// The logical cell space a tile grid can hold: (width-1)/2 by (height-1)/2
/// cells once the border and the walls between cells are accounted for.
#[derive(Debug, Copy, Clone)]
pub struct CellLattice {
    cell_width: usize,
    cell_height: usize,
}

impl CellLattice {
    /// Derive the lattice for a grid of the given dimensions.
    ///
    /// A grid without room for at least one cell in each direction cannot be
    /// carved at all and is rejected as `UnsupportedGridSize`.
    pub fn new(width: Width, height: Height) -> Result<CellLattice, GenerationError> {
        let cell_width = width.0.saturating_sub(1) / 2;
        let cell_height = height.0.saturating_sub(1) / 2;
        if cell_width == 0 || cell_height == 0 {
            return Err(GenerationError::UnsupportedGridSize);
        }
        Ok(CellLattice {
            cell_width: cell_width,
            cell_height: cell_height,
        })
    }

    #[inline]
    pub fn cell_width(&self) -> usize {
        self.cell_width
    }

    #[inline]
    pub fn cell_height(&self) -> usize {
        self.cell_height
    }

    #[inline]
    pub fn cells(&self) -> CellsCount {
        CellsCount(self.cell_width * self.cell_height)
    }

    /// How many lateral neighbour pairs the lattice has.
    pub fn edge_count(&self) -> EdgesCount {
        let horizontal = (self.cell_width - 1) * self.cell_height;
        let vertical = self.cell_width * (self.cell_height - 1);
        EdgesCount(horizontal + vertical)
    }

    /// Row-major index of a cell, usable as a disjoint-set element id.
    #[inline]
    pub fn index_of(&self, cell: CellCoordinate) -> usize {
        cell.y as usize * self.cell_width + cell.x as usize
    }

    #[inline]
    pub fn cell_from_index(&self, index: usize) -> CellCoordinate {
        let y = index / self.cell_width;
        let x = index - y * self.cell_width;
        CellCoordinate::new(x as u32, y as u32)
    }

    /// Grid position of the cell's centre tile.
    #[inline]
    pub fn centre_position(&self, cell: CellCoordinate) -> GridPosition {
        GridPosition::new(2 * cell.x as usize + 1, 2 * cell.y as usize + 1)
    }

    /// The cell whose centre tile becomes the goal candidate.
    pub fn centre_cell(&self) -> CellCoordinate {
        CellCoordinate::new((self.cell_width / 2) as u32, (self.cell_height / 2) as u32)
    }

    /// Grid position of the wall tile between two laterally adjacent cells.
    pub fn wall_between(&self, a: CellCoordinate, b: CellCoordinate) -> GridPosition {
        GridPosition::new((a.x + b.x + 1) as usize, (a.y + b.y + 1) as usize)
    }

    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            cell_width: self.cell_width,
            cells_count: self.cells().0,
        }
    }

    /// Every lateral neighbour pair, enumerated once: each cell contributes
    /// its east and south neighbour only, so no edge repeats.
    pub fn edges(&self) -> Vec<CellEdge> {
        let mut edges = Vec::with_capacity(self.edge_count().0);
        for cell in self.iter() {
            if (cell.x as usize) + 1 < self.cell_width {
                edges.push(CellEdge {
                    a: cell,
                    b: CellCoordinate::new(cell.x + 1, cell.y),
                });
            }
            if (cell.y as usize) + 1 < self.cell_height {
                edges.push(CellEdge {
                    a: cell,
                    b: CellCoordinate::new(cell.x, cell.y + 1),
                });
            }
        }
        edges
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    cell_width: usize,
    cells_count: usize,
}
impl Iterator for CellIter {
    type Item = CellCoordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let y = self.current_cell_number / self.cell_width;
            let x = self.current_cell_number - y * self.cell_width;
            self.current_cell_number += 1;
            Some(CellCoordinate::new(x as u32, y as u32))
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    fn lattice(w: usize, h: usize) -> CellLattice {
        CellLattice::new(Width(w), Height(h)).expect("lattice dimensions should be valid")
    }

    #[test]
    fn degenerate_grids_are_unsupported() {
        assert_eq!(CellLattice::new(Width(2), Height(7)).unwrap_err(),
                   GenerationError::UnsupportedGridSize);
        assert_eq!(CellLattice::new(Width(7), Height(1)).unwrap_err(),
                   GenerationError::UnsupportedGridSize);
        assert_eq!(CellLattice::new(Width(0), Height(0)).unwrap_err(),
                   GenerationError::UnsupportedGridSize);
    }

    #[test]
    fn cell_dimensions_follow_the_halving_rule() {
        assert_eq!((lattice(3, 3).cell_width(), lattice(3, 3).cell_height()), (1, 1));
        assert_eq!((lattice(5, 5).cell_width(), lattice(5, 5).cell_height()), (2, 2));
        // even dimensions round down
        assert_eq!((lattice(6, 4).cell_width(), lattice(6, 4).cell_height()), (2, 1));
        assert_eq!(lattice(21, 13).cells(), CellsCount(10 * 6));
    }

    #[test]
    fn edge_enumeration_matches_the_count_formula() {
        for &(w, h) in &[(3usize, 3usize), (5, 5), (7, 5), (21, 13), (4, 9)] {
            let lat = lattice(w, h);
            let (cw, ch) = (lat.cell_width(), lat.cell_height());
            let expected = cw * (ch - 1) + (cw - 1) * ch;
            assert_eq!(lat.edge_count(), EdgesCount(expected));
            assert_eq!(lat.edges().len(), expected);
        }
    }

    #[test]
    fn edges_join_lateral_neighbours_only() {
        let lat = lattice(7, 7);
        for edge in lat.edges() {
            let dx = (edge.b.x as i64 - edge.a.x as i64).abs();
            let dy = (edge.b.y as i64 - edge.a.y as i64).abs();
            assert_eq!(dx + dy, 1, "edge {:?} is not a lateral neighbour pair", edge);
        }
    }

    #[test]
    fn centres_land_on_odd_grid_positions() {
        let lat = lattice(7, 5);
        assert_eq!(lat.centre_position(CellCoordinate::new(0, 0)), GridPosition::new(1, 1));
        assert_eq!(lat.centre_position(CellCoordinate::new(2, 1)), GridPosition::new(5, 3));
        for cell in lat.iter() {
            let pos = lat.centre_position(cell);
            assert_eq!(pos.x % 2, 1);
            assert_eq!(pos.y % 2, 1);
        }
    }

    #[test]
    fn wall_between_neighbours_is_the_midpoint() {
        let lat = lattice(7, 7);
        let a = CellCoordinate::new(0, 0);
        let east = CellCoordinate::new(1, 0);
        let south = CellCoordinate::new(0, 1);
        assert_eq!(lat.wall_between(a, east), GridPosition::new(2, 1));
        assert_eq!(lat.wall_between(a, south), GridPosition::new(1, 2));
    }

    #[test]
    fn cell_indexing_round_trips() {
        let lat = lattice(9, 7);
        for (expected_index, cell) in lat.iter().enumerate() {
            assert_eq!(lat.index_of(cell), expected_index);
            assert_eq!(lat.cell_from_index(expected_index), cell);
        }
    }

    #[test]
    fn centre_cell_uses_integer_halving() {
        assert_eq!(lattice(3, 3).centre_cell(), CellCoordinate::new(0, 0));
        assert_eq!(lattice(5, 5).centre_cell(), CellCoordinate::new(1, 1));
        assert_eq!(lattice(21, 13).centre_cell(), CellCoordinate::new(5, 3));
    }
}

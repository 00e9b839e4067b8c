use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use smallvec::SmallVec;
use std::cmp;
use std::ops::Range;

use crate::dsets::DisjointSet;
use crate::grid::{GenerationError, GridPosition, Side, TileGrid};
use crate::lattice::CellLattice;
use crate::tiles::Tile;
use crate::units::{EntranceCount, Height, Width};

const SIDES: [Side; 4] = [Side::North, Side::South, Side::West, Side::East];

/// Share of the unit interval that turns an untouched wall tile into water,
/// and the share directly above it that grows undergrowth instead.
const WATER_SHARE: f64 = 0.05;
const UNDERGROWTH_SHARE: f64 = 0.30;

/// Generate a maze layout and render it to its text form.
///
/// The layout is a pure function of the dimensions, the entrance count and
/// the seed; omitting the seed draws one from OS entropy instead.
pub fn generate(width: Width,
                height: Height,
                entrances: EntranceCount,
                seed: Option<u64>)
                -> Result<String, GenerationError> {
    let mut rng = rng_from_seed(seed);
    let grid = generate_grid(width, height, entrances, &mut rng)?;
    Ok(grid.to_string())
}

/// Build the RNG that drives one generation call.
pub fn rng_from_seed(seed: Option<u64>) -> XorShiftRng {
    match seed {
        Some(seed) => XorShiftRng::seed_from_u64(seed),
        None => XorShiftRng::from_entropy(),
    }
}

/// Run the full generation pipeline and hand back the grid itself, for
/// callers that want to inspect the layout rather than print it.
///
/// All parameter validation happens before the tile buffer is allocated, so a
/// rejected call never observes a half-built grid.
pub fn generate_grid(width: Width,
                     height: Height,
                     entrances: EntranceCount,
                     rng: &mut XorShiftRng)
                     -> Result<TileGrid, GenerationError> {
    if width.0 < 3 || height.0 < 3 {
        return Err(GenerationError::InvalidDimension);
    }
    let lattice = CellLattice::new(width, height)?;
    if entrances.0 < 1 {
        return Err(GenerationError::InvalidEntranceCount);
    }

    let mut grid = TileGrid::new(width, height)?;
    open_cell_centres(&mut grid, &lattice);
    carve_passages(&mut grid, &lattice, rng);
    mark_goal(&mut grid, &lattice);
    place_entrances(&mut grid, entrances, rng);
    decorate_terrain(&mut grid, rng);
    seal_border(&mut grid);
    Ok(grid)
}

/// Open every lattice cell centre as a path candidate in the wall-filled grid.
pub fn open_cell_centres(grid: &mut TileGrid, lattice: &CellLattice) {
    for cell in lattice.iter() {
        grid.set(lattice.centre_position(cell), Tile::Path);
    }
}

/// Carve a uniform random spanning tree over the cell lattice.
///
/// Kruskal's algorithm on a shuffled edge list: every edge whose two cells
/// are still in different components gets its separating wall opened and the
/// components merged. Exactly cells-1 walls open whatever the shuffle order;
/// only which walls they are varies with the seed. The result is connected
/// and acyclic, so any two cells are joined by exactly one route.
pub fn carve_passages(grid: &mut TileGrid, lattice: &CellLattice, rng: &mut XorShiftRng) {
    let mut edges = lattice.edges();
    edges.shuffle(rng);

    let mut components = DisjointSet::new(lattice.cells().0);
    for edge in &edges {
        let a = lattice.index_of(edge.a);
        let b = lattice.index_of(edge.b);
        if components.union(a, b) {
            grid.set(lattice.wall_between(edge.a, edge.b), Tile::Path);
        }
    }
}

/// Promote the centre cell's tile to the goal.
///
/// The centre tile is a path tile after carving; if something else got there
/// first the promotion is skipped rather than overwriting a non-path tile.
pub fn mark_goal(grid: &mut TileGrid, lattice: &CellLattice) {
    let centre = lattice.centre_position(lattice.centre_cell());
    if grid.at(centre) == Tile::Path {
        grid.set(centre, Tile::Goal);
    }
}

/// Open up to `entrances` border tiles, at most one per side.
///
/// Each side offers the central half of its border (quarter margins at both
/// ends, corners always excluded) and only positions whose inward neighbour
/// is already walkable. Sides with no candidate drop out; the remaining side
/// groups are shuffled and one uniform random candidate is opened in each of
/// the first `min(entrances, group count)` groups.
pub fn place_entrances(grid: &mut TileGrid, entrances: EntranceCount, rng: &mut XorShiftRng) {
    let mut groups: SmallVec<[Vec<GridPosition>; 4]> = SmallVec::new();
    for side in &SIDES {
        let candidates = side_candidates(grid, *side);
        if !candidates.is_empty() {
            groups.push(candidates);
        }
    }

    groups.shuffle(rng);
    let openings = cmp::min(entrances.0, groups.len());
    for group in groups.iter().take(openings) {
        let opening = group[rng.gen_range(0..group.len())];
        grid.set(opening, Tile::Path);
    }
}

/// Scatter decorative terrain over the remaining solid walls.
///
/// Each wall tile rolls once: below `WATER_SHARE` it floods, in the next
/// `UNDERGROWTH_SHARE` of the range it overgrows, otherwise it stays a wall.
/// Tiles already carved, promoted or opened are never rolled.
pub fn decorate_terrain(grid: &mut TileGrid, rng: &mut XorShiftRng) {
    for y in 0..grid.height().0 {
        for x in 0..grid.width().0 {
            let pos = GridPosition::new(x, y);
            if grid.at(pos) != Tile::Wall {
                continue;
            }
            let roll = rng.gen::<f64>();
            if roll < WATER_SHARE {
                grid.set(pos, Tile::Water);
            } else if roll < WATER_SHARE + UNDERGROWTH_SHARE {
                grid.set(pos, Tile::Undergrowth);
            }
        }
    }
}

/// Force every border tile that is not an entrance back to a wall.
///
/// Runs last so the outer ring ends up all wall-or-path no matter what the
/// decoration pass put there.
pub fn seal_border(grid: &mut TileGrid) {
    for pos in grid.iter_border() {
        if grid.at(pos) != Tile::Path {
            grid.set(pos, Tile::Wall);
        }
    }
}

/// Border positions on `side` that may host an entrance: inside the central
/// band, with a walkable tile one step inward.
fn side_candidates(grid: &TileGrid, side: Side) -> Vec<GridPosition> {
    let width = grid.width().0;
    let height = grid.height().0;
    let side_length = match side {
        Side::North | Side::South => width,
        Side::West | Side::East => height,
    };

    banded_span(side_length)
        .filter_map(|along| {
            let (border, inward) = match side {
                Side::North => (GridPosition::new(along, 0), GridPosition::new(along, 1)),
                Side::South => {
                    (GridPosition::new(along, height - 1), GridPosition::new(along, height - 2))
                }
                Side::West => (GridPosition::new(0, along), GridPosition::new(1, along)),
                Side::East => {
                    (GridPosition::new(width - 1, along), GridPosition::new(width - 2, along))
                }
            };
            if grid.at(inward).is_walkable() {
                Some(border)
            } else {
                None
            }
        })
        .collect()
}

/// The central half of a border side: quarter margins at each end, clamped to
/// the interior so corners never qualify. Falls back to the whole interior
/// when clamping empties the band.
fn banded_span(side_length: usize) -> Range<usize> {
    let margin = side_length / 4;
    let low = cmp::max(margin, 1);
    let high = cmp::min(side_length - margin, side_length - 1);
    if low < high {
        low..high
    } else {
        1..side_length - 1
    }
}

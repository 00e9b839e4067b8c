//! **mazegen** is a maze layout generation library: it produces a walled tile
//! grid holding a spanning-tree path network, a goal tile and banded border
//! entrances, rendered as text for the consuming game layer.

pub mod dsets;
pub mod generators;
pub mod grid;
pub mod lattice;
pub mod pathing;
pub mod tiles;
pub mod units;
mod utils;

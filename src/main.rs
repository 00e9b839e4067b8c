use docopt::Docopt;
use serde_derive::Deserialize;

use mazegen::{
    generators,
    grid::TileGrid,
    pathing::Distances,
    units::{EntranceCount, Height, Width},
};
use std::{fs::File, io, io::prelude::*};

const USAGE: &str = "Mazegen

Usage:
    mazegen_driver -h | --help
    mazegen_driver [--grid-width=<w>] [--grid-height=<h>] [--entrances=<n>] [--seed=<s>] [--text-out=<path>] [--show-stats]

Options:
    -h --help          Show this screen.
    --grid-width=<w>   The grid width in tiles [default: 21].
    --grid-height=<h>  The grid height in tiles [default: 13].
    --entrances=<n>    Border openings to place, at most one per side [default: 1].
    --seed=<s>         Random source seed. Rerunning with the same seed and parameters reproduces the layout exactly.
    --text-out=<path>  Write the rendered maze to a file instead of stdout.
    --show-stats       Report the goal position, the openings and reachability figures for the generated layout.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_width: usize,
    flag_grid_height: usize,
    flag_entrances: usize,
    flag_seed: Option<u64>,
    flag_text_out: String,
    flag_show_stats: bool,
}

// We'll put our errors in an `errors` module, and other modules in
// this crate will `use errors::*;` to get access to everything
// `error_chain!` creates.
mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            LayoutRejected(::mazegen::grid::GenerationError);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let width = Width(args.flag_grid_width);
    let height = Height(args.flag_grid_height);
    let entrances = EntranceCount(args.flag_entrances);

    let mut rng = generators::rng_from_seed(args.flag_seed);
    let maze_grid = generators::generate_grid(width, height, entrances, &mut rng)?;
    let rendered = maze_grid.to_string();

    if args.flag_text_out.is_empty() {
        println!("{}", rendered);
    } else {
        write_text_to_file(&rendered, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    if args.flag_show_stats {
        print_layout_stats(&maze_grid)?;
    }

    Ok(())
}

fn print_layout_stats(maze_grid: &TileGrid) -> Result<()> {
    let openings = maze_grid.border_openings();
    let opening_pairs: Vec<(usize, usize)> = openings.iter().map(|pos| (pos.x, pos.y)).collect();
    println!("openings: {:?}", opening_pairs);

    match maze_grid.goal_position() {
        Some(goal) => {
            let distances = Distances::new(maze_grid, goal)
                .ok_or("The goal tile is not walkable.")?;
            println!("goal: ({}, {})", goal.x, goal.y);
            println!("reachable tiles from goal: {}", distances.reachable_count());
            println!("farthest walkable tile is {} steps from the goal", distances.max());
        }
        None => println!("goal: none"),
    }

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

use std::fs::File;
use std::io;
use std::io::prelude::*;
use std::path::Path;
use std::rc::Rc;

use docopt::Docopt;
use rand::{SeedableRng, XorShiftRng};
use serde_derive::Deserialize;

use mazegrid::astar;
use mazegrid::cells::{CoordinateSmallVec, GridCoordinate};
use mazegrid::generators::CarvingAlgorithm;
use mazegrid::grid::LargeGrid;
use mazegrid::grid_displays::{GridDisplay, PathDisplay, StartEndPointsDisplay};
use mazegrid::pathing;
use mazegrid::renderers::{self, RenderOptions};
use mazegrid::units::{ColumnsCount, RowsCount};

const USAGE: &str = "Mazegrid

Usage:
    mazegrid_driver -h | --help
    mazegrid_driver render (binary-tree|sidewinder|aldous-broder|recursive-backtracker|recursive-division) [text --text-out=<path> (--show-distances|--show-path)] [image --image-out=<path> --cell-pixels=<n> --colour-distances --show-path --mark-start-end] [(--grid-size=<n>|[--grid-rows=<r> --grid-columns=<c>])] [--seed=<s>] [--count-dead-ends]
    mazegrid_driver solve (binary-tree|sidewinder|aldous-broder|recursive-backtracker|recursive-division) --start-row=<a> --start-column=<b> --end-row=<x> --end-column=<y> [(--grid-size=<n>|[--grid-rows=<r> --grid-columns=<c>])] [--seed=<s>]

Options:
    -h --help             Show this screen.
    --grid-size=<n>       The grid size is n * n.
    --grid-rows=<r>       The grid row count in an r x c grid [default: 20].
    --grid-columns=<c>    The grid column count in an r x c grid [default: 20].
    --seed=<s>            Seed the random number generator for a reproducible maze.
    --text-out=<path>     Output file path for a textual rendering of a maze.
    --show-distances      Show the distance from the longest path's start to every reachable cell.
    --show-path           Show the longest path through the maze.
    --image-out=<path>    Output file path for an image rendering of a maze. Always PNG format.
    --cell-pixels=<n>     Pixel count to render one cell side in a maze [default: 10].
    --colour-distances    Colour each cell's background by its distance from the path start.
    --mark-start-end      Highlight the start and end cells of the path.
    --count-dead-ends     Report how many cells are dead ends.
    --start-row=<a>       Row of the route start cell.
    --start-column=<b>    Column of the route start cell.
    --end-row=<x>         Row of the route end cell.
    --end-column=<y>      Column of the route end cell.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_grid_size: Option<usize>,
    flag_grid_rows: usize,
    flag_grid_columns: usize,
    flag_seed: Option<u32>,
    cmd_render: bool,
    cmd_solve: bool,
    cmd_binary_tree: bool,
    cmd_sidewinder: bool,
    cmd_aldous_broder: bool,
    cmd_recursive_backtracker: bool,
    cmd_recursive_division: bool,
    cmd_text: bool,
    flag_text_out: String,
    cmd_image: bool,
    flag_image_out: String,
    flag_cell_pixels: u8,
    flag_colour_distances: bool,
    flag_show_distances: bool,
    flag_mark_start_end: bool,
    flag_show_path: bool,
    flag_count_dead_ends: bool,
    flag_start_row: Option<u32>,
    flag_start_column: Option<u32>,
    flag_end_row: Option<u32>,
    flag_end_column: Option<u32>,
}

// Errors live in an `errors` module so everything `error_chain!` creates is
// in one place.
mod errors {
    use error_chain::*;
    error_chain! {

        foreign_links {
            DocOptFailure(::docopt::Error);
            IoFailure(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    let args: MazeArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;

    let (rows, columns) = if let Some(square_grid_size) = args.flag_grid_size {
        (square_grid_size, square_grid_size)
    } else {
        (args.flag_grid_rows, args.flag_grid_columns)
    };
    let mut maze_grid = LargeGrid::new(RowsCount(rows), ColumnsCount(columns))
        .ok_or("Grid dimensions must be non-zero and fit the grid index type.")?;

    let mut rng = make_rng(args.flag_seed);
    selected_algorithm(&args).apply(&mut maze_grid, &mut rng);

    if args.flag_count_dead_ends {
        println!("{} of {} cells are dead ends",
                 maze_grid.dead_ends().len(),
                 maze_grid.size());
    }

    if args.cmd_solve {
        return solve_maze(&mut maze_grid, &args);
    }

    let longest_path = pathing::longest_path::<_, u32>(&maze_grid).unwrap_or_else(Vec::new);

    let do_image_render = args.cmd_image;
    let do_text_render = args.cmd_text || !args.cmd_image;

    if do_text_render {

        set_maze_griddisplay(&mut maze_grid, &args, &longest_path)?;

        if args.flag_text_out.is_empty() {
            println!("{}", maze_grid);
        } else {
            write_text_to_file(&format!("{}", maze_grid), &args.flag_text_out)
                .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
        }
    }

    if do_image_render {
        let out_image_path = if args.flag_image_out.is_empty() {
            None
        } else {
            Some(Path::new(&args.flag_image_out))
        };

        let start = longest_path.first().cloned();
        let end = longest_path.last().cloned();

        let distances = if args.flag_colour_distances {
            let start_coord = start.ok_or("The maze has no path to measure distances from.")?;
            Some(pathing::Distances::<u32>::new(&maze_grid, start_coord)
                .ok_or("Invalid start coordinate from which to show path distances.")?)
        } else {
            None
        };

        let path = if args.flag_show_path {
            Some(longest_path.as_slice())
        } else {
            None
        };

        let render_options = RenderOptions::new()
            .cell_side_pixels_length(u32::from(args.flag_cell_pixels))
            .colour_distances(args.flag_colour_distances)
            .mark_start_end(args.flag_mark_start_end)
            .start(start)
            .end(end)
            .show_path(args.flag_show_path)
            .distances(distances.as_ref())
            .path(path)
            .output_file(out_image_path)
            .build();
        renderers::render_square_grid(&maze_grid, &render_options)
            .chain_err(|| "Failed to render the maze image.")?;
    }

    Ok(())
}

fn make_rng(seed: Option<u32>) -> XorShiftRng {
    match seed {
        // XorShiftRng requires a non-zero seed.
        Some(s) => XorShiftRng::from_seed([s | 1, 0x193a_6754, 0xa8a7_d469, 0x9783_4243]),
        None => rand::weak_rng(),
    }
}

fn selected_algorithm(args: &MazeArgs) -> CarvingAlgorithm {
    if args.cmd_binary_tree {
        CarvingAlgorithm::BinaryTree
    } else if args.cmd_sidewinder {
        CarvingAlgorithm::Sidewinder
    } else if args.cmd_aldous_broder {
        CarvingAlgorithm::AldousBroder
    } else if args.cmd_recursive_backtracker {
        CarvingAlgorithm::RecursiveBacktracker
    } else {
        CarvingAlgorithm::RecursiveDivision
    }
}

/// Find a route between the requested endpoints and print the maze with the
/// route overlaid. An unreachable end point is reported, not an error.
fn solve_maze(maze_grid: &mut LargeGrid, args: &MazeArgs) -> Result<()> {

    let start = GridCoordinate::new(args.flag_start_row.ok_or("Missing route start row.")?,
                                    args.flag_start_column.ok_or("Missing route start column.")?);
    let end = GridCoordinate::new(args.flag_end_row.ok_or("Missing route end row.")?,
                                  args.flag_end_column.ok_or("Missing route end column.")?);

    let path = astar::solve(maze_grid, start, end);
    if path.is_empty() {
        println!("No route exists from ({}, {}) to ({}, {})",
                 start.row,
                 start.column,
                 end.row,
                 end.column);
        return Ok(());
    }

    println!("Route of {} cells from ({}, {}) to ({}, {})",
             path.len(),
             start.row,
             start.column,
             end.row,
             end.column);
    maze_grid.set_grid_display(Some(Rc::new(PathDisplay::new(&path)) as Rc<dyn GridDisplay>));
    println!("{}", maze_grid);

    Ok(())
}

/// Decide how the grid should display cell bodies as text:
/// - distances from the longest path's start to every reachable cell, or
/// - the longest path itself, or
/// - just the start and end markers of the longest path.
fn set_maze_griddisplay(maze_grid: &mut LargeGrid,
                        args: &MazeArgs,
                        longest_path: &[GridCoordinate])
                        -> Result<()> {

    if args.flag_show_distances {

        let start = *longest_path.first().ok_or("The maze has no longest path.")?;
        let distances = Rc::new(pathing::Distances::<u32>::new(maze_grid, start)
            .ok_or("Invalid start coordinate from which to show path distances.")?);
        maze_grid.set_grid_display(Some(distances as Rc<dyn GridDisplay>));

    } else if args.flag_show_path {

        let display_path = Rc::new(PathDisplay::new(longest_path));
        maze_grid.set_grid_display(Some(display_path as Rc<dyn GridDisplay>));

    } else if args.flag_mark_start_end {

        let start_points: CoordinateSmallVec =
            longest_path.first().cloned().into_iter().collect();
        let end_points: CoordinateSmallVec = longest_path.last().cloned().into_iter().collect();
        let display_start_end_points = Rc::new(StartEndPointsDisplay::new(start_points,
                                                                          end_points));
        maze_grid.set_grid_display(Some(display_start_end_points as Rc<dyn GridDisplay>));
    }

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

//! Maze generation algorithms.
//!
//! Every generator is a free function taking a mutable grid and the RNG to
//! drive its random choices, so runs are reproducible from a seed. Each one
//! carves a spanning tree over the grid's cells: every cell reachable from
//! every other by exactly one route.

use rand::{Rng, XorShiftRng};

use crate::cells::{CompassPrimary, CoordinateSmallVec, GridCoordinate};
use crate::grid::{IndexType, RectGrid};
use crate::units::{ColumnsCount, RowsCount};

/// The closed set of carving algorithms, for callers that select one at
/// runtime (the CLI driver does).
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CarvingAlgorithm {
    BinaryTree,
    Sidewinder,
    AldousBroder,
    RecursiveBacktracker,
    RecursiveDivision,
}

impl CarvingAlgorithm {
    pub fn apply<GridIndexType: IndexType>(self,
                                           grid: &mut RectGrid<GridIndexType>,
                                           rng: &mut XorShiftRng) {
        match self {
            CarvingAlgorithm::BinaryTree => binary_tree(grid, rng),
            CarvingAlgorithm::Sidewinder => sidewinder(grid, rng),
            CarvingAlgorithm::AldousBroder => aldous_broder(grid, rng),
            CarvingAlgorithm::RecursiveBacktracker => recursive_backtracker(grid, rng),
            CarvingAlgorithm::RecursiveDivision => recursive_division(grid, rng),
        }
    }
}

/// For each cell flip a coin between linking north and linking east.
///
/// Cells on the north row can only link east and the north east corner links
/// nowhere, which is what keeps the result a tree: the north row becomes one
/// long corridor every other cell eventually reaches.
pub fn binary_tree<GridIndexType: IndexType>(grid: &mut RectGrid<GridIndexType>,
                                             rng: &mut XorShiftRng) {
    for cell_coord in grid.iter() {

        let candidates: CoordinateSmallVec = grid.neighbours_at_directions(cell_coord,
                                                        &[CompassPrimary::North,
                                                          CompassPrimary::East])
            .iter()
            .filter_map(|coord_maybe| *coord_maybe)
            .collect();
        if candidates.is_empty() {
            continue;
        }

        let link_coord = if candidates.len() == 1 || rng.gen() {
            candidates[0]
        } else {
            candidates[1]
        };
        grid.link(cell_coord, link_coord).expect("cells are always structural neighbours");
    }
}

/// Process each row as a sequence of eastward runs. A run either extends east
/// or closes out by linking one random member of the run north.
///
/// The north row can never close out a run upward, so like binary tree it
/// degenerates to a single corridor.
pub fn sidewinder<GridIndexType: IndexType>(grid: &mut RectGrid<GridIndexType>,
                                            rng: &mut XorShiftRng) {
    for row in grid.iter_row() {

        let mut run: Vec<GridCoordinate> = Vec::new();
        for cell_coord in row {

            run.push(cell_coord);
            let at_eastern_boundary =
                grid.neighbour_at_direction(cell_coord, CompassPrimary::East).is_none();
            let at_northern_boundary =
                grid.neighbour_at_direction(cell_coord, CompassPrimary::North).is_none();

            let should_close_out = at_eastern_boundary ||
                                   (!at_northern_boundary && rng.gen());
            if should_close_out {

                let run_member = run[rng.gen::<usize>() % run.len()];
                if let Some(north_of_member) =
                    grid.neighbour_at_direction(run_member, CompassPrimary::North) {
                    grid.link(run_member, north_of_member)
                        .expect("cells are always structural neighbours");
                }
                run.clear();

            } else {
                let east_of_cell = grid.neighbour_at_direction(cell_coord, CompassPrimary::East)
                    .expect("not at the eastern boundary");
                grid.link(cell_coord, east_of_cell)
                    .expect("cells are always structural neighbours");
            }
        }
    }
}

/// Uniform random walk, linking each step that enters a never-visited cell.
///
/// Samples spanning trees without bias but the walk revisits covered ground
/// freely, so expect it to be slow on anything large.
pub fn aldous_broder<GridIndexType: IndexType>(grid: &mut RectGrid<GridIndexType>,
                                               rng: &mut XorShiftRng) {
    let mut current = grid.random_cell(rng);
    let mut unvisited_count = grid.size() - 1;

    while unvisited_count > 0 {

        let neighbours = grid.neighbours(current);
        let next = neighbours[rng.gen::<usize>() % neighbours.len()];

        let next_is_unvisited = grid.links(next)
            .map_or(false, |links| links.is_empty());
        if next_is_unvisited {
            grid.link(current, next).expect("cells are always structural neighbours");
            unvisited_count -= 1;
        }
        current = next;
    }
}

/// Depth first search with an explicit stack, randomly choosing among the
/// unvisited neighbours of the stack top and backtracking when there are
/// none. The explicit stack keeps large grids from blowing the call stack.
pub fn recursive_backtracker<GridIndexType: IndexType>(grid: &mut RectGrid<GridIndexType>,
                                                       rng: &mut XorShiftRng) {
    let start = grid.random_cell(rng);
    let mut stack = vec![start];

    while let Some(&current) = stack.last() {

        let unvisited_neighbours: CoordinateSmallVec = grid.neighbours(current)
            .iter()
            .cloned()
            .filter(|&coord| {
                grid.links(coord).map_or(false, |links| links.is_empty())
            })
            .collect();

        if unvisited_neighbours.is_empty() {
            stack.pop();
        } else {
            let next = unvisited_neighbours[rng.gen::<usize>() % unvisited_neighbours.len()];
            grid.link(current, next).expect("cells are always structural neighbours");
            stack.push(next);
        }
    }
}

/// Wall adding instead of passage carving: link every structurally adjacent
/// pair, then recursively split the grid with walls, each wall pierced by a
/// single passage.
pub fn recursive_division<GridIndexType: IndexType>(grid: &mut RectGrid<GridIndexType>,
                                                    rng: &mut XorShiftRng) {
    for cell_coord in grid.iter() {
        for direction in &[CompassPrimary::South, CompassPrimary::East] {
            if let Some(neighbour) = grid.neighbour_at_direction(cell_coord, *direction) {
                grid.link(cell_coord, neighbour)
                    .expect("cells are always structural neighbours");
            }
        }
    }

    let (RowsCount(rows), ColumnsCount(columns)) = (grid.rows(), grid.columns());
    divide(grid, rng, 0, 0, rows, columns);
}

fn divide<GridIndexType: IndexType>(grid: &mut RectGrid<GridIndexType>,
                                    rng: &mut XorShiftRng,
                                    row: usize,
                                    column: usize,
                                    rows: usize,
                                    columns: usize) {
    // A 1 wide or 1 high region is already a corridor, nothing left to split.
    if rows <= 1 || columns <= 1 {
        return;
    }

    if rows >= columns {
        // Wall along the south edge of `wall_row`, one passage through it.
        let wall_row = row + rng.gen::<usize>() % (rows - 1);
        let passage_column = column + rng.gen::<usize>() % columns;

        for c in column..(column + columns) {
            if c == passage_column {
                continue;
            }
            grid.unlink(GridCoordinate::new(wall_row as u32, c as u32),
                        GridCoordinate::new((wall_row + 1) as u32, c as u32));
        }

        let north_region_rows = wall_row - row + 1;
        divide(grid, rng, row, column, north_region_rows, columns);
        divide(grid, rng, wall_row + 1, column, rows - north_region_rows, columns);

    } else {
        // Wall along the east edge of `wall_column`, one passage through it.
        let wall_column = column + rng.gen::<usize>() % (columns - 1);
        let passage_row = row + rng.gen::<usize>() % rows;

        for r in row..(row + rows) {
            if r == passage_row {
                continue;
            }
            grid.unlink(GridCoordinate::new(r as u32, wall_column as u32),
                        GridCoordinate::new(r as u32, (wall_column + 1) as u32));
        }

        let west_region_columns = wall_column - column + 1;
        divide(grid, rng, row, column, rows, west_region_columns);
        divide(grid, rng, row, wall_column + 1, rows, columns - west_region_columns);
    }
}

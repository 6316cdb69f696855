use std::fmt::{Debug, Display, LowerHex};
use std::ops::Add;

use itertools::Itertools;
use num::traits::{Bounded, One, Unsigned, Zero};
use smallvec::SmallVec;

use crate::cells::{CoordinateSmallVec, GridCoordinate};
use crate::grid::{IndexType, RectGrid};
use crate::units::{ColumnsCount, RowsCount};
use crate::utils;
use crate::utils::FnvHashMap;

// Trait (hack) used purely as a generic type parameter alias because it looks ugly to type this
// out each time. Generic parameter type aliases are not in the language, `type X = Y;` only works
// with concrete types.
pub trait MaxDistance
    : Zero + One + Bounded + Unsigned + Add + Debug + Clone + Copy + Display + LowerHex + Ord
    {
}
impl<T: Zero + One + Bounded + Unsigned + Add + Debug + Clone + Copy + Display + LowerHex + Ord> MaxDistance for T {}

/// Flood fill distances from one start cell to every cell reachable through
/// the grid's passages.
///
/// Cells absent from the map are unreachable from the start, there is no
/// in-band infinity sentinel on the query surface.
#[derive(Debug, Clone)]
pub struct Distances<MaxDistanceT = u32> {
    start_coordinate: GridCoordinate,
    distances: FnvHashMap<GridCoordinate, MaxDistanceT>,
    max_distance: MaxDistanceT,
    rows: RowsCount,
    columns: ColumnsCount,
}

impl<MaxDistanceT> Distances<MaxDistanceT>
    where MaxDistanceT: MaxDistance
{
    /// Breadth first search over the passage graph, one frontier at a time.
    ///
    /// Every passage costs one step, so the first time a cell is seen its
    /// shortest distance is final and it never re-enters a frontier. Each
    /// cell and each passage is processed at most once.
    ///
    /// `None` when the start coordinate is not on the grid.
    pub fn new<GridIndexType>(grid: &RectGrid<GridIndexType>,
                              start_coordinate: GridCoordinate)
                              -> Option<Distances<MaxDistanceT>>
        where GridIndexType: IndexType
    {
        if !grid.is_valid_coordinate(start_coordinate) {
            return None;
        }

        let mut max = Zero::zero();
        let cells_count = grid.size();
        let mut distances = utils::fnv_hashmap(cells_count);
        distances.insert(start_coordinate, Zero::zero());

        let mut frontier = vec![start_coordinate];
        while !frontier.is_empty() {

            let mut new_frontier = vec![];
            for cell_coord in &frontier {

                let distance_to_cell: MaxDistanceT = *distances.get(cell_coord)
                    .expect("frontier cells always have a recorded distance");
                if distance_to_cell > max {
                    max = distance_to_cell;
                }

                let links: CoordinateSmallVec = grid.links(*cell_coord)
                    .expect("frontier cell has an invalid coordinate");
                for link_coordinate in &*links {

                    if !distances.contains_key(link_coordinate) {
                        distances.insert(*link_coordinate, distance_to_cell + One::one());
                        new_frontier.push(*link_coordinate);
                    }
                }
            }
            frontier = new_frontier;
        }

        Some(Distances {
            start_coordinate: start_coordinate,
            distances: distances,
            max_distance: max,
            rows: grid.rows(),
            columns: grid.columns(),
        })
    }

    #[inline(always)]
    pub fn start(&self) -> GridCoordinate {
        self.start_coordinate
    }

    #[inline(always)]
    pub fn max(&self) -> MaxDistanceT {
        self.max_distance
    }

    #[inline(always)]
    pub fn distance_from_start_to(&self, coord: GridCoordinate) -> Option<MaxDistanceT> {
        self.distances.get(&coord).cloned()
    }

    /// The reachable cell at maximum distance from the start.
    ///
    /// Scans cells in row-major order rather than hash map order so that ties
    /// always resolve to the first-encountered cell, making the answer
    /// deterministic for a given maze. At minimum the start cell itself
    /// qualifies at distance zero.
    pub fn farthest_cell(&self) -> (GridCoordinate, MaxDistanceT) {
        let (RowsCount(rows), ColumnsCount(columns)) = (self.rows, self.columns);
        let mut farthest = (self.start_coordinate, Zero::zero());

        for index in 0..(rows * columns) {
            let coord = GridCoordinate::from_row_major_index(index, self.columns);
            if let Some(d) = self.distance_from_start_to(coord) {
                if d > farthest.1 {
                    farthest = (coord, d);
                }
            }
        }
        farthest
    }
}

/// Walk back from the end point towards the start, at each step moving to any
/// linked neighbour with a strictly smaller distance. `None` when the end
/// point was never reached by the flood fill.
pub fn shortest_path<GridIndexType, MaxDistanceT>(grid: &RectGrid<GridIndexType>,
                                                  distances_from_start: &Distances<MaxDistanceT>,
                                                  end_point: GridCoordinate)
                                                  -> Option<Vec<GridCoordinate>>
    where GridIndexType: IndexType,
          MaxDistanceT: MaxDistance
{
    if distances_from_start.distance_from_start_to(end_point).is_none() {
        // The end point is not reachable from start.
        return None;
    }

    let mut path = vec![end_point];
    let start = distances_from_start.start();
    let mut current_coord = end_point;

    while current_coord != start {

        let current_distance_to_start = distances_from_start.distance_from_start_to(current_coord)
            .expect("path cells are always on the distances map");

        let linked_neighbours = grid.neighbours(current_coord)
            .iter()
            .cloned()
            .filter(|neighbour_coord| grid.is_linked(*neighbour_coord, current_coord))
            .collect::<CoordinateSmallVec>();
        let neighbour_distances = &linked_neighbours.iter()
            .filter_map(|coord| {
                distances_from_start.distance_from_start_to(*coord)
                    .map(|distance| (*coord, distance))
            })
            .collect::<SmallVec<[(GridCoordinate, MaxDistanceT); 8]>>();
        let closest_to_start: &Option<(GridCoordinate, MaxDistanceT)> = &neighbour_distances.iter()
            .cloned()
            .fold1(|closest_accumulator: (GridCoordinate, MaxDistanceT),
                    closest_candidate: (GridCoordinate, MaxDistanceT)| {
                if closest_candidate.1 < closest_accumulator.1 {
                    closest_candidate
                } else {
                    closest_accumulator
                }
            });

        if let Some((closer_coord, closer_distance)) = *closest_to_start {

            if closer_distance >= current_distance_to_start {
                // We have not got any closer to the start, so there is no path there.
                return None;
            }

            current_coord = closer_coord;
            path.push(current_coord);

        } else {
            // There are no linked neighbours - this input data is broken.
            return None;
        }
    }

    path.reverse();
    Some(path)
}

/// The longest shortest path in the maze, found by flood filling twice:
/// the farthest cell from an arbitrary corner is one diameter endpoint, the
/// farthest cell from that endpoint is the other. Exact on perfect mazes
/// (spanning trees); on mazes with cycles it is only an approximation.
pub fn longest_path<GridIndexType, MaxDistanceT>(grid: &RectGrid<GridIndexType>)
                                                 -> Option<Vec<GridCoordinate>>
    where GridIndexType: IndexType,
          MaxDistanceT: MaxDistance
{
    let arbitrary_start_point = GridCoordinate::new(0, 0);

    let first_distances =
        Distances::<MaxDistanceT>::new(grid, arbitrary_start_point)?;
    let (long_path_start_coordinate, _) = first_distances.farthest_cell();

    let distances_from_start = Distances::<MaxDistanceT>::new(grid, long_path_start_coordinate)?;
    let (end_point, _) = distances_from_start.farthest_cell();

    shortest_path(grid, &distances_from_start, end_point)
}

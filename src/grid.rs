use std::cmp;
use std::fmt;
use std::rc::Rc;
use std::slice;

use petgraph::graph;
pub use petgraph::graph::IndexType;
use petgraph::{Graph, Undirected};
use rand::{Rng, XorShiftRng};

use crate::cells::{CompassPrimary, CoordinateOptionSmallVec, CoordinateSmallVec, GridCoordinate,
                   COMPASS_PRIMARIES};
use crate::grid_displays::GridDisplay;
use crate::units::{ColumnsCount, EdgesCount, NodesCount, RowsCount};

/// A `rows x columns` lattice of cells.
///
/// The grid is the sole owner of every cell: cells are petgraph node indices
/// into one flat graph and passages are undirected edges between them, so the
/// mutual north/south/east/west references of the lattice never form Rust
/// ownership cycles. Structural adjacency is pure coordinate arithmetic fixed
/// at construction; only the edge (link) set mutates afterwards.
pub struct RectGrid<GridIndexType: IndexType> {
    graph: Graph<(), (), Undirected, GridIndexType>,
    rows: RowsCount,
    columns: ColumnsCount,
    grid_display: Option<Rc<dyn GridDisplay>>,
}

pub type SmallGrid = RectGrid<u8>;
pub type MediumGrid = RectGrid<u16>;
pub type LargeGrid = RectGrid<u32>;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CellLinkError {
    InvalidGridCoordinate,
    SelfLink,
    NotNeighbours,
}

impl fmt::Display for CellLinkError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            CellLinkError::InvalidGridCoordinate => {
                write!(f, "coordinate outside the grid dimensions")
            }
            CellLinkError::SelfLink => write!(f, "cannot link a cell to itself"),
            CellLinkError::NotNeighbours => {
                write!(f, "cells are not structurally adjacent")
            }
        }
    }
}

impl<GridIndexType: IndexType> fmt::Debug for RectGrid<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "RectGrid :: rows: {:?}, columns: {:?}, links: {:?}",
               self.rows,
               self.columns,
               self.graph.edge_count())
    }
}

impl<GridIndexType: IndexType> RectGrid<GridIndexType> {
    /// Allocate a grid and wire up its structural adjacency.
    ///
    /// Returns `None` for a zero-area grid or when `rows * columns` cells do
    /// not fit the graph index type.
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Option<RectGrid<GridIndexType>> {
        let (RowsCount(row_count), ColumnsCount(column_count)) = (rows, columns);
        let cells_count = row_count * column_count;

        if row_count == 0 || column_count == 0 ||
           cells_count > <GridIndexType as IndexType>::max().index() {
            return None;
        }

        let (NodesCount(nodes), EdgesCount(edges)) = graph_size(rows, columns);
        let mut grid = RectGrid {
            graph: Graph::with_capacity(nodes, edges),
            rows: rows,
            columns: columns,
            grid_display: None,
        };
        for _ in 0..nodes {
            let _ = grid.graph.add_node(());
        }

        Some(grid)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.rows.0 * self.columns.0
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    /// The number of passages carved so far.
    #[inline]
    pub fn links_count(&self) -> usize {
        self.graph.edge_count()
    }

    #[inline]
    pub fn set_grid_display(&mut self, grid_display: Option<Rc<dyn GridDisplay>>) {
        self.grid_display = grid_display;
    }

    #[inline]
    pub fn grid_display(&self) -> &Option<Rc<dyn GridDisplay>> {
        &self.grid_display
    }

    /// A cell drawn uniformly at random over all `rows * columns` cells.
    pub fn random_cell(&self, rng: &mut XorShiftRng) -> GridCoordinate {
        let index = rng.gen::<usize>() % self.size();
        GridCoordinate::from_row_major_index(index, self.columns)
    }

    /// Carve a passage between two cells.
    ///
    /// The link relation is kept symmetric by construction - one undirected
    /// graph edge is both directions. Linking is rejected unless both
    /// coordinates are on the grid, distinct and structurally adjacent, which
    /// preserves the lattice-graph invariant no matter how badly a caller
    /// behaves.
    pub fn link(&mut self, a: GridCoordinate, b: GridCoordinate) -> Result<(), CellLinkError> {
        if a == b {
            return Err(CellLinkError::SelfLink);
        }
        match (self.grid_coordinate_graph_index(a), self.grid_coordinate_graph_index(b)) {
            (Some(a_index), Some(b_index)) => {
                if !self.is_neighbour(a, b) {
                    return Err(CellLinkError::NotNeighbours);
                }
                // update_edge never creates parallel edges for an existing pair.
                let _ = self.graph.update_edge(a_index, b_index, ());
                Ok(())
            }
            _ => Err(CellLinkError::InvalidGridCoordinate),
        }
    }

    /// Remove the passage between two cells, both directions at once.
    /// Returns true if an unlink occurred.
    pub fn unlink(&mut self, a: GridCoordinate, b: GridCoordinate) -> bool {
        if let (Some(a_index), Some(b_index)) =
            (self.grid_coordinate_graph_index(a), self.grid_coordinate_graph_index(b)) {
            if let Some(edge_index) = self.graph.find_edge(a_index, b_index) {
                // Removal invalidates the last edge index in the graph, which
                // is fine as we never store edge indices.
                self.graph.remove_edge(edge_index);
                return true;
            }
        }
        false
    }

    /// Cells linked to a particular cell by a passage.
    /// `None` when the coordinate itself is not on the grid.
    pub fn links(&self, coord: GridCoordinate) -> Option<CoordinateSmallVec> {
        self.grid_coordinate_graph_index(coord).map(|graph_node_index| {
            self.graph
                .neighbors(graph_node_index)
                .map(|node_index| {
                    GridCoordinate::from_row_major_index(node_index.index(), self.columns)
                })
                .collect()
        })
    }

    /// Cells to the north, south, east or west of a particular cell, linked
    /// by a passage or not.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        COMPASS_PRIMARIES.iter()
            .filter_map(|&dir| self.neighbour_at_direction(coord, dir))
            .collect()
    }

    pub fn neighbours_at_directions(&self,
                                    coord: GridCoordinate,
                                    dirs: &[CompassPrimary])
                                    -> CoordinateOptionSmallVec {
        dirs.iter()
            .map(|&direction| self.neighbour_at_direction(coord, direction))
            .collect()
    }

    pub fn neighbour_at_direction(&self,
                                  coord: GridCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<GridCoordinate> {
        coord.offset(direction)
            .and_then(|neighbour_coord| if self.is_valid_coordinate(neighbour_coord) {
                Some(neighbour_coord)
            } else {
                None
            })
    }

    /// Are two cells in the grid linked by a passage?
    pub fn is_linked(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        if let (Some(a_index), Some(b_index)) =
            (self.grid_coordinate_graph_index(a), self.grid_coordinate_graph_index(b)) {
            self.graph.find_edge(a_index, b_index).is_some()
        } else {
            false
        }
    }

    pub fn is_neighbour_linked(&self, coord: GridCoordinate, direction: CompassPrimary) -> bool {
        self.neighbour_at_direction(coord, direction)
            .map_or(false, |neighbour_coord| self.is_linked(coord, neighbour_coord))
    }

    /// All cells with exactly one link - the dead ends of the maze.
    /// An O(V) scan in row-major order.
    pub fn dead_ends(&self) -> Vec<GridCoordinate> {
        self.iter()
            .filter(|&coord| {
                let index = self.grid_coordinate_graph_index(coord)
                    .expect("iterated coordinate is always valid");
                self.graph.neighbors(index).count() == 1
            })
            .collect()
    }

    /// Convert a grid coordinate to a one dimensional index in the range
    /// `0..grid.size()`. `None` if the coordinate is out of bounds - this is
    /// the sole bounds checking surface, everything else routes through it.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row as usize * self.columns.0 + coord.column as usize)
        } else {
            None
        }
    }

    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        (coord.row as usize) < self.rows.0 && (coord.column as usize) < self.columns.0
    }

    /// Every cell coordinate in deterministic row-major order.
    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            cells_count: self.size(),
            columns: self.columns,
        }
    }

    pub fn iter_row(&self) -> BatchIter {
        BatchIter {
            iter_type: BatchIterType::Row,
            current_index: 0,
            rows: self.rows,
            columns: self.columns,
        }
    }

    pub fn iter_column(&self) -> BatchIter {
        BatchIter {
            iter_type: BatchIterType::Column,
            current_index: 0,
            rows: self.rows,
            columns: self.columns,
        }
    }

    /// Every carved passage as a coordinate pair, in no particular order.
    pub fn iter_links(&self) -> LinksIter<GridIndexType> {
        LinksIter {
            graph_edge_iter: self.graph.raw_edges().iter(),
            columns: self.columns,
        }
    }

    fn is_neighbour(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        self.neighbours(a).iter().any(|&coord| coord == b)
    }

    #[inline]
    fn grid_coordinate_graph_index(&self,
                                   coord: GridCoordinate)
                                   -> Option<graph::NodeIndex<GridIndexType>> {
        self.grid_coordinate_to_index(coord).map(graph::NodeIndex::<GridIndexType>::new)
    }
}

fn graph_size(rows: RowsCount, columns: ColumnsCount) -> (NodesCount, EdgesCount) {
    let (RowsCount(row_count), ColumnsCount(column_count)) = (rows, columns);
    let cells_count = row_count * column_count;
    // Edge capacity for the fully linked lattice, as recursive division needs.
    let edges_count = 2 * cells_count - cmp::min(cells_count, row_count + column_count);
    (NodesCount(cells_count), EdgesCount(edges_count))
}

impl<GridIndexType: IndexType> fmt::Display for RectGrid<GridIndexType> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {

        const BODY: &'static str = "   ";
        const WALL_EW: &'static str = "|";
        const WALL_NS: &'static str = "---";
        const CORNER: &'static str = "+";

        let ColumnsCount(columns_count) = self.columns;

        let mut output = String::from(CORNER);
        for _ in 0..columns_count {
            output.push_str(WALL_NS);
            output.push_str(CORNER);
        }
        output.push('\n');

        for row in self.iter_row() {

            let mut row_middle_section_render = String::from(WALL_EW);
            let mut row_bottom_section_render = String::from(CORNER);

            for coord in row {

                let body = if let Some(ref displayer) = self.grid_display {
                    displayer.render_cell_body(coord)
                } else {
                    String::from(BODY)
                };
                row_middle_section_render.push_str(&body);
                row_middle_section_render.push_str(if self.is_neighbour_linked(coord,
                                                                               CompassPrimary::East) {
                    " "
                } else {
                    WALL_EW
                });
                row_bottom_section_render.push_str(if self.is_neighbour_linked(coord,
                                                                               CompassPrimary::South) {
                    BODY
                } else {
                    WALL_NS
                });
                row_bottom_section_render.push_str(CORNER);
            }

            output.push_str(&row_middle_section_render);
            output.push('\n');
            output.push_str(&row_bottom_section_render);
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    cells_count: usize,
    columns: ColumnsCount,
}

impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord = GridCoordinate::from_row_major_index(self.current_cell_number,
                                                             self.columns);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for CellIter {} // default impl using size_hint()

#[derive(Debug, Copy, Clone)]
enum BatchIterType {
    Row,
    Column,
}

#[derive(Debug, Copy, Clone)]
pub struct BatchIter {
    iter_type: BatchIterType,
    current_index: usize,
    rows: RowsCount,
    columns: ColumnsCount,
}

impl Iterator for BatchIter {
    type Item = Vec<GridCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        let (RowsCount(rows), ColumnsCount(columns)) = (self.rows, self.columns);
        let (batches, batch_length) = if let BatchIterType::Row = self.iter_type {
            (rows, columns)
        } else {
            (columns, rows)
        };

        if self.current_index < batches {
            let coords = (0..batch_length)
                .map(|i| if let BatchIterType::Row = self.iter_type {
                    GridCoordinate::new(self.current_index as u32, i as u32)
                } else {
                    GridCoordinate::new(i as u32, self.current_index as u32)
                })
                .collect();
            self.current_index += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let batches = if let BatchIterType::Row = self.iter_type {
            self.rows.0
        } else {
            self.columns.0
        };
        let remaining = batches - self.current_index;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for BatchIter {}

pub struct LinksIter<'a, GridIndexType: IndexType + 'a> {
    graph_edge_iter: slice::Iter<'a, graph::Edge<(), GridIndexType>>,
    columns: ColumnsCount,
}

impl<'a, GridIndexType: IndexType> Iterator for LinksIter<'a, GridIndexType> {
    type Item = (GridCoordinate, GridCoordinate);

    fn next(&mut self) -> Option<Self::Item> {
        self.graph_edge_iter.next().map(|edge| {
            (GridCoordinate::from_row_major_index(edge.source().index(), self.columns),
             GridCoordinate::from_row_major_index(edge.target().index(), self.columns))
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.graph_edge_iter.size_hint()
    }
}
impl<'a, GridIndexType: IndexType> ExactSizeIterator for LinksIter<'a, GridIndexType> {}

#[cfg(test)]
mod tests {

    use itertools::Itertools; // a trait
    use smallvec::SmallVec;

    use super::*;
    use crate::cells::CompassPrimary;
    use crate::units::{ColumnsCount, RowsCount};

    fn small_grid(rows: usize, columns: usize) -> SmallGrid {
        SmallGrid::new(RowsCount(rows), ColumnsCount(columns))
            .expect("grid dimensions too large for small grid")
    }

    // Compare a smallvec to e.g. a vec! or &[T].
    // SmallVec really ruins the syntax ergonomics, hence this macro.
    macro_rules! assert_smallvec_eq {
        ($x:expr, $y:expr) => (assert_eq!(&*$x, &*$y))
    }

    #[test]
    fn zero_area_grids_are_rejected() {
        assert!(SmallGrid::new(RowsCount(0), ColumnsCount(4)).is_none());
        assert!(SmallGrid::new(RowsCount(4), ColumnsCount(0)).is_none());
        assert!(SmallGrid::new(RowsCount(0), ColumnsCount(0)).is_none());
    }

    #[test]
    fn grids_too_large_for_the_index_type_are_rejected() {
        assert!(SmallGrid::new(RowsCount(16), ColumnsCount(16)).is_none());
        assert!(MediumGrid::new(RowsCount(16), ColumnsCount(16)).is_some());
    }

    #[test]
    fn neighbour_cells() {
        let g = small_grid(10, 10);

        let check_expected_neighbours = |coord, expected_neighbours: &[GridCoordinate]| {
            let actual: Vec<GridCoordinate> = g.neighbours(coord).iter().cloned().sorted();
            let expected: Vec<GridCoordinate> =
                expected_neighbours.iter().cloned().sorted();
            assert_eq!(actual, expected);
        };
        let gc = |row, column| GridCoordinate::new(row, column);

        // corners
        check_expected_neighbours(gc(0, 0), &[gc(0, 1), gc(1, 0)]);
        check_expected_neighbours(gc(0, 9), &[gc(0, 8), gc(1, 9)]);
        check_expected_neighbours(gc(9, 0), &[gc(8, 0), gc(9, 1)]);
        check_expected_neighbours(gc(9, 9), &[gc(8, 9), gc(9, 8)]);

        // side element examples
        check_expected_neighbours(gc(0, 1), &[gc(0, 0), gc(0, 2), gc(1, 1)]);
        check_expected_neighbours(gc(1, 0), &[gc(0, 0), gc(2, 0), gc(1, 1)]);
        check_expected_neighbours(gc(8, 0), &[gc(7, 0), gc(9, 0), gc(8, 1)]);
        check_expected_neighbours(gc(8, 9), &[gc(7, 9), gc(9, 9), gc(8, 8)]);

        // Somewhere with 4 neighbours inside the grid
        check_expected_neighbours(gc(1, 1), &[gc(0, 1), gc(1, 0), gc(1, 2), gc(2, 1)]);
    }

    #[test]
    fn neighbours_at_dirs() {
        let g = small_grid(2, 2);
        let gc = |row, column| GridCoordinate::new(row, column);

        let check_neighbours = |coord,
                                dirs: &[CompassPrimary],
                                neighbour_opts: &[Option<GridCoordinate>]| {
            let neighbour_options = g.neighbours_at_directions(coord, dirs);
            assert_eq!(&*neighbour_options, neighbour_opts);
        };
        check_neighbours(gc(0, 0), &[], &[]);
        check_neighbours(gc(0, 0), &[CompassPrimary::North], &[None]);
        check_neighbours(gc(0, 0), &[CompassPrimary::West], &[None]);
        check_neighbours(gc(0, 0),
                         &[CompassPrimary::West, CompassPrimary::North],
                         &[None, None]);
        check_neighbours(gc(0, 0),
                         &[CompassPrimary::East, CompassPrimary::South],
                         &[Some(gc(0, 1)), Some(gc(1, 0))]);

        check_neighbours(gc(1, 1), &[CompassPrimary::South], &[None]);
        check_neighbours(gc(1, 1), &[CompassPrimary::East], &[None]);
        check_neighbours(gc(1, 1),
                         &[CompassPrimary::West, CompassPrimary::North],
                         &[Some(gc(1, 0)), Some(gc(0, 1))]);
    }

    #[test]
    fn neighbour_at_dir() {
        let g = small_grid(2, 2);
        let gc = |row, column| GridCoordinate::new(row, column);
        let check_neighbour = |coord, dir: CompassPrimary, expected| {
            assert_eq!(g.neighbour_at_direction(coord, dir), expected);
        };
        check_neighbour(gc(0, 0), CompassPrimary::North, None);
        check_neighbour(gc(0, 0), CompassPrimary::South, Some(gc(1, 0)));
        check_neighbour(gc(0, 0), CompassPrimary::East, Some(gc(0, 1)));
        check_neighbour(gc(0, 0), CompassPrimary::West, None);

        check_neighbour(gc(1, 1), CompassPrimary::North, Some(gc(0, 1)));
        check_neighbour(gc(1, 1), CompassPrimary::South, None);
        check_neighbour(gc(1, 1), CompassPrimary::East, None);
        check_neighbour(gc(1, 1), CompassPrimary::West, Some(gc(1, 0)));
    }

    #[test]
    fn grid_size() {
        let g = small_grid(10, 10);
        assert_eq!(g.size(), 100);
        assert_eq!(g.rows(), RowsCount(10));
        assert_eq!(g.columns(), ColumnsCount(10));
    }

    #[test]
    fn grid_coordinate_as_index() {
        let g = small_grid(3, 3);
        let gc = |row, column| GridCoordinate::new(row, column);
        let coords = &[gc(0, 0), gc(0, 1), gc(0, 2), gc(1, 0), gc(1, 1), gc(1, 2), gc(2, 0),
                       gc(2, 1), gc(2, 2)];
        let indices: Vec<Option<usize>> = coords.iter()
            .map(|coord| g.grid_coordinate_to_index(*coord))
            .collect();
        let expected = (0..9).map(Some).collect::<Vec<Option<usize>>>();
        assert_eq!(expected, indices);

        assert_eq!(g.grid_coordinate_to_index(gc(2, 3)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(3, 2)), None);
        assert_eq!(g.grid_coordinate_to_index(gc(u32::max_value(), u32::max_value())),
                   None);
    }

    #[test]
    fn random_cell() {
        let g = small_grid(4, 4);
        let mut rng = rand::weak_rng();
        for _ in 0..1000 {
            let coord = g.random_cell(&mut rng);
            assert!(g.is_valid_coordinate(coord));
        }
    }

    #[test]
    fn cell_iter() {
        let g = small_grid(2, 2);
        assert_eq!(g.iter().collect::<Vec<GridCoordinate>>(),
                   &[GridCoordinate::new(0, 0),
                     GridCoordinate::new(0, 1),
                     GridCoordinate::new(1, 0),
                     GridCoordinate::new(1, 1)]);
    }

    #[test]
    fn row_iter() {
        let g = small_grid(2, 2);
        assert_eq!(g.iter_row().collect::<Vec<Vec<GridCoordinate>>>(),
                   &[&[GridCoordinate::new(0, 0), GridCoordinate::new(0, 1)],
                     &[GridCoordinate::new(1, 0), GridCoordinate::new(1, 1)]]);
    }

    #[test]
    fn column_iter() {
        let g = small_grid(2, 2);
        assert_eq!(g.iter_column().collect::<Vec<Vec<GridCoordinate>>>(),
                   &[&[GridCoordinate::new(0, 0), GridCoordinate::new(1, 0)],
                     &[GridCoordinate::new(0, 1), GridCoordinate::new(1, 1)]]);
    }

    #[test]
    fn linking_cells() {
        let mut g = small_grid(4, 4);
        let a = GridCoordinate::new(1, 0);
        let b = GridCoordinate::new(2, 0);
        let c = GridCoordinate::new(3, 0);

        let sorted_links = |grid: &SmallGrid, coord| -> Vec<GridCoordinate> {
            grid.links(coord).expect("coordinate is invalid").iter().cloned().sorted()
        };
        macro_rules! links_sorted {
            ($x:expr) => (sorted_links(&g, $x))
        }

        // The order of the arguments to `is_linked` does not matter
        macro_rules! bi_check_linked {
            ($x:expr, $y:expr) => (g.is_linked($x, $y) && g.is_linked($y, $x))
        }

        let directional_links_check = |grid: &SmallGrid,
                                       coord: GridCoordinate,
                                       expected_dirs_linked: &[CompassPrimary]| {
            let expected_complement: SmallVec<[CompassPrimary; 4]> = COMPASS_PRIMARIES.iter()
                .cloned()
                .filter(|dir| !expected_dirs_linked.contains(dir))
                .collect();
            for exp_dir in expected_dirs_linked {
                assert!(grid.is_neighbour_linked(coord, *exp_dir));
            }
            for not_exp_dir in expected_complement.iter() {
                assert!(!grid.is_neighbour_linked(coord, *not_exp_dir));
            }
        };
        macro_rules! check_directional_links {
            ($coord:expr, $expected:expr) => (directional_links_check(&g, $coord, &$expected))
        }

        // a, b and c start with no links
        assert!(!bi_check_linked!(a, b));
        assert!(!bi_check_linked!(a, c));
        assert!(!bi_check_linked!(b, c));
        assert_eq!(links_sorted!(a), vec![]);
        assert_eq!(links_sorted!(b), vec![]);
        assert_eq!(links_sorted!(c), vec![]);
        check_directional_links!(a, []);
        check_directional_links!(b, []);
        check_directional_links!(c, []);

        g.link(a, b).expect("link failed");
        // a - b linked bi-directionally
        assert!(bi_check_linked!(a, b));
        assert_eq!(links_sorted!(a), vec![b]);
        assert_eq!(links_sorted!(b), vec![a]);
        check_directional_links!(a, [CompassPrimary::South]);
        check_directional_links!(b, [CompassPrimary::North]);
        check_directional_links!(c, []);

        g.link(b, c).expect("link failed");
        // b linked to a & c bi-directionally
        assert!(bi_check_linked!(a, b));
        assert!(bi_check_linked!(b, c));
        assert!(!bi_check_linked!(a, c));
        assert_eq!(links_sorted!(a), vec![b]);
        assert_eq!(links_sorted!(b), vec![a, c]);
        assert_eq!(links_sorted!(c), vec![b]);
        check_directional_links!(a, [CompassPrimary::South]);
        check_directional_links!(b, [CompassPrimary::North, CompassPrimary::South]);
        check_directional_links!(c, [CompassPrimary::North]);

        // a - b unlinked, b still linked to c bi-directionally
        let is_ab_unlinked = g.unlink(a, b);
        assert!(is_ab_unlinked);
        assert!(!bi_check_linked!(a, b));
        assert!(bi_check_linked!(b, c));
        assert_eq!(links_sorted!(a), vec![]);
        assert_eq!(links_sorted!(b), vec![c]);
        assert_eq!(links_sorted!(c), vec![b]);
        check_directional_links!(a, []);
        check_directional_links!(b, [CompassPrimary::South]);
        check_directional_links!(c, [CompassPrimary::North]);

        // a, b and c all unlinked again
        let is_bc_unlinked = g.unlink(b, c);
        assert!(is_bc_unlinked);
        assert!(!bi_check_linked!(a, b));
        assert!(!bi_check_linked!(a, c));
        assert!(!bi_check_linked!(b, c));
        assert_eq!(links_sorted!(a), vec![]);
        assert_eq!(links_sorted!(b), vec![]);
        assert_eq!(links_sorted!(c), vec![]);
        check_directional_links!(a, []);
        check_directional_links!(b, []);
        check_directional_links!(c, []);
    }

    #[test]
    fn no_self_linked_cycles() {
        let mut g = small_grid(4, 4);
        let a = GridCoordinate::new(0, 0);
        assert_eq!(g.link(a, a), Err(CellLinkError::SelfLink));
    }

    #[test]
    fn no_links_to_invalid_coordinates() {
        let mut g = small_grid(4, 4);
        let good_coord = GridCoordinate::new(0, 0);
        let invalid_coord = GridCoordinate::new(100, 100);
        assert_eq!(g.link(good_coord, invalid_coord),
                   Err(CellLinkError::InvalidGridCoordinate));
    }

    #[test]
    fn no_links_between_non_adjacent_cells() {
        let mut g = small_grid(4, 4);
        let a = GridCoordinate::new(0, 0);
        let far = GridCoordinate::new(3, 3);
        let diagonal = GridCoordinate::new(1, 1);
        assert_eq!(g.link(a, far), Err(CellLinkError::NotNeighbours));
        assert_eq!(g.link(a, diagonal), Err(CellLinkError::NotNeighbours));
        assert_eq!(g.links_count(), 0);
    }

    #[test]
    fn no_parallel_duplicated_linked_cells() {
        let mut g = small_grid(4, 4);
        let a = GridCoordinate::new(0, 0);
        let b = GridCoordinate::new(1, 0);
        g.link(a, b).expect("link failed");
        g.link(a, b).expect("link failed");
        assert_smallvec_eq!(g.links(a).unwrap(), vec![b]);
        assert_smallvec_eq!(g.links(b).unwrap(), vec![a]);
        assert_eq!(g.links_count(), 1);

        g.unlink(a, b);
        assert!(g.links(a).unwrap().is_empty());
        assert!(g.links(b).unwrap().is_empty());
    }

    #[test]
    fn dead_end_cells_have_exactly_one_link() {
        let mut g = small_grid(3, 1);
        assert!(g.dead_ends().is_empty());

        g.link(GridCoordinate::new(0, 0), GridCoordinate::new(1, 0)).expect("link failed");
        g.link(GridCoordinate::new(1, 0), GridCoordinate::new(2, 0)).expect("link failed");

        // The corridor ends are dead ends, the middle cell is not.
        assert_eq!(g.dead_ends(),
                   vec![GridCoordinate::new(0, 0), GridCoordinate::new(2, 0)]);
    }

    #[test]
    fn display_draws_walls_and_passages() {
        let mut g = small_grid(1, 2);
        let rendered_closed = format!("{}", g);
        assert_eq!(rendered_closed, "+---+---+\n|   |   |\n+---+---+\n");

        g.link(GridCoordinate::new(0, 0), GridCoordinate::new(0, 1)).expect("link failed");
        let rendered_open = format!("{}", g);
        assert_eq!(rendered_open, "+---+---+\n|       |\n+---+---+\n");
    }
}

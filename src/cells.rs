use std::convert::From;

use smallvec::SmallVec;

use crate::units::{ColumnIndex, ColumnsCount, RowIndex};

/// The identity of one cell in a rectangular lattice.
///
/// Equality and hashing are on the `(row, column)` pair only - the mutable
/// passage state lives in the grid's link graph, not here.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: u32,
    pub column: u32,
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;
pub type CoordinateOptionSmallVec = SmallVec<[Option<GridCoordinate>; 4]>;
pub type DirectionSmallVec = SmallVec<[CompassPrimary; 4]>;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

pub const COMPASS_PRIMARIES: [CompassPrimary; 4] = [CompassPrimary::North,
                                                    CompassPrimary::South,
                                                    CompassPrimary::East,
                                                    CompassPrimary::West];

impl GridCoordinate {
    pub fn new(row: u32, column: u32) -> GridCoordinate {
        GridCoordinate {
            row: row,
            column: column,
        }
    }

    /// Coordinate of the `index`th cell when counting row by row from the
    /// north west corner.
    #[inline]
    pub fn from_row_major_index(index: usize, columns: ColumnsCount) -> GridCoordinate {
        let ColumnsCount(width) = columns;
        GridCoordinate::new((index / width) as u32, (index % width) as u32)
    }

    #[inline]
    pub fn from_row_column_indices(row_index: RowIndex, col_index: ColumnIndex) -> GridCoordinate {
        let (RowIndex(row), ColumnIndex(col)) = (row_index, col_index);
        GridCoordinate::new(row as u32, col as u32)
    }

    /// The coordinate one cell away in the given direction, or `None` where
    /// that coordinate is not representable (north of row zero, west of
    /// column zero). Offsetting does not know about any grid's dimensions,
    /// the grid bounds-checks the result.
    pub fn offset(&self, dir: CompassPrimary) -> Option<GridCoordinate> {
        let (row, column) = (self.row, self.column);
        match dir {
            CompassPrimary::North => {
                if row > 0 {
                    Some(GridCoordinate::new(row - 1, column))
                } else {
                    None
                }
            }
            CompassPrimary::South => Some(GridCoordinate::new(row + 1, column)),
            CompassPrimary::East => Some(GridCoordinate::new(row, column + 1)),
            CompassPrimary::West => {
                if column > 0 {
                    Some(GridCoordinate::new(row, column - 1))
                } else {
                    None
                }
            }
        }
    }

    /// Taxicab distance between two lattice positions, ignoring walls.
    /// Admissible and consistent as an A* heuristic on a 4-connected
    /// unit-cost grid.
    #[inline]
    pub fn manhattan_distance(&self, other: GridCoordinate) -> u32 {
        let d_row = if self.row > other.row {
            self.row - other.row
        } else {
            other.row - self.row
        };
        let d_column = if self.column > other.column {
            self.column - other.column
        } else {
            other.column - self.column
        };
        d_row + d_column
    }
}

impl From<(u32, u32)> for GridCoordinate {
    fn from(row_column_pair: (u32, u32)) -> GridCoordinate {
        GridCoordinate::new(row_column_pair.0, row_column_pair.1)
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::units::ColumnsCount;

    #[test]
    fn row_major_indexing() {
        let columns = ColumnsCount(3);
        assert_eq!(GridCoordinate::from_row_major_index(0, columns),
                   GridCoordinate::new(0, 0));
        assert_eq!(GridCoordinate::from_row_major_index(2, columns),
                   GridCoordinate::new(0, 2));
        assert_eq!(GridCoordinate::from_row_major_index(3, columns),
                   GridCoordinate::new(1, 0));
        assert_eq!(GridCoordinate::from_row_major_index(7, columns),
                   GridCoordinate::new(2, 1));
    }

    #[test]
    fn offsets_at_the_lattice_origin() {
        let origin = GridCoordinate::new(0, 0);
        assert_eq!(origin.offset(CompassPrimary::North), None);
        assert_eq!(origin.offset(CompassPrimary::West), None);
        assert_eq!(origin.offset(CompassPrimary::South),
                   Some(GridCoordinate::new(1, 0)));
        assert_eq!(origin.offset(CompassPrimary::East),
                   Some(GridCoordinate::new(0, 1)));
    }

    #[test]
    fn manhattan_distance_is_symmetric() {
        let a = GridCoordinate::new(0, 0);
        let b = GridCoordinate::new(2, 2);
        assert_eq!(a.manhattan_distance(b), 4);
        assert_eq!(b.manhattan_distance(a), 4);
        assert_eq!(a.manhattan_distance(a), 0);
    }
}

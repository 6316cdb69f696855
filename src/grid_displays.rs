use crate::cells::{CoordinateSmallVec, GridCoordinate};
use crate::pathing::{Distances, MaxDistance};
use crate::utils::FnvHashSet;

/// Decoration hook for the textual grid renderer.
///
/// A grid optionally holds one of these and asks it for the 3 character body
/// of each cell when formatting itself. Overlays (distances, paths, markers)
/// are composed onto a grid this way instead of being grid subtypes.
pub trait GridDisplay {
    fn render_cell_body(&self, _: GridCoordinate) -> String {
        String::from("   ")
    }
}

impl<MaxDistanceT: MaxDistance> GridDisplay for Distances<MaxDistanceT> {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if let Some(d) = self.distance_from_start_to(coord) {
            // centre align, padding 3, lowercase hexadecimal
            format!("{:^3x}", d)
        } else {
            String::from("   ")
        }
    }
}

#[derive(Debug)]
pub struct PathDisplay {
    on_path_coordinates: FnvHashSet<GridCoordinate>,
}

impl PathDisplay {
    pub fn new(path: &[GridCoordinate]) -> PathDisplay {
        PathDisplay { on_path_coordinates: path.iter().cloned().collect() }
    }
}

impl GridDisplay for PathDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {
        if self.on_path_coordinates.contains(&coord) {
            String::from(" . ")
        } else {
            String::from("   ")
        }
    }
}

#[derive(Debug)]
pub struct StartEndPointsDisplay {
    start_coordinates: CoordinateSmallVec,
    end_coordinates: CoordinateSmallVec,
}

impl StartEndPointsDisplay {
    pub fn new(starts: CoordinateSmallVec, ends: CoordinateSmallVec) -> StartEndPointsDisplay {
        StartEndPointsDisplay {
            start_coordinates: starts,
            end_coordinates: ends,
        }
    }
}

impl GridDisplay for StartEndPointsDisplay {
    fn render_cell_body(&self, coord: GridCoordinate) -> String {

        let contains_coordinate =
            |coordinates: &CoordinateSmallVec| coordinates.iter().any(|&c| c == coord);

        if contains_coordinate(&self.start_coordinates) {
            String::from(" S ")
        } else if contains_coordinate(&self.end_coordinates) {
            String::from(" E ")
        } else {
            String::from("   ")
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn path_display_marks_only_path_cells() {
        let path = [GridCoordinate::new(0, 0), GridCoordinate::new(0, 1)];
        let display = PathDisplay::new(&path);
        assert_eq!(display.render_cell_body(GridCoordinate::new(0, 0)), " . ");
        assert_eq!(display.render_cell_body(GridCoordinate::new(1, 1)), "   ");
    }

    #[test]
    fn start_end_display_markers() {
        let starts: CoordinateSmallVec = [GridCoordinate::new(0, 0)].iter().cloned().collect();
        let ends: CoordinateSmallVec = [GridCoordinate::new(2, 2)].iter().cloned().collect();
        let display = StartEndPointsDisplay::new(starts, ends);
        assert_eq!(display.render_cell_body(GridCoordinate::new(0, 0)), " S ");
        assert_eq!(display.render_cell_body(GridCoordinate::new(2, 2)), " E ");
        assert_eq!(display.render_cell_body(GridCoordinate::new(1, 1)), "   ");
    }
}

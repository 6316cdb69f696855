//! PNG rendering of a grid, its distance field and a solution path.

use std::io;
use std::path::Path;

use image::{ImageBuffer, Rgb};

use crate::cells::{CompassPrimary, GridCoordinate};
use crate::grid::{IndexType, RectGrid};
use crate::pathing::Distances;
use crate::units::{ColumnsCount, RowsCount};

const WALL_COLOUR: Rgb<u8> = Rgb { data: [0, 0, 0] };
const BACKGROUND_COLOUR: Rgb<u8> = Rgb { data: [255, 255, 255] };
const PATH_COLOUR: Rgb<u8> = Rgb { data: [255, 120, 120] };
const START_COLOUR: Rgb<u8> = Rgb { data: [255, 230, 60] };
const END_COLOUR: Rgb<u8> = Rgb { data: [90, 220, 220] };

pub struct RenderOptions<'a> {
    cell_side_pixels_length: u32,
    colour_distances: bool,
    mark_start_end: bool,
    show_path: bool,
    start: Option<GridCoordinate>,
    end: Option<GridCoordinate>,
    distances: Option<&'a Distances<u32>>,
    path: Option<&'a [GridCoordinate]>,
    output_file: Option<&'a Path>,
}

impl<'a> RenderOptions<'a> {
    pub fn new() -> RenderOptionsBuilder<'a> {
        RenderOptionsBuilder {
            options: RenderOptions {
                cell_side_pixels_length: 10,
                colour_distances: false,
                mark_start_end: false,
                show_path: false,
                start: None,
                end: None,
                distances: None,
                path: None,
                output_file: None,
            },
        }
    }
}

pub struct RenderOptionsBuilder<'a> {
    options: RenderOptions<'a>,
}

impl<'a> RenderOptionsBuilder<'a> {
    pub fn cell_side_pixels_length(mut self, pixels: u32) -> RenderOptionsBuilder<'a> {
        self.options.cell_side_pixels_length = pixels;
        self
    }

    pub fn colour_distances(mut self, on: bool) -> RenderOptionsBuilder<'a> {
        self.options.colour_distances = on;
        self
    }

    pub fn mark_start_end(mut self, on: bool) -> RenderOptionsBuilder<'a> {
        self.options.mark_start_end = on;
        self
    }

    pub fn show_path(mut self, on: bool) -> RenderOptionsBuilder<'a> {
        self.options.show_path = on;
        self
    }

    pub fn start(mut self, start: Option<GridCoordinate>) -> RenderOptionsBuilder<'a> {
        self.options.start = start;
        self
    }

    pub fn end(mut self, end: Option<GridCoordinate>) -> RenderOptionsBuilder<'a> {
        self.options.end = end;
        self
    }

    pub fn distances(mut self, distances: Option<&'a Distances<u32>>) -> RenderOptionsBuilder<'a> {
        self.options.distances = distances;
        self
    }

    pub fn path(mut self, path: Option<&'a [GridCoordinate]>) -> RenderOptionsBuilder<'a> {
        self.options.path = path;
        self
    }

    pub fn output_file(mut self, file: Option<&'a Path>) -> RenderOptionsBuilder<'a> {
        self.options.output_file = file;
        self
    }

    pub fn build(self) -> RenderOptions<'a> {
        self.options
    }
}

/// Draw the grid to a PNG file.
///
/// Cell interiors are filled first (path overlay, then start/end markers,
/// then the distance gradient) and the black wall lines are drawn on top, one
/// pixel wide. Walls shared between cells are drawn once: every cell owns its
/// east and south wall, the north row and west column also draw the outer
/// boundary.
pub fn render_square_grid<GridIndexType>(grid: &RectGrid<GridIndexType>,
                                         options: &RenderOptions)
                                         -> io::Result<()>
    where GridIndexType: IndexType
{
    let cell_size = options.cell_side_pixels_length;
    let (RowsCount(rows), ColumnsCount(columns)) = (grid.rows(), grid.columns());
    let image_width = cell_size * columns as u32 + 1;
    let image_height = cell_size * rows as u32 + 1;

    let mut image = ImageBuffer::from_pixel(image_width, image_height, BACKGROUND_COLOUR);

    for cell_coord in grid.iter() {

        let x1 = cell_coord.column * cell_size;
        let y1 = cell_coord.row * cell_size;
        let x2 = x1 + cell_size;
        let y2 = y1 + cell_size;

        if let Some(colour) = cell_fill_colour(cell_coord, options) {
            for y in (y1 + 1)..y2 {
                for x in (x1 + 1)..x2 {
                    image.put_pixel(x, y, colour);
                }
            }
        }

        // North and west walls are special cased so the outer boundary of the
        // first row and column gets drawn.
        if grid.neighbour_at_direction(cell_coord, CompassPrimary::North).is_none() {
            horizontal_line(&mut image, x1, x2, y1);
        }
        if grid.neighbour_at_direction(cell_coord, CompassPrimary::West).is_none() {
            vertical_line(&mut image, x1, y1, y2);
        }
        if !grid.is_neighbour_linked(cell_coord, CompassPrimary::East) {
            vertical_line(&mut image, x2, y1, y2);
        }
        if !grid.is_neighbour_linked(cell_coord, CompassPrimary::South) {
            horizontal_line(&mut image, x1, x2, y2);
        }
    }

    if let Some(file_path) = options.output_file {
        image.save(file_path)?;
    }
    Ok(())
}

fn cell_fill_colour(coord: GridCoordinate, options: &RenderOptions) -> Option<Rgb<u8>> {

    if options.show_path {
        if let Some(path) = options.path {
            if path.contains(&coord) {
                return Some(PATH_COLOUR);
            }
        }
    }

    if options.mark_start_end {
        if options.start == Some(coord) {
            return Some(START_COLOUR);
        }
        if options.end == Some(coord) {
            return Some(END_COLOUR);
        }
    }

    if options.colour_distances {
        if let Some(distances) = options.distances {
            if let Some(d) = distances.distance_from_start_to(coord) {
                let max = distances.max();
                if max > 0 {
                    // Bright green at the start shading to dark green at the
                    // maximum distance. The sqrt stretches the bright end so
                    // small distance changes near the start stay visible.
                    let intensity = ((max - d) as f32 / max as f32).sqrt();
                    let dark = (255.0 * intensity) as u8;
                    let bright = 128 + (127.0 * intensity) as u8;
                    return Some(Rgb { data: [dark, bright, dark] });
                }
            }
        }
    }

    None
}

fn horizontal_line(image: &mut ImageBuffer<Rgb<u8>, Vec<u8>>, x1: u32, x2: u32, y: u32) {
    for x in x1..(x2 + 1) {
        image.put_pixel(x, y, WALL_COLOUR);
    }
}

fn vertical_line(image: &mut ImageBuffer<Rgb<u8>, Vec<u8>>, x: u32, y1: u32, y2: u32) {
    for y in y1..(y2 + 1) {
        image.put_pixel(x, y, WALL_COLOUR);
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::grid::SmallGrid;
    use crate::units::{ColumnsCount, RowsCount};

    #[test]
    fn rendering_without_an_output_file_is_a_no_op_success() {
        let g = SmallGrid::new(RowsCount(2), ColumnsCount(2)).unwrap();
        let options = RenderOptions::new().cell_side_pixels_length(4).build();
        assert!(render_square_grid(&g, &options).is_ok());
    }

    #[test]
    fn path_colour_wins_over_markers_and_gradient() {
        let start = GridCoordinate::new(0, 0);
        let path = [start];
        let options = RenderOptions::new()
            .show_path(true)
            .path(Some(&path))
            .mark_start_end(true)
            .start(Some(start))
            .build();
        assert_eq!(cell_fill_colour(start, &options), Some(PATH_COLOUR));
    }
}

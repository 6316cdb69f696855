//! **mazegrid** is a maze generation, analysis and route finding library for
//! rectangular lattice grids.

pub mod astar;
pub mod cells;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod pathing;
pub mod renderers;
pub mod units;
mod utils;

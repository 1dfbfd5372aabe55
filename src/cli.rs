//! Command line option parsing.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use wirecam::window::{WINDOW_HEIGHT, WINDOW_WIDTH};

/// Built-in meshes the viewer can show.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum Shape {
    Cube,
    Sphere,
}

#[derive(Clone, Debug, Parser)]
#[command(name = "wirecam", version, about)]
pub(crate) struct Args {
    /// Window or snapshot width in pixels.
    #[arg(long, default_value_t = WINDOW_WIDTH)]
    pub(crate) width: u32,

    /// Window or snapshot height in pixels.
    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    pub(crate) height: u32,

    /// Built-in mesh to show when no OBJ file is given.
    #[arg(long, value_enum, default_value_t = Shape::Cube)]
    pub(crate) shape: Shape,

    /// Wavefront OBJ file to show instead of a built-in mesh.
    #[arg(long, value_name = "FILE")]
    pub(crate) obj: Option<PathBuf>,

    /// Latitude ring count of the sphere.
    #[arg(long, default_value_t = 12)]
    pub(crate) sphere_points: usize,

    /// Nearest neighbours each sphere point is joined to.
    #[arg(long, default_value_t = 4)]
    pub(crate) sphere_neighbors: usize,

    /// Camera movement speed.
    #[arg(long, default_value_t = 1.0)]
    pub(crate) move_speed: f32,

    /// Camera turning speed.
    #[arg(long, default_value_t = 1.0)]
    pub(crate) turn_speed: f32,

    /// Draw a background grid.
    #[arg(long)]
    pub(crate) grid: bool,

    /// Render a single frame to this PNG file instead of opening a window.
    #[arg(long, value_name = "FILE")]
    pub(crate) snapshot: Option<PathBuf>,

    /// Scene time, in seconds, of the snapshot frame.
    #[arg(long, default_value_t = 0.0, requires = "snapshot")]
    pub(crate) snapshot_time: f32,
}

//! Pixel output for projected wireframes.

mod renderer;

pub use renderer::Renderer;

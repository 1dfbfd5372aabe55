//! Core viewer engine.
//!
//! The [`Engine`] struct is the main entry point for a host loop. It owns the
//! camera, the scene and the [`Renderer`], and runs the per-frame pipeline:
//! model transforms, camera projection, screen mapping, and line drawing.

use std::f32::consts::FRAC_PI_8;
use std::path::Path;

use crate::camera::{Camera, CameraController};
use crate::colors;
use crate::error::Result;
use crate::input::InputState;
use crate::math::{ScreenSize, Vec3};
use crate::mesh::{AttributeValue, Attributes, WireframeMesh, COLOR_ATTRIBUTE};
use crate::render::Renderer;

const GRID_SPACING: i32 = 50;

/// A mesh placed in the scene with a model-space rotation.
#[derive(Debug, Clone)]
pub struct SceneObject {
    pub mesh: WireframeMesh,
    /// Euler angles (radians) applied at time zero.
    pub rotation: Vec3,
    /// Rotation rate in radians per second, added to `rotation` over time.
    pub spin: Vec3,
}

impl SceneObject {
    pub fn new(mesh: WireframeMesh) -> Self {
        Self {
            mesh,
            rotation: Vec3::ZERO,
            spin: Vec3::ZERO,
        }
    }

    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_spin(mut self, spin: Vec3) -> Self {
        self.spin = spin;
        self
    }

    /// The mesh in world space after `elapsed` seconds.
    pub fn world_mesh(&self, elapsed: f32) -> WireframeMesh {
        self.mesh.rotate(self.rotation + self.spin * elapsed)
    }
}

pub struct Engine {
    renderer: Renderer,
    camera: Camera,
    controller: CameraController,
    objects: Vec<SceneObject>,
    elapsed: f32,
    pub draw_grid: bool,
}

impl Engine {
    pub fn new(size: ScreenSize) -> Self {
        Self {
            renderer: Renderer::new(size),
            camera: Camera::default(),
            controller: CameraController::default(),
            objects: Vec::new(),
            elapsed: 0.0,
            draw_grid: false,
        }
    }

    /// The demo scene: a white half-size cube tilted about X, spinning about Y.
    pub fn load_cube_scene(&mut self) {
        let attributes = Attributes::from([(
            COLOR_ATTRIBUTE.to_string(),
            AttributeValue::Color(colors::WIREFRAME),
        )]);
        let cube = WireframeMesh::cube(attributes).scale(0.5);
        self.objects = vec![SceneObject::new(cube)
            .with_rotation(Vec3::new(FRAC_PI_8, 0.0, 0.0))
            .with_spin(Vec3::new(0.0, 1.0, 0.0))];
    }

    pub fn add_object(&mut self, object: SceneObject) {
        self.objects.push(object);
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn clear_objects(&mut self) {
        self.objects.clear();
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn set_controller(&mut self, controller: CameraController) {
        self.controller = controller;
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    pub fn size(&self) -> ScreenSize {
        self.renderer.size()
    }

    pub fn resize(&mut self, size: ScreenSize) {
        log::debug!("resize to {}x{}", size.width, size.height);
        self.renderer.resize(size);
    }

    /// Advances the scene clock and applies held input to the camera.
    pub fn update(&mut self, input: &InputState, delta_time: f32) {
        self.controller.update(&mut self.camera, input, delta_time);
        self.elapsed += delta_time;
    }

    /// Every object's visible segments in pixel space, with its draw color.
    pub fn screen_lines(&self) -> Vec<(Vec3, Vec3, u32)> {
        let size = self.renderer.size();
        let mut lines = Vec::new();
        for object in &self.objects {
            let color = object.mesh.color().unwrap_or(colors::WIREFRAME);
            let screen = self
                .camera
                .project(&object.world_mesh(self.elapsed))
                .to_screen(size);
            lines.extend(screen.lines().into_iter().map(|(a, b)| (a, b, color)));
        }
        lines
    }

    /// Render the current frame
    pub fn render(&mut self) {
        self.renderer.clear(colors::BACKGROUND);
        if self.draw_grid {
            self.renderer.draw_grid(GRID_SPACING, colors::GRID);
        }

        let lines = self.screen_lines();
        log::trace!("frame at {:.3}s: {} segments", self.elapsed, lines.len());
        for (from, to, color) in lines {
            self.renderer.draw_segment(from, to, color);
        }
    }

    /// Returns the rendered frame as bytes (ARGB8888 format)
    pub fn frame_buffer(&self) -> &[u8] {
        self.renderer.as_bytes()
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Writes the last rendered frame to `path`.
    pub fn save_snapshot(&self, path: impl AsRef<Path>) -> Result<()> {
        self.renderer.save_png(path.as_ref())?;
        log::info!("Saved snapshot to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn engine() -> Engine {
        Engine::new(ScreenSize::new(640, 480))
    }

    #[test]
    fn cube_scene_draws_all_edges_centered() {
        let mut engine = engine();
        engine.load_cube_scene();
        let lines = engine.screen_lines();
        assert_eq!(lines.len(), 12);

        let (sum_x, sum_y) = lines
            .iter()
            .fold((0.0, 0.0), |(sx, sy), (a, b, _)| (sx + a.x + b.x, sy + a.y + b.y));
        let n = (lines.len() * 2) as f32;
        // the cube sits on the view axis, so its outline straddles the center
        assert!((sum_x / n - 320.0).abs() < 40.0);
        assert!((sum_y / n - 240.0).abs() < 40.0);
        assert!(lines.iter().all(|&(_, _, c)| c == colors::WIREFRAME));
    }

    #[test]
    fn render_marks_pixels_with_mesh_color() {
        let mut engine = engine();
        let red = 0xFFFF0000;
        let line = WireframeMesh::line(Vec3::new(1.0, 0.0, 0.0))
            .with_attribute(COLOR_ATTRIBUTE, AttributeValue::Color(red));
        engine.add_object(SceneObject::new(line));
        engine.render();

        // origin projects to the center; (1, 0, 0) at depth 3 lands at x = 320 + 240·2/3
        assert_eq!(engine.renderer().get_pixel(320, 240), Some(red));
        assert_eq!(engine.renderer().get_pixel(480, 240), Some(red));
        assert_eq!(engine.renderer().get_pixel(320, 100), Some(colors::BACKGROUND));
    }

    #[test]
    fn update_advances_clock_and_spins_objects() {
        let mut engine = engine();
        engine.load_cube_scene();
        let before = engine.screen_lines();
        engine.update(&InputState::default(), 0.5);
        assert_relative_eq!(engine.elapsed(), 0.5);
        assert_ne!(engine.screen_lines(), before);
        assert_eq!(engine.camera(), &Camera::default());
    }

    #[test]
    fn update_moves_camera_from_input() {
        let mut engine = engine();
        let input = InputState {
            back: true,
            ..Default::default()
        };
        engine.update(&input, 1.0);
        assert_relative_eq!(engine.camera().position().z, 4.0);
    }

    #[test]
    fn objects_behind_camera_draw_nothing() {
        let mut engine = engine();
        engine.load_cube_scene();
        engine.camera_mut().rotate(Vec3::new(0.0, std::f32::consts::PI, 0.0));
        assert!(engine.screen_lines().is_empty());
    }

    #[test]
    fn resize_changes_screen_mapping() {
        let mut engine = engine();
        engine.add_object(SceneObject::new(WireframeMesh::line(Vec3::ZERO)));
        engine.resize(ScreenSize::new(200, 100));
        let (a, _, _) = engine.screen_lines()[0];
        assert_relative_eq!(a.x, 100.0);
        assert_relative_eq!(a.y, 50.0);
        assert_eq!(engine.frame_buffer().len(), 200 * 100 * 4);
    }
}

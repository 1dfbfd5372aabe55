//! Wireframe meshes: vertex slots, an edge list, and an attribute bag.
//!
//! A [`WireframeMesh`] is a value type. Every spatial operation returns a new
//! mesh and leaves the receiver untouched, so a mesh handed out for an earlier
//! frame stays valid however the scene moves on.
//!
//! Vertex slots are `Option<Vec3>`. Clipping and projection empty a slot instead
//! of removing it, so indices held by the edge list never shift.

use std::collections::{BTreeMap, BTreeSet};
use std::f32::consts::{PI, TAU};
use std::path::Path;

use crate::math::{Axes, ScreenSize, Vec3};

/// Default near plane used by [`WireframeMesh::clip_z`] callers without a camera.
pub const DEFAULT_CLIP_Z: f32 = -0.1;
/// Default projection plane used by [`WireframeMesh::project_z`] callers without a camera.
pub const DEFAULT_SCREEN_Z: f32 = -2.0;

/// Attribute key read by [`WireframeMesh::color`].
pub const COLOR_ATTRIBUTE: &str = "color";

/// A value stored in a mesh's attribute bag.
#[derive(Clone, Debug, PartialEq)]
pub enum AttributeValue {
    /// ARGB8888 color.
    Color(u32),
    Number(f64),
    Text(String),
    Flag(bool),
}

/// Named attributes carried unchanged through every transform.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// A line segment between two vertex slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    pub const fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    /// The same edge with its endpoints in ascending order.
    pub fn normalized(self) -> Self {
        if self.a <= self.b {
            self
        } else {
            Self::new(self.b, self.a)
        }
    }
}

impl From<(usize, usize)> for Edge {
    fn from((a, b): (usize, usize)) -> Self {
        Self::new(a, b)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MeshError {
    #[error("edge {edge} references vertex {index}, but the mesh has {vertex_count} vertices")]
    EdgeOutOfBounds {
        edge: usize,
        index: usize,
        vertex_count: usize,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to load OBJ file {path}: {source}")]
    Obj {
        path: String,
        #[source]
        source: tobj::LoadError,
    },
    #[error("OBJ file {path} contains no geometry")]
    Empty { path: String },
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WireframeMesh {
    attributes: Attributes,
    vertices: Vec<Option<Vec3>>,
    edges: Vec<Edge>,
}

impl WireframeMesh {
    /// Builds a mesh from fully present vertices, checking every edge index.
    pub fn new(
        attributes: Attributes,
        vertices: Vec<Vec3>,
        edges: Vec<Edge>,
    ) -> Result<Self, MeshError> {
        let vertex_count = vertices.len();
        for (i, edge) in edges.iter().enumerate() {
            for index in [edge.a, edge.b] {
                if index >= vertex_count {
                    return Err(MeshError::EdgeOutOfBounds {
                        edge: i,
                        index,
                        vertex_count,
                    });
                }
            }
        }
        Ok(Self::from_parts(
            attributes,
            vertices.into_iter().map(Some).collect(),
            edges,
        ))
    }

    /// Assembles a mesh from index lists known to be consistent.
    fn from_parts(attributes: Attributes, vertices: Vec<Option<Vec3>>, edges: Vec<Edge>) -> Self {
        Self {
            attributes,
            vertices,
            edges,
        }
    }

    // ============ Factories ============

    /// The axis-aligned cube spanning [-1, 1] on every axis.
    pub fn cube(attributes: Attributes) -> Self {
        const CORNERS: [[f32; 3]; 8] = [
            // front face
            [-1.0, -1.0, -1.0],
            [-1.0, 1.0, -1.0],
            [1.0, 1.0, -1.0],
            [1.0, -1.0, -1.0],
            // back face
            [-1.0, -1.0, 1.0],
            [-1.0, 1.0, 1.0],
            [1.0, 1.0, 1.0],
            [1.0, -1.0, 1.0],
        ];
        const EDGES: [(usize, usize); 12] = [
            // front face
            (0, 1),
            (1, 2),
            (2, 3),
            (3, 0),
            // back face
            (4, 5),
            (5, 6),
            (6, 7),
            (7, 4),
            // front to back
            (0, 4),
            (1, 5),
            (2, 6),
            (3, 7),
        ];

        Self::from_parts(
            attributes,
            CORNERS.iter().map(|&c| Some(Vec3::from(c))).collect(),
            EDGES.iter().map(|&e| Edge::from(e)).collect(),
        )
    }

    /// A single segment from the origin to `endpoint`.
    pub fn line(endpoint: Vec3) -> Self {
        Self::from_parts(
            Attributes::new(),
            vec![Some(Vec3::ZERO), Some(endpoint)],
            vec![Edge::new(0, 1)],
        )
    }

    /// Points spread over latitude rings of the unit sphere, each joined to its
    /// `neighbor_count` nearest neighbours.
    ///
    /// Ring `i` sits at polar angle `π·(i + 0.5)/point_count` and carries
    /// `ceil(2·point_count·radius)` evenly spaced points.
    pub fn sphere(point_count: usize, neighbor_count: usize) -> Self {
        let mut points = Vec::new();
        for ring in 0..point_count {
            let polar = PI * (ring as f32 + 0.5) / point_count as f32;
            let y = polar.cos();
            let radius = polar.sin();
            let ring_points = (2.0 * point_count as f32 * radius).ceil() as usize;
            for j in 0..ring_points {
                let azimuth = TAU * j as f32 / ring_points as f32;
                points.push(Vec3::new(
                    radius * azimuth.cos(),
                    y,
                    radius * azimuth.sin(),
                ));
            }
        }

        let mut edges = BTreeSet::new();
        for (i, p) in points.iter().enumerate() {
            let mut others: Vec<(f32, usize)> = points
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(j, q)| (p.distance(*q), j))
                .collect();
            others.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
            for &(_, j) in others.iter().take(neighbor_count) {
                edges.insert(Edge::new(i, j).normalized());
            }
        }

        Self::from_parts(
            Attributes::new(),
            points.into_iter().map(Some).collect(),
            edges.into_iter().collect(),
        )
    }

    /// Loads every object of a Wavefront OBJ file into a single wireframe.
    ///
    /// Each face polygon contributes its boundary edges; edges shared between
    /// faces are kept once.
    pub fn from_obj(file_path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = file_path.as_ref();
        let options = tobj::LoadOptions {
            single_index: true,
            triangulate: false,
            ignore_points: true,
            ignore_lines: false,
            ..Default::default()
        };
        let (models, _materials) =
            tobj::load_obj(path, &options).map_err(|source| LoadError::Obj {
                path: path.display().to_string(),
                source,
            })?;

        let mut vertices = Vec::new();
        let mut edges = BTreeSet::new();
        for model in &models {
            let mesh = &model.mesh;
            let base = vertices.len();
            vertices.extend(
                mesh.positions
                    .chunks_exact(3)
                    .map(|p| Some(Vec3::new(p[0], p[1], p[2]))),
            );

            // An empty arity list means every face is a triangle.
            let arities: Vec<usize> = if mesh.face_arities.is_empty() {
                vec![3; mesh.indices.len() / 3]
            } else {
                mesh.face_arities.iter().map(|&n| n as usize).collect()
            };

            let mut start = 0;
            for arity in arities {
                let Some(face) = mesh.indices.get(start..start + arity) else {
                    log::warn!("{}: truncated face in object '{}'", path.display(), model.name);
                    break;
                };
                start += arity;
                if arity < 2 {
                    continue;
                }
                for k in 0..arity {
                    let a = base + face[k] as usize;
                    let b = base + face[(k + 1) % arity] as usize;
                    if a != b {
                        edges.insert(Edge::new(a, b).normalized());
                    }
                }
            }
            log::debug!(
                "{}: object '{}' with {} vertices",
                path.display(),
                model.name,
                mesh.positions.len() / 3
            );
        }

        if vertices.is_empty() {
            return Err(LoadError::Empty {
                path: path.display().to_string(),
            });
        }

        let mesh = Self::from_parts(Attributes::new(), vertices, edges.into_iter().collect());
        log::info!(
            "Loaded {} ({} vertices, {} edges)",
            path.display(),
            mesh.vertex_count(),
            mesh.edge_count()
        );
        Ok(mesh)
    }

    // ============ Accessors ============

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    /// The `"color"` attribute, if present and holding a color.
    pub fn color(&self) -> Option<u32> {
        match self.attribute(COLOR_ATTRIBUTE) {
            Some(AttributeValue::Color(color)) => Some(*color),
            _ => None,
        }
    }

    /// Returns a copy of this mesh with one attribute set.
    pub fn with_attribute(mut self, name: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(name.into(), value);
        self
    }

    pub fn vertices(&self) -> &[Option<Vec3>] {
        &self.vertices
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Number of vertex slots, empty ones included.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Endpoint pairs of every edge whose two vertices are present.
    pub fn lines(&self) -> Vec<(Vec3, Vec3)> {
        self.edges
            .iter()
            .filter_map(|e| Some((self.vertex(e.a)?, self.vertex(e.b)?)))
            .collect()
    }

    fn vertex(&self, index: usize) -> Option<Vec3> {
        self.vertices.get(index).copied().flatten()
    }

    // ============ Transforms ============

    /// Applies `f` to every present vertex; empty slots stay empty.
    fn map_vertices(&self, f: impl Fn(Vec3) -> Vec3) -> Self {
        Self::from_parts(
            self.attributes.clone(),
            self.vertices.iter().map(|v| v.map(&f)).collect(),
            self.edges.clone(),
        )
    }

    pub fn translate(&self, delta: Vec3) -> Self {
        self.map_vertices(|v| v.translate(delta))
    }

    pub fn scale(&self, factor: f32) -> Self {
        self.map_vertices(|v| v.scale(factor))
    }

    pub fn scale_xyz(&self, factors: Vec3) -> Self {
        self.map_vertices(|v| v.scale_by(factors))
    }

    pub fn mirror(&self, axes: Axes) -> Self {
        self.map_vertices(|v| v.mirror(axes))
    }

    pub fn mirror_x(&self) -> Self {
        self.mirror(Axes::X)
    }

    pub fn mirror_y(&self) -> Self {
        self.mirror(Axes::Y)
    }

    pub fn mirror_z(&self) -> Self {
        self.mirror(Axes::Z)
    }

    /// Rotates about X, then Y, then Z (radians). See [`Vec3::rotate`].
    pub fn rotate(&self, angles: Vec3) -> Self {
        self.map_vertices(|v| v.rotate(angles))
    }

    pub fn rotate_degrees(&self, angles: Vec3) -> Self {
        self.map_vertices(|v| v.rotate_degrees(angles))
    }

    /// Discards geometry in front of the plane `z = max_z`.
    ///
    /// Vertices with `z > max_z` become empty slots. An edge with one surviving
    /// endpoint is cut at the plane: the intersection is appended as a new
    /// vertex and the edge is rewritten to use it. Edges with no surviving
    /// endpoint, or touching a slot that was already empty, are dropped.
    pub fn clip_z(&self, max_z: f32) -> Self {
        let mut vertices: Vec<Option<Vec3>> = self
            .vertices
            .iter()
            .map(|v| v.and_then(|v| v.clip_z(max_z)))
            .collect();
        let mut edges = Vec::with_capacity(self.edges.len());

        for edge in &self.edges {
            let (Some(p1), Some(p2)) = (self.vertex(edge.a), self.vertex(edge.b)) else {
                continue;
            };
            let kept = (vertices[edge.a].is_some(), vertices[edge.b].is_some());
            let split_at = || {
                let ratio = (max_z - p2.z) / (p1.z - p2.z);
                Vec3::new(
                    p2.x + (p1.x - p2.x) * ratio,
                    p2.y + (p1.y - p2.y) * ratio,
                    max_z,
                )
            };
            match kept {
                (true, true) => edges.push(*edge),
                (false, false) => {}
                (true, false) => {
                    vertices.push(Some(split_at()));
                    edges.push(Edge::new(edge.a, vertices.len() - 1));
                }
                (false, true) => {
                    vertices.push(Some(split_at()));
                    edges.push(Edge::new(vertices.len() - 1, edge.b));
                }
            }
        }

        log::trace!(
            "clip_z({max_z}): {} -> {} edges, {} vertices appended",
            self.edges.len(),
            edges.len(),
            vertices.len() - self.vertices.len()
        );
        Self::from_parts(self.attributes.clone(), vertices, edges)
    }

    /// Perspective-projects every vertex onto the plane `z = screen_z`.
    ///
    /// A vertex at `z == 0` has no projection; its slot is emptied and every
    /// edge touching it is dropped.
    pub fn project_z(&self, screen_z: f32) -> Self {
        let vertices: Vec<Option<Vec3>> = self
            .vertices
            .iter()
            .map(|v| v.and_then(|v| v.project_z(screen_z)))
            .collect();
        let edges = self
            .edges
            .iter()
            .filter(|e| {
                matches!(vertices.get(e.a), Some(Some(_)))
                    && matches!(vertices.get(e.b), Some(Some(_)))
            })
            .copied()
            .collect();
        Self::from_parts(self.attributes.clone(), vertices, edges)
    }

    /// Maps projected geometry to pixel coordinates. See [`Vec3::to_screen`].
    pub fn to_screen(&self, size: ScreenSize) -> Self {
        self.map_vertices(|v| v.to_screen(size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn two_point_mesh(p1: Vec3, p2: Vec3) -> WireframeMesh {
        WireframeMesh::new(Attributes::new(), vec![p1, p2], vec![Edge::new(0, 1)])
            .unwrap()
    }

    #[test]
    fn new_rejects_out_of_range_edges() {
        let result = WireframeMesh::new(
            Attributes::new(),
            vec![Vec3::ZERO, Vec3::ONE],
            vec![Edge::new(0, 1), Edge::new(1, 2)],
        );
        assert_eq!(
            result,
            Err(MeshError::EdgeOutOfBounds {
                edge: 1,
                index: 2,
                vertex_count: 2
            })
        );
    }

    #[test]
    fn cube_has_eight_corners_and_twelve_edges() {
        let cube = WireframeMesh::cube(Attributes::new());
        assert_eq!(cube.vertex_count(), 8);
        assert_eq!(cube.edge_count(), 12);
        for v in cube.vertices() {
            let v = v.unwrap_or(Vec3::splat(f32::NAN));
            for c in [v.x, v.y, v.z] {
                assert!((-1.0..=1.0).contains(&c));
            }
        }
        for e in cube.edges() {
            assert!(e.a < 8 && e.b < 8);
        }
        // every cube edge runs along one axis with length 2
        for (a, b) in cube.lines() {
            assert_relative_eq!(a.distance(b), 2.0);
        }
        let unique: BTreeSet<Edge> = cube.edges().iter().map(|e| e.normalized()).collect();
        assert_eq!(unique.len(), 12);
    }

    #[test]
    fn line_joins_origin_to_endpoint() {
        let line = WireframeMesh::line(Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(line.lines(), vec![(Vec3::ZERO, Vec3::new(1.0, 2.0, 3.0))]);
    }

    #[test]
    fn sphere_edges_are_valid_and_unique() {
        let sphere = WireframeMesh::sphere(6, 4);
        let n = sphere.vertex_count();
        assert!(n > 0);
        let mut seen = BTreeSet::new();
        for e in sphere.edges() {
            assert!(e.a < n && e.b < n);
            assert_ne!(e.a, e.b);
            // (i, j) and (j, i) never both appear
            assert!(seen.insert(e.normalized()));
        }
        // every point keeps at least its own nearest neighbours
        assert!(sphere.edge_count() >= n * 4 / 2);
        for v in sphere.vertices().iter().flatten() {
            assert_relative_eq!(v.magnitude(), 1.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn sphere_ring_sizes_follow_radius() {
        // Two rings at polar angles π/4 and 3π/4: ceil(2·2·sin(π/4)) = 3 points each.
        assert_eq!(WireframeMesh::sphere(2, 1).vertex_count(), 6);
    }

    #[test]
    fn identity_transforms_preserve_mesh() {
        let cube = WireframeMesh::cube(Attributes::new());
        assert_eq!(cube.rotate(Vec3::ZERO), cube);
        assert_eq!(cube.translate(Vec3::ZERO), cube);
        assert_eq!(cube.scale(1.0), cube);
    }

    #[test]
    fn transforms_keep_attributes_edges_and_source() {
        let cube = WireframeMesh::cube(Attributes::new())
            .with_attribute(COLOR_ATTRIBUTE, AttributeValue::Color(0xFFFF0000));
        let moved = cube.translate(Vec3::new(1.0, 0.0, 0.0)).scale(0.5).mirror_z();
        assert_eq!(moved.color(), Some(0xFFFF0000));
        assert_eq!(moved.edges(), cube.edges());
        assert_eq!(cube.vertices()[0], Some(Vec3::new(-1.0, -1.0, -1.0)));
        assert_eq!(moved.vertices()[0], Some(Vec3::new(0.0, -0.5, 0.5)));
    }

    #[test]
    fn transforms_keep_empty_slots_empty() {
        let clipped = two_point_mesh(Vec3::new(0.0, 0.0, -2.0), Vec3::new(0.0, 0.0, 1.0))
            .clip_z(-0.5);
        let moved = clipped.translate(Vec3::ONE).rotate(Vec3::new(0.1, 0.2, 0.3));
        assert_eq!(moved.vertices()[1], None);
        assert_eq!(moved.vertex_count(), clipped.vertex_count());
    }

    #[test]
    fn clip_at_infinity_changes_nothing() {
        let sphere = WireframeMesh::sphere(4, 3).translate(Vec3::new(0.0, 0.0, 5.0));
        assert_eq!(sphere.clip_z(f32::INFINITY), sphere);
    }

    #[test]
    fn clip_splits_crossing_edge() {
        let clipped = two_point_mesh(Vec3::new(0.0, 0.0, -2.0), Vec3::new(0.0, 0.0, 1.0))
            .clip_z(-0.5);
        assert_eq!(
            clipped.vertices(),
            &[
                Some(Vec3::new(0.0, 0.0, -2.0)),
                None,
                Some(Vec3::new(0.0, 0.0, -0.5))
            ]
        );
        assert_eq!(clipped.edges(), &[Edge::new(0, 2)]);
    }

    #[test]
    fn clip_interpolates_x_and_y() {
        let clipped = two_point_mesh(Vec3::new(4.0, 2.0, 1.0), Vec3::new(0.0, 0.0, -3.0))
            .clip_z(-1.0);
        let cut = clipped.vertices()[2].unwrap_or(Vec3::splat(f32::NAN));
        assert_relative_eq!(cut.x, 2.0);
        assert_relative_eq!(cut.y, 1.0);
        assert_relative_eq!(cut.z, -1.0);
        assert_eq!(clipped.edges(), &[Edge::new(2, 1)]);
    }

    #[test]
    fn clip_drops_edges_fully_in_front() {
        let clipped = two_point_mesh(Vec3::new(0.0, 0.0, 1.0), Vec3::new(1.0, 0.0, 2.0))
            .clip_z(DEFAULT_CLIP_Z);
        assert_eq!(clipped.vertices(), &[None, None]);
        assert!(clipped.edges().is_empty());
        assert!(clipped.lines().is_empty());
    }

    #[test]
    fn clip_drops_edges_touching_already_empty_slots() {
        let once = two_point_mesh(Vec3::new(0.0, 0.0, -2.0), Vec3::new(0.0, 0.0, 1.0))
            .clip_z(-0.5);
        // the rewritten edge uses present slots only, so it survives a second pass
        let twice = once.clip_z(-0.5);
        assert_eq!(twice.edges(), once.edges());

        let mut hole = once.clone();
        hole.edges.push(Edge::new(0, 1));
        assert_eq!(hole.clip_z(-0.5).edges(), once.edges());
    }

    #[test]
    fn clipped_edges_never_reference_empty_slots() {
        let cube = WireframeMesh::cube(Attributes::new()).rotate(Vec3::new(0.3, 0.5, 0.0));
        let clipped = cube.clip_z(0.2);
        assert!(clipped.vertex_count() > 8);
        for e in clipped.edges() {
            assert!(clipped.vertices()[e.a].is_some());
            assert!(clipped.vertices()[e.b].is_some());
        }
        assert_eq!(clipped.lines().len(), clipped.edge_count());
    }

    #[test]
    fn project_scales_by_screen_over_depth() {
        let projected = two_point_mesh(Vec3::new(3.0, 3.0, -3.0), Vec3::new(1.0, -1.0, -1.0))
            .project_z(DEFAULT_SCREEN_Z);
        let lines = projected.lines();
        assert_eq!(lines.len(), 1);
        let (a, b) = lines[0];
        assert_relative_eq!(a.x, 2.0, epsilon = 1e-6);
        assert_relative_eq!(a.y, 2.0, epsilon = 1e-6);
        assert_relative_eq!(b.x, 2.0, epsilon = 1e-6);
        assert_relative_eq!(b.y, -2.0, epsilon = 1e-6);
        assert_relative_eq!(a.z, DEFAULT_SCREEN_Z);
    }

    #[test]
    fn project_drops_edges_at_eye_depth() {
        let projected =
            two_point_mesh(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0)).project_z(-2.0);
        assert_eq!(projected.vertices()[0], None);
        assert!(projected.edges().is_empty());
        assert!(projected.lines().is_empty());
    }

    #[test]
    fn to_screen_centers_origin() {
        let screen = WireframeMesh::line(Vec3::new(1.0, 1.0, -2.0)).to_screen(ScreenSize::new(640, 480));
        let (origin, corner) = screen.lines()[0];
        assert_relative_eq!(origin.x, 320.0);
        assert_relative_eq!(origin.y, 240.0);
        assert_relative_eq!(corner.x, 560.0);
        assert_relative_eq!(corner.y, 0.0);
    }

    #[test]
    fn obj_faces_become_unique_edges() {
        let path = std::env::temp_dir().join(format!("wirecam-quad-{}.obj", std::process::id()));
        std::fs::write(
            &path,
            "o quad\nv 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3\nf 1 3 4\n",
        )
        .unwrap();
        let mesh = WireframeMesh::from_obj(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(mesh.vertex_count(), 4);
        // two triangles sharing the diagonal: 4 sides + 1 diagonal
        assert_eq!(mesh.edge_count(), 5);
    }

    #[test]
    fn obj_missing_file_is_an_error() {
        let err = WireframeMesh::from_obj("/nonexistent/wirecam.obj").unwrap_err();
        assert!(matches!(err, LoadError::Obj { .. }));
    }
}

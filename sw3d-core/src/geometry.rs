/// Geometry primitives for 3D rendering
use nalgebra::{Matrix4, Point3, Vector3};

use crate::color::Color;
use crate::error::{Error, Result};
use crate::transform::{point, RigidTransform, RotationState, Transform, Vertex};

/// A triangle face defined by three homogeneous vertices
#[derive(Debug, Clone)]
pub struct Triangle {
    pub vertices: [Vertex; 3],
    distance_to_camera: f32,
    color: Color,
}

impl Triangle {
    pub fn new(v0: Vertex, v1: Vertex, v2: Vertex) -> Self {
        Self {
            vertices: [v0, v1, v2],
            distance_to_camera: 0.0,
            color: Color::default(),
        }
    }

    /// Unnormalized face normal (v1 - v0) x (v2 - v0), derived from the current positions
    pub fn surface_normal(&self) -> Vector3<f32> {
        let v0 = self.vertices[0].xyz();
        let v1 = self.vertices[1].xyz();
        let v2 = self.vertices[2].xyz();

        let edge1 = v1 - v0;
        let edge2 = v2 - v0;

        edge1.cross(&edge2)
    }

    /// Unit face normal, or `DegenerateGeometry` for a zero-area triangle
    pub fn unit_normal(&self) -> Result<Vector3<f32>> {
        self.surface_normal()
            .try_normalize(f32::EPSILON)
            .ok_or(Error::DegenerateGeometry("zero-area triangle has no normal"))
    }

    /// Mean of the three vertices
    pub fn centroid(&self) -> Point3<f32> {
        let sum = self.vertices[0].xyz() + self.vertices[1].xyz() + self.vertices[2].xyz();
        Point3::from(sum / 3.0)
    }

    /// Distance from the centroid to `eye`. An ordering key, not a true point-triangle distance.
    pub fn distance_to(&self, eye: &Point3<f32>) -> f32 {
        nalgebra::distance(&self.centroid(), eye)
    }

    pub fn set_distance_to_camera(&mut self, eye: &Point3<f32>) {
        self.distance_to_camera = self.distance_to(eye);
    }

    pub fn distance_to_camera(&self) -> f32 {
        self.distance_to_camera
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Apply `matrix` to all three vertices, overwriting w
    pub fn transform(&mut self, matrix: &Matrix4<f32>) {
        for vertex in &mut self.vertices {
            *vertex = Transform::apply(matrix, vertex);
        }
    }
}

/// A 3D mesh composed of triangles sharing a pivot and a color
#[derive(Debug, Clone)]
pub struct Mesh {
    pub triangles: Vec<Triangle>,
    center: Point3<f32>,
    color: Color,
}

impl Mesh {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            triangles: Vec::with_capacity(capacity),
            center: Point3::origin(),
            color: Color::WHITE,
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn len(&self) -> usize {
        self.triangles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Pivot used by [`Mesh::scale`] and [`Mesh::rotate`]
    pub fn center(&self) -> Point3<f32> {
        self.center
    }

    /// Set an explicit pivot. Takes effect for the next scale or rotate.
    pub fn set_center(&mut self, x: f32, y: f32, z: f32) {
        self.center = Point3::new(x, y, z);
    }

    /// Rotate about the current pivot: X first, then Y, then Z (angles in degrees)
    pub fn rotate(&mut self, x_deg: f32, y_deg: f32, z_deg: f32) {
        let rotation = RotationState::from_degrees(x_deg, y_deg, z_deg);
        self.rotate_radians(&rotation);
    }

    fn rotate_radians(&mut self, rotation: &RotationState) {
        let matrix = Transform::about_pivot(&Transform::rotation_matrix(rotation), &self.center);
        self.transform_all(&matrix);
    }

    /// Scale about the current pivot
    pub fn scale(&mut self, x: f32, y: f32, z: f32) {
        let matrix = Transform::about_pivot(&Transform::scale_matrix(x, y, z), &self.center);
        self.transform_all(&matrix);
    }

    /// Translate every vertex, then move the pivot to the new centroid
    pub fn translate(&mut self, x: f32, y: f32, z: f32) {
        self.transform_all(&Transform::translation_matrix(x, y, z));
        self.recompute_center();
    }

    /// Scale, rotate, then translate, so scale and rotate never see a stale pivot
    pub fn apply(&mut self, rigid: &RigidTransform) {
        let s = rigid.scale;
        if s != Vector3::new(1.0, 1.0, 1.0) {
            self.scale(s.x, s.y, s.z);
        }
        if !rigid.rotation.is_zero() {
            self.rotate_radians(&rigid.rotation);
        }
        let t = rigid.translation;
        self.translate(t.x, t.y, t.z);
    }

    fn transform_all(&mut self, matrix: &Matrix4<f32>) {
        for triangle in &mut self.triangles {
            triangle.transform(matrix);
        }
    }

    /// Centroid of all 3N vertices. An empty mesh keeps its pivot.
    fn recompute_center(&mut self) {
        if self.triangles.is_empty() {
            return;
        }

        let sum = self
            .triangles
            .iter()
            .flat_map(|t| t.vertices.iter())
            .fold(Vector3::zeros(), |acc, v| acc + v.xyz());
        let count = (self.triangles.len() * 3) as f32;
        self.center = Point3::from(sum / count);
    }

    /// Create a simple cube mesh centered on the origin, faces wound outward
    pub fn cube(size: f32) -> Self {
        let h = size / 2.0;
        let corner = |x: f32, y: f32, z: f32| point(x * h, y * h, z * h);
        let mut mesh = Self::with_capacity(12);

        let quads = [
            // Front
            [(-1.0, -1.0, 1.0), (1.0, -1.0, 1.0), (1.0, 1.0, 1.0), (-1.0, 1.0, 1.0)],
            // Back
            [(-1.0, -1.0, -1.0), (-1.0, 1.0, -1.0), (1.0, 1.0, -1.0), (1.0, -1.0, -1.0)],
            // Top
            [(-1.0, 1.0, -1.0), (-1.0, 1.0, 1.0), (1.0, 1.0, 1.0), (1.0, 1.0, -1.0)],
            // Bottom
            [(-1.0, -1.0, -1.0), (1.0, -1.0, -1.0), (1.0, -1.0, 1.0), (-1.0, -1.0, 1.0)],
            // Right
            [(1.0, -1.0, -1.0), (1.0, 1.0, -1.0), (1.0, 1.0, 1.0), (1.0, -1.0, 1.0)],
            // Left
            [(-1.0, -1.0, -1.0), (-1.0, -1.0, 1.0), (-1.0, 1.0, 1.0), (-1.0, 1.0, -1.0)],
        ];

        for [a, b, c, d] in quads {
            let (a, b, c, d) = (
                corner(a.0, a.1, a.2),
                corner(b.0, b.1, b.2),
                corner(c.0, c.1, c.2),
                corner(d.0, d.1, d.2),
            );
            mesh.add_triangle(Triangle::new(a, b, c));
            mesh.add_triangle(Triangle::new(a, c, d));
        }

        mesh
    }
}

impl Default for Mesh {
    fn default() -> Self {
        Self::new()
    }
}

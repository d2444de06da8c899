/// 3D transformation matrices, rotation state and rigid transforms
use nalgebra::{DMatrix, Matrix4, Point3, Vector3, Vector4};

use crate::error::{Error, Result};

/// Homogeneous vertex (x, y, z, w). Points carry w = 1.
pub type Vertex = Vector4<f32>;

/// Build a point with w = 1
pub fn point(x: f32, y: f32, z: f32) -> Vertex {
    Vector4::new(x, y, z, 1.0)
}

/// Rotation state around three axes (in radians)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
        }
    }

    /// Convert degree angles once, at the API boundary
    pub fn from_degrees(x: f32, y: f32, z: f32) -> Self {
        Self::new(x.to_radians(), y.to_radians(), z.to_radians())
    }

    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }
}

impl Default for RotationState {
    fn default() -> Self {
        Self::zero()
    }
}

/// Matrix builders and products for 3D transformations
pub struct Transform;

impl Transform {
    /// Right-handed rotation about the X axis
    #[rustfmt::skip]
    pub fn rotation_x(angle: f32) -> Matrix4<f32> {
        let (sin, cos) = angle.sin_cos();
        Matrix4::new(
            1.0, 0.0, 0.0, 0.0,
            0.0, cos, -sin, 0.0,
            0.0, sin, cos, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Right-handed rotation about the Y axis
    #[rustfmt::skip]
    pub fn rotation_y(angle: f32) -> Matrix4<f32> {
        let (sin, cos) = angle.sin_cos();
        Matrix4::new(
            cos, 0.0, sin, 0.0,
            0.0, 1.0, 0.0, 0.0,
            -sin, 0.0, cos, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Right-handed rotation about the Z axis
    #[rustfmt::skip]
    pub fn rotation_z(angle: f32) -> Matrix4<f32> {
        let (sin, cos) = angle.sin_cos();
        Matrix4::new(
            cos, -sin, 0.0, 0.0,
            sin, cos, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Create a rotation matrix from a rotation state
    pub fn rotation_matrix(rotation: &RotationState) -> Matrix4<f32> {
        let rx = Self::rotation_x(rotation.x);
        let ry = Self::rotation_y(rotation.y);
        let rz = Self::rotation_z(rotation.z);

        // X is applied first, then Y, then Z
        rz * ry * rx
    }

    /// Create a translation matrix
    pub fn translation_matrix(x: f32, y: f32, z: f32) -> Matrix4<f32> {
        Matrix4::new_translation(&Vector3::new(x, y, z))
    }

    /// Create a scale matrix
    pub fn scale_matrix(sx: f32, sy: f32, sz: f32) -> Matrix4<f32> {
        Matrix4::new_nonuniform_scaling(&Vector3::new(sx, sy, sz))
    }

    /// Conjugate `matrix` so it acts about `pivot` instead of the origin
    pub fn about_pivot(matrix: &Matrix4<f32>, pivot: &Point3<f32>) -> Matrix4<f32> {
        let to_origin = Self::translation_matrix(-pivot.x, -pivot.y, -pivot.z);
        let back = Self::translation_matrix(pivot.x, pivot.y, pivot.z);
        back * matrix * to_origin
    }

    /// Multiply a 4x1 column by a 4x4 matrix. All four components are overwritten, w included.
    pub fn apply(matrix: &Matrix4<f32>, vertex: &Vertex) -> Vertex {
        matrix * vertex
    }

    /// General row-by-column product for operands whose shape is only known at runtime
    pub fn multiply(a: &DMatrix<f32>, b: &DMatrix<f32>) -> Result<DMatrix<f32>> {
        if a.ncols() != b.nrows() {
            return Err(Error::DimensionMismatch {
                left: a.shape(),
                right: b.shape(),
            });
        }

        Ok(DMatrix::from_fn(a.nrows(), b.ncols(), |i, j| {
            (0..a.ncols()).map(|k| a[(i, k)] * b[(k, j)]).sum()
        }))
    }

    /// Divide through by w: (x, y, z, w) -> (x/w, y/w, z/w, 1).
    ///
    /// A zero w yields non-finite components, which the clip test rejects.
    pub fn perspective_divide(vertex: &Vertex) -> Vertex {
        let w = vertex.w;
        Vector4::new(vertex.x / w, vertex.y / w, vertex.z / w, 1.0)
    }
}

/// Scale, rotation and translation applied as one operation, always in that order.
///
/// Scale and rotation act about the mesh pivot; translation moves the result and
/// the pivot is recomputed afterwards (see [`crate::Mesh::apply`]).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigidTransform {
    pub scale: Vector3<f32>,
    pub rotation: RotationState,
    pub translation: Vector3<f32>,
}

impl RigidTransform {
    pub fn identity() -> Self {
        Self {
            scale: Vector3::new(1.0, 1.0, 1.0),
            rotation: RotationState::zero(),
            translation: Vector3::zeros(),
        }
    }

    pub fn scaled(mut self, x: f32, y: f32, z: f32) -> Self {
        self.scale = Vector3::new(x, y, z);
        self
    }

    pub fn rotated_degrees(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = RotationState::from_degrees(x, y, z);
        self
    }

    pub fn translated(mut self, x: f32, y: f32, z: f32) -> Self {
        self.translation = Vector3::new(x, y, z);
        self
    }
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Camera, view/projection/viewport matrices and the clip test
use nalgebra::{Matrix4, Point3, Vector3};

use crate::surface::{InputSource, InputSymbol};
use crate::transform::{Transform, Vertex};

pub const DEFAULT_MOVE_SPEED: f32 = 0.3;
/// Degrees per activated turn input
pub const DEFAULT_TURN_SPEED: f32 = 3.0;

/// Read-only projection parameters handed to the pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectionParams {
    pub z_near: f32,
    pub z_far: f32,
    /// Vertical field of view in degrees
    pub field_of_view: u32,
    pub aspect: f32,
}

/// First-person camera with yaw/pitch in degrees
#[derive(Debug, Clone)]
pub struct Camera {
    position: Point3<f32>,
    yaw: f32,
    pitch: f32,
    z_near: f32,
    z_far: f32,
    fov: u32,
    aspect: f32,
    speed: f32,
    turn_speed: f32,
}

impl Camera {
    pub fn new(position: Point3<f32>, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
            z_near: 0.1,
            z_far: 20.0,
            fov: 60,
            aspect: 1.0,
            speed: DEFAULT_MOVE_SPEED,
            turn_speed: DEFAULT_TURN_SPEED,
        }
    }

    pub fn clip_planes(mut self, z_near: f32, z_far: f32) -> Self {
        self.z_near = z_near;
        self.z_far = z_far;
        self
    }

    pub fn field_of_view(mut self, degrees: u32) -> Self {
        self.fov = degrees;
        self
    }

    /// Width over height of the output surface. 1.0 leaves x and y scaled alike.
    pub fn aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    pub fn speeds(mut self, speed: f32, turn_speed: f32) -> Self {
        self.speed = speed;
        self.turn_speed = turn_speed;
        self
    }

    /// Offset applied to the world: the negated stored position.
    ///
    /// The view matrix moves the world opposite to the camera, so every consumer
    /// must negate this again to get back to the eye.
    pub fn world_position(&self) -> Vector3<f32> {
        -self.position.coords
    }

    /// Point the scene is viewed from (`-world_position()`)
    pub fn eye(&self) -> Point3<f32> {
        Point3::from(-self.world_position())
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn projection_params(&self) -> ProjectionParams {
        ProjectionParams {
            z_near: self.z_near,
            z_far: self.z_far,
            field_of_view: self.fov,
            aspect: self.aspect,
        }
    }

    /// Apply one frame of FPS-style controls. Walk and strafe follow the current yaw.
    pub fn update<I: InputSource + ?Sized>(&mut self, input: &mut I) {
        if input.was_activated(InputSymbol::TurnLeft) {
            self.yaw += self.turn_speed;
        }
        if input.was_activated(InputSymbol::TurnRight) {
            self.yaw -= self.turn_speed;
        }
        if input.was_activated(InputSymbol::PitchUp) {
            self.pitch += self.turn_speed;
        }
        if input.was_activated(InputSymbol::PitchDown) {
            self.pitch -= self.turn_speed;
        }

        let forward = self.forward();
        let right = Vector3::new(forward.z, 0.0, -forward.x);

        if input.was_activated(InputSymbol::Forward) {
            self.translate(-forward);
        }
        if input.was_activated(InputSymbol::Backward) {
            self.translate(forward);
        }
        if input.was_activated(InputSymbol::StrafeLeft) {
            self.translate(-right);
        }
        if input.was_activated(InputSymbol::StrafeRight) {
            self.translate(right);
        }
        if input.was_activated(InputSymbol::Up) {
            self.translate(Vector3::y() * self.speed);
        }
        if input.was_activated(InputSymbol::Down) {
            self.translate(-Vector3::y() * self.speed);
        }
    }

    /// (sin yaw, 0, cos yaw) scaled by speed; the camera looks along its negation
    fn forward(&self) -> Vector3<f32> {
        let (sin, cos) = self.yaw.to_radians().sin_cos();
        Vector3::new(sin, 0.0, cos) * self.speed
    }

    fn translate(&mut self, delta: Vector3<f32>) {
        let moved = Transform::translation_matrix(delta.x, delta.y, delta.z)
            .transform_point(&self.position);
        self.position = moved;
    }

    /// Look-from-yaw-pitch view matrix
    #[rustfmt::skip]
    pub fn view_matrix(&self) -> Matrix4<f32> {
        let (sin_pitch, cos_pitch) = self.pitch.to_radians().sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.to_radians().sin_cos();

        let x_axis = Vector3::new(cos_yaw, 0.0, -sin_yaw);
        let y_axis = Vector3::new(sin_yaw * sin_pitch, cos_pitch, cos_yaw * sin_pitch);
        let z_axis = Vector3::new(sin_yaw * cos_pitch, -sin_pitch, cos_pitch * cos_yaw);

        let eye = self.eye().coords;

        Matrix4::new(
            x_axis.x, x_axis.y, x_axis.z, -x_axis.dot(&eye),
            y_axis.x, y_axis.y, y_axis.z, -y_axis.dot(&eye),
            z_axis.x, z_axis.y, z_axis.z, -z_axis.dot(&eye),
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// Perspective projection. Visible depths land in `[0, 1]` after the divide.
    #[rustfmt::skip]
    pub fn projection_matrix(&self) -> Matrix4<f32> {
        let (n, f) = (self.z_near, self.z_far);
        let scale = 1.0 / (self.fov as f32 / 2.0).to_radians().tan();

        Matrix4::new(
            scale / self.aspect, 0.0, 0.0, 0.0,
            0.0, scale, 0.0, 0.0,
            0.0, 0.0, -f / (f - n), -(f * n) / (f - n),
            0.0, 0.0, -1.0, 0.0,
        )
    }

    /// Map NDC to pixels (y flipped) and depth into `[z_near, z_far]`
    #[rustfmt::skip]
    pub fn viewport_matrix(&self, width: u32, height: u32) -> Matrix4<f32> {
        let half_w = width as f32 / 2.0;
        let half_h = height as f32 / 2.0;

        Matrix4::new(
            half_w, 0.0, 0.0, half_w,
            0.0, -half_h, 0.0, half_h,
            0.0, 0.0, self.z_far - self.z_near, self.z_near,
            0.0, 0.0, 0.0, 1.0,
        )
    }

    /// View then projection then divide: the NDC position of a world point
    pub fn project(&self, vertex: &Vertex) -> Vertex {
        let clip = self.projection_matrix() * self.view_matrix() * vertex;
        Transform::perspective_divide(&clip)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Point3::new(0.0, 0.0, 5.0), 0.0, 0.0)
    }
}

/// True when a normalized vertex lies outside the `[-1, 1]` cube (or is not finite)
pub fn is_clipped(ndc: &Vertex) -> bool {
    [ndc.x, ndc.y, ndc.z]
        .iter()
        .any(|c| !c.is_finite() || *c < -1.0 || *c > 1.0)
}

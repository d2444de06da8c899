/// Painter's-algorithm frame pipeline: gather, sort, transform, clip, shade, draw
use log::{debug, trace};
use nalgebra::{Matrix4, Vector3};

use crate::color::Color;
use crate::geometry::{Mesh, Triangle};
use crate::projection::{is_clipped, Camera};
use crate::surface::{InputSource, InputSymbol, Surface};
use crate::transform::{point, Transform, Vertex};

/// Fixed direction of the single light
pub const LIGHT_DIRECTION: [f32; 3] = [1.0, 1.0, 0.0];

/// Brightness floor so unlit faces keep a visible silhouette
pub const MIN_BRIGHTNESS: f32 = 0.01;

const AXES: [([f32; 3], Color); 3] = [
    ([1.0, 0.0, 0.0], Color::RED),
    ([0.0, 1.0, 0.0], Color::GREEN),
    ([0.0, 0.0, 1.0], Color::BLUE),
];

/// The two render-mode toggles. They persist between frames and nothing else does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub wireframe: bool,
    pub show_axis: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            wireframe: false,
            show_axis: true,
        }
    }
}

/// Counts for one rendered frame
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameStats {
    pub triangles: usize,
    pub drawn: usize,
    pub rejected: usize,
}

#[derive(Debug, Default)]
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> RenderOptions {
        self.options
    }

    pub fn toggle_wireframe(&mut self) {
        self.options.wireframe = !self.options.wireframe;
        debug!("wireframe {}", if self.options.wireframe { "on" } else { "off" });
    }

    pub fn toggle_axis(&mut self) {
        self.options.show_axis = !self.options.show_axis;
        debug!("axis overlay {}", if self.options.show_axis { "on" } else { "off" });
    }

    /// Flip toggles whose input fired. The change applies from the next frame rendered.
    pub fn poll_toggles<I: InputSource + ?Sized>(&mut self, input: &mut I) {
        if input.was_activated(InputSymbol::ToggleAxis) {
            self.toggle_axis();
        }
        if input.was_activated(InputSymbol::ToggleWireframe) {
            self.toggle_wireframe();
        }
    }

    /// Render one frame of `meshes` as seen by `camera` into `surface`.
    ///
    /// Each triangle gets its mesh color and its distance to the eye before sorting.
    /// Triangles are drawn farthest first so nearer ones overwrite them.
    pub fn render<S: Surface + ?Sized>(
        &self,
        meshes: &mut [Mesh],
        camera: &Camera,
        surface: &mut S,
    ) -> FrameStats {
        let eye = camera.eye();
        for mesh in meshes.iter_mut() {
            let color = mesh.color();
            for triangle in &mut mesh.triangles {
                triangle.set_color(color);
                triangle.set_distance_to_camera(&eye);
            }
        }

        let mut triangles: Vec<&Triangle> =
            meshes.iter().flat_map(|mesh| mesh.triangles.iter()).collect();
        depth_sort(&mut triangles);

        let (width, height) = surface.size();
        let frame = FrameMatrices::new(camera, width, height);

        if self.options.show_axis {
            frame.draw_axes(surface);
        }

        let mut stats = FrameStats {
            triangles: triangles.len(),
            ..FrameStats::default()
        };

        for triangle in triangles {
            let Some([a, b, c]) = frame.project_triangle(triangle) else {
                stats.rejected += 1;
                continue;
            };

            if self.options.wireframe {
                let color = triangle.color();
                surface.draw_line(a.0, a.1, b.0, b.1, color, 1);
                surface.draw_line(b.0, b.1, c.0, c.1, color, 1);
                surface.draw_line(c.0, c.1, a.0, a.1, color, 1);
            } else {
                surface.fill_polygon(&[a.0, b.0, c.0], &[a.1, b.1, c.1], shade(triangle));
            }
            stats.drawn += 1;
        }

        trace!(
            "frame: {} triangles, {} drawn, {} rejected",
            stats.triangles,
            stats.drawn,
            stats.rejected
        );
        stats
    }
}

/// Order triangles farthest-to-nearest by their cached camera distance. Ties keep input order.
pub fn depth_sort(triangles: &mut [&Triangle]) {
    triangles.sort_by(|a, b| b.distance_to_camera().total_cmp(&a.distance_to_camera()));
}

/// Lambertian relight against [`LIGHT_DIRECTION`], keeping hue and saturation
pub fn shade(triangle: &Triangle) -> Color {
    let normal = triangle.unit_normal().unwrap_or_else(|err| {
        trace!("{}, lighting skipped", err);
        Vector3::zeros()
    });
    let light = Vector3::from(LIGHT_DIRECTION).normalize();
    let light_value = normal.dot(&light);

    let brightness = if light_value >= 0.0 {
        light_value.max(MIN_BRIGHTNESS)
    } else {
        MIN_BRIGHTNESS
    };
    triangle.color().with_brightness(brightness)
}

/// Matrices built once per frame
struct FrameMatrices {
    projection_view: Matrix4<f32>,
    viewport: Matrix4<f32>,
}

impl FrameMatrices {
    fn new(camera: &Camera, width: u32, height: u32) -> Self {
        Self {
            projection_view: camera.projection_matrix() * camera.view_matrix(),
            viewport: camera.viewport_matrix(width, height),
        }
    }

    fn to_ndc(&self, vertex: &Vertex) -> Vertex {
        Transform::perspective_divide(&Transform::apply(&self.projection_view, vertex))
    }

    /// Truncate to integer pixels
    fn to_screen(&self, ndc: &Vertex) -> (i32, i32) {
        let pixel = Transform::apply(&self.viewport, ndc);
        (pixel.x as i32, pixel.y as i32)
    }

    /// Screen positions, or `None` when every vertex is outside the NDC cube
    fn project_triangle(&self, triangle: &Triangle) -> Option<[(i32, i32); 3]> {
        let ndc = triangle.vertices.map(|v| self.to_ndc(&v));
        if ndc.iter().all(is_clipped) {
            return None;
        }
        Some(ndc.map(|v| self.to_screen(&v)))
    }

    /// Each world axis from its negative to its positive unit endpoint
    fn draw_axes<S: Surface + ?Sized>(&self, surface: &mut S) {
        for (axis, color) in AXES {
            let [x, y, z] = axis;
            let negative = self.to_ndc(&point(-x, -y, -z));
            let positive = self.to_ndc(&point(x, y, z));
            if is_clipped(&negative) && is_clipped(&positive) {
                continue;
            }

            let from = self.to_screen(&negative);
            let to = self.to_screen(&positive);
            surface.draw_line(from.0, from.1, to.0, to.1, color, 1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn triangle_at_distance(distance: f32) -> Triangle {
        let mut triangle = Triangle::new(
            point(distance, 0.0, 0.0),
            point(distance, 0.0, 0.0),
            point(distance, 0.0, 0.0),
        );
        triangle.set_distance_to_camera(&Point3::origin());
        triangle
    }

    struct Toggles(Vec<InputSymbol>);

    impl InputSource for Toggles {
        fn was_activated(&mut self, symbol: InputSymbol) -> bool {
            self.0.contains(&symbol)
        }
    }

    #[test]
    fn test_depth_sort_farthest_first() {
        let owned: Vec<Triangle> = [5.0, 1.0, 3.0].into_iter().map(triangle_at_distance).collect();
        let mut order: Vec<&Triangle> = owned.iter().collect();
        depth_sort(&mut order);

        let distances: Vec<f32> = order.iter().map(|t| t.distance_to_camera()).collect();
        assert_eq!(distances, vec![5.0, 3.0, 1.0]);
    }

    #[test]
    fn test_depth_sort_is_stable_on_ties() {
        let mut first = triangle_at_distance(2.0);
        first.set_color(Color::RED);
        let mut second = triangle_at_distance(2.0);
        second.set_color(Color::BLUE);
        let mut order = vec![&first, &second];
        depth_sort(&mut order);
        assert_eq!(order[0].color(), Color::RED);
        assert_eq!(order[1].color(), Color::BLUE);
    }

    #[test]
    fn test_shade_facing_light() {
        // Normal (1,1,1) leans toward the light
        let mut triangle = Triangle::new(
            point(1.0, 0.0, 0.0),
            point(0.0, 1.0, 0.0),
            point(0.0, 0.0, 1.0),
        );
        triangle.set_color(Color::RED);
        let lit = shade(&triangle);
        assert!(lit.brightness() > 0.8);
        assert_eq!(lit.g, 0);
        assert_eq!(lit.b, 0);
    }

    #[test]
    fn test_shade_facing_away_hits_floor() {
        let mut triangle = Triangle::new(
            point(0.0, 0.0, 0.0),
            point(1.0, 0.0, 0.0),
            point(0.0, 0.0, 1.0),
        );
        // Normal is -Y, away from the light
        triangle.set_color(Color::WHITE);
        assert_eq!(shade(&triangle), Color::WHITE.with_brightness(MIN_BRIGHTNESS));
    }

    #[test]
    fn test_shade_degenerate_triangle() {
        let mut triangle = Triangle::new(
            point(0.0, 0.0, 0.0),
            point(0.0, 0.0, 0.0),
            point(0.0, 0.0, 0.0),
        );
        triangle.set_color(Color::GREEN);
        assert_eq!(shade(&triangle), Color::GREEN.with_brightness(MIN_BRIGHTNESS));
    }

    #[test]
    fn test_poll_toggles() {
        let mut renderer = Renderer::default();
        assert_eq!(renderer.options(), RenderOptions::default());

        renderer.poll_toggles(&mut Toggles(vec![InputSymbol::ToggleWireframe]));
        assert!(renderer.options().wireframe);
        assert!(renderer.options().show_axis);

        renderer.poll_toggles(&mut Toggles(vec![
            InputSymbol::ToggleWireframe,
            InputSymbol::ToggleAxis,
        ]));
        assert!(!renderer.options().wireframe);
        assert!(!renderer.options().show_axis);
    }
}

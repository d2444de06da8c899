use std::io;

use nalgebra::Point3;
use sw3d_core::{is_clipped, point, Camera, Color, Mesh, RenderOptions, Renderer, Surface, Triangle};

#[derive(Debug, Clone, PartialEq)]
enum DrawCall {
    Line {
        from: (i32, i32),
        to: (i32, i32),
        color: Color,
    },
    Polygon {
        xs: Vec<i32>,
        ys: Vec<i32>,
        color: Color,
    },
}

struct RecordingSurface {
    width: u32,
    height: u32,
    calls: Vec<DrawCall>,
}

impl RecordingSurface {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            calls: Vec::new(),
        }
    }

    fn polygons(&self) -> Vec<(&[i32], &[i32], Color)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Polygon { xs, ys, color } => Some((xs.as_slice(), ys.as_slice(), *color)),
                _ => None,
            })
            .collect()
    }

    fn lines(&self) -> Vec<((i32, i32), (i32, i32), Color)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Line { from, to, color } => Some((*from, *to, *color)),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color, _width: u32) {
        self.calls.push(DrawCall::Line {
            from: (x0, y0),
            to: (x1, y1),
            color,
        });
    }

    fn fill_polygon(&mut self, xs: &[i32], ys: &[i32], color: Color) {
        self.calls.push(DrawCall::Polygon {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            color,
        });
    }

    fn clear(&mut self) {
        self.calls.clear();
    }

    fn present(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn camera() -> Camera {
    Camera::new(Point3::new(0.0, 0.0, 5.0), 0.0, 0.0)
        .clip_planes(0.1, 20.0)
        .field_of_view(60)
}

fn no_axis() -> Renderer {
    Renderer::new(RenderOptions {
        wireframe: false,
        show_axis: false,
    })
}

fn triangle_mesh(z: f32, color: Color) -> Mesh {
    let mut mesh = Mesh::new();
    mesh.add_triangle(Triangle::new(
        point(-0.5, -0.5, z),
        point(0.5, -0.5, z),
        point(0.0, 0.5, z),
    ));
    mesh.set_color(color);
    mesh
}

#[test]
fn single_triangle_yields_one_polygon_on_screen() {
    let mut meshes = vec![triangle_mesh(0.0, Color::WHITE)];
    let mut surface = RecordingSurface::new(800, 600);

    let stats = no_axis().render(&mut meshes, &camera(), &mut surface);
    assert_eq!(stats.triangles, 1);
    assert_eq!(stats.drawn, 1);

    let polygons = surface.polygons();
    assert_eq!(polygons.len(), 1);
    let (xs, ys, _) = polygons[0];
    assert_eq!(xs.len(), 3);
    for (&x, &y) in xs.iter().zip(ys) {
        assert!((0..800).contains(&x), "x {} out of bounds", x);
        assert!((0..600).contains(&y), "y {} out of bounds", y);
    }
    // Apex is above the base once y is flipped
    assert!(ys[2] < ys[0]);
}

#[test]
fn nearer_triangle_is_drawn_last() {
    // Listed near first so the order must come from the sort
    let mut meshes = vec![
        triangle_mesh(1.0, Color::RED),
        triangle_mesh(-1.0, Color::BLUE),
    ];
    let mut surface = RecordingSurface::new(800, 600);

    no_axis().render(&mut meshes, &camera(), &mut surface);

    let polygons = surface.polygons();
    assert_eq!(polygons.len(), 2);
    assert_eq!(polygons[0].2.to_hsb().hue, Color::BLUE.to_hsb().hue);
    assert_eq!(polygons[1].2.to_hsb().hue, Color::RED.to_hsb().hue);
}

#[test]
fn triangles_take_their_mesh_color_each_frame() {
    let mut meshes = vec![triangle_mesh(0.0, Color::RED)];
    let mut surface = RecordingSurface::new(800, 600);
    let renderer = Renderer::new(RenderOptions {
        wireframe: true,
        show_axis: false,
    });

    renderer.render(&mut meshes, &camera(), &mut surface);
    meshes[0].set_color(Color::GREEN);
    surface.clear();
    renderer.render(&mut meshes, &camera(), &mut surface);

    assert_eq!(meshes[0].triangles[0].color(), Color::GREEN);
    assert!(surface.lines().iter().all(|(_, _, color)| *color == Color::GREEN));
}

#[test]
fn wireframe_emits_three_closed_edges() {
    let mut meshes = vec![triangle_mesh(0.0, Color::RED)];
    let mut surface = RecordingSurface::new(800, 600);
    let renderer = Renderer::new(RenderOptions {
        wireframe: true,
        show_axis: false,
    });

    renderer.render(&mut meshes, &camera(), &mut surface);

    assert!(surface.polygons().is_empty());
    let lines = surface.lines();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0].1, lines[1].0);
    assert_eq!(lines[1].1, lines[2].0);
    assert_eq!(lines[2].1, lines[0].0);
    // Wireframe keeps the mesh color unshaded
    assert!(lines.iter().all(|(_, _, color)| *color == Color::RED));
}

#[test]
fn triangle_behind_camera_is_rejected() {
    let mut meshes = vec![triangle_mesh(10.0, Color::WHITE)];
    let mut surface = RecordingSurface::new(800, 600);

    let stats = no_axis().render(&mut meshes, &camera(), &mut surface);
    assert_eq!(stats.rejected, 1);
    assert_eq!(stats.drawn, 0);
    assert!(surface.calls.is_empty());
}

#[test]
fn partially_visible_triangle_is_drawn_unclipped() {
    let mut mesh = Mesh::new();
    mesh.add_triangle(Triangle::new(
        point(0.0, 0.0, 0.0),
        point(100.0, 0.0, 0.0),
        point(0.0, 100.0, 0.0),
    ));
    let mut meshes = vec![mesh];
    let mut surface = RecordingSurface::new(800, 600);

    let stats = no_axis().render(&mut meshes, &camera(), &mut surface);
    assert_eq!(stats.drawn, 1);

    let polygons = surface.polygons();
    let (xs, _, _) = polygons[0];
    assert_eq!(xs[0], 400);
    assert!(xs[1] > 800);
}

#[test]
fn axis_overlay_spans_negative_to_positive() {
    let mut surface = RecordingSurface::new(800, 600);
    let renderer = Renderer::default();

    renderer.render(&mut [], &camera(), &mut surface);

    let lines = surface.lines();
    assert_eq!(lines.len(), 3);

    let (from, to, color) = lines[0];
    assert_eq!(color, Color::RED);
    assert!(from.0 < 400 && to.0 > 400);
    assert_eq!(from.1, to.1);

    let (from, to, color) = lines[1];
    assert_eq!(color, Color::GREEN);
    // Screen y grows downward, so +Y ends above -Y
    assert!(from.1 > to.1);

    assert_eq!(lines[2].2, Color::BLUE);
}

#[test]
fn axis_overlay_drawn_beneath_geometry() {
    let mut meshes = vec![triangle_mesh(0.0, Color::WHITE)];
    let mut surface = RecordingSurface::new(800, 600);

    Renderer::default().render(&mut meshes, &camera(), &mut surface);

    assert!(matches!(surface.calls.last(), Some(DrawCall::Polygon { .. })));
    assert_eq!(surface.lines().len(), 3);
}

#[test]
fn rigid_transforms_move_geometry_on_screen() {
    let mut meshes = vec![triangle_mesh(0.0, Color::WHITE)];
    let mut surface = RecordingSurface::new(800, 600);
    let renderer = no_axis();

    renderer.render(&mut meshes, &camera(), &mut surface);
    let before = surface.polygons()[0].0.to_vec();

    meshes[0].translate(1.0, 0.0, 0.0);
    surface.clear();
    renderer.render(&mut meshes, &camera(), &mut surface);
    let after = surface.polygons()[0].0.to_vec();

    for (b, a) in before.iter().zip(&after) {
        assert!(a > b);
    }
}

#[test]
fn axis_overlay_skipped_when_facing_away() {
    let camera = Camera::new(Point3::new(0.0, 0.0, 5.0), 180.0, 0.0);
    let mut surface = RecordingSurface::new(800, 600);

    Renderer::default().render(&mut [], &camera, &mut surface);

    assert!(surface.lines().is_empty());
}

#[test]
fn axis_overlay_drawn_with_one_endpoint_clipped() {
    // +Z end is nearer than the near plane, -Z end is in view
    let camera = Camera::new(Point3::new(0.0, 0.0, 1.02), 0.0, 0.0);
    assert!(is_clipped(&camera.project(&point(0.0, 0.0, 1.0))));
    assert!(!is_clipped(&camera.project(&point(0.0, 0.0, -1.0))));

    let mut surface = RecordingSurface::new(800, 600);
    Renderer::default().render(&mut [], &camera, &mut surface);

    // X and Y endpoints all fall outside the frustum sides, so only Z remains
    let lines = surface.lines();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].2, Color::BLUE);
}

/// Terminal front-end: crossterm surface, keyboard polling and the frame loop
use anyhow::{Context, Result};
use crossterm::{cursor, execute, terminal};
use log::{info, warn};
use nalgebra::Point3;
use std::io::{self, stdout};
use std::time::Instant;
use sw3d_core::{load_mesh_from_path, Camera, Color, Mesh, RigidTransform, Renderer, Surface};

pub mod config;
pub mod input;
pub mod surface;

pub use config::Config;
pub use input::KeyboardInput;
pub use surface::TerminalSurface;

/// Width over height of one terminal cell
const CELL_ASPECT: f32 = 0.5;

/// Colors handed to meshes in load order
const MESH_COLORS: [Color; 4] = [Color::WHITE, Color::RED, Color::GREEN, Color::BLUE];

/// Vertical gap between meshes loaded from files
const MESH_SPACING: f32 = 3.0;

/// Load every configured mesh, or a cube when none are given.
///
/// A partially parsed file still contributes the faces read before the error.
pub fn build_scene(config: &Config) -> Result<Vec<Mesh>> {
    if config.meshes.is_empty() {
        return Ok(vec![Mesh::cube(1.0)]);
    }

    let mut meshes = Vec::with_capacity(config.meshes.len());
    for (i, path) in config.meshes.iter().enumerate() {
        let loaded = load_mesh_from_path(path)
            .with_context(|| format!("Failed to read mesh file: {}", path.display()))?;
        if let Some(failure) = &loaded.failure {
            warn!("{} is incomplete: {}", path.display(), failure);
        }

        let mut mesh = loaded.mesh;
        mesh.set_color(MESH_COLORS[i % MESH_COLORS.len()]);
        mesh.set_center(0.0, 0.0, 0.0);
        mesh.apply(&RigidTransform::identity().translated(0.0, MESH_SPACING * i as f32, 0.0));
        info!("{}: {} triangles", path.display(), mesh.len());
        meshes.push(mesh);
    }
    Ok(meshes)
}

/// Camera for a surface of `width` x `height` cells
pub fn camera_for(config: &Config, width: u16, height: u16) -> Camera {
    let [x, y, z] = config.camera;
    Camera::new(Point3::new(x, y, z), config.yaw, 0.0)
        .field_of_view(config.fov)
        .aspect(cell_aspect(width, height))
}

fn cell_aspect(width: u16, height: u16) -> f32 {
    width.max(1) as f32 * CELL_ASPECT / height.max(1) as f32
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    meshes: Vec<Mesh>,
    spin: f32,
    camera: Camera,
    renderer: Renderer,
    surface: TerminalSurface,
    input: KeyboardInput,
    config: Config,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(meshes: Vec<Mesh>, config: Config) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            meshes,
            spin: config.spin,
            camera: camera_for(&config, width, height),
            renderer: Renderer::new(config.render_options()),
            surface: TerminalSurface::new(width as usize, height as usize),
            input: KeyboardInput::new(),
            config,
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> Result<()> {
        let target_frame_time = self.config.frame_time();

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            self.input.collect()?;
            if self.input.quit_requested() {
                self.running = false;
                break;
            }

            // Update
            self.update();

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn update(&mut self) {
        self.camera.update(&mut self.input);
        self.renderer.poll_toggles(&mut self.input);
        self.input.end_frame();

        if self.spin != 0.0 {
            for mesh in &mut self.meshes {
                mesh.rotate(0.0, self.spin, 0.0);
            }
        }
    }

    fn render(&mut self) -> Result<()> {
        self.surface.clear();
        let stats = self
            .renderer
            .render(&mut self.meshes, &self.camera, &mut self.surface);

        // Draw UI overlay
        let options = self.renderer.options();
        let status = format!(
            "SW3D | FPS: {:.1} | {}/{} tris | {}{} | WASD/QE=Move Arrows=Look T=Axis Y=Wireframe Esc=Quit",
            self.fps,
            stats.drawn,
            stats.triangles,
            if options.wireframe { "wireframe" } else { "solid" },
            if options.show_axis { "+axis" } else { "" },
        );
        self.surface.write_text(0, 0, &status, Color::rgb(255, 255, 0));

        self.surface
            .present()
            .context("Failed to write frame to the terminal")
    }
}

/// Render one frame of a mesh into an 80x24 grid and print it
///
/// Usage: cargo run --example snapshot -- [path/to/mesh.obj]
use anyhow::{Context, Result};
use nalgebra::Point3;
use std::env;
use std::io::{stdout, Write};
use sw3d_core::{load_mesh_from_path, Camera, Mesh, Renderer};
use sw3d_terminal::TerminalSurface;

fn main() -> Result<()> {
    let mesh = match env::args().nth(1) {
        Some(path) => {
            let loaded = load_mesh_from_path(&path)
                .with_context(|| format!("Failed to read mesh file: {}", path))?;
            if let Some(failure) = &loaded.failure {
                eprintln!("Stopped early: {}", failure);
            }
            loaded.mesh
        }
        None => Mesh::cube(1.0),
    };

    let (width, height) = (80, 24);
    let camera = Camera::new(Point3::new(2.0, 0.0, 2.0), 45.0, 0.0)
        .aspect(width as f32 * 0.5 / height as f32);
    let mut surface = TerminalSurface::new(width, height);
    let stats = Renderer::default().render(&mut [mesh], &camera, &mut surface);

    let mut out = stdout();
    surface.draw(&mut out)?;
    writeln!(out)?;
    writeln!(out, "{} of {} triangles drawn", stats.drawn, stats.triangles)?;
    out.flush()?;
    Ok(())
}

/// SW3D Terminal - interactive software renderer
///
/// Shows the meshes named with `--mesh`, or a cube when none are given.
/// Controls:
///   - WASD: Walk and strafe, E/Q: Rise and sink
///   - Arrow Keys: Turn and pitch
///   - T: Toggle axis, Y: Toggle wireframe
///   - ESC / Ctrl-C: Quit
use anyhow::Result;
use clap::Parser;
use log::info;
use sw3d_terminal::{build_scene, Config, TerminalApp};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::parse();
    println!("SW3D Terminal Renderer - Loading...");

    let meshes = build_scene(&config)?;
    let triangles: usize = meshes.iter().map(|m| m.len()).sum();
    info!("Scene ready: {} meshes, {} triangles", meshes.len(), triangles);

    println!("Starting terminal renderer (press ESC to quit)...");
    std::thread::sleep(std::time::Duration::from_secs(1));

    let mut app = TerminalApp::new(meshes, config)?;
    app.run()?;

    println!("Thank you for using SW3D Terminal Renderer!");
    Ok(())
}

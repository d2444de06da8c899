/// Command-line configuration for the terminal renderer
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use sw3d_core::RenderOptions;

#[derive(Debug, Clone, Parser)]
#[command(name = "sw3d-terminal", version, about = "Software 3D renderer for the terminal")]
pub struct Config {
    /// Mesh source file (`v`/`f` lines); repeat for more meshes. A cube is shown when none are given.
    #[arg(long = "mesh", value_name = "PATH")]
    pub meshes: Vec<PathBuf>,

    /// Target frames per second
    #[arg(long, default_value_t = 30)]
    pub fps: u32,

    /// Start in wireframe mode
    #[arg(long)]
    pub wireframe: bool,

    /// Start with the axis overlay hidden
    #[arg(long)]
    pub no_axis: bool,

    /// Initial camera position as x,y,z
    #[arg(long, value_parser = parse_vec3, default_value = "2,0,2", allow_hyphen_values = true)]
    pub camera: [f32; 3],

    /// Initial camera yaw in degrees
    #[arg(long, default_value_t = 45.0, allow_hyphen_values = true)]
    pub yaw: f32,

    /// Vertical field of view in degrees
    #[arg(long, default_value_t = 60)]
    pub fov: u32,

    /// Degrees each mesh turns about its pivot per frame
    #[arg(long, default_value_t = 0.7, allow_hyphen_values = true)]
    pub spin: f32,
}

impl Config {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            wireframe: self.wireframe,
            show_axis: !self.no_axis,
        }
    }

    pub fn frame_time(&self) -> Duration {
        Duration::from_millis(1000 / u64::from(self.fps.max(1)))
    }
}

fn parse_vec3(value: &str) -> Result<[f32; 3], String> {
    let parts: Vec<&str> = value.split(',').map(str::trim).collect();
    let [x, y, z] = parts.as_slice() else {
        return Err(format!("expected x,y,z but got '{}'", value));
    };
    let parse = |s: &str| {
        s.parse::<f32>()
            .map_err(|e| format!("invalid coordinate '{}': {}", s, e))
    };
    Ok([parse(*x)?, parse(*y)?, parse(*z)?])
}

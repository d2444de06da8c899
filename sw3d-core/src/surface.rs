/// Contracts with the presentation surface and the input service
use std::io;

use crate::color::Color;

/// A 2D target of fixed size that accepts integer-pixel draw requests
pub trait Surface {
    /// (width, height) in pixels, fixed at startup
    fn size(&self) -> (u32, u32);

    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color, width: u32);

    /// Fill the polygon whose vertices are `(xs[i], ys[i])`, in order
    fn fill_polygon(&mut self, xs: &[i32], ys: &[i32], color: Color);

    fn clear(&mut self);

    fn present(&mut self) -> io::Result<()>;
}

/// Inputs the core reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSymbol {
    TurnLeft,
    TurnRight,
    PitchUp,
    PitchDown,
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    Up,
    Down,
    ToggleAxis,
    ToggleWireframe,
}

impl InputSymbol {
    pub const ALL: [InputSymbol; 12] = [
        InputSymbol::TurnLeft,
        InputSymbol::TurnRight,
        InputSymbol::PitchUp,
        InputSymbol::PitchDown,
        InputSymbol::Forward,
        InputSymbol::Backward,
        InputSymbol::StrafeLeft,
        InputSymbol::StrafeRight,
        InputSymbol::Up,
        InputSymbol::Down,
        InputSymbol::ToggleAxis,
        InputSymbol::ToggleWireframe,
    ];
}

/// Polled once per frame per symbol
pub trait InputSource {
    /// Was `symbol` activated since the last poll
    fn was_activated(&mut self, symbol: InputSymbol) -> bool;
}

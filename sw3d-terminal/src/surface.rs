/// Character-grid presentation surface for terminal rendering
use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::{self, stdout, Write};
use sw3d_core::{Color, Surface};

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// One character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub color: Color,
}

impl Cell {
    const BLANK: Cell = Cell {
        glyph: ' ',
        color: Color::WHITE,
    };
}

/// Surface that rasterizes draw requests into terminal cells.
///
/// There is no depth buffer: a later draw overwrites whatever an earlier one left.
pub struct TerminalSurface {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl TerminalSurface {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width * height],
        }
    }

    pub fn cell(&self, x: usize, y: usize) -> Option<Cell> {
        (x < self.width && y < self.height).then(|| self.cells[y * self.width + x])
    }

    fn set(&mut self, x: i32, y: i32, glyph: char, color: Color) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        self.cells[y as usize * self.width + x as usize] = Cell { glyph, color };
    }

    /// Overwrite cells with text, clipped at the right edge
    pub fn write_text(&mut self, x: usize, y: usize, text: &str, color: Color) {
        for (i, glyph) in text.chars().enumerate() {
            self.set((x + i) as i32, y as i32, glyph, color);
        }
    }

    /// Clip a segment to the grid (Liang-Barsky)
    fn clip_line(&self, x0: i32, y0: i32, x1: i32, y1: i32) -> Option<(i32, i32, i32, i32)> {
        if self.width == 0 || self.height == 0 {
            return None;
        }

        let (x0f, y0f) = (x0 as f64, y0 as f64);
        let (dx, dy) = (x1 as f64 - x0f, y1 as f64 - y0f);
        let (x_max, y_max) = ((self.width - 1) as f64, (self.height - 1) as f64);

        let mut t0 = 0.0_f64;
        let mut t1 = 1.0_f64;
        for (p, q) in [(-dx, x0f), (dx, x_max - x0f), (-dy, y0f), (dy, y_max - y0f)] {
            if p == 0.0 {
                if q < 0.0 {
                    return None;
                }
                continue;
            }
            let r = q / p;
            if p < 0.0 {
                if r > t1 {
                    return None;
                }
                t0 = t0.max(r);
            } else {
                if r < t0 {
                    return None;
                }
                t1 = t1.min(r);
            }
        }

        Some((
            (x0f + t0 * dx).round() as i32,
            (y0f + t0 * dy).round() as i32,
            (x0f + t1 * dx).round() as i32,
            (y0f + t1 * dy).round() as i32,
        ))
    }

    /// Bresenham over an already clipped segment
    fn plot_line(&mut self, mut x0: i32, mut y0: i32, x1: i32, y1: i32, glyph: char, color: Color) {
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;

        loop {
            self.set(x0, y0, glyph, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let mut current: Option<Color> = None;
        for y in 0..self.height {
            for x in 0..self.width {
                let cell = self.cells[y * self.width + x];
                if current != Some(cell.color) {
                    writer.queue(SetForegroundColor(to_term_color(cell.color)))?;
                    current = Some(cell.color);
                }
                writer.queue(Print(cell.glyph))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

impl Surface for TerminalSurface {
    fn size(&self) -> (u32, u32) {
        (self.width as u32, self.height as u32)
    }

    /// Cells are one character wide, so `width` is ignored
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color, _width: u32) {
        if let Some((x0, y0, x1, y1)) = self.clip_line(x0, y0, x1, y1) {
            self.plot_line(x0, y0, x1, y1, glyph_for(color), color);
        }
    }

    /// Even-odd scanline fill sampled at cell centers
    fn fill_polygon(&mut self, xs: &[i32], ys: &[i32], color: Color) {
        let n = xs.len().min(ys.len());
        if n < 3 || self.width == 0 || self.height == 0 {
            return;
        }

        let glyph = glyph_for(color);
        let y_min = ys[..n].iter().copied().min().unwrap_or(0).max(0);
        let y_max = ys[..n]
            .iter()
            .copied()
            .max()
            .unwrap_or(0)
            .min(self.height as i32 - 1);
        let x_max = (self.width - 1) as f64;

        let mut crossings: Vec<f64> = Vec::with_capacity(n);
        for y in y_min..=y_max {
            let py = y as f64 + 0.5;
            crossings.clear();

            for i in 0..n {
                let j = (i + 1) % n;
                let (xa, ya) = (xs[i] as f64, ys[i] as f64);
                let (xb, yb) = (xs[j] as f64, ys[j] as f64);
                if (ya <= py) != (yb <= py) {
                    crossings.push(xa + (py - ya) * (xb - xa) / (yb - ya));
                }
            }
            crossings.sort_by(f64::total_cmp);

            for span in crossings.chunks_exact(2) {
                let start = (span[0] - 0.5).ceil().max(0.0);
                let end = (span[1] - 0.5).floor().min(x_max);
                if start > end {
                    continue;
                }
                for x in start as i32..=end as i32 {
                    self.set(x, y, glyph, color);
                }
            }
        }
    }

    fn clear(&mut self) {
        self.cells.fill(Cell::BLANK);
    }

    fn present(&mut self) -> io::Result<()> {
        let mut stdout = stdout();
        stdout.queue(cursor::MoveTo(0, 0))?;
        self.draw(&mut stdout)?;
        stdout.flush()
    }
}

/// Ramp glyph for a color's brightness. Never blank, so the darkest face stays visible.
pub fn glyph_for(color: Color) -> char {
    let steps = (LUMINOSITY_RAMP.len() - 2) as f32;
    let index = 1 + (color.brightness().clamp(0.0, 1.0) * steps).round() as usize;
    LUMINOSITY_RAMP[index.min(LUMINOSITY_RAMP.len() - 1)]
}

fn to_term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn painted(surface: &TerminalSurface) -> usize {
        surface.cells.iter().filter(|c| c.glyph != ' ').count()
    }

    #[test]
    fn test_glyph_ramp() {
        assert_eq!(glyph_for(Color::BLACK), '.');
        assert_eq!(glyph_for(Color::WHITE), '@');
        assert_eq!(glyph_for(Color::WHITE.with_brightness(0.01)), '.');
    }

    #[test]
    fn test_horizontal_line() {
        let mut surface = TerminalSurface::new(10, 5);
        surface.draw_line(1, 2, 6, 2, Color::WHITE, 1);
        assert_eq!(painted(&surface), 6);
        assert_eq!(surface.cell(1, 2).unwrap().glyph, '@');
        assert_eq!(surface.cell(6, 2).unwrap().glyph, '@');
        assert_eq!(surface.cell(7, 2).unwrap().glyph, ' ');
    }

    #[test]
    fn test_line_is_clipped_to_grid() {
        let mut surface = TerminalSurface::new(10, 5);
        surface.draw_line(-1_000_000, 2, 1_000_000, 2, Color::RED, 1);
        assert_eq!(painted(&surface), 10);

        surface.clear();
        surface.draw_line(-50, -50, -10, -10, Color::RED, 1);
        assert_eq!(painted(&surface), 0);
    }

    #[test]
    fn test_fill_triangle() {
        let mut surface = TerminalSurface::new(20, 20);
        surface.fill_polygon(&[0, 10, 0], &[0, 0, 10], Color::GREEN);
        let count = painted(&surface);
        // Half of a 10x10 square, give or take the diagonal
        assert!((40..=60).contains(&count), "painted {}", count);
        assert_eq!(surface.cell(1, 1).unwrap().color, Color::GREEN);
        assert_eq!(surface.cell(9, 9).unwrap().glyph, ' ');
    }

    #[test]
    fn test_fill_far_outside_coordinates() {
        let mut surface = TerminalSurface::new(8, 4);
        surface.fill_polygon(&[-100_000, 100_000, 0], &[-100_000, -100_000, 100_000], Color::BLUE);
        assert_eq!(painted(&surface), 32);
    }

    #[test]
    fn test_later_draw_wins() {
        let mut surface = TerminalSurface::new(10, 10);
        surface.fill_polygon(&[0, 10, 10, 0], &[0, 0, 10, 10], Color::BLUE);
        surface.fill_polygon(&[2, 8, 8, 2], &[2, 2, 8, 8], Color::RED);
        assert_eq!(surface.cell(5, 5).unwrap().color, Color::RED);
        assert_eq!(surface.cell(0, 0).unwrap().color, Color::BLUE);
    }

    #[test]
    fn test_draw_writes_rows() {
        let mut surface = TerminalSurface::new(3, 2);
        surface.write_text(0, 0, "abcdef", Color::WHITE);
        let mut out = Vec::new();
        surface.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert!(text.contains("abc"));
        assert!(!text.contains("abcd"));
        assert!(text.contains("\r\n"));
    }
}

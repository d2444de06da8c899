//! RGB colors and hue/saturation/brightness relighting

/// 8-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Hue, saturation and brightness, each in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsb {
    pub hue: f32,
    pub saturation: f32,
    pub brightness: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const DARK_GRAY: Color = Color::rgb(64, 64, 64);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_hsb(self) -> Hsb {
        let (r, g, b) = (self.r as f32, self.g as f32, self.b as f32);
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);

        let brightness = max / 255.0;
        let saturation = if max != 0.0 { (max - min) / max } else { 0.0 };

        let hue = if saturation == 0.0 {
            0.0
        } else {
            let span = max - min;
            let red = (max - r) / span;
            let green = (max - g) / span;
            let blue = (max - b) / span;
            let sector = if r == max {
                blue - green
            } else if g == max {
                2.0 + red - blue
            } else {
                4.0 + green - red
            };
            let hue = sector / 6.0;
            if hue < 0.0 {
                hue + 1.0
            } else {
                hue
            }
        };

        Hsb {
            hue,
            saturation,
            brightness,
        }
    }

    pub fn from_hsb(hsb: Hsb) -> Self {
        let brightness = hsb.brightness.clamp(0.0, 1.0);
        let channel = |v: f32| (v * 255.0 + 0.5) as u8;

        if hsb.saturation == 0.0 {
            let v = channel(brightness);
            return Self::rgb(v, v, v);
        }

        let h = (hsb.hue - hsb.hue.floor()) * 6.0;
        let f = h - h.floor();
        let s = hsb.saturation.clamp(0.0, 1.0);
        let p = brightness * (1.0 - s);
        let q = brightness * (1.0 - s * f);
        let t = brightness * (1.0 - s * (1.0 - f));

        let (r, g, b) = match h as u32 {
            0 => (brightness, t, p),
            1 => (q, brightness, p),
            2 => (p, brightness, t),
            3 => (p, q, brightness),
            4 => (t, p, brightness),
            _ => (brightness, p, q),
        };
        Self::rgb(channel(r), channel(g), channel(b))
    }

    /// Keep hue and saturation, replace brightness
    pub fn with_brightness(self, brightness: f32) -> Self {
        let hsb = self.to_hsb();
        Self::from_hsb(Hsb { brightness, ..hsb })
    }

    pub fn brightness(self) -> f32 {
        self.to_hsb().brightness
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

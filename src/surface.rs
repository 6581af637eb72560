use std::io::{self, Write};

/// 24-bit colour.
pub type Rgb = (u8, u8, u8);

/// Surface units per terminal pixel. Keeps the show at canvas scale on a
/// terminal a few hundred pixels wide.
pub const UNITS_PER_PIXEL: f32 = 4.0;

/// Something the show can be drawn on. Coordinates are surface units.
pub trait Surface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    fn clear(&mut self);
    /// Filled circle blended over what is already there. `alpha` outside
    /// `[0, 1]` is clamped.
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgb, alpha: f32);
}

/// Terminal surface: a pixel grid two pixels tall per cell, presented with
/// lower half-blocks.
pub struct Canvas {
    width: usize,
    height: usize,
    background: Rgb,
    pixels: Vec<[f32; 3]>,
    output_buf: Vec<u8>,
}

impl Canvas {
    pub fn new(cols: u16, rows: u16, background: Rgb) -> Self {
        let width = cols as usize;
        let height = rows as usize * 2;
        Self {
            width,
            height,
            background,
            pixels: vec![rgb_to_f32(background); width * height],
            output_buf: Vec::with_capacity(width * height * 25),
        }
    }

    /// Resize to a new terminal size. The frame is cleared.
    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.width = cols as usize;
        self.height = rows as usize * 2;
        self.pixels = vec![rgb_to_f32(self.background); self.width * self.height];
        self.output_buf = Vec::with_capacity(self.width * self.height * 25);
    }

    /// Pixel dimensions (columns, pixel rows).
    pub fn pixel_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixel(&self, x: usize, y: usize) -> Rgb {
        f32_to_rgb(self.pixels[y * self.width + x])
    }

    fn blend(&mut self, px: usize, py: usize, color: Rgb, alpha: f32) {
        let dst = &mut self.pixels[py * self.width + px];
        let src = rgb_to_f32(color);
        for c in 0..3 {
            dst[c] = dst[c] * (1.0 - alpha) + src[c] * alpha;
        }
    }

    /// Write the frame to `out` as half-block cells, top pixel as the
    /// background colour and bottom pixel as the foreground colour.
    pub fn present<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.output_buf.clear();
        self.output_buf.extend_from_slice(b"\x1b[H");

        // Impossible colours so the first cell of each row always emits escapes
        let mut prev_top: Option<Rgb> = None;
        let mut prev_bot: Option<Rgb> = None;

        for y in (0..self.height).step_by(2) {
            for x in 0..self.width {
                let top = self.pixel(x, y);
                let bot = if y + 1 < self.height { self.pixel(x, y + 1) } else { top };

                if prev_top != Some(top) {
                    write!(self.output_buf, "\x1b[48;2;{};{};{}m", top.0, top.1, top.2)?;
                    prev_top = Some(top);
                }
                if prev_bot != Some(bot) {
                    write!(self.output_buf, "\x1b[38;2;{};{};{}m", bot.0, bot.1, bot.2)?;
                    prev_bot = Some(bot);
                }

                self.output_buf.extend_from_slice("▄".as_bytes());
            }
            self.output_buf.extend_from_slice(b"\x1b[0m");
            prev_top = None;
            prev_bot = None;
            if y + 2 < self.height {
                self.output_buf.extend_from_slice(b"\r\n");
            }
        }

        out.write_all(&self.output_buf)?;
        out.flush()
    }
}

impl Surface for Canvas {
    fn width(&self) -> f32 {
        self.width as f32 * UNITS_PER_PIXEL
    }

    fn height(&self) -> f32 {
        self.height as f32 * UNITS_PER_PIXEL
    }

    fn clear(&mut self) {
        self.pixels.fill(rgb_to_f32(self.background));
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgb, alpha: f32) {
        let alpha = alpha.clamp(0.0, 1.0);
        if alpha == 0.0 || radius <= 0.0 {
            return;
        }

        let cx = x / UNITS_PER_PIXEL;
        let cy = y / UNITS_PER_PIXEL;
        let r = radius / UNITS_PER_PIXEL;
        let area = std::f32::consts::PI * r * r;

        // Sub-pixel circle: one pixel, dimmed by coverage
        if area < 1.0 {
            if cx >= 0.0 && cy >= 0.0 && (cx as usize) < self.width && (cy as usize) < self.height {
                self.blend(cx as usize, cy as usize, color, alpha * area);
            }
            return;
        }

        let x0 = (cx - r).floor().max(0.0) as usize;
        let y0 = (cy - r).floor().max(0.0) as usize;
        let x1 = ((cx + r).ceil().max(0.0) as usize).min(self.width);
        let y1 = ((cy + r).ceil().max(0.0) as usize).min(self.height);

        for py in y0..y1 {
            for px in x0..x1 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                if dx * dx + dy * dy <= r * r {
                    self.blend(px, py, color, alpha);
                }
            }
        }
    }
}

fn rgb_to_f32(c: Rgb) -> [f32; 3] {
    [c.0 as f32, c.1 as f32, c.2 as f32]
}

fn f32_to_rgb(c: [f32; 3]) -> Rgb {
    (
        c[0].round().clamp(0.0, 255.0) as u8,
        c[1].round().clamp(0.0, 255.0) as u8,
        c[2].round().clamp(0.0, 255.0) as u8,
    )
}

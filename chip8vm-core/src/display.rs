pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;

/// Monochrome 64x32 frame buffer. Every cell holds 0 or 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    pixels: [u8; DISPLAY_WIDTH * DISPLAY_HEIGHT],
}

impl Default for Display {
    fn default() -> Self {
        Self {
            pixels: [0; DISPLAY_WIDTH * DISPLAY_HEIGHT],
        }
    }
}

impl Display {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.pixels = [0; DISPLAY_WIDTH * DISPLAY_HEIGHT];
    }

    /// XORs `data` onto the buffer with its top-left corner at (`x`, `y`).
    ///
    /// Each byte is one 8 pixel row, most significant bit leftmost. Both the
    /// origin and every covered cell wrap around the screen edges. Returns
    /// whether any lit pixel was switched off.
    pub fn draw(&mut self, x: u8, y: u8, data: &[u8]) -> bool {
        let mut pixel_cleared = false;
        for (i, row_bits) in data.iter().enumerate() {
            let row = (y as usize + i) % DISPLAY_HEIGHT;
            for j in 0..8 {
                if row_bits & (0x80 >> j) == 0 {
                    continue;
                }
                let col = (x as usize + j) % DISPLAY_WIDTH;
                let pixel = &mut self.pixels[row * DISPLAY_WIDTH + col];
                if *pixel == 1 {
                    pixel_cleared = true;
                }
                *pixel ^= 1;
            }
        }
        pixel_cleared
    }

    /// Pixel value at (`x`, `y`), coordinates taken modulo the screen size.
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        self.pixels[(y % DISPLAY_HEIGHT) * DISPLAY_WIDTH + x % DISPLAY_WIDTH]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        self.pixels[(y % DISPLAY_HEIGHT) * DISPLAY_WIDTH + x % DISPLAY_WIDTH] = on as u8;
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks_exact(DISPLAY_WIDTH)
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&p| p == 0)
    }

    /// One line per row, `#` for lit and `.` for dark pixels.
    pub fn render_text(&self) -> String {
        let mut out = String::with_capacity((DISPLAY_WIDTH + 1) * DISPLAY_HEIGHT);
        for row in self.rows() {
            out.extend(row.iter().map(|&p| if p == 1 { '#' } else { '.' }));
            out.push('\n');
        }
        out
    }
}

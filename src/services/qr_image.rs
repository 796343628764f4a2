//! QR code rendering
//!
//! Produces the brand-colored, watermarked PNG served for every entry. The
//! symbol is drawn into an [`IndexedBitmap`] (palette + one index per pixel)
//! so the watermark is just another palette slot written over the three
//! finder-pattern centres.
//!
//! Layout, in modules: a 4-module quiet zone, then the symbol. Each finder
//! pattern is 7×7 with a 3×3 dark centre starting 2 modules in, so the
//! centres start 6 modules from the image edge on every symbol version.

use qrcode::{Color, EcLevel, QrCode};

use crate::errors::{DailyQrError, Result};

/// Quiet zone width, in modules.
pub const QUIET_ZONE: u32 = 4;

/// Largest image side we agree to allocate, in pixels.
pub const MAX_SIDE: u32 = 16_384;

/// Scale used for the inline image on the landing page.
pub const THUMBNAIL_SCALE: u32 = 1;

/// Scale used for the shareable large image.
pub const LARGE_SCALE: u32 = 25;

pub const BACKGROUND: Rgba = Rgba([0xff, 0xff, 0xff, 0x00]);
pub const FOREGROUND: Rgba = Rgba([66, 176, 245, 0xff]);
pub const WATERMARK: Rgba = Rgba([166, 176, 245, 0xff]);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba(pub [u8; 4]);

/// Indexed-color image: a palette of up to 256 colors and one palette index
/// per pixel, row-major.
#[derive(Debug, Clone)]
pub struct IndexedBitmap {
    width: u32,
    height: u32,
    palette: Vec<Rgba>,
    pixels: Vec<u8>,
}

impl IndexedBitmap {
    /// A `width × height` image filled with `background` (palette index 0).
    pub fn new(width: u32, height: u32, background: Rgba) -> Self {
        Self {
            width,
            height,
            palette: vec![background],
            pixels: vec![0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn palette(&self) -> &[Rgba] {
        &self.palette
    }

    /// Append `color` to the palette and return its index.
    pub fn push_color(&mut self, color: Rgba) -> Result<u8> {
        let index = u8::try_from(self.palette.len())
            .map_err(|_| DailyQrError::image_encode("palette is full (256 colors)"))?;
        self.palette.push(color);
        Ok(index)
    }

    pub fn index_at(&self, x: u32, y: u32) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y as usize * self.width as usize + x as usize])
    }

    /// Set every pixel of the `w × h` rectangle at `(x, y)` to `index`.
    /// The rectangle is clipped to the image.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, index: u8) {
        if x >= self.width || y >= self.height {
            return;
        }
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        let stride = self.width as usize;

        for row in y..y_end {
            let start = row as usize * stride;
            self.pixels[start + x as usize..start + x_end as usize].fill(index);
        }
    }

    /// Encode as an indexed PNG with maximum compression. Transparency goes
    /// into the tRNS chunk; rows are packed at the smallest bit depth that
    /// fits the palette.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        let (depth, bits) = bit_depth_for(self.palette.len());

        let rgb: Vec<u8> = self
            .palette
            .iter()
            .flat_map(|Rgba([r, g, b, _])| [*r, *g, *b])
            .collect();
        let alpha: Vec<u8> = self.palette.iter().map(|Rgba(c)| c[3]).collect();
        let data = self.packed_rows(bits);

        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, self.width, self.height);
            encoder.set_color(png::ColorType::Indexed);
            encoder.set_depth(depth);
            encoder.set_palette(rgb);
            encoder.set_trns(alpha);
            encoder.set_compression(png::Compression::Best);

            let mut writer = encoder.write_header()?;
            writer.write_image_data(&data)?;
            writer.finish()?;
        }
        Ok(out)
    }

    fn packed_rows(&self, bits: u32) -> Vec<u8> {
        if bits == 8 {
            return self.pixels.clone();
        }

        let per_byte = (8 / bits) as usize;
        let width = self.width as usize;
        let row_bytes = width.div_ceil(per_byte);
        let mut out = vec![0u8; row_bytes * self.height as usize];

        for (y, row) in self.pixels.chunks_exact(width.max(1)).enumerate() {
            for (x, &index) in row.iter().enumerate() {
                let shift = 8 - bits as usize * (x % per_byte + 1);
                out[y * row_bytes + x / per_byte] |= index << shift;
            }
        }
        out
    }
}

fn bit_depth_for(palette_len: usize) -> (png::BitDepth, u32) {
    match palette_len {
        0..=2 => (png::BitDepth::One, 1),
        3..=4 => (png::BitDepth::Two, 2),
        5..=16 => (png::BitDepth::Four, 4),
        _ => (png::BitDepth::Eight, 8),
    }
}

/// Top-left corners of the three watermark squares for an image of
/// `width × height` drawn at `scale`. Sides too small for a symbol clamp
/// the far corners to 0.
pub fn watermark_origins(width: u32, height: u32, scale: u32) -> [(u32, u32); 3] {
    [
        (6 * scale, 6 * scale),
        (width.saturating_sub(9 * scale), 6 * scale),
        (6 * scale, height.saturating_sub(9 * scale)),
    ]
}

/// Render `text` as a watermarked QR bitmap, one module = `scale` pixels.
///
/// Palette: 0 transparent background, 1 foreground, 2 watermark.
pub fn render(text: &str, scale: u32) -> Result<IndexedBitmap> {
    if scale == 0 {
        return Err(DailyQrError::validation("scale must be a positive integer"));
    }

    let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::L)?;
    let modules = code.width() as u32;

    let side = (modules + 2 * QUIET_ZONE)
        .checked_mul(scale)
        .filter(|side| *side <= MAX_SIDE)
        .ok_or_else(|| {
            DailyQrError::validation(format!(
                "scale {} is too large for a {}-module symbol",
                scale, modules
            ))
        })?;

    let mut bitmap = IndexedBitmap::new(side, side, BACKGROUND);
    let foreground = bitmap.push_color(FOREGROUND)?;

    for (i, color) in code.to_colors().into_iter().enumerate() {
        if color != Color::Dark {
            continue;
        }
        let x = i as u32 % modules + QUIET_ZONE;
        let y = i as u32 / modules + QUIET_ZONE;
        bitmap.fill_rect(x * scale, y * scale, scale, scale, foreground);
    }

    let watermark = bitmap.push_color(WATERMARK)?;
    for (x, y) in watermark_origins(side, side, scale) {
        bitmap.fill_rect(x, y, 3 * scale, 3 * scale, watermark);
    }

    Ok(bitmap)
}

/// Render `text` and encode it as PNG bytes. Same input, same bytes.
pub fn generate(text: &str, scale: u32) -> Result<Vec<u8>> {
    render(text, scale)?.encode_png()
}

use embedded_graphics::mono_font::{ascii, MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use std::convert::Infallible;
use std::env;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// First character code stored in every generated font
const START_CHAR: u8 = 32;
/// Printable ASCII plus DEL; a whole number of glyph strips
const TOTAL_CHAR: u8 = 96;
/// Glyphs side by side in one strip of the glyph map
const GLYPHS_PER_STRIP: u32 = 16;

/// Monochrome canvas a single glyph gets rendered onto
struct GlyphCanvas {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
}

impl GlyphCanvas {
    fn new(width: u32, height: u32) -> Self {
        GlyphCanvas {
            width,
            height,
            pixels: vec![false; (width * height) as usize],
        }
    }

    fn is_on(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.pixels[(y * self.width + x) as usize]
    }
}

impl OriginDimensions for GlyphCanvas {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for GlyphCanvas {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            let (x, y) = (point.x as u32, point.y as u32);
            if x < self.width && y < self.height {
                self.pixels[(y * self.width + x) as usize] = color.is_on();
            }
        }
        Ok(())
    }
}

fn render_glyph(font: &MonoFont<'_>, code: u8, width: u32, height: u32) -> GlyphCanvas {
    let mut canvas = GlyphCanvas::new(width, height);

    // DEL stays blank instead of falling back to the replacement glyph
    if code == 0x7F {
        return canvas;
    }

    let mut utf8 = [0u8; 4];
    let text = char::from(code).encode_utf8(&mut utf8);
    let style = MonoTextStyle::new(font, BinaryColor::On);
    let _ = Text::with_baseline(text, Point::zero(), style, Baseline::Top).draw(&mut canvas);
    canvas
}

/// Pack a mono font into the glyph table layout the driver parses:
/// 6 byte header, then rows ordered by strip, band and column.
fn encode_font(font: &MonoFont<'_>, cell_height: u32) -> Vec<u8> {
    let width = font.character_size.width;
    let bands = cell_height.div_ceil(8);
    let strips = u32::from(TOTAL_CHAR) / GLYPHS_PER_STRIP;
    let map_width = GLYPHS_PER_STRIP * width;

    let glyphs: Vec<GlyphCanvas> = (0..TOTAL_CHAR)
        .map(|i| render_glyph(font, START_CHAR + i, width, cell_height))
        .collect();

    let mut out = vec![
        width as u8,
        cell_height as u8,
        START_CHAR,
        TOTAL_CHAR,
        (map_width / 100) as u8,
        (map_width % 100) as u8,
    ];

    for strip in 0..strips {
        for band in 0..bands {
            for column in 0..GLYPHS_PER_STRIP {
                let glyph = &glyphs[(strip * GLYPHS_PER_STRIP + column) as usize];
                for x in 0..width {
                    let mut byte = 0u8;
                    for bit in 0..8 {
                        if glyph.is_on(x, band * 8 + bit) {
                            byte |= 1 << bit;
                        }
                    }
                    out.push(byte);
                }
            }
        }
    }
    out
}

fn write_font(
    dir: &Path,
    file_name: &str,
    font: &MonoFont<'_>,
    cell_height: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let data = encode_font(font, cell_height);
    let mut file = File::create(dir.join(file_name))?;
    file.write_all(&data)?;
    Ok(())
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let font_dir = Path::new(&out_dir).join("fonts");

    if let Err(e) = fs::create_dir_all(&font_dir) {
        println!("cargo:warning=Failed to create font directory: {}", e);
    }

    // Index prefix is the font type number used by the driver
    if let Err(e) = write_font(&font_dir, "0_5x8.bin", &ascii::FONT_5X8, 8) {
        println!("cargo:warning=Failed to generate 5x8 font: {}", e);
    }
    if let Err(e) = write_font(&font_dir, "1_8x16.bin", &ascii::FONT_8X13, 16) {
        println!("cargo:warning=Failed to generate 8x16 font: {}", e);
    }

    println!("cargo:rustc-env=MICROOLED_FONT_DIR={}", font_dir.display());
}

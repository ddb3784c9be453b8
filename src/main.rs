use std::convert::Infallible;

use anyhow::Context;
use embedded_graphics::mono_font::{ascii::FONT_4X6, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::{prelude::*, text::Text};
use embedded_hal::i2c::{ErrorType, I2c, Operation};

use microoled::ssd1306::FONT_DIR;
use microoled::{ClearMode, Color, DisplayConfig, DrawMode, I2cInterface, Oled};

/// Host stand-in for the I2C bus, logs and counts what would be sent
#[derive(Default)]
struct LogBus {
    transfers: usize,
    bytes: usize,
}

impl ErrorType for LogBus {
    type Error = Infallible;
}

impl I2c for LogBus {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        for op in operations {
            match op {
                Operation::Write(bytes) => {
                    self.transfers += 1;
                    self.bytes += bytes.len();
                    log::trace!("0x{:02X} <- {:02X?}", address, bytes);
                }
                Operation::Read(buffer) => buffer.fill(0),
            }
        }
        Ok(())
    }
}

type Display = Oled<I2cInterface<LogBus>>;

/// Framebuffer as text, one character per pixel
fn render(display: &Display) -> String {
    let fb = display.framebuffer();
    let mut out = String::new();
    for y in 0..i32::from(fb.height()) {
        for x in 0..i32::from(fb.width()) {
            out.push(match fb.get_pixel(x, y) {
                Some(Color::SET) => '#',
                _ => '.',
            });
        }
        out.push('\n');
    }
    out
}

fn show(display: &mut Display, title: &str) -> anyhow::Result<()> {
    display.display().context("Failed to flush framebuffer")?;
    println!("{}:\n{}", title, render(display));
    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Fonts generated at build time unless a directory is given
    let font_dir = std::env::args().nth(1).unwrap_or_else(|| FONT_DIR.to_string());
    let config = DisplayConfig::default().with_font_dir(&font_dir);
    log::info!("Using fonts from {}", font_dir);

    let mut interface = I2cInterface::from_config(LogBus::default(), &config);
    if !interface.is_connected() {
        anyhow::bail!("No display answering at 0x{:02X}", interface.address());
    }
    let mut display = Oled::new(interface, config);

    if let Err(e) = display.begin() {
        log::error!("Display init failed: {}", e);
        return Err(anyhow::anyhow!("Display init failed: {}", e));
    }

    let fonts = display.total_fonts();
    if fonts == 0 {
        anyhow::bail!("No fonts found in {}", font_dir);
    }

    // One screen per font
    for (index, name) in display.font_names().into_iter().enumerate() {
        display
            .set_font_type(index)
            .with_context(|| format!("Failed to load font {} ({})", index, name))?;
        display.clear(ClearMode::Page, 0x00)?;
        display.set_cursor(0, 0);
        display.print(format!("{}\nHello!\n", name))?;
        display.print("0123456789")?;
        show(&mut display, &format!("Font {} ({})", index, name))?;
    }

    // Shapes, the filled box toggled over the circle
    display.clear(ClearMode::Page, 0x00)?;
    display.rect(0, 0, i32::from(display.width()), i32::from(display.height()));
    display.circle(20, 24, 14);
    display.line(0, 47, 63, 0);
    display.set_draw_mode(DrawMode::Toggle);
    display.rect_fill(34, 10, 24, 28);
    display.set_draw_mode(DrawMode::Overwrite);
    show(&mut display, "Shapes")?;

    // embedded-graphics draws into the same framebuffer
    display.clear(ClearMode::Page, 0x00)?;
    display.set_font_type(0)?;
    display.set_cursor(2, 2);
    display.print("native")?;
    let style = MonoTextStyle::new(&FONT_4X6, BinaryColor::On);
    Text::new("embedded-graphics", Point::new(0, 30), style)
        .draw(display.framebuffer_mut())
        .context("Failed to draw label")?;
    show(&mut display, "Mixed text")?;

    display.scroll_right(0, 5)?;
    display.scroll_stop()?;

    let bus = display.release().release();
    log::info!(
        "Sent {} transfers, {} bytes in total",
        bus.transfers,
        bus.bytes
    );
    Ok(())
}

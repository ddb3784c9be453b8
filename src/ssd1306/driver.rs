//! SSD1306 Display Driver Implementation
//!
//! This module contains the main driver for the SSD1306 OLED controller. It
//! owns the framebuffer, the font catalog and the text cursor, and talks to
//! the controller through any [`WriteOnlyDataCommand`].
//!
//! ## Architecture
//!
//! ### Initialization Functions
//! - `new()` - Allocate buffer and font catalog, nothing is sent yet
//! - `begin()` - Select the first font and run the init sequence
//!
//! ### Display Update Functions
//! - `display()` - Flush the framebuffer to controller RAM
//! - `clear()` - Fill controller RAM or the framebuffer with one byte
//!
//! ### Panel Control Functions
//! - `invert()`, `contrast()`, `flip_vertical()`, `flip_horizontal()`
//! - `scroll_right()`, `scroll_stop()`
//!
//! ### Drawing Functions
//! Use the current color and draw mode. See [`crate::ssd1306::raster`] for
//! the versions taking both explicitly.
//! - `pixel()`, `line()`, `line_h()`, `line_v()`, `rect()`, `rect_fill()`,
//!   `circle()`, `draw_char()`
//! - `write()`, `print()` - Text at the cursor
//!
//! ## Flush Order
//!
//! The framebuffer goes out one page (8 pixel rows) at a time, top to bottom.
//! Within a page the column address is set before every block of
//! [`BLOCK_SIZE`] bytes, left to right.
//!
//! ## Column Addressing
//!
//! The 64x48 Micro OLED is wired to columns 32..96 of the controller, so for
//! that buffer size the column goes out as a page-mode high nibble with an
//! offset instead of the `COLUMN_ADDRESS` window command.

use display_interface::{DataFormat, WriteOnlyDataCommand};

use crate::ssd1306::catalog::FontCatalog;
use crate::ssd1306::color::{ClearMode, Color, DrawMode};
use crate::ssd1306::config::DisplayConfig;
use crate::ssd1306::cursor::TextCursor;
use crate::ssd1306::error::OledError;
use crate::ssd1306::framebuffer::Framebuffer;
use crate::ssd1306::raster;
use crate::ssd1306::{cmd::Cmd, flag::Flag, BLOCK_SIZE, GDDRAM_PAGES, GDDRAM_WIDTH};

/// SSD1306 OLED Driver
///
/// ## Type Parameters
///
/// - `DI` - Display interface the commands and pixel data are written to
pub struct Oled<DI> {
    /// The display interface
    interface: DI,
    config: DisplayConfig,
    framebuffer: Framebuffer,
    fonts: FontCatalog,
    font_type: usize,
    cursor: TextCursor,
    color: Color,
    mode: DrawMode,
}

impl<DI> Oled<DI> {
    /// Create a driver for the panel described by `config`.
    ///
    /// The framebuffer starts cleared and the font directory is not scanned
    /// until a font is needed. Call [`Oled::begin`] before [`Oled::display`].
    pub fn new(interface: DI, config: DisplayConfig) -> Self {
        let framebuffer = Framebuffer::new(config.width, config.height);
        let fonts = FontCatalog::new(&config.font_dir);
        Oled {
            interface,
            config,
            framebuffer,
            fonts,
            font_type: 0,
            cursor: TextCursor::default(),
            color: Color::SET,
            mode: DrawMode::Overwrite,
        }
    }

    /// Give the display interface back
    pub fn release(self) -> DI {
        self.interface
    }

    /// Configuration the driver was created with
    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    /// Panel width in pixels
    pub fn width(&self) -> u16 {
        self.framebuffer.width()
    }

    /// Panel height in pixels
    pub fn height(&self) -> u16 {
        self.framebuffer.height()
    }

    /// The framebuffer bytes, in controller RAM layout
    pub fn screenbuffer(&self) -> &[u8] {
        self.framebuffer.snapshot()
    }

    /// The framebuffer, for reading pixels
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// The framebuffer, for drawing with embedded-graphics
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    /// Replace the framebuffer with a prepared bitmap of the same size
    pub fn draw_bitmap(&mut self, bitmap: &[u8]) -> Result<(), OledError> {
        self.framebuffer.load(bitmap).inspect_err(|e| {
            log::warn!("Bitmap rejected: {}", e);
        })
    }

    // ==================== Drawing State ====================

    /// Color used by the drawing functions
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Current drawing color
    pub fn color(&self) -> Color {
        self.color
    }

    /// Draw mode used by the drawing functions
    pub fn set_draw_mode(&mut self, mode: DrawMode) {
        self.mode = mode;
    }

    /// Current draw mode
    pub fn draw_mode(&self) -> DrawMode {
        self.mode
    }

    /// Move the text cursor
    pub fn set_cursor(&mut self, x: i32, y: i32) {
        self.cursor.set(x, y);
    }

    /// Current text cursor
    pub fn cursor(&self) -> TextCursor {
        self.cursor
    }

    // ==================== Fonts ====================

    /// Number of fonts in the font directory
    pub fn total_fonts(&mut self) -> usize {
        self.fonts.count()
    }

    /// Font names in index order
    pub fn font_names(&mut self) -> Vec<String> {
        self.fonts.names().values().cloned().collect()
    }

    /// Index of the selected font
    pub fn font_type(&self) -> usize {
        self.font_type
    }

    /// Select the font used for text.
    ///
    /// An index outside the catalog is a [`OledError::Configuration`] error.
    /// On any error the previous font stays selected.
    pub fn set_font_type(&mut self, font_type: usize) -> Result<(), OledError> {
        let count = self.fonts.count();
        if font_type >= count {
            return Err(OledError::Configuration {
                index: font_type,
                count,
            });
        }
        self.fonts.get(font_type)?;
        self.font_type = font_type;
        log::info!("Font type set to {}", font_type);
        Ok(())
    }

    /// Glyph width of the selected font
    pub fn font_width(&mut self) -> Result<u8, OledError> {
        Ok(self.fonts.get(self.font_type)?.width())
    }

    /// Glyph height of the selected font
    pub fn font_height(&mut self) -> Result<u8, OledError> {
        Ok(self.fonts.get(self.font_type)?.height())
    }

    /// First character code of the selected font
    pub fn font_start_char(&mut self) -> Result<u8, OledError> {
        Ok(self.fonts.get(self.font_type)?.start_char())
    }

    /// Number of characters in the selected font
    pub fn font_total_char(&mut self) -> Result<u8, OledError> {
        Ok(self.fonts.get(self.font_type)?.total_char())
    }

    // ==================== Drawing ====================

    /// Set one pixel
    pub fn pixel(&mut self, x: i32, y: i32) {
        self.framebuffer.set_pixel(x, y, self.color, self.mode);
    }

    /// Line between two points, both included
    pub fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) {
        raster::draw_line(
            &mut self.framebuffer,
            x0,
            y0,
            x1,
            y1,
            self.color,
            self.mode,
        );
    }

    /// Horizontal line of `width` pixels starting at `(x, y)`
    pub fn line_h(&mut self, x: i32, y: i32, width: i32) {
        raster::draw_line_h(&mut self.framebuffer, x, y, width, self.color, self.mode);
    }

    /// Vertical line of `height` pixels starting at `(x, y)`
    pub fn line_v(&mut self, x: i32, y: i32, height: i32) {
        raster::draw_line_v(&mut self.framebuffer, x, y, height, self.color, self.mode);
    }

    /// Rectangle outline
    pub fn rect(&mut self, x: i32, y: i32, width: i32, height: i32) {
        raster::draw_rect(
            &mut self.framebuffer,
            x,
            y,
            width,
            height,
            self.color,
            self.mode,
        );
    }

    /// Filled rectangle
    pub fn rect_fill(&mut self, x: i32, y: i32, width: i32, height: i32) {
        raster::fill_rect(
            &mut self.framebuffer,
            x,
            y,
            width,
            height,
            self.color,
            self.mode,
        );
    }

    /// Circle outline around `(x0, y0)`
    pub fn circle(&mut self, x0: i32, y0: i32, radius: i32) {
        raster::draw_circle(&mut self.framebuffer, x0, y0, radius, self.color, self.mode);
    }

    /// Draw one character of the selected font at `(x, y)`, cursor unchanged
    pub fn draw_char(&mut self, x: i32, y: i32, c: u8) -> Result<(), OledError> {
        let font = self.fonts.get(self.font_type)?;
        raster::draw_glyph(&mut self.framebuffer, x, y, c, font, self.color, self.mode)
    }

    /// Draw one character at the cursor and advance it
    pub fn write(&mut self, c: u8) -> Result<(), OledError> {
        let font = self.fonts.get(self.font_type)?;
        let width = i32::from(self.framebuffer.width());
        self.cursor
            .write_char(&mut self.framebuffer, font, width, c, self.color, self.mode)
    }

    /// Draw text at the cursor, byte by byte
    pub fn print(&mut self, text: impl AsRef<[u8]>) -> Result<(), OledError> {
        let font = self.fonts.get(self.font_type)?;
        let width = i32::from(self.framebuffer.width());
        self.cursor
            .write_str(&mut self.framebuffer, font, width, text, self.color, self.mode)
    }
}

impl<DI> Oled<DI>
where
    DI: WriteOnlyDataCommand,
{
    /// Basic function for sending commands
    fn cmd(&mut self, commands: &[u8]) -> Result<(), OledError> {
        self.interface.send_commands(DataFormat::U8(commands))?;
        Ok(())
    }

    /// Reset drawing state, initialize the controller and clear its RAM
    pub fn begin(&mut self) -> Result<(), OledError> {
        log::info!(
            "Initializing {}x{} OLED at 0x{:02X}",
            self.width(),
            self.height(),
            self.config.address
        );

        if self.fonts.count() > 0 {
            if let Err(e) = self.set_font_type(0) {
                log::warn!("Font 0 not available, keeping font {}: {}", self.font_type, e);
            }
        } else {
            log::warn!("No fonts available, text output disabled");
        }
        self.color = Color::SET;
        self.mode = DrawMode::Overwrite;
        self.cursor = TextCursor::default();

        let multiplex = self.height().saturating_sub(1) as u8;
        let com_pins = if self.framebuffer.len() == Flag::BUFFER_SIZE_128X32 {
            Flag::COM_PINS_SEQUENTIAL
        } else {
            Flag::COM_PINS_ALTERNATIVE
        };

        // Step 1: Display off while configuring
        self.cmd(&[Cmd::DISPLAY_OFF])?;

        // Step 2: Timing and multiplex
        self.cmd(&[Cmd::SET_DISPLAY_CLOCK_DIV, Flag::CLOCK_DIV_DEFAULT])?;
        self.cmd(&[Cmd::SET_MULTIPLEX, multiplex])?;
        self.cmd(&[Cmd::SET_DISPLAY_OFFSET, Flag::DISPLAY_OFFSET_NONE])?;
        self.cmd(&[Cmd::SET_START_LINE])?; // line #0

        // Step 3: Charge pump on, panel needs it with no external VCC
        self.cmd(&[Cmd::CHARGE_PUMP, Flag::CHARGE_PUMP_ENABLE])?;

        self.cmd(&[Cmd::NORMAL_DISPLAY, Cmd::DISPLAY_ALL_ON_RESUME])?;

        // Step 4: Orientation
        self.cmd(&[Cmd::SEG_REMAP | Flag::SEG_REMAP_COLUMN_127])?;
        self.cmd(&[Cmd::COM_SCAN_DEC])?;
        self.cmd(&[Cmd::SET_COM_PINS, com_pins])?;

        // Step 5: Drive levels
        self.cmd(&[Cmd::SET_CONTRAST, Flag::CONTRAST_DEFAULT])?;
        self.cmd(&[Cmd::SET_PRECHARGE, Flag::PRECHARGE_DEFAULT])?;
        self.cmd(&[Cmd::SET_VCOM_DESELECT, Flag::VCOM_DESELECT_DEFAULT])?;

        self.cmd(&[Cmd::DISPLAY_ON])?;

        // Controller RAM holds random data after power up
        self.clear(ClearMode::All, 0x00)
    }

    /// Select the page (8 pixel row band) the next data lands in
    pub fn set_page_address(&mut self, page: u8) -> Result<(), OledError> {
        let last = self.height().saturating_sub(1) as u8;
        self.cmd(&[Cmd::PAGE_ADDRESS, page & last, last])
    }

    /// Select the column the next data lands in
    pub fn set_column_address(&mut self, column: u8) -> Result<(), OledError> {
        if self.framebuffer.len() == Flag::BUFFER_SIZE_64X48 {
            self.cmd(&[
                (Cmd::SET_HIGH_COLUMN | (column >> 4)) + Flag::MICRO_OLED_HIGH_COLUMN_OFFSET,
                Cmd::SET_LOW_COLUMN | (column & 0x0F),
            ])
        } else {
            let last = self.width().saturating_sub(1) as u8;
            self.cmd(&[Cmd::COLUMN_ADDRESS, column & last, last])
        }
    }

    /// Fill with `value`.
    ///
    /// [`ClearMode::All`] writes every page and column of the controller RAM,
    /// also the parts outside the visible panel. [`ClearMode::Page`] fills
    /// the framebuffer only, nothing is sent.
    pub fn clear(&mut self, mode: ClearMode, value: u8) -> Result<(), OledError> {
        match mode {
            ClearMode::All => {
                let row = [value; GDDRAM_WIDTH];
                for page in 0..GDDRAM_PAGES {
                    self.set_page_address(page)?;
                    self.set_column_address(0)?;
                    self.interface.send_data(DataFormat::U8(&row))?;
                }
                log::debug!("Cleared controller RAM with 0x{:02X}", value);
            }
            ClearMode::Page => self.framebuffer.clear_all(value),
        }
        Ok(())
    }

    /// Send the framebuffer to the controller
    pub fn display(&mut self) -> Result<(), OledError> {
        let width = usize::from(self.width());
        let pages = self.framebuffer.pages();

        for page in 0..pages {
            self.set_page_address(page as u8)?;
            for start in (0..width).step_by(BLOCK_SIZE) {
                self.set_column_address(start as u8)?;
                let end = (start + BLOCK_SIZE).min(width);
                let Some(block) = self.framebuffer.page(page).and_then(|row| row.get(start..end))
                else {
                    break;
                };
                self.interface.send_data(DataFormat::U8(block))?;
            }
            log::debug!("Progress: page {}/{}", page + 1, pages);
        }
        Ok(())
    }

    /// Swap lit and dark pixels on the panel, RAM is untouched
    pub fn invert(&mut self, invert: bool) -> Result<(), OledError> {
        if invert {
            self.cmd(&[Cmd::INVERT_DISPLAY])
        } else {
            self.cmd(&[Cmd::NORMAL_DISPLAY])
        }
    }

    /// Set the contrast, 0 to 255
    pub fn contrast(&mut self, contrast: u8) -> Result<(), OledError> {
        self.cmd(&[Cmd::SET_CONTRAST, contrast])
    }

    /// Mirror the panel top to bottom
    pub fn flip_vertical(&mut self, flip: bool) -> Result<(), OledError> {
        self.cmd(&[if flip {
            Cmd::COM_SCAN_INC
        } else {
            Cmd::COM_SCAN_DEC
        }])
    }

    /// Mirror the panel left to right
    pub fn flip_horizontal(&mut self, flip: bool) -> Result<(), OledError> {
        let remap = if flip {
            Flag::SEG_REMAP_COLUMN_0
        } else {
            Flag::SEG_REMAP_COLUMN_127
        };
        self.cmd(&[Cmd::SEG_REMAP | remap])
    }

    /// Stop any hardware scrolling
    pub fn scroll_stop(&mut self) -> Result<(), OledError> {
        self.cmd(&[Cmd::DEACTIVATE_SCROLL])
    }

    /// Scroll pages `start..=stop` to the right continuously.
    ///
    /// Does nothing when `stop < start`.
    pub fn scroll_right(&mut self, start: u8, stop: u8) -> Result<(), OledError> {
        if stop < start {
            return Ok(());
        }
        self.scroll_stop()?;
        self.cmd(&[
            Cmd::RIGHT_HORIZONTAL_SCROLL,
            Flag::SCROLL_DUMMY,
            start,
            Flag::SCROLL_INTERVAL_2_FRAMES,
            stop,
            Flag::SCROLL_DUMMY,
            Flag::SCROLL_DUMMY_END,
            Cmd::ACTIVATE_SCROLL,
        ])
    }
}

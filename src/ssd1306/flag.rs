/// Parameter values and control bytes used by the SSD1306 driver.
///
/// Every constant is the literal byte the controller expects after the
/// matching [`crate::ssd1306::Cmd`].
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // I2C control byte (Co = 0, D/C# selects the meaning of the payload)
    pub const I2C_COMMAND: u8 = 0x00;
    pub const I2C_DATA: u8 = 0x40;

    // Display Clock Divide Ratio (0xD5)
    pub const CLOCK_DIV_DEFAULT: u8 = 0x80; // Suggested ratio

    // Display Offset (0xD3)
    pub const DISPLAY_OFFSET_NONE: u8 = 0x00;

    // Charge Pump (0x8D)
    pub const CHARGE_PUMP_ENABLE: u8 = 0x14;
    pub const CHARGE_PUMP_DISABLE: u8 = 0x10;

    // Segment Re-map (0xA0 | flag)
    pub const SEG_REMAP_COLUMN_0: u8 = 0x00;
    pub const SEG_REMAP_COLUMN_127: u8 = 0x01;

    // COM Pins Hardware Configuration (0xDA)
    pub const COM_PINS_SEQUENTIAL: u8 = 0x02; // 128x32 modules
    pub const COM_PINS_ALTERNATIVE: u8 = 0x12; // 64x48 and 128x64 modules

    // Contrast (0x81)
    pub const CONTRAST_DEFAULT: u8 = 0x8F;

    // Pre-charge Period (0xD9)
    pub const PRECHARGE_DEFAULT: u8 = 0x22;

    // VCOMH Deselect Level (0xDB)
    pub const VCOM_DESELECT_DEFAULT: u8 = 0x30;

    // Horizontal scroll setup (0x26/0x27)
    pub const SCROLL_DUMMY: u8 = 0x00;
    pub const SCROLL_INTERVAL_2_FRAMES: u8 = 0x07;
    pub const SCROLL_DUMMY_END: u8 = 0xFF;

    // Buffer size of a 128x32 panel, selects sequential COM pins
    pub const BUFFER_SIZE_128X32: usize = 512;

    // Buffer size of a 64x48 panel, selects page-mode column addressing
    pub const BUFFER_SIZE_64X48: usize = 384;

    // Added to the high column nibble command, centers 64 columns in 128
    pub const MICRO_OLED_HIGH_COLUMN_OFFSET: u8 = 0x02;
}

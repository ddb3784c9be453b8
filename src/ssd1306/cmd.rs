/// SSD1306 command opcodes
pub struct Cmd;
#[allow(missing_docs)]
impl Cmd {
    // Fundamental
    pub const SET_CONTRAST: u8 = 0x81;
    pub const DISPLAY_ALL_ON_RESUME: u8 = 0xA4;
    pub const DISPLAY_ALL_ON: u8 = 0xA5;
    pub const NORMAL_DISPLAY: u8 = 0xA6;
    pub const INVERT_DISPLAY: u8 = 0xA7;
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;

    // Addressing
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const MEMORY_MODE: u8 = 0x20;
    pub const COLUMN_ADDRESS: u8 = 0x21;
    pub const PAGE_ADDRESS: u8 = 0x22;

    // Hardware configuration
    pub const SET_START_LINE: u8 = 0x40;
    pub const SEG_REMAP: u8 = 0xA0;
    pub const SET_MULTIPLEX: u8 = 0xA8;
    pub const COM_SCAN_INC: u8 = 0xC0;
    pub const COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_COM_PINS: u8 = 0xDA;

    // Timing and driving
    pub const SET_DISPLAY_CLOCK_DIV: u8 = 0xD5;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_VCOM_DESELECT: u8 = 0xDB;
    pub const CHARGE_PUMP: u8 = 0x8D;

    // Scroll
    pub const RIGHT_HORIZONTAL_SCROLL: u8 = 0x26;
    pub const LEFT_HORIZONTAL_SCROLL: u8 = 0x27;
    pub const VERTICAL_RIGHT_HORIZONTAL_SCROLL: u8 = 0x29;
    pub const VERTICAL_LEFT_HORIZONTAL_SCROLL: u8 = 0x2A;
    pub const DEACTIVATE_SCROLL: u8 = 0x2E;
    pub const ACTIVATE_SCROLL: u8 = 0x2F;
    pub const SET_VERTICAL_SCROLL_AREA: u8 = 0xA3;
}

/*
SSD1306 datasheet, command table 9:
0x81 - Set Contrast Control (1 byte follows)
0xA4/0xA5 - Entire Display On (resume to RAM / ignore RAM)
0xA6/0xA7 - Normal / Inverse Display
0xAE/0xAF - Display Off / On
0x21 - Column Address (start, end)
0x22 - Page Address (start, end)
0x8D - Charge Pump Setting (0x14 enables)
*/

use bitflags::bitflags;

use crate::cpu::Interrupt;
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

use super::io;

mod render;

bitflags! {
    /// LCDC (FF40).
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct LcdControl: u8 {
        const DISPLAY_ENABLE = 0x80;
        /// Window tile map at 0x9C00 instead of 0x9800.
        const WINDOW_TILE_MAP = 0x40;
        const WINDOW_ENABLE = 0x20;
        /// Unsigned tile data at 0x8000 instead of signed at 0x8800.
        const TILE_DATA_UNSIGNED = 0x10;
        /// Background tile map at 0x9C00 instead of 0x9800.
        const BG_TILE_MAP = 0x08;
        /// 8x16 sprites.
        const OBJ_TALL = 0x04;
        const OBJ_ENABLE = 0x02;
        const BG_WINDOW_ENABLE = 0x01;
    }
}

bitflags! {
    /// STAT (FF41) interrupt select bits.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct StatSelect: u8 {
        const LYC = 0x40;
        const OAM_SCAN = 0x20;
        const VBLANK = 0x10;
        const HBLANK = 0x08;
    }
}

/// LCD mode as reported in STAT bits 0-1.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Mode {
    HBlank = 0,
    VBlank = 1,
    OamScan = 2,
    PixelTransfer = 3,
}

impl Mode {
    /// Dots spent in this mode before the next transition.
    pub fn dots(self) -> u32 {
        match self {
            Mode::OamScan => 80,
            Mode::PixelTransfer => 172,
            Mode::HBlank => 204,
            Mode::VBlank => DOTS_PER_LINE,
        }
    }

    fn stat_select(self) -> Option<StatSelect> {
        match self {
            Mode::HBlank => Some(StatSelect::HBLANK),
            Mode::VBlank => Some(StatSelect::VBLANK),
            Mode::OamScan => Some(StatSelect::OAM_SCAN),
            Mode::PixelTransfer => None,
        }
    }
}

pub const DOTS_PER_LINE: u32 = 456;
/// First VBlank line.
pub const VBLANK_LINE: u8 = 144;
/// LY wraps to 0 when it reaches this value.
pub const LINES_PER_FRAME: u8 = 154;

/// What the video controller needs from the bus.
///
/// Register reads here have no side effects, and writes are internal
/// ("direct") writes.
pub trait VideoBus {
    fn lcd_register(&self, addr: u16) -> u8;
    fn set_lcd_register(&mut self, addr: u16, value: u8);
    /// The 8 KiB of VRAM starting at 0x8000.
    fn vram(&self) -> &[u8];
    /// The 160 bytes of OAM starting at 0xFE00.
    fn oam(&self) -> &[u8];
    fn request_interrupt(&mut self, interrupt: Interrupt);
    /// Re-run the LY/LYC comparison after LY changed.
    fn update_coincidence(&mut self);
}

/// Scanline state machine and renderer.
///
/// Advanced in dots by [`VideoController::step`]. Each completed
/// pixel-transfer period renders one line of palette-mapped shades (0-3)
/// into the frame buffer.
pub struct VideoController {
    mode: Mode,
    /// Dots spent in the current mode.
    dots: u32,
    /// Line of the window to draw next; advances only on lines where the
    /// window was actually drawn.
    window_line: u8,
    lcd_on: bool,
    /// Palette-mapped shades, one byte per pixel.
    frame_buffer: Vec<u8>,
    frame_count: u64,
}

impl Default for VideoController {
    fn default() -> Self {
        Self::new()
    }
}

impl VideoController {
    pub fn new() -> Self {
        Self {
            mode: Mode::OamScan,
            dots: 0,
            window_line: 0,
            lcd_on: true,
            frame_buffer: vec![0; SCREEN_WIDTH * SCREEN_HEIGHT],
            frame_count: 0,
        }
    }

    #[inline]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Row-major 160x144 buffer of shades 0-3.
    ///
    /// These are shades after the DMG palette (BGP, OBP0 or OBP1) has been
    /// applied, not raw tile color indices.
    #[inline]
    pub fn frame_buffer(&self) -> &[u8] {
        &self.frame_buffer
    }

    /// Frames completed since power-on.
    #[inline]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Advance by `dots`. Returns `true` if a frame completed (LY wrapped
    /// from 153 to 0) during this call.
    pub fn step<B: VideoBus>(&mut self, bus: &mut B, dots: u32) -> bool {
        let lcdc = LcdControl::from_bits_retain(bus.lcd_register(io::LCDC));
        if !lcdc.contains(LcdControl::DISPLAY_ENABLE) {
            self.switch_off();
            return false;
        }
        if !self.lcd_on {
            log::debug!("GB PPU: LCD on, restarting at LY=0");
            self.lcd_on = true;
        }

        self.dots += dots;
        let mut frame_done = false;
        while self.dots >= self.mode.dots() {
            self.dots -= self.mode.dots();
            match self.mode {
                Mode::OamScan => self.enter_mode(bus, Mode::PixelTransfer),
                Mode::PixelTransfer => {
                    self.render_scanline(bus);
                    self.enter_mode(bus, Mode::HBlank);
                }
                Mode::HBlank => {
                    let ly = self.next_line(bus);
                    if ly == VBLANK_LINE {
                        bus.request_interrupt(Interrupt::VBlank);
                        log::trace!("GB PPU: VBlank, frame {}", self.frame_count);
                        self.enter_mode(bus, Mode::VBlank);
                    } else {
                        self.enter_mode(bus, Mode::OamScan);
                    }
                }
                Mode::VBlank => {
                    let ly = self.next_line(bus);
                    if ly >= LINES_PER_FRAME {
                        bus.set_lcd_register(io::LY, 0);
                        bus.update_coincidence();
                        self.window_line = 0;
                        self.frame_count += 1;
                        frame_done = true;
                        self.enter_mode(bus, Mode::OamScan);
                    }
                }
            }
        }
        frame_done
    }

    /// Increment LY and re-check LYC. Returns the new LY.
    fn next_line<B: VideoBus>(&mut self, bus: &mut B) -> u8 {
        let current = bus.lcd_register(io::LY);
        if current >= LINES_PER_FRAME {
            log::warn!("GB PPU: LY={current} out of range, ignoring line advance");
            return current;
        }
        let ly = current + 1;
        bus.set_lcd_register(io::LY, ly);
        if ly < LINES_PER_FRAME {
            bus.update_coincidence();
        }
        ly
    }

    /// Switch mode, mirror it into STAT and raise the STAT interrupt when the
    /// new mode's select bit is set.
    fn enter_mode<B: VideoBus>(&mut self, bus: &mut B, mode: Mode) {
        let changed = mode != self.mode;
        self.mode = mode;

        let stat = bus.lcd_register(io::STAT);
        bus.set_lcd_register(io::STAT, (stat & !0x03) | mode as u8);

        let select = StatSelect::from_bits_truncate(stat);
        if changed && mode.stat_select().is_some_and(|bit| select.contains(bit)) {
            bus.request_interrupt(Interrupt::LcdStat);
        }
    }

    /// LCD disabled: hold everything at the top of the frame with a blank
    /// screen until it comes back on.
    fn switch_off(&mut self) {
        if !self.lcd_on {
            return;
        }
        log::debug!("GB PPU: LCD off");
        self.lcd_on = false;
        self.mode = Mode::OamScan;
        self.dots = 0;
        self.window_line = 0;
        self.frame_buffer.fill(0);
    }
}

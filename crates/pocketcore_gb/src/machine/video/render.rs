use crate::SCREEN_WIDTH;

use super::super::io;
use super::{LcdControl, VideoBus, VideoController};

// Offsets into VRAM (0x8000-based).
const BG_MAP_0: usize = 0x1800;
const BG_MAP_1: usize = 0x1C00;
const TILE_DATA_SIGNED_BASE: usize = 0x1000;

const OAM_ENTRIES: usize = 40;
const SPRITES_PER_LINE: usize = 10;
/// Window X positions past this never reach the screen.
const WINDOW_X_MAX: u8 = 166;

/// One OAM entry.
#[derive(Clone, Copy, Debug)]
struct Sprite {
    y: u8,
    x: u8,
    tile: u8,
    attrs: u8,
}

impl Sprite {
    fn behind_background(&self) -> bool {
        self.attrs & 0x80 != 0
    }
    fn y_flip(&self) -> bool {
        self.attrs & 0x40 != 0
    }
    fn x_flip(&self) -> bool {
        self.attrs & 0x20 != 0
    }
    fn uses_obp1(&self) -> bool {
        self.attrs & 0x10 != 0
    }
}

/// Apply a DMG palette register to a 2-bit color index.
#[inline]
fn shade(palette: u8, color: u8) -> u8 {
    (palette >> (color * 2)) & 0x03
}

/// Color index of pixel (`col`, `row`) of the tile whose 16 bytes start at
/// `tile_addr`. Two bitplanes per row, bit 7 is the leftmost pixel.
#[inline]
fn tile_pixel(vram: &[u8], tile_addr: usize, row: usize, col: usize) -> u8 {
    let lo = vram[tile_addr + row * 2];
    let hi = vram[tile_addr + row * 2 + 1];
    let bit = 7 - col;
    ((hi >> bit) & 1) << 1 | ((lo >> bit) & 1)
}

/// Address of a background/window tile, honouring LCDC bit 4.
#[inline]
fn bg_tile_addr(lcdc: LcdControl, tile: u8) -> usize {
    if lcdc.contains(LcdControl::TILE_DATA_UNSIGNED) {
        tile as usize * 16
    } else {
        (TILE_DATA_SIGNED_BASE as isize + tile as i8 as isize * 16) as usize
    }
}

impl VideoController {
    /// Draw the line at LY: background, then window, then sprites.
    pub(super) fn render_scanline<B: VideoBus>(&mut self, bus: &B) {
        let ly = bus.lcd_register(io::LY);
        if ly as usize >= crate::SCREEN_HEIGHT {
            return;
        }
        let lcdc = LcdControl::from_bits_retain(bus.lcd_register(io::LCDC));
        let bgp = bus.lcd_register(io::BGP);
        let vram = bus.vram();

        // Raw background color index per pixel; sprites flagged "behind
        // background" only show through where this is 0.
        let mut bg_color = [0u8; SCREEN_WIDTH];

        if lcdc.contains(LcdControl::BG_WINDOW_ENABLE) {
            let scy = bus.lcd_register(io::SCY);
            let scx = bus.lcd_register(io::SCX);
            let map = if lcdc.contains(LcdControl::BG_TILE_MAP) { BG_MAP_1 } else { BG_MAP_0 };
            let y = ly.wrapping_add(scy) as usize;
            for (x, color) in bg_color.iter_mut().enumerate() {
                let px = (x as u8).wrapping_add(scx) as usize;
                let tile = vram[map + (y / 8) * 32 + px / 8];
                *color = tile_pixel(vram, bg_tile_addr(lcdc, tile), y % 8, px % 8);
            }

            let wy = bus.lcd_register(io::WY);
            let wx = bus.lcd_register(io::WX);
            if lcdc.contains(LcdControl::WINDOW_ENABLE) && ly >= wy && wx <= WINDOW_X_MAX {
                let map = if lcdc.contains(LcdControl::WINDOW_TILE_MAP) { BG_MAP_1 } else { BG_MAP_0 };
                let start = wx as isize - 7;
                let wy_line = self.window_line as usize;
                for x in start.max(0) as usize..SCREEN_WIDTH {
                    let wx_pixel = (x as isize - start) as usize;
                    let tile = vram[map + (wy_line / 8) * 32 + wx_pixel / 8];
                    bg_color[x] = tile_pixel(vram, bg_tile_addr(lcdc, tile), wy_line % 8, wx_pixel % 8);
                }
                self.window_line = self.window_line.wrapping_add(1);
            }
        }

        let row = ly as usize * SCREEN_WIDTH;
        for (x, &color) in bg_color.iter().enumerate() {
            self.frame_buffer[row + x] = shade(bgp, color);
        }

        if lcdc.contains(LcdControl::OBJ_ENABLE) {
            self.render_sprites(bus, ly, lcdc, &bg_color);
        }
    }

    fn render_sprites<B: VideoBus>(&mut self, bus: &B, ly: u8, lcdc: LcdControl, bg_color: &[u8; SCREEN_WIDTH]) {
        let height: i16 = if lcdc.contains(LcdControl::OBJ_TALL) { 16 } else { 8 };
        let oam = bus.oam();
        let vram = bus.vram();

        // First ten entries in OAM order that cover this line.
        let mut sprites: Vec<Sprite> = oam
            .chunks_exact(4)
            .take(OAM_ENTRIES)
            .map(|e| Sprite { y: e[0], x: e[1], tile: e[2], attrs: e[3] })
            .filter(|s| {
                let top = s.y as i16 - 16;
                (top..top + height).contains(&(ly as i16))
            })
            .take(SPRITES_PER_LINE)
            .collect();
        // On DMG the sprite with the smaller X wins; ties go to OAM order.
        sprites.sort_by_key(|s| s.x);

        let obp0 = bus.lcd_register(io::OBP0);
        let obp1 = bus.lcd_register(io::OBP1);
        let row_base = ly as usize * SCREEN_WIDTH;
        let mut drawn = [false; SCREEN_WIDTH];

        for sprite in &sprites {
            let mut line = (ly as i16 - (sprite.y as i16 - 16)) as usize;
            if sprite.y_flip() {
                line = height as usize - 1 - line;
            }
            let mut tile = sprite.tile;
            if height == 16 {
                tile &= 0xFE;
            }
            // 8x16 sprites use two consecutive tiles; `line` runs past 8
            // into the second one.
            let tile_addr = tile as usize * 16 + (line / 8) * 16;
            let palette = if sprite.uses_obp1() { obp1 } else { obp0 };

            for px in 0..8usize {
                let sx = sprite.x as isize - 8 + px as isize;
                if !(0..SCREEN_WIDTH as isize).contains(&sx) {
                    continue;
                }
                let sx = sx as usize;
                if drawn[sx] {
                    continue;
                }
                let col = if sprite.x_flip() { 7 - px } else { px };
                let color = tile_pixel(vram, tile_addr, line % 8, col);
                if color == 0 {
                    continue;
                }
                // A higher-priority sprite's opaque pixel hides lower ones
                // even when the background hides it.
                drawn[sx] = true;
                if sprite.behind_background() && bg_color[sx] != 0 {
                    continue;
                }
                self.frame_buffer[row_base + sx] = shade(palette, color);
            }
        }
    }
}

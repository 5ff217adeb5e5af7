use super::cartridge::build_test_rom;
use super::video::DOTS_PER_LINE;
use super::*;
use crate::cpu::{Bus, Interrupt};
use crate::error::{CartridgeError, EmulationError};
use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// `JR -2`: spin in place forever.
const SPIN: [u8; 2] = [0x18, 0xFE];

fn rom_with_program(program: &[u8]) -> Vec<u8> {
    let mut rom = build_test_rom(0x00, 0x00, 0x00, "TEST");
    rom[0x0100..0x0100 + program.len()].copy_from_slice(program);
    rom
}

fn machine(program: &[u8]) -> GameBoy {
    let mut gb = GameBoy::new();
    gb.load_rom(rom_with_program(program)).expect("test ROM should load");
    gb
}

fn write(gb: &mut GameBoy, addr: u16, value: u8) {
    gb.bus_mut().write_byte(addr, value, false);
}

fn read(gb: &GameBoy, addr: u16) -> u8 {
    gb.bus().read_byte(addr)
}

fn pixel(gb: &GameBoy, x: usize, y: usize) -> u8 {
    gb.frame_buffer()[y * SCREEN_WIDTH + x]
}

/// Advance the video controller in one-M-cycle slices until a frame
/// completes; returns the dots that took.
fn dots_until_frame(video: &mut VideoController, bus: &mut MemoryBus) -> u32 {
    let mut dots = 0;
    loop {
        dots += DOTS_PER_MCYCLE;
        if video.step(bus, DOTS_PER_MCYCLE) {
            return dots;
        }
        assert!(dots <= 2 * DOTS_PER_FRAME, "frame never completed");
    }
}

// --- timer -----------------------------------------------------------------

#[test]
fn timer_overflow_reloads_tma_and_requests_interrupt() {
    let mut gb = machine(&[0x00; 8]);
    write(&mut gb, io::IF, 0x00);
    write(&mut gb, io::TAC, 0x05);
    write(&mut gb, io::TMA, 0x05);
    write(&mut gb, io::TIMA, 0xFF);

    // Four NOPs are 16 clock ticks: exactly one period at TAC=05.
    for _ in 0..3 {
        gb.step().unwrap();
    }
    assert_eq!(read(&gb, io::TIMA), 0xFF);
    gb.step().unwrap();
    assert_eq!(read(&gb, io::TIMA), 0x05);
    assert_ne!(read(&gb, io::IF) & Interrupt::Timer.mask(), 0);
}

#[test]
fn div_counts_at_16384_hz_and_resets_on_write() {
    let mut bus = MemoryBus::new();
    assert_eq!(bus.read_byte(io::DIV), 0xAB);
    bus.tick_timer(256 * 3);
    assert_eq!(bus.read_byte(io::DIV), 0xAE);

    bus.tick_timer(200);
    bus.write_byte(io::DIV, 0x77, false);
    assert_eq!(bus.read_byte(io::DIV), 0x00);
    // The partial period was discarded too.
    bus.tick_timer(100);
    assert_eq!(bus.read_byte(io::DIV), 0x00);
    bus.tick_timer(156);
    assert_eq!(bus.read_byte(io::DIV), 0x01);

    bus.write_byte(io::DIV, 0x42, true);
    assert_eq!(bus.read_byte(io::DIV), 0x42);
}

#[test]
fn tac_and_if_unused_bits_read_high() {
    let mut bus = MemoryBus::new();
    assert_eq!(bus.read_byte(io::TAC), 0xF8);
    bus.write_byte(io::TAC, 0x05, false);
    assert_eq!(bus.read_byte(io::TAC), 0xFD);

    assert_eq!(bus.read_byte(io::IF), 0xE1);
    bus.write_byte(io::IF, 0xFF, false);
    assert_eq!(bus.read_byte(io::IF), 0xFF);
    bus.write_byte(io::IF, 0x00, false);
    assert_eq!(bus.read_byte(io::IF), 0xE0);
}

#[test]
fn tac_period_switch_does_not_burst_tima() {
    let mut bus = MemoryBus::new();
    bus.write_byte(io::TAC, 0x04, false);
    bus.tick_timer(1000);
    assert_eq!(bus.read_byte(io::TIMA), 0x00);

    bus.write_byte(io::TAC, 0x05, false);
    bus.tick_timer(4);
    assert!(bus.read_byte(io::TIMA) <= 1);
}

// --- cartridge through the bus ---------------------------------------------

#[test]
fn plain_cartridge_reads_rom_and_has_no_ram() {
    let mut rom = rom_with_program(&SPIN);
    rom[0x0000] = 0x31;
    let mut gb = GameBoy::new();
    gb.load_rom(rom).unwrap();

    assert_eq!(read(&gb, 0x0000), 0x31);
    write(&mut gb, 0xA000, 0x55);
    assert_eq!(read(&gb, 0xA000), 0xFF);
}

#[test]
fn mbc1_zero_bank_writes_map_bank_one() {
    let mut rom = build_test_rom(0x01, 0x01, 0x00, "MBC1");
    for (bank, chunk) in rom.chunks_mut(0x4000).enumerate() {
        chunk[0x0100] = 0xB0 | bank as u8;
    }
    let mut gb = GameBoy::new();
    gb.load_rom(rom).unwrap();

    for value in [0x00, 0x20, 0x40, 0x60] {
        write(&mut gb, 0x2000, 0x03);
        write(&mut gb, 0x2000, value);
        assert_eq!(read(&gb, 0x4100), 0xB1, "write of 0x{value:02X}");
    }
}

#[test]
fn failed_load_keeps_previous_cartridge() {
    let mut gb = machine(&SPIN);
    let err = gb.load_rom(vec![0; 0x100]).unwrap_err();
    assert!(matches!(err, CartridgeError::TooSmall { len: 0x100 }));
    assert_eq!(gb.cartridge_header().map(|h| h.title.as_str()), Some("TEST"));
    assert!(gb.bus().cartridge().is_some());
}

#[test]
fn load_rom_file_reports_missing_file() {
    let mut gb = GameBoy::new();
    let err = gb
        .load_rom_file("/nonexistent/pocketcore/missing.gb")
        .unwrap_err();
    assert!(matches!(err, CartridgeError::Io(_)));
    assert!(gb.cartridge_header().is_none());
}

#[test]
fn missing_cartridge_floats_high() {
    let bus = MemoryBus::new();
    assert_eq!(bus.read_byte(0x0100), 0xFF);
    assert_eq!(bus.read_byte(0xA000), 0xFF);
}

// --- memory map ------------------------------------------------------------

#[test]
fn echo_ram_mirrors_work_ram() {
    let mut bus = MemoryBus::new();
    bus.write_byte(0xC123, 0x42, false);
    assert_eq!(bus.read_byte(0xE123), 0x42);
    bus.write_byte(0xFDFF, 0x24, false);
    assert_eq!(bus.read_byte(0xDDFF), 0x24);
}

#[test]
fn unusable_area_reads_ff_and_ignores_writes() {
    let mut bus = MemoryBus::new();
    bus.write_byte(0xFEA0, 0x12, false);
    assert_eq!(bus.read_byte(0xFEA0), 0xFF);
    assert_eq!(bus.read_byte(0xFEFF), 0xFF);
}

#[test]
fn short_access_is_little_endian() {
    let mut bus = MemoryBus::new();
    bus.write_short(0xC000, 0xBEEF);
    assert_eq!(bus.read_byte(0xC000), 0xEF);
    assert_eq!(bus.read_byte(0xC001), 0xBE);
    assert_eq!(bus.read_short(0xC000), 0xBEEF);
}

#[test]
fn oam_dma_copies_160_bytes() {
    let mut bus = MemoryBus::new();
    for i in 0..0xA0u16 {
        bus.write_byte(0xC100 + i, i as u8 ^ 0x5A, false);
    }
    bus.write_byte(io::DMA, 0xC1, false);
    for i in 0..0xA0u16 {
        assert_eq!(bus.read_byte(0xFE00 + i), i as u8 ^ 0x5A);
    }
    assert_eq!(bus.read_byte(io::DMA), 0xC1);
}

#[test]
fn cpu_writes_to_ly_are_ignored() {
    let mut bus = MemoryBus::new();
    bus.write_byte(io::LY, 0x42, false);
    assert_eq!(bus.read_byte(io::LY), 0x00);
    bus.write_byte(io::LY, 0x42, true);
    assert_eq!(bus.read_byte(io::LY), 0x42);
}

#[test]
fn stat_cpu_writes_only_touch_select_bits() {
    let mut bus = MemoryBus::new();
    assert_eq!(bus.read_byte(io::STAT), 0x85);
    bus.write_byte(io::STAT, 0xFF, false);
    assert_eq!(bus.read_byte(io::STAT), 0xFD);
    bus.write_byte(io::STAT, 0x00, false);
    assert_eq!(bus.read_byte(io::STAT), 0x85);
}

#[test]
fn sound_registers_follow_power_switch() {
    let mut bus = MemoryBus::new();
    assert_eq!(bus.read_byte(0xFF11), 0xBF);
    bus.write_byte(io::NR52, 0x00, false);
    assert_eq!(bus.read_byte(0xFF11), 0x00);
    bus.write_byte(0xFF11, 0x3F, false);
    assert_eq!(bus.read_byte(0xFF11), 0x00, "writes dropped while off");
    bus.write_byte(0xFF30, 0x12, false);
    assert_eq!(bus.read_byte(0xFF30), 0x12, "wave RAM stays writable");
    bus.write_byte(io::NR52, 0x80, false);
    bus.write_byte(0xFF11, 0x3F, false);
    assert_eq!(bus.read_byte(0xFF11), 0x3F);
}

#[test]
fn step_feeds_the_audio_clock() {
    let mut gb = machine(&SPIN);
    let cycles = gb.step().unwrap();
    assert_eq!(gb.bus().apu_clocks(), (cycles * DOTS_PER_MCYCLE) as u64);
}

// --- joypad ----------------------------------------------------------------

#[test]
fn joypad_press_raises_interrupt_when_group_selected() {
    let mut gb = machine(&SPIN);
    write(&mut gb, io::P1, 0x10); // action buttons selected
    write(&mut gb, io::IF, 0x00);

    gb.key_pressed(Button::Left);
    assert_eq!(read(&gb, io::IF) & 0x1F, 0, "direction group not selected");

    gb.key_pressed(Button::Start);
    assert_eq!(read(&gb, io::IF) & 0x1F, Interrupt::Joypad.mask());
    assert_eq!(read(&gb, io::P1), 0xD7);

    gb.key_released(Button::Start);
    assert_eq!(read(&gb, io::P1), 0xDF);

    write(&mut gb, io::P1, 0x20);
    assert_eq!(read(&gb, io::P1), 0xED, "Left still held");
}

#[test]
fn key_press_leaves_stop() {
    let mut gb = machine(&[0x10, 0x00, 0x3C]);
    gb.step().unwrap();
    assert!(gb.cpu.is_stopped());
    assert_eq!(gb.cpu.regs.pc, 0x0102);

    assert_eq!(gb.step().unwrap(), 1);
    assert_eq!(gb.cpu.regs.pc, 0x0102, "no fetch while stopped");

    gb.key_pressed(Button::A);
    assert!(!gb.cpu.is_stopped());
    let a = gb.cpu.regs.a;
    gb.step().unwrap();
    assert_eq!(gb.cpu.regs.a, a.wrapping_add(1));
}

// --- serial ----------------------------------------------------------------

#[test]
fn serial_transfer_is_captured() {
    let program = [
        0x3E, b'H', // LD A,'H'
        0xE0, 0x01, // LDH (SB),A
        0x3E, 0x81, // LD A,0x81
        0xE0, 0x02, // LDH (SC),A
        0x18, 0xFE, // JR -2
    ];
    let mut gb = machine(&program);
    write(&mut gb, io::IF, 0x00);
    for _ in 0..4 {
        gb.step().unwrap();
    }
    assert_eq!(gb.serial_output(), b"H");
    assert_eq!(read(&gb, io::SC), 0x7F);
    assert_eq!(read(&gb, io::IF) & Interrupt::Serial.mask(), Interrupt::Serial.mask());
}

// --- video timing ----------------------------------------------------------

#[test]
fn every_frame_is_70224_dots() {
    for lcdc in [0x91, 0x93, 0x97, 0xB1, 0xF3, 0x80] {
        let mut bus = MemoryBus::new();
        bus.write_byte(io::LCDC, lcdc, false);
        bus.write_byte(io::STAT, 0x78, false);
        bus.write_byte(io::OBP0, 0xE4, false);
        let mut video = VideoController::new();
        assert_eq!(dots_until_frame(&mut video, &mut bus), DOTS_PER_FRAME);
        assert_eq!(dots_until_frame(&mut video, &mut bus), DOTS_PER_FRAME);
        assert_eq!(video.frame_count(), 2);
    }
}

#[test]
fn large_steps_carry_the_remainder() {
    let mut bus = MemoryBus::new();
    let mut video = VideoController::new();
    // 70224 = 7 * 10032; every slice crosses several transitions.
    let done: Vec<bool> = (0..7).map(|_| video.step(&mut bus, 10_032)).collect();
    assert_eq!(done, [false, false, false, false, false, false, true]);
    assert_eq!(bus.read_byte(io::LY), 0);
    assert_eq!(video.mode(), Mode::OamScan);
}

#[test]
fn vblank_interrupt_at_line_144() {
    let mut bus = MemoryBus::new();
    let mut video = VideoController::new();
    bus.write_byte(io::IF, 0x00, false);

    video.step(&mut bus, 144 * DOTS_PER_LINE - DOTS_PER_MCYCLE);
    assert_eq!(bus.read_byte(io::LY), 143);
    assert_eq!(bus.read_byte(io::IF) & 0x01, 0);

    video.step(&mut bus, DOTS_PER_MCYCLE);
    assert_eq!(bus.read_byte(io::LY), 144);
    assert_eq!(video.mode(), Mode::VBlank);
    assert_eq!(bus.read_byte(io::STAT) & 0x03, Mode::VBlank as u8);
    assert_eq!(bus.read_byte(io::IF) & 0x01, 0x01);
}

#[test]
fn stat_interrupt_on_selected_mode_entry() {
    let mut bus = MemoryBus::new();
    let mut video = VideoController::new();
    bus.write_byte(io::STAT, StatSelect::HBLANK.bits(), false);
    bus.write_byte(io::IF, 0x00, false);

    video.step(&mut bus, 80);
    assert_eq!(video.mode(), Mode::PixelTransfer);
    assert_eq!(bus.read_byte(io::IF) & 0x02, 0);

    video.step(&mut bus, 172);
    assert_eq!(video.mode(), Mode::HBlank);
    assert_eq!(bus.read_byte(io::IF) & 0x02, 0x02);

    bus.write_byte(io::IF, 0x00, false);
    video.step(&mut bus, 204);
    assert_eq!(video.mode(), Mode::OamScan);
    assert_eq!(bus.read_byte(io::IF) & 0x02, 0, "OAM select is off");
}

#[test]
fn vblank_lines_do_not_retrigger_mode_interrupt() {
    let mut bus = MemoryBus::new();
    let mut video = VideoController::new();
    bus.write_byte(io::STAT, StatSelect::VBLANK.bits(), false);
    video.step(&mut bus, 144 * DOTS_PER_LINE);
    assert_eq!(bus.read_byte(io::IF) & 0x02, 0x02);

    bus.write_byte(io::IF, 0x00, false);
    video.step(&mut bus, DOTS_PER_LINE);
    assert_eq!(bus.read_byte(io::LY), 145);
    assert_eq!(bus.read_byte(io::IF) & 0x02, 0);
}

#[test]
fn ly_lyc_coincidence() {
    let mut bus = MemoryBus::new();
    let mut video = VideoController::new();
    bus.write_byte(io::STAT, StatSelect::LYC.bits(), false);
    bus.write_byte(io::LYC, 3, false);
    assert_eq!(bus.read_byte(io::STAT) & 0x04, 0);
    bus.write_byte(io::IF, 0x00, false);

    video.step(&mut bus, 3 * DOTS_PER_LINE);
    assert_eq!(bus.read_byte(io::LY), 3);
    assert_eq!(bus.read_byte(io::STAT) & 0x04, 0x04);
    assert_eq!(bus.read_byte(io::IF) & 0x02, 0x02);

    video.step(&mut bus, DOTS_PER_LINE);
    assert_eq!(bus.read_byte(io::STAT) & 0x04, 0);

    // Writing LYC re-checks immediately.
    bus.write_byte(io::IF, 0x00, false);
    bus.write_byte(io::LYC, 4, false);
    assert_eq!(bus.read_byte(io::STAT) & 0x04, 0x04);
    assert_eq!(bus.read_byte(io::IF) & 0x02, 0x02);
}

#[test]
fn lcd_off_freezes_video_and_blanks_screen() {
    let mut gb = machine(&SPIN);
    write(&mut gb, io::BGP, 0xFF);
    gb.run_frame().unwrap();
    assert!(gb.frame_buffer().iter().all(|&s| s == 3));

    // Turn the display off mid-frame.
    for _ in 0..1000 {
        gb.step().unwrap();
    }
    write(&mut gb, io::LCDC, 0x11);
    assert_eq!(read(&gb, io::LY), 0);
    assert_eq!(read(&gb, io::STAT) & 0x03, 0);

    let frames = gb.frame_count();
    gb.run_frame().unwrap();
    assert_eq!(gb.frame_count(), frames, "no frame while off");
    assert_eq!(read(&gb, io::LY), 0);
    assert!(gb.frame_buffer().iter().all(|&s| s == 0));

    write(&mut gb, io::LCDC, 0x91);
    assert_eq!(read(&gb, io::STAT) & 0x03, Mode::OamScan as u8);
    gb.run_frame().unwrap();
    assert_eq!(gb.frame_count(), frames + 1);
    assert!(gb.frame_buffer().iter().all(|&s| s == 3));
}

// --- rendering -------------------------------------------------------------

/// Fill one 8x8 tile with a single color index.
fn solid_tile(gb: &mut GameBoy, addr: u16, color: u8) {
    let lo = if color & 1 != 0 { 0xFF } else { 0x00 };
    let hi = if color & 2 != 0 { 0xFF } else { 0x00 };
    for row in 0..8 {
        write(gb, addr + row * 2, lo);
        write(gb, addr + row * 2 + 1, hi);
    }
}

fn fill_map(gb: &mut GameBoy, base: u16, tile: u8) {
    for i in 0..0x400 {
        write(gb, base + i, tile);
    }
}

fn display_machine(lcdc: u8) -> GameBoy {
    let mut gb = machine(&SPIN);
    write(&mut gb, io::LCDC, lcdc);
    write(&mut gb, io::BGP, 0xE4);
    write(&mut gb, io::OBP0, 0xE4);
    write(&mut gb, io::OBP1, 0x1B);
    gb
}

#[test]
fn background_scrolls_with_scx() {
    let mut gb = display_machine(0x91);
    solid_tile(&mut gb, 0x8010, 3);
    write(&mut gb, 0x9801, 1);
    gb.run_frame().unwrap();
    assert_eq!(pixel(&gb, 7, 0), 0);
    assert_eq!(pixel(&gb, 8, 0), 3);
    assert_eq!(pixel(&gb, 15, 7), 3);
    assert_eq!(pixel(&gb, 8, 8), 0);

    write(&mut gb, io::SCX, 4);
    gb.run_frame().unwrap();
    assert_eq!(pixel(&gb, 3, 0), 0);
    assert_eq!(pixel(&gb, 4, 0), 3);
    assert_eq!(pixel(&gb, 11, 0), 3);
    assert_eq!(pixel(&gb, 12, 0), 0);
}

#[test]
fn signed_tile_data_uses_8800_region() {
    let mut gb = display_machine(0x81);
    solid_tile(&mut gb, 0x9000, 2);
    solid_tile(&mut gb, 0x8800, 1);
    write(&mut gb, 0x9800, 0x80);
    gb.run_frame().unwrap();
    assert_eq!(pixel(&gb, 0, 0), 1, "tile 0x80 is at 0x8800");
    assert_eq!(pixel(&gb, 8, 0), 2, "tile 0x00 is at 0x9000");
}

#[test]
fn bgp_maps_color_indices() {
    let mut gb = display_machine(0x91);
    write(&mut gb, io::BGP, 0x1B);
    gb.run_frame().unwrap();
    // Every tile pixel is color index 0; the buffer holds its BGP shade.
    assert!(gb.frame_buffer().iter().all(|&s| s == 3));
}

#[test]
fn window_overlays_background_from_wx_wy() {
    let mut gb = display_machine(0x91 | 0x20 | 0x40);
    solid_tile(&mut gb, 0x8010, 3);
    fill_map(&mut gb, 0x9C00, 1);
    write(&mut gb, io::WY, 10);
    write(&mut gb, io::WX, 7 + 80);
    gb.run_frame().unwrap();

    assert_eq!(pixel(&gb, 80, 9), 0);
    assert_eq!(pixel(&gb, 79, 10), 0);
    assert_eq!(pixel(&gb, 80, 10), 3);
    assert_eq!(pixel(&gb, SCREEN_WIDTH - 1, SCREEN_HEIGHT - 1), 3);
}

#[test]
fn window_line_counter_ignores_scy() {
    let mut gb = display_machine(0x91 | 0x20 | 0x40);
    // Window tile row 0 uses tile 1 (color 3); row 1 onward tile 0.
    solid_tile(&mut gb, 0x8010, 3);
    for i in 0..32 {
        write(&mut gb, 0x9C00 + i, 1);
    }
    write(&mut gb, io::SCY, 40);
    write(&mut gb, io::WY, 50);
    write(&mut gb, io::WX, 7);
    gb.run_frame().unwrap();

    assert_eq!(pixel(&gb, 0, 49), 0);
    assert_eq!(pixel(&gb, 0, 50), 3);
    assert_eq!(pixel(&gb, 0, 57), 3);
    assert_eq!(pixel(&gb, 0, 58), 0);
}

#[test]
fn bg_disable_renders_color_zero() {
    let mut gb = display_machine(0x90 | 0x20);
    write(&mut gb, io::BGP, 0xE6);
    solid_tile(&mut gb, 0x8000, 3);
    gb.run_frame().unwrap();
    assert!(gb.frame_buffer().iter().all(|&s| s == 2));
}

fn place_sprite(gb: &mut GameBoy, index: u16, y: u8, x: u8, tile: u8, attrs: u8) {
    let base = 0xFE00 + index * 4;
    write(gb, base, y);
    write(gb, base + 1, x);
    write(gb, base + 2, tile);
    write(gb, base + 3, attrs);
}

#[test]
fn sprites_draw_with_transparency_and_palettes() {
    let mut gb = display_machine(0x93);
    // Tile 2: left half color 1, right half transparent.
    for row in 0..8 {
        write(&mut gb, 0x8020 + row * 2, 0xF0);
        write(&mut gb, 0x8021 + row * 2, 0x00);
    }
    place_sprite(&mut gb, 0, 16, 8, 2, 0x00);
    place_sprite(&mut gb, 1, 16 + 20, 8, 2, 0x10);
    gb.run_frame().unwrap();

    assert_eq!(pixel(&gb, 0, 0), 1);
    assert_eq!(pixel(&gb, 3, 7), 1);
    assert_eq!(pixel(&gb, 4, 0), 0, "color 0 is transparent");
    assert_eq!(pixel(&gb, 0, 8), 0);
    // OBP1 = 0x1B maps color 1 to shade 2.
    assert_eq!(pixel(&gb, 0, 20), 2);
}

#[test]
fn sprite_flips() {
    let mut gb = display_machine(0x93);
    // Tile 2: only the top-left pixel set.
    write(&mut gb, 0x8020, 0x80);
    place_sprite(&mut gb, 0, 16, 8, 2, 0x20);
    place_sprite(&mut gb, 1, 16, 24, 2, 0x40);
    gb.run_frame().unwrap();

    assert_eq!(pixel(&gb, 0, 0), 0);
    assert_eq!(pixel(&gb, 7, 0), 1, "x flip");
    assert_eq!(pixel(&gb, 16, 0), 0);
    assert_eq!(pixel(&gb, 16, 7), 1, "y flip");
}

#[test]
fn tall_sprites_span_two_tiles() {
    let mut gb = display_machine(0x97);
    solid_tile(&mut gb, 0x8040, 1);
    solid_tile(&mut gb, 0x8050, 2);
    // Odd tile number: bit 0 is ignored in 8x16 mode.
    place_sprite(&mut gb, 0, 16, 8, 5, 0x00);
    gb.run_frame().unwrap();

    assert_eq!(pixel(&gb, 0, 0), 1);
    assert_eq!(pixel(&gb, 0, 8), 2);
    assert_eq!(pixel(&gb, 0, 15), 2);
    assert_eq!(pixel(&gb, 0, 16), 0);
}

#[test]
fn behind_background_sprites_show_only_over_color_zero() {
    let mut gb = display_machine(0x93);
    solid_tile(&mut gb, 0x8020, 1);
    // BG tile 1 (color 3) only in the second map column.
    solid_tile(&mut gb, 0x8010, 3);
    write(&mut gb, 0x9801, 1);
    place_sprite(&mut gb, 0, 16, 12, 2, 0x80);
    gb.run_frame().unwrap();

    assert_eq!(pixel(&gb, 4, 0), 1, "over color 0");
    assert_eq!(pixel(&gb, 8, 0), 3, "hidden by color 3");
}

#[test]
fn at_most_ten_sprites_per_line() {
    let mut gb = display_machine(0x93);
    solid_tile(&mut gb, 0x8020, 1);
    for i in 0..11u16 {
        place_sprite(&mut gb, i, 16, 8 + 8 * i as u8, 2, 0x00);
    }
    gb.run_frame().unwrap();

    assert_eq!(pixel(&gb, 72, 0), 1, "tenth sprite drawn");
    assert_eq!(pixel(&gb, 80, 0), 0, "eleventh sprite dropped");
}

#[test]
fn lower_x_sprite_wins_overlap() {
    let mut gb = display_machine(0x93);
    solid_tile(&mut gb, 0x8020, 1);
    solid_tile(&mut gb, 0x8030, 2);
    place_sprite(&mut gb, 0, 16, 12, 2, 0x00);
    place_sprite(&mut gb, 1, 16, 10, 3, 0x00);
    gb.run_frame().unwrap();

    assert_eq!(pixel(&gb, 2, 0), 2);
    assert_eq!(pixel(&gb, 4, 0), 2);
    assert_eq!(pixel(&gb, 10, 0), 1);
}

// --- whole machine ---------------------------------------------------------

#[test]
fn halted_cpu_wakes_for_vblank() {
    let mut rom = rom_with_program(&[0xFB, 0x76, 0x00]);
    rom[0x0040..0x0042].copy_from_slice(&SPIN);
    let mut gb = GameBoy::new();
    gb.load_rom(rom).unwrap();
    write(&mut gb, io::IE, Interrupt::VBlank.mask());
    write(&mut gb, io::IF, 0x00);

    gb.run_frame().unwrap();
    gb.step().unwrap();
    assert!(!gb.cpu.halted);
    assert_eq!(gb.cpu.regs.pc, 0x0040);
    assert_eq!(read(&gb, io::IF) & 0x01, 0);
}

#[test]
fn undefined_opcode_stops_the_run() {
    let mut gb = machine(&[0x00, 0xD3, 0x12, 0x34]);
    gb.step().unwrap();
    match gb.run_frame() {
        Err(EmulationError::UndefinedOpcode { pc, opcode, operands, .. }) => {
            assert_eq!(pc, 0x0101);
            assert_eq!(opcode, 0xD3);
            assert_eq!(operands, vec![0x12, 0x34]);
        }
        other => panic!("expected undefined opcode, got {other:?}"),
    }
}

#[test]
fn reset_restores_power_on_state_and_keeps_cartridge() {
    let mut gb = machine(&[0x3C, 0x3C, 0x18, 0xFE]);
    write(&mut gb, 0xC000, 0x99);
    gb.run_frame().unwrap();
    gb.reset();

    assert_eq!(gb.cpu.regs.pc, 0x0100);
    assert_eq!(gb.cpu.regs.af(), 0x01B0);
    assert_eq!(read(&gb, 0xC000), 0x00);
    assert_eq!(read(&gb, io::DIV), 0xAB);
    assert_eq!(read(&gb, io::LCDC), 0x91);
    assert_eq!(gb.frame_count(), 0);
    assert_eq!(read(&gb, 0x0100), 0x3C);
    assert_eq!(gb.trace_line(), "A: 01 F: B0 B: 00 C: 13 D: 00 E: D8 H: 01 L: 4D SP: FFFE PC: 00:0100 (3C 3C 18 FE)");
}

#[test]
fn identical_runs_are_bit_identical() {
    let program = [
        0x3E, 0x0F, // LD A,0x0F
        0xEA, 0x00, 0x98, // LD (0x9800),A
        0x3C, // INC A
        0xE0, 0x47, // LDH (BGP),A
        0x18, 0xF8, // JR back to LD (0x9800),A
    ];
    let run = || {
        let mut gb = machine(&program);
        let mut trace = Vec::new();
        for frame in 0..3 {
            if frame == 1 {
                gb.key_pressed(Button::Up);
            }
            for _ in 0..50 {
                trace.push(gb.trace_line());
                gb.step().unwrap();
            }
            gb.run_frame().unwrap();
        }
        (gb.frame_buffer().to_vec(), trace, gb.cpu.regs.af())
    };
    assert_eq!(run(), run());
}

#[test]
fn frame_buffer_has_screen_dimensions() {
    let gb = GameBoy::new();
    assert_eq!(gb.frame_buffer().len(), SCREEN_WIDTH * SCREEN_HEIGHT);
}

#[test]
fn cpu_bus_trait_routes_through_memory_map() {
    let mut bus = MemoryBus::new();
    Bus::write8(&mut bus, 0xE010, 0x66);
    assert_eq!(Bus::read8(&mut bus, 0xC010), 0x66);
    Bus::write8(&mut bus, io::LY, 0x12);
    assert_eq!(Bus::read8(&mut bus, io::LY), 0x00);
}

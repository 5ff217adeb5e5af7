use super::super::io;
use super::MemoryBus;

impl MemoryBus {
    /// Initialize IO registers to the state the DMG boot ROM leaves at
    /// PC=0x0100. Sound registers get their values from the APU itself.
    ///
    /// RAM starts zeroed. Real hardware powers up with noise there, but
    /// identical runs must produce identical traces.
    pub(super) fn apply_dmg_initial_io_state(&mut self) {
        // Joypad: no group selected.
        self.memory[io::P1 as usize] = 0xCF;

        // Serial.
        self.serial.sb = 0x00;
        self.serial.sc = 0x7E;

        // Divider / timer. TAC's unused upper bits read back as 1.
        self.memory[io::DIV as usize] = 0xAB;
        self.memory[io::TIMA as usize] = 0x00;
        self.memory[io::TMA as usize] = 0x00;
        self.memory[io::TAC as usize] = 0x00;
        self.timer.set_tac(0x00);

        // IF has the VBlank request left over from the boot ROM.
        self.if_reg = 0x01;
        self.ie_reg = 0x00;

        // LCD.
        self.memory[io::LCDC as usize] = 0x91;
        self.memory[io::STAT as usize] = 0x85;
        self.memory[io::SCY as usize] = 0x00;
        self.memory[io::SCX as usize] = 0x00;
        self.memory[io::LY as usize] = 0x00;
        self.memory[io::LYC as usize] = 0x00;
        self.memory[io::DMA as usize] = 0xFF;
        self.memory[io::BGP as usize] = 0xFC;
        // OBP0/OBP1 are officially uninitialized; leave them at 0.
        self.memory[io::WY as usize] = 0x00;
        self.memory[io::WX as usize] = 0x00;
    }
}

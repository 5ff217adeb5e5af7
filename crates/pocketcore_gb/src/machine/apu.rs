/// Audio unit placeholder.
///
/// No sound is synthesized. The unit consumes clock ticks so the machine's
/// timing loop has the same shape it would have with a real APU, and it
/// holds the sound register file (FF10-FF3F) so software sees the power-on
/// values and the NR52 power gating.
pub(super) struct Apu {
    regs: [u8; REG_COUNT],
    clocks: u64,
}

const REG_BASE: u16 = 0xFF10;
const REG_COUNT: usize = 0x30;
const NR52: u16 = 0xFF26;
/// Wave pattern RAM stays writable while the APU is powered off.
const WAVE_RAM: std::ops::RangeInclusive<u16> = 0xFF30..=0xFF3F;

/// Sound registers as the DMG boot ROM leaves them.
const DMG_POWER_ON: [(u16, u8); 21] = [
    (0xFF10, 0x80),
    (0xFF11, 0xBF),
    (0xFF12, 0xF3),
    (0xFF13, 0xFF),
    (0xFF14, 0xBF),
    (0xFF16, 0x3F),
    (0xFF17, 0x00),
    (0xFF18, 0xFF),
    (0xFF19, 0xBF),
    (0xFF1A, 0x7F),
    (0xFF1B, 0xFF),
    (0xFF1C, 0x9F),
    (0xFF1D, 0xFF),
    (0xFF1E, 0xBF),
    (0xFF20, 0xFF),
    (0xFF21, 0x00),
    (0xFF22, 0x00),
    (0xFF23, 0xBF),
    (0xFF24, 0x77),
    (0xFF25, 0xF3),
    (0xFF26, 0xF1),
];

impl Apu {
    pub(super) fn new() -> Self {
        let mut apu = Self {
            regs: [0; REG_COUNT],
            clocks: 0,
        };
        for (addr, value) in DMG_POWER_ON {
            apu.regs[(addr - REG_BASE) as usize] = value;
        }
        apu
    }

    #[inline]
    pub(super) fn tick(&mut self, clocks: u32) {
        self.clocks = self.clocks.wrapping_add(clocks as u64);
    }

    #[cfg(test)]
    pub(super) fn clocks(&self) -> u64 {
        self.clocks
    }

    fn powered(&self) -> bool {
        self.regs[(NR52 - REG_BASE) as usize] & 0x80 != 0
    }

    pub(super) fn read(&self, addr: u16) -> u8 {
        self.regs[(addr - REG_BASE) as usize]
    }

    pub(super) fn write(&mut self, addr: u16, value: u8) {
        let index = (addr - REG_BASE) as usize;
        if addr == NR52 {
            // Only bit 7 is writable. Powering off clears every sound
            // register and the channel status bits.
            if self.powered() && value & 0x80 == 0 {
                for reg in &mut self.regs[..(NR52 - REG_BASE) as usize] {
                    *reg = 0;
                }
                self.regs[index] = 0;
                log::debug!("GB APU: powered off");
            }
            self.regs[index] = (self.regs[index] & 0x7F) | (value & 0x80);
        } else if self.powered() || WAVE_RAM.contains(&addr) {
            self.regs[index] = value;
        }
    }
}

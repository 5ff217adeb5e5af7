use crate::cpu::instruction::R16Mem;
use crate::cpu::{Bus, Cpu};

impl Cpu {
    /// Resolve an indirect operand, applying the HL post-increment or
    /// post-decrement.
    fn r16_mem_addr(&mut self, mem: R16Mem) -> u16 {
        match mem {
            R16Mem::Bc => self.regs.bc(),
            R16Mem::De => self.regs.de(),
            R16Mem::HlInc => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_add(1));
                hl
            }
            R16Mem::HlDec => {
                let hl = self.regs.hl();
                self.regs.set_hl(hl.wrapping_sub(1));
                hl
            }
        }
    }

    pub(super) fn exec_ld_mem_a<B: Bus>(&mut self, bus: &mut B, mem: R16Mem) -> u32 {
        let addr = self.r16_mem_addr(mem);
        bus.write8(addr, self.regs.a);
        2
    }

    pub(super) fn exec_ld_a_mem<B: Bus>(&mut self, bus: &mut B, mem: R16Mem) -> u32 {
        let addr = self.r16_mem_addr(mem);
        self.regs.a = bus.read8(addr);
        2
    }

    pub(super) fn exec_ld_a16_sp<B: Bus>(&mut self, bus: &mut B) -> u32 {
        let addr = self.fetch16(bus);
        bus.write16(addr, self.regs.sp);
        5
    }

    /// `LDH (a8),A`, `LD (C),A` and `LD (a16),A`: store A at `addr`.
    pub(super) fn exec_store_a<B: Bus>(&mut self, bus: &mut B, addr: u16, cycles: u32) -> u32 {
        bus.write8(addr, self.regs.a);
        cycles
    }

    /// `LDH A,(a8)`, `LD A,(C)` and `LD A,(a16)`: load A from `addr`.
    pub(super) fn exec_load_a<B: Bus>(&mut self, bus: &mut B, addr: u16, cycles: u32) -> u32 {
        self.regs.a = bus.read8(addr);
        cycles
    }

    /// Address in the 0xFF00 page for an LDH-style offset.
    #[inline]
    pub(super) fn high_page(offset: u8) -> u16 {
        0xFF00 | offset as u16
    }
}

use super::{Bus, Cpu};

impl Cpu {
    /// One-line register trace for the instruction about to execute, in
    /// the format used by common reference logs:
    ///
    /// `A: 01 F: B0 B: 00 C: 13 D: 00 E: D8 H: 01 L: 4D SP: FFFE PC: 00:0100 (00 C3 13 02)`
    ///
    /// The four bytes in parentheses are read from PC onward.
    pub fn trace_line<B: Bus>(&self, bus: &mut B) -> String {
        let r = &self.regs;
        let pc = r.pc;
        let [m0, m1, m2, m3] = [0u16, 1, 2, 3].map(|i| bus.read8(pc.wrapping_add(i)));
        format!(
            "A: {:02X} F: {:02X} B: {:02X} C: {:02X} D: {:02X} E: {:02X} H: {:02X} L: {:02X} SP: {:04X} PC: 00:{:04X} ({m0:02X} {m1:02X} {m2:02X} {m3:02X})",
            r.a,
            r.f.bits(),
            r.b,
            r.c,
            r.d,
            r.e,
            r.h,
            r.l,
            r.sp,
            pc,
        )
    }

    /// Compact register dump used in fatal diagnostics.
    pub fn register_dump(&self) -> String {
        let r = &self.regs;
        format!(
            "AF=0x{:04X} BC=0x{:04X} DE=0x{:04X} HL=0x{:04X} SP=0x{:04X} PC=0x{:04X} IME={}",
            r.af(),
            r.bc(),
            r.de(),
            r.hl(),
            r.sp,
            r.pc,
            u8::from(self.ime),
        )
    }
}

use super::super::io;
use super::MemoryBus;

/// OAM DMA copies this many bytes to 0xFE00.
const OAM_DMA_LEN: u16 = 0xA0;

impl MemoryBus {
    /// OAM DMA: copy 160 bytes from XX00..XX9F to FE00..FE9F.
    ///
    /// The transfer completes instantly. The 160 machine cycles during
    /// which real hardware keeps the CPU off the bus are not modelled.
    pub(super) fn do_oam_dma(&mut self, value: u8) {
        let base = (value as u16) << 8;
        for i in 0..OAM_DMA_LEN {
            let byte = self.read8_mmio(base.wrapping_add(i));
            self.memory[0xFE00 + i as usize] = byte;
        }
        self.memory[io::DMA as usize] = value;
        log::trace!("GB DMA: OAM <- 0x{base:04X}");
    }
}

/// Serial port reduced to what test ROMs need.
///
/// Starting a transfer on SC with the internal clock (bits 7 and 0 set)
/// completes it immediately: the SB byte is appended to `output`, the start
/// bit is cleared and the caller is told to raise the Serial interrupt.
#[derive(Default)]
pub(super) struct Serial {
    pub(super) sb: u8,
    pub(super) sc: u8,
    pub(super) output: Vec<u8>,
}

impl Serial {
    pub(super) fn write_sb(&mut self, value: u8) {
        self.sb = value;
    }

    /// Returns `true` when the write completed a transfer.
    pub(super) fn write_sc(&mut self, value: u8) -> bool {
        self.sc = value;
        if (self.sc & 0x81) != 0x81 {
            return false;
        }
        self.output.push(self.sb);
        self.sc &= !0x80;
        log::trace!("GB serial: sent 0x{:02X}", self.sb);
        true
    }

    /// SC bits 1-6 are unused and read back as 1.
    pub(super) fn read_sc(&self) -> u8 {
        self.sc | 0x7E
    }
}

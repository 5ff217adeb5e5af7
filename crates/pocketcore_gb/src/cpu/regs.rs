use bitflags::bitflags;

bitflags! {
    /// Flag bits held in the upper nibble of F.
    ///
    /// The lower nibble has no meaning on the LR35902 and always reads as
    /// zero; every conversion from a raw byte goes through
    /// `from_bits_truncate`, which drops it.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct Flags: u8 {
        const ZERO = 0b1000_0000;
        const NEGATIVE = 0b0100_0000;
        const HALF_CARRY = 0b0010_0000;
        const CARRY = 0b0001_0000;
    }
}

impl Flags {
    #[inline]
    pub fn zero(self) -> bool {
        self.contains(Flags::ZERO)
    }

    #[inline]
    pub fn negative(self) -> bool {
        self.contains(Flags::NEGATIVE)
    }

    #[inline]
    pub fn half_carry(self) -> bool {
        self.contains(Flags::HALF_CARRY)
    }

    #[inline]
    pub fn carry(self) -> bool {
        self.contains(Flags::CARRY)
    }

    #[inline]
    pub fn set_zero(&mut self, value: bool) {
        self.set(Flags::ZERO, value);
    }

    #[inline]
    pub fn set_negative(&mut self, value: bool) {
        self.set(Flags::NEGATIVE, value);
    }

    #[inline]
    pub fn set_half_carry(&mut self, value: bool) {
        self.set(Flags::HALF_CARRY, value);
    }

    #[inline]
    pub fn set_carry(&mut self, value: bool) {
        self.set(Flags::CARRY, value);
    }
}

/// Registers for the Game Boy CPU (LR35902).
///
/// The 16-bit pairs are composed with explicit byte ordering rather than
/// aliased storage, so the layout does not depend on host endianness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registers {
    pub a: u8,
    pub f: Flags,
    pub b: u8,
    pub c: u8,
    pub d: u8,
    pub e: u8,
    pub h: u8,
    pub l: u8,
    pub sp: u16,
    pub pc: u16,
}

impl Registers {
    #[inline]
    pub fn af(&self) -> u16 {
        u16::from_be_bytes([self.a, self.f.bits()])
    }

    #[inline]
    pub fn set_af(&mut self, value: u16) {
        let [a, f] = value.to_be_bytes();
        self.a = a;
        self.f = Flags::from_bits_truncate(f);
    }

    #[inline]
    pub fn bc(&self) -> u16 {
        u16::from_be_bytes([self.b, self.c])
    }

    #[inline]
    pub fn set_bc(&mut self, value: u16) {
        let [b, c] = value.to_be_bytes();
        self.b = b;
        self.c = c;
    }

    #[inline]
    pub fn de(&self) -> u16 {
        u16::from_be_bytes([self.d, self.e])
    }

    #[inline]
    pub fn set_de(&mut self, value: u16) {
        let [d, e] = value.to_be_bytes();
        self.d = d;
        self.e = e;
    }

    #[inline]
    pub fn hl(&self) -> u16 {
        u16::from_be_bytes([self.h, self.l])
    }

    #[inline]
    pub fn set_hl(&mut self, value: u16) {
        let [h, l] = value.to_be_bytes();
        self.h = h;
        self.l = l;
    }

    /// Post-boot-ROM register file for the DMG, with PC at the cartridge
    /// entry point.
    pub fn dmg_boot() -> Self {
        Self {
            a: 0x01,
            f: Flags::ZERO | Flags::HALF_CARRY | Flags::CARRY,
            b: 0x00,
            c: 0x13,
            d: 0x00,
            e: 0xD8,
            h: 0x01,
            l: 0x4D,
            sp: 0xFFFE,
            pc: 0x0100,
        }
    }
}

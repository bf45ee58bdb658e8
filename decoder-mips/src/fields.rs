//! Splitting words into the six canonical MIPS bit-groups.

use std::fmt;

/// A word split at fixed bit positions, most significant group first.
///
/// ```text
/// 31    26 25  21 20  16 15  11 10   6 5     0
/// +-------+------+------+------+------+-------+
/// |opcode |  rs  |  rt  |  rd  |shamt | funct |
/// +-------+------+------+------+------+-------+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fields {
    pub opcode: u8,
    pub rs: u8,
    pub rt: u8,
    pub rd: u8,
    pub shamt: u8,
    pub funct: u8,
}

impl Fields {
    pub const fn split(word: u32) -> Self {
        Self {
            opcode: (word >> 26) as u8,
            rs: (word >> 21 & 0b11111) as u8,
            rt: (word >> 16 & 0b11111) as u8,
            rd: (word >> 11 & 0b11111) as u8,
            shamt: (word >> 6 & 0b11111) as u8,
            funct: (word & 0b111111) as u8,
        }
    }

    /// Inverse of [`Fields::split`].
    pub const fn join(self) -> u32 {
        (self.opcode as u32 & 0b111111) << 26
            | (self.rs as u32 & 0b11111) << 21
            | (self.rt as u32 & 0b11111) << 16
            | (self.rd as u32 & 0b11111) << 11
            | (self.shamt as u32 & 0b11111) << 6
            | (self.funct as u32 & 0b111111)
    }

    /// Lower 16 bits as used by I-type instructions.
    pub const fn imm16(self) -> u16 {
        (self.join() & 0xffff) as u16
    }

    /// Lower 16 bits sign extended.
    pub const fn simm(self) -> i32 {
        sign_extend(self.imm16())
    }

    /// Lower 26 bits as used by J-type instructions.
    pub const fn target26(self) -> u32 {
        self.join() & 0x03ff_ffff
    }
}

/// Two's complement interpretation of a 16-bit immediate.
pub const fn sign_extend(imm: u16) -> i32 {
    imm as i16 as i32
}

impl fmt::Display for Fields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!(
            "{:06b} {:05b} {:05b} {:05b} {:05b} {:06b}",
            self.opcode, self.rs, self.rt, self.rd, self.shamt, self.funct
        ))
    }
}

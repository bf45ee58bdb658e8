//! Mnemonic vocabulary and the lookup tables that map codes onto it.

use std::fmt;
use std::str::FromStr;

macro_rules! mnemonics {
    ($($(#[doc = $doc:literal])* $variant:ident => $name:literal,)+) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Mnemonic {
            $($(#[doc = $doc])* $variant,)+
        }

        impl Mnemonic {
            /// Every mnemonic the decoder is able to produce.
            pub const ALL: &'static [Mnemonic] = &[$(Mnemonic::$variant,)+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Mnemonic::$variant => $name,)+
                }
            }
        }
    };
}

mnemonics! {
    /// All-zero word, encoded the same as `SLL R0, R0, #0`.
    Nop => "NOP",
    /// Shift $rt left by shamt storing the result in $rd.
    Sll => "SLL",
    /// Shift $rt right by shamt storing the result in $rd, zero extending.
    Srl => "SRL",
    /// Shift $rt right by shamt storing the result in $rd, sign extending.
    Sra => "SRA",
    /// Shift $rt left by $rs storing the result in $rd.
    Sllv => "SLLV",
    /// Shift $rt right by $rs storing the result in $rd, zero extending.
    Srlv => "SRLV",
    /// Shift $rt right by $rs storing the result in $rd, sign extending.
    Srav => "SRAV",
    /// Jump to address of $rs.
    Jr => "JR",
    /// Jump to address of $rs saving the return address in $rd.
    Jalr => "JALR",
    /// Trap into the kernel.
    Syscall => "SYSCALL",
    /// Breakpoint exception.
    Break => "BREAK",
    /// Move $hi into $rd.
    Mfhi => "MFHI",
    /// Move $rs into $hi.
    Mthi => "MTHI",
    /// Move $lo into $rd.
    Mflo => "MFLO",
    /// Move $rs into $lo.
    Mtlo => "MTLO",
    Add => "ADD",
    Addu => "ADDU",
    Sub => "SUB",
    Subu => "SUBU",
    And => "AND",
    Or => "OR",
    Xor => "XOR",
    Nor => "NOR",
    /// Set $rd to 1 if $rs is less than $rt (signed), otherwise 0.
    Slt => "SLT",
    /// Branch if $rs is less than zero.
    Bltz => "BLTZ",
    /// Branch if $rs is greater than or equal to zero.
    Bgez => "BGEZ",
    /// Branch and link if $rs is less than zero.
    Bltzal => "BLTZAL",
    /// Branch and link if $rs is greater than or equal to zero.
    Bgezal => "BGEZAL",
    J => "J",
    Jal => "JAL",
    Beq => "BEQ",
    Bne => "BNE",
    Blez => "BLEZ",
    Bgtz => "BGTZ",
    Addi => "ADDI",
    Addiu => "ADDIU",
    Slti => "SLTI",
    Andi => "ANDI",
    Ori => "ORI",
    Xori => "XORI",
    /// Store the immediate in the upper 16 bits of $rt.
    Lui => "LUI",
    Lb => "LB",
    Lh => "LH",
    Lw => "LW",
    Lbu => "LBU",
    Lhu => "LHU",
    Sb => "SB",
    Sh => "SH",
    Sw => "SW",
}

impl fmt::Display for Mnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownMnemonic(pub String);

impl fmt::Display for UnknownMnemonic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_fmt(format_args!("'{}' isn't a known mnemonic.", self.0))
    }
}

impl std::error::Error for UnknownMnemonic {}

impl FromStr for Mnemonic {
    type Err = UnknownMnemonic;

    /// Case insensitive lookup by name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Mnemonic::ALL
            .iter()
            .copied()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownMnemonic(s.to_string()))
    }
}

/// How the operands of an instruction are laid out, destination before sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Form {
    /// No operands.
    Empty,
    /// `rd, rt, #shamt`
    Shift,
    /// `rd, rt, rs`
    ShiftVariable,
    /// `rd, rs, rt`
    Arithmetic,
    /// `rs`
    Source,
    /// `rd, rs`
    Link,
    /// `rd`
    Destination,
    /// `rt, rs, #imm`
    Immediate,
    /// `rt, #imm`
    Upper,
    /// `rt, imm(rs)`
    Memory,
    /// `rs, rt, #imm`
    Compare,
    /// `rs, #imm`
    Branch,
    /// `#target`
    Jump,
}

pub(crate) struct TableInstruction {
    pub mnemonic: Mnemonic,
    pub form: Form,
}

/// Operand order as written in assembly.
macro_rules! mips {
    () => {
        None
    };

    ($mnemonic:ident) => {
        $crate::opcode::entry(Mnemonic::$mnemonic, Form::Empty)
    };

    ($mnemonic:ident, rd, rt, shamt) => {
        $crate::opcode::entry(Mnemonic::$mnemonic, Form::Shift)
    };

    ($mnemonic:ident, rd, rt, rs) => {
        $crate::opcode::entry(Mnemonic::$mnemonic, Form::ShiftVariable)
    };

    ($mnemonic:ident, rd, rs, rt) => {
        $crate::opcode::entry(Mnemonic::$mnemonic, Form::Arithmetic)
    };

    ($mnemonic:ident, rs) => {
        $crate::opcode::entry(Mnemonic::$mnemonic, Form::Source)
    };

    ($mnemonic:ident, rd, rs) => {
        $crate::opcode::entry(Mnemonic::$mnemonic, Form::Link)
    };

    ($mnemonic:ident, rd) => {
        $crate::opcode::entry(Mnemonic::$mnemonic, Form::Destination)
    };

    ($mnemonic:ident, rt, rs, imm) => {
        $crate::opcode::entry(Mnemonic::$mnemonic, Form::Immediate)
    };

    ($mnemonic:ident, rt, imm) => {
        $crate::opcode::entry(Mnemonic::$mnemonic, Form::Upper)
    };

    ($mnemonic:ident, rt, imm(rs)) => {
        $crate::opcode::entry(Mnemonic::$mnemonic, Form::Memory)
    };

    ($mnemonic:ident, rs, rt, imm) => {
        $crate::opcode::entry(Mnemonic::$mnemonic, Form::Compare)
    };

    ($mnemonic:ident, rs, imm) => {
        $crate::opcode::entry(Mnemonic::$mnemonic, Form::Branch)
    };

    ($mnemonic:ident, target) => {
        $crate::opcode::entry(Mnemonic::$mnemonic, Form::Jump)
    };
}

const fn entry(mnemonic: Mnemonic, form: Form) -> Option<TableInstruction> {
    Some(TableInstruction { mnemonic, form })
}

/// Indexed by `funct` when `opcode == 0`.
pub(crate) static R_TYPES: [Option<TableInstruction>; 43] = [
    mips!(Sll, rd, rt, shamt),
    mips!(),
    mips!(Srl, rd, rt, shamt),
    mips!(Sra, rd, rt, shamt),
    mips!(Sllv, rd, rt, rs),
    mips!(),
    mips!(Srlv, rd, rt, rs),
    mips!(Srav, rd, rt, rs),
    mips!(Jr, rs),
    mips!(Jalr, rd, rs),
    mips!(),
    mips!(),
    mips!(Syscall),
    mips!(Break),
    mips!(),
    mips!(),
    mips!(Mfhi, rd),
    mips!(Mthi, rs),
    mips!(Mflo, rd),
    mips!(Mtlo, rs),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(Add, rd, rs, rt),
    mips!(Addu, rd, rs, rt),
    mips!(Sub, rd, rs, rt),
    mips!(Subu, rd, rs, rt),
    mips!(And, rd, rs, rt),
    mips!(Or, rd, rs, rt),
    mips!(Xor, rd, rs, rt),
    mips!(Nor, rd, rs, rt),
    mips!(),
    mips!(),
    mips!(Slt, rd, rs, rt),
];

/// Indexed by `rt` when `opcode == 1`.
pub(crate) static REGIMM_TYPES: [Option<TableInstruction>; 18] = [
    mips!(Bltz, rs, imm),
    mips!(Bgez, rs, imm),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(Bltzal, rs, imm),
    mips!(Bgezal, rs, imm),
];

/// Indexed by `opcode`.
pub(crate) static J_TYPES: [Option<TableInstruction>; 4] = [
    mips!(),
    mips!(),
    mips!(J, target),
    mips!(Jal, target),
];

/// Indexed by `opcode`, the first four entries are taken by the other families.
pub(crate) static I_TYPES: [Option<TableInstruction>; 44] = [
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(Beq, rs, rt, imm),
    mips!(Bne, rs, rt, imm),
    mips!(Blez, rs, imm),
    mips!(Bgtz, rs, imm),
    mips!(Addi, rt, rs, imm),
    mips!(Addiu, rt, rs, imm),
    mips!(Slti, rt, rs, imm),
    mips!(),
    mips!(Andi, rt, rs, imm),
    mips!(Ori, rt, rs, imm),
    mips!(Xori, rt, rs, imm),
    mips!(Lui, rt, imm),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(),
    mips!(Lb, rt, imm(rs)),
    mips!(Lh, rt, imm(rs)),
    mips!(),
    mips!(Lw, rt, imm(rs)),
    mips!(Lbu, rt, imm(rs)),
    mips!(Lhu, rt, imm(rs)),
    mips!(),
    mips!(),
    mips!(Sb, rt, imm(rs)),
    mips!(Sh, rt, imm(rs)),
    mips!(),
    mips!(Sw, rt, imm(rs)),
];

pub(crate) fn lookup(
    table: &'static [Option<TableInstruction>],
    code: u8,
) -> Option<&'static TableInstruction> {
    table.get(code as usize).and_then(Option::as_ref)
}

//! Resolving the operands of an instruction from its fields.

use std::fmt;

use decoder::{ToTokens, TokenStream};
use tokenizing::{ColorScheme, Colors};

use crate::fields::Fields;
use crate::opcode::Form;

#[rustfmt::skip]
pub const REGISTERS: [&str; 32] = [
    "R0", "R1", "R2", "R3", "R4", "R5", "R6", "R7",
    "R8", "R9", "R10", "R11", "R12", "R13", "R14", "R15",
    "R16", "R17", "R18", "R19", "R20", "R21", "R22", "R23",
    "R24", "R25", "R26", "R27", "R28", "R29", "R30", "R31",
];

/// Name of a general purpose register, only the lower five bits are considered.
pub const fn register(reg: u8) -> &'static str {
    REGISTERS[(reg & 0b11111) as usize]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// General purpose register.
    Register(u8),

    /// Immediate value, either a sign extended 16-bit immediate or a shift amount.
    Immediate(i32),

    /// Absolute jump target.
    Target(u32),

    /// Base register plus a signed offset.
    Memory { base: u8, offset: i32 },
}

pub(crate) const EMPTY_OPERAND: Operand = Operand::Immediate(0);

macro_rules! operands {
    [] => {([$crate::operand::EMPTY_OPERAND; 3], 0)};
    [$($x:expr),+ $(,)?] => {{
        let mut operands = [$crate::operand::EMPTY_OPERAND; 3];
        let mut idx = 0;
        $(
            idx += 1;
            operands[idx - 1] = $x;
        )*

        (operands, idx)
    }};
}

/// Operands of an instruction in assembly order.
pub(crate) fn resolve(form: Form, fields: Fields) -> ([Operand; 3], usize) {
    let rs = Operand::Register(fields.rs);
    let rt = Operand::Register(fields.rt);
    let rd = Operand::Register(fields.rd);
    let imm = Operand::Immediate(fields.simm());

    match form {
        Form::Empty => operands![],
        Form::Shift => operands![rd, rt, Operand::Immediate(fields.shamt as i32)],
        Form::ShiftVariable => operands![rd, rt, rs],
        Form::Arithmetic => operands![rd, rs, rt],
        Form::Source => operands![rs],
        Form::Link => operands![rd, rs],
        Form::Destination => operands![rd],
        Form::Immediate => operands![rt, rs, imm],
        Form::Upper => operands![rt, imm],
        Form::Memory => operands![
            rt,
            Operand::Memory {
                base: fields.rs,
                offset: fields.simm(),
            }
        ],
        Form::Compare => operands![rs, rt, imm],
        Form::Branch => operands![rs, imm],
        // upper bits of the program counter aren't folded into the target
        Form::Jump => operands![Operand::Target(fields.target26() << 2)],
    }
}

impl ToTokens for Operand {
    fn tokenize(&self, stream: &mut TokenStream) {
        match *self {
            Operand::Register(reg) => stream.push(register(reg), Colors::register()),
            Operand::Immediate(imm) => stream.push_owned(format!("#{imm}"), Colors::immediate()),
            Operand::Target(addr) => stream.push_owned(format!("#{addr}"), Colors::immediate()),
            Operand::Memory { base, offset } => {
                stream.push_owned(offset.to_string(), Colors::immediate());
                stream.push("(", Colors::punctuation());
                stream.push(register(base), Colors::register());
                stream.push(")", Colors::punctuation());
            }
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Operand::Register(reg) => f.write_str(register(reg)),
            Operand::Immediate(imm) => f.write_fmt(format_args!("#{imm}")),
            Operand::Target(addr) => f.write_fmt(format_args!("#{addr}")),
            Operand::Memory { base, offset } => {
                f.write_fmt(format_args!("{offset}({})", register(base)))
            }
        }
    }
}

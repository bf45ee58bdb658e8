//! MIPS32 subset disassembler.
//!
//! Words are split into their bit-groups, classified into one of the R, I or J families
//! and finally have their operands resolved according to the mnemonic's operand form.
//! Encodings without a table entry decode to [`Kind::Unrecognized`] instead of failing.

mod fields;
mod opcode;
mod operand;

use std::fmt;

use decoder::{ToTokens, TokenStream};
use tokenizing::{ColorScheme, Colors};

pub use fields::{sign_extend, Fields};
pub use opcode::{Form, Mnemonic, UnknownMnemonic};
pub use operand::{register, Operand, REGISTERS};

/// Label used for encodings that aren't part of the lookup tables.
pub const UNRECOGNIZED: &str = "UNKNOWN";

/// Instruction family, tagged with the resolved mnemonic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// Register-register encoding, including the no-operation form.
    R(Mnemonic),

    /// Register-immediate encoding, including the REGIMM branches.
    I(Mnemonic),

    /// Jump encoding with a 26-bit target.
    J(Mnemonic),

    Unrecognized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    kind: Kind,
    operands: [Operand; 3],
    operand_count: usize,
}

impl Instruction {
    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn mnemonic(&self) -> Option<Mnemonic> {
        match self.kind {
            Kind::R(m) | Kind::I(m) | Kind::J(m) => Some(m),
            Kind::Unrecognized => None,
        }
    }

    /// Mnemonic as displayed, unrecognized encodings use [`UNRECOGNIZED`].
    pub fn label(&self) -> &'static str {
        self.mnemonic().map_or(UNRECOGNIZED, Mnemonic::as_str)
    }

    pub fn operands(&self) -> &[Operand] {
        &self.operands[..self.operand_count]
    }

    pub fn is(&self, mnemonic: Mnemonic) -> bool {
        self.mnemonic() == Some(mnemonic)
    }
}

impl Instruction {
    /// Tokenize with `gap` between the mnemonic and its operands.
    pub fn tokenize_with_gap(&self, gap: &'static str, stream: &mut TokenStream) {
        match self.kind {
            Kind::Unrecognized => stream.push(UNRECOGNIZED, Colors::unrecognized()),
            _ => stream.push(self.label(), Colors::mnemonic()),
        }

        // there are operands
        if self.operand_count > 0 {
            stream.push(gap, Colors::whitespace());

            for (idx, operand) in self.operands().iter().enumerate() {
                operand.tokenize(stream);

                // separator
                if idx != self.operand_count - 1 {
                    stream.push(", ", Colors::punctuation());
                }
            }
        }
    }
}

impl ToTokens for Instruction {
    fn tokenize(&self, stream: &mut TokenStream) {
        self.tokenize_with_gap(" ", stream);
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut stream = TokenStream::new();
        self.tokenize(&mut stream);
        fmt::Display::fmt(&stream, f)
    }
}

/// Which table an encoding gets looked up in and what the resulting mnemonic is.
pub fn classify(fields: Fields) -> (Kind, Form) {
    // nop shares its encoding with `sll R0, R0, #0`
    if fields.join() == 0 {
        return (Kind::R(Mnemonic::Nop), Form::Empty);
    }

    let inst = match fields.opcode {
        0 => opcode::lookup(&opcode::R_TYPES, fields.funct),
        1 => opcode::lookup(&opcode::REGIMM_TYPES, fields.rt),
        2 | 3 => opcode::lookup(&opcode::J_TYPES, fields.opcode),
        _ => opcode::lookup(&opcode::I_TYPES, fields.opcode),
    };

    let Some(inst) = inst else {
        return (Kind::Unrecognized, Form::Empty);
    };

    let kind = match fields.opcode {
        0 => Kind::R(inst.mnemonic),
        2 | 3 => Kind::J(inst.mnemonic),
        _ => Kind::I(inst.mnemonic),
    };

    (kind, inst.form)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct Decoder;

impl decoder::Decodable for Decoder {
    type Instruction = Instruction;

    fn decode(&self, word: u32) -> Instruction {
        let fields = Fields::split(word);
        let (kind, form) = classify(fields);
        let (operands, operand_count) = operand::resolve(form, fields);

        Instruction {
            kind,
            operands,
            operand_count,
        }
    }
}

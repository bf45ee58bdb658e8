//! Tracking where code stops and data starts.

use mips::{Instruction, Mnemonic};

use crate::Addr;

/// Once a stream enters [`Section::Data`] it never goes back to [`Section::Code`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Code,
    Data,
}

/// Conditions that end the code section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Boundary {
    /// Words at or past this address are data.
    pub threshold: Addr,

    /// Words following this instruction are data.
    pub terminator: Mnemonic,
}

impl Section {
    /// Section of the word at `addr`.
    pub fn at(self, addr: Addr, boundary: &Boundary) -> Section {
        match self {
            Section::Code if addr < boundary.threshold => Section::Code,
            _ => Section::Data,
        }
    }

    /// Section of the word following `inst`.
    pub fn after(self, inst: &Instruction, boundary: &Boundary) -> Section {
        if inst.is(boundary.terminator) {
            Section::Data
        } else {
            self
        }
    }
}

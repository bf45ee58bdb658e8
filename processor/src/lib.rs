//! Turning a stream of words into a program listing.
//!
//! Words are walked in order while tracking whether the stream is still in its code section.
//! Code words get decoded, everything from the first data word onward is kept verbatim.

mod blocks;
mod fmt;
mod section;

use decoder::{Decodable, WORD_WIDTH};
use mips::Instruction;

pub use blocks::render;
pub use section::{Boundary, Section};

/// Address of a word in the listing.
pub type Addr = u64;

pub enum Error {
    /// Input line isn't a 32-bit binary word.
    Word(decoder::Error),

    /// Disassembly options are inconsistent.
    Config(config::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Instruction { word: u32, inst: Instruction },
    Data { word: u32 },
}

/// Disassembled words in input order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Program {
    lines: Vec<(Addr, Line)>,
}

impl Program {
    pub fn lines(&self) -> &[(Addr, Line)] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn instructions(&self) -> impl Iterator<Item = (Addr, &Instruction)> + '_ {
        self.lines.iter().filter_map(|(addr, line)| match line {
            Line::Instruction { inst, .. } => Some((*addr, inst)),
            Line::Data { .. } => None,
        })
    }

    pub fn data(&self) -> impl Iterator<Item = (Addr, u32)> + '_ {
        self.lines.iter().filter_map(|(addr, line)| match line {
            Line::Data { word } => Some((*addr, *word)),
            Line::Instruction { .. } => None,
        })
    }

    /// Address of the first data word, if the stream has any.
    pub fn data_start(&self) -> Option<Addr> {
        self.data().next().map(|(addr, _)| addr)
    }
}

pub struct Processor {
    /// Address of the first word.
    start: Addr,
    boundary: Boundary,
    decoder: mips::Decoder,
}

impl Processor {
    pub fn new(options: &config::Disassembly) -> Result<Self, Error> {
        options.validate()?;

        Ok(Self {
            start: options.start_address as Addr,
            boundary: Boundary {
                threshold: options.data_section_threshold as Addr,
                terminator: options.terminator_mnemonic,
            },
            decoder: mips::Decoder,
        })
    }

    /// Parse a textual listing of words and disassemble it.
    ///
    /// Fails on the first malformed line, nothing is disassembled in that case.
    pub fn parse(&self, text: &str) -> Result<Program, Error> {
        let words = decoder::Reader::new(text).collect::<Result<Vec<u32>, _>>()?;

        log::trace!("[processor::parse] read {} words.", words.len());

        Ok(self.disassemble(&words))
    }

    pub fn disassemble(&self, words: &[u32]) -> Program {
        let (_, lines) = words.iter().enumerate().fold(
            (Section::Code, Vec::with_capacity(words.len())),
            |(section, mut lines), (idx, &word)| {
                let addr = self.start + (idx * WORD_WIDTH) as Addr;
                let (section, line) = self.step(section, addr, word);

                lines.push((addr, line));
                (section, lines)
            },
        );

        let program = Program { lines };
        self.summarize(&program);
        program
    }

    /// Classify a single word, returning the section the next word starts in.
    fn step(&self, section: Section, addr: Addr, word: u32) -> (Section, Line) {
        match section.at(addr, &self.boundary) {
            Section::Data => (Section::Data, Line::Data { word }),
            Section::Code => {
                let inst = self.decoder.decode(word);
                let next = section.after(&inst, &self.boundary);

                (next, Line::Instruction { word, inst })
            }
        }
    }

    fn summarize(&self, program: &Program) {
        let instructions = program.instructions().count();
        let unrecognized = program
            .instructions()
            .filter(|(_, inst)| inst.mnemonic().is_none())
            .count();

        log::notify!(
            "[processor::disassemble] decoded {instructions} instructions \
             ({unrecognized} unrecognized) and {} data words.",
            program.len() - instructions
        );

        if let Some(addr) = program.data_start() {
            log::trace!("[processor::disassemble] data section starts at {addr}.");
        }

        if let Some((addr, inst)) = program.instructions().next() {
            if inst.is(self.boundary.terminator) {
                log::warning!(
                    "First instruction at {addr} is {}, the remaining words are data.",
                    self.boundary.terminator
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Line, Processor};
    use mips::Mnemonic;

    fn processor() -> Processor {
        Processor::new(&config::Disassembly::default()).unwrap()
    }

    #[test]
    fn empty() {
        let program = processor().disassemble(&[]);
        assert!(program.is_empty());
        assert_eq!(program.data_start(), None);
    }

    #[test]
    fn addresses() {
        let program = processor().disassemble(&[0; 4]);
        let addrs: Vec<_> = program.lines().iter().map(|(addr, _)| *addr).collect();

        assert_eq!(addrs, [496, 500, 504, 508]);
    }

    #[test]
    fn terminator_starts_data() {
        let words = [
            0b001000_00000_00001_0000000000001010, // ADDI R1, R0, #10
            0b000000_00000_00000_00000_00000_001101, // BREAK
            0,
            0b11111111111111111111111111111111,
        ];
        let program = processor().disassemble(&words);

        assert!(matches!(
            program.lines()[1].1,
            Line::Instruction { ref inst, .. } if inst.is(Mnemonic::Break)
        ));
        assert_eq!(program.data().collect::<Vec<_>>(), [(504, 0), (508, u32::MAX)]);
        assert_eq!(program.data_start(), Some(504));
    }

    #[test]
    fn threshold_starts_data() {
        let options = config::Disassembly {
            start_address: 0,
            data_section_threshold: 8,
            terminator_mnemonic: Mnemonic::Break,
        };
        let program = Processor::new(&options).unwrap().disassemble(&[0; 4]);

        assert_eq!(program.instructions().count(), 2);
        assert_eq!(program.data_start(), Some(8));
    }

    #[test]
    fn invalid_options() {
        let options = config::Disassembly {
            start_address: 498,
            ..config::Disassembly::default()
        };
        assert!(Processor::new(&options).is_err());

        let options = config::Disassembly {
            start_address: 800,
            ..config::Disassembly::default()
        };
        assert!(Processor::new(&options).is_err());
    }

    #[test]
    fn malformed_word() {
        let err = match processor().parse("00000000000000000000000000000000\n\n0101\n") {
            Err(super::Error::Word(err)) => err,
            _ => panic!("expected a malformed word"),
        };

        assert_eq!(err.line(), 3);
        assert_eq!(err.kind, decoder::ErrorKind::InvalidLength(4));
    }
}

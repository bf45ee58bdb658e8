//! Listing layout.
//!
//! ```text
//! <listing>     = { <line> <ending> } [ <line> [ <ending> ] ]
//! <line>        = <instruction> | <data>
//! <instruction> = [ <fields> TAB ] <addr> TAB <mnemonic> [ TAB <operands> ]
//! <data>        = [ <bits> "      " TAB ] <addr> TAB <unsigned>
//! ```

use config::Listing;
use decoder::TokenStream;
use mips::Fields;
use tokenizing::{ColorScheme, Colors};

use crate::{Addr, Line, Program};

/// Padding after the raw bits of a data word, lining them up with the instruction fields.
const DATA_PADDING: &str = "      ";

impl Line {
    pub fn tokenize(&self, addr: Addr, listing: &Listing, stream: &mut TokenStream) {
        match self {
            Self::Instruction { word, inst } => {
                if listing.fields {
                    stream.push_owned(Fields::split(*word).to_string(), Colors::fields());
                    stream.push("\t", Colors::whitespace());
                }

                stream.push_owned(addr.to_string(), Colors::address());
                stream.push("\t", Colors::whitespace());
                inst.tokenize_with_gap("\t", stream);
            }
            Self::Data { word } => {
                if listing.fields {
                    stream.push_owned(format!("{word:032b}{DATA_PADDING}"), Colors::fields());
                    stream.push("\t", Colors::whitespace());
                }

                stream.push_owned(addr.to_string(), Colors::address());
                stream.push("\t", Colors::whitespace());
                stream.push_owned(word.to_string(), Colors::data());
            }
        }
    }
}

impl Program {
    /// Tokens of the full listing, line endings included.
    pub fn tokenize(&self, listing: &Listing) -> TokenStream {
        let mut stream = TokenStream::new();
        let ending = listing.line_ending.as_str();

        for (idx, (addr, line)) in self.lines().iter().enumerate() {
            if idx != 0 {
                stream.push(ending, Colors::whitespace());
            }

            line.tokenize(*addr, listing, &mut stream);
        }

        if listing.trailing_newline && !self.is_empty() {
            stream.push(ending, Colors::whitespace());
        }

        stream
    }
}

/// Plain text listing.
pub fn render(program: &Program, listing: &Listing) -> String {
    program.tokenize(listing).to_string()
}

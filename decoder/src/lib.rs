//! Shared behaviour required between decoder crates.

mod fmt;

use tokenizing::{Color, Token};

/// How many bytes a single word in the stream occupies.
pub const WORD_WIDTH: usize = 4;

/// How many binary digits a single word in the stream is written as.
pub const WORD_BITS: usize = 32;

#[derive(PartialEq, Eq, Copy, Clone)]
pub struct Error {
    /// What kind of error happened in reading a word.
    pub kind: ErrorKind,

    /// Line of the input the malformed word was found on, starting at one.
    line: usize,
}

impl Error {
    pub fn new(kind: ErrorKind, line: usize) -> Self {
        Self { kind, line }
    }

    pub fn line(&self) -> usize {
        self.line
    }
}

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub enum ErrorKind {
    /// Word doesn't consist of exactly 32 digits.
    InvalidLength(usize),

    /// Word contains something other than a '0' or '1'.
    InvalidDigit { column: usize, found: char },
}

pub trait ToTokens {
    fn tokenize(&self, stream: &mut TokenStream);
}

pub trait Decodable {
    type Instruction: ToTokens;

    /// Decoding a word can't fail, unknown encodings must still produce an instruction.
    fn decode(&self, word: u32) -> Self::Instruction;
}

#[derive(Debug, Default)]
pub struct TokenStream {
    inner: Vec<Token>,
}

impl TokenStream {
    pub fn new() -> Self {
        Self {
            inner: Vec::with_capacity(25),
        }
    }

    fn push_token(&mut self, token: Token) {
        self.inner.push(token);
    }

    pub fn push(&mut self, text: &'static str, color: &'static Color) {
        self.push_token(Token::borrowed(text, color));
    }

    pub fn push_owned(&mut self, text: String, color: &'static Color) {
        self.push_token(Token::owned(text, color));
    }

    pub fn tokens(&self) -> &[Token] {
        &self.inner
    }
}

/// Reads words written as lines of binary digits, most significant bit first.
///
/// Blank lines are skipped, they don't count as a word but do count towards the
/// line number reported in errors.
pub struct Reader<'data> {
    lines: std::str::Lines<'data>,
    line: usize,
}

impl<'data> Reader<'data> {
    pub fn new(text: &'data str) -> Self {
        Self {
            lines: text.lines(),
            line: 0,
        }
    }
}

impl Iterator for Reader<'_> {
    type Item = Result<u32, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let raw = self.lines.next()?;
            self.line += 1;

            let digits = raw.trim();
            if digits.is_empty() {
                continue;
            }

            return Some(parse_word(digits).map_err(|kind| Error::new(kind, self.line)));
        }
    }
}

/// Parse exactly 32 binary digits into a word.
pub fn parse_word(digits: &str) -> Result<u32, ErrorKind> {
    let len = digits.chars().count();
    if len != WORD_BITS {
        return Err(ErrorKind::InvalidLength(len));
    }

    digits.chars().enumerate().try_fold(0u32, |word, (idx, chr)| match chr {
        '0' => Ok(word << 1),
        '1' => Ok(word << 1 | 1),
        found => Err(ErrorKind::InvalidDigit {
            column: idx + 1,
            found,
        }),
    })
}

#[cfg(test)]
mod tests {
    use super::{ErrorKind, Reader};

    #[test]
    fn parse_word() {
        use super::parse_word;

        assert_eq!(parse_word("00000000000000000000000000000000"), Ok(0));
        assert_eq!(parse_word("00000000000000000000000000001101"), Ok(0b1101));
        assert_eq!(parse_word("10000000000000000000000000000001"), Ok(0x8000_0001));
        assert_eq!(parse_word("11111111111111111111111111111111"), Ok(u32::MAX));
    }

    #[test]
    fn parse_word_malformed() {
        use super::parse_word;

        assert_eq!(
            parse_word("0000000000000000000000000000000"),
            Err(ErrorKind::InvalidLength(31))
        );
        assert_eq!(
            parse_word("000000000000000000000000000000000"),
            Err(ErrorKind::InvalidLength(33))
        );
        assert_eq!(parse_word(""), Err(ErrorKind::InvalidLength(0)));
        assert_eq!(
            parse_word("0000000000200000000000000000000x"),
            Err(ErrorKind::InvalidDigit {
                column: 11,
                found: '2'
            })
        );
    }

    #[test]
    fn reader_skips_blank_lines() {
        let text = "\n00000000000000000000000000000001\r\n   \n\
                    00000000000000000000000000000010\n\n";
        let words: Result<Vec<u32>, _> = Reader::new(text).collect();
        assert_eq!(words, Ok(vec![1, 2]));
    }

    #[test]
    fn reader_reports_line() {
        let text = "00000000000000000000000000000001\n\n0101\n";
        let mut reader = Reader::new(text);

        assert_eq!(reader.next(), Some(Ok(1)));
        let err = reader.next().unwrap().unwrap_err();
        assert_eq!(err.line(), 3);
        assert_eq!(err.kind, ErrorKind::InvalidLength(4));
    }

    #[test]
    fn reader_trims_whitespace() {
        let text = "  00000000000000000000000000000011\t\n";
        assert_eq!(Reader::new(text).next(), Some(Ok(3)));
    }
}

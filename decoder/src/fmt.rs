use std::fmt;

impl fmt::Debug for super::Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            super::ErrorKind::InvalidLength(len) => f.write_fmt(format_args!(
                "Malformed word on line {}: expected {} binary digits, found {len}.",
                self.line,
                super::WORD_BITS,
            )),
            super::ErrorKind::InvalidDigit { column, found } => f.write_fmt(format_args!(
                "Malformed word on line {}: '{}' at column {column} is not a binary digit.",
                self.line,
                found.escape_debug(),
            )),
        }
    }
}

impl fmt::Display for super::Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl std::error::Error for super::Error {}

impl fmt::Display for super::TokenStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.iter().try_for_each(|t| f.write_str(&t.text))
    }
}

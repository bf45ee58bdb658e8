use std::fmt;

impl fmt::Debug for super::Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(err) => err.fmt(f),
            Self::Config(err) => err.fmt(f),
        }
    }
}

impl fmt::Display for super::Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl std::error::Error for super::Error {}

impl From<decoder::Error> for super::Error {
    fn from(error: decoder::Error) -> Self {
        super::Error::Word(error)
    }
}

impl From<config::Error> for super::Error {
    fn from(error: config::Error) -> Self {
        super::Error::Config(error)
    }
}

use std::fmt;

impl fmt::Debug for super::Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IO(path, err) => {
                f.write_fmt(format_args!("Failed to read config {path:?}: '{err}'."))
            }
            Self::Yaml(path, err) => {
                f.write_fmt(format_args!("Failed to parse config {path:?}: '{err}'."))
            }
            Self::InvalidRange { start, threshold } => f.write_fmt(format_args!(
                "Data section threshold {threshold} lies before the start address {start}."
            )),
            Self::Unaligned(start) => f.write_fmt(format_args!(
                "Start address {start} isn't a multiple of the word size."
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

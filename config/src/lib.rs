mod fmt;

use std::path::{Path, PathBuf};

use mips::Mnemonic;
use serde::de::{self, Deserializer, Visitor};
use serde::Deserialize;

pub enum Error {
    /// Explicitly given config couldn't be read.
    IO(PathBuf, std::io::Error),

    /// Explicitly given config isn't valid yaml or has fields of the wrong type.
    Yaml(PathBuf, serde_yaml::Error),

    /// Data section would start before the first word.
    InvalidRange { start: u32, threshold: u32 },

    /// Start address isn't a multiple of the word size.
    Unaligned(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    #[serde(default = "defaults::disassembly")]
    pub disassembly: Disassembly,
    #[serde(default = "defaults::listing")]
    pub listing: Listing,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Disassembly {
    /// Address of the first word.
    #[serde(default = "defaults::start_address")]
    pub start_address: u32,
    /// Words at or past this address are always data.
    #[serde(default = "defaults::data_section_threshold")]
    pub data_section_threshold: u32,
    /// Instruction after which every word is data.
    #[serde(default = "defaults::terminator_mnemonic", deserialize_with = "mnemonic")]
    pub terminator_mnemonic: Mnemonic,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Listing {
    /// Prefix each line with the word split into its bit-groups.
    #[serde(default = "defaults::fields")]
    pub fields: bool,
    #[serde(default = "defaults::line_ending")]
    pub line_ending: LineEnding,
    #[serde(default = "defaults::trailing_newline")]
    pub trailing_newline: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEnding {
    Lf,
    Crlf,
    /// Doubled carriage return some grading harnesses expect.
    Crcrlf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::Crlf => "\r\n",
            LineEnding::Crcrlf => "\r\r\n",
        }
    }
}

/// Default values when one is missing in the config.yaml.
mod defaults {
    use mips::Mnemonic;

    pub fn disassembly() -> super::Disassembly {
        super::Disassembly {
            start_address: start_address(),
            data_section_threshold: data_section_threshold(),
            terminator_mnemonic: terminator_mnemonic(),
        }
    }
    pub fn listing() -> super::Listing {
        super::Listing {
            fields: fields(),
            line_ending: line_ending(),
            trailing_newline: trailing_newline(),
        }
    }

    pub fn start_address() -> u32 {
        496
    }
    pub fn data_section_threshold() -> u32 {
        700
    }
    pub fn terminator_mnemonic() -> Mnemonic {
        Mnemonic::Break
    }

    pub fn fields() -> bool {
        true
    }
    pub fn line_ending() -> super::LineEnding {
        super::LineEnding::Lf
    }
    pub fn trailing_newline() -> bool {
        true
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            disassembly: defaults::disassembly(),
            listing: defaults::listing(),
        }
    }
}

impl Default for Disassembly {
    fn default() -> Self {
        defaults::disassembly()
    }
}

impl Default for Listing {
    fn default() -> Self {
        defaults::listing()
    }
}

/// Where the config is looked for when none is given.
pub fn default_path() -> Option<PathBuf> {
    let mut path = dirs::data_dir()?;
    path.push("mipsdis");
    path.push("config.yaml");
    Some(path)
}

impl Config {
    /// Parse yaml, an empty document results in the defaults.
    pub fn parse(raw: &str) -> Result<Self, serde_yaml::Error> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        serde_yaml::from_str(raw)
    }

    /// Load an explicitly given config, or the one in the default location.
    ///
    /// Only an explicitly given config is required to exist and parse.
    pub fn load(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .map_err(|err| Error::IO(path.to_path_buf(), err))?;

                Self::parse(&raw).map_err(|err| Error::Yaml(path.to_path_buf(), err))
            }
            None => Ok(Self::from_default_location()),
        }
    }

    fn from_default_location() -> Self {
        let path = match default_path() {
            Some(path) => path,
            None => {
                log::trace!("[config::load] no data directory, using defaults.");
                return Self::default();
            }
        };

        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(..) => {
                log::trace!("[config::load] no config at {}, using defaults.", path.display());
                return Self::default();
            }
        };

        match Self::parse(&raw) {
            Ok(parsed) => {
                log::trace!("[config::load] loaded {}.", path.display());
                parsed
            }
            Err(err) => {
                log::warning!("Failed to parse config.\nError: {err}.");

                // parse everything as default
                Self::default()
            }
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.disassembly.validate()
    }
}

impl Disassembly {
    pub fn validate(&self) -> Result<(), Error> {
        if self.start_address % 4 != 0 {
            return Err(Error::Unaligned(self.start_address));
        }

        if self.data_section_threshold < self.start_address {
            return Err(Error::InvalidRange {
                start: self.start_address,
                threshold: self.data_section_threshold,
            });
        }

        Ok(())
    }
}

fn mnemonic<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Mnemonic, D::Error> {
    struct MnemonicParsing;
    impl<'de> Visitor<'de> for MnemonicParsing {
        type Value = Mnemonic;

        fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
            formatter.write_str("expected an instruction mnemonic")
        }

        fn visit_str<E: de::Error>(self, s: &str) -> Result<Self::Value, E> {
            s.parse().map_err(|err| E::custom(format!("{err}")))
        }
    }

    deserializer.deserialize_str(MnemonicParsing)
}

#[cfg(test)]
mod tests {
    use super::{Config, Error, LineEnding};
    use mips::Mnemonic;

    #[test]
    fn empty_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
        assert_eq!(Config::parse("  \n").unwrap(), Config::default());

        let config = Config::default();
        assert_eq!(config.disassembly.start_address, 496);
        assert_eq!(config.disassembly.data_section_threshold, 700);
        assert_eq!(config.disassembly.terminator_mnemonic, Mnemonic::Break);
        assert!(config.listing.fields);
        assert_eq!(config.listing.line_ending, LineEnding::Lf);
    }

    #[test]
    fn partial() {
        let config = Config::parse(
            "
disassembly:
  start_address: 0
  terminator_mnemonic: syscall
listing:
  line_ending: crcrlf
",
        )
        .unwrap();

        assert_eq!(config.disassembly.start_address, 0);
        assert_eq!(config.disassembly.data_section_threshold, 700);
        assert_eq!(config.disassembly.terminator_mnemonic, Mnemonic::Syscall);
        assert!(config.listing.fields);
        assert_eq!(config.listing.line_ending, LineEnding::Crcrlf);
        assert_eq!(config.listing.line_ending.as_str(), "\r\r\n");
    }

    #[test]
    fn unknown_terminator() {
        let err = Config::parse("disassembly:\n  terminator_mnemonic: HALT\n").unwrap_err();
        assert!(err.to_string().contains("HALT"), "{err}");
    }

    #[test]
    fn validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.disassembly.data_section_threshold = 400;
        assert!(matches!(
            config.validate(),
            Err(Error::InvalidRange {
                start: 496,
                threshold: 400
            })
        ));

        config.disassembly.data_section_threshold = 496;
        assert!(config.validate().is_ok());

        config.disassembly.start_address = 498;
        assert!(matches!(config.validate(), Err(Error::Unaligned(498))));
    }

    #[test]
    fn explicit_path_must_exist() {
        let path = std::env::temp_dir().join("mipsdis-config-that-does-not-exist.yaml");
        assert!(matches!(Config::load(Some(&path)), Err(Error::IO(..))));
    }

    #[test]
    fn explicit_path_must_parse() {
        let path = std::env::temp_dir().join(format!("mipsdis-config-{}.yaml", std::process::id()));
        std::fs::write(&path, "disassembly:\n  start_address: [1, 2]\n").unwrap();

        let config = Config::load(Some(&path));
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(config, Err(Error::Yaml(..))));
    }
}

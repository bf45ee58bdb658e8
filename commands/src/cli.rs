use std::fmt;
use std::path::{Path, PathBuf};

use mips::{Mnemonic, UnknownMnemonic};

macro_rules! exit {
    ($code:expr => $($arg:tt)*) => {{
        eprintln!($($arg)*);
        std::process::exit($code);
    }};
}

pub const HELP: &str = "OVERVIEW: MIPS32 subset disassembler

USAGE: mipsdis [options] <INPUT> [OUTPUT]

OPTIONS:
  -H, --help          Print usage information
  -C, --config        Path to config used for disassembling
  -S, --start         Address of the first word
  -T, --threshold     Address at which the data section starts
  -X, --terminator    Mnemonic that ends the code section
  -N, --no-fields     Omit the bit-field column
  -P, --plain         Disable colored output on stdout
  -B, --debug         Print every log message on exit";

const ABBRV: &[&str] = &["-H", "-C", "-S", "-T", "-X", "-N", "-P", "-B"];
const NAMES: &[&str] = &[
    "--help",
    "--config",
    "--start",
    "--threshold",
    "--terminator",
    "--no-fields",
    "--plain",
    "--debug",
];

#[derive(Default, Debug, Clone, PartialEq, Eq)]
pub struct Cli {
    /// Path to the words being disassembled.
    pub path: PathBuf,

    /// Where to write the listing, stdout if missing.
    pub output: Option<PathBuf>,

    /// Optional path to config.
    pub config: Option<PathBuf>,

    /// Overrides the configured start address.
    pub start: Option<u32>,

    /// Overrides the configured data section threshold.
    pub threshold: Option<u32>,

    /// Overrides the configured terminator.
    pub terminator: Option<Mnemonic>,

    /// Omit the bit-field column.
    pub no_fields: bool,

    /// Don't color stdout.
    pub plain: bool,

    /// Print every log message.
    pub debug: bool,
}

#[derive(PartialEq, Eq)]
pub enum Error {
    Help,
    UnknownArg {
        arg: String,
        suggestion: Option<&'static str>,
    },
    MissingValue(&'static str),
    Duplicate(&'static str),
    InvalidNumber {
        flag: &'static str,
        value: String,
    },
    UnknownMnemonic(UnknownMnemonic),
    TooManyPaths(String),
    MissingInput,
    NotFound(PathBuf),
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Help => f.write_str(HELP),
            Self::UnknownArg {
                arg,
                suggestion: Some(guess),
            } => f.write_fmt(format_args!("Unknown cmd arg '{arg}' did you mean '{guess}'?")),
            Self::UnknownArg { arg, .. } => {
                f.write_fmt(format_args!("Unknown cmd arg '{arg}' was entered."))
            }
            Self::MissingValue(flag) => f.write_fmt(format_args!("Missing value for '{flag}'.")),
            Self::Duplicate(flag) => f.write_fmt(format_args!("'{flag}' already given.")),
            Self::InvalidNumber { flag, value } => {
                f.write_fmt(format_args!("'{value}' given to '{flag}' isn't a valid address."))
            }
            Self::UnknownMnemonic(err) => fmt::Display::fmt(err, f),
            Self::TooManyPaths(path) => f.write_fmt(format_args!(
                "Unexpected path '{path}', input and output already given."
            )),
            Self::MissingInput => f.write_fmt(format_args!("Missing path to an input.\n\n{HELP}")),
            Self::NotFound(path) => f.write_fmt(format_args!("{path:?} does not exist.")),
        }
    }
}

/// Decimal or `0x` prefixed hexadecimal.
fn parse_number(value: &str) -> Option<u32> {
    match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => value.parse().ok(),
    }
}

fn suggest(unknown: &str) -> Option<&'static str> {
    let mut distance = u32::MAX;
    let mut best_guess = "";
    for name in NAMES {
        let d = triple_accel::levenshtein_exp(unknown.as_bytes(), name.as_bytes());
        if d < distance {
            distance = d;
            best_guess = name;
        }
    }

    // a guess at most 3 edits away from a known arg
    (distance < 4).then_some(best_guess)
}

fn value<I: Iterator<Item = String>>(args: &mut I, flag: &'static str) -> Result<String, Error> {
    match args.next() {
        Some(value) if !NAMES.contains(&&*value) && !ABBRV.contains(&&*value) => Ok(value),
        _ => Err(Error::MissingValue(flag)),
    }
}

fn switch(slot: &mut bool, flag: &'static str) -> Result<(), Error> {
    if *slot {
        return Err(Error::Duplicate(flag));
    }

    *slot = true;
    Ok(())
}

fn number<I: Iterator<Item = String>>(
    args: &mut I,
    flag: &'static str,
    slot: &mut Option<u32>,
) -> Result<(), Error> {
    if slot.is_some() {
        return Err(Error::Duplicate(flag));
    }

    let value = value(args, flag)?;
    match parse_number(&value) {
        Some(num) => *slot = Some(num),
        None => return Err(Error::InvalidNumber { flag, value }),
    }

    Ok(())
}

impl Cli {
    pub fn parse() -> Self {
        let cli = match Self::parse_from(std::env::args().skip(1)) {
            Ok(cli) => cli,
            Err(Error::Help) => {
                println!("{HELP}");
                std::process::exit(0);
            }
            Err(err) => exit!(1 => "{err:?}"),
        };

        if let Err(err) = cli.validate_args() {
            exit!(1 => "{err:?}");
        }

        cli
    }

    pub fn parse_from<I: IntoIterator<Item = String>>(args: I) -> Result<Self, Error> {
        let mut cli = Cli::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-H" | "--help" => return Err(Error::Help),
                "-C" | "--config" => {
                    if cli.config.is_some() {
                        return Err(Error::Duplicate("--config"));
                    }
                    cli.config = Some(PathBuf::from(value(&mut args, "--config")?));
                }
                "-S" | "--start" => number(&mut args, "--start", &mut cli.start)?,
                "-T" | "--threshold" => number(&mut args, "--threshold", &mut cli.threshold)?,
                "-X" | "--terminator" => {
                    if cli.terminator.is_some() {
                        return Err(Error::Duplicate("--terminator"));
                    }
                    let name = value(&mut args, "--terminator")?;
                    cli.terminator = Some(name.parse().map_err(Error::UnknownMnemonic)?);
                }
                "-N" | "--no-fields" => switch(&mut cli.no_fields, "--no-fields")?,
                "-P" | "--plain" => switch(&mut cli.plain, "--plain")?,
                "-B" | "--debug" => switch(&mut cli.debug, "--debug")?,
                unknown if unknown.starts_with('-') && unknown.len() > 1 => {
                    return Err(Error::UnknownArg {
                        arg: unknown.to_string(),
                        suggestion: suggest(unknown),
                    });
                }
                path => {
                    if cli.path == Path::new("") {
                        cli.path = PathBuf::from(path);
                    } else if cli.output.is_none() {
                        cli.output = Some(PathBuf::from(path));
                    } else {
                        return Err(Error::TooManyPaths(path.to_string()));
                    }
                }
            }
        }

        if cli.path == Path::new("") {
            return Err(Error::MissingInput);
        }

        Ok(cli)
    }

    fn validate_args(&self) -> Result<(), Error> {
        if !self.path.exists() {
            return Err(Error::NotFound(self.path.clone()));
        }

        if let Some(ref cfg) = self.config {
            if !cfg.exists() {
                return Err(Error::NotFound(cfg.clone()));
            }
        }

        Ok(())
    }

    /// Overwrite config values with the ones given on the command line.
    pub fn apply(&self, config: &mut config::Config) {
        if let Some(start) = self.start {
            config.disassembly.start_address = start;
        }

        if let Some(threshold) = self.threshold {
            config.disassembly.data_section_threshold = threshold;
        }

        if let Some(terminator) = self.terminator {
            config.disassembly.terminator_mnemonic = terminator;
        }

        if self.no_fields {
            config.listing.fields = false;
        }
    }
}

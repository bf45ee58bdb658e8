mod cli;

pub use cli::{Cli, Error, HELP};
use once_cell::sync::Lazy;

pub static ARGS: Lazy<cli::Cli> = Lazy::new(cli::Cli::parse);

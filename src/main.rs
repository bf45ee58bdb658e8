use std::fs;
use std::io::{self, IsTerminal, Write};

use decoder::TokenStream;
use tokenizing::ansi;

macro_rules! exit {
    ($code:expr => $($arg:tt)*) => {{
        log::strong!($($arg)*);
        if let Err(err) = flush_log() {
            eprintln!("Failed to write log: {err}.");
            eprintln!($($arg)*);
        }
        std::process::exit($code);
    }};
}

/// Write out pending log messages to stderr.
fn flush_log() -> io::Result<()> {
    let args = &*commands::ARGS;
    let mut stderr = io::stderr();
    let styled = !args.plain && stderr.is_terminal();
    let mut logger = log::LOGGER.lock().unwrap_or_else(|e| e.into_inner());

    logger.flush(&mut stderr, args.debug, styled)
}

/// Write tokens to stdout, colored only when `plain` isn't set and stdout is a terminal.
fn print(stream: &TokenStream, plain: bool) -> io::Result<()> {
    let mut stdout = io::stdout().lock();

    if plain || !stdout.is_terminal() {
        write!(stdout, "{stream}")?;
    } else {
        for token in stream.tokens() {
            ansi::paint(&mut stdout, &token.text, token.color)?;
        }
    }

    stdout.flush()
}

fn main() {
    let args = &*commands::ARGS;

    let mut config = match config::Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(err) => exit!(1 => "{err:?}"),
    };
    args.apply(&mut config);

    let processor = match processor::Processor::new(&config.disassembly) {
        Ok(processor) => processor,
        Err(err) => exit!(1 => "{err:?}"),
    };

    let text = match fs::read_to_string(&args.path) {
        Ok(text) => text,
        Err(err) => exit!(1 => "Failed to read {:?}: {err}.", args.path),
    };

    let program = match processor.parse(&text) {
        Ok(program) => program,
        Err(err) => exit!(1 => "{:?}: {err:?}", args.path),
    };

    match args.output {
        Some(ref path) => {
            // rendered in full before the file is touched
            let listing = processor::render(&program, &config.listing);

            if let Err(err) = fs::write(path, listing) {
                exit!(1 => "Failed to write {path:?}: {err}.");
            }

            log::notify!("[main] wrote {} lines to {path:?}.", program.len());
        }
        None => {
            if let Err(err) = print(&program.tokenize(&config.listing), args.plain) {
                exit!(1 => "Failed to write to stdout: {err}.");
            }
        }
    }

    if let Err(err) = flush_log() {
        eprintln!("Failed to write log: {err}.");
        std::process::exit(1);
    }
}

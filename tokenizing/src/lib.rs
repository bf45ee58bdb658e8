//! Styling of listing text in the terminal.
use std::borrow::Cow;

pub use egui::Color32 as Color;

/// Scheme used when printing listings.
pub type Colors = Terminal;

/// Color of each role a piece of listing text can play.
pub trait ColorScheme {
    fn mnemonic() -> &'static Color;
    fn register() -> &'static Color;
    fn immediate() -> &'static Color;
    fn address() -> &'static Color;

    /// Encodings without a mnemonic.
    fn unrecognized() -> &'static Color;

    /// Bit-group column in front of each line.
    fn fields() -> &'static Color;

    /// Value of a word in the data section.
    fn data() -> &'static Color {
        Self::immediate()
    }

    /// Separators and brackets.
    fn punctuation() -> &'static Color;

    fn whitespace() -> &'static Color {
        &palette::WHITE
    }
}

/// Dark terminal scheme.
pub struct Terminal;

impl ColorScheme for Terminal {
    fn mnemonic() -> &'static Color {
        &palette::WHITE
    }

    fn register() -> &'static Color {
        &palette::MAGENTA
    }

    fn immediate() -> &'static Color {
        &palette::BLUE
    }

    fn address() -> &'static Color {
        &palette::GRAY
    }

    fn unrecognized() -> &'static Color {
        &palette::RED
    }

    fn fields() -> &'static Color {
        &palette::GREEN
    }

    fn data() -> &'static Color {
        &palette::GOLD
    }

    fn punctuation() -> &'static Color {
        &palette::SILVER
    }
}

pub mod palette {
    use super::Color;

    pub const WHITE: Color = Color::from_rgb(0xff, 0xff, 0xff);
    pub const BLUE: Color = Color::from_rgb(0x0f, 0x62, 0xfe);
    pub const MAGENTA: Color = Color::from_rgb(0xf5, 0x12, 0x81);
    pub const RED: Color = Color::from_rgb(0xff, 0x00, 0x0b);
    pub const GREEN: Color = Color::from_rgb(0x02, 0xed, 0x6e);
    pub const GOLD: Color = Color::from_rgb(0xff, 0xd7, 0x00);
    pub const GRAY: Color = Color::from_rgb(0x70, 0x70, 0x70);
    pub const SILVER: Color = Color::from_rgb(0x99, 0x99, 0x99);
}

/// Escape sequences for 24-bit terminal colors.
pub mod ansi {
    use std::io::{self, Write};

    use super::Color;

    pub const RESET: &str = "\x1b[0m";

    pub fn foreground(color: &Color) -> String {
        format!("\x1b[38;2;{};{};{}m", color.r(), color.g(), color.b())
    }

    /// Write `text` in `color`, resetting the color afterwards.
    pub fn paint<W: Write>(out: &mut W, text: &str, color: &Color) -> io::Result<()> {
        write!(out, "{}{text}{RESET}", foreground(color))
    }
}

/// Piece of text sharing a single color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: Cow<'static, str>,
    pub color: &'static Color,
}

impl Token {
    pub fn owned(text: String, color: &'static Color) -> Self {
        Self {
            text: Cow::Owned(text),
            color,
        }
    }

    pub fn borrowed(text: &'static str, color: &'static Color) -> Self {
        Self {
            text: Cow::Borrowed(text),
            color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ansi, palette, ColorScheme, Colors, Token};

    #[test]
    fn tokens() {
        let tab = Token::borrowed("\t", Colors::whitespace());
        let reg = Token::owned(String::from("R31"), Colors::register());

        assert_eq!(tab.text, "\t");
        assert_eq!(reg.text, "R31");
        assert_eq!(*reg.color, palette::MAGENTA);
    }

    #[test]
    fn escapes() {
        assert_eq!(ansi::foreground(&palette::RED), "\x1b[38;2;255;0;11m");

        let mut out = Vec::new();
        ansi::paint(&mut out, "BREAK", &palette::WHITE).unwrap();
        assert_eq!(out, b"\x1b[38;2;255;255;255mBREAK\x1b[0m");
    }

    #[test]
    fn data_stands_out() {
        assert_ne!(Colors::data(), Colors::immediate());
        assert_ne!(Colors::unrecognized(), Colors::mnemonic());
    }
}

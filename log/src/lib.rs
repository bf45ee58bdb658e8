use std::io::{self, Write};
use std::sync::Mutex;

use once_cell::sync::Lazy;
use tokenizing::ansi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Green,
    Red,
    Gold,
    Gray,
}

impl Color {
    /// Whether the message is shown without asking for verbose output.
    fn important(self) -> bool {
        matches!(self, Color::Red | Color::Gold)
    }
}

impl From<Color> for egui::Color32 {
    fn from(color: Color) -> Self {
        match color {
            Color::Green => egui::Color32::LIGHT_GREEN,
            Color::Red => egui::Color32::RED,
            Color::Gold => egui::Color32::GOLD,
            Color::Gray => egui::Color32::LIGHT_GRAY,
        }
    }
}

#[macro_export]
macro_rules! notify {
    () => {};

    ($($arg:tt)*) => {{
        let mut logger = $crate::LOGGER.lock().unwrap_or_else(|e| e.into_inner());

        logger.append(
            format!(
                $($arg)*
            ),
            $crate::Color::Green,
        );
    }};
}

#[macro_export]
macro_rules! strong {
    () => {};

    ($($arg:tt)*) => {{
        let mut logger = $crate::LOGGER.lock().unwrap_or_else(|e| e.into_inner());

        logger.append(
            format!(
                $($arg)*
            ),
            $crate::Color::Red,
        );
    }};
}

#[macro_export]
macro_rules! warning {
    () => {};

    ($($arg:tt)*) => {{
        let mut logger = $crate::LOGGER.lock().unwrap_or_else(|e| e.into_inner());

        logger.append(
            format!(
                $($arg)*
            ),
            $crate::Color::Gold,
        );
    }};
}

#[macro_export]
macro_rules! trace {
    () => {};

    ($($arg:tt)*) => {{
        let mut logger = $crate::LOGGER.lock().unwrap_or_else(|e| e.into_inner());

        logger.append(
            format!(
                $($arg)*
            ),
            $crate::Color::Gray,
        );
    }};
}

pub static LOGGER: Lazy<Mutex<Logger<300>>> = Lazy::new(|| Mutex::new(Logger::new()));

/// Ring buffer holding the last `N` messages.
pub struct Logger<const N: usize> {
    lines: [(String, Color); N],
    head: usize,
    len: usize,
}

impl<const N: usize> Logger<N> {
    fn new() -> Self {
        Self {
            lines: std::array::from_fn(|_| (String::new(), Color::Gray)),
            head: 0,
            len: 0,
        }
    }

    pub fn append(&mut self, line: String, color: Color) {
        self.lines[self.head] = (line + "\n", color);
        self.head = (self.head + 1) % N;
        self.len += 1;
    }

    pub fn clear(&mut self) {
        self.head = 0;
        self.len = 0;
    }

    fn lines(&self) -> (&[(String, Color)], &[(String, Color)]) {
        if self.len < N {
            (&self.lines[0..self.len], &[])
        } else {
            // wrapped around, so we need to return two slices
            let (a, b) = self.lines.split_at(self.head);

            (b, a)
        }
    }

    /// Messages currently held, oldest first.
    pub fn messages(&self) -> impl Iterator<Item = (&str, Color)> + '_ {
        let (a, b) = self.lines();
        a.iter().chain(b).map(|(line, color)| (line.trim_end(), *color))
    }

    /// Write out and forget every message. Without `verbose` only warnings and errors
    /// are written.
    pub fn flush<W: Write>(&mut self, out: &mut W, verbose: bool, styled: bool) -> io::Result<()> {
        let (a, b) = self.lines();

        for (line, color) in a.iter().chain(b) {
            if !verbose && !color.important() {
                continue;
            }

            if styled {
                ansi::paint(out, line, &(*color).into())?;
            } else {
                out.write_all(line.as_bytes())?;
            }
        }

        self.clear();
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::{Color, Logger};

    #[test]
    fn wraps_around() {
        let mut logger = Logger::<3>::new();
        for idx in 0..5 {
            logger.append(format!("line {idx}"), Color::Gray);
        }

        let lines: Vec<&str> = logger.messages().map(|(line, _)| line).collect();
        assert_eq!(lines, ["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn flush_filters_unimportant() {
        let mut logger = Logger::<8>::new();
        logger.append("decoded".to_string(), Color::Green);
        logger.append("careful".to_string(), Color::Gold);
        logger.append("detail".to_string(), Color::Gray);
        logger.append("failed".to_string(), Color::Red);

        let mut out = Vec::new();
        logger.flush(&mut out, false, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "careful\nfailed\n");
        assert_eq!(logger.messages().count(), 0);
    }

    #[test]
    fn flush_verbose() {
        let mut logger = Logger::<8>::new();
        logger.append("decoded".to_string(), Color::Green);
        logger.append("detail".to_string(), Color::Gray);

        let mut out = Vec::new();
        logger.flush(&mut out, true, false).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "decoded\ndetail\n");
    }

    #[test]
    fn macros() {
        crate::notify!("decoded {} words", 3);
        crate::warning!("first instruction is {}", "BREAK");
        crate::strong!("{}: malformed word", "in.txt");

        let logger = crate::LOGGER.lock().unwrap();
        let messages: Vec<(&str, Color)> = logger.messages().collect();
        assert!(messages.contains(&("decoded 3 words", Color::Green)));
        assert!(messages.contains(&("first instruction is BREAK", Color::Gold)));
        assert!(messages.contains(&("in.txt: malformed word", Color::Red)));
    }
}

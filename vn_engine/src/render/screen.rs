//! Screen capabilities the renderer depends on.

use std::io::{self, Write};

use crossterm::{cursor::MoveTo, execute, terminal};

/// Row count assumed when the terminal cannot report its size.
pub const FALLBACK_ROWS: usize = 24;

/// The environment-specific part of drawing: clearing and measuring.
pub trait Screen {
    /// Clear the visible screen and home the cursor.
    fn clear<W: Write>(&mut self, out: &mut W) -> io::Result<()>;

    /// Current number of terminal rows.
    fn rows(&self) -> usize;
}

/// A real terminal, driven through crossterm.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalScreen;

impl Screen for TerminalScreen {
    fn clear<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        execute!(out, terminal::Clear(terminal::ClearType::All), MoveTo(0, 0))
    }

    fn rows(&self) -> usize {
        match terminal::size() {
            Ok((_, rows)) if rows > 0 => rows as usize,
            _ => FALLBACK_ROWS,
        }
    }
}

/// A screen of fixed height that never clears.
///
/// Used when output is not a terminal, and by tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedScreen {
    pub rows: usize,
}

impl FixedScreen {
    pub fn new(rows: usize) -> Self {
        Self { rows }
    }
}

impl Default for FixedScreen {
    fn default() -> Self {
        Self::new(FALLBACK_ROWS)
    }
}

impl Screen for FixedScreen {
    fn clear<W: Write>(&mut self, _out: &mut W) -> io::Result<()> {
        Ok(())
    }

    fn rows(&self) -> usize {
        self.rows
    }
}

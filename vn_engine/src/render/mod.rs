//! Rendering - draws laid-out text onto the screen.
//!
//! Two screen modes are supported:
//! - **Banner**: a framed block near the top, used for titles and questions
//! - **Bottom text**: narration anchored to the bottom of the terminal

mod screen;

pub use screen::*;

use std::io::{self, Write};

use crate::layout::wrap_center;

/// Draws text for the engine.
///
/// The renderer never touches save state; it only writes to `out`.
pub struct Renderer<W, S> {
    out: W,
    screen: S,
    width: usize,
    padding: usize,
}

impl<W: Write, S: Screen> Renderer<W, S> {
    /// Create a renderer drawing `width` columns with `padding` rows of margin.
    pub fn new(out: W, screen: S, width: usize, padding: usize) -> Self {
        Self {
            out,
            screen,
            width: width.max(1),
            padding,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn padding(&self) -> usize {
        self.padding
    }

    /// The underlying output.
    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn into_writer(self) -> W {
        self.out
    }

    /// Clear the screen and draw `text` between two rules of `=`.
    pub fn banner(&mut self, text: &str) -> io::Result<()> {
        self.screen.clear(&mut self.out)?;

        let rule = "=".repeat(self.width);
        let margin = "\n".repeat(self.padding);

        write!(self.out, "{}", margin)?;
        writeln!(self.out, "{}", rule)?;
        writeln!(self.out)?;
        for line in wrap_center(text, self.width) {
            writeln!(self.out, "{}", line)?;
        }
        writeln!(self.out)?;
        writeln!(self.out, "{}", rule)?;
        write!(self.out, "{}", margin)?;
        self.out.flush()
    }

    /// Clear the screen and draw `text` anchored to the bottom.
    ///
    /// Leaves `padding` rows free below the text. Text taller than the
    /// terminal is simply drawn from the top.
    pub fn bottom_text(&mut self, text: &str) -> io::Result<()> {
        self.screen.clear(&mut self.out)?;

        let lines = wrap_center(text, self.width);
        let blank = self
            .screen
            .rows()
            .saturating_sub(lines.len())
            .saturating_sub(self.padding);

        write!(self.out, "{}", "\n".repeat(blank))?;
        for line in lines {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }

    /// Write an input marker without a newline.
    pub fn prompt(&mut self, marker: &str) -> io::Result<()> {
        write!(self.out, "{}", marker)?;
        self.out.flush()
    }

    /// Write a single line of plain text, such as an inline error.
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)?;
        self.out.flush()
    }
}

//! Single-cursor list rendering in raw mode.
//!
//! Redraws in place: the previous frame is erased by moving the terminal
//! cursor back up before printing the next one. Raw mode means every line
//! ends in an explicit `\r\n`.

use std::io::{self, Write};

use colored::*;
use crossterm::cursor::MoveUp;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};

pub struct Picker {
    lines_drawn: u16,
}

impl Picker {
    pub fn new() -> Self {
        Self { lines_drawn: 0 }
    }

    /// Draws one frame: a title, the choice rows and a hint line. The row
    /// under the cursor is highlighted with a `>` marker. An empty choice
    /// list renders no rows.
    pub fn draw(&mut self, title: &str, choices: &[String], cursor: usize) -> io::Result<()> {
        let mut out = io::stdout();
        self.erase(&mut out)?;

        queue!(out, Print(format!("{}\r\n\r\n", title.bold())))?;

        for (i, choice) in choices.iter().enumerate() {
            let row = if i == cursor {
                format!("{} {}", ">".cyan().bold(), choice.cyan().bold())
            } else {
                format!("  {choice}")
            };
            queue!(out, Print(format!("{row}\r\n")))?;
        }

        queue!(
            out,
            Print(format!(
                "\r\n{}\r\n",
                "↑/↓ or j/k to move, enter to confirm, q to quit".dimmed()
            ))
        )?;
        out.flush()?;

        self.lines_drawn = (choices.len() as u16) + 4;
        Ok(())
    }

    /// Erases the current frame, leaving the cursor where drawing began.
    pub fn clear(&mut self) -> io::Result<()> {
        let mut out = io::stdout();
        self.erase(&mut out)?;
        out.flush()
    }

    fn erase(&mut self, out: &mut impl Write) -> io::Result<()> {
        if self.lines_drawn > 0 {
            queue!(out, MoveUp(self.lines_drawn), Clear(ClearType::FromCursorDown))?;
            self.lines_drawn = 0;
        }
        Ok(())
    }
}

//! Day progression - the story advances one day at a time.
//!
//! `current_day` in the save state is the only progression value. Content for
//! a day ends by calling [`Engine::end_day`], which is the one explicit state
//! transition; the [`Story`] driver then looks up the next day's content.

mod story;

pub use story::*;

use std::io::{BufRead, Write};

use vn_state::{FIRST_DAY, KEY_CURRENT_DAY};

use crate::engine::Engine;
use crate::error::{EngineError, Result};
use crate::render::Screen;

impl<R: BufRead, W: Write, S: Screen> Engine<R, W, S> {
    /// The day to play next. A fresh save starts on day 1.
    pub fn current_day(&self) -> u32 {
        self.store.state().current_day()
    }

    /// Finish the current day and save `next_day` as the day to resume on.
    pub fn end_day(&mut self, next_day: u32) -> Result<()> {
        if next_day < FIRST_DAY {
            return Err(EngineError::InvalidDay { day: next_day });
        }
        tracing::info!("Day {} ended, next is day {}", self.current_day(), next_day);
        self.store.set(KEY_CURRENT_DAY, next_day)?;
        self.day_ended = true;
        Ok(())
    }

    /// Announce a day with a banner and wait for the player.
    pub fn day_screen(&mut self, number: u32, title: &str) -> Result<()> {
        self.show_banner(&day_label(number, title))?;
        self.wait()
    }
}

/// `Day 001`, with the title on the next line when there is one.
pub fn day_label(number: u32, title: &str) -> String {
    if title.is_empty() {
        format!("Day {:03}", number)
    } else {
        format!("Day {:03}\n{}", number, title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::render::FixedScreen;
    use std::io::Cursor;
    use tempfile::TempDir;
    use vn_state::SaveStore;

    fn engine(dir: &TempDir, input: &str) -> Engine<Cursor<Vec<u8>>, Vec<u8>, FixedScreen> {
        let config = EngineConfig {
            width: 20,
            padding: 0,
            save_file: dir.path().join("save.json"),
            ..EngineConfig::default()
        };
        Engine::new(
            config,
            Cursor::new(input.as_bytes().to_vec()),
            Vec::new(),
            FixedScreen::new(24),
        )
    }

    #[test]
    fn test_day_label() {
        assert_eq!(day_label(1, ""), "Day 001");
        assert_eq!(day_label(12, "A New Morning"), "Day 012\nA New Morning");
    }

    #[test]
    fn test_first_run_starts_on_day_one() {
        let dir = TempDir::new().unwrap();
        assert_eq!(engine(&dir, "").current_day(), 1);
    }

    #[test]
    fn test_end_day_persists() {
        let dir = TempDir::new().unwrap();
        let mut vn = engine(&dir, "");
        vn.end_day(2).unwrap();
        assert_eq!(vn.current_day(), 2);

        let reloaded = SaveStore::load(&dir.path().join("save.json"));
        assert_eq!(reloaded.current_day(), 2);
        assert_eq!(engine(&dir, "").current_day(), 2);
    }

    #[test]
    fn test_end_day_rejects_day_zero() {
        let dir = TempDir::new().unwrap();
        let mut vn = engine(&dir, "");
        vn.end_day(2).unwrap();
        vn.day_ended = false;

        let err = vn.end_day(0).unwrap_err();
        assert!(matches!(err, EngineError::InvalidDay { day: 0 }));
        assert!(!vn.day_ended);
        assert_eq!(vn.current_day(), 2);
        assert_eq!(SaveStore::load(&dir.path().join("save.json")).current_day(), 2);
    }

    #[test]
    fn test_day_screen_waits() {
        let dir = TempDir::new().unwrap();
        let mut vn = engine(&dir, "\n");
        vn.day_screen(1, "Prologue").unwrap();

        let out = String::from_utf8_lossy(vn.renderer().writer()).into_owned();
        assert_eq!(
            out,
            "====================\n\n      Day 001\n      Prologue\n\n====================\n"
        );

        // The Enter press was consumed.
        assert!(vn.day_screen(2, "").is_err());
    }
}

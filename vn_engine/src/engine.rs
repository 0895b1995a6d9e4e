//! The engine - the single handle story content talks to.

use std::io::{self, BufRead, StdinLock, Stdout, Write};

use vn_state::{SaveState, SaveStore, StateValue};

use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::render::{Renderer, Screen, TerminalScreen};

/// Marker printed before every line of player input.
pub const INPUT_MARKER: &str = "> ";

/// Ties together the save store, the renderer, and the player's input.
///
/// Story content receives `&mut Engine` and drives everything through it:
/// rendering, prompts, and day progression. There is no global engine; build
/// one and pass it along.
pub struct Engine<R, W, S> {
    pub(crate) config: EngineConfig,
    pub(crate) store: SaveStore,
    pub(crate) renderer: Renderer<W, S>,
    pub(crate) input: R,
    /// Set by `end_day`, cleared by the story driver before each day.
    pub(crate) day_ended: bool,
}

/// The engine wired to the real terminal.
pub type TerminalEngine = Engine<StdinLock<'static>, Stdout, TerminalScreen>;

impl TerminalEngine {
    /// Build an engine reading stdin and drawing to stdout.
    pub fn stdio(config: EngineConfig) -> Self {
        Engine::new(config, io::stdin().lock(), io::stdout(), TerminalScreen)
    }
}

impl<R: BufRead, W: Write, S: Screen> Engine<R, W, S> {
    /// Create an engine, loading the save file named in `config`.
    pub fn new(config: EngineConfig, input: R, out: W, screen: S) -> Self {
        let store = SaveStore::open(config.save_file.clone());
        Self::with_store(config, store, input, out, screen)
    }

    /// Create an engine around an already opened store.
    pub fn with_store(
        config: EngineConfig,
        store: SaveStore,
        input: R,
        out: W,
        screen: S,
    ) -> Self {
        let renderer = Renderer::new(out, screen, config.width, config.padding);
        Self {
            config,
            store,
            renderer,
            input,
            day_ended: false,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &SaveStore {
        &self.store
    }

    pub fn state(&self) -> &SaveState {
        self.store.state()
    }

    pub fn renderer(&self) -> &Renderer<W, S> {
        &self.renderer
    }

    /// Get a stored value, or `default` if the story never set it.
    pub fn get(&self, key: &str, default: impl Into<StateValue>) -> StateValue {
        self.store.get(key, default)
    }

    /// Store a value. The save file is rewritten before this returns.
    pub fn set(&mut self, key: &str, value: impl Into<StateValue>) -> Result<()> {
        self.store.set(key, value)?;
        Ok(())
    }

    /// Wipe every stored choice and start again from the first day.
    pub fn reset_progress(&mut self) -> Result<()> {
        tracing::info!("Resetting progress in {}", self.store.path().display());
        self.store.reset()?;
        Ok(())
    }

    /// Draw a framed banner.
    pub fn show_banner(&mut self, text: &str) -> Result<()> {
        self.renderer.banner(text)?;
        Ok(())
    }

    /// Draw narration anchored to the bottom of the screen.
    pub fn show_bottom_text(&mut self, text: &str) -> Result<()> {
        self.renderer.bottom_text(text)?;
        Ok(())
    }

    /// Block until the player presses Enter.
    pub fn wait(&mut self) -> Result<()> {
        if !self.config.continue_hint.is_empty() {
            self.renderer.prompt(&self.config.continue_hint)?;
        }
        self.read_line()?;
        Ok(())
    }

    /// Show the input marker and read one trimmed line of input.
    pub(crate) fn read_answer(&mut self) -> Result<String> {
        self.renderer.prompt(INPUT_MARKER)?;
        self.read_line()
    }

    /// Bytes that are not valid UTF-8 are replaced rather than rejected, so a
    /// stray byte reaches the prompt's own validation instead of failing it.
    fn read_line(&mut self) -> Result<String> {
        let mut bytes = Vec::new();
        if self.input.read_until(b'\n', &mut bytes)? == 0 {
            return Err(EngineError::InputClosed);
        }
        Ok(String::from_utf8_lossy(&bytes).trim().to_string())
    }
}

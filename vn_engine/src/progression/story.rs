//! The story driver - maps day numbers to content and plays them in order.

use std::collections::BTreeMap;
use std::io::{BufRead, Write};

use crate::engine::Engine;
use crate::error::Result;
use crate::render::Screen;

/// Content for one day. It renders and prompts through the engine and
/// finishes with [`Engine::end_day`].
pub type DayHandler<R, W, S> = Box<dyn FnMut(&mut Engine<R, W, S>) -> Result<()>>;

/// Why the story driver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryOutcome {
    /// The current day is past the last day with content.
    Finished { day: u32 },

    /// The current day lies inside the story but has no content.
    MissingDay { day: u32 },

    /// A day's content returned without calling `end_day`.
    Stalled { day: u32 },
}

/// Registered day content.
pub struct Story<R, W, S> {
    days: BTreeMap<u32, DayHandler<R, W, S>>,
}

impl<R: BufRead, W: Write, S: Screen> Default for Story<R, W, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: BufRead, W: Write, S: Screen> Story<R, W, S> {
    /// Create an empty story.
    pub fn new() -> Self {
        Self {
            days: BTreeMap::new(),
        }
    }

    /// Register content for `number`, replacing any earlier registration.
    pub fn day(
        mut self,
        number: u32,
        handler: impl FnMut(&mut Engine<R, W, S>) -> Result<()> + 'static,
    ) -> Self {
        self.days.insert(number, Box::new(handler));
        self
    }

    /// Whether content is registered for `number`.
    pub fn has_day(&self, number: u32) -> bool {
        self.days.contains_key(&number)
    }

    /// The highest day with content.
    pub fn last_day(&self) -> Option<u32> {
        self.days.keys().next_back().copied()
    }

    /// Play days starting from the engine's current day until one has no content.
    pub fn run(&mut self, engine: &mut Engine<R, W, S>) -> Result<StoryOutcome> {
        let last_day = self.last_day();

        loop {
            let day = engine.current_day();

            let Some(handler) = self.days.get_mut(&day) else {
                let outcome = match last_day {
                    Some(last) if day <= last => StoryOutcome::MissingDay { day },
                    _ => StoryOutcome::Finished { day },
                };
                tracing::info!("Story stopped on day {}: {:?}", day, outcome);
                return Ok(outcome);
            };

            tracing::info!("Playing day {}", day);
            engine.day_ended = false;
            handler(engine)?;

            if !engine.day_ended {
                tracing::warn!("Day {} returned without ending the day", day);
                return Ok(StoryOutcome::Stalled { day });
            }
        }
    }
}

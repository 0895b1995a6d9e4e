//! Input prompts - ask the player something and save the answer.
//!
//! Every prompt renders a banner, reads one line, and saves the accepted
//! answer under the caller's key exactly once. Free text and yes/no prompts
//! never reject input. Choice prompts ask again until the input is valid.

mod choice;

pub use choice::*;

use std::io::{BufRead, Write};

use crate::engine::Engine;
use crate::error::{EngineError, Result};
use crate::layout::dedent;
use crate::render::Screen;

impl<R: BufRead, W: Write, S: Screen> Engine<R, W, S> {
    /// Ask for free text. Empty input becomes `default`.
    pub fn ask_text(&mut self, key: &str, question: &str, default: &str) -> Result<String> {
        self.show_banner(question)?;

        let raw = self.read_answer()?;
        let answer = if raw.is_empty() {
            default.to_string()
        } else {
            raw
        };

        tracing::debug!("Accepted {} = {:?}", key, answer);
        self.set(key, answer.as_str())?;
        Ok(answer)
    }

    /// Ask a yes/no question. Anything but y/yes/n/no becomes `default`.
    pub fn ask_yes_no(&mut self, key: &str, question: &str, default: bool) -> Result<bool> {
        let hint = if default { "Y/n" } else { "y/N" };
        self.show_banner(&format!("{}\n[{}]", dedent(question).trim(), hint))?;

        let raw = self.read_answer()?;
        let answer = parse_yes_no(&raw, default);

        tracing::debug!("Accepted {} = {}", key, answer);
        self.set(key, answer)?;
        Ok(answer)
    }

    /// Ask the player to pick one option by number.
    ///
    /// Empty input picks `default` when there is one. Anything else that is
    /// not a listed number is reported and asked again.
    pub fn ask_single_choice(
        &mut self,
        key: &str,
        question: &str,
        options: &[&str],
        default: Option<&str>,
    ) -> Result<String> {
        check_options(key, options, default.as_slice())?;
        self.show_banner(&choice_menu(question, options, default.map(str::to_string)))?;

        let answer = loop {
            let raw = self.read_answer()?;
            if raw.is_empty() {
                if let Some(default) = default {
                    break default.to_string();
                }
            }
            match parse_single(&raw, options.len()) {
                Ok(index) => break options[index].to_string(),
                Err(e) => self.renderer.line(&e.to_string())?,
            }
        };

        tracing::debug!("Accepted {} = {:?}", key, answer);
        self.set(key, answer.as_str())?;
        Ok(answer)
    }

    /// Ask the player to pick any number of options as comma-separated numbers.
    ///
    /// Repeated numbers give repeated answers. Empty input picks `default`
    /// when there is one, and is rejected otherwise.
    pub fn ask_multi_choice(
        &mut self,
        key: &str,
        question: &str,
        options: &[&str],
        default: Option<&[&str]>,
    ) -> Result<Vec<String>> {
        check_options(key, options, default.unwrap_or_default())?;
        self.show_banner(&choice_menu(question, options, default.map(|d| d.join(", "))))?;

        let answer = loop {
            let raw = self.read_answer()?;
            if raw.is_empty() {
                if let Some(default) = default {
                    break default.iter().map(|s| s.to_string()).collect::<Vec<_>>();
                }
            }
            match parse_multi(&raw, options.len()) {
                Ok(indices) => {
                    break indices.into_iter().map(|i| options[i].to_string()).collect()
                }
                Err(e) => self.renderer.line(&e.to_string())?,
            }
        };

        tracing::debug!("Accepted {} = {:?}", key, answer);
        self.set(key, answer.clone())?;
        Ok(answer)
    }
}

fn check_options(key: &str, options: &[&str], defaults: &[&str]) -> Result<()> {
    if options.is_empty() {
        return Err(EngineError::NoOptions {
            key: key.to_string(),
        });
    }
    if let Some(unknown) = defaults.iter().find(|d| !options.contains(d)) {
        return Err(EngineError::UnknownDefault {
            key: key.to_string(),
            default: unknown.to_string(),
        });
    }
    Ok(())
}

/// The question followed by a numbered option list.
fn choice_menu(question: &str, options: &[&str], default: Option<String>) -> String {
    let mut menu = dedent(question).trim().to_string();
    menu.push('\n');
    for (i, option) in options.iter().enumerate() {
        menu.push_str(&format!("\n{}. {}", i + 1, option));
    }
    if let Some(default) = default {
        menu.push_str(&format!("\n\n(default: {})", default));
    }
    menu
}

//! Parsing raw player input into answers.

use thiserror::Error;

/// Why a choice answer was rejected. The message is shown to the player.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChoiceError {
    #[error("Please enter a number between 1 and {max}.")]
    Empty { max: usize },

    #[error("'{input}' is not a number. Please enter a number between 1 and {max}.")]
    NotANumber { input: String, max: usize },

    #[error("{number} is not an option. Please enter a number between 1 and {max}.")]
    OutOfRange { number: usize, max: usize },
}

/// Resolve a yes/no answer. Anything unrecognized, including nothing, is `default`.
pub fn parse_yes_no(raw: &str, default: bool) -> bool {
    match raw.trim().to_lowercase().as_str() {
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    }
}

/// Parse a 1-based option number into a 0-based index.
pub fn parse_single(raw: &str, option_count: usize) -> Result<usize, ChoiceError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ChoiceError::Empty { max: option_count });
    }
    parse_index(raw, option_count)
}

/// Parse comma-separated 1-based option numbers into 0-based indices.
///
/// Order is kept and repeats are allowed; a single bad entry rejects the lot.
pub fn parse_multi(raw: &str, option_count: usize) -> Result<Vec<usize>, ChoiceError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ChoiceError::Empty { max: option_count });
    }
    raw.split(',')
        .map(|part| parse_index(part.trim(), option_count))
        .collect()
}

fn parse_index(raw: &str, option_count: usize) -> Result<usize, ChoiceError> {
    let number = raw.parse::<usize>().map_err(|_| ChoiceError::NotANumber {
        input: raw.to_string(),
        max: option_count,
    })?;

    if (1..=option_count).contains(&number) {
        Ok(number - 1)
    } else {
        Err(ChoiceError::OutOfRange {
            number,
            max: option_count,
        })
    }
}

//! Save state - the free-form key/value map a story writes player choices into.

mod store;

pub use store::*;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Key holding the player's chosen name.
pub const KEY_NAME: &str = "name";

/// Key holding the day the story resumes on.
pub const KEY_CURRENT_DAY: &str = "current_day";

/// Day a fresh save starts on.
pub const FIRST_DAY: u32 = 1;

/// A single stored value.
///
/// Serialized untagged, so a save file is a plain JSON object of scalars and
/// string arrays. Anything else found in a save file (`null`, nested arrays,
/// objects) is carried as [`StateValue::Other`] and written back unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    /// Multi-choice answers, in the order the player entered them.
    List(Vec<String>),
    Other(serde_json::Value),
}

impl StateValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            StateValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            StateValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Integers widen to floats.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            StateValue::Int(i) => Some(*i as f64),
            StateValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            StateValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            StateValue::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateValue::Bool(b) => write!(f, "{}", b),
            StateValue::Int(i) => write!(f, "{}", i),
            StateValue::Float(x) => write!(f, "{}", x),
            StateValue::Text(s) => f.write_str(s),
            StateValue::List(items) => f.write_str(&items.join(", ")),
            StateValue::Other(value) => write!(f, "{}", value),
        }
    }
}

impl From<bool> for StateValue {
    fn from(value: bool) -> Self {
        StateValue::Bool(value)
    }
}

impl From<i64> for StateValue {
    fn from(value: i64) -> Self {
        StateValue::Int(value)
    }
}

impl From<u32> for StateValue {
    fn from(value: u32) -> Self {
        StateValue::Int(i64::from(value))
    }
}

impl From<f64> for StateValue {
    fn from(value: f64) -> Self {
        StateValue::Float(value)
    }
}

impl From<&str> for StateValue {
    fn from(value: &str) -> Self {
        StateValue::Text(value.to_string())
    }
}

impl From<String> for StateValue {
    fn from(value: String) -> Self {
        StateValue::Text(value)
    }
}

impl From<Vec<String>> for StateValue {
    fn from(value: Vec<String>) -> Self {
        StateValue::List(value)
    }
}

impl From<&[&str]> for StateValue {
    fn from(value: &[&str]) -> Self {
        StateValue::List(value.iter().map(|s| s.to_string()).collect())
    }
}

/// Everything a story has recorded so far.
///
/// Keys are free-form; only [`KEY_NAME`] and [`KEY_CURRENT_DAY`] carry
/// meaning for the engine itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct SaveState {
    values: BTreeMap<String, StateValue>,
}

impl SaveState {
    /// Create a new empty save state.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&StateValue> {
        self.values.get(key)
    }

    /// Get a stored value, or `default` if the key was never set.
    pub fn get_or(&self, key: &str, default: impl Into<StateValue>) -> StateValue {
        self.values
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.into())
    }

    /// Insert a value, returning the previous one.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<StateValue>,
    ) -> Option<StateValue> {
        self.values.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<StateValue> {
        self.values.remove(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StateValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// The player's name, if one has been entered.
    pub fn name(&self) -> Option<&str> {
        self.get(KEY_NAME).and_then(StateValue::as_str)
    }

    /// The day to resume on.
    ///
    /// Whole numbers are accepted even when stored as floats (`2.0`). Anything
    /// else, or a day below [`FIRST_DAY`], reads as [`FIRST_DAY`].
    pub fn current_day(&self) -> u32 {
        let day = match self.get(KEY_CURRENT_DAY) {
            Some(StateValue::Int(day)) => u32::try_from(*day).ok(),
            Some(StateValue::Float(day)) if day.fract() == 0.0 => {
                (0.0..=f64::from(u32::MAX)).contains(day).then(|| *day as u32)
            }
            _ => None,
        };
        day.filter(|day| *day >= FIRST_DAY).unwrap_or(FIRST_DAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_default() {
        let mut state = SaveState::new();
        assert_eq!(state.get_or("drink", "Coffee"), StateValue::from("Coffee"));

        state.insert("drink", "Tea");
        assert_eq!(state.get_or("drink", "Coffee"), StateValue::from("Tea"));
    }

    #[test]
    fn test_current_day() {
        let mut state = SaveState::new();
        assert_eq!(state.current_day(), 1);

        state.insert(KEY_CURRENT_DAY, 3u32);
        assert_eq!(state.current_day(), 3);

        state.insert(KEY_CURRENT_DAY, 0i64);
        assert_eq!(state.current_day(), 1);

        state.insert(KEY_CURRENT_DAY, "two");
        assert_eq!(state.current_day(), 1);

        state.insert(KEY_CURRENT_DAY, 2.0);
        assert_eq!(state.current_day(), 2);

        state.insert(KEY_CURRENT_DAY, 2.5);
        assert_eq!(state.current_day(), 1);

        state.insert(KEY_CURRENT_DAY, -3.0);
        assert_eq!(state.current_day(), 1);
    }

    #[test]
    fn test_name_accessor() {
        let mut state = SaveState::new();
        assert!(state.name().is_none());

        state.insert(KEY_NAME, "Clayn");
        assert_eq!(state.name(), Some("Clayn"));

        state.insert(KEY_NAME, true);
        assert!(state.name().is_none());
    }

    #[test]
    fn test_untagged_json_shape() {
        let mut state = SaveState::new();
        state.insert("name", "Clayn");
        state.insert("pregnancy", false);
        state.insert("current_day", 2u32);
        state.insert("snacks", &["Chips", "Chips"][..]);

        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "current_day": 2,
                "name": "Clayn",
                "pregnancy": false,
                "snacks": ["Chips", "Chips"],
            })
        );

        let back: SaveState = serde_json::from_value(json).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_numbers_keep_their_kind() {
        let state: SaveState = serde_json::from_str(r#"{"gold": 12, "luck": 0.5}"#).unwrap();
        assert_eq!(state.get("gold"), Some(&StateValue::Int(12)));
        assert_eq!(state.get("luck"), Some(&StateValue::Float(0.5)));
        assert_eq!(state.get("gold").unwrap().as_float(), Some(12.0));
    }

    #[test]
    fn test_foreign_values_survive() {
        let json = r#"{
            "current_day": 2.0,
            "note": null,
            "picks": [["A", "B"]],
            "extra": {"k": 1}
        }"#;
        let state: SaveState = serde_json::from_str(json).unwrap();
        assert_eq!(state.len(), 4);
        assert_eq!(state.current_day(), 2);
        assert_eq!(state.get("note"), Some(&StateValue::Other(serde_json::Value::Null)));

        let back = serde_json::to_value(&state).unwrap();
        assert_eq!(back, serde_json::from_str::<serde_json::Value>(json).unwrap());
    }

    #[test]
    fn test_display() {
        assert_eq!(StateValue::from("Tea").to_string(), "Tea");
        assert_eq!(StateValue::from(true).to_string(), "true");
        assert_eq!(
            StateValue::from(vec!["A".to_string(), "C".to_string()]).to_string(),
            "A, C"
        );
        assert_eq!(StateValue::Other(serde_json::Value::Null).to_string(), "null");
    }
}

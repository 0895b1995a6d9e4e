//! The player character.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::EntityId;

/// Stamina a hero starts with and recovers to.
pub const MAX_STAMINA: u32 = 100;

/// The player character.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hero {
    pub id: EntityId,
    pub name: String,
    money: u64,
    rank: u32,
    stamina: u32,
    alive: bool,
}

impl Hero {
    /// Create a new hero with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            money: 0,
            rank: 1,
            stamina: MAX_STAMINA,
            alive: true,
        }
    }

    pub fn money(&self) -> u64 {
        self.money
    }

    pub fn rank(&self) -> u32 {
        self.rank
    }

    pub fn stamina(&self) -> u32 {
        self.stamina
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn earn(&mut self, amount: u64) {
        self.money = self.money.saturating_add(amount);
    }

    /// Spend money if the hero can afford it. Returns whether the purchase happened.
    pub fn spend(&mut self, amount: u64) -> bool {
        if amount > self.money {
            return false;
        }
        self.money -= amount;
        true
    }

    pub fn promote(&mut self) {
        self.rank += 1;
    }

    /// Drain stamina; a hero drained to zero collapses but does not die.
    pub fn tire(&mut self, amount: u32) {
        self.stamina = self.stamina.saturating_sub(amount);
    }

    pub fn rest(&mut self) {
        self.stamina = MAX_STAMINA;
    }

    pub fn die(&mut self) {
        self.alive = false;
        self.stamina = 0;
    }
}

impl fmt::Display for Hero {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Hero(Name: {}, Money: {}, Rank: {}, Stamina: {}, Alive: {})",
            self.name, self.money, self.rank, self.stamina, self.alive
        )
    }
}

//! # VN Engine
//!
//! A terminal visual novel engine. Story content is plain Rust that receives
//! an [`Engine`] and calls it in sequence: show text, ask the player
//! something, end the day.
//!
//! ## Core Components
//!
//! - **layout**: Wraps and centers raw story text into display lines
//! - **render**: Draws banners and bottom-anchored narration to a [`Screen`]
//! - **prompt**: Free text, yes/no, single and multi choice questions
//! - **progression**: Day tracking and the [`Story`] driver
//!
//! Every accepted answer is written to the save file before the prompt
//! returns, so a session can be interrupted at any point and resumed.

pub mod config;
pub mod engine;
pub mod error;
pub mod layout;
pub mod progression;
pub mod prompt;
pub mod render;

pub use config::*;
pub use engine::*;
pub use error::*;
pub use layout::*;
pub use progression::*;
pub use prompt::*;
pub use render::*;

pub use vn_state::{Hero, SaveState, SaveStore, StateValue, StoreError};

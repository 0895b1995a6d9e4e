//! # VN State
//!
//! Everything a visual novel remembers between runs: the tagged values player
//! choices are stored as, the file-backed store that persists them, and the
//! entities a story builds from them.
//!
//! This crate does no terminal I/O.

pub mod entities;
pub mod save_state;

pub use entities::*;
pub use save_state::*;

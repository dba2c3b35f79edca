// src/error/mod.rs

mod types;

pub use types::{PlayerError, PlayerResult, SessionResolutionError};

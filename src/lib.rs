// src/lib.rs

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod cli;
pub mod config;
pub mod core;
pub mod draw;
pub mod error;
pub mod export;
pub mod file;
pub mod progress;
pub mod runner;
pub mod specs;
pub mod stats;
pub mod store;

pub use draw::{DrawRecord, Numbers};
pub use error::{Error, Result};
pub use store::History;

//! aget library
//!
//! Playlist model, track downloader and the commands behind the `aget` CLI.

pub mod commands;
pub mod core;
pub mod error;
pub mod utils;

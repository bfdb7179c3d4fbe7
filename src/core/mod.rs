pub mod config;
pub mod download;
pub mod playlist;
pub mod progress;
pub mod track;

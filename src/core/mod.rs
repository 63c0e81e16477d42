//! Core types shared by validation, batch processing and the CLI.

pub mod config;
pub mod error;
pub mod models;

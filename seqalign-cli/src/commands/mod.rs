//! Command implementations for the SeqAlign CLI

pub mod align;
pub mod config;

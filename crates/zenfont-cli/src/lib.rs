//! ZenFont CLI library.
//!
//! This crate provides the core functionality for the `zenfont` binary,
//! including settings loading, the export session and the commands.

pub mod commands;
pub mod export;
pub mod input;

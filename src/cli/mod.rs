//! CLI infrastructure for the `nim` binary
//!
//! This module provides the command-line interface for training agents by
//! self-play, playing against them, and evaluating them.

pub mod commands;
pub mod interactive;
pub mod output;

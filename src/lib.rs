//! Nim with a self-taught tabular Q-learning agent
//!
//! This crate provides:
//! - The stick game on heaps `[1, 3, 5, 7]`, where taking the last stick loses
//! - A TD Q-learning agent with an ε-greedy policy over legal moves
//! - Self-play training against a periodically refreshed frozen copy
//! - Snapshot persistence and evaluation against a random player

pub mod adapters;
pub mod app;
pub mod cli;
pub mod error;
pub mod export;
pub mod nim;
pub mod pipeline;
pub mod ports;
pub mod q_learning;

pub use error::{Error, Result};

//! Ports (trait boundaries) for external dependencies.
//!
//! This module defines the interfaces between the game/learning core and the
//! drivers around it. Adapters implementing these traits live in
//! [`crate::adapters`] and [`crate::pipeline`].

pub mod observer;
pub mod player;
pub mod repository;

pub use observer::Observer;
pub use player::Player;
pub use repository::SnapshotRepository;

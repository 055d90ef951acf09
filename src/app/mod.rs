//! Application layer with dependency injection container.
//!
//! The container owns infrastructure dependencies (the snapshot repository)
//! and provides factory methods for creating, loading and training agents.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │        Application Layer (app)          │
//! │   App ──owns──▶ SnapshotRepository      │
//! │    │             (MsgPack / InMemory)   │
//! │    └──creates──▶ TdAgent                │
//! │    └──runs────▶ SelfPlayTrainer         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Usage
//!
//! ```
//! use nim_qlearn::app::{App, AgentConfig};
//! use nim_qlearn::adapters::InMemoryRepository;
//!
//! let app = App::for_testing()
//!     .with_repository(InMemoryRepository::new())
//!     .with_default_seed(42)
//!     .build();
//! let agent = app.create_agent(AgentConfig::new())?;
//! # Ok::<(), nim_qlearn::Error>(())
//! ```

pub mod config;
pub mod container;

pub use config::AgentConfig;
pub use container::{App, AppBuilder};

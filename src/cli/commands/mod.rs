//! Subcommands of the `nim` binary

pub mod evaluate;
pub mod play;
pub mod train;
pub mod two_players;

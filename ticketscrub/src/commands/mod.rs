//! Command implementations for the ticketscrub CLI.

pub mod scrub;

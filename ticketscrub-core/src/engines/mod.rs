// ticketscrub-core/src/engines/mod.rs
//! Concrete `SanitizationEngine` implementations.

pub mod cascade_engine;

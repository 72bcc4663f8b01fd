//! Seven Seals - rules engine for a two-player seal-control card game
//!
//! Light and Dark fight over seven seals. Each round both sides place cards
//! face-down against the seals, then every seal resolves in order: haste
//! strikes, reveals, abilities, combat, siege and ascension. The first side
//! to hold a majority of seals wins; otherwise the seal count after the
//! last round decides.

pub mod config;
pub mod core;
pub mod error;
pub mod game;
pub mod session;
pub mod tournament;
pub mod zones;

pub use error::{Result, SealsError};

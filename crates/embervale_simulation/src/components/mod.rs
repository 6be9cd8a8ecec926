//! ECS Components для игровых entity
//!
//! Организация по доменам:
//! - actor: базовые характеристики (faction, health)
//! - player: player control marker (Player)

pub mod actor;
pub mod player;

// Re-exports для удобного импорта
pub use actor::*;
pub use player::*;

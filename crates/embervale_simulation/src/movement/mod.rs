//! Movement domain — навигация, валидация и исполнение перемещения
//!
//! Содержит:
//! - NavigationMesh contract + PlanarNavMesh stand-in
//! - NavAgent (следование по пути, пауза, arrival)
//! - Mover (бюджет длины пути, запуск movement action)
//! - AnimationDriver (forward speed для анимации)

use bevy::prelude::*;

pub mod agent;
pub mod mover;
pub mod navmesh;

pub use agent::*;
pub use mover::*;
pub use navmesh::*;

use crate::action::ActionInterrupted;
use crate::GameplaySet;

/// Movement Plugin
///
/// Порядок в тике: driving-проход агентов, затем sync состояния Mover'а
/// (animation параметр берёт velocity этого же тика).
pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NavMesh>()
            .add_event::<ActionInterrupted>()
            .add_systems(
                FixedUpdate,
                (drive_nav_agents, sync_mover_state)
                    .chain()
                    .in_set(GameplaySet::Movement),
            );
    }
}

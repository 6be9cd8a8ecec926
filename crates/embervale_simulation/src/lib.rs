//! EMBERVALE Simulation Core
//!
//! ECS-ядро point-and-click RPG на Bevy 0.16: pointer controller с
//! приоритетной цепочкой взаимодействий, navmesh-движение с бюджетом
//! длины пути, exclusive actions, experience ledger.
//!
//! Архитектура:
//! - ECS = gameplay слой (cursor priority, валидация движения, опыт)
//! - Host engine = tactical слой (рендер, загрузка курсоров, настоящий
//!   navmesh) — подключается через seam'ы: `CursorHost`, `CameraRig`,
//!   `NavigationMesh`, ресурс `PointerState`
//!
//! Симуляционный цикл принадлежит embedding-приложению: системы висят в
//! `FixedUpdate` (60Hz) в фиксированном порядке, app.update() — один кадр.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::transform::TransformPlugin;
use bevy_rapier3d::prelude::*;

// Публичные модули
pub mod action;
pub mod components;
pub mod control;
pub mod logger;
pub mod movement;
pub mod saving;
pub mod stats;

// Re-export базовых типов для удобства
pub use action::{switch_action, ActionInterrupted, ActionKind, ActionScheduler};
pub use components::*;
pub use control::*;
pub use logger::{init_logger, log, log_error, log_info, log_warning, set_logger, LogPrinter};
pub use movement::*;
pub use saving::{
    capture_experience, capture_mover, restore_experience, restore_mover, ComponentState,
    RestoreError,
};
pub use stats::{Experience, ExperienceAward, ExperienceGained, StatsPlugin};

/// Частота simulation тика
pub const SIMULATION_HZ: f64 = 60.0;

/// Порядок gameplay фаз внутри тика (после физики)
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    /// Pointer controller (приоритетная цепочка)
    Control,
    /// Driving агентов + sync Mover'а
    Movement,
    /// Experience ledger
    Stats,
}

/// Главный plugin симуляции (объединяет все подсистемы)
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app
            // Fixed timestep 60Hz для simulation tick
            .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))
            // Физические запросы указателя — в том же fixed schedule
            .add_plugins(RapierPhysicsPlugin::<NoUserData>::default().in_fixed_schedule())
            .configure_sets(
                FixedUpdate,
                (GameplaySet::Control, GameplaySet::Movement, GameplaySet::Stats)
                    .chain()
                    .after(PhysicsSet::Writeback),
            )
            // Подсистемы (gameplay слой)
            .add_plugins((ControlPlugin, MovementPlugin, StatsPlugin));
    }
}

/// Создаёт minimal Bevy App для headless симуляции.
///
/// Время шагается вручную ровно одним fixed периодом на update —
/// детерминизм прогона не зависит от wall clock.
pub fn create_headless_app() -> App {
    init_logger();

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(TransformPlugin)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            1.0 / SIMULATION_HZ,
        )));

    app
}

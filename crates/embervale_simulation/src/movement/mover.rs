//! Mover: валидация достижимости + запуск movement action
//!
//! `can_move_to` — чистый запрос (путь существует, полный, в бюджете длины).
//! `start_move_action` НЕ перепроверяет достижимость — вызывающий обязан
//! сначала спросить `can_move_to`.

use bevy::prelude::*;

use crate::action::{switch_action, ActionInterrupted, ActionKind, ActionScheduler};
use crate::components::Health;

use super::agent::NavAgent;
use super::navmesh::NavigationMesh;

/// Movement validator/executor
#[derive(Component, Debug, Clone)]
pub struct Mover {
    /// Бюджет длины пути: сумма расстояний между corner'ами не больше этого
    pub max_path_length: f32,
}

impl Default for Mover {
    fn default() -> Self {
        Self {
            max_path_length: 40.0,
        }
    }
}

impl Mover {
    /// Достижима ли точка: путь есть, полный и в пределах бюджета.
    /// Без side effects.
    pub fn can_move_to(&self, navmesh: &dyn NavigationMesh, from: Vec3, destination: Vec3) -> bool {
        let Some(path) = navmesh.find_path(from, destination) else {
            return false;
        };
        if !path.complete {
            return false;
        }
        if path.length() > self.max_path_length {
            return false;
        }
        true
    }

    /// Регистрирует movement как текущий exclusive action (вытесняя,
    /// например, combat), затем коммитит destination и снимает паузу.
    pub fn start_move_action(
        &self,
        entity: Entity,
        destination: Vec3,
        scheduler: &mut ActionScheduler,
        agent: &mut NavAgent,
        interrupts: &mut EventWriter<ActionInterrupted>,
    ) {
        switch_action(entity, ActionKind::Movement, scheduler, agent, interrupts);
        agent.move_to(destination);
    }

    /// Cancel текущего движения: пауза агента на месте
    pub fn cancel(agent: &mut NavAgent) {
        agent.pause();
    }
}

/// Параметр animation driver'а (аналог `ForwardSpeed` у Animator)
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct AnimationDriver {
    /// Проекция velocity агента на локальную forward ось актора
    pub forward_speed: f32,
}

/// Per-tick состояние Mover'а:
/// - мёртвый актор выключает агент (труп не продолжает pathing);
/// - velocity агента безусловно проецируется в animation параметр.
pub fn sync_mover_state(
    mut movers: Query<(&Health, &Transform, &mut NavAgent, &mut AnimationDriver), With<Mover>>,
) {
    for (health, transform, mut agent, mut animation) in movers.iter_mut() {
        agent.enabled = health.is_alive();

        let forward = *transform.forward();
        animation.forward_speed = agent.velocity.dot(forward);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement::navmesh::{NavMeshPath, PlanarNavMesh};

    #[test]
    fn test_can_move_to_within_budget() {
        let mesh = PlanarNavMesh::single(Vec2::splat(-100.0), Vec2::splat(100.0));
        let mover = Mover {
            max_path_length: 40.0,
        };

        assert!(mover.can_move_to(&mesh, Vec3::ZERO, Vec3::new(30.0, 0.0, 0.0)));
    }

    #[test]
    fn test_can_move_to_rejects_over_budget() {
        let mesh = PlanarNavMesh::single(Vec2::splat(-100.0), Vec2::splat(100.0));
        let mover = Mover {
            max_path_length: 40.0,
        };

        assert!(!mover.can_move_to(&mesh, Vec3::ZERO, Vec3::new(50.0, 0.0, 0.0)));
    }

    #[test]
    fn test_can_move_to_rejects_partial_path() {
        // Два несвязных острова
        let mesh = PlanarNavMesh::new(
            0.0,
            vec![
                crate::movement::navmesh::WalkableArea {
                    min: Vec2::splat(-10.0),
                    max: Vec2::splat(10.0),
                },
                crate::movement::navmesh::WalkableArea {
                    min: Vec2::new(20.0, -10.0),
                    max: Vec2::new(30.0, 10.0),
                },
            ],
        );
        let mover = Mover::default();

        assert!(!mover.can_move_to(&mesh, Vec3::ZERO, Vec3::new(25.0, 0.0, 0.0)));
    }

    #[test]
    fn test_can_move_to_rejects_missing_path() {
        struct NoPath;

        impl NavigationMesh for NoPath {
            fn sample_position(&self, _point: Vec3, _max_distance: f32) -> Option<Vec3> {
                None
            }

            fn find_path(&self, _from: Vec3, _to: Vec3) -> Option<NavMeshPath> {
                None
            }
        }

        let mover = Mover::default();
        assert!(!mover.can_move_to(&NoPath, Vec3::ZERO, Vec3::ONE));
    }
}

//! Навигационный агент: следование по пути, пауза, arrival
//!
//! Stand-in для engine NavMeshAgent: каждый тик путь перезапрашивается у
//! navmesh и transform шагает по corner'ам с фиксированной скоростью.
//! Команды, выданные контроллером в этот тик, подхватываются этим же
//! проходом (движение начинается «на этом тике или позже»).

use bevy::prelude::*;

use crate::action::{ActionKind, ActionScheduler};

use super::navmesh::NavMesh;

/// Навигационный агент актора
#[derive(Component, Debug, Clone)]
pub struct NavAgent {
    /// false = агент полностью выключен (мёртвый актор, телепорт)
    pub enabled: bool,
    /// true = пауза на месте (Cancel), destination сохраняется host'ом как сброшенный
    pub stopped: bool,
    /// Скорость движения (m/s)
    pub speed: f32,
    /// Текущая world-space velocity (пишется driving-проходом)
    pub velocity: Vec3,
    pub destination: Option<Vec3>,
    /// Радиус, в котором цель считается достигнутой
    pub arrival_threshold: f32,
}

impl Default for NavAgent {
    fn default() -> Self {
        Self {
            enabled: true,
            stopped: false,
            speed: 3.5, // скорость ходьбы
            velocity: Vec3::ZERO,
            destination: None,
            arrival_threshold: 0.1,
        }
    }
}

impl NavAgent {
    /// Коммит destination + снятие паузы
    pub fn move_to(&mut self, destination: Vec3) {
        self.destination = Some(destination);
        self.stopped = false;
    }

    /// Пауза на месте (вызывается при вытеснении movement action)
    pub fn pause(&mut self) {
        self.stopped = true;
        self.velocity = Vec3::ZERO;
    }
}

/// Driving-проход: перезапрос пути и шаг по corner'ам
///
/// Выполняется каждый тик для всех агентов. Выключенный или стоящий на
/// паузе агент держит нулевую velocity.
pub fn drive_nav_agents(
    time: Res<Time<Fixed>>,
    navmesh: Res<NavMesh>,
    mut agents: Query<(&mut NavAgent, &mut Transform, Option<&mut ActionScheduler>)>,
) {
    let delta = time.delta_secs();

    for (mut agent, mut transform, scheduler) in agents.iter_mut() {
        if !agent.enabled || agent.stopped {
            agent.velocity = Vec3::ZERO;
            continue;
        }

        let Some(destination) = agent.destination else {
            agent.velocity = Vec3::ZERO;
            continue;
        };

        // Путь перезапрашивается каждый тик — persistent состояния пути нет
        let Some(path) = navmesh.mesh().find_path(transform.translation, destination) else {
            agent.velocity = Vec3::ZERO;
            continue;
        };

        // corners[0] — текущая позиция
        let Some(&next) = path.corners.get(1) else {
            finish_move(&mut agent, scheduler);
            continue;
        };

        let to_next = next - transform.translation;
        let distance = to_next.length();

        let last_corner = path.corners.len() == 2;
        if distance <= agent.arrival_threshold && last_corner {
            // Partial path тоже завершается на своём последнем corner'е
            transform.translation = next;
            finish_move(&mut agent, scheduler);
            continue;
        }

        if distance <= f32::EPSILON {
            continue;
        }

        let direction = to_next / distance;
        let step = agent.speed * delta;

        if distance <= step {
            transform.translation = next;
        } else {
            transform.translation += direction * step;
        }
        agent.velocity = direction * agent.speed;

        // Актор разворачивается по ходу движения (нужно для projection
        // velocity на локальную forward ось в animation driver)
        let face_target = transform.translation + direction;
        transform.look_at(face_target, Vec3::Y);
    }
}

fn finish_move(agent: &mut NavAgent, scheduler: Option<Mut<'_, ActionScheduler>>) {
    agent.destination = None;
    agent.velocity = Vec3::ZERO;
    if let Some(mut scheduler) = scheduler {
        scheduler.finish_action(ActionKind::Movement);
    }
}

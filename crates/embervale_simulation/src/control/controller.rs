//! Pointer controller: приоритетная цепочка взаимодействий
//!
//! Строгий порядок на тик:
//! 1. указатель над interface chrome → курсор UI, тик закончен;
//! 2. мёртвый актор → нейтральный курсор, тик закончен;
//! 3. interactable поверхности по возрастанию дистанции, первый handler
//!    который consumed — победил;
//! 4. movement interaction (ray → navmesh sample → бюджет пути);
//! 5. ничего не подошло → нейтральный курсор.
//!
//! Камера и указатель — инъецированные провайдеры (никаких глобальных
//! Camera.main / Input lookup'ов), контроллер тестируется headless.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use crate::action::{ActionInterrupted, ActionScheduler};
use crate::components::{Health, Player};
use crate::movement::{Mover, NavAgent, NavMesh};

use super::cursor::{CursorPresenter, CursorType};
use super::raycastable::{Interactable, InteractionContext};

/// Состояние указателя. Пишется host'ом (или тестом) каждый кадр —
/// тот же приём, что mock input через компонент.
#[derive(Resource, Debug, Clone, Default)]
pub struct PointerState {
    /// Позиция указателя в пикселях экрана
    pub screen_position: Vec2,
    /// true = указатель сейчас над interface chrome (UI перехватывает всё)
    pub over_chrome: bool,
    /// Зажата ли основная кнопка
    pub primary_held: bool,
}

/// Луч из камеры через позицию указателя (world space)
#[derive(Debug, Clone, Copy)]
pub struct PointerRay {
    pub origin: Vec3,
    /// Нормализованное направление
    pub direction: Vec3,
}

/// Провайдер camera pose: экранная позиция указателя → world-space луч
pub trait CameraRig: Send + Sync {
    fn pointer_ray(&self, screen_position: Vec2) -> PointerRay;
}

#[derive(Resource)]
pub struct PointerCamera(pub Box<dyn CameraRig>);

impl Default for PointerCamera {
    fn default() -> Self {
        Self(Box::new(OverheadCamera::default()))
    }
}

/// Perspective камера над сценой — shipped реализация `CameraRig`
pub struct OverheadCamera {
    pub position: Vec3,
    /// Нормализованное направление взгляда
    pub forward: Vec3,
    pub up: Vec3,
    /// Вертикальный FOV в радианах
    pub fov_y: f32,
    /// Размер viewport'а в пикселях
    pub viewport: Vec2,
}

impl OverheadCamera {
    pub fn looking_at(position: Vec3, target: Vec3, viewport: Vec2) -> Self {
        let forward = (target - position).normalize_or_zero();
        Self {
            position,
            forward,
            up: Vec3::Y,
            fov_y: std::f32::consts::FRAC_PI_4,
            viewport,
        }
    }
}

impl Default for OverheadCamera {
    fn default() -> Self {
        Self::looking_at(
            Vec3::new(0.0, 12.0, 8.0),
            Vec3::ZERO,
            Vec2::new(1280.0, 720.0),
        )
    }
}

impl CameraRig for OverheadCamera {
    fn pointer_ray(&self, screen_position: Vec2) -> PointerRay {
        // Экранные координаты: (0,0) — левый верхний угол
        let ndc = Vec2::new(
            (screen_position.x / self.viewport.x) * 2.0 - 1.0,
            1.0 - (screen_position.y / self.viewport.y) * 2.0,
        );

        let right = self.forward.cross(self.up).normalize_or_zero();
        let up = right.cross(self.forward).normalize_or_zero();
        let half_height = (self.fov_y * 0.5).tan();
        let aspect = self.viewport.x / self.viewport.y;

        let direction = (self.forward
            + right * ndc.x * half_height * aspect
            + up * ndc.y * half_height)
            .normalize_or_zero();

        PointerRay {
            origin: self.position,
            direction,
        }
    }
}

/// Параметры контроллера
#[derive(Resource, Debug, Clone)]
pub struct ControllerConfig {
    /// Радиус probe сферы (широкий zацеп вместо тонкого луча)
    pub sphere_cast_radius: f32,
    /// Максимальная дистанция проекции hit point'а на navmesh
    pub max_projection_distance: f32,
    /// Верхний предел числа поверхностей за один sphere-cast
    pub max_pointer_hits: usize,
    /// Дальность лучей указателя
    pub max_ray_distance: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            sphere_cast_radius: 1.0,
            max_projection_distance: 1.0,
            max_pointer_hits: 16,
            max_ray_distance: 1000.0,
        }
    }
}

/// Приоритетная цепочка pointer взаимодействий (system, каждый тик)
pub fn interact_with_pointer(
    rapier: ReadRapierContext,
    pointer: Res<PointerState>,
    camera: Res<PointerCamera>,
    config: Res<ControllerConfig>,
    navmesh: Res<NavMesh>,
    mut presenter: ResMut<CursorPresenter>,
    mut players: Query<
        (
            Entity,
            &Health,
            &Mover,
            &Transform,
            &mut ActionScheduler,
            &mut NavAgent,
        ),
        With<Player>,
    >,
    interactables: Query<&Interactable>,
    mut interrupts: EventWriter<ActionInterrupted>,
) {
    // 1. Interface chrome перехватывает всё остальное
    if pointer.over_chrome {
        presenter.set_cursor(CursorType::Ui);
        return;
    }

    let Ok((player, health, mover, transform, mut scheduler, mut agent)) = players.single_mut()
    else {
        return;
    };

    // 2. Мёртвый актор: нейтральный курсор, тик consumed
    if health.is_dead() {
        presenter.set_cursor(CursorType::None);
        return;
    }

    let Ok(context) = rapier.single() else {
        return;
    };
    let ray = camera.0.pointer_ray(pointer.screen_position);

    // 3. Interactable поверхности, ближайшая первой
    let interaction = InteractionContext {
        player,
        primary_held: pointer.primary_held,
    };
    for (surface, _distance) in sphere_cast_all(&context, &ray, &config) {
        let Ok(interactable) = interactables.get(surface) else {
            // Поверхность без handler'ов пропускается молча
            continue;
        };
        for handler in interactable.handlers() {
            if handler.handle_raycast(&interaction) {
                presenter.set_cursor(handler.cursor_type());
                return;
            }
        }
    }

    // 4. Movement interaction
    if let Some(destination) = project_pointer_to_navmesh(&context, &ray, &navmesh, &config) {
        if mover.can_move_to(navmesh.mesh(), transform.translation, destination) {
            // Команда — только пока кнопка зажата; курсор — в любом случае
            if pointer.primary_held {
                mover.start_move_action(
                    player,
                    destination,
                    &mut scheduler,
                    &mut agent,
                    &mut interrupts,
                );
            }
            presenter.set_cursor(CursorType::Movement);
            return;
        }
        // Недостижимая точка = not handled, проваливаемся к шагу 5
    }

    // 5. Ничего не подошло
    presenter.set_cursor(CursorType::None);
}

/// Все поверхности, пересечённые probe-сферой вдоль луча, по возрастанию
/// дистанции.
///
/// Rapier отдаёт только ближайший shape-cast hit, поэтому каст повторяется
/// с исключением уже найденных поверхностей.
fn sphere_cast_all(
    context: &RapierContext,
    ray: &PointerRay,
    config: &ControllerConfig,
) -> Vec<(Entity, f32)> {
    let probe = Collider::ball(config.sphere_cast_radius);
    let mut hits: Vec<(Entity, f32)> = Vec::new();

    while hits.len() < config.max_pointer_hits {
        let seen: Vec<Entity> = hits.iter().map(|(entity, _)| *entity).collect();
        let not_seen = |entity: Entity| !seen.contains(&entity);
        let filter = QueryFilter::new().predicate(&not_seen);
        let options = ShapeCastOptions::with_max_time_of_impact(config.max_ray_distance);

        let Some((entity, hit)) = context.cast_shape(
            ray.origin,
            Quat::IDENTITY,
            ray.direction,
            &*probe.raw,
            options,
            filter,
        ) else {
            break;
        };

        hits.push((entity, hit.time_of_impact));
    }

    // Stable сортировка; равные дистанции сохраняют порядок обнаружения
    hits.sort_by(|a, b| a.1.total_cmp(&b.1));
    hits
}

/// Тонкий луч в сцену + проекция hit point'а на navmesh
fn project_pointer_to_navmesh(
    context: &RapierContext,
    ray: &PointerRay,
    navmesh: &NavMesh,
    config: &ControllerConfig,
) -> Option<Vec3> {
    let (_surface, time_of_impact) = context.cast_ray(
        ray.origin,
        ray.direction,
        config.max_ray_distance,
        true,
        QueryFilter::new(),
    )?;

    let point = ray.origin + ray.direction * time_of_impact;
    navmesh.mesh().sample_position(point, config.max_projection_distance)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overhead_camera_center_ray_points_forward() {
        let camera = OverheadCamera::looking_at(
            Vec3::new(0.0, 10.0, 0.0),
            Vec3::ZERO,
            Vec2::new(1280.0, 720.0),
        );

        let ray = camera.pointer_ray(Vec2::new(640.0, 360.0));
        assert!((ray.direction - Vec3::NEG_Y).length() < 1e-4);
        assert_eq!(ray.origin, Vec3::new(0.0, 10.0, 0.0));
    }

    #[test]
    fn test_overhead_camera_edge_rays_diverge() {
        let camera = OverheadCamera::default();

        let left = camera.pointer_ray(Vec2::new(0.0, 360.0));
        let right = camera.pointer_ray(Vec2::new(1280.0, 360.0));
        assert!(left.direction.x < right.direction.x);
    }
}

//! Headless демо EMBERVALE
//!
//! Скриптует указатель: зажатая кнопка над землёй — актор идёт к точке,
//! наведение на сундук — cursor категория от его handler'а.

use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;
use embervale_simulation::*;

/// Сундук с лутом: всегда заявляет interaction, курсор Pickup
struct LootHandler;

impl RaycastHandler for LootHandler {
    fn handle_raycast(&self, _interaction: &InteractionContext) -> bool {
        true
    }

    fn cursor_type(&self) -> CursorType {
        CursorType::Pickup
    }
}

fn main() {
    let mut app = create_headless_app();
    app.add_plugins(SimulationPlugin);

    // Сцена: walkable плоскость 100×100 + overhead камера над origin
    app.insert_resource(NavMesh::new(PlanarNavMesh::single(
        Vec2::splat(-50.0),
        Vec2::splat(50.0),
    )));
    app.insert_resource(PointerCamera(Box::new(OverheadCamera::looking_at(
        Vec3::new(0.0, 15.0, 0.01),
        Vec3::ZERO,
        Vec2::new(1280.0, 720.0),
    ))));

    // Земля (коллайдер, чтобы pointer ray имел поверхность)
    app.world_mut().spawn((
        Transform::from_translation(Vec3::new(0.0, -0.1, 0.0)),
        Collider::cuboid(50.0, 0.1, 50.0),
    ));

    // Сундук рядом с центром
    app.world_mut().spawn((
        Transform::from_translation(Vec3::new(3.0, 0.5, 0.0)),
        Collider::cuboid(0.5, 0.5, 0.5),
        Interactable::new().with_handler(LootHandler),
    ));

    // Игрок в стороне от точки клика
    let player = app
        .world_mut()
        .spawn((
            Player,
            Actor::default(),
            Health::new(100),
            Mover::default(),
            NavAgent::default(),
            ActionScheduler::default(),
            AnimationDriver::default(),
            Experience::default(),
            Transform::from_translation(Vec3::new(-8.0, 0.0, -8.0)),
        ))
        .id();

    // Зажимаем кнопку в центре экрана: ray уходит примерно в origin
    app.insert_resource(PointerState {
        screen_position: Vec2::new(640.0, 360.0),
        over_chrome: false,
        primary_held: true,
    });

    println!("Starting EMBERVALE headless demo");

    for tick in 0..300 {
        app.update();

        if tick % 60 == 0 {
            let position = app
                .world()
                .get::<Transform>(player)
                .map(|transform| transform.translation)
                .unwrap_or(Vec3::ZERO);
            let cursor = app.world().resource::<CursorPresenter>().current();
            println!("Tick {}: position {:?}, cursor {:?}", tick, position, cursor);
        }
    }

    let experience = app
        .world()
        .get::<Experience>(player)
        .map(|ledger| ledger.points())
        .unwrap_or(0.0);
    println!("Demo complete, experience: {}", experience);
}

//! Контракт навигационной поверхности (navmesh)
//!
//! Генерация navmesh и pathfinding — территория host-движка, здесь только
//! контракт потребления: сэмплирование walkable поверхности и запрос пути.
//! `PlanarNavMesh` — плоский stand-in (прямоугольные острова, прямые пути)
//! для headless запусков и тестов.

use bevy::prelude::*;

/// Упорядоченная последовательность corner'ов выполнимого маршрута
#[derive(Debug, Clone, PartialEq)]
pub struct NavMeshPath {
    pub corners: Vec<Vec3>,
    /// false = путь обрывается, не доходя до цели (partial path)
    pub complete: bool,
}

impl NavMeshPath {
    /// Сумма евклидовых расстояний между последовательными corner'ами.
    /// 0 или 1 corner → длина 0.
    pub fn length(&self) -> f32 {
        self.corners
            .windows(2)
            .map(|pair| pair[0].distance(pair[1]))
            .sum()
    }
}

/// Engine-owned навигация, инъецируется ресурсом `NavMesh`
pub trait NavigationMesh: Send + Sync {
    /// Ближайшая точка walkable поверхности в пределах `max_distance` от `point`
    fn sample_position(&self, point: Vec3, max_distance: f32) -> Option<Vec3>;

    /// Маршрут from → to по walkable поверхности. None = старт вне поверхности.
    fn find_path(&self, from: Vec3, to: Vec3) -> Option<NavMeshPath>;
}

#[derive(Resource)]
pub struct NavMesh(Box<dyn NavigationMesh>);

impl NavMesh {
    pub fn new(mesh: impl NavigationMesh + 'static) -> Self {
        Self(Box::new(mesh))
    }

    pub fn mesh(&self) -> &dyn NavigationMesh {
        self.0.as_ref()
    }
}

impl Default for NavMesh {
    fn default() -> Self {
        // 200×200 плоскость на y=0, пока host не подложил настоящий navmesh
        Self::new(PlanarNavMesh::single(Vec2::splat(-100.0), Vec2::splat(100.0)))
    }
}

/// Прямоугольный walkable остров в плоскости XZ
#[derive(Debug, Clone, Copy)]
pub struct WalkableArea {
    pub min: Vec2,
    pub max: Vec2,
}

impl WalkableArea {
    pub fn contains(&self, xz: Vec2) -> bool {
        xz.x >= self.min.x && xz.x <= self.max.x && xz.y >= self.min.y && xz.y <= self.max.y
    }

    pub fn clamp(&self, xz: Vec2) -> Vec2 {
        xz.clamp(self.min, self.max)
    }
}

/// Плоский navmesh: набор walkable островов на одной высоте.
///
/// Пути внутри острова — прямые (без огибания препятствий, это работа
/// host-навигации). Путь на другой остров обрывается на границе своего
/// (partial path), что даёт несвязность для проверок достижимости.
pub struct PlanarNavMesh {
    pub surface_height: f32,
    pub areas: Vec<WalkableArea>,
}

impl PlanarNavMesh {
    pub fn new(surface_height: f32, areas: Vec<WalkableArea>) -> Self {
        Self {
            surface_height,
            areas,
        }
    }

    /// Один остров на высоте 0
    pub fn single(min: Vec2, max: Vec2) -> Self {
        Self::new(0.0, vec![WalkableArea { min, max }])
    }

    fn area_of(&self, point: Vec3) -> Option<usize> {
        let xz = Vec2::new(point.x, point.z);
        self.areas.iter().position(|area| area.contains(xz))
    }
}

impl NavigationMesh for PlanarNavMesh {
    fn sample_position(&self, point: Vec3, max_distance: f32) -> Option<Vec3> {
        let xz = Vec2::new(point.x, point.z);

        let mut best: Option<Vec3> = None;
        let mut best_distance = f32::INFINITY;

        for area in &self.areas {
            let clamped = area.clamp(xz);
            let candidate = Vec3::new(clamped.x, self.surface_height, clamped.y);
            let distance = point.distance(candidate);
            if distance < best_distance {
                best_distance = distance;
                best = Some(candidate);
            }
        }

        best.filter(|_| best_distance <= max_distance)
    }

    fn find_path(&self, from: Vec3, to: Vec3) -> Option<NavMeshPath> {
        let from_area = self.area_of(from)?;
        let surface = |xz: Vec2| Vec3::new(xz.x, self.surface_height, xz.y);

        match self.area_of(to) {
            Some(to_area) if to_area == from_area => Some(NavMeshPath {
                corners: vec![from, to],
                complete: true,
            }),
            // Цель вне острова: путь обрывается на границе (partial path)
            _ => {
                let edge = self.areas[from_area].clamp(Vec2::new(to.x, to.z));
                Some(NavMeshPath {
                    corners: vec![from, surface(edge)],
                    complete: false,
                })
            }
        }
    }
}

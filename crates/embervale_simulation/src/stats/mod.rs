//! Experience ledger
//!
//! Скаляр опыта принадлежит исключительно этому домену: мутация только
//! через `ExperienceAward` event, notification (`ExperienceGained`)
//! отправляется строго после обновления значения, ровно одна на award.

use bevy::prelude::*;

use crate::GameplaySet;

/// Накопленный опыт актора. Только растёт; верхней границы нет.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Experience {
    points: f32,
}

impl Experience {
    pub fn points(&self) -> f32 {
        self.points
    }

    fn gain(&mut self, amount: f32) {
        self.points += amount;
    }

    /// Прямая перезапись при restore (без notification)
    pub(crate) fn overwrite(&mut self, points: f32) {
        self.points = points;
    }
}

/// Запрос на начисление опыта. `amount` предполагается неотрицательным
/// (источники начислений не выдают отрицательных значений; не валидируется).
#[derive(Event, Debug, Clone, Copy)]
pub struct ExperienceAward {
    pub entity: Entity,
    pub amount: f32,
}

/// Notification: опыт начислен, `points` — новый total
#[derive(Event, Debug, Clone, Copy)]
pub struct ExperienceGained {
    pub entity: Entity,
    pub points: f32,
}

/// Начисление опыта из событий
pub fn award_experience(
    mut awards: EventReader<ExperienceAward>,
    mut ledgers: Query<&mut Experience>,
    mut gained: EventWriter<ExperienceGained>,
) {
    for award in awards.read() {
        let Ok(mut experience) = ledgers.get_mut(award.entity) else {
            continue;
        };

        experience.gain(award.amount);
        // Notification после обновления значения
        gained.write(ExperienceGained {
            entity: award.entity,
            points: experience.points(),
        });
    }
}

/// Stats Plugin
pub struct StatsPlugin;

impl Plugin for StatsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ExperienceAward>()
            .add_event::<ExperienceGained>()
            .add_systems(FixedUpdate, award_experience.in_set(GameplaySet::Stats));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn award_app() -> App {
        let mut app = App::new();
        app.add_event::<ExperienceAward>()
            .add_event::<ExperienceGained>()
            .add_systems(Update, award_experience);
        app
    }

    fn read_gained(app: &App) -> Vec<ExperienceGained> {
        let events = app.world().resource::<Events<ExperienceGained>>();
        let mut cursor = events.get_cursor();
        cursor.read(events).copied().collect()
    }

    #[test]
    fn test_gain_increases_by_exact_amount() {
        let mut app = award_app();
        let entity = app.world_mut().spawn(Experience::default()).id();

        app.world_mut().send_event(ExperienceAward {
            entity,
            amount: 25.0,
        });
        app.update();

        app.world_mut().send_event(ExperienceAward {
            entity,
            amount: 12.5,
        });
        app.update();

        let experience = app.world().get::<Experience>(entity).unwrap();
        assert_eq!(experience.points(), 37.5);
    }

    #[test]
    fn test_exactly_one_notification_per_award() {
        let mut app = award_app();
        let entity = app.world_mut().spawn(Experience::default()).id();

        app.world_mut().send_event(ExperienceAward {
            entity,
            amount: 10.0,
        });
        app.world_mut().send_event(ExperienceAward {
            entity,
            amount: 5.0,
        });
        app.update();

        let gained = read_gained(&app);
        assert_eq!(gained.len(), 2);
        // Каждый notification несёт total ПОСЛЕ своего начисления
        assert_eq!(gained[0].points, 10.0);
        assert_eq!(gained[1].points, 15.0);
    }

    #[test]
    fn test_award_to_missing_entity_is_skipped() {
        let mut app = award_app();
        let entity = app.world_mut().spawn_empty().id();

        app.world_mut().send_event(ExperienceAward {
            entity,
            amount: 10.0,
        });
        app.update();

        assert!(read_gained(&app).is_empty());
    }
}

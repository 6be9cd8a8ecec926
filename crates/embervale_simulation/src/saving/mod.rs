//! Типизированный persistence contract
//!
//! Вместо untyped opaque blob'ов — закрытая сумма `ComponentState` per
//! persistable компонент: несовпадение формы ловится на restore, а не
//! молчаливо ломает загрузку.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::movement::NavAgent;
use crate::stats::Experience;

/// Сериализуемое состояние persistable компонента
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ComponentState {
    /// Позиция актора (Mover)
    MoverPosition { position: [f32; 3] },
    /// Сырой скаляр опыта (Experience)
    ExperiencePoints { points: f32 },
}

#[derive(Debug, Error, PartialEq)]
pub enum RestoreError {
    #[error("state variant does not match component: {0:?}")]
    VariantMismatch(ComponentState),
}

/// Capture состояния Mover'а: текущая позиция
pub fn capture_mover(transform: &Transform) -> ComponentState {
    ComponentState::MoverPosition {
        position: transform.translation.to_array(),
    }
}

/// Restore Mover'а: выключить агент → телепорт → включить обратно.
/// Живой агент сопротивляется прямой записи позиции, порядок обязателен.
pub fn restore_mover(
    state: ComponentState,
    agent: &mut NavAgent,
    transform: &mut Transform,
) -> Result<(), RestoreError> {
    let ComponentState::MoverPosition { position } = state else {
        return Err(RestoreError::VariantMismatch(state));
    };

    agent.enabled = false;
    agent.destination = None;
    agent.velocity = Vec3::ZERO;
    transform.translation = Vec3::from_array(position);
    agent.enabled = true;

    Ok(())
}

/// Capture опыта: сырой скаляр
pub fn capture_experience(experience: &Experience) -> ComponentState {
    ComponentState::ExperiencePoints {
        points: experience.points(),
    }
}

/// Restore опыта: прямая перезапись, notification НЕ отправляется
pub fn restore_experience(
    state: ComponentState,
    experience: &mut Experience,
) -> Result<(), RestoreError> {
    let ComponentState::ExperiencePoints { points } = state else {
        return Err(RestoreError::VariantMismatch(state));
    };

    experience.overwrite(points);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mover_roundtrip() {
        let original = Transform::from_translation(Vec3::new(3.5, 0.0, -7.25));
        let state = capture_mover(&original);

        let mut agent = NavAgent {
            destination: Some(Vec3::new(9.0, 0.0, 9.0)),
            velocity: Vec3::X,
            ..Default::default()
        };
        let mut transform = Transform::from_translation(Vec3::new(50.0, 0.0, 50.0));

        restore_mover(state, &mut agent, &mut transform).unwrap();

        assert!((transform.translation - original.translation).length() < 1e-6);
        // Агент включён обратно и не тянет актора к старой цели
        assert!(agent.enabled);
        assert_eq!(agent.destination, None);
        assert_eq!(agent.velocity, Vec3::ZERO);
    }

    #[test]
    fn test_experience_roundtrip_without_notification() {
        let mut experience = Experience::default();
        restore_experience(
            ComponentState::ExperiencePoints { points: 120.0 },
            &mut experience,
        )
        .unwrap();
        assert_eq!(experience.points(), 120.0);

        let state = capture_experience(&experience);
        assert_eq!(state, ComponentState::ExperiencePoints { points: 120.0 });
    }

    #[test]
    fn test_variant_mismatch_is_error() {
        let mut agent = NavAgent::default();
        let mut transform = Transform::default();

        let wrong = ComponentState::ExperiencePoints { points: 1.0 };
        let result = restore_mover(wrong.clone(), &mut agent, &mut transform);
        assert_eq!(result, Err(RestoreError::VariantMismatch(wrong)));

        let mut experience = Experience::default();
        let wrong = ComponentState::MoverPosition {
            position: [0.0; 3],
        };
        assert!(restore_experience(wrong, &mut experience).is_err());
    }
}

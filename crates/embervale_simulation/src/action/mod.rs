//! Action exclusivity — один mutually-exclusive action на актора
//!
//! Movement и combat вытесняют друг друга, не зная друг о друге:
//! scheduler отменяет вытесненный action сам. Закрытая сумма `ActionKind`
//! вместо динамического `IAction` — виды action'ов известны при компиляции.

use bevy::prelude::*;

use crate::movement::NavAgent;

/// Вид exclusive action'а
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionKind {
    #[default]
    Idle,
    Movement,
    Combat,
}

/// Per-actor scheduler: помнит текущий exclusive action
#[derive(Component, Debug, Clone, Default)]
pub struct ActionScheduler {
    current: ActionKind,
}

impl ActionScheduler {
    pub fn current(&self) -> ActionKind {
        self.current
    }

    /// Регистрирует новый exclusive action.
    /// Возвращает вытесненный action (его нужно отменить), если он был.
    pub fn start_action(&mut self, next: ActionKind) -> Option<ActionKind> {
        let previous = self.current;
        self.current = next;
        (previous != ActionKind::Idle && previous != next).then_some(previous)
    }

    /// Завершение action'а по его собственной инициативе (например, arrival)
    pub fn finish_action(&mut self, kind: ActionKind) {
        if self.current == kind {
            self.current = ActionKind::Idle;
        }
    }
}

/// Event: exclusive action вытеснен другим.
/// Combat домен реагирует на него сам — mover о combat не знает.
#[derive(Event, Debug, Clone, Copy)]
pub struct ActionInterrupted {
    pub entity: Entity,
    pub interrupted: ActionKind,
    pub by: ActionKind,
}

/// Переключение exclusive action'а с отменой вытесненного
pub fn switch_action(
    entity: Entity,
    next: ActionKind,
    scheduler: &mut ActionScheduler,
    agent: &mut NavAgent,
    interrupts: &mut EventWriter<ActionInterrupted>,
) {
    let Some(interrupted) = scheduler.start_action(next) else {
        return;
    };

    match interrupted {
        // Cancel движения — пауза агента на месте
        ActionKind::Movement => agent.pause(),
        ActionKind::Combat => {
            interrupts.write(ActionInterrupted {
                entity,
                interrupted,
                by: next,
            });
        }
        ActionKind::Idle => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_action_returns_preempted() {
        let mut scheduler = ActionScheduler::default();

        // Idle ничего не вытесняет
        assert_eq!(scheduler.start_action(ActionKind::Combat), None);
        assert_eq!(scheduler.current(), ActionKind::Combat);

        // Movement вытесняет combat
        assert_eq!(
            scheduler.start_action(ActionKind::Movement),
            Some(ActionKind::Combat)
        );
        assert_eq!(scheduler.current(), ActionKind::Movement);
    }

    #[test]
    fn test_restart_same_action_is_not_preemption() {
        let mut scheduler = ActionScheduler::default();

        scheduler.start_action(ActionKind::Movement);
        assert_eq!(scheduler.start_action(ActionKind::Movement), None);
    }

    #[test]
    fn test_finish_action_only_clears_own_kind() {
        let mut scheduler = ActionScheduler::default();
        scheduler.start_action(ActionKind::Movement);

        // Чужой finish игнорируется
        scheduler.finish_action(ActionKind::Combat);
        assert_eq!(scheduler.current(), ActionKind::Movement);

        scheduler.finish_action(ActionKind::Movement);
        assert_eq!(scheduler.current(), ActionKind::Idle);
    }
}

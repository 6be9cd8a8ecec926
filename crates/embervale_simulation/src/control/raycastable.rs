//! Interaction handler contract
//!
//! Любая поверхность сцены может нести ноль и больше handler'ов.
//! Контроллер зависит только от этого контракта, не от конкретных
//! handler'ов — единственная точка полиморфизма системы.

use bevy::prelude::*;

use super::cursor::CursorType;

/// Контекст pointer interaction, передаётся handler'у
#[derive(Debug, Clone, Copy)]
pub struct InteractionContext {
    /// Актор, от имени которого идёт взаимодействие
    pub player: Entity,
    /// Зажата ли основная кнопка указателя в этот тик
    pub primary_held: bool,
}

/// Attached capability на сцене: может заявить pointer interaction
/// и объявить категорию курсора для отображения
pub trait RaycastHandler: Send + Sync {
    /// true = interaction consumed, сканирование прекращается полностью
    fn handle_raycast(&self, interaction: &InteractionContext) -> bool;

    fn cursor_type(&self) -> CursorType;
}

/// Упорядоченный список handler'ов entity
///
/// Список собирается один раз при spawn'е (attachment order) — без
/// динамического discovery каждый тик. Пустой список пропускается молча.
#[derive(Component, Default)]
pub struct Interactable {
    handlers: Vec<Box<dyn RaycastHandler>>,
}

impl Interactable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handler(mut self, handler: impl RaycastHandler + 'static) -> Self {
        self.handlers.push(Box::new(handler));
        self
    }

    pub fn handlers(&self) -> impl Iterator<Item = &dyn RaycastHandler> {
        self.handlers.iter().map(|handler| handler.as_ref())
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ClaimAll;

    impl RaycastHandler for ClaimAll {
        fn handle_raycast(&self, _interaction: &InteractionContext) -> bool {
            true
        }

        fn cursor_type(&self) -> CursorType {
            CursorType::Pickup
        }
    }

    #[test]
    fn test_handlers_keep_attachment_order() {
        struct Tagged(CursorType);

        impl RaycastHandler for Tagged {
            fn handle_raycast(&self, _interaction: &InteractionContext) -> bool {
                false
            }

            fn cursor_type(&self) -> CursorType {
                self.0
            }
        }

        let interactable = Interactable::new()
            .with_handler(Tagged(CursorType::Combat))
            .with_handler(Tagged(CursorType::Pickup));

        let order: Vec<_> = interactable.handlers().map(|h| h.cursor_type()).collect();
        assert_eq!(order, vec![CursorType::Combat, CursorType::Pickup]);
    }

    #[test]
    fn test_empty_interactable() {
        let interactable = Interactable::new();
        assert!(interactable.is_empty());

        let full = interactable.with_handler(ClaimAll);
        assert!(!full.is_empty());
    }
}

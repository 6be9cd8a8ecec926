//! Control domain — pointer controller, cursor presenter, interaction contract
//!
//! Содержит:
//! - CursorType / CursorMapping / CursorPresenter (+ CursorHost seam)
//! - RaycastHandler contract + Interactable (список handler'ов per entity)
//! - interact_with_pointer (приоритетная цепочка) + провайдеры камеры/указателя

use bevy::prelude::*;

pub mod controller;
pub mod cursor;
pub mod raycastable;

pub use controller::*;
pub use cursor::*;
pub use raycastable::*;

use crate::GameplaySet;

/// Control Plugin
pub struct ControlPlugin;

impl Plugin for ControlPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PointerState>()
            .init_resource::<ControllerConfig>()
            .init_resource::<CursorPresenter>()
            .init_resource::<PointerCamera>()
            .add_systems(
                FixedUpdate,
                interact_with_pointer.in_set(GameplaySet::Control),
            );
    }
}

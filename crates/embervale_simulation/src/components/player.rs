//! Player control marker component

use bevy::prelude::Component;

/// Marker component для player-controlled entity
///
/// Pointer controller обрабатывает только акторов с этим компонентом
/// (`With<Player>` filter). В single-player режиме он обычно один.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Player;

use crate::ecs::component::Component;

/// Marks an entity as a player. A player reaching zero health loses the game.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Player;

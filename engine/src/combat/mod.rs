//! The combat capabilities an entity can carry, and the attack between two entities.
//!
//! - [`Name`]: an immutable, unique name; registers itself with the manager when built.
//! - [`Health`]: an atomically reduced health counter that raises the death notification.
//! - [`Player`]: a marker telling the manager whose death ends the game.
//! - [`AttackTimer`]: a background thread attacking a victim on a fixed interval.
//!
//! `Entity::attack` lives in [`attack`] and is what both the timers and the console call.

mod attack;
mod health;
mod name;
mod player;
mod timer;

pub use health::Health;
pub use name::Name;
pub use player::Player;
pub use timer::{AttackTimer, TimerStatus};

use crate::ecs::Entity;

/// A short label for log lines: the entity's name if it has one, its id otherwise.
pub(crate) fn label(entity: &Entity) -> String {
    entity
        .find_component::<Name>()
        .map(|name| name.to_string())
        .unwrap_or_else(|| entity.id().to_string())
}

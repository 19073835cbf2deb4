//! A small Entity-Component core driving a toy combat simulation.
//!
//! - [`ecs`]: component ids, per-entity slot arrays, entities and their manager.
//! - [`combat`]: the name, health, player and attack timer components plus `Entity::attack`.
//! - [`journal`]: where combat and death lines are written.
//! - [`scenario`]: the standard hero / orc / dragon skirmish.

// Lets `#[derive(Component)]` refer to `::skirmish_engine` from inside this crate as well.
extern crate self as skirmish_engine;

pub mod combat;
pub mod ecs;
pub mod journal;
pub mod scenario;

//! Benchmark utilities for the skirmish engine.
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Run all benchmarks
//! cargo bench -p skirmish_bench
//!
//! # Run specific benchmark group
//! cargo bench -p skirmish_bench -- attack
//! ```
//!
//! Results are written to `target/criterion/` with HTML reports for visualization.

use std::{sync::Arc, thread};

use skirmish_engine::{
    combat::{Health, Name},
    ecs::{Entity, EntityManager},
    journal::{Entry, Journal},
    scenario::DEFAULT_MAX_COMPONENTS,
};

/// A manager whose journal is consumed off the terminal, so benchmarks measure the engine, not
/// stdout.
///
/// Entries are drained by a background thread that ends once the manager is dropped.
pub fn quiet_manager() -> EntityManager {
    let (journal, entries) = Journal::with_receiver();
    thread::spawn(move || entries.iter().for_each(drop));
    EntityManager::with_journal(DEFAULT_MAX_COMPONENTS, journal)
}

/// Two named fighters with `health` each, ready to attack one another.
pub fn sparring_pair(manager: &EntityManager, health: u32) -> (Arc<Entity>, Arc<Entity>) {
    let fighter = |name: &str| {
        let entity = manager.create_entity();
        entity.add_component_with(|owner| Name::new(owner, name));
        entity.add_component_with(|owner| Health::new(owner, health));
        entity
    };
    let left = fighter("left");
    let right = fighter("right");
    (left, right)
}

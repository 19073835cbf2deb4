//! The EntityManager is the owner of every entity in a skirmish.
//!
//! An `EntityManager` creates entities, sizes their component slots, keeps the name → entity
//! lookup table that [`Name`] components fill in, and receives the death notification raised
//! by [`Health`](crate::combat::Health) when a player runs out of health.
//!
//! The manager is a cheap, cloneable handle around shared state. Entities only hold a weak
//! reference back to it, so dropping the last handle releases the entities too (unless an attack
//! timer thread is still holding on to some of them).
//!
//! # Example
//!
//! ```ignore
//! use skirmish_engine::ecs::EntityManager;
//!
//! let manager = EntityManager::new(5);
//! let orc = manager.create_entity();
//! orc.add_component_with(|owner| Name::new(owner, "orc"));
//!
//! assert!(manager.get_entity_by_name("orc").is_some());
//! assert!(manager.get_entity_by_name("troll").is_none());
//! ```

use std::{
    fmt,
    sync::{Arc, RwLock},
};

use dashmap::{DashMap, Entry};

use crate::{
    combat::{AttackTimer, Name, Player},
    ecs::entity::{self, Entity},
    journal::{self, Journal},
};

/// State shared by every handle to the same manager.
pub(crate) struct Shared {
    /// The number of component slots given to every entity.
    max_components: usize,

    /// Every entity ever created, in creation order.
    entities: RwLock<Vec<Arc<Entity>>>,

    /// Entities by name. Filled in as `Name` components are attached.
    names: DashMap<String, Arc<Entity>>,

    /// Where combat and death lines go.
    journal: Journal,
}

/// Owner of all entities, their name table, and the death notification.
#[derive(Clone)]
pub struct EntityManager {
    shared: Arc<Shared>,
}

impl EntityManager {
    /// Create a manager whose entities have `max_components` slots, writing to stdout.
    pub fn new(max_components: usize) -> Self {
        Self::with_journal(max_components, Journal::stdout())
    }

    /// Create a manager whose entities have `max_components` slots, writing to `journal`.
    pub fn with_journal(max_components: usize, journal: Journal) -> Self {
        Self {
            shared: Arc::new(Shared {
                max_components,
                entities: RwLock::new(Vec::new()),
                names: DashMap::new(),
                journal,
            }),
        }
    }

    pub(crate) fn from_shared(shared: Arc<Shared>) -> Self {
        Self { shared }
    }

    /// The number of component slots every entity of this manager gets.
    #[inline]
    pub fn max_components_count(&self) -> usize {
        self.shared.max_components
    }

    /// The journal this manager's entities write to.
    #[inline]
    pub fn journal(&self) -> &Journal {
        &self.shared.journal
    }

    /// Create a new entity with empty slots. The manager keeps it for its whole lifetime.
    pub fn create_entity(&self) -> Arc<Entity> {
        let mut entities = self.shared.entities.write().unwrap();
        let id = entity::Id::from(entities.len() as u32);
        let entity = Arc::new(Entity::new(
            id,
            Arc::downgrade(&self.shared),
            self.shared.max_components,
        ));
        entities.push(Arc::clone(&entity));
        log::debug!("created entity {}", id);
        entity
    }

    /// Record `entity` under `name` in the lookup table.
    ///
    /// Called by [`Name::new`]. Panics if another entity already uses `name`.
    pub fn register_name(&self, name: &str, entity: &Arc<Entity>) {
        match self.shared.names.entry(name.to_owned()) {
            Entry::Occupied(occupied) => panic!(
                "entity name '{}' is already registered to entity {}",
                name,
                occupied.get().id()
            ),
            Entry::Vacant(vacant) => {
                vacant.insert(Arc::clone(entity));
                log::debug!("registered name '{}' for entity {}", name, entity.id());
            }
        }
    }

    /// Look up an entity by the name its [`Name`] component registered.
    #[inline]
    pub fn get_entity_by_name(&self, name: &str) -> Option<Arc<Entity>> {
        self.shared
            .names
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
    }

    /// Death notification, raised once when a player's health reaches zero.
    ///
    /// Writes `Player <name> lost the game.` for entities carrying both [`Player`] and
    /// [`Name`]; does nothing for anything else.
    pub fn entity_died(&self, entity: &Entity) {
        if !entity.has_component::<Player>() {
            return;
        }
        let Some(name) = entity.find_component::<Name>() else {
            log::debug!("unnamed player {} died", entity.id());
            return;
        };
        log::info!("player '{}' died", name);
        self.shared.journal.record(journal::Entry::PlayerLost {
            player: name.to_string(),
        });
    }

    /// A snapshot of every entity created so far, in creation order.
    pub fn entities(&self) -> Vec<Arc<Entity>> {
        self.shared.entities.read().unwrap().clone()
    }

    /// The number of entities created so far.
    pub fn len(&self) -> usize {
        self.shared.entities.read().unwrap().len()
    }

    /// Check if no entity has been created yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Cancel every attack timer and wait for their threads to finish.
    ///
    /// Timers are otherwise fire-and-forget; this is the cooperative way to wind a skirmish
    /// down before the process exits.
    pub fn stop_timers(&self) {
        let timers: Vec<_> = self
            .entities()
            .iter()
            .filter_map(|entity| entity.find_component::<AttackTimer>())
            .collect();
        for timer in &timers {
            timer.cancel();
        }
        for timer in &timers {
            timer.join();
        }
        log::debug!("stopped {} attack timers", timers.len());
    }
}

impl fmt::Debug for EntityManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityManager")
            .field("max_components", &self.shared.max_components)
            .field("entities", &self.len())
            .field("names", &self.shared.names.len())
            .finish()
    }
}

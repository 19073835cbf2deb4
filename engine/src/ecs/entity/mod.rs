//! Entities: bags of at most one component per kind.
//!
//! An [`Entity`] is created by an [`EntityManager`] and lives as long as the manager does (or
//! longer, if an attack timer thread still holds it). It owns a fixed-size [`Slots`] array, one
//! slot per component id the manager was configured for, and a weak back-reference to the
//! manager so components can reach shared state (the name table, the journal, the death
//! notification).
//!
//! # Attaching components
//!
//! ```rust,ignore
//! let hero = manager.create_entity();
//! hero.add_component_with(|owner| Name::new(owner, "hero"));
//! hero.add_component_with(|owner| Health::new(owner, 40));
//! hero.add_component(Player);
//!
//! assert!(hero.has_component::<Player>());
//! assert_eq!(hero.get_component::<Health>().current_health(), 40);
//! ```
//!
//! Components are never removed. Adding a component of a kind the entity already has replaces
//! the earlier instance.

use std::{
    fmt,
    sync::{Arc, Weak},
};

use crate::ecs::{
    component::{self, Component},
    manager::{EntityManager, Shared},
    storage::Slots,
};

/// An entity identifier, assigned by the manager in creation order starting at `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u32);

impl Id {
    /// Get the index of this entity in its manager's creation order.
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for Id {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An entity in the ECS: a fixed set of component slots plus a link back to its manager.
pub struct Entity {
    /// The unique identifier of the entity within its manager.
    id: Id,

    /// The manager that created this entity. Non-owning: the manager owns its entities.
    manager: Weak<Shared>,

    /// One slot per component id.
    slots: Slots,
}

impl Entity {
    /// Construct a new entity with `slot_count` empty component slots.
    #[inline]
    pub(crate) fn new(id: Id, manager: Weak<Shared>, slot_count: usize) -> Self {
        Self {
            id,
            manager,
            slots: Slots::new(slot_count),
        }
    }

    /// Get the id of this entity.
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Get a handle to the manager that created this entity, if it is still alive.
    pub fn manager(&self) -> Option<EntityManager> {
        self.manager.upgrade().map(EntityManager::from_shared)
    }

    /// The number of component slots this entity has.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Attach `component` to this entity, replacing any earlier component of the same kind.
    ///
    /// Panics if the kind's id does not fit in this entity's slots.
    pub fn add_component<C: Component>(&self, component: C) -> Arc<C> {
        self.store(component::id_of::<C>(), component)
    }

    /// Build a component against this entity and attach it.
    ///
    /// `build` receives the owning entity so the component can keep a back-reference and
    /// perform its attach-time side effects (registering a name, starting a timer). The slot
    /// bound is checked before `build` runs, so a misconfigured kind has no side effects.
    ///
    /// Panics if the kind's id does not fit in this entity's slots.
    pub fn add_component_with<C, F>(self: &Arc<Self>, build: F) -> Arc<C>
    where
        C: Component,
        F: FnOnce(&Arc<Entity>) -> C,
    {
        let id = component::id_of::<C>();
        self.slots.ensure_fits(id);
        let component = build(self);
        self.store(id, component)
    }

    fn store<C: Component>(&self, id: component::Id, component: C) -> Arc<C> {
        let component = Arc::new(component);
        if self.slots.insert(id, Arc::clone(&component)) {
            log::debug!(
                "entity {} replaced its {} component",
                self.id,
                std::any::type_name::<C>()
            );
        }
        component
    }

    /// Check whether this entity carries a component of kind `C`.
    #[inline]
    pub fn has_component<C: Component>(&self) -> bool {
        self.slots.contains(component::id_of::<C>())
    }

    /// Get this entity's component of kind `C`.
    ///
    /// Panics if the entity has no such component; use [`Entity::find_component`] when absence
    /// is expected.
    pub fn get_component<C: Component>(&self) -> Arc<C> {
        self.find_component::<C>().unwrap_or_else(|| {
            panic!(
                "entity {} has no {} component",
                self.id,
                std::any::type_name::<C>()
            )
        })
    }

    /// Get this entity's component of kind `C`, if it has one.
    #[inline]
    pub fn find_component<C: Component>(&self) -> Option<Arc<C>> {
        self.slots.get::<C>(component::id_of::<C>())
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("slots", &self.slots)
            .finish()
    }
}

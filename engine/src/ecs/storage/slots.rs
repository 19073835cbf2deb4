use std::{
    any::Any,
    fmt,
    sync::{Arc, RwLock},
};

use crate::ecs::component::{self, Component, Id};

/// A type-erased, shareable component instance.
type Boxed = Arc<dyn Any + Send + Sync>;

/// A fixed-size array of optional components, indexed by component id.
///
/// The slots live behind an `RwLock` so that components may still be attached while attack
/// timers read the same entity from other threads. Lookups hand out an `Arc` clone, which keeps
/// the component alive even if its slot is overwritten afterwards.
pub struct Slots {
    slots: RwLock<Box<[Option<Boxed>]>>,
    count: usize,
}

impl Slots {
    /// Create an array of `count` empty slots.
    pub fn new(count: usize) -> Self {
        Self {
            slots: RwLock::new((0..count).map(|_| None).collect()),
            count,
        }
    }

    /// The number of slots, occupied or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Check if this array has no slots at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Panic unless `id` addresses a slot in this array.
    ///
    /// An id past the end means more component kinds are in use than the manager was configured
    /// for, which is a wiring bug rather than a runtime condition.
    pub fn ensure_fits(&self, id: Id) {
        if id.index() >= self.count {
            panic!(
                "component '{}' has id {} which exceeds the configured maximum of {} components",
                component::name_of(id).unwrap_or("<unregistered>"),
                id.index(),
                self.count
            );
        }
    }

    /// Store `component` in slot `id`, returning whether an earlier occupant was replaced.
    ///
    /// Panics if `id` is out of range, see [`Slots::ensure_fits`].
    pub fn insert<C: Component>(&self, id: Id, component: Arc<C>) -> bool {
        self.ensure_fits(id);
        let previous = {
            let mut slots = self.slots.write().unwrap();
            slots[id.index()].replace(component as Boxed)
        };
        // The previous occupant is dropped here, after the lock has been released.
        previous.is_some()
    }

    /// Check whether slot `id` holds a component.
    #[inline]
    pub fn contains(&self, id: Id) -> bool {
        let slots = self.slots.read().unwrap();
        slots.get(id.index()).is_some_and(|slot| slot.is_some())
    }

    /// Get the component of kind `C` stored in slot `id`, if any.
    pub fn get<C: Component>(&self, id: Id) -> Option<Arc<C>> {
        let boxed = {
            let slots = self.slots.read().unwrap();
            slots.get(id.index())?.clone()?
        };
        boxed.downcast::<C>().ok()
    }

    /// Count the occupied slots.
    pub fn occupied(&self) -> usize {
        let slots = self.slots.read().unwrap();
        slots.iter().filter(|slot| slot.is_some()).count()
    }
}

impl fmt::Debug for Slots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slots = self.slots.read().unwrap();
        f.debug_list()
            .entries(slots.iter().enumerate().map(|(index, slot)| {
                slot.as_ref()
                    .map(|_| component::name_of(Id::from(index)).unwrap_or("?"))
            }))
            .finish()
    }
}

//! Component kinds and their numeric identities.
//!
//! Every component kind gets a dense numeric [`Id`] the first time it is asked for. Entities use
//! that id as the index of the slot holding their instance of the kind, so ids must never move
//! once handed out.
//!
//! ## Architecture
//!
//! - [`Component`]: The trait that all component types must implement
//! - [`Id`]: A unique identifier for each registered component kind
//! - [`Registry`]: Thread-safe registration and lookup of component kinds
//! - [`Info`]: Metadata about a component kind (id and type name)
//!
//! A single process-wide registry backs [`id_of`]. Ids are handed out in first-use order
//! starting at `0`, so the set of ids in use is always contiguous.
//!
//! ## Usage
//!
//! ```ignore
//! use skirmish_engine::ecs::component::{self, Component};
//!
//! #[derive(Component)]
//! struct Poisoned;
//!
//! let id = component::id_of::<Poisoned>();
//! assert_eq!(id, component::id_of::<Poisoned>());
//! ```

use std::sync::LazyLock;

mod registry;

pub use registry::{Info, Registry};
pub use skirmish_macros::Component;

/// A component identifier. Dense, starting from `0`, and stable for the life of the process.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Id(u32);

impl Id {
    /// Construct a new component Id from a raw u32 value.
    #[inline]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the index of this component if it were to live in indexable storage (e.g. Vec)
    #[inline]
    pub fn index(&self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for Id {
    #[inline]
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<usize> for Id {
    #[inline]
    fn from(value: usize) -> Self {
        Self::new(value as u32)
    }
}

/// A trait representing a component: a capability attached to exactly one entity.
///
/// At present this only sets the required trait bounds for a type to be stored in an entity's
/// slots and shared with attack timer threads. Use `#[derive(Component)]` for plain data.
pub trait Component: 'static + Sized + Send + Sync {}

/// The registry shared by every entity in the process.
static REGISTRY: LazyLock<Registry> = LazyLock::new(Registry::new);

/// Get the process-wide component registry.
#[inline]
pub fn registry() -> &'static Registry {
    &REGISTRY
}

/// Get the id of component kind `C`, assigning the next free id on first use.
#[inline]
pub fn id_of<C: Component>() -> Id {
    REGISTRY.register::<C>()
}

/// Get the type name recorded for a component id, if one has been assigned.
pub fn name_of(id: Id) -> Option<&'static str> {
    REGISTRY.get_info_by_id(id).map(|info| info.name())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[derive(Component, Debug)]
    struct Frozen;

    #[derive(Component, Debug)]
    struct Burning;

    #[test]
    fn process_ids_are_stable() {
        // When
        let first = id_of::<Frozen>();
        let second = id_of::<Frozen>();

        // Then
        assert_eq!(first, second);
        assert_eq!(registry().get::<Frozen>(), Some(first));
    }

    #[test]
    fn process_ids_are_distinct_per_kind() {
        // When
        let frozen = id_of::<Frozen>();
        let burning = id_of::<Burning>();

        // Then
        assert_ne!(frozen, burning);
        assert!(registry().len() > frozen.index().max(burning.index()));
    }

    #[test]
    fn process_ids_agree_across_threads() {
        // Given
        let handles: Vec<_> = (0..8)
            .map(|_| thread::spawn(id_of::<Burning>))
            .collect();

        // When
        let ids: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        // Then
        assert!(ids.iter().all(|&id| id == id_of::<Burning>()));
    }

    #[test]
    fn name_of_reports_the_type_name() {
        // Given
        let id = id_of::<Frozen>();

        // Then
        assert!(name_of(id).unwrap().ends_with("Frozen"));
        assert_eq!(name_of(Id::new(u32::MAX)), None);
    }
}

use std::{
    any::{self, TypeId},
    sync::RwLock,
    sync::atomic::{AtomicU32, Ordering},
};

use dashmap::DashMap;

use crate::ecs::component::{Component, Id};

/// Metadata about a registered component kind.
#[derive(Debug, Clone, Copy)]
pub struct Info {
    /// The assigned component id.
    id: Id,

    /// The Rust type name, used in diagnostics.
    name: &'static str,

    /// The Rust TypeId for runtime type checking.
    type_id: TypeId,
}

impl Info {
    /// Construct Info for component kind `C`.
    fn new<C: Component>(id: Id) -> Self {
        Self {
            id,
            name: any::type_name::<C>(),
            type_id: TypeId::of::<C>(),
        }
    }

    /// Get the component id.
    #[inline]
    pub fn id(&self) -> Id {
        self.id
    }

    /// Get the type name of the component kind.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Get the Rust TypeId.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }
}

/// A thread-safe component registry. This is responsible for handing out component ids and
/// remembering them for the rest of the process.
///
/// The registry uses lock-free reads for TypeId→Id lookups via `DashMap`, making the common read
/// path (every `has_component` / `get_component` call) cheap. Registration only locks a single
/// shard of the DashMap and the info vector.
///
/// Why thread-safe?
/// - Attack timers run on their own threads and may be the first to ask for a component kind.
///   Every thread has to agree on that kind's id.
pub struct Registry {
    /// Map from TypeId to component Id. Lock-free reads via sharded concurrent hashmap.
    type_map: DashMap<TypeId, Id>,

    /// List of registered component entries. Protected by RwLock for rare writes.
    components: RwLock<Vec<Option<Info>>>,

    /// Next available component identifier.
    next_id: AtomicU32,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create a new component registry.
    #[inline]
    pub fn new() -> Self {
        Self {
            type_map: DashMap::new(),
            components: RwLock::new(Vec::new()),
            next_id: AtomicU32::new(0),
        }
    }

    /// Register a component kind and get its unique identifier.
    ///
    /// This method is thread-safe and can be called concurrently. If the kind is already
    /// registered, returns the existing ID. Otherwise, allocates the next ID and stores the
    /// component info.
    pub fn register<C: Component>(&self) -> Id {
        let type_id = TypeId::of::<C>();

        // Fast path: check if already registered (lock-free read)
        if let Some(id) = self.type_map.get(&type_id) {
            return *id;
        }

        // Slow path: the entry API holds the shard lock while the counter moves, so an id is
        // only ever consumed by the thread that actually inserts the kind.
        *self
            .type_map
            .entry(type_id)
            .or_insert_with(|| {
                let id_value = self.next_id.fetch_add(1, Ordering::Relaxed);
                let comp_id = Id(id_value);

                let mut components = self.components.write().unwrap();
                let index = id_value as usize;

                // Expand if necessary
                if index >= components.len() {
                    components.resize(index + 1, None);
                }

                components[index] = Some(Info::new::<C>(comp_id));
                log::debug!(
                    "registered component {} as {}",
                    any::type_name::<C>(),
                    id_value
                );

                comp_id
            })
            .value()
    }

    /// Get the component ID for a provided kind `C`, if registered.
    #[inline]
    pub fn get<C: Component>(&self) -> Option<Id> {
        let type_id = TypeId::of::<C>();
        self.type_map.get(&type_id).map(|entry| *entry.value())
    }

    /// Get the component info for a provided kind `C`, if registered.
    #[inline]
    pub fn get_info<C: Component>(&self) -> Option<Info> {
        let id = self.get::<C>()?;
        self.get_info_by_id(id)
    }

    /// Get component info by ID.
    #[inline]
    pub fn get_info_by_id(&self, id: Id) -> Option<Info> {
        let components = self.components.read().unwrap();
        components.get(id.index()).and_then(|i| *i)
    }

    /// Get the number of registered component kinds.
    #[inline]
    pub fn len(&self) -> usize {
        self.next_id.load(Ordering::Relaxed) as usize
    }

    /// Check if no component kind has been registered yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

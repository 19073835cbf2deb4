use std::{
    fmt,
    sync::{Arc, Weak},
};

use crate::ecs::{Entity, component::Component};

/// The name of an entity. Names are unique within a manager.
#[derive(Debug)]
pub struct Name {
    name: String,
    owner: Weak<Entity>,
}

impl Component for Name {}

impl Name {
    /// Build a name for `owner` and register it in the owner's manager.
    ///
    /// Panics if the name is already taken, or if the owner's manager is gone.
    pub fn new(owner: &Arc<Entity>, name: impl Into<String>) -> Self {
        let name = name.into();
        owner
            .manager()
            .expect("entity outlived its manager")
            .register_name(&name, owner);
        Self {
            name,
            owner: Arc::downgrade(owner),
        }
    }

    /// The name as registered with the manager.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.name
    }

    /// The entity carrying this name, if it is still alive.
    pub fn owner(&self) -> Option<Arc<Entity>> {
        self.owner.upgrade()
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

use std::sync::{
    Arc, Weak,
    atomic::{AtomicU32, Ordering},
};

use crate::{
    combat::{Player, label},
    ecs::{Entity, component::Component},
};

/// The health of an entity.
///
/// Health is reduced from any number of threads at once. Every reduction is one atomic clamped
/// subtraction, so no hit is lost and the value never goes below zero.
#[derive(Debug)]
pub struct Health {
    health: AtomicU32,
    owner: Weak<Entity>,
}

impl Component for Health {}

impl Health {
    /// Build a health counter for `owner` starting at `initial`.
    pub fn new(owner: &Arc<Entity>, initial: u32) -> Self {
        Self {
            health: AtomicU32::new(initial),
            owner: Arc::downgrade(owner),
        }
    }

    /// Reduce health by `amount`, stopping at zero, and return the new value.
    ///
    /// When this call is the one that takes health from above zero to zero and the owner is a
    /// [`Player`], the manager's death notification is raised. Only one reduction can observe
    /// that transition, so racing reductions at the boundary notify exactly once, and
    /// reductions of an already dead entity never notify again.
    ///
    /// Panics if `amount` is zero.
    pub fn reduce_health(&self, amount: u32) -> u32 {
        assert!(amount != 0, "health reduction amount must be non-zero");
        let previous = self
            .health
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |health| {
                Some(health.saturating_sub(amount))
            })
            .unwrap_or_else(|previous| previous);
        let current = previous.saturating_sub(amount);

        if previous > 0 && current == 0 {
            self.died();
        }
        current
    }

    fn died(&self) {
        let Some(owner) = self.owner.upgrade() else {
            return;
        };
        if !owner.has_component::<Player>() {
            log::debug!("{} ran out of health", label(&owner));
            return;
        }
        match owner.manager() {
            Some(manager) => manager.entity_died(&owner),
            None => log::warn!(
                "player {} died after its manager was dropped",
                label(&owner)
            ),
        }
    }

    /// Check whether there is any health left.
    #[inline]
    pub fn is_alive(&self) -> bool {
        self.current_health() > 0
    }

    /// A snapshot of the current health.
    #[inline]
    pub fn current_health(&self) -> u32 {
        self.health.load(Ordering::Acquire)
    }
}

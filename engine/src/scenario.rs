//! The standard skirmish: a hero player beset by an orc and a dragon.
//!
//! | entity | health | player | attacks hero                 |
//! |--------|--------|--------|------------------------------|
//! | hero   | 40     | yes    | -                            |
//! | orc    | 7      | no     | 1 damage every 1300ms        |
//! | dragon | 20     | no     | 3 damage every 2500ms        |
//!
//! Left alone, the hero takes about 1/1300 + 3/2500 ≈ 0.00197 damage per millisecond and loses
//! the game after roughly 21 seconds.

use std::{sync::Arc, time::Duration};

use crate::{
    combat::{AttackTimer, Health, Name, Player},
    ecs::{Entity, EntityManager},
};

/// Component slots needed by the standard skirmish, with one to spare.
pub const DEFAULT_MAX_COMPONENTS: usize = 5;

/// Damage the player deals per console attack.
pub const PLAYER_DAMAGE: u32 = 2;

/// Time between orc attacks at normal speed.
pub const ORC_INTERVAL: Duration = Duration::from_millis(1300);

/// Time between dragon attacks at normal speed.
pub const DRAGON_INTERVAL: Duration = Duration::from_millis(2500);

/// The entities of the standard skirmish.
#[derive(Debug, Clone)]
pub struct Skirmish {
    pub hero: Arc<Entity>,
    pub orc: Arc<Entity>,
    pub dragon: Arc<Entity>,
}

impl Skirmish {
    /// Create the hero, orc and dragon in `manager` and start the attack timers.
    ///
    /// Attack intervals are divided by `speedup`, which must not be zero.
    pub fn build(manager: &EntityManager, speedup: u32) -> Self {
        assert!(speedup != 0, "skirmish speedup must be non-zero");

        let hero = manager.create_entity();
        hero.add_component_with(|owner| Name::new(owner, "hero"));
        hero.add_component_with(|owner| Health::new(owner, 40));
        hero.add_component(Player);

        let orc = manager.create_entity();
        orc.add_component_with(|owner| Name::new(owner, "orc"));
        orc.add_component_with(|owner| Health::new(owner, 7));
        orc.add_component_with(|owner| AttackTimer::new(owner, &hero, 1, ORC_INTERVAL / speedup));

        let dragon = manager.create_entity();
        dragon.add_component_with(|owner| Name::new(owner, "dragon"));
        dragon.add_component_with(|owner| Health::new(owner, 20));
        dragon.add_component_with(|owner| {
            AttackTimer::new(owner, &hero, 3, DRAGON_INTERVAL / speedup)
        });

        log::info!("skirmish ready at {}x speed", speedup);
        Self { hero, orc, dragon }
    }
}

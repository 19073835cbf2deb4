use crate::{
    combat::{Health, Name},
    ecs::Entity,
    journal::Entry,
};

impl Entity {
    /// Attack `victim`, reducing its health by `amount`.
    ///
    /// Both sides need a [`Name`] and a [`Health`] and both must be alive at the time of the
    /// check; otherwise nothing changes and `false` is returned. A missing victim is treated the
    /// same way. On success the hit is written to the journal and `true` is returned.
    ///
    /// The aliveness check and the reduction are separate steps. Another attack may land in
    /// between, so `true` only means both sides were alive when checked.
    pub fn attack(&self, victim: Option<&Entity>, amount: u32) -> bool {
        let Some(victim) = victim else {
            return false;
        };
        let (Some(attacker_name), Some(attacker_health), Some(victim_name), Some(victim_health)) = (
            self.find_component::<Name>(),
            self.find_component::<Health>(),
            victim.find_component::<Name>(),
            victim.find_component::<Health>(),
        ) else {
            return false;
        };

        if !(attacker_health.is_alive() && victim_health.is_alive()) {
            return false;
        }

        let health = victim_health.reduce_health(amount);
        let hit = Entry::Hit {
            attacker: attacker_name.to_string(),
            victim: victim_name.to_string(),
            health,
        };
        match self.manager() {
            Some(manager) => {
                manager.journal().record(hit);
            }
            None => log::debug!("{hit} (no manager to record it)"),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{
        combat::{Health, Name, Player},
        ecs::{Entity, EntityManager},
        journal::{Entry, Journal},
    };
    use crossbeam::channel::Receiver;

    fn arena() -> (EntityManager, Receiver<Entry>) {
        let (journal, entries) = Journal::with_receiver();
        (EntityManager::with_journal(32, journal), entries)
    }

    fn fighter(manager: &EntityManager, name: &str, health: u32) -> Arc<Entity> {
        let entity = manager.create_entity();
        entity.add_component_with(|owner| Name::new(owner, name));
        entity.add_component_with(|owner| Health::new(owner, health));
        entity
    }

    fn health_of(entity: &Entity) -> u32 {
        entity.get_component::<Health>().current_health()
    }

    #[test]
    fn attack_reduces_victim_health() {
        // Given
        let (manager, entries) = arena();
        let hero = fighter(&manager, "hero", 40);
        let orc = fighter(&manager, "orc", 7);

        // When
        let hit = hero.attack(Some(&orc), 2);

        // Then
        assert!(hit);
        assert_eq!(health_of(&orc), 5);
        assert_eq!(health_of(&hero), 40);
        assert_eq!(
            entries.try_recv().unwrap().to_string(),
            "hero hit orc. orc health is 5."
        );
    }

    #[test]
    fn attack_without_victim_is_a_no_op() {
        // Given
        let (manager, entries) = arena();
        let hero = fighter(&manager, "hero", 40);

        // When
        let hit = hero.attack(None, 2);

        // Then
        assert!(!hit);
        assert_eq!(health_of(&hero), 40);
        assert!(entries.try_recv().is_err());
    }

    #[test]
    fn attack_needs_name_and_health_on_both_sides() {
        // Given
        let (manager, entries) = arena();
        let hero = fighter(&manager, "hero", 40);

        let nameless = manager.create_entity();
        nameless.add_component_with(|owner| Health::new(owner, 10));

        let healthless = manager.create_entity();
        healthless.add_component_with(|owner| Name::new(owner, "statue"));

        // When / Then
        assert!(!hero.attack(Some(&nameless), 2));
        assert!(!nameless.attack(Some(&hero), 2));
        assert!(!hero.attack(Some(&healthless), 2));
        assert!(!healthless.attack(Some(&hero), 2));

        assert_eq!(health_of(&hero), 40);
        assert_eq!(health_of(&nameless), 10);
        assert!(entries.try_recv().is_err());
    }

    #[test]
    fn attack_on_the_dead_is_refused() {
        // Given
        let (manager, entries) = arena();
        let hero = fighter(&manager, "hero", 40);
        let orc = fighter(&manager, "orc", 2);
        assert!(hero.attack(Some(&orc), 2));
        let _ = entries.try_recv();

        // When
        let again = hero.attack(Some(&orc), 2);
        let back = orc.attack(Some(&hero), 2);

        // Then - Neither a dead victim nor a dead attacker can land a hit
        assert!(!again);
        assert!(!back);
        assert_eq!(health_of(&hero), 40);
        assert_eq!(health_of(&orc), 0);
        assert!(entries.try_recv().is_err());
    }

    #[test]
    fn killing_blow_on_a_player_records_the_loss_first() {
        // Given
        let (manager, entries) = arena();
        let hero = fighter(&manager, "hero", 3);
        hero.add_component(Player);
        let dragon = fighter(&manager, "dragon", 20);

        // When
        assert!(dragon.attack(Some(&hero), 3));

        // Then
        let lines: Vec<_> = entries.try_iter().map(|e| e.to_string()).collect();
        assert_eq!(
            lines,
            vec![
                "Player hero lost the game.".to_string(),
                "dragon hit hero. hero health is 0.".to_string(),
            ]
        );
    }

    #[test]
    fn attack_clamps_overkill() {
        // Given
        let (manager, _entries) = arena();
        let dragon = fighter(&manager, "dragon", 20);
        let orc = fighter(&manager, "orc", 1);

        // When
        assert!(dragon.attack(Some(&orc), 3));

        // Then
        assert_eq!(health_of(&orc), 0);
    }
}

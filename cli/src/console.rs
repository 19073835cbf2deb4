use std::sync::Arc;

use skirmish_engine::ecs::{Entity, EntityManager};

use crate::command::{Command, CommandError};

/// What the command loop should do after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Carries out operator commands on behalf of the player entity.
///
/// The console runs on the input thread, concurrently with every attack timer; it only ever
/// touches entities through `Entity::attack`, which is safe to race.
pub struct Console {
    manager: EntityManager,
    player: Arc<Entity>,
    damage: u32,
}

impl Console {
    pub fn new(manager: EntityManager, player: Arc<Entity>, damage: u32) -> Self {
        Self {
            manager,
            player,
            damage,
        }
    }

    /// Handle one line of input. Bad input is logged and otherwise ignored.
    pub fn handle_line(&self, line: &str) -> Flow {
        match Command::parse(line) {
            Ok(command) => self.handle_command(command),
            Err(CommandError::Empty) => Flow::Continue,
            Err(err) => {
                log::warn!("{err}");
                Flow::Continue
            }
        }
    }

    pub fn handle_command(&self, command: Command) -> Flow {
        match command {
            Command::Attack(name) => {
                self.attack(&name);
                Flow::Continue
            }
            Command::Exit => Flow::Exit,
        }
    }

    /// Make the player attack the entity called `name`. Returns whether the attack landed.
    pub fn attack(&self, name: &str) -> bool {
        let victim = self.manager.get_entity_by_name(name);
        if victim.is_none() {
            log::warn!("nothing called '{name}' to attack");
        }
        let landed = self.player.attack(victim.as_deref(), self.damage);
        if !landed && victim.is_some() {
            log::info!("attack on '{name}' had no effect");
        }
        landed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel::Receiver;
    use skirmish_engine::{
        combat::{Health, Name, Player},
        journal::{Entry, Journal},
    };

    fn console() -> (Console, EntityManager, Receiver<Entry>) {
        let (journal, entries) = Journal::with_receiver();
        let manager = EntityManager::with_journal(5, journal);

        let hero = manager.create_entity();
        hero.add_component_with(|owner| Name::new(owner, "hero"));
        hero.add_component_with(|owner| Health::new(owner, 40));
        hero.add_component(Player);

        let orc = manager.create_entity();
        orc.add_component_with(|owner| Name::new(owner, "orc"));
        orc.add_component_with(|owner| Health::new(owner, 3));

        let sign = manager.create_entity();
        sign.add_component_with(|owner| Name::new(owner, "sign"));

        (Console::new(manager.clone(), hero, 2), manager, entries)
    }

    fn health(manager: &EntityManager, name: &str) -> u32 {
        manager
            .get_entity_by_name(name)
            .unwrap()
            .get_component::<Health>()
            .current_health()
    }

    #[test]
    fn attack_command_hits_the_named_entity() {
        // Given
        let (console, manager, entries) = console();

        // When
        let flow = console.handle_line("attack orc");

        // Then
        assert_eq!(flow, Flow::Continue);
        assert_eq!(health(&manager, "orc"), 1);
        assert_eq!(
            entries.try_recv().unwrap().to_string(),
            "hero hit orc. orc health is 1."
        );
    }

    #[test]
    fn attacking_until_dead() {
        // Given
        let (console, manager, _entries) = console();

        // When
        let results: Vec<_> = (0..3).map(|_| console.attack("orc")).collect();

        // Then
        assert_eq!(results, vec![true, true, false]);
        assert_eq!(health(&manager, "orc"), 0);
    }

    #[test]
    fn unknown_and_unfit_targets_are_ignored() {
        // Given
        let (console, manager, entries) = console();

        // When
        let unknown = console.attack("troll");
        let unfit = console.attack("sign");
        let flow = console.handle_line("dance wildly");

        // Then
        assert!(!unknown);
        assert!(!unfit);
        assert_eq!(flow, Flow::Continue);
        assert_eq!(health(&manager, "hero"), 40);
        assert!(entries.try_recv().is_err());
    }

    #[test]
    fn exit_command_ends_the_loop() {
        // Given
        let (console, _manager, _entries) = console();

        // Then
        assert_eq!(console.handle_line("exit"), Flow::Exit);
        assert_eq!(console.handle_line(""), Flow::Continue);
    }
}

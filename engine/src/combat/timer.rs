use std::{
    fmt,
    sync::{
        Arc, Mutex,
        atomic::{AtomicU8, Ordering},
    },
    thread::{self, JoinHandle},
    time::Duration,
};

use crossbeam::channel::{Receiver, RecvTimeoutError, Sender, bounded};

use crate::{
    combat::{Health, label},
    ecs::{Entity, component::Component},
};

/// Where an attack timer is in its life.
///
/// ```text
/// Idle                        (never ran: a side had no Health, or no thread could be spawned)
/// Running ──attack fails──▶ Stopped
///         ──cancel()──────▶ Stopped
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerStatus {
    Idle,
    Running,
    Stopped,
}

impl TimerStatus {
    fn from_u8(value: u8) -> Self {
        match value {
            1 => TimerStatus::Running,
            2 => TimerStatus::Stopped,
            _ => TimerStatus::Idle,
        }
    }
}

/// State shared between a timer component and its thread.
struct Control {
    status: AtomicU8,
    stop_tx: Sender<()>,
    stop_rx: Receiver<()>,
}

impl Control {
    fn new() -> Self {
        let (stop_tx, stop_rx) = bounded(1);
        Self {
            status: AtomicU8::new(TimerStatus::Idle as u8),
            stop_tx,
            stop_rx,
        }
    }

    fn status(&self) -> TimerStatus {
        TimerStatus::from_u8(self.status.load(Ordering::Acquire))
    }

    fn set(&self, status: TimerStatus) {
        self.status.store(status as u8, Ordering::Release);
    }
}

/// Attacks a victim every `interval` on a thread of its own, until an attack fails.
///
/// The thread is detached from whoever built the timer: dropping or replacing the component
/// leaves it running. It ends when the owner or the victim is no longer alive at the time of an
/// attack, or when [`AttackTimer::cancel`] is called.
pub struct AttackTimer {
    amount: u32,
    interval: Duration,
    control: Arc<Control>,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl Component for AttackTimer {}

impl AttackTimer {
    /// Build a timer making `owner` attack `victim` for `amount` every `interval`.
    ///
    /// The timer only starts if both entities already carry [`Health`]; otherwise it stays
    /// [`TimerStatus::Idle`] for good.
    ///
    /// Panics if `amount` is zero.
    pub fn new(owner: &Arc<Entity>, victim: &Arc<Entity>, amount: u32, interval: Duration) -> Self {
        assert!(amount != 0, "attack timer damage must be non-zero");
        let timer = Self {
            amount,
            interval,
            control: Arc::new(Control::new()),
            handle: Mutex::new(None),
        };

        if !(owner.has_component::<Health>() && victim.has_component::<Health>()) {
            log::warn!(
                "attack timer {} -> {} is idle: both sides need health",
                label(owner),
                label(victim)
            );
            return timer;
        }

        timer.control.set(TimerStatus::Running);
        let spawned = thread::Builder::new()
            .name(format!("attack-timer-{}", owner.id().index()))
            .spawn({
                let owner = Arc::clone(owner);
                let victim = Arc::clone(victim);
                let control = Arc::clone(&timer.control);
                move || run(owner, victim, amount, interval, control)
            });

        match spawned {
            Ok(handle) => {
                log::info!(
                    "{} attacks {} for {} every {:?}",
                    label(owner),
                    label(victim),
                    amount,
                    interval
                );
                *timer.handle.lock().unwrap() = Some(handle);
            }
            Err(err) => {
                log::error!(
                    "could not start attack timer for {}: {}",
                    label(owner),
                    err
                );
                timer.control.set(TimerStatus::Idle);
            }
        }
        timer
    }

    /// Where this timer is in its life.
    #[inline]
    pub fn status(&self) -> TimerStatus {
        self.control.status()
    }

    /// The damage dealt per attack.
    #[inline]
    pub fn amount(&self) -> u32 {
        self.amount
    }

    /// The time between attacks.
    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Ask the timer thread to stop. It wakes up right away if it is waiting for its next tick.
    pub fn cancel(&self) {
        if self.status() == TimerStatus::Running {
            let _ = self.control.stop_tx.try_send(());
        }
    }

    /// Wait for the timer thread to finish. Returns immediately for idle or joined timers.
    pub fn join(&self) {
        let handle = self.handle.lock().unwrap().take();
        if let Some(handle) = handle
            && handle.join().is_err()
        {
            log::error!("attack timer thread panicked");
        }
    }
}

fn run(owner: Arc<Entity>, victim: Arc<Entity>, amount: u32, interval: Duration, control: Arc<Control>) {
    loop {
        match control.stop_rx.recv_timeout(interval) {
            Err(RecvTimeoutError::Timeout) => {}
            Ok(()) | Err(RecvTimeoutError::Disconnected) => {
                log::info!(
                    "attack timer {} -> {} cancelled",
                    label(&owner),
                    label(&victim)
                );
                break;
            }
        }
        if !owner.attack(Some(&victim), amount) {
            log::info!(
                "attack timer {} -> {} finished",
                label(&owner),
                label(&victim)
            );
            break;
        }
    }
    control.set(TimerStatus::Stopped);
}

impl fmt::Debug for AttackTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttackTimer")
            .field("amount", &self.amount)
            .field("interval", &self.interval)
            .field("status", &self.status())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        combat::Name,
        ecs::EntityManager,
        journal::{Entry, Journal},
    };
    use std::time::Instant;

    const TICK: Duration = Duration::from_millis(5);

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

    fn wait_for(timer: &AttackTimer, status: TimerStatus) {
        let deadline = Instant::now() + Duration::from_secs(10);
        while timer.status() != status {
            assert!(Instant::now() < deadline, "timer never reached {status:?}");
            thread::sleep(Duration::from_millis(1));
        }
    }

    #[test]
    fn timer_attacks_until_victim_dies() {
        // Given
        let (manager, entries) = arena();
        let hero = fighter(&manager, "hero", 40);
        let orc = fighter(&manager, "orc", 7);

        // When
        let timer = hero.add_component_with(|owner| AttackTimer::new(owner, &orc, 2, TICK));
        wait_for(&timer, TimerStatus::Stopped);
        timer.join();

        // Then - 7 health takes four hits of 2, and the fifth attempt ends the timer
        assert_eq!(orc.get_component::<Health>().current_health(), 0);
        let lines: Vec<_> = entries.try_iter().map(|e| e.to_string()).collect();
        assert_eq!(
            lines,
            vec![
                "hero hit orc. orc health is 5.",
                "hero hit orc. orc health is 3.",
                "hero hit orc. orc health is 1.",
                "hero hit orc. orc health is 0.",
            ]
        );
    }

    #[test]
    fn timer_without_victim_health_is_idle() {
        // Given
        let (manager, entries) = arena();
        let hero = fighter(&manager, "hero", 40);
        let statue = manager.create_entity();
        statue.add_component_with(|owner| Name::new(owner, "statue"));

        // When
        let timer = hero.add_component_with(|owner| AttackTimer::new(owner, &statue, 1, TICK));
        thread::sleep(TICK * 4);

        // Then
        assert_eq!(timer.status(), TimerStatus::Idle);
        timer.join();
        assert!(entries.try_recv().is_err());
    }

    #[test]
    fn timer_without_owner_health_is_idle() {
        // Given
        let (manager, _entries) = arena();
        let ghost = manager.create_entity();
        ghost.add_component_with(|owner| Name::new(owner, "ghost"));
        let hero = fighter(&manager, "hero", 40);

        // When
        let timer = ghost.add_component_with(|owner| AttackTimer::new(owner, &hero, 1, TICK));

        // Then
        assert_eq!(timer.status(), TimerStatus::Idle);
        assert_eq!(hero.get_component::<Health>().current_health(), 40);
    }

    #[test]
    fn cancel_stops_a_running_timer() {
        // Given - An interval long enough that no attack lands during the test
        let (manager, entries) = arena();
        let hero = fighter(&manager, "hero", 40);
        let orc = fighter(&manager, "orc", 7);
        let timer = orc.add_component_with(|owner| {
            AttackTimer::new(owner, &hero, 1, Duration::from_secs(60))
        });
        assert_eq!(timer.status(), TimerStatus::Running);

        // When
        timer.cancel();
        timer.join();

        // Then
        assert_eq!(timer.status(), TimerStatus::Stopped);
        assert_eq!(hero.get_component::<Health>().current_health(), 40);
        assert!(entries.try_recv().is_err());
    }

    #[test]
    fn replaced_timer_keeps_running() {
        // Given
        let (manager, _entries) = arena();
        let hero = fighter(&manager, "hero", 1_000);
        let orc = fighter(&manager, "orc", 7);
        let first = orc.add_component_with(|owner| AttackTimer::new(owner, &hero, 1, TICK));

        // When - A second timer takes the slot
        let second = orc.add_component_with(|owner| AttackTimer::new(owner, &hero, 1, TICK));
        thread::sleep(TICK * 4);

        // Then - Both threads are still attacking
        assert_eq!(first.status(), TimerStatus::Running);
        assert_eq!(second.status(), TimerStatus::Running);
        assert!(Arc::ptr_eq(&orc.get_component::<AttackTimer>(), &second));

        first.cancel();
        second.cancel();
        first.join();
        second.join();
    }

    #[test]
    fn stop_timers_winds_everything_down() {
        // Given
        let (manager, _entries) = arena();
        let hero = fighter(&manager, "hero", 1_000);
        let orc = fighter(&manager, "orc", 7);
        let dragon = fighter(&manager, "dragon", 20);
        let orc_timer = orc.add_component_with(|owner| {
            AttackTimer::new(owner, &hero, 1, Duration::from_secs(60))
        });
        let dragon_timer = dragon.add_component_with(|owner| {
            AttackTimer::new(owner, &hero, 3, Duration::from_secs(60))
        });

        // When
        manager.stop_timers();

        // Then
        assert_eq!(orc_timer.status(), TimerStatus::Stopped);
        assert_eq!(dragon_timer.status(), TimerStatus::Stopped);
    }

    #[test]
    #[should_panic(expected = "attack timer damage must be non-zero")]
    fn zero_damage_panics() {
        // Given
        let (manager, _entries) = arena();
        let hero = fighter(&manager, "hero", 40);
        let orc = fighter(&manager, "orc", 7);

        // When
        orc.add_component_with(|owner| AttackTimer::new(owner, &hero, 0, TICK));
    }
}

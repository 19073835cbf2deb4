//! Per-entity component storage.
//!
//! Every entity owns exactly one [`Slots`] array. The array has a fixed number of slots, chosen
//! by the entity manager when the entity is created, and slot `i` holds the entity's instance of
//! the component kind whose [`Id`](crate::ecs::component::Id) index is `i`.
//!
//! ```text
//! component ids:   0        1         2        3            4
//!                ┌────────┬─────────┬────────┬────────────┬──────┐
//! hero slots:    │ Name   │ Health  │ Player │    --      │  --  │
//!                └────────┴─────────┴────────┴────────────┴──────┘
//!                ┌────────┬─────────┬────────┬────────────┬──────┐
//! orc slots:     │ Name   │ Health  │  --    │ AttackTimer│  --  │
//!                └────────┴─────────┴────────┴────────────┴──────┘
//! ```
//!
//! Slots only ever fill up or get overwritten; there is no removal.
mod slots;

pub use slots::Slots;

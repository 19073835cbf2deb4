pub mod component;
pub mod entity;
pub mod manager;
pub(crate) mod storage;

pub use component::Component;
pub use entity::Entity;
pub use manager::EntityManager;

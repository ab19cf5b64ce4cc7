//! Immortal Core - game session for the incremental life simulation
//!
//! Wraps the pure progression model from `immortal-logic` with everything
//! a running game needs around it:
//! - **Catalog**: static item and furniture definitions, looked up by id
//! - **Effects**: handlers keyed by effect id that mutate the character
//! - **Session**: the single owner of the live character, inventory, home
//!   and world flags, advanced one day at a time
//! - **Persistence**: JSON and bincode save files
//!
//! # Example
//!
//! ```rust
//! use immortal_core::prelude::*;
//!
//! let mut session = GameSession::new(SessionConfig {
//!     seed: Some(7),
//!     ..Default::default()
//! });
//! session.acquire_item("rice", 3).unwrap();
//! session.use_item("rice").unwrap();
//! assert_eq!(session.character().status.nourishment.value, 8.0);
//!
//! let report = session.pass_day().unwrap();
//! assert!(report.death.is_none());
//! ```

pub mod catalog;
pub mod config;
pub mod effects;
pub mod inventory;
pub mod persistence;
pub mod session;
pub mod world;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::catalog::{Catalog, Furniture, FurnitureSlot, Item, ItemType};
    pub use crate::config::SessionConfig;
    pub use crate::effects::{EffectContext, EffectHandler, EffectRegistry};
    pub use crate::inventory::{Home, Inventory};
    pub use crate::session::{DayReport, DeathCause, GameSession, SessionError, UseOutcome};
    pub use crate::world::{Unlock, World};
    pub use immortal_logic::attributes::AttributeType;
    pub use immortal_logic::character::Character;
}

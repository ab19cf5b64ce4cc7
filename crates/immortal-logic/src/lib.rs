//! Pure character progression logic for Immortal.
//!
//! This crate holds the numeric core of the game: attributes and their
//! aptitude growth curves, capped status resources, equipment storage,
//! lifespan accounting and the reincarnation transition. Everything is
//! plain data plus functions over it, so the same code runs in the game
//! session, the headless harness and unit tests.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`attributes`] | The ten attributes, aptitude multiplier and starting-value curves |
//! | [`character`] | The `Character` aggregate, reincarnation, snapshot import/export |
//! | [`constants`] | Starting ages, lifespans and status ceilings (in days / points) |
//! | [`equipment`] | Six fixed equipment slots |
//! | [`status`] | Health, stamina, mana and nourishment pools with overage clamping |
//!
//! # Example
//!
//! ```
//! use immortal_logic::attributes::AttributeType;
//! use immortal_logic::character::Character;
//!
//! let mut character = Character::new();
//! character.increase_attribute(AttributeType::Strength, 100.0);
//! assert_eq!(character.attributes.get(AttributeType::Strength).value, 101.0);
//!
//! character.reincarnate();
//! let strength = character.attributes.get(AttributeType::Strength);
//! assert!((strength.aptitude - 2.01).abs() < 1e-9);
//! assert_eq!(character.age, 18 * 365);
//! ```

pub mod attributes;
pub mod character;
pub mod constants;
pub mod equipment;
pub mod status;

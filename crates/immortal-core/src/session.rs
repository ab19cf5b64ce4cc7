//! Game session - single owner of the live character and everything
//! around it.
//!
//! The presentation layer drives a session through discrete actions:
//! using an item, installing furniture, passing a day, reincarnating.
//! Each action resolves catalog data by id, runs the matching effect
//! handler, and returns once all state is updated.

use std::io::{Read, Write};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use immortal_logic::character::Character;

use crate::catalog::{Catalog, ItemType};
use crate::config::SessionConfig;
use crate::effects::{EffectContext, EffectRegistry};
use crate::inventory::{Home, Inventory};
use crate::persistence::{self, SaveData, SaveError, SAVE_VERSION};
use crate::world::{LogKind, World};

/// Bought automatically when hungry with nothing to eat.
const FALLBACK_FOOD: &str = "rice";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("unknown item: {0}")]
    UnknownItem(String),
    #[error("unknown furniture: {0}")]
    UnknownFurniture(String),
    #[error("no {0} in inventory")]
    NotInInventory(String),
    #[error("{0} cannot be used")]
    NotUsable(String),
    #[error("no handler registered for effect {0}")]
    MissingEffect(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UseOutcome {
    pub item_id: String,
    /// Whether one unit was taken from the inventory.
    pub consumed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Health reached zero.
    Injury,
    /// Health reached zero while starving.
    Starvation,
    /// Age reached lifespan.
    OldAge,
}

/// What happened during one call to [`GameSession::pass_day`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayReport {
    pub day: u32,
    /// Food eaten from the inventory, if any.
    pub ate: Option<String>,
    pub bought_rice: bool,
    pub starved: bool,
    pub death: Option<DeathCause>,
}

/// How a hungry character will eat today.
enum Meal {
    Held(String),
    Rice(&'static str),
    Starve,
}

pub struct GameSession {
    character: Character,
    world: World,
    inventory: Inventory,
    home: Home,
    catalog: Catalog,
    effects: EffectRegistry,
    rng: StdRng,
    config: SessionConfig,
}

impl GameSession {
    /// Start a new game with the standard catalog and effects.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_content(config, Catalog::standard(), EffectRegistry::standard())
    }

    pub fn with_content(config: SessionConfig, catalog: Catalog, effects: EffectRegistry) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            character: Character::new(),
            world: World::new(config.log_capacity),
            inventory: Inventory::default(),
            home: Home::default(),
            catalog,
            effects,
            rng,
            config,
        }
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn character_mut(&mut self) -> &mut Character {
        &mut self.character
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn home(&self) -> &Home {
        &self.home
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Put items into the inventory.
    pub fn acquire_item(&mut self, id: &str, quantity: u32) -> Result<(), SessionError> {
        if self.catalog.item_by_id(id).is_none() {
            return Err(SessionError::UnknownItem(id.to_string()));
        }
        self.inventory.add(id, quantity);
        Ok(())
    }

    /// Use one held item.
    pub fn use_item(&mut self, id: &str) -> Result<UseOutcome, SessionError> {
        let item = self
            .catalog
            .item_by_id(id)
            .ok_or_else(|| SessionError::UnknownItem(id.to_string()))?;
        let (effect, consumes) = (item.effect, item.use_consumes);

        if self.inventory.quantity(id) == 0 {
            return Err(SessionError::NotInInventory(id.to_string()));
        }
        let effect = effect.ok_or_else(|| SessionError::NotUsable(id.to_string()))?;

        self.apply_effect(effect)?;
        if consumes {
            self.inventory.remove(id, 1);
        }
        log::debug!("used {} (consumed: {})", id, consumes);

        Ok(UseOutcome {
            item_id: id.to_string(),
            consumed: consumes,
        })
    }

    /// Whether the player already owns what an item grants.
    ///
    /// `None` for unknown items and items that can be used repeatedly.
    pub fn item_owned(&self, id: &str) -> Option<bool> {
        let effect = self.catalog.item_by_id(id)?.effect?;
        self.effects.get(effect)?.is_owned(&self.world)
    }

    /// Install furniture in its home slot, returning the id it replaced.
    pub fn install_furniture(&mut self, id: &str) -> Result<Option<String>, SessionError> {
        let slot = self
            .catalog
            .furniture_by_id(id)
            .ok_or_else(|| SessionError::UnknownFurniture(id.to_string()))?
            .slot;
        Ok(self.home.set(slot, Some(id.to_string())))
    }

    /// Advance one day.
    ///
    /// Ages the character, runs installed furniture, then burns a point of
    /// nourishment. A hungry character eats the oldest food held, else buys
    /// rice, else starves. Ends by checking for death. Does nothing once the
    /// character is dead.
    ///
    /// Every effect the day needs is resolved before anything changes, so a
    /// missing handler leaves the session untouched.
    pub fn pass_day(&mut self) -> Result<DayReport, SessionError> {
        if self.character.dead {
            return Ok(DayReport {
                day: self.world.day,
                ..Default::default()
            });
        }

        let furniture_effects: Vec<&'static str> = self
            .home
            .installed()
            .filter_map(|id| self.catalog.furniture_by_id(id))
            .map(|f| f.effect)
            .collect();
        for effect in &furniture_effects {
            self.require_effect(effect)?;
        }
        let nourishment = &self.character.status.nourishment;
        let meal = if nourishment.value.min(nourishment.max) - 1.0 <= 0.0 {
            Some(self.plan_meal()?)
        } else {
            None
        };

        self.world.day += 1;
        self.character.age += 1;
        let mut report = DayReport {
            day: self.world.day,
            ..Default::default()
        };

        for effect in furniture_effects {
            self.apply_effect(effect)?;
        }
        self.character.check_overage();

        self.character.status.nourishment.value -= 1.0;
        if let Some(meal) = meal {
            self.eat(meal, &mut report)?;
        }

        self.character.recalculate_lifespan();
        report.death = self.check_death(report.starved);
        Ok(report)
    }

    fn plan_meal(&self) -> Result<Meal, SessionError> {
        if let Some(id) = self.inventory.first_of_type(ItemType::Food, &self.catalog) {
            let effect = self
                .catalog
                .item_by_id(id)
                .and_then(|item| item.effect)
                .ok_or_else(|| SessionError::NotUsable(id.to_string()))?;
            self.require_effect(effect)?;
            return Ok(Meal::Held(id.to_string()));
        }
        if self.character.money >= self.config.rice_price {
            let effect = self
                .catalog
                .item_by_id(FALLBACK_FOOD)
                .and_then(|item| item.effect)
                .ok_or_else(|| SessionError::NotUsable(FALLBACK_FOOD.to_string()))?;
            self.require_effect(effect)?;
            return Ok(Meal::Rice(effect));
        }
        Ok(Meal::Starve)
    }

    fn eat(&mut self, meal: Meal, report: &mut DayReport) -> Result<(), SessionError> {
        match meal {
            Meal::Held(food) => {
                self.use_item(&food)?;
                report.ate = Some(food);
            }
            Meal::Rice(effect) => {
                self.apply_effect(effect)?;
                self.character.money -= self.config.rice_price;
                report.bought_rice = true;
            }
            Meal::Starve => {
                self.character.status.nourishment.value = 0.0;
                self.character.status.health.value -= self.config.starvation_damage;
                self.world
                    .record(LogKind::Injury, "You are starving and have no money for food.");
                report.starved = true;
            }
        }
        Ok(())
    }

    fn check_death(&mut self, starved: bool) -> Option<DeathCause> {
        let cause = if self.character.status.health.value <= 0.0 {
            if starved {
                DeathCause::Starvation
            } else {
                DeathCause::Injury
            }
        } else if self.character.is_past_lifespan() {
            DeathCause::OldAge
        } else {
            return None;
        };

        self.character.dead = true;
        let message = match cause {
            DeathCause::Injury => "You succumb to your injuries.",
            DeathCause::Starvation => "You starve to death.",
            DeathCause::OldAge => "You reach the end of your natural life.",
        };
        self.world.record(LogKind::Important, message);
        Some(cause)
    }

    /// Begin a new life. Unlocks carry over; possessions do not.
    pub fn reincarnate(&mut self) {
        self.character.reincarnate();
        self.character.dead = false;
        self.inventory.clear();
        self.home.clear();
        self.world.lives += 1;
        self.world.record(
            LogKind::Important,
            format!(
                "A new life begins. Reincarnation {} with total aptitude {:.2}.",
                self.world.lives,
                self.character.total_aptitude()
            ),
        );
    }

    fn require_effect(&self, effect: &str) -> Result<(), SessionError> {
        if self.effects.contains(effect) {
            Ok(())
        } else {
            Err(SessionError::MissingEffect(effect.to_string()))
        }
    }

    fn apply_effect(&mut self, effect: &str) -> Result<(), SessionError> {
        let handler = self
            .effects
            .get(effect)
            .ok_or_else(|| SessionError::MissingEffect(effect.to_string()))?;
        let mut ctx = EffectContext {
            character: &mut self.character,
            world: &mut self.world,
            rng: &mut self.rng,
        };
        handler.apply(&mut ctx);
        Ok(())
    }

    /// Snapshot everything that survives a save.
    pub fn save_data(&self) -> SaveData {
        SaveData {
            version: SAVE_VERSION,
            day: self.world.day,
            lives: self.world.lives,
            character: self.character.properties(),
            inventory: self.inventory.clone(),
            home: self.home.clone(),
            unlocks: self.world.unlocks.clone(),
        }
    }

    /// Replace session state with a loaded save.
    ///
    /// The character is rebuilt through its snapshot import, so a missing
    /// age falls back to the starting age and lifespan is recomputed. A
    /// loaded character is alive until the next day says otherwise.
    pub fn restore(&mut self, data: SaveData) {
        let mut character = Character::new();
        character.set_properties(data.character);
        self.character = character;
        self.inventory = data.inventory;
        self.home = data.home;
        self.world.day = data.day;
        self.world.lives = data.lives;
        self.world.unlocks = data.unlocks;
        log::info!(
            "restored save: day {}, {} lives, age {}",
            data.day,
            data.lives,
            self.character.age
        );
    }

    /// Save session state as JSON to a writer
    pub fn save_json<W: Write>(&self, writer: W) -> Result<(), SaveError> {
        persistence::write_json(writer, &self.save_data())
    }

    /// Load session state from a JSON reader
    pub fn load_json<R: Read>(&mut self, reader: R) -> Result<(), SaveError> {
        let data = persistence::read_json(reader)?;
        self.restore(data);
        Ok(())
    }

    /// Save session state as bincode to a writer
    pub fn save_binary<W: Write>(&self, writer: W) -> Result<(), SaveError> {
        persistence::write_binary(writer, &self.save_data())
    }

    /// Load session state from a bincode reader
    pub fn load_binary<R: Read>(&mut self, reader: R) -> Result<(), SaveError> {
        let data = persistence::read_binary(reader)?;
        self.restore(data);
        Ok(())
    }
}

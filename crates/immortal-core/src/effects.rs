//! Effect handlers, resolved by id.
//!
//! Catalog entries only name an effect. The session looks the id up in an
//! [`EffectRegistry`] and runs the handler with an [`EffectContext`] that
//! carries everything the handler may touch, so handlers never reach for
//! shared state on their own.

use std::collections::HashMap;

use immortal_logic::attributes::AttributeType;
use immortal_logic::character::Character;
use rand::rngs::StdRng;
use rand::Rng;

use crate::world::{LogKind, Unlock, World};

/// Days in a year, for food lifespan caps.
const YEAR: f64 = 365.0;

const MANUAL_LEARNED: &str = "The teachings of the manual sink deep into your soul. You'll be able to apply this knowledge in all future reincarnations.";

/// Mutable state handed to a handler for one invocation.
pub struct EffectContext<'a> {
    pub character: &'a mut Character,
    pub world: &'a mut World,
    pub rng: &'a mut StdRng,
}

pub trait EffectHandler {
    fn apply(&self, ctx: &mut EffectContext<'_>);

    /// Whether the player already has what this effect grants.
    ///
    /// `None` for effects that can be applied any number of times.
    fn is_owned(&self, _world: &World) -> Option<bool> {
        None
    }
}

/// Restores stamina overnight.
#[derive(Debug, Clone)]
pub struct Rest {
    pub stamina: f64,
}

impl EffectHandler for Rest {
    fn apply(&self, ctx: &mut EffectContext<'_>) {
        ctx.character.status.stamina.value += self.stamina;
    }
}

/// Raw attribute training, optionally with a health ceiling bonus.
#[derive(Debug, Clone)]
pub struct Train {
    pub gains: Vec<(AttributeType, f64)>,
    pub health_max: f64,
}

impl Train {
    pub fn new(gains: &[(AttributeType, f64)]) -> Self {
        Self {
            gains: gains.to_vec(),
            health_max: 0.0,
        }
    }

    pub fn with_health_max(mut self, bonus: f64) -> Self {
        self.health_max = bonus;
        self
    }
}

impl EffectHandler for Train {
    fn apply(&self, ctx: &mut EffectContext<'_>) {
        for &(attr, amount) in &self.gains {
            ctx.character.increase_attribute(attr, amount);
        }
        ctx.character.status.health.max += self.health_max;
    }
}

/// Eating: one point of nourishment plus a chance at a lasting boost.
///
/// A boost raises the health ceiling by one, optionally the stamina
/// ceiling too, and optionally adds a day of food lifespan while it is
/// below `lifespan_cap`.
#[derive(Debug, Clone)]
pub struct Eat {
    pub boost_chance: f64,
    pub stamina_max: bool,
    pub lifespan_cap: Option<f64>,
}

impl Eat {
    pub fn plain() -> Self {
        Self {
            boost_chance: 0.0,
            stamina_max: false,
            lifespan_cap: None,
        }
    }

    pub fn healthy(boost_chance: f64) -> Self {
        Self {
            boost_chance,
            ..Self::plain()
        }
    }

    pub fn longevity(boost_chance: f64, cap_years: f64) -> Self {
        Self {
            boost_chance,
            stamina_max: false,
            lifespan_cap: Some(cap_years * YEAR),
        }
    }

    pub fn hearty(boost_chance: f64) -> Self {
        Self {
            boost_chance,
            stamina_max: true,
            lifespan_cap: None,
        }
    }

    fn rolls_boost(&self, rng: &mut StdRng) -> bool {
        if self.boost_chance <= 0.0 {
            false
        } else if self.boost_chance >= 1.0 {
            true
        } else {
            rng.gen::<f64>() < self.boost_chance
        }
    }
}

impl EffectHandler for Eat {
    fn apply(&self, ctx: &mut EffectContext<'_>) {
        let character = &mut *ctx.character;
        character.status.nourishment.value += 1.0;
        if self.rolls_boost(ctx.rng) {
            character.status.health.max += 1.0;
            if self.stamina_max {
                character.status.stamina.max += 1.0;
            }
            if let Some(cap) = self.lifespan_cap {
                if character.food_lifespan < cap {
                    character.food_lifespan += 1.0;
                }
            }
        }
        character.check_overage();
    }
}

/// Reading a manual grants a permanent unlock.
#[derive(Debug, Clone)]
pub struct Study {
    pub unlock: Unlock,
}

impl EffectHandler for Study {
    fn apply(&self, ctx: &mut EffectContext<'_>) {
        ctx.world.unlocks.grant(self.unlock);
        ctx.world.record(LogKind::Standard, MANUAL_LEARNED);
    }

    fn is_owned(&self, world: &World) -> Option<bool> {
        Some(world.unlocks.has(self.unlock))
    }
}

/// Handlers by effect id.
#[derive(Default)]
pub struct EffectRegistry {
    handlers: HashMap<String, Box<dyn EffectHandler>>,
}

impl EffectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry covering every effect the standard catalog names.
    pub fn standard() -> Self {
        use AttributeType::*;

        let mut registry = Self::new();

        // Beds
        registry.register("blanket", Rest { stamina: 1.0 });
        registry.register("mat", Rest { stamina: 2.0 });
        registry.register("canopyBed", Rest { stamina: 3.0 });
        registry.register("heatedBed", Rest { stamina: 4.0 });
        registry.register("bedOfNails", Train::new(&[(Toughness, 0.1)]));

        // Baths
        registry.register("waterBucket", Train::new(&[(Charisma, 0.01)]));
        registry.register("washBasin", Train::new(&[(Charisma, 0.05)]));
        registry.register("woodenTub", Train::new(&[(Charisma, 0.1)]));
        registry.register("bronzeTub", Train::new(&[(Charisma, 0.2)]));
        registry.register(
            "heatedTub",
            Train::new(&[(Charisma, 0.2)]).with_health_max(1.0),
        );

        // Kitchens
        for (id, amount) in [
            ("cookPot", 0.01),
            ("roastingSpit", 0.02),
            ("wok", 0.05),
            ("chefKitchen", 0.1),
        ] {
            registry.register(
                id,
                Train::new(&[(Strength, amount), (Speed, amount), (Toughness, amount)]),
            );
        }

        // Workbenches
        registry.register("anvil", Train::new(&[(MetalLore, 0.1)]));
        registry.register("herbGarden", Train::new(&[(PlantLore, 0.1)]));
        registry.register("cauldron", Train::new(&[(Alchemy, 0.1)]));

        // Food
        registry.register("rice", Eat::plain());
        registry.register("cabbage", Eat::healthy(0.01));
        registry.register("beans", Eat::healthy(0.02));
        registry.register("broccoli", Eat::longevity(0.05, 40.0));
        registry.register("melon", Eat::longevity(0.1, 54.0));
        registry.register("peach", Eat::longevity(0.2, 72.0));
        registry.register("meat", Eat::hearty(1.0));
        registry.register("carp", Eat::hearty(0.2));

        // Manuals
        for (id, unlock) in [
            ("perpetualFarmingManual", Unlock::AutoReplant),
            ("restartActivityManual", Unlock::AutoRestart),
            ("autoSellManual", Unlock::AutoSell),
            ("autoUseManual", Unlock::AutoUse),
            ("autoBuyLandManual", Unlock::AutoBuyLand),
            ("autoBuyHomeManual", Unlock::AutoBuyHome),
            ("autoBuyFurnitureManual", Unlock::AutoBuyFurniture),
            ("autoFieldManual", Unlock::AutoField),
        ] {
            registry.register(id, Study { unlock });
        }

        registry
    }

    /// Add or replace the handler for `id`.
    pub fn register(&mut self, id: impl Into<String>, handler: impl EffectHandler + 'static) {
        self.handlers.insert(id.into(), Box::new(handler));
    }

    pub fn get(&self, id: &str) -> Option<&dyn EffectHandler> {
        self.handlers.get(id).map(|h| h.as_ref())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.handlers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}
